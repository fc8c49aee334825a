//! Instant-runoff voting (alternative vote).

use log::{debug, info};
use snafu::{ensure, OptionExt};

use crate::ballot::Ballot;
use crate::config::*;
use crate::round::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum State {
    Counting,
    Eliminating,
    Won(CandidateId),
}

/// Counts and eliminates one candidate per round until a candidate holds an
/// absolute majority of the first preferences.
///
/// `count` fills the tallies of the round (called after `begin_round`),
/// `loser` picks the standing candidate to eliminate.
pub(crate) fn eliminate_until_majority<C, L>(
    ballot: &mut Ballot,
    method: Method,
    count: C,
    loser: L,
) -> Result<TallyResult, TallyErrors>
where
    C: Fn(&mut Ballot),
    L: Fn(&Ballot) -> Option<CandidateId>,
{
    // Every elimination removes one candidate: the last one standing always
    // has the majority of the remaining votes.
    let max_rounds = ballot.candidates().len() as RoundId;
    let mut round_stats: Vec<RoundStats> = Vec::new();
    let mut state = State::Counting;
    ballot.round = 1;

    loop {
        debug!("{}: round {:?} state {:?}", method, ballot.round, state);
        state = match state {
            State::Counting => {
                begin_round(ballot);
                count(ballot);
                info!(
                    "Round {}: {:?}",
                    ballot.round,
                    ballot
                        .standing()
                        .map(|c| (c.name(), c.votes(), c.last_votes()))
                        .collect::<Vec<_>>()
                );
                match majority_winner(ballot)? {
                    Some(cid) => State::Won(cid),
                    None => State::Eliminating,
                }
            }
            State::Eliminating => {
                ensure!(ballot.round < max_rounds, NoConvergenceSnafu);
                let cid = loser(ballot).context(NoConvergenceSnafu)?;
                ballot.eliminate(cid);
                info!("Round {}: eliminating candidate {}", ballot.round, cid);
                round_stats.push(snapshot(ballot, &[cid]));
                ballot.round += 1;
                State::Counting
            }
            State::Won(cid) => {
                return declare_winner(ballot, method, cid, round_stats);
            }
        };
    }
}

/// Runs an instant-runoff election.
///
/// Each round, every participant votes for its most preferred standing
/// candidate. Without absolute majority, the candidate with the fewest votes
/// is eliminated (the lower identifier among ties).
pub fn run_instant_runoff(ballot: &mut Ballot) -> Result<TallyResult, TallyErrors> {
    eliminate_until_majority(
        ballot,
        Method::InstantRunoff,
        count_first_preferences,
        |b| least_standing(b, |c| c.votes()),
    )
}
