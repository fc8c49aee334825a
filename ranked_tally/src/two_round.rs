//! Two-round runoff.
//!
//! Every participant gives exactly two preferences: the first one is used
//! in the first round, the second one in the runoff between the two best
//! candidates of the first round.

use log::{debug, info};
use snafu::{ensure, OptionExt};

use crate::ballot::Ballot;
use crate::config::*;
use crate::round::*;

const PREFERENCES_PER_PARTICIPANT: usize = 2;
const RUNOFF_CANDIDATES: usize = 2;

fn check_preferences(ballot: &Ballot) -> Result<(), TallyErrors> {
    for (pidx, p) in ballot.participants().iter().enumerate() {
        ensure!(
            p.choices().len() == PREFERENCES_PER_PARTICIPANT,
            WrongPreferenceCountSnafu {
                participant: pidx + 1,
                expected: PREFERENCES_PER_PARTICIPANT,
                found: p.choices().len(),
            }
        );
    }
    Ok(())
}

// Each participant votes with the preference matching the current round.
fn count_votes(ballot: &mut Ballot) {
    let rank = (ballot.round - 1) as usize;
    let picks: Vec<CandidateId> = ballot
        .participants()
        .iter()
        .filter_map(|p| p.choices().get(rank).copied())
        .filter(|cid| ballot.is_standing(*cid))
        .collect();
    for cid in picks {
        if let Some(c) = ballot.candidate_mut(cid) {
            c.votes += 1;
        }
    }
}

/// Runs a two-round election.
///
/// The first round is won by an absolute majority. Otherwise all the
/// candidates but the two best are eliminated, and the runoff is won by the
/// candidate with the most votes, without majority check. Ties at the cutoff
/// and in the runoff go to the lower identifier.
pub fn run_two_round(ballot: &mut Ballot) -> Result<TallyResult, TallyErrors> {
    check_preferences(ballot)?;
    let mut round_stats: Vec<RoundStats> = Vec::new();

    ballot.round = 1;
    begin_round(ballot);
    count_votes(ballot);
    debug!(
        "run_two_round: first round tally: {:?}",
        ballot
            .standing()
            .map(|c| (c.id(), c.votes()))
            .collect::<Vec<_>>()
    );

    if let Some(winner) = majority_winner(ballot)? {
        return declare_winner(ballot, Method::TwoRound, winner, round_stats);
    }

    let eliminated: Vec<CandidateId> = ranked_standing(ballot, |c| c.votes())
        .into_iter()
        .skip(RUNOFF_CANDIDATES)
        .collect();
    for cid in eliminated.iter() {
        ballot.eliminate(*cid);
    }
    info!(
        "Round 1: no absolute majority, runoff between {:?}",
        ballot.standing().map(|c| c.name()).collect::<Vec<_>>()
    );
    round_stats.push(snapshot(ballot, &eliminated));

    ballot.round += 1;
    begin_round(ballot);
    count_votes(ballot);
    // No majority check: even a 0-0 runoff has a winner.
    let winner = most_standing(ballot, |c| c.votes()).context(NoActiveVotesSnafu {
        round: ballot.round,
    })?;
    declare_winner(ballot, Method::TwoRound, winner, round_stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::{Candidate, Participant};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ballot(names: &[&str], rankings: &[&[u32]]) -> Ballot {
        let candidates = names
            .iter()
            .enumerate()
            .map(|(idx, n)| Candidate::new(CandidateId(idx as u32 + 1), n))
            .collect();
        let participants = rankings
            .iter()
            .map(|r| Participant::new(r.iter().map(|x| CandidateId(*x)).collect()))
            .collect();
        Ballot::new(candidates, participants).unwrap()
    }

    fn votes(rs: &RoundStats) -> Vec<u64> {
        rs.candidates.iter().map(|cs| cs.votes).collect()
    }

    #[test]
    fn absolute_majority_in_first_round() {
        init();
        let mut b = ballot(&["A", "B"], &[&[1, 2], &[1, 2], &[1, 2]]);
        let res = run_two_round(&mut b).unwrap();
        assert_eq!(res.winner, CandidateId(1));
        assert_eq!(res.winner_name, "A");
        assert_eq!(res.round_stats.len(), 1);
        assert_eq!(votes(&res.round_stats[0]), vec![3, 0]);
        assert!(res.round_stats[0].candidates[0].winner);
        assert_eq!(b.winners(), &[CandidateId(1)]);
        assert_eq!(b.round(), 1);
    }

    #[test]
    fn runoff_between_the_two_best() {
        init();
        // First round: A=2, B=2, C=1. C is out, its voter goes to B.
        let mut b = ballot(
            &["A", "B", "C"],
            &[&[1, 1], &[1, 1], &[2, 2], &[2, 2], &[3, 2]],
        );
        let res = run_two_round(&mut b).unwrap();
        assert_eq!(res.round_stats.len(), 2);
        assert_eq!(res.round_stats[0].eliminated, vec![CandidateId(3)]);
        assert_eq!(votes(&res.round_stats[1]), vec![2, 3, 1]);
        assert_eq!(res.winner, CandidateId(2));
        assert_eq!(b.round(), 2);
        assert!(b.candidate(CandidateId(3)).unwrap().is_eliminated());
    }

    #[test]
    fn runoff_is_won_without_majority() {
        init();
        // Second round: A=2, B=1, and two votes lost on the eliminated C.
        let mut b = ballot(
            &["A", "B", "C"],
            &[&[1, 1], &[1, 1], &[2, 3], &[2, 2], &[3, 3]],
        );
        let res = run_two_round(&mut b).unwrap();
        assert_eq!(res.round_stats[1].active_votes(), 3);
        assert_eq!(res.winner, CandidateId(1));
    }

    #[test]
    fn cutoff_tie_keeps_lower_identifiers() {
        init();
        // A=1, B=1, C=1, D=1: only A and B go to the runoff.
        let mut b = ballot(
            &["A", "B", "C", "D"],
            &[&[1, 2], &[2, 2], &[3, 2], &[4, 1]],
        );
        let res = run_two_round(&mut b).unwrap();
        assert_eq!(
            res.round_stats[0].eliminated,
            vec![CandidateId(3), CandidateId(4)]
        );
        assert_eq!(res.winner, CandidateId(2));
    }

    #[test]
    fn runoff_tie_goes_to_lower_identifier() {
        init();
        let mut b = ballot(&["A", "B"], &[&[1, 2], &[2, 1]]);
        let res = run_two_round(&mut b).unwrap();
        assert_eq!(votes(&res.round_stats[1]), vec![1, 1]);
        assert_eq!(res.winner, CandidateId(1));
    }

    #[test]
    fn rejects_wrong_preference_count() {
        init();
        let mut b = ballot(&["A", "B", "C"], &[&[1, 2], &[1, 2, 3]]);
        assert_eq!(
            run_two_round(&mut b),
            Err(TallyErrors::WrongPreferenceCount {
                participant: 2,
                expected: 2,
                found: 3
            })
        );
        assert!(b.winners().is_empty());

        let mut b = ballot(&["A", "B"], &[&[1]]);
        assert!(matches!(
            run_two_round(&mut b),
            Err(TallyErrors::WrongPreferenceCount { found: 1, .. })
        ));
    }

    #[test]
    fn empty_runoff_goes_to_lower_identifier() {
        init();
        // Nobody gives a second preference to A or B.
        let mut b = ballot(&["A", "B", "C"], &[&[1, 3], &[2, 3], &[1, 3], &[2, 3]]);
        let res = run_two_round(&mut b).unwrap();
        assert_eq!(res.round_stats[0].eliminated, vec![CandidateId(3)]);
        assert_eq!(votes(&res.round_stats[0]), vec![2, 2, 0]);
        assert_eq!(votes(&res.round_stats[1]), vec![0, 0, 0]);
        assert_eq!(res.round_stats[1].active_votes(), 0);
        assert_eq!(res.winner, CandidateId(1));
        assert_eq!(b.winners(), &[CandidateId(1)]);
    }

    #[test]
    fn no_participant_fails() {
        init();
        let mut b = ballot(&["A", "B"], &[]);
        assert_eq!(
            run_two_round(&mut b),
            Err(TallyErrors::NoActiveVotes { round: 1 })
        );
    }
}
