//! Primitives shared by all the counting methods.

use log::{debug, info};
use snafu::{ensure, OptionExt};

use std::cmp::Reverse;

use crate::ballot::{Ballot, Candidate};
use crate::config::*;

/// Starts a new round: the tallies of the standing candidates are reset and
/// the winners are cleared. Eliminated candidates keep their last tallies.
pub fn begin_round(ballot: &mut Ballot) {
    for c in ballot.candidates_mut().filter(|c| !c.eliminated) {
        c.votes = 0;
        c.last_votes = 0;
    }
    ballot.winners.clear();
    debug!("begin_round: round {:?}", ballot.round);
}

/// Sum of the votes held by the standing candidates.
pub fn active_votes(ballot: &Ballot) -> u64 {
    ballot.standing().map(|c| c.votes).sum()
}

/// The share of the active votes held by a candidate, in [0, 1].
pub fn vote_fraction(ballot: &Ballot, id: CandidateId) -> Result<f64, TallyErrors> {
    let candidate = ballot
        .candidate(id)
        .context(MissingCandidateSnafu { candidate: id })?;
    let total = active_votes(ballot);
    ensure!(
        total > 0,
        NoActiveVotesSnafu {
            round: ballot.round
        }
    );
    Ok(candidate.votes as f64 / total as f64)
}

/// The standing candidate with the smallest key. Ties go to the lower identifier.
pub fn least_standing<K, F>(ballot: &Ballot, key: F) -> Option<CandidateId>
where
    K: Ord,
    F: Fn(&Candidate) -> K,
{
    ballot
        .standing()
        .min_by_key(|c| (key(c), c.id))
        .map(|c| c.id)
}

/// The standing candidate with the largest key. Ties go to the lower identifier.
pub fn most_standing<K, F>(ballot: &Ballot, key: F) -> Option<CandidateId>
where
    K: Ord,
    F: Fn(&Candidate) -> K,
{
    ballot
        .standing()
        .min_by_key(|c| (Reverse(key(c)), c.id))
        .map(|c| c.id)
}

/// All the standing candidates, largest key first, ties ordered by identifier.
pub fn ranked_standing<K, F>(ballot: &Ballot, key: F) -> Vec<CandidateId>
where
    K: Ord,
    F: Fn(&Candidate) -> K,
{
    let mut res: Vec<&Candidate> = ballot.standing().collect();
    res.sort_by_key(|c| (Reverse(key(c)), c.id));
    res.iter().map(|c| c.id).collect()
}

/// One vote per participant for the first standing candidate of its ranking.
/// Exhausted rankings do not vote.
pub fn count_first_preferences(ballot: &mut Ballot) {
    let picks: Vec<Option<CandidateId>> = ballot
        .participants()
        .iter()
        .map(|p| p.choices().iter().copied().find(|cid| ballot.is_standing(*cid)))
        .collect();
    for (pidx, pick) in picks.into_iter().enumerate() {
        match pick {
            Some(cid) => {
                if let Some(c) = ballot.candidate_mut(cid) {
                    c.votes += 1;
                }
            }
            None => debug!(
                "count_first_preferences: participant #{} is exhausted",
                pidx + 1
            ),
        }
    }
}

/// One last-place vote per participant for the last standing candidate of
/// its ranking.
pub fn count_last_preferences(ballot: &mut Ballot) {
    let picks: Vec<CandidateId> = ballot
        .participants()
        .iter()
        .filter_map(|p| {
            p.choices()
                .iter()
                .rev()
                .copied()
                .find(|cid| ballot.is_standing(*cid))
        })
        .collect();
    for cid in picks {
        if let Some(c) = ballot.candidate_mut(cid) {
            c.last_votes += 1;
        }
    }
}

/// The standing candidate with the most votes, if it holds an absolute majority.
pub fn majority_winner(ballot: &Ballot) -> Result<Option<CandidateId>, TallyErrors> {
    let top = most_standing(ballot, |c| c.votes).context(NoActiveVotesSnafu {
        round: ballot.round,
    })?;
    let frac = vote_fraction(ballot, top)?;
    debug!(
        "majority_winner: round {:?}: top candidate {:?} holds {:.3}",
        ballot.round, top, frac
    );
    if frac > 0.5 {
        Ok(Some(top))
    } else {
        Ok(None)
    }
}

/// Records the state of the ballot at the end of the current round.
pub fn snapshot(ballot: &Ballot, eliminated: &[CandidateId]) -> RoundStats {
    RoundStats {
        round: ballot.round,
        candidates: ballot
            .candidates()
            .iter()
            .map(|c| CandidateStats {
                id: c.id,
                name: c.name.clone(),
                votes: c.votes,
                last_votes: c.last_votes,
                eliminated: c.eliminated,
                winner: ballot.winners.contains(&c.id),
            })
            .collect(),
        eliminated: eliminated.to_vec(),
    }
}

/// Appends the winner, records the final round and assembles the result.
pub(crate) fn declare_winner(
    ballot: &mut Ballot,
    method: Method,
    winner: CandidateId,
    mut round_stats: Vec<RoundStats>,
) -> Result<TallyResult, TallyErrors> {
    let winner_name = ballot
        .candidate(winner)
        .context(MissingCandidateSnafu { candidate: winner })?
        .name()
        .to_string();
    ballot.winners.push(winner);
    round_stats.push(snapshot(ballot, &[]));
    info!(
        "{}: {} ({}) elected in round {}",
        method, winner_name, winner, ballot.round
    );
    Ok(TallyResult {
        method,
        winner,
        winner_name,
        round_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::Participant;

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

    #[test]
    fn begin_round_leaves_eliminated_counts() {
        let mut b = ballot(&["A", "B", "C"], &[&[1], &[2], &[2]]);
        count_first_preferences(&mut b);
        b.eliminate(CandidateId(1));
        b.winners.push(CandidateId(2));
        begin_round(&mut b);
        assert_eq!(b.candidate(CandidateId(1)).unwrap().votes(), 1);
        assert_eq!(b.candidate(CandidateId(2)).unwrap().votes(), 0);
        assert!(b.winners().is_empty());
    }

    #[test]
    fn fraction_of_active_votes() {
        let mut b = ballot(&["A", "B", "C"], &[&[1], &[2], &[2], &[3]]);
        count_first_preferences(&mut b);
        assert_eq!(vote_fraction(&b, CandidateId(2)), Ok(0.5));
        // The eliminated candidate's votes are not part of the total.
        b.eliminate(CandidateId(3));
        let f = vote_fraction(&b, CandidateId(2)).unwrap();
        assert!((f - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn fraction_without_votes_fails() {
        let mut b = ballot(&["A", "B"], &[]);
        count_first_preferences(&mut b);
        assert_eq!(
            vote_fraction(&b, CandidateId(1)),
            Err(TallyErrors::NoActiveVotes { round: 1 })
        );
        assert_eq!(
            vote_fraction(&b, CandidateId(7)),
            Err(TallyErrors::MissingCandidate {
                candidate: CandidateId(7)
            })
        );
    }

    #[test]
    fn selection_breaks_ties_by_identifier() {
        let mut b = ballot(&["A", "B", "C", "D"], &[&[2], &[3], &[4], &[4]]);
        count_first_preferences(&mut b);
        // A has no vote, B and C are tied.
        assert_eq!(least_standing(&b, |c| c.votes()), Some(CandidateId(1)));
        b.eliminate(CandidateId(1));
        assert_eq!(least_standing(&b, |c| c.votes()), Some(CandidateId(2)));
        assert_eq!(most_standing(&b, |c| c.votes()), Some(CandidateId(4)));
        assert_eq!(
            ranked_standing(&b, |c| c.votes()),
            vec![CandidateId(4), CandidateId(2), CandidateId(3)]
        );
    }

    #[test]
    fn scans_skip_eliminated_candidates() {
        let mut b = ballot(&["A", "B", "C"], &[&[1, 2, 3], &[3, 1], &[]]);
        b.eliminate(CandidateId(1));
        count_first_preferences(&mut b);
        count_last_preferences(&mut b);
        let c = |id: u32| b.candidate(CandidateId(id)).unwrap().clone();
        assert_eq!((c(2).votes(), c(2).last_votes()), (1, 0));
        assert_eq!((c(3).votes(), c(3).last_votes()), (1, 2));
        assert_eq!(c(1).last_votes(), 0);
        assert_eq!(active_votes(&b), 2);
    }

    #[test]
    fn majority_requires_more_than_half() {
        let mut b = ballot(&["A", "B"], &[&[1], &[2]]);
        count_first_preferences(&mut b);
        assert_eq!(majority_winner(&b), Ok(None));

        let mut b = ballot(&["A", "B"], &[&[1], &[2], &[2]]);
        count_first_preferences(&mut b);
        assert_eq!(majority_winner(&b), Ok(Some(CandidateId(2))));
    }

    #[test]
    fn snapshot_records_status() {
        let mut b = ballot(&["A", "B"], &[&[1], &[2], &[2]]);
        count_first_preferences(&mut b);
        b.eliminate(CandidateId(1));
        b.winners.push(CandidateId(2));
        let rs = snapshot(&b, &[CandidateId(1)]);
        assert_eq!(rs.round, 1);
        assert!(rs.candidates[0].eliminated);
        assert!(rs.candidates[1].winner);
        assert_eq!(rs.active_votes(), 3);
    }
}
