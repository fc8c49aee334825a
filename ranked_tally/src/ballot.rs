use log::debug;
use snafu::ensure;

use std::collections::HashMap;

use crate::config::*;

/// A candidate of the election, with its tallies for the current round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    pub(crate) id: CandidateId,
    pub(crate) name: String,
    pub(crate) votes: u64,
    pub(crate) last_votes: u64,
    pub(crate) eliminated: bool,
}

impl Candidate {
    pub fn new(id: CandidateId, name: &str) -> Candidate {
        Candidate {
            id,
            name: name.to_string(),
            votes: 0,
            last_votes: 0,
            eliminated: false,
        }
    }

    pub fn id(&self) -> CandidateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of votes received in the last counted round.
    pub fn votes(&self) -> u64 {
        self.votes
    }

    /// Number of last-place preferences received in the last counted round.
    pub fn last_votes(&self) -> u64 {
        self.last_votes
    }

    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }
}

/// A voter and its ranking, the most preferred candidate first.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Participant {
    label: Option<String>,
    choices: Vec<CandidateId>,
}

impl Participant {
    pub fn new(choices: Vec<CandidateId>) -> Participant {
        Participant {
            label: None,
            choices,
        }
    }

    pub fn with_label(label: &str, choices: Vec<CandidateId>) -> Participant {
        Participant {
            label: Some(label.to_string()),
            choices,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn choices(&self) -> &[CandidateId] {
        &self.choices
    }
}

/// The full state of an election.
///
/// Candidates are stored in declaration order and never moved. They are found
/// through the identifier index, which stays valid across rounds.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ballot {
    candidates: Vec<Candidate>,
    index: HashMap<CandidateId, usize>,
    participants: Vec<Participant>,
    pub(crate) winners: Vec<CandidateId>,
    pub(crate) round: RoundId,
}

impl Ballot {
    /// Builds a ballot and checks that every ranking only refers to declared
    /// candidates.
    pub fn new(
        candidates: Vec<Candidate>,
        participants: Vec<Participant>,
    ) -> Result<Ballot, TallyErrors> {
        ensure!(!candidates.is_empty(), EmptyElectionSnafu);

        let mut index: HashMap<CandidateId, usize> = HashMap::new();
        for (idx, c) in candidates.iter().enumerate() {
            ensure!(
                index.insert(c.id, idx).is_none(),
                DuplicateCandidateSnafu { id: c.id }
            );
        }

        for (pidx, p) in participants.iter().enumerate() {
            if let Some(cid) = p.choices.iter().find(|cid| !index.contains_key(cid)) {
                return UnknownCandidateSnafu {
                    participant: pidx + 1,
                    candidate: *cid,
                }
                .fail();
            }
        }
        debug!(
            "Ballot::new: {:?} candidates, {:?} participants",
            candidates.len(),
            participants.len()
        );

        Ok(Ballot {
            candidates,
            index,
            participants,
            winners: Vec::new(),
            round: 1,
        })
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.index.get(&id).map(|idx| &self.candidates[*idx])
    }

    pub fn candidate_by_name(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.name == name)
    }

    pub(crate) fn candidate_mut(&mut self, id: CandidateId) -> Option<&mut Candidate> {
        match self.index.get(&id) {
            Some(idx) => self.candidates.get_mut(*idx),
            None => None,
        }
    }

    pub(crate) fn candidates_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.candidates.iter_mut()
    }

    /// The candidates that have not been eliminated, in declaration order.
    pub fn standing(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter().filter(|c| !c.eliminated)
    }

    pub fn is_standing(&self, id: CandidateId) -> bool {
        self.candidate(id).map(|c| !c.eliminated).unwrap_or(false)
    }

    /// The declared winners. Empty until a method terminates successfully.
    pub fn winners(&self) -> &[CandidateId] {
        &self.winners
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    /// Marks a candidate as eliminated. Returns false if the candidate was
    /// unknown or already eliminated.
    pub(crate) fn eliminate(&mut self, id: CandidateId) -> bool {
        match self.candidate_mut(id) {
            Some(c) if !c.eliminated => {
                c.eliminated = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cands(names: &[&str]) -> Vec<Candidate> {
        names
            .iter()
            .enumerate()
            .map(|(idx, n)| Candidate::new(CandidateId(idx as u32 + 1), n))
            .collect()
    }

    fn ranking(ids: &[u32]) -> Participant {
        Participant::new(ids.iter().map(|x| CandidateId(*x)).collect())
    }

    #[test]
    fn new_ballot_starts_at_round_one() {
        let b = Ballot::new(cands(&["Vanille", "Chocolat"]), vec![ranking(&[1, 2])]).unwrap();
        assert_eq!(b.round(), 1);
        assert!(b.winners().is_empty());
        assert_eq!(b.standing().count(), 2);
        assert_eq!(b.candidate(CandidateId(2)).unwrap().name(), "Chocolat");
        assert_eq!(
            b.candidate_by_name("Vanille").map(|c| c.id()),
            Some(CandidateId(1))
        );
    }

    #[test]
    fn rejects_unknown_candidate() {
        let res = Ballot::new(
            cands(&["Vanille", "Chocolat"]),
            vec![ranking(&[1, 2]), ranking(&[2, 3])],
        );
        assert_eq!(
            res,
            Err(TallyErrors::UnknownCandidate {
                participant: 2,
                candidate: CandidateId(3)
            })
        );
    }

    #[test]
    fn rejects_empty_and_duplicated_candidates() {
        assert_eq!(
            Ballot::new(vec![], vec![]),
            Err(TallyErrors::EmptyElection)
        );
        let dup = vec![
            Candidate::new(CandidateId(1), "Vanille"),
            Candidate::new(CandidateId(1), "Fraise"),
        ];
        assert_eq!(
            Ballot::new(dup, vec![]),
            Err(TallyErrors::DuplicateCandidate { id: CandidateId(1) })
        );
    }

    #[test]
    fn elimination_is_permanent() {
        let mut b = Ballot::new(cands(&["A", "B", "C"]), vec![]).unwrap();
        assert!(b.eliminate(CandidateId(2)));
        assert!(!b.eliminate(CandidateId(2)));
        assert!(!b.eliminate(CandidateId(9)));
        assert!(!b.is_standing(CandidateId(2)));
        let standing: Vec<CandidateId> = b.standing().map(|c| c.id()).collect();
        assert_eq!(standing, vec![CandidateId(1), CandidateId(3)]);
    }
}
