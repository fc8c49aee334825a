pub use crate::ballot::*;
pub use crate::config::*;

/// A builder for assembling a ballot.
///
/// Candidates receive the identifiers 1, 2, ... in the order given.
///
/// ```
/// pub use ranked_tally::builder::Builder;
/// pub use ranked_tally::{run_election, Method};
/// # use ranked_tally::TallyErrors;
///
/// let mut builder = Builder::new()
///     .candidates(&["Vanille".to_string(), "Chocolat".to_string()])?;
///
/// builder.add_participant_simple(&["Chocolat".to_string(), "Vanille".to_string()])?;
/// builder.add_participant(Some("DUPONT Marie"), &[2, 1])?;
///
/// let mut ballot = builder.build()?;
/// let result = run_election(&mut ballot, Method::InstantRunoff)?;
/// assert_eq!(result.winner_name, "Chocolat");
///
/// # Ok::<(), TallyErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _participants: Vec<Participant>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn candidates(self, names: &[String]) -> Result<Builder, TallyErrors> {
        Ok(Builder {
            _candidates: names
                .iter()
                .enumerate()
                .map(|(idx, name)| Candidate::new(CandidateId((idx + 1) as u32), name))
                .collect(),
            _participants: self._participants,
        })
    }

    /// Adds a participant from the names of the candidates, in order of
    /// preference.
    ///
    /// It is the simplest use case for most cases.
    pub fn add_participant_simple(&mut self, names: &[String]) -> Result<(), TallyErrors> {
        let mut choices: Vec<CandidateId> = Vec::new();
        for name in names {
            let cand = self
                ._candidates
                .iter()
                .find(|c| c.name() == name.as_str());
            match cand {
                Some(c) => choices.push(c.id()),
                None => {
                    return Err(TallyErrors::UnknownCandidateName { name: name.clone() });
                }
            }
        }
        self._participants.push(Participant::new(choices));
        Ok(())
    }

    /// Adds a participant from candidate identifiers.
    ///
    /// The identifiers are only checked when the ballot is built.
    pub fn add_participant(&mut self, label: Option<&str>, ids: &[u32]) -> Result<(), TallyErrors> {
        let choices: Vec<CandidateId> = ids.iter().map(|x| CandidateId(*x)).collect();
        let p = match label {
            Some(l) => Participant::with_label(l, choices),
            None => Participant::new(choices),
        };
        self._participants.push(p);
        Ok(())
    }

    pub fn build(self) -> Result<Ballot, TallyErrors> {
        Ballot::new(self._candidates, self._participants)
    }
}
