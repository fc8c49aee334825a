// ********* Identifiers ***********

use snafu::Snafu;
use std::fmt::Display;
use std::str::FromStr;

pub type RoundId = u32;

/// The identifier of a candidate.
///
/// Identifiers are assigned sequentially, starting at 1, in the order in
/// which the candidates were declared. They are also the secondary key of
/// every tie-break: among tied candidates, the lower identifier is picked.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct CandidateId(pub u32);

impl Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ******** Output data structures *********

/// The state of one candidate at the end of a round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateStats {
    pub id: CandidateId,
    pub name: String,
    pub votes: u64,
    /// Only filled by the Coombs method.
    pub last_votes: u64,
    pub eliminated: bool,
    pub winner: bool,
}

/// Statistics for one round
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: RoundId,
    /// All the candidates, in declaration order.
    pub candidates: Vec<CandidateStats>,
    /// The candidates eliminated at the end of this round.
    pub eliminated: Vec<CandidateId>,
}

impl RoundStats {
    /// Sum of the votes held by the candidates still running in this round.
    pub fn active_votes(&self) -> u64 {
        self.candidates
            .iter()
            .filter(|cs| !cs.eliminated || self.eliminated.contains(&cs.id))
            .map(|cs| cs.votes)
            .sum()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyResult {
    pub method: Method,
    pub winner: CandidateId,
    pub winner_name: String,
    pub round_stats: Vec<RoundStats>,
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyErrors {
    #[snafu(display("The election does not declare any candidate"))]
    EmptyElection,

    #[snafu(display("Candidate {id} is declared more than once"))]
    DuplicateCandidate { id: CandidateId },

    #[snafu(display("Participant #{participant} ranks unknown candidate {candidate}"))]
    UnknownCandidate {
        participant: usize,
        candidate: CandidateId,
    },

    #[snafu(display("Candidate {candidate} is not on the ballot"))]
    MissingCandidate { candidate: CandidateId },

    #[snafu(display("No candidate is named {name:?}"))]
    UnknownCandidateName { name: String },

    #[snafu(display(
        "Participant #{participant} ranks {found} candidates, {expected} were expected"
    ))]
    WrongPreferenceCount {
        participant: usize,
        expected: usize,
        found: usize,
    },

    #[snafu(display("Round {round}: no standing candidate received any vote"))]
    NoActiveVotes { round: RoundId },

    #[snafu(display("The tabulation did not converge"))]
    NoConvergence,
}

// ********* Configuration **********

/// The counting method.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Method {
    /// Two-round runoff: each participant gives one vote per round.
    TwoRound,
    /// Instant-runoff (alternative vote): eliminates the candidate with the
    /// fewest first preferences.
    InstantRunoff,
    /// Coombs method: eliminates the candidate with the most last preferences.
    Coombs,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::TwoRound, Method::InstantRunoff, Method::Coombs];

    pub fn name(&self) -> &'static str {
        match self {
            Method::TwoRound => "two_round",
            Method::InstantRunoff => "instant_runoff",
            Method::Coombs => "coombs",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Method {
    type Err = String;

    // Also accepts the historical names of the methods.
    fn from_str(s: &str) -> Result<Method, String> {
        match s {
            "two_round" | "majoritaire" => Ok(Method::TwoRound),
            "instant_runoff" | "irv" | "alternatif" => Ok(Method::InstantRunoff),
            "coombs" | "ranked" | "preferentiel" => Ok(Method::Coombs),
            x => Err(format!("unknown voting algorithm {:?}", x)),
        }
    }
}
