//! Coombs method.
//!
//! The majority check is the same as for instant-runoff, but the candidate
//! eliminated at each round is the one ranked last by the most participants.

use crate::ballot::Ballot;
use crate::config::*;
use crate::instant_runoff::eliminate_until_majority;
use crate::round::*;

fn count_votes(ballot: &mut Ballot) {
    count_first_preferences(ballot);
    count_last_preferences(ballot);
}

/// Runs an election with the Coombs method.
///
/// Ties for the most last places go to the lower identifier.
pub fn run_coombs(ballot: &mut Ballot) -> Result<TallyResult, TallyErrors> {
    eliminate_until_majority(ballot, Method::Coombs, count_votes, |b| {
        most_standing(b, |c| c.last_votes())
    })
}
