/*!
Tabulation of ranked ballots with three methods: two-round runoff,
instant-runoff (alternative vote) and the Coombs method.

The entry point is [run_election]. The [builder::Builder] is the simplest way
to assemble a [Ballot]. See the [manual] for the details of each method.
*/
mod ballot;
pub mod builder;
mod config;
pub mod coombs;
pub mod instant_runoff;
pub mod manual;
pub mod round;
pub mod two_round;

use log::{debug, info};

pub use crate::ballot::*;
pub use crate::config::*;

/// Runs the counting method on the ballot.
///
/// The ballot is updated round after round. On success, it holds exactly one
/// winner, and the result describes every round. On failure, no winner is
/// recorded.
pub fn run_election(ballot: &mut Ballot, method: Method) -> Result<TallyResult, TallyErrors> {
    info!(
        "Processing {:?} participants, {:?} candidates, method: {}",
        ballot.participants().len(),
        ballot.candidates().len(),
        method
    );
    for c in ballot.candidates().iter() {
        debug!("Candidate: {}: {}", c.id(), c.name());
    }

    let res = match method {
        Method::TwoRound => two_round::run_two_round(ballot),
        Method::InstantRunoff => instant_runoff::run_instant_runoff(ballot),
        Method::Coombs => coombs::run_coombs(ballot),
    };
    debug!("run_election: {:?}", res);
    res
}
