// Reporting of the rounds: log lines and the JSON summary.

use serde_json::json;
use serde_json::Map as JSMap;

use crate::vote::config_reader::OutputConfig;
use crate::vote::*;

// The candidates still running in the round, including the ones eliminated at
// the end of it.
fn running(rs: &RoundStats) -> impl Iterator<Item = &CandidateStats> {
    rs.candidates
        .iter()
        .filter(move |cs| !cs.eliminated || rs.eliminated.contains(&cs.id))
}

fn status(rs: &RoundStats, cs: &CandidateStats) -> &'static str {
    if cs.winner {
        "-> elected"
    } else if rs.eliminated.contains(&cs.id) {
        "-> eliminated"
    } else {
        ""
    }
}

/// The share of the active votes, with one decimal.
pub fn format_percent(votes: u64, total: u64) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", 100.0 * (votes as f64) / (total as f64))
}

pub fn log_rounds(res: &TallyResult) {
    for rs in res.round_stats.iter() {
        let total = rs.active_votes();
        info!("Round {} ({} active votes)", rs.round, total);
        for cs in running(rs) {
            let pct = format_percent(cs.votes, total);
            if res.method == Method::Coombs {
                info!(
                    "{:>7} {:>6}  last: {:>5}  {} {}",
                    cs.votes,
                    pct,
                    cs.last_votes,
                    cs.name,
                    status(rs, cs)
                );
            } else {
                info!("{:>7} {:>6}  {} {}", cs.votes, pct, cs.name, status(rs, cs));
            }
        }
    }
}

pub fn result_stats_to_json(res: &TallyResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for rs in res.round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        let mut last_tally: JSMap<String, JSValue> = JSMap::new();
        let mut tally_results: Vec<JSValue> = Vec::new();
        for cs in running(rs) {
            tally.insert(cs.name.clone(), json!(cs.votes.to_string()));
            last_tally.insert(cs.name.clone(), json!(cs.last_votes.to_string()));
            if cs.winner {
                tally_results.push(json!({ "elected": cs.name }));
            }
        }
        for cs in rs.candidates.iter() {
            if rs.eliminated.contains(&cs.id) {
                tally_results.push(json!({ "eliminated": cs.name }));
            }
        }

        let mut js = json!({"round": rs.round, "tally": tally, "tallyResults": tally_results});
        if res.method == Method::Coombs {
            js["lastPlaceTally"] = JSValue::Object(last_tally);
        }
        l.push(js);
    }
    l
}

pub fn build_summary_js(config: &OutputConfig, res: &TallyResult) -> JSValue {
    json!({
        "config": config,
        "results": result_stats_to_json(res),
        "winner": res.winner_name,
    })
}
