// Generation of random ballot files in the text format.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use snafu::ensure_whatever;

use crate::vote::*;

const DEFAULT_CANDIDATES: [&str; 5] = ["Vanille", "Chocolat", "Fraise", "Pistache", "Citron"];

const LAST_NAMES: [&str; 10] = [
    "DUPONT", "MARTIN", "BERNARD", "DURAND", "LEFEBVRE", "MOREAU", "LAURENT", "SIMON", "MICHEL",
    "GARCIA",
];

const FIRST_NAMES: [&str; 10] = [
    "Marie", "Paul", "Julie", "Louis", "Emma", "Hugo", "Chloe", "Lucas", "Lea", "Jules",
];

/// Writes a ballot file with `num_participants` random participants.
///
/// Each participant ranks `ranks` distinct candidates in a random order.
pub fn generate_ballots(
    rng: &mut StdRng,
    candidates: &[String],
    num_participants: usize,
    ranks: usize,
) -> VoteResult<String> {
    ensure_whatever!(!candidates.is_empty(), "at least one candidate is required");
    ensure_whatever!(
        (1..=candidates.len()).contains(&ranks),
        "cannot rank {} candidates out of {}",
        ranks,
        candidates.len()
    );
    for name in candidates.iter() {
        // Otherwise the name would be read as a last name.
        ensure_whatever!(
            name.chars().any(|c| c.is_lowercase()),
            "candidate name {:?} must contain a lowercase letter",
            name
        );
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "// {} candidates, {} participants",
        candidates.len(),
        num_participants
    ));
    lines.extend(candidates.iter().cloned());

    let mut ids: Vec<usize> = (1..=candidates.len()).collect();
    for _ in 0..num_participants {
        let last_name = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        let first_name = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        ids.shuffle(rng);
        debug!("generate_ballots: {} {}: {:?}", last_name, first_name, &ids[..ranks]);
        lines.push(last_name.to_string());
        lines.push(first_name.to_string());
        lines.extend(ids.iter().take(ranks).map(|id| id.to_string()));
    }
    lines.push(String::new());
    Ok(lines.join("\n"))
}

pub fn run_generate(args: &Args, num_participants: usize) -> VoteResult<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let candidates: Vec<String> = match &args.candidates {
        Some(cs) => cs.clone(),
        None => DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
    };
    let ranks = args.ranks.unwrap_or(candidates.len());
    info!(
        "Generating {} participants for {} candidates, {} ranks each",
        num_participants,
        candidates.len(),
        ranks
    );

    let contents = generate_ballots(&mut rng, &candidates, num_participants, ranks)?;
    match args.out.as_deref() {
        Some(p) if p != "stdout" => {
            fs::write(p, contents).context(WritingOutputSnafu { path: p })?;
        }
        _ => print!("{}", contents),
    }
    Ok(())
}
