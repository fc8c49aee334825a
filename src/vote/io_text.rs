// Primitives for reading the text ballot files.

use ranked_tally::builder::Builder;
use snafu::OptionExt;

use crate::vote::*;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedParticipant {
    pub last_name: String,
    pub first_name: String,
    /// The 1-based candidate numbers, most preferred first.
    pub choices: Vec<u32>,
    /// The line of the last name.
    pub lineno: usize,
}

impl ParsedParticipant {
    pub fn label(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedElection {
    pub candidates: Vec<String>,
    pub participants: Vec<ParsedParticipant>,
}

fn is_comment(line: &str) -> bool {
    line.trim().is_empty() || line.trim_start().starts_with("//")
}

// A participant's last name is written in upper case.
fn is_last_name(line: &str) -> bool {
    !line.chars().any(|c| c.is_lowercase())
}

// A line of digits, with an optional sign, is a candidate number.
fn parse_rank(lineno: usize, line: &str) -> VoteResult<Option<u32>> {
    let s = line.trim();
    let digits = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    let too_large = || ParsingInputSnafu {
        lineno,
        message: format!("candidate number {} is too large", s),
    };
    let x = s.parse::<i64>().ok().with_context(too_large)?;
    ensure!(
        x >= 1,
        ParsingInputSnafu {
            lineno,
            message: format!("invalid candidate number {}", x)
        }
    );
    let rank = u32::try_from(x).ok().with_context(too_large)?;
    Ok(Some(rank))
}

/// Reads an election in the text format.
///
/// Empty lines and lines starting with `//` are ignored. The candidates come
/// first, one per line, then the participants: last name, first name and the
/// candidate numbers in order of preference.
pub fn read_text(contents: &str) -> VoteResult<ParsedElection> {
    let lines: Vec<(usize, &str)> = contents
        .lines()
        .enumerate()
        .map(|(idx, l)| (idx + 1, l.trim_end()))
        .filter(|(_, l)| !is_comment(l))
        .collect();

    let mut iter = lines.iter().peekable();

    let mut candidates: Vec<String> = Vec::new();
    while let Some((_, line)) = iter.next_if(|(_, l)| !is_last_name(l)) {
        candidates.push(line.to_string());
    }
    ensure!(!candidates.is_empty(), MissingCandidatesSnafu {});
    debug!("read_text: candidates: {:?}", candidates);

    let mut participants: Vec<ParsedParticipant> = Vec::new();
    while let Some((lineno, last_name)) = iter.next() {
        let lineno = *lineno;
        let (_, first_name) = iter.next().context(ParsingInputSnafu {
            lineno,
            message: format!("participant {} has no first name", last_name),
        })?;

        let mut choices: Vec<u32> = Vec::new();
        while let Some((l, line)) = iter.peek() {
            match parse_rank(*l, line)? {
                Some(rank) => {
                    choices.push(rank);
                    iter.next();
                }
                None => break,
            }
        }
        ensure!(
            !choices.is_empty(),
            ParsingInputSnafu {
                lineno,
                message: format!("participant {} {} has no preference", last_name, first_name)
            }
        );

        let p = ParsedParticipant {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            choices,
            lineno,
        };
        debug!("read_text: {:?}", p);
        participants.push(p);
    }

    if participants.is_empty() {
        warn!("read_text: no participant found");
    }

    Ok(ParsedElection {
        candidates,
        participants,
    })
}

/// Assembles the ballot. The candidate numbers are checked at this point.
pub fn to_ballot(parsed: &ParsedElection) -> VoteResult<Ballot> {
    let num_candidates = parsed.candidates.len();
    let mut builder = Builder::new()
        .candidates(&parsed.candidates)
        .context(TallyingSnafu {})?;
    for p in parsed.participants.iter() {
        if let Some(x) = p.choices.iter().find(|x| **x as usize > num_candidates) {
            return ParsingInputSnafu {
                lineno: p.lineno,
                message: format!(
                    "participant {} ranks candidate {}, only {} declared",
                    p.label(),
                    x,
                    num_candidates
                ),
            }
            .fail();
        }
        builder
            .add_participant(Some(p.label().as_str()), &p.choices)
            .context(TallyingSnafu {})?;
    }
    builder.build().context(TallyingSnafu {})
}
