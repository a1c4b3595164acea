//! Raw record parsing
//!
//! Turns stored records into step sequences, one parser per domain:
//!
//! - plan: a list literal of quoted actions, e.g. `['(pick-up a)', "(stack a b)"]`;
//!   the parentheses around each action are stripped
//! - recipe: instruction text, one step per line
//! - route: a list literal of quoted direction steps, kept verbatim
//!
//! List literals are parsed with nom and never evaluated.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, none_of},
    combinator::{map, opt, value},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, terminated},
    Finish, IResult,
};

use crate::errors::{Result, SummaryError};
use crate::types::{Corpus, Domain, Sequence};

type PResult<'a, T> = IResult<&'a str, T>;

fn escape(input: &str) -> PResult<'_, char> {
    alt((
        value('\n', tag("\\n")),
        value('\t', tag("\\t")),
        value('\\', tag("\\\\")),
        value('\'', tag("\\'")),
        value('"', tag("\\\"")),
    ))(input)
}

fn single_quoted(input: &str) -> PResult<'_, String> {
    delimited(
        char('\''),
        map(many0(alt((escape, none_of("'\\")))), |chars: Vec<char>| {
            chars.into_iter().collect::<String>()
        }),
        char('\''),
    )(input)
}

fn double_quoted(input: &str) -> PResult<'_, String> {
    delimited(
        char('"'),
        map(many0(alt((escape, none_of("\"\\")))), |chars: Vec<char>| {
            chars.into_iter().collect::<String>()
        }),
        char('"'),
    )(input)
}

/// `[ 'a', "b", ]` with optional trailing comma
fn string_list(input: &str) -> PResult<'_, Vec<String>> {
    delimited(
        pair(char('['), multispace0),
        terminated(
            separated_list0(
                delimited(multispace0, char(','), multispace0),
                alt((single_quoted, double_quoted)),
            ),
            pair(multispace0, opt(pair(char(','), multispace0))),
        ),
        char(']'),
    )(input)
}

fn parse_error(message: impl Into<String>) -> SummaryError {
    SummaryError::Parse {
        record: 0,
        message: message.into(),
    }
}

/// Parse a list literal of quoted strings
pub fn parse_string_list(record: &str) -> Result<Vec<String>> {
    let (rest, items) = delimited(multispace0, string_list, multispace0)(record)
        .finish()
        .map_err(|e| {
            parse_error(format!(
                "expected a list of quoted strings at offset {}",
                record.len() - e.input.len()
            ))
        })?;
    if !rest.is_empty() {
        return Err(parse_error(format!(
            "unexpected trailing input at offset {}",
            record.len() - rest.len()
        )));
    }
    Ok(items)
}

/// Parse one plan record into its actions
pub fn parse_plan_record(record: &str) -> Result<Sequence> {
    Ok(parse_string_list(record)?
        .into_iter()
        .map(|action| action.trim_matches(|c| c == '(' || c == ')').to_string())
        .collect())
}

/// Split one recipe's instruction text into steps
///
/// Every line is a step, blank lines included. Lines may end in `\r\n`.
pub fn parse_recipe_record(record: &str) -> Sequence {
    record
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Parse one route record into its direction steps
pub fn parse_route_record(record: &str) -> Result<Sequence> {
    parse_string_list(record)
}

/// Parse every record of a domain into a corpus
///
/// Parse errors carry the index of the failing record.
pub fn parse_records<S: AsRef<str>>(domain: Domain, records: &[S]) -> Result<Corpus> {
    let sequences = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let record = record.as_ref();
            let parsed = match domain {
                Domain::Plan => parse_plan_record(record),
                Domain::Recipe => Ok(parse_recipe_record(record)),
                Domain::Route => parse_route_record(record),
            };
            parsed.map_err(|err| match err {
                SummaryError::Parse { message, .. } => SummaryError::Parse {
                    record: index,
                    message,
                },
                other => other,
            })
        })
        .collect::<Result<Vec<Sequence>>>()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        domain = domain.as_str(),
        records = sequences.len(),
        "records parsed"
    );

    Corpus::new(sequences)
}
