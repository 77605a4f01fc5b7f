// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pipe-delimited text framing: `|KEY=VALUE|KEY=VALUE`, one record per line.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::collection::ParameterCollection;

/// Errors raised while parsing or rendering framed records.
///
/// Line numbers are 1-based; entry positions are 0-based within the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An entry has no `=` between key and value.
    #[error("line {line}: entry {entry} has no '=' separator")]
    MissingSeparator {
        /// Line of the offending record.
        line: usize,
        /// Entry position within the record.
        entry: usize,
    },
    /// An entry starts with `=`.
    #[error("line {line}: entry {entry} has an empty key")]
    EmptyKey {
        /// Line of the offending record.
        line: usize,
        /// Entry position within the record.
        entry: usize,
    },
    /// A field contains `|`, `=` in its key, or a line break.
    #[error("record {line}: field {key:?} cannot be framed")]
    Unframeable {
        /// Position (1-based) of the record being rendered.
        line: usize,
        /// Offending key.
        key: String,
    },
}

fn parse_line(line_no: usize, line: &str) -> Result<ParameterCollection, ParseError> {
    let mut record = ParameterCollection::new();
    let entries = line
        .trim_end_matches(['\r', '\n'])
        .split('|')
        .filter(|e| !e.is_empty());
    for (entry, raw) in entries.enumerate() {
        let Some((key, value)) = raw.split_once('=') else {
            return Err(ParseError::MissingSeparator {
                line: line_no,
                entry,
            });
        };
        if key.is_empty() {
            return Err(ParseError::EmptyKey {
                line: line_no,
                entry,
            });
        }
        record.add(key, value);
    }
    Ok(record)
}

impl FromStr for ParameterCollection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(1, s)
    }
}

impl fmt::Display for ParameterCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in self.iter() {
            write!(f, "|{k}={v}")?;
        }
        Ok(())
    }
}

/// Parses one record per non-blank line.
pub fn parse_records(text: &str) -> Result<Vec<ParameterCollection>, ParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| parse_line(i + 1, l))
        .collect()
}

/// Renders records one per line, refusing fields the framing cannot carry.
///
/// Empty records render as blank lines, which [`parse_records`] skips.
pub fn render_records(records: &[ParameterCollection]) -> Result<String, ParseError> {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if let Some(key) = record.framing_conflicts().first() {
            return Err(ParseError::Unframeable {
                line: i + 1,
                key: (*key).to_owned(),
            });
        }
        out.push_str(&record.to_string());
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_pipe_record() {
        let p: ParameterCollection = "|RECORD=1|LIBREFERENCE=RES|PARTCOUNT=3".parse().unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.get("record").as_int(), Some(1));
        assert_eq!(p.get("LibReference").as_str(), Some("RES"));
    }

    #[test]
    fn value_may_contain_equals_and_be_empty() {
        let p: ParameterCollection = "|TEXT=a=b|NAME=".parse().unwrap();
        assert_eq!(p.get("TEXT").as_str(), Some("a=b"));
        assert_eq!(p.get("NAME").as_str(), Some(""));
    }

    #[test]
    fn display_matches_input() {
        let src = "|RECORD=2|NAME=VCC|ISHIDDEN=T";
        let p: ParameterCollection = src.parse().unwrap();
        assert_eq!(p.to_string(), src);
    }

    #[test]
    fn missing_separator_reports_position() {
        let err = parse_records("|RECORD=1\n\n|RECORD=2|BROKEN").unwrap_err();
        assert_eq!(err, ParseError::MissingSeparator { line: 3, entry: 1 });
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = "|=x".parse::<ParameterCollection>().unwrap_err();
        assert_eq!(err, ParseError::EmptyKey { line: 1, entry: 0 });
    }

    #[test]
    fn render_refuses_pipes_in_values() {
        let mut p = ParameterCollection::new();
        p.add("TEXT", "a|b");
        let err = render_records(&[ParameterCollection::new(), p]).unwrap_err();
        assert_eq!(
            err,
            ParseError::Unframeable {
                line: 2,
                key: "TEXT".into()
            }
        );
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let records = parse_records("|RECORD=1\r\n|RECORD=2\r\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("RECORD").as_str(), Some("2"));
    }
}
