// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Parameter records for schematic primitives.
//!
//! A parameter record is an ordered list of `KEY=VALUE` string pairs. Keys are
//! matched case-insensitively; values are read through [`ParameterValue`],
//! which coerces leniently (malformed data reads as "absent" and falls back to
//! a default instead of failing).
//!
//! The text framing is the pipe-delimited line form `|KEY=VALUE|KEY=VALUE`,
//! one record per line.

mod collection;
mod framing;
mod value;

pub use collection::ParameterCollection;
pub use framing::{parse_records, render_records, ParseError};
pub use value::{IntoParameterValue, ParameterValue};
