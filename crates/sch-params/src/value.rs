// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed views over raw parameter strings.

/// Borrowed view of a field that may be missing from its record.
///
/// Every typed accessor is lenient: a value that does not parse as the
/// requested type is treated exactly like a missing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParameterValue<'a> {
    raw: Option<&'a str>,
}

impl<'a> ParameterValue<'a> {
    /// A value for a key the record does not contain.
    pub const MISSING: Self = Self { raw: None };

    /// Wraps a raw (possibly absent) string.
    pub fn new(raw: Option<&'a str>) -> Self {
        Self { raw }
    }

    /// Returns `true` when the key exists in the record.
    pub fn is_present(self) -> bool {
        self.raw.is_some()
    }

    /// Raw string value, if present.
    pub fn as_str(self) -> Option<&'a str> {
        self.raw
    }

    /// Raw string value, or the empty string when absent.
    pub fn as_string_or_default(self) -> String {
        self.raw.unwrap_or_default().to_owned()
    }

    /// Parses a decimal `i32`; `None` when absent or malformed.
    pub fn as_int(self) -> Option<i32> {
        self.raw.and_then(|s| s.trim().parse().ok())
    }

    /// Parses a decimal `i32`, falling back to `default`.
    pub fn as_int_or(self, default: i32) -> i32 {
        self.as_int().unwrap_or(default)
    }

    /// Parses a decimal `i32`, falling back to `0`.
    pub fn as_int_or_default(self) -> i32 {
        self.as_int_or(0)
    }

    /// Parses a boolean flag; `None` when absent or not a recognised spelling.
    ///
    /// `T`/`TRUE` and `F`/`FALSE` are accepted in any case.
    pub fn as_bool_opt(self) -> Option<bool> {
        let s = self.raw?.trim();
        if s.eq_ignore_ascii_case("T") || s.eq_ignore_ascii_case("TRUE") {
            Some(true)
        } else if s.eq_ignore_ascii_case("F") || s.eq_ignore_ascii_case("FALSE") {
            Some(false)
        } else {
            None
        }
    }

    /// Parses a boolean flag, falling back to `default`.
    pub fn as_bool_or(self, default: bool) -> bool {
        self.as_bool_opt().unwrap_or(default)
    }

    /// Parses a boolean flag, falling back to `false`.
    pub fn as_bool(self) -> bool {
        self.as_bool_or(false)
    }

    /// Parses an `f64`, falling back to `0.0`.
    pub fn as_f64_or_default(self) -> f64 {
        self.raw
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_default()
    }
}

/// Conversion into the string form written to a parameter record.
pub trait IntoParameterValue {
    /// Renders `self` as a record value.
    fn into_parameter_value(self) -> String;
}

impl IntoParameterValue for bool {
    fn into_parameter_value(self) -> String {
        let flag = if self { "T" } else { "F" };
        flag.to_owned()
    }
}

macro_rules! int_parameter_value {
    ($($t:ty),*) => {
        $(impl IntoParameterValue for $t {
            fn into_parameter_value(self) -> String {
                self.to_string()
            }
        })*
    };
}

int_parameter_value!(i32, i64, u32, u64, usize);

impl IntoParameterValue for f64 {
    fn into_parameter_value(self) -> String {
        // `Display` for f64 is the shortest form that parses back identically.
        self.to_string()
    }
}

impl IntoParameterValue for &str {
    fn into_parameter_value(self) -> String {
        self.to_owned()
    }
}

impl IntoParameterValue for String {
    fn into_parameter_value(self) -> String {
        self
    }
}

impl IntoParameterValue for &String {
    fn into_parameter_value(self) -> String {
        self.clone()
    }
}
