// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Record discriminators.

use std::fmt;

/// Integer discriminator stored in a record's `RECORD` field.
///
/// Each concrete primitive kind has exactly one value; it never changes for
/// the lifetime of a primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKind(pub i32);

impl RecordKind {
    /// Multi-part component container.
    pub const COMPONENT: Self = Self(1);
    /// Component pin.
    pub const PIN: Self = Self(2);
    /// Free text label.
    pub const LABEL: Self = Self(4);
    /// Document sheet (root container).
    pub const SHEET: Self = Self(31);
    /// Named parameter.
    pub const PARAMETER: Self = Self(41);
    /// Model implementation with inline model parameters.
    pub const IMPLEMENTATION: Self = Self(45);

    /// Raw discriminator value.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Human-readable name for known kinds, `"Unknown"` otherwise.
    pub const fn name(self) -> &'static str {
        match self.0 {
            1 => "Component",
            2 => "Pin",
            4 => "Label",
            31 => "Sheet",
            41 => "Parameter",
            45 => "Implementation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
