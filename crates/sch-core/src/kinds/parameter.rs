// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named parameter.

use sch_params::ParameterCollection;

use super::{is_sheet, PrimitiveKind};
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;

/// `NAME = TEXT` pair attached to a component, sheet or implementation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter value.
    pub text: String,
    /// Hidden parameters report invisible.
    pub is_hidden: bool,
}

impl Parameter {
    /// Creates a visible parameter.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            is_hidden: false,
        }
    }
}

impl PrimitiveKind for Parameter {
    fn record_kind(&self) -> RecordKind {
        RecordKind::PARAMETER
    }

    fn accepts(&self, child: &Primitive) -> bool {
        !is_sheet(child)
    }

    fn import_extra(&mut self, record: &ParameterCollection) {
        self.name = record.get("NAME").as_string_or_default();
        self.text = record.get("TEXT").as_string_or_default();
        self.is_hidden = record.get("ISHIDDEN").as_bool();
    }

    fn export_extra(&self, record: &mut ParameterCollection) {
        record.add("NAME", &self.name);
        record.add("TEXT", &self.text);
        record.add("ISHIDDEN", self.is_hidden);
    }

    fn is_visible(&self) -> bool {
        !self.is_hidden
    }
}
