// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Multi-part component container.

use sch_params::ParameterCollection;

use super::{is_sheet, PrimitiveKind};
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;

/// A library component that may render as one of several parts and display
/// modes.
///
/// Children carry `owner_part_id` / `owner_part_display_mode` to say which
/// part and which alternate representation they belong to; `display_mode`
/// selects the representation currently shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Component {
    /// Library reference name.
    pub lib_reference: String,
    /// Part currently being shown (1-based in practice).
    pub current_part_id: i32,
    /// Number of parts.
    pub part_count: i32,
    /// Active display mode.
    pub display_mode: i32,
    /// Number of available display modes.
    pub display_mode_count: i32,
}

impl Component {
    /// Returns `true` when the component has more than one part.
    pub fn is_multi_part(&self) -> bool {
        self.part_count > 1
    }
}

impl PrimitiveKind for Component {
    fn record_kind(&self) -> RecordKind {
        RecordKind::COMPONENT
    }

    fn accepts(&self, child: &Primitive) -> bool {
        child.record_kind() != RecordKind::COMPONENT && !is_sheet(child)
    }

    fn import_extra(&mut self, record: &ParameterCollection) {
        self.lib_reference = record.get("LIBREFERENCE").as_string_or_default();
        self.current_part_id = record.get("CURRENTPARTID").as_int_or_default();
        self.part_count = record.get("PARTCOUNT").as_int_or_default();
        self.display_mode = record.get("DISPLAYMODE").as_int_or_default();
        self.display_mode_count = record.get("DISPLAYMODECOUNT").as_int_or_default();
    }

    fn export_extra(&self, record: &mut ParameterCollection) {
        record.add("LIBREFERENCE", &self.lib_reference);
        record.add("CURRENTPARTID", self.current_part_id);
        record.add("PARTCOUNT", self.part_count);
        record.add("DISPLAYMODE", self.display_mode);
        record.add("DISPLAYMODECOUNT", self.display_mode_count);
    }
}
