// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Document sheet.

use sch_params::ParameterCollection;

use super::{is_sheet, PrimitiveKind};
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;

/// Root container of a schematic document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Index of the default system font.
    pub system_font: i32,
    /// Whether the sheet border is drawn.
    pub border_on: bool,
}

impl PrimitiveKind for Sheet {
    fn record_kind(&self) -> RecordKind {
        RecordKind::SHEET
    }

    fn accepts(&self, child: &Primitive) -> bool {
        !is_sheet(child)
    }

    fn import_extra(&mut self, record: &ParameterCollection) {
        self.system_font = record.get("SYSTEMFONT").as_int_or_default();
        self.border_on = record.get("BORDERON").as_bool();
    }

    fn export_extra(&self, record: &mut ParameterCollection) {
        record.add("SYSTEMFONT", self.system_font);
        record.add("BORDERON", self.border_on);
    }
}
