// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Free text label.

use sch_params::ParameterCollection;

use super::{is_sheet, read_location, write_location, PrimitiveKind};
use crate::geometry::{CoordPoint, CoordRect};
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;

/// Text placed on a sheet or inside a component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Label {
    /// Displayed text.
    pub text: String,
    /// Anchor location.
    pub location: CoordPoint,
}

impl PrimitiveKind for Label {
    fn record_kind(&self) -> RecordKind {
        RecordKind::LABEL
    }

    fn accepts(&self, child: &Primitive) -> bool {
        !is_sheet(child)
    }

    fn import_extra(&mut self, record: &ParameterCollection) {
        self.text = record.get("TEXT").as_string_or_default();
        self.location = read_location(record);
    }

    fn export_extra(&self, record: &mut ParameterCollection) {
        record.add("TEXT", &self.text);
        write_location(record, self.location);
    }

    fn calculate_bounds(&self) -> CoordRect {
        CoordRect::from_point(self.location)
    }
}
