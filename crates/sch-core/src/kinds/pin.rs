// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Component pin.

use sch_params::ParameterCollection;

use super::{read_location, write_location, PrimitiveKind};
use crate::geometry::{CoordPoint, CoordRect};
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;

/// Electrical pin. Leaf node: refuses every child.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pin {
    /// Pin name.
    pub name: String,
    /// Pin designator (number).
    pub designator: String,
    /// Anchor location.
    pub location: CoordPoint,
    /// Hidden pins stay in the tree but report invisible.
    pub is_hidden: bool,
}

impl PrimitiveKind for Pin {
    fn record_kind(&self) -> RecordKind {
        RecordKind::PIN
    }

    fn accepts(&self, _child: &Primitive) -> bool {
        false
    }

    fn import_extra(&mut self, record: &ParameterCollection) {
        self.name = record.get("NAME").as_string_or_default();
        self.designator = record.get("DESIGNATOR").as_string_or_default();
        self.location = read_location(record);
        self.is_hidden = record.get("ISHIDDEN").as_bool();
    }

    fn export_extra(&self, record: &mut ParameterCollection) {
        record.add("NAME", &self.name);
        record.add("DESIGNATOR", &self.designator);
        write_location(record, self.location);
        record.add("ISHIDDEN", self.is_hidden);
    }

    fn calculate_bounds(&self) -> CoordRect {
        CoordRect::from_point(self.location)
    }

    fn is_visible(&self) -> bool {
        !self.is_hidden
    }
}
