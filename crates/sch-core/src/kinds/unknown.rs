// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Placeholder for record kinds this crate does not model.

use sch_params::ParameterCollection;

use super::{is_sheet, PrimitiveKind};
use crate::codec::keys;
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;

/// Opaque primitive of an unmodelled kind.
///
/// Every field outside the base contract is kept verbatim and written back
/// in its original order, so unknown records survive a load/export cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unknown {
    kind: RecordKind,
    /// Kind-specific fields in record order.
    pub fields: ParameterCollection,
}

impl Unknown {
    /// Empty placeholder for `kind`.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            fields: ParameterCollection::new(),
        }
    }
}

impl PrimitiveKind for Unknown {
    fn record_kind(&self) -> RecordKind {
        self.kind
    }

    fn accepts(&self, child: &Primitive) -> bool {
        !is_sheet(child)
    }

    fn import_extra(&mut self, record: &ParameterCollection) {
        self.fields = record
            .iter()
            .filter(|(k, _)| !keys::is_base_key(k))
            .collect();
    }

    fn export_extra(&self, record: &mut ParameterCollection) {
        // Base keys are owned by the base codec and never overwritten here.
        record.extend(self.fields.iter().filter(|(k, _)| !keys::is_base_key(k)));
    }
}
