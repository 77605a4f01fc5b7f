// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Base primitive record shared by every kind.

use crate::geometry::CoordRect;
use crate::kinds::{
    Component, Implementation, Label, Parameter, Pin, PrimitiveBody, PrimitiveKind, Sheet, Unknown,
};
use crate::record_kind::RecordKind;

/// `owner_part_id` value meaning "belongs to every part of the owner".
pub const ALL_PARTS: i32 = -1;

/// One schematic record: the base fields every kind carries plus a
/// kind-specific [`PrimitiveBody`].
///
/// Tree linkage (owner, children, live index) is not stored here; it belongs
/// to the [`PrimitiveTree`](crate::PrimitiveTree) holding the primitive.
///
/// Invariants
/// - [`record_kind`](Self::record_kind) is fixed at construction; the body is
///   only reachable through typed accessors that cannot swap the variant.
/// - `owner_index` is the persisted flat position of the owner record. It is
///   unrelated to the live position reported by
///   [`PrimitiveTree::index_in_sheet`](crate::PrimitiveTree::index_in_sheet).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Primitive {
    /// Flat record position of the owner at serialization time.
    pub owner_index: i32,
    /// Inverse of the persisted `ISNOTACCESIBLE` flag.
    pub is_accessible: bool,
    /// Part of the owning component this belongs to ([`ALL_PARTS`] = all).
    pub owner_part_id: i32,
    /// Display mode of the owning component this belongs to.
    pub owner_part_display_mode: i32,
    /// Editing lock; persisted, not interpreted here.
    pub graphically_locked: bool,
    body: PrimitiveBody,
}

impl Primitive {
    /// Wraps a kind payload with default base fields.
    pub fn new(body: impl Into<PrimitiveBody>) -> Self {
        Self {
            owner_index: 0,
            is_accessible: true,
            owner_part_id: ALL_PARTS,
            owner_part_display_mode: 0,
            graphically_locked: false,
            body: body.into(),
        }
    }

    /// Default primitive for a known discriminator.
    pub fn for_kind(kind: RecordKind) -> Option<Self> {
        PrimitiveBody::for_kind(kind).map(Self::new)
    }

    /// Opaque stand-in for a discriminator with no modelled kind.
    pub fn placeholder(kind: RecordKind) -> Self {
        Self::new(Unknown::new(kind))
    }

    /// Fixed discriminator.
    pub fn record_kind(&self) -> RecordKind {
        self.body.record_kind()
    }

    /// Kind payload.
    pub fn body(&self) -> &PrimitiveBody {
        &self.body
    }

    pub(crate) fn body_mut(&mut self) -> &mut PrimitiveBody {
        &mut self.body
    }

    /// Kind geometry; see [`PrimitiveKind::calculate_bounds`].
    pub fn calculate_bounds(&self) -> CoordRect {
        self.body.calculate_bounds()
    }
}

macro_rules! accessors {
    ($($variant:ident, $get:ident, $get_mut:ident;)*) => {
        impl Primitive {
            $(
                #[doc = concat!("Payload when this is a [`", stringify!($variant), "`].")]
                pub fn $get(&self) -> Option<&$variant> {
                    match &self.body {
                        PrimitiveBody::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                #[doc = concat!("Mutable payload when this is a [`", stringify!($variant), "`].")]
                pub fn $get_mut(&mut self) -> Option<&mut $variant> {
                    match &mut self.body {
                        PrimitiveBody::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            )*
        }
    };
}

accessors! {
    Component, as_component, as_component_mut;
    Pin, as_pin, as_pin_mut;
    Label, as_label, as_label_mut;
    Sheet, as_sheet, as_sheet_mut;
    Parameter, as_parameter, as_parameter_mut;
    Implementation, as_implementation, as_implementation_mut;
    Unknown, as_unknown, as_unknown_mut;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_all_parts_and_are_accessible() {
        let p = Primitive::new(Label::default());
        assert_eq!(p.owner_part_id, ALL_PARTS);
        assert!(p.is_accessible);
        assert!(!p.graphically_locked);
        assert_eq!(p.record_kind(), RecordKind::LABEL);
    }

    #[test]
    fn accessors_match_variant_only() {
        let mut p = Primitive::new(Pin::default());
        assert!(p.as_pin().is_some());
        assert!(p.as_component().is_none());
        if let Some(pin) = p.as_pin_mut() {
            pin.name = "VCC".into();
        }
        assert_eq!(p.as_pin().map(|pin| pin.name.as_str()), Some("VCC"));
    }

    #[test]
    fn placeholder_keeps_discriminator() {
        let p = Primitive::placeholder(RecordKind(999));
        assert_eq!(p.record_kind(), RecordKind(999));
        assert!(Primitive::for_kind(RecordKind(999)).is_none());
    }
}
