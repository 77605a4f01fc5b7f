// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The closed set of primitive kinds.
//!
//! Generic algorithms (attachment, traversal, codec, visibility) never match
//! on a concrete kind; they go through [`PrimitiveKind`], which
//! [`PrimitiveBody`] implements by delegating to the active variant.

use sch_params::ParameterCollection;

use crate::geometry::CoordRect;
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;

mod component;
mod implementation;
mod label;
mod parameter;
mod pin;
mod sheet;
mod unknown;

pub use component::Component;
pub use implementation::Implementation;
pub use label::Label;
pub use parameter::Parameter;
pub use pin::Pin;
pub use sheet::Sheet;
pub use unknown::Unknown;

/// Kind-specific behaviour consulted by the tree and the codec.
pub trait PrimitiveKind {
    /// Fixed discriminator of this kind.
    fn record_kind(&self) -> RecordKind;

    /// Acceptance hook for [`PrimitiveTree::add`](crate::PrimitiveTree::add).
    /// Returning `false` vetoes the attachment.
    fn accepts(&self, child: &Primitive) -> bool {
        let _ = child;
        true
    }

    /// Child-like primitives this kind stores inline in its own record.
    fn virtual_children(&self) -> &[Primitive] {
        &[]
    }

    /// Reads kind-specific fields. Runs after the base fields are imported.
    fn import_extra(&mut self, record: &ParameterCollection);

    /// Appends kind-specific fields after the base fields.
    fn export_extra(&self, record: &mut ParameterCollection);

    /// Geometry extension point; empty unless the kind knows better.
    fn calculate_bounds(&self) -> CoordRect {
        CoordRect::EMPTY
    }

    /// Kind-level visibility, before any owner display-mode gating.
    fn is_visible(&self) -> bool {
        true
    }
}

/// Kind-specific payload of a [`Primitive`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrimitiveBody {
    /// See [`Component`].
    Component(Component),
    /// See [`Pin`].
    Pin(Pin),
    /// See [`Label`].
    Label(Label),
    /// See [`Sheet`].
    Sheet(Sheet),
    /// See [`Parameter`].
    Parameter(Parameter),
    /// See [`Implementation`].
    Implementation(Implementation),
    /// See [`Unknown`].
    Unknown(Unknown),
}

macro_rules! dispatch {
    ($self:expr, $b:ident => $e:expr) => {
        match $self {
            PrimitiveBody::Component($b) => $e,
            PrimitiveBody::Pin($b) => $e,
            PrimitiveBody::Label($b) => $e,
            PrimitiveBody::Sheet($b) => $e,
            PrimitiveBody::Parameter($b) => $e,
            PrimitiveBody::Implementation($b) => $e,
            PrimitiveBody::Unknown($b) => $e,
        }
    };
}

impl PrimitiveKind for PrimitiveBody {
    fn record_kind(&self) -> RecordKind {
        dispatch!(self, b => b.record_kind())
    }

    fn accepts(&self, child: &Primitive) -> bool {
        dispatch!(self, b => b.accepts(child))
    }

    fn virtual_children(&self) -> &[Primitive] {
        dispatch!(self, b => b.virtual_children())
    }

    fn import_extra(&mut self, record: &ParameterCollection) {
        dispatch!(self, b => b.import_extra(record));
    }

    fn export_extra(&self, record: &mut ParameterCollection) {
        dispatch!(self, b => b.export_extra(record));
    }

    fn calculate_bounds(&self) -> CoordRect {
        dispatch!(self, b => b.calculate_bounds())
    }

    fn is_visible(&self) -> bool {
        dispatch!(self, b => b.is_visible())
    }
}

impl PrimitiveBody {
    /// Default payload for a known discriminator.
    pub fn for_kind(kind: RecordKind) -> Option<Self> {
        let body = match kind {
            RecordKind::COMPONENT => Self::Component(Component::default()),
            RecordKind::PIN => Self::Pin(Pin::default()),
            RecordKind::LABEL => Self::Label(Label::default()),
            RecordKind::SHEET => Self::Sheet(Sheet::default()),
            RecordKind::PARAMETER => Self::Parameter(Parameter::default()),
            RecordKind::IMPLEMENTATION => Self::Implementation(Implementation::default()),
            _ => return None,
        };
        Some(body)
    }
}

macro_rules! body_from {
    ($($variant:ident),*) => {
        $(impl From<$variant> for PrimitiveBody {
            fn from(v: $variant) -> Self {
                Self::$variant(v)
            }
        })*
    };
}

body_from!(Component, Pin, Label, Sheet, Parameter, Implementation, Unknown);

/// Sheets only ever sit at the root of a document.
pub(crate) fn is_sheet(p: &Primitive) -> bool {
    p.record_kind() == RecordKind::SHEET
}

/// Shared reader for `LOCATION.X` / `LOCATION.Y`.
pub(crate) fn read_location(record: &ParameterCollection) -> crate::CoordPoint {
    crate::CoordPoint::new(
        record.get("LOCATION.X").as_int_or_default(),
        record.get("LOCATION.Y").as_int_or_default(),
    )
}

pub(crate) fn write_location(record: &mut ParameterCollection, p: crate::CoordPoint) {
    record.add("LOCATION.X", p.x);
    record.add("LOCATION.Y", p.y);
}
