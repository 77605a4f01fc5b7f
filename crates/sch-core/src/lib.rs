// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! sch-core: the primitive tree behind a schematic document.
//!
//! Primitives (components, pins, labels, ...) live in an arena-backed
//! [`PrimitiveTree`]. Owners hold their children by [`NodeId`]; the upward
//! owner link is an index into the same arena, so there is no reference cycle
//! to break on teardown.
//!
//! Each primitive converts to and from a flat
//! [`ParameterCollection`](sch_params::ParameterCollection). The
//! [`document`] module turns a sequence of such records into a tree and walks
//! a tree back into records.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

mod codec;
/// Load options and the config port used to persist them.
pub mod config;
/// Record sequence ⇄ tree conversion.
pub mod document;
mod geometry;
/// Concrete primitive kinds and the capability trait they implement.
pub mod kinds;
mod primitive;
mod record_kind;
mod traversal;
mod tree;
mod visibility;

pub use codec::{keys, record_kind_of, CodecError};
pub use config::{
    ConfigError, ConfigService, ConfigStore, LoadOptions, MemoryConfigStore, OrphanPolicy,
    UnknownKindPolicy,
};
pub use document::{
    fingerprint, load_records, ExportWalk, Hash32, LoadError, LoadReport, LoadedDocument,
};
pub use geometry::{Coord, CoordPoint, CoordRect};
pub use kinds::{PrimitiveBody, PrimitiveKind};
pub use primitive::{Primitive, ALL_PARTS};
pub use record_kind::RecordKind;
pub use traversal::{AnyPrimitive, PrimitiveFilter, PrimitiveRef, PrimitivesOf};
pub use tree::{NodeId, PrimitiveTree, TreeError};
