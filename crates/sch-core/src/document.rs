// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Flat record sequences in, primitive trees out, and back again.
//!
//! A document is stored as a flat list of records. Record `0` is the document
//! root; every later record names its owner by flat position through
//! `OWNERINDEX`. Loading resolves those positions into tree links; exporting
//! walks the tree in pre-order, which is the order positions are assigned in.

use sch_params::ParameterCollection;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::codec::{record_kind_of, CodecError};
use crate::config::{LoadOptions, OrphanPolicy, UnknownKindPolicy};
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;
use crate::tree::{NodeId, PrimitiveTree, TreeError};

/// 32-byte BLAKE3 digest.
pub type Hash32 = [u8; 32];

/// Errors raised while loading a record sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// There is no record to become the document root.
    #[error("document has no records")]
    Empty,
    /// A record's kind is not modelled and the policy is to abort.
    #[error("record {index}: unknown record kind {kind}")]
    UnknownKind {
        /// Flat position of the record.
        index: usize,
        /// Its discriminator.
        kind: RecordKind,
    },
    /// A record's owner cannot be resolved and the policy is to abort.
    #[error("record {index}: owner index {owner_index} does not name an earlier record")]
    Orphan {
        /// Flat position of the record.
        index: usize,
        /// The unresolved `OWNERINDEX`.
        owner_index: i32,
    },
    /// A record failed to import.
    #[error("record {index}: {source}")]
    Codec {
        /// Flat position of the record.
        index: usize,
        /// Underlying codec failure.
        #[source]
        source: CodecError,
    },
    /// A tree operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// What happened to each record during a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Records that became tree nodes (placeholders included).
    pub loaded: usize,
    /// Records of unmodelled kinds kept as placeholders.
    pub placeholders: usize,
    /// Records dropped by [`UnknownKindPolicy::Skip`].
    pub skipped: usize,
    /// Records whose owner could not be resolved.
    pub orphaned: usize,
    /// Records whose owner refused them.
    pub vetoed: usize,
}

/// Result of [`load_records`].
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// The loaded tree.
    pub tree: PrimitiveTree,
    /// Node built from record `0`.
    pub root: NodeId,
    /// Node built from each input record, `None` where skipped.
    pub flat: Vec<Option<NodeId>>,
    /// Per-record outcome counts.
    pub report: LoadReport,
}

impl LoadedDocument {
    /// Node built from the record at flat position `index`.
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        self.flat.get(index).copied().flatten()
    }

    /// Loaded nodes not reachable from the root (orphans left detached,
    /// vetoed records and their subtrees). They are not exported.
    pub fn unreachable_count(&self) -> usize {
        self.tree.len() - self.tree.export_walk(self.root).count()
    }

    /// Exports the document, renumbering owner indices first when
    /// `options.renumber_on_export` is set.
    ///
    /// Only the root's subtree is written; a warning names how many loaded
    /// records were left out.
    #[instrument(skip_all)]
    pub fn export(
        &mut self,
        options: &LoadOptions,
    ) -> Result<Vec<ParameterCollection>, TreeError> {
        if options.renumber_on_export {
            self.tree.renumber_owner_indices(self.root)?;
        }
        let records = self.tree.export_records(self.root)?;
        let dropped = self.tree.len() - records.len();
        if dropped > 0 {
            warn!(
                dropped,
                vetoed = self.report.vetoed,
                "detached records left out of export"
            );
        }
        info!(records = records.len(), "exported document");
        Ok(records)
    }
}

/// Builds a tree from a flat record sequence.
///
/// Record `0` becomes the root regardless of its `OWNERINDEX`, and is kept as
/// a placeholder even under [`UnknownKindPolicy::Skip`]. Any later record
/// attaches to the node loaded at its `OWNERINDEX` when that position names
/// an earlier, loaded record; otherwise it is an orphan and `options.orphans`
/// decides. A kind veto leaves the node detached.
#[instrument(skip_all, fields(records = records.len()))]
pub fn load_records(
    records: &[ParameterCollection],
    options: &LoadOptions,
) -> Result<LoadedDocument, LoadError> {
    let (head, rest) = records.split_first().ok_or(LoadError::Empty)?;
    let mut tree = PrimitiveTree::new();
    let mut report = LoadReport::default();

    let root_policy = match options.unknown_kinds {
        UnknownKindPolicy::Skip => UnknownKindPolicy::Placeholder,
        policy => policy,
    };
    let Some(root_primitive) = build(0, head, root_policy, &mut report)? else {
        return Err(LoadError::Empty);
    };
    let root = tree.insert(root_primitive);
    report.loaded += 1;
    let mut flat = Vec::with_capacity(records.len());
    flat.push(Some(root));

    for (offset, record) in rest.iter().enumerate() {
        let index = offset + 1;
        let Some(primitive) = build(index, record, options.unknown_kinds, &mut report)? else {
            flat.push(None);
            continue;
        };
        let owner_index = primitive.owner_index;
        let id = tree.insert(primitive);
        flat.push(Some(id));
        report.loaded += 1;

        let owner = usize::try_from(owner_index)
            .ok()
            .filter(|&o| o < index)
            .and_then(|o| flat.get(o).copied().flatten());
        let owner = match owner {
            Some(owner) => owner,
            None => {
                report.orphaned += 1;
                match options.orphans {
                    OrphanPolicy::Abort => return Err(LoadError::Orphan { index, owner_index }),
                    OrphanPolicy::Detach => {
                        warn!(index, owner_index, "orphan record left detached");
                        continue;
                    }
                    OrphanPolicy::AttachToRoot => {
                        warn!(index, owner_index, "orphan record attached to root");
                        root
                    }
                }
            }
        };
        if !tree.add(owner, id)? {
            report.vetoed += 1;
            warn!(index, %owner, "owner refused record; left detached");
        }
    }

    info!(
        loaded = report.loaded,
        placeholders = report.placeholders,
        skipped = report.skipped,
        orphaned = report.orphaned,
        vetoed = report.vetoed,
        "loaded document"
    );
    Ok(LoadedDocument {
        tree,
        root,
        flat,
        report,
    })
}

/// Primitive for one record, or `None` when the policy drops it.
fn build(
    index: usize,
    record: &ParameterCollection,
    policy: UnknownKindPolicy,
    report: &mut LoadReport,
) -> Result<Option<Primitive>, LoadError> {
    let kind = record_kind_of(record);
    let mut primitive = match Primitive::for_kind(kind) {
        Some(p) => p,
        None => match policy {
            UnknownKindPolicy::Abort => return Err(LoadError::UnknownKind { index, kind }),
            UnknownKindPolicy::Skip => {
                warn!(index, %kind, "skipping record of unknown kind");
                report.skipped += 1;
                return Ok(None);
            }
            UnknownKindPolicy::Placeholder => {
                debug!(index, %kind, "keeping unknown record as placeholder");
                report.placeholders += 1;
                Primitive::placeholder(kind)
            }
        },
    };
    primitive
        .import_from_parameters(record)
        .map_err(|source| LoadError::Codec { index, source })?;
    Ok(Some(primitive))
}

/// Lazy pre-order walk returned by [`PrimitiveTree::export_walk`].
///
/// Each step exports one node; dropping the iterator stops the export.
#[derive(Clone, Debug)]
pub struct ExportWalk<'a> {
    tree: &'a PrimitiveTree,
    stack: Vec<NodeId>,
}

impl Iterator for ExportWalk<'_> {
    type Item = ParameterCollection;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            self.stack
                .extend(self.tree.children(id).iter().rev().copied());
            if let Ok(record) = self.tree.export(id) {
                return Some(record);
            }
        }
    }
}

impl PrimitiveTree {
    /// Pre-order walk of the records under `root`, `root` first.
    ///
    /// An unknown `root` yields nothing.
    pub fn export_walk(&self, root: NodeId) -> ExportWalk<'_> {
        let stack = if self.contains(root) { vec![root] } else { Vec::new() };
        ExportWalk { tree: self, stack }
    }

    /// Every record under `root` in pre-order.
    #[instrument(skip(self))]
    pub fn export_records(&self, root: NodeId) -> Result<Vec<ParameterCollection>, TreeError> {
        if !self.contains(root) {
            return Err(TreeError::MissingNode(root));
        }
        Ok(self.export_walk(root).collect())
    }

    /// Sets each descendant's `owner_index` to its owner's position in the
    /// pre-order walk from `root` (which is position `0`).
    ///
    /// `root`'s own `owner_index` is left untouched.
    pub fn renumber_owner_indices(&mut self, root: NodeId) -> Result<(), TreeError> {
        if !self.contains(root) {
            return Err(TreeError::MissingNode(root));
        }
        let mut stack = vec![(root, None::<i32>)];
        let mut position = 0_i32;
        while let Some((id, owner_position)) = stack.pop() {
            if let (Some(owner_position), Some(p)) = (owner_position, self.get_mut(id)) {
                p.owner_index = owner_position;
            }
            stack.extend(
                self.children(id)
                    .iter()
                    .rev()
                    .map(|&c| (c, Some(position))),
            );
            position += 1;
        }
        Ok(())
    }
}

/// BLAKE3 over the text framing of `records`, one line per record.
///
/// Two exports with the same fingerprint render to identical text.
pub fn fingerprint<'a, I>(records: I) -> Hash32
where
    I: IntoIterator<Item = &'a ParameterCollection>,
{
    let mut hasher = blake3::Hasher::new();
    for record in records {
        hasher.update(record.to_string().as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().into()
}
