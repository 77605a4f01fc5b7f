// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Arena-backed ownership tree.
use std::fmt;

use sch_params::ParameterCollection;
use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::CodecError;
use crate::kinds::{Component, PrimitiveKind};
use crate::primitive::Primitive;

/// Handle of a primitive inside a [`PrimitiveTree`].
///
/// Handles stay valid for the lifetime of the tree; detaching a node never
/// invalidates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Arena slot of this node (insertion order).
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised by tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The handle does not name a node of this tree.
    #[error("node {0} is not part of this tree")]
    MissingNode(NodeId),
    /// Importing a record into a node failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Clone, Debug)]
struct Node {
    primitive: Primitive,
    owner: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Ownership hierarchy of primitives.
///
/// Invariants
/// - A node has at most one owner, and appears exactly once in that owner's
///   child list.
/// - The owner relation is acyclic; a node is never its own ancestor.
/// - Child order is insertion order and is the only source of the live
///   [`index_in_sheet`](Self::index_in_sheet).
#[derive(Clone, Debug, Default)]
pub struct PrimitiveTree {
    nodes: Vec<Node>,
}

impl PrimitiveTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `primitive` as a detached root and returns its handle.
    pub fn insert(&mut self, primitive: Primitive) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            primitive,
            owner: None,
            children: Vec::new(),
        });
        id
    }

    /// Number of nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` when `id` names a node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(id.0).ok_or(TreeError::MissingNode(id))
    }

    /// Primitive stored at `id`.
    pub fn get(&self, id: NodeId) -> Option<&Primitive> {
        self.nodes.get(id.0).map(|n| &n.primitive)
    }

    /// Mutable primitive stored at `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Primitive> {
        self.nodes.get_mut(id.0).map(|n| &mut n.primitive)
    }

    /// Owner of `id`, or `None` for roots and unknown handles.
    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.owner)
    }

    /// Structural children of `id` in order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    /// Nodes without an owner, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.owner.is_none())
            .map(|(i, _)| NodeId(i))
    }

    /// Owner chain of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.owner(id), move |&n| self.owner(n))
    }

    /// Number of owners above `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Owner of `id` when that owner is a component.
    pub(crate) fn owner_component(&self, id: NodeId) -> Option<&Component> {
        self.owner(id)
            .and_then(|o| self.get(o))
            .and_then(Primitive::as_component)
    }

    /// Attaches `child` under `owner`.
    ///
    /// Returns `Ok(true)` when `child` ends up in `owner`'s child list and
    /// `Ok(false)` when the attachment is a no-op:
    /// - `child == owner` (self-attachment),
    /// - `child` is an ancestor of `owner` (would form a cycle),
    /// - the owner's kind vetoes the child.
    ///
    /// A child already owned elsewhere is moved; a child already owned by
    /// `owner` keeps its position.
    pub fn add(&mut self, owner: NodeId, child: NodeId) -> Result<bool, TreeError> {
        let owner_node = self.node(owner)?;
        let child_node = self.node(child)?;
        if owner == child {
            return Ok(false);
        }
        let current_owner = child_node.owner;
        if current_owner == Some(owner) {
            return Ok(true);
        }
        let accepted = owner_node.primitive.body().accepts(&child_node.primitive);
        let (owner_kind, child_kind) = (
            owner_node.primitive.record_kind(),
            child_node.primitive.record_kind(),
        );
        if self.ancestors(owner).any(|a| a == child) {
            warn!(%owner, %child, "refusing attachment that would form a cycle");
            return Ok(false);
        }
        if !accepted {
            debug!(
                %owner,
                %child,
                owner_kind = owner_kind.name(),
                child_kind = child_kind.name(),
                "attachment vetoed"
            );
            return Ok(false);
        }
        if let Some(previous) = current_owner {
            self.detach(previous, child);
        }
        self.nodes[child.0].owner = Some(owner);
        self.nodes[owner.0].children.push(child);
        Ok(true)
    }

    /// Detaches `child` from `owner`.
    ///
    /// Returns `Ok(false)` and changes nothing when `child` is not one of
    /// `owner`'s children. On success `child` becomes a detached root.
    pub fn remove(&mut self, owner: NodeId, child: NodeId) -> Result<bool, TreeError> {
        self.node(owner)?;
        self.node(child)?;
        Ok(self.detach(owner, child))
    }

    fn detach(&mut self, owner: NodeId, child: NodeId) -> bool {
        let children = &mut self.nodes[owner.0].children;
        let Some(pos) = children.iter().position(|&c| c == child) else {
            return false;
        };
        children.remove(pos);
        self.nodes[child.0].owner = None;
        true
    }

    /// Live position of `id` among its owner's children when the owner is a
    /// component; `-1` otherwise.
    pub fn index_in_sheet(&self, id: NodeId) -> i32 {
        if self.owner_component(id).is_none() {
            return -1;
        }
        self.owner(id)
            .and_then(|o| self.children(o).iter().position(|&c| c == id))
            .and_then(|pos| i32::try_from(pos).ok())
            .unwrap_or(-1)
    }

    /// Writes the record for `id`, including its live index.
    pub fn export_to_parameters(
        &self,
        id: NodeId,
        record: &mut ParameterCollection,
    ) -> Result<(), TreeError> {
        let node = self.node(id)?;
        node.primitive.write_parameters(record, self.index_in_sheet(id));
        Ok(())
    }

    /// Allocating form of [`export_to_parameters`](Self::export_to_parameters).
    pub fn export(&self, id: NodeId) -> Result<ParameterCollection, TreeError> {
        let mut record = ParameterCollection::new();
        self.export_to_parameters(id, &mut record)?;
        Ok(record)
    }

    /// Imports `record` into the node at `id`; tree linkage is unaffected.
    pub fn import_into(
        &mut self,
        id: NodeId,
        record: &ParameterCollection,
    ) -> Result<(), TreeError> {
        let primitive = self.get_mut(id).ok_or(TreeError::MissingNode(id))?;
        primitive.import_from_parameters(record)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::kinds::{Label, Pin, Sheet};
    use crate::RecordKind;

    fn component(tree: &mut PrimitiveTree) -> NodeId {
        tree.insert(Primitive::new(Component {
            part_count: 2,
            ..Component::default()
        }))
    }

    fn label(tree: &mut PrimitiveTree) -> NodeId {
        tree.insert(Primitive::new(Label::default()))
    }

    #[test]
    fn index_tracks_live_position() {
        let mut tree = PrimitiveTree::new();
        let p = component(&mut tree);
        let [a, b, c] = [label(&mut tree), label(&mut tree), label(&mut tree)];
        for n in [a, b, c] {
            assert!(tree.add(p, n).unwrap());
        }
        assert_eq!(tree.index_in_sheet(b), 1);
        assert!(tree.remove(p, a).unwrap());
        assert_eq!(tree.index_in_sheet(b), 0);
        assert_eq!(tree.index_in_sheet(c), 1);
        assert_eq!(tree.index_in_sheet(a), -1);
        assert_eq!(tree.owner(a), None);
    }

    #[test]
    fn single_part_component_still_indexes_children() {
        let mut tree = PrimitiveTree::new();
        let p = tree.insert(Primitive::new(Component {
            part_count: 1,
            ..Component::default()
        }));
        let a = label(&mut tree);
        let b = label(&mut tree);
        tree.add(p, a).unwrap();
        tree.add(p, b).unwrap();
        assert_eq!(tree.index_in_sheet(a), 0);
        assert_eq!(tree.index_in_sheet(b), 1);
    }

    #[test]
    fn index_is_unset_under_non_component_owner() {
        let mut tree = PrimitiveTree::new();
        let sheet = tree.insert(Primitive::new(Sheet::default()));
        let l = label(&mut tree);
        tree.add(sheet, l).unwrap();
        assert_eq!(tree.index_in_sheet(l), -1);
        assert_eq!(tree.index_in_sheet(sheet), -1);
    }

    #[test]
    fn self_attachment_is_a_silent_no_op() {
        let mut tree = PrimitiveTree::new();
        let p = component(&mut tree);
        assert!(!tree.add(p, p).unwrap());
        assert!(tree.children(p).is_empty());
        assert_eq!(tree.owner(p), None);
    }

    #[test]
    fn pins_refuse_children() {
        let mut tree = PrimitiveTree::new();
        let pin = tree.insert(Primitive::new(Pin::default()));
        let l = label(&mut tree);
        assert!(!tree.add(pin, l).unwrap());
        assert!(tree.children(pin).is_empty());
        assert_eq!(tree.owner(l), None);
    }

    #[test]
    fn components_do_not_nest() {
        let mut tree = PrimitiveTree::new();
        let outer = component(&mut tree);
        let inner = component(&mut tree);
        assert!(!tree.add(outer, inner).unwrap());
    }

    #[test]
    fn cycles_are_refused() {
        let mut tree = PrimitiveTree::new();
        let a = label(&mut tree);
        let b = label(&mut tree);
        let c = label(&mut tree);
        tree.add(a, b).unwrap();
        tree.add(b, c).unwrap();
        assert!(!tree.add(c, a).unwrap());
        assert_eq!(tree.owner(a), None);
        assert_eq!(tree.depth(c), 2);
    }

    #[test]
    fn adding_an_owned_child_moves_it() {
        let mut tree = PrimitiveTree::new();
        let first = component(&mut tree);
        let second = component(&mut tree);
        let l = label(&mut tree);
        tree.add(first, l).unwrap();
        assert!(tree.add(second, l).unwrap());
        assert!(tree.children(first).is_empty());
        assert_eq!(tree.children(second), [l]);
        assert_eq!(tree.owner(l), Some(second));
    }

    #[test]
    fn re_adding_keeps_position() {
        let mut tree = PrimitiveTree::new();
        let p = component(&mut tree);
        let a = label(&mut tree);
        let b = label(&mut tree);
        tree.add(p, a).unwrap();
        tree.add(p, b).unwrap();
        assert!(tree.add(p, a).unwrap());
        assert_eq!(tree.children(p), [a, b]);
    }

    #[test]
    fn remove_of_non_child_changes_nothing() {
        let mut tree = PrimitiveTree::new();
        let p = component(&mut tree);
        let q = component(&mut tree);
        let l = label(&mut tree);
        tree.add(q, l).unwrap();
        assert!(!tree.remove(p, l).unwrap());
        assert_eq!(tree.owner(l), Some(q));
    }

    #[test]
    fn unknown_handles_are_errors() {
        let mut tree = PrimitiveTree::new();
        let p = component(&mut tree);
        let ghost = NodeId(42);
        assert_eq!(tree.add(p, ghost), Err(TreeError::MissingNode(ghost)));
        assert_eq!(tree.remove(p, ghost), Err(TreeError::MissingNode(ghost)));
        assert_eq!(tree.add(ghost, p), Err(TreeError::MissingNode(ghost)));
        assert!(tree.export(ghost).is_err());
    }

    #[test]
    fn export_writes_live_index() {
        let mut tree = PrimitiveTree::new();
        let p = component(&mut tree);
        let a = label(&mut tree);
        let b = label(&mut tree);
        tree.add(p, a).unwrap();
        tree.add(p, b).unwrap();
        let record = tree.export(b).unwrap();
        assert_eq!(record.get("INDEXINSHEET").as_int(), Some(1));
        tree.remove(p, a).unwrap();
        let record = tree.export(b).unwrap();
        assert_eq!(record.get("INDEXINSHEET").as_int(), Some(0));
    }

    #[test]
    fn import_into_reports_mismatch_and_keeps_links() {
        let mut tree = PrimitiveTree::new();
        let p = component(&mut tree);
        let l = label(&mut tree);
        tree.add(p, l).unwrap();
        let record: ParameterCollection = "|RECORD=2|NAME=X".parse().unwrap();
        let err = tree.import_into(l, &record).unwrap_err();
        assert_eq!(
            err,
            TreeError::Codec(CodecError::RecordKindMismatch {
                expected: RecordKind::LABEL,
                actual: RecordKind::PIN,
            })
        );
        let ok: ParameterCollection = "|RECORD=4|TEXT=hi|OWNERINDEX=7".parse().unwrap();
        tree.import_into(l, &ok).unwrap();
        assert_eq!(tree.owner(l), Some(p));
        assert_eq!(tree.get(l).unwrap().owner_index, 7);
    }
}
