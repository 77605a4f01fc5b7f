// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lazy, predicate-driven traversal over structural and virtual children.

use crate::kinds::PrimitiveKind;
use crate::primitive::Primitive;
use crate::record_kind::RecordKind;
use crate::tree::{NodeId, PrimitiveTree};

/// A primitive reached by traversal.
///
/// `id` is `None` for virtual children: sub-records a kind stores inline,
/// which have no slot in the tree.
#[derive(Clone, Copy, Debug)]
pub struct PrimitiveRef<'a> {
    /// Tree handle for structural children.
    pub id: Option<NodeId>,
    /// The primitive itself.
    pub primitive: &'a Primitive,
}

impl PrimitiveRef<'_> {
    /// Returns `true` for an inline sub-record.
    pub fn is_virtual(&self) -> bool {
        self.id.is_none()
    }
}

/// Selects which primitives a traversal yields.
pub trait PrimitiveFilter {
    /// Returns `true` to yield `primitive`.
    fn matches(&self, primitive: &Primitive) -> bool;
}

impl<F> PrimitiveFilter for F
where
    F: Fn(&Primitive) -> bool,
{
    fn matches(&self, primitive: &Primitive) -> bool {
        self(primitive)
    }
}

impl PrimitiveFilter for RecordKind {
    fn matches(&self, primitive: &Primitive) -> bool {
        primitive.record_kind() == *self
    }
}

/// Filter accepting every primitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyPrimitive;

impl PrimitiveFilter for AnyPrimitive {
    fn matches(&self, _primitive: &Primitive) -> bool {
        true
    }
}

/// Depth-first iterator returned by [`PrimitiveTree::primitives_of`].
///
/// For a node `n` the flattened order is: every matching direct child of `n`
/// (structural, then virtual), followed by the flattened sequence of each
/// structural child in order. Virtual children are yielded but never
/// descended into. The iterator only reads the tree; cloning it yields an
/// independent cursor at the same position.
#[derive(Clone, Debug)]
pub struct PrimitivesOf<'a, F> {
    tree: &'a PrimitiveTree,
    filter: F,
    flatten: bool,
    /// Node whose direct children are being emitted, and the next slot.
    cursor: Option<(NodeId, usize)>,
    /// Nodes whose subtree is still to be visited; top of stack goes next.
    pending: Vec<NodeId>,
}

impl<'a, F> Iterator for PrimitivesOf<'a, F>
where
    F: PrimitiveFilter,
{
    type Item = PrimitiveRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((node, slot)) = self.cursor {
                match self.tree.direct_child(node, slot) {
                    Some(item) => {
                        self.cursor = Some((node, slot + 1));
                        if self.filter.matches(item.primitive) {
                            return Some(item);
                        }
                        continue;
                    }
                    None => self.cursor = None,
                }
            }
            let next = self.pending.pop()?;
            self.cursor = Some((next, 0));
            if self.flatten {
                self.pending
                    .extend(self.tree.children(next).iter().rev().copied());
            }
        }
    }
}

impl PrimitiveTree {
    fn direct_child(&self, id: NodeId, slot: usize) -> Option<PrimitiveRef<'_>> {
        let children = self.children(id);
        if let Some(&child) = children.get(slot) {
            return self.get(child).map(|primitive| PrimitiveRef {
                id: Some(child),
                primitive,
            });
        }
        self.get(id)?
            .body()
            .virtual_children()
            .get(slot - children.len())
            .map(|primitive| PrimitiveRef {
                id: None,
                primitive,
            })
    }

    /// Structural children of `id` followed by its virtual children.
    pub fn all_primitives(&self, id: NodeId) -> PrimitivesOf<'_, AnyPrimitive> {
        self.primitives_of(id, AnyPrimitive, false)
    }

    /// Descendants of `id` accepted by `filter`.
    ///
    /// With `flatten == false` only direct children are considered. The
    /// starting node itself is never yielded. Unknown handles yield nothing.
    pub fn primitives_of<F>(&self, id: NodeId, filter: F, flatten: bool) -> PrimitivesOf<'_, F>
    where
        F: PrimitiveFilter,
    {
        PrimitivesOf {
            tree: self,
            filter,
            flatten,
            cursor: None,
            pending: if self.contains(id) { vec![id] } else { Vec::new() },
        }
    }

    /// Descendants of `id` with discriminator `kind`.
    pub fn primitives_of_kind(
        &self,
        id: NodeId,
        kind: RecordKind,
        flatten: bool,
    ) -> PrimitivesOf<'_, RecordKind> {
        self.primitives_of(id, kind, flatten)
    }
}
