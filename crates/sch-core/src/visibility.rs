// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Display-mode gated visibility.

use crate::kinds::PrimitiveKind;
use crate::primitive::ALL_PARTS;
use crate::tree::{NodeId, PrimitiveTree};

impl PrimitiveTree {
    /// Whether `id` is currently shown.
    ///
    /// A primitive is visible when its kind says so and, if its owner is a
    /// component, its `owner_part_display_mode` equals the component's active
    /// `display_mode`. Primitives under any other owner (or none) are not
    /// gated. Unknown handles are not visible.
    #[allow(clippy::match_same_arms)]
    pub fn is_visible(&self, id: NodeId) -> bool {
        let Some(primitive) = self.get(id) else {
            return false;
        };
        if !primitive.body().is_visible() {
            return false;
        }
        match self.owner_component(id) {
            None => true,
            // An all-parts primitive on a single-part component gets no
            // special treatment: it is gated on display mode like any other.
            Some(component)
                if primitive.owner_part_id == ALL_PARTS && !component.is_multi_part() =>
            {
                component.display_mode == primitive.owner_part_display_mode
            }
            Some(component) => component.display_mode == primitive.owner_part_display_mode,
        }
    }
}
