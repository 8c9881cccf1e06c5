//! CompoundComponent: an ordered group of child components.

use super::{Component, ComponentCore, ComponentHandle};
use crate::geometry::{Point, Rect, Size};
use crate::render::PaintContext;

/// A composite component that aggregates children.
///
/// Children live in ordered slots that may be empty, so grid-backed
/// composites can address positions that have no occupant yet. Dirtiness
/// is the OR of the children's dirtiness; damage is collected from each
/// child and offset by the compound's own position. Beyond that derived
/// dirtiness, the compound also tracks its own bounds like a leaf:
/// explicitly marking it dirty or moving it contributes its full bounds
/// (old and new) to the damage list, so a relocated group vacates its
/// previous area even when no child changed.
///
/// Removal is deferred: a removed child stays in its slot, excluded from
/// painting, until the next non-dry damage collection detaches it and
/// reports its vacated bounds. This guarantees the area a child occupied
/// is repainted exactly once after removal.
pub struct CompoundComponent {
    core: ComponentCore,
    children: Vec<Option<ComponentHandle>>,
    removed: Vec<ComponentHandle>,
}

impl CompoundComponent {
    /// Create an empty compound at the given bounds.
    pub const fn new(position: Point, size: Size) -> Self {
        Self {
            core: ComponentCore::new(position, size),
            children: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Append a child and mark it dirty so it is painted on the next pass.
    pub fn add(&mut self, child: ComponentHandle) {
        child.lock().set_dirty(true);
        self.children.push(Some(child));
    }

    /// Insert a child before `reference`, or append when `reference` is
    /// not a child. The new child is marked dirty.
    pub fn add_before(&mut self, child: ComponentHandle, reference: &ComponentHandle) {
        child.lock().set_dirty(true);
        let index = self
            .children
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|c| c.ptr_eq(reference)))
            .unwrap_or(self.children.len());
        self.children.insert(index, Some(child));
    }

    /// Append a slot as-is, without marking its occupant dirty.
    ///
    /// Grid composites use this to lay out positions that must not
    /// contribute damage until something actually changes in them.
    pub fn add_slot(&mut self, slot: Option<ComponentHandle>) {
        self.children.push(slot);
    }

    /// Replace the occupant of a slot.
    ///
    /// The previous occupant, if any, is queued for removal so its bounds
    /// are repainted; the new occupant is marked dirty.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn set_slot(&mut self, index: usize, slot: Option<ComponentHandle>) {
        if let Some(child) = slot.as_ref() {
            child.lock().set_dirty(true);
        }
        if let Some(old) = std::mem::replace(&mut self.children[index], slot) {
            self.removed.push(old);
        }
    }

    /// The occupant of a slot, if any.
    ///
    /// Returns `None` both for an empty slot and for an out-of-range index.
    pub fn slot(&self, index: usize) -> Option<ComponentHandle> {
        self.children.get(index).and_then(Clone::clone)
    }

    /// Number of slots, occupied or not.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.children.len()
    }

    /// Check whether the compound has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Queue a child for removal.
    ///
    /// The child keeps its slot until the next non-dry damage collection;
    /// it is skipped by painting in the meantime. Returns `false` when the
    /// handle is not a child (or is already queued).
    pub fn remove(&mut self, child: &ComponentHandle) -> bool {
        if self.is_removed(child) {
            return false;
        }
        let present = self
            .children
            .iter()
            .any(|slot| slot.as_ref().is_some_and(|c| c.ptr_eq(child)));
        if present {
            self.removed.push(child.clone());
        }
        present
    }

    /// Queue every child for removal.
    pub fn clear(&mut self) {
        for child in self.children.iter().flatten() {
            if !self.removed.iter().any(|r| r.ptr_eq(child)) {
                self.removed.push(child.clone());
            }
        }
    }

    fn is_removed(&self, child: &ComponentHandle) -> bool {
        self.removed.iter().any(|r| r.ptr_eq(child))
    }

    /// Children that still participate in painting and damage.
    fn live_children(&self) -> impl Iterator<Item = &ComponentHandle> {
        self.children
            .iter()
            .flatten()
            .filter(|child| !self.is_removed(child))
    }
}

impl Component for CompoundComponent {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn is_dirty(&self) -> bool {
        let core = &self.core;
        core.dirty()
            || core.previous_bounds().is_some_and(|previous| previous != core.bounds())
            || !self.removed.is_empty()
            || self.live_children().any(|child| child.lock().is_dirty())
    }

    fn set_dirty(&mut self, dirty: bool) {
        self.core.set_dirty(dirty);
        for slot in self.children.iter().flatten() {
            slot.lock().set_dirty(dirty);
        }
    }

    fn reset_previous_bounds(&mut self) {
        self.core.snapshot_bounds();
        for slot in self.children.iter().flatten() {
            slot.lock().reset_previous_bounds();
        }
    }

    fn collect_damage(&mut self, dry: bool) -> Vec<Rect> {
        let mut sections = Vec::new();
        let bounds = self.core.bounds();

        // The compound's own bounds contribute when it was explicitly
        // marked or moved, same as a leaf.
        if self.core.dirty() || self.core.previous_bounds().is_some_and(|p| p != bounds) {
            sections.push(bounds);
            if let Some(previous) = self.core.previous_bounds() {
                if previous != bounds && !bounds.contains_rect(&previous) {
                    sections.push(previous);
                }
            }
        }

        let position = self.core.position();
        let live: Vec<ComponentHandle> = self.live_children().cloned().collect();
        for child in live {
            for section in child.lock().collect_damage(dry) {
                sections.push(section.translated(position));
            }
        }

        // Removed children vacate their bounds exactly once.
        for child in &self.removed {
            sections.push(child.lock().bounds().translated(position));
        }

        if !dry {
            let removed = std::mem::take(&mut self.removed);
            self.children.retain(|slot| match slot {
                Some(child) => !removed.iter().any(|r| r.ptr_eq(child)),
                None => true,
            });
            self.core.set_dirty(false);
            self.core.snapshot_bounds();
        }

        sections
    }

    fn paint(&mut self, ctx: &mut PaintContext<'_>, section: Rect) {
        let live: Vec<ComponentHandle> = self.live_children().cloned().collect();
        for child in live {
            child.lock().render(ctx, section);
        }
    }
}

impl std::fmt::Debug for CompoundComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompoundComponent")
            .field("bounds", &self.bounds())
            .field("slots", &self.children.len())
            .field("pending_removals", &self.removed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Pixmap;
    use crate::color::Rgba;
    use crate::component::FillComponent;

    fn fill(x: i32, y: i32, w: u32, h: u32, color: Rgba) -> ComponentHandle {
        ComponentHandle::new(FillComponent::new(Point::new(x, y), Size::new(w, h), color))
    }

    fn compound() -> CompoundComponent {
        CompoundComponent::new(Point::ORIGIN, Size::new(40, 40))
    }

    #[test]
    fn test_add_marks_child_dirty() {
        let mut group = compound();
        let child = fill(0, 0, 10, 10, Rgba::WHITE);
        assert!(!child.lock().is_dirty());

        group.add(child.clone());
        assert!(child.lock().is_dirty());
        assert!(group.is_dirty());
    }

    #[test]
    fn test_add_slot_does_not_mark_dirty() {
        let mut group = compound();
        group.add_slot(Some(fill(0, 0, 10, 10, Rgba::WHITE)));
        group.add_slot(None);

        assert_eq!(group.slot_count(), 2);
        assert!(!group.is_dirty());
    }

    #[test]
    fn test_add_before_orders_children() {
        let mut group = compound();
        let first = fill(0, 0, 10, 10, Rgba::WHITE);
        let second = fill(0, 0, 10, 10, Rgba::BLACK);
        group.add(first.clone());
        group.add_before(second.clone(), &first);

        assert!(group.slot(0).is_some_and(|c| c.ptr_eq(&second)));
        assert!(group.slot(1).is_some_and(|c| c.ptr_eq(&first)));
    }

    #[test]
    fn test_damage_offset_by_own_position() {
        let mut group = CompoundComponent::new(Point::new(100, 50), Size::new(40, 40));
        group.add(fill(5, 5, 10, 10, Rgba::WHITE));

        let sections = group.collect_damage(false);
        assert_eq!(sections, vec![Rect::new(105, 55, 10, 10)]);
    }

    #[test]
    fn test_own_movement_vacates_old_bounds() {
        let mut group = CompoundComponent::new(Point::ORIGIN, Size::new(10, 10));
        group.add(fill(0, 0, 10, 10, Rgba::WHITE));
        group.collect_damage(false);
        assert!(!group.is_dirty());

        // Moving the group itself is reported even with clean children.
        group.core_mut().set_position(Point::new(20, 0));
        assert!(group.is_dirty());

        let mut sections = group.collect_damage(false);
        sections.sort_by_key(|s| (s.x, s.y));
        assert_eq!(sections, vec![Rect::new(0, 0, 10, 10), Rect::new(20, 0, 10, 10)]);
    }

    #[test]
    fn test_dry_collection_preserves_child_state() {
        let mut group = compound();
        group.add(fill(0, 0, 10, 10, Rgba::WHITE));

        assert_eq!(group.collect_damage(true).len(), 1);
        assert!(group.is_dirty());

        assert_eq!(group.collect_damage(false).len(), 1);
        assert!(!group.is_dirty());
    }

    #[test]
    fn test_removal_is_deferred_and_vacates_bounds() {
        let mut group = compound();
        let child = fill(5, 5, 10, 10, Rgba::WHITE);
        group.add(child.clone());
        group.collect_damage(false);

        assert!(group.remove(&child));
        assert!(group.is_dirty());
        // Still occupies its slot until the next non-dry collection.
        assert_eq!(group.slot_count(), 1);

        let sections = group.collect_damage(false);
        assert_eq!(sections, vec![Rect::new(5, 5, 10, 10)]);
        assert_eq!(group.slot_count(), 0);
        assert!(!group.is_dirty());
        assert!(group.collect_damage(false).is_empty());
    }

    #[test]
    fn test_remove_unknown_child_is_noop() {
        let mut group = compound();
        group.add(fill(0, 0, 10, 10, Rgba::WHITE));
        assert!(!group.remove(&fill(0, 0, 10, 10, Rgba::BLACK)));
        assert_eq!(group.slot_count(), 1);
    }

    #[test]
    fn test_clear_queues_all_children() {
        let mut group = compound();
        group.add(fill(0, 0, 10, 10, Rgba::WHITE));
        group.add(fill(10, 0, 10, 10, Rgba::BLACK));
        group.collect_damage(false);

        group.clear();
        assert_eq!(group.collect_damage(false).len(), 2);
        assert!(group.is_empty());
    }

    #[test]
    fn test_set_slot_queues_old_occupant() {
        let mut group = compound();
        let old = fill(0, 0, 10, 10, Rgba::WHITE);
        group.add(old.clone());
        group.collect_damage(false);

        group.set_slot(0, Some(fill(20, 0, 10, 10, Rgba::BLACK)));
        let mut sections = group.collect_damage(false);
        sections.sort_by_key(|s| (s.x, s.y));

        // Vacated old bounds plus the dirty replacement.
        assert_eq!(sections, vec![Rect::new(0, 0, 10, 10), Rect::new(20, 0, 10, 10)]);
        assert_eq!(group.slot_count(), 1);
    }

    #[test]
    fn test_set_dirty_propagates_to_children() {
        let mut group = compound();
        let child = fill(0, 0, 10, 10, Rgba::WHITE);
        group.add(child.clone());
        group.collect_damage(false);

        group.set_dirty(true);
        assert!(child.lock().is_dirty());

        group.set_dirty(false);
        assert!(!child.lock().is_dirty());
        assert!(!group.is_dirty());
    }

    #[test]
    fn test_paint_renders_children_in_insertion_order() {
        let mut group = compound();
        group.add(fill(0, 0, 4, 4, Rgba::WHITE));
        group.add(fill(0, 0, 4, 4, Rgba::BLACK));

        let mut pixmap = Pixmap::new(4, 4);
        let mut ctx = PaintContext::new(&mut pixmap, Size::new(1, 1));
        group.render(&mut ctx, Rect::new(0, 0, 4, 4));

        // Later children paint over earlier ones.
        assert_eq!(pixmap.get(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn test_paint_skips_removed_children() {
        let mut group = compound();
        let child = fill(0, 0, 4, 4, Rgba::WHITE);
        group.add(child.clone());
        group.remove(&child);

        let mut pixmap = Pixmap::new(4, 4);
        let mut ctx = PaintContext::new(&mut pixmap, Size::new(1, 1));
        group.render(&mut ctx, Rect::new(0, 0, 4, 4));

        assert_eq!(pixmap.get(0, 0), Some(Rgba::TRANSPARENT));
    }
}
