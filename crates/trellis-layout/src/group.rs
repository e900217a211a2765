//! Shared cell sizing for uniform grids.
//!
//! Several [`GridLayout`](crate::GridLayout)s can share one [`GridGroup`] so
//! that their cells all get the size of the largest child among them and
//! the same gaps. The group is shared through `Rc` and mutated through
//! `&self`; it is not thread-safe.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use trellis_core::{Axis, Container, InvalidArgumentError, PerAxis, Size};

use crate::config::DEFAULT_GAP;

static GROUP_COUNT: AtomicU64 = AtomicU64::new(0);

/// Caller-issued handle of a group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Largest minimum, preferred and maximum size among some children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMeasure {
    pub minimum: Size,
    pub preferred: Size,
    pub maximum: Size,
}

fn max_size(a: Size, b: Size) -> Size {
    Size::from(a.to_vec().max(b.to_vec()))
}

impl CellMeasure {
    /// Measure the visible children of `container`.
    pub fn of<C: Container + ?Sized>(container: &C) -> Self {
        (0..container.child_count())
            .filter_map(|index| container.child_at(index))
            .filter_map(|key| {
                container
                    .component(&key)
                    .filter(|component| component.is_visible())
                    .map(|component| CellMeasure {
                        minimum: component.minimum_size(),
                        preferred: component.preferred_size(),
                        maximum: component.maximum_size(),
                    })
            })
            .fold(CellMeasure::default(), CellMeasure::max)
    }

    pub fn max(self, other: CellMeasure) -> Self {
        Self {
            minimum: max_size(self.minimum, other.minimum),
            preferred: max_size(self.preferred, other.preferred),
            maximum: max_size(self.maximum, other.maximum),
        }
    }
}

type Hook = Rc<dyn Fn(MemberId)>;

struct Member {
    visible: bool,
    measure: Option<CellMeasure>,
    hook: Option<Hook>,
}

struct GroupState {
    gaps: PerAxis<i32>,
    members: IndexMap<MemberId, Member>,
    shared: Option<CellMeasure>,
}

/// Resets the reentrancy flag when notification ends, even by unwinding.
struct Notifying<'a>(&'a Cell<bool>);

impl Drop for Notifying<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Containers agreeing on one cell size and one pair of gaps.
pub struct GridGroup {
    name: String,
    state: RefCell<GroupState>,
    generation: Cell<u64>,
    invalidating: Cell<bool>,
}

impl fmt::Debug for GridGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("GridGroup")
            .field("name", &self.name)
            .field("gaps", &state.gaps)
            .field("members", &state.members.keys().collect::<Vec<_>>())
            .field("generation", &self.generation.get())
            .finish_non_exhaustive()
    }
}

impl Default for GridGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl GridGroup {
    pub fn new() -> Self {
        let count = GROUP_COUNT.fetch_add(1, Ordering::Relaxed);
        Self {
            name: format!("grid-group-{count}"),
            state: RefCell::new(GroupState {
                gaps: PerAxis::splat(DEFAULT_GAP),
                members: IndexMap::new(),
                shared: None,
            }),
            generation: Cell::new(0),
            invalidating: Cell::new(false),
        }
    }

    pub fn with_gaps(x: i32, y: i32) -> Result<Self, InvalidArgumentError> {
        let group = Self::new();
        group.set_gaps(x, y)?;
        Ok(group)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gap(&self, axis: Axis) -> i32 {
        self.state.borrow().gaps[axis]
    }

    pub fn gaps(&self) -> PerAxis<i32> {
        self.state.borrow().gaps
    }

    /// Change the gaps of every member's grid.
    pub fn set_gaps(&self, x: i32, y: i32) -> Result<(), InvalidArgumentError> {
        let gaps = PerAxis::new(x, y);
        for axis in Axis::ALL {
            if gaps[axis] < 0 {
                return Err(InvalidArgumentError::NegativeGap {
                    axis,
                    value: gaps[axis],
                });
            }
        }
        self.state.borrow_mut().gaps = gaps;
        self.bump();
        Ok(())
    }

    pub fn register(&self, id: MemberId) -> Result<(), InvalidArgumentError> {
        let mut state = self.state.borrow_mut();
        if state.members.contains_key(&id) {
            return Err(InvalidArgumentError::DuplicateMember {
                id: id.0,
                group: self.name.clone(),
            });
        }
        state.members.insert(
            id,
            Member {
                visible: true,
                measure: None,
                hook: None,
            },
        );
        state.shared = None;
        drop(state);
        self.bump();
        Ok(())
    }

    pub fn unregister(&self, id: MemberId) -> Result<(), InvalidArgumentError> {
        let mut state = self.state.borrow_mut();
        if state.members.shift_remove(&id).is_none() {
            return Err(self.unknown(id));
        }
        state.shared = None;
        drop(state);
        self.bump();
        Ok(())
    }

    pub fn is_registered(&self, id: MemberId) -> bool {
        self.state.borrow().members.contains_key(&id)
    }

    pub fn member_count(&self) -> usize {
        self.state.borrow().members.len()
    }

    /// Call `hook` whenever another member invalidates the group.
    pub fn on_invalidate(
        &self,
        id: MemberId,
        hook: impl Fn(MemberId) + 'static,
    ) -> Result<(), InvalidArgumentError> {
        self.with_member(id, |member| member.hook = Some(Rc::new(hook)))
    }

    /// Hidden members do not contribute to the shared measure.
    pub fn set_member_visible(&self, id: MemberId, visible: bool) -> Result<(), InvalidArgumentError> {
        let changed = self.with_member(id, |member| {
            let changed = member.visible != visible;
            member.visible = visible;
            changed
        })?;
        if changed {
            self.state.borrow_mut().shared = None;
            self.bump();
        }
        Ok(())
    }

    pub fn record_measure(&self, id: MemberId, measure: CellMeasure) -> Result<(), InvalidArgumentError> {
        let changed = self.with_member(id, |member| {
            let changed = member.measure != Some(measure);
            member.measure = Some(measure);
            changed
        })?;
        if changed {
            self.state.borrow_mut().shared = None;
        }
        Ok(())
    }

    /// Whether `id` is registered and has no current measure.
    pub fn needs_measure(&self, id: MemberId) -> bool {
        self.state
            .borrow()
            .members
            .get(&id)
            .is_some_and(|member| member.measure.is_none())
    }

    /// Maximum over the visible, measured members.
    pub fn shared_measure(&self) -> CellMeasure {
        let mut state = self.state.borrow_mut();
        if let Some(shared) = state.shared {
            return shared;
        }
        let shared = state
            .members
            .values()
            .filter(|member| member.visible)
            .filter_map(|member| member.measure)
            .fold(CellMeasure::default(), CellMeasure::max);
        state.shared = Some(shared);
        shared
    }

    pub fn max_minimum_size(&self) -> Size {
        self.shared_measure().minimum
    }

    pub fn max_preferred_size(&self) -> Size {
        self.shared_measure().preferred
    }

    pub fn max_maximum_size(&self) -> Size {
        self.shared_measure().maximum
    }

    /// Incremented on every change that affects members' layouts.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Drop the measure of `id` and notify every other member once.
    ///
    /// Hooks may call back into the group; invalidations they trigger are
    /// recorded but not propagated again.
    pub fn invalidate(&self, id: MemberId) -> Result<(), InvalidArgumentError> {
        self.with_member(id, |member| member.measure = None)?;
        self.state.borrow_mut().shared = None;
        self.bump();

        if self.invalidating.get() {
            return Ok(());
        }
        self.invalidating.set(true);
        let _notifying = Notifying(&self.invalidating);

        let hooks: Vec<(MemberId, Hook)> = self
            .state
            .borrow()
            .members
            .iter()
            .filter(|(other, _)| **other != id)
            .filter_map(|(other, member)| member.hook.clone().map(|hook| (*other, hook)))
            .collect();
        tracing::trace!(group = %self.name, member = %id, notified = hooks.len(), "grid group invalidated");

        for (other, hook) in hooks {
            hook(other);
        }
        Ok(())
    }

    fn with_member<T>(
        &self,
        id: MemberId,
        f: impl FnOnce(&mut Member) -> T,
    ) -> Result<T, InvalidArgumentError> {
        let mut state = self.state.borrow_mut();
        match state.members.get_mut(&id) {
            Some(member) => Ok(f(member)),
            None => Err(self.unknown(id)),
        }
    }

    fn unknown(&self, id: MemberId) -> InvalidArgumentError {
        InvalidArgumentError::UnknownMember {
            id: id.0,
            group: self.name.clone(),
        }
    }

    fn bump(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{Panel, Widget};

    fn measure(width: i32, height: i32) -> CellMeasure {
        let size = Size::new(width, height);
        CellMeasure {
            minimum: size,
            preferred: size,
            maximum: size,
        }
    }

    #[test]
    fn test_measure_skips_hidden_children() {
        let panel = Panel::new(0, 0)
            .with_child(1, Widget::fixed(10, 40))
            .with_child(2, Widget::fixed(30, 20))
            .with_child(3, Widget::fixed(500, 500).hidden());
        assert_eq!(CellMeasure::of(&panel), measure(30, 40));
    }

    #[test]
    fn test_shared_measure_over_visible_members() {
        let group = GridGroup::new();
        group.register(MemberId(1)).unwrap();
        group.register(MemberId(2)).unwrap();
        group.record_measure(MemberId(1), measure(10, 40)).unwrap();
        group.record_measure(MemberId(2), measure(30, 20)).unwrap();
        assert_eq!(group.max_preferred_size(), Size::new(30, 40));

        group.set_member_visible(MemberId(2), false).unwrap();
        assert_eq!(group.max_preferred_size(), Size::new(10, 40));
    }

    #[test]
    fn test_registration_errors() {
        let group = GridGroup::new().named("buttons");
        group.register(MemberId(7)).unwrap();
        assert_eq!(
            group.register(MemberId(7)),
            Err(InvalidArgumentError::DuplicateMember {
                id: 7,
                group: "buttons".to_string()
            })
        );

        group.unregister(MemberId(7)).unwrap();
        assert!(!group.is_registered(MemberId(7)));
        assert!(matches!(
            group.invalidate(MemberId(7)),
            Err(InvalidArgumentError::UnknownMember { id: 7, .. })
        ));
    }

    #[test]
    fn test_invalidate_notifies_others_once() {
        let group = Rc::new(GridGroup::new());
        let calls = Rc::new(RefCell::new(Vec::new()));
        for id in 1..=3 {
            group.register(MemberId(id)).unwrap();
            let calls = Rc::clone(&calls);
            let inner = Rc::downgrade(&group);
            group
                .on_invalidate(MemberId(id), move |notified| {
                    calls.borrow_mut().push(notified);
                    // Reentrant invalidation is recorded but not propagated.
                    if let Some(group) = inner.upgrade() {
                        group.invalidate(notified).unwrap();
                    }
                })
                .unwrap();
        }

        let before = group.generation();
        group.invalidate(MemberId(2)).unwrap();

        assert_eq!(*calls.borrow(), vec![MemberId(1), MemberId(3)]);
        assert_eq!(group.generation(), before + 3);

        // The guard is released afterwards.
        calls.borrow_mut().clear();
        group.invalidate(MemberId(1)).unwrap();
        assert_eq!(*calls.borrow(), vec![MemberId(2), MemberId(3)]);
    }

    #[test]
    fn test_invalidate_drops_measure() {
        let group = GridGroup::with_gaps(2, 6).unwrap();
        group.register(MemberId(1)).unwrap();
        assert!(group.needs_measure(MemberId(1)));
        group.record_measure(MemberId(1), measure(5, 5)).unwrap();
        assert!(!group.needs_measure(MemberId(1)));

        group.invalidate(MemberId(1)).unwrap();
        assert!(group.needs_measure(MemberId(1)));
        assert_eq!(group.max_minimum_size(), Size::ZERO);
        assert_eq!(group.gaps(), PerAxis::new(2, 6));
    }

    #[test]
    fn test_negative_gap_rejected() {
        assert!(matches!(
            GridGroup::with_gaps(-1, 0),
            Err(InvalidArgumentError::NegativeGap { axis: Axis::Horizontal, .. })
        ));
    }
}
