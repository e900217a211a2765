//! In-memory host for running layouts without a widget toolkit.
//!
//! [`Widget`] and [`Panel`] implement the capability traits with plain
//! fields. Tests and benchmarks use them, and so can callers that only want
//! the computed geometry.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use trellis_core::{Axis, Component, Container, Insets, Orientation, PerAxis, Rect, Size};

/// A leaf box with fixed intrinsic sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub minimum: Size,
    pub preferred: Size,
    pub maximum: Size,
    pub factor: PerAxis<f64>,
    pub visible: bool,
    bounds: Rect,
}

impl Widget {
    pub fn new(minimum: Size, preferred: Size, maximum: Size) -> Self {
        Self {
            minimum,
            preferred,
            maximum,
            factor: PerAxis::splat(0.5),
            visible: true,
            bounds: Rect::default(),
        }
    }

    /// Minimum, preferred and maximum all equal.
    pub fn fixed(width: i32, height: i32) -> Self {
        let size = Size::new(width, height);
        Self::new(size, size, size)
    }

    /// Unbounded maximum.
    pub fn resizable(minimum: Size, preferred: Size) -> Self {
        Self::new(minimum, preferred, Size::MAX)
    }

    pub fn with_alignment_factor(mut self, x: f64, y: f64) -> Self {
        self.factor = PerAxis::new(x, y);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Bounds from the last layout.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_preferred_size(&mut self, preferred: Size) {
        self.preferred = preferred;
    }
}

impl Component for Widget {
    fn minimum_size(&self) -> Size {
        self.minimum
    }

    fn preferred_size(&self) -> Size {
        self.preferred
    }

    fn maximum_size(&self) -> Size {
        self.maximum
    }

    fn alignment_factor(&self, axis: Axis) -> f64 {
        self.factor[axis]
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

/// A container holding [`Widget`]s in insertion order.
#[derive(Debug, Clone)]
pub struct Panel<K> {
    children: IndexMap<K, Widget>,
    size: Size,
    insets: Insets,
    orientation: Orientation,
    factor: PerAxis<f64>,
    visible: bool,
}

impl<K: Clone + Eq + Hash + Debug> Panel<K> {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            children: IndexMap::new(),
            size: Size::new(width, height),
            insets: Insets::ZERO,
            orientation: Orientation::LeftToRight,
            factor: PerAxis::splat(0.5),
            visible: true,
        }
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_alignment_factor(mut self, x: f64, y: f64) -> Self {
        self.factor = PerAxis::new(x, y);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Add a child, replacing any child with the same key in place.
    pub fn push(&mut self, key: K, widget: Widget) {
        self.children.insert(key, widget);
    }

    pub fn with_child(mut self, key: K, widget: Widget) -> Self {
        self.push(key, widget);
        self
    }

    pub fn remove(&mut self, key: &K) -> Option<Widget> {
        self.children.shift_remove(key)
    }

    pub fn widget(&self, key: &K) -> Option<&Widget> {
        self.children.get(key)
    }

    pub fn widget_mut(&mut self, key: &K) -> Option<&mut Widget> {
        self.children.get_mut(key)
    }

    pub fn bounds(&self, key: &K) -> Option<Rect> {
        self.children.get(key).map(Widget::bounds)
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.size = Size::new(width, height);
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.children.keys()
    }
}

impl<K: Clone + Eq + Hash + Debug> Container for Panel<K> {
    type Key = K;

    fn size(&self) -> Size {
        self.size
    }

    fn insets(&self) -> Insets {
        self.insets
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn alignment_factor(&self, axis: Axis) -> f64 {
        self.factor[axis]
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_at(&self, index: usize) -> Option<K> {
        self.children.get_index(index).map(|(key, _)| key.clone())
    }

    fn component(&self, key: &K) -> Option<&dyn Component> {
        self.children.get(key).map(|widget| widget as &dyn Component)
    }

    fn component_mut(&mut self, key: &K) -> Option<&mut dyn Component> {
        self.children
            .get_mut(key)
            .map(|widget| widget as &mut dyn Component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_resizability() {
        let fixed = Widget::fixed(50, 20);
        assert!(!fixed.is_resizable(Axis::Horizontal));
        assert!(!fixed.is_resizable(Axis::Vertical));

        let field = Widget::resizable(Size::new(30, 20), Size::new(60, 20));
        assert!(field.is_resizable(Axis::Horizontal));
        assert!(field.is_resizable(Axis::Vertical));
    }

    #[test]
    fn test_panel_children_keep_insertion_order() {
        let mut panel = Panel::new(100, 100)
            .with_child("b", Widget::fixed(1, 1))
            .with_child("a", Widget::fixed(2, 2));
        assert_eq!(panel.child_count(), 2);
        assert_eq!(panel.child_at(0), Some("b"));
        assert_eq!(panel.child_at(2), None);

        panel.component_mut(&"a").unwrap().set_bounds(Rect::new(1, 2, 3, 4));
        assert_eq!(panel.bounds(&"a"), Some(Rect::new(1, 2, 3, 4)));

        panel.remove(&"b");
        assert_eq!(panel.keys().collect::<Vec<_>>(), vec![&"a"]);
    }
}
