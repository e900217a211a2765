//! End-to-end layouts of small forms through the headless host.

use std::cell::RefCell;
use std::rc::Rc;

use trellis_core::{Axis, Insets, Rect, Size, TrellisError};
use trellis_layout::headless::{Panel, Widget};
use trellis_layout::{GridGroup, GridLayout, ItemDefaults, MemberId, TableConfig, TableLayout};

#[test]
fn fixed_label_and_growing_field() {
    let mut panel = Panel::new(200, 20)
        .with_child("a", Widget::fixed(50, 20))
        .with_child("b", Widget::resizable(Size::new(30, 20), Size::new(60, 20)));
    let mut layout = TableLayout::new();
    layout.add_item("a", "0 0").unwrap();
    layout.add_item("b", "+ . 1 1 fill top 1 0").unwrap();
    layout.layout(&mut panel).unwrap();

    assert_eq!(panel.bounds(&"a"), Some(Rect::new(0, 0, 50, 20)));
    // 200 - gap - first column.
    assert_eq!(panel.bounds(&"b"), Some(Rect::new(54, 0, 146, 20)));
}

#[test]
fn spanning_item_covers_both_columns_and_gap() {
    let mut panel = Panel::new(0, 0)
        .with_child("a", Widget::resizable(Size::new(50, 20), Size::new(100, 20)))
        .with_child("b", Widget::fixed(40, 20))
        .with_child("c", Widget::fixed(30, 25));
    let mut layout = TableLayout::new();
    layout.add_item("a", "0 0 2 1 fill fill 0 0").unwrap();
    layout.add_item("b", "0 + 1 1").unwrap();
    layout.add_item("c", "1 . 1 1").unwrap();

    assert_eq!(layout.strip_count(Axis::Horizontal), 2);
    assert_eq!(layout.strip_count(Axis::Vertical), 2);

    let preferred = layout.preferred_size(&panel).unwrap();
    assert_eq!(preferred, Size::new(104, 49));
    panel.resize(preferred.width, preferred.height);
    layout.layout(&mut panel).unwrap();

    let strips = layout.resolved_strips(&panel).unwrap();
    assert_eq!(strips.x, vec![50, 50]);
    assert_eq!(strips.y, vec![20, 25]);

    // First cell is both columns plus the gap; first row has a's height.
    assert_eq!(panel.bounds(&"a"), Some(Rect::new(0, 0, 104, 20)));
    // Fixed items sit centered by their own alignment factor.
    assert_eq!(panel.bounds(&"b"), Some(Rect::new(5, 26, 40, 20)));
    assert_eq!(panel.bounds(&"c"), Some(Rect::new(64, 24, 30, 25)));
}

#[test]
fn narrow_container_overflows_trailing_items() {
    let mut panel = Panel::new(250, 10);
    let config = TableConfig::default().with_gaps(0, 0).unwrap();
    let mut layout = TableLayout::with_config(config).unwrap();
    for (key, text) in [("a", "0 0"), ("b", "+ ."), ("c", "+ .")] {
        panel.push(key, Widget::fixed(100, 10));
        layout.add_item(key, text).unwrap();
    }
    layout.layout(&mut panel).unwrap();

    let c = panel.bounds(&"c").unwrap();
    assert_eq!(c.x, 200);
    assert_eq!(c.right(), 300);
}

#[test]
fn malformed_constraint_is_rejected_without_side_effects() {
    let mut layout: TableLayout<&str> = TableLayout::new();

    let err: TrellisError = layout.add_item("x", "a b").unwrap_err().into();
    assert!(matches!(err, TrellisError::ConstraintSyntax(_)));
    assert!(layout.is_empty());

    layout.add_item("x", "0 0").unwrap();
    assert_eq!(layout.len(), 1);
}

#[test]
fn form_with_item_defaults() {
    let mut panel = Panel::new(300, 100);
    let mut layout = TableLayout::new();
    for row in 0..2 {
        let label = format!("label{row}");
        let field = format!("field{row}");
        panel.push(label.clone(), Widget::fixed(80, 20));
        panel.push(field.clone(), Widget::resizable(Size::new(40, 20), Size::new(150, 24)));
        layout
            .add_item_with_defaults(label, "+", ItemDefaults::label())
            .unwrap();
        layout
            .add_item_with_defaults(field, "+ .", ItemDefaults::text_field())
            .unwrap();
    }
    layout.layout(&mut panel).unwrap();

    assert_eq!(panel.bounds(&"field0".to_string()), Some(Rect::new(84, 0, 216, 24)));
    assert_eq!(panel.bounds(&"label1".to_string()), Some(Rect::new(0, 30, 80, 20)));
}

#[test]
fn insets_are_added_to_layout_sizes() {
    let panel = Panel::new(0, 0)
        .with_insets(Insets::new(1, 2, 3, 4))
        .with_child(1, Widget::fixed(10, 10));
    let config = TableConfig::default().with_insets(Insets::uniform(5));
    let mut layout = TableLayout::with_config(config).unwrap();
    layout.add_item(1, "0 0").unwrap();

    assert_eq!(layout.minimum_size(&panel).unwrap(), Size::new(26, 24));
}

#[test]
fn grid_group_members_share_cell_size_and_invalidation() {
    let group = Rc::new(GridGroup::new().named("buttons"));
    let top = GridLayout::in_group(1, 0, Rc::clone(&group), MemberId(1)).unwrap();
    let bottom = GridLayout::in_group(1, 0, Rc::clone(&group), MemberId(2)).unwrap();

    let mut top_panel = Panel::new(300, 30)
        .with_child(0, Widget::fixed(40, 20))
        .with_child(1, Widget::fixed(40, 20));
    let mut bottom_panel = Panel::new(300, 30).with_child(0, Widget::fixed(70, 20));

    let notified = Rc::new(RefCell::new(Vec::new()));
    {
        let notified = Rc::clone(&notified);
        group
            .on_invalidate(MemberId(1), move |id| notified.borrow_mut().push(id))
            .unwrap();
    }

    top.layout(&mut top_panel).unwrap();
    bottom.layout(&mut bottom_panel).unwrap();
    top.layout(&mut top_panel).unwrap();

    // Both grids use the widest button.
    assert_eq!(top_panel.bounds(&1), Some(Rect::new(74, 0, 70, 20)));
    assert_eq!(bottom_panel.bounds(&0), Some(Rect::new(0, 0, 70, 20)));

    // The bottom row shrinks; the top row hears about it.
    *bottom_panel.widget_mut(&0).unwrap() = Widget::fixed(30, 20);
    bottom.invalidate().unwrap();
    assert_eq!(*notified.borrow(), vec![MemberId(1)]);

    bottom.layout(&mut bottom_panel).unwrap();
    top.layout(&mut top_panel).unwrap();
    assert_eq!(top_panel.bounds(&1), Some(Rect::new(44, 0, 40, 20)));
}
