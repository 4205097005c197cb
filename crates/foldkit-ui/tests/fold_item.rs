use std::rc::Rc;

use foldkit_engine::canvas::DrawCmd;
use foldkit_engine::paint::{BitmapAllocator, BudgetAllocator, HeapAllocator};
use foldkit_ui::prelude::*;

struct Fill;

impl ContentView for Fill {
    fn paint(&self, canvas: &mut dyn Canvas, rect: Rect) {
        canvas.draw_rect(rect, Color::WHITE);
    }
}

fn item(width: u32, height: u32) -> FoldItem<Fill> {
    let mut item = FoldItem::new(&FoldConfig::default());
    item.set_size(width, height);
    item.attach_content(Fill);
    item
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ── rotation policy ───────────────────────────────────────────────────────

#[test]
fn only_one_half_rotates() {
    let mut item = item(100, 100);

    item.set_fold_rotation(-45.0);
    assert_eq!(item.top().rotation_x(), -45.0);
    assert_eq!(item.bottom().rotation_x(), 0.0);
    assert!(item.top().is_visible() && item.bottom().is_visible());

    item.set_fold_rotation(45.0);
    assert_eq!(item.top().rotation_x(), 0.0);
    assert_eq!(item.bottom().rotation_x(), 45.0);
    assert!(item.top().is_visible() && item.bottom().is_visible());
}

#[test]
fn exactly_one_half_hidden_at_right_angles() {
    let mut item = item(100, 100);

    item.set_fold_rotation(90.0);
    assert!(item.top().is_visible());
    assert!(!item.bottom().is_visible());

    item.set_fold_rotation(-90.0);
    assert!(!item.top().is_visible());
    assert!(item.bottom().is_visible());
}

#[test]
fn halves_hidden_at_rest() {
    let item = item(100, 100);
    assert!(!item.in_transformation());
    assert!(!item.top().is_visible());
    assert!(!item.bottom().is_visible());
}

// ── rolling ───────────────────────────────────────────────────────────────

#[test]
fn rolling_distance_shifts_the_seam_with_both_halves() {
    let mut item = item(200, 200);
    item.set_rolling_distance(50.0);

    let (top, bottom) = (item.top(), item.bottom());
    assert!(approx(top.clipping_factor(), 0.25));
    assert!(approx(bottom.clipping_factor(), 0.75));
    assert_eq!(top.translation_y(), 50.0);
    assert_eq!(bottom.translation_y(), 50.0);
}

#[test]
fn halves_share_a_seam_for_any_rolling_distance() {
    let mut item = item(200, 301);
    let mut d = -200.0;
    while d <= 200.0 {
        item.set_rolling_distance(d);
        let (top, bottom) = (item.top(), item.bottom());
        assert!(approx(top.clipping_factor() + bottom.clipping_factor(), 1.0), "d = {d}");

        let seam = (top.bitmap_bounds().bottom - bottom.bitmap_bounds().top).abs();
        let clamped = top.bitmap_bounds().is_empty() || bottom.bitmap_bounds().is_empty();
        assert!(clamped || seam <= 1, "d = {d}: seam gap {seam}");
        d += 12.5;
    }
}

// ── auto-fit ──────────────────────────────────────────────────────────────

#[test]
fn auto_fit_shrinks_a_right_angle_fold() {
    let mut item = item(400, 800);
    item.set_auto_scale_enabled(true);

    item.set_fold_rotation(90.0);
    assert!(approx(item.scale_factor(), 400.0 / (400.0 + 800.0 * (8.0 / 48.0))));
    assert!(approx(item.scale_factor(), 0.75));

    item.set_fold_rotation(0.0);
    assert_eq!(item.scale_factor(), 1.0);
}

// ── capture ───────────────────────────────────────────────────────────────

#[test]
fn capture_exists_only_while_folding_content() {
    let mut item = item(64, 64);
    let mut canvas = DrawList::new();
    item.draw(&mut canvas);
    assert!(!item.has_capture());

    item.set_fold_rotation(20.0);
    item.draw(&mut canvas);
    assert!(item.has_capture());

    item.detach();
    assert!(!item.has_capture());
}

#[test]
fn refused_capture_degrades_to_direct_drawing() {
    let mut item = item(64, 64);
    item.set_bitmap_allocator(Rc::new(BudgetAllocator::new(64)));
    item.set_fold_rotation(20.0);

    for _ in 0..3 {
        let mut canvas = DrawList::new();
        item.draw(&mut canvas);
        assert_eq!(canvas.len(), 1);
    }
    assert!(!item.has_capture());

    // a new allocator gets another chance
    item.set_bitmap_allocator(Rc::new(HeapAllocator));
    item.draw(&mut DrawList::new());
    assert!(item.has_capture());
}

#[test]
fn direct_drawing_applies_scale_about_center() {
    let mut item = item(100, 100);
    item.set_scale(0.5);
    let mut canvas = DrawList::new();
    item.draw(&mut canvas);
    let bounds = canvas.items()[0].device_bounds().unwrap();
    assert_eq!(bounds, Rect::new(25.0, 25.0, 50.0, 50.0));
}

// ── shading ───────────────────────────────────────────────────────────────

#[test]
fn solid_shading_darkens_the_rotating_half() {
    let mut item = item(100, 100);
    item.set_shading(Some(Rc::new(SolidShading::new())));
    item.set_fold_rotation(-60.0);

    let mut canvas = DrawList::new();
    item.draw(&mut canvas);
    let shadows: Vec<_> = canvas
        .items()
        .iter()
        .filter_map(|i| match i.cmd {
            DrawCmd::Rect { rect, color } => Some((rect, color)),
            _ => None,
        })
        .collect();
    assert_eq!(shadows, vec![(Rect::new(0.0, 0.0, 100.0, 50.0), Color::BLACK.with_alpha_u8(128))]);
}

#[test]
fn glance_sweeps_over_the_bottom_half() {
    let glance = HeapAllocator.allocate(100, 50).unwrap();
    let mut item = item(200, 200);
    item.set_shading(Some(Rc::new(GlanceShading::new(glance))));
    item.set_fold_rotation(70.0);

    let mut canvas = DrawList::new();
    item.draw(&mut canvas);
    let glance_draw = canvas
        .items()
        .iter()
        .find(|i| matches!(i.cmd, DrawCmd::Bitmap { bitmap_size: (100, 50), .. }))
        .expect("glance drawn");

    match glance_draw.cmd {
        DrawCmd::Bitmap { dst, .. } => assert_eq!(dst, Rect::new(0.0, 166.0, 200.0, 100.0)),
        _ => unreachable!(),
    }
    assert!(glance_draw.clip_rect.is_some());
    // the bottom half is not darkened by the glance strategy
    assert!(!canvas.items().iter().any(|i| matches!(i.cmd, DrawCmd::Rect { .. })));
}
