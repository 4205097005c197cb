//! Scripted runs: pointer input and frame ticks fed to the fold widgets,
//! one PNG per frame.

use std::rc::Rc;

use anyhow::{ensure, Result};
use foldkit_ui::prelude::*;

use crate::cards::{Card, Deck};
use crate::frames::FrameWriter;

const DRAG_FRAMES: usize = 12;
const HOLD_FRAMES: usize = 8;
const THUMB_COLUMNS: usize = 2;
const THUMB_ROWS: usize = 3;

pub struct Options {
    pub count: usize,
    pub fps: u32,
    pub shading: Option<Rc<dyn FoldShading>>,
}

impl Options {
    /// Upper bound on frames spent waiting for one animation to settle.
    fn settle_limit(&self) -> usize {
        self.fps as usize * 10
    }
}

fn ms(time: &FrameTime) -> u64 {
    time.elapsed.as_millis() as u64
}

// ── list ──────────────────────────────────────────────────────────────────

/// Drags the list, releases into a fling, then tweens to the last card and back.
pub fn run_list(out: &mut FrameWriter, opts: &Options) -> Result<usize> {
    let (w, h) = out.size();
    let mut list = FoldList::new();
    list.set_size(w, h);
    list.set_shading(opts.shading.clone());
    list.set_auto_scale_enabled(true);
    list.set_content_provider(Deck::new(opts.count));

    let mut clock = FrameClock::fixed_fps(opts.fps);
    let mut frame = 0;
    let mut render = |out: &mut FrameWriter, list: &mut FoldList<Deck>| -> Result<()> {
        out.write("list", frame, |canvas| list.draw(canvas))?;
        frame += 1;
        Ok(())
    };

    render(out, &mut list)?;

    // drag upwards across most of the lower half
    let x = w as f32 / 2.0;
    let (from, to) = (Vec2::new(x, h as f32 * 0.8), Vec2::new(x, h as f32 * 0.45));
    let t = clock.tick();
    list.on_pointer_event(&PointerEvent::down(from.x, from.y, ms(&t)));
    for step in 1..=DRAG_FRAMES {
        let t = clock.tick();
        let p = from.lerp(to, step as f32 / DRAG_FRAMES as f32);
        list.on_pointer_event(&PointerEvent::moved(p.x, p.y, ms(&t)));
        list.tick(t.dt);
        render(out, &mut list)?;
    }
    let t = clock.tick();
    list.on_pointer_event(&PointerEvent::up(to.x, to.y, ms(&t)));
    log::info!("released at {:.1}°, flinging: {}", list.angle(), list.motion().is_flinging());
    settle_list(&mut clock, &mut list, opts, |list| render(out, list))?;

    for target in [opts.count.saturating_sub(1), 0] {
        let duration = list.scroll_to_position(target);
        log::info!("scrolling to card {target} over {duration:?}");
        settle_list(&mut clock, &mut list, opts, |list| render(out, list))?;
        for _ in 0..HOLD_FRAMES {
            render(out, &mut list)?;
        }
    }

    let created = list.content_provider().map_or(0, Deck::created);
    log::info!("list: {} cards shown with {created} views", opts.count);
    Ok(frame)
}

fn settle_list(
    clock: &mut FrameClock,
    list: &mut FoldList<Deck>,
    opts: &Options,
    mut render: impl FnMut(&mut FoldList<Deck>) -> Result<()>,
) -> Result<()> {
    let mut frames = 0;
    while list.is_animating() {
        ensure!(frames < opts.settle_limit(), "list animation did not settle at {:.1}°", list.angle());
        let t = clock.tick();
        list.tick(t.dt);
        render(list)?;
        frames += 1;
    }
    Ok(())
}

// ── unfold ────────────────────────────────────────────────────────────────

/// Records transition callbacks into the log.
struct LogListener;

impl FoldingListener for LogListener {
    fn on_unfolding(&mut self) {
        log::info!("unfolding");
    }

    fn on_unfolded(&mut self) {
        log::info!("unfolded");
    }

    fn on_folding_back(&mut self) {
        log::info!("folding back");
    }

    fn on_folded_back(&mut self) {
        log::info!("folded back");
    }

    fn on_fold_progress(&mut self, progress: f32) {
        log::trace!("progress {progress:.3}");
    }
}

/// Grid of thumbnails drawn behind the transition.
struct Feed {
    thumbs: Vec<Rect>,
    details: Rect,
}

impl Feed {
    fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        let gap = w * 0.05;
        let cell_w = (w - gap * (THUMB_COLUMNS + 1) as f32) / THUMB_COLUMNS as f32;
        let cell_h = (h - gap * (THUMB_ROWS + 1) as f32) / THUMB_ROWS as f32;
        let thumbs = (0..THUMB_COLUMNS * THUMB_ROWS)
            .map(|i| {
                let (col, row) = (i % THUMB_COLUMNS, i / THUMB_COLUMNS);
                Rect::new(
                    gap + col as f32 * (cell_w + gap),
                    gap + row as f32 * (cell_h + gap),
                    cell_w,
                    cell_h * 0.6,
                )
            })
            .collect();
        Self {
            thumbs,
            details: Rect::new(w * 0.04, h * 0.04, w * 0.92, h * 0.92),
        }
    }

    /// Paints every thumbnail; the one on loan to the transition leaves a gap.
    fn paint(&self, canvas: &mut dyn Canvas, lent: Option<Rect>) {
        let gap = Color::from_rgba8(0xdd, 0xd8, 0xcc, 255);
        for (i, &rect) in self.thumbs.iter().enumerate() {
            if lent == Some(rect) {
                canvas.draw_rect(rect, gap);
            } else {
                Card::new(i).paint(canvas, rect);
            }
        }
    }
}

/// Opens one thumbnail, switches to another while open, then folds back.
pub fn run_unfold(out: &mut FrameWriter, opts: &Options) -> Result<usize> {
    let (w, h) = out.size();
    let feed = Feed::new(w, h);
    let mut wrapper = UnfoldWrapper::new();
    wrapper.set_shading(opts.shading.clone());
    wrapper.set_folding_listener(LogListener);

    let mut clock = FrameClock::fixed_fps(opts.fps);
    let mut frame = 0;
    let mut render = |out: &mut FrameWriter, wrapper: &mut UnfoldWrapper<Card>| -> Result<()> {
        let lent = wrapper.geometry().map(|g| g.cover());
        out.write("unfold", frame, |canvas| {
            feed.paint(canvas, lent);
            wrapper.draw(canvas);
        })?;
        frame += 1;
        Ok(())
    };

    render(out, &mut wrapper)?;

    let script = [(3, true), (0, true), (0, false)];
    for (thumb, open) in script {
        if open {
            let rect = feed.thumbs[thumb];
            wrapper.unfold(Card::new(thumb), rect, Card::details(thumb), feed.details);
        } else {
            wrapper.fold_back();
        }

        let mut frames = 0;
        loop {
            let settled = wrapper.wants_frame().is_none()
                && if open { wrapper.is_unfolded() } else { !wrapper.is_active() };
            if settled {
                break;
            }
            ensure!(frames < opts.settle_limit(), "unfold stuck in {:?}", wrapper.state());
            let t = clock.tick();
            wrapper.tick(t.dt);
            render(out, &mut wrapper)?;
            frames += 1;
        }
        for _ in 0..HOLD_FRAMES {
            render(out, &mut wrapper)?;
        }
    }

    let returned = wrapper.take_returned_views();
    log::info!(
        "unfold: {} views handed back ({:?})",
        returned.len(),
        returned.iter().map(Card::index).collect::<Vec<_>>()
    );
    Ok(frame)
}
