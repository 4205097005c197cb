//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use foldkit_ui::prelude::*;

/// Flat colored card that records the pointer events it receives.
pub struct Card {
    pub index: usize,
    pub color: Color,
    pub touches: Rc<RefCell<Vec<(usize, PointerAction)>>>,
}

impl ContentView for Card {
    fn paint(&self, canvas: &mut dyn Canvas, rect: Rect) {
        canvas.draw_rect(rect, self.color);
    }

    fn on_pointer(&mut self, event: &PointerEvent) -> EventResult {
        self.touches.borrow_mut().push((self.index, event.action));
        EventResult::Consumed
    }
}

/// Provider with one view type that counts what it is asked for.
#[derive(Default)]
pub struct CountingProvider {
    pub count: usize,
    /// Binds that had to create a brand-new view.
    pub created: usize,
    /// Binds that received a recycled view.
    pub reused: usize,
    pub released: usize,
    pub touches: Rc<RefCell<Vec<(usize, PointerAction)>>>,
}

impl CountingProvider {
    pub fn new(count: usize) -> Self {
        Self { count, ..Default::default() }
    }
}

impl ContentProvider for CountingProvider {
    type View = Card;

    fn count(&self) -> usize {
        self.count
    }

    fn bind(&mut self, index: usize, recycled: Option<Card>) -> Card {
        match recycled {
            Some(mut card) => {
                self.reused += 1;
                card.index = index;
                card
            }
            None => {
                self.created += 1;
                Card {
                    index,
                    color: Color::WHITE,
                    touches: self.touches.clone(),
                }
            }
        }
    }

    fn release(&mut self, _view: Card) {
        self.released += 1;
    }
}

pub fn list(count: usize, width: u32, height: u32) -> FoldList<CountingProvider> {
    let mut list = FoldList::new();
    list.set_size(width, height);
    list.set_content_provider(CountingProvider::new(count));
    list
}

pub fn provider(list: &FoldList<CountingProvider>) -> &CountingProvider {
    list.content_provider().expect("provider installed")
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Ticks at 60 fps until the list stops moving.
pub fn settle(list: &mut FoldList<CountingProvider>) -> usize {
    let mut frames = 0;
    while list.tick(std::time::Duration::from_millis(16)) {
        frames += 1;
        assert!(frames < 1000, "motion never settled");
    }
    frames
}
