//! Generated card content for the demo scenarios.

use foldkit_engine::canvas::Canvas;
use foldkit_engine::coords::Rect;
use foldkit_engine::paint::Color;
use foldkit_ui::provider::{ContentProvider, ContentView};

const PALETTE: [(u8, u8, u8); 6] = [
    (0x3d, 0x5a, 0x80),
    (0xe0, 0x7a, 0x5f),
    (0x81, 0xb2, 0x9a),
    (0xf2, 0xcc, 0x8f),
    (0x6d, 0x59, 0x7a),
    (0x2a, 0x9d, 0x8f),
];

/// A flat card: colored body, darker header band, a few text-like bars.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    index: usize,
    body: Color,
    header: Color,
    lines: usize,
}

impl Card {
    pub fn new(index: usize) -> Self {
        let (r, g, b) = PALETTE[index % PALETTE.len()];
        Self {
            index,
            body: Color::from_rgba8(r, g, b, 255),
            header: Color::from_rgba8(r / 2, g / 2, b / 2, 255),
            lines: 3 + index % 3,
        }
    }

    /// The expanded counterpart of a thumbnail card.
    pub fn details(index: usize) -> Self {
        Self { lines: 12, ..Self::new(index) }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    fn rebind(&mut self, index: usize) {
        *self = Self::new(index);
    }
}

impl ContentView for Card {
    fn paint(&self, canvas: &mut dyn Canvas, rect: Rect) {
        canvas.draw_rect(rect, self.body);

        let header = Rect::new(rect.origin.x, rect.origin.y, rect.width(), rect.height() * 0.2);
        canvas.draw_rect(header, self.header);

        let pad = rect.width() * 0.08;
        let line_h = (rect.height() * 0.03).max(2.0);
        let bottom = rect.max().y - pad;
        let bar = Color::from_straight(1.0, 1.0, 1.0, 0.55);

        let mut y = header.max().y + pad;
        for i in 0..self.lines {
            if y + line_h > bottom {
                break;
            }
            let full = rect.width() - 2.0 * pad;
            let w = if i % 3 == 2 { full * 0.6 } else { full };
            canvas.draw_rect(Rect::new(rect.origin.x + pad, y, w, line_h), bar);
            y += line_h * 2.2;
        }
    }
}

/// `count` cards, rebinding recycled shells in place.
#[derive(Debug)]
pub struct Deck {
    count: usize,
    created: usize,
}

impl Deck {
    pub fn new(count: usize) -> Self {
        Self { count, created: 0 }
    }

    /// Number of card views ever built.
    #[inline]
    pub fn created(&self) -> usize {
        self.created
    }
}

impl ContentProvider for Deck {
    type View = Card;

    fn count(&self) -> usize {
        self.count
    }

    fn bind(&mut self, index: usize, recycled: Option<Card>) -> Card {
        match recycled {
            Some(mut card) => {
                card.rebind(index);
                card
            }
            None => {
                self.created += 1;
                Card::new(index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foldkit_engine::canvas::{DrawCmd, DrawList};

    #[test]
    fn recycled_cards_take_the_new_index() {
        let mut deck = Deck::new(8);
        let first = deck.bind(0, None);
        let again = deck.bind(7, Some(first));
        assert_eq!(again.index(), 7);
        assert_eq!(deck.created(), 1);
    }

    #[test]
    fn card_paints_inside_its_rect() {
        let rect = Rect::new(10.0, 10.0, 100.0, 200.0);
        let mut canvas = DrawList::new();
        Card::details(2).paint(&mut canvas, rect);

        assert!(canvas.len() > 2);
        for item in canvas.items() {
            let DrawCmd::Rect { rect: r, .. } = item.cmd else {
                panic!("unexpected {:?}", item.cmd);
            };
            assert!(r.origin.x >= rect.origin.x && r.max().x <= rect.max().x);
            assert!(r.origin.y >= rect.origin.y && r.max().y <= rect.max().y);
        }
    }
}
