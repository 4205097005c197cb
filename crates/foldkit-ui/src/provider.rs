use foldkit_engine::canvas::Canvas;
use foldkit_engine::coords::Rect;
use foldkit_engine::input::PointerEvent;

use crate::event::EventResult;

/// Content drawn by a fold item.
///
/// `paint` may be called on the screen canvas (item at rest) or on the
/// item's offscreen capture (item folding); `rect` is the item's full
/// content rectangle in either case.
pub trait ContentView {
    fn paint(&self, canvas: &mut dyn Canvas, rect: Rect);

    /// Pointer events in item coordinates, delivered only while the item is at rest.
    fn on_pointer(&mut self, event: &PointerEvent) -> EventResult {
        let _ = event;
        EventResult::Ignored
    }
}

impl<T: ContentView + ?Sized> ContentView for Box<T> {
    fn paint(&self, canvas: &mut dyn Canvas, rect: Rect) {
        (**self).paint(canvas, rect)
    }

    fn on_pointer(&mut self, event: &PointerEvent) -> EventResult {
        (**self).on_pointer(event)
    }
}

/// Recycling key of a content view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ViewType {
    /// Views of the same key are interchangeable once rebound.
    Recyclable(u32),
    /// Views are never reused; they go back to the provider when unbound.
    Ignore,
}

/// Supplies the items of a fold list.
pub trait ContentProvider {
    type View: ContentView;

    fn count(&self) -> usize;

    fn view_type(&self, index: usize) -> ViewType {
        let _ = index;
        ViewType::Recyclable(0)
    }

    /// Returns the view for `index`, rebinding `recycled` when one of the
    /// matching type is available.
    fn bind(&mut self, index: usize, recycled: Option<Self::View>) -> Self::View;

    /// Takes back a view that is no longer bound and will not be recycled.
    fn release(&mut self, view: Self::View) {
        drop(view);
    }
}
