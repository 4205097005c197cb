//! Foldkit UI: paper-fold transitions on top of `foldkit-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use foldkit_ui::prelude::*;
//!
//! struct Cards(Vec<Color>);
//!
//! impl ContentProvider for Cards {
//!     type View = Card;
//!     fn count(&self) -> usize { self.0.len() }
//!     fn bind(&mut self, index: usize, recycled: Option<Card>) -> Card {
//!         let mut card = recycled.unwrap_or_default();
//!         card.color = self.0[index];
//!         card
//!     }
//! }
//!
//! let mut list = FoldList::new();
//! list.set_size(360, 640);
//! list.set_content_provider(Cards(palette));
//!
//! // In your frame callback:
//! for ev in &pointer_events {
//!     list.on_pointer_event(ev);
//! }
//! list.tick(frame.dt);
//! if list.take_redraw() {
//!     list.draw(&mut canvas);
//! }
//! ```
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`item`] | `FoldItem`, the two-half fold primitive |
//! | [`half`] | `FoldHalf` rotation policy and sampling bounds |
//! | [`shading`] | `FoldShading`, `SolidShading`, `GlanceShading` |
//! | [`list`] | `FoldList` paged controller with view recycling |
//! | [`gesture`] | drag / fling handling and the snap tween |
//! | [`unfold`] | `UnfoldWrapper` cover → details transition |

pub mod animation;
pub mod config;
pub mod event;
pub mod gesture;
pub mod half;
pub mod item;
pub mod list;
pub mod provider;
pub mod recycler;
pub mod shading;
pub mod unfold;

pub use config::FoldConfig;
pub use list::FoldList;
pub use unfold::UnfoldWrapper;

/// Everything a host needs to drive fold lists. Import this in your view code.
pub mod prelude {
    pub use crate::config::FoldConfig;
    pub use crate::event::EventResult;
    pub use crate::item::FoldItem;
    pub use crate::list::{FoldDecoration, FoldList};
    pub use crate::provider::{ContentProvider, ContentView, ViewType};
    pub use crate::shading::{FoldShading, GlanceShading, Gravity, SolidShading};
    pub use crate::unfold::{FoldingListener, UnfoldState, UnfoldWrapper};

    // Re-export the engine primitives everyone needs.
    pub use foldkit_engine::canvas::{Canvas, DrawList, RasterCanvas};
    pub use foldkit_engine::coords::{IRect, Rect, Vec2};
    pub use foldkit_engine::input::{PointerAction, PointerEvent};
    pub use foldkit_engine::paint::{Bitmap, BitmapAllocator, Color};
    pub use foldkit_engine::time::{FrameClock, FrameTime};
}
