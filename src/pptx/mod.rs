//! PresentationML (.pptx) generation support.
//!
//! Everything needed to turn a branded template into a finished deck:
//! theme color extraction, the semantic palette, the content-area geometry
//! helper, shape serialization, placeholder handling, and the `Deck`
//! lifecycle that ties them together.

pub mod color;
pub mod deck;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod placeholder;
pub mod shapes;
pub mod theme;
pub mod units;

pub use color::RgbColor;
pub use deck::{Deck, DeckConfig, DraftSlide};
pub use error::{PptxError, Result};
pub use geometry::{ContentArea, Rect};
pub use palette::Palette;
pub use placeholder::{PlaceholderKind, PlaceholderTolerance};
pub use shapes::Align;
pub use theme::ThemeColorMap;
