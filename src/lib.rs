//! Longan - template-driven PowerPoint proposal deck generation
//!
//! This library generates a fixed proposal deck into a branded .pptx
//! template: it reads the template's theme color scheme out of the OPC
//! package, derives a semantic palette with hardcoded fallbacks, strips the
//! template's existing slides, and renders declaratively positioned shapes
//! (rounded boxes, text boxes, multi-line labeled boxes) onto new slides
//! built from the template's own layouts.
//!
//! # Example
//!
//! ```no_run
//! use longan::pptx::{Deck, DeckConfig};
//! use longan::proposal;
//!
//! # fn main() -> longan::Result<()> {
//! let mut deck = Deck::open("slides/templates/genda.pptx", DeckConfig::default())?;
//! deck.delete_existing_slides()?;
//! proposal::build(&mut deck)?;
//! deck.save("slides/output/proposal.pptx")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - inspecting a template's theme
//!
//! ```no_run
//! use longan::pptx::ThemeColorMap;
//!
//! # fn main() -> longan::Result<()> {
//! let theme = ThemeColorMap::from_template("slides/templates/genda.pptx")?;
//! for (slot, color) in theme.iter() {
//!     println!("{}: {}", slot, color);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;

/// Open Packaging Conventions (OPC) layer
///
/// Reading, mutating, and writing the zip-packaged part/relationship
/// structure every OOXML document is built on.
pub mod opc;

/// PresentationML (.pptx) generation layer
///
/// Theme extraction, the semantic palette, slide geometry, shape
/// serialization, and the deck lifecycle.
pub mod pptx;

/// The warehouse-system proposal: ten fixed slides of declarative content.
pub mod proposal;

pub use error::{Error, Result};

// Re-export commonly used types for convenience
pub use pptx::{Deck, DeckConfig, Palette, RgbColor, ThemeColorMap};
