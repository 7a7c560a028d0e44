//! Binding palette colors to named roles.
//!
//! Two consumers of a reduced palette:
//!
//! - [`SyntaxPalette`] groups colors into one perceptual cluster per editor
//!   syntax group, then assigns clusters to groups so that the most frequent
//!   groups get the most hue-separated colors.
//! - [`AnsiPalette`] sorts colors into six hue families for the sixteen ANSI
//!   terminal slots, each family split into a normal and a bright variant.
//!
//! ## Usage
//!
//! ```rust
//! use swatchbook::{AnsiLayout, AnsiPalette, Hsl, Rgb};
//!
//! let colors: Vec<Rgb> = [0.0, 60.0, 120.0, 180.0, 240.0, 300.0]
//!     .iter()
//!     .flat_map(|&h| {
//!         [
//!             Rgb::from_hsl(Hsl::new(h, 0.8, 0.35)),
//!             Rgb::from_hsl(Hsl::new(h, 0.8, 0.7)),
//!         ]
//!     })
//!     .collect();
//!
//! let palette = AnsiPalette::classify(&colors, AnsiLayout::RedGreen).unwrap();
//! assert_eq!(palette.slot(1), Some(colors[0]));
//! assert_eq!(palette.slot(9), Some(colors[1]));
//! ```

mod syntax;
mod terminal;

pub use syntax::{RoleFrequencies, SyntaxGroup, SyntaxPalette};
pub use terminal::{AnsiLayout, AnsiPalette};
