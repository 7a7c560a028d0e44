//! Palette classification.
//!
//! `swatchbook` turns a bag of extracted colors into a usable color scheme. It is
//! generic over the point type and the distance function, so the same
//! algorithms run on hues, RGB triples, Lab coordinates or plain numbers.
//!
//! The pipeline has three stages:
//! - [`reduce`]: keep the largest subset of mutually distinguishable colors
//!   (closeness graph, connected components, maximum clique)
//! - [`cluster`]: k-medoids (PAM) clustering under any [`Metric`]
//! - [`assign`]: branch-and-bound assignment of colors to weighted roles
//!
//! [`roles`] builds editor syntax palettes and ANSI terminal palettes on top of
//! these, and [`color`] / [`metric`] provide the color types and perceptual
//! distances they use.

#![forbid(unsafe_code)]

pub mod assign;
pub mod cluster;
pub mod color;
pub mod error;
pub mod metric;
pub mod reduce;
pub mod roles;

mod util;

pub use assign::{assignment_cost, Assignment, Qap};
pub use cluster::{Cluster, Clustering, Pam, PamFit};
pub use color::{Hsl, Rgb};
pub use error::{Error, Result};
pub use metric::{Ciede2000, EuclideanRgb, HueDistance, LightnessDistance, Metric};
pub use reduce::{CliqueReducer, ClosenessGraph};
pub use roles::{AnsiLayout, AnsiPalette, RoleFrequencies, SyntaxGroup, SyntaxPalette};
