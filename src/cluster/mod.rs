//! Medoid clustering for palette points.
//!
//! A palette role ("comment", "red", "bright green") should be bound to a color
//! that actually occurs in the source image. K-means centroids are averages and
//! generally do not; k-medoids representatives are always input points.
//!
//! ## PAM
//!
//! [`Pam`] partitions points into `k` clusters around medoids and works with any
//! [`Metric`](crate::Metric), so consumers cluster on whatever notion of color
//! difference suits them:
//!
//! - circular hue distance to group colors into hue families,
//! - lightness distance to split a family into normal and bright variants,
//! - CIEDE2000 for perceptual grouping.
//!
//! **Objective**: minimize the total dissimilarity to the closest medoid:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} d(x, m_k)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use swatchbook::cluster::{Clustering, Pam};
//!
//! let hues = [2.0f32, 5.0, 8.0, 200.0, 204.0, 358.0];
//! let circular = |a: &f32, b: &f32| {
//!     let d = (a - b).abs();
//!     d.min(360.0 - d)
//! };
//!
//! let clusters = Pam::new(2).cluster(&hues, &circular).unwrap();
//! assert_eq!(clusters.len(), 2);
//! assert!(clusters[0].members.contains(&358.0)); // wraps around to the reds
//!
//! let labels = Pam::new(2).fit_predict(&hues, &circular).unwrap();
//! assert_eq!(labels[0], labels[5]);
//! assert_ne!(labels[0], labels[3]);
//! ```

mod pam;
mod traits;

pub use pam::{Cluster, Pam, PamFit};
pub use traits::Clustering;
