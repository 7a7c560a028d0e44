//! Assignment of colors to weighted roles.
//!
//! # Quadratic Assignment Problem
//!
//! Given `n` colors and `n` role frequencies, find the bijection minimizing
//!
//! ```text
//! C = Σ_{i≠j} d(c_i, c_j) / (f_i · f_j)
//! ```
//!
//! where `c_i` is the color placed on frequency slot `i`. Pairs of frequent
//! roles have a large `f_i · f_j`, so close colors are cheap there only if
//! they are far apart; the optimum puts the most separated colors on the most
//! used roles and lets rare roles absorb whatever similarity remains.
//!
//! # Branch and bound
//!
//! The search tree fixes one slot per level, trying the unused colors in input
//! order. Each node carries the cost of the pairs fixed so far. All terms are
//! non-negative, so a node whose cost already reaches the best complete
//! assignment is pruned; a leaf replaces the best only when strictly cheaper,
//! which keeps the first optimum found.
//!
//! The search is exact and exponential in the worst case. Palettes bind at most
//! a couple dozen roles, and pruning keeps typical inputs fast. For hard
//! deadlines, [`Qap::with_node_limit`] returns the best assignment found so far.
//!
//! # Usage
//!
//! ```rust
//! use swatchbook::{HueDistance, Qap};
//!
//! let hues = [0.0f32, 30.0, 210.0]; // red, orange, blue
//! let frequencies = [0.15, 0.7, 0.15];
//!
//! let assignment = Qap::new().assign(&hues, &frequencies, &HueDistance).unwrap();
//! assert_eq!(assignment.color(1), Some(&210.0));
//! ```

mod qap;

pub use qap::{assignment_cost, Assignment, Qap};
