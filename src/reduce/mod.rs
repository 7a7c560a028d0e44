//! Diversity reduction: keep the largest set of mutually distinguishable colors.
//!
//! Colors extracted from a photograph come in runs of near-identical shades.
//! Binding two roles to shades nobody can tell apart wastes a role, so before
//! clustering the palette is reduced to a subset where every pair is more than
//! `threshold` apart.
//!
//! # Algorithm
//!
//! 1. **Graph**: evaluate the metric on every pair. Pairs with distance
//!    `> threshold` are distinguishable, the rest are too close.
//! 2. **Components**: split the points into connected components of the
//!    too-close relation. Any two points from different components are
//!    distinguishable, so the maximum clique of the whole graph is the union
//!    of per-component maximum cliques. The split is exact and keeps the
//!    exponential search confined to small groups of similar shades.
//! 3. **Clique search**: branch-and-bound maximum clique in each component,
//!    bounded by a greedy colouring of the candidates. An isolated point is its
//!    own clique and is always kept.
//!
//! # Complexity
//!
//! O(n²) metric calls. The clique search is exponential in the size of the
//! largest component in the worst case; the colouring bound keeps components
//! of a few hundred perceptual shades tractable in practice.
//!
//! # Usage
//!
//! ```rust
//! use swatchbook::CliqueReducer;
//!
//! let values = [0, 1, 2, 10, 20, 21, 22];
//! let abs = |a: &i32, b: &i32| (a - b).abs() as f32;
//!
//! let kept = CliqueReducer::new(1.5).reduce(&values, &abs).unwrap();
//! assert_eq!(kept, vec![0, 2, 10, 20, 22]);
//! ```

mod clique;
mod graph;

pub use graph::ClosenessGraph;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::metric::Metric;

/// Maximum-clique palette reducer.
#[derive(Debug, Clone)]
pub struct CliqueReducer {
    /// Minimum distance two kept points must exceed.
    threshold: f32,
}

impl CliqueReducer {
    /// Create a reducer that keeps points pairwise farther apart than `threshold`.
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Set the distance threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Indices of the kept points, grouped by component.
    pub fn reduce_indices<P, M>(&self, points: &[P], metric: &M) -> Result<Vec<usize>>
    where
        M: Metric<P> + ?Sized,
    {
        if self.threshold.is_nan() || self.threshold < 0.0 {
            return Err(Error::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        if points.is_empty() {
            return Ok(Vec::new());
        }

        let graph = ClosenessGraph::build(points, self.threshold, metric);
        let components = graph.components();

        let mut kept = Vec::new();
        for component in &components {
            let best = clique::maximum_clique(&graph, component);
            trace!(
                component_size = component.len(),
                clique_size = best.len(),
                "reduced component"
            );
            kept.extend(best);
        }

        debug!(
            n = points.len(),
            components = components.len(),
            kept = kept.len(),
            threshold = self.threshold,
            "palette reduced"
        );
        Ok(kept)
    }

    /// Largest subset of `points` whose members are pairwise farther apart than
    /// the threshold. Returns clones of the original values.
    pub fn reduce<P, M>(&self, points: &[P], metric: &M) -> Result<Vec<P>>
    where
        P: Clone,
        M: Metric<P> + ?Sized,
    {
        Ok(self
            .reduce_indices(points, metric)?
            .into_iter()
            .map(|i| points[i].clone())
            .collect())
    }
}

impl Default for CliqueReducer {
    /// A CIEDE2000 difference of 20 separates shades that read as distinct colors.
    fn default() -> Self {
        Self::new(20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::metric::{Ciede2000, EuclideanRgb};

    fn abs(a: &i32, b: &i32) -> f32 {
        (a - b).abs() as f32
    }

    fn assert_clique(values: &[i32], threshold: f32) {
        for (i, a) in values.iter().enumerate() {
            for b in &values[i + 1..] {
                assert!(
                    abs(a, b) > threshold,
                    "{a} and {b} are within {threshold} of each other"
                );
            }
        }
    }

    #[test]
    fn test_reduce_one_per_component() {
        let values = [0, 1, 2, 3, 6, 7, 8, 11, 12, 13, 14, 16];
        let kept = CliqueReducer::new(2.5).reduce(&values, &abs).unwrap();
        // {0, 3} from the first component, one of 6..8 from the second and a
        // pair from the last.
        assert_eq!(kept.len(), 5);
        assert_eq!(&kept[..2], &[0, 3]);
        assert!((6..=8).contains(&kept[2]));
        assert!(kept[3..].iter().all(|v| (11..=16).contains(v)));
        assert_clique(&kept, 2.5);
    }

    #[test]
    fn test_reduce_gaps_equal_to_threshold() {
        let values = [0, 1, 2, 3, 6, 7, 8, 11, 12, 13, 14, 16];
        let kept = CliqueReducer::new(3.0).reduce(&values, &abs).unwrap();
        // Gaps of exactly 3 merge everything into one component.
        assert_eq!(kept.len(), 4);
        assert_clique(&kept, 3.0);
    }

    #[test]
    fn test_reduce_15_integers() {
        let values = [1, 2, 3, 6, 7, 8, 11, 12, 13, 16, 17, 18, 21, 22, 23];
        let mut kept = CliqueReducer::new(3.0).reduce(&values, &abs).unwrap();
        kept.sort();
        assert_eq!(kept.len(), 5);
        for (value, base) in kept.iter().zip([1, 6, 11, 16, 21]) {
            assert!((base..base + 3).contains(value), "{value} not near {base}");
        }
        assert_clique(&kept, 3.0);
    }

    #[test]
    fn test_reduce_threshold_zero_keeps_distinct_colors() {
        let colors = [
            Rgb::new(12, 13, 14),
            Rgb::new(24, 25, 26),
            Rgb::new(100, 101, 102),
        ];
        let kept = CliqueReducer::new(0.0).reduce(&colors, &EuclideanRgb).unwrap();
        assert_eq!(kept, colors.to_vec());
    }

    #[test]
    fn test_reduce_drops_exact_duplicates() {
        let kept = CliqueReducer::new(0.0).reduce(&[5, 5, 9], &abs).unwrap();
        assert_eq!(kept, vec![5, 9]);
    }

    #[test]
    fn test_reduce_perceptual_shades() {
        let colors = [
            Rgb::new(200, 30, 30),
            Rgb::new(205, 32, 30),
            Rgb::new(30, 30, 200),
            Rgb::new(32, 30, 205),
            Rgb::new(30, 180, 30),
        ];
        let kept = CliqueReducer::default().reduce(&colors, &Ciede2000).unwrap();
        assert_eq!(kept.len(), 3);
        assert!(colors[..2].contains(&kept[0]));
        assert!(colors[2..4].contains(&kept[1]));
        assert_eq!(kept[2], colors[4]);
    }

    #[test]
    fn test_reduce_empty_input() {
        let values: [i32; 0] = [];
        assert!(CliqueReducer::new(1.0).reduce(&values, &abs).unwrap().is_empty());
    }

    #[test]
    fn test_reduce_invalid_threshold() {
        assert!(matches!(
            CliqueReducer::new(-1.0).reduce(&[1, 2], &abs),
            Err(Error::InvalidThreshold { .. })
        ));
        assert!(matches!(
            CliqueReducer::new(f32::NAN).reduce(&[1, 2], &abs),
            Err(Error::InvalidThreshold { .. })
        ));
        let empty: [i32; 0] = [];
        assert!(CliqueReducer::new(-1.0).reduce(&empty, &abs).is_err());
    }

    #[test]
    fn test_with_threshold() {
        let reducer = CliqueReducer::default().with_threshold(7.5);
        assert_eq!(reducer.threshold(), 7.5);
    }
}
