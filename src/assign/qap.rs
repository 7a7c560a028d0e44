use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::metric::Metric;
use crate::util;

/// Branch-and-bound solver for the color/frequency assignment problem.
#[derive(Debug, Clone, Default)]
pub struct Qap {
    /// Maximum number of search nodes expanded once a first solution exists.
    node_limit: Option<usize>,
}

/// A bijection between colors and frequency slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<P> {
    /// `(color, frequency)` pairs in frequency-slot order.
    pub pairs: Vec<(P, f32)>,
    /// Objective value of this pairing.
    pub cost: f64,
    /// False when the node limit cut the search short.
    pub exhaustive: bool,
}

impl<P> Assignment<P> {
    /// Color bound to frequency slot `slot`.
    pub fn color(&self, slot: usize) -> Option<&P> {
        self.pairs.get(slot).map(|(c, _)| c)
    }
}

impl Qap {
    /// Create an exhaustive solver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after expanding `limit` nodes, as long as one complete assignment
    /// has been found, and return the best assignment so far.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Color index per frequency slot, the cost, and whether the search completed.
    fn solve<P, M>(
        &self,
        colors: &[P],
        frequencies: &[f32],
        metric: &M,
    ) -> Result<(Vec<usize>, f64, bool)>
    where
        M: Metric<P> + ?Sized,
    {
        if colors.len() != frequencies.len() {
            return Err(Error::CardinalityMismatch {
                colors: colors.len(),
                frequencies: frequencies.len(),
            });
        }
        if frequencies.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(Error::InvalidParameter {
                name: "frequencies",
                message: "must be finite and positive",
            });
        }

        let n = colors.len();
        let dists = util::pairwise_distances(colors, metric);
        let mut search = Search {
            n,
            dists: &dists,
            frequencies,
            node_limit: self.node_limit,
            nodes: 0,
            used: vec![false; n],
            order: Vec::with_capacity(n),
            best_order: Vec::new(),
            best: f64::INFINITY,
            stopped: false,
        };
        search.descend(0.0);

        debug!(
            n,
            nodes = search.nodes,
            cost = search.best,
            exhaustive = !search.stopped,
            "assignment solved"
        );
        Ok((search.best_order, search.best, !search.stopped))
    }

    /// Pair every color with exactly one frequency, minimizing
    /// `Σ_{i≠j} d(c_i, c_j) / (f_i · f_j)`.
    pub fn assign<P, M>(
        &self,
        colors: &[P],
        frequencies: &[f32],
        metric: &M,
    ) -> Result<Assignment<P>>
    where
        P: Clone,
        M: Metric<P> + ?Sized,
    {
        let (order, cost, exhaustive) = self.solve(colors, frequencies, metric)?;
        let pairs = order
            .into_iter()
            .zip(frequencies)
            .map(|(c, &f)| (colors[c].clone(), f))
            .collect();
        Ok(Assignment {
            pairs,
            cost,
            exhaustive,
        })
    }
}

/// Objective value of pairing `colors[i]` with `frequencies[i]`.
pub fn assignment_cost<P, M>(colors: &[P], frequencies: &[f32], metric: &M) -> f64
where
    M: Metric<P> + ?Sized,
{
    let mut cost = 0.0f64;
    for (i, (ci, &fi)) in colors.iter().zip(frequencies).enumerate() {
        for (j, (cj, &fj)) in colors.iter().zip(frequencies).enumerate() {
            if i != j {
                cost += metric.distance(ci, cj) as f64 / (fi as f64 * fj as f64);
            }
        }
    }
    cost
}

struct Search<'a> {
    n: usize,
    dists: &'a [f32],
    frequencies: &'a [f32],
    node_limit: Option<usize>,
    nodes: usize,
    used: Vec<bool>,
    /// Color index fixed for each filled slot.
    order: Vec<usize>,
    best_order: Vec<usize>,
    best: f64,
    stopped: bool,
}

impl Search<'_> {
    /// Cost added by placing color `c` in the next free slot.
    fn delta(&self, c: usize) -> f64 {
        let slot = self.order.len();
        let f_slot = self.frequencies[slot] as f64;
        self.order
            .iter()
            .enumerate()
            .map(|(l, &cl)| {
                2.0 * self.dists[cl * self.n + c] as f64 / (self.frequencies[l] as f64 * f_slot)
            })
            .sum()
    }

    fn descend(&mut self, value: f64) {
        if self.order.len() == self.n {
            if value < self.best {
                trace!(cost = value, order = ?self.order, "new best assignment");
                self.best = value;
                self.best_order.clone_from(&self.order);
            }
            return;
        }
        // Every term is non-negative, so a partial value bounds its subtree.
        if value >= self.best {
            return;
        }

        for c in 0..self.n {
            if self.used[c] {
                continue;
            }
            if let Some(limit) = self.node_limit {
                if self.best.is_finite() && self.nodes >= limit {
                    self.stopped = true;
                    return;
                }
            }
            self.nodes += 1;

            let child = value + self.delta(c);
            self.used[c] = true;
            self.order.push(c);
            self.descend(child);
            self.order.pop();
            self.used[c] = false;

            if self.stopped {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::metric::HueDistance;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const ORANGE: Rgb = Rgb::new(255, 129, 0);
    const BLUE: Rgb = Rgb::new(0, 102, 204);
    const GREEN: Rgb = Rgb::new(0, 153, 0);

    fn abs(a: &f32, b: &f32) -> f32 {
        (a - b).abs()
    }

    #[test]
    fn test_one_value() {
        let colors = [Rgb::new(20, 40, 50)];
        let result = Qap::new().assign(&colors, &[0.3], &HueDistance).unwrap();
        assert_eq!(result.pairs, vec![(colors[0], 0.3)]);
        assert_eq!(result.cost, 0.0);
        assert!(result.exhaustive);
    }

    #[test]
    fn test_two_values_keep_first_found() {
        let colors = [Rgb::new(15, 17, 20), Rgb::new(20, 40, 50)];
        let freq = [0.3, 0.7];
        let result = Qap::new().assign(&colors, &freq, &HueDistance).unwrap();
        assert_eq!(result.pairs, vec![(colors[0], 0.3), (colors[1], 0.7)]);
    }

    #[test]
    fn test_high_frequency_gets_separated_hue() {
        let colors = [RED, ORANGE, BLUE];
        let freq = [0.15, 0.7, 0.15];
        let result = Qap::new().assign(&colors, &freq, &HueDistance).unwrap();
        assert!(result.pairs.contains(&(BLUE, 0.7)), "{:?}", result.pairs);
    }

    #[test]
    fn test_size_four() {
        let colors = [RED, ORANGE, BLUE, GREEN];
        let freq = [0.1, 0.4, 0.4, 0.1];
        let result = Qap::new().assign(&colors, &freq, &HueDistance).unwrap();
        assert!(result.pairs.contains(&(BLUE, 0.4)));
        assert!(result.pairs.contains(&(GREEN, 0.4)));
    }

    #[test]
    fn test_size_four_frequencies_mixed() {
        let colors = [RED, ORANGE, BLUE, GREEN];
        let freq = [0.4, 0.1, 0.4, 0.1];
        let result = Qap::new().assign(&colors, &freq, &HueDistance).unwrap();
        assert!(result.pairs.contains(&(BLUE, 0.4)));
        assert!(result.pairs.contains(&(GREEN, 0.4)));
    }

    #[test]
    fn test_size_four_colors_mixed() {
        let colors = [GREEN, ORANGE, BLUE, RED];
        let freq = [0.1, 0.4, 0.4, 0.1];
        let result = Qap::new().assign(&colors, &freq, &HueDistance).unwrap();
        assert!(result.pairs.contains(&(GREEN, 0.4)));
        assert!(result.pairs.contains(&(BLUE, 0.4)));
    }

    #[test]
    fn test_hand_computed_optimum() {
        // Slot 1 has the heavy frequency and should take the most isolated point.
        // [0, 25, 10] costs 2 * (25 / 2 + 10 / 1 + 15 / 2) = 60; the runner-up
        // with 0 on slot 1 costs 65.
        let points = [0.0f32, 10.0, 25.0];
        let freq = [1.0, 2.0, 1.0];
        let result = Qap::new().assign(&points, &freq, &abs).unwrap();
        assert!((result.cost - 60.0).abs() < 1e-9, "cost {}", result.cost);
        assert_eq!(result.color(1), Some(&25.0));
        assert_eq!(result.color(0), Some(&0.0));
    }

    #[test]
    fn test_cost_matches_objective() {
        let colors = [RED, ORANGE, BLUE, GREEN];
        let freq = [0.1, 0.4, 0.4, 0.1];
        let result = Qap::new().assign(&colors, &freq, &HueDistance).unwrap();
        let (placed, slots): (Vec<Rgb>, Vec<f32>) = result.pairs.iter().copied().unzip();
        let recomputed = assignment_cost(&placed, &slots, &HueDistance);
        assert!((result.cost - recomputed).abs() < 1e-6 * recomputed.max(1.0));
    }

    #[test]
    fn test_node_limit_returns_first_leaf() {
        let points = [0.0f32, 10.0, 20.0, 30.0];
        let freq = [1.0, 2.0, 3.0, 4.0];
        let result = Qap::new()
            .with_node_limit(0)
            .assign(&points, &freq, &abs)
            .unwrap();
        assert!(!result.exhaustive);
        assert_eq!(
            result.pairs,
            vec![(0.0, 1.0), (10.0, 2.0), (20.0, 3.0), (30.0, 4.0)]
        );

        let full = Qap::new().assign(&points, &freq, &abs).unwrap();
        assert!(full.exhaustive);
        assert!(full.cost <= result.cost);
    }

    #[test]
    fn test_empty_input() {
        let colors: [f32; 0] = [];
        let result = Qap::new().assign(&colors, &[], &abs).unwrap();
        assert!(result.pairs.is_empty());
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_cardinality_mismatch() {
        assert!(matches!(
            Qap::new().assign(&[1.0f32, 2.0], &[0.5], &abs),
            Err(Error::CardinalityMismatch {
                colors: 2,
                frequencies: 1
            })
        ));
    }

    #[test]
    fn test_invalid_frequencies() {
        for bad in [0.0f32, -0.5, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Qap::new().assign(&[1.0f32, 2.0], &[0.5, bad], &abs),
                Err(Error::InvalidParameter {
                    name: "frequencies",
                    ..
                })
            ));
        }
    }
}
