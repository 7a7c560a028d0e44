//! PAM: Partitioning Around Medoids.
//!
//! # The Algorithm (Kaufman & Rousseeuw, 1990)
//!
//! PAM partitions a set of points into `k` clusters, each represented by a
//! *medoid*: an actual member of the input rather than a computed centroid.
//! For palettes this matters, since the representative of a group of colors
//! should be a color that really occurs in the image.
//!
//! The objective is the sum of dissimilarities between every point and its
//! closest medoid. Only a [`Metric`] is needed, so the same code clusters on
//! hue, on lightness, or on perceptual Lab distance.
//!
//! ## Build
//!
//! 1. The first medoid is the point whose mean distance to all points is minimal.
//! 2. Each further medoid is the unselected candidate `i` maximizing
//!    `g_i = Σ_j max(D_j - d(i, j), 0)` over the other unselected points `j`,
//!    where `D_j` is the distance from `j` to its nearest medoid.
//!
//! ## Swap
//!
//! For every pair (medoid `i`, non-medoid `h`) compute the exact change `T_ih`
//! of the objective if they traded roles. Using `D_j` and `E_j` (distance to
//! the second-nearest medoid), each other non-medoid `j` contributes:
//!
//! ```text
//! K_jih = min(d(j, h) - D_j, 0)          if d(j, i) > D_j
//! K_jih = min(d(j, h), E_j) - D_j        if d(j, i) = D_j
//! ```
//!
//! `h` itself saves `D_h`, and `i` now costs its distance to the nearest
//! medoid left after the swap (possibly `h`):
//!
//! ```text
//! T_ih = Σ_{j ≠ h} K_jih - D_h + min(d(i, h), min_{s ≠ i} d(i, s))
//! ```
//!
//! The most negative `T_ih` is applied while it is negative. The objective is
//! recomputed after every swap and must strictly drop, so no medoid set is
//! visited twice and the loop terminates on its own; `max_swaps` only caps
//! the work. This is a local search, not a global optimum, which is fine for
//! palettes of a few hundred colors at most.
//!
//! ## Ties
//!
//! Every arg-min / arg-max keeps the first candidate in iteration order, so the
//! result is fully determined by the input order.
//!
//! ## Complexity
//!
//! - **Time**: O(n²) metric calls for the distance matrix, O(k·n²) per build
//!   step and O(k·n²) per swap iteration.
//! - **Space**: O(n²) for the distance matrix.

use tracing::{debug, trace};

use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::metric::Metric;
use crate::util;

/// PAM k-medoids clustering.
#[derive(Debug, Clone)]
pub struct Pam {
    /// Number of medoids.
    k: usize,
    /// Upper bound on swap-phase iterations.
    max_swaps: usize,
}

/// Index-level result of a PAM fit.
#[derive(Debug, Clone, PartialEq)]
pub struct PamFit {
    /// Medoid point indices, in order of first appearance of a member.
    pub medoids: Vec<usize>,
    /// For each input point, the index into `medoids` of its cluster.
    pub labels: Vec<usize>,
    /// Sum of distances from every point to its medoid.
    pub cost: f32,
}

/// A cluster of points represented by one of its members.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<P> {
    /// The representative point; also present in `members`.
    pub medoid: P,
    /// Every point assigned to this medoid, in input order.
    pub members: Vec<P>,
}

impl<P> Cluster<P> {
    /// Number of members, medoid included.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for clusters produced by [`Pam`].
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Pam {
    /// Create a PAM clusterer for `k` medoids.
    pub fn new(k: usize) -> Self {
        Self { k, max_swaps: 100 }
    }

    /// Set the maximum number of swaps performed.
    pub fn with_max_swaps(mut self, max_swaps: usize) -> Self {
        self.max_swaps = max_swaps;
        self
    }

    fn validate(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        Ok(())
    }

    /// Run build and swap, returning medoids and labels as indices.
    pub fn fit<P, M>(&self, points: &[P], metric: &M) -> Result<PamFit>
    where
        M: Metric<P> + ?Sized,
    {
        let n = points.len();
        self.validate(n)?;

        let dists = util::pairwise_distances(points, metric);
        let mut state = MedoidSet::new(n, &dists);
        state.build(self.k);
        let swaps = state.swap(self.max_swaps);

        let fit = state.assign();
        debug!(
            n,
            k = self.k,
            swaps,
            cost = fit.cost,
            "pam converged"
        );
        Ok(fit)
    }

    /// Cluster `points`, returning each medoid with its members.
    pub fn cluster<P, M>(&self, points: &[P], metric: &M) -> Result<Vec<Cluster<P>>>
    where
        P: Clone,
        M: Metric<P> + ?Sized,
    {
        let fit = self.fit(points, metric)?;
        let mut clusters: Vec<Cluster<P>> = fit
            .medoids
            .iter()
            .map(|&m| Cluster {
                medoid: points[m].clone(),
                members: Vec::new(),
            })
            .collect();
        for (point, &label) in points.iter().zip(&fit.labels) {
            clusters[label].members.push(point.clone());
        }
        Ok(clusters)
    }
}

impl Clustering for Pam {
    fn fit_predict<P, M>(&self, points: &[P], metric: &M) -> Result<Vec<usize>>
    where
        M: Metric<P> + ?Sized,
    {
        Ok(self.fit(points, metric)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Selected / unselected index lists over a precomputed distance matrix.
///
/// List order is significant: it is the tie-break order.
struct MedoidSet<'a> {
    n: usize,
    dists: &'a [f32],
    selected: Vec<usize>,
    unselected: Vec<usize>,
}

impl<'a> MedoidSet<'a> {
    fn new(n: usize, dists: &'a [f32]) -> Self {
        Self {
            n,
            dists,
            selected: Vec::new(),
            unselected: (0..n).collect(),
        }
    }

    #[inline]
    fn d(&self, a: usize, b: usize) -> f32 {
        self.dists[a * self.n + b]
    }

    /// `D_j`: distance from `j` to its nearest selected medoid.
    fn nearest(&self, j: usize) -> f32 {
        self.selected
            .iter()
            .map(|&s| self.d(j, s))
            .fold(f32::INFINITY, f32::min)
    }

    /// `E_j`: distance to the second-nearest medoid, infinite with a single medoid.
    fn second_nearest(&self, j: usize) -> f32 {
        let mut first = f32::INFINITY;
        let mut second = f32::INFINITY;
        for &s in &self.selected {
            let d = self.d(j, s);
            if d < first {
                second = first;
                first = d;
            } else if d < second {
                second = d;
            }
        }
        second
    }

    fn build(&mut self, k: usize) {
        let mut first = 0;
        let mut best_mean = f32::INFINITY;
        for i in 0..self.n {
            let mean = (0..self.n).map(|j| self.d(i, j)).sum::<f32>() / self.n as f32;
            if mean < best_mean {
                best_mean = mean;
                first = i;
            }
        }
        self.unselected.remove(first);
        self.selected.push(first);
        trace!(medoid = first, "build: initial medoid");

        for _ in 1..k {
            let nearest: Vec<f32> = self.unselected.iter().map(|&j| self.nearest(j)).collect();

            let mut best: Option<(usize, f32)> = None;
            for (pos, &i) in self.unselected.iter().enumerate() {
                let gain: f32 = self
                    .unselected
                    .iter()
                    .zip(&nearest)
                    .filter(|(&j, _)| j != i)
                    .map(|(&j, &d_j)| (d_j - self.d(i, j)).max(0.0))
                    .sum();
                if best.map_or(true, |(_, g)| gain > g) {
                    best = Some((pos, gain));
                }
            }

            let Some((pos, gain)) = best else {
                break;
            };
            let medoid = self.unselected.remove(pos);
            self.selected.push(medoid);
            trace!(medoid, gain, "build: selected medoid");
        }
    }

    /// Sum over all points of the distance to the nearest medoid.
    fn total_cost(&self) -> f64 {
        (0..self.n).map(|j| self.nearest(j) as f64).sum()
    }

    /// `T_ih`: exact change of the objective if medoid `i` and non-medoid `h`
    /// traded roles, given `D_j` and `E_j` for every unselected point.
    fn swap_delta(&self, i: usize, h: usize, nearest: &[f32], second: &[f32]) -> f64 {
        let mut t = 0.0f64;
        for (ji, &j) in self.unselected.iter().enumerate() {
            let d_j = nearest[ji];
            if j == h {
                t -= d_j as f64;
                continue;
            }
            let d_jh = self.d(j, h);
            let k_jih = if self.d(j, i) > d_j {
                (d_jh - d_j).min(0.0)
            } else {
                d_jh.min(second[ji]) - d_j
            };
            t += k_jih as f64;
        }

        // `i` becomes an ordinary point served by the closest remaining medoid.
        let rehomed = self
            .selected
            .iter()
            .filter(|&&s| s != i)
            .map(|&s| self.d(i, s))
            .fold(self.d(i, h), f32::min);
        t + rehomed as f64
    }

    /// Steepest-descent swaps. A swap is kept only if the recomputed objective
    /// strictly drops, so the loop cannot revisit a medoid set.
    ///
    /// Returns the number of swaps performed.
    fn swap(&mut self, max_swaps: usize) -> usize {
        let mut swaps = 0;
        let mut cost = self.total_cost();
        while !self.unselected.is_empty() && swaps < max_swaps {
            let nearest: Vec<f32> = self.unselected.iter().map(|&j| self.nearest(j)).collect();
            let second: Vec<f32> = self
                .unselected
                .iter()
                .map(|&j| self.second_nearest(j))
                .collect();

            let mut best: Option<(usize, usize, f64)> = None;
            for (si, &i) in self.selected.iter().enumerate() {
                for (hi, &h) in self.unselected.iter().enumerate() {
                    let t = self.swap_delta(i, h, &nearest, &second);
                    if best.map_or(true, |(_, _, bt)| t < bt) {
                        best = Some((si, hi, t));
                    }
                }
            }

            let Some((si, hi, t)) = best.filter(|&(_, _, t)| t < 0.0) else {
                break;
            };
            let out = self.selected.remove(si);
            let incoming = self.unselected.remove(hi);
            self.unselected.push(out);
            self.selected.push(incoming);

            let swapped = self.total_cost();
            if swapped >= cost {
                // Rounding made a non-improving swap look negative; undo and stop.
                self.selected.pop();
                self.unselected.pop();
                self.selected.insert(si, out);
                self.unselected.insert(hi, incoming);
                break;
            }
            cost = swapped;
            swaps += 1;
            trace!(out, incoming, delta = t, cost, "swap: exchanged medoid");
        }
        swaps
    }

    fn assign(&self) -> PamFit {
        let mut slot_of = vec![usize::MAX; self.selected.len()];
        let mut medoids = Vec::with_capacity(self.selected.len());
        let mut labels = Vec::with_capacity(self.n);
        let mut cost = 0.0f64;

        for p in 0..self.n {
            let slot = match self.selected.iter().position(|&s| s == p) {
                Some(own) => own,
                None => {
                    let mut best = 0;
                    let mut best_d = f32::INFINITY;
                    for (slot, &s) in self.selected.iter().enumerate() {
                        let d = self.d(p, s);
                        if d < best_d {
                            best_d = d;
                            best = slot;
                        }
                    }
                    best
                }
            };
            if slot_of[slot] == usize::MAX {
                slot_of[slot] = medoids.len();
                medoids.push(self.selected[slot]);
            }
            cost += self.d(p, self.selected[slot]) as f64;
            labels.push(slot_of[slot]);
        }

        PamFit {
            medoids,
            labels,
            cost: cost as f32,
        }
    }
}
