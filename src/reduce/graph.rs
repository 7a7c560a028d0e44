use crate::metric::Metric;
use crate::util::UnionFind;

/// Pairwise relation between points under a distance threshold.
///
/// Two distinct points are *distinguishable* when their distance is strictly
/// greater than the threshold, and *too close* otherwise. Connected components
/// are taken over the too-close relation: points in different components are
/// always distinguishable from each other, so maximum cliques can be searched
/// per component and concatenated without losing optimality.
#[derive(Debug, Clone)]
pub struct ClosenessGraph {
    n: usize,
    /// Row-major `n * n` distinguishability matrix (diagonal is false).
    distinguishable: Vec<bool>,
}

impl ClosenessGraph {
    /// Evaluate the metric on every pair of points.
    ///
    /// The comparison is strict: a pair at exactly `threshold` is too close.
    /// With integer points and threshold 3, gaps of 3 therefore join
    /// components; `[0, 3, 6]` is one component, while at 2.5 it is three.
    pub fn build<P, M>(points: &[P], threshold: f32, metric: &M) -> Self
    where
        M: Metric<P> + ?Sized,
    {
        let n = points.len();
        let mut distinguishable = vec![false; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                if metric.distance(&points[i], &points[j]) > threshold {
                    distinguishable[i * n + j] = true;
                    distinguishable[j * n + i] = true;
                }
            }
        }
        Self { n, distinguishable }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// True for a graph over no points.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Whether `i` and `j` can coexist in a reduced palette.
    #[inline]
    pub fn is_distinguishable(&self, i: usize, j: usize) -> bool {
        self.distinguishable[i * self.n + j]
    }

    /// Whether `i` and `j` are distinct nodes that compete for exclusion.
    #[inline]
    pub fn is_too_close(&self, i: usize, j: usize) -> bool {
        i != j && !self.is_distinguishable(i, j)
    }

    /// Connected components of the too-close relation.
    ///
    /// Components are ordered by their smallest index; members are ascending.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut uf = UnionFind::new(self.n);
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if self.is_too_close(i, j) {
                    uf.union(i, j);
                }
            }
        }
        uf.groups()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs(a: &i32, b: &i32) -> f32 {
        (a - b).abs() as f32
    }

    #[test]
    fn test_components_three_groups() {
        let values = [0, 1, 2, 3, 6, 7, 8, 11, 12, 13, 14, 16];
        let graph = ClosenessGraph::build(&values, 2.5, &abs);
        let groups: Vec<Vec<i32>> = graph
            .components()
            .into_iter()
            .map(|c| c.into_iter().map(|i| values[i]).collect())
            .collect();
        assert_eq!(
            groups,
            vec![vec![0, 1, 2, 3], vec![6, 7, 8], vec![11, 12, 13, 14, 16]]
        );
    }

    #[test]
    fn test_gap_equal_to_threshold_is_too_close() {
        let values = [0, 3];
        let graph = ClosenessGraph::build(&values, 3.0, &abs);
        assert!(graph.is_too_close(0, 1));
        assert_eq!(graph.components(), vec![vec![0, 1]]);

        let spaced = [0, 3, 6];
        let at = ClosenessGraph::build(&spaced, 3.0, &abs);
        assert_eq!(at.components(), vec![vec![0, 1, 2]]);
        let below = ClosenessGraph::build(&spaced, 2.5, &abs);
        assert_eq!(below.components(), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_chain_forms_one_component() {
        // n0 - n1 - n3 and n0 - n2 - n4 - n5 are chains of close points; n6 - n7 apart.
        let values = [0, 2, 10, 4, 12, 14, 100, 102];
        let graph = ClosenessGraph::build(&values, 2.0, &abs);
        let comps = graph.components();
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0], vec![0, 1, 3]);
        assert_eq!(comps[1], vec![2, 4, 5]);
        assert_eq!(comps[2], vec![6, 7]);
    }

    #[test]
    fn test_isolated_points() {
        let values = [0, 10, 20];
        let graph = ClosenessGraph::build(&values, 1.0, &abs);
        assert_eq!(graph.components(), vec![vec![0], vec![1], vec![2]]);
        assert!(graph.is_distinguishable(0, 2));
        assert!(!graph.is_too_close(1, 1));
    }

    #[test]
    fn test_empty_graph() {
        let values: [i32; 0] = [];
        let graph = ClosenessGraph::build(&values, 1.0, &abs);
        assert!(graph.is_empty());
        assert!(graph.components().is_empty());
    }
}
