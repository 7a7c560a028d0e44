use crate::error::Result;
use crate::metric::Metric;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model and return one cluster label per input point.
    fn fit_predict<P, M>(&self, points: &[P], metric: &M) -> Result<Vec<usize>>
    where
        M: Metric<P> + ?Sized;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
