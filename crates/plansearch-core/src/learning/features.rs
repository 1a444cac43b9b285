/// Maps a `(state, action)` pair to a fixed-length feature vector.
pub trait FeatureExtractor<S, A> {
    /// Length of every vector returned by [`FeatureExtractor::features`].
    fn dimension(&self) -> usize;

    /// Must return exactly [`FeatureExtractor::dimension`] values. The linear
    /// agent refuses to learn from a vector of any other length.
    fn features(&self, state: &S, action: &A) -> Vec<f64>;
}

/// A single constant feature. Learns one value shared by every pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiasExtractor;

impl<S, A> FeatureExtractor<S, A> for BiasExtractor {
    fn dimension(&self) -> usize {
        1
    }

    fn features(&self, _state: &S, _action: &A) -> Vec<f64> {
        vec![1.0]
    }
}

/// Feature extractor backed by a closure.
#[derive(Debug, Clone)]
pub struct FnExtractor<F> {
    dimension: usize,
    extract: F,
}

impl<F> FnExtractor<F> {
    pub fn new(dimension: usize, extract: F) -> Self {
        FnExtractor { dimension, extract }
    }
}

impl<S, A, F> FeatureExtractor<S, A> for FnExtractor<F>
where
    F: Fn(&S, &A) -> Vec<f64>,
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn features(&self, state: &S, action: &A) -> Vec<f64> {
        (self.extract)(state, action)
    }
}
