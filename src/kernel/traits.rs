//! Kernel trait definition

/// Kernel weighting function
///
/// A kernel maps the unscaled distance `u = x - s` between a query point `x`
/// and an observation `s` to a non-negative weight. Any bandwidth scaling is
/// owned by the kernel itself, so the estimator only ever passes raw distances.
pub trait Kernel: Send + Sync {
    /// Compute the weight for distance `u`
    fn weight(&self, u: f64) -> f64;
}

/// Plain closures are kernels too
impl<F> Kernel for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn weight(&self, u: f64) -> f64 {
        self(u)
    }
}
