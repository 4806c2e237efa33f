//! The sampler seam between the uniform source and target distributions.
//!
//! A [`Sampler`] maps draws from a uniform source to values from the
//! target distribution. The mathematics live outside this workspace:
//! `rand_distr` distributions plug in through [`DistributionSampler`],
//! and fallible custom samplers through [`FnSampler`].

use rand::RngCore;
use rand_distr::Distribution;

use crate::error::SampleError;

/// Maps uniform draws to values from a target distribution.
pub trait Sampler: Send {
    /// Draws one value from the target distribution, consuming draws
    /// from `source` as needed.
    ///
    /// # Errors
    ///
    /// [`SampleError`] when the sampler cannot produce a value; this
    /// terminates production for the surrounding stream.
    fn draw(&mut self, source: &mut dyn RngCore) -> Result<f64, SampleError>;
}

impl Sampler for Box<dyn Sampler> {
    fn draw(&mut self, source: &mut dyn RngCore) -> Result<f64, SampleError> {
        (**self).draw(source)
    }
}

/// Adapter over a `rand_distr` distribution.
///
/// # Examples
///
/// ```rust
/// use randgen_core::rng::StreamRng;
/// use randgen_core::sampler::{DistributionSampler, Sampler};
/// use randgen_core::seed::Seed;
/// use rand_distr::Exp;
///
/// let mut rng = StreamRng::from_seed(&Seed::Scalar(1)).unwrap();
/// let mut sampler = DistributionSampler::new(Exp::new(2.0).unwrap());
/// let value = sampler.draw(&mut rng).unwrap();
/// assert!(value >= 0.0);
/// ```
pub struct DistributionSampler<D> {
    dist: D,
}

impl<D> DistributionSampler<D>
where
    D: Distribution<f64>,
{
    /// Wraps a distribution.
    pub fn new(dist: D) -> Self {
        DistributionSampler { dist }
    }
}

impl<D> Sampler for DistributionSampler<D>
where
    D: Distribution<f64> + Send,
{
    fn draw(&mut self, source: &mut dyn RngCore) -> Result<f64, SampleError> {
        let value = self.dist.sample(&mut *source);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SampleError::NonFinite(value))
        }
    }
}

/// Adapter for fallible sampler closures.
pub struct FnSampler<F>(F);

impl<F> FnSampler<F>
where
    F: FnMut(&mut dyn RngCore) -> Result<f64, SampleError> + Send,
{
    /// Wraps a sampler closure.
    pub fn new(f: F) -> Self {
        FnSampler(f)
    }
}

impl<F> Sampler for FnSampler<F>
where
    F: FnMut(&mut dyn RngCore) -> Result<f64, SampleError> + Send,
{
    fn draw(&mut self, source: &mut dyn RngCore) -> Result<f64, SampleError> {
        (self.0)(source)
    }
}
