//! Distribution construction from CLI arguments.
//!
//! The CLI takes a distribution name followed by positional parameters;
//! omitted parameters fall back to the distribution's standard form.

use rand_distr::{Exp, LogNormal, Normal, Uniform};

use randgen_core::sampler::{DistributionSampler, Sampler};

use crate::{CliError, Result};

/// Builds a sampler for the named distribution.
///
/// Supported: `uniform` (min, max), `normal` (mean, stddev),
/// `exponential` (rate), `lognormal` (mu, sigma).
pub fn build_sampler(name: &str, params: &[f64]) -> Result<Box<dyn Sampler>> {
    match name {
        "uniform" => {
            let min = param(params, 0, 0.0);
            let max = param(params, 1, 1.0);
            if min >= max {
                return Err(CliError::InvalidArgument(format!(
                    "uniform: min ({}) must be less than max ({})",
                    min, max
                )));
            }
            Ok(Box::new(DistributionSampler::new(Uniform::new(min, max))))
        }
        "normal" => {
            let mean = param(params, 0, 0.0);
            let stddev = param(params, 1, 1.0);
            let dist = Normal::new(mean, stddev)
                .map_err(|err| CliError::InvalidArgument(format!("normal: {}", err)))?;
            Ok(Box::new(DistributionSampler::new(dist)))
        }
        "exponential" => {
            let rate = param(params, 0, 1.0);
            let dist = Exp::new(rate)
                .map_err(|err| CliError::InvalidArgument(format!("exponential: {}", err)))?;
            Ok(Box::new(DistributionSampler::new(dist)))
        }
        "lognormal" => {
            let mu = param(params, 0, 0.0);
            let sigma = param(params, 1, 1.0);
            let dist = LogNormal::new(mu, sigma)
                .map_err(|err| CliError::InvalidArgument(format!("lognormal: {}", err)))?;
            Ok(Box::new(DistributionSampler::new(dist)))
        }
        other => Err(CliError::InvalidArgument(format!(
            "Unknown distribution: {}. Supported: uniform, normal, exponential, lognormal",
            other
        ))),
    }
}

fn param(params: &[f64], index: usize, default: f64) -> f64 {
    params.get(index).copied().unwrap_or(default)
}
