use std::convert::TryFrom;
use std::fmt::{Debug, Display};
use thiserror::Error;
use rand::Rng;

/// Gamma, Beta and binomial-coefficient special functions.
pub mod gamma;

mod binomial;

pub use binomial::*;

mod beta;

pub use beta::*;

mod predictive;

pub use predictive::*;

/// Errors raised when distributions are built with parameters outside their
/// domain, or when observed data is inconsistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbError {

    #[error("Probability {0} outside the interval [0, 1]")]
    Probability(f64),

    #[error("Shape parameters ({alpha}, {beta}) should be finite and strictly positive")]
    Shape { alpha : f64, beta : f64 },

    #[error("Number of successes ({successes}) exceeds number of trials ({trials})")]
    Successes { successes : u64, trials : u64 },

    #[error("At least one trial is required")]
    NoTrials,

    #[error("Credible level {0} outside the open interval (0, 1)")]
    Level(f64),

    #[error("Grid resolution should be at least one interval")]
    Resolution,

    #[error("Outcomes 0..={0} do not fit in memory")]
    Support(u64),

    #[error("Likelihood has no conjugate prior factor")]
    MissingFactor,

    #[error("Could not build sampler: {0}")]
    Sampler(String)

}

pub type Result<T> = std::result::Result<T, ProbError>;

/// Trait shared by the univariate distributions of the Beta-Binomial model.
/// The random variable lives at Self::Support (success counts for the
/// Binomial and the posterior predictive; probabilities for the Beta).
/// Summaries (mean, variance and mode) are functions of the current
/// parameter values.
pub trait Distribution
    where Self : Debug + Display
{

    type Support : Copy;

    /// Returns the expected value of the distribution.
    fn mean(&self) -> f64;

    fn var(&self) -> f64;

    fn sd(&self) -> f64 {
        self.var().sqrt()
    }

    /// Returns the global maximum of the probability function, if it is unique.
    /// For bounded distributions (Beta), this value might just be the
    /// parameter domain inferior or superior limit.
    fn mode(&self) -> Option<Self::Support>;

    /// Log-probability (log-density for continuous distributions) of x.
    fn log_prob(&self, x : Self::Support) -> f64;

    fn prob(&self, x : Self::Support) -> f64 {
        self.log_prob(x).exp()
    }

    /// Probability of observing a value smaller than or equal to x.
    fn cdf(&self, x : Self::Support) -> f64;

    fn sample<R>(&self, rng : &mut R) -> Self::Support
        where R : Rng + ?Sized;

    fn sample_n<R>(&self, n : usize, rng : &mut R) -> Vec<Self::Support>
        where R : Rng + ?Sized
    {
        (0..n).map(|_| self.sample(rng) ).collect()
    }

}

/// Likelihoods are linked to their priors by holding an owned distribution
/// as a factor. Only conjugate pairs implement this trait, so that the
/// posterior of the factor after observing data stays in the same family
/// (Binomial(Beta) -> Beta).
pub trait Conditional<D>
    where
        Self : Distribution + Sized,
        D : Distribution
{

    /// Takes self by value and return a conditional distribution
    /// of self, with the informed factor as its parent.
    fn condition(self, d : D) -> Self;

    /// Returns a view to the factor.
    fn view_factor(&self) -> Option<&D>;

    /// Takes self by value and outputs its factor.
    fn take_factor(self) -> Option<D>;

    /// Returns a mutable reference to the parent factor.
    fn factor_mut(&mut self) -> Option<&mut D>;

}

/// The factor held by a likelihood node. Empty means the likelihood
/// stands alone (and only maximum likelihood estimation is possible).
#[derive(Debug, Clone)]
pub enum UnivariateFactor<D>
where D : Distribution
{

    Empty,

    Conjugate(D)

}

impl<D> Default for UnivariateFactor<D>
where D : Distribution
{

    fn default() -> Self {
        UnivariateFactor::Empty
    }

}

/// Number of outcomes 0..=n of a count distribution, as a vector length.
pub(crate) fn support_len(n : u64) -> Result<usize> {
    n.checked_add(1)
        .and_then(|len| usize::try_from(len).ok() )
        .ok_or(ProbError::Support(n))
}

pub(crate) fn validate_probability(p : f64) -> Result<f64> {
    if p.is_finite() && p >= 0.0 && p <= 1.0 {
        Ok(p)
    } else {
        Err(ProbError::Probability(p))
    }
}

pub(crate) fn validate_shape(alpha : f64, beta : f64) -> Result<(f64, f64)> {
    let valid = |s : f64| s.is_finite() && s > 0.0;
    if valid(alpha) && valid(beta) {
        Ok((alpha, beta))
    } else {
        Err(ProbError::Shape { alpha, beta })
    }
}

pub(crate) fn validate_level(level : f64) -> Result<f64> {
    if level.is_finite() && level > 0.0 && level < 1.0 {
        Ok(level)
    } else {
        Err(ProbError::Level(level))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn parameter_validation() {
        assert!(validate_probability(0.0).is_ok());
        assert!(validate_probability(1.0).is_ok());
        assert_eq!(validate_probability(1.5), Err(ProbError::Probability(1.5)));
        assert!(validate_probability(f64::NAN).is_err());
        assert!(validate_shape(0.5, 20.).is_ok());
        assert!(validate_shape(0.0, 1.).is_err());
        assert!(validate_shape(1., f64::INFINITY).is_err());
        assert!(validate_level(0.95).is_ok());
        assert!(validate_level(1.0).is_err());
    }

}
