use super::*;
use super::gamma::{ln_beta_fn, inc_beta, inv_inc_beta};
use crate::approx::{CredibleInterval, narrowest_interval};
use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::fmt;
use tracing::debug;

// Reference: https://github.com/kthohr/stats/blob/master/include/stats_incl/dens/dbeta.ipp
// The (a - 1) ln(x) term is taken as zero when a = 1 even at x = 0, since the
// density has a finite limit there.
fn beta_log_prob(x : f64, a : f64, b : f64) -> f64 {
    if !(0.0..=1.0).contains(&x) {
        return f64::NEG_INFINITY;
    }
    let lower = if a == 1. { 0.0 } else { (a - 1.0)*x.ln() };
    let upper = if b == 1. { 0.0 } else { (b - 1.0)*(1.0 - x).ln() };
    lower + upper - ln_beta_fn(a, b)
}

/// A beta distribution yields ratios over the interval [0, 1], and is the conjugate
/// prior of the Binomial success probability. The shape parameters a and b can
/// be read as pseudo-counts of successes and failures observed before the data:
/// Beta(1, 1) is uniform over [0, 1]; increasing a and b while keeping their ratio
/// concentrates the mass around a / (a + b). After k successes are observed out of n
/// trials, the posterior is Beta(a + k, b + n - k).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BetaParams", into = "BetaParams")]
pub struct Beta {

    alpha : f64,

    beta : f64,

    sampler : rand_distr::Beta<f64>

}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BetaParams {
    pub alpha : f64,
    pub beta : f64
}

impl TryFrom<BetaParams> for Beta {

    type Error = ProbError;

    fn try_from(params : BetaParams) -> Result<Self> {
        Beta::new(params.alpha, params.beta)
    }

}

impl From<Beta> for BetaParams {

    fn from(b : Beta) -> Self {
        BetaParams { alpha : b.alpha, beta : b.beta }
    }

}

impl Beta {

    pub fn new(alpha : f64, beta : f64) -> Result<Self> {
        let (alpha, beta) = validate_shape(alpha, beta)?;
        let sampler = rand_distr::Beta::new(alpha, beta)
            .map_err(|e| ProbError::Sampler(format!("{:?}", e)) )?;
        Ok(Self { alpha, beta, sampler })
    }

    /// Flat prior Beta(1, 1): every success probability is equally likely.
    pub fn uniform() -> Result<Self> {
        Self::new(1., 1.)
    }

    /// Jeffreys prior Beta(1/2, 1/2), invariant to reparametrization of the success probability.
    pub fn jeffreys() -> Result<Self> {
        Self::new(0.5, 0.5)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Effective sample size a + b carried by this distribution when used as a prior.
    pub fn pseudo_counts(&self) -> f64 {
        self.alpha + self.beta
    }

    /// Conjugate update after observing k successes out of n trials, yielding
    /// Beta(a + k, b + n - k). Updating twice with (k1, n1) and (k2, n2) equals a single
    /// update with (k1 + k2, n1 + n2).
    pub fn update(&self, k : u64, n : u64) -> Result<Beta> {
        if k > n {
            return Err(ProbError::Successes { successes : k, trials : n });
        }
        self.update_counts(k, n - k)
    }

    /// Conjugate update from success and failure counts.
    pub fn update_counts(&self, successes : u64, failures : u64) -> Result<Beta> {
        let post = Beta::new(self.alpha + successes as f64, self.beta + failures as f64)?;
        debug!("Updated {} with {} successes and {} failures: {}", self, successes, failures, post);
        Ok(post)
    }

    /// Value x such that P(X <= x) = q.
    pub fn quantile(&self, q : f64) -> Result<f64> {
        let q = validate_probability(q)?;
        Ok(inv_inc_beta(q, self.alpha, self.beta))
    }

    /// Probability mass above x, e.g. the posterior probability that the success probability
    /// exceeds a reference value.
    pub fn prob_greater(&self, x : f64) -> f64 {
        1.0 - self.cdf(x)
    }

    /// Equal-tailed credible interval, leaving (1 - level) / 2 of the mass at each tail.
    pub fn credible_interval(&self, level : f64) -> Result<CredibleInterval> {
        let level = validate_level(level)?;
        let tail = (1. - level) / 2.;
        let low = self.quantile(tail)?;
        let high = self.quantile(1. - tail)?;
        Ok(CredibleInterval::new(low, high, level))
    }

    /// Narrowest interval holding the informed mass. For unimodal shapes this is the
    /// highest-density interval; monotone densities yield an interval touching the
    /// corresponding boundary.
    pub fn hdi(&self, level : f64) -> Result<CredibleInterval> {
        let level = validate_level(level)?;
        let (a, b) = (self.alpha, self.beta);
        let (low, high) = narrowest_interval(|q| inv_inc_beta(q, a, b), level);
        Ok(CredibleInterval::new(low, high, level))
    }

    /// Distribution of the number of successes in n future trials, when the success
    /// probability is distributed as self.
    pub fn predictive(&self, n : u64) -> BetaBinomial {
        BetaBinomial::from_beta(n, self)
    }

}

impl Distribution for Beta {

    type Support = f64;

    fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    fn var(&self) -> f64 {
        let (a, b) = (self.alpha, self.beta);
        a*b / ((a + b).powf(2.) * (a + b + 1.))
    }

    /// The mode of a posterior Beta is the MAP estimate of the success probability.
    /// It lies in the interior of [0, 1] only when both a and b exceed one. When one
    /// of the shapes is at most one and the other exceeds it, the density is monotone and the
    /// mode is at the corresponding boundary. There is no unique mode for the flat Beta(1, 1)
    /// or for the U-shaped densities with both shapes below one.
    fn mode(&self) -> Option<f64> {
        let (a, b) = (self.alpha, self.beta);
        if a > 1. && b > 1. {
            return Some((a - 1.) / (a + b - 2.));
        }
        if a <= 1. && b <= 1. {
            return match (a < 1., b < 1.) {
                (true, false) => Some(0.0),
                (false, true) => Some(1.0),
                _ => None
            };
        }
        if a <= 1. {
            Some(0.0)
        } else {
            Some(1.0)
        }
    }

    fn log_prob(&self, x : f64) -> f64 {
        beta_log_prob(x, self.alpha, self.beta)
    }

    fn cdf(&self, x : f64) -> f64 {
        inc_beta(x, self.alpha, self.beta)
    }

    fn sample<R>(&self, rng : &mut R) -> f64
        where R : Rng + ?Sized
    {
        use rand_distr::Distribution;
        self.sampler.sample(rng)
    }

}

impl fmt::Display for Beta {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Beta({}, {})", self.alpha, self.beta)
    }

}
