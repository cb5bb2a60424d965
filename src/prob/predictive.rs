use super::*;
use super::gamma::{ln_beta_fn, ln_binomial_coef};
use nalgebra::DVector;
use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::fmt;

/// The Beta-Binomial distribution counts successes in n future trials when the success
/// probability is itself uncertain and distributed as Beta(a, b). Built from a posterior
/// Beta, it is the posterior predictive distribution of the Beta-Binomial model:
///
/// P(K = k) = C(n, k) B(k + a, n - k + b) / B(a, b)
///
/// It has the same mean as Binomial(n, a / (a + b)), but a larger variance, which shrinks
/// towards the Binomial variance as the pseudo-counts a + b grow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BetaBinomialParams", into = "BetaBinomialParams")]
pub struct BetaBinomial {

    n : u64,

    alpha : f64,

    beta : f64,

    // ln B(a, b), shared by all evaluations.
    ln_norm : f64

}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BetaBinomialParams {
    pub n : u64,
    pub alpha : f64,
    pub beta : f64
}

impl TryFrom<BetaBinomialParams> for BetaBinomial {

    type Error = ProbError;

    fn try_from(params : BetaBinomialParams) -> Result<Self> {
        BetaBinomial::new(params.n, params.alpha, params.beta)
    }

}

impl From<BetaBinomial> for BetaBinomialParams {

    fn from(bb : BetaBinomial) -> Self {
        BetaBinomialParams { n : bb.n, alpha : bb.alpha, beta : bb.beta }
    }

}

impl BetaBinomial {

    pub fn new(n : u64, alpha : f64, beta : f64) -> Result<Self> {
        let (alpha, beta) = validate_shape(alpha, beta)?;
        Ok(Self { n, alpha, beta, ln_norm : ln_beta_fn(alpha, beta) })
    }

    /// Builds the predictive distribution of n trials from a (validated) Beta.
    pub fn from_beta(n : u64, b : &Beta) -> Self {
        let (alpha, beta) = (b.alpha(), b.beta());
        Self { n, alpha, beta, ln_norm : ln_beta_fn(alpha, beta) }
    }

    pub fn trials(&self) -> u64 {
        self.n
    }

    /// The distribution over the success probability this predictive integrates over.
    pub fn mixing(&self) -> Result<Beta> {
        Beta::new(self.alpha, self.beta)
    }

    /// Probability mass function evaluated at every outcome 0..=n.
    pub fn pmf(&self) -> Result<DVector<f64>> {
        let len = support_len(self.n)?;
        Ok(DVector::from_iterator(len, (0..=self.n).map(|k| self.prob(k) )))
    }

}

impl Distribution for BetaBinomial {

    type Support = u64;

    fn mean(&self) -> f64 {
        self.n as f64 * self.alpha / (self.alpha + self.beta)
    }

    fn var(&self) -> f64 {
        let (n, a, b) = (self.n as f64, self.alpha, self.beta);
        n * a * b * (a + b + n) / ((a + b).powf(2.) * (a + b + 1.))
    }

    /// The most probable count. Ties (e.g. the flat predictive of Beta(1, 1))
    /// resolve to the smallest count.
    fn mode(&self) -> Option<u64> {
        let mut best = 0;
        let mut best_lp = f64::NEG_INFINITY;
        for k in 0..=self.n {
            let lp = self.log_prob(k);
            if lp > best_lp + 1E-12 {
                best_lp = lp;
                best = k;
            }
        }
        Some(best)
    }

    fn log_prob(&self, k : u64) -> f64 {
        if k > self.n {
            return f64::NEG_INFINITY;
        }
        let n = self.n;
        ln_binomial_coef(n, k) +
            ln_beta_fn(k as f64 + self.alpha, (n - k) as f64 + self.beta) -
            self.ln_norm
    }

    fn cdf(&self, k : u64) -> f64 {
        let c : f64 = (0..=k.min(self.n)).map(|i| self.prob(i) ).sum();
        c.min(1.0)
    }

    /// Inverse-CDF sampling over the (finite) support.
    fn sample<R>(&self, rng : &mut R) -> u64
        where R : Rng + ?Sized
    {
        let u : f64 = rng.gen();
        let mut cumul = 0.0;
        for k in 0..self.n {
            cumul += self.prob(k);
            if u < cumul {
                return k;
            }
        }
        self.n
    }

}

impl fmt::Display for BetaBinomial {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BetaBin({}, {}, {})", self.n, self.alpha, self.beta)
    }

}
