use super::*;
use super::gamma::ln_binomial_coef;
use nalgebra::DVector;
use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::fmt;
use tracing::debug;

/// Log-probability of x successes out of n trials with success probability theta.
/// The boundary cases are treated separately, since theta = 0 or theta = 1
/// would otherwise yield 0 * ln(0) = NaN.
fn binomial_log_prob(x : u64, n : u64, theta : f64) -> f64 {
    if x > n {
        return f64::NEG_INFINITY;
    }
    if theta == 0.0 {
        return if x == 0 { 0.0 } else { f64::NEG_INFINITY };
    }
    if theta == 1.0 {
        return if x == n { 0.0 } else { f64::NEG_INFINITY };
    }
    if x == 0 {
        (n as f64)*(1. - theta).ln()
    } else {
        if x == n {
            (x as f64) * theta.ln()
        } else {
            ln_binomial_coef(n, x) + (x as f64)*theta.ln() + ((n - x) as f64)*(1. - theta).ln()
        }
    }
}

/// Log-likelihood of the success probability p, given k successes were observed
/// out of n trials. This is the same expression as the Binomial log-probability, but
/// read as a function of p with the data held fixed.
pub fn log_likelihood(k : u64, n : u64, p : f64) -> f64 {
    binomial_log_prob(k, n, p)
}

/// Likelihood L(p) = C(n, k) p^k (1 - p)^(n - k). Note this is not a density over p:
/// it integrates to 1 / (n + 1) over [0, 1].
pub fn likelihood(k : u64, n : u64, p : f64) -> f64 {
    log_likelihood(k, n, p).exp()
}

/// The Binomial distribution counts the number of successes in n independent
/// trials that succeed with probability θ (0 <= θ <= 1). It is the likelihood
/// of the Beta-Binomial model: the Beta is its conjugate prior, so conditioning
/// a Binomial on a Beta and observing a success count yields a Beta posterior.
///
/// # Example
///
/// ```
/// use betabin::prob::*;
///
/// let bin = Binomial::new(10, 0.5).unwrap();
/// assert!((bin.prob(5) - 0.24609375).abs() < 1E-12);
///
/// // Maximum likelihood estimate
/// let mle = Binomial::mle(7, 10).unwrap();
///
/// // Bayesian conjugate estimate
/// let post = bin.condition(Beta::uniform().unwrap()).observe(7).unwrap();
/// assert!((post.mode().unwrap() - mle).abs() < 1E-12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BinomialParams", into = "BinomialParams")]
pub struct Binomial {

    n : u64,

    theta : f64,

    factor : UnivariateFactor<Beta>,

    sampler : rand_distr::Binomial

}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BinomialParams {
    pub n : u64,
    pub p : f64
}

impl TryFrom<BinomialParams> for Binomial {

    type Error = ProbError;

    fn try_from(params : BinomialParams) -> Result<Self> {
        Binomial::new(params.n, params.p)
    }

}

impl From<Binomial> for BinomialParams {

    fn from(bin : Binomial) -> Self {
        BinomialParams { n : bin.n, p : bin.theta }
    }

}

impl Binomial {

    pub fn new(n : u64, p : f64) -> Result<Self> {
        let theta = validate_probability(p)?;
        let sampler = rand_distr::Binomial::new(n, theta)
            .map_err(|e| ProbError::Sampler(format!("{:?}", e)) )?;
        Ok(Self { n, theta, factor : UnivariateFactor::Empty, sampler })
    }

    /// Maximum likelihood estimate of the success probability, k / n.
    pub fn mle(k : u64, n : u64) -> Result<f64> {
        if n == 0 {
            return Err(ProbError::NoTrials);
        }
        if k > n {
            return Err(ProbError::Successes { successes : k, trials : n });
        }
        Ok(k as f64 / n as f64)
    }

    pub fn trials(&self) -> u64 {
        self.n
    }

    pub fn probability(&self) -> f64 {
        self.theta
    }

    /// Probability mass function evaluated at every outcome 0..=n. Entry k
    /// holds P(X = k); entries sum to one.
    pub fn pmf(&self) -> Result<DVector<f64>> {
        let len = support_len(self.n)?;
        Ok(DVector::from_iterator(len, (0..=self.n).map(|k| self.prob(k) )))
    }

    /// Consumes the observed number of successes (out of the n trials this
    /// distribution was built with) and returns the posterior distribution over the
    /// success probability. Requires a conjugate Beta factor.
    pub fn observe(self, k : u64) -> Result<Beta> {
        if k > self.n {
            return Err(ProbError::Successes { successes : k, trials : self.n });
        }
        let n = self.n;
        let prior = self.take_factor().ok_or(ProbError::MissingFactor)?;
        let post = prior.update(k, n)?;
        debug!("Observed {} successes out of {} trials: {} -> {}", k, n, prior, post);
        Ok(post)
    }

}

impl Distribution for Binomial {

    type Support = u64;

    fn mean(&self) -> f64 {
        self.n as f64 * self.theta
    }

    fn var(&self) -> f64 {
        self.n as f64 * self.theta * (1. - self.theta)
    }

    fn mode(&self) -> Option<u64> {
        let m = ((self.n as f64 + 1.) * self.theta).floor() as u64;
        Some(m.min(self.n))
    }

    fn log_prob(&self, k : u64) -> f64 {
        binomial_log_prob(k, self.n, self.theta)
    }

    fn cdf(&self, k : u64) -> f64 {
        let c : f64 = (0..=k.min(self.n)).map(|i| self.prob(i) ).sum();
        c.min(1.0)
    }

    fn sample<R>(&self, rng : &mut R) -> u64
        where R : Rng + ?Sized
    {
        use rand_distr::Distribution;
        self.sampler.sample(rng)
    }

}

impl Conditional<Beta> for Binomial {

    fn condition(mut self, b : Beta) -> Self {
        self.factor = UnivariateFactor::Conjugate(b);
        self
    }

    fn view_factor(&self) -> Option<&Beta> {
        match &self.factor {
            UnivariateFactor::Conjugate(b) => Some(b),
            UnivariateFactor::Empty => None
        }
    }

    fn take_factor(self) -> Option<Beta> {
        match self.factor {
            UnivariateFactor::Conjugate(b) => Some(b),
            UnivariateFactor::Empty => None
        }
    }

    fn factor_mut(&mut self) -> Option<&mut Beta> {
        match &mut self.factor {
            UnivariateFactor::Conjugate(b) => Some(b),
            UnivariateFactor::Empty => None
        }
    }

}

impl fmt::Display for Binomial {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bin({}, {})", self.n, self.theta)
    }

}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS : f64 = 1E-10;

    #[test]
    fn fair_coin_pmf() {
        let bin = Binomial::new(4, 0.5).unwrap();
        let expected = [1., 4., 6., 4., 1.];
        for (k, e) in expected.iter().enumerate() {
            assert!((bin.prob(k as u64) - e / 16.).abs() < EPS);
        }
        assert!((bin.pmf().unwrap().sum() - 1.).abs() < EPS);
        assert_eq!(bin.prob(5), 0.0);
    }

    #[test]
    fn degenerate_probabilities() {
        let never = Binomial::new(5, 0.0).unwrap();
        assert_eq!(never.prob(0), 1.0);
        assert_eq!(never.prob(1), 0.0);
        let always = Binomial::new(5, 1.0).unwrap();
        assert_eq!(always.prob(5), 1.0);
        assert_eq!(always.prob(4), 0.0);
        assert_eq!(always.mode(), Some(5));
        assert!(Binomial::new(5, -0.1).is_err());
    }

    #[test]
    fn moments_and_mode() {
        let bin = Binomial::new(20, 0.3).unwrap();
        assert!((bin.mean() - 6.).abs() < EPS);
        assert!((bin.var() - 4.2).abs() < EPS);
        assert_eq!(bin.mode(), Some(6));
        assert!((bin.cdf(20) - 1.).abs() < 1E-9);
        assert!(bin.cdf(3) < bin.cdf(6));
    }

    #[test]
    fn mle_is_success_ratio() {
        assert!((Binomial::mle(3, 12).unwrap() - 0.25).abs() < EPS);
        assert_eq!(Binomial::mle(0, 0), Err(ProbError::NoTrials));
        assert!(Binomial::mle(4, 3).is_err());
    }

    #[test]
    fn likelihood_peaks_at_mle() {
        let (k, n) = (7, 10);
        let at_mle = likelihood(k, n, 0.7);
        for p in (1..100).map(|i| i as f64 * 0.01) {
            assert!(likelihood(k, n, p) <= at_mle + EPS);
        }
    }

    #[test]
    fn observe_requires_prior() {
        let bin = Binomial::new(10, 0.5).unwrap();
        assert_eq!(bin.clone().observe(3).unwrap_err(), ProbError::MissingFactor);
        let post = bin.condition(Beta::new(2., 2.).unwrap()).observe(3).unwrap();
        assert!((post.alpha() - 5.).abs() < EPS);
        assert!((post.beta() - 9.).abs() < EPS);
    }

    #[test]
    fn prior_can_be_replaced_before_observing() {
        let mut bin = Binomial::new(10, 0.5).unwrap();
        assert!(bin.view_factor().is_none());
        assert!(bin.factor_mut().is_none());
        bin = bin.condition(Beta::new(2., 2.).unwrap());
        assert_eq!(format!("{}", bin.view_factor().unwrap()), "Beta(2, 2)");
        if let Some(prior) = bin.factor_mut() {
            *prior = Beta::new(1., 3.).unwrap();
        }
        assert!((bin.view_factor().unwrap().alpha() - 1.).abs() < EPS);
        let post = bin.observe(4).unwrap();
        assert!((post.alpha() - 5.).abs() < EPS);
        assert!((post.beta() - 9.).abs() < EPS);
    }

    #[test]
    fn huge_trial_counts_do_not_overflow() {
        let bin = Binomial::new(u64::MAX, 0.5).unwrap();
        assert_eq!(bin.mode(), Some(1 << 63));
        assert_eq!(bin.pmf().unwrap_err(), ProbError::Support(u64::MAX));
    }

    #[test]
    fn samples_within_support() {
        let mut rng = StdRng::seed_from_u64(42);
        let bin = Binomial::new(30, 0.4).unwrap();
        let s = bin.sample_n(2000, &mut rng);
        assert!(s.iter().all(|k| *k <= 30));
        let mean = s.iter().sum::<u64>() as f64 / s.len() as f64;
        assert!((mean - 12.).abs() < 0.5);
    }

    #[test]
    fn serde_validates_parameters() {
        let bin : Binomial = serde_json::from_str(r#"{ "n" : 8, "p" : 0.25 }"#).unwrap();
        assert_eq!(bin.trials(), 8);
        assert!(serde_json::from_str::<Binomial>(r#"{ "n" : 8, "p" : 2.0 }"#).is_err());
        let out = serde_json::to_value(&bin).unwrap();
        assert_eq!(out["p"], 0.25);
    }

}
