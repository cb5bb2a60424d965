use crate::prob::*;
use tracing::info;

mod trials;

pub use trials::*;

/// Point and interval summaries of a fitted Beta-Binomial model.
mod summary;

pub use summary::*;

/// Trait shared by inference algorithms, parametrized by the resulting posterior distribution.
/// Conjugate inference is implemented as Estimator<Beta>: the posterior is available in closed
/// form after every call to fit(.).
pub trait Estimator<D>
    where
        D : Distribution
{

    /// Runs the inference algorithm for the informed data, returning
    /// a reference to the updated posterior.
    fn fit<'a>(&'a mut self, data : &Trials) -> Result<&'a D>;

    /// If fit(.) has been called successfully at least once, returns the current state
    /// of the posterior distribution, whithout changing the algorithm state.
    fn posterior<'a>(&'a self) -> Option<&'a D>;

}

/// Maximum likelihood estimate of the success probability (k / n).
pub fn mle(data : &Trials) -> Result<f64> {
    Binomial::mle(data.successes(), data.trials())
}

/// Conjugate update of the prior: Beta(a, b) -> Beta(k + a, n - k + b).
pub fn posterior(prior : &Beta, data : &Trials) -> Result<Beta> {
    prior.update(data.successes(), data.trials())
}

/// Maximum a posteriori estimate: the mode of the posterior. Under a uniform prior,
/// this equals the maximum likelihood estimate. Returns None when the posterior
/// has no unique mode.
pub fn map(prior : &Beta, data : &Trials) -> Result<Option<f64>> {
    Ok(posterior(prior, data)?.mode())
}

/// Sequential conjugate learning: every call to fit(.) pools the informed trials with
/// the ones seen so far, and the posterior is always the prior updated with all the data.
/// Because of conjugacy, this is the same as using the previous posterior as the prior for
/// the next batch.
#[derive(Debug, Clone)]
pub struct ConjugateEstimator {

    prior : Beta,

    data : Trials,

    post : Option<Beta>

}

impl ConjugateEstimator {

    pub fn new(prior : Beta) -> Self {
        Self { prior, data : Trials::default(), post : None }
    }

    pub fn prior(&self) -> &Beta {
        &self.prior
    }

    /// All trials observed so far.
    pub fn data(&self) -> &Trials {
        &self.data
    }

    /// Forgets the observed data, reverting to the prior.
    pub fn reset(&mut self) {
        self.data = Trials::default();
        self.post = None;
    }

}

impl Estimator<Beta> for ConjugateEstimator {

    fn fit<'a>(&'a mut self, data : &Trials) -> Result<&'a Beta> {
        let pooled = self.data + *data;
        let post = posterior(&self.prior, &pooled)?;
        info!("Observed {} (pooled {}); posterior is {}", data, pooled, post);
        self.data = pooled;
        Ok(&*self.post.insert(post))
    }

    fn posterior<'a>(&'a self) -> Option<&'a Beta> {
        self.post.as_ref()
    }

}
