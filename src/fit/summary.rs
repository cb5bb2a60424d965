use crate::prob::*;
use crate::approx::{CredibleInterval, Interval};
use super::{Trials, mle, posterior};
use serde::{Serialize, Deserialize};
use std::fmt;

/// Everything a Beta-Binomial analysis reports after observing the data: the prior and
/// posterior distributions, the frequentist (MLE) and Bayesian (MAP, posterior mean) point
/// estimates, and two credible intervals at the same level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {

    pub prior : Beta,

    pub data : Trials,

    pub posterior : Beta,

    /// Undefined when no trials were observed.
    pub mle : Option<f64>,

    /// Undefined when the posterior has no unique mode.
    pub map : Option<f64>,

    pub mean : f64,

    pub sd : f64,

    /// Equal-tailed interval.
    pub interval : CredibleInterval,

    /// Highest-density interval.
    pub hdi : CredibleInterval

}

impl Summary {

    pub fn new(prior : &Beta, data : Trials, level : f64) -> Result<Self> {
        let post = posterior(prior, &data)?;
        let mle = match mle(&data) {
            Ok(m) => Some(m),
            Err(ProbError::NoTrials) => None,
            Err(e) => return Err(e)
        };
        Ok(Self {
            prior : prior.clone(),
            data,
            mle,
            map : post.mode(),
            mean : post.mean(),
            sd : post.sd(),
            interval : post.credible_interval(level)?,
            hdi : post.hdi(level)?,
            posterior : post
        })
    }

}

fn fmt_estimate(est : Option<f64>) -> String {
    est.map(|e| format!("{:.4}", e) ).unwrap_or_else(|| String::from("undefined") )
}

impl fmt::Display for Summary {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "prior       {}", self.prior)?;
        writeln!(f, "data        {} successes", self.data)?;
        writeln!(f, "posterior   {}", self.posterior)?;
        writeln!(f, "mle         {}", fmt_estimate(self.mle))?;
        writeln!(f, "map         {}", fmt_estimate(self.map))?;
        writeln!(f, "mean        {:.4}", self.mean)?;
        writeln!(f, "sd          {:.4}", self.sd)?;
        writeln!(f, "interval    {}", self.interval)?;
        write!(f, "hdi         [{:.4}, {:.4}]", self.hdi.low(), self.hdi.high())
    }

}
