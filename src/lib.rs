//! The Beta-Binomial conjugate model.
//!
//! A success probability p is given a Beta(a, b) prior; k successes are observed out
//! of n Binomial(n, p) trials; the posterior is Beta(a + k, b + n - k). This crate
//! implements the distributions involved, the conjugate update, the maximum likelihood
//! and maximum a posteriori estimates, credible intervals, the posterior predictive
//! distribution, and tabulated curves of all of them.
//!
//! ```
//! use betabin::prob::*;
//! use betabin::fit::{self, Trials};
//!
//! let data = Trials::new(7, 10).unwrap();
//! let prior = Beta::new(2., 2.).unwrap();
//! let post = fit::posterior(&prior, &data).unwrap();
//! assert_eq!((post.alpha(), post.beta()), (9., 5.));
//! assert!((fit::mle(&data).unwrap() - 0.7).abs() < 1E-12);
//! ```

/// Binomial likelihood, Beta prior/posterior and Beta-Binomial posterior predictive
/// distributions, plus the Gamma-function family of normalization constants.
pub mod prob;

/// Credible intervals (equal-tailed and highest-density).
pub mod approx;

/// Point estimates (MLE and MAP), conjugate estimators and posterior summaries.
pub mod fit;

/// Tabulation of mass functions, densities and likelihoods for plotting.
pub mod plot;

/// JSON model files.
pub mod model;
