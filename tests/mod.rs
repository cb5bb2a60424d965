use betabin::prob::*;
use betabin::prob::gamma::*;
use betabin::fit::{self, ConjugateEstimator, Estimator, Summary, Trials};
use betabin::approx::Interval;
use betabin::model::Model;
use betabin::plot;

const EPS : f64 = 1E-7;

// Reference values below were computed with R (dbinom, pbinom, dbeta, pbeta, qbeta).

#[test]
fn binomial() {
    let b = Binomial::new(10, 0.5).unwrap();
    assert!((b.prob(3) - 0.1171875).abs() < EPS);
    let b = Binomial::new(5, 0.2).unwrap();
    assert!((b.prob(0) - 0.32768).abs() < EPS);
    let b = Binomial::new(5, 0.5).unwrap();
    assert!((b.cdf(2) - 0.5).abs() < EPS);
}

#[test]
fn beta() {
    let b = Beta::new(2., 5.).unwrap();
    assert!((b.prob(0.3) - 2.1609).abs() < EPS);
    assert!((Beta::new(2., 2.).unwrap().cdf(0.5) - 0.5).abs() < EPS);
    assert!((Beta::new(2., 1.).unwrap().cdf(0.3) - 0.09).abs() < EPS);
    assert!((Beta::new(1., 3.).unwrap().quantile(0.5).unwrap() - 0.2062994740159002).abs() < EPS);
}

#[test]
fn beta_binomial() {
    let bb = BetaBinomial::new(3, 2., 2.).unwrap();
    let expected = [0.2, 0.3, 0.3, 0.2];
    for (k, p) in expected.iter().enumerate() {
        assert!((bb.prob(k as u64) - p).abs() < EPS);
    }
}

#[test]
fn gamma_function() {
    assert!((gamma(5.) - 24.).abs() < EPS);
    assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < EPS);
    assert!((beta_fn(2., 5.) - 1. / 30.).abs() < EPS);
    assert_eq!(binomial_coef(10, 3), 120.);
}

#[test]
fn conjugate_update() {
    let data = Trials::new(7, 10).unwrap();
    let prior = Beta::new(2., 2.).unwrap();

    let post = Binomial::new(10, 0.5).unwrap()
        .condition(prior.clone())
        .observe(7)
        .unwrap();
    assert!((post.alpha() - 9.).abs() < EPS);
    assert!((post.beta() - 5.).abs() < EPS);
    assert!((fit::map(&prior, &data).unwrap().unwrap() - 8. / 12.).abs() < EPS);
    assert!((post.mean() - 9. / 14.).abs() < EPS);

    // Posterior mean is a weighted average of the prior mean and the MLE.
    let w = prior.pseudo_counts() / (prior.pseudo_counts() + 10.);
    let avg = w * prior.mean() + (1. - w) * fit::mle(&data).unwrap();
    assert!((avg - post.mean()).abs() < EPS);
}

#[test]
fn sequential_equals_batch() {
    let flips = [true, false, true, true, false, true, true, true, false, true];
    let mut seq = ConjugateEstimator::new(Beta::uniform().unwrap());
    for flip in flips.iter() {
        seq.fit(&Trials::from_outcomes(&[*flip])).unwrap();
    }
    let batch = fit::posterior(&Beta::uniform().unwrap(), &Trials::from_outcomes(&flips)).unwrap();
    let post = seq.posterior().unwrap();
    assert!((post.alpha() - batch.alpha()).abs() < EPS);
    assert!((post.beta() - batch.beta()).abs() < EPS);
}

#[test]
fn posterior_concentrates_with_data() {
    let prior = Beta::uniform().unwrap();
    let small = fit::posterior(&prior, &Trials::new(3, 10).unwrap()).unwrap();
    let large = fit::posterior(&prior, &Trials::new(300, 1000).unwrap()).unwrap();
    assert!(large.sd() < small.sd());
    let ci = large.credible_interval(0.95).unwrap();
    assert!(ci.contains(&0.3));
    assert!(ci.width() < small.credible_interval(0.95).unwrap().width());
}

#[test]
fn uniform_interval() {
    let s = Summary::new(&Beta::uniform().unwrap(), Trials::default(), 0.9).unwrap();
    assert!((s.interval.low() - 0.05).abs() < EPS);
    assert!((s.interval.high() - 0.95).abs() < EPS);
}

#[test]
fn model_file() {
    let path = std::env::temp_dir().join(format!("betabin-model-{}.json", std::process::id()));
    let model = Model::new(Beta::new(1., 1.).unwrap(), Some(Trials::new(4, 5).unwrap()));
    model.save_to_path(&path).unwrap();
    let loaded = Model::load_from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let s = loaded.summary().unwrap();
    assert!((s.map.unwrap() - 0.8).abs() < EPS);
    assert!((s.mle.unwrap() - 0.8).abs() < EPS);
}

#[test]
fn plotted_posterior_matches_map() {
    let prior = Beta::new(3., 3.).unwrap();
    let data = Trials::new(6, 8).unwrap();
    let curves = plot::conjugate(&prior, &data, 1000).unwrap();
    let map = fit::map(&prior, &data).unwrap().unwrap();
    let top = curves[2].argmax().unwrap();
    assert_eq!(curves[2].label, "posterior");
    assert!((top.x - map).abs() <= 1E-3);
}
