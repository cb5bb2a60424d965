use crate::prob::*;
use crate::fit::Trials;
use nalgebra::DVector;
use serde::{Serialize, Deserialize};

/// Writers of tabulated series (CSV and JSON).
mod write;

pub use write::*;

/// Horizontal bar charts for terminals.
mod chart;

pub use chart::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x : f64,
    pub y : f64
}

/// A labelled curve, ready to be written out or rendered: either a probability
/// mass function (one point per count) or a density/likelihood evaluated over
/// a regular grid in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label : String,
    pub points : Vec<Point>
}

impl Series {

    pub fn new(label : &str, xs : &DVector<f64>, ys : &DVector<f64>) -> Self {
        let points = xs.iter().zip(ys.iter()).map(|(x, y)| Point { x : *x, y : *y }).collect();
        Self { label : label.to_string(), points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> DVector<f64> {
        DVector::from_iterator(self.len(), self.points.iter().map(|p| p.x ))
    }

    pub fn ys(&self) -> DVector<f64> {
        DVector::from_iterator(self.len(), self.points.iter().map(|p| p.y ))
    }

    /// Point of highest ordinate. The first one is returned on ties.
    pub fn argmax(&self) -> Option<Point> {
        let mut best : Option<Point> = None;
        for p in self.points.iter() {
            match best {
                Some(b) if b.y >= p.y => { },
                _ => best = Some(*p)
            }
        }
        best
    }

}

/// Regular grid of resolution + 1 points covering [0, 1].
pub fn grid(resolution : usize) -> Result<DVector<f64>> {
    if resolution == 0 {
        return Err(ProbError::Resolution);
    }
    Ok(DVector::from_iterator(resolution + 1, (0..=resolution).map(|i| i as f64 / resolution as f64 )))
}

// Densities diverge at the boundaries when a shape parameter is below one.
// Those points are clamped to the largest finite value of the curve.
fn clamp_infinite(ys : &mut DVector<f64>) {
    let max_finite = ys.iter().cloned().filter(|y| y.is_finite() ).fold(0.0, f64::max);
    ys.iter_mut().filter(|y| y.is_infinite() ).for_each(|y| *y = max_finite );
}

/// Probability mass function of Binomial(n, p), one point per count 0..=n.
pub fn binomial_pmf(n : u64, p : f64) -> Result<Series> {
    let bin = Binomial::new(n, p)?;
    let ys = bin.pmf()?;
    let xs = DVector::from_iterator(ys.len(), (0..=n).map(|k| k as f64 ));
    Ok(Series::new(&format!("{}", bin), &xs, &ys))
}

/// Density of a Beta distribution evaluated over a grid in [0, 1].
pub fn density(b : &Beta, label : &str, resolution : usize) -> Result<Series> {
    let xs = grid(resolution)?;
    let mut ys = xs.map(|x| b.prob(x) );
    clamp_infinite(&mut ys);
    Ok(Series::new(label, &xs, &ys))
}

/// Density of Beta(alpha, beta) evaluated over resolution + 1 points in [0, 1].
pub fn beta_pdf(alpha : f64, beta : f64, resolution : usize) -> Result<Series> {
    let b = Beta::new(alpha, beta)?;
    density(&b, &format!("{}", b), resolution)
}

/// Likelihood of the success probability given the observed trials, scaled so that
/// its maximum (attained at the MLE) equals one.
pub fn likelihood(data : &Trials, resolution : usize) -> Result<Series> {
    let xs = grid(resolution)?;
    let (k, n) = (data.successes(), data.trials());
    let lik = xs.map(|p| crate::prob::likelihood(k, n, p) );
    let max = lik.max();
    let ys = if max > 0.0 { lik / max } else { lik };
    Ok(Series::new("likelihood", &xs, &ys))
}

/// Prior, likelihood and posterior over the same grid. The likelihood is normalized
/// to integrate to one over p (it is then the density of Beta(k + 1, n - k + 1)), so the
/// three curves share a scale and the posterior visibly lies between the other two.
pub fn conjugate(prior : &Beta, data : &Trials, resolution : usize) -> Result<Vec<Series>> {
    let post = crate::fit::posterior(prior, data)?;
    let flat = Beta::uniform()?.update(data.successes(), data.trials())?;
    Ok(vec![
        density(prior, "prior", resolution)?,
        density(&flat, "likelihood", resolution)?,
        density(&post, "posterior", resolution)?
    ])
}

/// Posterior predictive mass function of the number of successes in n future trials.
pub fn predictive(b : &Beta, n : u64) -> Result<Series> {
    let bb = b.predictive(n);
    let ys = bb.pmf()?;
    let xs = DVector::from_iterator(ys.len(), (0..=n).map(|k| k as f64 ));
    Ok(Series::new(&format!("{}", bb), &xs, &ys))
}

#[cfg(test)]
mod tests {

    use super::*;

    const EPS : f64 = 1E-9;

    #[test]
    fn grid_covers_unit_interval() {
        let g = grid(4).unwrap();
        assert_eq!(g.len(), 5);
        assert_eq!(g[0], 0.0);
        assert_eq!(g[4], 1.0);
        assert_eq!(grid(0), Err(ProbError::Resolution));
    }

    #[test]
    fn pmf_series() {
        let s = binomial_pmf(10, 0.3).unwrap();
        assert_eq!(s.len(), 11);
        assert!((s.ys().sum() - 1.).abs() < EPS);
        assert_eq!(s.argmax().unwrap().x, 3.);
        assert!(binomial_pmf(10, 1.3).is_err());
        assert_eq!(binomial_pmf(u64::MAX, 0.5).unwrap_err(), ProbError::Support(u64::MAX));
    }

    #[test]
    fn pdf_series_clamps_divergent_ends() {
        let s = beta_pdf(0.5, 0.5, 10).unwrap();
        assert!(s.points.iter().all(|p| p.y.is_finite() ));
        let s = beta_pdf(2., 2., 100).unwrap();
        assert!((s.argmax().unwrap().x - 0.5).abs() < EPS);
        assert!(beta_pdf(0., 2., 10).is_err());
    }

    #[test]
    fn likelihood_peaks_at_mle() {
        let s = likelihood(&Trials::new(3, 12).unwrap(), 100).unwrap();
        let top = s.argmax().unwrap();
        assert!((top.x - 0.25).abs() < EPS);
        assert!((top.y - 1.).abs() < EPS);
    }

    #[test]
    fn conjugate_curves_share_grid() {
        let curves = conjugate(&Beta::new(8., 2.).unwrap(), &Trials::new(2, 10).unwrap(), 50).unwrap();
        assert_eq!(curves.len(), 3);
        assert!(curves.iter().all(|c| c.xs() == curves[0].xs() ));
        let modes : Vec<f64> = curves.iter().map(|c| c.argmax().unwrap().x ).collect();
        // posterior mode lies between likelihood and prior modes
        assert!(modes[1] < modes[2] && modes[2] < modes[0]);
    }

    #[test]
    fn predictive_series() {
        let s = predictive(&Beta::uniform().unwrap(), 4).unwrap();
        assert_eq!(s.len(), 5);
        assert!(s.points.iter().all(|p| (p.y - 0.2).abs() < EPS ));
    }

}
