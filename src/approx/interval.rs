use serde::{Serialize, Deserialize};
use std::fmt;

/// Trait shared by structures that represents a bounded interval in the real line.
pub trait Interval {

    fn low(&self) -> f64;

    fn high(&self) -> f64;

    /// Verify if value is within the closed interval (self.low(), self.high())
    fn contains(&self, val : &f64) -> bool {
        *val >= self.low() && *val <= self.high()
    }

    fn width(&self) -> f64 {
        self.high() - self.low()
    }

}

/// Interval of the parameter space holding a fixed share (level) of the probability
/// mass of a distribution. Created by Beta::credible_interval (equal tails)
/// or Beta::hdi (narrowest interval).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CredibleInterval {
    low : f64,
    high : f64,
    level : f64
}

impl CredibleInterval {

    pub fn new(low : f64, high : f64, level : f64) -> Self {
        Self { low, high, level }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

}

impl Interval for CredibleInterval {

    fn low(&self) -> f64 {
        self.low
    }

    fn high(&self) -> f64 {
        self.high
    }

}

impl fmt::Display for CredibleInterval {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = (self.level * 1000.).round() / 10.;
        write!(f, "[{:.4}, {:.4}] ({}%)", self.low, self.high, pct)
    }

}

#[test]
fn interval_bounds() {
    let ci = CredibleInterval::new(0.2, 0.6, 0.9);
    assert!(ci.contains(&0.2));
    assert!(ci.contains(&0.6));
    assert!(!ci.contains(&0.61));
    assert!((ci.width() - 0.4).abs() < 1E-12);
    assert_eq!(format!("{}", ci), "[0.2000, 0.6000] (90%)");
}
