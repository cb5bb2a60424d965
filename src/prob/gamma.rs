use special::Beta as BetaFn;
use special::Gamma as GammaFn;

// The Gamma function extends the factorial to the positive reals:
// Γ(x) = ∫ t^(x-1) e^(-t) dt over (0, inf), with Γ(n) = (n - 1)! for
// positive integers n. The Beta function and the binomial coefficient are
// both ratios of Gamma functions, so every normalization constant used
// by the Beta-Binomial model goes through here.

/// The Gamma function Γ(x).
pub fn gamma(x : f64) -> f64 {
    GammaFn::gamma(x)
}

/// Natural logarithm of |Γ(x)|. Prefer this to gamma(x).ln(), since Γ overflows
/// an f64 already at x = 172.
pub fn ln_gamma(x : f64) -> f64 {
    GammaFn::ln_gamma(x).0
}

/// ln(n!) = ln Γ(n + 1)
pub fn ln_factorial(n : u64) -> f64 {
    ln_gamma(n as f64 + 1.)
}

pub fn factorial(n : u64) -> f64 {
    gamma(n as f64 + 1.)
}

/// ln B(a, b) = ln Γ(a) + ln Γ(b) - ln Γ(a + b)
pub fn ln_beta_fn(a : f64, b : f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// The Beta function B(a, b), the normalization constant of the Beta density.
pub fn beta_fn(a : f64, b : f64) -> f64 {
    ln_beta_fn(a, b).exp()
}

/// ln C(n, k). Returns negative infinity when k > n, so that exp(.) of the
/// result is the (zero) coefficient.
pub fn ln_binomial_coef(n : u64, k : u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    if k == 0 || k == n {
        return 0.0;
    }
    ln_factorial(n) - (ln_factorial(k) + ln_factorial(n - k))
}

/// Number of ways of choosing k elements out of n, C(n, k) = n! / (k! (n - k)!)
pub fn binomial_coef(n : u64, k : u64) -> f64 {
    ln_binomial_coef(n, k).exp().round()
}

/// Regularized incomplete beta function I_x(a, b), which is the CDF of the
/// Beta(a, b) distribution evaluated at x.
pub fn inc_beta(x : f64, a : f64, b : f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    x.inc_beta(a, b, ln_beta_fn(a, b))
}

// Largest mismatch between p and I_x(a, b), relative to the smaller tail mass, accepted
// from the closed-form inverse before falling back to bisection.
const INV_TOL : f64 = 1E-12;

/// Inverse of the regularized incomplete beta function with respect to x. The
/// approximation from special loses accuracy (and monotonicity in p) for small shape
/// parameters, so its result is checked against I_x(a, b) and replaced by a bisection
/// when it misses p.
pub fn inv_inc_beta(p : f64, a : f64, b : f64) -> f64 {
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    let x = p.inv_inc_beta(a, b, ln_beta_fn(a, b));
    if (0.0..=1.0).contains(&x) && (inc_beta(x, a, b) - p).abs() <= INV_TOL * p.min(1. - p) {
        return x;
    }
    bisect_inc_beta(p, a, b)
}

// Bisection over the bit patterns of [0, 1]. Non-negative floats are ordered as their
// bit patterns, so at most 64 steps reach two adjacent floats bracketing p, and tiny
// quantiles (which small shape parameters push towards the subnormals) are resolved
// as well as large ones. Of the two bracketing floats, the one with the closer
// cumulative probability is returned.
fn bisect_inc_beta(p : f64, a : f64, b : f64) -> f64 {
    let (mut lo, mut hi) = (0u64, 1f64.to_bits());
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if inc_beta(f64::from_bits(mid), a, b) < p {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let (x_lo, x_hi) = (f64::from_bits(lo), f64::from_bits(hi));
    if p - inc_beta(x_lo, a, b) <= inc_beta(x_hi, a, b) - p {
        x_lo
    } else {
        x_hi
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    const EPS : f64 = 1E-9;

    #[test]
    fn gamma_matches_factorial() {
        let mut fact = 1.0;
        for n in 1..15u64 {
            assert!((gamma(n as f64) - fact).abs() / fact < EPS);
            fact *= n as f64;
        }
        assert!((factorial(5) - 120.).abs() < EPS);
    }

    #[test]
    fn gamma_recurrence() {
        for x in [0.3, 1.7, 4.25, 9.5].iter() {
            let lhs = gamma(x + 1.);
            let rhs = x * gamma(*x);
            assert!((lhs - rhs).abs() / rhs < EPS);
        }
        // Γ(1/2) = sqrt(pi)
        assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < EPS);
    }

    #[test]
    fn ln_gamma_does_not_overflow() {
        let lg = ln_gamma(500.);
        assert!(lg.is_finite());
        assert!(gamma(500.).is_infinite());
    }

    #[test]
    fn binomial_coefficients() {
        assert_eq!(binomial_coef(10, 0), 1.);
        assert_eq!(binomial_coef(10, 10), 1.);
        assert_eq!(binomial_coef(10, 3), 120.);
        assert_eq!(binomial_coef(52, 5), 2598960.);
        assert_eq!(binomial_coef(3, 4), 0.);
    }

    #[test]
    fn beta_function_symmetry() {
        assert!((beta_fn(2., 3.) - beta_fn(3., 2.)).abs() < EPS);
        // B(2, 3) = 1! 2! / 4! = 1 / 12
        assert!((beta_fn(2., 3.) - 1. / 12.).abs() < EPS);
        assert!((beta_fn(1., 1.) - 1.).abs() < EPS);
    }

    #[test]
    fn incomplete_beta_bounds() {
        assert_eq!(inc_beta(0.0, 2., 2.), 0.0);
        assert_eq!(inc_beta(1.0, 2., 2.), 1.0);
        assert!((inc_beta(0.5, 3., 3.) - 0.5).abs() < EPS);
        // Beta(1, 1) is uniform
        assert!((inc_beta(0.3, 1., 1.) - 0.3).abs() < EPS);
        let x = inv_inc_beta(0.8, 2., 5.);
        assert!((inc_beta(x, 2., 5.) - 0.8).abs() < 1E-7);
    }

    #[test]
    fn inverse_incomplete_beta_small_shapes() {
        let shapes = [(0.05, 10.), (0.3, 4.), (0.5, 0.5), (2., 5.)];
        let probs = [0.025, 0.05, 0.5, 0.95, 0.975];
        for (a, b) in shapes.iter() {
            let mut last = 0.0;
            for p in probs.iter() {
                let x = inv_inc_beta(*p, *a, *b);
                assert!((0.0..=1.0).contains(&x));
                assert!(x >= last, "Quantiles of Beta({}, {}) decrease at {}", a, b, p);
                assert!((inc_beta(x, *a, *b) - p).abs() < 1E-8, "I_x({}, {}) misses {}", a, b, p);
                last = x;
            }
        }
        // U-shaped, with the lower quantiles far below 1E-10.
        for p in [0.025, 0.05, 0.5].iter() {
            let x = inv_inc_beta(*p, 0.1, 0.1);
            assert!((inc_beta(x, 0.1, 0.1) - p).abs() < 1E-8);
        }
        // The 0.95 quantile of Beta(0.001, 5) is near 1E-23.
        let x = inv_inc_beta(0.95, 0.001, 5.);
        assert!(x > 0.0 && x < 1E-10);
        assert!((inc_beta(x, 0.001, 5.) - 0.95).abs() < 1E-8);
    }

}
