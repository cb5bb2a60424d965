// Number of candidate lower tail masses evaluated before refining.
const GRID : usize = 200;

const TOL : f64 = 1E-10;

/// Narrowest interval (low, high) holding the informed probability mass (level),
/// for a distribution represented by its quantile function. The search varies the mass t
/// left below the interval over [0, 1 - level], minimizing quantile(t + level) - quantile(t).
/// It first evaluates a regular grid over t, then refines the best grid cell by
/// golden-section search. For unimodal densities the result is the highest density interval.
/// The bounds are never inverted, even when the quantile function is not monotone.
pub fn narrowest_interval<Q>(quantile : Q, level : f64) -> (f64, f64)
where
    Q : Fn(f64) -> f64
{
    let width = |t : f64| quantile(t + level) - quantile(t);
    let max_t = 1. - level;
    let step = max_t / GRID as f64;
    let mut best = 0;
    let mut best_width = width(0.0);
    for i in 1..=GRID {
        let w = width(step * i as f64);
        if w < best_width {
            best_width = w;
            best = i;
        }
    }

    let best_t = step * best as f64;
    let (mut lo, mut hi) = ((best_t - step).max(0.0), (best_t + step).min(max_t));
    let ratio = (5f64.sqrt() - 1.) / 2.;
    while hi - lo > TOL {
        let t1 = hi - ratio*(hi - lo);
        let t2 = lo + ratio*(hi - lo);
        if width(t1) <= width(t2) {
            hi = t2;
        } else {
            lo = t1;
        }
    }

    let refined = (lo + hi) / 2.;
    let t = if width(refined) <= best_width { refined } else { best_t };
    let low = quantile(t);
    (low, quantile(t + level).max(low))
}

#[test]
fn narrowest_uniform_interval() {
    // Any interval of the uniform with the right mass has the same width.
    let (low, high) = narrowest_interval(|q| q, 0.5);
    assert!((high - low - 0.5).abs() < 1E-9);
}

#[test]
fn narrowest_interval_of_exponential() {
    // Exponential(1) quantile function; the density is decreasing, so the interval starts at zero.
    let (low, high) = narrowest_interval(|q : f64| -(1. - q).ln(), 0.9);
    assert!(low < 1E-6);
    assert!((high - 10f64.ln()).abs() < 1E-4);
}

#[test]
fn narrowest_interval_is_ordered() {
    // A quantile function that decreases past 0.5 would invert the bounds.
    let (low, high) = narrowest_interval(|q : f64| if q < 0.5 { q } else { 1. - q }, 0.6);
    assert!(low <= high);
}
