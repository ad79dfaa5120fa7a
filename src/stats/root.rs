//! Bracketed scalar root finding.

/// Outcome of a bracketed root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    /// Best estimate of the root.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: usize,
    /// Whether the tolerance was reached within the iteration budget.
    pub converged: bool,
}

/// Brent's method (bisection combined with secant and inverse quadratic
/// interpolation) on the bracket `[a, b]`.
///
/// Returns `None` if `f(a)` and `f(b)` do not have opposite signs or either
/// is not finite.
pub fn brent<F>(f: F, a: f64, b: f64, xtol: f64, max_iter: usize) -> Option<RootResult>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = (a, b);
    let (mut fa, mut fb) = (f(a), f(b));
    if !fa.is_finite() || !fb.is_finite() {
        return None;
    }
    if fa == 0.0 {
        return Some(RootResult { root: a, iterations: 0, converged: true });
    }
    if fb == 0.0 {
        return Some(RootResult { root: b, iterations: 0, converged: true });
    }
    if fa.signum() == fb.signum() {
        return None;
    }

    let (mut c, mut fc) = (a, fa);
    let mut d = b - a;
    let mut e = d;

    for iter in 1..=max_iter {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * xtol;
        let m = 0.5 * (c - b);
        if m.abs() <= tol || fb == 0.0 {
            return Some(RootResult { root: b, iterations: iter, converged: true });
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let mut p;
            let mut q;
            if a == c {
                // secant step
                p = 2.0 * m * s;
                q = 1.0 - s;
            } else {
                // inverse quadratic interpolation
                let qa = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * m * qa * (qa - r) - (b - a) * (r - 1.0));
                q = (qa - 1.0) * (r - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }
            if 2.0 * p < (3.0 * m * q - (tol * q).abs()).min((e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = m;
            }
        } else {
            d = m;
            e = m;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(m) };
        fb = f(b);
        if !fb.is_finite() {
            return Some(RootResult { root: a, iterations: iter, converged: false });
        }
    }

    Some(RootResult { root: b, iterations: max_iter, converged: false })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_root() {
        let r = brent(|x| x * x - 2.0, 0.0, 2.0, 1e-12, 100).unwrap();
        assert!(r.converged);
        assert_relative_eq!(r.root, 2.0f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_transcendental_root() {
        let r = brent(|x: f64| x.cos() - x, 0.0, 1.0, 1e-12, 100).unwrap();
        assert_relative_eq!(r.root, 0.739_085_133_215_160_6, epsilon = 1e-9);
    }

    #[test]
    fn test_iteration_limit() {
        let r = brent(|x: f64| x.cos() - x, 0.0, 1.0, 1e-12, 1).unwrap();
        assert!(!r.converged);
        assert_eq!(r.iterations, 1);
        assert!((0.0..=1.0).contains(&r.root));

        let r = brent(|x: f64| x.cos() - x, 0.0, 1.0, 1e-12, 100).unwrap();
        assert!(r.converged);
        assert!(r.iterations > 1);
    }

    #[test]
    fn test_no_sign_change() {
        assert!(brent(|x| x * x + 1.0, -1.0, 1.0, 1e-9, 100).is_none());
    }

    #[test]
    fn test_root_at_bracket_end() {
        let r = brent(|x| x - 3.0, 3.0, 5.0, 1e-9, 100).unwrap();
        assert_eq!(r.root, 3.0);
    }
}
