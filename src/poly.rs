//! Closed-form characteristic-polynomial roots for 2×2 and 3×3 matrices
//!
//! # Algorithm
//!
//! - 2×2: `λ² − tr·λ + det = 0`, with the discriminant formed as
//!   `(a − d)² + 4bc` to avoid the cancellation in `tr² − 4·det`, and the
//!   smaller real root recovered as `det / λ_big` (Vieta).
//! - 3×3: the characteristic cubic is shifted to depressed form
//!   `x³ + p·x + q`. Three real roots use the trigonometric method, one real
//!   root plus a conjugate pair uses Cardano's formula. Non-repeated roots are
//!   polished with Newton steps on the original cubic.
//!
//! Discriminants within `snap_tol` of zero (relative to the magnitude of the
//! terms forming them) are snapped to repeated real roots so that rounding
//! noise never shows up as a spurious imaginary part.

use num_complex::Complex64;

/// Newton polishing steps applied to closed-form cubic roots
const POLISH_STEPS: usize = 3;

/// One root of a characteristic polynomial
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Root {
    Real(f64),
    Complex(Complex64),
}

impl Root {
    pub(crate) fn value(self) -> Complex64 {
        match self {
            Root::Real(x) => Complex64::new(x, 0.0),
            Root::Complex(z) => z,
        }
    }
}

/// Eigenvalues plus what the solver learned about their conditioning
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Roots {
    pub(crate) roots: Vec<Root>,
    /// A discriminant or eigenvalue gap was close to zero
    pub(crate) near_degenerate: bool,
    /// Iterations spent (zero for closed forms)
    pub(crate) iterations: usize,
}

/// Roots of the characteristic polynomial of a row-major 2×2 matrix
pub(crate) fn quadratic(m: &[f64], snap_tol: f64, flag_tol: f64) -> Roots {
    debug_assert_eq!(m.len(), 4);
    let (a, b, c, d) = (m[0], m[1], m[2], m[3]);

    let trace = a + d;
    let det = a * d - b * c;
    let diff = a - d;
    let disc = diff * diff + 4.0 * b * c;
    let terms = diff * diff + 4.0 * (b * c).abs();

    let near_degenerate = disc.abs() <= flag_tol * terms;

    let roots = if disc.abs() <= snap_tol * terms {
        let half = 0.5 * trace;
        vec![Root::Real(half), Root::Real(half)]
    } else if disc > 0.0 {
        let sqrt_disc = disc.sqrt();
        let big = 0.5 * (trace + sqrt_disc.copysign(trace));
        let small = if big != 0.0 {
            det / big
        } else {
            0.5 * (trace - sqrt_disc.copysign(trace))
        };
        vec![Root::Real(big), Root::Real(small)]
    } else {
        let re = 0.5 * trace;
        let im = 0.5 * (-disc).sqrt();
        vec![
            Root::Complex(Complex64::new(re, im)),
            Root::Complex(Complex64::new(re, -im)),
        ]
    };

    Roots {
        roots,
        near_degenerate,
        iterations: 0,
    }
}

/// Coefficients of `λ³ − t·λ² + m·λ − d` for a row-major 3×3 matrix
struct Cubic {
    trace: f64,
    minors: f64,
    det: f64,
}

impl Cubic {
    fn from_matrix(a: &[f64]) -> Self {
        let trace = a[0] + a[4] + a[8];
        let minors = (a[0] * a[4] - a[1] * a[3])
            + (a[0] * a[8] - a[2] * a[6])
            + (a[4] * a[8] - a[5] * a[7]);
        let det = a[0] * (a[4] * a[8] - a[5] * a[7]) - a[1] * (a[3] * a[8] - a[5] * a[6])
            + a[2] * (a[3] * a[7] - a[4] * a[6]);
        Cubic { trace, minors, det }
    }

    fn eval(&self, x: f64) -> (f64, f64) {
        let f = ((x - self.trace) * x + self.minors) * x - self.det;
        let df = (3.0 * x - 2.0 * self.trace) * x + self.minors;
        (f, df)
    }

    fn eval_complex(&self, z: Complex64) -> (Complex64, Complex64) {
        let f = ((z - self.trace) * z + self.minors) * z - self.det;
        let df = (z * 3.0 - 2.0 * self.trace) * z + self.minors;
        (f, df)
    }

    /// Newton steps, each kept only if it shrinks `|f|`
    fn polish(&self, mut x: f64) -> f64 {
        for _ in 0..POLISH_STEPS {
            let (f, df) = self.eval(x);
            if f == 0.0 || df == 0.0 {
                break;
            }
            let next = x - f / df;
            if self.eval(next).0.abs() < f.abs() {
                x = next;
            } else {
                break;
            }
        }
        x
    }

    fn polish_complex(&self, mut z: Complex64) -> Complex64 {
        for _ in 0..POLISH_STEPS {
            let (f, df) = self.eval_complex(z);
            if f.norm() == 0.0 || df.norm() == 0.0 {
                break;
            }
            let next = z - f / df;
            if self.eval_complex(next).0.norm() < f.norm() {
                z = next;
            } else {
                break;
            }
        }
        z
    }
}

/// Roots of the characteristic polynomial of a row-major 3×3 matrix
pub(crate) fn cubic(a: &[f64], snap_tol: f64, flag_tol: f64) -> Roots {
    debug_assert_eq!(a.len(), 9);
    let poly = Cubic::from_matrix(a);
    let scale = a.iter().fold(0.0f64, |m, x| m.max(x.abs()));
    let (s2, s3) = (scale * scale, scale * scale * scale);

    // λ = x + t/3 gives x³ + p·x + q
    let shift = poly.trace / 3.0;
    let p = poly.minors - poly.trace * poly.trace / 3.0;
    let q = -2.0 * poly.trace.powi(3) / 27.0 + poly.trace * poly.minors / 3.0 - poly.det;

    let triple_within = |tol: f64| p.abs() <= tol * s2 && q.abs() <= tol * s3;

    if triple_within(snap_tol) {
        return Roots {
            roots: vec![Root::Real(shift); 3],
            near_degenerate: true,
            iterations: 0,
        };
    }

    let half_q = 0.5 * q;
    let third_p = p / 3.0;
    let disc = half_q * half_q + third_p * third_p * third_p;
    let terms = half_q * half_q + third_p.abs().powi(3);

    let near_degenerate = disc.abs() <= flag_tol * terms || triple_within(flag_tol);

    let roots = if disc.abs() <= snap_tol * terms {
        // Double root; p ≠ 0 since the triple case returned above
        let single = 3.0 * q / p + shift;
        let double = -1.5 * q / p + shift;
        vec![Root::Real(single), Root::Real(double), Root::Real(double)]
    } else if disc > 0.0 {
        // Cardano: one real root and a conjugate pair
        let w = -half_q + disc.sqrt().copysign(-half_q);
        let u = w.cbrt();
        let v = if u != 0.0 { -third_p / u } else { 0.0 };

        let real = poly.polish(u + v + shift);
        let pair = poly.polish_complex(Complex64::new(
            -0.5 * (u + v) + shift,
            (0.5 * 3f64.sqrt() * (u - v)).abs(),
        ));
        vec![
            Root::Real(real),
            Root::Complex(pair),
            Root::Complex(pair.conj()),
        ]
    } else {
        // Trigonometric method: three distinct real roots, p < 0
        let r = 2.0 * (-third_p).sqrt();
        let cos_arg = (-half_q / (-third_p).powi(3).sqrt()).clamp(-1.0, 1.0);
        let phi = cos_arg.acos() / 3.0;
        (0..3)
            .map(|k| {
                let x = r * (phi - 2.0 * std::f64::consts::PI * k as f64 / 3.0).cos();
                Root::Real(poly.polish(x + shift))
            })
            .collect()
    };

    Roots {
        roots,
        near_degenerate,
        iterations: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real_values(roots: &Roots) -> Vec<f64> {
        let mut values: Vec<f64> = roots
            .roots
            .iter()
            .map(|r| match r {
                Root::Real(x) => *x,
                Root::Complex(z) => panic!("unexpected complex root {}", z),
            })
            .collect();
        values.sort_by(|a, b| b.partial_cmp(a).unwrap());
        values
    }

    #[test]
    fn test_quadratic_distinct_real() {
        let roots = quadratic(&[4.0, 2.0, 1.0, 3.0], 1e-14, 1e-8);
        assert_eq!(real_values(&roots), vec![5.0, 2.0]);
        assert!(!roots.near_degenerate);
    }

    #[test]
    fn test_quadratic_zero_trace() {
        let roots = quadratic(&[0.0, 1.0, 1.0, 0.0], 1e-14, 1e-8);
        assert_eq!(real_values(&roots), vec![1.0, -1.0]);
    }

    #[test]
    fn test_quadratic_singular() {
        let roots = quadratic(&[2.0, 0.0, 0.0, 0.0], 1e-14, 1e-8);
        assert_eq!(real_values(&roots), vec![2.0, 0.0]);
    }

    #[test]
    fn test_quadratic_repeated_root_is_snapped() {
        let identity = quadratic(&[1.0, 0.0, 0.0, 1.0], 1e-14, 1e-8);
        assert_eq!(real_values(&identity), vec![1.0, 1.0]);
        assert!(identity.near_degenerate);

        let jordan = quadratic(&[1.0, 1.0, 0.0, 1.0], 1e-14, 1e-8);
        assert_eq!(real_values(&jordan), vec![1.0, 1.0]);
        assert!(jordan.near_degenerate);
    }

    #[test]
    fn test_quadratic_complex_pair() {
        // Rotation by 90°
        let roots = quadratic(&[0.0, -1.0, 1.0, 0.0], 1e-14, 1e-8);
        assert_eq!(
            roots.roots,
            vec![
                Root::Complex(Complex64::new(0.0, 1.0)),
                Root::Complex(Complex64::new(0.0, -1.0)),
            ]
        );
        assert!(!roots.near_degenerate);
    }

    #[test]
    fn test_quadratic_small_imaginary_part_survives() {
        // 1 ± 1e-6 i is a genuine pair, not noise
        let roots = quadratic(&[1.0, 1e-6, -1e-6, 1.0], 1e-14, 1e-8);
        assert!(matches!(roots.roots[0], Root::Complex(_)));
        assert!((roots.roots[0].value().im - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_cubic_three_real() {
        let roots = cubic(&[2.0, 0.0, 0.0, 0.0, 3.0, 4.0, 0.0, 4.0, 9.0], 1e-14, 1e-8);
        let values = real_values(&roots);
        // Block diag(2, [[3,4],[4,9]]) → 2, 1, 11
        for (got, want) in values.iter().zip([11.0, 2.0, 1.0]) {
            assert!((got - want).abs() < 1e-12, "got {}, want {}", got, want);
        }
    }

    #[test]
    fn test_cubic_complex_pair() {
        // diag(2) ⊕ rotation → 2, ±i
        let roots = cubic(&[2.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0], 1e-14, 1e-8);
        assert!(matches!(roots.roots[0], Root::Real(x) if (x - 2.0).abs() < 1e-12));
        let z = roots.roots[1].value();
        assert!(z.re.abs() < 1e-12 && (z.im - 1.0).abs() < 1e-12, "got {}", z);
        assert_eq!(roots.roots[2].value(), z.conj());
    }

    #[test]
    fn test_cubic_triple_root() {
        let roots = cubic(&[2.0, 1.0, 0.0, 0.0, 2.0, 1.0, 0.0, 0.0, 2.0], 1e-14, 1e-8);
        assert_eq!(real_values(&roots), vec![2.0, 2.0, 2.0]);
        assert!(roots.near_degenerate);
    }

    #[test]
    fn test_cubic_double_root() {
        let roots = cubic(&[3.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0], 1e-14, 1e-8);
        let values = real_values(&roots);
        for (got, want) in values.iter().zip([3.0, 1.0, 1.0]) {
            assert!((got - want).abs() < 1e-12, "got {}, want {}", got, want);
        }
        assert!(roots.near_degenerate);
    }
}
