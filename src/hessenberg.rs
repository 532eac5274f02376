//! General N×N eigenvalues via Hessenberg reduction and shifted QR
//!
//! # Algorithm
//!
//! 1. Balance the matrix with power-of-two diagonal similarity scaling so row
//!    and column norms are comparable (exact in floating point).
//! 2. Reduce to upper Hessenberg form by stabilized elementary similarity
//!    transforms (Gaussian elimination with pivoting).
//! 3. Run Francis double-shift QR on the active Hessenberg block, deflating
//!    1×1 blocks (real eigenvalues) and 2×2 blocks (conjugate pairs) off the
//!    bottom. Exceptional shifts break cycles at iterations 10 and 20.
//!
//! Only eigenvalues are produced here; eigenvectors are recovered afterwards
//! from the original matrix by null-space extraction.

use num_complex::Complex64;

use crate::poly::{Root, Roots};
use crate::{EigenError, Result};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Balancing scale base (floating-point radix, so scaling is exact)
const RADIX: f64 = 2.0;

/// Iteration counts at which an exceptional shift is applied
const EXCEPTIONAL_SHIFTS: [usize; 2] = [10, 20];

/// Eigenvalues of a row-major `n×n` matrix
///
/// # Errors
///
/// Returns `NumericalFailure` if any eigenvalue needs more than
/// `max_iterations` QR sweeps to deflate.
#[cfg_attr(feature = "tracing", instrument(skip(matrix), fields(n = n)))]
pub(crate) fn eigenvalues(
    matrix: &[f64],
    n: usize,
    max_iterations: usize,
    snap_tol: f64,
    flag_tol: f64,
) -> Result<Roots> {
    debug_assert_eq!(matrix.len(), n * n);
    let mut a = matrix.to_vec();

    balance(&mut a, n);
    reduce_to_hessenberg(&mut a, n);
    let (values, iterations, snapped) = francis_qr(&mut a, n, max_iterations, snap_tol)?;

    let scale = matrix.iter().fold(0.0f64, |m, x| m.max(x.abs())).max(1.0);
    let gap_tol = flag_tol.sqrt() * scale;
    let near_degenerate = snapped
        || values.iter().enumerate().any(|(i, a)| {
            values[i + 1..]
                .iter()
                .any(|b| (a.value() - b.value()).norm() <= gap_tol)
        });

    #[cfg(feature = "tracing")]
    tracing::debug!(iterations, near_degenerate, "shifted QR converged");

    Ok(Roots {
        roots: values,
        near_degenerate,
        iterations,
    })
}

/// Diagonal similarity scaling by powers of the radix
fn balance(a: &mut [f64], n: usize) {
    let radix_sq = RADIX * RADIX;
    let mut done = false;

    while !done {
        done = true;
        for i in 0..n {
            let mut r = 0.0;
            let mut c = 0.0;
            for j in 0..n {
                if j != i {
                    c += a[j * n + i].abs();
                    r += a[i * n + j].abs();
                }
            }
            if c == 0.0 || r == 0.0 {
                continue;
            }

            let s = c + r;
            let mut f = 1.0;
            let mut g = r / RADIX;
            while c < g {
                f *= RADIX;
                c *= radix_sq;
            }
            g = r * RADIX;
            while c > g {
                f /= RADIX;
                c /= radix_sq;
            }

            if (c + r) / f < 0.95 * s {
                done = false;
                let g = 1.0 / f;
                for j in 0..n {
                    a[i * n + j] *= g;
                }
                for j in 0..n {
                    a[j * n + i] *= f;
                }
            }
        }
    }
}

/// Reduce to upper Hessenberg form, zeroing everything below the subdiagonal
fn reduce_to_hessenberg(a: &mut [f64], n: usize) {
    for m in 1..n.saturating_sub(1) {
        let mut pivot = 0.0f64;
        let mut i = m;
        for j in m..n {
            if a[j * n + m - 1].abs() > pivot.abs() {
                pivot = a[j * n + m - 1];
                i = j;
            }
        }

        if i != m {
            for j in (m - 1)..n {
                a.swap(i * n + j, m * n + j);
            }
            for j in 0..n {
                a.swap(j * n + i, j * n + m);
            }
        }

        if pivot != 0.0 {
            for i in (m + 1)..n {
                let mut y = a[i * n + m - 1];
                if y != 0.0 {
                    y /= pivot;
                    a[i * n + m - 1] = y;
                    for j in m..n {
                        a[i * n + j] -= y * a[m * n + j];
                    }
                    for j in 0..n {
                        a[j * n + m] += y * a[j * n + i];
                    }
                }
            }
        }
    }

    for i in 2..n {
        for j in 0..(i - 1) {
            a[i * n + j] = 0.0;
        }
    }
}

/// Francis double-shift QR on an upper Hessenberg matrix (destroyed)
///
/// Returns the eigenvalues in deflation slots, the total number of QR
/// sweeps, and whether a near-zero 2×2 discriminant was snapped to a real
/// double root.
fn francis_qr(
    a: &mut [f64],
    n: usize,
    max_iterations: usize,
    snap_tol: f64,
) -> Result<(Vec<Root>, usize, bool)> {
    let mut values = vec![Root::Real(0.0); n];
    let mut snapped = false;

    let mut norm = 0.0;
    for i in 0..n {
        for j in i.saturating_sub(1)..n {
            norm += a[i * n + j].abs();
        }
    }

    let mut shift_total = 0.0;
    let mut its = 0;
    let mut total_its = 0;
    let mut hi = n;

    while hi > 0 {
        let nn = hi - 1;

        // Look for a single small subdiagonal element
        let mut l = nn;
        while l > 0 {
            let mut s = a[(l - 1) * n + l - 1].abs() + a[l * n + l].abs();
            if s == 0.0 {
                s = norm;
            }
            if a[l * n + l - 1].abs() <= f64::EPSILON * s {
                a[l * n + l - 1] = 0.0;
                break;
            }
            l -= 1;
        }

        let mut x = a[nn * n + nn];
        if l == nn {
            values[nn] = Root::Real(x + shift_total);
            hi -= 1;
            its = 0;
            continue;
        }

        let mut y = a[(nn - 1) * n + nn - 1];
        let mut w = a[nn * n + nn - 1] * a[(nn - 1) * n + nn];

        if l + 1 == nn {
            // Trailing 2×2 block
            let p = 0.5 * (y - x);
            let mut q = p * p + w;
            if q < 0.0 && q.abs() <= snap_tol * (p * p + w.abs()) {
                q = 0.0;
                snapped = true;
            }
            let z = q.abs().sqrt();
            x += shift_total;
            if q >= 0.0 {
                let z = p + z.copysign(p);
                let big = x + z;
                let small = if z != 0.0 { x - w / z } else { big };
                values[nn - 1] = Root::Real(big);
                values[nn] = Root::Real(small);
            } else {
                values[nn - 1] = Root::Complex(Complex64::new(x + p, z));
                values[nn] = Root::Complex(Complex64::new(x + p, -z));
            }
            hi -= 2;
            its = 0;
            continue;
        }

        if its >= max_iterations {
            #[cfg(feature = "tracing")]
            tracing::warn!(total_its, remaining = hi, "shifted QR failed to converge");
            return Err(EigenError::NumericalFailure {
                iterations: total_its,
            });
        }

        if EXCEPTIONAL_SHIFTS.contains(&its) {
            shift_total += x;
            for i in 0..=nn {
                a[i * n + i] -= x;
            }
            let s = a[nn * n + nn - 1].abs() + a[(nn - 1) * n + nn - 2].abs();
            x = 0.75 * s;
            y = x;
            w = -0.4375 * s * s;
        }
        its += 1;
        total_its += 1;

        // Form the shift and look for two consecutive small subdiagonal elements
        let mut m = nn - 2;
        let mut p;
        let mut q;
        let mut r;
        loop {
            let z = a[m * n + m];
            let r0 = x - z;
            let s0 = y - z;
            p = (r0 * s0 - w) / a[(m + 1) * n + m] + a[m * n + m + 1];
            q = a[(m + 1) * n + m + 1] - z - r0 - s0;
            r = a[(m + 2) * n + m + 1];
            let s = p.abs() + q.abs() + r.abs();
            p /= s;
            q /= s;
            r /= s;
            if m == l {
                break;
            }
            let u = a[m * n + m - 1].abs() * (q.abs() + r.abs());
            let v = p.abs()
                * (a[(m - 1) * n + m - 1].abs() + z.abs() + a[(m + 1) * n + m + 1].abs());
            if u <= f64::EPSILON * v {
                break;
            }
            m -= 1;
        }

        for i in m..(nn - 1) {
            a[(i + 2) * n + i] = 0.0;
            if i != m {
                a[(i + 2) * n + i - 1] = 0.0;
            }
        }

        // Double QR step on rows l..=nn and columns m..=nn
        for k in m..nn {
            if k != m {
                p = a[k * n + k - 1];
                q = a[(k + 1) * n + k - 1];
                r = if k + 1 != nn {
                    a[(k + 2) * n + k - 1]
                } else {
                    0.0
                };
                x = p.abs() + q.abs() + r.abs();
                if x != 0.0 {
                    p /= x;
                    q /= x;
                    r /= x;
                }
            }

            let s = (p * p + q * q + r * r).sqrt().copysign(p);
            if s == 0.0 {
                continue;
            }

            if k == m {
                if l != m {
                    a[k * n + k - 1] = -a[k * n + k - 1];
                }
            } else {
                a[k * n + k - 1] = -s * x;
            }
            p += s;
            x = p / s;
            y = q / s;
            let z = r / s;
            q /= p;
            r /= p;

            for j in k..=nn {
                let mut t = a[k * n + j] + q * a[(k + 1) * n + j];
                if k + 1 != nn {
                    t += r * a[(k + 2) * n + j];
                    a[(k + 2) * n + j] -= t * z;
                }
                a[(k + 1) * n + j] -= t * y;
                a[k * n + j] -= t * x;
            }

            let last = nn.min(k + 3);
            for i in l..=last {
                let mut t = x * a[i * n + k] + y * a[i * n + k + 1];
                if k + 1 != nn {
                    t += z * a[i * n + k + 2];
                    a[i * n + k + 2] -= t * r;
                }
                a[i * n + k + 1] -= t * q;
                a[i * n + k] -= t;
            }
        }
    }

    Ok((values, total_its, snapped))
}
