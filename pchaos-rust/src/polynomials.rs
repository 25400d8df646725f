//! Orthogonal polynomial families used by the polynomial chaos basis
//!
//! Each family is evaluated through its three-term recurrence. The
//! orthonormal variants are normalized against the probability measure of
//! the matching distribution:
//!
//! | Family   | Measure                    | Orthonormal polynomial |
//! |----------|----------------------------|------------------------|
//! | Hermite  | standard normal on ℝ       | He_n(z) / √(n!)        |
//! | Legendre | uniform on [0, 1]          | √(2n+1) P_n(2z − 1)    |
//! | Laguerre | exp(−z) on [0, ∞)          | L_n(z)                 |
//!
//! so that E[ψ_i ψ_j] = δ_ij for every family.

use mdarray::DTensor;
use serde::{Deserialize, Serialize};

/// Orthogonal polynomial family tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolynomialFamily {
    Hermite,
    Legendre,
    Laguerre,
}

impl PolynomialFamily {
    /// Evaluate the orthonormal polynomial of the given degree at `z`.
    pub fn evaluate(self, z: f64, degree: usize) -> f64 {
        match self {
            PolynomialFamily::Hermite => unit_hermite(z, degree),
            PolynomialFamily::Legendre => unit_legendre(z, degree),
            PolynomialFamily::Laguerre => unit_laguerre(z, degree),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolynomialFamily::Hermite => "hermite",
            PolynomialFamily::Legendre => "legendre",
            PolynomialFamily::Laguerre => "laguerre",
        }
    }
}

/// Compute Legendre polynomial P_n(x) and its derivative using recurrence relation.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }

    if n == 1 {
        return (x, 1.0);
    }

    let mut p0 = 1.0;
    let mut p1 = x;
    let mut dp0 = 0.0;
    let mut dp1 = 1.0;

    for k in 2..=n {
        let k_f = k as f64;
        let k1_f = (k - 1) as f64;

        let p2 = ((2.0 * k1_f + 1.0) * x * p1 - k1_f * p0) / k_f;
        let dp2 = ((2.0 * k1_f + 1.0) * (p1 + x * dp1) - k1_f * dp0) / k_f;

        p0 = p1;
        p1 = p2;
        dp0 = dp1;
        dp1 = dp2;
    }

    (p1, dp1)
}

/// Legendre polynomial P_n(x) on [-1, 1]
pub fn legendre(n: usize, x: f64) -> f64 {
    legendre_and_derivative(n, x).0
}

/// Probabilists' Hermite polynomial He_n(z)
///
/// He_{n+1}(z) = z He_n(z) − n He_{n−1}(z)
pub fn hermite(n: usize, z: f64) -> f64 {
    let mut h0 = 1.0;
    if n == 0 {
        return h0;
    }
    let mut h1 = z;
    for k in 1..n {
        let h2 = z * h1 - k as f64 * h0;
        h0 = h1;
        h1 = h2;
    }
    h1
}

/// Laguerre polynomial L_n(x)
///
/// (n+1) L_{n+1}(x) = (2n + 1 − x) L_n(x) − n L_{n−1}(x)
pub fn laguerre(n: usize, x: f64) -> f64 {
    let mut l0 = 1.0;
    if n == 0 {
        return l0;
    }
    let mut l1 = 1.0 - x;
    for k in 1..n {
        let k_f = k as f64;
        let l2 = ((2.0 * k_f + 1.0 - x) * l1 - k_f * l0) / (k_f + 1.0);
        l0 = l1;
        l1 = l2;
    }
    l1
}

/// Orthonormal Hermite polynomial He_n(z) / √(n!)
///
/// Uses the normalized recurrence directly so that n! never overflows.
pub fn unit_hermite(z: f64, n: usize) -> f64 {
    let mut h0 = 1.0;
    if n == 0 {
        return h0;
    }
    let mut h1 = z;
    for k in 1..n {
        let k_f = k as f64;
        let h2 = (z * h1 - k_f.sqrt() * h0) / (k_f + 1.0).sqrt();
        h0 = h1;
        h1 = h2;
    }
    h1
}

/// Orthonormal shifted Legendre polynomial on [0, 1]
pub fn unit_legendre(z: f64, n: usize) -> f64 {
    ((2 * n + 1) as f64).sqrt() * legendre(n, 2.0 * z - 1.0)
}

/// Orthonormal Laguerre polynomial (L_n is already normalized for exp(−z))
pub fn unit_laguerre(z: f64, n: usize) -> f64 {
    laguerre(n, z)
}

/// Create a Vandermonde matrix of orthonormal polynomials
///
/// # Arguments
/// * `family` - Polynomial family
/// * `z` - Standardized points where polynomials are evaluated
/// * `degree` - Maximum polynomial degree
///
/// # Returns
/// Matrix V where V[i,j] = ψ_j(z_i)
pub fn vandermonde(family: PolynomialFamily, z: &[f64], degree: usize) -> DTensor<f64, 2> {
    DTensor::<f64, 2>::from_fn([z.len(), degree + 1], |idx| {
        family.evaluate(z[idx[0]], idx[1])
    })
}

#[cfg(test)]
#[path = "polynomials_tests.rs"]
mod tests;
