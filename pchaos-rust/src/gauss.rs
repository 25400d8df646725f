//! Gauss quadrature rules for numerical integration
//!
//! This module provides quadrature rules for approximating integrals by weighted sums.
//!
//! The integral of f(x) * omega(x) is approximated by a weighted sum:
//!
//! sum(f(xi) * wi for (xi, wi) in zip(x, w))
//!
//! Three classical weights are supported on their canonical domains:
//!
//! * Gauss-Legendre: omega(x) = 1 on [-1, 1], weights sum to 2
//! * Gauss-Hermite (physicists'): omega(x) = exp(-x^2) on ℝ, weights sum to √π
//! * Gauss-Laguerre: omega(x) = exp(-x) on [0, ∞), weights sum to 1
//!
//! Rules of any order are computed on demand; nothing is tabulated.

use nalgebra::{DMatrix, SymmetricEigen};
use std::f64::consts::PI;

use crate::polynomials::legendre_and_derivative;

/// Quadrature rule for numerical integration.
///
/// Represents an approximation of an integral by a weighted sum over discrete points.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Quadrature points, sorted ascending
    pub x: Vec<f64>,
    /// Quadrature weights
    pub w: Vec<f64>,
    /// Left endpoint of integration interval
    pub a: f64,
    /// Right endpoint of integration interval
    pub b: f64,
}

impl Rule {
    /// Create a new quadrature rule from points and weights.
    ///
    /// # Arguments
    /// * `x` - Quadrature points
    /// * `w` - Quadrature weights
    /// * `a` - Left endpoint (may be `-inf`)
    /// * `b` - Right endpoint (may be `inf`)
    ///
    /// # Panics
    /// Panics if x and w have different lengths.
    pub fn new(x: Vec<f64>, w: Vec<f64>, a: f64, b: f64) -> Self {
        assert_eq!(x.len(), w.len(), "x and w must have the same length");
        Self { x, w, a, b }
    }

    /// Create a default rule with empty arrays on [-1, 1].
    pub fn empty() -> Self {
        Self {
            x: vec![],
            w: vec![],
            a: -1.0,
            b: 1.0,
        }
    }

    /// Number of quadrature points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Reseat the rule to a new interval [a, b].
    ///
    /// Scales and translates the quadrature points and weights to the new interval.
    ///
    /// # Panics
    /// Panics if either interval is unbounded.
    pub fn reseat(&self, a: f64, b: f64) -> Self {
        assert!(
            self.a.is_finite() && self.b.is_finite() && a.is_finite() && b.is_finite(),
            "reseat requires bounded intervals"
        );
        let scaling = (b - a) / (self.b - self.a);
        let midpoint_old = (self.b + self.a) * 0.5;
        let midpoint_new = (b + a) * 0.5;

        // Transform x: scaling * (xi - midpoint_old) + midpoint_new
        let new_x: Vec<f64> = self
            .x
            .iter()
            .map(|&xi| scaling * (xi - midpoint_old) + midpoint_new)
            .collect();
        let new_w: Vec<f64> = self.w.iter().map(|&wi| wi * scaling).collect();

        Self {
            x: new_x,
            w: new_w,
            a,
            b,
        }
    }

    /// Scale the weights by a factor.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            x: self.x.clone(),
            w: self.w.iter().map(|&wi| wi * factor).collect(),
            a: self.a,
            b: self.b,
        }
    }

    /// Sum of all weights (the total mass of the weight function)
    pub fn weight_sum(&self) -> f64 {
        self.w.iter().sum()
    }

    /// Approximate the weighted integral of `f`.
    pub fn integrate<F: Fn(f64) -> f64>(&self, f: F) -> f64 {
        self.x
            .iter()
            .zip(self.w.iter())
            .map(|(&xi, &wi)| wi * f(xi))
            .sum()
    }

    /// Validate the rule for consistency.
    ///
    /// # Returns
    /// `true` if the rule is valid, `false` otherwise.
    pub fn validate(&self) -> bool {
        // Check interval validity
        if self.a >= self.b {
            return false;
        }

        // Check array lengths
        if self.x.len() != self.w.len() {
            return false;
        }

        // Check that all points are within [a, b]
        for &xi in self.x.iter() {
            if xi < self.a || xi > self.b {
                return false;
            }
        }

        // Check that points are sorted
        for i in 1..self.x.len() {
            if self.x[i] <= self.x[i - 1] {
                return false;
            }
        }

        // Gauss weights are strictly positive
        self.w.iter().all(|&wi| wi > 0.0)
    }
}

/// Compute Gauss-Legendre quadrature nodes and weights using Newton's method.
fn gauss_legendre_nodes_weights(n: usize) -> (Vec<f64>, Vec<f64>) {
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    if n == 1 {
        return (vec![0.0], vec![2.0]);
    }

    let mut x = Vec::with_capacity(n);
    let mut w = Vec::with_capacity(n);

    // Use Newton's method to find roots of Legendre polynomial
    let m = n.div_ceil(2);

    for i in 0..m {
        // Initial guess using Chebyshev nodes
        let mut z = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();

        // Newton's method to refine the root
        for _ in 0..100 {
            let (p0, p1) = legendre_and_derivative(n, z);
            let dz = p0 / p1;
            z -= dz;
            if dz.abs() < f64::EPSILON {
                break;
            }
        }

        let (_, p1) = legendre_and_derivative(n, z);
        let weight = 2.0 / ((1.0 - z * z) * p1 * p1);

        x.push(-z);
        w.push(weight);

        if i != n - 1 - i {
            x.push(z);
            w.push(weight);
        }
    }

    sort_by_nodes(x, w)
}

/// Golub-Welsch nodes: eigenvalues of the symmetric Jacobi matrix, ascending.
///
/// # Arguments
/// * `diag` - Diagonal recurrence coefficients (length n)
/// * `off` - Off-diagonal entries, i.e. square roots of the recurrence betas (length n-1)
fn jacobi_nodes(diag: &[f64], off: &[f64]) -> Vec<f64> {
    let n = diag.len();
    debug_assert_eq!(off.len() + 1, n.max(1));
    if n == 0 {
        return Vec::new();
    }

    let jacobi = DMatrix::<f64>::from_fn(n, n, |i, j| {
        if i == j {
            diag[i]
        } else if i + 1 == j {
            off[i]
        } else if j + 1 == i {
            off[j]
        } else {
            0.0
        }
    });

    let mut x: Vec<f64> = SymmetricEigen::new(jacobi)
        .eigenvalues
        .iter()
        .copied()
        .collect();
    x.sort_by(|a, b| a.total_cmp(b));
    x
}

/// Christoffel weights `w_i = 1 / Σ_{k<n} p_k(x_i)²` for the polynomials
/// orthonormal under a weight of total mass `mu0`.
///
/// The orthonormal values come from the same recurrence as the Jacobi matrix:
/// `off[k] p_{k+1} = (x − diag[k]) p_k − off[k−1] p_{k−1}`, `p_0 = 1/√mu0`.
/// Eigenvector components only carry absolute accuracy, so the tiny weights
/// at the outer nodes of large rules must be recomputed this way.
fn christoffel_weights(x: &[f64], diag: &[f64], off: &[f64], mu0: f64) -> Vec<f64> {
    // Rescale the running sum before it can overflow; `scale` counts the rescalings
    const BIG: f64 = 1e200;
    const BIG_SQRT: f64 = 1e100;

    x.iter()
        .map(|&xi| {
            let mut p_prev = 0.0;
            let mut p = 1.0 / mu0.sqrt();
            let mut sum = p * p;
            let mut scale = 0i32;
            for k in 0..diag.len().saturating_sub(1) {
                let back = if k == 0 { 0.0 } else { off[k - 1] * p_prev };
                let p_next = ((xi - diag[k]) * p - back) / off[k];
                p_prev = p;
                p = p_next;
                sum += p * p;
                if sum > BIG {
                    sum /= BIG;
                    p /= BIG_SQRT;
                    p_prev /= BIG_SQRT;
                    scale += 1;
                }
            }
            (1.0 / sum) * (1.0 / BIG).powi(scale)
        })
        .collect()
}

fn sort_by_nodes(x: Vec<f64>, w: Vec<f64>) -> (Vec<f64>, Vec<f64>) {
    let mut indices: Vec<usize> = (0..x.len()).collect();
    indices.sort_by(|&a, &b| x[a].total_cmp(&x[b]));

    let sorted_x: Vec<f64> = indices.iter().map(|&i| x[i]).collect();
    let sorted_w: Vec<f64> = indices.iter().map(|&i| w[i]).collect();

    (sorted_x, sorted_w)
}

/// Create a Gauss-Legendre quadrature rule with n points on [-1, 1].
///
/// # Arguments
/// * `n` - Number of quadrature points
///
/// # Returns
/// A Gauss-Legendre quadrature rule
pub fn legendre(n: usize) -> Rule {
    if n == 0 {
        return Rule::empty();
    }

    let (x, w) = gauss_legendre_nodes_weights(n);
    Rule::new(x, w, -1.0, 1.0)
}

/// Create a Gauss-Hermite quadrature rule with n points for the weight exp(-x^2).
///
/// Monic recurrence: p_{k+1}(x) = x p_k(x) − (k/2) p_{k−1}(x).
pub fn hermite(n: usize) -> Rule {
    let diag = vec![0.0; n];
    let off: Vec<f64> = (1..n).map(|k| (k as f64 / 2.0).sqrt()).collect();
    let mut x = jacobi_nodes(&diag, &off);

    // The Hermite rule is symmetric; remove eigen-solver noise at the origin
    if n % 2 == 1 {
        x[n / 2] = 0.0;
    }
    let w = christoffel_weights(&x, &diag, &off, PI.sqrt());

    Rule::new(x, w, f64::NEG_INFINITY, f64::INFINITY)
}

/// Create a Gauss-Laguerre quadrature rule with n points for the weight exp(-x) on [0, ∞).
///
/// Monic recurrence: p_{k+1}(x) = (x − (2k+1)) p_k(x) − k² p_{k−1}(x).
pub fn laguerre(n: usize) -> Rule {
    let diag: Vec<f64> = (0..n).map(|k| (2 * k + 1) as f64).collect();
    let off: Vec<f64> = (1..n).map(|k| k as f64).collect();
    let x = jacobi_nodes(&diag, &off);
    let w = christoffel_weights(&x, &diag, &off, 1.0);

    Rule::new(x, w, 0.0, f64::INFINITY)
}

#[cfg(test)]
#[path = "gauss_tests.rs"]
mod tests;
