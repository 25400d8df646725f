//! Univariate quadrature rules mapped to a parameter's physical domain
//!
//! Canonical Gauss rules are remapped so that
//! * `y` holds physical nodes (where the deterministic model is evaluated),
//! * `z` holds standardized nodes (where the orthonormal basis is evaluated),
//! * `w` holds weights normalized to a probability measure (Σw = 1).

use crate::error::{PchaosError, Result};
use crate::gauss;
use std::f64::consts::{PI, SQRT_2};

/// One-dimensional quadrature rule in standardized and physical coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureRule1D {
    /// Standardized nodes
    pub z: Vec<f64>,
    /// Physical nodes
    pub y: Vec<f64>,
    /// Normalized weights
    pub w: Vec<f64>,
}

impl QuadratureRule1D {
    /// # Panics
    /// Panics if the three arrays differ in length.
    pub fn new(z: Vec<f64>, y: Vec<f64>, w: Vec<f64>) -> Self {
        assert!(
            z.len() == y.len() && y.len() == w.len(),
            "z, y and w must have the same length"
        );
        Self { z, y, w }
    }

    pub fn len(&self) -> usize {
        self.w.len()
    }

    pub fn is_empty(&self) -> bool {
        self.w.is_empty()
    }

    pub fn weight_sum(&self) -> f64 {
        self.w.iter().sum()
    }
}

/// Reject orders outside `1..=max_order`.
pub fn check_order(order: usize, max_order: usize) -> Result<()> {
    if order == 0 || order > max_order {
        return Err(PchaosError::UnsupportedQuadratureOrder {
            order,
            max: max_order,
        });
    }
    Ok(())
}

/// Gauss-Hermite rule for a normal distribution N(mu, sigma²).
///
/// y = mu + sigma·√2·x, z = (y − mu)/sigma, w = w_x/√π
pub fn hermite_rule(npoints: usize, mu: f64, sigma: f64) -> QuadratureRule1D {
    let rule = gauss::hermite(npoints);
    let y: Vec<f64> = rule.x.iter().map(|&x| mu + sigma * SQRT_2 * x).collect();
    let z: Vec<f64> = y.iter().map(|&yi| (yi - mu) / sigma).collect();
    let w: Vec<f64> = rule.w.iter().map(|&wi| wi / PI.sqrt()).collect();
    QuadratureRule1D::new(z, y, w)
}

/// Gauss-Legendre rule for a uniform distribution on [a, b].
///
/// y = (b−a)/2·x + (b+a)/2, z = (y − a)/(b − a), w = w_x/2
pub fn legendre_rule(npoints: usize, a: f64, b: f64) -> QuadratureRule1D {
    let rule = gauss::legendre(npoints).reseat(a, b).scale(1.0 / (b - a));
    let z: Vec<f64> = rule.x.iter().map(|&yi| (yi - a) / (b - a)).collect();
    QuadratureRule1D::new(z, rule.x, rule.w)
}

/// Gauss-Laguerre rule for a shifted exponential distribution.
///
/// y = mu + beta·x, z = x, weights unchanged
pub fn laguerre_rule(npoints: usize, mu: f64, beta: f64) -> QuadratureRule1D {
    let rule = gauss::laguerre(npoints);
    let y: Vec<f64> = rule.x.iter().map(|&x| mu + beta * x).collect();
    QuadratureRule1D::new(rule.x, y, rule.w)
}
