//! Tensor-product composition of univariate quadrature rules
//!
//! For rules with `n_1, ..., n_k` points the composed rule has `∏ n_i`
//! points. Point `p` is the mixed-radix number whose digits select one node
//! per parameter, parameter 0 being the most significant digit (the
//! outermost of the equivalent nested loops). Its weight is the product of
//! the selected univariate weights.

use mdarray::DTensor;

use crate::basis_index::increment_mixed_radix;
use crate::error::{PchaosError, Result};
use crate::univariate::QuadratureRule1D;

/// Multivariate quadrature rule stored as contiguous `[num_vars, num_points]`
/// coordinate tables and a weight vector.
#[derive(Debug, Clone)]
pub struct TensorQuadrature {
    npoints: Vec<usize>,
    z: DTensor<f64, 2>,
    y: DTensor<f64, 2>,
    w: Vec<f64>,
}

impl TensorQuadrature {
    /// Compose univariate rules into their tensor product.
    ///
    /// # Arguments
    /// * `rules` - One rule per parameter, in parameter order
    /// * `tolerance` - Relative tolerance for the weight normalization check
    ///
    /// # Returns
    /// The composed rule, or `WeightNormalization` if `Σ W` differs from
    /// `∏ Σ w_i` beyond the tolerance.
    pub fn compose(rules: &[QuadratureRule1D], tolerance: f64) -> Result<Self> {
        let nvars = rules.len();
        if nvars == 0 {
            return Err(PchaosError::NoParameters);
        }

        let npoints: Vec<usize> = rules.iter().map(|r| r.len()).collect();
        let total = npoints.iter().try_fold(1usize, |acc, &n| {
            acc.checked_mul(n).ok_or_else(|| {
                PchaosError::InvalidConfig(format!(
                    "tensor quadrature with {:?} points is too large",
                    npoints
                ))
            })
        })?;

        // digits[p * nvars + i] = node of parameter i used by point p
        let mut digits_table = Vec::with_capacity(total * nvars);
        let mut w = Vec::with_capacity(total);
        if total > 0 {
            let mut digits = vec![0usize; nvars];
            loop {
                digits_table.extend_from_slice(&digits);
                w.push(
                    digits
                        .iter()
                        .zip(rules)
                        .map(|(&d, rule)| rule.w[d])
                        .product::<f64>(),
                );
                if !increment_mixed_radix(&mut digits, &npoints) {
                    break;
                }
            }
        }

        let z = DTensor::<f64, 2>::from_fn([nvars, total], |idx| {
            rules[idx[0]].z[digits_table[idx[1] * nvars + idx[0]]]
        });
        let y = DTensor::<f64, 2>::from_fn([nvars, total], |idx| {
            rules[idx[0]].y[digits_table[idx[1] * nvars + idx[0]]]
        });

        let expected: f64 = rules.iter().map(|r| r.weight_sum()).product();
        let found: f64 = w.iter().sum();
        if (found - expected).abs() > tolerance * expected.abs().max(1.0) {
            return Err(PchaosError::WeightNormalization { expected, found });
        }

        Ok(Self { npoints, z, y, w })
    }

    pub fn num_points(&self) -> usize {
        self.w.len()
    }

    pub fn num_vars(&self) -> usize {
        self.npoints.len()
    }

    /// Number of univariate points used for each parameter
    pub fn points_per_var(&self) -> &[usize] {
        &self.npoints
    }

    pub fn weights(&self) -> &[f64] {
        &self.w
    }

    /// # Panics
    /// Panics if `point` is out of range.
    pub fn weight(&self, point: usize) -> f64 {
        self.w[point]
    }

    /// Standardized coordinate of parameter `var` at `point`
    pub fn z(&self, var: usize, point: usize) -> f64 {
        self.z[[var, point]]
    }

    /// Physical coordinate of parameter `var` at `point`
    pub fn y(&self, var: usize, point: usize) -> f64 {
        self.y[[var, point]]
    }

    /// Copy the coordinates of `point` into `z_out` and `y_out` and return its weight.
    ///
    /// # Panics
    /// Panics if `point` is out of range or the buffers are shorter than `num_vars()`.
    pub fn point_into(&self, point: usize, z_out: &mut [f64], y_out: &mut [f64]) -> f64 {
        for i in 0..self.num_vars() {
            z_out[i] = self.z[[i, point]];
            y_out[i] = self.y[[i, point]];
        }
        self.w[point]
    }

    /// Decode `point` into its per-parameter node indices.
    ///
    /// # Panics
    /// Panics if `point` is out of range.
    pub fn decode(&self, point: usize) -> Vec<usize> {
        assert!(
            point < self.num_points(),
            "point {} out of range (number of points: {})",
            point,
            self.num_points()
        );
        let mut rest = point;
        let mut digits = vec![0usize; self.num_vars()];
        for i in (0..self.num_vars()).rev() {
            digits[i] = rest % self.npoints[i];
            rest /= self.npoints[i];
        }
        digits
    }
}
