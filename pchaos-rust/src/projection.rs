//! Non-intrusive spectral projection onto the chaos basis
//!
//! The coefficient of basis term `k` is
//! `c_k = Σ_q W_q ψ_k(Z_q) f(Y_q)`, where the model `f` is evaluated at the
//! physical quadrature points and the basis at the standardized ones.

use rayon::prelude::*;

use crate::container::ParameterContainer;
use crate::error::{check_len, Result};

impl ParameterContainer {
    /// Project a deterministic model onto the basis.
    ///
    /// `f` receives the physical coordinates of one quadrature point. Model
    /// evaluations and coefficient sums are both spread over rayon's pool.
    pub fn project<F>(&self, f: F) -> Result<Vec<f64>>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        let basis = self.require_basis()?;
        let quadrature = self.require_quadrature()?;
        let nvars = quadrature.num_vars();
        let npts = quadrature.num_points();

        let values: Vec<f64> = (0..npts)
            .into_par_iter()
            .map_init(
                || (vec![0.0; nvars], vec![0.0; nvars]),
                |(z, y), q| {
                    quadrature.point_into(q, z, y);
                    f(&y[..])
                },
            )
            .collect();

        let coeffs = (0..basis.num_terms())
            .into_par_iter()
            .map_init(
                || vec![0.0; nvars],
                |z, k| {
                    let mut acc = 0.0;
                    for (q, &fq) in values.iter().enumerate() {
                        for (i, zi) in z.iter_mut().enumerate() {
                            *zi = quadrature.z(i, q);
                        }
                        acc += quadrature.weight(q) * self.term_value(basis, k, z) * fq;
                    }
                    acc
                },
            )
            .collect();
        Ok(coeffs)
    }

    /// Evaluate `Σ_k c_k ψ_k(z)` at a standardized point.
    pub fn evaluate_expansion(&self, coeffs: &[f64], z: &[f64]) -> Result<f64> {
        let basis = self.require_basis()?;
        check_len(basis.num_terms(), coeffs.len())?;
        check_len(basis.num_vars(), z.len())?;
        Ok(coeffs
            .iter()
            .enumerate()
            .map(|(k, c)| c * self.term_value(basis, k, z))
            .sum())
    }
}

/// Statistical moments of an expansion in an orthonormal basis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
}

impl Moments {
    /// Mean is the constant coefficient, variance the squared norm of the rest.
    pub fn from_coefficients(coeffs: &[f64]) -> Self {
        let mean = coeffs.first().copied().unwrap_or(0.0);
        let variance = coeffs.iter().skip(1).map(|c| c * c).sum();
        Self { mean, variance }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PchaosError;
    use crate::parameter::ParameterFactory;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_project_requires_initialization() {
        let mut container = ParameterContainer::new();
        let mut factory = ParameterFactory::new();
        container
            .add_parameter(factory.create_normal(0.0, 1.0, 2).unwrap())
            .unwrap();
        assert_eq!(
            container.project(|y| y[0]),
            Err(PchaosError::BasisNotInitialized)
        );
        container.initialize_basis(&[2]).unwrap();
        assert_eq!(
            container.project(|y| y[0]),
            Err(PchaosError::QuadratureNotInitialized)
        );
    }

    #[test]
    fn test_project_polynomial_is_exact() {
        let mut factory = ParameterFactory::new();
        let mut container = ParameterContainer::new();
        container
            .add_parameter(factory.create_uniform(1.0, 3.0, 2).unwrap())
            .unwrap();
        container
            .add_parameter(factory.create_exponential(0.0, 2.0, 1).unwrap())
            .unwrap();
        container.initialize_basis(&[2, 1]).unwrap();
        container.initialize_quadrature(&[4, 4]).unwrap();

        let model = |y: &[f64]| y[0] * y[0] + 3.0 * y[1];
        let coeffs = container.project(model).unwrap();
        assert_eq!(coeffs.len(), 6);

        // E[y0²] = var + mean² = 1/3 + 4, E[y1] = 2
        let moments = Moments::from_coefficients(&coeffs);
        assert_abs_diff_eq!(moments.mean, 1.0 / 3.0 + 4.0 + 6.0, epsilon = 1e-11);

        // The expansion reproduces the model at arbitrary points
        for &(z0, z1) in &[(0.1, 0.5), (0.7, 2.0), (0.95, 0.0)] {
            let y = [1.0 + 2.0 * z0, 2.0 * z1];
            let value = container.evaluate_expansion(&coeffs, &[z0, z1]).unwrap();
            assert_abs_diff_eq!(value, model(&y), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_evaluate_expansion_length_checks() {
        let mut factory = ParameterFactory::new();
        let mut container = ParameterContainer::new();
        container
            .add_parameter(factory.create_normal(0.0, 1.0, 1).unwrap())
            .unwrap();
        container.initialize().unwrap();
        assert_eq!(
            container.evaluate_expansion(&[1.0], &[0.0]),
            Err(PchaosError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_moments() {
        let m = Moments::from_coefficients(&[2.0, 3.0, 4.0]);
        assert_eq!(m.mean, 2.0);
        assert_eq!(m.variance, 25.0);
        assert_eq!(m.std_dev(), 5.0);
        assert_eq!(Moments::from_coefficients(&[]).mean, 0.0);
    }
}
