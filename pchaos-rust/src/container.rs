//! Parameter container
//!
//! Owns the registered random parameters and the two derived structures
//! built from them: the multivariate basis index set and the tensor
//! quadrature rule. Both are built by explicit initialization calls and
//! queried afterwards through `&self`, so an initialized container can be
//! shared across threads.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::basis_index::{tensor_cardinality, BasisIndexSet};
use crate::config::{BasisType, ContainerConfig, DEFAULT_MAX_PARAMETERS};
use crate::error::{check_len, PchaosError, Result};
use crate::parameter::StochasticParameter;
use crate::sparsity::{self, SparsityPattern};
use crate::tensor_product::TensorQuadrature;
use crate::univariate::{check_order, QuadratureRule1D};

/// Registry of random parameters with their basis and quadrature
#[derive(Debug, Default)]
pub struct ParameterContainer {
    config: ContainerConfig,
    params: BTreeMap<usize, Box<dyn StochasticParameter>>,
    basis: Option<BasisIndexSet>,
    quadrature: Option<TensorQuadrature>,
}

impl ParameterContainer {
    /// Empty container with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty container with a validated configuration
    pub fn with_config(config: ContainerConfig) -> Result<Self> {
        config.validate()?;
        if config.max_parameters > DEFAULT_MAX_PARAMETERS {
            warn!(
                "container capacity {} exceeds the default of {}; tensor bases grow exponentially",
                config.max_parameters, DEFAULT_MAX_PARAMETERS
            );
        }
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Register a parameter under its own id.
    ///
    /// Any previously built basis or quadrature is discarded.
    pub fn add_parameter<P: StochasticParameter + 'static>(&mut self, param: P) -> Result<()> {
        self.add_boxed(Box::new(param))
    }

    /// Register an already boxed parameter.
    pub fn add_boxed(&mut self, param: Box<dyn StochasticParameter>) -> Result<()> {
        let id = param.id();
        if self.params.contains_key(&id) {
            return Err(PchaosError::DuplicateParameterId(id));
        }
        if self.params.len() >= self.config.max_parameters {
            return Err(PchaosError::CapacityExceeded {
                capacity: self.config.max_parameters,
            });
        }
        self.params.insert(id, param);
        self.basis = None;
        self.quadrature = None;
        Ok(())
    }

    /// Ids must be exactly `0..n` so they can serve as dimension indices.
    fn check_parameters(&self) -> Result<usize> {
        let nvars = self.params.len();
        if nvars == 0 {
            return Err(PchaosError::NoParameters);
        }
        for (expected, &id) in self.params.keys().enumerate() {
            if id != expected {
                return Err(PchaosError::NonContiguousParameterIds {
                    expected: nvars,
                    found: id,
                });
            }
        }
        Ok(nvars)
    }

    /// Build the basis index set from per-parameter maximum degrees.
    pub fn initialize_basis(&mut self, pmax: &[usize]) -> Result<()> {
        self.basis = None;
        let nvars = self.check_parameters()?;
        check_len(nvars, pmax.len())?;

        let set = BasisIndexSet::build(self.config.basis_type, pmax)?;
        if self.config.basis_type == BasisType::Tensor {
            let expected = tensor_cardinality(pmax)?;
            if set.num_terms() != expected {
                return Err(PchaosError::TermCountMismatch {
                    expected,
                    found: set.num_terms(),
                });
            }
        }

        debug!(
            "initialized {} basis with {} terms for max degrees {:?}",
            set.kind().as_str(),
            set.num_terms(),
            pmax
        );
        self.basis = Some(set);
        Ok(())
    }

    /// Build the tensor quadrature from per-parameter point counts.
    pub fn initialize_quadrature(&mut self, nqpts: &[usize]) -> Result<()> {
        self.quadrature = None;
        let nvars = self.check_parameters()?;
        check_len(nvars, nqpts.len())?;

        let mut rules: Vec<QuadratureRule1D> = Vec::with_capacity(nvars);
        for (param, &n) in self.params.values().zip(nqpts) {
            check_order(n, self.config.max_quadrature_order)?;
            if n < param.max_degree() + 1 {
                warn!(
                    "parameter {} uses {} quadrature points for max degree {}; \
                     the projection will be under-integrated",
                    param.id(),
                    n,
                    param.max_degree()
                );
            }
            rules.push(param.quadrature(n)?);
        }

        let quadrature = TensorQuadrature::compose(&rules, self.config.weight_tolerance)?;
        debug!(
            "initialized tensor quadrature with {} points from {:?}",
            quadrature.num_points(),
            nqpts
        );
        self.quadrature = Some(quadrature);
        Ok(())
    }

    /// Initialize both structures from the parameters' own maximum degrees,
    /// using `max_degree + 1` points per parameter.
    pub fn initialize(&mut self) -> Result<()> {
        let pmax: Vec<usize> = self.params.values().map(|p| p.max_degree()).collect();
        let nqpts: Vec<usize> = pmax.iter().map(|&p| p + 1).collect();
        self.initialize_basis(&pmax)?;
        self.initialize_quadrature(&nqpts)
    }

    pub fn is_basis_initialized(&self) -> bool {
        self.basis.is_some()
    }

    pub fn is_quadrature_initialized(&self) -> bool {
        self.quadrature.is_some()
    }

    pub fn num_parameters(&self) -> usize {
        self.params.len()
    }

    /// Number of basis terms, zero before the basis is initialized
    pub fn num_basis_terms(&self) -> usize {
        self.basis.as_ref().map_or(0, |b| b.num_terms())
    }

    /// Number of quadrature points, zero before the quadrature is initialized
    pub fn num_quadrature_points(&self) -> usize {
        self.quadrature.as_ref().map_or(0, |q| q.num_points())
    }

    pub fn parameter(&self, id: usize) -> Option<&dyn StochasticParameter> {
        self.params.get(&id).map(|p| p.as_ref())
    }

    /// Registered parameters in id order
    pub fn parameters(&self) -> impl Iterator<Item = &dyn StochasticParameter> + '_ {
        self.params.values().map(|p| p.as_ref())
    }

    pub fn basis_set(&self) -> Option<&BasisIndexSet> {
        self.basis.as_ref()
    }

    pub fn tensor_quadrature(&self) -> Option<&TensorQuadrature> {
        self.quadrature.as_ref()
    }

    pub(crate) fn require_basis(&self) -> Result<&BasisIndexSet> {
        self.basis.as_ref().ok_or(PchaosError::BasisNotInitialized)
    }

    pub(crate) fn require_quadrature(&self) -> Result<&TensorQuadrature> {
        self.quadrature
            .as_ref()
            .ok_or(PchaosError::QuadratureNotInitialized)
    }

    fn check_term(basis: &BasisIndexSet, term: usize) -> Result<()> {
        if term >= basis.num_terms() {
            return Err(PchaosError::TermOutOfRange {
                term,
                count: basis.num_terms(),
            });
        }
        Ok(())
    }

    /// Product of the univariate polynomials of `term` at `z`; no bounds checks.
    pub(crate) fn term_value(&self, basis: &BasisIndexSet, term: usize, z: &[f64]) -> f64 {
        self.params
            .values()
            .enumerate()
            .map(|(i, p)| p.basis(z[i], basis.degree(term, i)))
            .product()
    }

    /// Evaluate basis term `term` at the standardized point `z`.
    pub fn basis(&self, term: usize, z: &[f64]) -> Result<f64> {
        let basis = self.require_basis()?;
        Self::check_term(basis, term)?;
        check_len(basis.num_vars(), z.len())?;
        Ok(self.term_value(basis, term, z))
    }

    /// Write the coordinates of quadrature point `point` and return its weight.
    pub fn quadrature(&self, point: usize, z_out: &mut [f64], y_out: &mut [f64]) -> Result<f64> {
        let quadrature = self.require_quadrature()?;
        if point >= quadrature.num_points() {
            return Err(PchaosError::PointOutOfRange {
                point,
                count: quadrature.num_points(),
            });
        }
        check_len(quadrature.num_vars(), z_out.len())?;
        check_len(quadrature.num_vars(), y_out.len())?;
        Ok(quadrature.point_into(point, z_out, y_out))
    }

    /// Copy the degree tuple of `term` into `out`.
    pub fn basis_param_degrees(&self, term: usize, out: &mut [usize]) -> Result<()> {
        let basis = self.require_basis()?;
        Self::check_term(basis, term)?;
        check_len(basis.num_vars(), out.len())?;
        basis.degrees_into(term, out);
        Ok(())
    }

    /// Maximum degree per parameter recorded by the last basis initialization
    pub fn basis_param_max_degrees(&self) -> Result<&[usize]> {
        Ok(self.require_basis()?.max_degrees())
    }

    /// Whether the Galerkin block coupling terms `row` and `col` can be nonzero
    /// for an operator with the given per-parameter bandwidth.
    pub fn nonzero_block(&self, row: usize, col: usize, bandwidth: &[usize]) -> Result<bool> {
        let basis = self.require_basis()?;
        Self::check_term(basis, row)?;
        Self::check_term(basis, col)?;
        check_len(basis.num_vars(), bandwidth.len())?;
        Ok(sparsity::nonzero(
            &basis.degrees(row),
            &basis.degrees(col),
            bandwidth,
        ))
    }

    /// Block pattern of the whole Galerkin matrix for the given bandwidth.
    pub fn sparsity_pattern(&self, bandwidth: &[usize]) -> Result<SparsityPattern> {
        let basis = self.require_basis()?;
        check_len(basis.num_vars(), bandwidth.len())?;
        Ok(SparsityPattern::from_basis(basis, bandwidth))
    }

    /// Smallest Gauss order that integrates a polynomial of degree `degree` exactly.
    pub fn quadrature_points_for_degree(degree: usize) -> usize {
        degree / 2 + 1
    }

    pub fn quadrature_points_for_degrees(degrees: &[usize]) -> Vec<usize> {
        degrees
            .iter()
            .map(|&d| Self::quadrature_points_for_degree(d))
            .collect()
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
