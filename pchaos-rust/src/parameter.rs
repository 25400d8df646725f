//! Random parameters and their distributions
//!
//! A random parameter knows how to produce a univariate quadrature rule for
//! its distribution and how to evaluate the matching orthonormal polynomial
//! at a standardized coordinate. The [`StochasticParameter`] trait is the
//! seam the container works against; [`RandomParameter`] implements it for
//! the normal, uniform and exponential families.

use serde::{Deserialize, Serialize};

use crate::error::{PchaosError, Result};
use crate::polynomials::PolynomialFamily;
use crate::univariate::{self, QuadratureRule1D};

/// Probability distribution of a random parameter
///
/// Deserialization runs [`Distribution::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase", try_from = "DistributionFields")]
pub enum Distribution {
    /// Normal distribution N(mu, sigma²), Hermite basis
    Normal { mu: f64, sigma: f64 },
    /// Uniform distribution on [a, b], Legendre basis
    Uniform { a: f64, b: f64 },
    /// Exponential distribution shifted by mu with scale beta, Laguerre basis
    Exponential { mu: f64, beta: f64 },
}

/// Unchecked mirror of [`Distribution`] read from serialized data
#[derive(Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
enum DistributionFields {
    Normal { mu: f64, sigma: f64 },
    Uniform { a: f64, b: f64 },
    Exponential { mu: f64, beta: f64 },
}

impl TryFrom<DistributionFields> for Distribution {
    type Error = PchaosError;

    fn try_from(fields: DistributionFields) -> Result<Self> {
        let distribution = match fields {
            DistributionFields::Normal { mu, sigma } => Distribution::Normal { mu, sigma },
            DistributionFields::Uniform { a, b } => Distribution::Uniform { a, b },
            DistributionFields::Exponential { mu, beta } => Distribution::Exponential { mu, beta },
        };
        distribution.validate()?;
        Ok(distribution)
    }
}

impl Distribution {
    /// Polynomial family orthogonal under this distribution
    pub fn family(&self) -> PolynomialFamily {
        match self {
            Distribution::Normal { .. } => PolynomialFamily::Hermite,
            Distribution::Uniform { .. } => PolynomialFamily::Legendre,
            Distribution::Exponential { .. } => PolynomialFamily::Laguerre,
        }
    }

    /// Check that the distribution parameters describe a proper distribution
    pub fn validate(&self) -> Result<()> {
        match *self {
            Distribution::Normal { mu, sigma } => {
                if !mu.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
                    return Err(PchaosError::InvalidDistribution(format!(
                        "normal requires finite mu and sigma > 0, got mu={}, sigma={}",
                        mu, sigma
                    )));
                }
            }
            Distribution::Uniform { a, b } => {
                if !a.is_finite() || !b.is_finite() || a >= b {
                    return Err(PchaosError::InvalidDistribution(format!(
                        "uniform requires finite a < b, got a={}, b={}",
                        a, b
                    )));
                }
            }
            Distribution::Exponential { mu, beta } => {
                if !mu.is_finite() || !beta.is_finite() || beta <= 0.0 {
                    return Err(PchaosError::InvalidDistribution(format!(
                        "exponential requires finite mu and beta > 0, got mu={}, beta={}",
                        mu, beta
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn mean(&self) -> f64 {
        match *self {
            Distribution::Normal { mu, .. } => mu,
            Distribution::Uniform { a, b } => 0.5 * (a + b),
            Distribution::Exponential { mu, beta } => mu + beta,
        }
    }

    pub fn variance(&self) -> f64 {
        match *self {
            Distribution::Normal { sigma, .. } => sigma * sigma,
            Distribution::Uniform { a, b } => (b - a) * (b - a) / 12.0,
            Distribution::Exponential { beta, .. } => beta * beta,
        }
    }

    /// Map a standardized coordinate to the physical domain
    pub fn to_physical(&self, z: f64) -> f64 {
        match *self {
            Distribution::Normal { mu, sigma } => mu + sigma * z,
            Distribution::Uniform { a, b } => a + (b - a) * z,
            Distribution::Exponential { mu, beta } => mu + beta * z,
        }
    }

    /// Map a physical value to the standardized coordinate
    pub fn to_standard(&self, y: f64) -> f64 {
        match *self {
            Distribution::Normal { mu, sigma } => (y - mu) / sigma,
            Distribution::Uniform { a, b } => (y - a) / (b - a),
            Distribution::Exponential { mu, beta } => (y - mu) / beta,
        }
    }

    /// Quadrature rule with `npoints` nodes; the order is not checked here.
    fn rule(&self, npoints: usize) -> QuadratureRule1D {
        match *self {
            Distribution::Normal { mu, sigma } => univariate::hermite_rule(npoints, mu, sigma),
            Distribution::Uniform { a, b } => univariate::legendre_rule(npoints, a, b),
            Distribution::Exponential { mu, beta } => {
                univariate::laguerre_rule(npoints, mu, beta)
            }
        }
    }
}

/// Capability set shared by every random parameter
///
/// Implementations must be pure: `quadrature` and `basis` depend only on
/// their inputs and the parameter's immutable state.
pub trait StochasticParameter: Send + Sync + std::fmt::Debug {
    /// Dimension index of the parameter inside its container
    fn id(&self) -> usize;

    /// Optional human-readable name
    fn name(&self) -> Option<&str> {
        None
    }

    /// Highest polynomial degree used for this parameter in the expansion
    fn max_degree(&self) -> usize;

    /// Orthogonal polynomial family of the parameter
    fn family(&self) -> PolynomialFamily;

    /// Univariate quadrature rule with `npoints` nodes
    fn quadrature(&self, npoints: usize) -> Result<QuadratureRule1D>;

    /// Orthonormal basis polynomial of the given degree at standardized `z`
    fn basis(&self, z: f64, degree: usize) -> f64 {
        self.family().evaluate(z, degree)
    }
}

/// A random parameter with one of the built-in distributions
///
/// Without its own quadrature ceiling the parameter accepts any order
/// `>= 1`; inside a container the container's configured ceiling applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RandomParameterFields")]
pub struct RandomParameter {
    id: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    distribution: Distribution,
    max_degree: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_quadrature_order: Option<usize>,
}

/// Unchecked mirror of [`RandomParameter`] read from serialized data
#[derive(Deserialize)]
struct RandomParameterFields {
    id: usize,
    #[serde(default)]
    name: Option<String>,
    distribution: Distribution,
    max_degree: usize,
    #[serde(default)]
    max_quadrature_order: Option<usize>,
}

impl TryFrom<RandomParameterFields> for RandomParameter {
    type Error = PchaosError;

    fn try_from(fields: RandomParameterFields) -> Result<Self> {
        if fields.max_quadrature_order == Some(0) {
            return Err(PchaosError::InvalidConfig(format!(
                "parameter {} has max_quadrature_order 0",
                fields.id
            )));
        }
        let mut param = RandomParameter::new(fields.id, fields.distribution, fields.max_degree)?;
        param.name = fields.name;
        param.max_quadrature_order = fields.max_quadrature_order;
        Ok(param)
    }
}

impl RandomParameter {
    /// Create a parameter after validating its distribution.
    pub fn new(id: usize, distribution: Distribution, max_degree: usize) -> Result<Self> {
        distribution.validate()?;
        Ok(Self {
            id,
            name: None,
            distribution,
            max_degree,
            max_quadrature_order: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Cap the quadrature orders this parameter will produce on its own.
    pub fn with_max_quadrature_order(mut self, max_quadrature_order: usize) -> Self {
        self.max_quadrature_order = Some(max_quadrature_order);
        self
    }

    pub fn set_id(&mut self, id: usize) {
        self.id = id;
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn max_quadrature_order(&self) -> Option<usize> {
        self.max_quadrature_order
    }
}

impl StochasticParameter for RandomParameter {
    fn id(&self) -> usize {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn max_degree(&self) -> usize {
        self.max_degree
    }

    fn family(&self) -> PolynomialFamily {
        self.distribution.family()
    }

    fn quadrature(&self, npoints: usize) -> Result<QuadratureRule1D> {
        univariate::check_order(npoints, self.max_quadrature_order.unwrap_or(usize::MAX))?;
        Ok(self.distribution.rule(npoints))
    }
}

/// Creates random parameters with sequential ids starting at zero
#[derive(Debug, Default)]
pub struct ParameterFactory {
    next_id: usize,
}

impl ParameterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_parameter_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a parameter, consuming an id only when the distribution is valid.
    pub fn create(
        &mut self,
        distribution: Distribution,
        max_degree: usize,
    ) -> Result<RandomParameter> {
        distribution.validate()?;
        let id = self.next_parameter_id();
        RandomParameter::new(id, distribution, max_degree)
    }

    pub fn create_normal(
        &mut self,
        mu: f64,
        sigma: f64,
        max_degree: usize,
    ) -> Result<RandomParameter> {
        self.create(Distribution::Normal { mu, sigma }, max_degree)
    }

    pub fn create_uniform(
        &mut self,
        a: f64,
        b: f64,
        max_degree: usize,
    ) -> Result<RandomParameter> {
        self.create(Distribution::Uniform { a, b }, max_degree)
    }

    pub fn create_exponential(
        &mut self,
        mu: f64,
        beta: f64,
        max_degree: usize,
    ) -> Result<RandomParameter> {
        self.create(Distribution::Exponential { mu, beta }, max_degree)
    }

    pub fn create_normal_named(
        &mut self,
        name: &str,
        mu: f64,
        sigma: f64,
        max_degree: usize,
    ) -> Result<RandomParameter> {
        Ok(self.create_normal(mu, sigma, max_degree)?.with_name(name))
    }

    pub fn create_uniform_named(
        &mut self,
        name: &str,
        a: f64,
        b: f64,
        max_degree: usize,
    ) -> Result<RandomParameter> {
        Ok(self.create_uniform(a, b, max_degree)?.with_name(name))
    }

    pub fn create_exponential_named(
        &mut self,
        name: &str,
        mu: f64,
        beta: f64,
        max_degree: usize,
    ) -> Result<RandomParameter> {
        Ok(self.create_exponential(mu, beta, max_degree)?.with_name(name))
    }
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
