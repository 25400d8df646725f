//! Parameter container configuration
//!
//! Registration capacity and the largest univariate quadrature order are
//! plain configuration rather than fixed limits. The defaults keep the
//! parameter capacity at five and allow computed Gauss rules up to order 64.

use serde::{Deserialize, Serialize};

use crate::error::{PchaosError, Result};

/// Default registration capacity of a container
pub const DEFAULT_MAX_PARAMETERS: usize = 5;

/// Default ceiling for univariate quadrature orders
pub const DEFAULT_MAX_QUADRATURE_ORDER: usize = 64;

/// Default relative tolerance for the tensor weight-sum check
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 1e-10;

/// Rule used to enumerate the multivariate degree set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisType {
    /// Full tensor grid of degrees, `∏(1 + pmax_i)` terms
    #[default]
    Tensor,
    /// Tensor grid restricted to total degree `<= max(pmax)`
    Complete,
}

impl BasisType {
    pub fn as_str(self) -> &'static str {
        match self {
            BasisType::Tensor => "tensor",
            BasisType::Complete => "complete",
        }
    }
}

/// Configuration for a [`ParameterContainer`](crate::ParameterContainer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Maximum number of parameters that can be registered
    pub max_parameters: usize,
    /// Largest accepted univariate quadrature order
    pub max_quadrature_order: usize,
    /// Multivariate basis construction
    pub basis_type: BasisType,
    /// Relative tolerance used when checking `Σ W == ∏ Σ w_i`
    pub weight_tolerance: f64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_parameters: DEFAULT_MAX_PARAMETERS,
            max_quadrature_order: DEFAULT_MAX_QUADRATURE_ORDER,
            basis_type: BasisType::Tensor,
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
        }
    }
}

impl ContainerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_parameters(mut self, max_parameters: usize) -> Self {
        self.max_parameters = max_parameters;
        self
    }

    pub fn with_max_quadrature_order(mut self, max_quadrature_order: usize) -> Self {
        self.max_quadrature_order = max_quadrature_order;
        self
    }

    pub fn with_basis_type(mut self, basis_type: BasisType) -> Self {
        self.basis_type = basis_type;
        self
    }

    pub fn with_weight_tolerance(mut self, weight_tolerance: f64) -> Self {
        self.weight_tolerance = weight_tolerance;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| PchaosError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PchaosError::InvalidConfig(e.to_string()))
    }

    /// Check that all limits are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_parameters == 0 {
            return Err(PchaosError::InvalidConfig(
                "max_parameters must be at least 1".to_string(),
            ));
        }
        if self.max_quadrature_order == 0 {
            return Err(PchaosError::InvalidConfig(
                "max_quadrature_order must be at least 1".to_string(),
            ));
        }
        if !(self.weight_tolerance.is_finite() && self.weight_tolerance > 0.0) {
            return Err(PchaosError::InvalidConfig(format!(
                "weight_tolerance must be positive, got {}",
                self.weight_tolerance
            )));
        }
        Ok(())
    }
}
