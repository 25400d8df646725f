//! # pchaos-rust: polynomial chaos bases and quadrature
//!
//! Building blocks for generalized polynomial chaos (gPC) uncertainty
//! quantification: random parameters with normal, uniform or exponential
//! distributions, their orthonormal polynomial bases and Gauss quadrature
//! rules, and a container that combines them into a multivariate basis and
//! a tensor-product quadrature for stochastic Galerkin or projection codes.

pub mod basis_index;
pub mod config;
pub mod container;
pub mod error;
pub mod gauss;
pub mod parameter;
pub mod polynomials;
pub mod projection; // Spectral projection and moments
pub mod sparsity; // Galerkin block sparsity
pub mod tensor_product;
pub mod univariate;

// Re-export commonly used types and functions
pub use basis_index::{tensor_cardinality, BasisIndexSet};
pub use config::{BasisType, ContainerConfig};
pub use container::ParameterContainer;
pub use error::{PchaosError, Result};
pub use gauss::Rule;
pub use parameter::{Distribution, ParameterFactory, RandomParameter, StochasticParameter};
pub use polynomials::PolynomialFamily;
pub use projection::Moments;
pub use sparsity::{nonzero, sparse_mask, SparsityPattern};
pub use tensor_product::TensorQuadrature;
pub use univariate::QuadratureRule1D;

// Re-export external dependencies for convenience
pub use mdarray::DTensor;
