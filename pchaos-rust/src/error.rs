//! Error types for basis, quadrature and container operations

/// Errors reported by the polynomial chaos machinery.
///
/// Variants fall into three groups: configuration errors (bad inputs or
/// limits), sequencing errors (queries before initialization) and
/// consistency errors (derived arrays that violate their invariants).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PchaosError {
    #[error("Quadrature order {order} is outside the supported range 1..={max}")]
    UnsupportedQuadratureOrder { order: usize, max: usize },
    #[error("Parameter container is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
    #[error("Duplicate parameter id {0}")]
    DuplicateParameterId(usize),
    #[error("Parameter ids must cover 0..{expected}, found id {found}")]
    NonContiguousParameterIds { expected: usize, found: usize },
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Expected {expected} entries, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("No parameters have been registered")]
    NoParameters,
    #[error("Basis has not been initialized")]
    BasisNotInitialized,
    #[error("Quadrature has not been initialized")]
    QuadratureNotInitialized,
    #[error("Basis term {term} is out of range (number of terms: {count})")]
    TermOutOfRange { term: usize, count: usize },
    #[error("Quadrature point {point} is out of range (number of points: {count})")]
    PointOutOfRange { point: usize, count: usize },
    #[error("Basis has {found} terms, expected {expected} from the tensor product")]
    TermCountMismatch { expected: usize, found: usize },
    #[error("Quadrature weights sum to {found}, expected {expected}")]
    WeightNormalization { expected: f64, found: f64 },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PchaosError>;

impl PchaosError {
    /// True for errors caused by calling queries before initialization
    pub fn is_sequencing(&self) -> bool {
        matches!(
            self,
            PchaosError::NoParameters
                | PchaosError::BasisNotInitialized
                | PchaosError::QuadratureNotInitialized
                | PchaosError::TermOutOfRange { .. }
                | PchaosError::PointOutOfRange { .. }
        )
    }

    /// True for errors where derived arrays violate their invariants
    pub fn is_consistency(&self) -> bool {
        matches!(
            self,
            PchaosError::TermCountMismatch { .. } | PchaosError::WeightNormalization { .. }
        )
    }
}

/// Check that a caller-provided slice has the expected length.
pub(crate) fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(PchaosError::DimensionMismatch { expected, found });
    }
    Ok(())
}
