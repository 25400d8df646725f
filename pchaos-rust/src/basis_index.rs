//! Multivariate degree index sets for polynomial chaos expansions
//!
//! Each basis term is identified by a tuple of per-parameter degrees. The
//! set is graded: terms are grouped by total degree in ascending order, so
//! term 0 is always the constant polynomial (its coefficient is the mean of
//! an expansion). Inside a group tuples are ordered lexicographically with
//! parameter 0 most significant.

use mdarray::DTensor;

use crate::config::BasisType;
use crate::error::{PchaosError, Result};

/// Degree tuples of a multivariate polynomial basis, stored as a contiguous
/// `[num_terms, num_vars]` table.
#[derive(Debug, Clone)]
pub struct BasisIndexSet {
    kind: BasisType,
    max_degrees: Vec<usize>,
    dindex: DTensor<usize, 2>,
}

/// Number of terms in the full tensor basis, `∏(1 + pmax_i)`.
pub fn tensor_cardinality(pmax: &[usize]) -> Result<usize> {
    pmax.iter().try_fold(1usize, |acc, &p| {
        p.checked_add(1).and_then(|r| acc.checked_mul(r)).ok_or_else(|| {
            PchaosError::InvalidConfig(format!("tensor basis for degrees {:?} is too large", pmax))
        })
    })
}

/// Advance a mixed-radix counter in lexicographic order (last digit fastest).
///
/// Returns `false` once the counter wraps around to all zeros.
pub(crate) fn increment_mixed_radix(digits: &mut [usize], radices: &[usize]) -> bool {
    for i in (0..digits.len()).rev() {
        digits[i] += 1;
        if digits[i] < radices[i] {
            return true;
        }
        digits[i] = 0;
    }
    false
}

impl BasisIndexSet {
    /// Build the index set for the given construction rule.
    pub fn build(kind: BasisType, pmax: &[usize]) -> Result<Self> {
        match kind {
            BasisType::Tensor => Self::tensor(pmax),
            BasisType::Complete => Self::complete(pmax),
        }
    }

    /// Full tensor-product degree set: every tuple with `0 <= d_i <= pmax_i`.
    pub fn tensor(pmax: &[usize]) -> Result<Self> {
        let limit = pmax.iter().sum();
        Self::graded(BasisType::Tensor, pmax, limit)
    }

    /// Tensor degree set restricted to total degree `<= max(pmax)`.
    pub fn complete(pmax: &[usize]) -> Result<Self> {
        let limit = pmax.iter().copied().max().unwrap_or(0);
        Self::graded(BasisType::Complete, pmax, limit)
    }

    fn graded(kind: BasisType, pmax: &[usize], max_total: usize) -> Result<Self> {
        let nvars = pmax.len();
        if nvars == 0 {
            return Err(PchaosError::NoParameters);
        }

        let capacity = tensor_cardinality(pmax)?;
        let radices: Vec<usize> = pmax.iter().map(|&p| p + 1).collect();
        let mut tuples: Vec<Vec<usize>> = Vec::with_capacity(capacity);
        let mut digits = vec![0usize; nvars];
        loop {
            if digits.iter().sum::<usize>() <= max_total {
                tuples.push(digits.clone());
            }
            if !increment_mixed_radix(&mut digits, &radices) {
                break;
            }
        }

        // Stable sort keeps the lexicographic order inside each degree group
        tuples.sort_by_key(|t| t.iter().sum::<usize>());

        let dindex = DTensor::<usize, 2>::from_fn([tuples.len(), nvars], |idx| {
            tuples[idx[0]][idx[1]]
        });

        Ok(Self {
            kind,
            max_degrees: pmax.to_vec(),
            dindex,
        })
    }

    pub fn kind(&self) -> BasisType {
        self.kind
    }

    pub fn num_terms(&self) -> usize {
        self.dindex.shape().0
    }

    pub fn num_vars(&self) -> usize {
        self.max_degrees.len()
    }

    /// Maximum degree of each parameter used to build the set
    pub fn max_degrees(&self) -> &[usize] {
        &self.max_degrees
    }

    /// Degree of parameter `var` in basis term `term`
    ///
    /// # Panics
    /// Panics if `term` or `var` is out of range.
    pub fn degree(&self, term: usize, var: usize) -> usize {
        self.dindex[[term, var]]
    }

    /// Copy the degree tuple of `term` into the leading entries of `out`.
    ///
    /// # Panics
    /// Panics if `term` is out of range.
    pub fn degrees_into(&self, term: usize, out: &mut [usize]) {
        for (i, d) in out.iter_mut().take(self.num_vars()).enumerate() {
            *d = self.dindex[[term, i]];
        }
    }

    /// Degree tuple of `term`
    pub fn degrees(&self, term: usize) -> Vec<usize> {
        (0..self.num_vars()).map(|i| self.dindex[[term, i]]).collect()
    }

    /// Sum of the degrees of `term`
    pub fn total_degree(&self, term: usize) -> usize {
        (0..self.num_vars()).map(|i| self.dindex[[term, i]]).sum()
    }

    /// Iterate over all degree tuples in basis order
    pub fn iter(&self) -> impl Iterator<Item = Vec<usize>> + '_ {
        (0..self.num_terms()).map(move |k| self.degrees(k))
    }
}
