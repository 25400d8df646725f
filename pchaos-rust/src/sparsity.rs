//! Banded sparsity of stochastic Galerkin operators
//!
//! A block `(i, j)` of a Galerkin matrix can only be nonzero when the
//! degree tuples of terms `i` and `j` differ by at most the bandwidth in
//! every dimension. A linear dependence on a parameter gives bandwidth 1
//! for that dimension, a quadratic one gives 2, and so on.

use mdarray::DTensor;

use crate::basis_index::BasisIndexSet;

/// True iff `|row_i − col_i| <= bandwidth_i` for every dimension.
///
/// # Panics
/// Panics if `col` or `bandwidth` is shorter than `row`.
pub fn nonzero(row: &[usize], col: &[usize], bandwidth: &[usize]) -> bool {
    (0..row.len()).all(|i| row[i].abs_diff(col[i]) <= bandwidth[i])
}

/// Per-dimension verdicts of [`nonzero`]
pub fn sparse_mask(row: &[usize], col: &[usize], bandwidth: &[usize]) -> Vec<bool> {
    (0..row.len())
        .map(|i| row[i].abs_diff(col[i]) <= bandwidth[i])
        .collect()
}

/// Block nonzero pattern of a Galerkin matrix over a basis
#[derive(Debug, Clone)]
pub struct SparsityPattern {
    mask: DTensor<bool, 2>,
}

impl SparsityPattern {
    /// Evaluate [`nonzero`] for every pair of basis terms.
    ///
    /// # Panics
    /// Panics if `bandwidth` is shorter than the number of basis variables.
    pub fn from_basis(basis: &BasisIndexSet, bandwidth: &[usize]) -> Self {
        let nterms = basis.num_terms();
        let tuples: Vec<Vec<usize>> = basis.iter().collect();
        let mask = DTensor::<bool, 2>::from_fn([nterms, nterms], |idx| {
            nonzero(&tuples[idx[0]], &tuples[idx[1]], bandwidth)
        });
        Self { mask }
    }

    /// Number of basis terms along each side
    pub fn size(&self) -> usize {
        self.mask.shape().0
    }

    pub fn is_nonzero(&self, row: usize, col: usize) -> bool {
        self.mask[[row, col]]
    }

    /// Number of nonzero blocks
    pub fn nnz(&self) -> usize {
        let n = self.size();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.mask[[i, j]])
            .count()
    }

    /// Column indices of the nonzero blocks in `row`
    pub fn row_nonzeros(&self, row: usize) -> Vec<usize> {
        (0..self.size()).filter(|&j| self.mask[[row, j]]).collect()
    }
}
