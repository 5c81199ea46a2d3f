// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// The input string could not be turned into a truth table.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidTruthTable {
    #[error("truth table is empty")]
    Empty,

    #[error("input size {len} is not a power of two")]
    NotPowerOfTwo { len: usize },

    #[error(
        "truth table has {variables} variables, at most {} are supported",
        crate::truth_table::MAX_VARIABLES
    )]
    TooManyVariables { variables: usize },
}

/// The minimal-cover search was asked to enumerate more implicants than allowed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("cover search over {candidates} prime implicants exceeds the limit of {limit}")]
pub struct CoverSearchLimitExceeded {
    pub candidates: usize,
    pub limit: usize,
}

/// Errors returned by [`Minimizer::minimize`](crate::minimizer::Minimizer::minimize).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MinimizeError {
    #[error(transparent)]
    CoverSearch(#[from] CoverSearchLimitExceeded),
}
