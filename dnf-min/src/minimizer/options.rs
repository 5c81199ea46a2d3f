// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Options controlling a [`Minimizer`](super::Minimizer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinimizeOptions {
    max_cover_candidates: Option<usize>,
}

impl MinimizeOptions {
    /// The default limit on the number of prime implicants the cover search will enumerate
    /// subsets of.
    pub const DEFAULT_MAX_COVER_CANDIDATES: usize = 24;

    pub fn new() -> Self {
        Self {
            max_cover_candidates: Some(Self::DEFAULT_MAX_COVER_CANDIDATES),
        }
    }

    /// Fails the cover search instead of running it when there are more than `limit` prime
    /// implicants.
    pub fn with_max_cover_candidates(mut self, limit: usize) -> Self {
        self.max_cover_candidates = Some(limit);
        self
    }

    /// Removes the limit on the cover search. The search is exponential in the number of prime
    /// implicants.
    pub fn unbounded(mut self) -> Self {
        self.max_cover_candidates = None;
        self
    }

    #[inline]
    pub fn max_cover_candidates(&self) -> Option<usize> {
        self.max_cover_candidates
    }
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self::new()
    }
}
