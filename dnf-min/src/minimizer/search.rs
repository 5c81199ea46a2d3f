// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::CoverSearchLimitExceeded, minimizer::Minimizer};
use bitvec::prelude::*;
use itertools::Itertools;

impl Minimizer {
    /// Searches for the largest set of implicants that can be dropped while still covering every
    /// required row.
    ///
    /// Exclusion sets of size `k = 1, 2, ...` are tried in lexicographic order of their implicant
    /// indexes, and the first one preserving coverage wins for that size. The search stops at the
    /// first size for which no exclusion set works, so the result is minimal with respect to this
    /// enumeration rather than a proven minimum set cover.
    ///
    /// Returns the winning exclusion mask, with no bits set if no implicant can be dropped.
    pub fn minimal_exclusion(&self) -> Result<BitVec, CoverSearchLimitExceeded> {
        let candidates = self.implicant_count();
        if let Some(limit) = self.options().max_cover_candidates() {
            if candidates > limit {
                return Err(CoverSearchLimitExceeded { candidates, limit });
            }
        }

        let mut best = bitvec![0; candidates];
        for exclude_count in 1..candidates {
            let found = (0..candidates)
                .combinations(exclude_count)
                .map(|excluded_ixs| {
                    let mut excluded = bitvec![0; candidates];
                    for ix in excluded_ixs {
                        excluded.set(ix, true);
                    }
                    excluded
                })
                .find(|excluded| self.full_coverage(excluded));

            match found {
                Some(excluded) => {
                    log::info!(
                        "minimized table down to {} rows",
                        candidates - exclude_count
                    );
                    best = excluded;
                }
                None => break,
            }
        }

        log::info!("minimizing done");
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_redundant_implicant() {
        let mut minimizer = Minimizer::new("0110").unwrap();
        minimizer.merge_phase();
        assert_eq!(minimizer.implicant_count(), 2);
        assert_eq!(minimizer.minimal_exclusion().unwrap(), bitvec![0, 0]);
    }

    #[test]
    fn test_first_combination_wins() {
        // Before merging, each row of "1111" has its own implicant and none can be dropped.
        let minimizer = Minimizer::new("1111").unwrap();
        assert_eq!(minimizer.minimal_exclusion().unwrap(), bitvec![0, 0, 0, 0]);

        // After merging only the universe is left.
        let mut minimizer = Minimizer::new("1111").unwrap();
        minimizer.merge_phase();
        assert_eq!(minimizer.implicant_count(), 1);
        assert_eq!(minimizer.minimal_exclusion().unwrap(), bitvec![0]);
    }

    #[test]
    fn test_dont_care_only_implicants_dropped() {
        // Implicants: 0 (dc), 1, 2, 3 (dc). Without merging, both don't-care minterms are
        // redundant.
        let minimizer = Minimizer::new("-11-").unwrap();
        assert_eq!(minimizer.implicant_count(), 4);
        assert_eq!(minimizer.minimal_exclusion().unwrap(), bitvec![1, 0, 0, 1]);
    }
}
