// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::implicant::Implicant;
use bitvec::prelude::*;
use once_cell::sync::OnceCell;

/// Cache for data derived from the current generation of implicants.
#[derive(Clone, Debug, Default)]
pub(super) struct MinimizerCache {
    coverage: OnceCell<Vec<BitVec>>,
}

impl MinimizerCache {
    pub(super) fn invalidate(&mut self) {
        self.coverage = OnceCell::new();
    }

    /// Returns, for each implicant, the set of table rows it covers.
    pub(super) fn get_or_init_coverage(
        &self,
        implicants: &[Implicant],
        row_count: usize,
    ) -> &[BitVec] {
        self.coverage
            .get_or_init(|| {
                implicants
                    .iter()
                    .map(|implicant| {
                        let mut rows = bitvec![0; row_count];
                        for row in implicant.covered_rows(row_count) {
                            rows.set(row, true);
                        }
                        rows
                    })
                    .collect()
            })
            .as_slice()
    }
}
