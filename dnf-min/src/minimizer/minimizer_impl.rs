// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{CoverSearchLimitExceeded, InvalidTruthTable, MinimizeError},
    implicant::Implicant,
    minimizer::{AttributeTable, CoverageTable, MinimizeOptions, MinimizeTrace, Terms},
    truth_table::{RowValue, TruthTable},
};
use bitvec::prelude::*;

use super::caches::MinimizerCache;

/// Minimizes a truth table into a sum of products by merging implicants, then searching for a
/// minimal cover among the prime implicants.
#[derive(Clone, Debug)]
pub struct Minimizer {
    table: TruthTable,
    implicants: Vec<Implicant>,
    options: MinimizeOptions,
    cache: MinimizerCache,
}

impl Minimizer {
    /// Parses `input` as a truth table and creates one implicant per `1` or `-` row.
    pub fn new(input: &str) -> Result<Self, InvalidTruthTable> {
        Ok(Self::from_table(TruthTable::parse(input)?))
    }

    pub fn from_table(table: TruthTable) -> Self {
        let implicants = table
            .candidate_rows()
            .map(|(row, value)| Implicant::minterm(row as u32, value == RowValue::DontCare))
            .collect();
        Self {
            table,
            implicants,
            options: MinimizeOptions::default(),
            cache: MinimizerCache::default(),
        }
    }

    pub fn with_options(mut self, options: MinimizeOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn options(&self) -> &MinimizeOptions {
        &self.options
    }

    #[inline]
    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    /// Returns the current generation of implicants.
    #[inline]
    pub fn implicants(&self) -> &[Implicant] {
        &self.implicants
    }

    #[inline]
    pub fn implicant_count(&self) -> usize {
        self.implicants.len()
    }

    /// Runs one merge round, replacing the current generation with the next one.
    ///
    /// Every mergeable pair produces a merged implicant (deduplicated by term); implicants that
    /// took part in no merge are carried over unchanged. Returns the number of merges performed,
    /// duplicates included.
    pub fn step(&mut self) -> usize {
        let len = self.implicants.len();
        let mut next: Vec<Implicant> = Vec::with_capacity(len);
        let mut merge_count = 0;

        for i in 0..len {
            for j in 0..len {
                if !Implicant::can_merge(&self.implicants[i], &self.implicants[j]) {
                    continue;
                }
                log::debug!("merging implicants {} and {}", i, j);
                let (a, b) = pair_mut(&mut self.implicants, i, j);
                let merged = Implicant::merge(a, b);
                if !next.iter().any(|elem| elem.same_term(&merged)) {
                    next.push(merged);
                }
                merge_count += 1;
            }
        }

        next.extend(self.implicants.iter().filter(|elem| !elem.merged).copied());
        self.implicants = next;
        self.cache.invalidate();

        log::debug!(
            "merged {} implicant pairs, {} implicants in next generation",
            merge_count,
            self.implicants.len()
        );
        merge_count
    }

    /// Repeats [`Self::step`] until a round merges nothing. Afterwards every implicant is prime.
    ///
    /// Returns the number of rounds that merged at least one pair.
    pub fn merge_phase(&mut self) -> usize {
        self.merge_rounds(|_| {})
    }

    fn merge_rounds(&mut self, mut on_generation: impl FnMut(&Self)) -> usize {
        let mut rounds = 0;
        while self.step() != 0 {
            rounds += 1;
            on_generation(&*self);
        }
        log::info!(
            "merge phase done after {} rounds: {} prime implicants",
            rounds,
            self.implicants.len()
        );
        rounds
    }

    /// Returns true if the implicants not marked in `excluded` cover every required row.
    ///
    /// Don't-care and `0` rows are never required.
    ///
    /// Panics if `excluded` doesn't have one bit per implicant.
    pub fn full_coverage(&self, excluded: &BitSlice) -> bool {
        assert_eq!(
            excluded.len(),
            self.implicants.len(),
            "exclusion mask must have one bit per implicant"
        );
        let coverage = self.coverage();
        self.table.required_rows().all(|row| {
            coverage
                .iter()
                .enumerate()
                .any(|(ix, rows)| !excluded[ix] && rows[row])
        })
    }

    /// Runs the minimal-cover search once and removes the implicants it excludes.
    ///
    /// Returns the exclusion mask that was applied, relative to the implicants before removal.
    pub fn reduce_cover(&mut self) -> Result<BitVec, CoverSearchLimitExceeded> {
        let excluded = self.minimal_exclusion()?;
        self.remove_excluded(&excluded);
        Ok(excluded)
    }

    /// Runs the merge phase followed by cover reduction.
    ///
    /// The returned trace describes every intermediate generation along with the coverage tables
    /// before and after reduction.
    pub fn minimize(&mut self) -> Result<MinimizeTrace, MinimizeError> {
        let mut generations = Vec::new();
        let merge_rounds =
            self.merge_rounds(|minimizer| generations.push(minimizer.attribute_table()));

        let primes = self.current_coverage_table();
        let excluded = self.minimal_exclusion()?;
        let minimized = self.coverage_table(&excluded);
        self.remove_excluded(&excluded);

        Ok(MinimizeTrace {
            generations,
            merge_rounds,
            primes,
            excluded,
            minimized,
        })
    }

    /// Returns the current implicants as a list of terms.
    #[inline]
    pub fn terms(&self) -> Terms<'_> {
        Terms::new(&self.implicants, self.table.variable_count())
    }

    /// Returns the attributes of the current generation.
    pub fn attribute_table(&self) -> AttributeTable {
        AttributeTable::new(&self.implicants)
    }

    /// Returns which rows each implicant not marked in `excluded` covers.
    pub fn coverage_table(&self, excluded: &BitSlice) -> CoverageTable {
        CoverageTable::new(&self.table, &self.implicants, excluded)
    }

    /// Returns which rows each current implicant covers.
    pub fn current_coverage_table(&self) -> CoverageTable {
        self.coverage_table(&bitvec![0; self.implicants.len()])
    }

    /// Evaluates the sum of the current implicants on `row`.
    pub fn evaluate(&self, row: usize) -> bool {
        self.implicants.iter().any(|elem| elem.covers(row))
    }

    /// Checks the current implicants against the truth table.
    ///
    /// Returns the first row that is either required but uncovered, or `0` but covered.
    pub fn check_cover(&self) -> Result<(), usize> {
        for (row, &value) in self.table.rows().iter().enumerate() {
            let covered = self.evaluate(row);
            match value {
                RowValue::On if !covered => return Err(row),
                RowValue::Off if covered => return Err(row),
                _ => {}
            }
        }
        Ok(())
    }

    // ---
    // Helper methods
    // ---

    #[inline]
    fn coverage(&self) -> &[BitVec] {
        self.cache.get_or_init_coverage(&self.implicants, self.table.len())
    }

    fn remove_excluded(&mut self, excluded: &BitSlice) {
        let mut ix = 0;
        self.implicants.retain(|_| {
            let keep = !excluded[ix];
            ix += 1;
            keep
        });
        self.cache.invalidate();
    }
}

fn pair_mut<T>(slice: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j, "indexes must be distinct");
    if i < j {
        let (left, right) = slice.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn terms_of(minimizer: &Minimizer) -> Vec<String> {
        minimizer.terms().lines().collect()
    }

    #[test]
    fn test_two_variables() {
        let mut minimizer = Minimizer::new("0111").unwrap();
        let values: Vec<_> = minimizer.implicants().iter().map(|i| i.value).collect();
        assert_eq!(values, vec![0b01, 0b10, 0b11]);

        assert_eq!(minimizer.step(), 2, "1 & 3 and 2 & 3 merge");
        let terms: Vec<_> = minimizer
            .implicants()
            .iter()
            .map(|i| (i.value, i.mask))
            .collect();
        assert_eq!(terms, vec![(0b01, 0b10), (0b10, 0b01)], "row 3 was merged away");
        assert_eq!(minimizer.step(), 0);

        let excluded = minimizer.reduce_cover().unwrap();
        assert!(excluded.not_any(), "neither term is redundant");
        assert_eq!(terms_of(&minimizer), vec!["-1", "1-"]);
        assert_eq!(minimizer.terms().algebraic().to_string(), "a + b");
        minimizer.check_cover().unwrap();
    }

    #[test]
    fn test_dont_cares_relax_cover() {
        let mut minimizer = Minimizer::new("-1-1").unwrap();
        let trace = minimizer.minimize().unwrap();
        assert_eq!(trace.merge_rounds, 2);
        assert_eq!(trace.generations.len(), 2);
        assert_eq!(trace.generations[0].columns().len(), 4);

        assert_eq!(minimizer.implicant_count(), 1);
        let implicant = minimizer.implicants()[0];
        assert_eq!(implicant.mask, 0b11);
        assert!(implicant.spans_dont_care);
        assert_eq!(terms_of(&minimizer), vec!["--"]);
        minimizer.check_cover().unwrap();
    }

    #[test]
    fn test_single_row() {
        for input in ["1", "-"] {
            let mut minimizer = Minimizer::new(input).unwrap();
            let trace = minimizer.minimize().unwrap();
            assert_eq!(trace.merge_rounds, 0);
            assert_eq!(minimizer.implicant_count(), 1, "input {}", input);

            let implicant = minimizer.implicants()[0];
            assert_eq!(implicant.value, 0);
            assert_eq!(implicant.mask, 0);
            assert!(!implicant.merged);
            assert_eq!(implicant.spans_dont_care, input == "-");
        }
    }

    #[test]
    fn test_no_candidates() {
        let mut minimizer = Minimizer::new("0000").unwrap();
        let trace = minimizer.minimize().unwrap();
        assert_eq!(trace.merge_rounds, 0);
        assert_eq!(minimizer.implicant_count(), 0);
        assert_eq!(minimizer.terms().algebraic().to_string(), "0");
        minimizer.check_cover().unwrap();
    }

    #[test]
    fn test_cyclic_core() {
        // f = m(0, 1, 2, 5, 6, 7) has six prime implicants and two minimal covers of size 3.
        let mut minimizer = Minimizer::new("11100111").unwrap();
        assert_eq!(minimizer.merge_phase(), 1);
        assert_eq!(minimizer.implicant_count(), 6);
        assert!(minimizer.full_coverage(&bitvec![0; 6]));
        assert!(minimizer.full_coverage(&bitvec![1, 0, 0, 0, 0, 0]));
        assert!(!minimizer.full_coverage(&bitvec![1, 1, 0, 0, 0, 0]));

        let excluded = minimizer.reduce_cover().unwrap();
        assert_eq!(excluded, bitvec![1, 0, 0, 1, 1, 0]);
        assert_eq!(terms_of(&minimizer), vec!["0-0", "-01", "11-"]);
        assert_eq!(
            minimizer.terms().algebraic().to_string(),
            "ab + a'c' + b'c"
        );
        minimizer.check_cover().unwrap();
    }

    #[test]
    fn test_reduce_cover_idempotent() {
        let mut minimizer = Minimizer::new("11100111").unwrap();
        minimizer.minimize().unwrap();
        let before = minimizer.implicants().to_vec();

        let excluded = minimizer.reduce_cover().unwrap();
        assert!(excluded.not_any());
        assert_eq!(minimizer.implicants(), before.as_slice());
    }

    #[test]
    fn test_cover_search_limit() {
        let mut minimizer = Minimizer::new("11100111")
            .unwrap()
            .with_options(MinimizeOptions::new().with_max_cover_candidates(5));
        assert_eq!(
            minimizer.minimize(),
            Err(MinimizeError::CoverSearch(CoverSearchLimitExceeded {
                candidates: 6,
                limit: 5,
            }))
        );

        // Exactly at the limit is still searched.
        let mut minimizer = Minimizer::new("11100111")
            .unwrap()
            .with_options(MinimizeOptions::new().with_max_cover_candidates(6));
        minimizer.minimize().unwrap();
        assert_eq!(minimizer.implicant_count(), 3);

        let mut minimizer = Minimizer::new("11100111")
            .unwrap()
            .with_options(MinimizeOptions::new().unbounded());
        minimizer.minimize().unwrap();
        assert_eq!(minimizer.implicant_count(), 3);
    }

    #[test]
    fn test_check_cover_detects_mismatch() {
        let mut minimizer = Minimizer::new("0111").unwrap();
        minimizer.merge_phase();
        // Dropping `a` leaves row 2 uncovered.
        minimizer.remove_excluded(&bitvec![0, 1]);
        assert_eq!(minimizer.check_cover(), Err(2));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn proptest_merge_phase_bounded(table in any_with::<TruthTable>(Some(4))) {
            let variable_count = table.variable_count();
            let mut minimizer = Minimizer::from_table(table);
            let rounds = minimizer.merge_phase();
            prop_assert!(
                rounds <= variable_count,
                "{} merge rounds for {} variables",
                rounds,
                variable_count,
            );
            for implicant in minimizer.implicants() {
                prop_assert!(!implicant.merged, "prime implicants are unmerged");
            }
        }

        #[test]
        fn proptest_minimized_cover_matches(table in any_with::<TruthTable>(Some(3))) {
            let mut minimizer = Minimizer::from_table(table);
            let prime_count = {
                let mut primes = minimizer.clone();
                primes.merge_phase();
                primes.implicant_count()
            };
            minimizer.minimize().unwrap();
            prop_assert!(minimizer.implicant_count() <= prime_count);
            prop_assert_eq!(minimizer.check_cover(), Ok(()));

            let excluded = minimizer.reduce_cover().unwrap();
            prop_assert!(excluded.not_any(), "reduction is idempotent");
        }
    }
}
