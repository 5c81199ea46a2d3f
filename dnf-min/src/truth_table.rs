// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::InvalidTruthTable;
use std::{fmt, str::FromStr};

/// Implicant values are stored as `u32`, so tables can have at most this many variables.
pub const MAX_VARIABLES: usize = 32;

/// The output of the function for one input row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowValue {
    /// `0`: the row must not be covered.
    Off,
    /// `1`: the row must be covered.
    On,
    /// `-`: covering the row is optional.
    DontCare,
}

impl RowValue {
    /// Parses a single truth table symbol.
    ///
    /// Returns `None` for anything other than `0`, `1` or `-`.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0' => Some(Self::Off),
            '1' => Some(Self::On),
            '-' => Some(Self::DontCare),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Off => '0',
            Self::On => '1',
            Self::DontCare => '-',
        }
    }

    /// Returns true if an implicant may be created for this row.
    #[inline]
    pub fn is_candidate(self) -> bool {
        matches!(self, Self::On | Self::DontCare)
    }
}

/// A single-output boolean function, one [`RowValue`] per input combination.
///
/// Row `i` holds the output for the input whose binary representation is `i`, with the first
/// variable (`a`) as the most significant bit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TruthTable {
    rows: Vec<RowValue>,
    variable_count: usize,
}

impl TruthTable {
    /// Parses a truth table from a string over `0`, `1` and `-`.
    ///
    /// The length of the string must be a non-zero power of two. Unrecognized symbols are
    /// treated as `0` rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnf_min::truth_table::{RowValue, TruthTable};
    ///
    /// let table = TruthTable::parse("01-1").unwrap();
    /// assert_eq!(table.variable_count(), 2);
    /// assert_eq!(table.value(2), RowValue::DontCare);
    /// assert_eq!(table.required_rows().collect::<Vec<_>>(), vec![1, 3]);
    ///
    /// assert!(TruthTable::parse("011").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, InvalidTruthTable> {
        let rows: Vec<_> = input
            .chars()
            .enumerate()
            .map(|(row, symbol)| {
                RowValue::from_symbol(symbol).unwrap_or_else(|| {
                    log::warn!("row {}: unrecognized symbol {:?}, treating as 0", row, symbol);
                    RowValue::Off
                })
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Creates a truth table out of row values.
    pub fn from_rows(rows: Vec<RowValue>) -> Result<Self, InvalidTruthTable> {
        let len = rows.len();
        if len == 0 {
            return Err(InvalidTruthTable::Empty);
        }
        if !len.is_power_of_two() {
            return Err(InvalidTruthTable::NotPowerOfTwo { len });
        }
        let variable_count = len.trailing_zeros() as usize;
        if variable_count > MAX_VARIABLES {
            return Err(InvalidTruthTable::TooManyVariables {
                variables: variable_count,
            });
        }

        Ok(Self {
            rows,
            variable_count,
        })
    }

    /// Returns the number of rows, `2^variable_count`.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: empty tables are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    #[inline]
    pub fn rows(&self) -> &[RowValue] {
        &self.rows
    }

    /// Returns the value of the given row.
    ///
    /// Panics if `row` is out of range.
    #[inline]
    pub fn value(&self, row: usize) -> RowValue {
        self.rows[row]
    }

    /// Rows that every cover must include.
    pub fn required_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows_matching(RowValue::On)
    }

    pub fn dont_care_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows_matching(RowValue::DontCare)
    }

    /// Rows that start out as implicants: `1` and `-` rows, in row order.
    pub fn candidate_rows(&self) -> impl Iterator<Item = (usize, RowValue)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(row, &value)| value.is_candidate().then(|| (row, value)))
    }

    fn rows_matching(&self, value: RowValue) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(move |(row, &v)| (v == value).then(|| row))
    }
}

impl FromStr for TruthTable {
    type Err = InvalidTruthTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for value in &self.rows {
            write!(f, "{}", value.symbol())?;
        }
        Ok(())
    }
}
