// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    implicant::{Implicant, VariableName},
    truth_table::TruthTable,
};
use bitvec::prelude::*;
use itertools::{Itertools, Position};
use std::{cmp::Ordering, fmt};

const COLUMN_WIDTH: usize = 3;

/// Attributes of one implicant, as shown in a generation dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImplicantAttributes {
    pub value: u32,
    pub rank: u32,
    pub mask: u32,
    pub merged: bool,
    pub spans_dont_care: bool,
}

impl From<&Implicant> for ImplicantAttributes {
    fn from(implicant: &Implicant) -> Self {
        Self {
            value: implicant.value,
            rank: implicant.rank,
            mask: implicant.mask,
            merged: implicant.merged,
            spans_dont_care: implicant.spans_dont_care,
        }
    }
}

/// A dump of one generation of implicants, one column per implicant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeTable {
    columns: Vec<ImplicantAttributes>,
}

impl AttributeTable {
    pub fn new(implicants: &[Implicant]) -> Self {
        Self {
            columns: implicants.iter().map(ImplicantAttributes::from).collect(),
        }
    }

    #[inline]
    pub fn columns(&self) -> &[ImplicantAttributes] {
        &self.columns
    }
}

impl fmt::Display for AttributeTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rows: [(&str, fn(&ImplicantAttributes) -> u32); 5] = [
            ("num", |c: &ImplicantAttributes| c.value),
            ("ind", |c: &ImplicantAttributes| c.rank),
            ("p  ", |c: &ImplicantAttributes| c.mask),
            ("pw ", |c: &ImplicantAttributes| c.merged as u32),
            ("inf", |c: &ImplicantAttributes| c.spans_dont_care as u32),
        ];
        for (label, attribute) in rows {
            write!(f, "{} |", label)?;
            for column in &self.columns {
                write!(f, "{:>width$} |", attribute(column), width = COLUMN_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One implicant's row in a [`CoverageTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageRow {
    /// Index of the implicant in its generation.
    pub implicant_ix: usize,
    pub value: u32,
    pub mask: u32,
    /// One bit per entry of [`CoverageTable::required_rows`].
    pub required: BitVec,
    /// One bit per entry of [`CoverageTable::dont_care_rows`].
    pub dont_care: BitVec,
}

/// Which required and don't-care rows each implicant covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageTable {
    required_rows: Vec<usize>,
    dont_care_rows: Vec<usize>,
    rows: Vec<CoverageRow>,
}

impl CoverageTable {
    /// Builds the table for the implicants not marked in `excluded`.
    pub fn new(table: &TruthTable, implicants: &[Implicant], excluded: &BitSlice) -> Self {
        let required_rows: Vec<_> = table.required_rows().collect();
        let dont_care_rows: Vec<_> = table.dont_care_rows().collect();

        let rows = implicants
            .iter()
            .enumerate()
            .filter(|(ix, _)| !excluded[*ix])
            .map(|(implicant_ix, implicant)| CoverageRow {
                implicant_ix,
                value: implicant.value,
                mask: implicant.mask,
                required: required_rows.iter().map(|&row| implicant.covers(row)).collect(),
                dont_care: dont_care_rows
                    .iter()
                    .map(|&row| implicant.covers(row))
                    .collect(),
            })
            .collect();

        Self {
            required_rows,
            dont_care_rows,
            rows,
        }
    }

    #[inline]
    pub fn required_rows(&self) -> &[usize] {
        &self.required_rows
    }

    #[inline]
    pub fn dont_care_rows(&self) -> &[usize] {
        &self.dont_care_rows
    }

    #[inline]
    pub fn rows(&self) -> &[CoverageRow] {
        &self.rows
    }
}

impl fmt::Display for CoverageTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Row numbers are shown one-based.
        write!(f, "N   \t|")?;
        for row in &self.required_rows {
            write!(f, "{:>width$} |", row + 1, width = COLUMN_WIDTH)?;
        }
        write!(f, "|")?;
        for row in &self.dont_care_rows {
            write!(f, "{:>width$} |", row + 1, width = COLUMN_WIDTH)?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "({}, {})\t|", row.value, row.mask)?;
            for covered in row.required.iter().by_vals() {
                write!(f, "{:>width$} |", mark(covered), width = COLUMN_WIDTH)?;
            }
            write!(f, "|")?;
            for covered in row.dont_care.iter().by_vals() {
                write!(f, "{:>width$} |", mark(covered), width = COLUMN_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[inline]
fn mark(covered: bool) -> char {
    if covered {
        '+'
    } else {
        ' '
    }
}

/// A list of product terms over a fixed number of variables.
///
/// Displays as a header of variable names followed by one line per term, e.g.
///
/// ```text
/// ab
/// -1
/// 1-
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Terms<'a> {
    implicants: &'a [Implicant],
    variable_count: usize,
}

impl<'a> Terms<'a> {
    pub fn new(implicants: &'a [Implicant], variable_count: usize) -> Self {
        Self {
            implicants,
            variable_count,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.implicants.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty()
    }

    /// Returns each term rendered as `1`, `0` and `-`, without the header.
    pub fn lines(&self) -> impl Iterator<Item = String> + 'a {
        let variable_count = self.variable_count;
        self.implicants
            .iter()
            .map(move |implicant| implicant.term_display(variable_count).to_string())
    }

    #[inline]
    pub fn algebraic(&self) -> TermsAlgebraicDisplay<'a> {
        TermsAlgebraicDisplay::new(self.implicants, self.variable_count)
    }
}

impl<'a> fmt::Display for Terms<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for var_ix in 0..self.variable_count {
            write!(f, "{}", VariableName::new(var_ix))?;
        }
        writeln!(f)?;

        for implicant in self.implicants {
            writeln!(f, "{}", implicant.term_display(self.variable_count))?;
        }
        Ok(())
    }
}

/// Displays a list of terms as a sum of products, e.g. `ab' + c`.
pub struct TermsAlgebraicDisplay<'a> {
    implicants: Vec<&'a Implicant>,
    variable_count: usize,
}

impl<'a> TermsAlgebraicDisplay<'a> {
    fn new(implicants: &'a [Implicant], variable_count: usize) -> Self {
        let mut implicants: Vec<_> = implicants.iter().collect();
        // Sort the terms lexicographically in the order [true, false, absent] per variable.
        // This results in terms containing `a` showing up first, then `a'`, then terms not
        // containing a.
        implicants.sort_unstable_by(|a, b| {
            for var_ix in 0..variable_count {
                match (
                    a.literal(var_ix, variable_count),
                    b.literal(var_ix, variable_count),
                ) {
                    (Some(true), Some(true)) | (Some(false), Some(false)) | (None, None) => {
                        continue
                    }
                    (Some(true), Some(false) | None) => return Ordering::Less,
                    (Some(false) | None, Some(true)) => return Ordering::Greater,
                    (Some(false), None) => return Ordering::Less,
                    (None, Some(false)) => return Ordering::Greater,
                }
            }
            Ordering::Equal
        });

        Self {
            implicants,
            variable_count,
        }
    }
}

impl<'a> fmt::Display for TermsAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.implicants.is_empty() {
            return write!(f, "0");
        }
        for elem in self.implicants.iter().with_position() {
            match elem {
                Position::First(implicant) | Position::Middle(implicant) => {
                    write!(f, "{} + ", implicant.algebraic_display(self.variable_count))?;
                }
                Position::Last(implicant) | Position::Only(implicant) => {
                    write!(f, "{}", implicant.algebraic_display(self.variable_count))?;
                }
            }
        }
        Ok(())
    }
}

/// Everything [`Minimizer::minimize`](super::Minimizer::minimize) went through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinimizeTrace {
    /// The generation produced by each merge round that merged something.
    pub generations: Vec<AttributeTable>,
    pub merge_rounds: usize,
    /// Coverage of all prime implicants.
    pub primes: CoverageTable,
    /// The implicants removed by the cover search, relative to the prime implicants.
    pub excluded: BitVec,
    /// Coverage of the implicants that were kept.
    pub minimized: CoverageTable,
}

impl fmt::Display for MinimizeTrace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (ix, generation) in self.generations.iter().enumerate() {
            writeln!(
                f,
                "generation {}: {} implicants",
                ix + 1,
                generation.columns().len()
            )?;
            writeln!(f, "{}", generation)?;
        }
        writeln!(f, "implicant table")?;
        writeln!(f, "{}", self.primes)?;
        writeln!(f, "minimized implicant table")?;
        write!(f, "{}", self.minimized)
    }
}
