// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::{borrow::Cow, fmt};

/// A product term in value/mask form.
///
/// Bits set in `mask` have been generalized away by merging; the corresponding bits of `value`
/// are always 0. Bit 0 is the least significant bit of the row index, i.e. the *last* variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Implicant {
    pub value: u32,
    pub mask: u32,
    /// Number of 1 bits in `value`.
    pub rank: u32,
    /// Set once this implicant has been combined into a higher-order implicant.
    pub merged: bool,
    /// Set if this implicant covers (or was derived from) a don't-care row.
    pub spans_dont_care: bool,
}

impl Implicant {
    /// Creates the implicant covering exactly one row.
    pub fn minterm(row: u32, dont_care: bool) -> Self {
        Self {
            value: row,
            mask: 0,
            rank: row.count_ones(),
            merged: false,
            spans_dont_care: dont_care,
        }
    }

    /// Returns true if `a` and `b` can be merged, with `a` as the lower implicant.
    ///
    /// The two must share a mask and differ in exactly one (unmasked) bit that is set in `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dnf_min::implicant::Implicant;
    ///
    /// let a = Implicant::minterm(0b01, false);
    /// let b = Implicant::minterm(0b11, false);
    /// let c = Implicant::minterm(0b10, false);
    ///
    /// assert!(Implicant::can_merge(&a, &b));
    /// // Order matters: the lower value comes first.
    /// assert!(!Implicant::can_merge(&b, &a));
    /// // 01 and 10 differ in two bits.
    /// assert!(!Implicant::can_merge(&a, &c));
    /// ```
    pub fn can_merge(a: &Self, b: &Self) -> bool {
        a.value < b.value
            && a.mask == b.mask
            && b.rank == a.rank + 1
            && (b.value - a.value).count_ones() == 1
    }

    /// Merges `a` and `b` into an implicant one order higher, marking both as merged.
    ///
    /// The caller must have checked [`Self::can_merge`].
    pub fn merge(a: &mut Self, b: &mut Self) -> Self {
        debug_assert!(Self::can_merge(a, b), "{:?} and {:?} must be mergeable", a, b);
        a.merged = true;
        b.merged = true;

        Self {
            value: a.value,
            mask: a.mask | (b.value - a.value),
            rank: a.rank,
            merged: false,
            spans_dont_care: a.spans_dont_care || b.spans_dont_care,
        }
    }

    /// Returns true if both implicants describe the same product term.
    ///
    /// Bookkeeping flags are ignored.
    #[inline]
    pub fn same_term(&self, other: &Self) -> bool {
        self.value == other.value && self.mask == other.mask
    }

    /// Returns true if the input row matches this implicant on every unmasked bit.
    #[inline]
    pub fn covers(&self, row: usize) -> bool {
        (row as u64) & !(self.mask as u64) == self.value as u64
    }

    /// Returns the rows in `0..row_count` covered by this implicant.
    pub fn covered_rows(&self, row_count: usize) -> impl Iterator<Item = usize> + '_ {
        (0..row_count).filter(move |&row| self.covers(row))
    }

    /// Number of variables generalized away.
    #[inline]
    pub fn order(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Returns the value of variable `var_ix` in this term, or `None` if it was generalized away.
    ///
    /// Variable 0 (`a`) is the most significant bit of a row index.
    pub fn literal(&self, var_ix: usize, variable_count: usize) -> Option<bool> {
        assert!(
            var_ix < variable_count,
            "variable ix {} must be in range 0..{}",
            var_ix,
            variable_count
        );
        let bit = 1_u32 << (variable_count - 1 - var_ix);
        if self.mask & bit != 0 {
            None
        } else {
            Some(self.value & bit != 0)
        }
    }

    #[inline]
    pub fn term_display(&self, variable_count: usize) -> TermDisplay<'_> {
        TermDisplay::new(self, variable_count)
    }

    #[inline]
    pub fn algebraic_display(&self, variable_count: usize) -> AlgebraicDisplay<'_> {
        AlgebraicDisplay::new(self, variable_count)
    }
}

/// Displays an implicant as one symbol per variable, e.g. `1-0`.
pub struct TermDisplay<'a> {
    implicant: &'a Implicant,
    variable_count: usize,
    format: TermDisplayFormat,
    separator: Cow<'a, str>,
}

impl<'a> TermDisplay<'a> {
    pub fn new(implicant: &'a Implicant, variable_count: usize) -> Self {
        Self {
            implicant,
            variable_count,
            format: TermDisplayFormat::default(),
            separator: Cow::Borrowed(""),
        }
    }

    pub fn with_format(mut self, format: TermDisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for var_ix in 0..self.variable_count {
            let literal = self.implicant.literal(var_ix, self.variable_count);
            write!(f, "{}", self.format.char_for_literal(literal))?;
            if var_ix < self.variable_count - 1 {
                write!(f, "{}", self.separator)?;
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug)]
pub enum TermDisplayFormat {
    /// Display a term as `10-1`, with dashes for generalized variables.
    Dashes,

    /// Display a term as `1021`, with `2` for generalized variables.
    Numeric,
}

impl TermDisplayFormat {
    /// Returns the character that would be displayed for a literal.
    pub fn char_for_literal(self, literal: Option<bool>) -> char {
        match literal {
            Some(true) => '1',
            Some(false) => '0',
            None => match self {
                Self::Dashes => '-',
                Self::Numeric => '2',
            },
        }
    }
}

impl Default for TermDisplayFormat {
    fn default() -> Self {
        Self::Dashes
    }
}

/// Displays an implicant as a product of literals, e.g. `ab'`.
///
/// The term with every variable generalized away is displayed as `1`.
pub struct AlgebraicDisplay<'a> {
    implicant: &'a Implicant,
    variable_count: usize,
}

impl<'a> AlgebraicDisplay<'a> {
    pub fn new(implicant: &'a Implicant, variable_count: usize) -> Self {
        Self {
            implicant,
            variable_count,
        }
    }
}

impl<'a> fmt::Display for AlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut any_literal = false;
        for var_ix in 0..self.variable_count {
            match self.implicant.literal(var_ix, self.variable_count) {
                Some(true) => write!(f, "{}", VariableName::new(var_ix))?,
                Some(false) => write!(f, "{}'", VariableName::new(var_ix))?,
                None => continue,
            }
            any_literal = true;
        }

        if !any_literal {
            write!(f, "1")?;
        }
        Ok(())
    }
}

const VARIABLE_SYMBOLS: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// The name of a variable: `a` through `z`, then `ba`, `bb`, ...
#[derive(Debug)]
pub enum VariableName {
    Char(char),
    String(String),
}

impl VariableName {
    pub fn new(var_ix: usize) -> Self {
        if var_ix < 26 {
            return Self::Char(VARIABLE_SYMBOLS[var_ix]);
        }
        let rest = var_ix / 26;
        let last_ch = VARIABLE_SYMBOLS[var_ix % 26];

        match Self::new(rest) {
            Self::Char(ch) => Self::String(format!("{}{}", ch, last_ch)),
            Self::String(mut s) => {
                s.push(last_ch);
                Self::String(s)
            }
        }
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{}", *ch),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let mut a = Implicant::minterm(0b001, false);
        let mut b = Implicant::minterm(0b011, true);
        assert_eq!(a.rank, 1);
        assert_eq!(b.rank, 2);
        assert!(Implicant::can_merge(&a, &b));

        let merged = Implicant::merge(&mut a, &mut b);
        assert!(a.merged && b.merged);
        assert_eq!(merged.value, 0b001);
        assert_eq!(merged.mask, 0b010);
        assert_eq!(merged.rank, 1);
        assert!(!merged.merged);
        assert!(merged.spans_dont_care, "don't care flag is inherited");
        assert_eq!(merged.order(), 1);
    }

    #[test]
    fn test_can_merge_requires_same_mask() {
        let a = Implicant {
            value: 0b000,
            mask: 0b001,
            rank: 0,
            merged: false,
            spans_dont_care: false,
        };
        let b = Implicant {
            value: 0b100,
            mask: 0b010,
            rank: 1,
            merged: false,
            spans_dont_care: false,
        };
        assert!(!Implicant::can_merge(&a, &b));

        let c = Implicant { mask: 0b001, ..b };
        assert!(Implicant::can_merge(&a, &c));
    }

    #[test]
    fn test_covers() {
        // 1-0 over three variables: rows 100 and 110.
        let implicant = Implicant {
            value: 0b100,
            mask: 0b010,
            rank: 1,
            merged: false,
            spans_dont_care: false,
        };
        assert_eq!(implicant.covered_rows(8).collect::<Vec<_>>(), vec![4, 6]);
        assert!(!implicant.covers(5));
    }

    #[test]
    fn test_displays() {
        let implicant = Implicant {
            value: 0b100,
            mask: 0b010,
            rank: 1,
            merged: false,
            spans_dont_care: false,
        };
        assert_eq!(implicant.term_display(3).to_string(), "1-0");
        assert_eq!(
            implicant
                .term_display(3)
                .with_format(TermDisplayFormat::Numeric)
                .with_separator(" ")
                .to_string(),
            "1 2 0"
        );
        assert_eq!(implicant.algebraic_display(3).to_string(), "ac'");

        let universe = Implicant {
            value: 0,
            mask: 0b11,
            rank: 0,
            merged: false,
            spans_dont_care: false,
        };
        assert_eq!(universe.term_display(2).to_string(), "--");
        assert_eq!(universe.algebraic_display(2).to_string(), "1");
        assert_eq!(Implicant::minterm(0, false).term_display(0).to_string(), "");
    }

    #[test]
    fn test_variable_names() {
        assert_eq!(VariableName::new(0).to_string(), "a");
        assert_eq!(VariableName::new(25).to_string(), "z");
        assert_eq!(VariableName::new(26).to_string(), "ba");
        assert_eq!(VariableName::new(27).to_string(), "bb");
    }
}
