// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use dnf_min::{minimizer::Minimizer, truth_table::TruthTable};

/// A single fixture: a truth table and, once outputs are generated, its minimized terms.
#[derive(Clone, Debug)]
pub struct FixtureDetails {
    name: String,
    table: TruthTable,
    expected: Option<String>,
}

impl FixtureDetails {
    pub fn new(name: impl Into<String>, table: TruthTable, expected: Option<String>) -> Self {
        Self {
            name: name.into(),
            table,
            expected,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    #[inline]
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    /// Minimizes the table, checks the result against it and returns the rendered terms.
    pub fn minimize(&self) -> Result<String> {
        let mut minimizer = Minimizer::from_table(self.table.clone());
        minimizer
            .minimize()
            .wrap_err_with(|| format!("fixture {}: minimizing {}", self.name, self.table))?;
        if let Err(row) = minimizer.check_cover() {
            bail!(
                "fixture {}: minimized terms disagree with {} on row {}",
                self.name,
                self.table,
                row
            );
        }
        Ok(minimizer.terms().to_string())
    }

    /// Checks that minimizing the table still produces the expected terms.
    pub fn check(&self) -> Result<()> {
        let expected = match &self.expected {
            Some(expected) => expected,
            None => bail!("fixture {}: no expected output", self.name),
        };
        let actual = self.minimize()?;
        if &actual != expected {
            bail!(
                "fixture {}: expected\n{}\nbut got\n{}",
                self.name,
                expected,
                actual
            );
        }
        Ok(())
    }
}
