// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{FixtureDetails, ValueGenerator};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use dnf_min::truth_table::TruthTable;
use once_cell::sync::Lazy;
use proptest::prelude::*;
use std::fs;

const INPUT_EXTENSION: &str = "tt";
const EXPECTED_EXTENSION: &str = "expected";

pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub const SEED: &'static str = "dnf-min-fixtures";

    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    /// Uses `dir` for fixture files instead of the checked-in data directory.
    pub fn with_dir(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn init() -> Self {
        let dir: Utf8PathBuf = env!("CARGO_MANIFEST_DIR").into();
        let dir = dir
            .parent()
            .expect("fixture-details is nested in the fixtures directory")
            .join("data");
        Self { dir }
    }

    #[inline]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Deterministically generates `count` truth tables with up to `max_variables` variables.
    pub fn generate_tables(count: usize, max_variables: usize) -> Vec<TruthTable> {
        let mut value_gen = ValueGenerator::from_seed(Self::SEED);
        (0..count)
            .map(|_| {
                let mut gen = value_gen.partial_clone();
                gen.generate(any_with::<TruthTable>(Some(max_variables)))
            })
            .collect()
    }

    /// Writes `count` generated truth tables into the fixture directory.
    pub fn generate_inputs(&self, count: usize, max_variables: usize) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .wrap_err_with(|| format!("creating fixture directory {}", self.dir))?;

        for (ix, table) in Self::generate_tables(count, max_variables)
            .into_iter()
            .enumerate()
        {
            let path = self.input_path(&format!("table-{:03}", ix));
            fs::write(&path, format!("{}\n", table))
                .wrap_err_with(|| format!("writing fixture input {}", path))?;
        }

        log::info!("wrote {} fixture inputs to {}", count, self.dir);
        Ok(())
    }

    /// Minimizes every fixture input and writes the resulting terms next to it.
    pub fn generate_outputs(&self) -> Result<()> {
        let fixtures = self.load()?;
        for fixture in &fixtures {
            let path = self.expected_path(fixture.name());
            fs::write(&path, fixture.minimize()?)
                .wrap_err_with(|| format!("writing fixture output {}", path))?;
        }

        log::info!("wrote {} fixture outputs to {}", fixtures.len(), self.dir);
        Ok(())
    }

    /// Checks every fixture against its expected output.
    pub fn check_outputs(&self) -> Result<()> {
        let fixtures = self.load()?;
        if fixtures.is_empty() {
            bail!(
                "no fixture inputs in {}, run `fixture-manager generate-inputs` first",
                self.dir
            );
        }
        let failures: Vec<_> = fixtures
            .iter()
            .filter_map(|fixture| fixture.check().err())
            .collect();
        if !failures.is_empty() {
            for failure in &failures {
                log::error!("{:?}", failure);
            }
            bail!(
                "{} of {} fixtures failed, run generate-outputs if this is expected",
                failures.len(),
                fixtures.len()
            );
        }
        Ok(())
    }

    /// Loads all fixtures, sorted by name.
    pub fn load(&self) -> Result<Vec<FixtureDetails>> {
        if !self.dir.is_dir() {
            bail!(
                "fixture directory {} does not exist, run `fixture-manager generate-inputs` first",
                self.dir
            );
        }
        let entries = fs::read_dir(&self.dir)
            .wrap_err_with(|| format!("reading fixture directory {}", self.dir))?;

        let mut fixtures = Vec::new();
        for entry in entries {
            let path = Utf8PathBuf::try_from(entry?.path())?;
            if path.extension() != Some(INPUT_EXTENSION) {
                continue;
            }
            let name = match path.file_stem() {
                Some(name) => name.to_owned(),
                None => continue,
            };

            let input = fs::read_to_string(&path)
                .wrap_err_with(|| format!("reading fixture input {}", path))?;
            let table = TruthTable::parse(input.trim())
                .wrap_err_with(|| format!("parsing fixture input {}", path))?;

            let expected_path = self.expected_path(&name);
            let expected = if expected_path.exists() {
                Some(
                    fs::read_to_string(&expected_path)
                        .wrap_err_with(|| format!("reading fixture output {}", expected_path))?,
                )
            } else {
                None
            };

            fixtures.push(FixtureDetails::new(name, table, expected));
        }

        fixtures.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(fixtures)
    }

    fn input_path(&self, name: &str) -> Utf8PathBuf {
        self.dir.join(name).with_extension(INPUT_EXTENSION)
    }

    fn expected_path(&self, name: &str) -> Utf8PathBuf {
        self.dir.join(name).with_extension(EXPECTED_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_dir_path(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("temp dir is valid UTF-8")
    }

    #[test]
    fn test_generate_tables_deterministic() {
        let first = AllFixtures::generate_tables(16, 3);
        let second = AllFixtures::generate_tables(16, 3);
        assert_eq!(first, second);
        assert!(first.iter().all(|table| table.variable_count() <= 3));
    }

    #[test]
    fn test_generated_tables_minimize() {
        for (ix, table) in AllFixtures::generate_tables(32, 3).into_iter().enumerate() {
            let fixture = FixtureDetails::new(format!("table-{:03}", ix), table, None);
            fixture.minimize().expect("generated fixture minimizes");
        }
    }

    #[test]
    fn test_fixture_round_trip() {
        let temp = TempDir::new().unwrap();
        let fixtures = AllFixtures::with_dir(temp_dir_path(&temp));

        fixtures.generate_inputs(8, 3).unwrap();
        let loaded = fixtures.load().unwrap();
        assert_eq!(loaded.len(), 8);
        assert!(loaded.iter().all(|fixture| fixture.expected().is_none()));
        assert!(fixtures.check_outputs().is_err(), "outputs not generated yet");

        fixtures.generate_outputs().unwrap();
        fixtures.check_outputs().unwrap();
    }

    #[test]
    fn test_missing_inputs() {
        let temp = TempDir::new().unwrap();
        let dir = temp_dir_path(&temp);

        let fixtures = AllFixtures::with_dir(dir.join("data"));
        let err = fixtures.check_outputs().unwrap_err();
        assert!(err.to_string().contains("generate-inputs"), "{}", err);

        let fixtures = AllFixtures::with_dir(dir);
        assert!(fixtures.load().unwrap().is_empty());
        let err = fixtures.check_outputs().unwrap_err();
        assert!(err.to_string().contains("no fixture inputs"), "{}", err);
    }
}
