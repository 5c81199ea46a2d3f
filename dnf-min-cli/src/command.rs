// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use color_eyre::{
    eyre::{Result, WrapErr},
    Section,
};
use dnf_min::minimizer::{MinimizeOptions, Minimizer};

/// Minimize boolean functions given as truth tables.
#[derive(Debug, Parser)]
#[clap(name = "dnf-min", version)]
pub struct DnfMinApp {
    #[clap(subcommand)]
    command: DnfMinCommand,
}

#[derive(Debug, Subcommand)]
pub enum DnfMinCommand {
    /// Minimize a truth table into a sum of products.
    Minimize {
        /// Truth table over `0`, `1` and `-`, one symbol per input row.
        #[clap(allow_hyphen_values = true)]
        table: String,

        /// Print every merge generation and the coverage tables to stderr.
        #[clap(long)]
        trace: bool,

        /// Print the result as a sum of products such as `ab' + c`.
        #[clap(long)]
        algebraic: bool,

        #[clap(flatten)]
        search: SearchOpts,
    },
    /// Print the prime implicants of a truth table.
    Primes {
        /// Truth table over `0`, `1` and `-`, one symbol per input row.
        #[clap(allow_hyphen_values = true)]
        table: String,
    },
}

#[derive(Debug, Args)]
pub struct SearchOpts {
    /// Fail instead of searching for a minimal cover among more than COUNT prime implicants
    /// [default: 24].
    #[clap(long, value_name = "COUNT")]
    max_candidates: Option<usize>,

    /// Never limit the cover search.
    #[clap(long)]
    unbounded: bool,
}

impl SearchOpts {
    fn to_options(&self) -> MinimizeOptions {
        let options = MinimizeOptions::new();
        match (self.unbounded, self.max_candidates) {
            (true, _) => options.unbounded(),
            (false, Some(limit)) => options.with_max_cover_candidates(limit),
            (false, None) => options,
        }
    }
}

impl DnfMinApp {
    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl DnfMinCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Minimize {
                table,
                trace,
                algebraic,
                search,
            } => {
                let mut minimizer = parse_minimizer(&table)?.with_options(search.to_options());
                let report = minimizer
                    .minimize()
                    .suggestion("raise --max-candidates or pass --unbounded")?;
                log::info!(
                    "kept {} of {} prime implicants",
                    minimizer.implicant_count(),
                    report.primes.rows().len()
                );
                if trace {
                    eprintln!("{}", report);
                }

                if algebraic {
                    println!("{}", minimizer.terms().algebraic());
                } else {
                    print!("{}", minimizer.terms());
                }
                Ok(())
            }
            Self::Primes { table } => {
                let mut minimizer = parse_minimizer(&table)?;
                let rounds = minimizer.merge_phase();
                log::info!(
                    "{} prime implicants after {} merge rounds",
                    minimizer.implicant_count(),
                    rounds
                );
                eprintln!("{}", minimizer.current_coverage_table());
                print!("{}", minimizer.terms());
                Ok(())
            }
        }
    }
}

fn parse_minimizer(table: &str) -> Result<Minimizer> {
    Minimizer::new(table).wrap_err_with(|| format!("invalid truth table {:?}", table))
}
