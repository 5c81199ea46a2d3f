// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_details::AllFixtures;

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Generate random truth tables as fixture inputs.
    GenerateInputs {
        #[clap(long, short, default_value_t = 64)]
        count: usize,

        /// Maximum number of variables per truth table.
        #[clap(long, short = 'v', default_value_t = 4)]
        max_variables: usize,
    },
    /// Minimize every fixture input and store the result as its expected output.
    GenerateOutputs,
    /// Check that every fixture still minimizes to its expected output.
    Check,
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        let fixtures = AllFixtures::get();
        match self {
            Self::GenerateInputs {
                count,
                max_variables,
            } => fixtures.generate_inputs(count, max_variables),
            Self::GenerateOutputs => fixtures.generate_outputs(),
            Self::Check => fixtures.check_outputs(),
        }
    }
}
