// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_manager::FixtureManagerApp;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let app = FixtureManagerApp::parse();
    app.exec()
}
