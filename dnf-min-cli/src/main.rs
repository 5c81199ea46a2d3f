// Copyright (c) The dnf-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod command;

use clap::Parser;
use color_eyre::Result;
use command::DnfMinApp;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let app = DnfMinApp::parse();
    app.exec()
}
