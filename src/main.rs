// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::time::Instant;

use nabqif::{cli, commands, utils};

fn main() -> Result<()> {
    let started = Instant::now();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let level = matches
        .get_one::<String>("log_level")
        .map(String::as_str)
        .unwrap_or("info");
    utils::init_logging(level);

    match matches.subcommand() {
        Some(("statements", sub)) => commands::statements::handle(sub)?,
        Some(("accounts", sub)) => commands::accounts::handle(sub)?,
        Some(("rules", sub)) => commands::rules::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    log::info!("Finished, {} seconds elapsed", started.elapsed().as_secs());
    Ok(())
}
