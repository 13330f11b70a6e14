// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, crate_version};

fn session_args() -> Vec<Arg> {
    vec![
        Arg::new("user")
            .value_name("USER")
            .required(true)
            .help("The NAB internet banking customer number"),
        Arg::new("password")
            .value_name("PASSWORD")
            .required(true)
            .help("The password of the user provided"),
        Arg::new("saved_pages")
            .long("saved-pages")
            .value_name("PATH")
            .help("Load pages saved under PATH instead of the live site"),
        Arg::new("test_key")
            .long("test-key")
            .value_name("KEY")
            .help("Prefer saved pages from this sub-directory of the saved pages"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("nabqif")
        .version(crate_version!())
        .about("Download NAB internet banking transactions into QIF statements")
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .global(true)
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .default_value("info")
                .help("Set the log level"),
        )
        .subcommand(
            Command::new("statements")
                .about("Generate a QIF file per account and a closing balances summary")
                .args(session_args())
                .arg(
                    Arg::new("account")
                        .value_name("ACC")
                        .num_args(0..)
                        .help("Only generate statements for these account nicknames"),
                )
                .arg(
                    Arg::new("last_month")
                        .long("last-month")
                        .action(ArgAction::SetTrue)
                        .help("Get all the transactions from the last calendar month"),
                )
                .arg(
                    Arg::new("this_month")
                        .long("this-month")
                        .action(ArgAction::SetTrue)
                        .help("Get the transactions from the start of this calendar month until now"),
                )
                .arg(
                    Arg::new("start_date")
                        .long("start-date")
                        .value_name("YYYYMMDD")
                        .help("Get the transactions starting from this date (inclusive)"),
                )
                .group(
                    ArgGroup::new("period")
                        .args(["last_month", "this_month", "start_date"])
                        .multiple(false),
                )
                .arg(
                    Arg::new("end_date")
                        .long("end-date")
                        .value_name("YYYYMMDD")
                        .help("Get the transactions up until this date (inclusive)"),
                )
                .arg(
                    Arg::new("rules_dir")
                        .long("rules-dir")
                        .value_name("DIR")
                        .help("Directory holding PayeeCategories*.txt files"),
                )
                .arg(
                    Arg::new("out_dir")
                        .long("out-dir")
                        .value_name("DIR")
                        .default_value(".")
                        .help("Directory the QIF and summary files are written to"),
                )
                .arg(
                    Arg::new("rounding")
                        .long("rounding")
                        .value_parser(["half-down", "half-up", "half-even"])
                        .default_value("half-down")
                        .help("Rounding of amounts to cents"),
                )
                .arg(
                    Arg::new("delimited")
                        .long("delimited")
                        .action(ArgAction::SetTrue)
                        .help("Also write <nickname>.csv with one line per transaction"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the closing balances as JSON"),
                ),
        )
        .subcommand(
            Command::new("accounts")
                .about("List the accounts visible to the banking session")
                .args(session_args())
                .arg(
                    Arg::new("as_of")
                        .long("as-of")
                        .value_name("YYYYMMDD")
                        .help("Date the balances are reported at (default today)"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("rules")
                .about("Show which category rule applies to some payee text")
                .arg(Arg::new("nick_name").value_name("NICKNAME").required(true))
                .arg(Arg::new("text").value_name("TEXT").required(true))
                .arg(
                    Arg::new("rules_dir")
                        .long("rules-dir")
                        .value_name("DIR")
                        .help("Directory holding PayeeCategories*.txt files"),
                ),
        )
}
