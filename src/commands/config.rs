// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, pretty_table, set_currency};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use std::path::Path;

pub fn handle(conn: &Connection, data_path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-currency", sub)) => {
            let ccy = sub.get_one::<String>("currency").unwrap().trim().to_uppercase();
            if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(anyhow!("Invalid currency code '{}'", ccy));
            }
            set_currency(conn, &ccy)?;
            println!("Currency set to {}", ccy);
        }
        Some(("show", _)) => {
            let rows = vec![
                vec!["currency".to_string(), get_currency(conn)?],
                vec!["data".to_string(), data_path.display().to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        _ => {}
    }
    Ok(())
}
