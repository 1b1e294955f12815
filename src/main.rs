// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use rentbook::{cli, commands, db};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_override = matches.get_one::<String>("db").map(Path::new);
    let mut conn = db::open_or_init(db_override)?;
    let mut store = db::load_store(&conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(db_override)?.display());
        }
        Some(("building", sub)) => {
            if commands::buildings::handle(&mut store, sub)? {
                db::save_store(&mut conn, &store)?;
            }
        }
        Some(("tenant", sub)) => {
            if commands::tenants::handle(&mut store, sub)? {
                db::save_store(&mut conn, &store)?;
            }
        }
        Some(("utility", sub)) => {
            if commands::utilities::handle(&mut store, sub)? {
                db::save_store(&mut conn, &store)?;
            }
        }
        Some(("report", sub)) => commands::reports::handle(&store, &conn, sub)?,
        Some(("finances", sub)) => commands::finances::handle(&store, &conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("config", sub)) => {
            commands::config::handle(&conn, &db::db_path(db_override)?, sub)?
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
