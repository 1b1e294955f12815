// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::stats::{portfolio_summary, utility_summary, with_stats};
use crate::store::Store;
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_id, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(store: &Store, conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("buildings", sub)) => buildings(store, conn, sub)?,
        Some(("portfolio", sub)) => portfolio(store, conn, sub)?,
        Some(("utilities", sub)) => utilities(store, conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn buildings(store: &Store, conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ccy = get_currency(conn)?;
    let view = with_stats(store.buildings(), store.tenants());
    let data: Vec<Vec<String>> = view
        .iter()
        .map(|b| {
            let rate = if b.units == 0 {
                "-".to_string()
            } else {
                format!(
                    "{:.0}%",
                    f64::from(b.occupied_units) * 100.0 / f64::from(b.units)
                )
            };
            vec![
                b.name.clone(),
                b.units.to_string(),
                b.occupied_units.to_string(),
                rate,
                fmt_money(&b.total_rent, &ccy),
            ]
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        println!(
            "{}",
            pretty_table(
                &["Building", "Units", "Occupied", "Occupancy", "Monthly rent"],
                data
            )
        );
    }
    Ok(())
}

fn portfolio(store: &Store, conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ccy = get_currency(conn)?;
    let s = portfolio_summary(store.buildings(), store.tenants());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Buildings".into(), s.buildings.to_string()],
            vec!["Units".into(), s.total_units.to_string()],
            vec!["Active tenants".into(), s.active_tenants.to_string()],
            vec!["Vacant units".into(), s.vacant_units.to_string()],
            vec!["Monthly rent".into(), fmt_money(&s.monthly_rent, &ccy)],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn utilities(store: &Store, conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ccy = get_currency(conn)?;
    let id = parse_id(sub.get_one::<String>("tenant").unwrap())?;
    let tenant = store
        .tenant(id)
        .ok_or_else(|| anyhow!("Tenant {} not found", id))?;
    let s = utility_summary(store.utility_payments(), id);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let mut rows = Vec::new();
        for (label, t) in [("Heating", &s.heating), ("Water", &s.water)] {
            rows.push(vec![
                label.to_string(),
                fmt_money(&t.advance_payments, &ccy),
                fmt_money(&t.actual_costs, &ccy),
                fmt_money(&t.difference, &ccy),
            ]);
        }
        println!("Utilities for {}", tenant.full_name());
        println!(
            "{}",
            pretty_table(&["Type", "Advances", "Actual", "Difference"], rows)
        );
        let balance = s.balance();
        if balance.is_sign_negative() && !balance.is_zero() {
            println!("Tenant owes {}", fmt_money(&balance.abs(), &ccy));
        } else {
            println!("Refund due {}", fmt_money(&balance, &ccy));
        }
        if s.open_items > 0 {
            println!("{} payment(s) not yet settled", s.open_items);
        }
    }
    Ok(())
}
