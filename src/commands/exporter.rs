// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::{Result, anyhow};

pub fn handle(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim().to_string();
    let what = sub.get_one::<String>("what").unwrap().trim().to_lowercase();

    match (fmt.as_str(), what.as_str()) {
        ("csv", "tenants") => tenants_csv(store, &out)?,
        ("csv", "buildings") => buildings_csv(store, &out)?,
        ("csv", "utilities") => utilities_csv(store, &out)?,
        ("json", "tenants") => write_json(&out, store.tenants())?,
        ("json", "buildings") => write_json(&out, store.buildings())?,
        ("json", "utilities") => write_json(&out, store.utility_payments())?,
        ("csv" | "json", other) => {
            return Err(anyhow!(
                "Unknown export set: {} (use tenants|buildings|utilities)",
                other
            ));
        }
        (other, _) => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} to {}", what, out);
    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(out: &str, v: &T) -> Result<()> {
    std::fs::write(out, serde_json::to_string_pretty(v)?)?;
    Ok(())
}

fn tenants_csv(store: &Store, out: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "building",
        "apartment",
        "cold_rent",
        "operating_costs_advance",
        "heating_costs_advance",
        "warm_rent",
        "security_deposit",
        "move_in_date",
        "lease_end_date",
        "active",
        "iban",
        "bank_name",
    ])?;
    for t in store.tenants() {
        wtr.write_record([
            t.id.to_string(),
            t.first_name.clone(),
            t.last_name.clone(),
            t.email.clone(),
            t.phone.clone(),
            store.building_name(t.building_id).to_string(),
            t.apartment.clone(),
            t.cold_rent.to_string(),
            t.operating_costs_advance.to_string(),
            t.heating_costs_advance.to_string(),
            t.warm_rent.to_string(),
            t.security_deposit.to_string(),
            t.move_in_date.to_string(),
            t.lease_end_date.map(|d| d.to_string()).unwrap_or_default(),
            t.active.to_string(),
            t.iban.clone().unwrap_or_default(),
            t.bank_name.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn buildings_csv(store: &Store, out: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "id",
        "name",
        "address",
        "units",
        "occupied_units",
        "total_rent",
        "year_built",
        "description",
        "color",
    ])?;
    for b in store.buildings() {
        let stats = store.building_stats(b.id);
        wtr.write_record([
            b.id.to_string(),
            b.name.clone(),
            b.address.clone(),
            b.units.to_string(),
            stats.occupied_units.to_string(),
            stats.total_rent.to_string(),
            b.year_built.map(|y| y.to_string()).unwrap_or_default(),
            b.description.clone().unwrap_or_default(),
            b.color.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn utilities_csv(store: &Store, out: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)?;
    wtr.write_record([
        "id",
        "tenant_id",
        "type",
        "month",
        "advance_payment",
        "actual_consumption",
        "actual_cost",
        "difference",
        "settled",
    ])?;
    for p in store.utility_payments() {
        wtr.write_record([
            p.id.to_string(),
            p.tenant_id.to_string(),
            p.r#type.to_string(),
            p.month.clone(),
            p.advance_payment.to_string(),
            p.actual_consumption
                .map(|c| c.to_string())
                .unwrap_or_default(),
            p.actual_cost.to_string(),
            p.difference.to_string(),
            p.settled.map(|s| s.to_string()).unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
