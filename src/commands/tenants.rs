// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewTenant, Tenant, TenantPatch};
use crate::stats::utility_summary;
use crate::store::Store;
use crate::utils::{
    clearable_text, maybe_print_json, normalize_iban, optional_text, parse_amount, parse_date,
    parse_id, pretty_table, required_text,
};
use anyhow::{Result, anyhow};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

/// Runs a `tenant` subcommand and reports whether the store changed.
pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<bool> {
    let changed = match m.subcommand() {
        Some(("add", sub)) => {
            add(store, sub)?;
            true
        }
        Some(("list", sub)) => {
            list(store, sub)?;
            false
        }
        Some(("show", sub)) => {
            show(store, sub)?;
            false
        }
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let removed = store.delete_tenant(id);
            if removed {
                println!("Removed tenant {}", id);
            } else {
                println!("No tenant with id {}", id);
            }
            removed
        }
        _ => false,
    };
    Ok(changed)
}

fn amount_or_zero(sub: &clap::ArgMatches, name: &str) -> Result<Decimal> {
    match optional_text(sub, name) {
        Some(s) => parse_amount(&s),
        None => Ok(Decimal::ZERO),
    }
}

fn amount_patch(sub: &clap::ArgMatches, name: &str) -> Result<Option<Decimal>> {
    sub.get_one::<String>(name)
        .map(|s| parse_amount(s))
        .transpose()
}

fn iban_patch(sub: &clap::ArgMatches) -> Result<Option<Option<String>>> {
    match clearable_text(sub, "iban") {
        Some(Some(s)) => Ok(Some(Some(normalize_iban(&s)?))),
        other => Ok(other),
    }
}

/// Reads and gates the add form: first and last name, building and
/// apartment must be present. The building id is not checked against the
/// store.
pub fn new_tenant(sub: &clap::ArgMatches) -> Result<NewTenant> {
    let first_name = required_text(sub, "first-name", "First name")?;
    let last_name = required_text(sub, "last-name", "Last name")?;
    let building_id = parse_id(&required_text(sub, "building", "Building")?)?;
    let apartment = required_text(sub, "apartment", "Apartment")?;
    let move_in_date = match optional_text(sub, "move-in") {
        Some(s) => parse_date(&s)?,
        None => Utc::now().date_naive(),
    };
    let lease_end_date = optional_text(sub, "lease-end")
        .map(|s| parse_date(&s))
        .transpose()?;
    if let Some(end) = lease_end_date {
        if end < move_in_date {
            return Err(anyhow!(
                "Lease end {} is before move-in {}",
                end,
                move_in_date
            ));
        }
    }
    Ok(NewTenant {
        first_name,
        last_name,
        email: optional_text(sub, "email").unwrap_or_default(),
        phone: optional_text(sub, "phone").unwrap_or_default(),
        apartment,
        building_id,
        cold_rent: amount_or_zero(sub, "cold-rent")?,
        operating_costs_advance: amount_or_zero(sub, "operating-costs")?,
        heating_costs_advance: amount_or_zero(sub, "heating-costs")?,
        security_deposit: amount_or_zero(sub, "deposit")?,
        move_in_date,
        lease_end_date,
        active: !sub.get_flag("inactive"),
        iban: optional_text(sub, "iban")
            .map(|s| normalize_iban(&s))
            .transpose()?,
        bank_name: optional_text(sub, "bank"),
    })
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_tenant(sub)?;
    let building = new.building_id;
    let has_building = store.building(building).is_some();
    let t = store.add_tenant(new);
    println!(
        "Added tenant {} (id {}), warm rent {:.2}",
        t.full_name(),
        t.id,
        t.warm_rent
    );
    if !has_building {
        println!("Note: building {} does not exist", building);
    }
    Ok(())
}

/// Builds the patch. Required fields, when supplied, must be non-empty.
pub fn tenant_patch(sub: &clap::ArgMatches) -> Result<TenantPatch> {
    let text = |name: &str, label: &str| -> Result<Option<String>> {
        match sub.get_one::<String>(name) {
            Some(_) => Ok(Some(required_text(sub, name, label)?)),
            None => Ok(None),
        }
    };
    let lease_end_date = match clearable_text(sub, "lease-end") {
        Some(Some(s)) => Some(Some(parse_date(&s)?)),
        Some(None) => Some(None),
        None => None,
    };
    Ok(TenantPatch {
        first_name: text("first-name", "First name")?,
        last_name: text("last-name", "Last name")?,
        email: sub.get_one::<String>("email").map(|s| s.trim().to_string()),
        phone: sub.get_one::<String>("phone").map(|s| s.trim().to_string()),
        apartment: text("apartment", "Apartment")?,
        building_id: sub
            .get_one::<String>("building")
            .map(|s| parse_id(s))
            .transpose()?,
        cold_rent: amount_patch(sub, "cold-rent")?,
        operating_costs_advance: amount_patch(sub, "operating-costs")?,
        heating_costs_advance: amount_patch(sub, "heating-costs")?,
        warm_rent: amount_patch(sub, "warm-rent")?,
        rent_amount: amount_patch(sub, "rent-amount")?,
        security_deposit: amount_patch(sub, "deposit")?,
        move_in_date: sub
            .get_one::<String>("move-in")
            .map(|s| parse_date(s))
            .transpose()?,
        lease_end_date,
        active: sub.get_one::<bool>("active").copied(),
        iban: iban_patch(sub)?,
        bank_name: clearable_text(sub, "bank"),
    })
}

fn update(store: &mut Store, sub: &clap::ArgMatches) -> Result<bool> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let patch = tenant_patch(sub)?;
    let touches_components = patch.cold_rent.is_some()
        || patch.operating_costs_advance.is_some()
        || patch.heating_costs_advance.is_some();
    let sets_totals = patch.warm_rent.is_some() || patch.rent_amount.is_some();
    let found = store.update_tenant(id, patch);
    if found {
        println!("Updated tenant {}", id);
        if touches_components && !sets_totals {
            println!("Note: warm rent is unchanged; pass --warm-rent/--rent-amount to adjust it");
        }
    } else {
        println!("No tenant with id {}", id);
    }
    Ok(found)
}

#[derive(Serialize)]
pub struct TenantRow {
    pub id: i64,
    pub name: String,
    pub building: String,
    pub apartment: String,
    pub warm_rent: String,
    pub move_in: String,
    pub lease_end: String,
    pub active: bool,
}

fn row(store: &Store, t: &Tenant) -> TenantRow {
    TenantRow {
        id: t.id,
        name: t.full_name(),
        building: store.building_name(t.building_id).to_string(),
        apartment: t.apartment.clone(),
        warm_rent: format!("{:.2}", t.warm_rent),
        move_in: t.move_in_date.to_string(),
        lease_end: t
            .lease_end_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open-ended".to_string()),
        active: t.active,
    }
}

/// All tenants, or only those whose building name matches.
pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Vec<TenantRow> {
    let tenants: Vec<&Tenant> = match optional_text(sub, "building-name") {
        Some(name) => store.tenants_in_building_named(&name),
        None => store.tenants().iter().collect(),
    };
    tenants.into_iter().map(|t| row(store, t)).collect()
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.building.clone(),
                    r.apartment.clone(),
                    r.warm_rent.clone(),
                    r.move_in.clone(),
                    r.lease_end.clone(),
                    if r.active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Name",
                    "Building",
                    "Apt",
                    "Warm rent",
                    "Move-in",
                    "Lease end",
                    "Active"
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn show(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let t = store
        .tenant(id)
        .ok_or_else(|| anyhow!("Tenant {} not found", id))?;
    let payments = store.utility_payments_for_tenant(id);
    if sub.get_flag("json") || sub.get_flag("jsonl") {
        let v = serde_json::json!({
            "tenant": t,
            "building": store.building_name(t.building_id),
            "utilityPayments": payments,
            "utilitySummary": utility_summary(store.utility_payments(), id),
        });
        maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)?;
        return Ok(());
    }
    let details = vec![
        vec!["Name".into(), t.full_name()],
        vec!["Building".into(), store.building_name(t.building_id).to_string()],
        vec!["Apartment".into(), t.apartment.clone()],
        vec!["E-mail".into(), t.email.clone()],
        vec!["Phone".into(), t.phone.clone()],
        vec!["Cold rent".into(), format!("{:.2}", t.cold_rent)],
        vec![
            "Operating costs advance".into(),
            format!("{:.2}", t.operating_costs_advance),
        ],
        vec![
            "Heating costs advance".into(),
            format!("{:.2}", t.heating_costs_advance),
        ],
        vec!["Warm rent".into(), format!("{:.2}", t.warm_rent)],
        vec!["Deposit".into(), format!("{:.2}", t.security_deposit)],
        vec!["Move-in".into(), t.move_in_date.to_string()],
        vec![
            "Lease end".into(),
            t.lease_end_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "open-ended".into()),
        ],
        vec!["Active".into(), t.active.to_string()],
        vec!["IBAN".into(), t.iban.clone().unwrap_or_default()],
        vec!["Bank".into(), t.bank_name.clone().unwrap_or_default()],
    ];
    println!("{}", pretty_table(&["Field", "Value"], details));
    if !payments.is_empty() {
        let rows: Vec<Vec<String>> = payments
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    p.r#type.to_string(),
                    format!("{:.2}", p.advance_payment),
                    format!("{:.2}", p.actual_cost),
                    format!("{:.2}", p.difference),
                    if p.settled == Some(true) { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Type", "Advance", "Actual", "Difference", "Settled"],
                rows
            )
        );
    }
    Ok(())
}
