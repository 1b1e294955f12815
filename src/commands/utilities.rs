// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewUtilityPayment, UtilityPayment, UtilityPaymentPatch, UtilityType};
use crate::store::Store;
use crate::utils::{
    clearable_text, maybe_print_json, optional_text, parse_amount, parse_decimal, parse_id,
    parse_month, pretty_table, required_text,
};
use anyhow::Result;

/// Runs a `utility` subcommand and reports whether the store changed.
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
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let removed = store.delete_utility_payment(id);
            if removed {
                println!("Removed utility payment {}", id);
            } else {
                println!("No utility payment with id {}", id);
            }
            removed
        }
        _ => false,
    };
    Ok(changed)
}

pub fn new_payment(sub: &clap::ArgMatches) -> Result<NewUtilityPayment> {
    let tenant_id = parse_id(&required_text(sub, "tenant", "Tenant")?)?;
    let r#type = required_text(sub, "type", "Type")?.parse::<UtilityType>()?;
    let month = parse_month(&required_text(sub, "month", "Month")?)?;
    let advance_payment = parse_amount(&required_text(sub, "advance", "Advance payment")?)?;
    let actual_cost = parse_amount(&required_text(sub, "actual-cost", "Actual cost")?)?;
    let actual_consumption = optional_text(sub, "consumption")
        .map(|s| parse_amount(&s))
        .transpose()?;
    Ok(NewUtilityPayment {
        tenant_id,
        r#type,
        month,
        advance_payment,
        actual_consumption,
        actual_cost,
        settled: sub.get_flag("settled").then_some(true),
    })
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_payment(sub)?;
    let p = store.add_utility_payment(new);
    let verdict = if p.difference.is_sign_negative() && !p.difference.is_zero() {
        "tenant owes"
    } else {
        "refund due"
    };
    println!(
        "Recorded {} for {} (id {}): difference {:.2}, {}",
        p.r#type,
        p.month,
        p.id,
        p.difference.abs(),
        verdict
    );
    Ok(())
}

pub fn payment_patch(sub: &clap::ArgMatches) -> Result<UtilityPaymentPatch> {
    let actual_consumption = match clearable_text(sub, "consumption") {
        Some(Some(s)) => Some(Some(parse_amount(&s)?)),
        Some(None) => Some(None),
        None => None,
    };
    Ok(UtilityPaymentPatch {
        tenant_id: sub
            .get_one::<String>("tenant")
            .map(|s| parse_id(s))
            .transpose()?,
        r#type: sub
            .get_one::<String>("type")
            .map(|s| s.parse::<UtilityType>())
            .transpose()?,
        month: sub
            .get_one::<String>("month")
            .map(|s| parse_month(s))
            .transpose()?,
        advance_payment: sub
            .get_one::<String>("advance")
            .map(|s| parse_amount(s))
            .transpose()?,
        actual_consumption,
        actual_cost: sub
            .get_one::<String>("actual-cost")
            .map(|s| parse_amount(s))
            .transpose()?,
        difference: sub
            .get_one::<String>("difference")
            .map(|s| parse_decimal(s))
            .transpose()?,
        settled: sub.get_one::<bool>("settled").map(|b| Some(*b)),
    })
}

fn update(store: &mut Store, sub: &clap::ArgMatches) -> Result<bool> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let patch = payment_patch(sub)?;
    let found = store.update_utility_payment(id, patch);
    if found {
        println!("Updated utility payment {}", id);
    } else {
        println!("No utility payment with id {}", id);
    }
    Ok(found)
}

pub fn query_rows<'a>(
    store: &'a Store,
    sub: &clap::ArgMatches,
) -> Result<Vec<&'a UtilityPayment>> {
    match optional_text(sub, "tenant") {
        Some(s) => Ok(store.utility_payments_for_tenant(parse_id(&s)?)),
        None => Ok(store.utility_payments().iter().collect()),
    }
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| {
                let tenant = store
                    .tenant(p.tenant_id)
                    .map(|t| t.full_name())
                    .unwrap_or_else(|| format!("#{}", p.tenant_id));
                vec![
                    p.id.to_string(),
                    tenant,
                    p.month.clone(),
                    p.r#type.to_string(),
                    format!("{:.2}", p.advance_payment),
                    p.actual_consumption
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                    format!("{:.2}", p.actual_cost),
                    format!("{:.2}", p.difference),
                    if p.settled == Some(true) { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Tenant",
                    "Month",
                    "Type",
                    "Advance",
                    "Consumption",
                    "Actual",
                    "Difference",
                    "Settled"
                ],
                rows,
            )
        );
    }
    Ok(())
}
