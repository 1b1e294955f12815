// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::finances::{ExpenseCategory, Expenses, OtherIncome, TaxAdvanceSchedule, estimate};
use crate::store::Store;
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, optional_text, parse_amount, parse_decimal,
    pretty_table,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn amount(sub: &clap::ArgMatches, name: &str) -> Result<Decimal> {
    match optional_text(sub, name) {
        Some(s) => parse_amount(&s),
        None => Ok(Decimal::ZERO),
    }
}

/// Other income can be negative (e.g. business losses).
fn signed(sub: &clap::ArgMatches, name: &str) -> Result<Decimal> {
    match optional_text(sub, name) {
        Some(s) => parse_decimal(&s),
        None => Ok(Decimal::ZERO),
    }
}

pub fn inputs(sub: &clap::ArgMatches) -> Result<(OtherIncome, Expenses, TaxAdvanceSchedule)> {
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| Utc::now().year());
    let other = OtherIncome {
        personal_income: amount(sub, "personal-income")?,
        capital_income: signed(sub, "capital-income")?,
        other_personal_income: signed(sub, "other-income")?,
        other_rental_income: amount(sub, "other-rental-income")?,
    };
    let expenses = Expenses {
        property_tax: amount(sub, "property-tax")?,
        insurance: amount(sub, "insurance")?,
        repairs: amount(sub, "repairs")?,
        administration: amount(sub, "administration")?,
        tax_advisor: amount(sub, "tax-advisor")?,
        depreciation: amount(sub, "depreciation")?,
        financing_costs: amount(sub, "financing")?,
    };
    let mut schedule = TaxAdvanceSchedule::for_year(year)?;
    for (quarter, name) in (1u8..).zip(["q1", "q2", "q3", "q4"]) {
        schedule.set_amount(quarter, amount(sub, name)?)?;
    }
    if let Some(paid) = sub.get_many::<u8>("paid") {
        for q in paid {
            schedule.mark_paid(*q, None)?;
        }
    }
    Ok((other, expenses, schedule))
}

pub fn handle(store: &Store, conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (other, expenses, schedule) = inputs(sub)?;
    let s = estimate(store.tenants(), &other, &expenses, &schedule);
    if sub.get_flag("json") {
        let v = serde_json::json!({
            "summary": s,
            "expenses": expenses,
            "otherIncome": other,
            "taxAdvances": schedule,
        });
        maybe_print_json(true, false, &v)?;
        return Ok(());
    }

    let ccy = get_currency(conn)?;
    let mut rows = vec![
        vec![
            "Rental income (warm rent x 12)".into(),
            fmt_money(&s.total_rental_income, &ccy),
        ],
        vec![
            "Other rental income".into(),
            fmt_money(&s.other_rental_income, &ccy),
        ],
    ];
    for c in ExpenseCategory::ALL {
        rows.push(vec![
            format!("- {}", c.label()),
            fmt_money(&expenses.get(c), &ccy),
        ]);
    }
    rows.push(vec![
        "Total expenses".into(),
        fmt_money(&s.total_expenses, &ccy),
    ]);
    rows.push(vec![
        "Net rental income".into(),
        fmt_money(&s.net_rental_income, &ccy),
    ]);
    rows.push(vec!["Total income".into(), fmt_money(&s.total_income, &ccy)]);
    rows.push(vec![
        "Estimated tax rate".into(),
        format!("{}%", s.estimated_tax_rate),
    ]);
    rows.push(vec![
        "Estimated tax".into(),
        fmt_money(&s.estimated_tax, &ccy),
    ]);
    println!("Finances {}", s.year);
    println!("{}", pretty_table(&["Item", "Amount"], rows));

    let today = Utc::now().date_naive();
    let adv: Vec<Vec<String>> = schedule
        .payments
        .iter()
        .map(|p| {
            vec![
                format!("Q{}", p.quarter),
                p.due_date.to_string(),
                fmt_money(&p.amount, &ccy),
                status(p.paid, p.due_date, today).to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Quarter", "Due", "Amount", "Status"], adv)
    );
    println!(
        "Advances {} (paid {}), outstanding {}",
        fmt_money(&s.total_tax_advances, &ccy),
        fmt_money(&s.paid_tax_advances, &ccy),
        fmt_money(&s.outstanding_tax, &ccy)
    );
    Ok(())
}

fn status(paid: bool, due: NaiveDate, today: NaiveDate) -> &'static str {
    if paid {
        "paid"
    } else if due < today {
        "overdue"
    } else {
        "open"
    }
}
