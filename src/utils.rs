// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ParseError;
use crate::models::Id;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

static IBAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{11,30}$").expect("static IBAN pattern"));

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s.trim()))
}

/// Returns the month in canonical `YYYY-MM` form, so `2025-2` becomes `2025-02`.
pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(d.format("%Y-%m").to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s.trim()))
}

/// Money inputs are non-negative amounts.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(anyhow!("Amount '{}' must not be negative", s.trim()));
    }
    Ok(d)
}

pub fn parse_id(s: &str) -> Result<Id> {
    s.trim()
        .parse::<Id>()
        .with_context(|| format!("Invalid id '{}'", s.trim()))
}

pub fn parse_units(s: &str) -> Result<u32> {
    s.trim()
        .parse::<u32>()
        .with_context(|| format!("Invalid unit count '{}'", s.trim()))
}

pub fn parse_year(s: &str) -> Result<i32> {
    s.trim()
        .parse::<i32>()
        .with_context(|| format!("Invalid year '{}'", s.trim()))
}

/// Strips spaces and upper-cases, then checks the country/check-digit shape.
/// The mod-97 checksum is left to the bank.
pub fn normalize_iban(s: &str) -> Result<String, ParseError> {
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if IBAN_RE.is_match(&compact) {
        Ok(compact)
    } else {
        Err(ParseError::Iban(s.trim().to_string()))
    }
}

/// Trimmed value of a required text argument; empty counts as missing.
pub fn required_text(sub: &clap::ArgMatches, name: &str, label: &str) -> Result<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| anyhow!("{} is required", label))
}

pub fn optional_text(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// For patches of optional fields: absent -> untouched, empty -> cleared.
pub fn clearable_text(sub: &clap::ArgMatches, name: &str) -> Option<Option<String>> {
    sub.get_one::<String>(name).map(|s| {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    })
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{:.2} {}", d.round_dp(2), ccy)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn get_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='currency'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| "EUR".to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iban_is_compacted_and_checked() {
        assert_eq!(
            normalize_iban("de89 3704 0044 0532 0130 00").unwrap(),
            "DE89370400440532013000"
        );
        assert!(matches!(normalize_iban("12345"), Err(ParseError::Iban(_))));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount(" 0 ").unwrap().is_zero());
        assert_eq!(parse_amount("12.50").unwrap().to_string(), "12.50");
    }

    #[test]
    fn month_must_be_year_and_month() {
        assert_eq!(parse_month(" 2025-02 ").unwrap(), "2025-02");
        assert_eq!(parse_month("2025-2").unwrap(), "2025-02");
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("2025-02-01").is_err());
    }
}
