// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Building, BuildingColor, Id, Snapshot, Tenant, UtilityPayment, UtilityType};
use crate::store::Store;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Rentbook", "rentbook"));

pub const DB_ENV: &str = "RENTBOOK_DB";

/// Data file location: explicit override, then `RENTBOOK_DB`, then the
/// platform data dir.
pub fn db_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = override_path {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = std::env::var_os(DB_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("rentbook.sqlite"))
}

pub fn open_or_init(override_path: Option<&Path>) -> Result<Connection> {
    let path = db_path(override_path)?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS buildings(
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        units INTEGER NOT NULL DEFAULT 0,
        year_built INTEGER,
        description TEXT,
        color TEXT NOT NULL DEFAULT 'blue'
    );

    -- building_id / tenant_id carry no foreign keys: orphans are kept as-is
    CREATE TABLE IF NOT EXISTS tenants(
        id INTEGER PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        apartment TEXT NOT NULL,
        building_id INTEGER NOT NULL,
        cold_rent TEXT NOT NULL,
        operating_costs_advance TEXT NOT NULL,
        heating_costs_advance TEXT NOT NULL,
        warm_rent TEXT NOT NULL,
        rent_amount TEXT NOT NULL,
        security_deposit TEXT NOT NULL DEFAULT '0',
        move_in_date TEXT NOT NULL,
        lease_end_date TEXT,
        active INTEGER NOT NULL,
        iban TEXT,
        bank_name TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_tenants_building ON tenants(building_id);

    CREATE TABLE IF NOT EXISTS utility_payments(
        id INTEGER PRIMARY KEY,
        tenant_id INTEGER NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('heating','water')),
        month TEXT NOT NULL,
        advance_payment TEXT NOT NULL,
        actual_consumption TEXT,
        actual_cost TEXT NOT NULL,
        difference TEXT NOT NULL,
        settled INTEGER
    );
    CREATE INDEX IF NOT EXISTS idx_utility_payments_tenant ON utility_payments(tenant_id);
    "#,
    )?;
    Ok(())
}

fn dec(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}'", what, s))
}

fn date(s: &str, what: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid {} '{}'", what, s))
}

pub fn load_store(conn: &Connection) -> Result<Store> {
    let snapshot = load_snapshot(conn)?;
    info!(
        buildings = snapshot.buildings.len(),
        tenants = snapshot.tenants.len(),
        utility_payments = snapshot.utility_payments.len(),
        "snapshot loaded"
    );
    Ok(Store::from_snapshot(snapshot))
}

pub fn load_snapshot(conn: &Connection) -> Result<Snapshot> {
    let next_id: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='next_id'", [], |r| {
            r.get(0)
        })
        .optional()?;
    let next_id = match next_id {
        Some(s) => s
            .parse::<Id>()
            .with_context(|| format!("Invalid id counter '{}'", s))?,
        None => 1,
    };

    let mut buildings = Vec::new();
    let mut stmt = conn.prepare(
        "SELECT id, name, address, units, year_built, description, color FROM buildings ORDER BY rowid",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let color: String = r.get(6)?;
        buildings.push(Building {
            id: r.get(0)?,
            name: r.get(1)?,
            address: r.get(2)?,
            units: r.get(3)?,
            year_built: r.get(4)?,
            description: r.get(5)?,
            color: BuildingColor::from(color),
            total_rent: Decimal::ZERO,
            occupied_units: 0,
        });
    }

    let mut tenants = Vec::new();
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, email, phone, apartment, building_id,
                cold_rent, operating_costs_advance, heating_costs_advance, warm_rent,
                rent_amount, security_deposit, move_in_date, lease_end_date, active,
                iban, bank_name
         FROM tenants ORDER BY rowid",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let lease_end: Option<String> = r.get(14)?;
        tenants.push(Tenant {
            id: r.get(0)?,
            first_name: r.get(1)?,
            last_name: r.get(2)?,
            email: r.get(3)?,
            phone: r.get(4)?,
            apartment: r.get(5)?,
            building_id: r.get(6)?,
            cold_rent: dec(&r.get::<_, String>(7)?, "cold rent")?,
            operating_costs_advance: dec(&r.get::<_, String>(8)?, "operating costs advance")?,
            heating_costs_advance: dec(&r.get::<_, String>(9)?, "heating costs advance")?,
            warm_rent: dec(&r.get::<_, String>(10)?, "warm rent")?,
            rent_amount: dec(&r.get::<_, String>(11)?, "rent amount")?,
            security_deposit: dec(&r.get::<_, String>(12)?, "security deposit")?,
            move_in_date: date(&r.get::<_, String>(13)?, "move-in date")?,
            lease_end_date: lease_end
                .map(|s| date(&s, "lease end date"))
                .transpose()?,
            active: r.get(15)?,
            iban: r.get(16)?,
            bank_name: r.get(17)?,
        });
    }

    let mut utility_payments = Vec::new();
    let mut stmt = conn.prepare(
        "SELECT id, tenant_id, type, month, advance_payment, actual_consumption,
                actual_cost, difference, settled
         FROM utility_payments ORDER BY rowid",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let kind: String = r.get(2)?;
        let consumption: Option<String> = r.get(5)?;
        utility_payments.push(UtilityPayment {
            id: r.get(0)?,
            tenant_id: r.get(1)?,
            r#type: kind.parse::<UtilityType>()?,
            month: r.get(3)?,
            advance_payment: dec(&r.get::<_, String>(4)?, "advance payment")?,
            actual_consumption: consumption
                .map(|s| dec(&s, "consumption"))
                .transpose()?,
            actual_cost: dec(&r.get::<_, String>(6)?, "actual cost")?,
            difference: dec(&r.get::<_, String>(7)?, "difference")?,
            settled: r.get(8)?,
        });
    }

    Ok(Snapshot {
        next_id,
        buildings,
        tenants,
        utility_payments,
    })
}

/// Replace the stored collections with the store's current contents.
pub fn save_store(conn: &mut Connection, store: &Store) -> Result<()> {
    save_snapshot(conn, &store.snapshot())
}

pub fn save_snapshot(conn: &mut Connection, s: &Snapshot) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        "DELETE FROM buildings; DELETE FROM tenants; DELETE FROM utility_payments;",
    )?;
    for b in &s.buildings {
        tx.execute(
            "INSERT INTO buildings(id, name, address, units, year_built, description, color)
             VALUES (?1,?2,?3,?4,?5,?6,?7)",
            params![
                b.id,
                b.name,
                b.address,
                b.units,
                b.year_built,
                b.description,
                b.color.as_str()
            ],
        )?;
    }
    for t in &s.tenants {
        tx.execute(
            "INSERT INTO tenants(id, first_name, last_name, email, phone, apartment, building_id,
                cold_rent, operating_costs_advance, heating_costs_advance, warm_rent, rent_amount,
                security_deposit, move_in_date, lease_end_date, active, iban, bank_name)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18)",
            params![
                t.id,
                t.first_name,
                t.last_name,
                t.email,
                t.phone,
                t.apartment,
                t.building_id,
                t.cold_rent.to_string(),
                t.operating_costs_advance.to_string(),
                t.heating_costs_advance.to_string(),
                t.warm_rent.to_string(),
                t.rent_amount.to_string(),
                t.security_deposit.to_string(),
                t.move_in_date.to_string(),
                t.lease_end_date.map(|d| d.to_string()),
                t.active,
                t.iban,
                t.bank_name
            ],
        )?;
    }
    for p in &s.utility_payments {
        tx.execute(
            "INSERT INTO utility_payments(id, tenant_id, type, month, advance_payment,
                actual_consumption, actual_cost, difference, settled)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
            params![
                p.id,
                p.tenant_id,
                p.r#type.as_str(),
                p.month,
                p.advance_payment.to_string(),
                p.actual_consumption.map(|d| d.to_string()),
                p.actual_cost.to_string(),
                p.difference.to_string(),
                p.settled
            ],
        )?;
    }
    tx.execute(
        "INSERT INTO settings(key, value) VALUES('next_id', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![s.next_id.to_string()],
    )?;
    tx.commit()?;
    info!(
        buildings = s.buildings.len(),
        tenants = s.tenants.len(),
        utility_payments = s.utility_payments.len(),
        "snapshot saved"
    );
    Ok(())
}
