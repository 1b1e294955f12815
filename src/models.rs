// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ParseError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Id = i64;

/// Display tag for a building. Unknown tags are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildingColor {
    #[default]
    Blue,
    Green,
    Purple,
    Red,
    Yellow,
    Indigo,
    Other(String),
}

impl BuildingColor {
    pub const KNOWN: [BuildingColor; 6] = [
        BuildingColor::Blue,
        BuildingColor::Green,
        BuildingColor::Purple,
        BuildingColor::Red,
        BuildingColor::Yellow,
        BuildingColor::Indigo,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BuildingColor::Blue => "blue",
            BuildingColor::Green => "green",
            BuildingColor::Purple => "purple",
            BuildingColor::Red => "red",
            BuildingColor::Yellow => "yellow",
            BuildingColor::Indigo => "indigo",
            BuildingColor::Other(s) => s,
        }
    }
}

impl From<&str> for BuildingColor {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "blue" => BuildingColor::Blue,
            "green" => BuildingColor::Green,
            "purple" => BuildingColor::Purple,
            "red" => BuildingColor::Red,
            "yellow" => BuildingColor::Yellow,
            "indigo" => BuildingColor::Indigo,
            _ => BuildingColor::Other(s.trim().to_string()),
        }
    }
}

impl From<String> for BuildingColor {
    fn from(s: String) -> Self {
        BuildingColor::from(s.as_str())
    }
}

impl From<BuildingColor> for String {
    fn from(c: BuildingColor) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for BuildingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A managed building.
///
/// `total_rent` and `occupied_units` are placeholders; the current figures
/// always come from [`crate::stats::building_stats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: Id,
    pub name: String,
    pub address: String,
    pub units: u32,
    pub year_built: Option<i32>,
    pub description: Option<String>,
    pub color: BuildingColor,
    pub total_rent: Decimal,
    pub occupied_units: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBuilding {
    pub name: String,
    pub address: String,
    pub units: u32,
    pub year_built: Option<i32>,
    pub description: Option<String>,
    pub color: BuildingColor,
}

/// Partial update for a [`Building`]. The derived totals are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildingPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub units: Option<u32>,
    pub year_built: Option<Option<i32>>,
    pub description: Option<Option<String>>,
    pub color: Option<BuildingColor>,
}

impl BuildingPatch {
    pub fn is_empty(&self) -> bool {
        *self == BuildingPatch::default()
    }

    pub fn apply(self, b: &mut Building) {
        if let Some(v) = self.name {
            b.name = v;
        }
        if let Some(v) = self.address {
            b.address = v;
        }
        if let Some(v) = self.units {
            b.units = v;
        }
        if let Some(v) = self.year_built {
            b.year_built = v;
        }
        if let Some(v) = self.description {
            b.description = v;
        }
        if let Some(v) = self.color {
            b.color = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub apartment: String,
    pub building_id: Id,
    pub cold_rent: Decimal,
    pub operating_costs_advance: Decimal,
    pub heating_costs_advance: Decimal,
    pub warm_rent: Decimal,
    /// Legacy duplicate of `warm_rent`, still read by building statistics.
    pub rent_amount: Decimal,
    pub security_deposit: Decimal,
    pub move_in_date: NaiveDate,
    pub lease_end_date: Option<NaiveDate>,
    pub active: bool,
    pub iban: Option<String>,
    pub bank_name: Option<String>,
}

impl Tenant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTenant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub apartment: String,
    pub building_id: Id,
    pub cold_rent: Decimal,
    pub operating_costs_advance: Decimal,
    pub heating_costs_advance: Decimal,
    pub security_deposit: Decimal,
    pub move_in_date: NaiveDate,
    pub lease_end_date: Option<NaiveDate>,
    pub active: bool,
    pub iban: Option<String>,
    pub bank_name: Option<String>,
}

impl NewTenant {
    pub fn warm_rent(&self) -> Decimal {
        self.cold_rent + self.operating_costs_advance + self.heating_costs_advance
    }
}

/// Partial update for a [`Tenant`].
///
/// Changing one of the rent components does not touch `warm_rent` or
/// `rent_amount`; supply those explicitly to keep them in step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenantPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub apartment: Option<String>,
    pub building_id: Option<Id>,
    pub cold_rent: Option<Decimal>,
    pub operating_costs_advance: Option<Decimal>,
    pub heating_costs_advance: Option<Decimal>,
    pub warm_rent: Option<Decimal>,
    pub rent_amount: Option<Decimal>,
    pub security_deposit: Option<Decimal>,
    pub move_in_date: Option<NaiveDate>,
    pub lease_end_date: Option<Option<NaiveDate>>,
    pub active: Option<bool>,
    pub iban: Option<Option<String>>,
    pub bank_name: Option<Option<String>>,
}

impl TenantPatch {
    pub fn is_empty(&self) -> bool {
        *self == TenantPatch::default()
    }

    pub fn apply(self, t: &mut Tenant) {
        if let Some(v) = self.first_name {
            t.first_name = v;
        }
        if let Some(v) = self.last_name {
            t.last_name = v;
        }
        if let Some(v) = self.email {
            t.email = v;
        }
        if let Some(v) = self.phone {
            t.phone = v;
        }
        if let Some(v) = self.apartment {
            t.apartment = v;
        }
        if let Some(v) = self.building_id {
            t.building_id = v;
        }
        if let Some(v) = self.cold_rent {
            t.cold_rent = v;
        }
        if let Some(v) = self.operating_costs_advance {
            t.operating_costs_advance = v;
        }
        if let Some(v) = self.heating_costs_advance {
            t.heating_costs_advance = v;
        }
        if let Some(v) = self.warm_rent {
            t.warm_rent = v;
        }
        if let Some(v) = self.rent_amount {
            t.rent_amount = v;
        }
        if let Some(v) = self.security_deposit {
            t.security_deposit = v;
        }
        if let Some(v) = self.move_in_date {
            t.move_in_date = v;
        }
        if let Some(v) = self.lease_end_date {
            t.lease_end_date = v;
        }
        if let Some(v) = self.active {
            t.active = v;
        }
        if let Some(v) = self.iban {
            t.iban = v;
        }
        if let Some(v) = self.bank_name {
            t.bank_name = v;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityType {
    Heating,
    Water,
}

impl UtilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UtilityType::Heating => "heating",
            UtilityType::Water => "water",
        }
    }
}

impl FromStr for UtilityType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heating" => Ok(UtilityType::Heating),
            "water" => Ok(UtilityType::Water),
            other => Err(ParseError::UtilityType(other.to_string())),
        }
    }
}

impl fmt::Display for UtilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One month of utility advances for a tenant, reconciled against the
/// actual cost. `difference` > 0 is a refund owed to the tenant, < 0 a
/// top-up the tenant owes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityPayment {
    pub id: Id,
    pub tenant_id: Id,
    #[serde(rename = "type")]
    pub r#type: UtilityType,
    pub month: String, // YYYY-MM
    pub advance_payment: Decimal,
    pub actual_consumption: Option<Decimal>,
    pub actual_cost: Decimal,
    pub difference: Decimal,
    pub settled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUtilityPayment {
    pub tenant_id: Id,
    pub r#type: UtilityType,
    pub month: String,
    pub advance_payment: Decimal,
    pub actual_consumption: Option<Decimal>,
    pub actual_cost: Decimal,
    pub settled: Option<bool>,
}

impl NewUtilityPayment {
    pub fn difference(&self) -> Decimal {
        self.advance_payment - self.actual_cost
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UtilityPaymentPatch {
    pub tenant_id: Option<Id>,
    pub r#type: Option<UtilityType>,
    pub month: Option<String>,
    pub advance_payment: Option<Decimal>,
    pub actual_consumption: Option<Option<Decimal>>,
    pub actual_cost: Option<Decimal>,
    pub difference: Option<Decimal>,
    pub settled: Option<Option<bool>>,
}

impl UtilityPaymentPatch {
    pub fn is_empty(&self) -> bool {
        *self == UtilityPaymentPatch::default()
    }

    pub fn apply(self, p: &mut UtilityPayment) {
        if let Some(v) = self.tenant_id {
            p.tenant_id = v;
        }
        if let Some(v) = self.r#type {
            p.r#type = v;
        }
        if let Some(v) = self.month {
            p.month = v;
        }
        if let Some(v) = self.advance_payment {
            p.advance_payment = v;
        }
        if let Some(v) = self.actual_consumption {
            p.actual_consumption = v;
        }
        if let Some(v) = self.actual_cost {
            p.actual_cost = v;
        }
        if let Some(v) = self.difference {
            p.difference = v;
        }
        if let Some(v) = self.settled {
            p.settled = v;
        }
    }
}

/// Full copy of the store's collections, handed to and from persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub next_id: Id,
    pub buildings: Vec<Building>,
    pub tenants: Vec<Tenant>,
    pub utility_payments: Vec<UtilityPayment>,
}
