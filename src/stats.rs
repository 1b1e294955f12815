// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Occupancy and rent figures derived from the current collections.
//!
//! Nothing here is cached or written back; each call rescans its input.

use crate::models::{Building, Id, Tenant, UtilityPayment, UtilityType};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingStats {
    pub total_rent: Decimal,
    pub occupied_units: u32,
}

/// Sum of `rent_amount` and head count over the active tenants of one building.
pub fn building_stats(tenants: &[Tenant], building_id: Id) -> BuildingStats {
    tenants
        .iter()
        .filter(|t| t.building_id == building_id && t.active)
        .fold(BuildingStats::default(), |acc, t| BuildingStats {
            total_rent: acc.total_rent + t.rent_amount,
            occupied_units: acc.occupied_units + 1,
        })
}

/// Copies of `buildings` with their totals overlaid from [`building_stats`].
pub fn with_stats(buildings: &[Building], tenants: &[Tenant]) -> Vec<Building> {
    buildings
        .iter()
        .map(|b| {
            let stats = building_stats(tenants, b.id);
            Building {
                total_rent: stats.total_rent,
                occupied_units: stats.occupied_units,
                ..b.clone()
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub buildings: usize,
    pub total_units: u32,
    pub active_tenants: usize,
    pub vacant_units: u32,
    pub monthly_rent: Decimal,
}

pub fn portfolio_summary(buildings: &[Building], tenants: &[Tenant]) -> PortfolioSummary {
    let total_units: u32 = buildings.iter().map(|b| b.units).sum();
    let occupied: u32 = buildings
        .iter()
        .map(|b| building_stats(tenants, b.id).occupied_units.min(b.units))
        .sum();
    let active: Vec<&Tenant> = tenants.iter().filter(|t| t.active).collect();
    PortfolioSummary {
        buildings: buildings.len(),
        total_units,
        active_tenants: active.len(),
        vacant_units: total_units.saturating_sub(occupied),
        monthly_rent: active.iter().map(|t| t.rent_amount).sum(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityTotals {
    pub advance_payments: Decimal,
    pub actual_costs: Decimal,
    /// Positive: refund owed to the tenant. Negative: tenant owes a top-up.
    pub difference: Decimal,
}

impl UtilityTotals {
    fn add(&mut self, p: &UtilityPayment) {
        self.advance_payments += p.advance_payment;
        self.actual_costs += p.actual_cost;
        self.difference += p.difference;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilitySummary {
    pub tenant_id: Id,
    pub heating: UtilityTotals,
    pub water: UtilityTotals,
    pub open_items: usize,
}

impl UtilitySummary {
    pub fn balance(&self) -> Decimal {
        self.heating.difference + self.water.difference
    }
}

/// Per-type totals of one tenant's utility payments. A payment counts as
/// open unless it is explicitly marked settled.
pub fn utility_summary(payments: &[UtilityPayment], tenant_id: Id) -> UtilitySummary {
    let mut summary = UtilitySummary {
        tenant_id,
        ..Default::default()
    };
    for p in payments.iter().filter(|p| p.tenant_id == tenant_id) {
        match p.r#type {
            UtilityType::Heating => summary.heating.add(p),
            UtilityType::Water => summary.water.add(p),
        }
        if p.settled != Some(true) {
            summary.open_items += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BuildingColor;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn building(id: Id, units: u32) -> Building {
        Building {
            id,
            name: format!("B{id}"),
            address: "Main St 1".into(),
            units,
            year_built: None,
            description: None,
            color: BuildingColor::default(),
            total_rent: Decimal::ZERO,
            occupied_units: 0,
        }
    }

    fn tenant(id: Id, building_id: Id, rent: &str, active: bool) -> Tenant {
        Tenant {
            id,
            first_name: "T".into(),
            last_name: id.to_string(),
            email: String::new(),
            phone: String::new(),
            apartment: id.to_string(),
            building_id,
            cold_rent: dec(rent),
            operating_costs_advance: Decimal::ZERO,
            heating_costs_advance: Decimal::ZERO,
            warm_rent: dec(rent),
            rent_amount: dec(rent),
            security_deposit: Decimal::ZERO,
            move_in_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            lease_end_date: None,
            active,
            iban: None,
            bank_name: None,
        }
    }

    fn payment(
        id: Id,
        tenant_id: Id,
        t: UtilityType,
        adv: &str,
        cost: &str,
        settled: Option<bool>,
    ) -> UtilityPayment {
        UtilityPayment {
            id,
            tenant_id,
            r#type: t,
            month: "2025-01".into(),
            advance_payment: dec(adv),
            actual_consumption: None,
            actual_cost: dec(cost),
            difference: dec(adv) - dec(cost),
            settled,
        }
    }

    #[test]
    fn building_stats_counts_only_active_tenants_of_that_building() {
        let tenants = vec![
            tenant(10, 1, "650", true),
            tenant(11, 1, "700", false),
            tenant(12, 2, "400", true),
        ];
        let stats = building_stats(&tenants, 1);
        assert_eq!(stats.occupied_units, 1);
        assert_eq!(stats.total_rent, dec("650"));
        assert_eq!(building_stats(&tenants, 99), BuildingStats::default());
    }

    #[test]
    fn with_stats_leaves_input_untouched() {
        let buildings = vec![building(1, 4)];
        let tenants = vec![tenant(10, 1, "650", true), tenant(11, 1, "350", true)];
        let view = with_stats(&buildings, &tenants);
        assert_eq!(view[0].occupied_units, 2);
        assert_eq!(view[0].total_rent, dec("1000"));
        assert_eq!(buildings[0].occupied_units, 0);
        assert_eq!(buildings[0].total_rent, Decimal::ZERO);
    }

    #[test]
    fn portfolio_summary_ignores_orphans_for_vacancy() {
        let buildings = vec![building(1, 2), building(2, 3)];
        let tenants = vec![
            tenant(10, 1, "500", true),
            tenant(11, 1, "500", true),
            tenant(12, 1, "500", true),
            tenant(13, 42, "300", true),
            tenant(14, 2, "900", false),
        ];
        let s = portfolio_summary(&buildings, &tenants);
        assert_eq!(s.buildings, 2);
        assert_eq!(s.total_units, 5);
        assert_eq!(s.active_tenants, 4);
        // building 1 is over-occupied; it counts as full, not negative
        assert_eq!(s.vacant_units, 3);
        assert_eq!(s.monthly_rent, dec("1800"));
    }

    #[test]
    fn utility_summary_splits_by_type() {
        let payments = vec![
            payment(1, 7, UtilityType::Heating, "80", "95.50", None),
            payment(2, 7, UtilityType::Heating, "80", "60", Some(true)),
            payment(3, 7, UtilityType::Water, "30", "20", Some(false)),
            payment(4, 8, UtilityType::Water, "30", "10", None),
        ];
        let s = utility_summary(&payments, 7);
        assert_eq!(s.heating.advance_payments, dec("160"));
        assert_eq!(s.heating.actual_costs, dec("155.50"));
        assert_eq!(s.heating.difference, dec("4.50"));
        assert_eq!(s.water.difference, dec("10"));
        assert_eq!(s.open_items, 2);
        assert_eq!(s.balance(), dec("14.50"));
    }
}
