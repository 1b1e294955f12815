// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rentbook::models::{
    BuildingPatch, NewBuilding, NewTenant, NewUtilityPayment, TenantPatch, UtilityPaymentPatch,
    UtilityType,
};
use rentbook::query::UNKNOWN_BUILDING;
use rentbook::store::Store;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn building(name: &str, units: u32) -> NewBuilding {
    NewBuilding {
        name: name.to_string(),
        address: "Main St 1".to_string(),
        units,
        ..Default::default()
    }
}

fn tenant(building_id: i64, cold: &str, ops: &str, heat: &str, active: bool) -> NewTenant {
    NewTenant {
        first_name: "Anna".to_string(),
        last_name: "Berg".to_string(),
        email: "anna@example.com".to_string(),
        phone: String::new(),
        apartment: "1A".to_string(),
        building_id,
        cold_rent: dec(cold),
        operating_costs_advance: dec(ops),
        heating_costs_advance: dec(heat),
        security_deposit: dec("1500"),
        move_in_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        lease_end_date: None,
        active,
        iban: None,
        bank_name: None,
    }
}

fn payment(tenant_id: i64, kind: UtilityType, advance: &str, cost: &str) -> NewUtilityPayment {
    NewUtilityPayment {
        tenant_id,
        r#type: kind,
        month: "2024-12".to_string(),
        advance_payment: dec(advance),
        actual_consumption: None,
        actual_cost: dec(cost),
        settled: None,
    }
}

#[test]
fn building_stats_count_only_active_tenants() {
    let mut store = Store::new();
    let a = store.add_building(building("Lindenhof", 4)).id;
    store.add_tenant(tenant(a, "500", "100", "50", true));
    store.add_tenant(tenant(a, "400", "0", "0", false));

    let stats = store.building_stats(a);
    assert_eq!(stats.total_rent, dec("650"));
    assert_eq!(stats.occupied_units, 1);
}

#[test]
fn building_without_tenants_has_zero_stats() {
    let mut store = Store::new();
    let a = store.add_building(building("Empty", 3)).id;
    let stats = store.building_stats(a);
    assert_eq!(stats.total_rent, Decimal::ZERO);
    assert_eq!(stats.occupied_units, 0);
}

#[test]
fn warm_rent_and_rent_amount_equal_component_sum_on_add() {
    let mut store = Store::new();
    let t = store.add_tenant(tenant(1, "500", "100", "50", true));
    assert_eq!(t.warm_rent, dec("650"));
    assert_eq!(t.rent_amount, dec("650"));
}

#[test]
fn utility_difference_is_advance_minus_cost() {
    let mut store = Store::new();
    let refund = store
        .add_utility_payment(payment(1, UtilityType::Heating, "100", "80"))
        .difference;
    let owed = store
        .add_utility_payment(payment(1, UtilityType::Water, "50", "75.5"))
        .difference;
    assert_eq!(refund, dec("20"));
    assert_eq!(owed, dec("-25.5"));
}

#[test]
fn deleting_a_building_zeroes_stats_but_keeps_tenants() {
    let mut store = Store::new();
    let a = store.add_building(building("Lindenhof", 2)).id;
    let t = store.add_tenant(tenant(a, "500", "0", "0", true)).id;

    assert_eq!(store.building_stats(a).occupied_units, 1);

    assert!(store.delete_building(a));
    assert!(store.building(a).is_none());
    let stats = store.building_stats(a);
    assert_eq!(stats.occupied_units, 0);
    assert_eq!(stats.total_rent, Decimal::ZERO);
    assert!(store.tenant(t).is_some());
    assert_eq!(store.building_name(a), UNKNOWN_BUILDING);
    assert_eq!(store.tenants_in_building(a).len(), 1);
}

#[test]
fn empty_patch_changes_nothing() {
    let mut store = Store::new();
    let b = store.add_building(building("Lindenhof", 2)).id;
    let t = store.add_tenant(tenant(b, "500", "100", "50", true)).id;
    let p = store
        .add_utility_payment(payment(t, UtilityType::Heating, "100", "80"))
        .id;
    let before = store.snapshot();

    assert!(store.update_building(b, BuildingPatch::default()));
    assert!(store.update_tenant(t, TenantPatch::default()));
    assert!(store.update_utility_payment(p, UtilityPaymentPatch::default()));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn mutations_on_unknown_ids_are_no_ops() {
    let mut store = Store::new();
    store.add_building(building("Lindenhof", 2));
    let before = store.snapshot();

    let patch = BuildingPatch {
        name: Some("Other".to_string()),
        ..Default::default()
    };
    assert!(!store.update_building(999, patch));
    assert!(!store.update_tenant(999, TenantPatch::default()));
    assert!(!store.delete_building(999));
    assert!(!store.delete_tenant(999));
    assert!(!store.delete_utility_payment(999));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn rent_component_update_leaves_totals_alone() {
    let mut store = Store::new();
    let t = store.add_tenant(tenant(1, "500", "100", "50", true)).id;
    let patch = TenantPatch {
        cold_rent: Some(dec("600")),
        ..Default::default()
    };
    assert!(store.update_tenant(t, patch));
    let t = store.tenant(t).unwrap();
    assert_eq!(t.cold_rent, dec("600"));
    assert_eq!(t.warm_rent, dec("650"));
    assert_eq!(t.rent_amount, dec("650"));
}

#[test]
fn patch_can_clear_optional_fields() {
    let mut store = Store::new();
    let mut new = tenant(1, "500", "0", "0", true);
    new.lease_end_date = NaiveDate::from_ymd_opt(2026, 12, 31);
    new.iban = Some("DE89370400440532013000".to_string());
    let t = store.add_tenant(new).id;

    let patch = TenantPatch {
        lease_end_date: Some(None),
        iban: Some(None),
        ..Default::default()
    };
    assert!(store.update_tenant(t, patch));
    let t = store.tenant(t).unwrap();
    assert_eq!(t.lease_end_date, None);
    assert_eq!(t.iban, None);
}

#[test]
fn queries_filter_by_building_and_activity() {
    let mut store = Store::new();
    let a = store.add_building(building("Lindenhof", 4)).id;
    let b = store.add_building(building("Parkblick", 4)).id;
    store.add_tenant(tenant(a, "500", "0", "0", true));
    store.add_tenant(tenant(a, "400", "0", "0", false));
    let c = store.add_tenant(tenant(b, "300", "0", "0", true)).id;
    store.add_utility_payment(payment(c, UtilityType::Water, "20", "10"));

    assert_eq!(store.tenants_in_building(a).len(), 2);
    assert_eq!(store.tenants_in_building_named("Parkblick").len(), 1);
    assert!(store.tenants_in_building_named("Nowhere").is_empty());
    assert_eq!(store.active_tenants().len(), 2);
    assert_eq!(store.utility_payments_for_tenant(c).len(), 1);
    assert_eq!(store.building_name(b), "Parkblick");
}

#[test]
fn unnamed_building_resolves_to_fallback_label() {
    let mut store = Store::new();
    let a = store
        .add_building(NewBuilding {
            name: String::new(),
            ..Default::default()
        })
        .id;
    store.add_tenant(tenant(a, "500", "0", "0", true));
    assert_eq!(store.building_name(a), UNKNOWN_BUILDING);
    assert_eq!(store.tenants_in_building_named(UNKNOWN_BUILDING).len(), 1);
}
