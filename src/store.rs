// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The single owner of buildings, tenants and utility payments.
//!
//! Every mutation runs to completion against `&mut Store`; nothing else holds
//! a handle to the collections. Mutations never fail: an unknown id is a
//! silent no-op, reported back as `false` so a caller can mention it.
//!
//! Deleting a building or tenant does not cascade. Tenants of a deleted
//! building and payments of a deleted tenant stay in place as orphans.

use crate::models::{
    Building, BuildingPatch, Id, NewBuilding, NewTenant, NewUtilityPayment, Snapshot, Tenant,
    TenantPatch, UtilityPayment, UtilityPaymentPatch,
};
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Store {
    next_id: Id,
    buildings: Vec<Building>,
    tenants: Vec<Tenant>,
    utility_payments: Vec<UtilityPayment>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            buildings: Vec::new(),
            tenants: Vec::new(),
            utility_payments: Vec::new(),
        }
    }

    /// Rebuild a store from persisted state. A stale counter is raised past
    /// every id already in use.
    pub fn from_snapshot(s: Snapshot) -> Self {
        let max_id = s
            .buildings
            .iter()
            .map(|b| b.id)
            .chain(s.tenants.iter().map(|t| t.id))
            .chain(s.utility_payments.iter().map(|p| p.id))
            .max()
            .unwrap_or(0);
        Self {
            next_id: s.next_id.max(max_id + 1).max(1),
            buildings: s.buildings,
            tenants: s.tenants,
            utility_payments: s.utility_payments,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            next_id: self.next_id,
            buildings: self.buildings.clone(),
            tenants: self.tenants.clone(),
            utility_payments: self.utility_payments.clone(),
        }
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn utility_payments(&self) -> &[UtilityPayment] {
        &self.utility_payments
    }

    fn allocate_id(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Inserts the building as given. An empty name or address is not
    /// rejected here; callers are expected to gate those before adding.
    pub fn add_building(&mut self, new: NewBuilding) -> &Building {
        let id = self.allocate_id();
        debug!(building_id = id, name = %new.name, "adding building");
        self.buildings.push(Building {
            id,
            name: new.name,
            address: new.address,
            units: new.units,
            year_built: new.year_built,
            description: new.description,
            color: new.color,
            total_rent: Decimal::ZERO,
            occupied_units: 0,
        });
        &self.buildings[self.buildings.len() - 1]
    }

    pub fn update_building(&mut self, id: Id, patch: BuildingPatch) -> bool {
        match self.buildings.iter_mut().find(|b| b.id == id) {
            Some(b) => {
                patch.apply(b);
                debug!(building_id = id, "building updated");
                true
            }
            None => {
                debug!(building_id = id, "update of unknown building ignored");
                false
            }
        }
    }

    pub fn delete_building(&mut self, id: Id) -> bool {
        let before = self.buildings.len();
        self.buildings.retain(|b| b.id != id);
        let removed = self.buildings.len() != before;
        debug!(building_id = id, removed, "delete building");
        removed
    }

    /// Inserts the tenant with `warm_rent` and `rent_amount` both set to the
    /// sum of cold rent and the two cost advances.
    pub fn add_tenant(&mut self, new: NewTenant) -> &Tenant {
        let id = self.allocate_id();
        let warm_rent = new.warm_rent();
        debug!(tenant_id = id, building_id = new.building_id, %warm_rent, "adding tenant");
        self.tenants.push(Tenant {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            apartment: new.apartment,
            building_id: new.building_id,
            cold_rent: new.cold_rent,
            operating_costs_advance: new.operating_costs_advance,
            heating_costs_advance: new.heating_costs_advance,
            warm_rent,
            rent_amount: warm_rent,
            security_deposit: new.security_deposit,
            move_in_date: new.move_in_date,
            lease_end_date: new.lease_end_date,
            active: new.active,
            iban: new.iban,
            bank_name: new.bank_name,
        });
        &self.tenants[self.tenants.len() - 1]
    }

    /// Merges the patch. Rent components are stored as given; `warm_rent`
    /// and `rent_amount` only change when the patch carries them.
    pub fn update_tenant(&mut self, id: Id, patch: TenantPatch) -> bool {
        match self.tenants.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                patch.apply(t);
                debug!(tenant_id = id, "tenant updated");
                true
            }
            None => {
                debug!(tenant_id = id, "update of unknown tenant ignored");
                false
            }
        }
    }

    pub fn delete_tenant(&mut self, id: Id) -> bool {
        let before = self.tenants.len();
        self.tenants.retain(|t| t.id != id);
        let removed = self.tenants.len() != before;
        debug!(tenant_id = id, removed, "delete tenant");
        removed
    }

    /// Inserts the payment with `difference = advance_payment - actual_cost`.
    pub fn add_utility_payment(&mut self, new: NewUtilityPayment) -> &UtilityPayment {
        let id = self.allocate_id();
        let difference = new.difference();
        debug!(payment_id = id, tenant_id = new.tenant_id, %difference, "adding utility payment");
        self.utility_payments.push(UtilityPayment {
            id,
            tenant_id: new.tenant_id,
            r#type: new.r#type,
            month: new.month,
            advance_payment: new.advance_payment,
            actual_consumption: new.actual_consumption,
            actual_cost: new.actual_cost,
            difference,
            settled: new.settled,
        });
        &self.utility_payments[self.utility_payments.len() - 1]
    }

    pub fn update_utility_payment(&mut self, id: Id, patch: UtilityPaymentPatch) -> bool {
        match self.utility_payments.iter_mut().find(|p| p.id == id) {
            Some(p) => {
                patch.apply(p);
                debug!(payment_id = id, "utility payment updated");
                true
            }
            None => {
                debug!(payment_id = id, "update of unknown utility payment ignored");
                false
            }
        }
    }

    pub fn delete_utility_payment(&mut self, id: Id) -> bool {
        let before = self.utility_payments.len();
        self.utility_payments.retain(|p| p.id != id);
        let removed = self.utility_payments.len() != before;
        debug!(payment_id = id, removed, "delete utility payment");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BuildingColor, UtilityType};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tenant(building_id: Id) -> NewTenant {
        NewTenant {
            first_name: "Erika".into(),
            last_name: "Muster".into(),
            email: String::new(),
            phone: String::new(),
            apartment: "1A".into(),
            building_id,
            cold_rent: dec("500"),
            operating_costs_advance: dec("100"),
            heating_costs_advance: dec("50"),
            security_deposit: dec("1500"),
            move_in_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            lease_end_date: None,
            active: true,
            iban: None,
            bank_name: None,
        }
    }

    #[test]
    fn ids_are_unique_across_collections() {
        let mut store = Store::new();
        let b = store.add_building(NewBuilding::default()).id;
        let t = store.add_tenant(tenant(b)).id;
        let p = store
            .add_utility_payment(NewUtilityPayment {
                tenant_id: t,
                r#type: UtilityType::Water,
                month: "2025-01".into(),
                advance_payment: dec("30"),
                actual_consumption: None,
                actual_cost: dec("25"),
                settled: None,
            })
            .id;
        assert_ne!(b, t);
        assert_ne!(t, p);
        assert_ne!(b, p);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = Store::new();
        let first = store.add_building(NewBuilding::default()).id;
        store.delete_building(first);
        let second = store.add_building(NewBuilding::default()).id;
        assert_ne!(first, second);
    }

    #[test]
    fn add_building_keeps_empty_fields() {
        let mut store = Store::new();
        let b = store.add_building(NewBuilding::default());
        assert_eq!(b.name, "");
        assert_eq!(b.color, BuildingColor::Blue);
        assert_eq!(store.buildings().len(), 1);
    }

    #[test]
    fn warm_rent_is_not_recomputed_on_update() {
        let mut store = Store::new();
        let id = store.add_tenant(tenant(1)).id;
        store.update_tenant(
            id,
            TenantPatch {
                cold_rent: Some(dec("600")),
                ..Default::default()
            },
        );
        let t = &store.tenants()[0];
        assert_eq!(t.cold_rent, dec("600"));
        assert_eq!(t.warm_rent, dec("650"));
        assert_eq!(t.rent_amount, dec("650"));
    }

    #[test]
    fn from_snapshot_raises_stale_counter() {
        let mut store = Store::new();
        store.add_building(NewBuilding::default());
        store.add_building(NewBuilding::default());
        let mut snap = store.snapshot();
        snap.next_id = 1;
        let mut restored = Store::from_snapshot(snap);
        let id = restored.add_building(NewBuilding::default()).id;
        assert_eq!(id, 3);
    }
}
