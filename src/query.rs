// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Building, Id, Tenant, UtilityPayment};
use crate::stats::{BuildingStats, building_stats};
use crate::store::Store;

/// Label shown for a tenant whose building id no longer resolves, or whose
/// building has no name.
pub const UNKNOWN_BUILDING: &str = "Unknown building";

impl Store {
    pub fn building(&self, id: Id) -> Option<&Building> {
        self.buildings().iter().find(|b| b.id == id)
    }

    pub fn tenant(&self, id: Id) -> Option<&Tenant> {
        self.tenants().iter().find(|t| t.id == id)
    }

    pub fn utility_payment(&self, id: Id) -> Option<&UtilityPayment> {
        self.utility_payments().iter().find(|p| p.id == id)
    }

    pub fn building_name(&self, building_id: Id) -> &str {
        self.building(building_id)
            .map(|b| b.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_BUILDING)
    }

    pub fn tenants_in_building(&self, building_id: Id) -> Vec<&Tenant> {
        self.tenants()
            .iter()
            .filter(|t| t.building_id == building_id)
            .collect()
    }

    /// Tenants whose resolved building name equals `name`. Orphaned tenants
    /// resolve to [`UNKNOWN_BUILDING`] and match that label.
    pub fn tenants_in_building_named(&self, name: &str) -> Vec<&Tenant> {
        self.tenants()
            .iter()
            .filter(|t| self.building_name(t.building_id) == name)
            .collect()
    }

    pub fn active_tenants(&self) -> Vec<&Tenant> {
        self.tenants().iter().filter(|t| t.active).collect()
    }

    pub fn utility_payments_for_tenant(&self, tenant_id: Id) -> Vec<&UtilityPayment> {
        self.utility_payments()
            .iter()
            .filter(|p| p.tenant_id == tenant_id)
            .collect()
    }

    /// Current figures for a building. An id with no building (never added
    /// or deleted) yields zero, even if orphaned tenants still point at it.
    pub fn building_stats(&self, building_id: Id) -> BuildingStats {
        match self.building(building_id) {
            Some(_) => building_stats(self.tenants(), building_id),
            None => BuildingStats::default(),
        }
    }
}
