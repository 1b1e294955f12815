// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{BuildingColor, BuildingPatch, NewBuilding};
use crate::stats::with_stats;
use crate::store::Store;
use crate::utils::{
    clearable_text, maybe_print_json, optional_text, parse_id, parse_units, parse_year,
    pretty_table, required_text,
};
use anyhow::Result;

/// Runs a `building` subcommand and reports whether the store changed.
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
            let removed = store.delete_building(id);
            if removed {
                let orphans = store.tenants_in_building(id).len();
                println!("Removed building {}", id);
                if orphans > 0 {
                    println!("{} tenant(s) still reference building {}", orphans, id);
                }
            } else {
                println!("No building with id {}", id);
            }
            removed
        }
        _ => false,
    };
    Ok(changed)
}

/// Reads and gates the add form: name and address must be non-empty.
pub fn new_building(sub: &clap::ArgMatches) -> Result<NewBuilding> {
    let name = required_text(sub, "name", "Building name")?;
    let address = required_text(sub, "address", "Building address")?;
    let units = match optional_text(sub, "units") {
        Some(s) => parse_units(&s)?,
        None => 0,
    };
    let year_built = optional_text(sub, "year-built")
        .map(|s| parse_year(&s))
        .transpose()?;
    Ok(NewBuilding {
        name,
        address,
        units,
        year_built,
        description: optional_text(sub, "description"),
        color: optional_text(sub, "color")
            .map(BuildingColor::from)
            .unwrap_or_default(),
    })
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_building(sub)?;
    let b = store.add_building(new);
    println!("Added building '{}' (id {}, {} units)", b.name, b.id, b.units);
    Ok(())
}

/// Builds the patch; a supplied name or address must still be non-empty.
pub fn building_patch(sub: &clap::ArgMatches) -> Result<BuildingPatch> {
    let name = match sub.get_one::<String>("name") {
        Some(_) => Some(required_text(sub, "name", "Building name")?),
        None => None,
    };
    let address = match sub.get_one::<String>("address") {
        Some(_) => Some(required_text(sub, "address", "Building address")?),
        None => None,
    };
    let units = sub
        .get_one::<String>("units")
        .map(|s| parse_units(s))
        .transpose()?;
    let year_built = match clearable_text(sub, "year-built") {
        Some(Some(s)) => Some(Some(parse_year(&s)?)),
        Some(None) => Some(None),
        None => None,
    };
    Ok(BuildingPatch {
        name,
        address,
        units,
        year_built,
        description: clearable_text(sub, "description"),
        color: sub
            .get_one::<String>("color")
            .map(|s| BuildingColor::from(s.as_str())),
    })
}

fn update(store: &mut Store, sub: &clap::ArgMatches) -> Result<bool> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let patch = building_patch(sub)?;
    let found = store.update_building(id, patch);
    if found {
        println!("Updated building {}", id);
    } else {
        println!("No building with id {}", id);
    }
    Ok(found)
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view = with_stats(store.buildings(), store.tenants());
    if !maybe_print_json(json_flag, jsonl_flag, &view)? {
        let rows: Vec<Vec<String>> = view
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.name.clone(),
                    b.address.clone(),
                    format!("{}/{}", b.occupied_units, b.units),
                    format!("{:.2}", b.total_rent),
                    b.year_built.map(|y| y.to_string()).unwrap_or_default(),
                    b.color.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Address", "Occupied", "Rent", "Built", "Color"],
                rows
            )
        );
    }
    Ok(())
}
