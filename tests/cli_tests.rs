// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rentbook::cli;
use rentbook::commands::{buildings, finances, tenants, utilities};
use rentbook::finances::estimate;
use rentbook::models::BuildingColor;
use rentbook::store::Store;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn run(store: &mut Store, argv: &[&str]) -> anyhow::Result<bool> {
    let mut args = vec!["rentbook"];
    args.extend_from_slice(argv);
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some(("building", sub)) => buildings::handle(store, sub),
        Some(("tenant", sub)) => tenants::handle(store, sub),
        Some(("utility", sub)) => utilities::handle(store, sub),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
}

fn sub_matches(argv: &[&str]) -> clap::ArgMatches {
    let mut args = vec!["rentbook"];
    args.extend_from_slice(argv);
    let matches = cli::build_cli().get_matches_from(args);
    let (_, sub) = matches.subcommand().unwrap();
    match sub.subcommand() {
        Some((_, leaf)) => leaf.clone(),
        None => sub.clone(),
    }
}

fn seeded() -> Store {
    let mut store = Store::new();
    run(
        &mut store,
        &[
            "building", "add", "--name", "Lindenhof", "--address", "Lindenstr. 4", "--units",
            "4", "--color", "green",
        ],
    )
    .unwrap();
    run(
        &mut store,
        &[
            "tenant",
            "add",
            "--first-name",
            "Anna",
            "--last-name",
            "Berg",
            "--building",
            "1",
            "--apartment",
            "1A",
            "--cold-rent",
            "500",
            "--operating-costs",
            "100",
            "--heating-costs",
            "50",
            "--move-in",
            "2024-01-01",
        ],
    )
    .unwrap();
    store
}

#[test]
fn building_add_stores_trimmed_fields() {
    let store = seeded();
    let b = &store.buildings()[0];
    assert_eq!(b.name, "Lindenhof");
    assert_eq!(b.units, 4);
    assert_eq!(b.color, BuildingColor::Green);
}

#[test]
fn building_add_rejects_blank_name() {
    let sub = sub_matches(&["building", "add", "--name", "  ", "--address", "Main St 1"]);
    let err = buildings::new_building(&sub).unwrap_err();
    assert!(err.to_string().contains("Building name is required"));
}

#[test]
fn tenant_add_rejects_empty_first_name() {
    let mut store = seeded();
    let before = store.tenants().len();
    let err = run(
        &mut store,
        &[
            "tenant",
            "add",
            "--first-name",
            "",
            "--last-name",
            "Berg",
            "--building",
            "1",
            "--apartment",
            "2A",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("First name is required"));
    assert_eq!(store.tenants().len(), before);
}

#[test]
fn tenant_add_rejects_lease_ending_before_move_in() {
    let sub = sub_matches(&[
        "tenant",
        "add",
        "--first-name",
        "Anna",
        "--last-name",
        "Berg",
        "--building",
        "1",
        "--apartment",
        "1A",
        "--move-in",
        "2024-05-01",
        "--lease-end",
        "2024-04-30",
    ]);
    assert!(tenants::new_tenant(&sub).is_err());
}

#[test]
fn tenant_add_normalizes_iban() {
    let sub = sub_matches(&[
        "tenant",
        "add",
        "--first-name",
        "Anna",
        "--last-name",
        "Berg",
        "--building",
        "1",
        "--apartment",
        "1A",
        "--iban",
        "de89 3704 0044 0532 0130 00",
    ]);
    let t = tenants::new_tenant(&sub).unwrap();
    assert_eq!(t.iban.as_deref(), Some("DE89370400440532013000"));
}

#[test]
fn tenant_list_filters_by_building_name() {
    let mut store = seeded();
    run(
        &mut store,
        &["building", "add", "--name", "Parkblick", "--address", "Parkweg 9"],
    )
    .unwrap();
    run(
        &mut store,
        &[
            "tenant",
            "add",
            "--first-name",
            "Jonas",
            "--last-name",
            "Klein",
            "--building",
            "3",
            "--apartment",
            "EG",
        ],
    )
    .unwrap();

    let sub = sub_matches(&["tenant", "list", "--building-name", "Parkblick"]);
    let rows = tenants::query_rows(&store, &sub);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Jonas Klein");
    assert_eq!(rows[0].building, "Parkblick");

    let all = tenants::query_rows(&store, &sub_matches(&["tenant", "list"]));
    assert_eq!(all.len(), 2);
}

#[test]
fn tenant_update_can_set_warm_rent_explicitly() {
    let mut store = seeded();
    let id = store.tenants()[0].id.to_string();
    run(
        &mut store,
        &[
            "tenant",
            "update",
            "--id",
            &id,
            "--cold-rent",
            "550",
            "--warm-rent",
            "700",
        ],
    )
    .unwrap();
    let t = &store.tenants()[0];
    assert_eq!(t.cold_rent, dec("550"));
    assert_eq!(t.warm_rent, dec("700"));
    assert_eq!(t.rent_amount, dec("650"));
}

#[test]
fn utility_add_and_list_for_tenant() {
    let mut store = seeded();
    let id = store.tenants()[0].id.to_string();
    run(
        &mut store,
        &[
            "utility",
            "add",
            "--tenant",
            &id,
            "--type",
            "heating",
            "--month",
            "2024-12",
            "--advance",
            "100",
            "--actual-cost",
            "80",
        ],
    )
    .unwrap();
    let p = &store.utility_payments()[0];
    assert_eq!(p.difference, dec("20"));
    assert_eq!(p.settled, None);

    let rows = utilities::query_rows(&store, &sub_matches(&["utility", "list", "--tenant", &id]))
        .unwrap();
    assert_eq!(rows.len(), 1);
    let none = utilities::query_rows(&store, &sub_matches(&["utility", "list", "--tenant", "99"]))
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn utility_add_rejects_unknown_type() {
    let sub = sub_matches(&[
        "utility",
        "add",
        "--tenant",
        "2",
        "--type",
        "gas",
        "--month",
        "2024-12",
        "--advance",
        "10",
        "--actual-cost",
        "5",
    ]);
    assert!(utilities::new_payment(&sub).is_err());
}

#[test]
fn finances_summary_from_arguments() {
    let store = seeded();
    let sub = sub_matches(&[
        "finances",
        "--year",
        "2025",
        "--personal-income",
        "30000",
        "--other-rental-income",
        "500",
        "--repairs",
        "400",
        "--q1",
        "1000",
        "--q2",
        "1000",
        "--paid",
        "1",
    ]);
    let (other, expenses, schedule) = finances::inputs(&sub).unwrap();
    assert!(schedule.payments[0].paid);
    assert_eq!(schedule.payments[0].paid_date, None);
    assert!(!schedule.payments[1].paid);
    let s = estimate(store.tenants(), &other, &expenses, &schedule);
    assert_eq!(s.year, 2025);
    assert_eq!(s.total_rental_income, dec("7800"));
    assert_eq!(s.net_rental_income, dec("7900"));
    assert_eq!(s.total_income, dec("37900"));
    assert_eq!(s.estimated_tax_rate, 24);
    assert_eq!(s.estimated_tax, dec("9096.00"));
    assert_eq!(s.total_tax_advances, dec("2000"));
    assert_eq!(s.paid_tax_advances, dec("1000"));
    assert_eq!(s.outstanding_tax, dec("7096.00"));
}

#[test]
fn finances_rejects_negative_expense() {
    let sub = sub_matches(&["finances", "--repairs", "-10"]);
    assert!(finances::inputs(&sub).is_err());
}

#[test]
fn read_only_commands_report_no_change() {
    let mut store = seeded();
    let id = store.tenants()[0].id.to_string();
    run(
        &mut store,
        &[
            "utility",
            "add",
            "--tenant",
            &id,
            "--type",
            "water",
            "--month",
            "2024-12",
            "--advance",
            "30",
            "--actual-cost",
            "25",
        ],
    )
    .unwrap();
    let before = store.snapshot();

    assert!(!run(&mut store, &["building", "list"]).unwrap());
    assert!(!run(&mut store, &["tenant", "list"]).unwrap());
    assert!(!run(&mut store, &["tenant", "show", "--id", &id]).unwrap());
    assert!(!run(&mut store, &["utility", "list"]).unwrap());
    assert!(!run(&mut store, &["tenant", "rm", "--id", "999"]).unwrap());
    assert!(!run(&mut store, &["building", "update", "--id", "999", "--units", "9"]).unwrap());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn mutating_commands_report_change() {
    let mut store = seeded();
    let id = store.tenants()[0].id.to_string();
    assert!(run(&mut store, &["building", "update", "--id", "1", "--units", "5"]).unwrap());
    assert!(run(&mut store, &["tenant", "update", "--id", &id, "--phone", "123"]).unwrap());
    assert!(run(&mut store, &["tenant", "rm", "--id", &id]).unwrap());
    assert!(store.tenants().is_empty());
}

#[test]
fn utility_month_is_stored_in_canonical_form() {
    let sub = sub_matches(&[
        "utility",
        "add",
        "--tenant",
        "2",
        "--type",
        "heating",
        "--month",
        "2025-2",
        "--advance",
        "10",
        "--actual-cost",
        "5",
    ]);
    assert_eq!(utilities::new_payment(&sub).unwrap().month, "2025-02");
}
