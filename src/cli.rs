// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn opt(name: &'static str, value: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name(value)
        .help(help)
        .allow_hyphen_values(true)
}

fn req(name: &'static str, value: &'static str, help: &'static str) -> Arg {
    opt(name, value, help).required(true)
}

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn building_fields(cmd: Command, required: bool) -> Command {
    let (name, address) = if required {
        (
            req("name", "NAME", "Building name"),
            req("address", "ADDRESS", "Street address"),
        )
    } else {
        (
            opt("name", "NAME", "Building name"),
            opt("address", "ADDRESS", "Street address"),
        )
    };
    cmd.arg(name)
        .arg(address)
        .arg(opt("units", "N", "Number of rentable units"))
        .arg(opt("year-built", "YEAR", "Year of construction"))
        .arg(opt("description", "TEXT", "Free-form notes"))
        .arg(opt(
            "color",
            "COLOR",
            "Display tag: blue|green|purple|red|yellow|indigo",
        ))
}

fn tenant_fields(cmd: Command, required: bool) -> Command {
    let mk = if required { req } else { opt };
    cmd.arg(mk("first-name", "NAME", "First name"))
        .arg(mk("last-name", "NAME", "Last name"))
        .arg(mk("building", "ID", "Building id"))
        .arg(mk("apartment", "LABEL", "Unit label, e.g. 1A"))
        .arg(opt("email", "EMAIL", "E-mail address"))
        .arg(opt("phone", "PHONE", "Phone number"))
        .arg(opt("cold-rent", "AMOUNT", "Monthly base rent"))
        .arg(opt("operating-costs", "AMOUNT", "Monthly operating cost advance"))
        .arg(opt("heating-costs", "AMOUNT", "Monthly heating cost advance"))
        .arg(opt("deposit", "AMOUNT", "Security deposit"))
        .arg(opt("move-in", "YYYY-MM-DD", "Move-in date"))
        .arg(opt(
            "lease-end",
            "YYYY-MM-DD",
            "Lease end; omit for open-ended",
        ))
        .arg(opt("iban", "IBAN", "Account for refunds"))
        .arg(opt("bank", "NAME", "Bank name"))
}

fn utility_fields(cmd: Command, required: bool) -> Command {
    let mk = if required { req } else { opt };
    cmd.arg(mk("tenant", "ID", "Tenant id"))
        .arg(mk("type", "TYPE", "heating|water"))
        .arg(mk("month", "YYYY-MM", "Billing month"))
        .arg(mk("advance", "AMOUNT", "Advance paid by the tenant"))
        .arg(mk("actual-cost", "AMOUNT", "Actual cost incurred"))
        .arg(opt("consumption", "QTY", "Metered consumption (kWh, m3)"))
}

fn building_cmd() -> Command {
    Command::new("building")
        .about("Manage buildings")
        .subcommand(building_fields(
            Command::new("add").about("Add a building"),
            true,
        ))
        .subcommand(output_flags(
            Command::new("list").about("List buildings with occupancy"),
        ))
        .subcommand(building_fields(
            Command::new("update")
                .about("Update a building")
                .arg(req("id", "ID", "Building id")),
            false,
        ))
        .subcommand(
            Command::new("rm")
                .about("Remove a building (tenants are kept)")
                .arg(req("id", "ID", "Building id")),
        )
}

fn tenant_cmd() -> Command {
    Command::new("tenant")
        .about("Manage tenants")
        .subcommand(
            tenant_fields(Command::new("add").about("Add a tenant"), true).arg(
                Arg::new("inactive")
                    .long("inactive")
                    .action(ArgAction::SetTrue)
                    .help("Record as moved out"),
            ),
        )
        .subcommand(output_flags(
            Command::new("list")
                .about("List tenants")
                .arg(opt("building-name", "NAME", "Only tenants of this building")),
        ))
        .subcommand(output_flags(
            Command::new("show")
                .about("Show a tenant with utility payments")
                .arg(req("id", "ID", "Tenant id")),
        ))
        .subcommand(
            tenant_fields(
                Command::new("update")
                    .about("Update a tenant")
                    .arg(req("id", "ID", "Tenant id")),
                false,
            )
            .arg(opt("warm-rent", "AMOUNT", "Stored warm rent"))
            .arg(opt("rent-amount", "AMOUNT", "Stored legacy rent amount"))
            .arg(
                Arg::new("active")
                    .long("active")
                    .value_name("BOOL")
                    .value_parser(value_parser!(bool))
                    .help("Occupancy flag"),
            ),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a tenant (utility payments are kept)")
                .arg(req("id", "ID", "Tenant id")),
        )
}

fn utility_cmd() -> Command {
    Command::new("utility")
        .about("Record heating and water settlements")
        .subcommand(
            utility_fields(Command::new("add").about("Add a utility payment"), true).arg(
                Arg::new("settled")
                    .long("settled")
                    .action(ArgAction::SetTrue)
                    .help("Mark as settled"),
            ),
        )
        .subcommand(output_flags(
            Command::new("list")
                .about("List utility payments")
                .arg(opt("tenant", "ID", "Only payments of this tenant")),
        ))
        .subcommand(
            utility_fields(
                Command::new("update")
                    .about("Update a utility payment")
                    .arg(req("id", "ID", "Payment id")),
                false,
            )
            .arg(opt("difference", "AMOUNT", "Stored difference"))
            .arg(
                Arg::new("settled")
                    .long("settled")
                    .value_name("BOOL")
                    .value_parser(value_parser!(bool))
                    .help("Settlement flag"),
            ),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a utility payment")
                .arg(req("id", "ID", "Payment id")),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Derived statistics")
        .subcommand(output_flags(
            Command::new("buildings").about("Occupancy and rent per building"),
        ))
        .subcommand(output_flags(
            Command::new("portfolio").about("Totals across all buildings"),
        ))
        .subcommand(output_flags(
            Command::new("utilities")
                .about("Utility balance for one tenant")
                .arg(req("tenant", "ID", "Tenant id")),
        ))
}

fn finances_cmd() -> Command {
    let mut cmd = Command::new("finances")
        .about("Estimate annual rental income and income tax")
        .arg(
            Arg::new("year")
                .long("year")
                .value_name("YEAR")
                .value_parser(value_parser!(i32))
                .help("Tax year (default: current year)"),
        )
        .arg(opt("personal-income", "AMOUNT", "Salary, pension"))
        .arg(opt("capital-income", "AMOUNT", "Interest, dividends"))
        .arg(opt("other-income", "AMOUNT", "Other personal income"))
        .arg(opt(
            "other-rental-income",
            "AMOUNT",
            "Parking, garages, top-ups",
        ))
        .arg(opt("property-tax", "AMOUNT", "Property tax"))
        .arg(opt("insurance", "AMOUNT", "Insurance"))
        .arg(opt("repairs", "AMOUNT", "Repairs and maintenance"))
        .arg(opt("administration", "AMOUNT", "Administration costs"))
        .arg(opt("tax-advisor", "AMOUNT", "Tax advisor fee"))
        .arg(opt("depreciation", "AMOUNT", "Depreciation"))
        .arg(opt("financing", "AMOUNT", "Financing costs"));
    for q in ["q1", "q2", "q3", "q4"] {
        cmd = cmd.arg(opt(q, "AMOUNT", "Quarterly tax advance"));
    }
    cmd.arg(
        Arg::new("paid")
            .long("paid")
            .value_name("QUARTER")
            .value_parser(value_parser!(u8).range(1..=4))
            .action(ArgAction::Append)
            .help("Quarter already paid (repeatable)"),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export records to CSV or JSON")
        .arg(req("format", "FORMAT", "csv|json"))
        .arg(req("out", "PATH", "Output file"))
        .arg(
            Arg::new("what")
                .long("what")
                .value_name("SET")
                .default_value("tenants")
                .help("tenants|buildings|utilities"),
        )
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Settings")
        .subcommand(
            Command::new("set-currency")
                .about("Currency shown in reports")
                .arg(
                    Arg::new("currency")
                        .required(true)
                        .value_name("CCY")
                        .help("e.g. EUR"),
                ),
        )
        .subcommand(Command::new("show").about("Show settings"))
}

pub fn build_cli() -> Command {
    Command::new("rentbook")
        .version(clap::crate_version!())
        .about("Buildings, tenants, utility settlements and landlord tax estimates")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .help("Data file (default: platform data dir, or RENTBOOK_DB)"),
        )
        .subcommand(Command::new("init").about("Create the data file"))
        .subcommand(building_cmd())
        .subcommand(tenant_cmd())
        .subcommand(utility_cmd())
        .subcommand(report_cmd())
        .subcommand(finances_cmd())
        .subcommand(export_cmd())
        .subcommand(config_cmd())
}
