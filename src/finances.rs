// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Household-level estimate of rental income, expenses and income tax.
//!
//! Expenses, private income and the quarterly advance schedule are transient
//! inputs supplied per call; only the tenant set comes from the store.

use crate::error::ParseError;
use crate::models::Tenant;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Total income strictly below this is taxed at zero.
const ZERO_RATE_BELOW: i64 = 10_000;
/// Inclusive upper bound and rate in percent, ascending.
const BRACKETS: [(i64, u8); 4] = [(28_000, 14), (55_000, 24), (80_000, 32), (150_000, 38)];
const TOP_RATE: u8 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseCategory {
    PropertyTax,
    Insurance,
    Repairs,
    Administration,
    TaxAdvisor,
    Depreciation,
    FinancingCosts,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::PropertyTax,
        ExpenseCategory::Insurance,
        ExpenseCategory::Repairs,
        ExpenseCategory::Administration,
        ExpenseCategory::TaxAdvisor,
        ExpenseCategory::Depreciation,
        ExpenseCategory::FinancingCosts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::PropertyTax => "Property tax",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Repairs => "Repairs",
            ExpenseCategory::Administration => "Administration",
            ExpenseCategory::TaxAdvisor => "Tax advisor",
            ExpenseCategory::Depreciation => "Depreciation",
            ExpenseCategory::FinancingCosts => "Financing costs",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expenses {
    pub property_tax: Decimal,
    pub insurance: Decimal,
    pub repairs: Decimal,
    pub administration: Decimal,
    pub tax_advisor: Decimal,
    pub depreciation: Decimal,
    pub financing_costs: Decimal,
}

impl Expenses {
    pub fn get(&self, category: ExpenseCategory) -> Decimal {
        match category {
            ExpenseCategory::PropertyTax => self.property_tax,
            ExpenseCategory::Insurance => self.insurance,
            ExpenseCategory::Repairs => self.repairs,
            ExpenseCategory::Administration => self.administration,
            ExpenseCategory::TaxAdvisor => self.tax_advisor,
            ExpenseCategory::Depreciation => self.depreciation,
            ExpenseCategory::FinancingCosts => self.financing_costs,
        }
    }

    pub fn total(&self) -> Decimal {
        ExpenseCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Income outside the tenant roll that is taxed jointly with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherIncome {
    pub personal_income: Decimal,
    pub capital_income: Decimal,
    pub other_personal_income: Decimal,
    /// Parking spaces, garages, utility top-ups.
    pub other_rental_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxAdvancePayment {
    pub quarter: u8,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub paid: bool,
    pub paid_date: Option<NaiveDate>,
    pub reference_number: Option<String>,
}

/// Four quarterly advances due on the 10th of March, June, September and
/// December of `year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxAdvanceSchedule {
    pub year: i32,
    pub payments: Vec<TaxAdvancePayment>,
}

impl TaxAdvanceSchedule {
    pub fn for_year(year: i32) -> Result<Self, ParseError> {
        let payments = [3, 6, 9, 12]
            .iter()
            .zip(1u8..)
            .map(|(month, quarter)| {
                NaiveDate::from_ymd_opt(year, *month, 10)
                    .map(|due_date| TaxAdvancePayment {
                        quarter,
                        amount: Decimal::ZERO,
                        due_date,
                        paid: false,
                        paid_date: None,
                        reference_number: None,
                    })
                    .ok_or(ParseError::Year(year))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { year, payments })
    }

    pub fn quarter_mut(&mut self, quarter: u8) -> Result<&mut TaxAdvancePayment, ParseError> {
        self.payments
            .iter_mut()
            .find(|p| p.quarter == quarter)
            .ok_or(ParseError::Quarter(quarter))
    }

    pub fn set_amount(&mut self, quarter: u8, amount: Decimal) -> Result<(), ParseError> {
        self.quarter_mut(quarter)?.amount = amount;
        Ok(())
    }

    /// Flags a quarter as paid. `on` is recorded only when the payment date is known.
    pub fn mark_paid(&mut self, quarter: u8, on: Option<NaiveDate>) -> Result<(), ParseError> {
        let p = self.quarter_mut(quarter)?;
        p.paid = true;
        p.paid_date = on;
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    pub fn paid_total(&self) -> Decimal {
        self.payments
            .iter()
            .filter(|p| p.paid)
            .map(|p| p.amount)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub year: i32,
    pub total_rental_income: Decimal,
    pub other_rental_income: Decimal,
    pub total_expenses: Decimal,
    pub net_rental_income: Decimal,
    pub total_income: Decimal,
    pub estimated_tax_rate: u8,
    pub estimated_tax: Decimal,
    pub total_tax_advances: Decimal,
    pub paid_tax_advances: Decimal,
    pub outstanding_tax: Decimal,
}

/// Annual rent over active tenants. Warm rent is preferred; a tenant whose
/// warm rent is zero falls back to the legacy `rent_amount`.
pub fn annual_rental_income(tenants: &[Tenant]) -> Decimal {
    tenants
        .iter()
        .filter(|t| t.active)
        .map(|t| {
            let monthly = if t.warm_rent.is_zero() {
                t.rent_amount
            } else {
                t.warm_rent
            };
            monthly * Decimal::from(12)
        })
        .sum()
}

/// Flat rate in percent for a total income: 0 below 10,000, then the first
/// bracket whose upper bound is at least `total_income`.
pub fn estimated_tax_rate(total_income: Decimal) -> u8 {
    if total_income < Decimal::from(ZERO_RATE_BELOW) {
        return 0;
    }
    BRACKETS
        .iter()
        .find(|(upper, _)| total_income <= Decimal::from(*upper))
        .map(|(_, rate)| *rate)
        .unwrap_or(TOP_RATE)
}

pub fn estimate(
    tenants: &[Tenant],
    other: &OtherIncome,
    expenses: &Expenses,
    advances: &TaxAdvanceSchedule,
) -> FinancialSummary {
    let total_rental_income = annual_rental_income(tenants);
    let total_expenses = expenses.total();
    let net_rental_income = total_rental_income + other.other_rental_income - total_expenses;
    let total_income = net_rental_income
        + other.personal_income
        + other.capital_income
        + other.other_personal_income;
    let rate = estimated_tax_rate(total_income);
    let estimated_tax = (total_income * Decimal::from(rate) / Decimal::from(100))
        .max(Decimal::ZERO)
        .round_dp(2);
    let total_tax_advances = advances.total();
    FinancialSummary {
        year: advances.year,
        total_rental_income,
        other_rental_income: other.other_rental_income,
        total_expenses,
        net_rental_income,
        total_income,
        estimated_tax_rate: rate,
        estimated_tax,
        total_tax_advances,
        paid_tax_advances: advances.paid_total(),
        outstanding_tax: estimated_tax - total_tax_advances,
    }
}
