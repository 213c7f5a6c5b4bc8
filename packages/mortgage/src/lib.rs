#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Amortization, DTI, and affordability classification math.
//!
//! Pure functions shared by the single-point calculator and the
//! per-hexagon aggregation. No I/O, no state; every function is total
//! over its documented domain.

use housing_map_housing_models::{AffordabilityCategory, AffordabilityThresholds};

/// Front-end debt-to-income fraction (housing payment / gross income).
pub const DTI_FRONT_END: f64 = 0.28;

/// Back-end debt-to-income fraction (all debt / gross income).
pub const DTI_BACK_END: f64 = 0.36;

/// Aggressive upper-bound debt-to-income fraction.
pub const DTI_AGGRESSIVE: f64 = 0.43;

/// Monthly payment on a fixed-rate amortizing loan.
///
/// Standard closed form `P * r(1+r)^n / ((1+r)^n - 1)` with a monthly
/// rate `r = annual_rate_percent / 100 / 12` over `n = term_years * 12`
/// payments. A zero rate falls back to straight-line `principal / n`,
/// where the closed form would divide by zero.
///
/// `term_years` must be at least 1 (callers validate); `principal` may
/// be zero or negative, in which case the payment is zero or negative
/// and classifies as affordable downstream.
#[must_use]
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let n = f64::from(term_years) * 12.0;
    let r = annual_rate_percent / 100.0 / 12.0;

    if r == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + r).powf(n);
    principal * r * growth / (growth - 1.0)
}

/// Derives the three monthly-dollar ceilings from gross income and
/// recurring expenses.
///
/// Each ceiling is `income * fraction - expenses` for the fixed DTI
/// fractions, so the three are monotonically increasing. Ceilings go
/// negative when expenses exceed the income share; that is a valid
/// result meaning nothing is affordable.
#[must_use]
pub fn affordability_thresholds(
    monthly_gross_income: f64,
    monthly_expenses: f64,
) -> AffordabilityThresholds {
    AffordabilityThresholds {
        affordable: monthly_gross_income * DTI_FRONT_END - monthly_expenses,
        stretch: monthly_gross_income * DTI_BACK_END - monthly_expenses,
        aggressive: monthly_gross_income * DTI_AGGRESSIVE - monthly_expenses,
    }
}

/// Classifies a monthly payment against a set of ceilings.
///
/// The payment lands in the first ceiling it fits under, in ascending
/// order; anything above the aggressive ceiling is out of reach.
#[must_use]
pub fn classify(
    monthly_payment: f64,
    thresholds: &AffordabilityThresholds,
) -> AffordabilityCategory {
    if monthly_payment <= thresholds.affordable {
        AffordabilityCategory::Affordable
    } else if monthly_payment <= thresholds.stretch {
        AffordabilityCategory::Stretch
    } else if monthly_payment <= thresholds.aggressive {
        AffordabilityCategory::Aggressive
    } else {
        AffordabilityCategory::OutOfReach
    }
}

/// Back-end debt-to-income ratio as a whole percentage.
///
/// Rounded to the nearest integer. Non-positive income yields 0 rather
/// than a division artifact.
#[must_use]
pub fn back_end_dti(total_monthly_debt: f64, monthly_gross_income: f64) -> f64 {
    if monthly_gross_income <= 0.0 {
        return 0.0;
    }
    (total_monthly_debt / monthly_gross_income * 100.0).round()
}
