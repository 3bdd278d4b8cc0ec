// ============================================================
// Layer 3 — Salary Post-processing
// ============================================================
// Everything that happens to a predicted salary after the model
// has produced it. No model code here, only pure functions.
//
// Tax rule (flat, illustrative, no brackets):
//   gross > 62 000  →  tax = 20% of gross
//   otherwise       →  tax = 0
//   net = gross − tax

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Gross salaries strictly above this are taxed.
pub const TAX_THRESHOLD: f64 = 62_000.0;

/// Flat rate applied to the whole gross once above the threshold.
pub const TAX_RATE: f64 = 0.2;

/// Experience values swept for the salary-vs-experience trend.
pub const EXPERIENCE_SWEEP: RangeInclusive<u32> = 1..=20;

/// Display-only market averages. Not derived from the model.
pub const INDUSTRY_AVERAGES: [IndustryAverage; 5] = [
    IndustryAverage { industry: "IT",         average_salary: 85_000 },
    IndustryAverage { industry: "Finance",    average_salary: 72_000 },
    IndustryAverage { industry: "Healthcare", average_salary: 66_000 },
    IndustryAverage { industry: "Education",  average_salary: 55_000 },
    IndustryAverage { industry: "Retail",     average_salary: 50_000 },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndustryAverage {
    pub industry:       &'static str,
    pub average_salary: u32,
}

/// Predicted gross with its tax deduction and in-hand amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub gross: f64,
    pub tax:   f64,
    pub net:   f64,
}

impl SalaryBreakdown {
    pub fn is_taxed(&self) -> bool {
        self.tax > 0.0
    }
}

/// One point of the salary-vs-experience trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub experience: u32,
    pub salary:     f64,
}

/// Apply the flat tax rule to a predicted gross salary.
pub fn apply_tax(gross: f64) -> SalaryBreakdown {
    let tax = if gross > TAX_THRESHOLD { gross * TAX_RATE } else { 0.0 };
    SalaryBreakdown { gross, tax, net: gross - tax }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_threshold_is_untaxed() {
        let b = apply_tax(62_000.0);
        assert_eq!(b.tax, 0.0);
        assert_eq!(b.net, 62_000.0);
        assert!(!b.is_taxed());
    }

    #[test]
    fn test_just_above_threshold_is_taxed() {
        let b = apply_tax(62_000.01);
        assert!(b.tax > 0.0);
        assert!((b.tax - 12_400.002).abs() < 1e-6);
    }

    #[test]
    fn test_sweep_has_twenty_points() {
        assert_eq!(EXPERIENCE_SWEEP.count(), 20);
        assert_eq!(*EXPERIENCE_SWEEP.start(), 1);
        assert_eq!(*EXPERIENCE_SWEEP.end(), 20);
    }

    #[test]
    fn test_industry_table() {
        let names: Vec<_> = INDUSTRY_AVERAGES.iter().map(|i| i.industry).collect();
        assert_eq!(names, ["IT", "Finance", "Healthcare", "Education", "Retail"]);
        assert_eq!(INDUSTRY_AVERAGES[0].average_salary, 85_000);
    }

    proptest! {
        #[test]
        fn prop_tax_rule_holds(gross in 0.0f64..1_000_000.0) {
            let b = apply_tax(gross);
            if gross <= TAX_THRESHOLD {
                prop_assert_eq!(b.tax, 0.0);
            } else {
                prop_assert_eq!(b.tax, gross * 0.2);
            }
            prop_assert_eq!(b.net, gross - b.tax);
            prop_assert!(b.net >= 0.0);
        }
    }
}
