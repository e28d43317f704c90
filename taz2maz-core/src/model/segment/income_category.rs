use serde::{Deserialize, Serialize};

/// household income bucket used to segment work trips. buckets are half-open:
/// `[-inf, 30k)`, `[30k, 60k)`, `[60k, 100k)`, `[100k, +inf)`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    Low,
    Med,
    High,
    VeryHigh,
}

impl IncomeCategory {
    pub fn from_income(income: f64) -> IncomeCategory {
        if income < 30_000.0 {
            IncomeCategory::Low
        } else if income < 60_000.0 {
            IncomeCategory::Med
        } else if income < 100_000.0 {
            IncomeCategory::High
        } else {
            IncomeCategory::VeryHigh
        }
    }

    /// the label used when composing segment keys, e.g. `work_very high`.
    pub fn label(&self) -> &'static str {
        match self {
            IncomeCategory::Low => "low",
            IncomeCategory::Med => "med",
            IncomeCategory::High => "high",
            IncomeCategory::VeryHigh => "very high",
        }
    }
}

impl std::fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod test {
    use super::IncomeCategory;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(IncomeCategory::from_income(29_999.0), IncomeCategory::Low);
        assert_eq!(IncomeCategory::from_income(30_000.0), IncomeCategory::Med);
        assert_eq!(IncomeCategory::from_income(59_999.99), IncomeCategory::Med);
        assert_eq!(IncomeCategory::from_income(60_000.0), IncomeCategory::High);
        assert_eq!(IncomeCategory::from_income(99_999.99), IncomeCategory::High);
        assert_eq!(IncomeCategory::from_income(100_000.0), IncomeCategory::VeryHigh);
        assert_eq!(IncomeCategory::from_income(-5.0), IncomeCategory::Low);
    }

    #[test]
    fn test_labels() {
        assert_eq!(IncomeCategory::VeryHigh.to_string(), "very high");
        assert_eq!(IncomeCategory::Med.label(), "med");
    }
}
