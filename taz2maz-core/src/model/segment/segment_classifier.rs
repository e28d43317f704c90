use super::{IncomeCategory, Segment};

/// assigns trip ends to market segments. only the income-segmented purpose (`work`)
/// is crossed with an income category; the comparison is case-sensitive.
#[derive(Clone, Debug)]
pub struct SegmentClassifier {
    income_segmented_purpose: String,
}

impl Default for SegmentClassifier {
    fn default() -> Self {
        SegmentClassifier {
            income_segmented_purpose: String::from("work"),
        }
    }
}

impl SegmentClassifier {
    pub fn new(income_segmented_purpose: &str) -> SegmentClassifier {
        SegmentClassifier {
            income_segmented_purpose: income_segmented_purpose.to_string(),
        }
    }

    pub fn income_category(&self, income: f64) -> IncomeCategory {
        IncomeCategory::from_income(income)
    }

    pub fn segment_key(&self, purpose: &str, income_category: IncomeCategory) -> Segment {
        if purpose == self.income_segmented_purpose {
            Segment(format!("{purpose}_{income_category}"))
        } else {
            Segment(purpose.to_string())
        }
    }

    /// segment of a single trip end given the household income.
    pub fn classify(&self, purpose: &str, income: f64) -> Segment {
        self.segment_key(purpose, self.income_category(income))
    }
}
