use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionStatus {
    Enriched,
    NotEnriched,
}

impl ExpressionStatus {
    /// `Enriched` iff `value >= threshold`. A `NaN` on either side compares
    /// false, so missing expression is never enriched.
    pub fn classify(value: f64, threshold: f64) -> Self {
        if value >= threshold {
            ExpressionStatus::Enriched
        } else {
            ExpressionStatus::NotEnriched
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExpressionStatus::Enriched => "enriched",
            ExpressionStatus::NotEnriched => "not_enriched",
        }
    }
}

impl fmt::Display for ExpressionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
