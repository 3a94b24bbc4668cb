use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level evaluation axes of the rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    BusinessImpact,
    ResourceInvestment,
    ExecutionRisk,
}

impl MetricId {
    pub const ALL: [MetricId; 3] = [
        MetricId::BusinessImpact,
        MetricId::ResourceInvestment,
        MetricId::ExecutionRisk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::BusinessImpact => "business_impact",
            MetricId::ResourceInvestment => "resource_investment",
            MetricId::ExecutionRisk => "execution_risk",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricId::BusinessImpact => "Business Impact",
            MetricId::ResourceInvestment => "Resource Investment",
            MetricId::ExecutionRisk => "Execution Risk",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse qualitative label derived from an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub const MID_THRESHOLD: f64 = 2.5;
    pub const HIGH_THRESHOLD: f64 = 3.67;

    pub fn from_score(score: f64) -> Self {
        if score < Self::MID_THRESHOLD {
            Band::Low
        } else if score < Self::HIGH_THRESHOLD {
            Band::Mid
        } else {
            Band::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Mid => "mid",
            Band::High => "high",
        }
    }
}

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;
pub const DEFAULT_SCORE: f64 = 3.0;

/// Rounds to two decimal places, the precision every reported score carries.
/// Rounds through two-decimal formatting, so exact ties go to the even digit.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

pub(crate) fn in_score_range(value: f64) -> bool {
    value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_exact() {
        assert_eq!(Band::from_score(2.49), Band::Low);
        assert_eq!(Band::from_score(2.5), Band::Mid);
        assert_eq!(Band::from_score(3.66), Band::Mid);
        assert_eq!(Band::from_score(3.67), Band::High);
        assert_eq!(Band::from_score(1.0), Band::Low);
        assert_eq!(Band::from_score(5.0), Band::High);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.996), 3.0);
        assert_eq!(round2(4.0), 4.0);
    }

    #[test]
    fn round2_breaks_exact_ties_to_even() {
        assert_eq!(round2(1.125), 1.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(-1.125), -1.12);
    }

    #[test]
    fn metric_ids_serialize_as_snake_case() {
        let encoded = serde_json::to_string(&MetricId::ResourceInvestment).expect("serializes");
        assert_eq!(encoded, "\"resource_investment\"");
        assert_eq!(MetricId::ExecutionRisk.to_string(), "execution_risk");
    }

    #[test]
    fn score_range_rejects_non_finite_values() {
        assert!(in_score_range(1.0));
        assert!(in_score_range(5.0));
        assert!(!in_score_range(0.99));
        assert!(!in_score_range(f64::NAN));
        assert!(!in_score_range(f64::INFINITY));
    }
}
