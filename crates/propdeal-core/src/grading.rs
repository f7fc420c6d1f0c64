//! Weighted scoring and letter grading of computed deal metrics.
//!
//! The thresholds and weights are business policy, not math. They live in a
//! versioned `GradePolicy` value so a recalibration ships as a new policy
//! configuration instead of a code edit, and so the scoring table can be
//! tested as data.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Identity of a scored metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    RoiFiveYear,
    NetYield,
    Dscr,
    IrrFiveYear,
    GrossYield,
    CashFlow,
}

/// One scoring band: award `points` when the value is at least `threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Band {
    pub threshold: Decimal,
    pub points: Decimal,
}

/// The full banding for one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricBand {
    pub metric: Metric,
    /// Maximum contribution; equals the points of the top band.
    pub weight: Decimal,
    /// Descending thresholds; the first band with `value >= threshold` wins.
    pub bands: Vec<Band>,
    /// Points when the value sits below every band.
    pub floor_points: Decimal,
    /// Neutral points when the metric is unavailable (degenerate ratio).
    pub unavailable_points: Decimal,
}

/// A versioned scoring policy. Weights sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradePolicy {
    pub version: String,
    pub metrics: Vec<MetricBand>,
}

fn band(threshold: Decimal, points: Decimal) -> Band {
    Band { threshold, points }
}

impl GradePolicy {
    /// The six-factor policy: ROI, net yield, DSCR, IRR, gross yield, cash
    /// flow, weighted 25/25/20/15/10/5.
    pub fn standard() -> Self {
        GradePolicy {
            version: "v2-six-factor".into(),
            metrics: vec![
                MetricBand {
                    metric: Metric::RoiFiveYear,
                    weight: dec!(25),
                    bands: vec![
                        band(dec!(60), dec!(25)),
                        band(dec!(45), dec!(20)),
                        band(dec!(30), dec!(15)),
                    ],
                    floor_points: dec!(10),
                    unavailable_points: dec!(15),
                },
                MetricBand {
                    metric: Metric::NetYield,
                    weight: dec!(25),
                    bands: vec![
                        band(dec!(6), dec!(25)),
                        band(dec!(4), dec!(20)),
                        band(dec!(2), dec!(15)),
                    ],
                    floor_points: dec!(10),
                    unavailable_points: dec!(15),
                },
                MetricBand {
                    metric: Metric::Dscr,
                    weight: dec!(20),
                    bands: vec![
                        band(dec!(1.3), dec!(20)),
                        band(dec!(1.2), dec!(16)),
                        band(dec!(1.0), dec!(12)),
                    ],
                    floor_points: dec!(8),
                    unavailable_points: dec!(12),
                },
                MetricBand {
                    metric: Metric::IrrFiveYear,
                    weight: dec!(15),
                    bands: vec![
                        band(dec!(15), dec!(15)),
                        band(dec!(12), dec!(12)),
                        band(dec!(8), dec!(9)),
                    ],
                    floor_points: dec!(6),
                    unavailable_points: dec!(9),
                },
                MetricBand {
                    metric: Metric::GrossYield,
                    weight: dec!(10),
                    bands: vec![
                        band(dec!(8), dec!(10)),
                        band(dec!(6), dec!(8)),
                        band(dec!(4), dec!(6)),
                    ],
                    floor_points: dec!(4),
                    unavailable_points: dec!(6),
                },
                MetricBand {
                    metric: Metric::CashFlow,
                    weight: dec!(5),
                    bands: vec![
                        band(dec!(2000), dec!(5)),
                        band(dec!(1000), dec!(4)),
                        band(dec!(500), dec!(3)),
                        band(dec!(0), dec!(2)),
                    ],
                    floor_points: dec!(1),
                    unavailable_points: dec!(2),
                },
            ],
        }
    }

    /// The earlier four-factor policy (ROI 30, cash flow 25, net yield 25,
    /// gross yield 20), kept as an alternative configuration.
    pub fn legacy_v1() -> Self {
        GradePolicy {
            version: "v1-four-factor".into(),
            metrics: vec![
                MetricBand {
                    metric: Metric::RoiFiveYear,
                    weight: dec!(30),
                    bands: vec![
                        band(dec!(60), dec!(30)),
                        band(dec!(45), dec!(24)),
                        band(dec!(30), dec!(18)),
                    ],
                    floor_points: dec!(12),
                    unavailable_points: dec!(18),
                },
                MetricBand {
                    metric: Metric::CashFlow,
                    weight: dec!(25),
                    bands: vec![
                        band(dec!(2000), dec!(25)),
                        band(dec!(1000), dec!(20)),
                        band(dec!(500), dec!(15)),
                        band(dec!(0), dec!(10)),
                    ],
                    floor_points: Decimal::ZERO,
                    unavailable_points: dec!(10),
                },
                MetricBand {
                    metric: Metric::NetYield,
                    weight: dec!(25),
                    bands: vec![
                        band(dec!(6), dec!(25)),
                        band(dec!(4), dec!(20)),
                        band(dec!(2), dec!(15)),
                    ],
                    floor_points: dec!(10),
                    unavailable_points: dec!(15),
                },
                MetricBand {
                    metric: Metric::GrossYield,
                    weight: dec!(20),
                    bands: vec![
                        band(dec!(8), dec!(20)),
                        band(dec!(6), dec!(16)),
                        band(dec!(4), dec!(12)),
                    ],
                    floor_points: dec!(8),
                    unavailable_points: dec!(12),
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

/// The metric values a policy scores. Unavailable ratios stay `None` and
/// draw the metric's neutral sub-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeMetrics {
    pub monthly_cash_flow: Money,
    pub net_yield_pct: Option<Percent>,
    pub gross_yield_pct: Option<Percent>,
    pub roi_5y_pct: Option<Percent>,
    pub dscr: Option<Decimal>,
    pub irr_5y_pct: Option<Percent>,
}

/// One metric's scored contribution, kept for rationale displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricContribution {
    pub metric: Metric,
    pub weight: Decimal,
    /// `None` when the metric was unavailable.
    pub value: Option<Decimal>,
    pub points: Decimal,
}

/// Weighted score, letter grade, and qualitative verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    /// 0-100, sum of the weighted sub-scores.
    pub score: Decimal,
    pub letter_grade: String,
    pub verdict: String,
    pub policy_version: String,
    pub contributions: Vec<MetricContribution>,
}

/// Score breakpoints, all inclusive at the boundary.
const GRADE_BREAKPOINTS: [(Decimal, &str); 10] = [
    (dec!(90), "A+"),
    (dec!(85), "A"),
    (dec!(80), "A-"),
    (dec!(75), "B+"),
    (dec!(70), "B"),
    (dec!(65), "B-"),
    (dec!(60), "C+"),
    (dec!(55), "C"),
    (dec!(50), "C-"),
    (dec!(40), "D"),
];

/// Score the metrics against a policy.
pub fn grade(metrics: &GradeMetrics, policy: &GradePolicy) -> GradeResult {
    let mut score = Decimal::ZERO;
    let mut contributions = Vec::with_capacity(policy.metrics.len());

    for metric_band in &policy.metrics {
        let value = metric_value(metrics, metric_band.metric);
        let points = score_band(metric_band, value);
        score += points;
        contributions.push(MetricContribution {
            metric: metric_band.metric,
            weight: metric_band.weight,
            value,
            points,
        });
    }

    let letter = letter_for(score);
    GradeResult {
        score,
        letter_grade: letter.to_string(),
        verdict: verdict_for(letter).to_string(),
        policy_version: policy.version.clone(),
        contributions,
    }
}

fn metric_value(metrics: &GradeMetrics, metric: Metric) -> Option<Decimal> {
    match metric {
        Metric::RoiFiveYear => metrics.roi_5y_pct,
        Metric::NetYield => metrics.net_yield_pct,
        Metric::Dscr => metrics.dscr,
        Metric::IrrFiveYear => metrics.irr_5y_pct,
        Metric::GrossYield => metrics.gross_yield_pct,
        Metric::CashFlow => Some(metrics.monthly_cash_flow),
    }
}

fn score_band(metric_band: &MetricBand, value: Option<Decimal>) -> Decimal {
    let Some(v) = value else {
        return metric_band.unavailable_points;
    };
    for b in &metric_band.bands {
        if v >= b.threshold {
            return b.points;
        }
    }
    metric_band.floor_points
}

fn letter_for(score: Decimal) -> &'static str {
    for (cutoff, letter) in GRADE_BREAKPOINTS {
        if score >= cutoff {
            return letter;
        }
    }
    "F"
}

fn verdict_for(letter: &str) -> &'static str {
    match letter.chars().next() {
        Some('A') => "Excellent investment potential",
        Some('B') => "Solid investment — verify assumptions",
        Some('C') => "Borderline; negotiate price/terms",
        Some('D') => "Weak; high risk",
        _ => "Not recommended",
    }
}
