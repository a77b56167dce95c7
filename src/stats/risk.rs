// Pitcher risk scoring: min-max normalization of risk-correlated rate stats
// averaged into a single relative score per pitcher.

use std::collections::HashMap;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Input record
// ---------------------------------------------------------------------------

/// Season rate stats for a single pitcher. `era`, `whip`, and `hr_per_9`
/// feed the risk score; the remaining metrics are descriptive and carried
/// through for display only.
#[derive(Debug, Clone)]
pub struct PitcherRateRow {
    /// Unique within a team roster.
    pub name: String,
    pub team: String,
    pub era: f64,
    pub whip: f64,
    pub hr_per_9: f64,
    pub k_per_9: f64,
    pub bb_per_9: f64,
    pub gb_pct: f64,
    pub fb_pct: f64,
}

// ---------------------------------------------------------------------------
// Metric selection
// ---------------------------------------------------------------------------

/// A risk-correlated metric column. Selection is by column name at the
/// configuration boundary only; everything downstream is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskMetric {
    Era,
    Whip,
    HomeRunsPerNine,
}

/// The fixed metric set used by the dashboard: higher is riskier for all
/// three.
pub const DEFAULT_METRICS: [RiskMetric; 3] =
    [RiskMetric::Era, RiskMetric::Whip, RiskMetric::HomeRunsPerNine];

impl RiskMetric {
    /// Parse a configuration column name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<RiskMetric> {
        match name {
            "ERA" => Some(RiskMetric::Era),
            "WHIP" => Some(RiskMetric::Whip),
            "HR/9" | "HR9" => Some(RiskMetric::HomeRunsPerNine),
            _ => None,
        }
    }

    /// The canonical column name.
    pub fn name(self) -> &'static str {
        match self {
            RiskMetric::Era => "ERA",
            RiskMetric::Whip => "WHIP",
            RiskMetric::HomeRunsPerNine => "HR/9",
        }
    }

    /// Extract this metric's value from a row.
    fn value(self, row: &PitcherRateRow) -> f64 {
        match self {
            RiskMetric::Era => row.era,
            RiskMetric::Whip => row.whip,
            RiskMetric::HomeRunsPerNine => row.hr_per_9,
        }
    }
}

// ---------------------------------------------------------------------------
// Output record and errors
// ---------------------------------------------------------------------------

/// Composite risk score for one pitcher: the mean of the min-max normalized
/// metric values, in [0, 1]. A relative indicator, comparable only within
/// the roster it was computed over.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskScore {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("no risk score for pitcher '{name}'")]
    PitcherNotFound { name: String },
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Min-max normalize a column into [0, 1].
///
/// When every value is identical (including the single-element case) the
/// column carries no discriminating information and every element maps to
/// the midpoint 0.5, which also avoids division by zero.
pub fn normalize_column(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let (min, max) = values.iter().fold((first, first), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    if min == max {
        return vec![0.5; values.len()];
    }
    values.iter().map(|v| (v - min) / (max - min)).collect()
}

/// Score every pitcher in `rows` against the given metric set.
///
/// Each metric column is normalized independently across the full input row
/// set -- never across a pair under comparison -- so scores stay comparable
/// across different selections from the same roster. The score per pitcher
/// is the arithmetic mean of its normalized metric values, keyed by name
/// (duplicate names keep the last row).
///
/// Empty input yields an empty map. `metrics` must be non-empty; the config
/// layer validates this before the scorer is ever invoked.
pub fn score(
    rows: &[PitcherRateRow],
    metrics: &[RiskMetric],
) -> HashMap<String, RiskScore> {
    if rows.is_empty() || metrics.is_empty() {
        return HashMap::new();
    }

    let normalized: Vec<Vec<f64>> = metrics
        .iter()
        .map(|metric| {
            let column: Vec<f64> = rows.iter().map(|r| metric.value(r)).collect();
            normalize_column(&column)
        })
        .collect();

    let mut scores = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let sum: f64 = normalized.iter().map(|column| column[i]).sum();
        scores.insert(
            row.name.clone(),
            RiskScore {
                name: row.name.clone(),
                score: sum / metrics.len() as f64,
            },
        );
    }
    scores
}

/// Look up a pitcher's score by name.
///
/// A missing name is a caller error (the pitcher was never in the scored
/// roster); there is no fallback here, the caller surfaces the condition.
pub fn lookup<'a>(
    scores: &'a HashMap<String, RiskScore>,
    name: &str,
) -> Result<&'a RiskScore, RiskError> {
    scores.get(name).ok_or_else(|| RiskError::PitcherNotFound {
        name: name.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
