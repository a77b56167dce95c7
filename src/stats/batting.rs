// Team offensive aggregation: BA/OBP/SLG derived from raw per-player
// counting stats for one team/season.

// ---------------------------------------------------------------------------
// Input and output records
// ---------------------------------------------------------------------------

/// Raw season counting stats for a single batter. One row per player-season.
#[derive(Debug, Clone)]
pub struct PlayerBattingRow {
    pub name: String,
    pub team: String,
    pub hits: u32,
    pub at_bats: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub sacrifice_flies: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
}

/// Derived team-level offensive rate stats, each rounded to 3 decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamOffensiveSummary {
    pub batting_average: f64,
    pub on_base_percentage: f64,
    pub slugging_percentage: f64,
}

impl TeamOffensiveSummary {
    /// The all-zero summary produced for an empty roster ("no qualified
    /// at-bats"). Zero here means "no data", not "worst possible".
    pub const ZERO: TeamOffensiveSummary = TeamOffensiveSummary {
        batting_average: 0.0,
        on_base_percentage: 0.0,
        slugging_percentage: 0.0,
    };
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Round to 3 decimal places, half away from zero.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Aggregate per-player batting rows into a team offensive summary.
///
/// All counting stats are summed across the roster first; the rate stats are
/// then derived from the totals. Any denominator of zero yields 0 for that
/// metric rather than an error, so an empty (or unresolvable) roster degrades
/// to an all-zero summary.
///
/// Singles are inferred as `H - 2B - 3B - HR` and may be negative when the
/// input is malformed; no validation is performed and the value propagates
/// arithmetically.
pub fn aggregate(rows: &[PlayerBattingRow]) -> TeamOffensiveSummary {
    let total_hits: i64 = rows.iter().map(|r| i64::from(r.hits)).sum();
    let total_at_bats: i64 = rows.iter().map(|r| i64::from(r.at_bats)).sum();
    let total_walks: i64 = rows.iter().map(|r| i64::from(r.walks)).sum();
    let total_hbp: i64 = rows.iter().map(|r| i64::from(r.hit_by_pitch)).sum();
    let total_sf: i64 = rows.iter().map(|r| i64::from(r.sacrifice_flies)).sum();
    let total_doubles: i64 = rows.iter().map(|r| i64::from(r.doubles)).sum();
    let total_triples: i64 = rows.iter().map(|r| i64::from(r.triples)).sum();
    let total_home_runs: i64 = rows.iter().map(|r| i64::from(r.home_runs)).sum();

    let total_singles = total_hits - total_doubles - total_triples - total_home_runs;
    let total_bases =
        total_singles + 2 * total_doubles + 3 * total_triples + 4 * total_home_runs;

    let batting_average = if total_at_bats > 0 {
        total_hits as f64 / total_at_bats as f64
    } else {
        0.0
    };

    let obp_denominator = total_at_bats + total_walks + total_hbp + total_sf;
    let on_base_percentage = if obp_denominator > 0 {
        (total_hits + total_walks + total_hbp) as f64 / obp_denominator as f64
    } else {
        0.0
    };

    let slugging_percentage = if total_at_bats > 0 {
        total_bases as f64 / total_at_bats as f64
    } else {
        0.0
    };

    TeamOffensiveSummary {
        batting_average: round3(batting_average),
        on_base_percentage: round3(on_base_percentage),
        slugging_percentage: round3(slugging_percentage),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
