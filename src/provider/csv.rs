// Local CSV season source.
//
// Reads Fangraphs-export-format CSV files: a pitching file with rate stats
// (ERA, WHIP, K/9, ...) and a batting file with raw counting stats. Extra
// columns are silently absorbed; malformed rows are skipped with a warning
// so one bad export line never takes down the whole load.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ProviderError, SeasonSource};
use crate::stats::batting::PlayerBattingRow;
use crate::stats::risk::PitcherRateRow;

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Fangraphs pitching export row. Percentages may arrive as 0-100 or 0-1;
/// both are carried through unchanged (descriptive display only).
#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawPitching {
    Name: String,
    #[serde(default)]
    Team: String,
    ERA: f64,
    WHIP: f64,
    #[serde(rename = "K/9", alias = "K9")]
    k_per_9: f64,
    #[serde(rename = "BB/9", alias = "BB9")]
    bb_per_9: f64,
    #[serde(rename = "HR/9", alias = "HR9")]
    hr_per_9: f64,
    #[serde(rename = "GB%", alias = "GB", default)]
    gb_pct: f64,
    #[serde(rename = "FB%", alias = "FB", default)]
    fb_pct: f64,
    /// Absorb any extra columns the export includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

/// Fangraphs batting export row. Counting stats are f64 because some
/// sources emit fractional values; they are rounded on conversion.
#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawBatting {
    Name: String,
    #[serde(default)]
    Team: String,
    H: f64,
    AB: f64,
    BB: f64,
    HBP: f64,
    SF: f64,
    #[serde(rename = "2B")]
    doubles: f64,
    #[serde(rename = "3B")]
    triples: f64,
    HR: f64,
    /// Absorb any extra columns the export includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns true if all given f64 values are finite (not NaN or Infinity).
fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_pitching_from_reader<R: Read>(rdr: R) -> Result<Vec<PitcherRateRow>, ::csv::Error> {
    let mut reader = ::csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawPitching>() {
        match result {
            Ok(raw) => {
                if !all_finite(&[raw.ERA, raw.WHIP, raw.hr_per_9]) {
                    warn!(
                        "skipping pitcher '{}': non-finite ERA/WHIP/HR9 value",
                        raw.Name.trim()
                    );
                    continue;
                }
                rows.push(PitcherRateRow {
                    name: raw.Name.trim().to_string(),
                    team: raw.Team.trim().to_string(),
                    era: raw.ERA,
                    whip: raw.WHIP,
                    hr_per_9: raw.hr_per_9,
                    k_per_9: raw.k_per_9,
                    bb_per_9: raw.bb_per_9,
                    gb_pct: raw.gb_pct,
                    fb_pct: raw.fb_pct,
                });
            }
            Err(e) => {
                warn!("skipping malformed pitching row: {}", e);
            }
        }
    }
    Ok(rows)
}

fn load_batting_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerBattingRow>, ::csv::Error> {
    let mut reader = ::csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawBatting>() {
        match result {
            Ok(raw) => {
                rows.push(PlayerBattingRow {
                    name: raw.Name.trim().to_string(),
                    team: raw.Team.trim().to_string(),
                    hits: raw.H.round() as u32,
                    at_bats: raw.AB.round() as u32,
                    walks: raw.BB.round() as u32,
                    hit_by_pitch: raw.HBP.round() as u32,
                    sacrifice_flies: raw.SF.round() as u32,
                    doubles: raw.doubles.round() as u32,
                    triples: raw.triples.round() as u32,
                    home_runs: raw.HR.round() as u32,
                });
            }
            Err(e) => {
                warn!("skipping malformed batting row: {}", e);
            }
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load pitcher rate rows from a CSV file.
pub fn load_pitching(path: &Path) -> Result<Vec<PitcherRateRow>, ProviderError> {
    let file = std::fs::File::open(path).map_err(|e| ProviderError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_pitching_from_reader(file).map_err(|e| ProviderError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load player batting rows from a CSV file.
pub fn load_batting(path: &Path) -> Result<Vec<PlayerBattingRow>, ProviderError> {
    let file = std::fs::File::open(path).map_err(|e| ProviderError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_batting_from_reader(file).map_err(|e| ProviderError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// CsvSource
// ---------------------------------------------------------------------------

/// Season source backed by local CSV exports.
///
/// A CSV export is a single-season file, so the requested year does not
/// change what is read; it is logged to make a mismatch easy to spot.
pub struct CsvSource {
    pitching_path: String,
    batting_path: String,
}

impl CsvSource {
    pub fn new(pitching_path: String, batting_path: String) -> Self {
        CsvSource {
            pitching_path,
            batting_path,
        }
    }
}

#[async_trait]
impl SeasonSource for CsvSource {
    async fn pitching(&self, year: u16) -> Result<Vec<PitcherRateRow>, ProviderError> {
        debug!(year, path = %self.pitching_path, "loading pitching CSV");
        load_pitching(Path::new(&self.pitching_path))
    }

    async fn batting(&self, year: u16) -> Result<Vec<PlayerBattingRow>, ProviderError> {
        debug!(year, path = %self.batting_path, "loading batting CSV");
        load_batting(Path::new(&self.batting_path))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Pitching CSV --

    #[test]
    fn pitching_csv_parsed() {
        let csv_data = "\
Name,Team,ERA,WHIP,K/9,BB/9,HR/9,GB%,FB%
Zack Wheeler,PHI,2.57,0.96,10.0,2.1,0.9,42.8,36.6
Aaron Nola,PHI,3.57,1.14,8.9,2.0,1.2,43.3,37.8";

        let rows = load_pitching_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].name, "Zack Wheeler");
        assert_eq!(rows[0].team, "PHI");
        assert!((rows[0].era - 2.57).abs() < f64::EPSILON);
        assert!((rows[0].whip - 0.96).abs() < f64::EPSILON);
        assert!((rows[0].hr_per_9 - 0.9).abs() < f64::EPSILON);
        assert!((rows[0].k_per_9 - 10.0).abs() < f64::EPSILON);
        assert!((rows[0].gb_pct - 42.8).abs() < f64::EPSILON);
    }

    #[test]
    fn pitching_csv_extra_columns_ignored() {
        let csv_data = "\
Name,Team,ERA,WHIP,K/9,BB/9,HR/9,GB%,FB%,FIP,xFIP,SIERA
Zack Wheeler,PHI,2.57,0.96,10.0,2.1,0.9,42.8,36.6,3.13,3.25,3.40";

        let rows = load_pitching_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Zack Wheeler");
    }

    #[test]
    fn pitching_csv_malformed_rows_skipped() {
        let csv_data = "\
Name,Team,ERA,WHIP,K/9,BB/9,HR/9,GB%,FB%
Valid Pitcher,PHI,2.57,0.96,10.0,2.1,0.9,42.8,36.6
Bad Row,PHI,not_a_number,0.96,10.0,2.1,0.9,42.8,36.6
Another Valid,SFG,3.25,1.07,8.1,1.6,0.7,57.2,24.1";

        let rows = load_pitching_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Valid Pitcher");
        assert_eq!(rows[1].name, "Another Valid");
    }

    #[test]
    fn pitching_csv_nan_era_skipped() {
        let csv_data = "\
Name,Team,ERA,WHIP,K/9,BB/9,HR/9,GB%,FB%
Valid Pitcher,PHI,2.57,0.96,10.0,2.1,0.9,42.8,36.6
NaN Pitcher,PHI,NaN,0.96,10.0,2.1,0.9,42.8,36.6";

        let rows = load_pitching_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Valid Pitcher");
    }

    #[test]
    fn pitching_names_trimmed() {
        let csv_data = "\
Name,Team,ERA,WHIP,K/9,BB/9,HR/9,GB%,FB%
  Zack Wheeler  , PHI ,2.57,0.96,10.0,2.1,0.9,42.8,36.6";

        let rows = load_pitching_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "Zack Wheeler");
        assert_eq!(rows[0].team, "PHI");
    }

    #[test]
    fn pitching_csv_alias_headers() {
        let csv_data = "\
Name,Team,ERA,WHIP,K9,BB9,HR9,GB,FB
Zack Wheeler,PHI,2.57,0.96,10.0,2.1,0.9,42.8,36.6";

        let rows = load_pitching_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!((rows[0].hr_per_9 - 0.9).abs() < f64::EPSILON);
    }

    // -- Batting CSV --

    #[test]
    fn batting_csv_parsed() {
        let csv_data = "\
Name,Team,H,AB,BB,HBP,SF,2B,3B,HR
Shohei Ohtani,LAD,197,636,81,4,4,38,7,54
Mookie Betts,LAD,154,520,65,3,3,28,2,19";

        let rows = load_batting_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].name, "Shohei Ohtani");
        assert_eq!(rows[0].team, "LAD");
        assert_eq!(rows[0].hits, 197);
        assert_eq!(rows[0].at_bats, 636);
        assert_eq!(rows[0].walks, 81);
        assert_eq!(rows[0].hit_by_pitch, 4);
        assert_eq!(rows[0].sacrifice_flies, 4);
        assert_eq!(rows[0].doubles, 38);
        assert_eq!(rows[0].triples, 7);
        assert_eq!(rows[0].home_runs, 54);
    }

    #[test]
    fn batting_csv_fractional_stats_rounded() {
        let csv_data = "\
Name,Team,H,AB,BB,HBP,SF,2B,3B,HR
Projected Player,LAD,150.6,520.4,65.5,3.2,3.0,28.4,1.7,19.2";

        let rows = load_batting_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows[0].hits, 151);
        assert_eq!(rows[0].at_bats, 520);
        assert_eq!(rows[0].walks, 66);
        assert_eq!(rows[0].triples, 2);
        assert_eq!(rows[0].home_runs, 19);
    }

    #[test]
    fn batting_csv_malformed_rows_skipped() {
        let csv_data = "\
Name,Team,H,AB,BB,HBP,SF,2B,3B,HR
Valid Player,LAD,154,520,65,3,3,28,2,19
Bad Row,LAD,many,520,65,3,3,28,2,19";

        let rows = load_batting_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Valid Player");
    }

    #[test]
    fn batting_csv_extra_columns_ignored() {
        let csv_data = "\
Name,Team,H,AB,BB,HBP,SF,2B,3B,HR,AVG,OBP,SLG
Shohei Ohtani,LAD,197,636,81,4,4,38,7,54,0.310,0.390,0.646";

        let rows = load_batting_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].home_runs, 54);
    }

    #[test]
    fn empty_csv_returns_empty_vec() {
        let csv_data = "Name,Team,H,AB,BB,HBP,SF,2B,3B,HR";
        let rows = load_batting_from_reader(csv_data.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    // -- CsvSource --

    #[tokio::test]
    async fn csv_source_loads_both_files() {
        let tmp = std::env::temp_dir().join("pitchscout_csv_source");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(&tmp).unwrap();

        std::fs::write(
            tmp.join("pitching.csv"),
            "Name,Team,ERA,WHIP,K/9,BB/9,HR/9,GB%,FB%\nA,SFG,3.00,1.10,9.0,2.5,1.0,45.0,35.0\n",
        )
        .unwrap();
        std::fs::write(
            tmp.join("batting.csv"),
            "Name,Team,H,AB,BB,HBP,SF,2B,3B,HR\nB,LAD,150,500,60,5,4,30,2,25\n",
        )
        .unwrap();

        let source = CsvSource::new(
            tmp.join("pitching.csv").display().to_string(),
            tmp.join("batting.csv").display().to_string(),
        );

        let pitching = source.pitching(2024).await.unwrap();
        assert_eq!(pitching.len(), 1);
        assert_eq!(pitching[0].name, "A");

        let batting = source.batting(2024).await.unwrap();
        assert_eq!(batting.len(), 1);
        assert_eq!(batting[0].home_runs, 25);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn csv_source_missing_file_is_io_error() {
        let source = CsvSource::new(
            "/nonexistent/pitching.csv".into(),
            "/nonexistent/batting.csv".into(),
        );
        let err = source.pitching(2024).await.unwrap_err();
        match err {
            ProviderError::Io { .. } => {}
            other => panic!("expected Io error, got: {other}"),
        }
    }
}
