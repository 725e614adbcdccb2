use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_option_number_from_string;

use crate::ledger::{Ledger, MatchRecord};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d %b %Y", "%b %d, %Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

// One row of the OddsPortal export. Everything is optional here because blank cells are
// legal in the file; validation happens in to_record.
#[derive(Deserialize, Debug)]
struct OddsPortalRow {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Home_Team")]
    home_team: Option<String>,
    #[serde(rename = "Away_Team")]
    away_team: Option<String>,
    #[serde(rename = "Home_Score", default, deserialize_with = "deserialize_option_number_from_string")]
    home_score: Option<u32>,
    #[serde(rename = "Away_Score", default, deserialize_with = "deserialize_option_number_from_string")]
    away_score: Option<u32>,
    #[serde(rename = "Home_Odds")]
    home_odds: Option<f64>,
    #[serde(rename = "Draw_Odds")]
    draw_odds: Option<f64>,
    #[serde(rename = "Away_Odds")]
    away_odds: Option<f64>,
    #[serde(rename = "Bookmakers_Surveyed", default, deserialize_with = "deserialize_option_number_from_string")]
    bookmakers_surveyed: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub upcoming: usize,
}

pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<Ledger> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open match csv {}", path.display()))?;
    read_ledger(file).with_context(|| format!("load match csv {}", path.display()))
}

pub fn read_ledger<R: Read>(reader: R) -> Result<Ledger> {
    let (records, summary) = read_records(reader)?;

    if summary.rows_skipped > 0 {
        log::warn!(
            "skipped {} of {} rows with missing values",
            summary.rows_skipped,
            summary.rows_read
        );
    }
    log::info!(
        "loaded {} matches ({} upcoming)",
        records.len(),
        summary.upcoming
    );

    Ok(Ledger::new(records))
}

// Parses every row, dropping incomplete ones. A malformed date or bad odds fails the whole load.
pub fn read_records<R: Read>(reader: R) -> Result<(Vec<MatchRecord>, LoadSummary)> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    // The export uses spaces in some column names
    let headers: StringRecord = rdr
        .headers()
        .context("read csv header")?
        .iter()
        .map(|h| h.replace(' ', "_"))
        .collect();
    rdr.set_headers(headers);

    let mut records = Vec::new();
    let mut summary = LoadSummary::default();

    for (i, row) in rdr.deserialize::<OddsPortalRow>().enumerate() {
        // Header is line 1
        let line = i + 2;
        let row = row.with_context(|| format!("line {line}: malformed row"))?;
        summary.rows_read += 1;

        match to_record(row).with_context(|| format!("line {line}"))? {
            Some(m) => {
                if !m.is_played() {
                    summary.upcoming += 1;
                }
                records.push(m);
            }
            None => {
                log::debug!("line {line}: missing values, skipped");
                summary.rows_skipped += 1;
            }
        }
    }

    Ok((records, summary))
}

fn to_record(row: OddsPortalRow) -> Result<Option<MatchRecord>> {
    let (Some(date), Some(home_team), Some(away_team)) = (
        non_empty(row.date),
        non_empty(row.home_team),
        non_empty(row.away_team),
    ) else {
        return Ok(None);
    };
    let (Some(home_odds), Some(draw_odds), Some(away_odds)) = (row.home_odds, row.draw_odds, row.away_odds) else {
        return Ok(None);
    };

    // Both scores or neither. Neither means the fixture hasn't been played yet
    if row.home_score.is_some() != row.away_score.is_some() {
        return Ok(None);
    }

    let date = parse_date(&date)?;

    for (name, odds) in [("home", home_odds), ("draw", draw_odds), ("away", away_odds)] {
        if !(odds.is_finite() && odds > 0.0) {
            bail!("{name} odds must be positive, got {odds}");
        }
    }

    Ok(Some(MatchRecord {
        date,
        home_team,
        away_team,
        home_score: row.home_score,
        away_score: row.away_score,
        home_odds,
        draw_odds,
        away_odds,
        bookmakers_surveyed: row.bookmakers_surveyed,
    }))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.date());
        }
    }
    bail!("unrecognised date {raw:?}")
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
