use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use superrugby_form::data_loader::{parse_date, read_records};
use superrugby_form::{build_features, load_ledger, FormContext};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn loads_oddsportal_export() {
    let raw = fs::read_to_string(fixture_path("oddsportal_sample.csv")).expect("fixture file should be readable");
    let (records, summary) = read_records(raw.as_bytes()).expect("fixture should parse");

    assert_eq!(summary.rows_read, 8);
    assert_eq!(summary.rows_skipped, 2);
    assert_eq!(summary.upcoming, 1);
    assert_eq!(records.len(), 6);

    let first = &records[0];
    assert_eq!(first.date, ymd(2019, 6, 22));
    assert_eq!(first.home_team, "Crusaders");
    assert!(!first.is_played());

    let draw = records.iter().find(|m| m.home_team == "Bulls").expect("draw kept");
    assert_eq!(draw.margin(), Some(0));
    assert_eq!(draw.bookmakers_surveyed, None);
    assert_eq!(records[1].bookmakers_surveyed, Some(12));
}

#[test]
fn loaded_ledger_feeds_the_builder() {
    let ledger = load_ledger(fixture_path("oddsportal_sample.csv")).expect("fixture should load");
    let table = build_features(&ledger, &FormContext::default());

    assert_eq!(table.len(), 6);
    let upcoming = &table.rows()[0];
    assert_eq!(upcoming.date, ymd(2019, 6, 22));
    // Crusaders home: won 24-13, won 32-8, lost 18-24
    assert_eq!(upcoming.home_streak, -1);
    assert!((upcoming.home_avg_marg - (11.0 + 24.0 - 6.0) / 3.0).abs() < 1e-12);
}

#[test]
fn unparseable_date_fails_the_load() {
    let csv = "Date,Home_Team,Away_Team,Home_Score,Away_Score,Home_Odds,Draw_Odds,Away_Odds,Bookmakers_Surveyed\n\
               2019-02-16,Crusaders,Chiefs,24,13,1.25,26.0,4.10,12\n\
               sometime,Blues,Chiefs,24,13,1.25,26.0,4.10,12\n";
    let err = read_records(csv.as_bytes()).expect_err("bad date");
    assert!(format!("{err:#}").contains("line 3"));
}

#[test]
fn non_positive_odds_fail_the_load() {
    let csv = "Date,Home_Team,Away_Team,Home_Score,Away_Score,Home_Odds,Draw_Odds,Away_Odds,Bookmakers_Surveyed\n\
               2019-02-16,Crusaders,Chiefs,24,13,0,26.0,4.10,12\n";
    assert!(read_records(csv.as_bytes()).is_err());
}

#[test]
fn accepts_common_date_layouts() {
    assert_eq!(parse_date("2019-02-16").unwrap(), ymd(2019, 2, 16));
    assert_eq!(parse_date("16/02/2019").unwrap(), ymd(2019, 2, 16));
    assert_eq!(parse_date("16 Feb 2019").unwrap(), ymd(2019, 2, 16));
    assert_eq!(parse_date("Feb 16, 2019").unwrap(), ymd(2019, 2, 16));
    assert_eq!(parse_date("2019-02-16 19:35:00").unwrap(), ymd(2019, 2, 16));
    assert!(parse_date("").is_err());
}
