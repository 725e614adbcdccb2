#![allow(dead_code)]

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use superrugby_form::MatchRecord;

pub const TEAMS: [&str; 6] = ["Crusaders", "Chiefs", "Blues", "Bulls", "Sharks", "Brumbies"];

pub fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 2, 1).expect("valid date") + chrono::Duration::days(n)
}

pub fn played(date: NaiveDate, home: &str, away: &str, home_score: u32, away_score: u32) -> MatchRecord {
    MatchRecord {
        date,
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score: Some(home_score),
        away_score: Some(away_score),
        home_odds: 1.8,
        draw_odds: 21.0,
        away_odds: 2.1,
        bookmakers_surveyed: Some(12),
    }
}

pub fn upcoming(date: NaiveDate, home: &str, away: &str) -> MatchRecord {
    MatchRecord {
        home_score: None,
        away_score: None,
        ..played(date, home, away, 0, 0)
    }
}

// Random round-robin-ish season. Several fixtures share each date so same-day handling is
// exercised, and draws show up now and then.
pub fn random_records(seed: u64, n: usize) -> Vec<MatchRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let home = rng.random_range(0..TEAMS.len());
        let mut away = rng.random_range(0..TEAMS.len() - 1);
        if away >= home {
            away += 1;
        }
        let home_score = rng.random_range(0..45u32);
        let away_score = if rng.random_bool(0.05) { home_score } else { rng.random_range(0..45u32) };

        let mut m = played(day((i / 3) as i64 * 7), TEAMS[home], TEAMS[away], home_score, away_score);
        m.home_odds = rng.random_range(1.05..6.0);
        m.away_odds = rng.random_range(1.05..6.0);
        out.push(m);
    }
    out
}
