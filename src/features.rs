use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;

use crate::form::team_form;
use crate::form_context::FormContext;
use crate::ledger::{Ledger, MatchRecord, Perspective};
use crate::teams::nationality;

/// One fixture with its pre-match form features. Column names follow the OddsPortal export
/// so the table can be handed straight to the model pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Home_Team")]
    pub home_team: String,
    #[serde(rename = "Away_Team")]
    pub away_team: String,
    #[serde(rename = "Home_Score")]
    pub home_score: Option<u32>,
    #[serde(rename = "Away_Score")]
    pub away_score: Option<u32>,
    #[serde(rename = "Home_Odds")]
    pub home_odds: f64,
    #[serde(rename = "Draw_Odds")]
    pub draw_odds: f64,
    #[serde(rename = "Away_Odds")]
    pub away_odds: f64,
    #[serde(rename = "Bookmakers_Surveyed")]
    pub bookmakers_surveyed: Option<u32>,

    pub home_margin: Option<i64>,
    pub home_win: Option<bool>,

    pub home_streak: i32,
    pub home_avg_marg: f64,
    pub away_streak: i32,
    pub away_avg_marg: f64,
    pub home_win_prob: f64,

    pub home_nationality: Option<&'static str>,
    pub away_nationality: Option<&'static str>,
    #[serde(rename = "Year")]
    pub year: i32,
}

impl FeatureRow {
    pub fn is_played(&self) -> bool {
        self.home_margin.is_some()
    }
}

/// Output of a single feature pass, sorted by date descending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<FeatureRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureRow> {
        self.rows.iter()
    }

    // Rows with a known result, i.e. the ones a model can be trained on
    pub fn training_rows(&self) -> impl Iterator<Item = &FeatureRow> {
        self.rows.iter().filter(|r| r.is_played())
    }

    // Fixtures on or after `as_of`, kept for live prediction
    pub fn upcoming_rows(&self, as_of: NaiveDate) -> impl Iterator<Item = &FeatureRow> {
        self.rows.iter().filter(move |r| r.date >= as_of)
    }
}

impl<'a> IntoIterator for &'a FeatureTable {
    type Item = &'a FeatureRow;
    type IntoIter = std::slice::Iter<'a, FeatureRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// Every row only looks at the ledger filtered by its own date, never at other rows,
// so the pass can be split across threads freely.
pub fn build_features(ledger: &Ledger, ctx: &FormContext) -> FeatureTable {
    let featurize = |m: &MatchRecord| featurize_match(ledger, m, ctx);

    let mut rows: Vec<FeatureRow> = if ctx.parallel {
        ledger.records().par_iter().map(featurize).collect()
    } else {
        ledger.records().iter().map(featurize).collect()
    };

    rows.sort_by(|a, b| b.date.cmp(&a.date));

    log::debug!(
        "built {} feature rows (window {}, parallel {})",
        rows.len(),
        ctx.margin_window,
        ctx.parallel
    );

    FeatureTable { rows }
}

pub fn featurize_match(ledger: &Ledger, m: &MatchRecord, ctx: &FormContext) -> FeatureRow {
    let home = team_form(ledger, &m.home_team, Perspective::Home, m.date, ctx);
    let away = team_form(ledger, &m.away_team, Perspective::Away, m.date, ctx);

    FeatureRow {
        date: m.date,
        home_team: m.home_team.clone(),
        away_team: m.away_team.clone(),
        home_score: m.home_score,
        away_score: m.away_score,
        home_odds: m.home_odds,
        draw_odds: m.draw_odds,
        away_odds: m.away_odds,
        bookmakers_surveyed: m.bookmakers_surveyed,

        home_margin: m.margin(),
        home_win: m.home_win(),

        home_streak: home.streak,
        home_avg_marg: home.avg_margin,
        away_streak: away.streak,
        away_avg_marg: away.avg_margin,
        home_win_prob: m.implied_home_win_prob(),

        home_nationality: nationality(&m.home_team),
        away_nationality: nationality(&m.away_team),
        year: m.date.year(),
    }
}
