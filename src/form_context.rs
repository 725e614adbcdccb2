use std::env;

use chrono::{Local, NaiveDate};

const DEFAULT_MARGIN_WINDOW: usize = 5;
const DEFAULT_WIN_PROB_DECIMALS: u32 = 3;

#[derive(Debug, Clone)]
pub struct FormContext {
    pub margin_window: usize,       // Matches averaged by the rolling margin
    pub parallel: bool,

    pub win_prob_decimals: Option<u32>, // Rounding applied on output only
    pub as_of: Option<NaiveDate>,       // Fixtures on or after this date are "upcoming". None means today

    pub fit_bucket_count: usize,
    pub max_sweep_window: usize,
}

impl Default for FormContext {
    fn default() -> Self {
        Self {
            margin_window: DEFAULT_MARGIN_WINDOW,
            parallel: true,

            win_prob_decimals: Some(DEFAULT_WIN_PROB_DECIMALS),
            as_of: None,

            fit_bucket_count: 10,
            max_sweep_window: 10,
        }
    }
}

impl FormContext {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Same as from_env, reading variables through `lookup`. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let margin_window = lookup("FORM_MARGIN_WINDOW")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.margin_window)
            .clamp(1, 50);
        let parallel = lookup("FORM_PARALLEL")
            .map(|v| parse_bool(&v))
            .unwrap_or(defaults.parallel);
        let win_prob_decimals = match lookup("FORM_WIN_PROB_DECIMALS") {
            Some(v) if v.trim().eq_ignore_ascii_case("none") => None,
            Some(v) => v.trim().parse::<u32>().ok().map(|d| d.min(10)).or(defaults.win_prob_decimals),
            None => defaults.win_prob_decimals,
        };
        let as_of = lookup("FORM_AS_OF")
            .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok());

        Self {
            margin_window,
            parallel,
            win_prob_decimals,
            as_of,
            ..defaults
        }
    }

    pub fn as_of_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn parse_bool(v: &str) -> bool {
    let t = v.trim().to_ascii_lowercase();
    !(t.is_empty() || t == "0" || t == "false" || t == "off" || t == "no")
}
