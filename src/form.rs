use chrono::NaiveDate;

use crate::form_context::FormContext;
use crate::ledger::{Ledger, Perspective};

/// Streak and rolling margin for one team on one side, as of a cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamForm {
    pub streak: i32,
    pub avg_margin: f64,
}

pub fn team_form(ledger: &Ledger, team: &str, perspective: Perspective, cutoff: NaiveDate, ctx: &FormContext) -> TeamForm {
    TeamForm {
        streak: streak(ledger, team, perspective, cutoff),
        avg_margin: rolling_margin(ledger, team, perspective, cutoff, ctx.margin_window),
    }
}

// Positive for a run of wins, negative for a run of losses, 0 with no history.
// The most recent result decides the sign and the run ends at the first result that disagrees.
pub fn streak(ledger: &Ledger, team: &str, perspective: Perspective, cutoff: NaiveDate) -> i32 {
    let mut results = ledger
        .prior_matches(team, perspective, cutoff)
        .filter_map(|m| m.won(perspective));

    let Some(last_result) = results.next() else {
        return 0;
    };

    let run = 1 + results.take_while(|&won| won == last_result).count() as i32;

    if last_result { run } else { -run }
}

// Mean margin over the last `window` matches, read from the team's side.
// Teams without history (or a zero window) fall back to the ledger-wide mean.
pub fn rolling_margin(ledger: &Ledger, team: &str, perspective: Perspective, cutoff: NaiveDate, window: usize) -> f64 {
    let mut total: i64 = 0;
    let mut counted = 0usize;

    for margin in ledger
        .prior_matches(team, perspective, cutoff)
        .filter_map(|m| m.margin())
        .take(window)
    {
        total += margin;
        counted += 1;
    }

    if counted == 0 {
        return perspective.orient(ledger.mean_margin());
    }

    perspective.orient(total as f64 / counted as f64)
}
