use crate::features::{build_features, FeatureTable};
use crate::form_context::FormContext;
use crate::ledger::Ledger;
use crate::util::pearson;

// How well the bookmaker-implied probability matches what actually happened.
// Played rows are bucketed by home_win_prob; returns the average absolute gap per match
// between expected and actual home wins.
pub fn analyze_fit(table: &FeatureTable, ctx: &FormContext, verbose: bool) -> f64 {
    let buckets = ctx.fit_bucket_count.max(1);

    let mut bucket_wins = vec![0.0; buckets];
    let mut bucket_ewins = vec![0.0; buckets];
    let mut bucket_played = vec![0.0; buckets];

    for r in table.training_rows() {
        let Some(home_win) = r.home_win else { continue };
        let bucket_index = ((r.home_win_prob * buckets as f64).floor() as usize).min(buckets - 1);

        bucket_played[bucket_index] += 1.0;
        bucket_ewins[bucket_index] += r.home_win_prob;
        if home_win {
            bucket_wins[bucket_index] += 1.0;
        }
    }

    let sum_matches_played: f64 = bucket_played.iter().sum();
    if sum_matches_played == 0.0 {
        return 0.0;
    }

    let mut error = 0.0;
    for i in 0..buckets {
        error += f64::abs(bucket_wins[i] - bucket_ewins[i]);

        if verbose && bucket_played[i] > 0.0 {
            log::info!("P(H) bucket {0:3.2} | Matches played: {1:5} | Win rate: {2:4.2} | Implied: {3:4.2}",
                i as f64 / buckets as f64,
                bucket_played[i],
                bucket_wins[i] / bucket_played[i],
                bucket_ewins[i] / bucket_played[i],
            );
        }
    }

    error /= sum_matches_played;

    if verbose {
        log::info!("Mean calibration error of implied odds: {error:.4}");
    }

    error
}

// Rebuilds the table for every window in 1..=max_sweep_window and correlates the form
// difference (home_avg_marg - away_avg_marg) with the final margin.
pub fn window_var_checker(ledger: &Ledger, ctx: &FormContext) -> Vec<(usize, f64)> {
    let mut out = Vec::new();

    for window in 1..=ctx.max_sweep_window {
        let sweep_ctx = FormContext {
            margin_window: window,
            ..ctx.clone()
        };
        let table = build_features(ledger, &sweep_ctx);

        let mut form_diff = Vec::new();
        let mut margins = Vec::new();
        for r in table.training_rows() {
            let Some(margin) = r.home_margin else { continue };
            form_diff.push(r.home_avg_marg - r.away_avg_marg);
            margins.push(margin as f64);
        }

        let Some(r) = pearson(&form_diff, &margins) else {
            log::info!("Window {window:2}: not enough spread to correlate");
            continue;
        };
        log::info!("Window {window:2}, correlation {r:5.4}");

        out.push((window, r));
    }

    out
}
