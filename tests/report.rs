mod common;

use common::{day, played, random_records, upcoming};
use superrugby_form::diagnostics::{analyze_fit, window_var_checker};
use superrugby_form::report::{write_features_csv, write_features_json};
use superrugby_form::{build_features, FormContext, Ledger};

fn short_season() -> Ledger {
    let mut records = vec![
        played(day(0), "Crusaders", "Chiefs", 30, 20),
        played(day(7), "Crusaders", "Blues", 25, 20),
        played(day(14), "Crusaders", "Bulls", 27, 20),
        upcoming(day(21), "Crusaders", "Sharks"),
    ];
    for m in &mut records {
        m.home_odds = 1.5;
        m.away_odds = 3.0;
    }
    Ledger::new(records)
}

#[test]
fn csv_output_has_original_and_feature_columns() {
    let ctx = FormContext::default();
    let table = build_features(&short_season(), &ctx);

    let mut buf = Vec::new();
    write_features_csv(&table, &mut buf, &ctx).expect("csv written");
    let text = String::from_utf8(buf).expect("utf8");
    let mut lines = text.lines();

    assert_eq!(
        lines.next(),
        Some("Date,Home_Team,Away_Team,Home_Score,Away_Score,Home_Odds,Draw_Odds,Away_Odds,Bookmakers_Surveyed,\
              home_margin,home_win,home_streak,home_avg_marg,away_streak,away_avg_marg,home_win_prob,\
              home_nationality,away_nationality,Year")
    );
    // Newest first, the unplayed fixture has blank response columns
    assert_eq!(
        lines.next(),
        Some("2019-02-22,Crusaders,Sharks,,,1.5,21.0,3.0,12,,,3,7.333333333333333,0,-7.333333333333333,0.667,NZ,SA,2019")
    );
    assert_eq!(lines.count(), 3);
}

#[test]
fn json_output_keeps_full_precision_when_rounding_is_off() {
    let ctx = FormContext {
        win_prob_decimals: None,
        ..FormContext::default()
    };
    let table = build_features(&short_season(), &ctx);

    let mut buf = Vec::new();
    write_features_json(&table, &mut buf, &ctx).expect("json written");
    let rows: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");

    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 4);
    let p = rows[0]["home_win_prob"].as_f64().expect("number");
    assert!((p - 2.0 / 3.0).abs() < 1e-12);
    assert!(rows[0]["home_win"].is_null());
}

#[test]
fn fit_error_compares_implied_and_actual_wins() {
    let ctx = FormContext::default();
    let table = build_features(&short_season(), &ctx);

    // Three home wins at an implied 2/3 each
    let error = analyze_fit(&table, &ctx, false);
    assert!((error - 1.0 / 3.0).abs() < 1e-12);

    assert_eq!(analyze_fit(&build_features(&Ledger::default(), &ctx), &ctx, false), 0.0);
}

#[test]
fn window_sweep_reports_each_window() {
    let ctx = FormContext {
        max_sweep_window: 4,
        ..FormContext::default()
    };
    let sweep = window_var_checker(&Ledger::new(random_records(23, 200)), &ctx);

    let windows: Vec<usize> = sweep.iter().map(|(w, _)| *w).collect();
    assert_eq!(windows, vec![1, 2, 3, 4]);
    assert!(sweep.iter().all(|(_, r)| (-1.0..=1.0).contains(r)));
}
