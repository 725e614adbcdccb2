use std::io::Write;

use anyhow::{Context, Result};

use crate::features::{FeatureRow, FeatureTable};
use crate::form_context::FormContext;
use crate::util::round_to;

pub fn output_report(table: &FeatureTable, limit: usize) {
    println!("| {0:10} | {1:12} | {2:12} | {3:7} | {4:>4} | {5:>6} | {6:>4} | {7:>6} | {8:>5}",
        "Date", "Home", "Away", "Score", "HStr", "HMarg", "AStr", "AMarg", "P(H)",
    );

    for r in table.iter().take(limit) {
        let score = match (r.home_score, r.away_score) {
            (Some(h), Some(a)) => format!("{h}-{a}"),
            _ => "-".to_string(),
        };

        println!("| {0:10} | {1:12} | {2:12} | {3:7} | {4:4} | {5:6.1} | {6:4} | {7:6.1} | {8:5.3}",
            r.date.to_string(),
            r.home_team,
            r.away_team,
            score,
            r.home_streak,
            r.home_avg_marg,
            r.away_streak,
            r.away_avg_marg,
            r.home_win_prob,
        )
    }
}

pub fn write_features_csv<W: Write>(table: &FeatureTable, writer: W, ctx: &FormContext) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in table {
        wtr.serialize(output_row(r, ctx)).context("write feature row")?;
    }
    wtr.flush().context("flush feature csv")?;
    Ok(())
}

pub fn write_features_json<W: Write>(table: &FeatureTable, writer: W, ctx: &FormContext) -> Result<()> {
    let rows: Vec<FeatureRow> = table.iter().map(|r| output_row(r, ctx)).collect();
    serde_json::to_writer_pretty(writer, &rows).context("write feature json")?;
    Ok(())
}

fn output_row(r: &FeatureRow, ctx: &FormContext) -> FeatureRow {
    let mut out = r.clone();
    if let Some(decimals) = ctx.win_prob_decimals {
        out.home_win_prob = round_to(out.home_win_prob, decimals);
    }
    out
}
