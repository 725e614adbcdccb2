use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};

use superrugby_form::diagnostics::{analyze_fit, window_var_checker};
use superrugby_form::report::{output_report, write_features_csv, write_features_json};
use superrugby_form::*;

const USAGE: &str = "usage: superrugby_form <input.csv> [output] [--json] [--fit] [--report N]";

/*
    Reads an OddsPortal export, derives pre-match form for every fixture and writes the
    feature table (CSV by default). Without an output path the table goes to stdout.
    The margin window and friends come from FormContext, see .env / FORM_* variables.
*/

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let mut paths = Vec::new();
    let mut json = false;
    let mut fit = false;
    let mut report_rows = 0usize;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--fit" => fit = true,
            "--report" => {
                report_rows = args
                    .next()
                    .and_then(|n| n.parse().ok())
                    .context(USAGE)?;
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ => paths.push(arg),
        }
    }

    let input = paths.first().context(USAGE)?;
    let ctx = FormContext::from_env();

    let ledger = load_ledger(input)?;
    log::info!(
        "{} teams, {} played matches, mean home margin {:.2}",
        ledger.teams().len(),
        ledger.played_count(),
        ledger.mean_margin(),
    );
    let table = build_features(&ledger, &ctx);

    let as_of = ctx.as_of_date();
    log::info!(
        "{} feature rows: {} for training, {} upcoming from {as_of}",
        table.len(),
        table.training_rows().count(),
        table.upcoming_rows(as_of).count(),
    );

    match paths.get(1) {
        Some(out) => {
            let file = File::create(out).with_context(|| format!("create {out}"))?;
            write_table(&table, BufWriter::new(file), &ctx, json)?;
            log::info!("wrote {out}");
        }
        None if report_rows == 0 && !fit => write_table(&table, io::stdout().lock(), &ctx, json)?,
        None => {}
    }

    if report_rows > 0 {
        output_report(&table, report_rows);
    }

    if fit {
        analyze_fit(&table, &ctx, true);
        window_var_checker(&ledger, &ctx);
    }

    Ok(())
}

fn write_table<W: Write>(table: &FeatureTable, writer: W, ctx: &FormContext, json: bool) -> Result<()> {
    if json {
        write_features_json(table, writer, ctx)
    } else {
        write_features_csv(table, writer, ctx)
    }
}
