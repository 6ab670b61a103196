//! report-runner: builds the chargeback HTML report.
//!
//! Usage:
//!   report-runner --config report.json
//!   report-runner --db chargebacks.db --out report.html --publish
//!   report-runner --demo 2000 --seed 7 --out demo.html

mod publish;

use anyhow::{anyhow, Result};
use chargeback_core::{
    config::ReportConfig,
    demo::seed_demo_data,
    html::{format_money, render_report, RenderOptions},
    report::Report,
    store::ChargebackStore,
};
use chrono::{Local, Months};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(db) = flag_value(&args, "--db") {
        config.db_path = db.to_string();
    }
    if let Some(out) = flag_value(&args, "--out") {
        config.output_path = out.to_string();
    }
    if args.iter().any(|a| a == "--publish") {
        config.publish = true;
    }
    config.validate()?;

    let demo_count = parse_arg(&args, "--demo", 0usize);
    let seed = parse_arg(&args, "--seed", 42u64);
    let json_path = flag_value(&args, "--json");

    let now = Local::now().naive_local();
    let since = now
        .checked_sub_months(Months::new(config.lookback_months))
        .ok_or_else(|| anyhow!("lookback of {} months is out of range", config.lookback_months))?;

    println!("Chargeback report");
    println!("  db:        {}", if demo_count > 0 { "(demo, in-memory)" } else { config.db_path.as_str() });
    println!("  api:       {}", config.recharge_api);
    println!("  since:     {}", since.format("%Y-%m-%d"));
    println!("  output:    {}", config.output_path);
    println!();

    let store = if demo_count > 0 {
        let store = ChargebackStore::in_memory()?;
        store.migrate()?;
        seed_demo_data(&store, seed, demo_count, now, config.recharge_api)?;
        store
    } else {
        let store = ChargebackStore::open(&config.db_path)?;
        store.migrate()?;
        store
    };

    log::info!("[1/3] Fetching chargebacks");
    let records = store.fetch_records(since, config.recharge_api)?;

    log::info!("[2/3] Aggregating {} records", records.len());
    let report = Report::build(&records);

    log::info!("[3/3] Rendering HTML");
    let options = RenderOptions {
        title: config.title.clone(),
        currency: config.currency.clone(),
        generated_at: now.format("%d/%m/%Y %H:%M").to_string(),
    };
    let html = render_report(&report, &options)?;
    std::fs::write(&config.output_path, html)?;

    if let Some(path) = json_path {
        std::fs::write(path, report.to_json()?)?;
        log::info!("Report data written to {path}");
    }

    print_summary(&report, &config);

    if config.publish {
        publish::publish(&config.output_path, &now.format("%Y-%m-%d %H:%M").to_string());
    }

    Ok(())
}

fn print_summary(report: &Report, config: &ReportConfig) {
    let t = &report.all.totals;
    let money = |v: f64| format_money(v, &config.currency);

    println!("=== REPORT SUMMARY ===");
    println!("  chargebacks:    {} ({})", t.total_records, money(t.total_amount));
    println!("  disputed:       {} ({})", t.disputed_count, money(t.disputed_amount));
    println!("  won:            {} ({})", t.won_count, money(t.recovered_amount));
    println!("  lost:           {} ({})", t.lost_count, money(t.lost_amount));
    println!("  success rate:   {:.1}%", t.success_rate);
    println!("  months:         {}", report.all.payment_series.months.len());
    if let Some(top) = report.all.rankings.operators.first() {
        println!("  top operator:   {} ({} chargebacks)", top.name, top.count);
    }
    println!();
    println!("Report saved to {}", config.output_path);
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
