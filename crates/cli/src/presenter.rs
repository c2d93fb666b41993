//! Text rendering of pools and aggregated tick liquidity.

use clap::ValueEnum;
use prettytable::{Cell, Row, Table};
use std::io::{self, Write};
use tickscope_data::LiquidityReport;
use tickscope_domain::entities::{AggregatedRecord, Pool};

/// Output format of the `ticks` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Presentation settings.
#[derive(Debug, Clone, Default)]
pub struct PresentOptions {
    /// Maximum number of table rows; JSON output is never truncated.
    pub limit: Option<usize>,
    /// Inclusive tick bounds derived from the requested price window.
    pub tick_window: Option<(i32, i32)>,
}

/// Last `n` characters of a pool id.
pub fn short_id(id: &str, n: usize) -> &str {
    match id.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((start, _)) if n > 0 => &id[start..],
        _ => id,
    }
}

/// Prints matched pools.
pub fn write_pools<W: Write>(out: &mut W, pools: &[Pool]) -> io::Result<()> {
    if pools.is_empty() {
        writeln!(out, "No matching pools found.")?;
        return Ok(());
    }
    let mut table = Table::new();
    table.set_titles(Row::new(
        ["Pool", "Token0", "Token1", "Fee tier"].iter().map(|t| Cell::new(t)).collect(),
    ));
    for pool in pools {
        table.add_row(Row::new(vec![
            Cell::new(&pool.id),
            Cell::new(&pool.token0.symbol),
            Cell::new(&pool.token1.symbol),
            Cell::new(&pool.fee_tier.label()),
        ]));
    }
    table.print(out)?;
    Ok(())
}

/// Records worth displaying: strictly positive gross liquidity, inside the
/// optional tick window.
pub fn visible_records<'a>(
    records: &'a [AggregatedRecord],
    options: &PresentOptions,
) -> Vec<&'a AggregatedRecord> {
    records
        .iter()
        .filter(|r| r.liquidity_gross > 0.0)
        .filter(|r| {
            options
                .tick_window
                .is_none_or(|(lower, upper)| (lower..=upper).contains(&r.tick_idx))
        })
        .collect()
}

/// Prints the per-pool summary followed by the records in the chosen format.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &LiquidityReport,
    format: OutputFormat,
    options: &PresentOptions,
) -> io::Result<()> {
    let visible = visible_records(&report.records, options);

    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &visible)?;
        writeln!(out)?;
        return Ok(());
    }

    for summary in &report.pools {
        let id = &summary.pool.id;
        let points = visible.iter().filter(|r| &r.pool_id == id).count();
        writeln!(out, "Pool: {}, Points: {}", short_id(id, 6), points)?;
        if points == 0 {
            writeln!(out, "Skipping pool {id}: no positive liquidity.")?;
        }
    }

    if visible.is_empty() {
        writeln!(out, "No data to display.")?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_titles(Row::new(
        ["Fee tier", "Pool", "Tick", "Price", "Liquidity gross", "Liquidity net"]
            .iter()
            .map(|t| Cell::new(t))
            .collect(),
    ));
    let shown = options.limit.unwrap_or(visible.len()).min(visible.len());
    for record in &visible[..shown] {
        table.add_row(Row::new(vec![
            Cell::new(&record.fee_label),
            Cell::new(short_id(&record.pool_id, 12)),
            Cell::new(&record.tick_idx.to_string()),
            Cell::new(&format!("{:.8}", record.price)),
            Cell::new(&format!("{:.0}", record.liquidity_gross)),
            Cell::new(&format!("{:.0}", record.liquidity_net)),
        ]));
    }
    table.print(out)?;
    if shown < visible.len() {
        writeln!(out, "... {} more rows", visible.len() - shown)?;
    }
    Ok(())
}
