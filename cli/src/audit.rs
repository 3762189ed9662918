//! The `audit` command: find and (with `--apply`) delete false positives.

use anyhow::{Context, Result};
use ardoise_core::{run_cleanup, AuditReport, CleanupMode, CleanupSummary, Registry};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::store::DbStore;

pub fn run(rules: &Registry, conn: &mut SqliteConnection, apply: bool) -> Result<()> {
    let mode = if apply {
        CleanupMode::Apply
    } else {
        CleanupMode::DryRun
    };

    // One transaction for the whole pass: the deletions committed are
    // exactly the set audited, or nothing at all.
    let summary = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            run_cleanup(rules, &mut DbStore { conn }, mode)
        })
        .context("Audit pass failed")?;

    print_report(&summary);
    Ok(())
}

fn print_report(summary: &CleanupSummary) {
    println!("Checked {} recorded mentions", summary.checked);

    let report = AuditReport::new(&summary.invalid);
    if report.total == 0 {
        println!("No false positives found.");
        return;
    }

    println!("{} false positives:", report.total);
    for group in &report.groups {
        println!("\n  {} ({})", group.ingredient, group.count);
        for dish in &group.examples {
            println!("    - {dish}");
        }
        if group.omitted > 0 {
            println!("    ... and {} more", group.omitted);
        }
    }

    match summary.mode {
        CleanupMode::Apply => println!("\nDeleted {} mentions.", summary.removed),
        CleanupMode::DryRun => println!("\nDry run. Re-run with --apply to delete."),
    }
}
