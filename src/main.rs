//! Master contact directory builder.
//!
//! Reads the relationship export and the two mail-tracking exports,
//! resolves every email address seen anywhere into one enriched identity,
//! and writes the deduplicated directory plus a per-organization rollup.

mod dates;
mod directory;
mod extract;
mod merge;
mod metrics;
mod normalize;
mod org;
mod role;
mod sector;
mod sources;

use anyhow::Result;
use config::Config;
use merge::ContactLedger;
use metrics::{new_run_id, StageTracker};
use normalize::{ConsultNormalizer, MailTrackNormalizer, PartialFact, RelationshipNormalizer};
use sources::RawRow;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

struct Paths {
    relationship: PathBuf,
    mailsuite: PathBuf,
    consult: PathBuf,
    directory_out: PathBuf,
    summary_out: PathBuf,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn load_paths(settings: &Config) -> Paths {
    let get = |key: &str, default: &str| -> PathBuf {
        settings
            .get_string(key)
            .unwrap_or_else(|_| default.to_string())
            .into()
    };
    Paths {
        relationship: get("relationship_csv", "DATA - Sheet1.csv"),
        mailsuite: get("mailsuite_csv", "mailsuite_tracks.csv"),
        consult: get("consult_csv", "CONSULT_MAILSUITE.csv"),
        directory_out: get("directory_csv", "MASTER-CONTACTS-DATABASE.csv"),
        summary_out: get("summary_csv", "MASTER-INSTITUTES-SUMMARY.csv"),
    }
}

/// A missing export is skipped, not fatal; the remaining sources still
/// produce a directory.
fn read_source(name: &str, path: &Path) -> Result<Vec<RawRow>> {
    match sources::read_rows(path)? {
        Some(rows) => {
            println!("  {}: {} rows", name, rows.len());
            Ok(rows)
        }
        None => {
            warn!(source = name, path = %path.display(), "export not found, skipping");
            println!("  {}: not found, skipped", name);
            Ok(Vec::new())
        }
    }
}

#[cfg(feature = "rayon")]
fn collect_facts<F>(rows: &[RawRow], per_row: F) -> Vec<PartialFact>
where
    F: Fn(&RawRow) -> Vec<PartialFact> + Sync + Send,
{
    rows.par_iter().flat_map_iter(|row| per_row(row)).collect()
}

#[cfg(not(feature = "rayon"))]
fn collect_facts<F>(rows: &[RawRow], per_row: F) -> Vec<PartialFact>
where
    F: Fn(&RawRow) -> Vec<PartialFact>,
{
    rows.iter().flat_map(|row| per_row(row)).collect()
}

fn main() -> Result<()> {
    init_tracing();
    let settings = Config::builder()
        .add_source(config::Environment::with_prefix("CONTACTS"))
        .build()
        .unwrap_or_default();
    let paths = load_paths(&settings);

    println!("Master Contact Directory");
    println!("========================\n");

    let mut tracker = StageTracker::new(new_run_id());
    info!(run_id = tracker.run_id(), "starting directory build");

    let relationship = RelationshipNormalizer::new()?;
    let mailsuite = MailTrackNormalizer::new()?;
    let consult = ConsultNormalizer::new()?;

    println!("Reading exports...");
    let relationship_rows = read_source("relationship export", &paths.relationship)?;
    let mailsuite_rows = read_source("mailsuite tracks", &paths.mailsuite)?;
    let consult_rows = read_source("consult mailsuite", &paths.consult)?;

    println!("\nNormalizing and merging...");
    let mut ledger = ContactLedger::new();

    let facts = collect_facts(&relationship_rows, |row| relationship.facts(row));
    tracker.record("relationship_facts", relationship_rows.len(), facts.len());
    ledger.extend(facts);

    let facts = collect_facts(&mailsuite_rows, |row| mailsuite.facts(row));
    tracker.record("mailsuite_facts", mailsuite_rows.len(), facts.len());
    ledger.extend(facts);

    let facts = collect_facts(&consult_rows, |row| consult.facts(row));
    tracker.record("consult_facts", consult_rows.len(), facts.len());
    ledger.extend(facts);

    println!("  unique contacts: {}", ledger.len());
    if ledger.is_empty() {
        println!("\nNo email addresses found in any export.");
        return Ok(());
    }

    println!("\nResolving identities...");
    let merged = ledger.len();
    let rows = directory::build(ledger);
    let summary = directory::summarize(&rows);
    tracker.record("resolved_contacts", merged, rows.len());
    tracker.record("organization_rollup", rows.len(), summary.len());

    sources::write_directory(&paths.directory_out, &rows)?;
    println!("Wrote {} contacts to {:?}", rows.len(), paths.directory_out);
    sources::write_org_summary(&paths.summary_out, &summary)?;
    println!("Wrote {} organizations to {:?}", summary.len(), paths.summary_out);

    tracker.report();
    println!("\nDone.");
    Ok(())
}
