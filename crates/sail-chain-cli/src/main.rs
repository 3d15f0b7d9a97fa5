// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, Utc};
use sail_chain_core::prelude::Day;
use sail_chain_model::prelude::{parse_flexible_date, PortAliasTable, SailingRecord};
use sail_chain_solver::prelude::{
    summarize, BackToBackSearch, BackToBackSet, Diagnostic, SearchOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn find_fixtures_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("fixtures");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

fn fixtures() -> impl Iterator<Item = (PathBuf, String)> {
    let dir = find_fixtures_dir()
        .expect("Could not find a `fixtures/` directory in any ancestor of CARGO_MANIFEST_DIR");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .expect("read_dir(fixtures) failed")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().map(|ft| ft.is_file()).unwrap_or(false)
                && e.path().extension().map(|x| x == "json").unwrap_or(false)
        })
        .map(|e| e.path())
        .collect();

    files.sort();
    files.into_iter().map(|f| {
        let name = f
            .file_name()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| f.to_string_lossy().into_owned());
        (f, name)
    })
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// On-disk shape of one fixture: the record lists plus optional search
/// configuration overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixture {
    candidate_records: Vec<SailingRecord>,
    booked_records: Vec<SailingRecord>,
    booked_dates: Vec<String>,
    excluded_offer_patterns: Vec<String>,
    port_aliases: Option<PortAliasTable>,
    max_gap_days: Option<u32>,
    min_chain_length: Option<usize>,
    min_days_between_batches: Option<u32>,
    nights_cap: Option<u32>,
    require_different_offers: Option<bool>,
    exclude_booked_date_conflicts: Option<bool>,
}

impl Fixture {
    fn options(&self) -> SearchOptions {
        let mut options = SearchOptions::default()
            .with_excluded_offer_patterns(self.excluded_offer_patterns.iter().cloned());
        if let Some(table) = &self.port_aliases {
            options = options.with_alias_table(table.clone());
        }
        if let Some(v) = self.max_gap_days {
            options = options.with_max_gap_days(v);
        }
        if let Some(v) = self.min_chain_length {
            options = options.with_min_chain_length(v);
        }
        if let Some(v) = self.min_days_between_batches {
            options = options.with_min_days_between_batches(v);
        }
        if let Some(v) = self.nights_cap {
            options = options.with_nights_cap(v);
        }
        if let Some(v) = self.require_different_offers {
            options = options.with_require_different_offers(v);
        }
        if let Some(v) = self.exclude_booked_date_conflicts {
            options = options.with_exclude_booked_date_conflicts(v);
        }
        options
    }

    fn booked_days(&self) -> BTreeSet<Day> {
        self.booked_dates
            .iter()
            .filter_map(|raw| match parse_flexible_date(raw) {
                Some(date) => Some(Day::from_date(date)),
                None => {
                    tracing::warn!(%raw, "ignoring unparseable booked date");
                    None
                }
            })
            .collect()
    }
}

#[derive(Serialize)]
struct RunRecord {
    fixture: String,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    truncated: bool,
    summaries: Vec<String>,
    sets: Vec<BackToBackSet>,
    diagnostics: Vec<Diagnostic>,
}

fn main() {
    enable_tracing();

    let mut results: Vec<RunRecord> = Vec::new();

    for (path, name) in fixtures() {
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(fixture = %name, error = %e, "could not read fixture");
                continue;
            }
        };
        let fixture: Fixture = match serde_json::from_str(&raw) {
            Ok(f) => f,
            Err(e) => {
                tracing::error!(fixture = %name, error = %e, "could not parse fixture");
                continue;
            }
        };

        tracing::info!(
            fixture = %name,
            candidates = fixture.candidate_records.len(),
            booked = fixture.booked_records.len(),
            "searching for back-to-back sets"
        );

        let search = BackToBackSearch::new(fixture.options());
        let start_ts = Utc::now();
        let t0 = Instant::now();
        let outcome = search.run(
            &fixture.candidate_records,
            &fixture.booked_records,
            &fixture.booked_days(),
        );
        let runtime_ms = t0.elapsed().as_millis();
        let end_ts = Utc::now();

        println!(
            "{}: {} set(s){}",
            name,
            outcome.sets().len(),
            if outcome.is_truncated() {
                " [truncated]"
            } else {
                ""
            }
        );
        for set in outcome.sets() {
            println!("  {}", summarize(set));
        }
        for diagnostic in outcome.diagnostics() {
            tracing::debug!(%diagnostic, "search diagnostic");
        }

        let summaries = outcome.sets().iter().map(summarize).collect();
        let diagnostics = outcome.diagnostics().to_vec();
        let truncated = outcome.is_truncated();
        results.push(RunRecord {
            fixture: name,
            start_ts,
            end_ts,
            runtime_ms,
            truncated,
            summaries,
            sets: outcome.into_sets(),
            diagnostics,
        });
    }

    let report = serde_json::to_string_pretty(&results).expect("report serialization failed");
    let mut file = File::create("report.json").expect("could not create report.json");
    file.write_all(report.as_bytes())
        .expect("could not write report.json");
    println!("Wrote report.json with {} run(s)", results.len());
}
