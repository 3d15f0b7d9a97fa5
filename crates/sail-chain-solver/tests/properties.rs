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

use chrono::NaiveDate;
use sail_chain_core::prelude::{Day, DaySpan};
use sail_chain_model::prelude::{normalize, same_port, PortAliasTable, SailingRecord};
use sail_chain_solver::prelude::{BackToBackSearch, SearchBudget, SearchOptions};
use std::collections::BTreeSet;

fn record(vessel: &str, sail: &str, nights: u32, port: &str, code: &str) -> SailingRecord {
    SailingRecord {
        vessel: Some(vessel.to_string()),
        sail_date: Some(sail.to_string()),
        nights: Some(nights),
        depart_port: Some(port.to_string()),
        offer_code: Some(code.to_string()),
        offer_name: Some(format!("{code} offer")),
        cabin_type: Some("Interior".to_string()),
        guest_count: Some(2),
        ..SailingRecord::default()
    }
}

fn day(y: i32, m: u32, d: u32) -> Day {
    Day::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// A fleet with chainable runs, overlapping sailings, a foreign port,
/// unusable rows, and an excluded promotional family.
fn messy_fleet() -> Vec<SailingRecord> {
    let mut records = vec![
        // Oasis: a 3-link run out of Miami
        record("Oasis", "2025-01-01", 7, "Miami", "OAS1"),
        record("Oasis", "2025-01-08", 7, "Miami", "OAS2"),
        record("Oasis", "2025-01-17", 7, "Miami", "OAS3"),
        // Same sailing, second cabin class: merges into one slot
        record("Oasis", "2025-01-08", 7, "Miami", "OAS2B"),
        // Allure: chainable pair far later in the year
        record("Allure", "2025-06-01", 5, "Port Canaveral", "ALL1"),
        record("Allure", "2025-06-07", 5, "Cape Canaveral", "ALL2"),
        // Vision: second leg departs from an unrelated port
        record("Vision", "2025-03-01", 7, "Miami", "VIS1"),
        record("Vision", "2025-03-09", 7, "Barcelona", "VIS2"),
        // Promotional family that must never chain
        record("Oasis", "2025-01-08", 7, "Miami", "FREEPLAY99"),
    ];
    // Rows aggregation must drop
    records.push(SailingRecord {
        sail_date: Some("2025-01-01".to_string()),
        ..SailingRecord::default()
    });
    records.push(record("Ghost", "not a date", 7, "Miami", "GH1"));
    records
}

fn options() -> SearchOptions {
    SearchOptions::default()
        .with_nights_cap(30)
        .with_excluded_offer_patterns(["FREEPLAY".to_string()])
}

#[test]
fn no_set_repeats_a_slot_key() {
    let outcome = BackToBackSearch::new(options()).run(&messy_fleet(), &[], &BTreeSet::new());
    assert!(!outcome.sets().is_empty());
    for set in outcome.sets() {
        let keys: BTreeSet<_> = set.legs().iter().map(|l| l.key().clone()).collect();
        assert_eq!(keys.len(), set.legs().len());
    }
}

#[test]
fn every_adjacent_pair_respects_gap_and_port_rules() {
    let opts = options();
    let max_gap = DaySpan::new(opts.max_gap_days as i32);
    let aliases = PortAliasTable::default();
    let outcome = BackToBackSearch::new(opts).run(&messy_fleet(), &[], &BTreeSet::new());
    for set in outcome.sets() {
        for pair in set.legs().windows(2) {
            let gap = pair[1].sail_day() - pair[0].return_day();
            assert!(!gap.is_negative());
            assert!(gap <= max_gap);
            assert!(same_port(
                pair[0].depart_port(),
                pair[1].depart_port(),
                &aliases
            ));
            assert_eq!(pair[0].key().vessel(), pair[1].key().vessel());
        }
        for leg in set.legs() {
            assert!(leg.return_day() >= leg.sail_day());
        }
    }
}

#[test]
fn total_nights_never_exceed_the_cap() {
    let records = messy_fleet();
    for cap in [7u32, 14, 21, 30] {
        let opts = options().with_nights_cap(cap);
        let outcome = BackToBackSearch::new(opts).run(&records, &[], &BTreeSet::new());
        for set in outcome.sets() {
            assert!(set.total_nights() <= DaySpan::new(cap as i32));
        }
    }
}

#[test]
fn accepted_sets_never_overlap_and_keep_their_spacing() {
    let outcome = BackToBackSearch::new(options()).run(&messy_fleet(), &[], &BTreeSet::new());
    let sets = outcome.sets();
    for (i, a) in sets.iter().enumerate() {
        for b in sets.iter().skip(i + 1) {
            assert!(!a.span().overlaps(&b.span()));
            let (earlier, later) = if a.start_day() < b.start_day() {
                (a, b)
            } else {
                (b, a)
            };
            assert!(earlier.span().gap_to(&later.span()) >= DaySpan::new(3));
        }
    }
}

#[test]
fn identical_inputs_yield_identical_output() {
    let records = messy_fleet();
    let a = BackToBackSearch::new(options()).run(&records, &[], &BTreeSet::new());
    let b = BackToBackSearch::new(options()).run(&records, &[], &BTreeSet::new());
    assert_eq!(a.sets(), b.sets());
    assert_eq!(a.diagnostics(), b.diagnostics());
}

#[test]
fn excluded_promotional_offers_never_surface() {
    let outcome = BackToBackSearch::new(options()).run(&messy_fleet(), &[], &BTreeSet::new());
    for set in outcome.sets() {
        for code in set.offer_codes() {
            assert!(!code.to_ascii_lowercase().contains("freeplay"));
        }
        for leg in set.legs() {
            assert!(leg
                .offers()
                .iter()
                .all(|o| !o.code().to_ascii_lowercase().contains("freeplay")));
        }
    }
    // The drops are visible to the caller
    assert!(outcome
        .diagnostics()
        .iter()
        .any(|d| d.to_string().contains("promotional exclusion")));
}

#[test]
fn fewer_than_two_usable_slots_is_empty_not_an_error() {
    let records = vec![record("Oasis", "2025-01-01", 7, "Miami", "AAA")];
    let outcome = BackToBackSearch::new(options()).run(&records, &[], &BTreeSet::new());
    assert!(outcome.sets().is_empty());
    assert!(!outcome.is_truncated());
}

#[test]
fn unusable_records_surface_as_diagnostics() {
    let outcome = BackToBackSearch::new(options()).run(&messy_fleet(), &[], &BTreeSet::new());
    let rendered: Vec<String> = outcome.diagnostics().iter().map(|d| d.to_string()).collect();
    assert!(rendered.iter().any(|d| d.contains("no vessel name")));
    assert!(rendered.iter().any(|d| d.contains("could not be parsed")));
}

#[test]
fn exhausted_budget_flags_truncation_and_keeps_partial_results() {
    let opts = options().with_budget(SearchBudget::new(2));
    let outcome = BackToBackSearch::new(opts).run(&messy_fleet(), &[], &BTreeSet::new());
    assert!(outcome.is_truncated());
    assert!(outcome
        .diagnostics()
        .iter()
        .any(|d| d.to_string().contains("budget exhausted")));
}

#[test]
fn booked_date_conflicts_drop_chains_only_when_enabled() {
    let records = vec![
        record("Oasis", "2025-01-01", 7, "Miami", "AAA"),
        record("Oasis", "2025-01-09", 7, "Miami", "BBB"),
    ];
    let booked: BTreeSet<Day> = [day(2025, 1, 3)].into();

    let default_outcome =
        BackToBackSearch::new(SearchOptions::default()).run(&records, &[], &booked);
    assert_eq!(default_outcome.sets().len(), 1);

    let strict = SearchOptions::default().with_exclude_booked_date_conflicts(true);
    let strict_outcome = BackToBackSearch::new(strict).run(&records, &[], &booked);
    assert!(strict_outcome.sets().is_empty());
    assert!(strict_outcome
        .diagnostics()
        .iter()
        .any(|d| d.to_string().contains("already-booked date")));
}

#[test]
fn committed_records_merge_into_chains() {
    // The user already booked the first leg; the candidate second leg
    // still chains onto it.
    let booked_records = vec![record("Oasis", "2025-01-01", 7, "Miami", "MINE")];
    let candidates = vec![record("Oasis", "2025-01-09", 7, "Miami", "NEXT")];
    let outcome =
        BackToBackSearch::new(SearchOptions::default()).run(&candidates, &booked_records, &BTreeSet::new());
    assert_eq!(outcome.sets().len(), 1);
    assert_eq!(outcome.sets()[0].legs().len(), 2);
}

#[test]
fn require_different_offers_blocks_code_reuse_across_legs() {
    let records = vec![
        record("Oasis", "2025-01-01", 7, "Miami", "SAME"),
        record("Oasis", "2025-01-09", 7, "Miami", "SAME"),
    ];
    let relaxed = BackToBackSearch::new(SearchOptions::default()).run(&records, &[], &BTreeSet::new());
    assert_eq!(relaxed.sets().len(), 1);

    let strict = SearchOptions::default().with_require_different_offers(true);
    let outcome = BackToBackSearch::new(strict).run(&records, &[], &BTreeSet::new());
    assert!(outcome.sets().is_empty());
}

#[test]
fn port_normalization_is_stable_for_display_variants() {
    assert_eq!(normalize("Miami, FL"), normalize("miami  fl"));
    assert_eq!(normalize("Ft. Lauderdale"), normalize("Fort Lauderdale"));
}
