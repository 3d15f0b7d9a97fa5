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

use serde::{Deserialize, Serialize};

/// Region abbreviations expanded token-wise before comparison, so
/// "Ft. Lauderdale" and "Fort Lauderdale" normalize identically.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("ft", "fort"),
    ("pt", "port"),
    ("st", "saint"),
    ("mt", "mount"),
];

/// Canonical comparison form of a departure-port string: lowercased,
/// punctuation stripped, whitespace collapsed, abbreviations expanded.
pub fn normalize(port: &str) -> String {
    port.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == tok)
                .map(|(_, full)| *full)
                .unwrap_or(tok)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Groups of port spellings that refer to the same physical departure
/// area. Data-driven so new equivalences ship as configuration, not code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortAliasTable {
    groups: Vec<Vec<String>>,
}

impl PortAliasTable {
    #[inline]
    pub fn new(groups: Vec<Vec<String>>) -> Self {
        Self { groups }
    }

    #[inline]
    pub fn empty() -> Self {
        Self { groups: Vec::new() }
    }

    #[inline]
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    fn group_index(&self, normalized: &str) -> Option<usize> {
        self.groups
            .iter()
            .position(|group| group.iter().any(|entry| normalize(entry) == normalized))
    }

    /// True when both normalized names appear in the same alias group.
    pub fn same_group(&self, a: &str, b: &str) -> bool {
        match (self.group_index(a), self.group_index(b)) {
            (Some(ga), Some(gb)) => ga == gb,
            _ => false,
        }
    }
}

impl Default for PortAliasTable {
    fn default() -> Self {
        let groups = [
            vec!["Miami", "Miami FL", "Port of Miami"],
            vec!["Port Canaveral", "Cape Canaveral", "Orlando (Port Canaveral)"],
            vec!["Fort Lauderdale", "Port Everglades"],
            vec!["Los Angeles", "San Pedro"],
            vec!["Rome", "Civitavecchia"],
            vec!["Athens", "Piraeus"],
        ]
        .into_iter()
        .map(|group| group.into_iter().map(str::to_string).collect())
        .collect();
        Self { groups }
    }
}

/// Port equality under normalization and the alias table. An empty side
/// matches anything: missing port data must not break otherwise valid
/// adjacencies.
pub fn same_port(a: &str, b: &str, aliases: &PortAliasTable) -> bool {
    let na = normalize(a);
    let nb = normalize(b);
    if na.is_empty() || nb.is_empty() {
        return true;
    }
    na == nb || aliases.same_group(&na, &nb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_case_punctuation_and_whitespace() {
        assert_eq!(normalize("  Miami,  FL "), "miami fl");
        assert_eq!(normalize("Port-Canaveral"), "port canaveral");
        assert_eq!(normalize("BARCELONA"), "barcelona");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" ,.- "), "");
    }

    #[test]
    fn test_normalize_expands_abbreviations() {
        assert_eq!(normalize("Ft. Lauderdale"), "fort lauderdale");
        assert_eq!(normalize("Fort Lauderdale"), "fort lauderdale");
        assert_eq!(normalize("St Thomas"), "saint thomas");
        assert_eq!(normalize("Pt Canaveral"), "port canaveral");
    }

    #[test]
    fn test_same_port_exact_and_wildcard() {
        let t = PortAliasTable::empty();
        assert!(same_port("Miami", "miami", &t));
        assert!(same_port("", "Barcelona", &t));
        assert!(same_port("Barcelona", "", &t));
        assert!(!same_port("Miami", "Barcelona", &t));
    }

    #[test]
    fn test_same_port_through_alias_group() {
        let t = PortAliasTable::default();
        assert!(same_port("Fort Lauderdale", "Port Everglades", &t));
        assert!(same_port("Ft. Lauderdale", "Port Everglades", &t));
        assert!(same_port("Cape Canaveral", "Port Canaveral", &t));
        assert!(!same_port("Miami", "Port Everglades", &t));
    }

    #[test]
    fn test_alias_table_deserializes_from_json() {
        let json = r#"[["Southampton", "London (Southampton)"], ["Miami", "PortMiami"]]"#;
        let t: PortAliasTable = serde_json::from_str(json).unwrap();
        assert_eq!(t.groups().len(), 2);
        assert!(same_port("Southampton", "London (Southampton)", &t));
        assert!(!same_port("Southampton", "PortMiami", &t));
    }
}
