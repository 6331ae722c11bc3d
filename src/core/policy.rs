//! Per-metric display corrections.
//!
//! A metric column can carry a divisor applied to every raw sample before
//! aggregation and a fixed vertical range for its chart. Columns without an
//! entry are drawn as-is with an automatic range.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column of the Jain fairness index in the standard metric layout.
pub const FAIRNESS_INDEX: usize = 2;
/// Raw fairness values are summed over this many users.
pub const FAIRNESS_DIVISOR: f64 = 6.0;
pub const FAIRNESS_Y_RANGE: (f64, f64) = (0.6, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPolicy {
    pub divisor: f64,
    pub y_range: Option<(f64, f64)>,
}

impl MetricPolicy {
    pub const IDENTITY: Self = Self {
        divisor: 1.0,
        y_range: None,
    };

    pub fn transform(&self, v: f64) -> f64 {
        v / self.divisor
    }

    pub fn is_identity(&self) -> bool {
        self.divisor == 1.0 && self.y_range.is_none()
    }
}

impl Default for MetricPolicy {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// TOML form of one policy entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyEntry {
    pub index: usize,
    #[serde(default = "PolicyEntry::default_divisor")]
    pub divisor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
}

impl PolicyEntry {
    fn default_divisor() -> f64 {
        1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    entries: BTreeMap<usize, MetricPolicy>,
}

impl PolicyTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, index: usize, policy: MetricPolicy) -> Self {
        self.entries.insert(index, policy);
        self
    }

    pub fn get(&self, index: usize) -> MetricPolicy {
        self.entries.get(&index).copied().unwrap_or_default()
    }

    /// Builds a table from config entries. A range needs both ends and
    /// `y_min < y_max`; the divisor must be finite and non-zero.
    pub fn from_entries(entries: &[PolicyEntry]) -> Result<Self, String> {
        let mut table = Self::empty();
        for entry in entries {
            if !entry.divisor.is_finite() || entry.divisor == 0.0 {
                return Err(format!(
                    "policy for metric {} has invalid divisor {}",
                    entry.index, entry.divisor
                ));
            }
            let y_range = match (entry.y_min, entry.y_max) {
                (Some(lo), Some(hi)) if lo < hi => Some((lo, hi)),
                (None, None) => None,
                (lo, hi) => {
                    return Err(format!(
                        "policy for metric {} has invalid y range {lo:?}..{hi:?}",
                        entry.index
                    ));
                }
            };
            table.entries.insert(
                entry.index,
                MetricPolicy {
                    divisor: entry.divisor,
                    y_range,
                },
            );
        }
        Ok(table)
    }

    pub fn to_entries(&self) -> Vec<PolicyEntry> {
        self.entries
            .iter()
            .map(|(&index, p)| PolicyEntry {
                index,
                divisor: p.divisor,
                y_min: p.y_range.map(|r| r.0),
                y_max: p.y_range.map(|r| r.1),
            })
            .collect()
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::empty().with(
            FAIRNESS_INDEX,
            MetricPolicy {
                divisor: FAIRNESS_DIVISOR,
                y_range: Some(FAIRNESS_Y_RANGE),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_only_touches_fairness() {
        let table = PolicyTable::default();
        assert_eq!(table.to_entries().len(), 1);
        let jfi = table.get(2);
        assert_eq!(jfi.divisor, 6.0);
        assert_eq!(jfi.y_range, Some((0.6, 1.0)));
        assert_eq!(jfi.transform(3.0), 0.5);
        for idx in [0, 1, 3, 7] {
            assert!(table.get(idx).is_identity(), "index {idx}");
        }
    }

    #[test]
    fn entries_round_trip_through_table() {
        let table = PolicyTable::default();
        let rebuilt = PolicyTable::from_entries(&table.to_entries()).unwrap();
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn rejects_bad_entries() {
        let zero = PolicyEntry {
            index: 0,
            divisor: 0.0,
            y_min: None,
            y_max: None,
        };
        assert!(PolicyTable::from_entries(&[zero]).is_err());

        let half_range = PolicyEntry {
            index: 1,
            divisor: 1.0,
            y_min: Some(0.0),
            y_max: None,
        };
        assert!(PolicyTable::from_entries(&[half_range]).is_err());

        let inverted = PolicyEntry {
            index: 1,
            divisor: 1.0,
            y_min: Some(1.0),
            y_max: Some(0.5),
        };
        assert!(PolicyTable::from_entries(&[inverted]).is_err());
    }
}
