//! Phrase generation from per-unit intensities at the peak frame.

use std::collections::BTreeMap;

use super::vocabulary::{UNIT_VOCABULARY, intensity_qualifier};

/// Minimum intensity a unit needs before it contributes a phrase.
pub const MIN_RELEVANCE: f64 = 0.1;

/// Phrases plus the raw per-unit values they were derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhraseSet {
    /// `"{qualifier} {label}"` strings in vocabulary order.
    pub phrases: Vec<String>,
    /// Raw intensity per unit present in the input row, phrased or not.
    pub raw_values: BTreeMap<String, f64>,
}

impl PhraseSet {
    /// A set with no phrases and no raw values, used when enrichment
    /// degrades for a sample.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Build annotation phrases from a peak-frame intensity row.
///
/// Every vocabulary unit found in the row is recorded as a raw value;
/// only values above `min_relevance` produce a phrase. Units absent from
/// the row are skipped without error.
pub fn build_phrases(row: &BTreeMap<String, f64>, min_relevance: f64) -> PhraseSet {
    let mut set = PhraseSet::default();
    for &(unit, label) in UNIT_VOCABULARY {
        let Some(&value) = row.get(unit) else {
            continue;
        };
        if value > min_relevance {
            set.phrases
                .push(format!("{} {label}", intensity_qualifier(value)));
        }
        set.raw_values.insert(unit.to_string(), value);
    }
    set
}
