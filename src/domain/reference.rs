//! Reference range table.
//!
//! Static per-parameter, per-sex normal bounds. Lookups never fail: an
//! unknown key yields the wide-open range `(0, 999)`.

use serde::{Deserialize, Serialize};

use super::cbc::{Parameter, Sex};

/// Inclusive normal bounds for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
}

impl ReferenceRange {
    /// Range returned for keys missing from the table.
    pub const OPEN: ReferenceRange = ReferenceRange::new(0.0, 999.0);

    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// (key, male, female)
const TABLE: [(&str, ReferenceRange, ReferenceRange); 11] = [
    ("hemoglobin", ReferenceRange::new(13.5, 17.5), ReferenceRange::new(12.0, 15.5)),
    ("hematocrit", ReferenceRange::new(38.3, 48.6), ReferenceRange::new(35.5, 44.9)),
    ("rbc", ReferenceRange::new(4.35, 5.65), ReferenceRange::new(3.92, 5.13)),
    ("mcv", ReferenceRange::new(80.0, 100.0), ReferenceRange::new(80.0, 100.0)),
    ("mch", ReferenceRange::new(27.0, 33.0), ReferenceRange::new(27.0, 33.0)),
    ("mchc", ReferenceRange::new(32.0, 36.0), ReferenceRange::new(32.0, 36.0)),
    ("rdw", ReferenceRange::new(11.5, 14.5), ReferenceRange::new(11.5, 14.5)),
    ("wbc", ReferenceRange::new(4.5, 11.0), ReferenceRange::new(4.5, 11.0)),
    ("platelets", ReferenceRange::new(150.0, 400.0), ReferenceRange::new(150.0, 400.0)),
    ("iron", ReferenceRange::new(65.0, 175.0), ReferenceRange::new(50.0, 170.0)),
    ("ferritin", ReferenceRange::new(20.0, 250.0), ReferenceRange::new(10.0, 120.0)),
];

/// Look up the reference range for `key` and `sex`.
#[must_use]
pub fn lookup(key: &str, sex: Sex) -> ReferenceRange {
    TABLE
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, male, female)| match sex {
            Sex::Male => *male,
            Sex::Female => *female,
        })
        .unwrap_or(ReferenceRange::OPEN)
}

impl Parameter {
    /// Reference range for this parameter.
    #[must_use]
    pub fn reference_range(&self, sex: Sex) -> ReferenceRange {
        lookup(self.key(), sex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_key_has_min_below_max() {
        for sex in [Sex::Male, Sex::Female] {
            for p in Parameter::ALL {
                let r = p.reference_range(sex);
                assert!(r.min < r.max, "{} ({:?})", p.key(), sex);
                assert_ne!(r, ReferenceRange::OPEN);
            }
        }
    }

    #[test]
    fn test_sex_specific_hemoglobin() {
        assert_eq!(lookup("hemoglobin", Sex::Male), ReferenceRange::new(13.5, 17.5));
        assert_eq!(lookup("hemoglobin", Sex::Female), ReferenceRange::new(12.0, 15.5));
    }

    #[test]
    fn test_shared_bounds_across_sexes() {
        for key in ["mcv", "mch", "mchc", "rdw", "wbc", "platelets"] {
            assert_eq!(lookup(key, Sex::Male), lookup(key, Sex::Female));
        }
    }

    #[test]
    fn test_unknown_key_is_open_range() {
        assert_eq!(lookup("reticulocytes", Sex::Male), ReferenceRange::new(0.0, 999.0));
        assert_eq!(lookup("", Sex::Female), ReferenceRange::OPEN);
    }
}
