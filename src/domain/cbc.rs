//! Complete blood count input types.
//!
//! A CBC panel is the 11 lab values the engine evaluates, plus the
//! patient's sex (selects the reference ranges) and age (informational).

use serde::{Deserialize, Serialize};

/// Biological sex used to select reference ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Key used by the reference range table.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// One of the 11 measured CBC parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Hemoglobin,
    Hematocrit,
    Rbc,
    Mcv,
    Mch,
    Mchc,
    Rdw,
    Wbc,
    Platelets,
    Iron,
    Ferritin,
}

impl Parameter {
    /// All parameters in display order.
    pub const ALL: [Parameter; 11] = [
        Self::Hemoglobin,
        Self::Hematocrit,
        Self::Rbc,
        Self::Mcv,
        Self::Mch,
        Self::Mchc,
        Self::Rdw,
        Self::Wbc,
        Self::Platelets,
        Self::Iron,
        Self::Ferritin,
    ];

    /// Key into the reference range table.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hemoglobin => "hemoglobin",
            Self::Hematocrit => "hematocrit",
            Self::Rbc => "rbc",
            Self::Mcv => "mcv",
            Self::Mch => "mch",
            Self::Mchc => "mchc",
            Self::Rdw => "rdw",
            Self::Wbc => "wbc",
            Self::Platelets => "platelets",
            Self::Iron => "iron",
            Self::Ferritin => "ferritin",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hemoglobin => "Hemoglobin",
            Self::Hematocrit => "Hematocrit",
            Self::Rbc => "RBC Count",
            Self::Mcv => "MCV",
            Self::Mch => "MCH",
            Self::Mchc => "MCHC",
            Self::Rdw => "RDW",
            Self::Wbc => "WBC",
            Self::Platelets => "Platelets",
            Self::Iron => "Serum Iron",
            Self::Ferritin => "Ferritin",
        }
    }

    /// Measurement unit.
    #[must_use]
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Hemoglobin => "g/dL",
            Self::Hematocrit => "%",
            Self::Rbc => "M/µL",
            Self::Mcv => "fL",
            Self::Mch => "pg",
            Self::Mchc => "g/dL",
            Self::Rdw => "%",
            Self::Wbc => "K/µL",
            Self::Platelets => "K/µL",
            Self::Iron => "µg/dL",
            Self::Ferritin => "ng/mL",
        }
    }
}

/// A submitted CBC panel.
///
/// Values are taken as entered; the engine performs no range validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CbcInput {
    /// Hemoglobin in g/dL
    pub hemoglobin: f64,

    /// Hematocrit in %
    pub hematocrit: f64,

    /// Red cell count in M/µL
    pub rbc: f64,

    /// Mean corpuscular volume in fL
    pub mcv: f64,

    /// Mean corpuscular hemoglobin in pg
    pub mch: f64,

    /// Mean corpuscular hemoglobin concentration in g/dL
    pub mchc: f64,

    /// Red cell distribution width in %
    pub rdw: f64,

    /// White cell count in K/µL
    pub wbc: f64,

    /// Platelet count in K/µL
    pub platelets: f64,

    /// Serum iron in µg/dL
    pub iron: f64,

    /// Ferritin in ng/mL
    pub ferritin: f64,

    #[serde(alias = "gender")]
    pub sex: Sex,

    /// Age in years. Not used by the classification rules.
    pub age: u32,
}

impl CbcInput {
    /// Value of a single parameter.
    #[must_use]
    pub fn value(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Hemoglobin => self.hemoglobin,
            Parameter::Hematocrit => self.hematocrit,
            Parameter::Rbc => self.rbc,
            Parameter::Mcv => self.mcv,
            Parameter::Mch => self.mch,
            Parameter::Mchc => self.mchc,
            Parameter::Rdw => self.rdw,
            Parameter::Wbc => self.wbc,
            Parameter::Platelets => self.platelets,
            Parameter::Iron => self.iron,
            Parameter::Ferritin => self.ferritin,
        }
    }

    /// Build a panel from values in `Parameter::ALL` order.
    ///
    /// # Errors
    /// Returns error if `values` does not hold exactly 11 entries.
    pub fn from_values(values: &[f64], sex: Sex, age: u32) -> Result<Self, String> {
        if values.len() != Parameter::ALL.len() {
            return Err(format!(
                "Expected {} CBC values, got {}",
                Parameter::ALL.len(),
                values.len()
            ));
        }

        Ok(Self {
            hemoglobin: values[0],
            hematocrit: values[1],
            rbc: values[2],
            mcv: values[3],
            mch: values[4],
            mchc: values[5],
            rdw: values[6],
            wbc: values[7],
            platelets: values[8],
            iron: values[9],
            ferritin: values[10],
            sex,
            age,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_follows_display_order() {
        let values: Vec<f64> = (1..=11).map(f64::from).collect();
        let input = CbcInput::from_values(&values, Sex::Female, 40).expect("Should build");

        for (i, p) in Parameter::ALL.iter().enumerate() {
            assert!((input.value(*p) - values[i]).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_from_values_rejects_wrong_length() {
        assert!(CbcInput::from_values(&[1.0, 2.0], Sex::Male, 30).is_err());
    }

    #[test]
    fn test_gender_alias_deserializes() {
        let json = r#"{"hemoglobin":13.5,"hematocrit":40,"rbc":4.5,"mcv":88,"mch":30,
            "mchc":33.5,"rdw":12.8,"wbc":6.5,"platelets":250,"iron":90,"ferritin":55,
            "gender":"female","age":32}"#;
        let input: CbcInput = serde_json::from_str(json).expect("Should parse");
        assert_eq!(input.sex, Sex::Female);
        assert_eq!(input.age, 32);
    }
}
