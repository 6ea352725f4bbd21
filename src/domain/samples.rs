//! Built-in sample panels for demonstration.

use super::cbc::{CbcInput, Sex};

/// A named example panel.
#[derive(Debug, Clone, Copy)]
pub struct SamplePatient {
    pub id: &'static str,
    pub name: &'static str,
    pub condition: &'static str,
    pub description: &'static str,
    pub data: CbcInput,
}

#[allow(clippy::too_many_arguments)]
const fn panel(
    hemoglobin: f64,
    hematocrit: f64,
    rbc: f64,
    mcv: f64,
    mch: f64,
    mchc: f64,
    rdw: f64,
    wbc: f64,
    platelets: f64,
    iron: f64,
    ferritin: f64,
    sex: Sex,
    age: u32,
) -> CbcInput {
    CbcInput {
        hemoglobin,
        hematocrit,
        rbc,
        mcv,
        mch,
        mchc,
        rdw,
        wbc,
        platelets,
        iron,
        ferritin,
        sex,
        age,
    }
}

pub static SAMPLE_PATIENTS: [SamplePatient; 6] = [
    SamplePatient {
        id: "normal",
        name: "Healthy Adult Female",
        condition: "No Anemia",
        description: "All CBC parameters within normal reference ranges",
        data: panel(13.5, 40.0, 4.5, 88.0, 30.0, 33.5, 12.8, 6.5, 250.0, 90.0, 55.0, Sex::Female, 32),
    },
    SamplePatient {
        id: "iron-def",
        name: "Iron Deficiency Case",
        condition: "Iron Deficiency Anemia",
        description: "Classic microcytic hypochromic pattern with low ferritin",
        data: panel(9.2, 28.0, 4.1, 68.0, 22.0, 30.0, 18.5, 7.2, 380.0, 25.0, 8.0, Sex::Female, 28),
    },
    SamplePatient {
        id: "b12-def",
        name: "B12 Deficiency Case",
        condition: "Megaloblastic Anemia",
        description: "Macrocytic anemia with elevated MCV",
        data: panel(8.5, 26.0, 2.8, 110.0, 35.0, 34.0, 16.2, 4.1, 130.0, 100.0, 180.0, Sex::Male, 62),
    },
    SamplePatient {
        id: "thalassemia",
        name: "Thalassemia Trait",
        condition: "Thalassemia Minor",
        description: "Microcytic with normal ferritin, classic thalassemia pattern",
        data: panel(10.8, 33.0, 5.8, 65.0, 21.0, 31.0, 13.2, 6.8, 270.0, 80.0, 65.0, Sex::Male, 25),
    },
    SamplePatient {
        id: "chronic",
        name: "Chronic Disease Case",
        condition: "Anemia of Chronic Disease",
        description: "Normocytic anemia with normal RDW",
        data: panel(10.0, 31.0, 3.5, 88.0, 29.0, 32.0, 13.8, 9.5, 310.0, 35.0, 220.0, Sex::Female, 55),
    },
    SamplePatient {
        id: "severe",
        name: "Severe Anemia Case",
        condition: "Severe Iron Deficiency",
        description: "Critically low hemoglobin requiring urgent intervention",
        data: panel(5.8, 18.0, 2.9, 62.0, 19.0, 28.0, 22.5, 8.1, 450.0, 12.0, 3.0, Sex::Female, 19),
    },
];

/// Find a sample by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static SamplePatient> {
    SAMPLE_PATIENTS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in SAMPLE_PATIENTS.iter().enumerate() {
            for b in &SAMPLE_PATIENTS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("b12-def").map(|s| s.data.age), Some(62));
        assert!(find("missing").is_none());
    }
}
