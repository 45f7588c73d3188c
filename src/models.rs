// ABOUTME: Domain models for body-composition readings
// ABOUTME: Fixed metric set with physical units and typed optional values
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared domain models.
//!
//! A [`MeasurementReading`] is built fresh from every successful fetch and
//! never mutated afterwards; the next fetch supersedes it wholesale. Metrics
//! a given scale does not report are `None`, never zero — a scale without
//! electrodes for heart rate must not read as 0 bpm.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of body-composition metrics a Renpho scale can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMetric {
    /// Body weight
    Weight,
    /// Body fat as a percentage of weight
    BodyFatPercent,
    /// Body mass index
    Bmi,
    /// Muscle mass as a percentage of weight
    MuscleMassPercent,
    /// Body water as a percentage of weight
    BodyWaterPercent,
    /// Bone mass
    BoneMass,
    /// Basal metabolic rate
    BasalMetabolicRate,
    /// Metabolic body age
    BodyAge,
    /// Visceral fat rating (vendor scale, unitless)
    VisceralFat,
    /// Subcutaneous fat as a percentage of weight
    SubcutaneousFatPercent,
    /// Protein as a percentage of weight
    ProteinPercent,
    /// Lean body mass
    LeanBodyMass,
    /// Fat-free weight
    FatFreeWeight,
    /// Heart rate measured through the electrodes
    HeartRate,
}

impl BodyMetric {
    /// Every metric, in presentation order
    pub const ALL: [Self; 14] = [
        Self::Weight,
        Self::BodyFatPercent,
        Self::Bmi,
        Self::MuscleMassPercent,
        Self::BodyWaterPercent,
        Self::BoneMass,
        Self::BasalMetabolicRate,
        Self::BodyAge,
        Self::VisceralFat,
        Self::SubcutaneousFatPercent,
        Self::ProteinPercent,
        Self::LeanBodyMass,
        Self::FatFreeWeight,
        Self::HeartRate,
    ];

    /// Stable key for host-side entity naming
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::BodyFatPercent => "body_fat_percent",
            Self::Bmi => "bmi",
            Self::MuscleMassPercent => "muscle_mass_percent",
            Self::BodyWaterPercent => "body_water_percent",
            Self::BoneMass => "bone_mass",
            Self::BasalMetabolicRate => "basal_metabolic_rate",
            Self::BodyAge => "body_age",
            Self::VisceralFat => "visceral_fat",
            Self::SubcutaneousFatPercent => "subcutaneous_fat_percent",
            Self::ProteinPercent => "protein_percent",
            Self::LeanBodyMass => "lean_body_mass",
            Self::FatFreeWeight => "fat_free_weight",
            Self::HeartRate => "heart_rate",
        }
    }

    /// Physical unit of the metric, `None` for unitless ratings
    #[must_use]
    pub const fn unit(self) -> Option<&'static str> {
        match self {
            Self::Weight | Self::BoneMass | Self::LeanBodyMass | Self::FatFreeWeight => Some("kg"),
            Self::BodyFatPercent
            | Self::MuscleMassPercent
            | Self::BodyWaterPercent
            | Self::SubcutaneousFatPercent
            | Self::ProteinPercent => Some("%"),
            Self::BasalMetabolicRate => Some("kcal"),
            Self::BodyAge => Some("years"),
            Self::HeartRate => Some("bpm"),
            Self::Bmi | Self::VisceralFat => None,
        }
    }
}

/// One body-composition reading, the most recent record for the account.
///
/// Constructed by the fetcher from the decrypted API response; immutable
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementReading {
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Body fat percentage
    pub body_fat_percent: Option<f64>,
    /// Body mass index
    pub bmi: Option<f64>,
    /// Muscle mass percentage
    pub muscle_mass_percent: Option<f64>,
    /// Body water percentage
    pub body_water_percent: Option<f64>,
    /// Bone mass in kilograms
    pub bone_mass_kg: Option<f64>,
    /// Basal metabolic rate in kilocalories
    pub basal_metabolic_rate_kcal: Option<f64>,
    /// Metabolic body age in years
    pub body_age_years: Option<f64>,
    /// Visceral fat rating on the vendor's unitless scale
    pub visceral_fat_rating: Option<f64>,
    /// Subcutaneous fat percentage
    pub subcutaneous_fat_percent: Option<f64>,
    /// Protein percentage
    pub protein_percent: Option<f64>,
    /// Lean body mass in kilograms
    pub lean_body_mass_kg: Option<f64>,
    /// Fat-free weight in kilograms
    pub fat_free_weight_kg: Option<f64>,
    /// Heart rate in beats per minute
    pub heart_rate_bpm: Option<f64>,
    /// When the scale recorded the measurement, if reported
    pub recorded_at: Option<DateTime<Utc>>,
    /// Display name of the scale that produced the record
    pub scale_name: Option<String>,
}

impl MeasurementReading {
    /// Keyed access to a metric value, `None` when the scale did not report it
    #[must_use]
    pub fn value(&self, metric: BodyMetric) -> Option<f64> {
        match metric {
            BodyMetric::Weight => self.weight_kg,
            BodyMetric::BodyFatPercent => self.body_fat_percent,
            BodyMetric::Bmi => self.bmi,
            BodyMetric::MuscleMassPercent => self.muscle_mass_percent,
            BodyMetric::BodyWaterPercent => self.body_water_percent,
            BodyMetric::BoneMass => self.bone_mass_kg,
            BodyMetric::BasalMetabolicRate => self.basal_metabolic_rate_kcal,
            BodyMetric::BodyAge => self.body_age_years,
            BodyMetric::VisceralFat => self.visceral_fat_rating,
            BodyMetric::SubcutaneousFatPercent => self.subcutaneous_fat_percent,
            BodyMetric::ProteinPercent => self.protein_percent,
            BodyMetric::LeanBodyMass => self.lean_body_mass_kg,
            BodyMetric::FatFreeWeight => self.fat_free_weight_kg,
            BodyMetric::HeartRate => self.heart_rate_bpm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_table_covers_all_fourteen() {
        assert_eq!(BodyMetric::ALL.len(), 14);
        // Keys are unique
        let mut keys: Vec<&str> = BodyMetric::ALL.iter().map(|m| m.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 14);
    }

    #[test]
    fn units_match_metric_kind() {
        assert_eq!(BodyMetric::Weight.unit(), Some("kg"));
        assert_eq!(BodyMetric::HeartRate.unit(), Some("bpm"));
        assert_eq!(BodyMetric::Bmi.unit(), None);
        assert_eq!(BodyMetric::VisceralFat.unit(), None);
    }
}
