// ABOUTME: Measurement fetcher for the daily health report endpoint
// ABOUTME: Maps the decrypted weigh-in record into the fixed metric set
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Latest-measurement retrieval.
//!
//! One POST per fetch; the API only ever surfaces the most recent record, so
//! there is no pagination. The decrypted document carries the weigh-in under
//! `fourElectrodeWeight` or `eightElectrodeWeight` depending on the scale
//! model. Fields the scale does not support are simply absent from the JSON
//! and come through as `None`.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::api::Api;
use crate::auth::SessionToken;
use crate::constants::endpoints;
use crate::errors::{Error, Result};
use crate::models::MeasurementReading;

/// Decrypted daily-report document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DailyReportDocument {
    #[serde(default)]
    four_electrode_weight: Option<WeightRecord>,
    #[serde(default)]
    eight_electrode_weight: Option<WeightRecord>,
}

/// One weigh-in record as the server reports it.
///
/// Every field is optional: which ones appear depends on the scale model and
/// firmware, and the server drops fields rather than sending nulls or zeros.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeightRecord {
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    bodyfat: Option<f64>,
    #[serde(default)]
    bmi: Option<f64>,
    #[serde(default)]
    muscle: Option<f64>,
    #[serde(default)]
    water: Option<f64>,
    #[serde(default)]
    bone: Option<f64>,
    #[serde(default)]
    bmr: Option<f64>,
    #[serde(default)]
    bodyage: Option<f64>,
    #[serde(default)]
    visfat: Option<f64>,
    #[serde(default)]
    subfat: Option<f64>,
    #[serde(default)]
    protein: Option<f64>,
    #[serde(default)]
    sinew: Option<f64>,
    #[serde(default)]
    fat_free_weight: Option<f64>,
    #[serde(default)]
    heart_rate: Option<f64>,
    #[serde(default)]
    local_created_at: Option<String>,
    #[serde(default)]
    scale_name: Option<String>,
}

/// Fetches and maps the latest body-composition record
#[derive(Clone)]
pub struct MeasurementFetcher {
    api: Api,
}

impl MeasurementFetcher {
    /// Create a fetcher over the shared API helper
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }

    /// Fetch the most recent measurement for the authenticated account.
    ///
    /// # Errors
    ///
    /// - [`Error::DataUnavailable`] when the account has no record yet
    /// - [`Error::Authentication`] when the server rejects the session token;
    ///   the client facade answers that with one re-login and retry
    /// - [`Error::Network`] / [`Error::Protocol`] for transport and response
    ///   shape problems
    pub async fn fetch_latest(&self, session: &SessionToken) -> Result<MeasurementReading> {
        // The server keys the report on the account's local calendar day.
        let today = Local::now().format("%Y-%m-%d").to_string();
        let payload = json!({ "data": today });

        let document = self
            .api
            .call(endpoints::DAILY_REPORT, &payload, Some(session))
            .await?
            .ok_or(Error::DataUnavailable)?;

        let report: DailyReportDocument = serde_json::from_str(&document).map_err(|err| {
            Error::protocol(endpoints::DAILY_REPORT, format!("bad report document: {err}"))
        })?;

        let record = report
            .four_electrode_weight
            .or(report.eight_electrode_weight)
            .ok_or(Error::DataUnavailable)?;

        Ok(map_record(record))
    }
}

fn map_record(record: WeightRecord) -> MeasurementReading {
    MeasurementReading {
        weight_kg: record.weight,
        body_fat_percent: record.bodyfat,
        bmi: record.bmi,
        muscle_mass_percent: record.muscle,
        body_water_percent: record.water,
        bone_mass_kg: record.bone,
        basal_metabolic_rate_kcal: record.bmr,
        body_age_years: record.bodyage,
        visceral_fat_rating: record.visfat,
        subcutaneous_fat_percent: record.subfat,
        protein_percent: record.protein,
        lean_body_mass_kg: record.sinew,
        fat_free_weight_kg: record.fat_free_weight,
        heart_rate_bpm: record.heart_rate,
        recorded_at: record.local_created_at.as_deref().and_then(parse_timestamp),
        scale_name: record.scale_name,
    }
}

/// Parse the record timestamp, which the server formats inconsistently.
///
/// Unparseable timestamps degrade to `None`; the reading itself is still
/// useful without one.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    debug!(raw, "unrecognized measurement timestamp format");
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn record_with_missing_fields_maps_to_unknown() {
        let record: WeightRecord =
            serde_json::from_str(r#"{"weight": 70.2, "bodyfat": 18.5}"#).unwrap();
        let reading = map_record(record);

        assert_eq!(reading.weight_kg, Some(70.2));
        assert_eq!(reading.body_fat_percent, Some(18.5));
        assert_eq!(reading.heart_rate_bpm, None);
        assert_eq!(reading.bone_mass_kg, None);
        assert_eq!(reading.scale_name, None);
    }

    #[test]
    fn camel_case_fields_deserialize() {
        let record: WeightRecord = serde_json::from_str(
            r#"{"fatFreeWeight": 60.1, "heartRate": 62, "localCreatedAt": "2026-08-29 07:45:12", "scaleName": "ES-30M"}"#,
        )
        .unwrap();
        let reading = map_record(record);

        assert_eq!(reading.fat_free_weight_kg, Some(60.1));
        assert_eq!(reading.heart_rate_bpm, Some(62.0));
        assert_eq!(reading.scale_name.as_deref(), Some("ES-30M"));
        assert!(reading.recorded_at.is_some());
    }

    #[test]
    fn timestamp_formats() {
        assert!(parse_timestamp("2026-08-29 07:45:12").is_some());
        assert!(parse_timestamp("2026-08-29T07:45:12+08:00").is_some());
        assert!(parse_timestamp("yesterday-ish").is_none());
    }
}
