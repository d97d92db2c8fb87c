//! PGD engine — the deterministic psychographic matrix computation.
//!
//! Pure and synchronous: given the same (date-of-birth, gender) tuple it
//! always returns the same `PgdResult`. No I/O, no state between
//! invocations, safe to call from any number of tasks concurrently.
//! All LLM and HTTP concerns live elsewhere; this module only computes.

pub mod matrix;
pub mod repetition;
pub mod result;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use result::PgdResult;

/// The gender marker attached to a computation request.
///
/// Anything that is not a recognized marker deserializes to `Other`.
/// That is deliberate and not an error: the gender-conditioned slots of
/// the result are simply absent. Gender validation, where wanted,
/// belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    #[serde(other)]
    Other,
}

/// The engine's only failure mode: the date string does not decompose
/// into three integers. Surfaced to the caller unchanged; the engine
/// never recovers locally.
#[derive(Debug, Error)]
pub enum PgdError {
    #[error("invalid date format: {0:?} (expected DD.MM.YYYY)")]
    MalformedDate(String),
}

/// Computes the full PGD result for one person.
///
/// The derivation order is fixed: main matrix, then ancestral and
/// crossroads aggregates, then the repetition-based tasks and business
/// periods — the latter two read the already-derived slots, never the
/// raw date.
pub fn compute(date_of_birth: &str, gender: Gender) -> Result<PgdResult, PgdError> {
    let (x1, x2, x3) = matrix::decompose_date(date_of_birth)?;
    let (main_points, ancestral, crossroads) = matrix::compute_points(x1, x2, x3, gender);

    let tasks = repetition::karmic_tasks(&main_points, &ancestral, &crossroads);
    let business_periods = repetition::business_periods(&main_points);

    Ok(PgdResult {
        main_points,
        ancestral,
        crossroads,
        tasks,
        business_periods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_deterministic() {
        let first = compute("15.06.1990", Gender::Female).unwrap();
        let second = compute("15.06.1990", Gender::Female).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_malformed_date_propagates() {
        let err = compute("31-02-1990", Gender::Female).unwrap_err();
        assert!(matches!(err, PgdError::MalformedDate(_)));
        assert!(err.to_string().contains("31-02-1990"));
    }

    #[test]
    fn test_gender_deserializes_permissively() {
        let female: Gender = serde_json::from_str("\"female\"").unwrap();
        let male: Gender = serde_json::from_str("\"male\"").unwrap();
        let odd: Gender = serde_json::from_str("\"nonbinary\"").unwrap();
        assert_eq!(female, Gender::Female);
        assert_eq!(male, Gender::Male);
        assert_eq!(odd, Gender::Other);
    }

    #[test]
    fn test_result_round_trips_without_inventing_slots() {
        // Absence must survive serialization: an undefined slot stays
        // undefined after a wire round trip, never becomes zero.
        let result = compute("15.06.1990", Gender::Female).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"O\""), "male slots must be omitted: {json}");
        assert!(!json.contains("\"P\""));

        let recovered: PgdResult = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, result);
        assert_eq!(recovered.main_points.o, None);
        assert_eq!(recovered.main_points.p, None);
    }

    #[test]
    fn test_business_periods_block_omitted_when_absent() {
        // 17.06.2002 / unrecognized gender has no repeated main value.
        let result = compute("17.06.2002", Gender::Other).unwrap();
        assert!(result.business_periods.is_none());

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("business_periods"));
    }
}
