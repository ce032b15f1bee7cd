//! Feature pipeline: raw form values to the classifier's input row.
//!
//! The scaler was fitted on seven numeric columns:
//!
//! ```text
//! [perc_premium, ln(income + 1), app_score, no_of_premiums_paid, premium, age, total_late]
//! ```
//!
//! The form never collects `no_of_premiums_paid` or `premium`, so those two
//! columns are zero-filled before scaling and dropped afterwards. The binary
//! `has_late_payments` flag bypasses the scaler and is appended last.

use crate::{FormInput, PredictError, Scaler};

/// Width of the row the scaler expects.
pub const SCALER_COLUMNS: usize = 7;

/// Scaled columns kept for the classifier, in order.
pub const SELECTED_COLUMNS: [usize; 5] = [0, 1, 2, 5, 6];

/// Width of the row the classifier expects.
pub const FEATURE_COUNT: usize = SELECTED_COLUMNS.len() + 1;

/// Final classifier input row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// `ln(income + 1)`. Undefined for `income <= -1`.
pub fn log_income(income: f64) -> Result<f64, PredictError> {
    let shifted = income + 1.0;
    if shifted.is_nan() || shifted <= 0.0 {
        return Err(PredictError::Transform(format!(
            "log of non-positive value: income + 1 = {shifted}"
        )));
    }
    Ok(shifted.ln())
}

/// Assembles the unscaled seven-column row.
pub fn scaler_row(input: &FormInput) -> Result<[f64; SCALER_COLUMNS], PredictError> {
    Ok([
        input.perc_premium_paid_by_cash_credit,
        log_income(input.income)?,
        input.application_underwriting_score,
        0.0, // no_of_premiums_paid
        0.0, // premium
        input.age_in_years,
        input.total_late_payments,
    ])
}

/// Runs the full pipeline through `scaler`.
pub fn build_features(input: &FormInput, scaler: &dyn Scaler) -> Result<FeatureVector, PredictError> {
    let row = scaler_row(input)?;
    let scaled = scaler.transform(&row)?;

    if scaled.len() != SCALER_COLUMNS {
        return Err(PredictError::Transform(format!(
            "scaler returned {} columns, expected {}",
            scaled.len(),
            SCALER_COLUMNS
        )));
    }
    if let Some(pos) = scaled.iter().position(|v| !v.is_finite()) {
        return Err(PredictError::Transform(format!(
            "scaler produced non-finite value in column {pos}"
        )));
    }

    if !input.has_late_payments.is_finite() {
        return Err(PredictError::Transform(format!(
            "has_late_payments must be finite, got {}",
            input.has_late_payments
        )));
    }

    let mut out = [0.0; FEATURE_COUNT];
    for (slot, &col) in out.iter_mut().zip(SELECTED_COLUMNS.iter()) {
        *slot = scaled[col];
    }
    out[FEATURE_COUNT - 1] = input.has_late_payments;

    Ok(FeatureVector(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl Scaler for Identity {
        fn n_features(&self) -> usize {
            SCALER_COLUMNS
        }

        fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
            Ok(row.to_vec())
        }
    }

    /// Replaces every column with `100 + index` so selection is observable.
    struct Positional;

    impl Scaler for Positional {
        fn n_features(&self) -> usize {
            SCALER_COLUMNS
        }

        fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
            Ok((0..row.len()).map(|i| 100.0 + i as f64).collect())
        }
    }

    struct Truncating;

    impl Scaler for Truncating {
        fn n_features(&self) -> usize {
            SCALER_COLUMNS
        }

        fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
            Ok(row[..3].to_vec())
        }
    }

    fn sample() -> FormInput {
        FormInput {
            perc_premium_paid_by_cash_credit: 0.3,
            income: 50_000.0,
            application_underwriting_score: 99.0,
            age_in_years: 45.0,
            total_late_payments: 2.0,
            has_late_payments: 1.0,
        }
    }

    #[test]
    fn test_log_income_zero() {
        assert_eq!(log_income(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_log_income_monotonic() {
        let incomes = [0.0, 0.5, 10.0, 1_000.0, 50_000.0, 1e9];
        let logged: Vec<f64> = incomes.iter().map(|&i| log_income(i).unwrap()).collect();
        assert!(logged.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_log_income_rejects_minus_one_and_below() {
        assert!(matches!(log_income(-1.0), Err(PredictError::Transform(_))));
        assert!(matches!(log_income(-5.0), Err(PredictError::Transform(_))));
        assert!(matches!(log_income(f64::NAN), Err(PredictError::Transform(_))));
    }

    #[test]
    fn test_scaler_row_zero_fills_placeholders() {
        let row = scaler_row(&sample()).unwrap();
        assert_eq!(row[0], 0.3);
        assert!((row[1] - 50_001f64.ln()).abs() < 1e-12);
        assert_eq!(row[2], 99.0);
        assert_eq!(row[3], 0.0);
        assert_eq!(row[4], 0.0);
        assert_eq!(row[5], 45.0);
        assert_eq!(row[6], 2.0);
    }

    #[test]
    fn test_build_features_identity() {
        let features = build_features(&sample(), &Identity).unwrap();
        let v = features.as_slice();
        assert_eq!(v.len(), FEATURE_COUNT);
        assert_eq!(v[0], 0.3);
        assert!((v[1] - 50_001f64.ln()).abs() < 1e-12);
        assert_eq!(&v[2..], &[99.0, 45.0, 2.0, 1.0]);
    }

    #[test]
    fn test_build_features_selects_scaled_columns() {
        let features = build_features(&sample(), &Positional).unwrap();
        assert_eq!(features.as_slice(), &[100.0, 101.0, 102.0, 105.0, 106.0, 1.0]);
    }

    #[test]
    fn test_last_column_is_unscaled_flag() {
        for flag in [0.0, 1.0, 7.5] {
            let input = FormInput { has_late_payments: flag, ..sample() };
            let features = build_features(&input, &Positional).unwrap();
            assert_eq!(features.as_slice().len(), 6);
            assert_eq!(features.as_slice()[5], flag);
        }
    }

    #[test]
    fn test_non_finite_flag_rejected() {
        for flag in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let input = FormInput { has_late_payments: flag, ..sample() };
            let err = build_features(&input, &Identity).unwrap_err();
            assert!(matches!(err, PredictError::Transform(_)));
        }
    }

    #[test]
    fn test_scaler_width_mismatch() {
        let err = build_features(&sample(), &Truncating).unwrap_err();
        assert!(matches!(err, PredictError::Transform(_)));
    }

    #[test]
    fn test_income_edge_surfaces_as_transform_error() {
        let input = FormInput { income: -1.0, ..sample() };
        let err = build_features(&input, &Identity).unwrap_err();
        assert!(matches!(err, PredictError::Transform(_)));
    }
}
