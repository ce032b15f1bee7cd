//! Raw form input for a prediction request.

use std::collections::HashMap;

use crate::PredictError;

/// Form field names in the order the feature pipeline consumes them.
pub const FORM_FIELDS: [&str; 6] = [
    "perc_premium_paid_by_cash_credit",
    "income",
    "application_underwriting_score",
    "age_in_years",
    "total_late_payments",
    "has_late_payments",
];

/// The six numeric fields submitted with a prediction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormInput {
    pub perc_premium_paid_by_cash_credit: f64,
    pub income: f64,
    pub application_underwriting_score: f64,
    pub age_in_years: f64,
    pub total_late_payments: f64,
    pub has_late_payments: f64,
}

impl FormInput {
    /// Parses fields in submission order. A repeated name keeps its first value.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, PredictError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut fields = HashMap::new();
        for (name, value) in pairs {
            fields.entry(name).or_insert(value);
        }
        Self::from_fields(&fields)
    }

    /// Parses the form fields, failing on the first missing or non-numeric one.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, PredictError> {
        let mut values = [0.0; 6];
        for (slot, name) in values.iter_mut().zip(FORM_FIELDS) {
            let raw = fields
                .get(name)
                .ok_or_else(|| PredictError::Validation(format!("missing form field '{name}'")))?;
            *slot = parse_float(name, raw)?;
        }

        let [perc_premium_paid_by_cash_credit, income, application_underwriting_score, age_in_years, total_late_payments, has_late_payments] =
            values;

        Ok(Self {
            perc_premium_paid_by_cash_credit,
            income,
            application_underwriting_score,
            age_in_years,
            total_late_payments,
            has_late_payments,
        })
    }
}

fn parse_float(name: &str, raw: &str) -> Result<f64, PredictError> {
    raw.trim().parse::<f64>().map_err(|_| {
        PredictError::Validation(format!(
            "could not convert string to float for '{name}': '{raw}'"
        ))
    })
}
