//! Prediction result and its display text.

use std::fmt;

/// Shown instead of a prediction while artifacts are still loading.
pub const LOADING_MESSAGE: &str = "MODEL LOADING /// PLEASE WAIT.";

/// Probabilities at or above this value count as a renewal.
pub const RENEWAL_THRESHOLD: f64 = 0.5;

/// Which side of the threshold a prediction falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Renewal,
    Churn,
}

/// Positive-class (renewal) probability for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    probability: f64,
}

impl Prediction {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn verdict(&self) -> Verdict {
        match self.probability >= RENEWAL_THRESHOLD {
            true => Verdict::Renewal,
            false => Verdict::Churn,
        }
    }
}

impl fmt::Display for Prediction {
    /// Renders the result line, including the accent markup the page styles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.verdict() {
            Verdict::Renewal => "PROBABLE RENEWAL",
            Verdict::Churn => "IMPROBABLE RENEWAL (CHURN)",
        };
        write!(
            f,
            "{label} // PROBABILITY: <span class='prob-accent'>{:.1}%</span>",
            self.probability * 100.0
        )
    }
}
