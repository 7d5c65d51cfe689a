use crate::error::VerificationError;
use metrics::{counter, Counter};

pub struct Metrics {
    pub verified: Counter,
}

const REASON: &str = "reason";

impl Metrics {
    pub fn new() -> Self {
        Metrics {
            verified: counter!("age_verification.verified"),
        }
    }

    pub fn record_rejection(&self, error: &VerificationError) {
        counter!("age_verification.rejected", REASON => error.reason()).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics::new()
    }
}
