//! A single hourly demand estimate.

use hw_core::ValidationError;

/// Predicted passengers for one hour of the service day.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandSample {
    /// Hour of day, `0..=23`.
    pub hour: u8,
    /// Non-negative, finite passenger estimate.
    pub predicted_passengers: f64,
}

impl DemandSample {
    /// Build a sample, rejecting hours past 23 and negative or non-finite
    /// passenger counts.
    pub fn new(hour: u8, predicted_passengers: f64) -> Result<Self, ValidationError> {
        let sample = Self { hour, predicted_passengers };
        sample.validate()?;
        Ok(sample)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let passengers = self.predicted_passengers;
        if self.hour > 23 || !passengers.is_finite() || passengers < 0.0 {
            return Err(ValidationError::InvalidDemand { hour: self.hour, passengers });
        }
        Ok(())
    }
}

/// Mean predicted passengers across `samples`, or `None` for an empty forecast.
pub fn average_demand(samples: &[DemandSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples.iter().map(|s| s.predicted_passengers).sum();
    Some(total / samples.len() as f64)
}
