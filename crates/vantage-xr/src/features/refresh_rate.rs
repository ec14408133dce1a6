//! Display refresh-rate negotiation. The decision logic is pure so the
//! rejection semantics (unchanged rate, unsupported rate) are testable
//! without a runtime; a failed request leaves the current rate untouched.

use log::info;
use openxr as xr;
use vantage_shell::RefreshRateMode;

use crate::error::{runtime_err, Result, XrError};

/// Validates a requested rate against the supported list and the current
/// rate. Errors when the rate is already active or not offered.
pub fn plan_rate_change(supported: &[f32], current: f32, wanted: f32) -> Result<f32> {
    if (wanted - current).abs() < 0.01 {
        return Err(XrError::RateUnchanged(current));
    }
    if !supported.iter().any(|&rate| (rate - wanted).abs() < 0.01) {
        return Err(XrError::RateUnsupported(wanted));
    }
    Ok(wanted)
}

pub struct RefreshRateFeature;

impl RefreshRateFeature {
    /// Supported rates in ascending order.
    pub fn supported_rates<G: xr::Graphics>(&self, session: &xr::Session<G>) -> Result<Vec<f32>> {
        let mut rates = session
            .enumerate_display_refresh_rates()
            .map_err(|e| runtime_err("enumerate_display_refresh_rates", e))?;
        rates.sort_by(|a, b| a.total_cmp(b));
        Ok(rates)
    }

    pub fn current_rate<G: xr::Graphics>(&self, session: &xr::Session<G>) -> Result<f32> {
        session
            .get_display_refresh_rate()
            .map_err(|e| runtime_err("get_display_refresh_rate", e))
    }

    pub fn set_rate<G: xr::Graphics>(&self, session: &xr::Session<G>, rate: f32) -> Result<()> {
        let current = self.current_rate(session)?;
        let supported = self.supported_rates(session)?;
        let rate = plan_rate_change(&supported, current, rate)?;
        session
            .request_display_refresh_rate(rate)
            .map_err(|e| runtime_err("request_display_refresh_rate", e))?;
        info!("display refresh rate {current} Hz -> {rate} Hz");
        Ok(())
    }

    /// Requests the highest rate the runtime offers.
    pub fn set_max_rate<G: xr::Graphics>(&self, session: &xr::Session<G>) -> Result<()> {
        let supported = self.supported_rates(session)?;
        let max = supported
            .last()
            .copied()
            .ok_or(XrError::RateUnsupported(0.0))?;
        self.set_rate(session, max)
    }

    /// Applies the embedding application's startup preference.
    pub fn apply_mode<G: xr::Graphics>(
        &self,
        session: &xr::Session<G>,
        mode: RefreshRateMode,
    ) -> Result<()> {
        match mode {
            RefreshRateMode::Default => Ok(()),
            RefreshRateMode::Max => self.set_max_rate(session),
            RefreshRateMode::Explicit(rate) => self.set_rate(session, rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_rate_rejected() {
        let err = plan_rate_change(&[72.0, 90.0], 72.0, 120.0).unwrap_err();
        assert!(matches!(err, XrError::RateUnsupported(r) if r == 120.0));
    }

    #[test]
    fn test_unchanged_rate_rejected() {
        let err = plan_rate_change(&[72.0, 90.0], 90.0, 90.0).unwrap_err();
        assert!(matches!(err, XrError::RateUnchanged(r) if r == 90.0));
    }

    #[test]
    fn test_supported_rate_accepted() {
        assert_eq!(plan_rate_change(&[72.0, 90.0, 120.0], 72.0, 90.0).unwrap(), 90.0);
    }

    #[test]
    fn test_near_match_tolerates_float_noise() {
        assert_eq!(
            plan_rate_change(&[72.0, 90.0], 72.0, 90.004).unwrap(),
            90.004
        );
    }
}
