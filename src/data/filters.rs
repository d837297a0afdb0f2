//! Expiration and chain filters
//!
//! LEAPs are expirations more than a year out. Within a chain only
//! out-of-the-money calls that traded recently are kept; anything else is
//! either not a LEAP play or too illiquid to quote sensibly.

use chrono::NaiveDate;

use crate::core::Contract;

/// Minimum days to expiry for a LEAP
pub const LEAP_MIN_DAYS: i64 = 365;
/// Maximum age of the last trade for a listing to count as liquid
pub const MAX_TRADE_AGE_DAYS: i64 = 60;

/// Expirations strictly more than `min_days` after `today`
pub fn leap_expirations(expirations: &[NaiveDate], today: NaiveDate, min_days: i64) -> Vec<NaiveDate> {
    expirations
        .iter()
        .copied()
        .filter(|&e| (e - today).num_days() > min_days)
        .collect()
}

/// Calls struck above spot that traded within `max_age_days`
pub fn liquid_otm_calls(
    calls: Vec<Contract>,
    spot: f64,
    today: NaiveDate,
    max_age_days: i64,
) -> Vec<Contract> {
    calls
        .into_iter()
        .filter(|c| c.is_otm_call(spot))
        .filter(|c| {
            c.days_since_trade(today)
                .map(|age| age <= max_age_days)
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_leap_expirations() {
        let exps = vec![
            today() + Duration::days(30),
            today() + Duration::days(365),
            today() + Duration::days(366),
            today() + Duration::days(820),
        ];

        let leaps = leap_expirations(&exps, today(), LEAP_MIN_DAYS);
        assert_eq!(leaps, vec![exps[2], exps[3]]);
    }

    #[test]
    fn test_liquid_otm_calls() {
        let expiry = today() + Duration::days(500);
        let recent = Utc.with_ymd_and_hms(2026, 10, 10, 19, 0, 0).unwrap();
        let boundary = Utc.with_ymd_and_hms(2026, 8, 19, 14, 0, 0).unwrap();
        let stale = Utc.with_ymd_and_hms(2026, 6, 1, 19, 0, 0).unwrap();

        let calls = vec![
            Contract::new(expiry, 90.0).with_last_trade(recent),
            Contract::new(expiry, 100.0).with_last_trade(recent),
            Contract::new(expiry, 110.0).with_last_trade(recent),
            Contract::new(expiry, 120.0).with_last_trade(boundary),
            Contract::new(expiry, 130.0).with_last_trade(stale),
            Contract::new(expiry, 140.0),
        ];

        let kept: Vec<f64> = liquid_otm_calls(calls, 100.0, today(), MAX_TRADE_AGE_DAYS)
            .iter()
            .map(|c| c.strike)
            .collect();

        assert_eq!(kept, vec![110.0, 120.0]);
    }
}
