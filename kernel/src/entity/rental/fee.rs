use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::{DailyRentalRate, DateOut, DateReturned};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct RentalFee(i64);

impl RentalFee {
    pub fn new(fee: impl Into<i64>) -> Self {
        Self(fee.into())
    }

    /// Whole days elapsed (rounded down, never negative) times the daily rate.
    pub fn calculate(
        date_out: &DateOut,
        date_returned: &DateReturned,
        rate: &DailyRentalRate,
    ) -> Self {
        let elapsed = *date_returned.as_ref() - *date_out.as_ref();
        let days = elapsed.whole_days().max(0);
        Self(days.saturating_mul(i64::from(*rate.as_ref())))
    }
}
