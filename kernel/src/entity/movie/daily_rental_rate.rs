use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Price charged per whole day a copy is out.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct DailyRentalRate(i32);

impl DailyRentalRate {
    pub fn new(rate: impl Into<i32>) -> Self {
        Self(rate.into())
    }
}
