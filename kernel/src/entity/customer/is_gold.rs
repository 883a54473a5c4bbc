use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct IsGold(bool);

impl IsGold {
    pub fn new(value: impl Into<bool>) -> Self {
        Self(value.into())
    }
}
