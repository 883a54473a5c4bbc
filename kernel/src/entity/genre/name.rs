use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct GenreName(String);

impl GenreName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
