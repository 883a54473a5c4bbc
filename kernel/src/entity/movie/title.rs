use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct MovieTitle(String);

impl MovieTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }
}
