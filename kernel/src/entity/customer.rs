mod id;
mod is_gold;
mod name;
mod phone;

pub use self::{id::*, is_gold::*, name::*, phone::*};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct Customer {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
    is_gold: IsGold,
}

impl Customer {
    pub fn new(id: CustomerId, name: CustomerName, phone: CustomerPhone, is_gold: IsGold) -> Self {
        Self {
            id,
            name,
            phone,
            is_gold,
        }
    }
}
