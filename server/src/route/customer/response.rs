use kernel::prelude::entity::{
    Customer, CustomerId, CustomerName, CustomerPhone, DestructCustomer, IsGold,
};
use serde::Serialize;

use crate::controller::Exhaust;
use crate::response::Success;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
    is_gold: IsGold,
}

pub struct Presenter;

impl Exhaust<Vec<Customer>> for Presenter {
    type To = Success<Vec<CustomerResponse>>;
    fn emit(&self, output: Vec<Customer>) -> Self::To {
        let customers = output
            .into_iter()
            .map(|customer| {
                let DestructCustomer {
                    id,
                    name,
                    phone,
                    is_gold,
                } = customer.into_destruct();
                CustomerResponse {
                    id,
                    name,
                    phone,
                    is_gold,
                }
            })
            .collect();
        Success::ok(customers)
    }
}
