use kernel::interface::query::CustomerQuery;
use kernel::interface::update::CustomerModifier;
use kernel::prelude::entity::{Customer, CustomerId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryCustomerRepository;

#[async_trait::async_trait]
impl CustomerQuery for InMemoryCustomerRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &CustomerId,
    ) -> error_stack::Result<Option<Customer>, KernelError> {
        Ok(con.tables().customers.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        let mut customers = con
            .tables()
            .customers
            .values()
            .cloned()
            .collect::<Vec<_>>();
        customers.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(customers)
    }
}

#[async_trait::async_trait]
impl CustomerModifier for InMemoryCustomerRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        customer: &Customer,
    ) -> error_stack::Result<(), KernelError> {
        con.tables_mut()
            .customers
            .insert(customer.id().clone(), customer.clone());
        Ok(())
    }
}
