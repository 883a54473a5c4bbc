use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{CustomerId, MovieId, Rental, RentalId};
use kernel::KernelError;

use crate::database::memory::{InMemoryTransaction, InjectedFault};

pub struct InMemoryRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for InMemoryRentalRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        Ok(con.tables().rentals.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut rentals = con.tables().rentals.values().cloned().collect::<Vec<_>>();
        rentals.sort_by(|a, b| b.date_out().cmp(a.date_out()));
        Ok(rentals)
    }

    async fn find_by_customer_and_movie(
        &self,
        con: &mut InMemoryTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let pair = con
            .tables()
            .rentals
            .values()
            .filter(|rental| rental.customer().id() == customer_id)
            .filter(|rental| rental.movie().id() == movie_id);
        let (open, closed): (Vec<&Rental>, Vec<&Rental>) =
            pair.partition(|rental| !rental.is_closed());
        let found = match open
            .into_iter()
            .min_by(|a, b| a.date_out().cmp(b.date_out()))
        {
            Some(rental) => Some(rental),
            None => closed
                .into_iter()
                .max_by(|a, b| a.date_returned().cmp(b.date_returned())),
        };
        Ok(found.cloned())
    }
}

#[async_trait::async_trait]
impl RentalModifier for InMemoryRentalRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        con.trip(InjectedFault::RentalCreate)?;
        con.tables_mut()
            .rentals
            .insert(rental.id().clone(), rental.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        rental: &Rental,
    ) -> error_stack::Result<bool, KernelError> {
        con.trip(InjectedFault::RentalUpdate)?;
        let Some(stored) = con.tables_mut().rentals.get_mut(rental.id()) else {
            return Ok(false);
        };
        if stored.is_closed() {
            return Ok(false);
        }
        *stored = rental.clone();
        Ok(true)
    }
}
