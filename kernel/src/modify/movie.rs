use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Movie, MovieId, NumberInStock, StockDelta};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MovieModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError>;
    /// Applies `delta` to the stored counter in one step. Yields the new stock,
    /// or `None` when the movie does not exist or the stock would go negative.
    async fn adjust_stock(
        &self,
        con: &mut Self::Transaction,
        id: &MovieId,
        delta: StockDelta,
    ) -> error_stack::Result<Option<NumberInStock>, KernelError>;
}

pub trait DependOnMovieModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type MovieModifier: MovieModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn movie_modifier(&self) -> &Self::MovieModifier;
}
