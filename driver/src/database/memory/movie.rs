use kernel::interface::query::MovieQuery;
use kernel::interface::update::MovieModifier;
use kernel::prelude::entity::{Movie, MovieId, NumberInStock, StockDelta};
use kernel::KernelError;

use crate::database::memory::{InMemoryTransaction, InjectedFault};

pub struct InMemoryMovieRepository;

#[async_trait::async_trait]
impl MovieQuery for InMemoryMovieRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        Ok(con.tables().movies.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Movie>, KernelError> {
        let mut movies = con.tables().movies.values().cloned().collect::<Vec<_>>();
        movies.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(movies)
    }
}

#[async_trait::async_trait]
impl MovieModifier for InMemoryMovieRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        con.tables_mut()
            .movies
            .insert(movie.id().clone(), movie.clone());
        Ok(())
    }

    async fn adjust_stock(
        &self,
        con: &mut InMemoryTransaction,
        id: &MovieId,
        delta: StockDelta,
    ) -> error_stack::Result<Option<NumberInStock>, KernelError> {
        con.trip(InjectedFault::StockAdjustment)?;
        let Some(movie) = con.tables_mut().movies.remove(id) else {
            return Ok(None);
        };
        let Some(stock) = movie.number_in_stock().apply(delta) else {
            con.tables_mut().movies.insert(id.clone(), movie);
            return Ok(None);
        };
        let movie = movie.reconstruct(|movie| movie.number_in_stock = stock);
        con.tables_mut().movies.insert(id.clone(), movie);
        Ok(Some(stock))
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::MovieQuery;
    use kernel::interface::update::MovieModifier;
    use kernel::prelude::entity::{
        DailyRentalRate, Genre, GenreId, GenreName, Movie, MovieId, MovieTitle, NumberInStock,
        StockDelta,
    };
    use kernel::KernelError;

    use crate::database::memory::{InMemoryDatabase, InMemoryMovieRepository, InjectedFault};

    fn movie(stock: i32) -> Movie {
        Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("king kong"),
            Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("action")),
            NumberInStock::new(stock),
            DailyRentalRate::new(5),
        )
    }

    #[tokio::test]
    async fn adjust_stock() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let movie = movie(1);
        let mut con = db.transact().await?;
        InMemoryMovieRepository.create(&mut con, &movie).await?;

        let stock = InMemoryMovieRepository
            .adjust_stock(&mut con, movie.id(), StockDelta::Decrement)
            .await?;
        assert_eq!(stock, Some(NumberInStock::new(0)));
        let stock = InMemoryMovieRepository
            .adjust_stock(&mut con, movie.id(), StockDelta::Decrement)
            .await?;
        assert_eq!(stock, None);

        let found = InMemoryMovieRepository
            .find_by_id(&mut con, movie.id())
            .await?
            .map(|movie| *movie.number_in_stock());
        assert_eq!(found, Some(NumberInStock::new(0)));

        let missing = MovieId::new(Uuid::new_v4());
        let stock = InMemoryMovieRepository
            .adjust_stock(&mut con, &missing, StockDelta::Increment)
            .await?;
        assert_eq!(stock, None);
        con.commit().await?;
        Ok(())
    }

    #[tokio::test]
    async fn fault_trips_once() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let movie = movie(1);
        db.replace_movie(movie.clone()).await;
        db.inject_fault(InjectedFault::StockAdjustment).await;

        let mut con = db.transact().await?;
        let result = InMemoryMovieRepository
            .adjust_stock(&mut con, movie.id(), StockDelta::Decrement)
            .await;
        assert!(matches!(
            result.as_ref().map_err(|report| report.current_context()),
            Err(KernelError::Internal)
        ));
        let stock = InMemoryMovieRepository
            .adjust_stock(&mut con, movie.id(), StockDelta::Decrement)
            .await?;
        assert_eq!(stock, Some(NumberInStock::new(0)));
        con.commit().await?;
        Ok(())
    }
}
