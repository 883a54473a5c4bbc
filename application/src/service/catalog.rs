use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnGenreQuery, DependOnMovieQuery, GenreQuery,
    MovieQuery,
};
use kernel::prelude::entity::{Customer, Genre, Movie};
use kernel::KernelError;

use crate::service::settle;

#[async_trait::async_trait]
pub trait GetMovieService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnMovieQuery
{
    async fn get_all_movies(&self) -> error_stack::Result<Vec<Movie>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let result = self.movie_query().find_all(&mut transaction).await;
        settle(transaction, result).await
    }
}

impl<T> GetMovieService for T where T: DependOnDatabaseConnection + DependOnMovieQuery {}

#[async_trait::async_trait]
pub trait GetCustomerService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnCustomerQuery
{
    async fn get_all_customers(&self) -> error_stack::Result<Vec<Customer>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let result = self.customer_query().find_all(&mut transaction).await;
        settle(transaction, result).await
    }
}

impl<T> GetCustomerService for T where T: DependOnDatabaseConnection + DependOnCustomerQuery {}

#[async_trait::async_trait]
pub trait GetGenreService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnGenreQuery
{
    async fn get_all_genres(&self) -> error_stack::Result<Vec<Genre>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let result = self.genre_query().find_all(&mut transaction).await;
        settle(transaction, result).await
    }
}

impl<T> GetGenreService for T where T: DependOnDatabaseConnection + DependOnGenreQuery {}
