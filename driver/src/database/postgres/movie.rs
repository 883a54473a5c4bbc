use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::MovieQuery;
use kernel::interface::update::MovieModifier;
use kernel::prelude::entity::{
    DailyRentalRate, Genre, GenreId, GenreName, Movie, MovieId, MovieTitle, NumberInStock,
    StockDelta,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresMovieRepository;

#[async_trait::async_trait]
impl MovieQuery for PostgresMovieRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        PgMovieInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Movie>, KernelError> {
        PgMovieInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl MovieModifier for PostgresMovieRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        movie: &Movie,
    ) -> error_stack::Result<(), KernelError> {
        PgMovieInternal::create(con, movie).await
    }

    async fn adjust_stock(
        &self,
        con: &mut PostgresTransaction,
        id: &MovieId,
        delta: StockDelta,
    ) -> error_stack::Result<Option<NumberInStock>, KernelError> {
        PgMovieInternal::adjust_stock(con, id, delta).await
    }
}

#[derive(sqlx::FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    genre_id: Uuid,
    genre_name: String,
    number_in_stock: i32,
    daily_rental_rate: i32,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie::new(
            MovieId::new(row.id),
            MovieTitle::new(row.title),
            Genre::new(GenreId::new(row.genre_id), GenreName::new(row.genre_name)),
            NumberInStock::new(row.number_in_stock),
            DailyRentalRate::new(row.daily_rental_rate),
        )
    }
}

pub(in crate::database) struct PgMovieInternal;

impl PgMovieInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &MovieId,
    ) -> error_stack::Result<Option<Movie>, KernelError> {
        let row = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, title, genre_id, genre_name, number_in_stock, daily_rental_rate
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Movie::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Movie>, KernelError> {
        let rows = sqlx::query_as::<_, MovieRow>(
            // language=postgresql
            r#"
            SELECT id, title, genre_id, genre_name, number_in_stock, daily_rental_rate
            FROM movies
            ORDER BY title
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn create(con: &mut PgConnection, movie: &Movie) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO movies (id, title, genre_id, genre_name, number_in_stock, daily_rental_rate)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(movie.id().as_ref())
        .bind(movie.title().as_ref())
        .bind(movie.genre().id().as_ref())
        .bind(movie.genre().name().as_ref())
        .bind(movie.number_in_stock().as_ref())
        .bind(movie.daily_rental_rate().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    // The guard is evaluated against the row as locked by this update, so
    // concurrent decrements cannot take the counter below zero.
    async fn adjust_stock(
        con: &mut PgConnection,
        id: &MovieId,
        delta: StockDelta,
    ) -> error_stack::Result<Option<NumberInStock>, KernelError> {
        let stock = sqlx::query_scalar::<_, i32>(
            // language=postgresql
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock + $2
            WHERE id = $1 AND number_in_stock + $2 >= 0
            RETURNING number_in_stock
            "#,
        )
        .bind(id.as_ref())
        .bind(delta.value())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(stock.map(NumberInStock::new))
    }
}
