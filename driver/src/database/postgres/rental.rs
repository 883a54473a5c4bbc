use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{
    CustomerId, CustomerName, CustomerPhone, CustomerSnapshot, DailyRentalRate, DateOut,
    DateReturned, IsGold, MovieId, MovieSnapshot, MovieTitle, Rental, RentalFee, RentalId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Rental>, KernelError> {
        PgRentalInternal::find_all(con).await
    }

    async fn find_by_customer_and_movie(
        &self,
        con: &mut PostgresTransaction,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_by_customer_and_movie(con, customer_id, movie_id).await
    }
}

#[async_trait::async_trait]
impl RentalModifier for PostgresRentalRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<(), KernelError> {
        PgRentalInternal::create(con, rental).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        rental: &Rental,
    ) -> error_stack::Result<bool, KernelError> {
        PgRentalInternal::update(con, rental).await
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    customer_id: Uuid,
    customer_name: String,
    customer_phone: String,
    customer_is_gold: bool,
    movie_id: Uuid,
    movie_title: String,
    movie_daily_rental_rate: i32,
    date_out: OffsetDateTime,
    date_returned: Option<OffsetDateTime>,
    rental_fee: Option<i64>,
}

impl From<RentalRow> for Rental {
    fn from(row: RentalRow) -> Self {
        Rental::new(
            RentalId::new(row.id),
            CustomerSnapshot::new(
                CustomerId::new(row.customer_id),
                CustomerName::new(row.customer_name),
                CustomerPhone::new(row.customer_phone),
                IsGold::new(row.customer_is_gold),
            ),
            MovieSnapshot::new(
                MovieId::new(row.movie_id),
                MovieTitle::new(row.movie_title),
                DailyRentalRate::new(row.movie_daily_rental_rate),
            ),
            DateOut::new(row.date_out),
            row.date_returned.map(DateReturned::new),
            row.rental_fee.map(RentalFee::new),
        )
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &RentalId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id,
                   customer_id, customer_name, customer_phone, customer_is_gold,
                   movie_id, movie_title, movie_daily_rental_rate,
                   date_out, date_returned, rental_fee
            FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Rental>, KernelError> {
        let rows = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id,
                   customer_id, customer_name, customer_phone, customer_is_gold,
                   movie_id, movie_title, movie_daily_rental_rate,
                   date_out, date_returned, rental_fee
            FROM rentals
            ORDER BY date_out DESC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rental::from).collect())
    }

    async fn find_by_customer_and_movie(
        con: &mut PgConnection,
        customer_id: &CustomerId,
        movie_id: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_as::<_, RentalRow>(
            // language=postgresql
            r#"
            SELECT id,
                   customer_id, customer_name, customer_phone, customer_is_gold,
                   movie_id, movie_title, movie_daily_rental_rate,
                   date_out, date_returned, rental_fee
            FROM rentals
            WHERE customer_id = $1 AND movie_id = $2
            ORDER BY date_returned IS NULL DESC,
                     CASE WHEN date_returned IS NULL THEN date_out END,
                     date_returned DESC
            LIMIT 1
            "#,
        )
        .bind(customer_id.as_ref())
        .bind(movie_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rental::from))
    }

    async fn create(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<(), KernelError> {
        let customer = rental.customer();
        let movie = rental.movie();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO rentals (id,
                                 customer_id, customer_name, customer_phone, customer_is_gold,
                                 movie_id, movie_title, movie_daily_rental_rate,
                                 date_out, date_returned, rental_fee)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(customer.id().as_ref())
        .bind(customer.name().as_ref())
        .bind(customer.phone().as_ref())
        .bind(customer.is_gold().as_ref())
        .bind(movie.id().as_ref())
        .bind(movie.title().as_ref())
        .bind(movie.daily_rental_rate().as_ref())
        .bind(rental.date_out().as_ref())
        .bind(rental.date_returned().as_ref().map(|date| *date.as_ref()))
        .bind(rental.rental_fee().as_ref().map(|fee| *fee.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    // Only an open rental can be closed; a concurrent return that committed
    // first leaves nothing for this statement to match.
    async fn update(con: &mut PgConnection, rental: &Rental) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE rentals
            SET date_returned = $2, rental_fee = $3
            WHERE id = $1 AND date_returned IS NULL
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(rental.date_returned().as_ref().map(|date| *date.as_ref()))
        .bind(rental.rental_fee().as_ref().map(|fee| *fee.as_ref()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() == 1)
    }
}
