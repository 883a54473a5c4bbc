use error_stack::{Report, ResultExt};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    CustomerQuery, DependOnCustomerQuery, DependOnMovieQuery, DependOnRentalQuery, MovieQuery,
    RentalQuery,
};
use kernel::interface::update::{
    DependOnMovieModifier, DependOnRentalModifier, MovieModifier, RentalModifier,
};
use kernel::prelude::entity::{
    CustomerId, DateOut, DateReturned, MovieId, Rental, RentalId, StockDelta,
};
use kernel::{EntityKind, InvalidStateReason, KernelError};

use crate::service::settle;
use crate::transfer::{CreateRentalDto, GetRentalDto, ReturnRentalDto};

#[async_trait::async_trait]
pub trait GetRentalService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnRentalQuery
{
    async fn get_rental(&self, dto: GetRentalDto) -> error_stack::Result<Option<Rental>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let id = RentalId::new(dto.id);
        let result = self.rental_query().find_by_id(&mut transaction, &id).await;
        settle(transaction, result).await
    }

    async fn get_all_rentals(&self) -> error_stack::Result<Vec<Rental>, KernelError> {
        let mut transaction = self.database_connection().transact().await?;
        let result = self.rental_query().find_all(&mut transaction).await;
        settle(transaction, result).await
    }
}

impl<T> GetRentalService for T where T: DependOnDatabaseConnection + DependOnRentalQuery {}

#[async_trait::async_trait]
pub trait CreateRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnCustomerQuery
    + DependOnMovieQuery
    + DependOnMovieModifier
    + DependOnRentalModifier
{
    /// Opens a rental and takes one copy out of stock in the same unit of work.
    async fn create_rental(&self, dto: CreateRentalDto) -> error_stack::Result<Rental, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let result = async {
            let customer_id = CustomerId::new(dto.customer_id);
            let customer = self
                .customer_query()
                .find_by_id(&mut transaction, &customer_id)
                .await?
                .ok_or_else(|| {
                    Report::new(KernelError::reference_not_found(
                        EntityKind::Customer,
                        dto.customer_id,
                    ))
                })?;

            let movie_id = MovieId::new(dto.movie_id);
            let movie = self
                .movie_query()
                .find_by_id(&mut transaction, &movie_id)
                .await?
                .ok_or_else(|| {
                    Report::new(KernelError::reference_not_found(
                        EntityKind::Movie,
                        dto.movie_id,
                    ))
                })?;

            if !movie.in_stock() {
                return Err(not_in_stock(dto.movie_id));
            }

            let rental = Rental::open(
                RentalId::new(Uuid::new_v4()),
                &customer,
                &movie,
                DateOut::now(),
            );

            // Refused when a concurrent rental took the last copy first.
            let stock = self
                .movie_modifier()
                .adjust_stock(&mut transaction, &movie_id, StockDelta::Decrement)
                .await
                .change_context(KernelError::TransactionFailure)?
                .ok_or_else(|| not_in_stock(dto.movie_id))?;

            self.rental_modifier()
                .create(&mut transaction, &rental)
                .await
                .change_context(KernelError::TransactionFailure)?;

            tracing::debug!(
                "Movie {} has {} copies left",
                dto.movie_id,
                stock.as_ref()
            );
            Ok::<_, Report<KernelError>>(rental)
        }
        .await;

        let rental = settle(transaction, result).await.inspect_err(|report| {
            if report.current_context().is_business() {
                tracing::warn!("Rental of movie {} rejected: {report}", dto.movie_id);
            } else {
                tracing::error!("Rental of movie {} failed: {report:?}", dto.movie_id);
            }
        })?;
        tracing::info!(
            "Rental {} opened for customer {} and movie {}",
            rental.id().as_ref(),
            dto.customer_id,
            dto.movie_id
        );
        Ok(rental)
    }
}

impl<T> CreateRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnCustomerQuery
        + DependOnMovieQuery
        + DependOnMovieModifier
        + DependOnRentalModifier
{
}

#[async_trait::async_trait]
pub trait ReturnRentalService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnRentalQuery
    + DependOnRentalModifier
    + DependOnMovieModifier
{
    /// Closes the rental, charges its fee and puts the copy back in stock in
    /// the same unit of work.
    async fn return_rental(&self, dto: ReturnRentalDto) -> error_stack::Result<Rental, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let result = async {
            let customer_id = CustomerId::new(dto.customer_id);
            let movie_id = MovieId::new(dto.movie_id);
            let rental = self
                .rental_query()
                .find_by_customer_and_movie(&mut transaction, &customer_id, &movie_id)
                .await?
                .ok_or_else(|| Report::new(KernelError::NotFound(EntityKind::Rental)))?;

            if rental.is_closed() {
                return Err(already_returned(rental.id()));
            }

            let rental = rental.close(DateReturned::now());

            let closed = self
                .rental_modifier()
                .update(&mut transaction, &rental)
                .await
                .change_context(KernelError::TransactionFailure)?;
            if !closed {
                return Err(already_returned(rental.id()));
            }

            let movie_id = rental.movie().id();
            self.movie_modifier()
                .adjust_stock(&mut transaction, movie_id, StockDelta::Increment)
                .await
                .change_context(KernelError::TransactionFailure)?
                .ok_or_else(|| {
                    Report::new(KernelError::reference_not_found(
                        EntityKind::Movie,
                        movie_id.as_ref(),
                    ))
                })?;

            Ok::<_, Report<KernelError>>(rental)
        }
        .await;

        let rental = settle(transaction, result).await.inspect_err(|report| {
            if report.current_context().is_business() {
                tracing::warn!("Return of movie {} rejected: {report}", dto.movie_id);
            } else {
                tracing::error!("Return of movie {} failed: {report:?}", dto.movie_id);
            }
        })?;
        tracing::info!(
            "Rental {} closed with fee {:?}",
            rental.id().as_ref(),
            rental.rental_fee().as_ref().map(|fee| *fee.as_ref())
        );
        Ok(rental)
    }
}

impl<T> ReturnRentalService for T where
    T: DependOnDatabaseConnection
        + DependOnRentalQuery
        + DependOnRentalModifier
        + DependOnMovieModifier
{
}

fn not_in_stock(movie_id: Uuid) -> Report<KernelError> {
    Report::new(KernelError::InvalidState(InvalidStateReason::MovieNotInStock))
        .attach_printable(format!("movie {movie_id}"))
}

fn already_returned(id: &RentalId) -> Report<KernelError> {
    Report::new(KernelError::InvalidState(
        InvalidStateReason::ReturnAlreadyProcessed,
    ))
    .attach_printable(format!("rental {}", id.as_ref()))
}

#[cfg(test)]
mod test {
    use error_stack::Report;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use driver::database::{InMemoryDatabase, InjectedFault};
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{
        DependOnMovieQuery, DependOnRentalQuery, MovieQuery, RentalQuery,
    };
    use kernel::interface::update::{
        CustomerModifier, DependOnCustomerModifier, DependOnMovieModifier,
        DependOnRentalModifier, MovieModifier, RentalModifier,
    };
    use kernel::prelude::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, DateOut, Genre,
        GenreId, GenreName, IsGold, Movie, MovieId, MovieTitle, NumberInStock, Rental, RentalFee,
        RentalId,
    };
    use kernel::{EntityKind, InvalidStateReason, KernelError};

    use crate::service::{CreateRentalService, GetRentalService, ReturnRentalService};
    use crate::transfer::{CreateRentalDto, GetRentalDto, ReturnRentalDto};

    type TestResult = error_stack::Result<(), KernelError>;

    async fn seed(db: &InMemoryDatabase, stock: i32) -> error_stack::Result<(Customer, Movie), KernelError> {
        let customer = Customer::new(
            CustomerId::new(Uuid::new_v4()),
            CustomerName::new("Mickey Mouse"),
            CustomerPhone::new("1234567891"),
            IsGold::new(false),
        );
        let movie = Movie::new(
            MovieId::new(Uuid::new_v4()),
            MovieTitle::new("king kong"),
            Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("action")),
            NumberInStock::new(stock),
            DailyRentalRate::new(5),
        );
        let mut con = db.transact().await?;
        db.customer_modifier().create(&mut con, &customer).await?;
        db.movie_modifier().create(&mut con, &movie).await?;
        con.commit().await?;
        Ok((customer, movie))
    }

    async fn stock_of(db: &InMemoryDatabase, id: &MovieId) -> error_stack::Result<i32, KernelError> {
        let mut con = db.transact().await?;
        let movie = db.movie_query().find_by_id(&mut con, id).await?;
        con.commit().await?;
        Ok(movie.map(|movie| *movie.number_in_stock().as_ref()).unwrap_or(-1))
    }

    async fn rental_count(db: &InMemoryDatabase) -> error_stack::Result<usize, KernelError> {
        let mut con = db.transact().await?;
        let rentals = db.rental_query().find_all(&mut con).await?;
        con.commit().await?;
        Ok(rentals.len())
    }

    /// Inserts an open rental that went out `days` ago without touching stock.
    async fn backdated_rental(
        db: &InMemoryDatabase,
        customer: &Customer,
        movie: &Movie,
        days: i64,
    ) -> error_stack::Result<Rental, KernelError> {
        let rental = Rental::open(
            RentalId::new(Uuid::new_v4()),
            customer,
            movie,
            DateOut::new(OffsetDateTime::now_utc() - Duration::days(days)),
        );
        let mut con = db.transact().await?;
        db.rental_modifier().create(&mut con, &rental).await?;
        con.commit().await?;
        Ok(rental)
    }

    fn create_dto(customer: &Customer, movie: &Movie) -> CreateRentalDto {
        CreateRentalDto {
            customer_id: *customer.id().as_ref(),
            movie_id: *movie.id().as_ref(),
        }
    }

    fn return_dto(customer: &Customer, movie: &Movie) -> ReturnRentalDto {
        ReturnRentalDto {
            customer_id: *customer.id().as_ref(),
            movie_id: *movie.id().as_ref(),
        }
    }

    fn kind(report: &Report<KernelError>) -> &KernelError {
        report.current_context()
    }

    #[tokio::test]
    async fn create_takes_one_copy() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;

        let rental = db.create_rental(create_dto(&customer, &movie)).await?;

        assert!(!rental.is_closed());
        assert_eq!(rental.customer().id(), customer.id());
        assert_eq!(rental.movie().id(), movie.id());
        let elapsed = OffsetDateTime::now_utc() - *rental.date_out().as_ref();
        assert!(elapsed < Duration::seconds(10));
        assert_eq!(stock_of(&db, movie.id()).await?, 1);

        let stored = db
            .get_rental(GetRentalDto {
                id: *rental.id().as_ref(),
            })
            .await?;
        assert_eq!(stored, Some(rental));
        Ok(())
    }

    #[tokio::test]
    async fn create_out_of_stock() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 0).await?;

        let error = db
            .create_rental(create_dto(&customer, &movie))
            .await
            .expect_err("movie is not in stock");

        assert_eq!(
            kind(&error),
            &KernelError::InvalidState(InvalidStateReason::MovieNotInStock)
        );
        assert!(kind(&error).is_business());
        assert_eq!(stock_of(&db, movie.id()).await?, 0);
        assert_eq!(rental_count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn create_with_unknown_movie() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;
        let unknown = Uuid::new_v4();

        let error = db
            .create_rental(CreateRentalDto {
                customer_id: *customer.id().as_ref(),
                movie_id: unknown,
            })
            .await
            .expect_err("movie does not exist");

        assert_eq!(
            kind(&error),
            &KernelError::reference_not_found(EntityKind::Movie, unknown)
        );
        assert_eq!(stock_of(&db, movie.id()).await?, 2);
        assert_eq!(rental_count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn create_with_unknown_customer() -> TestResult {
        let db = InMemoryDatabase::new();
        let (_, movie) = seed(&db, 2).await?;
        let unknown = Uuid::new_v4();

        let error = db
            .create_rental(CreateRentalDto {
                customer_id: unknown,
                movie_id: *movie.id().as_ref(),
            })
            .await
            .expect_err("customer does not exist");

        assert_eq!(
            kind(&error),
            &KernelError::reference_not_found(EntityKind::Customer, unknown)
        );
        assert_eq!(stock_of(&db, movie.id()).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn create_rolls_back_stock_when_rental_write_fails() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;
        db.inject_fault(InjectedFault::RentalCreate).await;

        let error = db
            .create_rental(create_dto(&customer, &movie))
            .await
            .expect_err("rental write fails");

        assert_eq!(kind(&error), &KernelError::TransactionFailure);
        assert!(!kind(&error).is_business());
        assert_eq!(stock_of(&db, movie.id()).await?, 2);
        assert_eq!(rental_count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn stock_never_goes_negative() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 3).await?;

        let mut failures = 0;
        for _ in 0..5 {
            match db.create_rental(create_dto(&customer, &movie)).await {
                Ok(_) => {}
                Err(error) => {
                    assert_eq!(
                        kind(&error),
                        &KernelError::InvalidState(InvalidStateReason::MovieNotInStock)
                    );
                    failures += 1;
                }
            }
            assert!(stock_of(&db, movie.id()).await? >= 0);
        }

        assert_eq!(failures, 2);
        assert_eq!(stock_of(&db, movie.id()).await?, 0);
        assert_eq!(rental_count(&db).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_share_the_last_copy() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 1).await?;

        let first = tokio::spawn({
            let db = db.clone();
            let dto = create_dto(&customer, &movie);
            async move { db.create_rental(dto).await }
        });
        let second = tokio::spawn({
            let db = db.clone();
            let dto = create_dto(&customer, &movie);
            async move { db.create_rental(dto).await }
        });
        let results = [
            first.await.expect("task panicked"),
            second.await.expect("task panicked"),
        ];

        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        let rejected = results
            .iter()
            .find_map(|result| result.as_ref().err())
            .expect("one request fails");
        assert_eq!(
            kind(rejected),
            &KernelError::InvalidState(InvalidStateReason::MovieNotInStock)
        );
        assert_eq!(stock_of(&db, movie.id()).await?, 0);
        assert_eq!(rental_count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn round_trip_after_five_days() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;

        db.create_rental(create_dto(&customer, &movie)).await?;
        assert_eq!(stock_of(&db, movie.id()).await?, 1);

        // Stands in for the copy taken above, rented five days earlier.
        let mut con = db.transact().await?;
        let open = db.rental_query().find_all(&mut con).await?;
        con.commit().await?;
        let backdated = Rental::new(
            open[0].id().clone(),
            open[0].customer().clone(),
            open[0].movie().clone(),
            DateOut::new(OffsetDateTime::now_utc() - Duration::days(5)),
            None,
            None,
        );
        db.replace_rental(backdated).await;

        let rental = db.return_rental(return_dto(&customer, &movie)).await?;

        assert!(rental.is_closed());
        assert_eq!(rental.rental_fee(), &Some(RentalFee::new(25)));
        assert_eq!(stock_of(&db, movie.id()).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn return_charges_elapsed_days() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;
        let rental = backdated_rental(&db, &customer, &movie, 5).await?;

        let returned = db.return_rental(return_dto(&customer, &movie)).await?;

        assert_eq!(returned.id(), rental.id());
        assert_eq!(returned.rental_fee(), &Some(RentalFee::new(25)));
        let returned_at = returned
            .date_returned()
            .as_ref()
            .map(|date| *date.as_ref())
            .expect("rental is closed");
        assert!(OffsetDateTime::now_utc() - returned_at < Duration::seconds(10));
        assert_eq!(stock_of(&db, movie.id()).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn return_without_rental() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;

        let error = db
            .return_rental(return_dto(&customer, &movie))
            .await
            .expect_err("nothing was rented");

        assert_eq!(kind(&error), &KernelError::NotFound(EntityKind::Rental));
        assert_eq!(stock_of(&db, movie.id()).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn second_return_is_rejected() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;
        db.create_rental(create_dto(&customer, &movie)).await?;

        let first = db.return_rental(return_dto(&customer, &movie)).await?;
        let error = db
            .return_rental(return_dto(&customer, &movie))
            .await
            .expect_err("already returned");

        assert_eq!(
            kind(&error),
            &KernelError::InvalidState(InvalidStateReason::ReturnAlreadyProcessed)
        );
        assert_eq!(stock_of(&db, movie.id()).await?, 2);
        let stored = db
            .get_rental(GetRentalDto {
                id: *first.id().as_ref(),
            })
            .await?;
        assert_eq!(stored, Some(first));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_returns_increment_once() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 1).await?;
        db.create_rental(create_dto(&customer, &movie)).await?;

        let first = tokio::spawn({
            let db = db.clone();
            let dto = return_dto(&customer, &movie);
            async move { db.return_rental(dto).await }
        });
        let second = tokio::spawn({
            let db = db.clone();
            let dto = return_dto(&customer, &movie);
            async move { db.return_rental(dto).await }
        });
        let results = [
            first.await.expect("task panicked"),
            second.await.expect("task panicked"),
        ];

        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        let rejected = results
            .iter()
            .find_map(|result| result.as_ref().err())
            .expect("one request fails");
        assert_eq!(
            kind(rejected),
            &KernelError::InvalidState(InvalidStateReason::ReturnAlreadyProcessed)
        );
        assert_eq!(stock_of(&db, movie.id()).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn return_rolls_back_when_stock_write_fails() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;
        let rental = backdated_rental(&db, &customer, &movie, 3).await?;
        db.inject_fault(InjectedFault::StockAdjustment).await;

        let error = db
            .return_rental(return_dto(&customer, &movie))
            .await
            .expect_err("stock write fails");

        assert_eq!(kind(&error), &KernelError::TransactionFailure);
        let stored = db
            .get_rental(GetRentalDto {
                id: *rental.id().as_ref(),
            })
            .await?;
        assert_eq!(stored, Some(rental));
        assert_eq!(stock_of(&db, movie.id()).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn return_rolls_back_when_rental_write_fails() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;
        let rental = backdated_rental(&db, &customer, &movie, 3).await?;
        db.inject_fault(InjectedFault::RentalUpdate).await;

        let error = db
            .return_rental(return_dto(&customer, &movie))
            .await
            .expect_err("rental write fails");

        assert_eq!(kind(&error), &KernelError::TransactionFailure);
        assert!(!kind(&error).is_business());
        let stored = db
            .get_rental(GetRentalDto {
                id: *rental.id().as_ref(),
            })
            .await?
            .expect("rental is kept");
        assert!(!stored.is_closed());
        assert!(stored.rental_fee().is_none());
        assert_eq!(stock_of(&db, movie.id()).await?, 2);

        let returned = db.return_rental(return_dto(&customer, &movie)).await?;
        assert_eq!(returned.id(), rental.id());
        assert_eq!(returned.rental_fee(), &Some(RentalFee::new(15)));
        assert_eq!(stock_of(&db, movie.id()).await?, 3);
        Ok(())
    }

    #[tokio::test]
    async fn return_prefers_oldest_open_rental() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;
        let older = backdated_rental(&db, &customer, &movie, 4).await?;
        let newer = backdated_rental(&db, &customer, &movie, 1).await?;

        let first = db.return_rental(return_dto(&customer, &movie)).await?;
        assert_eq!(first.id(), older.id());
        assert_eq!(first.rental_fee(), &Some(RentalFee::new(20)));

        let second = db.return_rental(return_dto(&customer, &movie)).await?;
        assert_eq!(second.id(), newer.id());
        assert_eq!(second.rental_fee(), &Some(RentalFee::new(5)));
        Ok(())
    }

    #[tokio::test]
    async fn snapshot_is_not_resynced() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 2).await?;
        let rental = db.create_rental(create_dto(&customer, &movie)).await?;

        let repriced = Movie::new(
            movie.id().clone(),
            MovieTitle::new("king kong (remastered)"),
            movie.genre().clone(),
            NumberInStock::new(1),
            DailyRentalRate::new(9),
        );
        db.replace_movie(repriced).await;

        let returned = db.return_rental(return_dto(&customer, &movie)).await?;
        assert_eq!(returned.movie(), rental.movie());
        assert_eq!(returned.movie().title(), &MovieTitle::new("king kong"));
        Ok(())
    }

    #[tokio::test]
    async fn lists_newest_rental_first() -> TestResult {
        let db = InMemoryDatabase::new();
        let (customer, movie) = seed(&db, 5).await?;
        let oldest = backdated_rental(&db, &customer, &movie, 3).await?;
        let newest = db.create_rental(create_dto(&customer, &movie)).await?;
        let middle = backdated_rental(&db, &customer, &movie, 1).await?;

        let rentals = db.get_all_rentals().await?;
        let ids = rentals.iter().map(Rental::id).collect::<Vec<_>>();
        assert_eq!(ids, vec![newest.id(), middle.id(), oldest.id()]);
        Ok(())
    }

    // Runs against a live database so that units of work really overlap.
    mod postgres {
        use uuid::Uuid;

        use driver::database::PostgresDatabase;
        use kernel::interface::database::{DatabaseConnection, Transaction};
        use kernel::interface::query::{DependOnMovieQuery, MovieQuery};
        use kernel::interface::update::{
            CustomerModifier, DependOnCustomerModifier, DependOnMovieModifier, MovieModifier,
        };
        use kernel::prelude::entity::{
            Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, Genre, GenreId,
            GenreName, IsGold, Movie, MovieId, MovieTitle, NumberInStock,
        };
        use kernel::{InvalidStateReason, KernelError};

        use crate::service::{CreateRentalService, ReturnRentalService};
        use crate::transfer::{CreateRentalDto, ReturnRentalDto};

        type TestResult = error_stack::Result<(), KernelError>;

        async fn seed(
            db: &PostgresDatabase,
            stock: i32,
        ) -> error_stack::Result<(Uuid, Uuid), KernelError> {
            let customer = Customer::new(
                CustomerId::new(Uuid::new_v4()),
                CustomerName::new("Mickey Mouse"),
                CustomerPhone::new("1234567891"),
                IsGold::new(false),
            );
            let movie = Movie::new(
                MovieId::new(Uuid::new_v4()),
                MovieTitle::new("king kong"),
                Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("action")),
                NumberInStock::new(stock),
                DailyRentalRate::new(5),
            );
            let mut con = db.transact().await?;
            db.customer_modifier().create(&mut con, &customer).await?;
            db.movie_modifier().create(&mut con, &movie).await?;
            con.commit().await?;
            Ok((*customer.id().as_ref(), *movie.id().as_ref()))
        }

        async fn stock_of(db: &PostgresDatabase, id: Uuid) -> error_stack::Result<i32, KernelError> {
            let mut con = db.transact().await?;
            let movie = db.movie_query().find_by_id(&mut con, &MovieId::new(id)).await?;
            con.commit().await?;
            Ok(movie.map(|movie| *movie.number_in_stock().as_ref()).unwrap_or(-1))
        }

        #[test_with::env(POSTGRES_TEST)]
        #[tokio::test]
        async fn concurrent_creates_share_the_last_copy() -> TestResult {
            let db = PostgresDatabase::new().await?;
            let (customer_id, movie_id) = seed(&db, 1).await?;

            let tasks = (0..2)
                .map(|_| {
                    let db = db.clone();
                    tokio::spawn(async move {
                        db.create_rental(CreateRentalDto {
                            customer_id,
                            movie_id,
                        })
                        .await
                    })
                })
                .collect::<Vec<_>>();
            let mut results = Vec::new();
            for task in tasks {
                results.push(task.await.expect("task panicked"));
            }

            assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
            let rejected = results
                .iter()
                .find_map(|result| result.as_ref().err())
                .expect("one request fails");
            assert_eq!(
                rejected.current_context(),
                &KernelError::InvalidState(InvalidStateReason::MovieNotInStock)
            );
            assert_eq!(stock_of(&db, movie_id).await?, 0);
            Ok(())
        }

        #[test_with::env(POSTGRES_TEST)]
        #[tokio::test]
        async fn concurrent_returns_increment_once() -> TestResult {
            let db = PostgresDatabase::new().await?;
            let (customer_id, movie_id) = seed(&db, 1).await?;
            db.create_rental(CreateRentalDto {
                customer_id,
                movie_id,
            })
            .await?;

            let tasks = (0..2)
                .map(|_| {
                    let db = db.clone();
                    tokio::spawn(async move {
                        db.return_rental(ReturnRentalDto {
                            customer_id,
                            movie_id,
                        })
                        .await
                    })
                })
                .collect::<Vec<_>>();
            let mut results = Vec::new();
            for task in tasks {
                results.push(task.await.expect("task panicked"));
            }

            assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
            let rejected = results
                .iter()
                .find_map(|result| result.as_ref().err())
                .expect("one request fails");
            assert_eq!(
                rejected.current_context(),
                &KernelError::InvalidState(InvalidStateReason::ReturnAlreadyProcessed)
            );
            assert_eq!(stock_of(&db, movie_id).await?, 1);
            Ok(())
        }
    }
}
