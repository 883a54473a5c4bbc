use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{DependOnGenreQuery, GenreQuery};
use kernel::interface::update::{
    CustomerModifier, DependOnCustomerModifier, DependOnGenreModifier, DependOnMovieModifier,
    GenreModifier, MovieModifier,
};
use kernel::prelude::entity::{
    Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, Genre, GenreId, GenreName,
    IsGold, Movie, MovieId, MovieTitle, NumberInStock,
};
use kernel::KernelError;

use crate::service::settle;

// genre, [(title, number in stock, daily rental rate)]
const CATALOG: [(&str, [(&str, i32, i32); 3]); 4] = [
    (
        "Comedy",
        [("Superbad", 5, 2), ("Anchorman", 10, 2), ("Bridesmaids", 15, 2)],
    ),
    (
        "Action",
        [
            ("Inception", 5, 2),
            ("Mad Max: Fury Road", 10, 2),
            ("The Dark Knight", 15, 2),
        ],
    ),
    (
        "Romance",
        [
            ("La La Land", 5, 2),
            ("500 Days of Summer", 10, 2),
            ("Eternal Sunshine of the Spotless Mind", 15, 2),
        ],
    ),
    (
        "Thriller",
        [
            ("Shutter Island", 5, 2),
            ("Se7en", 10, 2),
            ("The Silence of the Lambs", 15, 2),
        ],
    ),
];

// name, phone, gold member
const CUSTOMERS: [(&str, &str, bool); 2] = [
    ("Mickey Mouse", "1234567891", false),
    ("Minnie Mouse", "1234567892", true),
];

#[async_trait::async_trait]
pub trait SeedCatalogService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnGenreQuery
    + DependOnGenreModifier
    + DependOnMovieModifier
    + DependOnCustomerModifier
{
    /// Loads the starter genres, movies and customers in one unit of work.
    /// Yields `false` without writing anything when genres already exist.
    async fn seed_catalog(&self) -> error_stack::Result<bool, KernelError> {
        let mut transaction = self.database_connection().transact().await?;

        let result = async {
            let existing = self.genre_query().find_all(&mut transaction).await?;
            if !existing.is_empty() {
                return Ok(false);
            }

            for (name, movies) in CATALOG {
                let genre = Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new(name));
                self.genre_modifier()
                    .create(&mut transaction, &genre)
                    .await?;
                for (title, stock, rate) in movies {
                    let movie = Movie::new(
                        MovieId::new(Uuid::new_v4()),
                        MovieTitle::new(title),
                        genre.clone(),
                        NumberInStock::new(stock),
                        DailyRentalRate::new(rate),
                    );
                    self.movie_modifier()
                        .create(&mut transaction, &movie)
                        .await?;
                }
            }

            for (name, phone, is_gold) in CUSTOMERS {
                let customer = Customer::new(
                    CustomerId::new(Uuid::new_v4()),
                    CustomerName::new(name),
                    CustomerPhone::new(phone),
                    IsGold::new(is_gold),
                );
                self.customer_modifier()
                    .create(&mut transaction, &customer)
                    .await?;
            }
            Ok::<_, Report<KernelError>>(true)
        }
        .await;

        let seeded = settle(transaction, result).await?;
        if seeded {
            tracing::info!(
                "Seeded {} genres, {} movies and {} customers",
                CATALOG.len(),
                CATALOG.len() * 3,
                CUSTOMERS.len()
            );
        } else {
            tracing::info!("Genres already present, skipped seeding");
        }
        Ok(seeded)
    }
}

impl<T> SeedCatalogService for T where
    T: DependOnDatabaseConnection
        + DependOnGenreQuery
        + DependOnGenreModifier
        + DependOnMovieModifier
        + DependOnCustomerModifier
{
}
