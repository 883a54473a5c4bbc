use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnCustomerQuery, DependOnGenreQuery, DependOnMovieQuery, DependOnRentalQuery,
};
use kernel::interface::update::{
    DependOnCustomerModifier, DependOnGenreModifier, DependOnMovieModifier,
    DependOnRentalModifier,
};
use kernel::prelude::entity::{
    Customer, CustomerId, Genre, GenreId, Movie, MovieId, Rental, RentalId,
};
use kernel::KernelError;

pub use self::{customer::*, genre::*, movie::*, rental::*};

mod customer;
mod genre;
mod movie;
mod rental;

/// Write that fails once when it is next attempted.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum InjectedFault {
    RentalCreate,
    RentalUpdate,
    StockAdjustment,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    customers: HashMap<CustomerId, Customer>,
    genres: HashMap<GenreId, Genre>,
    movies: HashMap<MovieId, Movie>,
    rentals: HashMap<RentalId, Rental>,
}

#[derive(Debug, Default)]
struct Store {
    tables: Tables,
    faults: HashSet<InjectedFault>,
}

/// Process-local store. Units of work run one at a time; each one holds the
/// store until it commits or rolls back.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<Store>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn inject_fault(&self, fault: InjectedFault) {
        self.store.lock().await.faults.insert(fault);
    }

    /// Overwrites a rental outside of any workflow.
    pub async fn replace_rental(&self, rental: Rental) {
        let mut store = self.store.lock().await;
        store.tables.rentals.insert(rental.id().clone(), rental);
    }

    /// Overwrites a movie outside of any workflow.
    pub async fn replace_movie(&self, movie: Movie) {
        let mut store = self.store.lock().await;
        store.tables.movies.insert(movie.id().clone(), movie);
    }
}

pub struct InMemoryTransaction {
    store: OwnedMutexGuard<Store>,
    // Present until commit. Restored when the transaction ends any other way.
    snapshot: Option<Tables>,
}

impl InMemoryTransaction {
    fn tables(&self) -> &Tables {
        &self.store.tables
    }

    fn tables_mut(&mut self) -> &mut Tables {
        &mut self.store.tables
    }

    fn trip(&mut self, fault: InjectedFault) -> error_stack::Result<(), KernelError> {
        if self.store.faults.remove(&fault) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Injected fault: {fault:?}")));
        }
        Ok(())
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.store.tables = snapshot;
        }
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        self.snapshot = None;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let store = self.store.clone().lock_owned().await;
        let snapshot = Some(store.tables.clone());
        Ok(InMemoryTransaction { store, snapshot })
    }
}

impl DependOnCustomerQuery for InMemoryDatabase {
    type CustomerQuery = InMemoryCustomerRepository;
    fn customer_query(&self) -> &Self::CustomerQuery {
        &InMemoryCustomerRepository
    }
}

impl DependOnCustomerModifier for InMemoryDatabase {
    type CustomerModifier = InMemoryCustomerRepository;
    fn customer_modifier(&self) -> &Self::CustomerModifier {
        &InMemoryCustomerRepository
    }
}

impl DependOnGenreQuery for InMemoryDatabase {
    type GenreQuery = InMemoryGenreRepository;
    fn genre_query(&self) -> &Self::GenreQuery {
        &InMemoryGenreRepository
    }
}

impl DependOnGenreModifier for InMemoryDatabase {
    type GenreModifier = InMemoryGenreRepository;
    fn genre_modifier(&self) -> &Self::GenreModifier {
        &InMemoryGenreRepository
    }
}

impl DependOnMovieQuery for InMemoryDatabase {
    type MovieQuery = InMemoryMovieRepository;
    fn movie_query(&self) -> &Self::MovieQuery {
        &InMemoryMovieRepository
    }
}

impl DependOnMovieModifier for InMemoryDatabase {
    type MovieModifier = InMemoryMovieRepository;
    fn movie_modifier(&self) -> &Self::MovieModifier {
        &InMemoryMovieRepository
    }
}

impl DependOnRentalQuery for InMemoryDatabase {
    type RentalQuery = InMemoryRentalRepository;
    fn rental_query(&self) -> &Self::RentalQuery {
        &InMemoryRentalRepository
    }
}

impl DependOnRentalModifier for InMemoryDatabase {
    type RentalModifier = InMemoryRentalRepository;
    fn rental_modifier(&self) -> &Self::RentalModifier {
        &InMemoryRentalRepository
    }
}
