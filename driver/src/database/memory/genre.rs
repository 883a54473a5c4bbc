use kernel::interface::query::GenreQuery;
use kernel::interface::update::GenreModifier;
use kernel::prelude::entity::Genre;
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryGenreRepository;

#[async_trait::async_trait]
impl GenreQuery for InMemoryGenreRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Genre>, KernelError> {
        let mut genres = con.tables().genres.values().cloned().collect::<Vec<_>>();
        genres.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(genres)
    }
}

#[async_trait::async_trait]
impl GenreModifier for InMemoryGenreRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        genre: &Genre,
    ) -> error_stack::Result<(), KernelError> {
        con.tables_mut()
            .genres
            .insert(genre.id().clone(), genre.clone());
        Ok(())
    }
}
