use kernel::prelude::entity::{
    DailyRentalRate, DestructGenre, DestructMovie, GenreId, GenreName, Movie, MovieId, MovieTitle,
    NumberInStock,
};
use serde::Serialize;

use crate::controller::Exhaust;
use crate::response::Success;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    id: MovieId,
    title: MovieTitle,
    genre: GenreResponse,
    number_in_stock: NumberInStock,
    daily_rental_rate: DailyRentalRate,
}

#[derive(Debug, Serialize)]
pub struct GenreResponse {
    id: GenreId,
    name: GenreName,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        let DestructMovie {
            id,
            title,
            genre,
            number_in_stock,
            daily_rental_rate,
        } = movie.into_destruct();
        let DestructGenre {
            id: genre_id,
            name: genre_name,
        } = genre.into_destruct();
        Self {
            id,
            title,
            genre: GenreResponse {
                id: genre_id,
                name: genre_name,
            },
            number_in_stock,
            daily_rental_rate,
        }
    }
}

pub struct Presenter;

impl Exhaust<Vec<Movie>> for Presenter {
    type To = Success<Vec<MovieResponse>>;
    fn emit(&self, output: Vec<Movie>) -> Self::To {
        Success::ok(output.into_iter().map(MovieResponse::from).collect())
    }
}
