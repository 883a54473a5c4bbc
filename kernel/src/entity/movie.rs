mod daily_rental_rate;
mod id;
mod stock;
mod title;

pub use self::{daily_rental_rate::*, id::*, stock::*, title::*};
use crate::entity::Genre;
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct Movie {
    id: MovieId,
    title: MovieTitle,
    genre: Genre,
    number_in_stock: NumberInStock,
    daily_rental_rate: DailyRentalRate,
}

impl Movie {
    pub fn new(
        id: MovieId,
        title: MovieTitle,
        genre: Genre,
        number_in_stock: NumberInStock,
        daily_rental_rate: DailyRentalRate,
    ) -> Self {
        Self {
            id,
            title,
            genre,
            number_in_stock,
            daily_rental_rate,
        }
    }

    pub fn in_stock(&self) -> bool {
        !self.number_in_stock.is_empty()
    }
}
