mod date;
mod fee;
mod id;
mod snapshot;

pub use self::{date::*, fee::*, id::*, snapshot::*};
use crate::entity::{Customer, Movie};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// A rental record. Open while `date_returned` is absent, closed once a return
/// has been processed. The customer and movie are copies taken when the rental
/// was opened.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Rental {
    id: RentalId,
    customer: CustomerSnapshot,
    movie: MovieSnapshot,
    date_out: DateOut,
    date_returned: Option<DateReturned>,
    rental_fee: Option<RentalFee>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        customer: CustomerSnapshot,
        movie: MovieSnapshot,
        date_out: DateOut,
        date_returned: Option<DateReturned>,
        rental_fee: Option<RentalFee>,
    ) -> Self {
        Self {
            id,
            customer,
            movie,
            date_out,
            date_returned,
            rental_fee,
        }
    }

    pub fn open(id: RentalId, customer: &Customer, movie: &Movie, date_out: DateOut) -> Self {
        Self::new(
            id,
            CustomerSnapshot::from(customer),
            MovieSnapshot::from(movie),
            date_out,
            None,
            None,
        )
    }

    pub fn is_closed(&self) -> bool {
        self.date_returned.is_some()
    }

    /// Closes the rental at `returned`, charging the snapshot's daily rate.
    pub fn close(self, returned: DateReturned) -> Self {
        let fee = RentalFee::calculate(&self.date_out, &returned, self.movie.daily_rental_rate());
        self.reconstruct(|rental| {
            rental.date_returned = Some(returned);
            rental.rental_fee = Some(fee);
        })
    }
}
