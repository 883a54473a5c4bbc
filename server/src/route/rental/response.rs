use error_stack::Report;
use kernel::prelude::entity::{
    CustomerId, CustomerName, CustomerPhone, CustomerSnapshot, DailyRentalRate,
    DestructCustomerSnapshot, DestructMovieSnapshot, DestructRental, IsGold, MovieId,
    MovieSnapshot, MovieTitle, Rental, RentalId,
};
use kernel::{EntityKind, KernelError};
use serde::Serialize;
use time::OffsetDateTime;

use crate::controller::{Exhaust, TryExhaust};
use crate::error::ErrorStatus;
use crate::response::Success;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    id: RentalId,
    customer: CustomerSnapshotResponse,
    movie: MovieSnapshotResponse,
    #[serde(with = "time::serde::rfc3339")]
    date_out: OffsetDateTime,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    date_returned: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rental_fee: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshotResponse {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
    is_gold: IsGold,
}

impl From<CustomerSnapshot> for CustomerSnapshotResponse {
    fn from(customer: CustomerSnapshot) -> Self {
        let DestructCustomerSnapshot {
            id,
            name,
            phone,
            is_gold,
        } = customer.into_destruct();
        Self {
            id,
            name,
            phone,
            is_gold,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSnapshotResponse {
    id: MovieId,
    title: MovieTitle,
    daily_rental_rate: DailyRentalRate,
}

impl From<MovieSnapshot> for MovieSnapshotResponse {
    fn from(movie: MovieSnapshot) -> Self {
        let DestructMovieSnapshot {
            id,
            title,
            daily_rental_rate,
        } = movie.into_destruct();
        Self {
            id,
            title,
            daily_rental_rate,
        }
    }
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        let DestructRental {
            id,
            customer,
            movie,
            date_out,
            date_returned,
            rental_fee,
        } = rental.into_destruct();
        Self {
            id,
            customer: customer.into(),
            movie: movie.into(),
            date_out: *date_out.as_ref(),
            date_returned: date_returned.map(|date| *date.as_ref()),
            rental_fee: rental_fee.map(|fee| *fee.as_ref()),
        }
    }
}

pub struct Presenter;

impl Exhaust<Rental> for Presenter {
    type To = Success<RentalResponse>;
    fn emit(&self, output: Rental) -> Self::To {
        Success::ok(output.into())
    }
}

impl Exhaust<Vec<Rental>> for Presenter {
    type To = Success<Vec<RentalResponse>>;
    fn emit(&self, output: Vec<Rental>) -> Self::To {
        Success::ok(output.into_iter().map(RentalResponse::from).collect())
    }
}

impl TryExhaust<Option<Rental>> for Presenter {
    type To = Success<RentalResponse>;
    type Error = ErrorStatus;
    fn emit(&self, output: Option<Rental>) -> Result<Self::To, Self::Error> {
        let rental = output
            .ok_or_else(|| Report::new(KernelError::NotFound(EntityKind::Rental)))?;
        Ok(Success::ok(rental.into()))
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::prelude::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, DailyRentalRate, DateOut,
        DateReturned, Genre, GenreId, GenreName, IsGold, Movie, MovieId, MovieTitle,
        NumberInStock, Rental, RentalId,
    };

    use crate::route::rental::response::RentalResponse;

    fn rental() -> Rental {
        let customer = Customer::new(
            CustomerId::new(Uuid::nil()),
            CustomerName::new("Mickey Mouse"),
            CustomerPhone::new("1234567891"),
            IsGold::new(true),
        );
        let movie = Movie::new(
            MovieId::new(Uuid::nil()),
            MovieTitle::new("king kong"),
            Genre::new(GenreId::new(Uuid::nil()), GenreName::new("action")),
            NumberInStock::new(2),
            DailyRentalRate::new(5),
        );
        Rental::open(
            RentalId::new(Uuid::nil()),
            &customer,
            &movie,
            DateOut::new(datetime!(2024-03-01 10:00 UTC)),
        )
    }

    #[test]
    fn open_rental_omits_return_fields() {
        let json = serde_json::to_value(RentalResponse::from(rental())).unwrap();
        assert_eq!(json["dateOut"], "2024-03-01T10:00:00Z");
        assert_eq!(json["customer"]["isGold"], true);
        assert_eq!(json["movie"]["dailyRentalRate"], 5);
        assert!(json.get("dateReturned").is_none());
        assert!(json.get("rentalFee").is_none());
    }

    #[test]
    fn closed_rental() {
        let closed = rental().close(DateReturned::new(datetime!(2024-03-06 12:00 UTC)));
        let json = serde_json::to_value(RentalResponse::from(closed)).unwrap();
        assert_eq!(json["dateReturned"], "2024-03-06T12:00:00Z");
        assert_eq!(json["rentalFee"], 25);
    }
}
