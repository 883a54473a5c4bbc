use axum::routing::get;
use axum::Router;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

pub use self::{customer::*, genre::*, movie::*, rental::*};

mod customer;
mod genre;
mod movie;
mod rental;

pub trait RootRouter {
    fn route_root(self) -> Self;
}

impl RootRouter for Router<AppModule> {
    fn route_root(self) -> Self {
        self.route("/", get(|| async { "Welcome to Movie Rental API." }))
    }
}

pub async fn route_not_found() -> ErrorStatus {
    ErrorStatus::RouteNotFound
}
