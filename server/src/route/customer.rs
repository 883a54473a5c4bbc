mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::customer::response::Presenter;
use application::service::GetCustomerService;
use axum::extract::State;
use axum::routing::get;
use axum::Router;

pub trait CustomerRouter {
    fn route_customer(self) -> Self;
}

impl CustomerRouter for Router<AppModule> {
    fn route_customer(self) -> Self {
        self.route(
            "/customers",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| module.database().get_all_customers())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
