mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::movie::response::Presenter;
use application::service::GetMovieService;
use axum::extract::State;
use axum::routing::get;
use axum::Router;

pub trait MovieRouter {
    fn route_movie(self) -> Self;
}

impl MovieRouter for Router<AppModule> {
    fn route_movie(self) -> Self {
        self.route(
            "/movies",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| module.database().get_all_movies())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
