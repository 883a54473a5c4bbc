mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::genre::response::Presenter;
use application::service::GetGenreService;
use axum::extract::State;
use axum::routing::get;
use axum::Router;

pub trait GenreRouter {
    fn route_genre(self) -> Self;
}

impl GenreRouter for Router<AppModule> {
    fn route_genre(self) -> Self {
        self.route(
            "/genres",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| module.database().get_all_genres())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
