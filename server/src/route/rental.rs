mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::rental::request::{CreateRequest, GetRequest, ReturnRequest, Transformer};
use crate::route::rental::response::Presenter;
use application::service::{CreateRentalService, GetRentalService, ReturnRentalService};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| module.database().get_all_rentals())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>,
                 req: Result<Json<CreateRequest>, JsonRejection>| async move {
                    let Json(req) = req?;
                    let response = Controller::new(Transformer, Presenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().create_rental(dto).await })
                        .await?;
                    Ok::<_, ErrorStatus>(response.created())
                },
            ),
        )
        .route(
            "/rentals/:id",
            get(
                |State(module): State<AppModule>,
                 id: Result<Path<Uuid>, PathRejection>| async move {
                    let Path(id) = id?;
                    let response = Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .try_handle(|dto| async move { module.database().get_rental(dto).await })
                        .await?;
                    Ok::<_, ErrorStatus>(response)
                },
            ),
        )
        .route(
            "/returns",
            post(
                |State(module): State<AppModule>,
                 req: Result<Json<ReturnRequest>, JsonRejection>| async move {
                    let Json(req) = req?;
                    let response = Controller::new(Transformer, Presenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().return_rental(dto).await })
                        .await?;
                    Ok::<_, ErrorStatus>(response)
                },
            ),
        )
    }
}
