use std::process::{ExitCode, Termination};

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Failure of a request, rendered as an error envelope.
#[derive(Debug)]
pub enum ErrorStatus {
    Kernel(Report<KernelError>),
    /// The request could not be read into the shape a route expects.
    Malformed(String),
    RouteNotFound,
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus::Kernel(e)
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        ErrorStatus::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for ErrorStatus {
    fn from(rejection: PathRejection) -> Self {
        ErrorStatus::Malformed(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status: &'static str,
    status_code: u16,
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: &'static str,
    details: String,
}

const BAD_REQUEST: (StatusCode, &str, &str) =
    (StatusCode::BAD_REQUEST, "BAD_REQUEST", "Invalid input data");
const NOT_FOUND: (StatusCode, &str, &str) = (
    StatusCode::NOT_FOUND,
    "RESOURCE_NOT_FOUND",
    "Resource not found",
);

impl ErrorStatus {
    fn classify(&self) -> (StatusCode, &'static str, &'static str) {
        let report = match self {
            ErrorStatus::Kernel(report) => report,
            ErrorStatus::Malformed(_) => return BAD_REQUEST,
            ErrorStatus::RouteNotFound => return NOT_FOUND,
        };
        match report.current_context() {
            KernelError::ReferenceNotFound { .. } | KernelError::InvalidState(_) => BAD_REQUEST,
            KernelError::NotFound(_) => NOT_FOUND,
            KernelError::Concurrency => (
                StatusCode::CONFLICT,
                "CONFLICT",
                "Request conflicts with a concurrent update",
            ),
            KernelError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "Request timed out",
            ),
            KernelError::TransactionFailure | KernelError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "Something went wrong!",
            ),
        }
    }

    fn details(&self) -> String {
        match self {
            ErrorStatus::Kernel(report) => report.current_context().to_string(),
            ErrorStatus::Malformed(details) => details.clone(),
            ErrorStatus::RouteNotFound => "Route does not exist".to_string(),
        }
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = self.classify();
        match &self {
            ErrorStatus::Kernel(report) if status.is_server_error() => {
                tracing::error!("{report:?}")
            }
            ErrorStatus::Kernel(report) => tracing::debug!("{report:?}"),
            ErrorStatus::Malformed(details) => tracing::debug!("Malformed request: {details}"),
            ErrorStatus::RouteNotFound => {}
        }
        let body = ErrorBody {
            status: "error",
            status_code: status.as_u16(),
            error: ErrorDetail {
                code,
                message,
                details: self.details(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::{EntityKind, InvalidStateReason, KernelError};
    use serde_json::{json, Value};

    use crate::error::ErrorStatus;

    async fn render(error: ErrorStatus) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn kernel(error: KernelError) -> ErrorStatus {
        ErrorStatus::from(Report::new(error))
    }

    #[tokio::test]
    async fn business_errors_are_bad_requests() {
        let (status, body) = render(kernel(KernelError::InvalidState(
            InvalidStateReason::MovieNotInStock,
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "status": "error",
                "statusCode": 400,
                "error": {
                    "code": "BAD_REQUEST",
                    "message": "Invalid input data",
                    "details": "movie not in stock"
                }
            })
        );

        let (status, body) = render(kernel(KernelError::reference_not_found(
            EntityKind::Customer,
            "42",
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"], "Invalid customerId = 42");
    }

    #[tokio::test]
    async fn missing_rental_is_not_found() {
        let (status, body) = render(kernel(KernelError::NotFound(EntityKind::Rental))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
        assert_eq!(body["error"]["details"], "rental not found");
    }

    #[tokio::test]
    async fn store_errors() {
        let cases = [
            (KernelError::Concurrency, StatusCode::CONFLICT),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (
                KernelError::TransactionFailure,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            let (status, body) = render(kernel(error)).await;
            assert_eq!(status, expected);
            assert_eq!(body["statusCode"], expected.as_u16());
        }
    }

    #[tokio::test]
    async fn unknown_route() {
        let (status, body) = render(ErrorStatus::RouteNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["details"], "Route does not exist");
    }
}
