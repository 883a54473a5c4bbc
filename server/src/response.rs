use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Success envelope wrapping a route's payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Success<T> {
    status: &'static str,
    #[serde(skip)]
    code: StatusCode,
    status_code: u16,
    data: T,
}

impl<T> Success<T> {
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    pub fn created(self) -> Self {
        Self::with_status(StatusCode::CREATED, self.data)
    }

    fn with_status(code: StatusCode, data: T) -> Self {
        Self {
            status: "success",
            code,
            status_code: code.as_u16(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> axum::response::Response {
        (self.code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::{json, Value};

    use crate::response::Success;

    #[tokio::test]
    async fn created_envelope() {
        let response = Success::ok(vec!["king kong"]).created().into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({ "status": "success", "statusCode": 201, "data": ["king kong"] })
        );
    }
}
