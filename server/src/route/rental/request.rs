use application::transfer::{CreateRentalDto, GetRentalDto, ReturnRentalDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::{Intake, TryIntake};
use crate::error::ErrorStatus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    customer_id: String,
    movie_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    customer_id: String,
    movie_id: String,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl TryIntake<CreateRequest> for Transformer {
    type To = CreateRentalDto;
    type Error = ErrorStatus;
    fn emit(&self, input: CreateRequest) -> Result<Self::To, Self::Error> {
        Ok(CreateRentalDto {
            customer_id: parse_id("customerId", &input.customer_id)?,
            movie_id: parse_id("movieId", &input.movie_id)?,
        })
    }
}

impl TryIntake<ReturnRequest> for Transformer {
    type To = ReturnRentalDto;
    type Error = ErrorStatus;
    fn emit(&self, input: ReturnRequest) -> Result<Self::To, Self::Error> {
        Ok(ReturnRentalDto {
            customer_id: parse_id("customerId", &input.customer_id)?,
            movie_id: parse_id("movieId", &input.movie_id)?,
        })
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetRentalDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetRentalDto { id: input.id }
    }
}

fn parse_id(field: &str, value: &str) -> Result<Uuid, ErrorStatus> {
    Uuid::parse_str(value)
        .map_err(|_| ErrorStatus::Malformed(format!("\"{field}\" must be a valid id")))
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::controller::TryIntake;
    use crate::error::ErrorStatus;
    use crate::route::rental::request::{CreateRequest, ReturnRequest, Transformer};

    #[test]
    fn reads_camel_case_ids() {
        let customer_id = Uuid::new_v4();
        let movie_id = Uuid::new_v4();
        let req: CreateRequest = serde_json::from_value(serde_json::json!({
            "customerId": customer_id.to_string(),
            "movieId": movie_id.to_string(),
        }))
        .unwrap();
        let dto = TryIntake::emit(&Transformer, req).unwrap();
        assert_eq!(dto.customer_id, customer_id);
        assert_eq!(dto.movie_id, movie_id);
    }

    #[test]
    fn rejects_malformed_id() {
        let req: ReturnRequest = serde_json::from_value(serde_json::json!({
            "customerId": Uuid::new_v4().to_string(),
            "movieId": "1234",
        }))
        .unwrap();
        let error = TryIntake::emit(&Transformer, req).unwrap_err();
        assert!(
            matches!(error, ErrorStatus::Malformed(details) if details == "\"movieId\" must be a valid id")
        );
    }

    #[test]
    fn missing_field() {
        let req = serde_json::from_value::<CreateRequest>(serde_json::json!({
            "customerId": Uuid::new_v4().to_string(),
        }));
        assert!(req.is_err());
    }
}
