use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ReturnRentalDto {
    pub customer_id: Uuid,
    pub movie_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetRentalDto {
    pub id: Uuid,
}
