use kernel::prelude::entity::{DestructGenre, Genre, GenreId, GenreName};
use serde::Serialize;

use crate::controller::Exhaust;
use crate::response::Success;

#[derive(Debug, Serialize)]
pub struct GenreResponse {
    id: GenreId,
    name: GenreName,
}

impl From<Genre> for GenreResponse {
    fn from(genre: Genre) -> Self {
        let DestructGenre { id, name } = genre.into_destruct();
        Self { id, name }
    }
}

pub struct Presenter;

impl Exhaust<Vec<Genre>> for Presenter {
    type To = Success<Vec<GenreResponse>>;
    fn emit(&self, output: Vec<Genre>) -> Self::To {
        Success::ok(output.into_iter().map(GenreResponse::from).collect())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::prelude::entity::{Genre, GenreId, GenreName};

    use crate::controller::Exhaust;
    use crate::route::genre::response::Presenter;

    #[test]
    fn lists_genres_in_order() {
        let genres = vec![
            Genre::new(GenreId::new(Uuid::nil()), GenreName::new("Action")),
            Genre::new(GenreId::new(Uuid::new_v4()), GenreName::new("Comedy")),
        ];
        let json = serde_json::to_value(Presenter.emit(genres)).unwrap();
        let names = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|genre| genre["name"].as_str().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Action", "Comedy"]);
    }
}
