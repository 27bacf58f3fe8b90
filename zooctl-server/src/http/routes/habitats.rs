//! Habitat endpoints, including the habitat/animal association

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use super::Saved;
use crate::http::error::ApiError;
use crate::http::extractors::{parse_id, JsonBody, QueryParams};
use crate::http::server::AppState;
use crate::models::{
    Habitat, HabitatAnimalRow, HabitatUpdate, NewHabitat, UpperText, ValidationError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitatRequest {
    #[serde(alias = "nomeHabitat")]
    pub habitat_name: Option<String>,
}

impl HabitatRequest {
    fn name(&self) -> Result<UpperText, ValidationError> {
        let raw = self
            .habitat_name
            .as_deref()
            .ok_or(ValidationError::Missing { field: "habitatName" })?;
        UpperText::new("habitatName", raw)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAnimalRequest {
    #[serde(alias = "idHabitat")]
    pub habitat_id: Option<i32>,
    #[serde(alias = "idAnimal")]
    pub animal_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitatIdQuery {
    #[serde(alias = "idHabitat")]
    pub habitat_id: Option<String>,
}

impl HabitatIdQuery {
    fn id(&self) -> Result<i32, ValidationError> {
        parse_id("habitatId", self.habitat_id.as_deref())
    }
}

/// GET /habitats
async fn list_habitats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Habitat>>, ApiError> {
    Ok(Json(state.habitats.list().await?))
}

/// POST /novo/habitat
async fn create_habitat(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<HabitatRequest>,
) -> Result<Json<Saved<Habitat>>, ApiError> {
    let name = req.name()?;
    let created = state.habitats.create(NewHabitat { name }).await?;

    tracing::info!(id = created.id, "habitat registered");
    Ok(Json(Saved::with("Habitat cadastrado com sucesso", created)))
}

/// DELETE /remover/habitat?habitatId=
async fn delete_habitat(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<HabitatIdQuery>,
) -> Result<Json<Saved<()>>, ApiError> {
    let id = query.id()?;
    state.habitats.delete(id).await?;

    tracing::info!(id, "habitat removed");
    Ok(Json(Saved::message("Habitat foi removido com sucesso")))
}

/// PUT /atualizar/habitat?habitatId=
async fn update_habitat(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<HabitatIdQuery>,
    JsonBody(req): JsonBody<HabitatRequest>,
) -> Result<Json<Saved<Habitat>>, ApiError> {
    let id = query.id()?;
    let name = req.name()?;
    let updated = state.habitats.update(id, HabitatUpdate { name }).await?;

    Ok(Json(Saved::with("Habitat foi atualizado com sucesso", updated)))
}

/// GET /habitat/animais?habitatId=
async fn habitat_animals(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<HabitatIdQuery>,
) -> Result<Json<Vec<HabitatAnimalRow>>, ApiError> {
    let id = query.id()?;
    Ok(Json(state.habitats.animals(id).await?))
}

/// POST /habitat/animal
async fn link_animal(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LinkAnimalRequest>,
) -> Result<Json<Saved<()>>, ApiError> {
    let habitat_id = req
        .habitat_id
        .ok_or(ValidationError::Missing { field: "habitatId" })?;
    let animal_id = req
        .animal_id
        .ok_or(ValidationError::Missing { field: "animalId" })?;
    state.habitats.add_animal(habitat_id, animal_id).await?;

    tracing::info!(habitat_id, animal_id, "animal placed in habitat");
    Ok(Json(Saved::message("Animal adicionado ao habitat com sucesso")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/habitats", get(list_habitats))
        .route("/novo/habitat", post(create_habitat))
        .route("/remover/habitat", delete(delete_habitat))
        .route("/atualizar/habitat", put(update_habitat))
        .route("/habitat/animais", get(habitat_animals))
        .route("/habitat/animal", post(link_animal))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::http::routes::testing::{app, send};

    #[tokio::test]
    async fn create_update_list_delete() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/novo/habitat",
            Some(json!({ "nomeHabitat": "savana" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({ "id": 1, "name": "SAVANA" }));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/atualizar/habitat?habitatId=1",
            Some(json!({ "habitatName": "Savana Africana" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "SAVANA AFRICANA");

        let (_, list) = send(&app, Method::GET, "/habitats", None).await;
        assert_eq!(list, json!([{ "id": 1, "name": "SAVANA AFRICANA" }]));

        let (status, _) = send(&app, Method::DELETE, "/remover/habitat?habitatId=1", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, "/remover/habitat?habitatId=1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_unknown_habitat_is_not_found() {
        let (status, _) = send(
            &app(),
            Method::PUT,
            "/atualizar/habitat?habitatId=3",
            Some(json!({ "habitatName": "Lago" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (status, body) = send(
            &app(),
            Method::POST,
            "/novo/habitat",
            Some(json!({ "habitatName": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "habitatName cannot be empty");
    }

    #[tokio::test]
    async fn animals_in_habitat() {
        let app = app();
        send(&app, Method::POST, "/novo/habitat", Some(json!({ "habitatName": "Viveiro" }))).await;
        for name in ["Arara", "Tucano"] {
            send(
                &app,
                Method::POST,
                "/novo/ave",
                Some(json!({ "name": name, "age": 1, "gender": "macho", "wingspan": 30.0 })),
            )
            .await;
        }
        for animal_id in [2, 1] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/habitat/animal",
                Some(json!({ "habitatId": 1, "animalId": animal_id })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, rows) = send(&app, Method::GET, "/habitat/animais?habitatId=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            rows,
            json!([
                {
                    "habitatId": 1, "habitatName": "VIVEIRO",
                    "animalId": 1, "animalName": "ARARA", "animalAge": 1, "animalGender": "MACHO"
                },
                {
                    "habitatId": 1, "habitatName": "VIVEIRO",
                    "animalId": 2, "animalName": "TUCANO", "animalAge": 1, "animalGender": "MACHO"
                }
            ])
        );

        // Still referenced by the association rows.
        let (status, _) = send(&app, Method::DELETE, "/remover/habitat?habitatId=1", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn link_requires_existing_records() {
        let (status, _) = send(
            &app(),
            Method::POST,
            "/habitat/animal",
            Some(json!({ "habitatId": 1, "animalId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app(), Method::POST, "/habitat/animal", Some(json!({ "habitatId": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "animalId is required");
    }
}
