//! Bird endpoints
//!
//! Request bodies accept camelCase keys as well as the Portuguese names
//! older clients send (`nome`, `idade`, `genero`, `envergadura`).

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
use crate::models::{Bird, BirdUpdate, NewBird, UpperText, ValidationError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBirdRequest {
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "idade")]
    pub age: Option<i32>,
    #[serde(alias = "genero")]
    pub gender: Option<String>,
    #[serde(alias = "envergadura")]
    pub wingspan: Option<f64>,
    #[serde(alias = "idHabitat")]
    pub habitat_id: Option<i32>,
}

impl TryFrom<CreateBirdRequest> for NewBird {
    type Error = ValidationError;

    fn try_from(req: CreateBirdRequest) -> Result<Self, Self::Error> {
        let name = req.name.ok_or(ValidationError::Missing { field: "name" })?;
        let gender = req.gender.ok_or(ValidationError::Missing { field: "gender" })?;
        let age = req.age.ok_or(ValidationError::Missing { field: "age" })?;
        let wingspan = req.wingspan.ok_or(ValidationError::Missing { field: "wingspan" })?;

        let bird = NewBird::new(
            UpperText::new("name", &name)?,
            age,
            UpperText::new("gender", &gender)?,
            wingspan,
        );
        Ok(match req.habitat_id {
            Some(habitat_id) => bird.in_habitat(habitat_id),
            None => bird,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBirdRequest {
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "idade")]
    pub age: Option<i32>,
    #[serde(alias = "genero")]
    pub gender: Option<String>,
    #[serde(alias = "envergadura")]
    pub wingspan: Option<f64>,
}

impl TryFrom<UpdateBirdRequest> for BirdUpdate {
    type Error = ValidationError;

    fn try_from(req: UpdateBirdRequest) -> Result<Self, Self::Error> {
        Ok(BirdUpdate {
            name: UpperText::optional("name", req.name.as_deref())?,
            age: req.age,
            gender: UpperText::optional("gender", req.gender.as_deref())?,
            wingspan: req.wingspan,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalIdQuery {
    #[serde(alias = "idAnimal")]
    pub animal_id: Option<String>,
}

impl AnimalIdQuery {
    fn id(&self) -> Result<i32, ValidationError> {
        parse_id("animalId", self.animal_id.as_deref())
    }
}

/// GET /aves - list all birds with their habitat ids
async fn list_birds(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Bird>>, ApiError> {
    Ok(Json(state.birds.list().await?))
}

/// POST /novo/ave
async fn create_bird(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateBirdRequest>,
) -> Result<Json<Saved<Bird>>, ApiError> {
    let bird = NewBird::try_from(req)?;
    let created = state.birds.create(bird).await?;

    tracing::info!(id = created.animal.id, "bird registered");
    Ok(Json(Saved::with("Ave cadastrada com sucesso", created)))
}

/// DELETE /remover/ave?animalId=
async fn delete_bird(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<AnimalIdQuery>,
) -> Result<Json<Saved<()>>, ApiError> {
    let id = query.id()?;
    state.birds.delete(id).await?;

    tracing::info!(id, "animal removed");
    Ok(Json(Saved::message("Animal foi removido com sucesso")))
}

/// PUT /atualizar/ave?animalId=
async fn update_bird(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<AnimalIdQuery>,
    JsonBody(req): JsonBody<UpdateBirdRequest>,
) -> Result<Json<Saved<Bird>>, ApiError> {
    let id = query.id()?;
    let update = BirdUpdate::try_from(req)?;
    let updated = state.birds.update(id, update).await?;

    Ok(Json(Saved::with("Ave atualizada com sucesso", updated)))
}

/// Bird routes, including the `/animal` and `/listar-aves` aliases
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/aves", get(list_birds))
        .route("/listar-aves", get(list_birds))
        .route("/novo/ave", post(create_bird))
        .route("/remover/ave", delete(delete_bird))
        .route("/remover/animal", delete(delete_bird))
        .route("/atualizar/ave", put(update_bird))
        .route("/atualizar/animal", put(update_bird))
}
