//! Attraction endpoints
//!
//! `/remover` and `/atualizar` without a suffix address attractions; the
//! `/remover/atracao` and `/atualizar/atracao` forms are aliases.

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
use crate::models::{Attraction, AttractionUpdate, NewAttraction, UpperText, ValidationError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionRequest {
    #[serde(alias = "nomeAtracao")]
    pub attraction_name: Option<String>,
    #[serde(alias = "idHabitat")]
    pub habitat_id: Option<i32>,
}

impl TryFrom<AttractionRequest> for NewAttraction {
    type Error = ValidationError;

    fn try_from(req: AttractionRequest) -> Result<Self, Self::Error> {
        let name = req
            .attraction_name
            .ok_or(ValidationError::Missing { field: "attractionName" })?;
        Ok(NewAttraction {
            name: UpperText::new("attractionName", &name)?,
            habitat_id: req.habitat_id,
        })
    }
}

impl TryFrom<AttractionRequest> for AttractionUpdate {
    type Error = ValidationError;

    fn try_from(req: AttractionRequest) -> Result<Self, Self::Error> {
        Ok(AttractionUpdate {
            name: UpperText::optional("attractionName", req.attraction_name.as_deref())?,
            habitat_id: req.habitat_id,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractionIdQuery {
    #[serde(alias = "idAtracao")]
    pub attraction_id: Option<String>,
}

/// GET /atracoes
async fn list_attractions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Attraction>>, ApiError> {
    Ok(Json(state.attractions.list().await?))
}

/// POST /novo/atracao
async fn create_attraction(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<AttractionRequest>,
) -> Result<Json<Saved<Attraction>>, ApiError> {
    let attraction = NewAttraction::try_from(req)?;
    let created = state.attractions.create(attraction).await?;

    tracing::info!(id = created.id, "attraction registered");
    Ok(Json(Saved::with("Atração cadastrada com sucesso", created)))
}

/// DELETE /remover?attractionId=
async fn delete_attraction(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<AttractionIdQuery>,
) -> Result<Json<Saved<()>>, ApiError> {
    let id = parse_id("attractionId", query.attraction_id.as_deref())?;
    state.attractions.delete(id).await?;

    tracing::info!(id, "attraction removed");
    Ok(Json(Saved::message("Atração foi removida com sucesso")))
}

/// PUT /atualizar?attractionId=
async fn update_attraction(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<AttractionIdQuery>,
    JsonBody(req): JsonBody<AttractionRequest>,
) -> Result<Json<Saved<Attraction>>, ApiError> {
    let id = parse_id("attractionId", query.attraction_id.as_deref())?;
    let update = AttractionUpdate::try_from(req)?;
    let updated = state.attractions.update(id, update).await?;

    Ok(Json(Saved::with("Atração foi alterada com sucesso", updated)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/atracoes", get(list_attractions))
        .route("/novo/atracao", post(create_attraction))
        .route("/remover", delete(delete_attraction))
        .route("/remover/atracao", delete(delete_attraction))
        .route("/atualizar", put(update_attraction))
        .route("/atualizar/atracao", put(update_attraction))
}
