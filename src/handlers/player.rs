use super::params::{PageQuery, PlayerQuery};
use crate::models::{Player, PlayerDraft, PlayerPatch};
use crate::service::ServiceError;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Player>, ServiceError> {
    let id = parse_id(&id)?;
    let player = state.players.fetch(id).await?;
    Ok(Json(player))
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PlayerDraft>, JsonRejection>,
) -> Result<Json<Player>, ServiceError> {
    let Json(draft) = body.map_err(|e| ServiceError::InvalidInput(e.body_text()))?;
    let player = state.players.create(draft).await?;
    Ok(Json(player))
}

pub async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<PlayerPatch>, JsonRejection>,
) -> Result<Json<Player>, ServiceError> {
    let id = parse_id(&id)?;
    let Json(patch) = body.map_err(|e| ServiceError::InvalidInput(e.body_text()))?;
    let player = state.players.update(id, patch).await?;
    Ok(Json(player))
}

pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id(&id)?;
    state.players.delete(id).await?;
    Ok(StatusCode::OK)
}

pub async fn list_players(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PlayerQuery>, QueryRejection>,
    paging: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Player>>, ServiceError> {
    let Query(query) = query.map_err(|e| ServiceError::InvalidInput(e.body_text()))?;
    let Query(paging) = paging.map_err(|e| ServiceError::InvalidInput(e.body_text()))?;
    let page = paging.page()?;
    let players = state
        .players
        .list(&query.filter(), paging.order(), page)
        .await?;
    Ok(Json(players))
}

pub async fn count_players(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> Result<Json<usize>, ServiceError> {
    let Query(query) = query.map_err(|e| ServiceError::InvalidInput(e.body_text()))?;
    let count = state.players.count(&query.filter()).await?;
    Ok(Json(count))
}

/// Path ids must be positive integers.
fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ServiceError::InvalidInput(format!("invalid player id: {}", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("17").unwrap(), 17);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("1.5").is_err());
        assert!(parse_id("").is_err());
    }
}
