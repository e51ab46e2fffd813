use crate::db::PlayerStore;
use crate::filter::PlayerFilter;
use crate::models::{NewPlayer, PageRequest, Player, PlayerDraft, PlayerOrder, PlayerPatch};
use crate::progression::Progress;
use crate::validation::{self, ValidationError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("player {0} not found")]
    NotFound(i64),
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

/// Player operations on top of a [`PlayerStore`]. Holds no state of its own;
/// concurrent updates to one player are last-write-wins.
#[derive(Clone)]
pub struct PlayerService {
    store: Arc<dyn PlayerStore>,
}

impl PlayerService {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, draft: PlayerDraft) -> Result<Player, ServiceError> {
        let valid = validation::validate_draft(draft)?;
        let progress = Progress::from_experience(valid.experience);

        let player = self
            .store
            .insert(&NewPlayer {
                name: valid.name,
                title: valid.title,
                race: valid.race,
                profession: valid.profession,
                birthday: valid.birthday,
                banned: valid.banned.unwrap_or(false),
                experience: valid.experience,
                level: progress.level,
                until_next_level: progress.until_next_level,
            })
            .await?;

        tracing::info!(
            "Created player {} ({}, {} {}) at level {}",
            player.id,
            player.name,
            player.race.as_str(),
            player.profession.as_str(),
            player.level
        );
        Ok(player)
    }

    pub async fn fetch(&self, id: i64) -> Result<Player, ServiceError> {
        if id <= 0 {
            return Err(ServiceError::NotFound(id));
        }
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn update(&self, id: i64, patch: PlayerPatch) -> Result<Player, ServiceError> {
        check_id(id)?;
        validation::validate_patch(&patch)?;

        let mut player = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        player.apply_patch(patch);

        // A delete can land between the read and the write.
        let player = match self.store.update(&player).await {
            Err(sqlx::Error::RowNotFound) => return Err(ServiceError::NotFound(id)),
            result => result?,
        };
        tracing::info!("Updated player {} ({}), now level {}", player.id, player.name, player.level);
        Ok(player)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        check_id(id)?;
        if self.store.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(id));
        }

        self.store.delete_by_id(id).await?;
        tracing::info!("Deleted player {}", id);
        Ok(())
    }

    pub async fn list(
        &self,
        filter: &PlayerFilter,
        order: PlayerOrder,
        page: PageRequest,
    ) -> Result<Vec<Player>, ServiceError> {
        let players = self.store.scan(filter, order, Some(page)).await?;
        tracing::debug!(
            "Listed {} player(s), {} criteria, order {:?}, page {}x{}",
            players.len(),
            filter.criteria().len(),
            order,
            page.number,
            page.size
        );
        Ok(players)
    }

    pub async fn count(&self, filter: &PlayerFilter) -> Result<usize, ServiceError> {
        let players = self.store.scan(filter, PlayerOrder::Id, None).await?;
        tracing::debug!("Counted {} player(s), {} criteria", players.len(), filter.criteria().len());
        Ok(players.len())
    }
}

fn check_id(id: i64) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::InvalidInput(format!("player id must be positive, got {}", id)));
    }
    Ok(())
}
