pub mod memory;
pub mod player;

use crate::filter::PlayerFilter;
use crate::models::{NewPlayer, PageRequest, Player, PlayerOrder};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;

pub use memory::InMemoryPlayerRepository;
pub use player::PlayerRepository;

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
}

/// Durable player storage. Single-record writes are atomic; nothing spans
/// more than one record.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, sqlx::Error>;

    /// Store a new player and return it with its assigned id.
    async fn insert(&self, player: &NewPlayer) -> Result<Player, sqlx::Error>;

    /// Overwrite the stored record with the same id.
    async fn update(&self, player: &Player) -> Result<Player, sqlx::Error>;

    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error>;

    /// Players accepted by `filter`, ascending by `order` with ties broken by
    /// id. Without a page the full match set is returned.
    async fn scan(
        &self,
        filter: &PlayerFilter,
        order: PlayerOrder,
        page: Option<PageRequest>,
    ) -> Result<Vec<Player>, sqlx::Error>;
}
