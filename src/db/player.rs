use super::PlayerStore;
use crate::filter::{Bounds, Criterion, PlayerFilter};
use crate::models::{NewPlayer, PageRequest, Player, PlayerOrder};
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct PlayerRepository {
    pool: SqlitePool,
}

impl PlayerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerStore for PlayerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert(&self, player: &NewPlayer) -> Result<Player, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            "INSERT INTO players (name, title, race, profession, birthday, banned, experience, level, until_next_level)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race)
        .bind(player.profession)
        .bind(player.birthday)
        .bind(player.banned)
        .bind(player.experience)
        .bind(player.level)
        .bind(player.until_next_level)
        .fetch_one(&self.pool)
        .await
    }

    async fn update(&self, player: &Player) -> Result<Player, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            "UPDATE players
             SET name = ?, title = ?, race = ?, profession = ?, birthday = ?,
                 banned = ?, experience = ?, level = ?, until_next_level = ?
             WHERE id = ?
             RETURNING *"
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race)
        .bind(player.profession)
        .bind(player.birthday)
        .bind(player.banned)
        .bind(player.experience)
        .bind(player.level)
        .bind(player.until_next_level)
        .bind(player.id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn scan(
        &self,
        filter: &PlayerFilter,
        order: PlayerOrder,
        page: Option<PageRequest>,
    ) -> Result<Vec<Player>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM players");
        push_where(&mut builder, filter);

        builder.push(" ORDER BY ").push(order.column());
        if order != PlayerOrder::Id {
            builder.push(", id");
        }

        if let Some(page) = page {
            let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
            builder
                .push(" LIMIT ")
                .push_bind(i64::from(page.size))
                .push(" OFFSET ")
                .push_bind(offset);
        }

        tracing::debug!("Scanning players: {}", builder.sql());
        builder.build_query_as::<Player>().fetch_all(&self.pool).await
    }
}

/// Render `filter` as a parameterised WHERE clause. An empty filter adds
/// nothing.
fn push_where(builder: &mut QueryBuilder<'_, Sqlite>, filter: &PlayerFilter) {
    if filter.is_empty() {
        return;
    }

    builder.push(" WHERE ");
    let mut clauses = builder.separated(" AND ");

    for criterion in filter.criteria() {
        match criterion {
            // instr keeps the match case-sensitive and free of LIKE wildcards
            Criterion::Contains(field, needle) => {
                clauses
                    .push(format!("instr({}, ", field.column()))
                    .push_bind_unseparated(needle.clone())
                    .push_unseparated(") > 0");
            }
            Criterion::Race(race) => {
                clauses.push("race = ").push_bind_unseparated(*race);
            }
            Criterion::Profession(profession) => {
                clauses.push("profession = ").push_bind_unseparated(*profession);
            }
            Criterion::Banned(banned) => {
                clauses.push("banned = ").push_bind_unseparated(*banned);
            }
            Criterion::Range(field, bounds) => match *bounds {
                Bounds::AtLeast(lower) => {
                    clauses
                        .push(format!("{} >= ", field.column()))
                        .push_bind_unseparated(lower);
                }
                Bounds::AtMost(upper) => {
                    clauses
                        .push(format!("{} <= ", field.column()))
                        .push_bind_unseparated(upper);
                }
                Bounds::Between(lower, upper) => {
                    clauses
                        .push(format!("{} BETWEEN ", field.column()))
                        .push_bind_unseparated(lower)
                        .push_unseparated(" AND ")
                        .push_bind_unseparated(upper);
                }
            },
        }
    }
}
