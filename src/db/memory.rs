use super::PlayerStore;
use crate::filter::PlayerFilter;
use crate::models::{NewPlayer, PageRequest, Player, PlayerOrder};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Process-local player storage, used when no database is configured.
pub struct InMemoryPlayerRepository {
    state: Mutex<State>,
}

struct State {
    players: BTreeMap<i64, Player>,
    next_id: i64,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                players: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A poisoned map is still consistent: every write is a single insert or remove.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Player>, sqlx::Error> {
        Ok(self.state().players.get(&id).cloned())
    }

    async fn insert(&self, player: &NewPlayer) -> Result<Player, sqlx::Error> {
        let mut state = self.state();
        let id = state.next_id;
        state.next_id += 1;

        let stored = player.clone().with_id(id);
        state.players.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, player: &Player) -> Result<Player, sqlx::Error> {
        let mut state = self.state();
        match state.players.get_mut(&player.id) {
            Some(slot) => {
                *slot = player.clone();
                Ok(player.clone())
            }
            None => Err(sqlx::Error::RowNotFound),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        self.state().players.remove(&id);
        Ok(())
    }

    async fn scan(
        &self,
        filter: &PlayerFilter,
        order: PlayerOrder,
        page: Option<PageRequest>,
    ) -> Result<Vec<Player>, sqlx::Error> {
        let mut matched: Vec<Player> = self
            .state()
            .players
            .values()
            .filter(|player| filter.matches(player))
            .cloned()
            .collect();
        matched.sort_by(|a, b| compare(order, a, b));

        Ok(match page {
            Some(page) => {
                let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
                matched
                    .into_iter()
                    .skip(offset)
                    .take(page.size as usize)
                    .collect()
            }
            None => matched,
        })
    }
}

fn compare(order: PlayerOrder, a: &Player, b: &Player) -> Ordering {
    let primary = match order {
        PlayerOrder::Id => Ordering::Equal,
        PlayerOrder::Name => a.name.cmp(&b.name),
        PlayerOrder::Experience => a.experience.cmp(&b.experience),
        PlayerOrder::Level => a.level.cmp(&b.level),
        PlayerOrder::Birthday => a.birthday.cmp(&b.birthday),
    };
    primary.then(a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Profession, Race};

    fn new_player(name: &str, experience: i32) -> NewPlayer {
        NewPlayer {
            name: name.to_string(),
            title: "Wanderer".to_string(),
            race: Race::Elf,
            profession: Profession::Sorcerer,
            birthday: 0,
            banned: false,
            experience,
            level: 0,
            until_next_level: 0,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_not_reused() {
        let repo = InMemoryPlayerRepository::new();
        let a = repo.insert(&new_player("Ann", 1)).await.unwrap();
        let b = repo.insert(&new_player("Bob", 2)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        repo.delete_by_id(b.id).await.unwrap();
        let c = repo.insert(&new_player("Cid", 3)).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn test_update_requires_existing_record() {
        let repo = InMemoryPlayerRepository::new();
        let mut stored = repo.insert(&new_player("Ann", 1)).await.unwrap();
        stored.name = "Anna".to_string();
        assert_eq!(repo.update(&stored).await.unwrap().name, "Anna");

        let ghost = new_player("Ghost", 0).with_id(99);
        assert!(matches!(repo.update(&ghost).await, Err(sqlx::Error::RowNotFound)));
    }

    #[tokio::test]
    async fn test_scan_breaks_ties_by_id() {
        let repo = InMemoryPlayerRepository::new();
        for (name, experience) in [("Cid", 5), ("Ann", 5), ("Bob", 1)] {
            repo.insert(&new_player(name, experience)).await.unwrap();
        }

        let players = repo
            .scan(&PlayerFilter::new(), PlayerOrder::Experience, None)
            .await
            .unwrap();
        let ids: Vec<_> = players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let page = repo
            .scan(&PlayerFilter::new(), PlayerOrder::Name, Some(PageRequest::new(1, 2)))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Cid");
    }
}
