use super::{Profession, Race};
use crate::progression::Progress;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored player. `level` and `until_next_level` are always derived from
/// `experience` before the record reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    /// Milliseconds since the Unix epoch.
    pub birthday: i64,
    pub banned: bool,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
}

impl Player {
    /// Overwrite every field present in `patch`, then re-derive progression.
    pub fn apply_patch(&mut self, patch: PlayerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(race) = patch.race {
            self.race = race;
        }
        if let Some(profession) = patch.profession {
            self.profession = profession;
        }
        if let Some(birthday) = patch.birthday {
            self.birthday = birthday;
        }
        if let Some(banned) = patch.banned {
            self.banned = banned;
        }
        if let Some(experience) = patch.experience {
            self.experience = experience;
        }

        self.refresh_progress();
    }

    pub fn refresh_progress(&mut self) {
        let progress = Progress::from_experience(self.experience);
        self.level = progress.level;
        self.until_next_level = progress.until_next_level;
    }
}

/// A validated player that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: i64,
    pub banned: bool,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
}

impl NewPlayer {
    pub fn with_id(self, id: i64) -> Player {
        Player {
            id,
            name: self.name,
            title: self.title,
            race: self.race,
            profession: self.profession,
            birthday: self.birthday,
            banned: self.banned,
            experience: self.experience,
            level: self.level,
            until_next_level: self.until_next_level,
        }
    }
}

/// Creation body. Fields are optional on the wire so that a missing field
/// surfaces as a validation failure rather than a decoding error. Client
/// supplied `level` and `untilNextLevel` are not read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDraft {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub birthday: Option<i64>,
    pub banned: Option<bool>,
    pub experience: Option<i32>,
}

/// Update body: only present fields overwrite the stored record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub birthday: Option<i64>,
    pub banned: Option<bool>,
    pub experience: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Player {
        let mut player = Player {
            id: 7,
            name: "Aragorn".to_string(),
            title: "Ranger".to_string(),
            race: Race::Human,
            profession: Profession::Warrior,
            birthday: 1_000_000_000_000,
            banned: false,
            experience: 100,
            level: 0,
            until_next_level: 0,
        };
        player.refresh_progress();
        player
    }

    #[test]
    fn test_apply_patch_overwrites_present_fields_only() {
        let mut player = stored();
        player.apply_patch(PlayerPatch {
            title: Some("King".to_string()),
            banned: Some(true),
            ..Default::default()
        });

        assert_eq!(player.id, 7);
        assert_eq!(player.name, "Aragorn");
        assert_eq!(player.title, "King");
        assert!(player.banned);
        assert_eq!(player.experience, 100);
        assert_eq!(player.level, 1);
    }

    #[test]
    fn test_apply_patch_rederives_progress() {
        let mut player = stored();
        player.apply_patch(PlayerPatch {
            experience: Some(5000),
            ..Default::default()
        });

        assert_eq!(player.level, 9);
        assert_eq!(player.until_next_level, 500);
    }

    #[test]
    fn test_draft_ignores_derived_fields() {
        let draft: PlayerDraft = serde_json::from_str(
            r#"{"name":"Ab","experience":10,"level":99,"untilNextLevel":-5}"#,
        )
        .unwrap();
        assert_eq!(draft.name.as_deref(), Some("Ab"));
        assert_eq!(draft.experience, Some(10));
        assert!(draft.title.is_none());
    }

    #[test]
    fn test_player_serializes_camel_case() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["untilNextLevel"], 200);
        assert_eq!(json["race"], "HUMAN");
        assert_eq!(json["profession"], "WARRIOR");
    }
}
