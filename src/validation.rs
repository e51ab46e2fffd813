use crate::models::{PlayerDraft, PlayerPatch, Profession, Race};
use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;

pub const NAME_MAX_LEN: usize = 12;
pub const TITLE_MAX_LEN: usize = 30;
pub const MIN_EXPERIENCE: i32 = 0;
pub const MAX_EXPERIENCE: i32 = 10_000_000;
pub const MIN_BIRTH_YEAR: i32 = 2000;
pub const MAX_BIRTH_YEAR: i32 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must be 2 to 12 characters")]
    Name,
    #[error("title must be 1 to 30 characters")]
    Title,
    #[error("race is required")]
    Race,
    #[error("profession is required")]
    Profession,
    #[error("experience must be between 0 and 10000000")]
    Experience,
    #[error("birthday is required")]
    MissingBirthday,
    #[error("birthday must fall between the years 2000 and 3000")]
    BirthYear,
    #[error("birthday must not precede the epoch")]
    NegativeBirthday,
}

/// A creation draft with every required field present and in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub birthday: i64,
    pub banned: Option<bool>,
    pub experience: i32,
}

/// Full validation for creation. The first failing field rejects the draft.
pub fn validate_draft(draft: PlayerDraft) -> Result<ValidDraft, ValidationError> {
    let name = check_name(draft.name)?;
    let title = check_title(draft.title)?;
    let race = draft.race.ok_or(ValidationError::Race)?;
    let profession = draft.profession.ok_or(ValidationError::Profession)?;
    let birthday = check_birthday(draft.birthday)?;
    let experience = draft.experience.ok_or(ValidationError::Experience)?;
    check_experience(experience)?;

    Ok(ValidDraft {
        name,
        title,
        race,
        profession,
        birthday,
        banned: draft.banned,
        experience,
    })
}

/// Patch validation only range-checks `experience` and the sign of
/// `birthday`. Everything else in a patch is accepted as is, so an update can
/// reach states a fresh creation would refuse.
pub fn validate_patch(patch: &PlayerPatch) -> Result<(), ValidationError> {
    if let Some(experience) = patch.experience {
        check_experience(experience)?;
    }
    if let Some(birthday) = patch.birthday {
        if birthday < 0 {
            return Err(ValidationError::NegativeBirthday);
        }
    }
    Ok(())
}

fn check_name(name: Option<String>) -> Result<String, ValidationError> {
    match name {
        Some(name) if (2..=NAME_MAX_LEN).contains(&name.chars().count()) => Ok(name),
        _ => Err(ValidationError::Name),
    }
}

fn check_title(title: Option<String>) -> Result<String, ValidationError> {
    match title {
        Some(title) if (1..=TITLE_MAX_LEN).contains(&title.chars().count()) => Ok(title),
        _ => Err(ValidationError::Title),
    }
}

fn check_experience(experience: i32) -> Result<(), ValidationError> {
    if (MIN_EXPERIENCE..=MAX_EXPERIENCE).contains(&experience) {
        Ok(())
    } else {
        Err(ValidationError::Experience)
    }
}

fn check_birthday(birthday: Option<i64>) -> Result<i64, ValidationError> {
    let birthday = birthday.ok_or(ValidationError::MissingBirthday)?;
    if birthday < 0 {
        return Err(ValidationError::NegativeBirthday);
    }

    // Years are read in UTC.
    let year = DateTime::<Utc>::from_timestamp_millis(birthday)
        .map(|moment| moment.year())
        .ok_or(ValidationError::BirthYear)?;
    if (MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year) {
        Ok(birthday)
    } else {
        Err(ValidationError::BirthYear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn millis(year: i32, month: u32, day: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn draft() -> PlayerDraft {
        PlayerDraft {
            name: Some("Ab".to_string()),
            title: Some("T".to_string()),
            race: Some(Race::Elf),
            profession: Some(Profession::Druid),
            birthday: Some(millis(2500, 6, 1)),
            banned: None,
            experience: Some(0),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        let valid = validate_draft(draft()).unwrap();
        assert_eq!(valid.name, "Ab");
        assert_eq!(valid.banned, None);
    }

    #[test]
    fn test_name_bounds() {
        for (name, ok) in [("", false), ("A", false), ("Ab", true), ("Abcdefghijkl", true), ("Abcdefghijklm", false)] {
            let result = validate_draft(PlayerDraft { name: Some(name.to_string()), ..draft() });
            assert_eq!(result.is_ok(), ok, "name {:?}", name);
        }
        let missing = validate_draft(PlayerDraft { name: None, ..draft() });
        assert_eq!(missing.unwrap_err(), ValidationError::Name);
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        let result = validate_draft(PlayerDraft { name: Some("Ёжикёжикёжик".to_string()), ..draft() });
        assert!(result.is_ok());
    }

    #[test]
    fn test_title_bounds() {
        let long = "x".repeat(31);
        assert_eq!(
            validate_draft(PlayerDraft { title: Some(String::new()), ..draft() }).unwrap_err(),
            ValidationError::Title
        );
        assert!(validate_draft(PlayerDraft { title: Some("x".repeat(30)), ..draft() }).is_ok());
        assert!(validate_draft(PlayerDraft { title: Some(long), ..draft() }).is_err());
    }

    #[test]
    fn test_race_and_profession_required() {
        assert_eq!(
            validate_draft(PlayerDraft { race: None, ..draft() }).unwrap_err(),
            ValidationError::Race
        );
        assert_eq!(
            validate_draft(PlayerDraft { profession: None, ..draft() }).unwrap_err(),
            ValidationError::Profession
        );
    }

    #[test]
    fn test_experience_bounds() {
        assert!(validate_draft(PlayerDraft { experience: Some(10_000_000), ..draft() }).is_ok());
        assert_eq!(
            validate_draft(PlayerDraft { experience: Some(10_000_001), ..draft() }).unwrap_err(),
            ValidationError::Experience
        );
        assert!(validate_draft(PlayerDraft { experience: Some(-1), ..draft() }).is_err());
        assert!(validate_draft(PlayerDraft { experience: None, ..draft() }).is_err());
    }

    #[test]
    fn test_birthday_year_bounds() {
        assert!(validate_draft(PlayerDraft { birthday: Some(millis(2000, 1, 1)), ..draft() }).is_ok());
        assert!(validate_draft(PlayerDraft { birthday: Some(millis(3000, 12, 31)), ..draft() }).is_ok());
        assert_eq!(
            validate_draft(PlayerDraft { birthday: Some(millis(1999, 12, 31)), ..draft() }).unwrap_err(),
            ValidationError::BirthYear
        );
        assert!(validate_draft(PlayerDraft { birthday: Some(millis(3001, 1, 1)), ..draft() }).is_err());
        assert_eq!(
            validate_draft(PlayerDraft { birthday: None, ..draft() }).unwrap_err(),
            ValidationError::MissingBirthday
        );
        assert_eq!(
            validate_draft(PlayerDraft { birthday: Some(-1), ..draft() }).unwrap_err(),
            ValidationError::NegativeBirthday
        );
    }

    #[test]
    fn test_patch_checks_ranges_only() {
        assert!(validate_patch(&PlayerPatch::default()).is_ok());
        assert!(validate_patch(&PlayerPatch {
            name: Some(String::new()),
            title: Some("x".repeat(100)),
            birthday: Some(0),
            ..Default::default()
        })
        .is_ok());
        assert_eq!(
            validate_patch(&PlayerPatch { experience: Some(-1), ..Default::default() }).unwrap_err(),
            ValidationError::Experience
        );
        assert_eq!(
            validate_patch(&PlayerPatch { experience: Some(10_000_001), ..Default::default() }).unwrap_err(),
            ValidationError::Experience
        );
        assert!(validate_patch(&PlayerPatch { experience: Some(10_000_000), ..Default::default() }).is_ok());
        assert!(validate_patch(&PlayerPatch { experience: Some(0), ..Default::default() }).is_ok());
        assert_eq!(
            validate_patch(&PlayerPatch { birthday: Some(-5), ..Default::default() }).unwrap_err(),
            ValidationError::NegativeBirthday
        );
    }
}
