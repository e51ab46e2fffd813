use crate::filter::PlayerFilter;
use crate::models::{PageRequest, PlayerOrder, Profession, Race};
use crate::service::ServiceError;
use serde::de::{value, DeserializeOwned, Error as _, IntoDeserializer};
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Filter parameters shared by the list and count endpoints. An empty value
/// (`?minLevel=`) counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerQuery {
    pub name: Option<String>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none_variant")]
    pub race: Option<Race>,
    #[serde(default, deserialize_with = "empty_as_none_variant")]
    pub profession: Option<Profession>,
    /// Earliest birthday, epoch milliseconds.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub after: Option<i64>,
    /// Latest birthday, epoch milliseconds.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub before: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub banned: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_experience: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_experience: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_level: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_level: Option<i32>,
}

impl PlayerQuery {
    pub fn filter(&self) -> PlayerFilter {
        PlayerFilter::new()
            .name_contains(self.name.clone())
            .title_contains(self.title.clone())
            .race(self.race)
            .profession(self.profession)
            .born(self.after, self.before)
            .banned(self.banned)
            .experience(self.min_experience, self.max_experience)
            .level(self.min_level, self.max_level)
    }
}

/// Ordering and paging for the list endpoint. Count never reads these.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default, deserialize_with = "empty_as_none_variant")]
    pub order: Option<PlayerOrder>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_number: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_size: Option<i64>,
}

impl PageQuery {
    pub fn order(&self) -> PlayerOrder {
        self.order.unwrap_or_default()
    }

    pub fn page(&self) -> Result<PageRequest, ServiceError> {
        let number = self.page_number.unwrap_or(0);
        let size = self.page_size.unwrap_or(i64::from(PageRequest::DEFAULT_SIZE));

        let number = u32::try_from(number)
            .map_err(|_| ServiceError::InvalidInput(format!("pageNumber must be >= 0, got {}", number)))?;
        let size = u32::try_from(size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| ServiceError::InvalidInput(format!("pageSize must be >= 1, got {}", size)))?;

        Ok(PageRequest::new(number, size))
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.trim().is_empty()))
}

/// Numbers and booleans, parsed from their text form.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    non_empty(deserializer)?
        .map(|raw| raw.trim().parse().map_err(D::Error::custom))
        .transpose()
}

/// Unit enums, matched against their serde names.
fn empty_as_none_variant<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    non_empty(deserializer)?
        .map(|raw| {
            let variant: value::StrDeserializer<'_, value::Error> = raw.as_str().into_deserializer();
            T::deserialize(variant).map_err(D::Error::custom)
        })
        .transpose()
}
