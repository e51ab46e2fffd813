//! Composable player filters.
//!
//! A [`PlayerFilter`] is the conjunction of zero or more [`Criterion`]s. Every
//! builder method takes an `Option`; `None` adds nothing, so an empty filter
//! accepts every player. Storage backends either evaluate the filter with
//! [`PlayerFilter::matches`] or translate [`PlayerFilter::criteria`] into their
//! own query language.

use crate::models::{Player, Profession, Race};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Title,
}

impl TextField {
    pub fn column(&self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Title => "title",
        }
    }

    fn value<'a>(&self, player: &'a Player) -> &'a str {
        match self {
            TextField::Name => &player.name,
            TextField::Title => &player.title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Experience,
    Level,
    /// Epoch milliseconds.
    Birthday,
}

impl RangeField {
    pub fn column(&self) -> &'static str {
        match self {
            RangeField::Experience => "experience",
            RangeField::Level => "level",
            RangeField::Birthday => "birthday",
        }
    }

    fn value(&self, player: &Player) -> i64 {
        match self {
            RangeField::Experience => i64::from(player.experience),
            RangeField::Level => i64::from(player.level),
            RangeField::Birthday => player.birthday,
        }
    }
}

/// Inclusive bounds with at least one side set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    AtLeast(i64),
    AtMost(i64),
    Between(i64, i64),
}

impl Bounds {
    /// `None` when both sides are open.
    pub fn new(lower: Option<i64>, upper: Option<i64>) -> Option<Self> {
        match (lower, upper) {
            (None, None) => None,
            (Some(lower), None) => Some(Bounds::AtLeast(lower)),
            (None, Some(upper)) => Some(Bounds::AtMost(upper)),
            (Some(lower), Some(upper)) => Some(Bounds::Between(lower, upper)),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        match *self {
            Bounds::AtLeast(lower) => value >= lower,
            Bounds::AtMost(upper) => value <= upper,
            Bounds::Between(lower, upper) => lower <= value && value <= upper,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Case-sensitive substring match.
    Contains(TextField, String),
    Race(Race),
    Profession(Profession),
    Banned(bool),
    Range(RangeField, Bounds),
}

impl Criterion {
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            Criterion::Contains(field, needle) => field.value(player).contains(needle.as_str()),
            Criterion::Race(race) => player.race == *race,
            Criterion::Profession(profession) => player.profession == *profession,
            Criterion::Banned(banned) => player.banned == *banned,
            Criterion::Range(field, bounds) => bounds.contains(field.value(player)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    criteria: Vec<Criterion>,
}

impl PlayerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// AND `criterion` into the filter. `None` leaves the filter unchanged.
    pub fn and(mut self, criterion: Option<Criterion>) -> Self {
        self.criteria.extend(criterion);
        self
    }

    pub fn name_contains(self, name: Option<String>) -> Self {
        self.and(name.map(|name| Criterion::Contains(TextField::Name, name)))
    }

    pub fn title_contains(self, title: Option<String>) -> Self {
        self.and(title.map(|title| Criterion::Contains(TextField::Title, title)))
    }

    pub fn race(self, race: Option<Race>) -> Self {
        self.and(race.map(Criterion::Race))
    }

    pub fn profession(self, profession: Option<Profession>) -> Self {
        self.and(profession.map(Criterion::Profession))
    }

    pub fn banned(self, banned: Option<bool>) -> Self {
        self.and(banned.map(Criterion::Banned))
    }

    pub fn experience(self, min: Option<i32>, max: Option<i32>) -> Self {
        self.range(RangeField::Experience, min.map(i64::from), max.map(i64::from))
    }

    pub fn level(self, min: Option<i32>, max: Option<i32>) -> Self {
        self.range(RangeField::Level, min.map(i64::from), max.map(i64::from))
    }

    /// Birthday bounds in epoch milliseconds.
    pub fn born(self, after: Option<i64>, before: Option<i64>) -> Self {
        self.range(RangeField::Birthday, after, before)
    }

    fn range(self, field: RangeField, lower: Option<i64>, upper: Option<i64>) -> Self {
        self.and(Bounds::new(lower, upper).map(|bounds| Criterion::Range(field, bounds)))
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, player: &Player) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(player))
    }
}
