//! Level math. Completing level `L` costs `50 * (L + 1)` experience, so
//! reaching level `L` takes `50 * L * (L + 1)` in total.

/// Level reached with `experience` accumulated. Callers must not pass a
/// negative value.
pub fn level_from_experience(experience: i32) -> i32 {
    let root = (2500.0 + 200.0 * f64::from(experience)).sqrt();
    ((root - 50.0) / 100.0).floor() as i32
}

/// Experience still missing to reach `level + 1`. `level` must be the value
/// returned by [`level_from_experience`] for the same `experience`.
pub fn experience_to_next_level(level: i32, experience: i32) -> i32 {
    50 * (level + 1) * (level + 2) - experience
}

/// The derived progression fields of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub level: i32,
    pub until_next_level: i32,
}

impl Progress {
    pub fn from_experience(experience: i32) -> Self {
        let level = level_from_experience(experience);
        Self {
            level,
            until_next_level: experience_to_next_level(level, experience),
        }
    }
}
