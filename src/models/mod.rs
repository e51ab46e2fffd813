pub mod player;
pub mod profession;
pub mod race;
pub mod order;

pub use player::{NewPlayer, Player, PlayerDraft, PlayerPatch};
pub use profession::Profession;
pub use race::Race;
pub use order::{PageRequest, PlayerOrder};
