pub mod arrangement;
pub mod player;
pub mod roster;
pub mod side;
pub mod team;

pub use arrangement::Arrangement;
pub use player::Player;
pub use roster::Roster;
pub use side::Side;
pub use team::Team;
