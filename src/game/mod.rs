pub mod card;
pub mod player;
pub mod session;
pub mod shuffle;
pub mod state;

pub use card::{build_catalog, Card, CardId, Color, Face, CATALOG_SIZE};
pub use player::Player;
pub use session::{GameSession, SessionError, SessionManager};
pub use shuffle::shuffled;
pub use state::{Direction, GameCheat, RuleError, UnoGame};
