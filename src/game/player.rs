use serde::{Deserialize, Serialize};

use super::card::Card;

/// A seat at the table. `id` is whatever opaque identifier the hosting
/// platform uses for the participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    /// Cards in acquisition order; never sorted.
    pub hand: Vec<Card>,
    /// Set once the seat has played or drawn this turn.
    pub has_played_card: bool,
    /// Set by a successful UNO call; consumed when the turn ends.
    pub has_said_uno: bool,
}

impl Player {
    pub fn new(id: String) -> Self {
        Self {
            id,
            hand: Vec::new(),
            has_played_card: false,
            has_said_uno: false,
        }
    }
}
