//! Authoritative UNO rules engine for bot-style hosts.
//!
//! The engine owns the rules: deck construction, seating and turn order,
//! play legality, card effects, the UNO call and its penalty, reshuffles
//! and win detection. The hosting layer owns rendering, user interaction
//! and lobby policy. Hosts issue commands against a [`game::UnoGame`]
//! (usually through a [`game::SessionManager`]) and read the table back
//! through the query methods afterwards.
//!
//! ```
//! use uno_engine::game::UnoGame;
//!
//! let mut game = UnoGame::new();
//! game.start_game(vec!["ada".to_string(), "grace".to_string()]);
//! assert_eq!(game.current_player().hand.len(), 7);
//! assert!(game.top_card().is_none());
//! ```

pub mod game;
