use clap::Parser;
use log::{debug, info, warn};
use rand::Rng;

use uno_engine::game::{Card, CardId, Color, GameCheat, SessionManager, UnoGame};

/// Self-playing UNO table. Stands in for a chat host while exercising the
/// whole engine command surface.
#[derive(Parser)]
#[command(name = "uno-engine", version, about = "Self-playing UNO demo table")]
struct Args {
    /// Number of seats at the table.
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Cheat code granted to the first seat before the opening turn
    /// (gw4 or gw8).
    #[arg(long)]
    cheat: Option<String>,

    /// Print the final game state as JSON.
    #[arg(long)]
    json: bool,

    /// Cap on turns before the table gives up.
    #[arg(long, default_value_t = 2000)]
    max_turns: usize,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();

    if args.players == 0 {
        warn!("a table needs at least one seat; seating 1");
    }
    let seats = args.players.max(1);

    let manager = SessionManager::new();
    let session_id = manager.create_session();

    let player_ids: Vec<String> = (1..=seats).map(|n| format!("player-{n}")).collect();
    info!("seating {} players", player_ids.len());
    manager
        .with_game(&session_id, |game| game.start_game(player_ids))
        .expect("session disappeared");

    if let Some(code) = args.cheat.as_deref() {
        match GameCheat::from_code(code) {
            Some(cheat) => {
                manager
                    .with_game(&session_id, |game| {
                        let lucky = game.players()[0].id.clone();
                        match game.activate_cheat_code(&lucky, cheat) {
                            Ok(()) => info!("{lucky} starts with a {code} bonus card"),
                            Err(err) => warn!("cheat rejected: {err}"),
                        }
                    })
                    .expect("session disappeared");
            }
            None => warn!("unknown cheat code {code:?}"),
        }
    }

    let mut winner: Option<String> = None;
    for turn in 1..=args.max_turns {
        let finished = manager
            .with_game(&session_id, |game| play_one_turn(game, turn))
            .expect("session disappeared");
        if let Some(id) = finished {
            winner = Some(id);
            break;
        }
    }

    match &winner {
        Some(id) => info!("{id} wins"),
        None => warn!("no winner within {} turns", args.max_turns),
    }

    let (hands, state_json) = manager
        .read_session(&session_id, |session| {
            let hands: Vec<(String, usize)> = session
                .game
                .players()
                .iter()
                .map(|player| (player.id.clone(), player.hand.len()))
                .collect();
            let state_json = args
                .json
                .then(|| serde_json::to_string_pretty(&session.game).expect("state serializes"));
            (hands, state_json)
        })
        .expect("session disappeared");

    for (id, cards) in &hands {
        info!("{id} finished with {cards} cards");
    }
    if let Some(state_json) = state_json {
        println!("{state_json}");
    }

    manager
        .with_game(&session_id, |game| game.reset())
        .expect("session disappeared");
    manager
        .delete_session(&session_id)
        .expect("session disappeared");
}

/// Plays a single seat's turn with a naive strategy: call UNO when obliged
/// (usually), play the first legal card, recolor wilds to the color the
/// seat holds most of, otherwise draw. Returns the winner's id if this
/// turn ended the game.
fn play_one_turn(game: &mut UnoGame, turn: usize) -> Option<String> {
    let seat = game.current_player().id.clone();
    let hand: Vec<Card> = game.player_cards(&seat).to_vec();

    // A real player sometimes forgets; keeps the penalty path visible.
    if hand.len() == 2 && rand::rng().random_bool(0.75) {
        if let Err(err) = game.say_uno(&seat) {
            debug!("turn {turn}: {seat} cannot call UNO: {err}");
        }
    }

    let playable = hand.iter().find(|card| game.can_play_card(card)).cloned();
    match playable {
        Some(card) => {
            let color = favorite_color(&hand, card.id);
            match game.play_card(&seat, card.id) {
                Ok(()) => {
                    debug!("turn {turn}: {seat} plays {:?} {:?}", card.color, card.face);
                    if card.face.is_wild() {
                        if let Err(err) = game.change_wild_card_color(card.id, color) {
                            warn!("turn {turn}: recolor failed: {err}");
                        }
                    }
                }
                Err(err) => {
                    warn!("turn {turn}: {seat} failed to play: {err}");
                    if let Err(err) = game.draw_card(&seat) {
                        warn!("turn {turn}: {seat} failed to draw: {err}");
                    }
                }
            }
        }
        None => {
            debug!("turn {turn}: {seat} has no legal card and draws");
            if let Err(err) = game.draw_card(&seat) {
                warn!("turn {turn}: {seat} failed to draw: {err}");
            }
        }
    }

    game.is_winner(&seat).then_some(seat)
}

/// The color the seat still holds most of, used when recoloring a played
/// wild.
fn favorite_color(hand: &[Card], played: CardId) -> Color {
    let mut best = (Color::Red, 0);
    for &color in &[Color::Blue, Color::Green, Color::Red, Color::Yellow] {
        let count = hand
            .iter()
            .filter(|card| card.id != played && card.color == color)
            .count();
        if count > best.1 {
            best = (color, count);
        }
    }
    best.0
}
