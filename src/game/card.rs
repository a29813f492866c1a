use serde::{Deserialize, Serialize};

/// Number of cards in the standard catalog.
pub const CATALOG_SIZE: usize = 108;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Blue,
    Green,
    Red,
    Yellow,
    Wild,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Face {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
    WildDrawEight,
}

impl Face {
    /// Wild-family faces carry `Color::Wild` until colored, and lose their
    /// chosen color again when recycled into the draw pile.
    pub fn is_wild(&self) -> bool {
        matches!(self, Face::Wild | Face::WildDrawFour | Face::WildDrawEight)
    }
}

/// Card identity, tagged by origin. Catalog ids are assigned sequentially
/// when the deck is built; cheat ids come from a per-game counter, so the
/// two ranges can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardId {
    Catalog(u32),
    Cheat(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub color: Color,
    pub face: Face,
}

/// Builds the fixed 108-card catalog: per color one `0`, two of each other
/// number and two of each colored action card, plus four Wild and four Wild
/// Draw Four cards. Ids follow construction order.
pub fn build_catalog() -> Vec<Card> {
    let mut cards = Vec::with_capacity(CATALOG_SIZE);

    for &color in &[Color::Blue, Color::Green, Color::Red, Color::Yellow] {
        let faces = (0..=9)
            .map(Face::Number)
            .chain([Face::Skip, Face::Reverse, Face::DrawTwo]);
        for face in faces {
            let copies = if face == Face::Number(0) { 1 } else { 2 };
            for _ in 0..copies {
                push_card(&mut cards, color, face.clone());
            }
        }
    }

    for _ in 0..4 {
        push_card(&mut cards, Color::Wild, Face::Wild);
    }
    for _ in 0..4 {
        push_card(&mut cards, Color::Wild, Face::WildDrawFour);
    }

    cards
}

fn push_card(cards: &mut Vec<Card>, color: Color, face: Face) {
    let id = CardId::Catalog(cards.len() as u32);
    cards.push(Card { id, color, face });
}
