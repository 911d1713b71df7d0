use serde::Deserialize;

use crate::error::AppError;

/// Body of a card front: wrapped paragraph text or a puzzle image, never both.
#[derive(Debug, Clone)]
pub enum CardContent {
    /// Paragraphs separated by '\n'
    Text(String),
    /// Image filename under the puzzle images folder
    Image(String),
}

/// One printable clue card.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub content: CardContent,
    /// QR image filename under the QR folder
    pub qr: Option<String>,
    /// Single large letter printed on the back
    pub back_label: Option<String>,
    /// Display-only setup note printed above the card front
    pub note: Option<String>,
}

impl Card {
    pub fn has_note(&self) -> bool {
        self.note.as_deref().map(|n| !n.is_empty()).unwrap_or(false)
    }
}

/// Card record as it appears in a JSON deck file.
#[derive(Debug, Deserialize)]
struct CardRecord {
    title: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    puzzle_image: Option<String>,
    #[serde(default)]
    qr: Option<String>,
    #[serde(default)]
    back_text: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

impl From<CardRecord> for Card {
    fn from(record: CardRecord) -> Self {
        // An image wins over text when a record carries both.
        let content = match record.puzzle_image {
            Some(image) => CardContent::Image(image),
            None => CardContent::Text(record.text.unwrap_or_default()),
        };
        Card {
            title: record.title,
            content,
            qr: record.qr,
            back_label: record.back_text,
            note: record.note,
        }
    }
}

pub fn load_deck(path: &str) -> Result<Vec<Card>, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::DeckError(format!("{}: {}", path, e)))?;
    let records: Vec<CardRecord> = serde_json::from_str(&content)
        .map_err(|e| AppError::DeckError(format!("Invalid JSON: {}", e)))?;
    Ok(records.into_iter().map(Card::from).collect())
}

/// Built-in deck used when no deck file is given.
pub fn sample_deck() -> Vec<Card> {
    let clues: [(&str, Option<&str>, &str, &str, &str); 10] = [
        (
            "Secret Mission",
            None,
            "ALEX!\nYou've been selected for a very important mission. A great reward awaits you, should you succeed.\nThere are others here that will help you, but they know less than you so don't expect much.\nNow, didn't Grandma ask you to do something...",
            "C",
            "on door to crawl space",
        ),
        (
            "A Private Conversation",
            None,
            "Oh look, another one of these things.\nNow, when you get upstairs exclaim that you've brought up this chair and listen closely for\n'You're the best!'",
            "U",
            "in crawl space, on chair",
        ),
        (
            "I Can't see yoU",
            None,
            "Did you notice, there's something on the back of these...\n\n\n\n\n\nIf you haven't tried it yet, you can scan the QR code to get help.",
            "P",
            "in Susan's pocket",
        ),
        ("Logic Puzzle", Some("Logic puzzle.png"), "", "D", "in a bathroom mirror"),
        (
            "Clue 5: Tall or Small",
            None,
            "Type your puzzle text for Clue 5 here...",
            "E",
            "under Alex's dinner plate",
        ),
        (
            "Clue 6: Getting Thirsty?",
            None,
            "Type your puzzle text for Clue 6 here...",
            "F",
            "in Jacob's pocket",
        ),
        (
            "Clue 7: Hmmm?",
            None,
            "Type your puzzle text for Clue 7 here...",
            "G",
            "in the drink's cabinet",
        ),
        (
            "Clue 8: Candid Cousin",
            None,
            "Type your puzzle text for Clue 8 here...",
            "H",
            "upstairs living room, under a cushion?",
        ),
        (
            "Clue 9: Pee-ew",
            None,
            "Type your puzzle text for Clue 9 here...",
            "I",
            "in Kate's pocket",
        ),
        (
            "Clue 10: The End",
            None,
            "Type your puzzle text for Clue 10 here...",
            "J",
            "in Benjamin's diaper... bag",
        ),
    ];

    clues
        .into_iter()
        .enumerate()
        .map(|(i, (title, image, text, back, note))| Card {
            title: title.to_string(),
            content: match image {
                Some(name) => CardContent::Image(name.to_string()),
                None => CardContent::Text(text.to_string()),
            },
            qr: Some(format!("clue_{:02}_qr.png", i + 1)),
            back_label: Some(back.to_string()),
            note: Some(note.to_string()),
        })
        .collect()
}
