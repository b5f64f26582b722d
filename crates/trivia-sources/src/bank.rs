//! Static fallback question bank.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use trivia_core::category::Category;
use trivia_core::difficulty::Difficulty;

/// One record in the bank file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankEntry {
    /// Question text.
    pub question: String,
    /// Answer options.
    pub answers: Vec<String>,
    /// Index of the correct option.
    pub correct: usize,
    /// Difficulty; missing or unknown values count as medium.
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl BankEntry {
    fn is_valid(&self) -> bool {
        self.answers.len() >= 2 && self.correct < self.answers.len()
    }
}

/// Errors reading a bank file.
#[derive(Debug, Error)]
pub enum BankError {
    /// The file could not be read.
    #[error("failed to read fallback bank: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a JSON object of category → entries.
    #[error("failed to parse fallback bank: {0}")]
    Parse(#[from] serde_json::Error),

    /// The file parsed but contained no usable entries.
    #[error("fallback bank contains no usable entries")]
    Empty,
}

/// Category → ordered records, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct FallbackBank {
    entries: HashMap<Category, Vec<BankEntry>>,
}

impl FallbackBank {
    /// Creates a bank from prepared entries.
    #[must_use]
    pub fn new(entries: HashMap<Category, Vec<BankEntry>>) -> Self {
        Self { entries }
    }

    /// Loads the bank from a JSON file, degrading to the built-in set when
    /// the file is missing, unreadable, or empty.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(BankError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(bank) => {
                info!(path = %path.display(), entries = bank.len(), "loaded fallback bank");
                bank
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using built-in fallback bank");
                Self::builtin()
            }
        }
    }

    /// Parses a JSON object keyed by category name. Unknown categories and
    /// invalid entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Parse` for malformed JSON and `BankError::Empty`
    /// when nothing usable remains.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let raw: HashMap<String, Vec<serde_json::Value>> = serde_json::from_str(json)?;
        let mut entries: HashMap<Category, Vec<BankEntry>> = HashMap::new();

        for (key, values) in raw {
            let Ok(category) = key.parse::<Category>() else {
                warn!(category = %key, "skipping unknown category in fallback bank");
                continue;
            };
            let bucket = entries.entry(category).or_default();
            for value in values {
                match serde_json::from_value::<BankEntry>(value) {
                    Ok(entry) if entry.is_valid() => bucket.push(entry),
                    Ok(entry) => {
                        warn!(question = %entry.question, "skipping invalid fallback entry");
                    }
                    Err(e) => warn!(error = %e, "skipping undecodable fallback entry"),
                }
            }
        }

        entries.retain(|_, bucket| !bucket.is_empty());
        if entries.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { entries })
    }

    /// Records for a category, in file order.
    #[must_use]
    pub fn entries(&self, category: Category) -> &[BankEntry] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The hard-coded set used when no bank file is available: two records
    /// per category.
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |question: &str, answers: [&str; 4], difficulty| BankEntry {
            question: question.to_owned(),
            answers: answers.iter().map(|a| (*a).to_owned()).collect(),
            correct: 0,
            difficulty,
        };

        let entries = HashMap::from([
            (
                Category::Historia,
                vec![
                    entry(
                        "¿En qué año llegó Cristóbal Colón a América?",
                        ["1492", "1501", "1488", "1512"],
                        Difficulty::Easy,
                    ),
                    entry(
                        "¿Qué imperio construyó Machu Picchu?",
                        ["El Imperio inca", "El Imperio azteca", "El Imperio maya", "El Imperio olmeca"],
                        Difficulty::Medium,
                    ),
                ],
            ),
            (
                Category::Ciencia,
                vec![
                    entry(
                        "¿Cuál es el símbolo químico del oro?",
                        ["Au", "Ag", "Or", "Go"],
                        Difficulty::Easy,
                    ),
                    entry(
                        "¿Qué partícula subatómica no tiene carga eléctrica?",
                        ["El neutrón", "El protón", "El electrón", "El positrón"],
                        Difficulty::Medium,
                    ),
                ],
            ),
            (
                Category::Geografia,
                vec![
                    entry(
                        "¿Cuál es el río más largo de Sudamérica?",
                        ["El Amazonas", "El Paraná", "El Orinoco", "El Magdalena"],
                        Difficulty::Easy,
                    ),
                    entry(
                        "¿Cuál es la capital de Australia?",
                        ["Canberra", "Sídney", "Melbourne", "Perth"],
                        Difficulty::Medium,
                    ),
                ],
            ),
            (
                Category::Deportes,
                vec![
                    entry(
                        "¿Cuántos jugadores tiene un equipo de fútbol en el campo?",
                        ["11", "10", "9", "12"],
                        Difficulty::Easy,
                    ),
                    entry(
                        "¿En qué ciudad se celebraron los Juegos Olímpicos de 1992?",
                        ["Barcelona", "Atlanta", "Seúl", "Sídney"],
                        Difficulty::Medium,
                    ),
                ],
            ),
            (
                Category::Arte,
                vec![
                    entry(
                        "¿Quién pintó «Las Meninas»?",
                        ["Diego Velázquez", "Francisco de Goya", "El Greco", "Bartolomé Murillo"],
                        Difficulty::Easy,
                    ),
                    entry(
                        "¿A qué movimiento artístico perteneció Salvador Dalí?",
                        ["Surrealismo", "Cubismo", "Impresionismo", "Barroco"],
                        Difficulty::Medium,
                    ),
                ],
            ),
            (
                Category::Entretenimiento,
                vec![
                    entry(
                        "¿Cómo se llama el fontanero protagonista de los juegos de Nintendo?",
                        ["Mario", "Luigi", "Wario", "Toad"],
                        Difficulty::Easy,
                    ),
                    entry(
                        "¿Qué banda grabó el álbum «Abbey Road»?",
                        ["The Beatles", "The Rolling Stones", "Queen", "Pink Floyd"],
                        Difficulty::Medium,
                    ),
                ],
            ),
        ]);

        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_two_records_per_category() {
        let bank = FallbackBank::builtin();
        for category in Category::ALL {
            let entries = bank.entries(category);
            assert_eq!(entries.len(), 2, "{category}");
            assert!(entries.iter().all(BankEntry::is_valid));
        }
        assert_eq!(bank.len(), 12);
    }

    #[test]
    fn test_from_json_skips_unknown_categories_and_invalid_entries() {
        // Arrange
        let json = r#"{
            "ciencia": [
                {"question": "¿H2O?", "answers": ["Agua", "Sal"], "correct": 0, "difficulty": "hard"},
                {"question": "¿Roto?", "answers": ["Solo"], "correct": 0},
                {"question": "¿Fuera?", "answers": ["a", "b"], "correct": 5},
                {"nope": true}
            ],
            "astrologia": [
                {"question": "¿Signo?", "answers": ["Aries", "Tauro"], "correct": 0}
            ]
        }"#;

        // Act
        let bank = FallbackBank::from_json(json).unwrap();

        // Assert
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.entries(Category::Ciencia)[0].difficulty, Difficulty::Hard);
        assert!(bank.entries(Category::Historia).is_empty());
    }

    #[test]
    fn test_missing_difficulty_defaults_to_medium() {
        let json = r#"{"arte": [{"question": "¿Quién?", "answers": ["a", "b"], "correct": 1}]}"#;

        let bank = FallbackBank::from_json(json).unwrap();

        assert_eq!(bank.entries(Category::Arte)[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_from_json_without_usable_entries_is_empty_error() {
        let result = FallbackBank::from_json(r#"{"astrologia": []}"#);
        assert!(matches!(result, Err(BankError::Empty)));
    }

    #[test]
    fn test_shipped_bank_file_covers_every_category() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/fallback-bank.json");

        let bank = FallbackBank::from_json(&std::fs::read_to_string(path).unwrap()).unwrap();

        for category in Category::ALL {
            assert!(!bank.entries(category).is_empty(), "{category}");
        }
    }

    #[test]
    fn test_load_missing_file_degrades_to_builtin() {
        let bank = FallbackBank::load(Path::new("/nonexistent/fallback-bank.json"));
        assert_eq!(bank.len(), FallbackBank::builtin().len());
    }
}
