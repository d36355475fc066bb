//! Discrete per-hand, per-frame classification results.

use serde::{Deserialize, Serialize};

/// Letters of the ASL manual alphabet the recognizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    I,
    L,
    W,
    Y,
}

impl Letter {
    pub fn code(self) -> char {
        match self {
            Letter::A => 'A',
            Letter::B => 'B',
            Letter::C => 'C',
            Letter::I => 'I',
            Letter::L => 'L',
            Letter::W => 'W',
            Letter::Y => 'Y',
        }
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What one hand is showing in the current frame.
///
/// A hand yields exactly one signal per frame; when several shapes match,
/// the resolver's priority order decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "signal", content = "letter", rename_all = "snake_case")]
pub enum Signal {
    Letter(Letter),
    /// Index and pinky up, thumb tucked: toggles command mode.
    Rock,
    /// Hand present but no recognized shape.
    #[default]
    None,
}

impl Signal {
    pub fn letter(self) -> Option<Letter> {
        match self {
            Signal::Letter(letter) => Some(letter),
            _ => None,
        }
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Signal::None)
    }
}

impl From<Letter> for Signal {
    fn from(letter: Letter) -> Self {
        Signal::Letter(letter)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Letter(letter) => write!(f, "{letter}"),
            Signal::Rock => f.write_str("rock"),
            Signal::None => f.write_str("-"),
        }
    }
}
