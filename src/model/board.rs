/// Board definitions and listing filters
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a board is flagged work-safe by the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoardVisibility {
    /// Work-safe board
    Sfw,
    /// Not work-safe board
    Nsfw,
    /// The listing did not say
    Unspecified,
}

impl BoardVisibility {
    /// Maps the source's `ws_board` flag
    pub fn from_flag(flag: Option<u8>) -> Self {
        match flag {
            Some(1) => Self::Sfw,
            Some(0) => Self::Nsfw,
            _ => Self::Unspecified,
        }
    }
}

/// A named content section of the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    /// Short board code, e.g. `g`
    pub code: String,

    /// Human-readable title, when the listing provides one
    pub title: Option<String>,

    /// Work-safe classification
    pub visibility: BoardVisibility,
}

/// Filter applied to the board listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoardCategory {
    /// Every listed board
    #[default]
    All,
    /// Work-safe boards only
    Sfw,
    /// Not work-safe boards only
    Nsfw,
}

impl BoardCategory {
    /// Returns true if a board of the given visibility belongs to this category
    ///
    /// Boards with no visibility flag only appear under `All`.
    pub fn includes(&self, visibility: BoardVisibility) -> bool {
        match self {
            Self::All => true,
            Self::Sfw => visibility == BoardVisibility::Sfw,
            Self::Nsfw => visibility == BoardVisibility::Nsfw,
        }
    }
}

impl fmt::Display for BoardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Sfw => "sfw",
            Self::Nsfw => "nsfw",
        };
        write!(f, "{}", name)
    }
}
