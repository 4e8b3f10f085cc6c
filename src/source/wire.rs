//! JSON payload shapes served by the content source
//!
//! Only the fields the searcher reads are declared; everything else in the
//! payload is ignored.

use crate::model::{Board, BoardVisibility, MediaRef, Post, ThreadSummary};
use serde::Deserialize;

/// `boards.json`
#[derive(Debug, Clone, Deserialize)]
pub struct BoardList {
    pub boards: Vec<WireBoard>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireBoard {
    pub board: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ws_board: Option<u8>,
}

impl From<WireBoard> for Board {
    fn from(wire: WireBoard) -> Self {
        Board {
            code: wire.board,
            title: wire.title,
            visibility: BoardVisibility::from_flag(wire.ws_board),
        }
    }
}

/// One page of `<board>/catalog.json`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub threads: Vec<CatalogThread>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogThread {
    pub no: u64,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub com: Option<String>,
}

impl CatalogThread {
    pub fn into_summary(self, board: &str) -> ThreadSummary {
        ThreadSummary {
            board: board.to_string(),
            thread_id: self.no,
            subject: self.sub.unwrap_or_default(),
            comment: self.com.unwrap_or_default(),
        }
    }
}

/// `<board>/thread/<id>.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadPayload {
    pub posts: Vec<WirePost>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePost {
    pub no: u64,
    #[serde(default)]
    pub com: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub tim: Option<u64>,
    #[serde(default)]
    pub ext: Option<String>,
}

impl From<WirePost> for Post {
    fn from(wire: WirePost) -> Self {
        // a post only carries media when both the token and extension are present
        let media = match (wire.tim, wire.ext) {
            (Some(tim), Some(ext)) => Some(MediaRef {
                token: tim.to_string(),
                extension: ext,
            }),
            _ => None,
        };

        Post {
            post_id: wire.no,
            comment: wire.com,
            subject: wire.sub,
            media,
        }
    }
}
