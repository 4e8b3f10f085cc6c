//! Content client for the board API
//!
//! URL layout:
//! - `<api-base>/boards.json`
//! - `<api-base>/<board>/catalog.json`
//! - `<api-base>/<board>/thread/<thread>.json`
//! - `<media-base>/<board>/<token><ext>`
//! - `<site-base>/<board>/thread/<thread>#p<post>`

use crate::config::{validate_board_code, SourceConfig};
use crate::model::{Board, BoardCategory, MediaRef, Post, ThreadSummary};
use crate::source::fetcher::{build_http_client, fetch_bytes, fetch_json, Fetched};
use crate::source::wire::{BoardList, CatalogPage, ThreadPayload};
use crate::SieveError;
use reqwest::Client;

/// Base URLs of the content source, without trailing slashes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: String,
    pub media_base: String,
    pub site_base: String,
}

impl Endpoints {
    pub fn from_config(config: &SourceConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            media_base: config.media_base.trim_end_matches('/').to_string(),
            site_base: config.site_base.trim_end_matches('/').to_string(),
        }
    }

    /// Canonical link to a post
    pub fn post_url(&self, board: &str, thread_id: u64, post_id: u64) -> String {
        format!(
            "{}/{}/thread/{}#p{}",
            self.site_base, board, thread_id, post_id
        )
    }

    /// Remote location of a post's media
    pub fn media_url(&self, board: &str, media: &MediaRef) -> String {
        format!("{}/{}/{}", self.media_base, board, media.file_name())
    }
}

/// Fetches board listings, catalogs, threads and media
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: Client,
    endpoints: Endpoints,
}

impl ContentClient {
    /// Creates a client from the source configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ContentClient)` - Client ready to use
    /// * `Err(SieveError)` - The HTTP client could not be built
    pub fn new(config: &SourceConfig) -> Result<Self, SieveError> {
        let http = build_http_client(config).map_err(|source| SieveError::Http {
            url: config.api_base.clone(),
            source,
        })?;

        Ok(Self {
            http,
            endpoints: Endpoints::from_config(config),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Lists the source's boards that belong to `category`
    ///
    /// Boards whose code is not a plain alphanumeric token are skipped, since
    /// codes end up in URLs and media folder paths.
    pub async fn fetch_boards(&self, category: BoardCategory) -> Fetched<Vec<Board>> {
        let url = format!("{}/boards.json", self.endpoints.api_base);

        fetch_json::<BoardList>(&self.http, &url)
            .await
            .map(|list| {
                list.boards
                    .into_iter()
                    .map(Board::from)
                    .filter(|board| category.includes(board.visibility))
                    .filter(|board| match validate_board_code(&board.code) {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::warn!("Ignoring listed board: {}", e);
                            false
                        }
                    })
                    .collect()
            })
    }

    /// Lists a board's threads across all catalog pages, in catalog order
    pub async fn fetch_catalog(&self, board: &str) -> Fetched<Vec<ThreadSummary>> {
        let url = format!("{}/{}/catalog.json", self.endpoints.api_base, board);

        fetch_json::<Vec<CatalogPage>>(&self.http, &url)
            .await
            .map(|pages| {
                pages
                    .into_iter()
                    .flat_map(|page| page.threads)
                    .map(|thread| thread.into_summary(board))
                    .collect()
            })
    }

    /// Fetches every post of a thread
    pub async fn fetch_thread(&self, board: &str, thread_id: u64) -> Fetched<Vec<Post>> {
        let url = format!(
            "{}/{}/thread/{}.json",
            self.endpoints.api_base, board, thread_id
        );

        fetch_json::<ThreadPayload>(&self.http, &url)
            .await
            .map(|payload| payload.posts.into_iter().map(Post::from).collect())
    }

    /// Fetches raw bytes, typically a media file
    pub async fn fetch_bytes(&self, url: &str) -> Fetched<Vec<u8>> {
        fetch_bytes(&self.http, url).await
    }
}
