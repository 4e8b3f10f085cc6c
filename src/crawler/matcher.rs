//! Post matching
//!
//! Turns a thread's posts into match results. Search jobs keep only the posts
//! whose `comment + " " + subject` matches the primary pattern; full-capture
//! jobs keep every post. Media URLs are attached here; downloading is left to
//! the caller.

use crate::model::{snippet, JobKind, MatchResult, Post};
use crate::source::Endpoints;
use regex::Regex;

/// Builds match results from fetched posts
#[derive(Debug, Clone)]
pub struct PostMatcher {
    pattern: Regex,
    endpoints: Endpoints,
}

impl PostMatcher {
    pub fn new(pattern: Regex, endpoints: Endpoints) -> Self {
        Self { pattern, endpoints }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Returns true if the pattern matches the post's comment or subject
    pub fn is_match(&self, post: &Post) -> bool {
        self.pattern.is_match(&post.search_text())
    }

    /// Results for the posts of a search-job thread that match the pattern
    ///
    /// Snippets are taken from the joined comment and subject.
    pub fn search_posts(&self, board: &str, thread_id: u64, posts: &[Post]) -> Vec<MatchResult> {
        posts
            .iter()
            .filter_map(|post| {
                let text = post.search_text();
                if !self.pattern.is_match(&text) {
                    return None;
                }
                Some(self.build_result(board, thread_id, post, &text, JobKind::Search))
            })
            .collect()
    }

    /// One result per post of a full-capture thread, no pattern test
    ///
    /// Snippets are taken from the comment only.
    pub fn capture_posts(&self, board: &str, thread_id: u64, posts: &[Post]) -> Vec<MatchResult> {
        posts
            .iter()
            .map(|post| {
                self.build_result(
                    board,
                    thread_id,
                    post,
                    post.comment_text(),
                    JobKind::FullCapture,
                )
            })
            .collect()
    }

    fn build_result(
        &self,
        board: &str,
        thread_id: u64,
        post: &Post,
        text: &str,
        origin: JobKind,
    ) -> MatchResult {
        MatchResult {
            board: board.to_string(),
            thread_id,
            post_id: post.post_id,
            url: self.endpoints.post_url(board, thread_id, post.post_id),
            media_url: post
                .media
                .as_ref()
                .map(|media| self.endpoints.media_url(board, media)),
            media_file: None,
            snippet: snippet(text),
            origin,
        }
    }
}
