//! Raw-post deduplication and splitting of multi-day posts.
//!
//! A date marker is a weekday abbreviation (optionally spelled out) followed
//! by whitespace and a numeric `m/d`, e.g. `Mon 10/30` or `Thursday 11/2`.
//! A post with two or more markers is cut at each marker's start; text before
//! the first marker belongs to no unit.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{PostUnit, RawPost};

lazy_static! {
    static ref DATE_MARKER_REGEX: Regex = Regex::new(
        r"(?i)(?:Mon|Tues|Tue|Wed|Thurs|Thu|Fri|Sat|Sun)[a-z]*\s+[0-9]{1,2}/[0-9]{1,2}"
    )
    .unwrap();
}

/// Drop exact-duplicate posts (case-sensitive, compared after trimming).
///
/// The first occurrence is kept in its original position.
pub fn dedupe_raw_posts<S: AsRef<str>>(posts: &[S]) -> Vec<RawPost> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique = Vec::new();

    for post in posts {
        let post = post.as_ref();
        if seen.insert(post.trim()) {
            unique.push(post.to_string());
        }
    }

    unique
}

/// Byte offsets where date markers start, left to right, non-overlapping.
pub fn date_marker_starts(post: &str) -> Vec<usize> {
    DATE_MARKER_REGEX.find_iter(post).map(|m| m.start()).collect()
}

/// Split one post into day units.
///
/// Zero or one marker: the trimmed post. Two or more: one trimmed segment
/// per marker. Empty results are dropped.
pub fn split_post(post: &str) -> Vec<PostUnit> {
    let starts = date_marker_starts(post);

    if starts.len() <= 1 {
        let trimmed = post.trim();
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }

    starts
        .iter()
        .enumerate()
        .filter_map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(post.len());
            let chunk = post[start..end].trim();
            (!chunk.is_empty()).then(|| chunk.to_string())
        })
        .collect()
}

/// Split every post, preserving post order and marker order within a post.
pub fn split_multi_date_posts<S: AsRef<str>>(posts: &[S]) -> Vec<PostUnit> {
    posts
        .iter()
        .flat_map(|post| split_post(post.as_ref()))
        .collect()
}
