//! Reading raw posts out of request bodies and local files.

use serde_json::Value;

/// String elements of `body.posts`. Anything else yields no posts.
pub fn posts_from_body(body: &Value) -> Vec<String> {
    body.get("posts")
        .and_then(Value::as_array)
        .map(|posts| {
            posts
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a posts file.
///
/// Accepts a JSON array of strings, a `{ "posts": [...] }` object, or plain
/// text where posts are separated by blank lines.
pub fn parse_posts_input(text: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Ok(body @ Value::Object(_)) => posts_from_body(&body),
        _ => split_paragraphs(text),
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    let mut posts = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                posts.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        posts.push(current.join("\n"));
    }

    posts
}
