//! Prompts for language-model extraction.

use crate::error::Result;

/// Fixed instruction describing the five-field schema and parsing rules.
pub const EXTRACT_STATS_PROMPT: &str = r#"You are a strict JSON API that extracts walking stats from class posts.

Return ONLY JSON: { "results": [...] } with exactly one entry per input post, in input order.

Each entry must have:
- "date_label": string or null
- "minutes": number or null
- "miles": number or null
- "calories": number or null
- "steps": number or null

DATE RULES: format as "Oct 30", "Nov 18". Missing date -> null.
STATS RULES: parse "31 minutes", "1.81 miles", "3,823 steps", "117 calories". Missing stat -> null.
Ignore elevation and BPM. "1/15 miles" means 1.15 miles."#;

/// User message listing the units as a pretty-printed JSON array.
pub fn format_extract_prompt(units: &[String]) -> Result<String> {
    let posts = serde_json::to_string_pretty(units)?;
    Ok(format!(
        "Here is an array of posts (each full post as one element):\n\n{}\n\nReturn exactly one JSON object: {{ \"results\": [...] }}.",
        posts
    ))
}
