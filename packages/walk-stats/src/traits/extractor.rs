//! Extractor trait: day units in, structured entries out.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Turns post units into raw stat entries.
///
/// Implementations should return exactly one entry per unit, in the same
/// order. Callers do not verify this; a length mismatch is logged and the
/// entries are used as returned. Entries are loosely typed JSON because the
/// result normalizer, not the extractor, owns coercion.
#[async_trait]
pub trait StatExtractor: Send + Sync {
    /// Short name for logs and health output.
    fn name(&self) -> &str;

    /// Extract one `{ date_label, minutes, miles, calories, steps }` entry per unit.
    async fn extract(&self, units: &[String]) -> Result<Vec<Value>>;
}
