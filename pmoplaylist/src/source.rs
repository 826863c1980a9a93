//! Source parser: raw user input to source identifiers
//!
//! Two shapes are accepted:
//!
//! - a single URL, taken literally (after trimming)
//! - a JSON batch: `[{"url": "https://..."}, {"url": "https://..."}]`
//!
//! Nothing here touches the network; whether a URL is actually playable is
//! only known once it has been resolved.

use crate::error::ParseError;
use pmoresolver::SourceIdentifier;
use serde_json::Value;

/// Parse raw input into an ordered list of identifiers
///
/// - empty or whitespace-only input fails with [`ParseError::EmptyInput`]
/// - a JSON array yields the `url` string of each object, in array order;
///   entries without one are skipped, and a batch left empty fails with
///   [`ParseError::NoValidEntries`]
/// - anything else (invalid JSON, or JSON that is not an array) is a single
///   literal URL
///
/// # Example
///
/// ```
/// use pmoplaylist::source::parse;
///
/// let ids = parse(r#"[{"url":"https://a"},{"title":"no url"},{"url":"https://b"}]"#).unwrap();
/// assert_eq!(ids.len(), 2);
/// assert_eq!(ids[1].as_str(), "https://b");
///
/// let single = parse("  https://example.com/a \n").unwrap();
/// assert_eq!(single[0].as_str(), "https://example.com/a");
/// ```
pub fn parse(raw: &str) -> Result<Vec<SourceIdentifier>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(entries)) => {
            let ids: Vec<SourceIdentifier> = entries.iter().filter_map(entry_url).collect();
            if ids.is_empty() {
                return Err(ParseError::NoValidEntries);
            }
            tracing::debug!("Parsed JSON batch: {} of {} entries usable", ids.len(), entries.len());
            Ok(ids)
        }
        _ => Ok(vec![SourceIdentifier::new(trimmed)]),
    }
}

/// `url` of a batch entry, if it is an object with a non-blank string `url`
fn entry_url(entry: &Value) -> Option<SourceIdentifier> {
    let url = entry.as_object()?.get("url")?.as_str()?.trim();
    if url.is_empty() {
        None
    } else {
        Some(SourceIdentifier::new(url))
    }
}
