//! Table identifier sanitization.
//!
//! Every function here is total: any input string, including empty,
//! whitespace-only or purely symbolic text, maps to a usable identifier.

use once_cell::sync::Lazy;
use regex::Regex;

/// Name used when sanitization leaves nothing usable.
pub const DEFAULT_TABLE_NAME: &str = "default_table_name";

/// Prefix added to names that would otherwise start with a digit.
const DIGIT_PREFIX: &str = "table_";

static INVALID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());
static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());
static FILE_EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[^/.]+$").unwrap());

/// Turn an arbitrary string into a safe table identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, runs of `_` collapse to
/// one, and leading/trailing `_` are stripped. Names starting with a digit
/// get a `table_` prefix. Idempotent: `sanitize(&sanitize(x)) == sanitize(x)`.
pub fn sanitize(candidate: &str) -> String {
    let replaced = INVALID_CHARS.replace_all(candidate, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");

    let mut name: &str = &collapsed;
    if name.len() > 1 {
        name = name.trim_matches('_');
    }
    if is_unusable(name) {
        return DEFAULT_TABLE_NAME.to_string();
    }

    let name = if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{DIGIT_PREFIX}{name}")
    } else {
        name.to_string()
    };

    if is_unusable(&name) {
        return DEFAULT_TABLE_NAME.to_string();
    }
    name
}

/// Derive a table name for a source.
///
/// A non-blank `custom_name` wins. Otherwise the last path segment of `url`
/// is used, minus one trailing `.extension`.
///
/// ```
/// use tabload::naming::derive_name;
///
/// assert_eq!(derive_name("https://x/data.CSV", None), "data");
/// assert_eq!(derive_name("https://x/123a.csv", None), "table_123a");
/// assert_eq!(derive_name("https://x/data.csv", Some(" my books ")), "my_books");
/// ```
pub fn derive_name(url: &str, custom_name: Option<&str>) -> String {
    if let Some(custom) = custom_name.map(str::trim).filter(|c| !c.is_empty()) {
        return sanitize(custom);
    }

    let file_name = url.rsplit('/').next().unwrap_or(url);
    let stem = FILE_EXTENSION.replace(file_name, "");
    if stem.is_empty() {
        return DEFAULT_TABLE_NAME.to_string();
    }
    sanitize(&stem)
}

/// Quote an identifier for embedding in SQL text, doubling inner quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn is_unusable(name: &str) -> bool {
    name.is_empty() || name == "_"
}
