//! Payload structure parsing and serialization
//!
//! The decoded transport text is a two-element JSON array:
//!
//! ```text
//! [["#1d1e23", "#f74070", ...], [0, 1, 1, 2, ...]]
//! ```
//!
//! The first element is the palette (strings), the second the per-cell
//! indices (numbers). Parsing goes through `serde_json` so quoting, escapes
//! and nesting are handled by a real grammar; token contents never affect
//! where one element ends and the next begins.

use serde_json::Value;

use crate::error::{CodecError, Result};

/// Raw tokens extracted from a payload, before any validation of their
/// contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawStructure {
    /// Palette entries, unescaped but otherwise untouched
    pub palette_tokens: Vec<String>,
    /// Index entries exactly as written in the source text (`"3"`, `"-1"`,
    /// `"1.5"`, `"1e2"`)
    pub index_tokens: Vec<String>,
}

/// Parse decoded payload bytes, which must be UTF-8 text.
pub fn parse_bytes(bytes: &[u8]) -> Result<RawStructure> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        CodecError::StructureFormat(format!("payload is not valid UTF-8: {}", e))
    })?;
    parse(text)
}

/// Parse payload text into its palette and index token lists.
///
/// # Examples
///
/// ```
/// use hexel::structure::parse;
///
/// let raw = parse(r##"[["#000","#fff"],[0,1,1,0]]"##).unwrap();
/// assert_eq!(raw.palette_tokens, vec!["#000", "#fff"]);
/// assert_eq!(raw.index_tokens, vec!["0", "1", "1", "0"]);
/// ```
///
/// # Errors
///
/// Returns `CodecError::StructureFormat` if the text is not valid JSON or
/// does not have the `[[strings...], [numbers...]]` shape.
pub fn parse(text: &str) -> Result<RawStructure> {
    let value: Value = serde_json::from_str(text)?;

    let outer = match value {
        Value::Array(items) => items,
        other => {
            return Err(CodecError::StructureFormat(format!(
                "expected a two-element array, found {}",
                describe(&other)
            )))
        }
    };
    let [palette, indices]: [Value; 2] = outer.try_into().map_err(|items: Vec<Value>| {
        CodecError::StructureFormat(format!(
            "expected a two-element array, found {} elements",
            items.len()
        ))
    })?;

    let palette_tokens = palette_tokens(palette)?;
    let index_tokens = index_tokens(indices)?;

    tracing::debug!(
        palette = palette_tokens.len(),
        indices = index_tokens.len(),
        "payload structure parsed"
    );

    Ok(RawStructure { palette_tokens, index_tokens })
}

fn palette_tokens(value: Value) -> Result<Vec<String>> {
    let items = expect_array(value, "palette")?;
    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| match item {
            Value::String(s) => Ok(s),
            other => Err(CodecError::StructureFormat(format!(
                "palette entry {} must be a string, found {}",
                position,
                describe(&other)
            ))),
        })
        .collect()
}

fn index_tokens(value: Value) -> Result<Vec<String>> {
    let items = expect_array(value, "index list")?;
    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| match item {
            Value::Number(n) => Ok(n.to_string()),
            other => Err(CodecError::StructureFormat(format!(
                "index entry {} must be a number, found {}",
                position,
                describe(&other)
            ))),
        })
        .collect()
}

fn expect_array(value: Value, what: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(CodecError::StructureFormat(format!(
            "{} must be an array, found {}",
            what,
            describe(&other)
        ))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serialize a palette and index list as compact payload text.
///
/// The output has no whitespace, e.g. `[["#aa0000","#bb0000"],[0,1,0]]`.
pub fn serialize<C: AsRef<str>>(palette: &[C], indices: &[usize]) -> Result<String> {
    let palette: Vec<&str> = palette.iter().map(AsRef::as_ref).collect();
    Ok(serde_json::to_string(&(palette, indices))?)
}
