//! Normalization of paginated API envelopes.
//!
//! The backend has shipped more than one nesting convention for paginated
//! responses over its lifetime. Rather than probing optional fields
//! sequentially, the recognized conventions are an explicit tagged variant
//! with a fixed precedence, and [`normalize`] maps any decoded body onto
//! the single [`PaginatedResult`] shape. The whole module is total: no
//! input, however malformed, produces an error.

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::PaginatedResult;
use tracing::debug;

/// The envelope conventions a response body can arrive in, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{ "data": { "items": [...], ...metadata } }`
    NestedItems,
    /// `{ "items": [...], ...metadata }`
    FlatItems,
    /// `{ "data": [...] }` with no metadata at all
    BareArray,
    /// Anything else; normalizes to an empty page
    Unrecognized,
}

impl ResponseShape {
    /// Classify a decoded response body. Precedence is `data.items`, then
    /// `items`, then `data` as a bare array.
    pub fn detect(raw: &Value) -> Self {
        if raw
            .get("data")
            .and_then(|data| data.get("items"))
            .map_or(false, Value::is_array)
        {
            return ResponseShape::NestedItems;
        }
        if raw.get("items").map_or(false, Value::is_array) {
            return ResponseShape::FlatItems;
        }
        if raw.get("data").map_or(false, Value::is_array) {
            return ResponseShape::BareArray;
        }
        ResponseShape::Unrecognized
    }
}

/// Normalize a raw response body into a [`PaginatedResult`].
///
/// Metadata fields (`pageNumber`, `pageSize`, `totalCount`, `totalPages`)
/// are read from the same nesting level as the matched item array. Whatever
/// is absent falls back to the requested page and page size, the decoded
/// item count, and the derived page count. Undecodable items degrade to an
/// empty page with defaulted metadata.
pub fn normalize<T: DeserializeOwned>(
    raw: &Value,
    requested_page: u32,
    requested_page_size: u32,
) -> PaginatedResult<T> {
    let shape = ResponseShape::detect(raw);
    let (item_value, meta) = match shape {
        ResponseShape::NestedItems => {
            (raw.get("data").and_then(|data| data.get("items")), raw.get("data"))
        }
        ResponseShape::FlatItems => (raw.get("items"), Some(raw)),
        ResponseShape::BareArray => (raw.get("data"), None),
        ResponseShape::Unrecognized => (None, None),
    };

    let (items, meta): (Vec<T>, Option<&Value>) =
        match item_value.and_then(|value| serde_json::from_value(value.clone()).ok()) {
            Some(items) => (items, meta),
            None => {
                if shape != ResponseShape::Unrecognized {
                    debug!(?shape, "items failed to decode, normalizing to empty page");
                }
                (Vec::new(), None)
            }
        };

    let page = meta_field(meta, "pageNumber")
        .map(|value| value as u32)
        .unwrap_or(requested_page);
    let page_size = meta_field(meta, "pageSize")
        .map(|value| value as u32)
        .unwrap_or(requested_page_size);
    let total_items = meta_field(meta, "totalCount").unwrap_or(items.len() as u64);
    let total_pages =
        meta_field(meta, "totalPages").unwrap_or_else(|| page_count(total_items, page_size));

    PaginatedResult {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Page count for a given total: `ceil(total_items / page_size)`, with 0
/// for an empty total or a zero page size.
pub fn page_count(total_items: u64, page_size: u32) -> u64 {
    if total_items == 0 || page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size as u64)
}

fn meta_field(meta: Option<&Value>, key: &str) -> Option<u64> {
    meta.and_then(|value| value.get(key)).and_then(Value::as_u64)
}
