//! Cursor-based pagination over in-memory result lists.
//!
//! Pages are cut from a fully materialized list. The cursor only carries the
//! offset of the next page (`start_index`), so a cursor replayed against a
//! different or shrunken list simply clamps to that list's length.
//!
//! ```
//! use ankirelay_engine::paginate::paginate;
//!
//! let items: Vec<char> = ('a'..='j').collect();
//! let first = paginate(items.clone(), None, 3).unwrap();
//! assert_eq!(first.items, vec!['a', 'b', 'c']);
//!
//! let second = paginate(items, first.next_cursor.as_deref(), 3).unwrap();
//! assert_eq!(second.items, vec!['d', 'e', 'f']);
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::cursor::{self, CursorFields};
use crate::error::Result;

/// The cursor field holding the offset of the next page.
pub const START_INDEX: &str = "start_index";

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items in this page, in original order.
    pub items: Vec<T>,
    /// Cursor for the next page. Absent on the last page.
    #[serde(rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Read the starting offset from a cursor.
///
/// A missing or empty cursor starts at 0. An undecodable cursor is an error.
/// A missing, negative or non-numeric `start_index` reads as 0.
pub fn start_offset(cursor: Option<&str>) -> Result<usize> {
    let cursor = match cursor {
        Some(c) if !c.is_empty() => c,
        _ => return Ok(0),
    };

    let fields = cursor::decode(cursor)?;
    Ok(fields.get(START_INDEX).map(offset_from).unwrap_or(0))
}

fn offset_from(value: &Value) -> usize {
    let Value::Number(n) = value else {
        return 0;
    };
    if let Some(offset) = n.as_u64() {
        return usize::try_from(offset).unwrap_or(usize::MAX);
    }
    match n.as_f64() {
        // `as` saturates at usize::MAX.
        Some(f) if f > 0.0 => f as usize,
        _ => 0,
    }
}

/// Cut the page starting at `start` from `items`.
///
/// A page size of 0 is treated as 1. Starting at or past the end yields an
/// empty final page.
pub fn page_from<T>(mut items: Vec<T>, start: usize, page_size: usize) -> Page<T> {
    let len = items.len();
    if start >= len {
        return Page {
            items: Vec::new(),
            next_cursor: None,
        };
    }

    let end = start.saturating_add(page_size.max(1)).min(len);
    items.truncate(end);
    let page: Vec<T> = items.drain(start..).collect();

    let next_cursor = (end < len).then(|| {
        let mut fields = CursorFields::new();
        fields.insert(START_INDEX.to_string(), Value::from(end));
        cursor::encode(&fields)
    });

    Page {
        items: page,
        next_cursor,
    }
}

/// Return the page of `items` that `cursor` points at.
pub fn paginate<T>(items: Vec<T>, cursor: Option<&str>, page_size: usize) -> Result<Page<T>> {
    let start = start_offset(cursor)?;
    Ok(page_from(items, start, page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use proptest::prelude::*;
    use serde_json::json;

    fn cursor_for(value: Value) -> String {
        match value {
            Value::Object(map) => cursor::encode(&map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_ten_letters_in_pages_of_three() {
        let items: Vec<char> = ('a'..='j').collect();

        let page1 = paginate(items.clone(), None, 3).unwrap();
        assert_eq!(page1.items, vec!['a', 'b', 'c']);
        let cursor1 = page1.next_cursor.unwrap();
        assert_eq!(cursor::decode(&cursor1).unwrap()[START_INDEX], json!(3));

        let page2 = paginate(items.clone(), Some(&cursor1), 3).unwrap();
        assert_eq!(page2.items, vec!['d', 'e', 'f']);

        let page3 = paginate(items.clone(), page2.next_cursor.as_deref(), 3).unwrap();
        assert_eq!(page3.items, vec!['g', 'h', 'i']);

        let page4 = paginate(items, page3.next_cursor.as_deref(), 3).unwrap();
        assert_eq!(page4.items, vec!['j']);
        assert!(page4.next_cursor.is_none());
    }

    #[test]
    fn test_exact_fit_has_no_cursor() {
        let page = paginate(vec![1, 2, 3], None, 3).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_empty_cursor_starts_at_zero() {
        let page = paginate(vec![1, 2], Some(""), 1).unwrap();
        assert_eq!(page.items, vec![1]);
    }

    #[test]
    fn test_out_of_range_cursor_is_empty_page() {
        let cursor = cursor_for(json!({"start_index": 50}));
        let page = paginate(vec![1, 2, 3], Some(&cursor), 10).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_missing_or_wrong_type_start_index() {
        for fields in [
            json!({}),
            json!({"start_index": "3"}),
            json!({"start_index": -4}),
            json!({"start_index": null}),
        ] {
            let cursor = cursor_for(fields);
            assert_eq!(start_offset(Some(&cursor)).unwrap(), 0);
        }
    }

    #[test]
    fn test_fractional_start_index_truncates() {
        let cursor = cursor_for(json!({"start_index": 2.7}));
        assert_eq!(start_offset(Some(&cursor)).unwrap(), 2);
    }

    #[test]
    fn test_invalid_cursor_is_not_reset() {
        let err = paginate(vec![1, 2, 3], Some("%%%"), 2).unwrap_err();
        assert!(matches!(err, Error::InvalidCursor(_)));
    }

    #[test]
    fn test_zero_page_size_is_one() {
        let page = paginate(vec![1, 2], None, 0).unwrap();
        assert_eq!(page.items, vec![1]);
        assert!(page.next_cursor.is_some());
    }

    #[test]
    fn test_serialized_shape() {
        let last = page_from(vec![1], 0, 5);
        assert_eq!(serde_json::to_value(&last).unwrap(), json!({"items": [1]}));

        let first = page_from(vec![1, 2], 0, 1);
        let value = serde_json::to_value(&first).unwrap();
        assert!(value["nextCursor"].is_string());
    }

    proptest! {
        #[test]
        fn prop_cursor_chain_visits_every_item_once(len in 0usize..300, page_size in 1usize..40) {
            let items: Vec<usize> = (0..len).collect();
            let mut seen = Vec::new();
            let mut cursor: Option<String> = None;
            let mut pages = 0;

            loop {
                let page = paginate(items.clone(), cursor.as_deref(), page_size).unwrap();
                prop_assert!(page.items.len() <= page_size);
                seen.extend(page.items);
                pages += 1;
                match page.next_cursor {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }

            prop_assert_eq!(seen, items);
            prop_assert_eq!(pages, len.div_ceil(page_size).max(1));
        }
    }
}
