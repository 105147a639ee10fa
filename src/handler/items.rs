//! Item endpoints

use super::body::{body_loc, embedded};
use super::{respond, RequestInput};
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::models::Item;
use crate::validation::{params, IntBounds, Location, ObjectValidator, ValidationErrors};
use serde::Serialize;
use serde_json::json;

/// Stand-in catalogue served by `GET /items/`
static ITEM_NAMES: [&str; 5] = ["Foo", "Smart", "Null", "Moll", "Snorl"];

const ITEM_ID_BOUNDS: IntBounds = IntBounds::NONE.ge(0).le(10_000);
const SKIP_BOUNDS: IntBounds = IntBounds::NONE.ge(0).lt(9);
const LIMIT_BOUNDS: IntBounds = IntBounds::NONE.le(10);
const DEFAULT_SKIP: i64 = 0;
const DEFAULT_LIMIT: i64 = 10;
const MAX_QUERY_TERMS: usize = 50;

#[derive(Serialize)]
struct UpdatedItem {
    item_id: i64,
    item: Item,
    importance: i64,
}

/// `POST /item` with body `{"item": Item}`
pub fn create_item(input: &RequestInput) -> Result<HttpResponse, ApiError> {
    let body = embedded(&input.body)?;
    let fields = ObjectValidator::embedded(&body, body_loc())?;
    let item = Item::validate(fields.value("item"), fields.nested_loc("item"))?;
    respond(&item)
}

/// `PUT /items/{item_id}` with body `{"item": Item, "importance": int}`
pub fn update_item(input: &RequestInput) -> Result<HttpResponse, ApiError> {
    let body = embedded(&input.body)?;

    let mut errors = ValidationErrors::default();
    let item_id = errors.take(params::required_int(
        Location::Path,
        "item_id",
        input.params.get("item_id"),
        ITEM_ID_BOUNDS,
    ));

    let (item, importance) = match ObjectValidator::embedded(&body, body_loc()) {
        Ok(mut fields) => {
            let item = errors.take_all(Item::validate(
                fields.value("item"),
                fields.nested_loc("item"),
            ));
            let importance = fields.required_int("importance");
            errors.extend(fields.into_errors());
            (item, importance)
        }
        Err(e) => {
            errors.extend(e);
            (None, None)
        }
    };

    match (item_id, item, importance) {
        (Some(item_id), Some(item), Some(importance)) if errors.is_empty() => {
            respond(&UpdatedItem {
                item_id,
                item,
                importance,
            })
        }
        _ => Err(errors.into()),
    }
}

/// `GET /item/{item_id}`
pub fn get_item(input: &RequestInput) -> Result<HttpResponse, ApiError> {
    let item_id = params::required_number(Location::Path, "item_id", input.params.get("item_id"))
        .map_err(ValidationErrors::from)?;
    respond(&json!({ "item": item_id }))
}

/// `GET /items/?skip=&limit=&q=&all=`
///
/// A non-empty `q` wins, then `all=true`, then the `[skip:limit]` slice.
pub fn list_item_names(input: &RequestInput) -> Result<HttpResponse, ApiError> {
    let query = &input.query;
    let mut errors = ValidationErrors::default();
    let skip = errors.take(params::int_or_default(
        Location::Query,
        "skip",
        query.get("skip"),
        DEFAULT_SKIP,
        SKIP_BOUNDS,
    ));
    let limit = errors.take(params::int_or_default(
        Location::Query,
        "limit",
        query.get("limit"),
        DEFAULT_LIMIT,
        LIMIT_BOUNDS,
    ));
    let terms = errors.take(params::optional_list(
        Location::Query,
        "q",
        query.get_all("q"),
        MAX_QUERY_TERMS,
    ));
    let all = errors.take(params::optional_bool(Location::Query, "all", query.get("all")));

    let (Some(skip), Some(limit), Some(terms), Some(all)) = (skip, limit, terms, all) else {
        return Err(errors.into());
    };

    let body = if let Some(terms) = terms {
        json!({ "q": terms })
    } else if all == Some(true) {
        json!({ "All items": { "items_names": ITEM_NAMES } })
    } else {
        json!({ "items names": slice(&ITEM_NAMES, skip, limit) })
    };
    respond(&body)
}

/// `items[start:stop]` with negative indices counted from the end and
/// out-of-range bounds clamped
fn slice<T>(items: &[T], start: i64, stop: i64) -> &[T] {
    let len = items.len();
    let resolve = |index: i64| -> usize {
        let magnitude = usize::try_from(index.unsigned_abs()).unwrap_or(usize::MAX);
        if index < 0 {
            len.saturating_sub(magnitude)
        } else {
            magnitude.min(len)
        }
    };

    let (start, stop) = (resolve(start), resolve(stop));
    if start >= stop {
        return &[];
    }
    &items[start..stop]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_defaults_return_everything() {
        assert_eq!(slice(&ITEM_NAMES, 0, 10), &ITEM_NAMES);
    }

    #[test]
    fn test_slice_bounds() {
        assert_eq!(slice(&ITEM_NAMES, 1, 3), &["Smart", "Null"]);
        assert_eq!(slice(&ITEM_NAMES, 0, -2), &["Foo", "Smart", "Null"]);
        assert_eq!(slice(&ITEM_NAMES, 3, -1), &["Moll"]);
        assert_eq!(slice(&ITEM_NAMES, 0, -100), &[] as &[&str]);
        assert_eq!(slice(&ITEM_NAMES, 4, 2), &[] as &[&str]);
        assert_eq!(slice(&ITEM_NAMES, 8, 10), &[] as &[&str]);
    }
}
