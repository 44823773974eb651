use crate::auth;
use crate::db::cart as db_cart;
use crate::domain::{PropertyId, SavedProperty};
use crate::errors::ServerError;
use crate::responses::{json_response, message_response, ResultResp};
use crate::router::{authorization, now_unix, read_json};
use crate::state::AppState;
use astra::Request;
use serde_json::{json, Value};
use tracing::debug;

fn path_id(raw: &str) -> Result<PropertyId, ServerError> {
    PropertyId::parse(raw).ok_or_else(|| ServerError::BadRequest("Property ID required".into()))
}

/// GET /api/cart
///
/// Saved ids that resolve to no listing in either source are left out.
pub fn list(req: &Request, state: &AppState) -> ResultResp {
    let user = auth::authenticate(&state.db, authorization(req), now_unix())?;
    let items = state.db.with_conn(|conn| db_cart::list_items(conn, user.id))?;

    let dispatcher = state.dispatcher();
    let mut populated = Vec::with_capacity(items.len());
    for item in items {
        match dispatcher.find(&item.property_id)? {
            Some(property) => populated.push(SavedProperty::new(item, property)),
            None => debug!(property_id = %item.property_id, "saved property no longer listed"),
        }
    }

    json_response(200, &populated)
}

/// POST /api/cart  `{ "propertyId": "..." | 123 }`
pub fn add(req: &mut Request, state: &AppState) -> ResultResp {
    let user = auth::authenticate(&state.db, authorization(req), now_unix())?;
    let body: Value = read_json(req)?;

    let property_id = body
        .get("propertyId")
        .cloned()
        .and_then(|v| serde_json::from_value::<PropertyId>(v).ok())
        .ok_or_else(|| ServerError::BadRequest("Property ID required".into()))?;

    let now = now_unix();
    let item = state
        .db
        .with_conn(|conn| db_cart::add_item(conn, user.id, &property_id, now))?;
    let property = state.dispatcher().find(&property_id)?;

    json_response(
        200,
        &json!({
            "message": "Added to cart",
            "item": {
                "id": item.id,
                "userId": item.user_id,
                "addedAt": item.added_at,
                "propertyId": item.property_id,
                "property": property,
            }
        }),
    )
}

/// DELETE /api/cart/{propertyId}
pub fn remove(req: &Request, raw_id: &str, state: &AppState) -> ResultResp {
    let user = auth::authenticate(&state.db, authorization(req), now_unix())?;
    let property_id = path_id(raw_id)?;

    let removed = state
        .db
        .with_conn(|conn| db_cart::remove_item(conn, user.id, &property_id))?;
    if !removed {
        return Err(ServerError::NotFound("Item not found in cart".into()));
    }
    message_response(200, "Removed from cart")
}

/// GET /api/cart/check/{propertyId}
pub fn check(req: &Request, raw_id: &str, state: &AppState) -> ResultResp {
    let user = auth::authenticate(&state.db, authorization(req), now_unix())?;
    let property_id = path_id(raw_id)?;

    let item = state
        .db
        .with_conn(|conn| db_cart::find_item(conn, user.id, &property_id))?;
    json_response(200, &json!({ "inCart": item.is_some() }))
}
