// src/db/cart.rs
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::domain::{PropertyId, SavedItem};
use crate::errors::ServerError;

fn saved_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<(i64, i64, String, i64)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn into_item((id, user_id, property_id, added_at): (i64, i64, String, i64)) -> Result<SavedItem, ServerError> {
    let property_id = PropertyId::parse(&property_id)
        .ok_or_else(|| ServerError::DbError("saved item with blank property id".into()))?;
    Ok(SavedItem {
        id,
        user_id,
        property_id,
        added_at,
    })
}

/// Save a property for a user. A second save of the same id is a
/// `BadRequest`.
pub fn add_item(
    conn: &Connection,
    user_id: i64,
    property_id: &PropertyId,
    now: i64,
) -> Result<SavedItem, ServerError> {
    let inserted = conn.execute(
        "insert into saved_properties (user_id, property_id, added_at) values (?, ?, ?)",
        params![user_id, property_id.as_str(), now],
    );

    match inserted {
        Ok(_) => Ok(SavedItem {
            id: conn.last_insert_rowid(),
            user_id,
            property_id: property_id.clone(),
            added_at: now,
        }),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(ServerError::BadRequest("Already in your cart".into()))
        }
        Err(e) => Err(ServerError::DbError(format!("insert saved item failed: {e}"))),
    }
}

/// Newest first.
pub fn list_items(conn: &Connection, user_id: i64) -> Result<Vec<SavedItem>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        select id, user_id, property_id, added_at
        from saved_properties
        where user_id = ?
        order by added_at desc, id desc
        "#,
    )?;
    let rows = stmt.query_map(params![user_id], saved_item)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(into_item(row?)?);
    }
    Ok(out)
}

pub fn find_item(
    conn: &Connection,
    user_id: i64,
    property_id: &PropertyId,
) -> Result<Option<SavedItem>, ServerError> {
    conn.query_row(
        "select id, user_id, property_id, added_at from saved_properties where user_id = ? and property_id = ?",
        params![user_id, property_id.as_str()],
        saved_item,
    )
    .optional()?
    .map(into_item)
    .transpose()
}

/// Returns whether a row was removed.
pub fn remove_item(
    conn: &Connection,
    user_id: i64,
    property_id: &PropertyId,
) -> Result<bool, ServerError> {
    let n = conn.execute(
        "delete from saved_properties where user_id = ? and property_id = ?",
        params![user_id, property_id.as_str()],
    )?;
    Ok(n > 0)
}
