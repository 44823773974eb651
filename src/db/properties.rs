use crate::db::connection::Database;
use crate::domain::{Property, PropertyId, PropertyType};
use crate::errors::ServerError;
use crate::search::PropertyStore;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

const SELECT_COLUMNS: &str = r#"
    SELECT id, title, location, type, bedrooms, bathrooms, area, price,
           description, features, images
    FROM properties
"#;

/// Raw column values; converted to a `Property` outside the row callback
/// so JSON and enum decoding errors surface as `ServerError`.
struct PropertyRow {
    id: String,
    title: String,
    location: String,
    property_type: String,
    bedrooms: u32,
    bathrooms: u32,
    area: String,
    price: String,
    description: String,
    features: String,
    images: String,
}

impl PropertyRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            location: row.get(2)?,
            property_type: row.get(3)?,
            bedrooms: row.get(4)?,
            bathrooms: row.get(5)?,
            area: row.get(6)?,
            price: row.get(7)?,
            description: row.get(8)?,
            features: row.get(9)?,
            images: row.get(10)?,
        })
    }

    fn into_property(self) -> Result<Property, ServerError> {
        let id = PropertyId::parse(&self.id)
            .ok_or_else(|| ServerError::DbError("property row with blank id".into()))?;
        let property_type = self
            .property_type
            .parse::<PropertyType>()
            .map_err(ServerError::DbError)?;

        Ok(Property {
            id,
            title: self.title,
            location: self.location,
            property_type,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area: self.area,
            price: self.price,
            description: self.description,
            features: serde_json::from_str(&self.features)?,
            images: serde_json::from_str(&self.images)?,
        })
    }
}

pub fn count_properties(conn: &Connection) -> Result<usize, ServerError> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM properties", [], |r| r.get(0))?;
    Ok(n as usize)
}

/// All listings in insertion order.
pub fn list_properties(conn: &Connection) -> Result<Vec<Property>, ServerError> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY rowid"))?;
    let rows = stmt.query_map([], PropertyRow::from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?.into_property()?);
    }
    Ok(out)
}

pub fn get_property(conn: &Connection, id: &PropertyId) -> Result<Option<Property>, ServerError> {
    let row = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id.as_str()],
            PropertyRow::from_row,
        )
        .optional()?;

    row.map(PropertyRow::into_property).transpose()
}

fn insert_property(tx: &Connection, prop: &Property, now: i64) -> Result<(), ServerError> {
    tx.execute(
        r#"
        INSERT INTO properties (
            id, title, location, type, bedrooms, bathrooms, area, price,
            description, features, images, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
        params![
            prop.id.as_str(),
            &prop.title,
            &prop.location,
            prop.property_type.as_str(),
            prop.bedrooms,
            prop.bathrooms,
            &prop.area,
            &prop.price,
            &prop.description,
            serde_json::to_string(&prop.features)?,
            serde_json::to_string(&prop.images)?,
            now,
        ],
    )?;
    Ok(())
}

/// Batch load: existing listings are removed and `properties` inserted in
/// one transaction. Returns the number of rows written.
pub fn replace_all_properties(db: &Database, properties: &[Property]) -> Result<usize, ServerError> {
    let now = Utc::now().timestamp();

    let written = db.with_conn(|conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM properties", [])?;
        for prop in properties {
            insert_property(&tx, prop, now)?;
        }
        tx.commit()?;
        Ok(properties.len())
    })?;

    info!(count = written, "seeded properties");
    Ok(written)
}

impl PropertyStore for Database {
    fn count(&self) -> Result<usize, ServerError> {
        self.with_conn(|conn| count_properties(conn))
    }

    fn list(&self) -> Result<Vec<Property>, ServerError> {
        self.with_conn(|conn| list_properties(conn))
    }

    fn get(&self, id: &PropertyId) -> Result<Option<Property>, ServerError> {
        self.with_conn(|conn| get_property(conn, id))
    }
}
