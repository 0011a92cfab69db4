use rusqlite::{params, Connection, Row};

use super::errors::StoreResult;
use crate::models::Item;

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        price: row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
    })
}

/// Every item in the order the store returns them.
pub fn fetch_items(conn: &Connection) -> StoreResult<Vec<Item>> {
    let mut stmt = conn.prepare("SELECT id, name, description, price FROM items")?;

    let items = stmt
        .query_map([], item_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(items)
}

pub fn fetch_item(conn: &Connection, id: i64) -> StoreResult<Item> {
    Ok(conn.query_row(
        "SELECT id, name, description, price FROM items WHERE id = ?1",
        [id],
        item_from_row,
    )?)
}

/// Insert an item and return it with the store-assigned id.
pub fn create_item(conn: &Connection, item: &Item) -> StoreResult<Item> {
    conn.execute(
        "INSERT INTO items (name, description, price) VALUES (?1, ?2, ?3)",
        params![item.name, item.description, item.price],
    )?;

    Ok(Item {
        id: conn.last_insert_rowid(),
        ..item.clone()
    })
}

/// Overwrite item `id` without checking that it exists.
pub fn update_item(conn: &Connection, id: i64, item: &Item) -> StoreResult<Item> {
    conn.execute(
        "UPDATE items SET name = ?1, description = ?2, price = ?3 WHERE id = ?4",
        params![item.name, item.description, item.price, id],
    )?;

    Ok(Item { id, ..item.clone() })
}

pub fn delete_item(conn: &Connection, id: i64) -> StoreResult<()> {
    conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Store, StoreConfig, StoreError};

    fn store() -> Store {
        Store::open_in_memory(&StoreConfig::default()).unwrap()
    }

    #[test]
    fn test_seed_items() {
        let items = store().with_conn(fetch_items).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Item 1");
        assert_eq!(items[1].price, 20.99);
    }

    #[test]
    fn test_create_then_fetch() {
        let store = store();
        let draft = Item {
            id: 0,
            name: "Desk".to_string(),
            description: "Oak".to_string(),
            price: 150.0,
        };

        let created = store.with_conn(|c| create_item(c, &draft)).unwrap();
        let fetched = store.with_conn(|c| fetch_item(c, created.id)).unwrap();
        assert_eq!(created, fetched);
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let store = store();
        let draft = Item {
            name: "Item 1".to_string(),
            ..Default::default()
        };
        assert!(store.with_conn(|c| create_item(c, &draft)).is_ok());
    }

    #[test]
    fn test_list_empty_after_delete_all() {
        let store = store();
        for item in store.with_conn(fetch_items).unwrap() {
            store.with_conn(|c| delete_item(c, item.id)).unwrap();
        }
        assert!(store.with_conn(fetch_items).unwrap().is_empty());
        assert!(matches!(
            store.with_conn(|c| fetch_item(c, 1)),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_text_price_is_decode_error() {
        let store = store();
        store
            .with_conn(|c| {
                c.execute(
                    "INSERT INTO items (name, price) VALUES ('odd', 'not a number')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();

        assert!(matches!(
            store.with_conn(fetch_items),
            Err(StoreError::Decode(_))
        ));
    }
}
