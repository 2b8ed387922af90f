//! Row → domain mapping for the `producers` and `cheeses` tables.

use chrono::NaiveDate;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use fromager_cheeses::Cheese;
use fromager_core::{CheeseId, ProducerId};
use fromager_producers::{OperationSize, Producer};

pub(crate) const PRODUCER_COLUMNS: &str = "id, name, founding_year, operation_size, region, image";

pub(crate) const CHEESE_COLUMNS: &str =
    "id, producer_id, production_date, price, is_raw_milk, kind, image";

pub(crate) fn producer_from_row(row: &SqliteRow) -> Result<Producer, sqlx::Error> {
    let raw_size: String = row.try_get("operation_size")?;
    let operation_size = raw_size
        .parse::<OperationSize>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(Producer {
        id: ProducerId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        founding_year: row.try_get("founding_year")?,
        operation_size,
        region: row.try_get("region")?,
        image: row.try_get("image")?,
    })
}

pub(crate) fn cheese_from_row(row: &SqliteRow) -> Result<Cheese, sqlx::Error> {
    Ok(Cheese {
        id: CheeseId::new(row.try_get("id")?),
        producer_id: ProducerId::new(row.try_get("producer_id")?),
        production_date: row.try_get::<NaiveDate, _>("production_date")?,
        price: row.try_get("price")?,
        is_raw_milk: row.try_get("is_raw_milk")?,
        kind: row.try_get("kind")?,
        image: row.try_get("image")?,
    })
}
