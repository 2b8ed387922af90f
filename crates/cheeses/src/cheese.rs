use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fromager_core::{CheeseId, DomainError, DomainResult, Entity, ProducerId};

/// Lowest accepted price (inclusive).
pub const MIN_PRICE: f64 = 1.00;
/// Highest accepted price (inclusive).
pub const MAX_PRICE: f64 = 45.00;

/// Input for creating a cheese (id is assigned by the store).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCheese {
    pub producer_id: ProducerId,
    pub production_date: NaiveDate,
    pub price: f64,
    pub is_raw_milk: bool,
    pub kind: String,
    pub image: String,
}

impl NewCheese {
    /// Check every write-time rule against the given reference date.
    ///
    /// Producer existence is a storage concern and is checked by the repository.
    pub fn validate(&self, today: NaiveDate) -> DomainResult<()> {
        validate_production_date(self.production_date, today)?;
        validate_price(self.price)?;
        Ok(())
    }
}

/// A persisted cheese.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cheese {
    pub id: CheeseId,
    pub producer_id: ProducerId,
    pub production_date: NaiveDate,
    pub price: f64,
    pub is_raw_milk: bool,
    pub kind: String,
    pub image: String,
}

impl Cheese {
    pub fn from_new(id: CheeseId, new: NewCheese) -> Self {
        Self {
            id,
            producer_id: new.producer_id,
            production_date: new.production_date,
            price: new.price,
            is_raw_milk: new.is_raw_milk,
            kind: new.kind,
            image: new.image,
        }
    }

    /// Returns a copy with the patch applied.
    ///
    /// Only fields present in the patch are validated; untouched fields keep
    /// the values they were stored with. `self` is never modified, so a
    /// rejected patch leaves the caller's state as it was.
    pub fn apply_patch(&self, patch: &CheesePatch, today: NaiveDate) -> DomainResult<Cheese> {
        let mut next = self.clone();

        if let Some(producer_id) = patch.producer_id {
            next.producer_id = producer_id;
        }
        if let Some(date) = patch.production_date {
            validate_production_date(date, today)?;
            next.production_date = date;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
            next.price = price;
        }
        if let Some(raw) = patch.is_raw_milk {
            next.is_raw_milk = raw;
        }
        if let Some(kind) = &patch.kind {
            next.kind = kind.clone();
        }
        if let Some(image) = &patch.image {
            next.image = image.clone();
        }

        Ok(next)
    }
}

impl Entity for Cheese {
    type Id = CheeseId;

    fn id(&self) -> CheeseId {
        self.id
    }

    fn entity_name() -> &'static str {
        "Cheese"
    }
}

/// Partial update: `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheesePatch {
    pub producer_id: Option<ProducerId>,
    pub production_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub is_raw_milk: Option<bool>,
    pub kind: Option<String>,
    pub image: Option<String>,
}

impl CheesePatch {
    pub fn is_empty(&self) -> bool {
        self == &CheesePatch::default()
    }
}

fn validate_production_date(date: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if date >= today {
        return Err(DomainError::validation("Production date must be before today"));
    }
    Ok(())
}

// NaN fails the range check too.
fn validate_price(price: f64) -> DomainResult<()> {
    if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
        return Err(DomainError::validation("Price must be between 1.00 and 45.00"));
    }
    Ok(())
}
