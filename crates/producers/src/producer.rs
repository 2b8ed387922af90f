use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use fromager_core::{DomainError, DomainResult, Entity, ProducerId};

/// Earliest accepted founding year.
pub const MIN_FOUNDING_YEAR: i32 = 1900;

const OPERATION_SIZE_MSG: &str =
    r#"Operation size must be one of "small", "medium", "large", "family", "corporate""#;

/// Scale at which a producer operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationSize {
    Small,
    Medium,
    Large,
    Family,
    Corporate,
}

impl OperationSize {
    pub const ALL: [OperationSize; 5] = [
        OperationSize::Small,
        OperationSize::Medium,
        OperationSize::Large,
        OperationSize::Family,
        OperationSize::Corporate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationSize::Small => "small",
            OperationSize::Medium => "medium",
            OperationSize::Large => "large",
            OperationSize::Family => "family",
            OperationSize::Corporate => "corporate",
        }
    }
}

impl core::fmt::Display for OperationSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OperationSize {
    type Err = DomainError;

    /// Exact, case-sensitive match against the lowercase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| DomainError::validation(OPERATION_SIZE_MSG))
    }
}

/// Input for creating a producer (id is assigned by the store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProducer {
    pub name: String,
    pub founding_year: i32,
    pub operation_size: OperationSize,
    pub region: String,
    pub image: String,
}

impl NewProducer {
    /// Check every write-time rule against the given reference date.
    ///
    /// `operation_size` is already constrained by its type; see
    /// [`OperationSize::from_str`](core::str::FromStr) for the string check.
    pub fn validate(&self, today: NaiveDate) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_founding_year(self.founding_year, today)?;
        Ok(())
    }
}

/// A persisted producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Producer {
    pub id: ProducerId,
    pub name: String,
    pub founding_year: i32,
    pub operation_size: OperationSize,
    pub region: String,
    pub image: String,
}

impl Producer {
    pub fn from_new(id: ProducerId, new: NewProducer) -> Self {
        Self {
            id,
            name: new.name,
            founding_year: new.founding_year,
            operation_size: new.operation_size,
            region: new.region,
            image: new.image,
        }
    }
}

impl Entity for Producer {
    type Id = ProducerId;

    fn id(&self) -> ProducerId {
        self.id
    }

    fn entity_name() -> &'static str {
        "Producer"
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Name is required"));
    }
    Ok(())
}

fn validate_founding_year(year: i32, today: NaiveDate) -> DomainResult<()> {
    if !(MIN_FOUNDING_YEAR..=today.year()).contains(&year) {
        return Err(DomainError::validation(
            "Founding year must be between 1900 and the current year",
        ));
    }
    Ok(())
}
