use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use fromager_cheeses::{Cheese, CheesePatch, NewCheese};
use fromager_core::ProducerId;
use fromager_producers::{NewProducer, OperationSize, Producer};

use crate::app::errors;

/// Input format for `production_date`.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
/// Output format for `production_date` (midnight timestamp).
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// -------------------------
// Request DTOs
// -------------------------

// Every field is optional so a missing key can be reported as
// "Missing fields" instead of an extractor rejection.

#[derive(Debug, Deserialize)]
pub struct CreateProducerRequest {
    pub name: Option<String>,
    pub founding_year: Option<i32>,
    pub operation_size: Option<String>,
    pub region: Option<String>,
    pub image: Option<String>,
}

impl CreateProducerRequest {
    pub fn into_new_producer(self) -> Result<NewProducer, axum::response::Response> {
        let (Some(name), Some(founding_year), Some(operation_size), Some(region), Some(image)) = (
            self.name,
            self.founding_year,
            self.operation_size,
            self.region,
            self.image,
        ) else {
            return Err(errors::missing_fields());
        };

        let operation_size = operation_size
            .parse::<OperationSize>()
            .map_err(|e| errors::validation_errors(e.to_string()))?;

        Ok(NewProducer {
            name,
            founding_year,
            operation_size,
            region,
            image,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCheeseRequest {
    pub kind: Option<String>,
    pub is_raw_milk: Option<bool>,
    pub production_date: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub producer_id: Option<i64>,
}

impl CreateCheeseRequest {
    /// Presence check only; the date stays unparsed until the producer
    /// lookup has run.
    pub fn require_fields(self) -> Result<CheeseFields, axum::response::Response> {
        let (
            Some(kind),
            Some(is_raw_milk),
            Some(production_date),
            Some(image),
            Some(price),
            Some(producer_id),
        ) = (
            self.kind,
            self.is_raw_milk,
            self.production_date,
            self.image,
            self.price,
            self.producer_id,
        )
        else {
            return Err(errors::missing_fields());
        };

        Ok(CheeseFields {
            producer_id: ProducerId::new(producer_id),
            production_date,
            price,
            is_raw_milk,
            kind,
            image,
        })
    }
}

/// A create body with every required field present.
#[derive(Debug, Clone)]
pub struct CheeseFields {
    pub producer_id: ProducerId,
    pub production_date: String,
    pub price: f64,
    pub is_raw_milk: bool,
    pub kind: String,
    pub image: String,
}

impl CheeseFields {
    pub fn into_new_cheese(self) -> Result<NewCheese, axum::response::Response> {
        Ok(NewCheese {
            producer_id: self.producer_id,
            production_date: parse_production_date(&self.production_date)?,
            price: self.price,
            is_raw_milk: self.is_raw_milk,
            kind: self.kind,
            image: self.image,
        })
    }
}

/// PATCH body. Unknown keys are ignored, `null` counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCheeseRequest {
    pub kind: Option<String>,
    pub is_raw_milk: Option<bool>,
    pub production_date: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub producer_id: Option<i64>,
}

impl UpdateCheeseRequest {
    pub fn into_patch(self) -> Result<CheesePatch, axum::response::Response> {
        let production_date = self
            .production_date
            .as_deref()
            .map(parse_production_date)
            .transpose()?;

        Ok(CheesePatch {
            producer_id: self.producer_id.map(ProducerId::new),
            production_date,
            price: self.price,
            is_raw_milk: self.is_raw_milk,
            kind: self.kind,
            image: self.image,
        })
    }
}

fn parse_production_date(raw: &str) -> Result<NaiveDate, axum::response::Response> {
    NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT).map_err(|_| {
        errors::validation_errors(format!(
            "Production date must be formatted YYYY-MM-DD, got {raw:?}"
        ))
    })
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn format_production_date(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .format(DATE_OUTPUT_FORMAT)
        .to_string()
}

/// Producer fields without nested cheeses.
pub fn producer_summary_json(p: &Producer) -> serde_json::Value {
    serde_json::json!({
        "id": p.id,
        "name": p.name,
        "founding_year": p.founding_year,
        "operation_size": p.operation_size.as_str(),
        "region": p.region,
        "image": p.image,
    })
}

pub fn producer_detail_json(p: &Producer, cheeses: &[Cheese]) -> serde_json::Value {
    let mut body = producer_summary_json(p);
    body["cheeses"] = cheeses.iter().map(cheese_json).collect();
    body
}

pub fn cheese_json(c: &Cheese) -> serde_json::Value {
    serde_json::json!({
        "id": c.id,
        "image": c.image,
        "is_raw_milk": c.is_raw_milk,
        "kind": c.kind,
        "price": c.price,
        "producer_id": c.producer_id,
        "production_date": format_production_date(c.production_date),
    })
}

/// Cheese plus an embedded `producer: {name}` object.
pub fn cheese_with_producer_json(c: &Cheese, producer: &Producer) -> serde_json::Value {
    let mut body = cheese_json(c);
    body["producer"] = serde_json::json!({ "name": producer.name });
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use fromager_core::CheeseId;

    fn producer() -> Producer {
        Producer {
            id: ProducerId::new(1),
            name: "Jasper Hill".to_string(),
            founding_year: 2003,
            operation_size: OperationSize::Small,
            region: "Vermont".to_string(),
            image: "https://example.com/jh.jpg".to_string(),
        }
    }

    fn cheese() -> Cheese {
        Cheese {
            id: CheeseId::new(9),
            producer_id: ProducerId::new(1),
            production_date: NaiveDate::from_ymd_opt(2023, 11, 5).unwrap(),
            price: 24.0,
            is_raw_milk: true,
            kind: "Bayley Hazen Blue".to_string(),
            image: "https://example.com/bhb.jpg".to_string(),
        }
    }

    #[test]
    fn production_date_is_rendered_as_midnight_timestamp() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 5).unwrap();
        assert_eq!(format_production_date(date), "2023-11-05 00:00:00");
    }

    #[test]
    fn summary_has_no_cheeses_key() {
        let body = producer_summary_json(&producer());
        assert_eq!(body["operation_size"], "small");
        assert!(body.get("cheeses").is_none());
    }

    #[test]
    fn detail_nests_cheeses() {
        let body = producer_detail_json(&producer(), &[cheese()]);
        assert_eq!(body["cheeses"][0]["id"], 9);
        assert_eq!(body["cheeses"][0]["production_date"], "2023-11-05 00:00:00");
    }

    #[test]
    fn cheese_embeds_producer_name() {
        let body = cheese_with_producer_json(&cheese(), &producer());
        assert_eq!(body["producer"]["name"], "Jasper Hill");
        assert_eq!(body["producer_id"], 1);
    }

    #[test]
    fn create_cheese_requires_every_field() {
        let req = CreateCheeseRequest {
            kind: Some("Brie".to_string()),
            is_raw_milk: Some(false),
            production_date: Some("2023-01-01".to_string()),
            image: None,
            price: Some(5.0),
            producer_id: Some(1),
        };
        let res = req.require_fields().unwrap_err();
        assert_eq!(res.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn presence_check_does_not_parse_the_date() {
        let req = CreateCheeseRequest {
            kind: Some("Brie".to_string()),
            is_raw_milk: Some(false),
            production_date: Some("not-a-date".to_string()),
            image: Some("x".to_string()),
            price: Some(5.0),
            producer_id: Some(7),
        };
        let fields = req.require_fields().unwrap();
        assert_eq!(fields.producer_id, ProducerId::new(7));

        let res = fields.into_new_cheese().unwrap_err();
        assert_eq!(res.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn patch_keeps_absent_fields_empty() {
        let req = UpdateCheeseRequest {
            price: Some(12.0),
            ..UpdateCheeseRequest::default()
        };
        let patch = req.into_patch().unwrap();
        assert_eq!(patch.price, Some(12.0));
        assert!(patch.kind.is_none());
        assert!(patch.production_date.is_none());
    }

    #[test]
    fn unknown_operation_size_is_a_validation_error() {
        let req = CreateProducerRequest {
            name: Some("X".to_string()),
            founding_year: Some(2000),
            operation_size: Some("gigantic".to_string()),
            region: Some("Y".to_string()),
            image: Some("Z".to_string()),
        };
        let res = req.into_new_producer().unwrap_err();
        assert_eq!(res.status(), axum::http::StatusCode::BAD_REQUEST);
    }
}
