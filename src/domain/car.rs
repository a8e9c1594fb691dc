//! Car record types and the validation layer.
//!
//! Incoming payloads ([`CarInput`], [`CarUpdate`]) are checked and normalized
//! here before anything reaches the database, so no out-of-range document is
//! ever persisted. [`CarRecord`] is the stored shape; its identifier lives
//! under `_id` in the collection.

use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::{CarStoreError, CarStoreResult, FieldViolation};

// Exclusive bounds: a value must be strictly between low and high.
const YEAR_BOUNDS: (i32, i32) = (1970, 2025);
const CM3_BOUNDS: (i32, i32) = (0, 5_000);
const KM_BOUNDS: (i32, i32) = (0, 500_000);
const PRICE_BOUNDS: (i32, i32) = (0, 100_000);

/// A single car document as stored in the `cars` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub brand: String,
    pub make: String,
    pub year: i32,
    pub cm3: i32,
    pub km: i32,
    pub price: i32,
}

/// Payload for creating a car. The identifier is assigned by the store;
/// a client-supplied `id` is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CarInput {
    /// Ignored on input; present here so clients echoing records back
    /// do not trip the deserializer.
    #[serde(default)]
    pub id: Option<String>,
    #[schema(example = "Ford")]
    pub brand: String,
    #[schema(example = "Fiesta")]
    pub make: String,
    #[schema(example = 2019)]
    pub year: i32,
    #[schema(example = 1500)]
    pub cm3: i32,
    #[schema(example = 120000)]
    pub km: i32,
    #[schema(example = 10000)]
    pub price: i32,
}

/// Partial update payload. Only fields that are present and non-null are
/// merged into the stored document; each one must still satisfy the same
/// constraint as on create. Identifiers are never updatable.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CarUpdate {
    pub brand: Option<String>,
    pub make: Option<String>,
    pub year: Option<i32>,
    pub cm3: Option<i32>,
    pub km: Option<i32>,
    pub price: Option<i32>,
}

impl CarRecord {
    /// Validates and normalizes a create payload, assigning a fresh
    /// identifier. Violations are collected across all fields so the client
    /// sees every problem at once.
    pub fn from_input(input: CarInput) -> CarStoreResult<Self> {
        let mut violations = Vec::new();
        check_non_empty("brand", &input.brand, &mut violations);
        check_non_empty("make", &input.make, &mut violations);
        check_bounds("year", input.year, YEAR_BOUNDS, &mut violations);
        check_bounds("cm3", input.cm3, CM3_BOUNDS, &mut violations);
        check_bounds("km", input.km, KM_BOUNDS, &mut violations);
        check_bounds("price", input.price, PRICE_BOUNDS, &mut violations);
        if !violations.is_empty() {
            return Err(CarStoreError::Validation(violations));
        }

        Ok(Self {
            id: ObjectId::new(),
            brand: title_case(&input.brand),
            make: title_case(&input.make),
            year: input.year,
            cm3: input.cm3,
            km: input.km,
            price: input.price,
        })
    }
}

impl CarUpdate {
    /// Checks every supplied field against its constraint and normalizes
    /// `brand`/`make` casing. Absent fields are left absent.
    pub fn validated(self) -> CarStoreResult<Self> {
        let mut violations = Vec::new();
        if let Some(brand) = &self.brand {
            check_non_empty("brand", brand, &mut violations);
        }
        if let Some(make) = &self.make {
            check_non_empty("make", make, &mut violations);
        }
        if let Some(year) = self.year {
            check_bounds("year", year, YEAR_BOUNDS, &mut violations);
        }
        if let Some(cm3) = self.cm3 {
            check_bounds("cm3", cm3, CM3_BOUNDS, &mut violations);
        }
        if let Some(km) = self.km {
            check_bounds("km", km, KM_BOUNDS, &mut violations);
        }
        if let Some(price) = self.price {
            check_bounds("price", price, PRICE_BOUNDS, &mut violations);
        }
        if !violations.is_empty() {
            return Err(CarStoreError::Validation(violations));
        }

        Ok(Self {
            brand: self.brand.map(|b| title_case(&b)),
            make: self.make.map(|m| title_case(&m)),
            year: self.year,
            cm3: self.cm3,
            km: self.km,
            price: self.price,
        })
    }

    /// True when no field survives the null-stripping, i.e. there is nothing
    /// to merge.
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.make.is_none()
            && self.year.is_none()
            && self.cm3.is_none()
            && self.km.is_none()
            && self.price.is_none()
    }

    /// Builds the `$set` document from the supplied fields only.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(brand) = &self.brand {
            set.insert("brand", brand.as_str());
        }
        if let Some(make) = &self.make {
            set.insert("make", make.as_str());
        }
        if let Some(year) = self.year {
            set.insert("year", year);
        }
        if let Some(cm3) = self.cm3 {
            set.insert("cm3", cm3);
        }
        if let Some(km) = self.km {
            set.insert("km", km);
        }
        if let Some(price) = self.price {
            set.insert("price", price);
        }
        set
    }
}

/// Title-cases a name: first letter of each whitespace-separated word
/// uppercased, the rest lowercased. Surrounding/repeated whitespace is
/// collapsed as a side effect of the split.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn check_bounds(
    field: &'static str,
    value: i32,
    (low, high): (i32, i32),
    out: &mut Vec<FieldViolation>,
) {
    if value <= low || value >= high {
        out.push(FieldViolation::new(
            field,
            format!("must be greater than {low} and less than {high}"),
        ));
    }
}

fn check_non_empty(field: &'static str, value: &str, out: &mut Vec<FieldViolation>) {
    if value.trim().is_empty() {
        out.push(FieldViolation::new(field, "must not be empty"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CarInput {
        CarInput {
            id: None,
            brand: "ford".to_string(),
            make: "fiesta".to_string(),
            year: 2019,
            cm3: 1500,
            km: 120_000,
            price: 10_000,
        }
    }

    #[test]
    fn title_case_normalizes_words() {
        assert_eq!(title_case("ford"), "Ford");
        assert_eq!(title_case("alfa romeo"), "Alfa Romeo");
        assert_eq!(title_case("FIAT"), "Fiat");
        assert_eq!(title_case("  golf  gti "), "Golf Gti");
    }

    #[test]
    fn from_input_normalizes_and_assigns_id() {
        let record = CarRecord::from_input(valid_input()).unwrap();
        assert_eq!(record.brand, "Ford");
        assert_eq!(record.make, "Fiesta");
        assert_eq!(record.year, 2019);
        assert_ne!(record.id.to_hex(), "");
    }

    #[test]
    fn from_input_rejects_boundary_values() {
        // Bounds are exclusive on both ends.
        let cases: [(&str, fn(&mut CarInput)); 8] = [
            ("year", |c| c.year = 1970),
            ("year", |c| c.year = 2025),
            ("cm3", |c| c.cm3 = 0),
            ("cm3", |c| c.cm3 = 5_000),
            ("km", |c| c.km = 0),
            ("km", |c| c.km = 500_000),
            ("price", |c| c.price = 0),
            ("price", |c| c.price = 100_000),
        ];

        for (field, mutate) in cases {
            let mut input = valid_input();
            mutate(&mut input);
            match CarRecord::from_input(input) {
                Err(CarStoreError::Validation(violations)) => {
                    assert_eq!(violations.len(), 1);
                    assert_eq!(violations[0].field, field);
                }
                other => panic!("expected validation error on {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn from_input_accepts_interior_values() {
        let cases: [fn(&mut CarInput); 8] = [
            |c| c.year = 1971,
            |c| c.year = 2024,
            |c| c.cm3 = 1,
            |c| c.cm3 = 4_999,
            |c| c.km = 1,
            |c| c.km = 499_999,
            |c| c.price = 1,
            |c| c.price = 99_999,
        ];
        for mutate in cases {
            let mut input = valid_input();
            mutate(&mut input);
            assert!(CarRecord::from_input(input).is_ok());
        }
    }

    #[test]
    fn from_input_collects_all_violations() {
        let mut input = valid_input();
        input.brand = "  ".to_string();
        input.year = 1800;
        input.price = 0;
        match CarRecord::from_input(input) {
            Err(CarStoreError::Validation(violations)) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, vec!["brand", "year", "price"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_with_no_fields_is_empty() {
        let update = CarUpdate::default();
        assert!(update.is_empty());
        assert!(update.to_set_document().is_empty());
    }

    #[test]
    fn update_set_document_contains_only_supplied_fields() {
        let update = CarUpdate {
            brand: Some("fiat".to_string()),
            price: Some(5_000),
            ..CarUpdate::default()
        }
        .validated()
        .unwrap();

        assert!(!update.is_empty());
        let set = update.to_set_document();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("brand").unwrap(), "Fiat");
        assert_eq!(set.get_i32("price").unwrap(), 5_000);
        assert!(set.get("year").is_none());
    }

    #[test]
    fn update_enforces_bounds_on_supplied_fields() {
        let update = CarUpdate {
            km: Some(500_000),
            ..CarUpdate::default()
        };
        match update.validated() {
            Err(CarStoreError::Validation(violations)) => {
                assert_eq!(violations[0].field, "km");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
