//! Listing types returned by the Immoteur search endpoint.

use serde::{Deserialize, Serialize};

use crate::models::search::{EnergyDpeLabel, PropertyType};

/// GES greenhouse-gas grade, best (`a`) to worst (`g`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyGesLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// A deduplicated property listing aggregated from one or more classifieds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub transaction: Transaction,
    pub property: PropertyFacts,
    #[serde(default)]
    pub energy: Option<Energy>,
    pub location: Location,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub classifieds: Vec<Classified>,
    pub meta: PropertyMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub price: TransactionPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPrice {
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub per_square_unit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFacts {
    #[serde(rename = "type", default)]
    pub kind: Option<PropertyType>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub room_count: Option<u32>,
    #[serde(default)]
    pub bedroom_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    #[serde(default)]
    pub dpe: Option<DpeRating>,
    #[serde(default)]
    pub ges: Option<GesRating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpeRating {
    #[serde(default)]
    pub label: Option<EnergyDpeLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GesRating {
    #[serde(default)]
    pub label: Option<EnergyGesLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub postcode: String,
    pub city: City,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub images: Vec<PropertyImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub url: String,
    pub position: i32,
}

/// One source classified backing a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classified {
    pub id: String,
    pub status: ClassifiedStatus,
    pub publisher: Publisher,
    #[serde(default)]
    pub source: Option<ClassifiedSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedStatus {
    pub current: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub is_professional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMeta {
    pub first_seen_at: String,
}
