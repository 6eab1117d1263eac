//! Wire types for the `properties/search` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::property::Property;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Rental,
}

impl TransactionType {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sale" => Some(Self::Sale),
            "rental" => Some(Self::Rental),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rental => "rental",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Building,
    Parking,
    Land,
    Office,
    Shop,
    Other,
}

impl PropertyType {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "apartment" => Some(Self::Apartment),
            "house" => Some(Self::House),
            "building" => Some(Self::Building),
            "parking" => Some(Self::Parking),
            "land" => Some(Self::Land),
            "office" => Some(Self::Office),
            "shop" => Some(Self::Shop),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Building => "building",
            Self::Parking => "parking",
            Self::Land => "land",
            Self::Office => "office",
            Self::Shop => "shop",
            Self::Other => "other",
        }
    }
}

/// DPE energy-consumption grade, best (`a`) to worst (`g`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyDpeLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyDpeLabel {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "a" => Some(Self::A),
            "b" => Some(Self::B),
            "c" => Some(Self::C),
            "d" => Some(Self::D),
            "e" => Some(Self::E),
            "f" => Some(Self::F),
            "g" => Some(Self::G),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
            Self::E => "e",
            Self::F => "f",
            Self::G => "g",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    FirstSeenAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Request body for `POST properties/search`.
///
/// `location_departments` serializes as an omitted field when `None`; the
/// upstream rejects an explicit `null` and treats `[]` as "match nothing".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchBody {
    pub page: u32,
    pub transaction_type: TransactionType,
    pub property_types: Vec<PropertyType>,
    pub energy_dpe_labels: Vec<EnergyDpeLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_departments: Option<Vec<String>>,
    pub sort_by: SortBy,
    pub order_by: SortOrder,
}

/// Raw response shape. `meta` stays optional here so its absence can be
/// surfaced as a contract violation rather than a deserialization error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertySearchResponse {
    pub items: Vec<Property>,
    #[serde(default)]
    pub meta: Option<SearchMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    pub total: u64,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub page_count: Option<u32>,
}

/// Validated search output: items capped to the configured maximum plus
/// the pagination metadata the response is required to carry.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub items: Vec<Property>,
    pub meta: SearchMeta,
}
