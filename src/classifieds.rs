//! Shapes raw listings into flat cards for display.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{
    Classified, ClassifiedSource, EnergyDpeLabel, EnergyGesLabel, Property, PropertyType,
};

const STATUS_AVAILABLE: &str = "available";

/// Link back to one of the classifieds a listing was aggregated from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceLink {
    pub id: String,
    pub source: ClassifiedSource,
}

/// Flattened listing projection consumed by display layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCard {
    pub id: String,
    pub image_url: Option<String>,
    pub price: Option<f64>,
    pub price_per_square_unit: Option<f64>,
    pub room_count: Option<u32>,
    pub bedroom_count: Option<u32>,
    pub area: Option<f64>,
    pub property_type: Option<PropertyType>,
    pub dpe_label: Option<EnergyDpeLabel>,
    pub ges_label: Option<EnergyGesLabel>,
    pub postcode: String,
    pub city: String,
    pub department: String,
    pub description: String,
    pub is_professional: bool,
    pub sources: Vec<SourceLink>,
    pub first_seen_at: String,
}

/// Projects listings into cards, stopping once `limit` cards are built.
/// The limit is checked before each card, so a limit of 0 yields no cards.
#[must_use]
pub fn to_property_cards(properties: &[Property], limit: usize) -> Vec<PropertyCard> {
    let mut cards = Vec::new();

    for property in properties {
        if cards.len() >= limit {
            break;
        }

        let is_professional = property.classifieds.iter().any(|classified| {
            classified.status.current == STATUS_AVAILABLE && classified.publisher.is_professional
        });

        cards.push(PropertyCard {
            id: property.id.clone(),
            image_url: pick_image_url(property),
            price: property.transaction.price.current,
            price_per_square_unit: property.transaction.price.per_square_unit,
            room_count: property.property.room_count,
            bedroom_count: property.property.bedroom_count,
            area: property.property.area,
            property_type: property.property.kind,
            dpe_label: property
                .energy
                .as_ref()
                .and_then(|energy| energy.dpe.as_ref())
                .and_then(|dpe| dpe.label),
            ges_label: property
                .energy
                .as_ref()
                .and_then(|energy| energy.ges.as_ref())
                .and_then(|ges| ges.label),
            postcode: property.location.postcode.clone(),
            city: property.location.city.name.clone(),
            department: property.location.department.clone(),
            description: property.description.clone().unwrap_or_default(),
            is_professional,
            sources: collect_source_links(&property.classifieds),
            first_seen_at: property.meta.first_seen_at.clone(),
        });
    }

    cards
}

/// Collects classified source links, deduplicated by URL in first-seen order.
#[must_use]
pub fn collect_source_links(classifieds: &[Classified]) -> Vec<SourceLink> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for classified in classifieds {
        let Some(source) = &classified.source else {
            continue;
        };
        if source.url.is_empty() || !seen.insert(source.url.clone()) {
            continue;
        }
        sources.push(SourceLink {
            id: classified.id.clone(),
            source: source.clone(),
        });
    }

    sources
}

/// Representative image for a listing: the one with the lowest position,
/// first occurrence winning ties.
#[must_use]
pub fn pick_image_url(property: &Property) -> Option<String> {
    let images = property
        .media
        .as_ref()
        .map(|media| media.images.as_slice())
        .unwrap_or_default();

    let mut best: Option<&crate::models::PropertyImage> = None;
    for image in images {
        if best.is_none_or(|current| image.position < current.position) {
            best = Some(image);
        }
    }
    best.map(|image| image.url.clone())
}
