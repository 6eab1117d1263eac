//! Environment-derived settings for the Immoteur search gateway.
//!
//! Every key has a documented fallback so a partially configured
//! environment still yields a usable search. The API key is the one
//! exception: it stays optional here and its absence is reported per
//! call instead of failing at load time.

use std::env;

use crate::models::{EnergyDpeLabel, PropertyType, TransactionType};

pub const DEFAULT_BASE_URL: &str = "https://api.immoteur.com/public/v1";
pub const DEFAULT_MAX_RESULTS: usize = 15;
pub const DEFAULT_CACHE_TTL_MS: u64 = 5 * 60 * 1000;

/// TTLs below this are treated as misconfiguration and replaced by the default.
const MIN_CACHE_TTL_MS: u64 = 1000;

const DEFAULT_PROPERTY_TYPES: &[PropertyType] = &[PropertyType::Apartment];
const DEFAULT_DPE_LABELS: &[EnergyDpeLabel] = &[EnergyDpeLabel::F, EnergyDpeLabel::G];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub transaction_type: TransactionType,
    pub property_types: Vec<PropertyType>,
    pub dpe_labels: Vec<EnergyDpeLabel>,
    pub allow_no_department: bool,
    pub max_results: usize,
    pub cache_ttl_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            transaction_type: TransactionType::Sale,
            property_types: DEFAULT_PROPERTY_TYPES.to_vec(),
            dpe_labels: DEFAULT_DPE_LABELS.to_vec(),
            allow_no_department: false,
            max_results: DEFAULT_MAX_RESULTS,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
        }
    }
}

impl Config {
    /// Resolves the full configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: parse_base_url(var("IMMOTEUR_API_BASE_URL").as_deref()),
            api_key: var("IMMOTEUR_API_KEY"),
            transaction_type: parse_transaction_type(var("IMMOTEUR_TRANSACTION_TYPE").as_deref()),
            property_types: parse_enum_list(
                var("IMMOTEUR_PROPERTY_TYPES").as_deref(),
                PropertyType::parse,
                DEFAULT_PROPERTY_TYPES,
            ),
            dpe_labels: parse_enum_list(
                var("IMMOTEUR_DPE_LABELS").as_deref(),
                EnergyDpeLabel::parse,
                DEFAULT_DPE_LABELS,
            ),
            allow_no_department: parse_flag(var("ALLOW_NO_DEPARTMENT").as_deref()),
            max_results: parse_max_results(var("IMMOTEUR_MAX_RESULTS").as_deref()),
            cache_ttl_ms: parse_cache_ttl_ms(var("IMMOTEUR_CACHE_TTL_MS").as_deref()),
        }
    }
}

/// Reads an environment variable, mapping unset and blank values to `None`.
fn var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_base_url(value: Option<&str>) -> String {
    match value {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

fn parse_transaction_type(value: Option<&str>) -> TransactionType {
    value
        .map(str::to_ascii_lowercase)
        .and_then(|normalized| TransactionType::parse(&normalized))
        .unwrap_or(TransactionType::Sale)
}

/// Parses a CSV of enum names, keeping recognized entries in first-seen
/// order without duplicates. An empty filtered result yields the fallback.
fn parse_enum_list<T: Copy + PartialEq>(
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
    fallback: &[T],
) -> Vec<T> {
    let mut out = Vec::new();
    if let Some(raw) = value {
        for entry in raw.split(',') {
            let entry = entry.trim().to_ascii_lowercase();
            if entry.is_empty() {
                continue;
            }
            if let Some(parsed) = parse(&entry)
                && !out.contains(&parsed)
            {
                out.push(parsed);
            }
        }
    }
    if out.is_empty() { fallback.to_vec() } else { out }
}

fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|raw| raw.eq_ignore_ascii_case("true") || raw == "1")
}

fn parse_max_results(value: Option<&str>) -> usize {
    match value.map(str::parse::<usize>) {
        Some(Ok(parsed)) if parsed >= 1 => parsed,
        _ => DEFAULT_MAX_RESULTS,
    }
}

fn parse_cache_ttl_ms(value: Option<&str>) -> u64 {
    match value.map(str::parse::<u64>) {
        Some(Ok(parsed)) if parsed >= MIN_CACHE_TTL_MS => parsed,
        _ => DEFAULT_CACHE_TTL_MS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_fallbacks() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, None);
        assert_eq!(config.transaction_type, TransactionType::Sale);
        assert_eq!(config.property_types, vec![PropertyType::Apartment]);
        assert_eq!(
            config.dpe_labels,
            vec![EnergyDpeLabel::F, EnergyDpeLabel::G]
        );
        assert!(!config.allow_no_department);
        assert_eq!(config.max_results, 15);
        assert_eq!(config.cache_ttl_ms, 300_000);
    }

    #[test]
    fn enum_list_filters_trims_and_dedupes() {
        let parsed = parse_enum_list(
            Some(" house , APARTMENT, castle, house "),
            PropertyType::parse,
            DEFAULT_PROPERTY_TYPES,
        );
        assert_eq!(parsed, vec![PropertyType::House, PropertyType::Apartment]);
    }

    #[test]
    fn enum_list_falls_back_when_nothing_survives_filtering() {
        let parsed = parse_enum_list(
            Some("castle,igloo"),
            PropertyType::parse,
            DEFAULT_PROPERTY_TYPES,
        );
        assert_eq!(parsed, vec![PropertyType::Apartment]);

        let parsed = parse_enum_list(None, EnergyDpeLabel::parse, DEFAULT_DPE_LABELS);
        assert_eq!(parsed, vec![EnergyDpeLabel::F, EnergyDpeLabel::G]);
    }

    #[test]
    fn transaction_type_falls_back_on_unrecognized_values() {
        assert_eq!(
            parse_transaction_type(Some("rental")),
            TransactionType::Rental
        );
        assert_eq!(parse_transaction_type(Some("SALE")), TransactionType::Sale);
        assert_eq!(
            parse_transaction_type(Some("lease-to-own")),
            TransactionType::Sale
        );
        assert_eq!(parse_transaction_type(None), TransactionType::Sale);
    }

    #[test]
    fn max_results_requires_a_positive_integer() {
        assert_eq!(parse_max_results(Some("25")), 25);
        assert_eq!(parse_max_results(Some("0")), DEFAULT_MAX_RESULTS);
        assert_eq!(parse_max_results(Some("plenty")), DEFAULT_MAX_RESULTS);
        assert_eq!(parse_max_results(None), DEFAULT_MAX_RESULTS);
    }

    #[test]
    fn cache_ttl_enforces_a_one_second_floor() {
        assert_eq!(parse_cache_ttl_ms(Some("60000")), 60_000);
        assert_eq!(parse_cache_ttl_ms(Some("1000")), 1_000);
        assert_eq!(parse_cache_ttl_ms(Some("999")), DEFAULT_CACHE_TTL_MS);
        assert_eq!(parse_cache_ttl_ms(Some("-5")), DEFAULT_CACHE_TTL_MS);
        assert_eq!(parse_cache_ttl_ms(None), DEFAULT_CACHE_TTL_MS);
    }

    #[test]
    fn flag_accepts_true_and_one() {
        assert!(parse_flag(Some("true")));
        assert!(parse_flag(Some("TRUE")));
        assert!(parse_flag(Some("1")));
        assert!(!parse_flag(Some("yes")));
        assert!(!parse_flag(None));
    }
}
