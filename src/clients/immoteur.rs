//! Listings query gateway for the Immoteur search API.
//!
//! Builds a normalized search request from configuration plus a department
//! selector, serves cached results within a TTL window, and classifies
//! failures into [`SearchOutcome::Failure`] instead of raising. Only
//! contract breaks (malformed payload, unparseable 2xx body, missing
//! pagination metadata) propagate as [`ContractError`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::Config;
use crate::models::{
    EnergyDpeLabel, PropertySearchBody, PropertySearchResponse, PropertyType, SearchPage, SortBy,
    SortOrder,
};

use super::transport::{HttpTransport, RawResponse, SearchTransport};

/// Case-insensitive sentinel meaning "do not filter by department".
pub const ALL_DEPARTMENTS: &str = "all";

const CACHE_NAMESPACE: &str = "properties-search";
const SEARCH_PATH: &str = "properties/search";

/// Rate-limit response headers surfaced on upstream failures.
pub const RATE_LIMIT_HEADERS: [&str; 4] = [
    "ratelimit-policy",
    "ratelimit-limit",
    "ratelimit-remaining",
    "ratelimit-reset",
];

/// Upstream contract violations. These indicate misconfiguration or API
/// drift, not a runtime condition a caller can recover from.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("invalid search payload: {0}")]
    InvalidRequest(String),

    #[error("search response does not match the expected schema: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("search response carried no pagination metadata")]
    MissingMeta,
}

/// Normalized failure detail for recoverable errors.
///
/// `status`, `status_text` and `body` are all `None` when the failure
/// happened before any response was received (missing credential, network
/// failure) and all populated for an upstream non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorState {
    pub message: String,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub rate_limit_headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl ErrorState {
    /// Failure that occurred before a response was received.
    fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            status_text: None,
            rate_limit_headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Failure classified from an upstream non-2xx response.
    fn from_response(raw: &RawResponse) -> Self {
        let mut rate_limit_headers = BTreeMap::new();
        for (name, value) in &raw.headers {
            let lowered = name.to_ascii_lowercase();
            if RATE_LIMIT_HEADERS.contains(&lowered.as_str()) {
                rate_limit_headers.insert(lowered, value.clone());
            }
        }
        Self {
            message: format!("Immoteur API error ({}): {}", raw.status, raw.body),
            status: Some(raw.status),
            status_text: Some(raw.status_text.clone()),
            rate_limit_headers,
            body: Some(raw.body.clone()),
        }
    }
}

/// Tagged result envelope returned to callers. Consumers branch on the
/// variant rather than catching error types.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success(SearchPage),
    Failure(ErrorState),
}

impl SearchOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn success(self) -> Option<SearchPage> {
        match self {
            Self::Success(page) => Some(page),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn failure(self) -> Option<ErrorState> {
        match self {
            Self::Success(_) => None,
            Self::Failure(state) => Some(state),
        }
    }
}

/// Client for the Immoteur `properties/search` endpoint.
///
/// Owns its response cache; construct one per upstream configuration and
/// share it. Concurrent identical requests are not deduplicated: each miss
/// issues its own upstream call and the last writer's cache entry wins.
pub struct ImmoteurClient {
    config: Config,
    cache: TtlCache<SearchPage>,
    transport: Arc<dyn SearchTransport>,
}

impl ImmoteurClient {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()), Arc::new(SystemClock))
    }

    /// Constructs a client over a custom transport and clock.
    #[must_use]
    pub fn with_transport(
        config: Config,
        transport: Arc<dyn SearchTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = TtlCache::new(config.cache_ttl_ms, clock);
        Self {
            config,
            cache,
            transport,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn max_results(&self) -> usize {
        self.config.max_results
    }

    #[must_use]
    pub fn property_types(&self) -> &[PropertyType] {
        &self.config.property_types
    }

    #[must_use]
    pub fn dpe_filter_labels(&self) -> &[EnergyDpeLabel] {
        &self.config.dpe_labels
    }

    #[must_use]
    pub const fn allow_no_department(&self) -> bool {
        self.config.allow_no_department
    }

    /// Searches listings for a department, or for all regions when the
    /// sentinel `"all"` is passed and no-department queries are enabled.
    ///
    /// Recoverable failures (missing credential, non-2xx response,
    /// transport-level errors) come back as [`SearchOutcome::Failure`];
    /// contract breaks propagate as [`ContractError`].
    pub async fn search_by_department(
        &self,
        department: &str,
        max_results: Option<usize>,
    ) -> Result<SearchOutcome, ContractError> {
        let department = department.trim();
        let max_results = max_results.unwrap_or(self.config.max_results);
        let skip_department =
            self.config.allow_no_department && department.eq_ignore_ascii_case(ALL_DEPARTMENTS);

        let cache_key = self.cache_key(department, max_results);
        if let Some(page) = self.cache.get(&cache_key) {
            debug!(key = %cache_key, "serving property search from cache");
            return Ok(SearchOutcome::Success(page));
        }

        let payload = PropertySearchBody {
            page: 1,
            transaction_type: self.config.transaction_type,
            property_types: self.config.property_types.clone(),
            energy_dpe_labels: self.config.dpe_labels.clone(),
            location_departments: if skip_department {
                None
            } else {
                Some(vec![department.to_string()])
            },
            sort_by: SortBy::FirstSeenAt,
            order_by: SortOrder::Desc,
        };
        validate_payload(&payload)?;

        let Some(api_key) = self.config.api_key.as_deref() else {
            return Ok(SearchOutcome::Failure(ErrorState::message_only(
                "IMMOTEUR_API_KEY is required to call the Immoteur API.",
            )));
        };

        let url = self.search_url();
        debug!(url = %url, department = %department, "querying Immoteur property search");

        let raw = match self.transport.post_search(&url, api_key, &payload).await {
            Ok(raw) => raw,
            Err(err) => {
                return Ok(SearchOutcome::Failure(ErrorState::message_only(
                    err.to_string(),
                )));
            }
        };

        if !raw.is_success() {
            let state = ErrorState::from_response(&raw);
            error!(
                status = raw.status,
                status_text = %raw.status_text,
                url = %raw.url,
                body = %raw.body,
                rate_limit_headers = ?state.rate_limit_headers,
                "Immoteur API request failed"
            );
            return Ok(SearchOutcome::Failure(state));
        }

        let parsed: PropertySearchResponse = serde_json::from_str(&raw.body)?;
        let meta = parsed.meta.ok_or(ContractError::MissingMeta)?;

        let mut items = parsed.items;
        if items.len() >= max_results {
            items.truncate(max_results);
        }

        let page = SearchPage { items, meta };
        self.cache.insert(&cache_key, page.clone());
        Ok(SearchOutcome::Success(page))
    }

    fn search_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/{SEARCH_PATH}")
    }

    /// Deterministic cache key over every request-shaping input. The base
    /// URL keeps entries isolated across environments; the department goes
    /// in before the all-regions decision so sentinel and literal queries
    /// never collide.
    fn cache_key(&self, department: &str, max_results: usize) -> String {
        let property_types = self
            .config
            .property_types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let dpe_labels = self
            .config
            .dpe_labels
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let max_results = max_results.to_string();
        [
            CACHE_NAMESPACE,
            self.config.base_url.as_str(),
            department,
            self.config.transaction_type.as_str(),
            property_types.as_str(),
            dpe_labels.as_str(),
            max_results.as_str(),
        ]
        .join("|")
    }
}

/// Rejects payloads that violate the upstream request schema. A failure
/// here means the running configuration itself is invalid.
fn validate_payload(payload: &PropertySearchBody) -> Result<(), ContractError> {
    if payload.page < 1 {
        return Err(ContractError::InvalidRequest(
            "page must be at least 1".to_string(),
        ));
    }
    if payload.property_types.is_empty() {
        return Err(ContractError::InvalidRequest(
            "propertyTypes must not be empty".to_string(),
        ));
    }
    if payload.energy_dpe_labels.is_empty() {
        return Err(ContractError::InvalidRequest(
            "energyDpeLabels must not be empty".to_string(),
        ));
    }
    if let Some(departments) = &payload.location_departments
        && (departments.is_empty() || departments.iter().any(|code| code.trim().is_empty()))
    {
        return Err(ContractError::InvalidRequest(
            "locationDepartments must contain non-empty codes".to_string(),
        ));
    }
    Ok(())
}
