pub mod cache;
pub mod classifieds;
pub mod clients;
pub mod config;
pub mod models;

pub use cache::{Clock, SystemClock, TtlCache};
pub use classifieds::{PropertyCard, SourceLink, to_property_cards};
pub use clients::immoteur::{ContractError, ErrorState, ImmoteurClient, SearchOutcome};
pub use clients::transport::{HttpTransport, RawResponse, SearchTransport, TransportError};
pub use config::Config;
