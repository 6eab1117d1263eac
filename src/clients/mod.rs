pub mod immoteur;
pub mod transport;

pub use immoteur::{ContractError, ErrorState, ImmoteurClient, SearchOutcome};
pub use transport::{HttpTransport, RawResponse, SearchTransport, TransportError};
