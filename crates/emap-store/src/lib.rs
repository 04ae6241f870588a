#![deny(unsafe_code)]

pub mod error;
pub mod events;
pub mod store;
pub mod transport;

pub use error::StoreError;
pub use events::{ChangeSummary, MappingEvents};
pub use store::{MappingStore, PairState};
pub use transport::{EmailMapTransport, TransportError};
