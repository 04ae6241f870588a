#![deny(unsafe_code)]

pub mod error;
pub mod mapping;
pub mod wire;

pub use error::PairParseError;
pub use mapping::Mapping;
pub use wire::{ChangeSet, MappingData, MappingList};
