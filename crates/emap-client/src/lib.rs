#![deny(unsafe_code)]

pub mod client;
pub mod config;

pub use client::EmailMapClient;
pub use config::{ClientConfig, Credentials};
