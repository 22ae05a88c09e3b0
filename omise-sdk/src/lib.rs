//! Core of the Omise mobile payment SDK.
//!
//! Talks to two servers: the vault, which receives card data and issues
//! tokens, and the API server, which reports account capability and creates
//! payment sources. The [`Client`] facade ties request building, transport,
//! response classification and charge status polling together.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod objects;
pub mod request;

pub use client::{ChargeStatusPoller, Client, PollOutcome, RawResponse, Transport};
pub use config::{ClientConfig, PollingConfig, PublicKey};
pub use error::{ApiError, ClientError, TransportError, UnexpectedError};
