//! The chat side of the routine builder.
//!
//! An [`Advisor`] turns the current selection into a routine request,
//! keeps the conversation history for follow-up questions, and reports
//! every transcript message, including failures, through a callback.
//! Requests leave the process through a [`ChatTransport`]; the
//! [`RelayClient`] implementation posts them to the relay service.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod advisor;
pub mod conversation;
mod error;
pub mod prompt;
mod transport;

pub use advisor::{Advisor, AdvisorBuilder};
pub use error::{ConfigurationError, Error};
pub use transport::{ChatTransport, RELAY_URL_ENV, RelayClient, RelayEndpoint};
