//! Data types shared by the routine builder components.
//!
//! This crate establishes the vocabulary that the selection store, the
//! advisor and the relay use to talk to each other: catalog records,
//! chat messages, and the request and response payloads of the chat
//! completion API.
//!
//! Types in this crate don't define any behavior beyond serialization
//! and interpreting provider replies. Storage, networking and rendering
//! live in their own crates.

#![deny(missing_docs)]

mod catalog;
mod error;
mod request;
mod response;

pub use catalog::*;
pub use error::*;
pub use request::*;
pub use response::*;
