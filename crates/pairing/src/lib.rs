//! Identity metadata exchanged by peers during pairing.
//!
//! An app presents an [`AppMetadata`] record to the other side while a session
//! is negotiated. The optional [`Redirect`] tells the receiving peer how to send
//! the user back to the app once the session is approved.
//!
//! Records travel as JSON objects:
//!
//! - `AppMetadata`: `name`, `description`, `url`, `icons`, `redirect`
//! - `Redirect`: `native`, `universal`, `linkMode`
//!
//! Absent optional fields are omitted by default ([`OptionalFields::Omit`]);
//! decoding accepts both omitted keys and explicit `null`.

pub mod error;
pub mod metadata;
pub mod redirect;
pub mod wire;

pub use {
    error::{Error, Result},
    metadata::AppMetadata,
    redirect::Redirect,
    wire::OptionalFields,
};
