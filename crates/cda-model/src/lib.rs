//! CDA Model - Content Delivery Resources
//!
//! Data types for resources returned by a content delivery API, as consumed
//! by the link resolver in `cda-resolver`.
//!
//! # Core Types
//!
//! - [`Resource`] - Entry, asset or other resource with raw and localized fields
//! - [`ResourceKind`] - Closed discriminator decoded from `sys.type`
//! - [`FieldValue`] - Plain JSON, a resolved [`ResourceLink`], or a rebuilt list
//! - [`Batch`] - A sync feed page ([`SyncedSpace`]) or a query response ([`Page`])
//!
//! # Locales
//!
//! - [`Locale`] - A locale configured for a space
//! - [`SpaceContext`] - Read-only snapshot of a space's locales

pub mod batch;
pub mod error;
pub mod kind;
pub mod locale;
pub mod resource;
pub mod sys;
pub mod value;

pub use batch::{Batch, Includes, Page, SyncedSpace};
pub use error::{Error, Result};
pub use kind::ResourceKind;
pub use locale::{Locale, SpaceContext};
pub use resource::{Resource, ResourceHandle};
pub use sys::Sys;
pub use value::{
    is_link, link_placeholder, link_target, FieldValue, Fields, LinkTarget, ResourceLink,
};
