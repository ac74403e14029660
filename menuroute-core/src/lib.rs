//! Menu-driven dynamic routing.
//!
//! A raw menu tree plus the user's roles goes through
//! [`MenuProcessor`](processor::MenuProcessor) (role filter, pruning, path
//! lint, normalization) and is then handed to
//! [`RouteRegistry`](registry::RouteRegistry), which validates, transforms
//! and registers the routes on a [`Router`](router::Router).

pub mod access;
pub mod component;
pub mod config;
pub mod error;
pub mod filter;
pub mod iframe;
pub mod model;
pub mod path;
pub mod processor;
pub mod registry;
pub mod report;
pub mod router;
pub mod session;
pub mod transform;
pub mod validate;

pub use error::{Result, RouteError};
pub use model::{ComponentRef, MenuMeta, MenuNode, RoleCode, RouteDefinition};
