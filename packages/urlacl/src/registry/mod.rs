//! Element registry system for dispatching extension elements.
//!
//! Parent handlers resolve the context an extension element is parsed in
//! (owning component, ambient security principal); element handlers turn
//! the element into records.

mod config;
mod core;
mod engine;
mod handler;
pub mod handlers;
mod types;

pub use config::create_http_registry;
pub use core::ElementRegistry;
pub use engine::ParseEngine;
pub use handler::{ElementHandler, ParentHandler};
pub use types::{ParentContext, ParseContext};
