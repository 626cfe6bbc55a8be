//! Inventory layer: host context and user-supplied inputs
//!
//! Turns an inventory document into one immutable [`types::HostContext`] per
//! host. Resolution never reads anything that is not carried by that context.
//!
//! # Modules
//!
//! - [`types`]: Host facts, raw inputs and deployment types
//! - [`loader`]: JSON inventory loading and group/host variable merging

pub mod loader;
pub mod types;
