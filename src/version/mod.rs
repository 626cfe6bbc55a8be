//! Version resolution layer
//!
//! Decides which version, image tag and package version to install on a host
//! and refuses to continue when they cannot be made consistent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Normalize  │────▶│  Validate   │────▶│  Resolver   │
//! │  (inputs)   │     │ (tag gramm.)│     │  (chain)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Derive    │◀────│ Consistency │◀────│   Sources   │
//! │  (+ guard)  │     │ (rpm/image) │     │(native,ctr) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`engine`]: Per-host pipeline tying the stages together
//! - [`normalize`]: Release `v` stripping and empty-value handling
//! - [`grammar`] / [`grammars`]: Deployment-specific image tag formats
//! - [`resolver`]: Priority chain deciding where the version comes from
//! - [`source`] / [`sources`]: Native package and containerized version sources
//! - [`consistency`]: rpm vs image cross-check
//! - [`derive`]: Image tag / package version derivation and completeness guard
//! - [`state`]: Set-once working record and output types
//! - [`collaborator`] / [`collaborators`]: Package query and image inspection
//! - [`semver`]: Ordering of multi-component version strings
//! - [`error`]: Error types for resolution and collaborators

pub mod collaborator;
pub mod collaborators;
pub mod consistency;
pub mod derive;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod grammars;
pub mod normalize;
pub mod resolver;
pub mod semver;
pub mod source;
pub mod sources;
pub mod state;
