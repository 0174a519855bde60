//! geofuse-cli
//! ===========
//!
//! Command-line interface for the `geofuse-core` feature engine.
//!
//! This crate primarily provides a binary (`geofuse-cli`). We include a
//! small library target so that docs.rs renders a documentation page and
//! shows this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! geofuse-cli --help
//! geofuse-cli stats
//! geofuse-cli facets --lang ar
//! geofuse-cli filter --dataset road --highway primary --lanes-min 2
//! geofuse-cli timeline --steps 20
//! ```
//!
//! For programmatic access to the classification, filtering and
//! reconciliation APIs, use the `geofuse-core` crate directly.

// This library target intentionally exposes no API; the binary is the
// primary deliverable.
