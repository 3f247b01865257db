//! sectiondb - A versioned content store for structured site sections
//!
//! Sections hold opaque JSON content under a monotonic version counter.
//! Every update or rollback archives the superseded content into an
//! immutable history ledger in the same atomic commit that writes the new
//! row. Binary assets live on an independent lifecycle beside the sections.

pub mod assets;
pub mod cli;
pub mod content;
pub mod http_server;
pub mod observability;
