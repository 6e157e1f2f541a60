//! Request introspection subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request head
//!     → descriptor.rs (normalize into RequestDescriptor)
//!     → projection.rs (select requested fields, serialize as JSON)
//!     → Echo handler sends the payload
//! ```

pub mod descriptor;
pub mod projection;

pub use descriptor::RequestDescriptor;
pub use projection::{project, to_pretty_json};
