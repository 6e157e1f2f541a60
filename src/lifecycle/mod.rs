//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Initialize observability → Start listener
//!
//! Shutdown (shutdown.rs):
//!     SIGINT/SIGTERM received → Stop accepting → Drain connections → Exit
//! ```

pub mod shutdown;

pub use shutdown::shutdown_signal;
