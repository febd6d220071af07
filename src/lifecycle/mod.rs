//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → every subscriber's recv() resolves → server drains and exits
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → shutdown_signal() resolves → main calls trigger()
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
