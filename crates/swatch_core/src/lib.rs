//! Swatch Core Runtime
//!
//! Single-threaded coordination primitives shared by the theme engine:
//!
//! - **Event bus**: typed FIFO queue plus subscriber registry
//! - **Debouncer**: quiet-window coalescing for rapid input
//! - **Readiness gate**: explicit "initialized" signals for startup ordering

pub mod debounce;
pub mod events;
pub mod readiness;

pub use debounce::Debouncer;
pub use events::{EventBus, Listener, SubscriptionId};
pub use readiness::ReadinessGate;
