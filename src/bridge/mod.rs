//! Bridge lifecycle: the bridge itself, the registry that publishes it, the
//! pump that keeps it fresh and the observer UI code subscribes to.

/// Change-detecting band observer.
pub mod observer;
/// Per-frame refresh loop.
pub mod pump;
/// Application-owned active-bridge slot.
pub mod registry;
/// Bridge state and its fail-safe operations.
pub mod state;

pub use observer::{BandObserver, Subscription};
pub use registry::BridgeRegistry;
pub use state::Bridge;
