//! Hub Module
//!
//! Connection registry and the coordinator task that serializes every
//! mutation of it.
//!
//! # Module Structure
//!
//! ```text
//! hub/
//! ├── mod.rs          - Module exports and documentation
//! ├── policy.rs       - Overflow and re-registration policies
//! ├── registry.rs     - Membership set and user index
//! └── coordinator.rs  - Command loop and the cloneable HubHandle
//! ```
//!
//! # Dispatch
//!
//! Every dispatch is a non-blocking `try_send` into a session's bounded
//! queue. A full queue never stalls the coordinator; what happens instead
//! is decided by [`OverflowPolicy`]. A queue found closed always evicts.

pub mod coordinator;
pub mod policy;
pub mod registry;

pub use coordinator::{Hub, HubCommand, HubError, HubHandle};
pub use policy::{HubConfig, OverflowPolicy, SupersedePolicy};
pub use registry::{DispatchReport, HubStats, Registration, Registry};
