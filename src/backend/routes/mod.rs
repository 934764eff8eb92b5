//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! └── router.rs       - Router assembly, CORS and tracing layers
//! ```
//!
//! Handlers live in `backend::gateway`; this module only wires them to
//! paths.

/// Main router creation
pub mod router;

pub use router::{cors_layer, create_router};
