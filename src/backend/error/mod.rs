//! Backend Error Module
//!
//! Errors returned by the gateway's HTTP handlers, and their conversion into
//! JSON responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Status Codes
//!
//! | Error                | Status |
//! |----------------------|--------|
//! | `Unauthorized`       | 401    |
//! | `HandlerError`       | as set (400 for malformed bodies) |
//! | `Hub`                | 503    |
//! | `SharedError`        | 500    |

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
