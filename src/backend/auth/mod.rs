//! Authentication Module
//!
//! The hub does not log anyone in. It only verifies tokens that the API side
//! issued, using the shared `JWT_SECRET`.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! └── tokens.rs       - JWT validation (and issuing, for the API side and tests)
//! ```
//!
//! # Security
//!
//! - HS256 only; tokens signed with any other algorithm are rejected
//! - `exp` is required and checked
//! - A refused token allocates no connection resources

/// JWT token generation and validation
pub mod tokens;

pub use tokens::{Claims, Identity, TokenError, TokenValidator, DEFAULT_TOKEN_TTL};
