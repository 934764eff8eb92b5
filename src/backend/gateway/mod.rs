//! Notification Gateway
//!
//! HTTP surface of the hub.
//!
//! | Route             | Handler              |
//! |-------------------|----------------------|
//! | `GET /ws`         | `handle_ws_upgrade`  |
//! | `POST /notify`    | `handle_notify`      |
//! | `POST /broadcast` | `handle_broadcast`   |
//! | `GET /health`     | `handle_health`      |
//! | `GET /stats`      | `handle_stats`       |

pub mod notify;
pub mod status;
pub mod upgrade;

pub use notify::{handle_broadcast, handle_notify};
pub use status::{handle_health, handle_stats};
pub use upgrade::handle_ws_upgrade;
