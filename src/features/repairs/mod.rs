//! Repair progress tracking.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/repair/{id}` | Tracker row for a hazard, `{}` if none |
//! | GET | `/repair/{id}/transitions` | Current stage and allowed next stages |
//! | POST | `/update-repair/{id}` | Advance the repair to a later stage |

pub mod dtos;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod routes;
pub mod services;

pub use lifecycle::RepairLifecycle;
pub use services::RepairService;
