//! Read-only hazard views for the list, map and detail screens.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/stats` | Hazards merged with repair progress |
//! | GET | `/hazard-map` | Hazards with repair-planning fields |
//! | GET | `/hazard/{id}` | Full hazard detail |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::HazardService;
