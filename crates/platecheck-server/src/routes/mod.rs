//! API routes.

pub mod bearer;
pub mod health;
pub mod vehicles;

pub use bearer::bearer_handler;
pub use health::{HealthResponse, health_handler};
pub use vehicles::{dvla_enquiry_handler, mot_history_handler};
