//! Data models for the tourist safety domain

pub mod alert;
pub mod enums;
pub mod statistics;
pub mod trip;
pub mod user;

pub use alert::Alert;
pub use enums::{AlertPriority, AlertStatus, AlertType, KycStatus, Role, TripStatus};
pub use statistics::TripStatistic;
pub use trip::Trip;
pub use user::{EmergencyContact, Location, Tourist, User};
