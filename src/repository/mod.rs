//! Repository layer over the in-memory store
//!
//! Each repository owns one collection behind a tokio `RwLock`; clones share
//! the same underlying data.

pub mod alerts;
pub mod tourists;
pub mod trips;
pub mod users;

/// Main repository struct holding all collections
#[derive(Clone, Default)]
pub struct Repository {
    pub users: users::UsersRepository,
    pub tourists: tourists::TouristsRepository,
    pub alerts: alerts::AlertsRepository,
    pub trips: trips::TripsRepository,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

/// Short random identifier with a readable prefix, e.g. `alert-3f2a9c1d`
pub(crate) fn new_id(prefix: &str) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &uuid[..8])
}
