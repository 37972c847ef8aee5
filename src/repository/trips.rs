//! Trips repository

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::models::{
    statistics::DestinationCount,
    trip::CreateTrip,
    EmergencyContact, Trip, TripStatus,
};

use super::new_id;

#[derive(Clone, Default)]
pub struct TripsRepository {
    trips: Arc<RwLock<IndexMap<String, Trip>>>,
}

impl TripsRepository {
    /// Create a new active trip with its emergency contacts
    pub async fn create(&self, tourist_id: &str, data: CreateTrip) -> Trip {
        let trip = Trip {
            id: new_id("trip"),
            tourist_id: tourist_id.to_string(),
            destination: data.destination,
            start_date: data.start_date,
            end_date: data.end_date,
            transport_mode: data.transport_mode,
            stay_info: data.stay_info,
            health_info: data.health_info,
            status: TripStatus::Active,
            emergency_contacts: data
                .emergency_contacts
                .into_iter()
                .map(|c| EmergencyContact {
                    id: new_id("ec"),
                    name: c.name,
                    relationship: c.relationship,
                    phone: c.phone,
                    email: c.email,
                    is_primary: c.is_primary,
                })
                .collect(),
            created_at: Utc::now(),
        };
        self.trips.write().await.insert(trip.id.clone(), trip.clone());
        trip
    }

    /// Most recent active trip of a tourist
    pub async fn active_for(&self, tourist_id: &str) -> Option<Trip> {
        self.trips
            .read()
            .await
            .values()
            .rev()
            .find(|t| t.tourist_id == tourist_id && t.status == TripStatus::Active)
            .cloned()
    }

    /// Number of distinct tourists with at least one active trip
    pub async fn count_active_tourists(&self) -> u64 {
        let trips = self.trips.read().await;
        let mut tourists: Vec<&str> = trips
            .values()
            .filter(|t| t.status == TripStatus::Active)
            .map(|t| t.tourist_id.as_str())
            .collect();
        tourists.sort_unstable();
        tourists.dedup();
        tourists.len() as u64
    }

    /// Destinations ranked by trip count, ties broken by name
    pub async fn top_destinations(&self, limit: usize) -> Vec<DestinationCount> {
        let trips = self.trips.read().await;
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for trip in trips.values() {
            *counts.entry(trip.destination.as_str()).or_default() += 1;
        }

        let mut ranked: Vec<DestinationCount> = counts
            .into_iter()
            .map(|(name, count)| DestinationCount {
                name: name.to_string(),
                count,
            })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(limit);
        ranked
    }
}
