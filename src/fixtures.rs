//! Static demo data.
//!
//! The same records seed the in-memory store of the server and serve as the
//! fallback payloads of the dashboard client when the remote API fails, so
//! both sides always agree on the shape of the data.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::models::{
    statistics::{
        ActivityType, DestinationCount, InfluxPoint, InfluxSeries, LanguageShare,
        PoliceDashboardStats, RecentActivity, SafetyMetrics, TopDestination,
    },
    Alert, AlertPriority, AlertStatus, AlertType, EmergencyContact, KycStatus, Location, Role,
    Tourist, TripStatistic, User,
};

/// Password of the seeded demo accounts
pub const DEMO_PASSWORD: &str = "password123";

/// Seeded demo account (email, name, role)
pub struct DemoAccount {
    pub email: &'static str,
    pub name: &'static str,
    pub role: Role,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount {
        email: "tourist@test.com",
        name: "John Doe",
        role: Role::Tourist,
    },
    DemoAccount {
        email: "police@test.com",
        name: "Officer Smith",
        role: Role::Police,
    },
    DemoAccount {
        email: "tourism@test.com",
        name: "Tourism Admin",
        role: Role::Tourism,
    },
];

fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

fn location(lat: f64, lng: f64, address: &str) -> Location {
    Location {
        lat,
        lng,
        address: address.to_string(),
    }
}

static TOURISTS: Lazy<Vec<Tourist>> = Lazy::new(|| {
    vec![
        Tourist {
            user: User {
                id: "tourist-1".into(),
                email: "john.doe@email.com".into(),
                name: "John Doe".into(),
                role: Role::Tourist,
                profile_complete: true,
            },
            kyc_status: KycStatus::Verified,
            digital_id: "DID-001-2024".into(),
            destination: "Goa".into(),
            transport_mode: "Flight".into(),
            stay_info: "Beach Resort, Calangute".into(),
            health_info: "No medical conditions".into(),
            emergency_contacts: vec![EmergencyContact {
                id: "ec-1".into(),
                name: "Jane Doe".into(),
                relationship: "Spouse".into(),
                phone: "+91-9876543210".into(),
                email: Some("jane.doe@email.com".into()),
                is_primary: true,
            }],
            safety_score: 8.0,
            current_location: Some(location(15.2993, 74.1240, "Calangute Beach, Goa")),
            trip_start_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            trip_end_date: NaiveDate::from_ymd_opt(2024, 1, 22),
            phone_number: None,
        },
        Tourist {
            user: User {
                id: "tourist-2".into(),
                email: "mary.smith@email.com".into(),
                name: "Mary Smith".into(),
                role: Role::Tourist,
                profile_complete: true,
            },
            kyc_status: KycStatus::Verified,
            digital_id: "DID-002-2024".into(),
            destination: "Kerala".into(),
            transport_mode: "Train".into(),
            stay_info: "Houseboat, Alleppey".into(),
            health_info: "Diabetes medication".into(),
            emergency_contacts: vec![EmergencyContact {
                id: "ec-2".into(),
                name: "Robert Smith".into(),
                relationship: "Brother".into(),
                phone: "+91-9876543211".into(),
                email: None,
                is_primary: true,
            }],
            safety_score: 9.0,
            current_location: Some(location(9.4981, 76.3388, "Alleppey Backwaters, Kerala")),
            trip_start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            trip_end_date: NaiveDate::from_ymd_opt(2024, 1, 18),
            phone_number: None,
        },
    ]
});

static ALERTS: Lazy<Vec<Alert>> = Lazy::new(|| {
    vec![
        Alert {
            id: "alert-1".into(),
            tourist_id: "tourist-1".into(),
            alert_type: AlertType::Panic,
            message: "Panic button activated by John Doe".into(),
            timestamp: utc(2024, 1, 16, 10, 30),
            status: AlertStatus::Active,
            priority: AlertPriority::Critical,
            location: location(15.2993, 74.1240, "Calangute Beach, Goa"),
            assigned_officer_id: None,
            acknowledged_at: None,
            resolved_at: None,
        },
        Alert {
            id: "alert-2".into(),
            tourist_id: "tourist-2".into(),
            alert_type: AlertType::Geofence,
            message: "Tourist entered high-risk zone".into(),
            timestamp: utc(2024, 1, 16, 9, 15),
            status: AlertStatus::Acknowledged,
            priority: AlertPriority::High,
            location: location(9.4981, 76.3388, "Remote area near Alleppey"),
            assigned_officer_id: None,
            acknowledged_at: Some(utc(2024, 1, 16, 9, 20)),
            resolved_at: None,
        },
    ]
});

static TRIP_STATISTICS: Lazy<TripStatistic> = Lazy::new(|| TripStatistic {
    total_tourists: 1250,
    active_tourists: 89,
    safety_score: 8.2,
    incidents: 5,
    popular_destinations: [
        ("Goa", 320),
        ("Kerala", 280),
        ("Rajasthan", 210),
        ("Himachal Pradesh", 180),
        ("Tamil Nadu", 160),
    ]
    .into_iter()
    .map(|(name, count)| DestinationCount {
        name: name.to_string(),
        count,
    })
    .collect(),
});

pub fn tourists() -> Vec<Tourist> {
    TOURISTS.clone()
}

pub fn alerts() -> Vec<Alert> {
    ALERTS.clone()
}

pub fn trip_statistics() -> TripStatistic {
    TRIP_STATISTICS.clone()
}

pub fn police_dashboard_stats() -> PoliceDashboardStats {
    PoliceDashboardStats {
        active_alerts: 1,
        active_tourists: 1247,
        resolved_today: 1,
        total_incidents: 2,
    }
}

/// Hourly tourist influx; periods other than "day" carry no points
pub fn influx(period: &str) -> InfluxSeries {
    let data = if period == "day" {
        [
            ("12 AM", 45),
            ("2 AM", 32),
            ("4 AM", 28),
            ("6 AM", 65),
            ("8 AM", 89),
            ("10 AM", 120),
            ("12 PM", 145),
            ("2 PM", 132),
            ("4 PM", 156),
            ("6 PM", 134),
            ("8 PM", 98),
            ("10 PM", 76),
        ]
        .into_iter()
        .map(|(time, value)| InfluxPoint {
            time: time.to_string(),
            value,
        })
        .collect()
    } else {
        Vec::new()
    };

    InfluxSeries {
        period: period.to_string(),
        data,
    }
}

pub fn top_destinations() -> Vec<TopDestination> {
    [
        ("India Gate", 456, 85),
        ("Red Fort", 387, 82),
        ("Qutub Minar", 298, 79),
        ("Lotus Temple", 234, 91),
        ("Humayuns Tomb", 189, 88),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, tourists, safety))| TopDestination {
        rank: i as u32 + 1,
        name: name.to_string(),
        tourists,
        safety,
    })
    .collect()
}

pub fn language_distribution() -> Vec<LanguageShare> {
    [
        ("English", 6234, 39.3),
        ("Hindi", 3456, 21.8),
        ("Tamil", 2134, 13.5),
        ("Telugu", 1567, 9.9),
        ("Others", 2456, 15.5),
    ]
    .into_iter()
    .map(|(language, count, percentage)| LanguageShare {
        language: language.to_string(),
        count,
        percentage,
    })
    .collect()
}

pub fn safety_metrics() -> SafetyMetrics {
    SafetyMetrics {
        low_risk: 968,
        medium_risk: 234,
        high_risk: 45,
        average_score: 78,
    }
}

pub fn recent_activities() -> Vec<RecentActivity> {
    [
        (ActivityType::DigitalId, "Digital ID issued to Sarah Johnson", "2 minutes ago"),
        (ActivityType::Kyc, "KYC verified for Raj Patel", "5 minutes ago"),
        (ActivityType::DigitalId, "Digital ID issued to Emma Wilson", "12 minutes ago"),
        (ActivityType::Kyc, "KYC verified for Ali Khan", "18 minutes ago"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (activity_type, title, time))| RecentActivity {
        id: i as u32 + 1,
        activity_type,
        title: title.to_string(),
        time: time.to_string(),
    })
    .collect()
}

/// Fixed location used for panic alerts until the client reports a position
pub fn panic_location() -> Location {
    location(28.6139, 77.209, "India Gate, New Delhi")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_invariants() {
        for tourist in tourists() {
            assert!((0.0..=10.0).contains(&tourist.safety_score));
            assert_eq!(tourist.user.role, Role::Tourist);
        }
        let ids: Vec<String> = tourists().into_iter().map(|t| t.user.id).collect();
        for alert in alerts() {
            assert!(ids.contains(&alert.tourist_id));
        }
    }

    #[test]
    fn test_popular_destinations_ranked() {
        let stats = trip_statistics();
        let counts: Vec<u64> = stats.popular_destinations.iter().map(|d| d.count).collect();
        let mut sorted = counts.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);
    }

    #[test]
    fn test_influx_periods() {
        assert_eq!(influx("day").data.len(), 12);
        assert!(influx("week").data.is_empty());
        assert_eq!(top_destinations()[0].rank, 1);
    }
}
