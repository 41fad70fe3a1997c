use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::model::{AccountType, ActivityLevel, Location, User, avatar_url};

pub const COUNTRY: &str = "USA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedLocation {
    pub city: String,
    pub state: String,
    pub weight: u32,
}

impl WeightedLocation {
    pub fn new(city: &str, state: &str, weight: u32) -> Self {
        Self {
            city: city.to_string(),
            state: state.to_string(),
            weight,
        }
    }

    pub fn to_location(&self) -> Location {
        Location {
            city: self.city.clone(),
            state: self.state.clone(),
            country: COUNTRY.to_string(),
        }
    }
}

/// Fixed value pools the generator draws user attributes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPools {
    pub names: Vec<String>,
    pub interests: Vec<String>,
    pub locations: Vec<WeightedLocation>,
    pub occupations: Vec<String>,
    pub bio_sentences: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for DataPools {
    fn default() -> Self {
        Self {
            names: owned(&[
                "Jessica Wong",
                "David Kim",
                "Mike Johnson",
                "Emma Davis",
                "Sarah Chen",
                "Alex Martinez",
            ]),
            interests: owned(&[
                "Programming",
                "Web Development",
                "AI/ML",
                "Photography",
                "Music Production",
                "Rock Climbing",
                "Running",
                "Yoga",
                "Marketing",
                "Finance",
                "Cooking",
                "Travel",
                "Wine Tasting",
                "Coffee",
                "Volunteering",
                "Networking",
            ]),
            locations: vec![
                WeightedLocation::new("Phoenix", "AZ", 25),
                WeightedLocation::new("Tucson", "AZ", 15),
                WeightedLocation::new("Mesa", "AZ", 12),
                WeightedLocation::new("Scottsdale", "AZ", 10),
                WeightedLocation::new("Chandler", "AZ", 8),
            ],
            occupations: owned(&[
                "Software Engineer",
                "Marketing Manager",
                "Teacher",
                "Nurse",
                "Sales Representative",
                "Graphic Designer",
                "Financial Advisor",
                "Real Estate Agent",
                "Project Manager",
            ]),
            bio_sentences: owned(&[
                "Always looking for the best coffee in town.",
                "Weekends are for hiking and good food.",
                "I believe honest reviews make communities better.",
                "Big fan of live music and local events.",
                "Currently learning to cook something new every week.",
                "Happy to connect with people who share my interests.",
                "Trying to visit every national park.",
                "Dog person, but cats are fine too.",
            ]),
        }
    }
}

impl DataPools {
    pub fn location_weights(&self) -> Vec<u32> {
        self.locations.iter().map(|l| l.weight).collect()
    }
}

pub const SEED_NAME: &str = "Rieslin Lefluuf";
pub const SEED_TRUST_SCORE: u8 = 95;

/// The demo account every other user is connected to.
pub fn seed_user(id: Uuid, join_date: DateTime<Utc>, now: DateTime<Utc>) -> User {
    User {
        id,
        name: SEED_NAME.to_string(),
        username: "rieslin".to_string(),
        email: "rieslin@example.com".to_string(),
        age: 28,
        location: Location {
            city: "Phoenix".to_string(),
            state: "AZ".to_string(),
            country: COUNTRY.to_string(),
        },
        occupation: "Software Engineer".to_string(),
        interests: owned(&["Programming", "Web Development", "AI/ML", "Rock Climbing"]),
        join_date,
        activity_level: ActivityLevel::High,
        trust_score: SEED_TRUST_SCORE,
        bio: "Passionate about technology and outdoor adventures".to_string(),
        avatar: avatar_url(SEED_NAME),
        connections: vec![],
        connection_count: 0,
        is_online: true,
        last_seen: now,
        account_type: AccountType::Professional,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pools() {
        let pools = DataPools::default();
        assert_eq!(vec![25, 15, 12, 10, 8], pools.location_weights());
        assert_eq!(16, pools.interests.len());
        assert!(!pools.names.iter().any(|n| n == SEED_NAME));
    }

    #[test]
    fn test_to_location_sets_country() {
        let loc = WeightedLocation::new("Mesa", "AZ", 12).to_location();
        assert_eq!("Mesa", loc.city);
        assert_eq!("USA", loc.country);
    }
}
