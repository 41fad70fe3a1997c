use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::graph::{EdgeAttrs, NetworkBuilder};
use crate::core::model::{
    AccountType, ActivityLevel, ConnectionSource, InteractionFrequency, Location,
    RelationshipType, User,
};

pub fn user(n: u128) -> User {
    located_user(n, "Phoenix", &[])
}

pub fn located_user(n: u128, city: &str, interests: &[&str]) -> User {
    User {
        id: Uuid::from_u128(n),
        name: format!("User {n}"),
        username: format!("user{n}"),
        email: format!("user{n}@example.com"),
        age: 30,
        location: Location {
            city: city.to_string(),
            state: "AZ".to_string(),
            country: "USA".to_string(),
        },
        occupation: "Teacher".to_string(),
        interests: interests.iter().map(|i| i.to_string()).collect(),
        join_date: DateTime::<Utc>::default(),
        activity_level: ActivityLevel::Medium,
        trust_score: 80,
        bio: String::new(),
        avatar: String::new(),
        connections: vec![],
        connection_count: 0,
        is_online: false,
        last_seen: DateTime::<Utc>::default(),
        account_type: AccountType::Free,
    }
}

pub fn attrs(strength: f64) -> EdgeAttrs {
    EdgeAttrs {
        relationship_type: RelationshipType::Friend,
        connection_date: DateTime::<Utc>::default(),
        strength_score: strength,
        interaction_frequency: InteractionFrequency::Medium,
        connection_source: ConnectionSource::Random,
    }
}

pub fn builder_with_users(count: u128) -> NetworkBuilder {
    let mut gb = NetworkBuilder::new();
    for n in 0..count {
        gb.add_user(user(n));
    }
    gb
}
