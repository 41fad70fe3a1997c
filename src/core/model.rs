use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    High,
    Medium,
    Low,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 3] = [ActivityLevel::High, ActivityLevel::Medium, ActivityLevel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::High => "high",
            ActivityLevel::Medium => "medium",
            ActivityLevel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Free,
    Professional,
    Venue,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Free => "free",
            AccountType::Professional => "professional",
            AccountType::Venue => "venue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Friend,
    Follower,
    Mutual,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Friend => "friend",
            RelationshipType::Follower => "follower",
            RelationshipType::Mutual => "mutual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionFrequency {
    High,
    Medium,
    Low,
}

impl InteractionFrequency {
    pub const ALL: [InteractionFrequency; 3] = [
        InteractionFrequency::High,
        InteractionFrequency::Medium,
        InteractionFrequency::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionFrequency::High => "high",
            InteractionFrequency::Medium => "medium",
            InteractionFrequency::Low => "low",
        }
    }
}

/// Why an edge was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionSource {
    MutualFriends,
    Location,
    Interests,
    Work,
    Random,
}

impl ConnectionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionSource::MutualFriends => "mutual_friends",
            ConnectionSource::Location => "location",
            ConnectionSource::Interests => "interests",
            ConnectionSource::Work => "work",
            ConnectionSource::Random => "random",
        }
    }
}

/// Visibility category a consuming application assigns to a friendship.
/// Never set during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalRelationshipType {
    ProfessionalOnly,
    PersonalAccess,
    Uncategorized,
}

impl ProfessionalRelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfessionalRelationshipType::ProfessionalOnly => "professional_only",
            ProfessionalRelationshipType::PersonalAccess => "personal_access",
            ProfessionalRelationshipType::Uncategorized => "uncategorized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub age: u8,
    pub location: Location,
    pub occupation: String,
    pub interests: Vec<String>,
    pub join_date: DateTime<Utc>,
    pub activity_level: ActivityLevel,
    pub trust_score: u8,
    pub bio: String,
    pub avatar: String,
    /// Ids of connected users, in edge creation order.
    pub connections: Vec<Uuid>,
    pub connection_count: usize,
    pub is_online: bool,
    pub last_seen: DateTime<Utc>,
    pub account_type: AccountType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub user_a_id: Uuid,
    pub user_b_id: Uuid,
    pub relationship_type: RelationshipType,
    pub connection_date: DateTime<Utc>,
    pub strength_score: f64,
    /// Shared neighbours of both endpoints when the edge was created. Later
    /// edges do not update it, so it can disagree with the final graph.
    pub mutual_friends_count: usize,
    pub interaction_frequency: InteractionFrequency,
    pub connection_source: ConnectionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_relationship_type: Option<ProfessionalRelationshipType>,
}

impl Connection {
    pub fn involves(&self, id: Uuid) -> bool {
        self.user_a_id == id || self.user_b_id == id
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint.
    pub fn other(&self, id: Uuid) -> Option<Uuid> {
        if self.user_a_id == id {
            Some(self.user_b_id)
        } else if self.user_b_id == id {
            Some(self.user_a_id)
        } else {
            None
        }
    }
}

pub fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        urlencoding::encode(name)
    )
}
