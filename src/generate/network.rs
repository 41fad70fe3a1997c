use std::ops::RangeInclusive;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::graph::{EdgeAttrs, Network, NetworkBuilder};
use crate::core::ids::NodeId;
use crate::core::model::{
    AccountType, ActivityLevel, ConnectionSource, InteractionFrequency, RelationshipType, User,
    avatar_url,
};
use crate::error::ConfigError;
use crate::generate::pools::{DataPools, seed_user};
use crate::generate::sampler::{Sampler, SeededSampler};

/// 2023-01-01T00:00:00Z, the earliest join date.
pub const HISTORY_START_SECS: i64 = 1_672_531_200;

const SEED_STRENGTH: f64 = 0.9;
const RANDOM_STRENGTH: RangeInclusive<f64> = 0.5..=0.9;
const REPAIR_STRENGTH: RangeInclusive<f64> = 0.3..=0.7;
const AGE: RangeInclusive<i64> = 18..=65;
const TRUST_SCORE: RangeInclusive<i64> = 65..=98;
const INTEREST_COUNT: RangeInclusive<i64> = 2..=5;
const ONLINE_PROBABILITY: f64 = 0.15;
const RECENT_DAYS: i64 = 30;
const GENERATED_ACCOUNT_TYPES: [AccountType; 2] = [AccountType::Free, AccountType::Professional];

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Total users, seed user included.
    pub population: usize,
    /// Every user ends with at least this many connections.
    pub min_connections: usize,
    /// Optional cap for the random connection phase. Seeding and repair
    /// ignore it, so it never conflicts with `min_connections`.
    pub max_connections: Option<usize>,
    /// Random edge attempts per non-seed user.
    pub extra_edges: RangeInclusive<usize>,
    pub seed: u64,
    pub history_start: DateTime<Utc>,
    /// Reference time for join dates, last-seen and connection dates.
    pub now: DateTime<Utc>,
    pub pools: DataPools,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            population: 7,
            min_connections: 1,
            max_connections: None,
            extra_edges: 1..=3,
            seed: 12345,
            history_start: DateTime::from_timestamp(HISTORY_START_SECS, 0).unwrap_or_default(),
            now: Utc::now(),
            pools: DataPools::default(),
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.min_connections > self.population - 1 {
            return Err(ConfigError::UnsatisfiableMinimum {
                min_connections: self.min_connections,
                population: self.population,
            });
        }
        if self.extra_edges.is_empty() {
            return Err(ConfigError::EmptyExtraEdgeRange {
                start: *self.extra_edges.start(),
                end: *self.extra_edges.end(),
            });
        }
        if self.pools.names.is_empty() {
            return Err(ConfigError::EmptyPool("name"));
        }
        if self.pools.occupations.is_empty() {
            return Err(ConfigError::EmptyPool("occupation"));
        }
        if self.pools.locations.is_empty() {
            return Err(ConfigError::EmptyPool("location"));
        }
        if self.pools.locations.iter().all(|l| l.weight == 0) {
            return Err(ConfigError::ZeroLocationWeight);
        }
        if self.pools.interests.len() < 2 {
            return Err(ConfigError::InsufficientInterests(self.pools.interests.len()));
        }
        if self.now < self.history_start {
            return Err(ConfigError::InvertedTimeline);
        }
        Ok(())
    }
}

/// Builds synthetic social networks: users first, then connections, then a
/// repair pass that tops up under-connected users.
#[derive(Debug, Clone)]
pub struct NetworkGenerator {
    config: NetworkConfig,
}

impl NetworkGenerator {
    pub fn new(config: NetworkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Every call starts from `config.seed`, so repeated calls return the
    /// same network.
    pub fn generate_network(&self) -> Network {
        let mut sampler = SeededSampler::new(self.config.seed);
        self.generate_with(&mut sampler)
    }

    pub fn generate_with<S: Sampler>(&self, sampler: &mut S) -> Network {
        info!(
            population = self.config.population,
            seed = self.config.seed,
            "generating user network"
        );

        let mut builder = NetworkBuilder::new();
        self.generate_users(&mut builder, sampler);
        self.create_connections(&mut builder, sampler);
        self.repair(&mut builder, sampler);

        let network = builder.freeze();
        info!(
            users = network.user_count(),
            connections = network.edge_count(),
            "generated user network"
        );
        network
    }

    fn generate_users<S: Sampler>(&self, builder: &mut NetworkBuilder, sampler: &mut S) {
        let cfg = &self.config;
        let id = self.generate_id(builder, sampler);
        builder.add_user(seed_user(id, cfg.history_start, cfg.now));

        for i in 0..cfg.population - 1 {
            let id = self.generate_id(builder, sampler);
            let user = self.generate_user(id, i, sampler);
            debug!(name = %user.name, city = %user.location.city, "generated user");
            builder.add_user(user);
        }

        info!(users = builder.user_count(), "generated user profiles");
    }

    fn generate_user<S: Sampler>(&self, id: Uuid, i: usize, sampler: &mut S) -> User {
        let cfg = &self.config;
        let pools = &cfg.pools;

        let base = &pools.names[i % pools.names.len()];
        let round = i / pools.names.len();
        let name = if round == 0 {
            base.clone()
        } else {
            format!("{base} {}", round + 1)
        };
        let username = format!(
            "{}{}",
            name.split_whitespace()
                .map(|w| w.to_lowercase())
                .collect::<Vec<_>>()
                .join("."),
            sampler.int_range(10..=99)
        );
        let email = format!("{username}@example.com");
        let age = sampler.int_range(AGE) as u8;
        let location = pools.locations[sampler.weighted_index(&pools.location_weights())].to_location();
        let occupation = sampler.choose(pools.occupations.as_slice()).clone();

        let wanted = sampler.int_range(INTEREST_COUNT) as usize;
        let interests = sampler
            .sample_indices(pools.interests.len(), wanted)
            .into_iter()
            .map(|idx| pools.interests[idx].clone())
            .collect();

        let join_date = sampler.timestamp_between(cfg.history_start, cfg.now);
        let activity_level = *sampler.choose(&ActivityLevel::ALL);
        let trust_score = sampler.int_range(TRUST_SCORE) as u8;
        let bio = sampler
            .sample_indices(pools.bio_sentences.len(), 2)
            .into_iter()
            .map(|idx| pools.bio_sentences[idx].as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let is_online = sampler.chance(ONLINE_PROBABILITY);
        let last_seen = sampler.timestamp_between(cfg.now - Duration::days(RECENT_DAYS), cfg.now);
        let account_type = *sampler.choose(&GENERATED_ACCOUNT_TYPES);

        User {
            id,
            avatar: avatar_url(&name),
            name,
            username,
            email,
            age,
            location,
            occupation,
            interests,
            join_date,
            activity_level,
            trust_score,
            bio,
            connections: vec![],
            connection_count: 0,
            is_online,
            last_seen,
            account_type,
        }
    }

    fn create_connections<S: Sampler>(&self, builder: &mut NetworkBuilder, sampler: &mut S) {
        let count = builder.user_count() as NodeId;

        // the seed user befriends everyone
        for other in 1..count {
            self.connect(
                builder,
                sampler,
                0,
                other,
                ConnectionSource::MutualFriends,
                SEED_STRENGTH,
            );
        }
        let seeded = builder.edge_count();

        let max = self.config.max_connections.unwrap_or(usize::MAX);
        let attempts = *self.config.extra_edges.start() as i64..=*self.config.extra_edges.end() as i64;
        for node in 1..count {
            for _ in 0..sampler.int_range(attempts.clone()) {
                let target = sampler.int_range(1..=count as i64 - 1) as NodeId;
                if target == node {
                    continue;
                }
                if builder.degree(node) >= max || builder.degree(target) >= max {
                    continue;
                }
                let strength = sampler.float_range(RANDOM_STRENGTH);
                self.connect(
                    builder,
                    sampler,
                    node,
                    target,
                    ConnectionSource::MutualFriends,
                    strength,
                );
            }
        }

        info!(
            seed_edges = seeded,
            random_edges = builder.edge_count() - seeded,
            "created connections"
        );
    }

    fn repair<S: Sampler>(&self, builder: &mut NetworkBuilder, sampler: &mut S) {
        let added = top_up(builder, self.config.min_connections, |builder, node, target| {
            let strength = sampler.float_range(REPAIR_STRENGTH);
            self.connect(builder, sampler, node, target, ConnectionSource::Random, strength)
                .is_some()
        });

        info!(repair_edges = added, "validated connection minimum");
    }

    fn generate_id<S: Sampler>(&self, builder: &NetworkBuilder, sampler: &mut S) -> Uuid {
        let mut id = sampler.uuid();
        while builder.contains(&id) {
            warn!(%id, "sampler repeated a user id");
            id = Uuid::from_u128(id.as_u128().wrapping_add(1));
        }
        id
    }

    fn connect<S: Sampler>(
        &self,
        builder: &mut NetworkBuilder,
        sampler: &mut S,
        a: NodeId,
        b: NodeId,
        source: ConnectionSource,
        strength: f64,
    ) -> Option<usize> {
        if a == b || builder.are_connected(a, b) {
            return None;
        }
        let now = self.config.now;
        let attrs = EdgeAttrs {
            relationship_type: RelationshipType::Friend,
            connection_date: sampler.timestamp_between(now - Duration::days(RECENT_DAYS), now),
            strength_score: strength,
            interaction_frequency: *sampler.choose(&InteractionFrequency::ALL),
            connection_source: source,
        };
        let edge = builder.add_edge(a, b, attrs);
        if edge.is_some() {
            debug!(
                a = %builder.user(a).id,
                b = %builder.user(b).id,
                source = source.as_str(),
                strength,
                "added connection"
            );
        }
        edge
    }
}

/// Adds edges until every user has `min_connections`, preferring users in
/// population order that are not yet connected. A user with too few
/// candidates is connected to all of them. Returns the number of edges added.
pub fn top_up<F>(builder: &mut NetworkBuilder, min_connections: usize, mut connect: F) -> usize
where
    F: FnMut(&mut NetworkBuilder, NodeId, NodeId) -> bool,
{
    let count = builder.user_count() as NodeId;
    let mut added = 0;

    for node in 0..count {
        let have = builder.degree(node);
        if have >= min_connections {
            continue;
        }
        let needed = min_connections - have;
        let targets = (0..count)
            .filter(|&t| t != node && !builder.are_connected(node, t))
            .take(needed)
            .collect::<Vec<_>>();
        if targets.len() < needed {
            warn!(
                user = %builder.user(node).id,
                needed,
                available = targets.len(),
                "not enough users to reach the connection minimum"
            );
        }
        for target in targets {
            if connect(builder, node, target) {
                added += 1;
            }
        }
    }

    added
}
