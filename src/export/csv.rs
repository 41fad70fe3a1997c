use std::io::Write;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::core::graph::Network;

const LIST_SEPARATOR: &str = ";";

#[derive(Serialize)]
struct ConnectionRecord {
    user_a_id: Uuid,
    user_b_id: Uuid,
    relationship_type: &'static str,
    connection_date: DateTime<Utc>,
    strength_score: f64,
    mutual_friends_count: usize,
    interaction_frequency: &'static str,
    connection_source: &'static str,
    professional_relationship_type: &'static str,
}

#[derive(Serialize)]
struct UserRecord<'a> {
    id: Uuid,
    name: &'a str,
    username: &'a str,
    email: &'a str,
    age: u8,
    city: &'a str,
    state: &'a str,
    country: &'a str,
    occupation: &'a str,
    interests: String,
    join_date: DateTime<Utc>,
    activity_level: &'static str,
    trust_score: u8,
    bio: &'a str,
    avatar: &'a str,
    connections: String,
    connection_count: usize,
    is_online: bool,
    last_seen: DateTime<Utc>,
    account_type: &'static str,
}

/// Writes one row per connection, with a header. Returns the number of rows.
pub fn write_connections<W: Write>(writer: W, network: &Network) -> anyhow::Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for conn in network.connections() {
        csv_writer
            .serialize(ConnectionRecord {
                user_a_id: conn.user_a_id,
                user_b_id: conn.user_b_id,
                relationship_type: conn.relationship_type.as_str(),
                connection_date: conn.connection_date,
                strength_score: conn.strength_score,
                mutual_friends_count: conn.mutual_friends_count,
                interaction_frequency: conn.interaction_frequency.as_str(),
                connection_source: conn.connection_source.as_str(),
                professional_relationship_type: conn
                    .professional_relationship_type
                    .map_or("", |kind| kind.as_str()),
            })
            .with_context(|| format!("failed to write connection row {rows}"))?;
        rows += 1;
    }

    csv_writer.flush().context("failed to flush connections")?;
    anyhow::Ok(rows)
}

/// Writes one row per user. List fields are joined with `;`.
pub fn write_users<W: Write>(writer: W, network: &Network) -> anyhow::Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for user in network.users() {
        csv_writer
            .serialize(UserRecord {
                id: user.id,
                name: &user.name,
                username: &user.username,
                email: &user.email,
                age: user.age,
                city: &user.location.city,
                state: &user.location.state,
                country: &user.location.country,
                occupation: &user.occupation,
                interests: user.interests.join(LIST_SEPARATOR),
                join_date: user.join_date,
                activity_level: user.activity_level.as_str(),
                trust_score: user.trust_score,
                bio: &user.bio,
                avatar: &user.avatar,
                connections: user
                    .connections
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(LIST_SEPARATOR),
                connection_count: user.connection_count,
                is_online: user.is_online,
                last_seen: user.last_seen,
                account_type: user.account_type.as_str(),
            })
            .with_context(|| format!("failed to write user row {rows}"))?;
        rows += 1;
    }

    csv_writer.flush().context("failed to flush users")?;
    anyhow::Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::NetworkBuilder;
    use crate::core::testing::{attrs, builder_with_users, located_user};

    #[test]
    fn test_write_connections() {
        let mut gb = builder_with_users(3);
        gb.add_edge(0, 1, attrs(0.5));
        gb.add_edge(2, 1, attrs(0.25));
        let g = gb.freeze();

        let mut buf = vec![];
        assert_eq!(2, write_connections(&mut buf, &g).unwrap());

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(Some("user_a_id"), headers.get(0));
        assert_eq!(Some("professional_relationship_type"), headers.get(8));

        let records = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(2, records.len());
        assert_eq!(g.user(2).id.to_string(), &records[1][0]);
        assert_eq!("0.25", &records[1][4]);
        assert_eq!("random", &records[1][7]);
        assert_eq!("", &records[1][8]);
    }

    #[test]
    fn test_write_users_joins_lists() {
        let mut gb = NetworkBuilder::new();
        gb.add_user(located_user(1, "Tucson", &["Coffee", "Yoga"]));
        gb.add_user(located_user(2, "Mesa", &[]));
        gb.add_user(located_user(3, "Mesa", &[]));
        gb.add_edge(0, 1, attrs(0.5));
        gb.add_edge(0, 2, attrs(0.5));
        let g = gb.freeze();

        let mut buf = vec![];
        assert_eq!(3, write_users(&mut buf, &g).unwrap());

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let records = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!("Tucson", &records[0][5]);
        assert_eq!("Coffee;Yoga", &records[0][9]);
        assert_eq!(format!("{};{}", g.user(1).id, g.user(2).id), &records[0][15]);
        assert_eq!("2", &records[0][16]);
        assert_eq!("", &records[1][9]);
    }
}
