use serde::Serialize;
use uuid::Uuid;

use crate::analysis::components::component_count;
use crate::core::graph::Network;
use crate::core::model::User;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedUser {
    pub id: Uuid,
    pub name: String,
    pub connection_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkAnalytics {
    pub total_users: usize,
    pub total_connections: usize,
    pub average_connections: f64,
    pub most_connected: Option<ConnectedUser>,
    pub least_connected: Option<ConnectedUser>,
    pub components: usize,
}

/// Summary figures for a generated network. Ties on most/least connected
/// keep the earliest user.
pub fn network_analytics(network: &Network) -> NetworkAnalytics {
    let users = network.users();
    let total = users.iter().map(|u| u.connection_count).sum::<usize>();
    let average_connections = if users.is_empty() {
        0.0
    } else {
        total as f64 / users.len() as f64
    };

    let mut most = users.first();
    let mut least = users.first();
    for user in users.iter().skip(1) {
        if most.is_some_and(|m| user.connection_count > m.connection_count) {
            most = Some(user);
        }
        if least.is_some_and(|l| user.connection_count < l.connection_count) {
            least = Some(user);
        }
    }
    let summary = |u: &User| ConnectedUser {
        id: u.id,
        name: u.name.clone(),
        connection_count: u.connection_count,
    };

    NetworkAnalytics {
        total_users: users.len(),
        total_connections: network.edge_count(),
        average_connections,
        most_connected: most.map(summary),
        least_connected: least.map(summary),
        components: component_count(network),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{attrs, builder_with_users};
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_network() {
        let stats = network_analytics(&builder_with_users(0).freeze());

        assert_eq!(0, stats.total_users);
        assert_relative_eq!(0.0, stats.average_connections);
        assert_eq!(None, stats.most_connected);
        assert_eq!(0, stats.components);
    }

    #[test]
    fn test_star_with_isolated_user() {
        let mut gb = builder_with_users(5);
        gb.add_edge(1, 0, attrs(0.5));
        gb.add_edge(1, 2, attrs(0.5));
        gb.add_edge(1, 3, attrs(0.5));
        let g = gb.freeze();

        let stats = network_analytics(&g);
        assert_eq!(5, stats.total_users);
        assert_eq!(3, stats.total_connections);
        assert_relative_eq!(1.2, stats.average_connections);
        let most = stats.most_connected.unwrap();
        assert_eq!(g.user(1).id, most.id);
        assert_eq!(3, most.connection_count);
        let least = stats.least_connected.unwrap();
        assert_eq!(g.user(4).id, least.id);
        assert_eq!(2, stats.components);
    }

    #[test]
    fn test_ties_keep_first_user() {
        let mut gb = builder_with_users(4);
        gb.add_edge(0, 1, attrs(0.5));
        gb.add_edge(2, 3, attrs(0.5));
        let g = gb.freeze();

        let stats = network_analytics(&g);
        assert_eq!(g.user(0).id, stats.most_connected.unwrap().id);
        assert_eq!(g.user(0).id, stats.least_connected.unwrap().id);
    }
}
