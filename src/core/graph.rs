use std::collections::HashSet;

use anyhow::bail;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::ids::{NodeId, UserRegistry};
use crate::core::model::{
    Connection, ConnectionSource, InteractionFrequency, RelationshipType, User,
};

/// Per-edge attributes chosen by the caller. The builder derives everything
/// else (endpoint ids, mutual friend count).
#[derive(Debug, Clone)]
pub struct EdgeAttrs {
    pub relationship_type: RelationshipType,
    pub connection_date: DateTime<Utc>,
    pub strength_score: f64,
    pub interaction_frequency: InteractionFrequency,
    pub connection_source: ConnectionSource,
}

fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a < b { (a, b) } else { (b, a) }
}

/// Owns the user table and the edge list while a network is being built.
/// `add_edge` is the only way to connect two users, so both endpoints and the
/// edge record always change together.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    registry: UserRegistry,
    users: Vec<User>,
    adjacency: Vec<Vec<NodeId>>,
    edge_keys: HashSet<(NodeId, NodeId)>,
    endpoints: Vec<(NodeId, NodeId)>,
    connections: Vec<Connection>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user with an empty connection list.
    ///
    /// Panics if a user with the same id was already added.
    pub fn add_user(&mut self, mut user: User) -> NodeId {
        let node = match self.registry.insert(user.id) {
            Some(node) => node,
            None => panic!("user {} added twice", user.id),
        };
        user.connections.clear();
        user.connection_count = 0;
        self.users.push(user);
        self.adjacency.push(vec![]);
        node
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn edge_count(&self) -> usize {
        self.connections.len()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.registry.get(id).is_some()
    }

    pub fn user(&self, node: NodeId) -> &User {
        &self.users[node as usize]
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node as usize].len()
    }

    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_keys.contains(&edge_key(a, b))
    }

    pub fn mutual_friends(&self, a: NodeId, b: NodeId) -> usize {
        let other = self.adjacency[b as usize].iter().collect::<HashSet<_>>();
        self.adjacency[a as usize]
            .iter()
            .filter(|n| other.contains(n))
            .count()
    }

    /// Adds an undirected edge and returns its index. Self-loops, unknown
    /// nodes and duplicates in either direction are rejected with `None`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, attrs: EdgeAttrs) -> Option<usize> {
        let node_count = self.users.len();
        if a == b || a as usize >= node_count || b as usize >= node_count {
            return None;
        }
        if !self.edge_keys.insert(edge_key(a, b)) {
            return None;
        }

        let mutual_friends_count = self.mutual_friends(a, b);
        let id_a = self.users[a as usize].id;
        let id_b = self.users[b as usize].id;

        let index = self.connections.len();
        self.connections.push(Connection {
            user_a_id: id_a,
            user_b_id: id_b,
            relationship_type: attrs.relationship_type,
            connection_date: attrs.connection_date,
            strength_score: attrs.strength_score,
            mutual_friends_count,
            interaction_frequency: attrs.interaction_frequency,
            connection_source: attrs.connection_source,
            professional_relationship_type: None,
        });
        self.endpoints.push((a, b));

        self.adjacency[a as usize].push(b);
        self.adjacency[b as usize].push(a);

        let user_a = &mut self.users[a as usize];
        user_a.connections.push(id_b);
        user_a.connection_count += 1;
        let user_b = &mut self.users[b as usize];
        user_b.connections.push(id_a);
        user_b.connection_count += 1;

        Some(index)
    }

    pub fn freeze(self) -> Network {
        let node_count = self.users.len();
        let mut offsets = vec![0; node_count + 1];
        let mut buf = vec![0usize; node_count];

        // store number of incident edges per node
        for &(a, b) in &self.endpoints {
            buf[a as usize] += 1;
            buf[b as usize] += 1;
        }

        // compute edge offsets per node
        let mut next = 0;
        for (i, edges) in buf.iter().enumerate() {
            offsets[i] = next;
            next += edges;
            offsets[i + 1] = next;
        }

        buf.fill(0);
        let mut neighbors = vec![0; next];
        let mut incident = vec![0; next];
        for (e, &(a, b)) in self.endpoints.iter().enumerate() {
            for (u, v) in [(a, b), (b, a)] {
                let idx = offsets[u as usize] + buf[u as usize];
                neighbors[idx] = v;
                incident[idx] = e;
                buf[u as usize] += 1;
            }
        }

        Network {
            registry: self.registry,
            users: self.users,
            connections: self.connections,
            offsets,
            neighbors,
            incident,
        }
    }
}

/// A finished, read-only social graph. Per-node adjacency is stored in
/// compressed form, in edge creation order.
#[derive(Debug, Clone)]
pub struct Network {
    registry: UserRegistry,
    users: Vec<User>,
    connections: Vec<Connection>,
    offsets: Vec<usize>,
    neighbors: Vec<NodeId>,
    incident: Vec<usize>,
}

impl Network {
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn edge_count(&self) -> usize {
        self.connections.len()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn user(&self, node: NodeId) -> &User {
        &self.users[node as usize]
    }

    pub fn node_of(&self, id: &Uuid) -> Option<NodeId> {
        self.registry.get(id)
    }

    pub fn user_by_id(&self, id: &Uuid) -> Option<&User> {
        self.node_of(id).map(|node| self.user(node))
    }

    /// The privileged demo account: always the first user added.
    pub fn seed_user(&self) -> Option<&User> {
        self.users.first()
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.offsets[node as usize + 1] - self.offsets[node as usize]
    }

    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.neighbors[self.offsets[node as usize]..self.offsets[node as usize + 1]]
    }

    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }

    pub fn edges_of(&'_ self, node: NodeId) -> IncidentEdgeIter<'_> {
        IncidentEdgeIter::new(self, node)
    }

    pub fn connections_of(&self, node: NodeId) -> impl Iterator<Item = &Connection> {
        self.edges_of(node).map(|e| &self.connections[e.edge])
    }

    pub fn into_parts(self) -> (Vec<User>, Vec<Connection>) {
        (self.users, self.connections)
    }

    /// Re-derives the structural invariants from the connection list alone.
    pub fn check_consistency(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        let mut counts = vec![0usize; self.users.len()];

        for (e, conn) in self.connections.iter().enumerate() {
            let (Some(a), Some(b)) = (
                self.node_of(&conn.user_a_id),
                self.node_of(&conn.user_b_id),
            ) else {
                bail!("connection {e} references an unknown user");
            };
            if a == b {
                bail!("connection {e} is a self-loop on {}", conn.user_a_id);
            }
            if !seen.insert(edge_key(a, b)) {
                bail!(
                    "connection {e} duplicates the pair {} / {}",
                    conn.user_a_id,
                    conn.user_b_id
                );
            }
            counts[a as usize] += 1;
            counts[b as usize] += 1;
        }

        for (node, user) in self.users.iter().enumerate() {
            let expected = counts[node];
            if user.connection_count != expected
                || user.connections.len() != expected
                || self.degree(node as NodeId) != expected
            {
                bail!(
                    "user {} has connection_count {} but participates in {} connections",
                    user.id,
                    user.connection_count,
                    expected
                );
            }
            for other in &user.connections {
                match self.node_of(other) {
                    Some(n) if self.are_connected(node as NodeId, n) => {}
                    _ => bail!("user {} lists {} without an edge", user.id, other),
                }
            }
        }

        Ok(())
    }
}

pub struct IncidentEdgeIter<'a> {
    graph: &'a Network,
    start: usize,
    end: usize,
    next: usize,
}

impl<'a> IncidentEdgeIter<'a> {
    pub fn new(graph: &'a Network, node: NodeId) -> Self {
        Self {
            graph,
            start: graph.offsets[node as usize],
            end: graph.offsets[node as usize + 1],
            next: 0,
        }
    }
}

impl<'a> Iterator for IncidentEdgeIter<'a> {
    type Item = IncidentEdgeRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start + self.next < self.end {
            let result = Some(IncidentEdgeRef::new(
                self.graph.neighbors[self.start + self.next],
                self.graph.incident[self.start + self.next],
            ));
            self.next += 1;
            result
        } else {
            None
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct IncidentEdgeRef {
    pub other: NodeId,
    pub edge: usize,
}

impl IncidentEdgeRef {
    pub fn new(other: NodeId, edge: usize) -> Self {
        Self { other, edge }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{attrs, builder_with_users};

    #[test]
    fn test_no_edges() {
        let gb = builder_with_users(2);
        let g = gb.freeze();

        assert_eq!(3, g.offsets.len());
        assert!(g.offsets.iter().all(|off| *off == 0));
        assert_eq!(0, g.edge_count());
        assert_eq!(0, g.edges_of(0).count());
        assert_eq!(0, g.edges_of(1).count());
        assert!(g.check_consistency().is_ok());
    }

    #[test]
    fn test_single_edge() {
        let mut gb = builder_with_users(2);
        assert_eq!(Some(0), gb.add_edge(0, 1, attrs(0.5)));
        let g = gb.freeze();

        assert_eq!(vec![0, 1, 2], g.offsets);
        assert_eq!(Some(IncidentEdgeRef::new(1, 0)), g.edges_of(0).next());
        assert_eq!(Some(IncidentEdgeRef::new(0, 0)), g.edges_of(1).next());
        assert_eq!(1, g.user(0).connection_count);
        assert_eq!(vec![g.user(1).id], g.user(0).connections);
        assert_eq!(vec![g.user(0).id], g.user(1).connections);
    }

    #[test]
    fn test_rejects_self_loop() {
        let mut gb = builder_with_users(2);
        assert_eq!(None, gb.add_edge(1, 1, attrs(0.5)));
        assert_eq!(0, gb.edge_count());
        assert_eq!(0, gb.user(1).connection_count);
    }

    #[test]
    fn test_rejects_unknown_node() {
        let mut gb = builder_with_users(2);
        assert_eq!(None, gb.add_edge(0, 5, attrs(0.5)));
        assert_eq!(0, gb.degree(0));
    }

    #[test]
    fn test_rejects_reverse_duplicate() {
        let mut gb = builder_with_users(2);
        assert!(gb.add_edge(0, 1, attrs(0.5)).is_some());
        assert_eq!(None, gb.add_edge(1, 0, attrs(0.7)));
        assert_eq!(None, gb.add_edge(0, 1, attrs(0.7)));
        assert_eq!(1, gb.edge_count());
        assert_eq!(1, gb.degree(0));
        assert_eq!(1, gb.degree(1));
        assert!(gb.are_connected(1, 0));
    }

    #[test]
    fn test_mutual_friends_is_point_in_time() {
        let mut gb = builder_with_users(4);
        gb.add_edge(0, 1, attrs(0.9));
        gb.add_edge(0, 2, attrs(0.9));
        let e = gb.add_edge(1, 2, attrs(0.9)).unwrap();
        gb.add_edge(1, 3, attrs(0.9));
        gb.add_edge(2, 3, attrs(0.9));
        let g = gb.freeze();

        // 1 and 2 now share 0 and 3, but only 0 existed when they connected
        assert_eq!(1, g.connections()[e].mutual_friends_count);
        assert_eq!(0, g.connections()[0].mutual_friends_count);
    }

    #[test]
    fn test_multiple_edges() {
        let mut gb = builder_with_users(3);
        gb.add_edge(0, 2, attrs(0.1));
        gb.add_edge(2, 1, attrs(0.2));
        gb.add_edge(0, 1, attrs(0.3));
        let g = gb.freeze();

        assert_eq!(vec![0, 2, 4, 6], g.offsets);
        let mut iter = g.edges_of(0);
        assert_eq!(Some(IncidentEdgeRef::new(2, 0)), iter.next());
        assert_eq!(Some(IncidentEdgeRef::new(1, 2)), iter.next());
        assert_eq!(None, iter.next());
        let mut iter = g.edges_of(1);
        assert_eq!(Some(IncidentEdgeRef::new(2, 1)), iter.next());
        assert_eq!(Some(IncidentEdgeRef::new(0, 2)), iter.next());
        assert_eq!(None, iter.next());
        assert_eq!(&[0, 1], g.neighbors(2));

        let strengths = g.connections_of(1).map(|c| c.strength_score).collect::<Vec<_>>();
        assert_eq!(vec![0.2, 0.3], strengths);
        assert!(g.check_consistency().is_ok());
    }

    #[test]
    fn test_add_user_resets_connections() {
        let mut gb = NetworkBuilder::new();
        let mut user = crate::core::testing::user(1);
        user.connections.push(Uuid::from_u128(99));
        user.connection_count = 4;
        let node = gb.add_user(user);

        assert_eq!(0, gb.user(node).connection_count);
        assert!(gb.user(node).connections.is_empty());
        assert!(gb.contains(&Uuid::from_u128(1)));
        assert!(!gb.contains(&Uuid::from_u128(99)));
    }

    #[test]
    #[should_panic]
    fn test_add_user_twice_panics() {
        let mut gb = NetworkBuilder::new();
        gb.add_user(crate::core::testing::user(1));
        gb.add_user(crate::core::testing::user(1));
    }

    #[test]
    fn test_consistency_detects_count_drift() {
        let mut gb = builder_with_users(2);
        gb.add_edge(0, 1, attrs(0.5));
        let mut g = gb.freeze();
        g.users[0].connection_count = 3;

        assert!(g.check_consistency().is_err());
    }

    #[test]
    fn test_lookup_by_id() {
        let mut gb = builder_with_users(3);
        gb.add_edge(0, 2, attrs(0.5));
        let g = gb.freeze();
        let id = g.user(2).id;

        assert_eq!(Some(2), g.node_of(&id));
        assert_eq!(Some(g.user(2)), g.user_by_id(&id));
        assert_eq!(Some(g.user(0)), g.seed_user());
        assert!(g.are_connected(2, 0));
        assert!(!g.are_connected(1, 0));

        let (users, connections) = g.into_parts();
        assert_eq!(3, users.len());
        assert_eq!(1, connections.len());
    }
}
