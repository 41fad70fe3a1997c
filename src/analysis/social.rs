use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::core::graph::Network;
use crate::core::ids::NodeId;
use crate::core::model::{Connection, ProfessionalRelationshipType, User};

const MUTUAL_FRIEND_WEIGHT: u32 = 3;

/// Connected users in edge creation order. Unknown ids have no friends.
pub fn friends_of<'a>(network: &'a Network, id: &Uuid) -> Vec<&'a User> {
    match network.node_of(id) {
        Some(node) => network
            .neighbors(node)
            .iter()
            .map(|&n| network.user(n))
            .collect(),
        None => vec![],
    }
}

/// Users in the same city that are not yet connected.
pub fn nearby_users<'a>(network: &'a Network, id: &Uuid) -> Vec<&'a User> {
    let Some(node) = network.node_of(id) else {
        return vec![];
    };
    let city = &network.user(node).location.city;
    (0..network.user_count() as NodeId)
        .filter(|&n| n != node && !network.are_connected(node, n))
        .map(|n| network.user(n))
        .filter(|u| &u.location.city == city)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub user_id: Uuid,
    pub score: u32,
    pub mutual_friends: usize,
    pub shared_interests: usize,
    pub same_city: bool,
}

fn mutual_friends(network: &Network, a: NodeId, b: NodeId) -> usize {
    let other = network.neighbors(b).iter().collect::<HashSet<_>>();
    network
        .neighbors(a)
        .iter()
        .filter(|n| other.contains(n))
        .count()
}

/// Ranks users not yet connected to `id`. Mutual friends weigh the most,
/// then shared interests and a shared city. Zero scores are dropped and ties
/// keep population order.
pub fn recommended_connections(network: &Network, id: &Uuid, limit: usize) -> Vec<Recommendation> {
    let Some(node) = network.node_of(id) else {
        return vec![];
    };
    let me = network.user(node);
    let interests = me.interests.iter().collect::<HashSet<_>>();

    let mut result = (0..network.user_count() as NodeId)
        .filter(|&n| n != node && !network.are_connected(node, n))
        .filter_map(|n| {
            let candidate = network.user(n);
            let mutual = mutual_friends(network, node, n);
            let shared = candidate
                .interests
                .iter()
                .filter(|i| interests.contains(i))
                .count();
            let same_city = candidate.location.city == me.location.city;
            let score = mutual as u32 * MUTUAL_FRIEND_WEIGHT + shared as u32 + same_city as u32;
            (score > 0).then_some(Recommendation {
                user_id: candidate.id,
                score,
                mutual_friends: mutual,
                shared_interests: shared,
                same_city,
            })
        })
        .collect::<Vec<_>>();

    // stable sort keeps population order within equal scores
    result.sort_by(|a, b| b.score.cmp(&a.score));
    result.truncate(limit);
    result
}

fn pair_key(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a < b { (a, b) } else { (b, a) }
}

/// Per-session friendship categories kept beside a network. The network
/// itself is never modified; `apply` returns annotated copies.
#[derive(Debug, Clone, Default)]
pub struct FriendCategories {
    categories: HashMap<(Uuid, Uuid), ProfessionalRelationshipType>,
}

impl FriendCategories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when `a` and `b` are not connected in `network`.
    pub fn categorize(
        &mut self,
        network: &Network,
        a: Uuid,
        b: Uuid,
        kind: ProfessionalRelationshipType,
    ) -> bool {
        let connected = match (network.node_of(&a), network.node_of(&b)) {
            (Some(na), Some(nb)) => network.are_connected(na, nb),
            _ => false,
        };
        if connected {
            self.categories.insert(pair_key(a, b), kind);
        }
        connected
    }

    pub fn category(&self, a: Uuid, b: Uuid) -> Option<ProfessionalRelationshipType> {
        self.categories.get(&pair_key(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn apply(&self, network: &Network) -> Vec<Connection> {
        network
            .connections()
            .iter()
            .map(|c| {
                let mut copy = c.clone();
                if let Some(kind) = self.category(c.user_a_id, c.user_b_id) {
                    copy.professional_relationship_type = Some(kind);
                }
                copy
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::NetworkBuilder;
    use crate::core::testing::{attrs, located_user};

    // 0 - 1 - 2, 0 - 3; 4 isolated in Tucson
    fn sample_network() -> Network {
        let mut gb = NetworkBuilder::new();
        gb.add_user(located_user(0, "Phoenix", &["Coffee", "Yoga"]));
        gb.add_user(located_user(1, "Phoenix", &["Coffee"]));
        gb.add_user(located_user(2, "Phoenix", &["Yoga", "Travel"]));
        gb.add_user(located_user(3, "Mesa", &["Cooking"]));
        gb.add_user(located_user(4, "Tucson", &["Finance"]));
        gb.add_user(located_user(5, "Mesa", &["Coffee", "Cooking"]));
        gb.add_edge(0, 1, attrs(0.9));
        gb.add_edge(1, 2, attrs(0.8));
        gb.add_edge(0, 3, attrs(0.7));
        gb.freeze()
    }

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn test_friends_of() {
        let g = sample_network();
        let friends = friends_of(&g, &id(0)).iter().map(|u| u.id).collect::<Vec<_>>();

        assert_eq!(vec![id(1), id(3)], friends);
        assert!(friends_of(&g, &id(42)).is_empty());
    }

    #[test]
    fn test_nearby_users_excludes_friends() {
        let g = sample_network();
        let nearby = nearby_users(&g, &id(0)).iter().map(|u| u.id).collect::<Vec<_>>();

        assert_eq!(vec![id(2)], nearby);
        assert_eq!(vec![id(5)], nearby_users(&g, &id(3)).iter().map(|u| u.id).collect::<Vec<_>>());
    }

    #[test]
    fn test_recommendations_ranked() {
        let g = sample_network();
        let recs = recommended_connections(&g, &id(0), 10);

        // 2: one mutual friend, Yoga, Phoenix; 5: Coffee
        assert_eq!(2, recs.len());
        assert_eq!(id(2), recs[0].user_id);
        assert_eq!(5, recs[0].score);
        assert_eq!(1, recs[0].mutual_friends);
        assert!(recs[0].same_city);
        assert_eq!(id(5), recs[1].user_id);
        assert_eq!(1, recs[1].score);
    }

    #[test]
    fn test_recommendations_respect_limit() {
        let g = sample_network();

        assert_eq!(1, recommended_connections(&g, &id(0), 1).len());
        assert!(recommended_connections(&g, &id(4), 5).is_empty());
        assert!(recommended_connections(&g, &id(42), 5).is_empty());
    }

    #[test]
    fn test_categories_copy_on_write() {
        let g = sample_network();
        let mut categories = FriendCategories::new();

        assert!(categories.categorize(&g, id(3), id(0), ProfessionalRelationshipType::ProfessionalOnly));
        assert!(!categories.categorize(&g, id(0), id(2), ProfessionalRelationshipType::PersonalAccess));
        assert_eq!(1, categories.len());
        assert_eq!(
            Some(ProfessionalRelationshipType::ProfessionalOnly),
            categories.category(id(0), id(3))
        );

        let annotated = categories.apply(&g);
        assert_eq!(
            Some(ProfessionalRelationshipType::ProfessionalOnly),
            annotated[2].professional_relationship_type
        );
        assert_eq!(None, annotated[0].professional_relationship_type);
        assert!(g.connections().iter().all(|c| c.professional_relationship_type.is_none()));
    }
}
