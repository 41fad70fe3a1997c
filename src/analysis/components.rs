use crate::core::graph::Network;
use crate::core::ids::NodeId;
use std::collections::HashMap;

struct DisjointSet {
    parent: Vec<NodeId>,
    size: Vec<u32>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as NodeId).collect(),
            size: vec![1; size],
        }
    }

    fn find(&mut self, u: NodeId) -> NodeId {
        let mut ru = u;
        while ru != self.parent[ru as usize] {
            ru = self.parent[ru as usize];
        }
        let mut v = u;
        while v != self.parent[v as usize] {
            let w = v;
            v = self.parent[v as usize];
            self.parent[w as usize] = ru;
        }
        ru
    }

    fn union(&mut self, u: NodeId, v: NodeId) {
        let ru = self.find(u) as usize;
        let rv = self.find(v) as usize;
        if ru == rv {
            return;
        }
        if self.size[ru] > self.size[rv] {
            self.parent[rv] = ru as NodeId;
            self.size[ru] += self.size[rv];
        } else {
            self.parent[ru] = rv as NodeId;
            self.size[rv] += self.size[ru];
        }
    }
}

/// Component label per user. Labels are dense and numbered by first
/// appearance in population order.
pub fn connected_components(network: &Network) -> Vec<u32> {
    let mut clusters = HashMap::new();
    let mut dsu = DisjointSet::new(network.user_count());
    for u in 0..network.user_count() as NodeId {
        for &v in network.neighbors(u) {
            dsu.union(u, v);
        }
    }
    let mut result = vec![0; network.user_count()];
    for u in 0..network.user_count() as NodeId {
        let ru = dsu.find(u);
        let next = clusters.len() as u32;
        result[u as usize] = *clusters.entry(ru).or_insert(next);
    }
    result
}

pub fn component_count(network: &Network) -> usize {
    connected_components(network)
        .iter()
        .max()
        .map_or(0, |max| *max as usize + 1)
}
