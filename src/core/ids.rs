use std::collections::HashMap;
use uuid::Uuid;

pub type NodeId = u32;

/// Maps user ids to dense node indices, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    map: HashMap<Uuid, NodeId>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Returns `None` when `id` is already registered.
    pub fn insert(&mut self, id: Uuid) -> Option<NodeId> {
        if self.map.contains_key(&id) {
            return None;
        }
        let next = self.map.len();
        if next == u32::MAX as usize {
            panic!("Users count exceeds the limit")
        }
        self.map.insert(id, next as NodeId);
        Some(next as NodeId)
    }

    pub fn get(&self, id: &Uuid) -> Option<NodeId> {
        self.map.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
