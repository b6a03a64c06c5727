//! Group id interning.
//!
//! Maps laboratory ids to dense integers in first-seen order, which is also
//! the order groups take turns in during the round-robin pass.

use rustc_hash::FxHashMap;

/// Interned group id, an index into per-group tables.
pub type GroupIdInt = u32;

/// Interner for group ids that remembers first-seen order.
#[derive(Debug, Clone)]
pub struct GroupInterner {
    to_int: FxHashMap<String, GroupIdInt>,
    from_int: Vec<String>,
}

impl GroupInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_int: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_int: Vec::with_capacity(capacity),
        }
    }

    /// Intern a group id. Repeated ids return the id given on first sight.
    pub fn intern(&mut self, group_id: &str) -> GroupIdInt {
        if let Some(&id) = self.to_int.get(group_id) {
            return id;
        }
        let id = self.from_int.len() as GroupIdInt;
        self.from_int.push(group_id.to_string());
        self.to_int.insert(group_id.to_string(), id);
        id
    }

    #[inline]
    pub fn resolve(&self, id: GroupIdInt) -> Option<&str> {
        self.from_int.get(id as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }
}

impl Default for GroupInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
