use crate::core::models::TrackId;

pub const DEFAULT_RECENT_CAPACITY: usize = 12;

/// Play history, newest first, without duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentlyPlayed {
    ids: Vec<TrackId>,
    capacity: usize,
}

impl RecentlyPlayed {
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Restore persisted history, trimming to capacity.
    pub fn with_history(capacity: usize, ids: Vec<TrackId>) -> Self {
        let mut recent = Self::new(capacity);
        for id in ids {
            if !recent.ids.contains(&id) && recent.ids.len() < recent.capacity {
                recent.ids.push(id);
            }
        }
        recent
    }

    /// Move `id` to the front, evicting the oldest entry past capacity.
    pub fn record(&mut self, id: &TrackId) {
        self.ids.retain(|existing| existing != id);
        self.ids.insert(0, id.clone());
        self.ids.truncate(self.capacity);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[TrackId] {
        &self.ids
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for RecentlyPlayed {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_CAPACITY)
    }
}
