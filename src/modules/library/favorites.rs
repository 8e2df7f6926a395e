use crate::core::models::TrackId;

/// Outcome of [`Favorites::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

impl FavoriteChange {
    pub fn toast(self) -> (&'static str, &'static str) {
        match self {
            FavoriteChange::Added => ("Added to Favorites", "❤️"),
            FavoriteChange::Removed => ("Removed from Favorites", "💔"),
        }
    }
}

/// Liked tracks, in the order they were liked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Favorites {
    ids: Vec<TrackId>,
}

impl Favorites {
    pub fn new(ids: Vec<TrackId>) -> Self {
        let mut favorites = Self::default();
        for id in ids {
            if !favorites.contains(&id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }

    pub fn toggle(&mut self, id: &TrackId) -> FavoriteChange {
        match self.ids.iter().position(|f| f == id) {
            Some(pos) => {
                self.ids.remove(pos);
                FavoriteChange::Removed
            }
            None => {
                self.ids.push(id.clone());
                FavoriteChange::Added
            }
        }
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackId> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[TrackId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
