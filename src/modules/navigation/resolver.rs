use crate::core::error::NavigationError;
use crate::core::models::{RepeatMode, TrackDescriptor, TrackId};
use crate::core::traits::PlayerSurface;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

/// Default delay before re-trying an explicit play after a jump.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(120);

/// One-shot "make sure it actually plays" check scheduled by a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredRetry {
    pub index: usize,
    pub due: Instant,
}

/// What `on_track_ended` decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The same track was restarted from zero (repeat one).
    Restart(usize),
    /// Playback moved to this position.
    Jump(usize),
    /// Nothing to play next.
    Stay,
}

/// Owns playback order: shuffle/repeat policy, the shuffle permutation and
/// the single authoritative "current index".
///
/// The resolver never plays audio itself. Every target it settles on is handed
/// to a [`PlayerSurface`]; every playback started elsewhere must be reported
/// back through [`NavigationResolver::notify_track_started`].
///
/// Shuffle uses a fixed permutation of all positions:
/// - built with Fisher-Yates, then rotated so the current track comes first
/// - walked forwards and backwards, always wrapping
/// - rebuilt only when shuffle is switched on or the user picks a track
pub struct NavigationResolver {
    tracks: Vec<TrackDescriptor>,

    shuffle_enabled: bool,

    repeat_mode: RepeatMode,

    /// Permutation of `0..tracks.len()`; empty when shuffle is off
    permutation: Vec<usize>,

    /// `None` when nothing is known to be playing
    current_index: Option<usize>,

    retry_delay: Duration,

    pending_retry: Option<DeferredRetry>,

    rng: SmallRng,
}

impl NavigationResolver {
    pub fn new(tracks: Vec<TrackDescriptor>) -> Self {
        Self {
            tracks,
            shuffle_enabled: false,
            repeat_mode: RepeatMode::None,
            permutation: Vec::new(),
            current_index: None,
            retry_delay: DEFAULT_RETRY_DELAY,
            pending_retry: None,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Apply persisted preferences. Builds the permutation when shuffle is on.
    pub fn with_preferences(mut self, shuffle_enabled: bool, repeat_mode: RepeatMode) -> Self {
        self.repeat_mode = repeat_mode;
        self.set_shuffle(shuffle_enabled);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Use a deterministic random source (reproducible shuffles).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        if self.shuffle_enabled {
            self.build_shuffled_permutation();
        }
        self
    }

    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    pub fn track(&self, index: usize) -> Option<&TrackDescriptor> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&TrackDescriptor> {
        self.current_index.and_then(|idx| self.tracks.get(idx))
    }

    pub fn is_shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    pub fn pending_retry(&self) -> Option<DeferredRetry> {
        self.pending_retry
    }

    /// Position of the track with this id.
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Set shuffle state explicitly. Enabling always rebuilds the permutation.
    pub fn set_shuffle(&mut self, enabled: bool) {
        self.shuffle_enabled = enabled;
        if enabled {
            self.build_shuffled_permutation();
        } else {
            self.permutation.clear();
        }
    }

    /// Toggle shuffle on/off, returning the new state
    pub fn toggle_shuffle(&mut self) -> bool {
        self.set_shuffle(!self.shuffle_enabled);
        self.shuffle_enabled
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// Advance repeat mode none -> all -> one -> none, returning the new mode
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat_mode = self.repeat_mode.cycle();
        self.repeat_mode
    }

    /// Replace the shuffle order with an explicit one.
    pub fn set_permutation(&mut self, order: Vec<usize>) -> Result<(), NavigationError> {
        if order.len() != self.tracks.len() {
            return Err(NavigationError::OrderLength {
                expected: self.tracks.len(),
                found: order.len(),
            });
        }

        let mut seen = vec![false; order.len()];
        for &position in &order {
            match seen.get_mut(position) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(NavigationError::NotPermutation(position)),
            }
        }

        self.permutation = order;
        Ok(())
    }

    /// Returns the cached current index when valid, otherwise tries to work
    /// out what the surface is playing by matching resource references.
    pub fn resolve_current_index(&self, surface: &dyn PlayerSurface) -> Option<usize> {
        if let Some(idx) = self.current_index {
            if idx < self.tracks.len() {
                return Some(idx);
            }
        }

        let active = surface.active_source()?;

        self.tracks
            .iter()
            .position(|t| t.source == active)
            .or_else(|| {
                self.tracks
                    .iter()
                    .position(|t| sources_match(&t.source, &active))
            })
    }

    /// Rebuild the shuffle order: Fisher-Yates over every position, then
    /// rotate the current track (if any) to the front.
    pub fn build_shuffled_permutation(&mut self) {
        let mut order: Vec<usize> = (0..self.tracks.len()).collect();

        // `shuffle` walks i from len-1 down to 1 and swaps with j in [0, i].
        order.shuffle(&mut self.rng);

        if let Some(current) = self.current_index {
            if let Some(pos) = order.iter().position(|&i| i == current) {
                order.rotate_left(pos);
            }
        }

        self.permutation = order;
    }

    /// Play the next track. Returns the position that was started, if any.
    pub fn advance(&mut self, surface: &mut dyn PlayerSurface) -> Option<usize> {
        let current = self.resolve_current_index(&*surface);

        let target = if self.shuffle_enabled {
            self.ensure_permutation();
            let position = current.and_then(|c| self.permutation.iter().position(|&i| i == c));
            let next = match position {
                Some(pos) if pos + 1 < self.permutation.len() => self.permutation.get(pos + 1),
                _ => self.permutation.first(),
            };
            next.copied()
        } else {
            let next = current.map_or(0, |c| c + 1);
            if next < self.tracks.len() {
                Some(next)
            } else if self.repeat_mode == RepeatMode::All {
                Some(0)
            } else {
                log::debug!("End of track list reached, nothing to advance to");
                None
            }
        };

        target.filter(|&idx| self.jump_to(idx, surface))
    }

    /// Play the previous track. Returns the position that was started, if any.
    pub fn retreat(&mut self, surface: &mut dyn PlayerSurface) -> Option<usize> {
        let current = self.resolve_current_index(&*surface);

        let target = if self.shuffle_enabled {
            self.ensure_permutation();
            let position = current.and_then(|c| self.permutation.iter().position(|&i| i == c));
            let previous = match position {
                Some(pos) if pos > 0 => self.permutation.get(pos - 1),
                _ => self.permutation.last(),
            };
            previous.copied()
        } else {
            // Clamps at the first track; sequential mode never wraps backwards.
            Some(current.map_or(0, |c| c.saturating_sub(1)))
        };

        target.filter(|&idx| self.jump_to(idx, surface))
    }

    /// Make `index` current and ask the surface to play it.
    ///
    /// Out-of-range positions are ignored and return `false`. The shuffle
    /// order is left untouched.
    pub fn jump_to(&mut self, index: usize, surface: &mut dyn PlayerSurface) -> bool {
        let Some(track) = self.tracks.get(index) else {
            log::debug!("Ignoring jump to missing position {}", index);
            return false;
        };

        self.current_index = Some(index);

        if let Err(e) = surface.select_track(track) {
            log::warn!("Could not start {}: {:#}", track.id, e);
        }

        self.pending_retry = Some(DeferredRetry {
            index,
            due: Instant::now() + self.retry_delay,
        });

        true
    }

    /// A manual pick: jump, then restart the shuffle order from the pick.
    pub fn select(&mut self, index: usize, surface: &mut dyn PlayerSurface) -> bool {
        if !self.jump_to(index, surface) {
            return false;
        }

        if self.shuffle_enabled {
            self.build_shuffled_permutation();
        }

        true
    }

    /// Playback of `index` was started outside the resolver.
    pub fn notify_track_started(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.current_index = Some(index);
        }
    }

    /// The loaded track finished playing.
    pub fn on_track_ended(&mut self, surface: &mut dyn PlayerSurface) -> Transition {
        if self.repeat_mode == RepeatMode::One {
            if let Some(current) = self.resolve_current_index(&*surface) {
                if let Err(e) = surface.restart() {
                    log::warn!("Could not restart track {}: {:#}", current, e);
                }
                return Transition::Restart(current);
            }
        }

        match self.advance(surface) {
            Some(idx) => {
                // A natural end under shuffle starts a fresh order from the new track
                if self.shuffle_enabled {
                    self.build_shuffled_permutation();
                }
                Transition::Jump(idx)
            }
            None => Transition::Stay,
        }
    }

    /// Run the deferred play retry once it is due.
    pub fn poll_deferred(&mut self, now: Instant, surface: &mut dyn PlayerSurface) {
        let Some(retry) = self.pending_retry else {
            return;
        };

        if now < retry.due {
            return;
        }

        self.pending_retry = None;

        if surface.is_paused() {
            log::debug!("Track {} still paused after jump, calling play", retry.index);
            surface.play();
        }
    }

    fn ensure_permutation(&mut self) {
        if self.permutation.is_empty() || self.permutation.len() != self.tracks.len() {
            self.build_shuffled_permutation();
        }
    }
}

/// Compare two resource references exactly, or by trailing file name in
/// either direction (relative vs absolute addressing).
pub fn sources_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }

    let tail_a = last_segment(a);
    let tail_b = last_segment(b);

    (!tail_b.is_empty() && a.ends_with(tail_b)) || (!tail_a.is_empty() && b.ends_with(tail_a))
}

fn last_segment(source: &str) -> &str {
    source.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::playback::silent_surface::{SilentSurface, SurfaceCall};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn tracks(n: usize) -> Vec<TrackDescriptor> {
        (0..n)
            .map(|i| {
                TrackDescriptor::new(
                    i,
                    &format!("Song {}", i),
                    "Band",
                    format!("/music/song{}.mp3", i),
                )
            })
            .collect()
    }

    fn sequential(n: usize, repeat: RepeatMode) -> NavigationResolver {
        NavigationResolver::new(tracks(n)).with_preferences(false, repeat)
    }

    fn shuffled(order: Vec<usize>, current: Option<usize>) -> NavigationResolver {
        let mut r = NavigationResolver::new(tracks(order.len()))
            .with_preferences(true, RepeatMode::None)
            .with_seed(7);
        r.set_permutation(order).unwrap();
        r.current_index = current;
        r
    }

    fn is_permutation(order: &[usize], n: usize) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort_unstable();
        sorted == (0..n).collect::<Vec<_>>()
    }

    // ── build_shuffled_permutation ────────────────────────────────────────────

    #[test]
    fn permutation_covers_every_position() {
        for n in 1..20 {
            let mut r = NavigationResolver::new(tracks(n)).with_seed(n as u64);
            r.build_shuffled_permutation();
            assert_eq!(r.permutation().len(), n);
            assert!(is_permutation(r.permutation(), n));
        }
    }

    #[test]
    fn permutation_starts_from_current_track() {
        let mut r = NavigationResolver::new(tracks(9)).with_seed(3);
        r.current_index = Some(4);
        r.build_shuffled_permutation();
        assert_eq!(r.permutation()[0], 4);
    }

    #[test]
    fn enabling_shuffle_keeps_current_first() {
        let mut r = sequential(6, RepeatMode::None);
        r.current_index = Some(2);
        r.set_shuffle(true);
        assert_eq!(r.permutation()[0], 2);
        r.set_shuffle(false);
        assert!(r.permutation().is_empty());
    }

    #[test]
    fn set_permutation_rejects_bad_orders() {
        let mut r = NavigationResolver::new(tracks(3));
        assert_eq!(
            r.set_permutation(vec![0, 1]),
            Err(NavigationError::OrderLength { expected: 3, found: 2 })
        );
        assert_eq!(
            r.set_permutation(vec![0, 0, 1]),
            Err(NavigationError::NotPermutation(0))
        );
        assert_eq!(
            r.set_permutation(vec![0, 1, 5]),
            Err(NavigationError::NotPermutation(5))
        );
        assert!(r.set_permutation(vec![2, 0, 1]).is_ok());
    }

    // ── advance, sequential ───────────────────────────────────────────────────

    #[test]
    fn advance_sequential_steps_forward() {
        let mut r = sequential(3, RepeatMode::None);
        let mut surface = SilentSurface::new();
        r.current_index = Some(0);
        assert_eq!(r.advance(&mut surface), Some(1));
        assert_eq!(r.current_index(), Some(1));
    }

    #[test]
    fn advance_sequential_unknown_current_starts_at_zero() {
        let mut r = sequential(3, RepeatMode::None);
        let mut surface = SilentSurface::new();
        assert_eq!(r.advance(&mut surface), Some(0));
    }

    #[test]
    fn advance_at_end_without_repeat_is_noop() {
        let mut r = sequential(3, RepeatMode::None);
        let mut surface = SilentSurface::new();
        r.current_index = Some(2);
        assert_eq!(r.advance(&mut surface), None);
        assert_eq!(r.current_index(), Some(2));
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn advance_at_end_with_repeat_one_is_noop() {
        let mut r = sequential(3, RepeatMode::One);
        let mut surface = SilentSurface::new();
        r.current_index = Some(2);
        assert_eq!(r.advance(&mut surface), None);
        assert_eq!(r.current_index(), Some(2));
    }

    #[test]
    fn advance_at_end_with_repeat_all_wraps() {
        let mut r = sequential(3, RepeatMode::All);
        let mut surface = SilentSurface::new();
        r.current_index = Some(2);
        assert_eq!(r.advance(&mut surface), Some(0));
        assert_eq!(r.current_index(), Some(0));
    }

    #[test]
    fn advance_on_empty_list_does_nothing() {
        let mut r = NavigationResolver::new(Vec::new()).with_preferences(false, RepeatMode::All);
        let mut surface = SilentSurface::new();
        assert_eq!(r.advance(&mut surface), None);
        assert_eq!(r.current_index(), None);

        r.set_shuffle(true);
        assert_eq!(r.advance(&mut surface), None);
        assert_eq!(r.retreat(&mut surface), None);
    }

    // ── retreat, sequential ───────────────────────────────────────────────────

    #[test]
    fn retreat_sequential_clamps_at_first_track() {
        for mode in [RepeatMode::None, RepeatMode::One, RepeatMode::All] {
            let mut r = sequential(4, mode);
            let mut surface = SilentSurface::new();
            r.current_index = Some(0);
            assert_eq!(r.retreat(&mut surface), Some(0));
            assert_eq!(r.current_index(), Some(0));
        }
    }

    #[test]
    fn retreat_sequential_steps_back() {
        let mut r = sequential(4, RepeatMode::None);
        let mut surface = SilentSurface::new();
        r.current_index = Some(3);
        assert_eq!(r.retreat(&mut surface), Some(2));
    }

    // ── shuffle walking ───────────────────────────────────────────────────────

    #[test]
    fn shuffle_advance_walks_permutation_and_wraps() {
        let mut r = shuffled(vec![2, 0, 1], Some(0));
        let mut surface = SilentSurface::new();
        assert_eq!(r.advance(&mut surface), Some(1));
        assert_eq!(r.advance(&mut surface), Some(2));
        assert_eq!(r.advance(&mut surface), Some(0));
        assert_eq!(r.permutation(), &[2, 0, 1], "jumps must not reshuffle");
    }

    #[test]
    fn shuffle_advance_with_unknown_current_takes_first_entry() {
        let mut r = shuffled(vec![2, 0, 1], None);
        let mut surface = SilentSurface::new();
        assert_eq!(r.advance(&mut surface), Some(2));
    }

    #[test]
    fn shuffle_retreat_moves_to_preceding_entry() {
        let mut r = shuffled(vec![1, 2, 0], Some(2));
        let mut surface = SilentSurface::new();
        assert_eq!(r.retreat(&mut surface), Some(1));
    }

    #[test]
    fn shuffle_retreat_at_first_position_wraps_to_last() {
        let mut r = shuffled(vec![1, 2, 0], Some(1));
        let mut surface = SilentSurface::new();
        assert_eq!(r.retreat(&mut surface), Some(0));
    }

    #[test]
    fn shuffle_wraps_regardless_of_repeat_mode() {
        let mut r = shuffled(vec![1, 0], Some(0));
        r.set_repeat_mode(RepeatMode::None);
        let mut surface = SilentSurface::new();
        assert_eq!(r.advance(&mut surface), Some(1));
    }

    // ── jump_to / select ──────────────────────────────────────────────────────

    #[test]
    fn jump_to_out_of_range_is_ignored() {
        let mut r = sequential(2, RepeatMode::None);
        let mut surface = SilentSurface::new();
        assert!(!r.jump_to(5, &mut surface));
        assert_eq!(r.current_index(), None);
        assert!(surface.calls().is_empty());
        assert!(r.pending_retry().is_none());
    }

    #[test]
    fn jump_to_selects_on_surface_and_schedules_retry() {
        let mut r = sequential(3, RepeatMode::None);
        let mut surface = SilentSurface::new();
        assert!(r.jump_to(1, &mut surface));
        assert_eq!(
            surface.calls(),
            &[SurfaceCall::Select("/music/song1.mp3".to_string())]
        );
        assert_eq!(r.pending_retry().map(|p| p.index), Some(1));
    }

    #[test]
    fn select_rebuilds_shuffle_from_pick() {
        let mut r = shuffled(vec![0, 1, 2, 3, 4], Some(0));
        let mut surface = SilentSurface::new();
        assert!(r.select(3, &mut surface));
        assert_eq!(r.permutation()[0], 3);
        assert!(is_permutation(r.permutation(), 5));
    }

    #[test]
    fn notify_track_started_updates_current_only_when_valid() {
        let mut r = sequential(3, RepeatMode::None);
        r.notify_track_started(2);
        assert_eq!(r.current_index(), Some(2));
        r.notify_track_started(9);
        assert_eq!(r.current_index(), Some(2));
    }

    // ── on_track_ended ────────────────────────────────────────────────────────

    #[test]
    fn track_ended_with_repeat_one_restarts_without_moving() {
        let mut r = sequential(3, RepeatMode::One);
        let mut surface = SilentSurface::new();
        r.current_index = Some(1);
        assert_eq!(r.on_track_ended(&mut surface), Transition::Restart(1));
        assert_eq!(r.current_index(), Some(1));
        assert_eq!(surface.calls(), &[SurfaceCall::Restart]);
    }

    #[test]
    fn track_ended_otherwise_advances() {
        let mut r = sequential(3, RepeatMode::None);
        let mut surface = SilentSurface::new();
        r.current_index = Some(1);
        assert_eq!(r.on_track_ended(&mut surface), Transition::Jump(2));
        assert_eq!(r.on_track_ended(&mut surface), Transition::Stay);
    }

    #[test]
    fn track_ended_under_shuffle_reshuffles_from_next_track() {
        let identity: Vec<usize> = (0..8).collect();
        let mut r = shuffled(identity.clone(), Some(0));
        let mut surface = SilentSurface::new();

        assert_eq!(r.on_track_ended(&mut surface), Transition::Jump(1));
        assert_eq!(r.permutation()[0], 1);
        assert!(is_permutation(r.permutation(), 8));
        assert_ne!(r.permutation(), identity.as_slice());
    }

    #[test]
    fn manual_advance_under_shuffle_keeps_order() {
        let mut r = shuffled(vec![2, 0, 1], Some(2));
        let mut surface = SilentSurface::new();

        assert_eq!(r.advance(&mut surface), Some(0));
        assert_eq!(r.permutation(), &[2, 0, 1]);
    }

    // ── resolve_current_index ─────────────────────────────────────────────────

    #[test]
    fn resolve_prefers_cached_index() {
        let mut r = sequential(3, RepeatMode::None);
        r.current_index = Some(1);
        let mut surface = SilentSurface::new();
        surface.load("/music/song2.mp3");
        assert_eq!(r.resolve_current_index(&surface), Some(1));
    }

    #[test]
    fn resolve_falls_back_to_active_source() {
        let r = sequential(3, RepeatMode::None);
        let mut surface = SilentSurface::new();
        surface.load("/music/song2.mp3");
        assert_eq!(r.resolve_current_index(&surface), Some(2));
    }

    #[test]
    fn resolve_matches_by_trailing_file_name() {
        let r = sequential(3, RepeatMode::None);
        let mut surface = SilentSurface::new();
        surface.load("song1.mp3");
        assert_eq!(r.resolve_current_index(&surface), Some(1));

        surface.load("http://host/static/music/song0.mp3");
        assert_eq!(r.resolve_current_index(&surface), Some(0));
    }

    #[test]
    fn resolve_without_match_is_none() {
        let r = sequential(3, RepeatMode::None);
        let mut surface = SilentSurface::new();
        assert_eq!(r.resolve_current_index(&surface), None);
        surface.load("/elsewhere/other.flac");
        assert_eq!(r.resolve_current_index(&surface), None);
    }

    #[test]
    fn sources_match_ignores_empty_references() {
        assert!(!sources_match("", "a.mp3"));
        assert!(!sources_match("dir/", "a.mp3"));
        assert!(sources_match("C:\\music\\a.mp3", "a.mp3"));
    }

    // ── poll_deferred ─────────────────────────────────────────────────────────

    #[test]
    fn deferred_retry_plays_if_still_paused() {
        let mut r = sequential(2, RepeatMode::None).with_retry_delay(Duration::from_millis(120));
        let mut surface = SilentSurface::new().stalling();
        r.jump_to(0, &mut surface);
        let due = r.pending_retry().unwrap().due;

        r.poll_deferred(due - Duration::from_millis(1), &mut surface);
        assert!(surface.is_paused(), "retry must wait until due");

        r.poll_deferred(due, &mut surface);
        assert!(!surface.is_paused());
        assert!(r.pending_retry().is_none());
        assert_eq!(surface.calls().last(), Some(&SurfaceCall::Play));
    }

    #[test]
    fn deferred_retry_leaves_playing_track_alone() {
        let mut r = sequential(2, RepeatMode::None);
        let mut surface = SilentSurface::new();
        r.jump_to(1, &mut surface);
        let due = r.pending_retry().unwrap().due;
        r.poll_deferred(due, &mut surface);
        assert_eq!(surface.calls().len(), 1, "only the original select");
    }

    // ── Properties ────────────────────────────────────────────────────────────

    proptest::proptest! {
        #[test]
        fn rotation_preserves_cyclic_order(n in 1usize..40, seed in 0u64..1000, current in 0usize..40) {
            let current = current % n;
            let mut before = NavigationResolver::new(tracks(n)).with_seed(seed);
            before.build_shuffled_permutation();
            let raw = before.permutation().to_vec();

            let mut after = NavigationResolver::new(tracks(n)).with_seed(seed);
            after.current_index = Some(current);
            after.build_shuffled_permutation();
            let rotated = after.permutation().to_vec();

            proptest::prop_assert_eq!(rotated[0], current);
            let pos = raw.iter().position(|&i| i == current).unwrap();
            let mut expected = raw.clone();
            expected.rotate_left(pos);
            proptest::prop_assert_eq!(rotated, expected);
        }

        #[test]
        fn navigation_never_leaves_bounds(n in 1usize..30, ops in proptest::collection::vec(0u8..6, 1..100)) {
            let mut r = NavigationResolver::new(tracks(n)).with_seed(n as u64);
            let mut surface = SilentSurface::new();
            for op in ops {
                match op {
                    0 => { r.advance(&mut surface); }
                    1 => { r.retreat(&mut surface); }
                    2 => { r.toggle_shuffle(); }
                    3 => { r.cycle_repeat(); }
                    4 => { r.on_track_ended(&mut surface); }
                    _ => { r.select(n / 2, &mut surface); }
                }
                if let Some(idx) = r.current_index() {
                    proptest::prop_assert!(idx < n);
                }
                if r.is_shuffle_enabled() {
                    proptest::prop_assert!(is_permutation(r.permutation(), n));
                }
            }
        }
    }
}
