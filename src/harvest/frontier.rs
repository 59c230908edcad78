//! Crawl frontier
//!
//! Players are explored in FIFO order. A player is queued at most once per
//! run: re-adding a player that is pending or was already popped is a no-op.
//! Matches are tracked in an append-only seen set.

use crate::model::{MatchId, PlayerId};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Frontier {
    /// Players waiting to be explored, oldest first
    pending: VecDeque<PlayerId>,

    /// Every player ever queued, popped ones included
    known_players: HashSet<PlayerId>,

    /// Matches already processed
    seen_matches: HashSet<MatchId>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier seeded with one player
    pub fn with_seed(puuid: &str) -> Self {
        let mut frontier = Self::new();
        frontier.push_player(puuid);
        frontier
    }

    /// Queues a player unless it was queued before; returns true if added
    pub fn push_player(&mut self, puuid: &str) -> bool {
        if puuid.is_empty() || self.known_players.contains(puuid) {
            return false;
        }
        self.known_players.insert(puuid.to_string());
        self.pending.push_back(puuid.to_string());
        true
    }

    /// Removes and returns the oldest pending player
    pub fn pop_player(&mut self) -> Option<PlayerId> {
        self.pending.pop_front()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn known_players(&self) -> usize {
        self.known_players.len()
    }

    pub fn is_match_seen(&self, match_id: &str) -> bool {
        self.seen_matches.contains(match_id)
    }

    /// Records a match as processed; returns false if it already was
    pub fn mark_match_seen(&mut self, match_id: &str) -> bool {
        self.seen_matches.insert(match_id.to_string())
    }

    pub fn seen_matches(&self) -> &HashSet<MatchId> {
        &self.seen_matches
    }
}
