//! Players: identity, per-player storage and the financial/positional state
//! every player variant shares.
//!
//! ## PlayerId
//!
//! Seat index, 0-based, in turn order.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec`, indexed by `PlayerId`.
//!
//! ## PlayerState
//!
//! Wallet, board position, jail counter and display data. How a player makes
//! decisions is not stored here; see `agents::Decider`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{Result, StateError};

/// Seat identifier supporting 1-255 players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats of a `player_count` game, in turn order.
    ///
    /// ```
    /// use rust_monopoly::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat after this one, wrapping to the first after the last.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use rust_monopoly::core::{PlayerId, PlayerMap};
///
/// let mut wallets: PlayerMap<i64> = PlayerMap::new(4, |_| 1500);
/// wallets[PlayerId::new(2)] -= 200;
/// assert_eq!(wallets[PlayerId::new(2)], 1300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    ///
    /// Callers validate the player count first; `Game::new` reports a bad
    /// count as a `ValidationError`.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        debug_assert!(player_count <= 255, "At most 255 players supported");
        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Wrap per-seat values already in turn order.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        debug_assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a seat's entry, or `None` for an out-of-range id.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Mutable variant of `get`.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all seat ids.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.data.len())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Which kind of decider backs a seat. Informational only; the engine talks to
/// every seat through the same `Decider` contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Answers come from an external UI.
    #[default]
    Human,
    /// Answers come from the built-in heuristic.
    Computer,
}

/// Mutable state of one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    /// Display color, opaque to the engine.
    pub color: String,
    wallet: i64,
    /// Board index the player stands on.
    pub position: usize,
    /// Paid each time the player passes go.
    pub salary: i64,
    /// Remaining jail turns; zero means free.
    pub jail_turns: u32,
    /// Set once the player has been declared bankrupt.
    pub bankrupt: bool,
}

impl PlayerState {
    /// Create a free, solvent player standing on `position`.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, wallet: i64, position: usize, salary: i64) -> Self {
        Self {
            id,
            name: name.into(),
            kind: PlayerKind::default(),
            color: String::new(),
            wallet,
            position,
            salary,
            jail_turns: 0,
            bankrupt: false,
        }
    }

    /// Current cash. Negative only after `force_debit`.
    #[must_use]
    pub fn wallet(&self) -> i64 {
        self.wallet
    }

    /// Can the player pay `amount` without going below zero?
    #[must_use]
    pub fn can_afford(&self, amount: i64) -> bool {
        self.wallet >= amount
    }

    /// Apply a cash delta. Never takes the wallet below zero; callers check
    /// affordability first and route shortfalls through debt settlement.
    pub fn transact(&mut self, delta: i64) -> Result<()> {
        let next = self.wallet + delta;
        if next < 0 {
            return Err(StateError::Overdraft {
                player: self.id,
                amount: -delta,
            }
            .into());
        }
        self.wallet = next;
        Ok(())
    }

    /// Debit without an affordability check. The bankruptcy path is the only
    /// caller; the wallet may end up negative.
    pub fn force_debit(&mut self, amount: i64) {
        self.wallet -= amount;
    }

    /// Is the player serving a jail sentence?
    #[must_use]
    pub fn in_jail(&self) -> bool {
        self.jail_turns > 0
    }

    /// Still taking turns?
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.bankrupt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        assert_eq!(p0.index(), 0);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
        assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i64> = PlayerMap::new(3, |p| p.index() as i64 * 10);
        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(2)], 20);
        assert_eq!(map.player_count(), 3);
        assert!(map.get(PlayerId::new(3)).is_none());
    }

    #[test]
    fn test_player_map_iter() {
        let map = PlayerMap::from_vec(vec!["a", "b"]);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), &"a"), (PlayerId::new(1), &"b")]);
    }

    #[test]
    fn test_transact_rejects_overdraft() {
        let mut player = PlayerState::new(PlayerId::new(0), "Ann", 100, 0, 200);
        player.transact(-60).unwrap();
        assert_eq!(player.wallet(), 40);

        let err = player.transact(-41).unwrap_err();
        assert_eq!(
            err,
            StateError::Overdraft { player: PlayerId::new(0), amount: 41 }.into()
        );
        assert_eq!(player.wallet(), 40);
    }

    #[test]
    fn test_force_debit_goes_negative() {
        let mut player = PlayerState::new(PlayerId::new(1), "Bo", 10, 0, 200);
        player.force_debit(25);
        assert_eq!(player.wallet(), -15);
        assert!(!player.can_afford(0));
    }

    #[test]
    fn test_jail_flag() {
        let mut player = PlayerState::new(PlayerId::new(0), "Ann", 0, 10, 200);
        assert!(!player.in_jail());
        player.jail_turns = 3;
        assert!(player.in_jail());
    }

    #[test]
    fn test_player_state_serialization() {
        let player = PlayerState::new(PlayerId::new(1), "Bo", 1500, 0, 200);
        let json = serde_json::to_string(&player).unwrap();
        let deserialized: PlayerState = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
