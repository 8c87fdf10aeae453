//! Read-only game snapshot handed to deciders.

use crate::board::{Board, Property};
use crate::cards::{Card, Deck};
use crate::core::{CardRef, JailConfig, PlayerId, PlayerMap, PlayerState};

/// A borrowed, read-only view of the game from one seat's perspective.
///
/// `GameView` is `Copy`: re-seat it with `for_seat` when asking another
/// player (auction bidders, trade receivers).
#[derive(Clone, Copy, Debug)]
pub struct GameView<'a> {
    pub board: &'a Board,
    pub players: &'a PlayerMap<PlayerState>,
    pub decks: &'a [Deck],
    pub jail: JailConfig,
    /// The player being asked.
    pub seat: PlayerId,
    pub turn: u32,
}

impl<'a> GameView<'a> {
    #[must_use]
    pub fn new(
        board: &'a Board,
        players: &'a PlayerMap<PlayerState>,
        decks: &'a [Deck],
        jail: JailConfig,
        seat: PlayerId,
        turn: u32,
    ) -> Self {
        Self {
            board,
            players,
            decks,
            jail,
            seat,
            turn,
        }
    }

    /// The same view, asked of another player.
    #[must_use]
    pub fn for_seat(self, seat: PlayerId) -> Self {
        Self { seat, ..self }
    }

    /// State of the seat being asked.
    #[must_use]
    pub fn me(&self) -> Option<&'a PlayerState> {
        self.players.get(self.seat)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&'a PlayerState> {
        self.players.get(id)
    }

    /// Cash of a player, zero for unknown seats.
    #[must_use]
    pub fn wallet(&self, id: PlayerId) -> i64 {
        self.players.get(id).map_or(0, PlayerState::wallet)
    }

    #[must_use]
    pub fn property(&self, id: crate::core::PropertyId) -> Option<&'a Property> {
        self.board.get(id)
    }

    #[must_use]
    pub fn card(&self, card: CardRef) -> Option<&'a Card> {
        self.decks.get(card.deck.index())?.card(card).ok()
    }

    /// Jail-release cards held by a player, across all decks.
    #[must_use]
    pub fn jail_cards(&self, player: PlayerId) -> Vec<CardRef> {
        self.decks.iter().flat_map(|d| d.held_by(player)).collect()
    }

    /// Players still in the game other than the seat being asked.
    #[must_use]
    pub fn opponents(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(id, p)| *id != self.seat && p.is_active())
            .map(|(id, _)| id)
            .collect()
    }
}
