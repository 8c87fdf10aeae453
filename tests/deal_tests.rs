//! Trades and auctions driven directly through their public APIs.

mod common;

use common::*;
use rust_monopoly::agents::{Answer, Decider, GameView, ScriptedDecider};
use rust_monopoly::board::Board;
use rust_monopoly::cards::{CardEffect, Deck};
use rust_monopoly::core::{
    CardConfig, CardRef, GameRng, JailConfig, PlayerId, PlayerMap, PlayerState, StateError,
};
use rust_monopoly::deals::{Auction, AuctionStatus, Trade, TradeSide};

struct Fixture {
    board: Board,
    players: PlayerMap<PlayerState>,
    decks: Vec<Deck>,
}

impl Fixture {
    fn new(holdings: &Holdings, wallets: &[i64]) -> Self {
        init_logging();
        let board = Board::from_config(&spaces(holdings), JAIL, 2).unwrap();
        let players = PlayerMap::from_vec(
            wallets
                .iter()
                .enumerate()
                .map(|(i, &w)| PlayerState::new(PlayerId::new(i as u8), NAMES[i], w, 0, 200))
                .collect(),
        );
        let chance = deck("Chance", vec![CardEffect::Money(50)])
            .with_card(CardConfig::new("Chance", "Get out of jail free", CardEffect::JailRelease).held_by(BO));
        let decks = vec![
            Deck::from_config(CHANCE, &chance, GameRng::new(1)).unwrap(),
            Deck::from_config(CHEST, &deck("Community Chest", vec![CardEffect::Money(-50)]), GameRng::new(2))
                .unwrap(),
        ];
        Self { board, players, decks }
    }

    fn view(&self, seat: PlayerId) -> GameView<'_> {
        GameView::new(&self.board, &self.players, &self.decks, JailConfig::new(JAIL, 50, 3), seat, 0)
    }

    fn confirm(&mut self, trade: &mut Trade) -> rust_monopoly::core::Result<()> {
        trade.confirm(&mut self.board, &mut self.players, &mut self.decks)
    }
}

const JAIL_CARD: CardRef = CardRef {
    deck: CHANCE,
    slot: 1,
};

// === Trades ===

/// Both sides move in one step, and a confirmed trade cannot run again.
#[test]
fn test_trade_moves_everything_once() {
    let holdings = Holdings::default().own(ANN, &[MEDITERRANEAN]).own(BO, &[BALTIC, READING]);
    let mut fx = Fixture::new(&holdings, &[1500, 1500]);

    let mut trade = Trade::new(ANN, BO).unwrap();
    {
        let view = fx.view(ANN);
        trade.add_property(TradeSide::Sender, MEDITERRANEAN, &view).unwrap();
        trade.add_money(TradeSide::Sender, 300, &view).unwrap();
        trade.add_property(TradeSide::Receiver, BALTIC, &view).unwrap();
        trade.add_card(TradeSide::Receiver, JAIL_CARD, &view).unwrap();
        trade.add_money(TradeSide::Receiver, 25, &view).unwrap();
    }
    fx.confirm(&mut trade).unwrap();

    assert!(trade.is_confirmed());
    assert_eq!(fx.board.get(MEDITERRANEAN).unwrap().owner(), Some(BO));
    assert_eq!(fx.board.get(BALTIC).unwrap().owner(), Some(ANN));
    assert_eq!(fx.board.get(READING).unwrap().owner(), Some(BO));
    assert_eq!(fx.decks[0].card(JAIL_CARD).unwrap().owner(), Some(ANN));
    assert_eq!(fx.players[ANN].wallet(), 1500 - 300 + 25);
    assert_eq!(fx.players[BO].wallet(), 1500 + 300 - 25);

    // A second confirm fails and moves nothing.
    assert_eq!(fx.confirm(&mut trade), Err(StateError::TradeConfirmed.into()));
    assert_eq!(fx.players[ANN].wallet(), 1225);
    assert_eq!(fx.board.get(BALTIC).unwrap().owner(), Some(ANN));
}

/// Items are checked against ownership, sellability and wallets as they are added.
#[test]
fn test_trade_adds_validated() {
    let holdings = Holdings::default()
        .own(ANN, &[MEDITERRANEAN, BALTIC, READING])
        .build(MEDITERRANEAN, 1)
        .mortgage(READING);
    let fx = Fixture::new(&holdings, &[100, 1500]);
    let view = fx.view(ANN);

    assert_eq!(Trade::new(ANN, ANN).unwrap_err(), StateError::SelfTrade.into());

    let mut trade = Trade::new(ANN, BO).unwrap();
    assert_eq!(
        trade.add_property(TradeSide::Sender, BOARDWALK, &view),
        Err(StateError::PropertyNotOwned(BOARDWALK).into())
    );
    assert_eq!(
        trade.add_property(TradeSide::Sender, READING, &view),
        Err(StateError::NotSellable(READING).into())
    );
    // Unbuilt, but its group carries a building.
    assert_eq!(
        trade.add_property(TradeSide::Sender, BALTIC, &view),
        Err(StateError::NotSellable(BALTIC).into())
    );
    assert_eq!(
        trade.add_money(TradeSide::Sender, 101, &view),
        Err(StateError::UnaffordableOffer { player: ANN, amount: 101 }.into())
    );
    assert_eq!(
        trade.add_card(TradeSide::Sender, JAIL_CARD, &view),
        Err(StateError::CardNotHeld(JAIL_CARD).into())
    );
    assert!(trade.offer(TradeSide::Sender).is_empty());
}

/// An item that went stale after it was offered fails the whole trade.
#[test]
fn test_stale_trade_changes_nothing() {
    let holdings = Holdings::default().own(ANN, &[READING]).own(BO, &[PENNSYLVANIA]);
    let mut fx = Fixture::new(&holdings, &[1500, 1500]);

    let mut trade = Trade::new(ANN, BO).unwrap();
    {
        let view = fx.view(ANN);
        trade.add_money(TradeSide::Sender, 100, &view).unwrap();
        trade.add_property(TradeSide::Sender, READING, &view).unwrap();
        trade.add_property(TradeSide::Receiver, PENNSYLVANIA, &view).unwrap();
    }

    // Bo mortgages the railroad before the trade closes.
    let value = fx.board.property_mut(PENNSYLVANIA).unwrap().mortgage().unwrap();
    fx.players[BO].transact(value).unwrap();

    assert_eq!(fx.confirm(&mut trade), Err(StateError::NotSellable(PENNSYLVANIA).into()));
    assert!(!trade.is_confirmed());
    assert_eq!(fx.board.get(READING).unwrap().owner(), Some(ANN));
    assert_eq!(fx.players[ANN].wallet(), 1500);
    assert_eq!(fx.players[BO].wallet(), 1600);
}

// === Auctions ===

fn bidders(scripts: Vec<Vec<Option<i64>>>) -> PlayerMap<Box<dyn Decider>> {
    PlayerMap::from_vec(
        scripts
            .into_iter()
            .map(|bids| Box::new(ScriptedDecider::new(bids.into_iter().map(Answer::Int))) as Box<dyn Decider>)
            .collect(),
    )
}

/// Bidders only ever leave, so the auction settles once one remains.
#[test]
fn test_auction_converges_within_bidder_count_rounds() {
    let mut fx = Fixture::new(&Holdings::default(), &[1500, 1500, 1500, 1500]);
    let mut deciders = bidders(vec![
        vec![Some(10), Some(50), Some(90)],
        vec![Some(20), Some(60), None],
        vec![Some(30), None],
        vec![Some(40), Some(70), Some(100)],
    ]);
    let mut auction = Auction::new(BOARDWALK, PlayerId::all(4).collect()).unwrap();

    let mut rounds = 0;
    let mut remaining = auction.bidders().len();
    let status = loop {
        rounds += 1;
        let view = fx.view(ANN);
        let status = auction.do_round(&view, &mut deciders).unwrap();
        assert!(auction.bidders().len() <= remaining);
        remaining = auction.bidders().len();
        if status != AuctionStatus::Open {
            break status;
        }
        assert!(rounds < 4, "auction did not converge");
    };

    assert_eq!(status, AuctionStatus::Won { winner: DI, bid: 100 });
    assert_eq!(auction.confirm(&mut fx.board, &mut fx.players).unwrap(), Some(DI));
    assert_eq!(fx.players[DI].wallet(), 1400);
    assert_eq!(fx.board.get(BOARDWALK).unwrap().owner(), Some(DI));

    let view = fx.view(ANN);
    assert_eq!(
        auction.do_round(&view, &mut deciders),
        Err(StateError::AuctionConfirmed.into())
    );
}

/// A bid over the wallet is refused without dropping the bidder.
#[test]
fn test_auction_bid_capped_by_wallet() {
    let fx = Fixture::new(&Holdings::default(), &[80, 1500]);
    let ann = ScriptedDecider::new([Answer::Int(Some(500)), Answer::Int(None)]);
    let transcript = ann.transcript();
    let mut deciders: PlayerMap<Box<dyn Decider>> =
        PlayerMap::from_vec(vec![
            Box::new(ann) as Box<dyn Decider>,
            Box::new(ScriptedDecider::new([Answer::Int(Some(5))])),
        ]);
    let mut auction = Auction::new(READING, vec![ANN, BO]).unwrap();

    let view = fx.view(ANN);
    assert_eq!(auction.do_round(&view, &mut deciders).unwrap(), AuctionStatus::Open);
    assert_eq!(transcript.cannot_afford(), vec![500]);
    assert_eq!(auction.bidders(), &[ANN, BO]);

    assert_eq!(
        auction.do_round(&view, &mut deciders).unwrap(),
        AuctionStatus::Won { winner: BO, bid: 5 }
    );
}
