//! End-to-end rule scenarios played through `Game`.
//!
//! Each test sets up the fixture board, scripts the dice and answers, plays
//! one roll (or a few) and checks wallets, positions and ownership.

mod common;

use common::*;
use rust_monopoly::agents::{Answer, TradeScript};
use rust_monopoly::cards::CardEffect;
use rust_monopoly::core::{CardConfig, CardRef, DeckConfig, GameEvent, StateError};
use rust_monopoly::game::GameResult;

/// Put Ann on `from` before the first roll.
fn start_at(config: &mut rust_monopoly::core::GameConfig, from: usize) {
    config.players[0].position = from;
}

// === Rent ===

/// Group-scaled rent follows the number of group members the owner holds.
#[test]
fn test_group_scaled_rent() {
    for (holdings, rent) in [
        (Holdings::default().own(BO, &[READING]), 25),
        (Holdings::default().own(BO, &[READING, PENNSYLVANIA]), 50),
    ] {
        let mut table = passive_table(config(2, &holdings));
        table.game.push_roll(roll(2, 3));
        table.game.play_roll().unwrap();

        assert_eq!(position(&table.game, ANN), 5);
        assert_eq!(wallet(&table.game, ANN), 1500 - rent);
        assert_eq!(wallet(&table.game, BO), 1500 + rent);
    }
}

/// House-scaled rent: schedule[0] without the monopoly, schedule[1 + n] with
/// it and n buildings.
#[test]
fn test_house_scaled_rent() {
    let cases = [
        (Holdings::default().own(BO, &[MEDITERRANEAN]), 2),
        (Holdings::default().own(BO, &[MEDITERRANEAN, BALTIC]), 10),
        (Holdings::default().own(BO, &[MEDITERRANEAN, BALTIC]).build(MEDITERRANEAN, 5), 450),
    ];
    for (holdings, rent) in cases {
        let table = passive_table(config(2, &holdings));
        assert_eq!(table.game.board().get(MEDITERRANEAN).unwrap().rent(), rent);
    }

    // Landing on the hotel after passing go.
    let holdings = Holdings::default().own(BO, &[MEDITERRANEAN, BALTIC]).build(MEDITERRANEAN, 5);
    let mut config = config(2, &holdings);
    start_at(&mut config, 15);
    let mut table = passive_table(config);
    table.game.push_roll(roll(1, 1));
    let outcome = table.game.play_roll().unwrap();

    assert!(outcome.again);
    assert_eq!(position(&table.game, ANN), 1);
    assert_eq!(wallet(&table.game, ANN), 1500 + 200 - 450);
    assert_eq!(wallet(&table.game, BO), 1500 + 450);
}

/// Utility rent multiplies a fresh roll.
#[test]
fn test_dice_multiplier_rent() {
    let holdings = Holdings::default().own(BO, &[ELECTRIC]);
    let mut table = passive_table(config(2, &holdings));
    table.game.push_roll(roll(3, 5));
    table.game.push_roll(roll(2, 4));
    table.game.play_roll().unwrap();

    assert_eq!(position(&table.game, ANN), 8);
    assert_eq!(wallet(&table.game, ANN), 1500 - 4 * 6);
    assert_eq!(wallet(&table.game, BO), 1500 + 4 * 6);
}

/// No rent is charged on a mortgaged property.
#[test]
fn test_mortgaged_property_charges_nothing() {
    let holdings = Holdings::default().own(BO, &[READING]).mortgage(READING);
    let mut table = passive_table(config(2, &holdings));
    table.game.push_roll(roll(2, 3));
    table.game.play_roll().unwrap();
    assert_eq!(wallet(&table.game, ANN), 1500);
}

// === Spaces and cards ===

/// A -50 per-player card among four players: the drawer collects 150.
#[test]
fn test_per_player_card() {
    let mut config = config(4, &Holdings::default());
    config.decks[0] = deck("Chance", vec![CardEffect::MoneyPerPlayer(-50)]);
    let mut table = passive_table(config);
    table.game.push_roll(roll(2, 4));
    table.game.play_roll().unwrap();

    assert_eq!(position(&table.game, ANN), CHANCE_SPACE);
    assert_eq!(wallet(&table.game, ANN), 1650);
    for seat in [BO, CY, DI] {
        assert_eq!(wallet(&table.game, seat), 1450);
    }
}

/// Income tax is paid to the bank.
#[test]
fn test_money_space() {
    let mut table = passive_table(config(2, &Holdings::default()));
    table.game.push_roll(roll(1, 3));
    table.game.play_roll().unwrap();
    assert_eq!(position(&table.game, ANN), INCOME_TAX);
    assert_eq!(wallet(&table.game, ANN), 1300);
}

/// Movement spaces cascade: Back Three from 13 lands on Free Parking.
#[test]
fn test_movement_space_cascades() {
    let mut config = config(2, &Holdings::default());
    start_at(&mut config, 10);
    let mut table = passive_table(config);
    table.game.push_roll(roll(1, 2));
    table.game.play_roll().unwrap();
    assert_eq!(position(&table.game, ANN), 10);
    assert_eq!(wallet(&table.game, ANN), 1500);
}

/// Street repairs charge per house and per hotel.
#[test]
fn test_building_toll() {
    let holdings = Holdings::default()
        .own(ANN, &[MEDITERRANEAN, BALTIC])
        .build(MEDITERRANEAN, 2)
        .build(BALTIC, 5);
    let mut config = config(2, &holdings);
    start_at(&mut config, CHANCE_SPACE);
    let mut table = passive_table(config);
    table.game.push_roll(roll(2, 3));
    table.game.play_roll().unwrap();

    assert_eq!(position(&table.game, ANN), REPAIRS);
    assert_eq!(wallet(&table.game, ANN), 1500 - 2 * 25 - 100);
}

/// Go To Jail ends the turn even on doubles.
#[test]
fn test_go_to_jail_cancels_doubles() {
    let mut config = config(2, &Holdings::default());
    start_at(&mut config, 10);
    let mut table = passive_table(config);
    table.game.push_roll(roll(2, 2));
    let outcome = table.game.play_roll().unwrap();

    assert!(!outcome.again);
    let ann = table.game.player(ANN).unwrap();
    assert_eq!(ann.position, JAIL);
    assert_eq!(ann.jail_turns, 3);
    assert_eq!(ann.wallet(), 1500);
    assert_eq!(table.game.current_player(), BO);
}

/// A drawn jail card stays with the drawer and leaves the draw pool.
#[test]
fn test_jail_card_kept() {
    let mut config = config(2, &Holdings::default());
    config.decks[0] = deck("Chance", vec![CardEffect::JailRelease]);
    let mut table = passive_table(config);
    table.game.push_roll(roll(2, 4));
    table.game.play_roll().unwrap();

    let card = CardRef::new(CHANCE, 0);
    assert_eq!(table.game.jail_cards(ANN), vec![card]);
    assert!(table.game.deck(CHANCE).unwrap().is_locked());
    assert!(table
        .game
        .history()
        .iter()
        .any(|r| r.event == GameEvent::CardKept { card }));
}

/// With every card of a deck held, landing on its space draws nothing.
#[test]
fn test_locked_deck_draws_nothing() {
    let mut config = config(2, &Holdings::default());
    config.decks[0] = DeckConfig::new("Chance")
        .with_card(CardConfig::new("Chance", "Get out of jail free", CardEffect::JailRelease).held_by(BO));
    let mut table = passive_table(config);
    table.game.push_roll(roll(2, 4));
    table.game.play_roll().unwrap();

    assert_eq!(position(&table.game, ANN), CHANCE_SPACE);
    assert_eq!(wallet(&table.game, ANN), 1500);
    assert!(table.game.jail_cards(ANN).is_empty());
    assert_eq!(table.game.jail_cards(BO), vec![CardRef::new(CHANCE, 0)]);
    assert!(!table
        .game
        .history()
        .iter()
        .any(|r| matches!(r.event, GameEvent::CardDrawn { .. })));
}

// === Jail ===

/// Doubles in jail release the player, who moves by the roll.
#[test]
fn test_jail_doubles_release() {
    let mut config = config(2, &Holdings::default());
    config.players[0] = config.players[0].clone().at(JAIL).jailed(2);
    let mut table = passive_table(config);
    table.game.push_roll(roll(2, 2));
    let outcome = table.game.play_roll().unwrap();

    assert!(!outcome.again);
    let ann = table.game.player(ANN).unwrap();
    assert!(!ann.in_jail());
    assert_eq!(ann.position, REPAIRS);
    assert_eq!(table.game.current_player(), BO);
}

/// A held card is spent on request and returns to its deck.
#[test]
fn test_jail_card_used() {
    let mut config = config(2, &Holdings::default());
    config.players[0] = config.players[0].clone().at(JAIL).jailed(3);
    config.decks[0] = config.decks[0]
        .clone()
        .with_card(CardConfig::new("Chance", "Get out of jail free", CardEffect::JailRelease).held_by(ANN));
    let mut table = table(config, vec![vec![Answer::YesNo(true)], vec![]], 7);
    table.game.push_roll(roll(1, 2));
    table.game.play_roll().unwrap();

    let ann = table.game.player(ANN).unwrap();
    assert!(!ann.in_jail());
    assert_eq!(ann.position, 10);
    assert_eq!(ann.wallet(), 1500);
    assert!(table.game.jail_cards(ANN).is_empty());
    assert!(table.transcripts[0].asked("Use your get-out-of-jail card?"));
}

/// A jailed player with no card may buy one from a holder and spend it.
#[test]
fn test_jail_card_bought_and_spent() {
    let mut config = config(2, &Holdings::default());
    config.players[0] = config.players[0].clone().at(JAIL).jailed(3);
    config.decks[1] = config.decks[1]
        .clone()
        .with_card(CardConfig::new("Community Chest", "Get out of jail free", CardEffect::JailRelease).held_by(BO));
    let card = CardRef::new(CHEST, 1);
    let offer = TradeScript::with(BO).give_money(40).take_card(card);
    let mut table = table(config, vec![vec![Answer::Trade(Some(offer))], vec![Answer::YesNo(true)]], 7);
    table.game.push_roll(roll(1, 2));
    table.game.play_roll().unwrap();

    let ann = table.game.player(ANN).unwrap();
    assert!(!ann.in_jail());
    assert_eq!(ann.position, 10);
    assert_eq!(ann.wallet(), 1460);
    assert_eq!(wallet(&table.game, BO), 1540);
    assert!(table.game.jail_cards(ANN).is_empty());
    assert!(table.game.jail_cards(BO).is_empty());
}

// === Offers and trades ===

/// Mortgaging then lifting the mortgage costs exactly the interest.
#[test]
fn test_mortgage_round_trip() {
    let holdings = Holdings::default().own(ANN, &[READING]);
    let answers = vec![Answer::Choice(Some(0)), Answer::Choice(Some(0))];
    let mut table = table(config(2, &holdings), vec![answers, vec![]], 7);
    table.game.push_roll(roll(4, 6));
    table.game.play_roll().unwrap();

    let reading = table.game.board().get(READING).unwrap();
    assert!(!reading.is_mortgaged());
    assert_eq!(wallet(&table.game, ANN), 1500 - reading.mortgage_interest());
    assert_eq!(reading.mortgage_interest(), 10);
}

/// A trade in the trading window moves everything listed exactly once.
#[test]
fn test_trade_in_window() {
    let holdings = Holdings::default().own(ANN, &[MEDITERRANEAN]).own(BO, &[BALTIC, READING]);
    let offer = TradeScript::with(BO)
        .give_property(MEDITERRANEAN)
        .give_money(100)
        .take_property(BALTIC)
        .take_property(READING);
    let mut table = table(config(2, &holdings), vec![vec![Answer::Trade(Some(offer))], vec![Answer::YesNo(true)]], 7);
    table.game.push_roll(roll(4, 6));
    table.game.play_roll().unwrap();

    let board = table.game.board();
    assert_eq!(board.get(MEDITERRANEAN).unwrap().owner(), Some(BO));
    assert_eq!(board.get(BALTIC).unwrap().owner(), Some(ANN));
    assert_eq!(board.get(READING).unwrap().owner(), Some(ANN));
    assert_eq!(wallet(&table.game, ANN), 1400);
    assert_eq!(wallet(&table.game, BO), 1600);
    assert_eq!(board.get(READING).unwrap().rent(), 25);
}

// === Bankruptcy ===

/// Rent the payer cannot cover bankrupts them to the owner and ends a
/// two-player game.
#[test]
fn test_bankruptcy_ends_game() {
    let holdings = Holdings::default().own(BO, &[BOARDWALK]).build(BOARDWALK, 5);
    let mut config = config(2, &holdings);
    start_at(&mut config, 10);
    let mut table = passive_table(config);
    table.game.push_roll(roll(2, 3));
    table.game.play_roll().unwrap();

    assert!(!table.game.player(ANN).unwrap().is_active());
    assert_eq!(wallet(&table.game, ANN), 1500 - 2200);
    assert_eq!(wallet(&table.game, BO), 3000);
    assert_eq!(table.game.result(), Some(GameResult::Winner(BO)));
    assert_eq!(table.transcripts[0].cannot_afford(), vec![2200]);
    assert_eq!(table.game.play_roll(), Err(StateError::GameOver.into()));
    assert_eq!(table.game.run(50), Ok(GameResult::Winner(BO)));
}

/// Bankrupt seats are skipped by turn advance.
#[test]
fn test_bankrupt_seat_skipped() {
    let holdings = Holdings::default().own(CY, &[BOARDWALK]).build(BOARDWALK, 5);
    let mut config = config(3, &holdings);
    config.players[1].position = 10;
    let mut table = passive_table(config);
    table.game.push_roll(roll(4, 6));
    table.game.push_roll(roll(2, 3));
    table.game.push_roll(roll(1, 2));
    table.game.push_roll(roll(1, 3));

    table.game.play_roll().unwrap();
    table.game.play_roll().unwrap();
    assert!(!table.game.player(BO).unwrap().is_active());
    assert_eq!(table.game.current_player(), CY);

    table.game.play_roll().unwrap();
    assert_eq!(table.game.current_player(), ANN);
    assert!(table.game.result().is_none());
}
