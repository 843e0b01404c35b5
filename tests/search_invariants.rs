use std::collections::HashSet;

use dama::error::SearchError;
use dama::eval::Heuristic;
use dama::search::{Search, SearchParams};
use dama::{BoardState, Rules, Side};

fn no_forced() -> Rules {
    Rules {
        forced_captures: false,
    }
}

#[test]
fn single_successor_is_returned_unevaluated() {
    let state = BoardState::from_squares(Side::Dark, &[9], &[90], &[], Rules::default()).unwrap();
    let mut search = Search::new(SearchParams::new().depth(6).seed(Some(1)));
    let chosen = search.make_move(&state, Side::Dark).unwrap();
    assert_eq!(chosen.from_square(), Some(9));
    assert_eq!(chosen.to_square(), Some(18));
    assert_eq!(search.stats().evaluations, 0);
    assert_eq!(search.stats().nodes, 0);
}

#[test]
fn search_refuses_wrong_side() {
    let state = BoardState::initial_layout(Side::Light, Rules::default());
    let mut search = Search::new(SearchParams::new().depth(1).seed(Some(1)));
    assert_eq!(
        search.make_move(&state, Side::Dark),
        Err(SearchError::NotYourTurn {
            side: Side::Dark,
            turn: Side::Light
        })
    );
}

#[test]
fn search_without_moves_fails() {
    // the only dark man is boxed in on the edge, 18 is covered by 27
    let state = BoardState::from_squares(Side::Dark, &[9], &[18, 27], &[], Rules::default()).unwrap();
    let mut search = Search::new(SearchParams::new().depth(3).seed(Some(1)));
    assert_eq!(search.make_move(&state, Side::Dark), Err(SearchError::NoMoves));
}

#[test]
fn search_returns_a_legal_successor() {
    let state = BoardState::initial_layout(Side::Light, Rules::default());
    let legal = state.successors(Side::Light);
    for heuristic in [Heuristic::Difference, Heuristic::Ratio] {
        let params = SearchParams::new().depth(4).heuristic(heuristic).seed(Some(11));
        let mut search = Search::new(params);
        let chosen = search.make_move(&state, Side::Light).unwrap();
        assert!(legal.contains(&chosen));
        assert_eq!(search.stats().root_moves, 9);
        assert!(search.stats().evaluations > 0);
    }
}

#[test]
fn search_prefers_material_gain() {
    let state = BoardState::from_squares(Side::Dark, &[32], &[43, 96, 98], &[], no_forced()).unwrap();
    assert_eq!(state.successors(Side::Dark).len(), 2);
    for seed in 0..10 {
        let mut search = Search::new(SearchParams::new().depth(2).seed(Some(seed)));
        let chosen = search.make_move(&state, Side::Dark).unwrap();
        assert_eq!(chosen.to_square(), Some(54), "seed {}", seed);
        assert_eq!(search.stats().tied_moves, 1);
    }
}

#[test]
fn search_takes_the_win() {
    let state = BoardState::from_squares(Side::Dark, &[32], &[43], &[], no_forced()).unwrap();
    let mut search = Search::new(SearchParams::new().depth(3).seed(Some(5)));
    let chosen = search.make_move(&state, Side::Dark).unwrap();
    assert_eq!(chosen.winner(), Some(Side::Dark));
}

#[test]
fn search_blocks_the_opponent() {
    // 70-81 leaves the light man on 90 without a move
    let state = BoardState::from_squares(Side::Dark, &[70, 72], &[90], &[], Rules::default()).unwrap();
    assert_eq!(state.successors(Side::Dark).len(), 3);
    for seed in 0..50 {
        let mut search = Search::new(SearchParams::new().depth(1).seed(Some(seed)));
        let chosen = search.make_move(&state, Side::Dark).unwrap();
        assert_eq!((chosen.from_square(), chosen.to_square()), (Some(70), Some(81)), "seed {}", seed);
        assert!(chosen.successors(Side::Light).is_empty());
    }
}

#[test]
fn search_finishes_capture_chain() {
    let state = BoardState::from_squares(Side::Dark, &[32, 36], &[43, 65, 47], &[], Rules::default()).unwrap();
    let chained = state
        .successors(Side::Dark)
        .into_iter()
        .find(|s| s.continuation() == Some(54))
        .unwrap();
    let mut search = Search::new(SearchParams::new().depth(4).seed(Some(2)));
    let chosen = search.make_move(&chained, Side::Dark).unwrap();
    assert_eq!(chosen.from_square(), Some(54));
    assert_eq!(chosen.to_square(), Some(76));
}

#[test]
fn tie_break_reaches_every_equal_move() {
    let state = BoardState::initial_layout(Side::Dark, Rules::default());
    let mut seen = HashSet::new();
    for seed in 0..300 {
        let mut search = Search::new(SearchParams::new().depth(1).seed(Some(seed)));
        let chosen = search.make_move(&state, Side::Dark).unwrap();
        assert_eq!(search.stats().tied_moves, 9);
        seen.insert((chosen.from_square(), chosen.to_square()));
    }
    assert_eq!(seen.len(), 9, "every opening move should be picked eventually");
}

#[test]
fn seeded_search_is_reproducible() {
    let state = BoardState::initial_layout(Side::Light, Rules::default());
    let params = SearchParams::new().depth(3).seed(Some(99));
    let mut a = Search::new(params.clone());
    let mut b = Search::new(params);
    for _ in 0..5 {
        assert_eq!(
            a.make_move(&state, Side::Light).unwrap(),
            b.make_move(&state, Side::Light).unwrap()
        );
    }
}
