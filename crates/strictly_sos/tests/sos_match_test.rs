//! Tests for match lifecycle, scoring and turn ownership.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_sos::{
    Coord, Letter, MatchResult, MatchState, Mode, Move, MoveError, PlayerId, scan,
};

fn coords(state: &MatchState) -> Vec<Coord> {
    state.grid().coords().collect()
}

#[test]
fn test_row_completed_over_three_turns() {
    let mut state = MatchState::new(7, Mode::HumanVsHuman);

    let first = state.place_at(0, 0, Letter::S, PlayerId::One).unwrap();
    state.advance_turn(first.scored());
    let reply = state.place_at(6, 6, Letter::O, PlayerId::Two).unwrap();
    state.advance_turn(reply.scored());

    let second = state.place_at(0, 1, Letter::O, PlayerId::One).unwrap();
    state.advance_turn(second.scored());
    let reply = state.place_at(6, 4, Letter::O, PlayerId::Two).unwrap();
    state.advance_turn(reply.scored());

    assert_eq!(state.current_player(), PlayerId::One);
    let third = state.place_at(0, 2, Letter::S, PlayerId::One).unwrap();
    state.advance_turn(third.scored());

    assert!(third.scored());
    assert_eq!(third.sequences().len(), 1);
    assert_eq!(
        third.sequences()[0].coords(),
        &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]
    );
    assert_eq!(state.scores().get(PlayerId::One), 1);
    assert_eq!(state.current_player(), PlayerId::One);
}

#[test]
fn test_o_between_two_s() {
    let mut state = MatchState::new(7, Mode::HumanVsHuman);
    state.place_at(3, 2, Letter::S, PlayerId::One).unwrap();
    state.place_at(3, 4, Letter::S, PlayerId::Two).unwrap();

    let placement = state.place_at(3, 3, Letter::O, PlayerId::One).unwrap();
    assert_eq!(placement.points(), 1);
    assert_eq!(
        placement.sequences()[0].coords(),
        &[Coord::new(3, 2), Coord::new(3, 3), Coord::new(3, 4)]
    );
}

#[test]
fn test_cross_scores_twice() {
    let mut state = MatchState::new(7, Mode::HumanVsHuman);
    for (r, c) in [(3, 2), (3, 4), (2, 3), (4, 3)] {
        state.place_at(r, c, Letter::S, PlayerId::Two).unwrap();
    }

    let placement = state.place_at(3, 3, Letter::O, PlayerId::One).unwrap();
    assert_eq!(placement.sequences().len(), 2);
    assert_eq!(state.scores().get(PlayerId::One), 2);
    assert_eq!(state.scores().get(PlayerId::Two), 0);
}

#[test]
fn test_full_board_draw_after_scoring_final_move() {
    // Final grid:
    //   S O S
    //   S S S
    //   S O S
    let mut state = MatchState::new(3, Mode::HumanVsHuman);
    state.place_at(2, 0, Letter::S, PlayerId::Two).unwrap();
    state.place_at(2, 1, Letter::O, PlayerId::Two).unwrap();
    let p2 = state.place_at(2, 2, Letter::S, PlayerId::Two).unwrap();
    assert_eq!(p2.points(), 1);

    for (r, c) in [(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)] {
        let p = state.place_at(r, c, Letter::S, PlayerId::One).unwrap();
        assert!(!p.scored(), "unexpected score at ({r}, {c})");
    }
    assert!(!state.is_over());
    assert_eq!(state.match_result(), None);

    let last = state.place_at(0, 1, Letter::O, PlayerId::One).unwrap();
    assert!(last.scored());
    assert_eq!(state.remaining_cells(), 0);
    assert!(state.is_over());
    assert_eq!(state.match_result(), Some(MatchResult::Draw));
}

#[test]
fn test_full_board_winner() {
    let mut state = MatchState::new(3, Mode::HumanVsAi);
    let fill = [
        (0, 0, Letter::S),
        (0, 2, Letter::S),
        (1, 0, Letter::S),
        (1, 1, Letter::S),
        (1, 2, Letter::S),
        (2, 0, Letter::S),
        (2, 1, Letter::S),
        (2, 2, Letter::S),
    ];
    for (r, c, letter) in fill {
        state.place_at(r, c, letter, PlayerId::One).unwrap();
    }
    state.place_at(0, 1, Letter::O, PlayerId::Two).unwrap();

    assert!(state.is_over());
    assert_eq!(state.scores().get(PlayerId::Two), 1);
    assert_eq!(state.match_result(), Some(MatchResult::Winner(PlayerId::Two)));
}

#[test]
fn test_no_placement_after_match_over() {
    let mut state = MatchState::new(3, Mode::HumanVsHuman);
    for coord in coords(&state) {
        state.place(coord, Letter::O, PlayerId::One).unwrap();
    }
    assert!(state.is_over());

    let before = state.clone();
    assert_eq!(
        state.place_at(0, 0, Letter::S, PlayerId::Two),
        Err(MoveError::MatchOver)
    );
    assert_eq!(
        state.submit_move(PlayerId::One, Move::at(1, 1, Letter::S)),
        Err(MoveError::MatchOver)
    );
    state.advance_turn(false);
    assert_eq!(state, before);
}

#[test]
fn test_is_valid_placement() {
    let mut state = MatchState::new(4, Mode::HumanVsHuman);
    assert!(state.is_valid_placement(3, 3));
    assert!(!state.is_valid_placement(4, 0));
    state.place_at(3, 3, Letter::S, PlayerId::One).unwrap();
    assert!(!state.is_valid_placement(3, 3));
}

#[test]
fn test_occupied_click_keeps_turn() {
    let mut state = MatchState::new(5, Mode::HumanVsHuman);
    state
        .submit_move(PlayerId::One, Move::at(2, 2, Letter::S))
        .unwrap();
    assert_eq!(state.current_player(), PlayerId::Two);

    let before = state.clone();
    assert_eq!(
        state.submit_move(PlayerId::Two, Move::at(2, 2, Letter::O)),
        Err(MoveError::CellOccupied(Coord::new(2, 2)))
    );
    assert_eq!(state, before);
}

#[test]
fn test_random_play_bookkeeping() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..20 {
        let size = rng.gen_range(3..=7);
        let mut state = MatchState::new(size, Mode::HumanVsHuman);

        while !state.is_over() {
            let player = if rng.gen_bool(0.2) {
                state.current_player().opponent()
            } else {
                state.current_player()
            };
            // Include off-board coordinates to exercise rejection.
            let mv = Move::at(
                rng.gen_range(0..=size),
                rng.gen_range(0..=size),
                if rng.gen_bool(0.5) { Letter::S } else { Letter::O },
            );

            let before = state.clone();
            match state.submit_move(player, mv) {
                Ok(placement) => {
                    assert_eq!(state.remaining_cells(), before.remaining_cells() - 1);
                    assert_eq!(
                        state.scores().get(player),
                        before.scores().get(player) + placement.points()
                    );
                    if placement.scored() || state.is_over() {
                        assert_eq!(state.current_player(), before.current_player());
                    } else {
                        assert_eq!(state.current_player(), before.current_player().opponent());
                    }
                }
                Err(_) => assert_eq!(state, before),
            }
            assert!(state.verify().is_ok());
        }

        assert_eq!(state.remaining_cells(), 0);
        assert!(state.match_result().is_some());
    }
}

#[test]
fn test_scan_only_reports_real_sequences() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..30 {
        let size = rng.gen_range(3..=8);
        let mut state = MatchState::new(size, Mode::HumanVsHuman);
        for coord in coords(&state) {
            if rng.gen_bool(0.8) {
                let letter = if rng.gen_bool(0.5) { Letter::S } else { Letter::O };
                state.place(coord, letter, PlayerId::One).unwrap();
            }
        }

        let grid = state.grid();
        for coord in grid.coords() {
            for sequence in scan(grid, coord) {
                let [a, b, c] = *sequence.coords();
                assert!(sequence.contains(coord));
                for cell in [a, b, c] {
                    assert!(grid.in_bounds(cell));
                }
                let step = (
                    b.row as isize - a.row as isize,
                    b.col as isize - a.col as isize,
                );
                assert!(step.0.abs() <= 1 && step.1.abs() <= 1 && step != (0, 0));
                assert_eq!(c.row as isize - b.row as isize, step.0);
                assert_eq!(c.col as isize - b.col as isize, step.1);
                assert!(grid.get(a).is_some_and(|cell| cell.holds(Letter::S)));
                assert!(grid.get(b).is_some_and(|cell| cell.holds(Letter::O)));
                assert!(grid.get(c).is_some_and(|cell| cell.holds(Letter::S)));
            }
        }
    }
}

#[test]
fn test_state_serializes() {
    let mut state = MatchState::new(3, Mode::HumanVsAi);
    state.place_at(1, 1, Letter::O, PlayerId::One).unwrap();
    let json = serde_json::to_string(&state).unwrap();
    let back: MatchState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}
