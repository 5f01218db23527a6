use circuit_grid::catalog;
use circuit_grid::{Board, Coord, DelayRule, Edge, PortSet, StoreTrigger};

const DELAY: Coord = Coord::new(1, 0);
const SINK: Coord = Coord::new(2, 0);

fn delay_board(length: i64) -> Board {
    let mut board = Board::new();
    catalog::place(&mut board, "L_R_DELAY", DELAY, Some(length)).unwrap();
    catalog::place(&mut board, "L_R_WIRE", SINK, None).unwrap();
    board
}

/// For each tick, whether the delay cell drove its right edge (seen as the sink's left input).
fn right_pulses(board: &mut Board, ticks: usize, held: bool) -> Vec<bool> {
    let mut out = Vec::new();
    for t in 0..ticks {
        if t == 0 || held {
            board.drive(DELAY, Edge::Left).unwrap();
        }
        board.tick().unwrap();
        out.push(board.ports(SINK).unwrap().left);
    }
    out
}

#[test]
fn single_pulse_comes_out_one_tick_later() {
    let mut board = delay_board(1);
    assert_eq!(
        right_pulses(&mut board, 5, false),
        vec![false, true, false, false, false]
    );
}

#[test]
fn held_input_still_yields_one_pulse() {
    let mut board = delay_board(1);
    assert_eq!(
        right_pulses(&mut board, 6, true),
        vec![false, true, false, false, false, false]
    );
}

#[test]
fn longer_delays_shift_the_pulse() {
    for n in 1..=5usize {
        let mut board = delay_board(n as i64);
        let pulses = right_pulses(&mut board, n + 4, false);
        let fired: Vec<usize> = pulses
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(fired, vec![n], "length {n}");
    }
}

#[test]
fn counter_resets_on_store_and_counts_up_otherwise() {
    let mut board = delay_board(2);
    board.drive(DELAY, Edge::Left).unwrap();
    board.tick().unwrap();
    let m = board.memory(DELAY).unwrap();
    assert!(m.stored_bit);
    assert_eq!(m.ticks_since_store, 1);

    board.ticks(3).unwrap();
    assert_eq!(board.memory(DELAY).unwrap().ticks_since_store, 4);

    // A fresh rising edge restarts the window.
    board.drive(DELAY, Edge::Left).unwrap();
    board.tick().unwrap();
    assert_eq!(board.memory(DELAY).unwrap().ticks_since_store, 1);
}

#[test]
fn level_triggered_memory_restarts_while_input_is_held() {
    let mut board = Board::new();
    let rule = DelayRule::new(
        "LEVEL_DELAY",
        |p| p.left,
        |stored, ticks| PortSet::new(false, false, false, stored && ticks == 1),
    )
    .with_trigger(StoreTrigger::Level);
    board.place(DELAY, rule).unwrap();
    catalog::place(&mut board, "L_R_WIRE", SINK, None).unwrap();

    assert_eq!(right_pulses(&mut board, 4, true), vec![false; 4]);
    let mut board2 = board.clone();
    board2.clear_all();
    assert_eq!(
        right_pulses(&mut board2, 4, false),
        vec![false, true, false, false]
    );
}

#[test]
fn delay_circuit_emits_after_wire_and_delay_latency() {
    let mut board = circuit_grid::circuits::delay_line().unwrap().board;
    let mut seen = Vec::new();
    for _ in 0..6 {
        board.tick().unwrap();
        seen.push(board.ports(Coord::new(2, 0)).unwrap().left);
    }
    // one tick through the wire, one to store, two more to fire
    assert_eq!(seen, vec![false, false, false, true, false, false]);
}

#[test]
fn fresh_rising_edge_inside_the_window_restarts_it() {
    let mut board = delay_board(3);
    let mut fired = Vec::new();
    for t in 0..9 {
        if t == 0 || t == 2 {
            board.drive(DELAY, Edge::Left).unwrap();
        }
        board.tick().unwrap();
        if board.ports(SINK).unwrap().left {
            fired.push(t);
        }
    }
    assert_eq!(fired, vec![5]);
}
