use circuit_grid::catalog;
use circuit_grid::{
    Board, BoardConfig, BoundaryPolicy, CircuitError, Coord, Edge, Schedule,
};

/// Seeded LCG for reproducible layouts.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

type Placement = (Coord, &'static str, Option<i64>);

fn random_layout(seed: u64, size: i32) -> Vec<Placement> {
    let names = catalog::names();
    let mut rng = Lcg(seed);
    let mut out = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if rng.next() % 5 == 0 {
                continue;
            }
            let name = names[(rng.next() as usize) % names.len()];
            let delay = catalog::get(name)
                .unwrap()
                .takes_delay()
                .then(|| 1 + (rng.next() % 4) as i64);
            out.push((Coord::new(x, y), name, delay));
        }
    }
    out
}

fn build(layout: &[Placement], config: BoardConfig, seed: u64) -> Board {
    let mut board = Board::with_config(config);
    for &(at, name, delay) in layout {
        catalog::place(&mut board, name, at, delay).unwrap();
    }
    let mut rng = Lcg(seed);
    for at in board.coords() {
        for e in Edge::ALL {
            if rng.next() % 3 == 0 {
                board.drive(at, e).unwrap();
            }
        }
    }
    board
}

#[test]
fn insertion_order_and_schedule_do_not_change_results() {
    let layout = random_layout(7, 12);
    let mut reversed = layout.clone();
    reversed.reverse();

    let mut a = build(&layout, BoardConfig::default(), 99);
    let mut b = build(&reversed, BoardConfig::default(), 99);
    let mut c = build(
        &layout,
        BoardConfig::default().with_schedule(Schedule::Parallel),
        99,
    );
    assert_eq!(a.snapshot(), b.snapshot());

    for _ in 0..25 {
        a.tick().unwrap();
        b.tick().unwrap();
        c.tick().unwrap();
        let sa = serde_json::to_string(&a.snapshot()).unwrap();
        assert_eq!(sa, serde_json::to_string(&b.snapshot()).unwrap());
        assert_eq!(sa, serde_json::to_string(&c.snapshot()).unwrap());
        assert_eq!(a.stats(), c.stats());
    }
}

#[test]
fn both_schedules_report_the_same_escape_under_error_policy() {
    let bulk: Vec<Placement> = random_layout(13, 10)
        .into_iter()
        .map(|(at, name, delay)| (at + Coord::new(100, 100), name, delay))
        .collect();

    for schedule in [Schedule::Sequential, Schedule::Parallel] {
        let config = BoardConfig::default()
            .with_boundary(BoundaryPolicy::Error)
            .with_schedule(schedule);
        let mut board = build(&bulk, config, 3);
        catalog::place(&mut board, "L_R_WIRE", Coord::new(0, 0), None).unwrap();
        catalog::place(&mut board, "L_R_WIRE", Coord::new(-5, 3), None).unwrap();
        catalog::place(&mut board, "T_B_WIRE", Coord::new(4, -2), None).unwrap();
        board.drive(Coord::new(0, 0), Edge::Left).unwrap();
        board.drive(Coord::new(-5, 3), Edge::Left).unwrap();
        board.drive(Coord::new(4, -2), Edge::Top).unwrap();

        let before = board.snapshot();
        assert_eq!(
            board.tick().unwrap_err(),
            CircuitError::OutOfBoundsPropagation {
                from: Coord::new(-5, 3),
                edge: Edge::Right,
                target: Some(Coord::new(-4, 3)),
            },
            "{schedule:?}"
        );
        assert_eq!(board.snapshot(), before, "{schedule:?}");
        assert_eq!(board.tick_count(), 0);
    }
}

#[test]
fn tick_is_a_function_of_the_grid() {
    let layout = random_layout(31, 8);
    let mut a = build(&layout, BoardConfig::default(), 5);
    a.ticks(3).unwrap();

    let mut b = a.clone();
    a.tick().unwrap();
    b.tick().unwrap();
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn pulse_ring_has_period_four() {
    let mut ring = circuit_grid::circuits::pulse_ring().unwrap().board;
    let start: Vec<_> = ring
        .snapshot()
        .cells
        .into_iter()
        .map(|v| v.ports)
        .collect();

    for t in 1..=12 {
        ring.tick().unwrap();
        let ports: Vec<_> = ring
            .snapshot()
            .cells
            .into_iter()
            .map(|v| v.ports)
            .collect();
        assert_eq!(ports.iter().filter(|p| !p.is_empty()).count(), 1);
        assert_eq!(ports == start, t % 4 == 0, "tick {t}");
    }
    assert_eq!(ring.stats().dropped, 0);
}
