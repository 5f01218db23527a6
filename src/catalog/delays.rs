//! Memory entries: fixed-length delay lines and plain latches.

use crate::error::CircuitError;
use crate::ports::{Edge, PortSet};
use crate::rule::{DelayRule, StoreTrigger};

use super::{Entry, Group};

pub fn delay_name(input: Edge, output: Edge) -> String {
    format!("{}_{}_DELAY", input.letter(), output.letter())
}

pub fn latch_name(input: Edge, output: Edge) -> String {
    format!("{}_{}_LATCH", input.letter(), output.letter())
}

/// A delay line from `input` to `output`.
///
/// A rising edge on `input` is stored; `output` is raised on exactly the evaluation `length`
/// ticks later. Holding the input high does not restart the window; a fresh rising edge does.
///
/// `length` must lie in `1..u32::MAX`: the elapsed counter saturates at `u32::MAX`, so a line of
/// that length would fire on every evaluation after it.
pub fn delay_line(input: Edge, output: Edge, length: i64) -> Result<DelayRule, CircuitError> {
    if length < 1 || length >= u32::MAX as i64 {
        return Err(CircuitError::InvalidDelay { length });
    }
    let n = length as u32;
    let rule = DelayRule::new(
        &delay_name(input, output),
        move |p| p[input],
        move |stored, ticks| {
            let mut out = PortSet::EMPTY;
            out[output] = stored && ticks == n;
            out
        },
    );
    Ok(rule.with_trigger(StoreTrigger::Rising))
}

/// A latch: once `input` is seen high, `output` stays high until the cell is cleared.
pub fn latch(input: Edge, output: Edge) -> DelayRule {
    DelayRule::new(
        &latch_name(input, output),
        move |p| p[input],
        move |stored, _| {
            let mut out = PortSet::EMPTY;
            out[output] = stored;
            out
        },
    )
}

fn ordered_pairs() -> impl Iterator<Item = (Edge, Edge)> {
    Edge::ALL
        .into_iter()
        .flat_map(|a| Edge::ALL.into_iter().map(move |b| (a, b)))
        .filter(|(a, b)| a != b)
}

pub(super) fn entries() -> Vec<Entry> {
    let lines = ordered_pairs().map(|(i, o)| Entry::delay_line(i, o));
    let latches = ordered_pairs().map(|(i, o)| Entry::fixed(Group::Latches, latch(i, o)));
    lines.chain(latches).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{MemoryCell, MemoryState};

    #[test]
    fn non_positive_length_is_rejected() {
        for bad in [0, -1, i64::MIN] {
            assert_eq!(
                delay_line(Edge::Left, Edge::Right, bad).unwrap_err(),
                CircuitError::InvalidDelay { length: bad }
            );
        }
        assert!(delay_line(Edge::Left, Edge::Right, 1).is_ok());
    }

    #[test]
    fn delay_of_three_fires_three_evaluations_later() {
        let mut m = MemoryCell::new(delay_line(Edge::Top, Edge::Bottom, 3).unwrap());
        let outs: Vec<bool> = (0..6)
            .map(|i| {
                let inputs = if i == 0 { PortSet::only(Edge::Top) } else { PortSet::EMPTY };
                m.evaluate(inputs).bottom
            })
            .collect();
        assert_eq!(outs, vec![false, false, false, true, false, false]);
    }

    #[test]
    fn length_must_stay_below_the_saturated_counter() {
        for bad in [u32::MAX as i64, u32::MAX as i64 + 1, i64::MAX] {
            assert_eq!(
                delay_line(Edge::Left, Edge::Right, bad).unwrap_err(),
                CircuitError::InvalidDelay { length: bad }
            );
        }

        let n = u32::MAX - 1;
        let mut m = MemoryCell::new(delay_line(Edge::Left, Edge::Right, n as i64).unwrap());
        m.restore(MemoryState {
            stored_bit: true,
            ticks_since_store: n - 1,
            last_candidate: false,
        });
        let outs: Vec<bool> = (0..4).map(|_| m.evaluate(PortSet::EMPTY).right).collect();
        assert_eq!(outs, vec![false, true, false, false]);
        assert_eq!(m.state().ticks_since_store, u32::MAX);
    }

    #[test]
    fn second_rising_edge_restarts_the_window() {
        let mut m = MemoryCell::new(delay_line(Edge::Top, Edge::Bottom, 3).unwrap());
        let fired: Vec<usize> = (0..8)
            .filter(|&i| {
                let pulse = i == 0 || i == 2;
                let inputs = if pulse { PortSet::only(Edge::Top) } else { PortSet::EMPTY };
                m.evaluate(inputs).bottom
            })
            .collect();
        assert_eq!(fired, vec![5]);
    }

    #[test]
    fn latch_holds_until_cleared() {
        let mut m = MemoryCell::new(latch(Edge::Left, Edge::Right));
        assert!(!m.evaluate(PortSet::EMPTY).right);
        assert!(m.evaluate(PortSet::only(Edge::Left)).right);
        assert!(m.evaluate(PortSet::EMPTY).right);
        m.clear();
        assert!(!m.evaluate(PortSet::EMPTY).right);
    }

    #[test]
    fn every_ordered_pair_gets_a_line_and_a_latch() {
        assert_eq!(ordered_pairs().count(), 12);
        assert_eq!(entries().len(), 24);
    }
}
