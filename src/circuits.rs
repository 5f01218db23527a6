//! Built-in demo circuits (compile-time layouts).
//!
//! Each circuit is a pre-built [`Board`] with its input signals already driven, ready to tick.

use crate::board::Board;
use crate::catalog;
use crate::coord::Coord;
use crate::error::CircuitError;
use crate::ports::Edge;

#[derive(Debug, Clone)]
pub struct Circuit {
    pub name: &'static str,
    pub description: &'static str,
    pub board: Board,
}

fn at(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

/// Four left-right wires; a pulse enters the leftmost one.
pub fn wire_chain() -> Result<Circuit, CircuitError> {
    let mut board = Board::new();
    for x in 0..4 {
        catalog::place(&mut board, "L_R_WIRE", at(x, 0), None)?;
    }
    board.drive(at(0, 0), Edge::Left)?;
    Ok(Circuit {
        name: "wire_chain",
        description: "pulse travelling right along four wires",
        board,
    })
}

fn two_input_gate(gate: &str, top: bool, bottom: bool) -> Result<Board, CircuitError> {
    let mut board = Board::new();
    catalog::place(&mut board, "T_B_WIRE", at(1, 0), None)?;
    catalog::place(&mut board, gate, at(1, 1), None)?;
    catalog::place(&mut board, "T_B_WIRE", at(1, 2), None)?;
    catalog::place(&mut board, "L_R_WIRE", at(2, 1), None)?;
    if top {
        board.drive(at(1, 0), Edge::Top)?;
    }
    if bottom {
        board.drive(at(1, 2), Edge::Bottom)?;
    }
    Ok(board)
}

/// TB_R_AND fed from above and below, both inputs high.
pub fn and_gate() -> Result<Circuit, CircuitError> {
    Ok(Circuit {
        name: "and_gate",
        description: "AND gate with both inputs driven; output wire to the right",
        board: two_input_gate("TB_R_AND", true, true)?,
    })
}

/// TB_R_XOR fed from above only.
pub fn xor_gate() -> Result<Circuit, CircuitError> {
    Ok(Circuit {
        name: "xor_gate",
        description: "XOR gate with only the top input driven; output wire to the right",
        board: two_input_gate("TB_R_XOR", true, false)?,
    })
}

/// wire -> 2-tick delay line -> wire.
pub fn delay_line() -> Result<Circuit, CircuitError> {
    let mut board = Board::new();
    catalog::place(&mut board, "L_R_WIRE", at(0, 0), None)?;
    catalog::place(&mut board, "L_R_DELAY", at(1, 0), Some(2))?;
    catalog::place(&mut board, "L_R_WIRE", at(2, 0), None)?;
    board.drive(at(0, 0), Edge::Left)?;
    Ok(Circuit {
        name: "delay_line",
        description: "single pulse through a delay line of length 2",
        board,
    })
}

/// Four corner wires forming a closed loop; one pulse circulates with period 4.
pub fn pulse_ring() -> Result<Circuit, CircuitError> {
    let mut board = Board::new();
    catalog::place(&mut board, "B_R_WIRE", at(0, 0), None)?;
    catalog::place(&mut board, "L_B_WIRE", at(1, 0), None)?;
    catalog::place(&mut board, "L_T_WIRE", at(1, 1), None)?;
    catalog::place(&mut board, "T_R_WIRE", at(0, 1), None)?;
    board.drive(at(0, 0), Edge::Bottom)?;
    Ok(Circuit {
        name: "pulse_ring",
        description: "one pulse circulating clockwise around a 2x2 ring",
        board,
    })
}

/// Return a circuit by name.
pub fn by_name(name: &str) -> Result<Circuit, CircuitError> {
    match name {
        "wire_chain" => wire_chain(),
        "and_gate" => and_gate(),
        "xor_gate" => xor_gate(),
        "delay_line" => delay_line(),
        "pulse_ring" => pulse_ring(),
        _ => Err(CircuitError::UnknownCircuit {
            name: name.to_string(),
        }),
    }
}

/// Names of all built-in circuits.
pub fn names() -> &'static [&'static str] {
    &[
        "wire_chain",
        "and_gate",
        "xor_gate",
        "delay_line",
        "pulse_ring",
    ]
}
