use crate::error::{AlignError, Result};
use serde::{Deserialize, Serialize};

/// An edit operation of a pairwise alignment between `p` (the first row) and `q` (the second row).
/// `Ins` means `q` has an extra base (a gap in the first row),
/// `Del` means a base of `p` is missing in `q` (a gap in the second row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Match,
    Ins,
    Del,
}

impl Op {
    pub fn from_byte(op: u8) -> Option<Op> {
        match op {
            b'M' => Some(Op::Match),
            b'I' => Some(Op::Ins),
            b'D' => Some(Op::Del),
            _ => None,
        }
    }
    pub fn as_byte(&self) -> u8 {
        match self {
            Op::Match => b'M',
            Op::Ins => b'I',
            Op::Del => b'D',
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        f.write_char(self.as_byte() as char)
    }
}

impl std::convert::TryFrom<u8> for Op {
    type Error = AlignError;
    fn try_from(op: u8) -> Result<Op> {
        Op::from_byte(op).ok_or(AlignError::InvalidOperation {
            pos: 0,
            op: op as char,
        })
    }
}

impl std::convert::TryFrom<char> for Op {
    type Error = AlignError;
    fn try_from(op: char) -> Result<Op> {
        match op {
            'M' => Ok(Op::Match),
            'I' => Ok(Op::Ins),
            'D' => Ok(Op::Del),
            _ => Err(AlignError::InvalidOperation { pos: 0, op }),
        }
    }
}

/// Parse an edit string such as `b"MDMMI"`.
pub fn parse_edits(edits: &[u8]) -> Result<Vec<Op>> {
    edits
        .iter()
        .enumerate()
        .map(|(pos, &op)| {
            Op::from_byte(op).ok_or(AlignError::InvalidOperation {
                pos,
                op: op as char,
            })
        })
        .collect()
}

pub fn edits_to_string(ops: &[Op]) -> String {
    ops.iter().map(|op| op.as_byte() as char).collect()
}

/// Return the number of (match, insertion, deletion) in `ops`.
pub fn op_counts(ops: &[Op]) -> (usize, usize, usize) {
    ops.iter()
        .fold((0, 0, 0), |(mat, ins, del), op| match op {
            Op::Match => (mat + 1, ins, del),
            Op::Ins => (mat, ins + 1, del),
            Op::Del => (mat, ins, del + 1),
        })
}

/// Run-length compaction of the edit string, e.g., `MDMMMMMMIMMMM` -> `1M1D6M1I4M`.
pub fn to_cigar(ops: &[Op]) -> String {
    let mut cigar = String::new();
    let mut ops = ops.iter().peekable();
    while let Some(&op) = ops.next() {
        let mut len = 1;
        while ops.peek() == Some(&&op) {
            ops.next();
            len += 1;
        }
        cigar.push_str(&format!("{}{}", len, op));
    }
    cigar
}

/// Expand a CIGAR string made of `M`, `I`, and `D` into edit operations.
/// `=` and `X` are read as `M`. Zero-length or unknown operations are errors.
pub fn parse_cigar(cigar: &str) -> Result<Vec<Op>> {
    let mut ops = vec![];
    let mut num: Option<usize> = None;
    for x in cigar.bytes() {
        if x.is_ascii_digit() {
            let digit = (x - b'0') as usize;
            num = num
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit))
                .map(Some)
                .ok_or_else(|| AlignError::InvalidCigar(cigar.to_string()))?;
        } else {
            let op = match x {
                b'M' | b'=' | b'X' => Op::Match,
                b'I' => Op::Ins,
                b'D' => Op::Del,
                _ => return Err(AlignError::InvalidCigar(cigar.to_string())),
            };
            match num.take() {
                Some(len) if 0 < len => ops.extend(std::iter::repeat(op).take(len)),
                _ => return Err(AlignError::InvalidCigar(cigar.to_string())),
            }
        }
    }
    match num {
        Some(_) => Err(AlignError::InvalidCigar(cigar.to_string())),
        None => Ok(ops),
    }
}

/// Recover the alignment of `p` and `q` with the marker line between them.
/// The marker is `|` for a match, `X` for a mismatch, and ` ` for a gap.
pub fn recover(p: &[u8], q: &[u8], ops: &[Op]) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>)> {
    let (p_row, q_row) = crate::decode(p, q, ops)?;
    let aln = p_row
        .iter()
        .zip(q_row.iter())
        .map(|(&x, &y)| match (x, y) {
            (crate::GAP, _) | (_, crate::GAP) => b' ',
            (x, y) if x == y => b'|',
            _ => b'X',
        })
        .collect();
    Ok((p_row, aln, q_row))
}
