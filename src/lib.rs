//! Translate between the two views of a pairwise alignment:
//! two gapped rows of the same length, or two ungapped sequences with an edit string.
#[macro_use]
extern crate log;
pub mod error;
pub mod fasta;
pub mod gen_seq;
pub mod op;
pub use error::{AlignError, Result};
pub use op::Op;

/// The gap symbol in gapped rows.
pub const GAP: u8 = b'-';

/// Extract the ungapped sequences and the edit operations from a pairwise alignment.
/// A gap in `p_row` is an `Ins`, a gap in `q_row` is a `Del`.
/// ```
/// let (p, q, ops) = alnedit::encode(b"ACCACAGT-CATA", b"A-CAGAGTACAAA").unwrap();
/// assert_eq!(p, b"ACCACAGTCATA");
/// assert_eq!(q, b"ACAGAGTACAAA");
/// assert_eq!(alnedit::op::edits_to_string(&ops), "MDMMMMMMIMMMM");
/// ```
pub fn encode(p_row: &[u8], q_row: &[u8]) -> Result<(Vec<u8>, Vec<u8>, Vec<Op>)> {
    if p_row.len() != q_row.len() {
        return Err(AlignError::LengthMismatch {
            context: "gapped rows",
            expected: p_row.len(),
            actual: q_row.len(),
        });
    }
    let p_gaps = bytecount::count(p_row, GAP);
    let q_gaps = bytecount::count(q_row, GAP);
    let mut p = Vec::with_capacity(p_row.len() - p_gaps);
    let mut q = Vec::with_capacity(q_row.len() - q_gaps);
    let mut ops = Vec::with_capacity(p_row.len());
    // p.len() and q.len() are the read cursors of each row.
    for (column, (&x, &y)) in p_row.iter().zip(q_row.iter()).enumerate() {
        match (x, y) {
            (GAP, GAP) => return Err(AlignError::InvalidAlignment { column }),
            (GAP, y) => {
                q.push(y);
                ops.push(Op::Ins);
            }
            (x, GAP) => {
                p.push(x);
                ops.push(Op::Del);
            }
            (x, y) => {
                p.push(x);
                q.push(y);
                ops.push(Op::Match);
            }
        }
    }
    Ok((p, q, ops))
}

/// Recover the pairwise alignment of `p` and `q` from the edit operations.
/// `ops` should consume `p` and `q` exactly, i.e., #Match + #Del == |p| and #Match + #Ins == |q|.
/// ```
/// let ops = alnedit::op::parse_edits(b"MDMMMMMMIMMMM").unwrap();
/// let (p_row, q_row) = alnedit::decode(b"ACCACAGTCATA", b"ACAGAGTACAAA", &ops).unwrap();
/// assert_eq!(p_row, b"ACCACAGT-CATA");
/// assert_eq!(q_row, b"A-CAGAGTACAAA");
/// ```
pub fn decode(p: &[u8], q: &[u8], ops: &[Op]) -> Result<(Vec<u8>, Vec<u8>)> {
    let (mat, ins, del) = op::op_counts(ops);
    if mat + del != p.len() {
        return Err(AlignError::LengthMismatch {
            context: "first sequence and edit operations",
            expected: mat + del,
            actual: p.len(),
        });
    }
    if mat + ins != q.len() {
        return Err(AlignError::LengthMismatch {
            context: "second sequence and edit operations",
            expected: mat + ins,
            actual: q.len(),
        });
    }
    let (mut i, mut j) = (0, 0);
    let (mut p_row, mut q_row) = (Vec::with_capacity(ops.len()), Vec::with_capacity(ops.len()));
    for &op in ops {
        match op {
            Op::Match => {
                p_row.push(p[i]);
                q_row.push(q[j]);
                i += 1;
                j += 1;
            }
            Op::Ins => {
                p_row.push(GAP);
                q_row.push(q[j]);
                j += 1;
            }
            Op::Del => {
                p_row.push(p[i]);
                q_row.push(GAP);
                i += 1;
            }
        }
    }
    trace!("{}", String::from_utf8_lossy(&p_row));
    trace!("{}", String::from_utf8_lossy(&q_row));
    Ok((p_row, q_row))
}

/// Return the window of `xs` starting at `pos` that `ops` covers.
pub fn reference_window<'a>(xs: &'a [u8], pos: usize, ops: &[Op]) -> Result<&'a [u8]> {
    if xs.len() < pos {
        return Err(AlignError::OutOfRange { pos, len: xs.len() });
    }
    let (mat, ins, _) = op::op_counts(ops);
    let window = &xs[pos..];
    if window.len() < mat + ins {
        return Err(AlignError::LengthMismatch {
            context: "reference window and edit operations",
            expected: mat + ins,
            actual: window.len(),
        });
    }
    Ok(&window[..mat + ins])
}

/// Align the read `p` against `xs[pos..]`, the reference from the mapped location, by the edit operations.
/// `xs` can be longer than the region covered by `ops`; the rest of it is not in the alignment.
/// ```
/// let ops = alnedit::op::parse_edits(b"MDMMMMMMIMMMM").unwrap();
/// let (p_row, q_row) =
///     alnedit::local_decode(b"ACCACAGTCATA", b"GTACAGAGTACAAA", 2, &ops).unwrap();
/// assert_eq!(p_row, b"ACCACAGT-CATA");
/// assert_eq!(q_row, b"A-CAGAGTACAAA");
/// ```
pub fn local_decode(p: &[u8], xs: &[u8], pos: usize, ops: &[Op]) -> Result<(Vec<u8>, Vec<u8>)> {
    let window = reference_window(xs, pos, ops)?;
    decode(p, window, ops)
}

/// The number of columns with different characters in the alignment of `p` against `xs[pos..]`.
/// A gap is different from any base.
/// ```
/// let ops = alnedit::op::parse_edits(b"MDMMIMMMMIIM").unwrap();
/// let dist = alnedit::local_edit_distance(b"accaaagta", b"cgacaaatgtcca", 2, &ops).unwrap();
/// assert_eq!(dist, 5);
/// ```
pub fn local_edit_distance(p: &[u8], xs: &[u8], pos: usize, ops: &[Op]) -> Result<usize> {
    let (p_row, q_row) = local_decode(p, xs, pos, ops)?;
    let dist = p_row
        .iter()
        .zip(q_row.iter())
        .filter(|(x, y)| x != y)
        .count();
    Ok(dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{edits_to_string, parse_edits};
    use rand::Rng;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    const SEED: u64 = 1293890;
    #[test]
    fn encode_check() {
        let (p, q, ops) = encode(b"ACCACAGT-CATA", b"A-CAGAGTACAAA").unwrap();
        assert_eq!(p, b"ACCACAGTCATA");
        assert_eq!(q, b"ACAGAGTACAAA");
        assert_eq!(edits_to_string(&ops), "MDMMMMMMIMMMM");
    }
    #[test]
    fn encode_diverging_gaps() {
        // Gaps on both rows, in runs, and at the ends.
        let (p, q, ops) = encode(b"--AC-GT", b"TTA-CG-").unwrap();
        assert_eq!(p, b"ACGT");
        assert_eq!(q, b"TTACG");
        assert_eq!(edits_to_string(&ops), "IIMDIMD");
        let (p, q, ops) = encode(b"", b"").unwrap();
        assert!(p.is_empty() && q.is_empty() && ops.is_empty());
    }
    #[test]
    fn encode_invalid() {
        assert_eq!(
            encode(b"ACG", b"AC"),
            Err(AlignError::LengthMismatch {
                context: "gapped rows",
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(
            encode(b"AC-G", b"A--G"),
            Err(AlignError::InvalidAlignment { column: 2 })
        );
    }
    #[test]
    fn decode_check() {
        let ops = parse_edits(b"MDMMMMMMIMMMM").unwrap();
        let (p_row, q_row) = decode(b"ACCACAGTCATA", b"ACAGAGTACAAA", &ops).unwrap();
        assert_eq!(p_row, b"ACCACAGT-CATA");
        assert_eq!(q_row, b"A-CAGAGTACAAA");
    }
    #[test]
    fn decode_invalid() {
        let ops = parse_edits(b"MMD").unwrap();
        assert!(matches!(
            decode(b"AC", b"AC", &ops),
            Err(AlignError::LengthMismatch { .. })
        ));
        assert!(matches!(
            decode(b"ACG", b"ACG", &ops),
            Err(AlignError::LengthMismatch { .. })
        ));
        assert!(decode(b"ACG", b"AC", &ops).is_ok());
    }
    #[test]
    fn local_decode_check() {
        let ops = parse_edits(b"MDMMMMMMIMMMM").unwrap();
        let (p_row, q_row) = local_decode(b"ACCACAGTCATA", b"GTACAGAGTACAAA", 2, &ops).unwrap();
        assert_eq!(p_row, b"ACCACAGT-CATA");
        assert_eq!(q_row, b"A-CAGAGTACAAA");
        // Trailing reference is not a part of the alignment.
        let (p_row, q_row) =
            local_decode(b"ACCACAGTCATA", b"GTACAGAGTACAAATTT", 2, &ops).unwrap();
        assert_eq!(p_row, b"ACCACAGT-CATA");
        assert_eq!(q_row, b"A-CAGAGTACAAA");
    }
    #[test]
    fn local_decode_invalid() {
        let ops = parse_edits(b"MM").unwrap();
        assert_eq!(
            local_decode(b"AC", b"GTAC", 5, &ops),
            Err(AlignError::OutOfRange { pos: 5, len: 4 })
        );
        assert!(matches!(
            local_decode(b"AC", b"GTAC", 3, &ops),
            Err(AlignError::LengthMismatch { .. })
        ));
        // The offset equal to the length is an empty window.
        let (p_row, q_row) = local_decode(b"", b"GTAC", 4, &[]).unwrap();
        assert!(p_row.is_empty() && q_row.is_empty());
    }
    #[test]
    fn local_edit_distance_check() {
        let ops = parse_edits(b"MDMMIMMMMIIM").unwrap();
        let dist = local_edit_distance(b"accaaagta", b"cgacaaatgtcca", 2, &ops).unwrap();
        assert_eq!(dist, 5);
        let ops = parse_edits(b"MDMMMMMMIMMMM").unwrap();
        let dist = local_edit_distance(b"ACCACAGTCATA", b"GTACAGAGTACAAA", 2, &ops).unwrap();
        assert_eq!(dist, 4);
        assert!(matches!(
            local_edit_distance(b"A", b"A", 2, &[Op::Match]),
            Err(AlignError::OutOfRange { pos: 2, len: 1 })
        ));
    }
    #[test]
    fn round_trip_random() {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(SEED);
        let prof = crate::gen_seq::PROFILE;
        for _ in 0..500 {
            let len = rng.gen::<usize>() % 200;
            let (p, q, ops) = crate::gen_seq::alignment_from(&mut rng, len, &prof);
            let (p_row, q_row) = decode(&p, &q, &ops).unwrap();
            assert_eq!(p_row.len(), ops.len());
            assert_eq!(q_row.len(), ops.len());
            let (p2, q2, ops2) = encode(&p_row, &q_row).unwrap();
            assert_eq!((&p2, &q2, &ops2), (&p, &q, &ops));
            let (p_row2, q_row2) = decode(&p2, &q2, &ops2).unwrap();
            assert_eq!((p_row2, q_row2), (p_row, q_row));
        }
    }
    #[test]
    fn distance_bound_random() {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(SEED + 1);
        let prof = crate::gen_seq::PROFILE;
        for _ in 0..500 {
            let len = rng.gen::<usize>() % 200;
            let (p, q, ops) = crate::gen_seq::alignment_from(&mut rng, len, &prof);
            let (head_len, tail_len) = (rng.gen::<usize>() % 20, rng.gen::<usize>() % 20);
            let head = crate::gen_seq::generate_seq(&mut rng, head_len);
            let tail = crate::gen_seq::generate_seq(&mut rng, tail_len);
            let xs = [head.as_slice(), &q, &tail].concat();
            let dist = local_edit_distance(&p, &xs, head.len(), &ops).unwrap();
            let diff = (p.len() as isize - q.len() as isize).abs() as usize;
            assert!(diff <= dist && dist <= ops.len(), "{},{},{}", diff, dist, ops.len());
        }
    }
}
