//! This module is to generate some random alignments to check the translations.
//! Usually, it would not be used in the real-applications.
use crate::op::Op;
use rand::seq::SliceRandom;
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub sub: f64,
    pub del: f64,
    pub ins: f64,
}
pub const PROFILE: Profile = Profile {
    sub: 0.04,
    del: 0.04,
    ins: 0.07,
};

#[derive(Debug, Clone, Copy)]
enum Edit {
    Match,
    MisMatch,
    Del,
    In,
}
impl Edit {
    fn weight(self, p: &Profile) -> f64 {
        match self {
            Edit::Match => 1. - p.sub - p.del - p.ins,
            Edit::MisMatch => p.sub,
            Edit::Del => p.del,
            Edit::In => p.ins,
        }
    }
}
const EDITS: [Edit; 4] = [Edit::Match, Edit::MisMatch, Edit::Del, Edit::In];

/// Introduce errors into `seq` with the profile.
/// Return the modified sequence and the edit operations from `seq` to it.
pub fn introduce_randomness<T: rand::Rng>(seq: &[u8], rng: &mut T, p: &Profile) -> (Vec<u8>, Vec<Op>) {
    let (mut res, mut ops) = (vec![], vec![]);
    let mut remainings = seq.iter().copied();
    let mut current = remainings.next();
    while let Some(base) = current {
        let edit = *EDITS.choose_weighted(rng, |e| e.weight(p)).unwrap_or(&Edit::Match);
        match edit {
            Edit::Match => res.push(base),
            Edit::MisMatch => res.push(choose_base(rng, base)),
            Edit::In => res.push(random_base(rng)),
            Edit::Del => {}
        }
        match edit {
            Edit::Match | Edit::MisMatch => ops.push(Op::Match),
            Edit::In => ops.push(Op::Ins),
            Edit::Del => ops.push(Op::Del),
        }
        if !matches!(edit, Edit::In) {
            current = remainings.next();
        }
    }
    (res, ops)
}

/// Generate a random template of length `len` and its erroneous copy.
/// Return (template, copy, edit operations).
pub fn alignment_from<T: rand::Rng>(rng: &mut T, len: usize, p: &Profile) -> (Vec<u8>, Vec<u8>, Vec<Op>) {
    let template = generate_seq(rng, len);
    let (copy, ops) = introduce_randomness(&template, rng, p);
    (template, copy, ops)
}

pub fn generate_seq<T: rand::Rng>(rng: &mut T, len: usize) -> Vec<u8> {
    let bases = b"ACTG";
    (0..len)
        .filter_map(|_| bases.choose(rng))
        .copied()
        .collect()
}

fn choose_base<T: rand::Rng>(rng: &mut T, base: u8) -> u8 {
    let bases: Vec<u8> = b"ATCG".iter().filter(|&&e| e != base).copied().collect();
    bases.choose(rng).copied().unwrap_or(base)
}
fn random_base<T: rand::Rng>(rng: &mut T) -> u8 {
    b"ATGC".choose(rng).copied().unwrap_or(b'A')
}
