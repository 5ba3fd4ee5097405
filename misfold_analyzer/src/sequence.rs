// src/sequence.rs
//! Nucleotide-level primitives used to synthesize guide RNAs.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

pub const NUCLEOTIDES: [char; 4] = ['A', 'T', 'G', 'C'];

/// Spacer length for SpCas9 guides (without PAM).
pub const GUIDE_LENGTH: usize = 20;

/// `<FromAA><position><ToAA>`, e.g. `R175H`.
static MUTATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z])(\d+)([A-Z])$").expect("mutation pattern is valid"));

/// Missense change in one-letter amino acid notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointMutation {
    pub from: char,
    pub position: u32,
    pub to: char,
}

pub fn parse_mutation(mutation: &str) -> Option<PointMutation> {
    let caps = MUTATION_PATTERN.captures(mutation.trim())?;
    let from = caps[1].chars().next()?;
    let position = caps[2].parse().ok()?;
    let to = caps[3].chars().next()?;
    Some(PointMutation { from, position, to })
}

/// One reference codon per standard amino acid; anything else is `NNN`.
pub fn reference_codon(amino_acid: char) -> &'static str {
    match amino_acid {
        'A' => "GCT",
        'R' => "CGT",
        'N' => "AAT",
        'D' => "GAT",
        'C' => "TGT",
        'Q' => "CAA",
        'E' => "GAA",
        'G' => "GGT",
        'H' => "CAT",
        'I' => "ATT",
        'L' => "CTG",
        'K' => "AAA",
        'M' => "ATG",
        'F' => "TTT",
        'P' => "CCT",
        'S' => "TCT",
        'T' => "ACT",
        'W' => "TGG",
        'Y' => "TAT",
        'V' => "GTT",
        _ => "NNN",
    }
}

/// Fraction of G/C bases, 0 for an empty sequence.
pub fn gc_content(sequence: &str) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    let gc = sequence.chars().filter(|c| matches!(c, 'G' | 'C')).count();
    gc as f64 / sequence.chars().count() as f64
}

/// Random sequence steered toward a GC fraction drawn once per call.
///
/// The first six bases are uniform; after that the generator leans toward
/// G/C while below target and toward A/T when more than 10 points above it.
pub fn realistic_sequence<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    let target_gc: f64 = rng.gen_range(0.45..0.60);
    let mut sequence = String::with_capacity(length);
    let mut gc_count = 0usize;

    for i in 0..length {
        let current_gc = if i == 0 { 0.0 } else { gc_count as f64 / i as f64 };

        let base = if i > 5 && current_gc < target_gc {
            if rng.gen_bool(0.5) { 'G' } else { 'C' }
        } else if i > 5 && current_gc > target_gc + 0.1 {
            if rng.gen_bool(0.5) { 'A' } else { 'T' }
        } else {
            NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())]
        };

        if matches!(base, 'G' | 'C') {
            gc_count += 1;
        }
        sequence.push(base);
    }

    sequence
}

/// Sequence carrying the reference codon of the mutant residue after a
/// random 7-10nt prefix. Unparseable labels get a plain realistic sequence.
pub fn mutation_specific_sequence<R: Rng + ?Sized>(
    mutation: &str,
    length: usize,
    rng: &mut R,
) -> String {
    let Some(parsed) = parse_mutation(mutation) else {
        return realistic_sequence(length, rng);
    };

    let prefix_len = rng.gen_range(7..=10);
    let mut sequence = realistic_sequence(prefix_len, rng);
    sequence.push_str(reference_codon(parsed.to));

    if sequence.len() < length {
        let padding = realistic_sequence(length - sequence.len(), rng);
        sequence.push_str(&padding);
    }
    sequence.truncate(length);
    sequence
}

/// SpCas9 NGG motif.
pub fn pam<R: Rng + ?Sized>(rng: &mut R) -> String {
    let n = NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())];
    format!("{}GG", n)
}

/// Predicted cutting efficiency; 40-60% GC scores best.
pub fn efficiency_for_gc<R: Rng + ?Sized>(gc: f64, rng: &mut R) -> f64 {
    if (0.40..=0.60).contains(&gc) {
        rng.gen_range(0.85..=0.97)
    } else if (0.30..=0.70).contains(&gc) {
        rng.gen_range(0.70..=0.85)
    } else {
        rng.gen_range(0.55..=0.70)
    }
}

pub fn off_targets_for_gc<R: Rng + ?Sized>(gc: f64, rng: &mut R) -> u32 {
    if gc > 0.65 {
        rng.gen_range(1..=4)
    } else if gc > 0.55 {
        rng.gen_range(0..=2)
    } else {
        rng.gen_range(0..=1)
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
