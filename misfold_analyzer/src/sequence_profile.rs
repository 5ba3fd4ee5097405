// src/sequence_profile.rs

use serde::{Deserialize, Serialize};

const HELIX_FORMERS: &[char] = &['A', 'E', 'L', 'M'];
const SHEET_FORMERS: &[char] = &['V', 'I', 'Y'];
const CHARGED: &[char] = &['D', 'E', 'K', 'R'];
const HYDROPHOBIC: &[char] = &['A', 'I', 'L', 'M', 'F', 'W', 'Y', 'V'];

/// Residue-propensity summary of a submitted amino acid sequence.
///
/// Informational only: the risk tier, score and structure of a result never
/// depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceProfile {
    pub length: usize,
    pub helix_propensity: f64,
    pub sheet_propensity: f64,
    pub coil_propensity: f64,
    pub charged_fraction: f64,
    pub gravy: f64,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

impl SequenceProfile {
    /// `None` for a blank sequence.
    pub fn from_sequence(sequence: &str) -> Option<Self> {
        let residues: Vec<char> = sequence
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if residues.is_empty() {
            return None;
        }

        let total = residues.len() as f64;
        let fraction = |set: &[char]| residues.iter().filter(|r| set.contains(r)).count() as f64 / total;

        let helix = fraction(HELIX_FORMERS);
        let sheet = fraction(SHEET_FORMERS);

        Some(Self {
            length: residues.len(),
            helix_propensity: round_to(helix * 100.0, 1),
            sheet_propensity: round_to(sheet * 100.0, 1),
            coil_propensity: round_to((1.0 - helix - sheet) * 100.0, 1),
            charged_fraction: round_to(fraction(CHARGED) * 100.0, 2),
            gravy: round_to(fraction(HYDROPHOBIC) - 0.5, 3),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_sequence_has_no_profile() {
        assert!(SequenceProfile::from_sequence("").is_none());
        assert!(SequenceProfile::from_sequence("  \n").is_none());
    }

    #[test]
    fn counts_residue_classes() {
        // 4 helix formers, 2 sheet formers, E + 3 K charged
        let p = SequenceProfile::from_sequence("aelmvik kkgg").unwrap();
        assert_eq!(p.length, 11);
        assert_eq!(p.helix_propensity, 36.4);
        assert_eq!(p.sheet_propensity, 18.2);
        assert_eq!(p.coil_propensity, 45.5);
        assert_eq!(p.charged_fraction, 36.36);
        // A L M V I hydrophobic: 5/11 - 0.5
        assert_eq!(p.gravy, -0.045);
    }
}
