// src/hotspots.rs

use rand::Rng;

use crate::models::{Hotspot, Severity, Tier};

/// Hotspots reported for every disease-tier protein. The report template
/// expects exactly these residues.
fn disease_hotspots() -> Vec<Hotspot> {
    vec![
        Hotspot {
            residue: "R175H".to_string(),
            position: 175,
            severity: Severity::High,
            confidence: 0.95,
            impact: "Disrupts hydrogen bonding network, promotes aggregation".to_string(),
        },
        Hotspot {
            residue: "G245S".to_string(),
            position: 245,
            severity: Severity::Medium,
            confidence: 0.87,
            impact: "Increases aggregation propensity, destabilizes structure".to_string(),
        },
    ]
}

pub fn generate<R: Rng + ?Sized>(tier: Tier, rng: &mut R) -> Vec<Hotspot> {
    match tier {
        Tier::Healthy => Vec::new(),
        Tier::Disease => disease_hotspots(),
        Tier::Unknown => {
            let residue_number: u32 = rng.gen_range(0..200);
            vec![Hotspot {
                residue: format!("A{}V", residue_number),
                position: rng.gen_range(50..250),
                severity: Severity::Medium,
                confidence: 0.78,
                impact: "Potential structural instability, requires further analysis".to_string(),
            }]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn healthy_has_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate(Tier::Healthy, &mut rng).is_empty());
    }

    #[test]
    fn disease_is_fixed() {
        let mut rng = StdRng::seed_from_u64(2);
        let spots = generate(Tier::Disease, &mut rng);
        let residues: Vec<&str> = spots.iter().map(|h| h.residue.as_str()).collect();
        assert_eq!(residues, ["R175H", "G245S"]);
        assert_eq!(spots[0].severity, Severity::High);
        assert_eq!(spots[1].position, 245);
        assert_eq!(spots[1].confidence, 0.87);
    }

    #[test]
    fn unknown_is_single_randomized_alanine_to_valine() {
        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            let spots = generate(Tier::Unknown, &mut rng);
            assert_eq!(spots.len(), 1);

            let spot = &spots[0];
            assert!(spot.residue.starts_with('A') && spot.residue.ends_with('V'));
            let number: u32 = spot.residue[1..spot.residue.len() - 1].parse().unwrap();
            assert!(number < 200);
            assert!((50..250).contains(&spot.position));
            assert_eq!(spot.severity, Severity::Medium);
            assert_eq!(spot.confidence, 0.78);
        }
    }
}
