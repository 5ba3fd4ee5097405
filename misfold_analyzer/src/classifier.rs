// src/classifier.rs

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::{RiskLevel, StructureComposition, Tier};

/// One `(pattern, tier)` pair. Patterns are matched as lowercase substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub pattern: String,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub tier: Tier,
    pub misfolding_risk: u8,
    pub risk_level: RiskLevel,
    pub structure: StructureComposition,
}

/// Ordered keyword table; the first matching rule decides the tier.
///
/// Healthy rules are always placed ahead of disease rules, so a name hitting
/// both lists (e.g. "hemoglobin" in older disease lists) resolves to Healthy.
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    rules: Vec<KeywordRule>,
}

impl RiskClassifier {
    pub fn new(healthy_names: &[String], disease_names: &[String]) -> Self {
        let healthy = healthy_names.iter().map(|p| (p, Tier::Healthy));
        let disease = disease_names.iter().map(|p| (p, Tier::Disease));

        let rules = healthy
            .chain(disease)
            .map(|(pattern, tier)| (pattern.trim().to_lowercase(), tier))
            .filter(|(pattern, _)| !pattern.is_empty())
            .map(|(pattern, tier)| KeywordRule { pattern, tier })
            .collect();

        Self { rules }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(&config.healthy_names, &config.disease_names)
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Pure tier lookup; no randomness involved.
    pub fn tier_of(&self, protein_name: &str) -> Tier {
        let name = protein_name.to_lowercase();
        match self.rules.iter().find(|rule| name.contains(&rule.pattern)) {
            Some(rule) => {
                debug!("'{}' matched '{}' -> {:?}", protein_name, rule.pattern, rule.tier);
                rule.tier
            }
            None => {
                debug!("'{}' matched no keyword -> Unknown", protein_name);
                Tier::Unknown
            }
        }
    }

    pub fn classify<R: Rng + ?Sized>(&self, protein_name: &str, rng: &mut R) -> Classification {
        let tier = self.tier_of(protein_name);
        let misfolding_risk = rng.gen_range(risk_range(tier));

        Classification {
            tier,
            misfolding_risk,
            risk_level: risk_level(tier, misfolding_risk),
            structure: draw_structure(rng),
        }
    }
}

/// Inclusive score range for each tier.
pub fn risk_range(tier: Tier) -> RangeInclusive<u8> {
    match tier {
        Tier::Healthy => 15..=45,
        Tier::Disease => 65..=95,
        Tier::Unknown => 45..=70,
    }
}

pub fn risk_level(tier: Tier, score: u8) -> RiskLevel {
    match tier {
        Tier::Healthy if score > 35 => RiskLevel::Low,
        Tier::Healthy => RiskLevel::VeryLow,
        Tier::Disease if score > 85 => RiskLevel::Critical,
        Tier::Disease if score > 75 => RiskLevel::High,
        Tier::Disease => RiskLevel::Elevated,
        Tier::Unknown if score > 60 => RiskLevel::Medium,
        Tier::Unknown => RiskLevel::LowMedium,
    }
}

/// Coil is derived from the other two so the composition always sums to 100.
pub fn draw_structure<R: Rng + ?Sized>(rng: &mut R) -> StructureComposition {
    let alpha_helix: u8 = rng.gen_range(20..60);
    let beta_sheet: u8 = rng.gen_range(0..80 - alpha_helix);

    StructureComposition {
        alpha_helix,
        beta_sheet,
        random_coil: 100 - alpha_helix - beta_sheet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn classifier() -> RiskClassifier {
        RiskClassifier::from_config(&EngineConfig::default())
    }

    #[test]
    fn tiers_follow_keyword_lists() {
        let c = classifier();
        assert_eq!(c.tier_of("Whey Protein Isolate"), Tier::Healthy);
        assert_eq!(c.tier_of("HSP70 chaperone"), Tier::Healthy);
        assert_eq!(c.tier_of("Tau protein (MAPT)"), Tier::Disease);
        assert_eq!(c.tier_of("Amyloid Beta"), Tier::Disease);
        assert_eq!(c.tier_of("XYZ-9000"), Tier::Unknown);
        assert_eq!(c.tier_of(""), Tier::Unknown);
    }

    #[test]
    fn healthy_rules_take_precedence() {
        let both = vec!["hemoglobin".to_string()];
        let c = RiskClassifier::new(&both, &both);
        assert_eq!(c.tier_of("Hemoglobin S"), Tier::Healthy);
        assert_eq!(c.rules()[0].tier, Tier::Healthy);
    }

    #[test]
    fn blank_patterns_are_ignored() {
        let c = RiskClassifier::new(&["  ".to_string()], &["tau".to_string()]);
        assert_eq!(c.rules().len(), 1);
        assert_eq!(c.tier_of("anything"), Tier::Unknown);
    }

    #[test]
    fn scores_stay_in_tier_ranges() {
        let c = classifier();
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            for (name, tier) in [
                ("whey", Tier::Healthy),
                ("huntingtin", Tier::Disease),
                ("novel thing", Tier::Unknown),
            ] {
                let out = c.classify(name, &mut rng);
                assert_eq!(out.tier, tier);
                assert!(risk_range(tier).contains(&out.misfolding_risk));
                assert_eq!(out.risk_level, risk_level(tier, out.misfolding_risk));
            }
        }
    }

    #[test]
    fn risk_level_cutoffs() {
        assert_eq!(risk_level(Tier::Healthy, 35), RiskLevel::VeryLow);
        assert_eq!(risk_level(Tier::Healthy, 36), RiskLevel::Low);
        assert_eq!(risk_level(Tier::Disease, 75), RiskLevel::Elevated);
        assert_eq!(risk_level(Tier::Disease, 76), RiskLevel::High);
        assert_eq!(risk_level(Tier::Disease, 85), RiskLevel::High);
        assert_eq!(risk_level(Tier::Disease, 86), RiskLevel::Critical);
        assert_eq!(risk_level(Tier::Unknown, 60), RiskLevel::LowMedium);
        assert_eq!(risk_level(Tier::Unknown, 61), RiskLevel::Medium);
    }

    #[test]
    fn structure_always_sums_to_100() {
        for seed in 0..2000 {
            let mut rng = StdRng::seed_from_u64(seed);
            let s = draw_structure(&mut rng);
            assert_eq!(s.total(), 100);
            assert!((20..60).contains(&s.alpha_helix));
            assert!(s.beta_sheet < 80 - s.alpha_helix);
        }
    }
}
