// src/engine.rs

use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::classifier::RiskClassifier;
use crate::clinical::clinical_data;
use crate::config::EngineConfig;
use crate::crispr_design::GuideRnaDesigner;
use crate::hotspots;
use crate::models::{AnalysisRequest, AnalysisResult, FoldingStatus};
use crate::sequence_profile::SequenceProfile;

/// Rule-based misfolding analysis service.
///
/// Holds its keyword tables and random source; every call to [`analyze`]
/// builds an independent result from the request and fresh draws.
///
/// [`analyze`]: AnalysisEngine::analyze
pub struct AnalysisEngine<R: Rng = StdRng> {
    classifier: RiskClassifier,
    designer: GuideRnaDesigner,
    latency: Duration,
    rng: R,
}

impl AnalysisEngine<StdRng> {
    /// Reproducible engine for tests and the `--seed` flag.
    pub fn seeded(config: &EngineConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: &EngineConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> AnalysisEngine<R> {
    pub fn new(config: &EngineConfig, rng: R) -> Self {
        Self {
            classifier: RiskClassifier::from_config(config),
            designer: GuideRnaDesigner::from_config(config),
            latency: Duration::from_millis(config.simulated_latency_ms),
            rng,
        }
    }

    /// Waits out the simulated service latency, then evaluates the request.
    pub fn analyze(&mut self, request: &AnalysisRequest) -> AnalysisResult {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        self.evaluate(request)
    }

    /// Same as [`AnalysisEngine::analyze`] without the artificial delay.
    pub fn evaluate(&mut self, request: &AnalysisRequest) -> AnalysisResult {
        let name = request.protein_name.as_str();

        let classification = self.classifier.classify(name, &mut self.rng);
        let tier = classification.tier;
        let hotspots = hotspots::generate(tier, &mut self.rng);
        let crispr_design = self.designer.design(&hotspots, name, tier, &mut self.rng);
        let confidence = self.rng.gen_range(80..=100);

        let sequence_profile = request
            .protein_sequence
            .as_deref()
            .and_then(SequenceProfile::from_sequence);

        info!(
            "Analysis of '{}' complete: tier={:?}, risk={}, hotspots={}",
            name,
            tier,
            classification.misfolding_risk,
            hotspots.len()
        );

        AnalysisResult {
            protein_id: request.protein_name.clone(),
            protein_name: request.protein_name.clone(),
            tier,
            misfolding_risk: classification.misfolding_risk,
            confidence,
            risk_level: classification.risk_level,
            folding_status: FoldingStatus::from_risk(classification.misfolding_risk),
            structure: classification.structure,
            hotspots,
            crispr_design,
            clinical_data: clinical_data(tier, name),
            sequence_profile,
        }
    }
}
