// src/crispr_design.rs

use rand::Rng;
use tracing::debug;

use crate::config::{EngineConfig, GeneEntry};
use crate::models::{CrisprDesign, DeliverySystem, GeneInfo, GuideRna, Hotspot, Specificity, Tier};
use crate::sequence::{
    efficiency_for_gc, gc_content, mutation_specific_sequence, off_targets_for_gc, pam,
    realistic_sequence, round2, GUIDE_LENGTH,
};

const MAX_GUIDES: usize = 2;
const DEFAULT_EXON: u32 = 5;
const REPAIR_ARM_LENGTH: usize = 20;

/// Checked in order; brain-penetrating capsid wins over the muscle one.
const DELIVERY_RULES: &[(&[&str], DeliverySystem)] = &[
    (
        &["brain", "neuro", "amyloid", "tau", "synuclein"],
        DeliverySystem::AavPhpEb,
    ),
    (&["muscle", "sod1"], DeliverySystem::Aav1),
];

#[derive(Debug, Clone)]
pub struct GuideRnaDesigner {
    gene_table: Vec<GeneEntry>,
}

impl GuideRnaDesigner {
    pub fn new(gene_table: Vec<GeneEntry>) -> Self {
        Self { gene_table }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.gene_table.clone())
    }

    /// First table row whose keyword occurs in the name wins.
    pub fn lookup_gene(&self, protein_name: &str) -> GeneInfo {
        let name = protein_name.to_lowercase();
        self.gene_table
            .iter()
            .find(|entry| name.contains(&entry.keyword.to_lowercase()))
            .map(|entry| entry.info.clone())
            .unwrap_or_else(|| fallback_gene_info(protein_name))
    }

    /// `None` for healthy proteins or when there is nothing to target.
    pub fn design<R: Rng + ?Sized>(
        &self,
        hotspots: &[Hotspot],
        protein_name: &str,
        tier: Tier,
        rng: &mut R,
    ) -> Option<CrisprDesign> {
        if tier == Tier::Healthy || hotspots.is_empty() {
            return None;
        }

        let gene_info = self.lookup_gene(protein_name);
        debug!("Designing guides for {} against {}", protein_name, gene_info.gene);

        let mut guide_rnas: Vec<GuideRna> = hotspots
            .iter()
            .take(MAX_GUIDES)
            .enumerate()
            .map(|(i, hotspot)| guide_rna(&hotspot.residue, target_exon(&gene_info, i), rng))
            .collect();

        if guide_rnas.is_empty() {
            guide_rnas.push(guide_rna("Default", target_exon(&gene_info, 0), rng));
        }

        Some(CrisprDesign {
            success_probability: success_probability(&guide_rnas),
            repair_template: repair_template(rng),
            delivery_system: delivery_system(protein_name),
            gene: gene_info.gene,
            guide_rnas,
            target_mutations: gene_info.mutations,
        })
    }
}

/// Synthesized record for names missing from the gene table.
pub fn fallback_gene_info(protein_name: &str) -> GeneInfo {
    let first_word = protein_name.split(' ').next().unwrap_or_default();
    GeneInfo {
        gene: first_word.to_uppercase(),
        exons: vec![DEFAULT_EXON],
        mutations: vec!["Unknown".to_string()],
    }
}

fn target_exon(gene_info: &GeneInfo, index: usize) -> u32 {
    if gene_info.exons.is_empty() {
        return DEFAULT_EXON;
    }
    gene_info.exons[index % gene_info.exons.len()]
}

pub fn guide_rna<R: Rng + ?Sized>(mutation: &str, exon: u32, rng: &mut R) -> GuideRna {
    let sequence = mutation_specific_sequence(mutation, GUIDE_LENGTH, rng);
    let gc = gc_content(&sequence);
    let efficiency = efficiency_for_gc(gc, rng);
    let off_targets = off_targets_for_gc(gc, rng);
    let pam = pam(rng);

    GuideRna {
        full_sequence: format!("{}{}", sequence, pam),
        sequence,
        pam,
        target_site: format!("Exon {}", exon),
        target_mutation: mutation.to_string(),
        efficiency: round2(efficiency),
        off_targets,
        gc_content: (gc * 100.0).round() as u32,
        specificity: Specificity::from_off_targets(off_targets),
    }
}

pub fn delivery_system(protein_name: &str) -> DeliverySystem {
    let name = protein_name.to_lowercase();
    DELIVERY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| name.contains(k)))
        .map(|(_, system)| *system)
        .unwrap_or(DeliverySystem::Aav9)
}

/// `avg(efficiency) * 0.7 + (1 - avg(offTargets) / 10) * 0.3`, clamped to
/// [0, 1] and rounded to two decimals.
pub fn success_probability(guides: &[GuideRna]) -> f64 {
    if guides.is_empty() {
        return 0.0;
    }
    let n = guides.len() as f64;
    let avg_efficiency = guides.iter().map(|g| g.efficiency).sum::<f64>() / n;
    let avg_off_targets = guides.iter().map(|g| g.off_targets as f64).sum::<f64>() / n;

    let probability = avg_efficiency * 0.7 + (1.0 - avg_off_targets / 10.0) * 0.3;
    round2(probability.clamp(0.0, 1.0))
}

/// Two independent 20nt homology arms.
pub fn repair_template<R: Rng + ?Sized>(rng: &mut R) -> String {
    let left = realistic_sequence(REPAIR_ARM_LENGTH, rng);
    let right = realistic_sequence(REPAIR_ARM_LENGTH, rng);
    left + &right
}
