// src/clinical.rs

use crate::models::{ClinicalData, Tier};

struct DiseaseRule {
    keywords: &'static [&'static str],
    association: &'static str,
    clinvar_class: &'static str,
    population_frequency: &'static str,
}

/// Checked in order against the lowercased protein name; first hit wins.
const DISEASE_RULES: &[DiseaseRule] = &[
    DiseaseRule {
        keywords: &["amyloid", "app"],
        association: "Early-Onset Alzheimer's Disease (EOAD)",
        clinvar_class: "Pathogenic",
        population_frequency: "Extremely rare (< 0.001%)",
    },
    DiseaseRule {
        keywords: &["tau", "mapt"],
        association: "Frontotemporal Dementia (FTD) / Alzheimer's Disease",
        clinvar_class: "Pathogenic",
        population_frequency: "Very rare (< 0.005%)",
    },
    DiseaseRule {
        keywords: &["synuclein", "snca"],
        association: "Parkinson's Disease (PD)",
        clinvar_class: "Pathogenic",
        population_frequency: "Rare (< 0.01%)",
    },
    DiseaseRule {
        keywords: &["huntingtin", "htt"],
        association: "Huntington's Disease (HD)",
        clinvar_class: "Pathogenic",
        population_frequency: "Rare (varies by CAG repeat length)",
    },
    DiseaseRule {
        keywords: &["insulin"],
        association: "Diabetes Mellitus / Insulin-Related Disorders",
        clinvar_class: "Likely Pathogenic",
        population_frequency: "Uncommon (0.01-0.1%)",
    },
    DiseaseRule {
        keywords: &["prion", "prp"],
        association: "Creutzfeldt-Jakob Disease (CJD) / Prion Diseases",
        clinvar_class: "Pathogenic",
        population_frequency: "Very rare (< 0.0001%)",
    },
    DiseaseRule {
        keywords: &["sod1"],
        association: "Amyotrophic Lateral Sclerosis (ALS)",
        clinvar_class: "Pathogenic",
        population_frequency: "Rare (< 0.01%)",
    },
];

fn matching_rule(protein_name: &str) -> Option<&'static DiseaseRule> {
    let name = protein_name.to_lowercase();
    DISEASE_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| name.contains(k)))
}

/// Clinical summary for a classified protein.
///
/// Healthy proteins never consult the disease table. Disease-tier names with
/// no table entry are reported as `<name>-Related Disorder`.
pub fn clinical_data(tier: Tier, protein_name: &str) -> ClinicalData {
    let (inheritance, onset) = match tier {
        Tier::Disease => ("Autosomal Dominant", "45-55 years"),
        _ => ("N/A", "N/A"),
    };
    let pathogenicity = match tier {
        Tier::Healthy => "Benign",
        Tier::Disease => "Pathogenic",
        Tier::Unknown => "Uncertain Significance",
    };

    let (association, clinvar_class, frequency) = match (tier, matching_rule(protein_name)) {
        (Tier::Healthy, _) => (
            "No disease association (Healthy protein)".to_string(),
            "Benign",
            "Common (normal variant)",
        ),
        (_, Some(rule)) => (
            rule.association.to_string(),
            rule.clinvar_class,
            rule.population_frequency,
        ),
        (Tier::Disease, None) => (
            format!("{}-Related Disorder", protein_name),
            "Uncertain Significance",
            "Frequency varies",
        ),
        (Tier::Unknown, None) => (
            "Unknown - Requires further investigation".to_string(),
            "Uncertain Significance",
            "Frequency varies",
        ),
    };

    ClinicalData {
        disease_association: association,
        pathogenicity: pathogenicity.to_string(),
        inheritance_pattern: inheritance.to_string(),
        onset_age: onset.to_string(),
        clinvar_class: clinvar_class.to_string(),
        population_frequency: frequency.to_string(),
    }
}
