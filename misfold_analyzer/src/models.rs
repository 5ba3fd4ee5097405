// src/models.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sequence_profile::SequenceProfile;

/// A single analysis request as sent by the front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub protein_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_sequence: Option<String>,
}

impl AnalysisRequest {
    pub fn new(protein_name: impl Into<String>) -> Self {
        Self {
            protein_name: protein_name.into(),
            protein_sequence: None,
        }
    }

    pub fn with_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.protein_sequence = Some(sequence.into());
        self
    }
}

/// Coarse classification bucket driving every synthetic value of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Healthy,
    Disease,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low Risk")]
    VeryLow,
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Low-Medium Risk")]
    LowMedium,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "Elevated Risk")]
    Elevated,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Critical Risk")]
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "Very Low Risk",
            RiskLevel::Low => "Low Risk",
            RiskLevel::LowMedium => "Low-Medium Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::Elevated => "Elevated Risk",
            RiskLevel::High => "High Risk",
            RiskLevel::Critical => "Critical Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Secondary structure percentages. The three values always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureComposition {
    pub alpha_helix: u8,
    pub beta_sheet: u8,
    pub random_coil: u8,
}

impl StructureComposition {
    pub fn total(&self) -> u16 {
        self.alpha_helix as u16 + self.beta_sheet as u16 + self.random_coil as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A claimed point mutation and its assessed impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub residue: String,
    pub position: u32,
    pub severity: Severity,
    pub confidence: f64,
    pub impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specificity {
    Excellent,
    Good,
    Moderate,
}

impl Specificity {
    pub fn from_off_targets(off_targets: u32) -> Self {
        match off_targets {
            0 => Specificity::Excellent,
            1..=2 => Specificity::Good,
            _ => Specificity::Moderate,
        }
    }
}

/// 20nt spacer plus NGG PAM for SpCas9.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideRna {
    pub sequence: String,
    pub pam: String,
    pub full_sequence: String,
    pub target_site: String,
    pub target_mutation: String,
    pub efficiency: f64,
    pub off_targets: u32,
    /// Integer percentage.
    pub gc_content: u32,
    pub specificity: Specificity,
}

/// Gene, exon and known-mutation record looked up from the protein name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneInfo {
    pub gene: String,
    pub exons: Vec<u32>,
    pub mutations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliverySystem {
    #[serde(rename = "AAV9")]
    Aav9,
    #[serde(rename = "AAV-PHP.eB")]
    AavPhpEb,
    #[serde(rename = "AAV1")]
    Aav1,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisprDesign {
    pub gene: String,
    #[serde(rename = "guideRNAs")]
    pub guide_rnas: Vec<GuideRna>,
    pub repair_template: String,
    pub delivery_system: DeliverySystem,
    pub success_probability: f64,
    pub target_mutations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalData {
    pub disease_association: String,
    pub pathogenicity: String,
    pub inheritance_pattern: String,
    pub onset_age: String,
    pub clinvar_class: String,
    pub population_frequency: String,
}

/// Report badge derived from the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoldingStatus {
    #[serde(rename = "MISFOLDED")]
    Misfolded,
    #[serde(rename = "PARTIALLY MISFOLDED")]
    PartiallyMisfolded,
    #[serde(rename = "PROPERLY FOLDED")]
    ProperlyFolded,
}

impl FoldingStatus {
    pub fn from_risk(misfolding_risk: u8) -> Self {
        if misfolding_risk >= 70 {
            FoldingStatus::Misfolded
        } else if misfolding_risk >= 50 {
            FoldingStatus::PartiallyMisfolded
        } else {
            FoldingStatus::ProperlyFolded
        }
    }
}

/// Everything the report layer reads, keyed by the field names it expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub protein_id: String,
    pub protein_name: String,
    pub tier: Tier,
    pub misfolding_risk: u8,
    pub confidence: u8,
    pub risk_level: RiskLevel,
    pub folding_status: FoldingStatus,
    pub structure: StructureComposition,
    pub hotspots: Vec<Hotspot>,
    pub crispr_design: Option<CrisprDesign>,
    pub clinical_data: ClinicalData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_profile: Option<SequenceProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_thresholds() {
        assert_eq!(Specificity::from_off_targets(0), Specificity::Excellent);
        assert_eq!(Specificity::from_off_targets(1), Specificity::Good);
        assert_eq!(Specificity::from_off_targets(2), Specificity::Good);
        assert_eq!(Specificity::from_off_targets(3), Specificity::Moderate);
    }

    #[test]
    fn folding_status_cutoffs() {
        assert_eq!(FoldingStatus::from_risk(95), FoldingStatus::Misfolded);
        assert_eq!(FoldingStatus::from_risk(70), FoldingStatus::Misfolded);
        assert_eq!(FoldingStatus::from_risk(69), FoldingStatus::PartiallyMisfolded);
        assert_eq!(FoldingStatus::from_risk(50), FoldingStatus::PartiallyMisfolded);
        assert_eq!(FoldingStatus::from_risk(49), FoldingStatus::ProperlyFolded);
    }

    #[test]
    fn wire_labels_match_report_layer() {
        assert_eq!(
            serde_json::to_string(&DeliverySystem::AavPhpEb).unwrap(),
            "\"AAV-PHP.eB\""
        );
        assert_eq!(
            serde_json::to_string(&RiskLevel::LowMedium).unwrap(),
            "\"Low-Medium Risk\""
        );
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&FoldingStatus::PartiallyMisfolded).unwrap(),
            "\"PARTIALLY MISFOLDED\""
        );
        assert_eq!(RiskLevel::Critical.to_string(), "Critical Risk");
    }

    #[test]
    fn request_accepts_missing_fields() {
        let req: AnalysisRequest = serde_json::from_str(r#"{"proteinName":"Tau"}"#).unwrap();
        assert_eq!(req.protein_name, "Tau");
        assert!(req.protein_sequence.is_none());

        let empty: AnalysisRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.protein_name, "");
    }
}
