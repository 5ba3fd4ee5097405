// src/config.rs

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::GeneInfo;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "MISFOLD_CONFIG";

/// Artificial latency before each local analysis, mirroring the demo service.
pub const DEFAULT_LATENCY_MS: u64 = 2000;

const HEALTHY_NAMES: &[&str] = &[
    // Protein supplements
    "whey", "casein", "soy protein", "pea protein", "egg protein",
    "muscleblaze", "biozyme", "optimum nutrition", "myprotein",
    "protein supplement", "bcaa", "collagen", "albumin",
    // Normal body proteins
    "hemoglobin", "myoglobin", "keratin", "actin", "myosin",
    "immunoglobulin", "antibody", "enzyme", "hormone",
    // Chaperones
    "heat shock protein", "hsp", "hsp70", "hsp90", "hsp60", "hsp40",
    "chaperone", "chaperonin", "groel", "groes", "dnaj", "dnak",
    "calnexin", "calreticulin", "bip", "grp78", "grp94",
    // Structural
    "tubulin", "fibrin", "elastin", "laminin", "fibronectin",
    // Transport
    "transferrin", "ferritin", "ceruloplasmin",
    // Metabolic enzymes
    "catalase", "superoxide dismutase", "peroxidase", "kinase",
    "phosphatase", "dehydrogenase", "synthase", "lyase",
];

const DISEASE_NAMES: &[&str] = &[
    "amyloid", "app", "tau", "mapt", "synuclein", "snca",
    "huntingtin", "htt", "prion", "prp", "sod1", "tdp-43",
    "fus", "ataxin", "polyglutamine",
];

/// One row of the keyword → gene table. Row order decides overlapping keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneEntry {
    pub keyword: String,
    #[serde(flatten)]
    pub info: GeneInfo,
}

fn gene_entry(keyword: &str, gene: &str, exons: &[u32], mutations: &[&str]) -> GeneEntry {
    GeneEntry {
        keyword: keyword.to_string(),
        info: GeneInfo {
            gene: gene.to_string(),
            exons: exons.to_vec(),
            mutations: mutations.iter().map(|m| m.to_string()).collect(),
        },
    }
}

fn default_gene_table() -> Vec<GeneEntry> {
    let app = ["V717I", "E693G", "A673T"];
    let mapt = ["P301L", "R406W", "V337M"];
    let snca = ["A53T", "A30P", "E46K"];
    let prnp = ["D178N", "E200K", "V210I"];

    vec![
        gene_entry("amyloid", "APP", &[16, 17], &app),
        gene_entry("app", "APP", &[16, 17], &app),
        gene_entry("tau", "MAPT", &[9, 10, 11], &mapt),
        gene_entry("mapt", "MAPT", &[9, 10, 11], &mapt),
        gene_entry("synuclein", "SNCA", &[3, 4], &snca),
        gene_entry("huntingtin", "HTT", &[1], &["CAG-repeat"]),
        gene_entry("htt", "HTT", &[1], &["CAG-repeat"]),
        gene_entry("prion", "PRNP", &[2], &prnp),
        gene_entry("prp", "PRNP", &[2], &prnp),
        gene_entry("sod1", "SOD1", &[4, 5], &["A4V", "D90A", "G93A"]),
    ]
}

/// Everything the engine needs besides its random source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub healthy_names: Vec<String>,
    pub disease_names: Vec<String>,
    pub gene_table: Vec<GeneEntry>,
    pub simulated_latency_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            healthy_names: HEALTHY_NAMES.iter().map(|s| s.to_string()).collect(),
            disease_names: DISEASE_NAMES.iter().map(|s| s.to_string()).collect(),
            gene_table: default_gene_table(),
            simulated_latency_ms: DEFAULT_LATENCY_MS,
        }
    }
}

impl EngineConfig {
    /// Read a JSON config; missing keys fall back to the built-in tables.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading engine config from {}", path.display());

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: EngineConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `MISFOLD_CONFIG` when set, otherwise use the defaults.
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(val) => Self::load(PathBuf::from(val)),
            None => Ok(Self::default()),
        }
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.simulated_latency_ms = latency_ms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for entry in &self.gene_table {
            if entry.keyword.trim().is_empty() {
                bail!("gene table entry for {} has an empty keyword", entry.info.gene);
            }
            if entry.info.exons.is_empty() {
                bail!("gene table entry '{}' lists no exons", entry.keyword);
            }
            if entry.info.mutations.is_empty() {
                bail!("gene table entry '{}' lists no mutations", entry.keyword);
            }
        }
        Ok(())
    }
}
