//! Rule-based protein misfolding analysis with synthetic CRISPR guide design.
//!
//! [`AnalysisEngine`] classifies a protein name into a risk tier, draws a risk
//! score and structure composition, reports hotspots, and designs guide RNAs
//! for non-healthy proteins. [`RemoteAnalyzer`] forwards requests to an
//! analysis service and falls back to the engine when it is unavailable.

pub mod api_handler;
pub mod classifier;
pub mod clinical;
pub mod config;
pub mod crispr_design;
pub mod engine;
pub mod hotspots;
pub mod models;
pub mod sequence;
pub mod sequence_profile;

pub use api_handler::{Analysis, RemoteAnalyzer};
pub use config::EngineConfig;
pub use engine::AnalysisEngine;
pub use models::{AnalysisRequest, AnalysisResult, Tier};
