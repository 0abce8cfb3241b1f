use serde::Deserialize;

use crate::common::constants::MAX_STEPS;
use crate::core::units::bp::PredictorKind;

const DEFAULT_PHT_SIZE: usize = 256;
const DEFAULT_BTB_SIZE: usize = 256;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_instructions: bool,

    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
}

#[derive(Debug, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_enabled")]
    pub data_forwarding: bool,

    #[serde(default = "default_predictor")]
    pub branch_predictor: String,

    #[serde(default = "default_pht_size")]
    pub pht_size: usize,

    #[serde(default = "default_btb_size")]
    pub btb_size: usize,
}

impl PipelineConfig {
    /// Maps the configured predictor name onto a counter width. Anything
    /// other than "OneBit" selects the two-bit predictor.
    pub fn predictor_kind(&self) -> PredictorKind {
        match self.branch_predictor.as_str() {
            "OneBit" => PredictorKind::OneBit,
            _ => PredictorKind::TwoBit,
        }
    }
}

fn default_max_steps() -> u32 {
    MAX_STEPS
}

fn default_enabled() -> bool {
    true
}

fn default_predictor() -> String {
    "TwoBit".to_string()
}

fn default_pht_size() -> usize {
    DEFAULT_PHT_SIZE
}

fn default_btb_size() -> usize {
    DEFAULT_BTB_SIZE
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            max_steps: default_max_steps(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            data_forwarding: true,
            branch_predictor: default_predictor(),
            pht_size: default_pht_size(),
            btb_size: default_btb_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}
