use crate::advisor::{Advisor, NimSumAdvisor, RandomAdvisor};
use crate::board::{Piles, Player};
use crate::error::NimError;
use crate::search::alphabeta::SearchParams;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisorKind {
    #[default]
    None,
    NimSum,
    Random,
}

impl FromStr for AdvisorKind {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Self, NimError> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" => Ok(AdvisorKind::None),
            "nim-sum" | "nimsum" => Ok(AdvisorKind::NimSum),
            "random" => Ok(AdvisorKind::Random),
            other => Err(NimError::InvalidConfiguration { reason: format!("unknown advisor '{other}'") }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub use_tt: bool,
    pub use_pruning: bool,
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let p = SearchParams::default();
        Self { use_tt: p.use_tt, use_pruning: p.use_pruning, threads: p.threads }
    }
}

impl From<SearchConfig> for SearchParams {
    fn from(c: SearchConfig) -> Self {
        SearchParams { use_tt: c.use_tt, use_pruning: c.use_pruning, threads: c.threads.max(1) }
    }
}

/// Settings for one interactive game. Every field has a default, so a
/// config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub piles: Piles,
    pub first: Player,
    pub human: Player,
    pub advisor: AdvisorKind,
    pub seed: u64,
    pub search: SearchConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            piles: Piles::new(vec![3, 4, 5]),
            first: Player::One,
            human: Player::Two,
            advisor: AdvisorKind::None,
            seed: 42,
            search: SearchConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.piles.is_cleared() {
            bail!("starting position {} has no objects to take", self.piles);
        }
        Ok(())
    }

    pub fn search_params(&self) -> SearchParams { self.search.into() }

    pub fn build_advisor(&self) -> Option<Box<dyn Advisor>> {
        match self.advisor {
            AdvisorKind::None => None,
            AdvisorKind::NimSum => Some(Box::new(NimSumAdvisor)),
            AdvisorKind::Random => Some(Box::new(RandomAdvisor::new(self.seed))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{ "piles": [7, 5, 3, 1], "advisor": "nim-sum" }"#).unwrap();
        assert_eq!(cfg.piles, Piles::new(vec![7, 5, 3, 1]));
        assert_eq!(cfg.advisor, AdvisorKind::NimSum);
        assert_eq!(cfg.first, Player::One);
        assert_eq!(cfg.search, SearchConfig::default());
        assert!(cfg.build_advisor().is_some());
    }

    #[test]
    fn empty_board_is_rejected() {
        let cfg = GameConfig { piles: Piles::new(vec![0, 0]), ..GameConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("nimbot_cfg_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "piles": [1, 2], "human": "One" }"#).unwrap();
        let cfg = GameConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.human, Player::One);
        assert_eq!(cfg.piles, Piles::new(vec![1, 2]));
    }
}
