//! Placeholder argument scoring.
//!
//! There is no model behind the score: new arguments get a uniform random
//! value in the configured range and a canned analysis sentence.

use rand::Rng;

use crate::config::ScoringConfig;

/// Score and analysis assigned to a freshly posted argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub score: u8,
    pub analysis: String,
}

/// Assigns an [`Assessment`] to argument text.
pub trait ArgumentScorer: Send + Sync {
    fn assess(&self, content: &str) -> Assessment;
}

/// Uniform random score in `[min_score, max_score)`.
pub struct RandomScorer {
    config: ScoringConfig,
}

impl RandomScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }
}

impl ArgumentScorer for RandomScorer {
    fn assess(&self, _content: &str) -> Assessment {
        let (min_score, max_score) = (self.config.min_score, self.config.max_score);
        let score = if min_score >= max_score {
            min_score
        } else {
            rand::thread_rng().gen_range(min_score..max_score)
        };
        Assessment {
            score,
            analysis: self.config.analysis.clone(),
        }
    }
}

/// Always returns the same assessment. Handy where scores must be predictable.
pub struct FixedScorer(pub Assessment);

impl ArgumentScorer for FixedScorer {
    fn assess(&self, _content: &str) -> Assessment {
        self.0.clone()
    }
}
