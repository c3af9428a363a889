use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tenten_neural::GenerationSummary;
use tenten_training::TrainingConfig;

/// JSON summary written at the end of `train`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TrainingReport {
    pub trained_at: DateTime<Utc>,
    pub config: TrainingConfig,
    pub layer_sizes: Vec<usize>,
    pub generations_completed: usize,
    pub best_fitness: f32,
    pub saved_to: Option<PathBuf>,
    pub history: Vec<GenerationRecord>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct GenerationRecord {
    pub generation: usize,
    pub max: f32,
    pub mean: f32,
    pub median: f32,
    pub min: f32,
    pub std_dev: f32,
}

impl From<&GenerationSummary> for GenerationRecord {
    fn from(summary: &GenerationSummary) -> Self {
        let fitness = summary.fitness;
        Self {
            generation: summary.generation,
            max: fitness.max,
            mean: fitness.mean,
            median: fitness.median,
            min: fitness.min,
            std_dev: fitness.std_dev,
        }
    }
}
