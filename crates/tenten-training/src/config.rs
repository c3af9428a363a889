use serde::{Deserialize, Serialize};
use tenten_neural::MutationPolicy;

use crate::fitness::FitnessPolicy;

pub const DEFAULT_POPULATION: usize = 3;
pub const DEFAULT_HIDDEN_LAYERS: [usize; 5] = [200, 230, 170, 100, 32];

/// Settings for a training run.
///
/// Every field is optional in the serialized form; missing fields take the
/// defaults below.
///
/// ```
/// use tenten_training::TrainingConfig;
///
/// let config: TrainingConfig =
///     serde_json::from_str(r#"{ "population": 12, "seed": 7 }"#).unwrap();
/// assert_eq!(config.population, 12);
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.hidden_layers, [200, 230, 170, 100, 32]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Number of networks, and of games played in parallel.
    pub population: usize,
    pub hidden_layers: Vec<usize>,
    /// Seeds every random draw of the run; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub fitness: FitnessPolicy,
    pub mutation: MutationPolicy,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population: DEFAULT_POPULATION,
            hidden_layers: DEFAULT_HIDDEN_LAYERS.to_vec(),
            seed: None,
            fitness: FitnessPolicy::default(),
            mutation: MutationPolicy::default(),
        }
    }
}
