use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tenten_engine::GameState;
use tenten_neural::{ConfigError, GenerationSummary, NetworkManager};

use crate::{
    config::TrainingConfig,
    control::{self, OUTPUT_COUNT},
    features::FEATURE_COUNT,
    fitness::FitnessPolicy,
};

/// Pairs every network of a population with its own game.
///
/// Each [`tick`](Self::tick) lets every network that is still playing make
/// one move. When all games are over, [`step`](Self::step) starts fresh
/// games and moves the population to the next generation.
///
/// # Example
///
/// ```
/// use tenten_training::{Arena, TrainingConfig};
///
/// let config = TrainingConfig {
///     hidden_layers: vec![8],
///     seed: Some(1),
///     ..TrainingConfig::default()
/// };
/// let mut arena = Arena::new(&config)?;
/// while arena.generation() < 2 {
///     arena.step();
/// }
/// # Ok::<(), tenten_neural::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct Arena {
    manager: NetworkManager,
    games: Vec<GameState>,
    fitness_policy: FitnessPolicy,
    rng: Pcg32,
}

impl Arena {
    pub fn new(config: &TrainingConfig) -> Result<Self, ConfigError> {
        let mut rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        let manager = NetworkManager::new(
            FEATURE_COUNT,
            OUTPUT_COUNT,
            &config.hidden_layers,
            config.population,
            &mut rng,
        )?
        .with_mutation_policy(config.mutation);
        let mut arena = Self {
            games: Vec::with_capacity(manager.population_size()),
            manager,
            fitness_policy: config.fitness,
            rng,
        };
        arena.reset_population();
        Ok(arena)
    }

    #[must_use]
    pub fn manager(&self) -> &NetworkManager {
        &self.manager
    }

    /// Gives access to the population, e.g. to save or load networks.
    pub fn manager_mut(&mut self) -> &mut NetworkManager {
        &mut self.manager
    }

    #[must_use]
    pub fn games(&self) -> &[GameState] {
        &self.games
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.manager.generation()
    }

    /// Highest fitness currently recorded in the population.
    #[must_use]
    pub fn best_fitness(&self) -> f32 {
        self.manager.best().fitness()
    }

    /// Lets every network whose game is still running make one move and
    /// records its fitness. Returns the number of moves made.
    pub fn tick(&mut self) -> usize {
        let mut moves = 0;
        for (index, game) in self.games.iter_mut().enumerate() {
            if game.is_game_over() {
                continue;
            }
            let Some(network) = self.manager.network_mut(index) else {
                continue;
            };
            let (_, result) = control::play_turn(network, game);
            network.set_fitness(self.fitness_policy.evaluate(game, &result));
            if let Err(e) = result {
                log::trace!("network {index} finished with score {}: {e}", game.score());
            }
            moves += 1;
        }
        moves
    }

    #[must_use]
    pub fn is_population_dead(&self) -> bool {
        self.games.iter().all(GameState::is_game_over)
    }

    /// Starts a new game for every network.
    pub fn reset_population(&mut self) {
        let count = self.manager.population_size();
        self.games.clear();
        self.games
            .extend((0..count).map(|_| GameState::with_seed(self.rng.random())));
    }

    /// Advances the run by one tick.
    ///
    /// If every game is over, the games are restarted and the population
    /// moves to the next generation first; the summary of the finished
    /// generation is returned in that case.
    pub fn step(&mut self) -> Option<GenerationSummary> {
        let summary = if self.is_population_dead() {
            self.reset_population();
            Some(self.manager.advance_generation(&mut self.rng))
        } else {
            None
        };
        self.tick();
        summary
    }
}
