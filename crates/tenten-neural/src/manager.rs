use std::{
    fs, io, iter,
    path::{Path, PathBuf},
};

use crate::{
    codec::{self, FormatError},
    network::{MutationPolicy, Network},
    random::RandomSource,
    stats::FitnessStats,
};

/// Smallest population the selection scheme can work with: the top three
/// networks all act as parents.
pub const MIN_POPULATION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population must hold at least {MIN_POPULATION} networks, got {population}")]
    PopulationTooSmall { population: usize },
    #[display("at least one hidden layer is required")]
    MissingHiddenLayer,
    #[display("layer {index} has no neurons")]
    EmptyLayer { index: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PersistenceError {
    #[display("invalid weight file: {_0}")]
    Format(FormatError),
    #[display("cannot access {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl PersistenceError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }
}

/// Outcome of one generation transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    /// Index of the generation that just finished.
    pub generation: usize,
    pub fitness: FitnessStats,
}

/// Owns a population of equally shaped networks and evolves it.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use tenten_neural::NetworkManager;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let mut manager = NetworkManager::new(4, 2, &[3], 10, &mut rng)?;
/// manager.set_fitness(7, 12.0);
///
/// let summary = manager.advance_generation(&mut rng);
/// assert_eq!(summary.generation, 0);
/// assert_eq!(summary.fitness.max, 12.0);
/// assert_eq!(manager.generation(), 1);
/// assert_eq!(manager.best().fitness(), 12.0);
/// # Ok::<(), tenten_neural::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NetworkManager {
    networks: Vec<Network>,
    layer_sizes: Vec<usize>,
    generation: usize,
    mutation_policy: MutationPolicy,
}

impl NetworkManager {
    /// Creates `population` random networks shaped `[input, hidden..., output]`.
    pub fn new<R>(
        input: usize,
        output: usize,
        hidden: &[usize],
        population: usize,
        rng: &mut R,
    ) -> Result<Self, ConfigError>
    where
        R: RandomSource + ?Sized,
    {
        if population < MIN_POPULATION {
            return Err(ConfigError::PopulationTooSmall { population });
        }
        if hidden.is_empty() {
            return Err(ConfigError::MissingHiddenLayer);
        }
        let layer_sizes = iter::once(input)
            .chain(hidden.iter().copied())
            .chain(iter::once(output))
            .collect::<Vec<_>>();
        if let Some(index) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(ConfigError::EmptyLayer { index });
        }

        let networks = (0..population)
            .map(|_| Network::new(&layer_sizes, rng))
            .collect();
        Ok(Self {
            networks,
            layer_sizes,
            generation: 0,
            mutation_policy: MutationPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_mutation_policy(mut self, policy: MutationPolicy) -> Self {
        self.mutation_policy = policy;
        self
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn population_size(&self) -> usize {
        self.networks.len()
    }

    #[must_use]
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    #[must_use]
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    #[must_use]
    pub fn network(&self, index: usize) -> Option<&Network> {
        self.networks.get(index)
    }

    pub fn network_mut(&mut self, index: usize) -> Option<&mut Network> {
        self.networks.get_mut(index)
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_fitness(&mut self, index: usize, fitness: f32) {
        self.networks[index].set_fitness(fitness);
    }

    /// The network with the highest fitness; the earliest one wins ties.
    #[must_use]
    pub fn best(&self) -> &Network {
        let mut best = &self.networks[0];
        for network in &self.networks[1..] {
            if network.fitness().total_cmp(&best.fitness()).is_gt() {
                best = network;
            }
        }
        best
    }

    fn sort_by_fitness(&mut self) {
        // stable: equal fitness keeps the current order
        self.networks
            .sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
    }

    /// Replaces the population with the next generation.
    ///
    /// After sorting by fitness (best first), slot `i` of the new population
    /// is filled according to `p = i / n`:
    ///
    /// - `i == 0`: the best network, moved over unchanged
    /// - `p < 0.5`: a mutant of the best network
    /// - `p < 0.8`: a mutant of the second best
    /// - `p < 0.9`: a mutant of the third best
    /// - otherwise: a fresh random network
    pub fn advance_generation<R>(&mut self, rng: &mut R) -> GenerationSummary
    where
        R: RandomSource + ?Sized,
    {
        self.sort_by_fitness();
        let summary = GenerationSummary {
            generation: self.generation,
            fitness: FitnessStats::new(self.networks.iter().map(Network::fitness))
                .unwrap_or_default(),
        };

        let n = self.networks.len();
        let offspring = (1..n)
            .map(|i| self.offspring(i, n, rng))
            .collect::<Vec<_>>();
        let elite = self.networks.swap_remove(0);
        self.networks = iter::once(elite).chain(offspring).collect();
        self.generation += 1;

        log::debug!(
            "generation {} finished: best {:.1}, mean {:.1}, median {:.1}",
            summary.generation,
            summary.fitness.max,
            summary.fitness.mean,
            summary.fitness.median,
        );
        summary
    }

    #[expect(clippy::cast_precision_loss)]
    fn offspring<R>(&self, index: usize, population: usize, rng: &mut R) -> Network
    where
        R: RandomSource + ?Sized,
    {
        let p = index as f32 / population as f32;
        let parent = if p < 0.5 {
            0
        } else if p < 0.8 {
            1
        } else if p < 0.9 {
            2
        } else {
            return Network::new(&self.layer_sizes, rng);
        };
        self.networks[parent].mutated(&self.mutation_policy, rng)
    }

    /// Writes the best network to `path`.
    ///
    /// The population keeps its order. The file is written to a temporary
    /// sibling and renamed into place, so an existing file is either fully
    /// replaced or left intact.
    pub fn save_top_performer<P>(&self, path: P) -> Result<(), PersistenceError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let top = self.best();
        write_atomically(path, codec::encode(top).as_bytes())
            .map_err(|e| PersistenceError::io(path, e))?;
        log::info!(
            "saved network with fitness {} to {}",
            top.fitness(),
            path.display()
        );
        Ok(())
    }

    /// Reads a network from `path` into the last population slot.
    ///
    /// The file's topology must match this manager's exactly. On any error the
    /// population is left untouched.
    pub fn load_into<P>(&mut self, path: P) -> Result<(), PersistenceError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
        let network = match codec::decode(&text, &self.layer_sizes) {
            Ok(network) => network,
            Err(e) => {
                log::warn!("rejected weight file {}: {e}", path.display());
                return Err(PersistenceError::Format(e));
            }
        };
        if let Some(last) = self.networks.last_mut() {
            *last = network;
        }
        log::info!("loaded network from {} into the last slot", path.display());
        Ok(())
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    let mut tmp_name = file_name.to_owned();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}
