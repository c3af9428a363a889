//! Fully connected feed-forward network with `tanh` activation.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// A single cell of a layer.
///
/// `weights[k]` connects this neuron to neuron `k` of the previous layer;
/// input-layer neurons have no weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    value: f32,
    weights: Vec<f32>,
}

impl Neuron {
    fn random<R>(weight_count: usize, rng: &mut R) -> Self
    where
        R: RandomSource + ?Sized,
    {
        Self {
            value: 0.0,
            weights: (0..weight_count).map(|_| rng.next_range(-1.0, 1.0)).collect(),
        }
    }

    /// Activation left by the last forward pass.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Per-weight mutation probabilities and magnitude.
///
/// For each weight a roll `r` in `[0, 100)` is drawn. The three outcomes use
/// consecutive bands: `r < sign_flip_percent` negates the weight, the next
/// `grow_percent` grows it and the next `shrink_percent` shrinks it by a
/// random fraction of its magnitude up to `max_change_fraction`. All other
/// rolls leave the weight unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationPolicy {
    pub sign_flip_percent: f32,
    pub grow_percent: f32,
    pub shrink_percent: f32,
    pub max_change_fraction: f32,
}

impl MutationPolicy {
    pub const SIGN_FLIP_PERCENT: f32 = 2.0;
    pub const GROW_PERCENT: f32 = 3.0;
    pub const SHRINK_PERCENT: f32 = 3.0;
    pub const MAX_CHANGE_FRACTION: f32 = 0.3;

    fn mutate_weight<R>(&self, weight: f32, rng: &mut R) -> f32
    where
        R: RandomSource + ?Sized,
    {
        let roll = rng.next_range(0.0, 100.0);
        let grow_limit = self.sign_flip_percent + self.grow_percent;
        let shrink_limit = grow_limit + self.shrink_percent;
        if roll < self.sign_flip_percent {
            -weight
        } else if roll < grow_limit {
            weight + weight.abs() * rng.next_range(0.0, self.max_change_fraction)
        } else if roll < shrink_limit {
            weight - weight.abs() * rng.next_range(0.0, self.max_change_fraction)
        } else {
            weight
        }
    }
}

impl Default for MutationPolicy {
    fn default() -> Self {
        Self {
            sign_flip_percent: Self::SIGN_FLIP_PERCENT,
            grow_percent: Self::GROW_PERCENT,
            shrink_percent: Self::SHRINK_PERCENT,
            max_change_fraction: Self::MAX_CHANGE_FRACTION,
        }
    }
}

/// Layers of neurons plus the fitness assigned by the trainer.
///
/// The topology (number of layers and neurons per layer) is fixed at
/// construction. Mutation and persistence keep it unchanged.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use tenten_neural::Network;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let mut network = Network::new(&[4, 6, 2], &mut rng);
/// let output = network.forward(&[0.0, 1.0, 1.0, 0.0]);
/// assert_eq!(output.len(), 2);
/// assert!(output.iter().all(|v| (-1.0..=1.0).contains(v)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<Vec<Neuron>>,
    fitness: f32,
}

impl Network {
    /// Builds a network with the given neurons per layer, input layer first.
    ///
    /// Every weight is drawn from `rng.next_range(-1, 1)`, layer by layer and
    /// neuron by neuron.
    #[must_use]
    pub fn new<R>(layer_sizes: &[usize], rng: &mut R) -> Self
    where
        R: RandomSource + ?Sized,
    {
        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut prev_size = 0;
        for &size in layer_sizes {
            layers.push((0..size).map(|_| Neuron::random(prev_size, rng)).collect());
            prev_size = size;
        }
        Self {
            layers,
            fitness: 0.0,
        }
    }

    /// Rebuilds a network from weights listed in [`Self::weights`] order.
    ///
    /// Returns `None` if the number of weights does not match the topology.
    #[must_use]
    pub fn from_weights<I>(layer_sizes: &[usize], weights: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut weights = weights.into_iter();
        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut prev_size = 0;
        for &size in layer_sizes {
            let mut layer = Vec::with_capacity(size);
            for _ in 0..size {
                let neuron_weights = weights.by_ref().take(prev_size).collect::<Vec<_>>();
                if neuron_weights.len() != prev_size {
                    return None;
                }
                layer.push(Neuron {
                    value: 0.0,
                    weights: neuron_weights,
                });
            }
            layers.push(layer);
            prev_size = size;
        }
        if weights.next().is_some() {
            return None;
        }
        Some(Self {
            layers,
            fitness: 0.0,
        })
    }

    /// Total number of weights of a network with the given topology.
    #[must_use]
    pub fn weight_count(layer_sizes: &[usize]) -> usize {
        layer_sizes.windows(2).map(|w| w[0] * w[1]).sum()
    }

    #[must_use]
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    #[must_use]
    pub fn layers(&self) -> &[Vec<Neuron>] {
        &self.layers
    }

    /// Iterates over all weights: each layer after the input, each neuron,
    /// each incoming connection.
    pub fn weights(&self) -> impl Iterator<Item = f32> + '_ {
        self.layers
            .iter()
            .flatten()
            .flat_map(|neuron| neuron.weights.iter().copied())
    }

    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f32) {
        self.fitness = fitness;
    }

    /// Runs the network on `input` and returns the output layer activations.
    ///
    /// Each neuron sums `weight * previous activation` in `f32` and applies
    /// `tanh`. Activations are kept in the neurons until the next pass.
    ///
    /// # Panics
    ///
    /// Panics if the network has fewer than three layers or if `input` does
    /// not match the size of the input layer.
    pub fn forward(&mut self, input: &[f32]) -> Vec<f32> {
        assert!(
            self.layers.len() >= 3,
            "network needs an input, a hidden and an output layer, got {} layers",
            self.layers.len()
        );
        assert_eq!(
            self.layers[0].len(),
            input.len(),
            "input length does not match the input layer"
        );

        for (neuron, &value) in self.layers[0].iter_mut().zip(input) {
            neuron.value = value;
        }
        for index in 1..self.layers.len() {
            let (done, rest) = self.layers.split_at_mut(index);
            let prev = &done[index - 1];
            for neuron in &mut rest[0] {
                let sum = neuron
                    .weights
                    .iter()
                    .zip(prev)
                    .fold(0.0_f32, |acc, (w, p)| acc + w * p.value);
                neuron.value = activate(sum);
            }
        }

        self.layers
            .last()
            .map(|layer| layer.iter().map(Neuron::value).collect())
            .unwrap_or_default()
    }

    /// Returns a mutated copy with fitness reset to zero.
    #[must_use]
    pub fn mutated<R>(&self, policy: &MutationPolicy, rng: &mut R) -> Self
    where
        R: RandomSource + ?Sized,
    {
        let layers = self
            .layers
            .iter()
            .map(|layer| {
                layer
                    .iter()
                    .map(|neuron| Neuron {
                        value: 0.0,
                        weights: neuron
                            .weights
                            .iter()
                            .map(|&w| policy.mutate_weight(w, rng))
                            .collect(),
                    })
                    .collect()
            })
            .collect();
        Self {
            layers,
            fitness: 0.0,
        }
    }
}

#[expect(clippy::cast_possible_truncation)]
fn activate(sum: f32) -> f32 {
    f64::from(sum).tanh() as f32
}
