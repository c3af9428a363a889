//! Text format for a single network's weights.
//!
//! ```text
//! 2,3,2|0.25,-0.5,0.125,...
//! ```
//!
//! The part before `|` lists the neurons per layer, input layer first. The
//! part after it lists every weight in [`Network::weights`] order. Weights are
//! written in the shortest form that parses back to the same `f32`; any
//! decimal float is accepted when reading, including fixed six-digit values
//! such as `0.250000`.

use std::fmt::Write as _;

use crate::network::Network;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FormatError {
    #[display("expected exactly one '|' separator, found {found}")]
    SeparatorCount { found: usize },
    #[display("expected {expected} layers, found {found}")]
    LayerCountMismatch { expected: usize, found: usize },
    #[display("layer {index} has {found} neurons, expected {expected}")]
    LayerSizeMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[display("invalid layer size '{token}'")]
    InvalidLayerToken { token: String },
    #[display("invalid weight #{index}: '{token}'")]
    InvalidWeightToken { index: usize, token: String },
    #[display("expected {expected} weights, found {found}")]
    WeightCountMismatch { expected: usize, found: usize },
}

/// Serializes `network` with its topology header.
#[must_use]
pub fn encode(network: &Network) -> String {
    let mut text = String::new();
    for (i, size) in network.layer_sizes().into_iter().enumerate() {
        if i > 0 {
            text.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(text, "{size}");
    }
    text.push('|');
    for (i, weight) in network.weights().enumerate() {
        if i > 0 {
            text.push(',');
        }
        let _ = write!(text, "{weight}");
    }
    text
}

/// Parses a network whose topology must equal `layer_sizes` exactly.
///
/// # Example
///
/// ```
/// use tenten_neural::codec::{self, FormatError};
///
/// let network = codec::decode("1,1,1|0.5,-0.250000", &[1, 1, 1]).unwrap();
/// assert_eq!(network.weights().collect::<Vec<_>>(), [0.5, -0.25]);
///
/// assert_eq!(
///     codec::decode("1|2|3", &[1, 1, 1]),
///     Err(FormatError::SeparatorCount { found: 2 })
/// );
/// ```
pub fn decode(text: &str, layer_sizes: &[usize]) -> Result<Network, FormatError> {
    let parts = text.trim().split('|').collect::<Vec<_>>();
    let [header, body] = parts[..] else {
        return Err(FormatError::SeparatorCount {
            found: parts.len() - 1,
        });
    };

    let found_sizes = header
        .split(',')
        .map(|token| {
            token
                .trim()
                .parse::<usize>()
                .map_err(|_| FormatError::InvalidLayerToken {
                    token: token.to_owned(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if found_sizes.len() != layer_sizes.len() {
        return Err(FormatError::LayerCountMismatch {
            expected: layer_sizes.len(),
            found: found_sizes.len(),
        });
    }
    for (index, (&found, &expected)) in found_sizes.iter().zip(layer_sizes).enumerate() {
        if found != expected {
            return Err(FormatError::LayerSizeMismatch {
                index,
                expected,
                found,
            });
        }
    }

    let weights = if body.trim().is_empty() {
        vec![]
    } else {
        body.split(',')
            .enumerate()
            .map(|(index, token)| {
                token
                    .trim()
                    .parse::<f32>()
                    .map_err(|_| FormatError::InvalidWeightToken {
                        index,
                        token: token.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let found = weights.len();
    Network::from_weights(layer_sizes, weights).ok_or(FormatError::WeightCountMismatch {
        expected: Network::weight_count(layer_sizes),
        found,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::network::tests::StubRandom;

    #[test]
    fn test_encode_stub_network() {
        let network = Network::new(&[2, 3, 2], &mut StubRandom(0.25));
        let text = encode(&network);
        assert_eq!(text, format!("2,3,2|{}", ["0.25"; 12].join(",")));
    }

    #[test]
    fn test_decode_fixed_point_weights() {
        let text = format!("2,3,2|{}", ["0.250000"; 12].join(","));
        let network = decode(&text, &[2, 3, 2]).unwrap();
        assert!(network.weights().all(|w| w == 0.25));
    }

    #[test]
    fn test_round_trip_is_bit_exact() {
        let mut rng = Pcg32::seed_from_u64(21);
        let network = Network::new(&[7, 5, 3], &mut rng);
        let decoded = decode(&encode(&network), &[7, 5, 3]).unwrap();
        assert!(
            network
                .weights()
                .zip(decoded.weights())
                .all(|(a, b)| a.to_bits() == b.to_bits())
        );
    }

    #[test]
    fn test_decode_errors() {
        let layers = [2, 3, 2];
        let weights_12 = ["0.1"; 12].join(",");
        let cases = [
            ("1|2|3".to_owned(), FormatError::SeparatorCount { found: 2 }),
            ("no separator".to_owned(), FormatError::SeparatorCount { found: 0 }),
            (
                format!("2,3|{weights_12}"),
                FormatError::LayerCountMismatch {
                    expected: 3,
                    found: 2,
                },
            ),
            (
                format!("2,3,3|{weights_12}"),
                FormatError::LayerSizeMismatch {
                    index: 2,
                    expected: 2,
                    found: 3,
                },
            ),
            (
                format!("2,x,2|{weights_12}"),
                FormatError::InvalidLayerToken {
                    token: "x".to_owned(),
                },
            ),
            (
                "2,3,2|0.1,0.1,abc".to_owned(),
                FormatError::InvalidWeightToken {
                    index: 2,
                    token: "abc".to_owned(),
                },
            ),
            (
                "2,3,2|0.1,0.1".to_owned(),
                FormatError::WeightCountMismatch {
                    expected: 12,
                    found: 2,
                },
            ),
            (
                format!("2,3,2|{weights_12},0.1"),
                FormatError::WeightCountMismatch {
                    expected: 12,
                    found: 13,
                },
            ),
            (
                "2,3,2|".to_owned(),
                FormatError::WeightCountMismatch {
                    expected: 12,
                    found: 0,
                },
            ),
        ];
        for (text, expected) in cases {
            assert_eq!(decode(&text, &layers), Err(expected), "{text}");
        }
    }

    #[test]
    fn test_decode_accepts_trailing_newline() {
        let text = format!("1,2,1|{}\n", ["-1"; 4].join(","));
        let network = decode(&text, &[1, 2, 1]).unwrap();
        assert!(network.weights().all(|w| w == -1.0));
    }
}
