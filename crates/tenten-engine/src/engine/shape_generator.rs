use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Shape;

/// Deals the shapes that refill the three slots.
///
/// Each draw is independent and uniform over the 19 shapes. The generator is
/// driven by its own seeded PRNG so a game can be replayed exactly from its
/// [`ShapeSeed`].
///
/// # Example
///
/// ```
/// use tenten_engine::engine::{ShapeGenerator, ShapeSeed};
/// use rand::Rng as _;
///
/// let seed: ShapeSeed = rand::rng().random();
/// let mut first = ShapeGenerator::with_seed(seed);
/// let mut second = ShapeGenerator::with_seed(seed);
/// assert_eq!(first.draw_triple(), second.draw_triple());
/// ```
#[derive(Debug, Clone)]
pub struct ShapeGenerator {
    rng: Pcg32,
}

impl Default for ShapeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic shape generation.
///
/// A 128-bit (16-byte) seed for the generator's PRNG. It serializes as a
/// 32-character hexadecimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSeed([u8; 16]);

impl ShapeSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Expands a 64-bit number into a full seed, for command-line use.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0; 16];
        bytes[8..].copy_from_slice(&seed.to_be_bytes());
        Self(bytes)
    }
}

impl Serialize for ShapeSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for ShapeSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<ShapeSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ShapeSeed(seed)
    }
}

impl ShapeGenerator {
    /// Creates a generator seeded from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: ShapeSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    pub fn draw(&mut self) -> Shape {
        self.rng.random()
    }

    /// Draws the three shapes for slots A, B and C, in that order.
    pub fn draw_triple(&mut self) -> [Shape; 3] {
        [self.draw(), self.draw(), self.draw()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_random_seed() {
        let seed: ShapeSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: ShapeSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn test_known_value_sequential_bytes() {
        let seed = ShapeSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
    }

    #[test]
    fn test_from_u64_occupies_low_bytes() {
        let seed = ShapeSeed::from_u64(0xFF);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"000000000000000000000000000000ff\"");
    }

    #[test]
    fn test_error_invalid_hex() {
        for json in [
            "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
            "\"0123456789abcdef0123456789abcde\"",
            "\"\"",
        ] {
            let result: Result<ShapeSeed, _> = serde_json::from_str(json);
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("invalid hex"), "{json}: {err_msg}");
        }
    }

    #[test]
    fn test_deterministic_generation() {
        let seed = ShapeSeed::from_u64(42);
        let mut first = ShapeGenerator::with_seed(seed);
        let mut second = ShapeGenerator::with_seed(seed);
        for _ in 0..20 {
            assert_eq!(first.draw(), second.draw());
        }
    }
}
