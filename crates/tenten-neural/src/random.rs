//! Source of uniform random numbers for weight initialization and mutation.

use rand::Rng;

/// Uniform `f32` draws in a half-open range.
///
/// Every [`rand::Rng`] implements this trait, so `Pcg32`, `StdRng` or
/// `rand::rng()` can be passed wherever a `RandomSource` is expected. Tests
/// implement it directly to pin the drawn values.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use tenten_neural::RandomSource as _;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(5);
/// let v = rng.next_range(-1.0, 1.0);
/// assert!((-1.0..1.0).contains(&v));
/// ```
pub trait RandomSource {
    /// Returns a value in `[min, max)`.
    ///
    /// # Panics
    ///
    /// Panics if `max < min`.
    fn next_range(&mut self, min: f32, max: f32) -> f32;
}

impl<R> RandomSource for R
where
    R: Rng + ?Sized,
{
    fn next_range(&mut self, min: f32, max: f32) -> f32 {
        assert!(max >= min, "invalid range: max ({max}) < min ({min})");
        min + (max - min) * self.random::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_values_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..10_000 {
            let v = rng.next_range(2.0, 5.0);
            assert!((2.0..5.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(rng.next_range(3.0, 3.0), 3.0);
    }

    #[test]
    #[should_panic(expected = "invalid range")]
    fn test_reversed_range_panics() {
        let mut rng = Pcg32::seed_from_u64(1);
        let _ = rng.next_range(1.0, 0.0);
    }
}
