//! Random source for ladder generation.
//!
//! Generation takes any `rand::Rng`; in the browser we use `SmallRng` seeded
//! either from the page (`?seed=`) or from `crypto.getRandomValues` through
//! `getrandom`. The seed is logged so a ladder can be reproduced.

use rand::SeedableRng;
use rand::rngs::SmallRng;

pub type LadderRng = SmallRng;

pub fn seeded(seed: u64) -> LadderRng {
    SmallRng::seed_from_u64(seed)
}

/// Fresh 64-bit seed from the platform entropy source. Falls back to the
/// performance clock if the entropy source is unavailable.
pub fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => clock_seed(),
    }
}

fn clock_seed() -> u64 {
    clock_bits()
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

#[cfg(target_arch = "wasm32")]
fn clock_bits() -> u64 {
    crate::canvas::performance_now().to_bits()
}

// No `window` off the browser; use the system clock.
#[cfg(not(target_arch = "wasm32"))]
fn clock_bits() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Seed to use for a game: the explicit one if given, else fresh entropy.
pub fn resolve_seed(explicit: Option<u64>) -> u64 {
    explicit.unwrap_or_else(entropy_seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        for _ in 0..64 {
            assert_eq!(a.gen_range(0..1000u32), b.gen_range(0..1000u32));
        }
    }

    #[test]
    fn clock_fallback_works_without_a_browser() {
        assert!(clock_bits() > 0);
        let seed = clock_seed();
        assert_eq!(seeded(seed).gen_range(0..1000u32), seeded(seed).gen_range(0..1000u32));
    }

    #[test]
    fn explicit_seed_wins() {
        assert_eq!(resolve_seed(Some(9)), 9);
    }
}
