// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny deterministic generator for scattering demo points.

/// Xorshift64 generator. Not for anything but demo data.
#[derive(Clone, Debug)]
pub struct XorShift64(u64);

impl XorShift64 {
    /// Seed the generator. A zero seed is replaced, since xorshift would get stuck at zero.
    pub fn new(seed: u64) -> Self {
        Self(if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed })
    }

    /// Next raw value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// Uniform integer in `0..=max`. Returns 0 for negative `max`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The result is bounded by `max`, which is an i64."
    )]
    pub fn next_inclusive(&mut self, max: i64) -> i64 {
        if max <= 0 {
            return 0;
        }
        let span = max.unsigned_abs() + 1;
        (self.next_u64() % span) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = XorShift64::new(7);
        let mut b = XorShift64::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn bounded_values_stay_in_range() {
        let mut r = XorShift64::new(0);
        for _ in 0..1000 {
            let v = r.next_inclusive(700);
            assert!((0..=700).contains(&v));
        }
        assert_eq!(r.next_inclusive(-5), 0);
    }
}
