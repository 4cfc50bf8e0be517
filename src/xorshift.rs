// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A tiny xorshift64 generator.  Every render worker owns one of
//! these, so nothing here is shared or locked.

use rand::{Error, RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

// Any non-zero value will do; zero is an absorbing state for xorshift.
const FALLBACK_STATE: u64 = 0x2545_F491_4F6C_DD1D;

/// Xorshift64 with the (13, 7, 17) shift triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShift64 {
    state: u64,
}

/// One round of splitmix64, used to spread seeds that differ only in
/// a few low bits across the whole word.
pub fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A seed taken from the wall clock.
pub fn clock_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs().wrapping_mul(1_000_000_000) ^ u64::from(d.subsec_nanos()),
        Err(_) => FALLBACK_STATE,
    }
}

impl XorShift64 {
    /// Starts a generator at exactly `state`, substituting a fixed
    /// constant if `state` is zero.
    pub fn new(state: u64) -> Self {
        XorShift64 {
            state: if state == 0 { FALLBACK_STATE } else { state },
        }
    }

    /// The generator for a given worker of a render seeded with
    /// `seed`.  Distinct workers always land on distinct states.
    pub fn for_worker(seed: u64, worker: usize) -> Self {
        let mixed = (worker as u64).wrapping_add(1).wrapping_mul(GOLDEN_GAMMA);
        XorShift64::new(splitmix64(seed ^ mixed))
    }

    /// The current internal state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advances the state and returns it.
    #[inline]
    pub fn next_state(&mut self) -> u64 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.state = s;
        s
    }

    /// A uniform value in [0, 1), built from the upper 63 bits of the
    /// state.
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        (self.next_state() >> 1) as f64 / (1u64 << 63) as f64
    }
}

impl RngCore for XorShift64 {
    fn next_u32(&mut self) -> u32 {
        (self.next_state() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_state()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_state().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        XorShift64::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        XorShift64::new(splitmix64(state))
    }
}
