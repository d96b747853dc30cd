//! Seeded random source for carving.
//!
//! `AdditiveRng` produces the same sequence as the classic `srand`/`rand`
//! pair of the GNU C library, so a seed names the same maze everywhere that
//! generator is used. Outputs are 31-bit.

use rand::{Error, RngCore, SeedableRng};

const STATE_WORDS: usize = 31;
const SEPARATION: usize = 3;
const WARMUP_ROUNDS: usize = 310;

#[derive(Debug, Clone)]
pub struct AdditiveRng {
    state: [u32; STATE_WORDS],
    front: usize,
    rear: usize,
}

impl AdditiveRng {
    pub fn new(seed: u32) -> Self {
        let seed = if seed == 0 { 1 } else { seed };
        let mut state = [0u32; STATE_WORDS];
        state[0] = seed;

        // Park-Miller minimal standard, computed with Schrage's method on the
        // seed reinterpreted as a signed 32-bit word.
        let mut word = i64::from(seed as i32);
        for slot in state.iter_mut().skip(1) {
            let hi = word / 127_773;
            let lo = word % 127_773;
            word = 16_807 * lo - 2_836 * hi;
            if word < 0 {
                word += 2_147_483_647;
            }
            *slot = word as u32;
        }

        let mut rng = Self {
            state,
            front: SEPARATION,
            rear: 0,
        };
        for _ in 0..WARMUP_ROUNDS {
            rng.step();
        }
        rng
    }

    fn step(&mut self) -> u32 {
        let sum = self.state[self.front].wrapping_add(self.state[self.rear]);
        self.state[self.front] = sum;
        self.front = (self.front + 1) % STATE_WORDS;
        self.rear = (self.rear + 1) % STATE_WORDS;
        sum >> 1
    }
}

impl RngCore for AdditiveRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_u32());
        let high = u64::from(self.next_u32());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for AdditiveRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}
