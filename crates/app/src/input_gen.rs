//! Sample input generation.
//!
//! `--gen-sample` produces a file with mixed compressibility so the
//! compression ratio in the encode summary is worth looking at: runs of
//! one byte, text over a small alphabet, and incompressible random
//! stretches. Seeded, so a given seed always produces the same file.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of sample data from `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let mut remaining = size_bytes;
    while remaining > 0 {
        let chunk_size = remaining.min(4096);
        let chunk_type: u8 = rng.gen_range(0..10);

        match chunk_type {
            // 40% runs of a single byte
            0..=3 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(chunk_size));
            }
            // 40% text-like data over a small alphabet
            4..=7 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                for _ in 0..chunk_size {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }
            // 20% incompressible random bytes
            _ => {
                for _ in 0..chunk_size {
                    data.push(rng.gen());
                }
            }
        }

        remaining -= chunk_size;
    }

    data
}
