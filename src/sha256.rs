//! SHA-256 Digest Engine - FIPS PUB 180-4
//!
//! The hash is computed as a fixed pipeline of pure stages:
//!
//! ```text
//! encode -> pad -> split_blocks -> expand -> compress -> accumulate -> finalize
//! ```
//!
//! Each stage is exposed on its own so it can be checked in isolation, but
//! the only contract callers rely on is [`digest`]. The running hash words
//! live in a [`DigestState`] owned by a single call and dropped afterwards.

/// Block size in bytes (512 bits)
pub const BLOCK_LEN: usize = 64;

/// Digest size in bytes (256 bits)
pub const DIGEST_LEN: usize = 32;

/// Offset of the 64-bit length field inside the last block
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// SHA-256 initial hash values (H₀)
const H0: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a,
    0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// SHA-256 round constants (K)
pub const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5,
    0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3,
    0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc,
    0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7,
    0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13,
    0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3,
    0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5,
    0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208,
    0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[inline(always)]
fn sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ ((!e) & g)
}

#[inline(always)]
fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

/// Stage 1: text message to bytes (UTF-8, no re-encoding of binary input)
pub fn encode(message: &str) -> &[u8] {
    message.as_bytes()
}

/// Stage 2: append 0x80, zero-fill to 56 mod 64, append the bit length (big-endian u64)
pub fn pad(message: &[u8]) -> Vec<u8> {
    let bit_len = (message.len() as u64).wrapping_mul(8);
    let zeros = (LENGTH_OFFSET + BLOCK_LEN - (message.len() + 1) % BLOCK_LEN) % BLOCK_LEN;

    let mut padded = Vec::with_capacity(message.len() + 1 + zeros + 8);
    padded.extend_from_slice(message);
    padded.push(0x80);
    padded.resize(padded.len() + zeros, 0);
    padded.extend_from_slice(&bit_len.to_be_bytes());

    debug_assert_eq!(padded.len() % BLOCK_LEN, 0);
    padded
}

/// Stage 3: split padded bytes into 64-byte blocks, in order.
///
/// A trailing partial block is dropped, so the input must come from [`pad`].
pub fn split_blocks(padded: &[u8]) -> impl Iterator<Item = &[u8; BLOCK_LEN]> + '_ {
    padded
        .chunks_exact(BLOCK_LEN)
        .filter_map(|chunk| chunk.try_into().ok())
}

/// Stage 4: message schedule w[0..64]
pub fn expand(block: &[u8; BLOCK_LEN]) -> [u32; 64] {
    let mut w = [0u32; 64];
    for (i, word) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
    }

    for i in 16..64 {
        w[i] = w[i - 16]
            .wrapping_add(sigma0(w[i - 15]))
            .wrapping_add(w[i - 7])
            .wrapping_add(sigma1(w[i - 2]));
    }

    w
}

/// Stage 5: 64 rounds over the working variables a..h.
///
/// Returns the working variables after the last round; [`accumulate`] folds
/// them back into the hash state.
pub fn compress(state: &[u32; 8], w: &[u32; 64]) -> [u32; 8] {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for i in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(K[i])
            .wrapping_add(w[i]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    [a, b, c, d, e, f, g, h]
}

/// Stage 6: word-wise add (mod 2^32) of the working variables into the state
pub fn accumulate(state: &mut [u32; 8], working: &[u32; 8]) {
    for (word, v) in state.iter_mut().zip(working) {
        *word = word.wrapping_add(*v);
    }
}

/// Stage 7: the eight state words, big-endian
pub fn finalize(state: &[u32; 8]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

/// Running hash words for one digest computation
#[derive(Clone, Debug)]
struct DigestState {
    hash: [u32; 8],
}

impl DigestState {
    fn new() -> Self {
        DigestState { hash: H0 }
    }

    fn absorb(&mut self, block: &[u8; BLOCK_LEN]) {
        let w = expand(block);
        let working = compress(&self.hash, &w);
        accumulate(&mut self.hash, &working);
    }

    fn finish(self) -> [u8; DIGEST_LEN] {
        finalize(&self.hash)
    }
}

/// SHA-256 of `message`
pub fn digest(message: &[u8]) -> [u8; DIGEST_LEN] {
    let padded = pad(message);
    let mut state = DigestState::new();
    for block in split_blocks(&padded) {
        state.absorb(block);
    }
    state.finish()
}

/// SHA-256 of UTF-8 text
pub fn digest_str(message: &str) -> [u8; DIGEST_LEN] {
    digest(encode(message))
}

/// Compute hash chain: h_{t+1} = SHA-256(h_t)
pub fn hash_chain(start: &[u8; DIGEST_LEN], steps: u64) -> [u8; DIGEST_LEN] {
    let mut h = *start;
    for _ in 0..steps {
        h = digest(&h);
    }
    h
}
