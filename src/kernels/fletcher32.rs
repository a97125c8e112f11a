//! This module contains the Fletcher-32 integrity checksum.
//!
//! Naming of Fletcher variants is not consistent across implementations. This one
//! uses 16-bit input words, two 32-bit accumulators, blocks of 360 words and a
//! modulus of 65_535. Other "Fletcher-32" implementations that differ in block
//! size or modulus are not interchangeable with it.
//!
//! The buffer is viewed as native-endian halfwords, the same view as
//! reinterpreting the in-memory sample array as `u16`.

use crate::error::SmoothpackError;

/// Largest number of halfword additions into a 32-bit accumulator that cannot
/// overflow before the modular reduction.
pub const BLOCK_SIZE: usize = 360;

/// Modulus applied to both accumulators after every block.
pub const MODULUS: u32 = 65_535;

/// Streaming Fletcher-32 state.
///
/// Feeding the input in any number of `update` calls yields the same checksum as
/// [`fletcher32_halfwords`] over the concatenation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fletcher32 {
    c0: u32,
    c1: u32,
    /// Halfwords consumed since the last reduction.
    in_block: usize,
}

impl Fletcher32 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u16]) {
        let mut rest = data;
        while !rest.is_empty() {
            let take = (BLOCK_SIZE - self.in_block).min(rest.len());
            let (block, tail) = rest.split_at(take);
            for &d in block {
                self.c0 += u32::from(d);
                self.c1 += self.c0;
            }
            self.in_block += take;
            if self.in_block == BLOCK_SIZE {
                self.reduce();
            }
            rest = tail;
        }
    }

    /// Returns `(c1 << 16) | c0` after reducing any partial final block.
    pub fn finish(&self) -> u32 {
        let mut state = *self;
        if state.in_block > 0 {
            state.reduce();
        }
        (state.c1 << 16) | state.c0
    }

    fn reduce(&mut self) {
        self.c0 %= MODULUS;
        self.c1 %= MODULUS;
        self.in_block = 0;
    }
}

/// Computes the Fletcher-32 checksum of a sequence of halfwords.
pub fn fletcher32_halfwords(data: &[u16]) -> u32 {
    let mut c0: u32 = 0;
    let mut c1: u32 = 0;
    for block in data.chunks(BLOCK_SIZE) {
        for &d in block {
            c0 += u32::from(d);
            c1 += c0;
        }
        c0 %= MODULUS;
        c1 %= MODULUS;
    }
    (c1 << 16) | c0
}

/// Computes the Fletcher-32 checksum of a raw byte buffer.
///
/// # Errors
/// `InvalidArgument` if the byte length is odd, since the buffer cannot then be
/// viewed as halfwords.
pub fn fletcher32_bytes(bytes: &[u8]) -> Result<u32, SmoothpackError> {
    if bytes.len() % 2 != 0 {
        return Err(SmoothpackError::InvalidArgument(format!(
            "Fletcher-32 needs an even number of bytes, got {}",
            bytes.len()
        )));
    }
    let mut state = Fletcher32::new();
    let mut block = [0u16; BLOCK_SIZE];
    for chunk in bytes.chunks(2 * BLOCK_SIZE) {
        let words = chunk.len() / 2;
        for (slot, pair) in block.iter_mut().zip(chunk.chunks_exact(2)) {
            *slot = u16::from_ne_bytes([pair[0], pair[1]]);
        }
        state.update(&block[..words]);
    }
    Ok(state.finish())
}

/// Computes the Fletcher-32 checksum of any plain-old-data buffer by viewing its
/// memory as halfwords.
///
/// # Errors
/// `InvalidArgument` if the total byte length is odd (e.g. an odd number of `u8`).
pub fn fletcher32<T: bytemuck::Pod>(data: &[T]) -> Result<u32, SmoothpackError> {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    match bytemuck::try_cast_slice::<u8, u16>(bytes) {
        Ok(halfwords) => Ok(fletcher32_halfwords(halfwords)),
        // Odd length or a misaligned byte buffer: fall back to the copying path.
        Err(_) => fletcher32_bytes(bytes),
    }
}
