//! Deterministic sample jitter
//!
//! Stochastic supersampling without a random number generator: each grid
//! point hashes its own coordinates into a small offset. The same point
//! always gets the same offset, so output is reproducible and the hash
//! can be evaluated from any thread.

use super::types::Sample;

/// Coarse quantization applied before hashing. Independent of `r_shift`.
const JITTER_QUANT_SHIFT: u32 = 4;

/// Bit offset of the high coordinate inside a packed 40-bit word
const PACK_SHIFT: u32 = 20;

/// Byte `i` of a packed word, least significant first
#[inline]
fn byte_at(packed: u64, i: u32) -> u8 {
    ((packed >> (8 * i)) & 0xFF) as u8
}

/// Pack two coordinates as `(hi << 20) | lo` and split into 5 bytes
#[inline]
fn pack_40(hi: i64, lo: i64) -> [u8; 5] {
    let packed = ((hi << PACK_SHIFT) | lo) as u64;
    [
        byte_at(packed, 0),
        byte_at(packed, 1),
        byte_at(packed, 2),
        byte_at(packed, 3),
        byte_at(packed, 4),
    ]
}

/// Fold 5 bytes down to one by XOR, then keep the low `8 - ss_w_lg2` bits.
///
/// 40 -> 32: neighbouring pairs. 32 -> 16: bytes two apart. 16 -> 8: the pair.
pub fn hash_40to8(bytes: [u8; 5], ss_w_lg2: u32) -> u16 {
    let mask = 0x00FFu16.checked_shr(ss_w_lg2).unwrap_or(0);

    let b32 = [
        bytes[0] ^ bytes[1],
        bytes[1] ^ bytes[2],
        bytes[2] ^ bytes[3],
        bytes[3] ^ bytes[4],
    ];
    let b16 = [b32[0] ^ b32[2], b32[1] ^ b32[3]];
    let b8 = b16[0] ^ b16[1];

    u16::from(b8) & mask
}

/// Per-sample jitter in `[0, 2^(8 - ss_w_lg2) - 1]` on each axis.
///
/// The x and y hashes pack the coordinates in opposite order so the two
/// offsets are not the same function of the sample.
pub fn jitter_sample(sample: Sample, ss_w_lg2: u32) -> Sample {
    let x = i64::from(sample.x >> JITTER_QUANT_SHIFT);
    let y = i64::from(sample.y >> JITTER_QUANT_SHIFT);

    let jitter_x = hash_40to8(pack_40(y, x), ss_w_lg2);
    let jitter_y = hash_40to8(pack_40(x, y), ss_w_lg2);

    Sample::new(i32::from(jitter_x), i32::from(jitter_y))
}
