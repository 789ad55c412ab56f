//! Bit depth reduction.

/*
Bit Crushing
============

Quantizes each sample to a coarse grid, the way a low-resolution converter
would. With `bits` of resolution there are 2^bits levels across [-1, 1],
so the grid step is 1 / 2^(bits-1):

    bits  levels  step
    8     256     1/128
    4     16      1/8
    1     2       1      (every sample becomes -1, 0 or +1)

    output = round(sample * levels/2) / (levels/2)

Ties round to even: 0.5 at 1 bit lands on 0.0, 64.5/128 at 8 bits on
64/128.

The crush knob runs the other way from resolution: depth 0.0 keeps
MAX_BITS, depth 1.0 drops to MIN_BITS. In between the bit count is
interpolated linearly and truncated to a whole number of bits.

Scaling by a power of two is exact in floating point, so crushing an
already crushed signal at the same depth changes nothing.
*/

/// Resolution used when the crush knob sits at 0.0.
pub const MAX_BITS: u32 = 8;
/// Resolution used when the crush knob sits at 1.0.
pub const MIN_BITS: u32 = 1;

/// Bit count for a crush depth in [0, 1]. An inverted range is reordered.
pub fn bits_for_depth(depth: f32, max_bits: u32, min_bits: u32) -> u32 {
    let depth = depth.clamp(0.0, 1.0);
    let span = max_bits.saturating_sub(min_bits) as f32;
    let bits = min_bits as f32 + span * (1.0 - depth);
    let lo = min_bits.min(max_bits).max(1);
    let hi = min_bits.max(max_bits).max(1);
    (bits as u32).clamp(lo, hi)
}

/// Quantize one sample to `bits` of resolution.
#[inline]
pub fn quantize(sample: f32, bits: u32) -> f32 {
    let half_levels = (1u64 << bits.min(31)) as f32 / 2.0;
    (sample * half_levels).round_ties_even() / half_levels
}

/// Bit-crush a buffer in place using the default 8-to-1 bit range.
pub fn crush(buffer: &mut [f32], depth: f32) {
    crush_with_range(buffer, depth, MAX_BITS, MIN_BITS);
}

/// Bit-crush a buffer in place with an explicit bit range.
pub fn crush_with_range(buffer: &mut [f32], depth: f32, max_bits: u32, min_bits: u32) {
    let bits = bits_for_depth(depth, max_bits, min_bits);
    for sample in buffer.iter_mut() {
        *sample = quantize(*sample, bits);
    }
}
