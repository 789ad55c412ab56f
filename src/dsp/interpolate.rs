//! Linear interpolation over sample (or bin) indices.

/*
Fractional Reads
================

Both the pitch shifter and the vibrato need values "between" stored samples.
`sample_linear` treats the slice as a piecewise-linear curve through the
points (0, data[0]), (1, data[1]), ... and reads it at a fractional position:

    data:     a ------- b
    index:    3         4
    position:      3.25
    value:    a + 0.25 * (b - a)

Positions before the first point read data[0]; positions after the last
point read the final value. Nothing wraps around.
*/

/// Read `data` at fractional `position`, clamping at both ends.
///
/// Returns 0.0 for an empty slice.
#[inline]
pub fn sample_linear(data: &[f32], position: f32) -> f32 {
    let Some(&last) = data.last() else {
        return 0.0;
    };
    if !(position > 0.0) {
        return data[0];
    }
    let max = (data.len() - 1) as f32;
    if position >= max {
        return last;
    }

    let index = position.floor() as usize;
    let frac = position - index as f32;
    let a = data[index];
    let b = data[index + 1];
    a + (b - a) * frac
}
