//! Format conversions at the edges: MIDI keys to Hz, floats to PCM.

/// Lowest key with a mapped frequency (A0).
pub const LOWEST_NOTE: u8 = 21;
/// Highest key with a mapped frequency (C7).
pub const HIGHEST_NOTE: u8 = 96;

/// Equal-tempered frequencies (A4 = 440 Hz) for keys 21..=96, rounded to
/// two decimals. Index 0 is key 21.
pub const NOTE_FREQUENCIES: [f32; (HIGHEST_NOTE - LOWEST_NOTE + 1) as usize] = [
    27.5, 29.14, 30.87, 32.7, 34.65, 36.71, 38.89, 41.2, 43.65, // 21-29
    46.25, 49.0, 51.91, 55.0, 58.27, 61.74, 65.41, 69.3, 73.42, 77.78, // 30-39
    82.41, 87.31, 92.5, 98.0, 103.83, 110.0, 116.54, 123.47, 130.81, // 40-48
    138.59, 146.83, 155.56, 164.81, 174.61, 185.0, 196.0, 207.65, 220.0, // 49-57
    233.08, 246.94, 261.63, 277.18, 293.66, 311.13, 329.63, 349.23, 369.99, // 58-66
    392.0, 415.3, 440.0, 466.16, 493.88, 523.25, 554.37, 587.33, 622.25, // 67-75
    659.26, 698.46, 739.99, 783.99, 830.61, 880.0, 932.33, 987.77, 1046.5, // 76-84
    1108.73, 1174.66, 1244.51, 1318.51, 1396.91, 1480.0, 1567.98, 1661.22, // 85-92
    1760.0, 1864.66, 1975.53, 2093.0, // 93-96
];

/// Frequency for a MIDI key, or `None` outside 21..=96.
pub fn note_to_frequency(note: u8) -> Option<f32> {
    if !(LOWEST_NOTE..=HIGHEST_NOTE).contains(&note) {
        return None;
    }
    NOTE_FREQUENCIES.get((note - LOWEST_NOTE) as usize).copied()
}

/// Full-scale value of signed 16-bit PCM.
pub const PCM16_FULL_SCALE: f32 = 32767.0;

/// Float sample in [-1, 1] to signed 16-bit, truncating toward zero.
#[inline]
pub fn sample_to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * PCM16_FULL_SCALE) as i16
}

/// Convert a float buffer into `out`, reusing its allocation.
pub fn to_pcm16(samples: &[f32], out: &mut Vec<i16>) {
    out.clear();
    out.extend(samples.iter().map(|&s| sample_to_pcm16(s)));
}

/// Signed 16-bit back to float, for devices that take f32.
#[inline]
pub fn pcm16_to_sample(sample: i16) -> f32 {
    sample as f32 / PCM16_FULL_SCALE
}
