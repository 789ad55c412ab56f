use crate::config::EngineConfig;
use crate::dsp::bitcrush::crush_with_range;
use crate::dsp::chorus::Chorus;
use crate::dsp::distortion::distort;
use crate::dsp::pitch_shift::{shift_factor, PitchShifter};
use crate::dsp::vibrato::Vibrato;
use crate::synth::controls::ControlSnapshot;

/*
Effect Chain
============

Five stages in a fixed order. A stage runs only when the control driving
it is non-zero; a stage at rest costs nothing, and the FFT stages are the
expensive ones.

    stage         driven by                    operation
    PitchShift    knob + bend (clamped)        spectral shift by 1 + amount * range
    Chorus        chorus mix                   two detuned, rotated copies
    Distortion    distortion gain              x * gain * 20, hard clip
    Vibrato       vibrato depth                time warp at 2^(8 * depth) Hz
    BitCrush      crush depth                  quantize to 8..1 bits

Every stage works in place and keeps the buffer length. The order is
fixed.

The vibrato LFO phase lives in the chain and only moves while vibrato is
engaged.
*/

/// One stage of the chain, listed in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectStage {
    PitchShift,
    Chorus,
    Distortion,
    Vibrato,
    BitCrush,
}

impl EffectStage {
    pub const ORDER: [EffectStage; 5] = [
        EffectStage::PitchShift,
        EffectStage::Chorus,
        EffectStage::Distortion,
        EffectStage::Vibrato,
        EffectStage::BitCrush,
    ];

    /// Control value that drives this stage.
    pub fn amount(self, controls: &ControlSnapshot) -> f32 {
        match self {
            EffectStage::PitchShift => controls.pitch_amount(),
            EffectStage::Chorus => controls.chorus,
            EffectStage::Distortion => controls.distortion,
            EffectStage::Vibrato => controls.vibrato,
            EffectStage::BitCrush => controls.bit_crush,
        }
    }

    pub fn is_engaged(self, controls: &ControlSnapshot) -> bool {
        self.amount(controls) != 0.0
    }
}

/// Runs the engaged stages over a buffer, in order.
pub struct EffectChain {
    pitch_range: f32,
    max_bits: u32,
    min_bits: u32,
    shifter: PitchShifter,
    chorus: Chorus,
    vibrato: Vibrato,
}

impl EffectChain {
    pub fn new(config: &EngineConfig) -> Self {
        let frames = config.frames_per_buffer();
        Self {
            pitch_range: config.pitch_shift_range,
            max_bits: config.max_bits,
            min_bits: config.min_bits,
            shifter: PitchShifter::new(frames),
            chorus: Chorus::with_voices(frames, config.chorus_voices),
            vibrato: Vibrato::new(config.sample_rate, config.buffer_duration)
                .with_amplitude(config.vibrato_amplitude),
        }
    }

    /// Stages that `controls` would engage, in processing order.
    pub fn engaged(controls: &ControlSnapshot) -> impl Iterator<Item = EffectStage> + '_ {
        EffectStage::ORDER
            .into_iter()
            .filter(move |stage| stage.is_engaged(controls))
    }

    /// Apply every engaged stage to `buffer` in place.
    pub fn process(&mut self, buffer: &mut [f32], controls: &ControlSnapshot) {
        for stage in Self::engaged(controls) {
            self.apply(stage, buffer, stage.amount(controls));
        }
    }

    /// Apply one stage regardless of gating.
    pub fn apply(&mut self, stage: EffectStage, buffer: &mut [f32], amount: f32) {
        match stage {
            EffectStage::PitchShift => {
                let factor = shift_factor(amount, self.pitch_range);
                self.shifter.process(buffer, factor);
            }
            EffectStage::Chorus => self.chorus.process(buffer, amount),
            EffectStage::Distortion => distort(buffer, amount),
            EffectStage::Vibrato => self.vibrato.process(buffer, amount),
            EffectStage::BitCrush => {
                crush_with_range(buffer, amount, self.max_bits, self.min_bits)
            }
        }
    }

    pub fn vibrato_phase(&self) -> f64 {
        self.vibrato.lfo_phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::bitcrush;

    fn sine(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| 0.9 * (std::f32::consts::TAU * 261.63 * i as f32 / 44_100.0).sin())
            .collect()
    }

    #[test]
    fn test_all_stages_at_rest_is_identity() {
        let config = EngineConfig::default();
        let mut chain = EffectChain::new(&config);
        let input = sine(config.frames_per_buffer());
        let mut buffer = input.clone();
        chain.process(&mut buffer, &ControlSnapshot::default());
        assert_eq!(buffer, input);
        assert_eq!(chain.vibrato_phase(), 0.0);
    }

    #[test]
    fn test_engaged_follows_fixed_order() {
        let controls = ControlSnapshot {
            bit_crush: 0.5,
            vibrato: 0.1,
            chorus: 0.2,
            pitch_bend: -0.3,
            ..Default::default()
        };
        let stages: Vec<_> = EffectChain::engaged(&controls).collect();
        assert_eq!(
            stages,
            vec![
                EffectStage::PitchShift,
                EffectStage::Chorus,
                EffectStage::Vibrato,
                EffectStage::BitCrush,
            ]
        );
    }

    #[test]
    fn test_knob_and_bend_cancel() {
        let controls = ControlSnapshot {
            pitch_shift: 0.5,
            pitch_bend: -0.5,
            ..Default::default()
        };
        assert!(!EffectStage::PitchShift.is_engaged(&controls));
    }

    #[test]
    fn test_distortion_then_crush() {
        let config = EngineConfig::default();
        let mut chain = EffectChain::new(&config);
        let input = sine(config.frames_per_buffer());

        let controls = ControlSnapshot {
            distortion: 0.5,
            bit_crush: 1.0,
            ..Default::default()
        };
        let mut buffer = input.clone();
        chain.process(&mut buffer, &controls);

        let mut expected = input;
        distort(&mut expected, 0.5);
        bitcrush::crush(&mut expected, 1.0);
        assert_eq!(buffer, expected);
        assert!(buffer.iter().all(|s| s.abs() <= 1.0));
    }

    #[test]
    fn test_output_length_preserved_with_every_stage() {
        let config = EngineConfig::default();
        let mut chain = EffectChain::new(&config);
        let mut buffer = sine(config.frames_per_buffer());
        let controls = ControlSnapshot {
            vibrato: 0.4,
            distortion: 0.1,
            chorus: 0.6,
            bit_crush: 0.3,
            pitch_shift: 0.7,
            ..Default::default()
        };
        chain.process(&mut buffer, &controls);
        assert_eq!(buffer.len(), config.frames_per_buffer());
        assert!(buffer.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
        assert!(chain.vibrato_phase() > 0.0);
    }
}
