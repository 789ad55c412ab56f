// Purpose: the fixed, control-gated post-processing applied to every buffer.

pub mod chain;

pub use chain::{EffectChain, EffectStage};
