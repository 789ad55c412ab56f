//! Whole-cycle benchmarks.
//!
//! These model what the engine does every 60 ms: mix a chord, then run it
//! through the effect chain.

mod chain;
mod render;

pub use chain::bench_chain;
pub use render::bench_render;
