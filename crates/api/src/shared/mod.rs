pub mod trigger_gate;
pub mod usecase;
