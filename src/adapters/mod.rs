//! Adapters - concrete implementations of ports (traits)

mod simulated_element;

pub use simulated_element::{DeviceFault, SimulatedElement};
