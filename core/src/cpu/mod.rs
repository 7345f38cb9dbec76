/// Generic CPU interface
pub trait Cpu: CpuStateTrait {
    /// Restore the power-on register state.
    fn reset(&mut self);

    /// Query if the CPU is halted internally (HALT instruction).
    fn is_sleeping(&self) -> bool;
}

// Re-export state types
pub mod state;
pub use state::{CpuStateTrait, Sm83State};

// SM83 CPU
pub mod sm83;
pub use sm83::Sm83;
