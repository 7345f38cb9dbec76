pub mod dmg;
pub mod rom_loader;

pub use dmg::DmgSystem;
