use std::path::PathBuf;

use clap::Parser;
use olivine_core::core::Machine;
use olivine_machines::DmgSystem;

mod emulator;
mod input;
mod rom_path;
mod video;

/// Game Boy (DMG) emulator.
#[derive(Parser)]
#[command(name = "olivine", version, about)]
struct Args {
    /// Path to the ROM image (a raw .gb file, or a .zip containing one)
    rom_path: PathBuf,

    /// Integer window scale factor
    #[arg(long, default_value_t = 3)]
    scale: u32,
}

fn main() {
    let args = Args::parse();

    let rom = match rom_path::load_rom(&args.rom_path) {
        Ok(rom) => rom,
        Err(e) => {
            eprintln!("olivine: {e}");
            std::process::exit(1);
        }
    };

    let mut machine = DmgSystem::new();
    if let Err(e) = machine.load_rom(&rom) {
        eprintln!("olivine: {e}");
        std::process::exit(1);
    }

    let key_map = input::default_key_map(machine.input_map());
    machine.reset();
    emulator::run(&mut machine, &key_map, args.scale);
}
