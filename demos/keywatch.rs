//! Imprime las teclas que bajan y suben hasta presionar Escape.
//!
//! ```text
//! RUST_LOG=debug cargo run --example keywatch -- --mode evdev --fallback
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::info;
use orbit_input_term::{
    DEFAULT_DEVICE_DIR, InputStateExt, KbMode, Key, Keyboard, KeyboardConfig, KeyboardError,
};

#[derive(Parser, Debug)]
#[command(name = "keywatch", about = "Watch key edges on the terminal")]
struct Args {
    /// Backend: terminal, evdev o console.
    #[arg(short, long, default_value_t = KbMode::Terminal)]
    mode: KbMode,

    /// Directorio donde buscar dispositivos `eventN`.
    #[arg(long, default_value = DEFAULT_DEVICE_DIR)]
    device_dir: PathBuf,

    /// Usar la terminal si no se encuentra un teclado.
    #[arg(long)]
    fallback: bool,

    /// Milisegundos entre polls.
    #[arg(long, default_value_t = 16)]
    interval: u64,
}

fn main() -> Result<(), KeyboardError> {
    env_logger::init();
    let args = Args::parse();

    let config = KeyboardConfig::new(args.mode)
        .with_device_dir(args.device_dir)
        .with_fallback_to_terminal(args.fallback);

    let mut keyboard = Keyboard::new();
    keyboard.init(&config)?;
    info!(
        "watching keys on {} backend, press Escape to quit",
        keyboard.backend_name().unwrap_or("unknown")
    );

    let interval = Duration::from_millis(args.interval);
    loop {
        keyboard.poll();
        for key in Key::ALL {
            if keyboard.is_just_press(key) {
                println!("down {key}\r");
            } else if keyboard.is_just_released(key) {
                println!("up   {key}\r");
            }
        }
        if keyboard.is_just_press(Key::Escape) {
            break;
        }
        thread::sleep(interval);
    }

    keyboard.close();
    Ok(())
}
