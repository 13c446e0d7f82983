//! Configuración de inicialización del runtime.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Backend seleccionado al inicializar un [`Keyboard`](crate::Keyboard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KbMode {
    /// Bytes crudos de la terminal (stdin en modo no canónico).
    ///
    /// Funciona en cualquier Unix, pero no observa liberaciones: cada poll
    /// reporta a lo sumo una tecla presionada.
    #[default]
    Terminal,
    /// Dispositivo de eventos de Linux (`/dev/input/eventN`).
    ///
    /// Observa presiones y liberaciones de varias teclas a la vez. Suele
    /// requerir permisos de lectura sobre el dispositivo.
    EventDevice,
    /// API de consola de Windows. Es el único modo en ese sistema.
    Console,
}

impl fmt::Display for KbMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KbMode::Terminal => "terminal",
            KbMode::EventDevice => "event-device",
            KbMode::Console => "console",
        })
    }
}

/// Error al interpretar un [`KbMode`] desde texto.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown keyboard mode `{0}` (expected terminal, event-device or console)")]
pub struct ParseKbModeError(String);

impl FromStr for KbMode {
    type Err = ParseKbModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" | "raw" | "tty" => Ok(KbMode::Terminal),
            "event-device" | "evdev" | "event" => Ok(KbMode::EventDevice),
            "console" => Ok(KbMode::Console),
            other => Err(ParseKbModeError(other.to_owned())),
        }
    }
}

/// Directorio donde se buscan los dispositivos `eventN`.
pub const DEFAULT_DEVICE_DIR: &str = "/dev/input";

/// Parámetros de [`Keyboard::init`](crate::Keyboard::init).
///
/// ```rust
/// use orbit_input_term::{KbMode, KeyboardConfig};
///
/// let config = KeyboardConfig::default()
///     .with_mode(KbMode::EventDevice)
///     .with_fallback_to_terminal(true);
/// assert_eq!(config.mode, KbMode::EventDevice);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardConfig {
    pub mode: KbMode,
    /// Directorio sondeado en modo [`KbMode::EventDevice`].
    pub device_dir: PathBuf,
    /// Si ningún dispositivo de eventos sirve, usar la terminal en lugar de fallar.
    pub fallback_to_terminal: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            mode: KbMode::default(),
            device_dir: PathBuf::from(DEFAULT_DEVICE_DIR),
            fallback_to_terminal: false,
        }
    }
}

impl KeyboardConfig {
    pub fn new(mode: KbMode) -> Self {
        Self::default().with_mode(mode)
    }

    pub fn with_mode(mut self, mode: KbMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_device_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.device_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_fallback_to_terminal(mut self, fallback: bool) -> Self {
        self.fallback_to_terminal = fallback;
        self
    }
}
