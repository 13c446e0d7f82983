//! Configuración de la plataforma: modo de la terminal, sondeo de
//! dispositivos y reclamo exclusivo del input del proceso.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::{EventSourceExt, KbMode, KeyboardConfig, KeyboardError};

#[cfg(unix)]
pub mod unix;

static INPUT_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Reclamo exclusivo del input del proceso.
///
/// Sólo un [`Keyboard`](crate::Keyboard) inicializado contra la plataforma
/// puede existir a la vez; el reclamo se libera al soltar este valor.
#[derive(Debug)]
pub struct InputClaim(());

impl InputClaim {
    /// # Errores
    ///
    /// [`KeyboardError::AlreadyClaimed`] si otro tracker tiene el reclamo.
    pub fn acquire() -> Result<Self, KeyboardError> {
        INPUT_CLAIMED
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InputClaim(()))
            .map_err(|_| KeyboardError::AlreadyClaimed)
    }
}

impl Drop for InputClaim {
    fn drop(&mut self) {
        INPUT_CLAIMED.store(false, Ordering::Release);
    }
}

/// Abre la fuente de eventos que corresponde a `config` en esta plataforma.
#[cfg(unix)]
pub fn open_source(config: &KeyboardConfig) -> Result<Box<dyn EventSourceExt>, KeyboardError> {
    use crate::RawByteSource;

    let terminal = || -> Result<Box<dyn EventSourceExt>, KeyboardError> {
        Ok(Box::new(RawByteSource::new(unix::StdinTty::open()?)))
    };

    match config.mode {
        KbMode::Terminal => terminal(),
        #[cfg(target_os = "linux")]
        KbMode::EventDevice => match unix::EvdevDevice::probe(&config.device_dir)? {
            Some(device) => Ok(Box::new(crate::EventDeviceSource::new(device))),
            None if config.fallback_to_terminal => {
                debug!(
                    "no keyboard under {}, falling back to terminal",
                    config.device_dir.display()
                );
                terminal()
            }
            None => Err(KeyboardError::NoKeyboardDevice {
                dir: config.device_dir.clone(),
            }),
        },
        #[cfg(not(target_os = "linux"))]
        KbMode::EventDevice if config.fallback_to_terminal => {
            debug!("event devices unavailable, falling back to terminal");
            terminal()
        }
        mode => Err(KeyboardError::UnsupportedMode(mode)),
    }
}

/// Abre la fuente de eventos que corresponde a `config` en esta plataforma.
///
/// En Windows la consola es el único backend; el modo pedido se ignora.
#[cfg(windows)]
pub fn open_source(config: &KeyboardConfig) -> Result<Box<dyn EventSourceExt>, KeyboardError> {
    if config.mode != KbMode::Console {
        debug!("{} mode requested, using the console", config.mode);
    }
    Ok(Box::new(crate::backend::console::ConsoleSource::open()?))
}

#[cfg(not(any(unix, windows)))]
pub fn open_source(config: &KeyboardConfig) -> Result<Box<dyn EventSourceExt>, KeyboardError> {
    debug!("no keyboard backend for this platform");
    Err(KeyboardError::UnsupportedMode(config.mode))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_claim_is_exclusive() {
        let claim = InputClaim::acquire().unwrap();
        assert!(matches!(
            InputClaim::acquire(),
            Err(KeyboardError::AlreadyClaimed)
        ));
        drop(claim);
        assert!(InputClaim::acquire().is_ok());
    }
}
