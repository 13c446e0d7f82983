//! Backend de la consola de Windows.
//!
//! Lee `INPUT_RECORD`s del handle de entrada estándar y conserva sólo los
//! `KEY_EVENT`, que traen virtual-key code y si la tecla bajó o subió.

use std::io;

use log::{trace, warn};
use windows::Win32::Foundation::HANDLE;
use windows::Win32::System::Console::{
    CONSOLE_MODE, ENABLE_ECHO_INPUT, ENABLE_LINE_INPUT, ENABLE_PROCESSED_INPUT, GetConsoleMode,
    GetNumberOfConsoleInputEvents, GetStdHandle, INPUT_RECORD, KEY_EVENT, ReadConsoleInputW,
    STD_INPUT_HANDLE, SetConsoleMode,
};

use crate::backend::event_device::EVENT_BATCH;
use crate::keyboard::{KeyObservation, KeyTable};
use crate::{EventSourceExt, KbMode, KeyboardError};

/// Fuente de eventos sobre la consola de Windows.
pub struct ConsoleSource {
    handle: HANDLE,
    saved_mode: CONSOLE_MODE,
    records: Vec<INPUT_RECORD>,
}

// SAFETY: el handle de entrada de la consola pertenece al proceso, no a un hilo.
unsafe impl Send for ConsoleSource {}

impl ConsoleSource {
    /// Toma el handle de entrada y desactiva el modo línea, el eco y Ctrl+C.
    ///
    /// # Errores
    ///
    /// [`KeyboardError::Io`] si el proceso no tiene consola.
    pub fn open() -> Result<Self, KeyboardError> {
        // SAFETY: llamadas a la API de consola con punteros a locales válidos.
        unsafe {
            let handle = GetStdHandle(STD_INPUT_HANDLE)
                .map_err(|err| KeyboardError::Io {
                    context: "opening console input",
                    source: io::Error::from(err),
                })?;
            let mut saved_mode = CONSOLE_MODE(0);
            GetConsoleMode(handle, &mut saved_mode).map_err(|err| KeyboardError::Io {
                context: "reading console mode",
                source: io::Error::from(err),
            })?;
            let raw = saved_mode & !(ENABLE_LINE_INPUT | ENABLE_ECHO_INPUT | ENABLE_PROCESSED_INPUT);
            SetConsoleMode(handle, raw).map_err(|err| KeyboardError::Io {
                context: "setting console mode",
                source: io::Error::from(err),
            })?;
            Ok(Self {
                handle,
                saved_mode,
                records: vec![INPUT_RECORD::default(); EVENT_BATCH],
            })
        }
    }

    fn pending(&self) -> io::Result<u32> {
        let mut pending = 0u32;
        // SAFETY: `pending` es un u32 válido durante la llamada.
        unsafe { GetNumberOfConsoleInputEvents(self.handle, &mut pending) }?;
        Ok(pending)
    }
}

impl EventSourceExt for ConsoleSource {
    fn backend_name(&self) -> &'static str {
        "console"
    }

    fn mode(&self) -> KbMode {
        KbMode::Console
    }

    fn table(&self) -> &'static KeyTable {
        &KeyTable::CONSOLE
    }

    fn reports_releases(&self) -> bool {
        true
    }

    fn read_observations(
        &mut self,
        wait: bool,
        out: &mut Vec<KeyObservation>,
    ) -> Result<(), KeyboardError> {
        let failed = |source: io::Error| KeyboardError::ReadFailed {
            backend: "console",
            source,
        };
        if !wait && self.pending().map_err(failed)? == 0 {
            return Ok(());
        }

        let mut read = 0u32;
        // SAFETY: `records` tiene EVENT_BATCH elementos inicializados.
        unsafe { ReadConsoleInputW(self.handle, &mut self.records, &mut read) }
            .map_err(|err| failed(io::Error::from(err)))?;

        for record in &self.records[..read as usize] {
            if u32::from(record.EventType) != KEY_EVENT as u32 {
                continue;
            }
            // SAFETY: EventType == KEY_EVENT indica que la unión contiene un KeyEvent.
            let key = unsafe { record.Event.KeyEvent };
            trace!("console vk {:#x} down={}", key.wVirtualKeyCode, key.bKeyDown.as_bool());
            out.push(KeyObservation {
                code: key.wVirtualKeyCode.into(),
                pressed: key.bKeyDown.as_bool(),
            });
        }
        Ok(())
    }
}

impl Drop for ConsoleSource {
    fn drop(&mut self) {
        // SAFETY: restaura el modo leído en `open` sobre el mismo handle.
        if let Err(err) = unsafe { SetConsoleMode(self.handle, self.saved_mode) } {
            warn!("could not restore console mode: {err}");
        }
    }
}
