//! Backend de dispositivo de eventos (evdev).
//!
//! Una lectura devuelve un lote de eventos estructurados. Sólo los de tipo
//! `EV_KEY` describen teclas; el resto (sincronización, scan codes, LEDs...)
//! se descarta.

use std::io;

use log::trace;

use crate::keyboard::{KeyObservation, KeyState, KeyTable};
use crate::traits::keys::KeyStateExt;
use crate::{EventSourceExt, KbMode, KeyboardError};

/// Tipo de evento de tecla (`EV_KEY`).
pub const EV_KEY: u16 = 0x01;

/// Cantidad máxima de eventos por lectura.
pub const EVENT_BATCH: usize = 64;

/// Evento de input tal como lo entrega el dispositivo, sin timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInputEvent {
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

impl RawInputEvent {
    pub fn key(code: u16, value: i32) -> Self {
        Self {
            kind: EV_KEY,
            code,
            value,
        }
    }
}

/// Origen de eventos para [`EventDeviceSource`].
pub trait EventInput: Send {
    /// Agrega a `out` los eventos de una lectura (como máximo [`EVENT_BATCH`]).
    ///
    /// Con `wait = false` no agrega nada si el dispositivo no tiene eventos.
    fn read_events(&mut self, out: &mut Vec<RawInputEvent>, wait: bool) -> io::Result<()>;
}

/// Fuente de eventos sobre un dispositivo evdev.
#[derive(Debug)]
pub struct EventDeviceSource<I> {
    input: I,
    events: Vec<RawInputEvent>,
}

impl<I: EventInput> EventDeviceSource<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            events: Vec::with_capacity(EVENT_BATCH),
        }
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

impl<I: EventInput> EventSourceExt for EventDeviceSource<I> {
    fn backend_name(&self) -> &'static str {
        "event-device"
    }

    fn mode(&self) -> KbMode {
        KbMode::EventDevice
    }

    fn table(&self) -> &'static KeyTable {
        &KeyTable::EVENT_DEVICE
    }

    fn reports_releases(&self) -> bool {
        true
    }

    fn read_observations(
        &mut self,
        wait: bool,
        out: &mut Vec<KeyObservation>,
    ) -> Result<(), KeyboardError> {
        self.events.clear();
        if let Err(source) = self.input.read_events(&mut self.events, wait) {
            return Err(KeyboardError::ReadFailed {
                backend: self.backend_name(),
                source,
            });
        }

        for event in self.events.iter().filter(|event| event.kind == EV_KEY) {
            let state = KeyState::from_external_state(event.value);
            trace!("event-device key {:#x} -> {state:?}", event.code);
            out.push(KeyObservation {
                code: event.code.into(),
                pressed: state.is_pressed(),
            });
        }
        Ok(())
    }
}
