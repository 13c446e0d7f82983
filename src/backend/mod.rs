//! Fuentes de eventos incluidas.

#[cfg(windows)]
pub mod console;
pub mod event_device;
pub mod raw_byte;

pub use event_device::{EV_KEY, EventDeviceSource, EventInput, RawInputEvent};
pub use raw_byte::{ByteInput, RawByteSource, decode_sequence};
