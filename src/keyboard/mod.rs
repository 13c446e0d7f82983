//! Núcleo del runtime: espacio canónico, buffers de estado y tracker.

mod buffer;
mod key;
mod table;
mod tracker;

pub use buffer::{KeyObservation, KeyStateBuffer, KeyStateEntry};
pub use key::{KEY_COUNT, Key};
pub use table::KeyTable;
pub use tracker::Keyboard;

/// Código crudo de un backend: un byte o secuencia de escape, un `KEY_*` de
/// Linux o un `VK_*` de Windows.
pub type RawCode = u32;

/// Estado normalizado de una tecla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

impl KeyState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        self == KeyState::Pressed
    }
}
