//! Tablas de traducción entre posiciones lógicas y códigos crudos.
//!
//! Cada backend tiene su propia tabla, indexada por [`Key::index`]. Son datos
//! estáticos: no se calcula nada en tiempo de ejecución. Las posiciones que un
//! backend no puede reportar (por ejemplo, los modificadores en una terminal
//! en modo crudo) contienen [`KeyTable::UNMAPPED`].

use crate::keyboard::{KEY_COUNT, Key, RawCode};
use crate::traits::keys::KeyExt;

/// Tabla inmutable `posición lógica → código crudo` de un backend.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyTable {
    name: &'static str,
    codes: [RawCode; KEY_COUNT],
}

impl KeyTable {
    /// Marca de posición sin código en el backend.
    pub const UNMAPPED: RawCode = 0xff;

    /// Bytes y secuencias de escape de una terminal en modo no canónico.
    ///
    /// Las secuencias de varios bytes se codifican con los últimos cuatro
    /// bytes en orden big-endian (ver [`decode_sequence`](crate::decode_sequence)).
    pub const TERMINAL: KeyTable = KeyTable {
        name: "terminal",
        codes: [
            0x60, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x30, 0x2d, 0x3d, 0x7f,
            0x09, 0x71, 0x77, 0x65, 0x72, 0x74, 0x79, 0x75, 0x69, 0x6f, 0x70, 0x5b, 0x5d, 0x5c,
            0xff, 0x61, 0x73, 0x64, 0x66, 0x67, 0x68, 0x6a, 0x6b, 0x6c, 0x3b, 0x27, 0x0d,
            0xff, 0x7a, 0x78, 0x63, 0x76, 0x62, 0x6e, 0x6d, 0x2c, 0x2e, 0x2f, 0xff,
            0xff, 0xff, 0xff, 0x20, 0xff, 0xff, 0xff, 0xff,
            0x1b, 0x1b4f50, 0x1b4f51, 0x1b4f52, 0x1b4f53, 0x5b31357e, 0x5b31377e, 0x5b31387e,
            0x5b31397e, 0x5b32307e, 0x5b32317e, 0x5b32337e, 0x5b32347e,
            0xff, 0xff, 0xff, 0x1b5b327e, 0x1b5b48, 0x1b5b357e, 0x1b5b337e, 0x1b5b46, 0x1b5b367e,
            0x1b5b41, 0x1b5b44, 0x1b5b42, 0x1b5b43,
            0xff, 0x2f, 0x2a, 0x2d, 0x37, 0x38, 0x39, 0x2b, 0x34, 0x35, 0x36, 0x31, 0x32, 0x33,
            0x0d, 0x30, 0x2e,
        ],
    };

    /// Códigos de tecla del subsistema de input de Linux (`KEY_*`).
    pub const EVENT_DEVICE: KeyTable = KeyTable {
        name: "event-device",
        codes: [
            0x29, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
            0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x2b,
            0x3a, 0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x1c,
            0x2a, 0x2c, 0x2d, 0x2e, 0x2f, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36,
            0x1d, 0x7d, 0x38, 0x39, 0x64, 0x7e, 0x7f, 0x61,
            0x01, 0x3b, 0x3c, 0x3d, 0x3e, 0x3f, 0x40, 0x41, 0x42, 0x43, 0x44, 0x57, 0x58,
            0x63, 0x46, 0x77, 0x6e, 0x66, 0x68, 0x6f, 0x6b, 0x6d, 0x67, 0x69, 0x6c, 0x6a,
            0x45, 0x62, 0x37, 0x4a, 0x47, 0x48, 0x49, 0x4e, 0x4b, 0x4c, 0x4d, 0x4f, 0x50, 0x51,
            0x60, 0x52, 0x53,
        ],
    };

    /// Virtual-key codes de la consola de Windows (`VK_*`).
    pub const CONSOLE: KeyTable = KeyTable {
        name: "console",
        codes: [
            0xc0, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x30, 0xbd, 0xbb, 0x08,
            0x09, 0x51, 0x57, 0x45, 0x52, 0x54, 0x59, 0x55, 0x49, 0x4f, 0x50, 0xdb, 0xdd, 0xdc,
            0x14, 0x41, 0x53, 0x44, 0x46, 0x47, 0x48, 0x4a, 0x4b, 0x4c, 0xba, 0xde, 0x0d,
            0xa0, 0x5a, 0x58, 0x43, 0x56, 0x42, 0x4e, 0x4d, 0xbc, 0xbe, 0xbf, 0xa1,
            0xa2, 0x5b, 0xa4, 0x20, 0xa5, 0x5c, 0x5d, 0xa3,
            0x1b, 0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x7b,
            0x2c, 0x91, 0x13, 0x2d, 0x24, 0x21, 0x2e, 0x23, 0x22, 0x26, 0x25, 0x28, 0x27,
            0x90, 0x6f, 0x6a, 0x6d, 0x67, 0x68, 0x69, 0x6b, 0x64, 0x65, 0x66, 0x61, 0x62, 0x63,
            0x0d, 0x60, 0x6e,
        ],
    };

    /// Nombre corto de la tabla, útil para logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Código crudo asociado a `key`, o `None` si la posición no tiene código.
    pub fn raw_code(&self, key: Key) -> Option<RawCode> {
        match self.codes[key.index()] {
            Self::UNMAPPED => None,
            code => Some(code),
        }
    }

    /// Primera posición lógica cuyo código crudo es `code`.
    ///
    /// En la tabla de terminal varias posiciones comparten código (los dígitos
    /// y el teclado numérico, por ejemplo); gana la de menor índice.
    pub fn key_for(&self, code: RawCode) -> Option<Key> {
        if code == Self::UNMAPPED {
            return None;
        }
        self.codes
            .iter()
            .position(|&c| c == code)
            .and_then(Key::from_index)
    }

    /// Iterador sobre las posiciones con código en este backend.
    pub fn mapped(&self) -> impl Iterator<Item = (Key, RawCode)> + '_ {
        Key::ALL
            .iter()
            .filter_map(|&key| self.raw_code(key).map(|code| (key, code)))
    }
}

impl KeyExt<RawCode, Key> for KeyTable {
    fn from_backend_key(&self, key: RawCode) -> Option<Key> {
        self.key_for(key)
    }

    fn to_backend_key(&self, code: Key) -> Option<RawCode> {
        self.raw_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_letters_are_lowercase_ascii() {
        assert_eq!(KeyTable::TERMINAL.raw_code(Key::A), Some(0x61));
        assert_eq!(KeyTable::TERMINAL.raw_code(Key::Q), Some(0x71));
        assert_eq!(KeyTable::TERMINAL.raw_code(Key::Space), Some(0x20));
    }

    #[test]
    fn test_terminal_escape_sequences() {
        assert_eq!(KeyTable::TERMINAL.raw_code(Key::ArrowUp), Some(0x1b5b41));
        assert_eq!(KeyTable::TERMINAL.raw_code(Key::F1), Some(0x1b4f50));
        assert_eq!(KeyTable::TERMINAL.raw_code(Key::F5), Some(0x5b31357e));
    }

    #[test]
    fn test_unmapped_positions_are_none() {
        assert_eq!(KeyTable::TERMINAL.raw_code(Key::ShiftLeft), None);
        assert_eq!(KeyTable::TERMINAL.raw_code(Key::CapsLock), None);
        assert_eq!(KeyTable::TERMINAL.key_for(KeyTable::UNMAPPED), None);
    }

    #[test]
    fn test_event_device_codes() {
        assert_eq!(KeyTable::EVENT_DEVICE.raw_code(Key::A), Some(30));
        assert_eq!(KeyTable::EVENT_DEVICE.raw_code(Key::Escape), Some(1));
        assert_eq!(KeyTable::EVENT_DEVICE.key_for(30), Some(Key::A));
        assert_eq!(KeyTable::EVENT_DEVICE.key_for(0x7e), Some(Key::SuperRight));
    }

    #[test]
    fn test_console_codes() {
        assert_eq!(KeyTable::CONSOLE.raw_code(Key::A), Some(0x41));
        assert_eq!(KeyTable::CONSOLE.raw_code(Key::F12), Some(0x7b));
        assert_eq!(KeyTable::CONSOLE.key_for(0x0d), Some(Key::Enter));
    }

    #[test]
    fn test_shared_terminal_codes_resolve_to_first_position() {
        assert_eq!(KeyTable::TERMINAL.key_for(0x31), Some(Key::Digit1));
        assert_eq!(KeyTable::TERMINAL.key_for(0x0d), Some(Key::Enter));
    }

    #[test]
    fn test_key_ext_roundtrip_on_every_mapped_position() {
        for table in [&KeyTable::EVENT_DEVICE, &KeyTable::CONSOLE] {
            for (key, code) in table.mapped() {
                assert_eq!(table.to_backend_key(key), Some(code));
                let back = table.from_backend_key(code).map(|k| table.raw_code(k));
                assert_eq!(back, Some(Some(code)), "{} {key}", table.name());
            }
        }
    }
}
