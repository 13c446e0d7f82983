//! Espacio canónico de teclas.
//!
//! [`Key`] enumera las **104 posiciones lógicas** de un teclado completo,
//! fila por fila, independientemente del backend que produzca los eventos.
//! El discriminante de cada variante es su posición en la distribución y es
//! el índice usado por las tablas de traducción ([`KeyTable`](crate::KeyTable)).
//!
//! | Fila | Contenido                                              |
//! |------|--------------------------------------------------------|
//! | 1    | `` ` `` dígitos `-` `=` retroceso                       |
//! | 2    | tab, `Q`..`P`, corchetes, barra invertida              |
//! | 3    | bloq. mayús, `A`..`L`, `;` `'` enter                   |
//! | 4    | shift, `Z`..`M`, `,` `.` `/` shift                     |
//! | 5    | modificadores y espacio                                |
//! | 6    | escape, `F1`..`F12`                                    |
//! | 7    | bloque de edición y flechas                            |
//! | 8    | teclado numérico                                       |

use std::fmt;

/// Número de posiciones lógicas del espacio canónico.
pub const KEY_COUNT: usize = 104;

/// Posición lógica de una tecla en la distribución del teclado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Key {
    // Fila 1
    Grave,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Digit0,
    Minus,
    Equal,
    Backspace,
    // Fila 2
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    LeftBracket,
    RightBracket,
    Backslash,
    // Fila 3
    CapsLock,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Semicolon,
    Apostrophe,
    Enter,
    // Fila 4
    ShiftLeft,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Comma,
    Period,
    Slash,
    ShiftRight,
    // Fila 5
    ControlLeft,
    SuperLeft,
    AltLeft,
    Space,
    AltRight,
    SuperRight,
    Menu,
    ControlRight,
    // Fila 6
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    // Fila 7
    PrintScreen,
    ScrollLock,
    Pause,
    Insert,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,
    ArrowUp,
    ArrowLeft,
    ArrowDown,
    ArrowRight,
    // Fila 8
    NumLock,
    NumpadDivide,
    NumpadMultiply,
    NumpadSubtract,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadAdd,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad1,
    Numpad2,
    Numpad3,
    NumpadEnter,
    Numpad0,
    NumpadDecimal,
}

impl Key {
    /// Todas las teclas en orden de posición.
    pub const ALL: [Key; KEY_COUNT] = [
        Key::Grave,
        Key::Digit1,
        Key::Digit2,
        Key::Digit3,
        Key::Digit4,
        Key::Digit5,
        Key::Digit6,
        Key::Digit7,
        Key::Digit8,
        Key::Digit9,
        Key::Digit0,
        Key::Minus,
        Key::Equal,
        Key::Backspace,
        Key::Tab,
        Key::Q,
        Key::W,
        Key::E,
        Key::R,
        Key::T,
        Key::Y,
        Key::U,
        Key::I,
        Key::O,
        Key::P,
        Key::LeftBracket,
        Key::RightBracket,
        Key::Backslash,
        Key::CapsLock,
        Key::A,
        Key::S,
        Key::D,
        Key::F,
        Key::G,
        Key::H,
        Key::J,
        Key::K,
        Key::L,
        Key::Semicolon,
        Key::Apostrophe,
        Key::Enter,
        Key::ShiftLeft,
        Key::Z,
        Key::X,
        Key::C,
        Key::V,
        Key::B,
        Key::N,
        Key::M,
        Key::Comma,
        Key::Period,
        Key::Slash,
        Key::ShiftRight,
        Key::ControlLeft,
        Key::SuperLeft,
        Key::AltLeft,
        Key::Space,
        Key::AltRight,
        Key::SuperRight,
        Key::Menu,
        Key::ControlRight,
        Key::Escape,
        Key::F1,
        Key::F2,
        Key::F3,
        Key::F4,
        Key::F5,
        Key::F6,
        Key::F7,
        Key::F8,
        Key::F9,
        Key::F10,
        Key::F11,
        Key::F12,
        Key::PrintScreen,
        Key::ScrollLock,
        Key::Pause,
        Key::Insert,
        Key::Home,
        Key::PageUp,
        Key::Delete,
        Key::End,
        Key::PageDown,
        Key::ArrowUp,
        Key::ArrowLeft,
        Key::ArrowDown,
        Key::ArrowRight,
        Key::NumLock,
        Key::NumpadDivide,
        Key::NumpadMultiply,
        Key::NumpadSubtract,
        Key::Numpad7,
        Key::Numpad8,
        Key::Numpad9,
        Key::NumpadAdd,
        Key::Numpad4,
        Key::Numpad5,
        Key::Numpad6,
        Key::Numpad1,
        Key::Numpad2,
        Key::Numpad3,
        Key::NumpadEnter,
        Key::Numpad0,
        Key::NumpadDecimal,
    ];

    /// Posición de la tecla dentro de la distribución (`0..KEY_COUNT`).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tecla ubicada en la posición `index`, o `None` si está fuera de rango.
    #[inline]
    pub fn from_index(index: usize) -> Option<Key> {
        Self::ALL.get(index).copied()
    }

    /// Fila (1..=8) y columna (1..) de la tecla en la distribución.
    pub fn row_col(self) -> (usize, usize) {
        let mut start = 0;
        for (row, len) in ROW_LENGTHS.iter().enumerate() {
            if self.index() < start + len {
                return (row + 1, self.index() - start + 1);
            }
            start += len;
        }
        unreachable!("ROW_LENGTHS cubre las {KEY_COUNT} posiciones")
    }
}

/// Cantidad de teclas por fila, de arriba hacia abajo.
const ROW_LENGTHS: [usize; 8] = [14, 14, 13, 12, 8, 13, 13, 17];

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(Key::from_index(i), Some(*key));
        }
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(Key::from_index(KEY_COUNT), None);
    }

    #[test]
    fn test_row_lengths_cover_every_key() {
        assert_eq!(ROW_LENGTHS.iter().sum::<usize>(), KEY_COUNT);
    }

    #[test]
    fn test_row_col() {
        assert_eq!(Key::Grave.row_col(), (1, 1));
        assert_eq!(Key::Tab.row_col(), (2, 1));
        assert_eq!(Key::D.row_col(), (3, 4));
        assert_eq!(Key::ShiftRight.row_col(), (4, 12));
        assert_eq!(Key::NumpadDecimal.row_col(), (8, 17));
    }
}
