//! Traits de traducción entre el mundo del backend y el espacio canónico.
//!
//! # Convenciones de tipos genéricos
//!
//! - **`KeyExt<B, N>`**: Conversión de teclas
//!   - `B` = **B**ackend (código crudo del backend, ej: [`RawCode`](crate::RawCode))
//!   - `N` = **N**ormalized (posición lógica, ej: [`Key`](crate::Key))
//!
//! - **`KeyStateExt<I, O>`**: Conversión de estados
//!   - `I` = **I**nput (valor nativo, ej: el `value` de un evento de Linux)
//!   - `O` = **O**utput (estado normalizado, ej: [`KeyState`](crate::KeyState))
//!
//! # Ejemplo
//! ```rust
//! use orbit_input_term::{Key, KeyExt, KeyState, KeyStateExt, KeyTable};
//!
//! let table = &KeyTable::EVENT_DEVICE;
//! assert_eq!(table.from_backend_key(30), Some(Key::A));
//! assert_eq!(table.to_backend_key(Key::A), Some(30));
//!
//! assert_eq!(KeyState::from_external_state(1i32), KeyState::Pressed);
//! ```

use crate::keyboard::KeyState;

/// El trait [`KeyExt`] traduce entre códigos crudos de un backend y las
/// posiciones lógicas del espacio canónico.
///
/// A diferencia de una simple conversión de tipos, cada backend trae su
/// propia tabla, por eso las conversiones reciben `&self`. No todas las
/// posiciones existen en todos los backends: ambas direcciones retornan
/// `Option` y `None` significa "sin código en este backend".
///
/// # Parámetros genéricos
/// - `B`: código **nativo del backend** (byte, secuencia de escape, `KEY_*`, `VK_*`).
/// - `N`: tecla **normalizada** usada por el runtime.
///
/// # Reglas de implementación
/// - Las conversiones deben ser **deterministas**.
/// - No deben realizar asignaciones dinámicas.
/// - Si dos posiciones comparten código, `from_backend_key` devuelve siempre la misma.
pub trait KeyExt<B, N>
where
    B: Copy + PartialEq,
    N: Copy + PartialEq,
{
    /// Convierte un código del backend (`B`) a su posición lógica (`N`).
    fn from_backend_key(&self, key: B) -> Option<N>;

    /// Convierte una posición lógica (`N`) al código del backend (`B`).
    fn to_backend_key(&self, code: N) -> Option<B>;
}

/// El trait [`KeyStateExt`] traduce entre los estados de tecla nativos de un
/// backend y el [`KeyState`] normalizado.
///
/// # Implementaciones incluidas
/// - `i32`: campo `value` de un evento `EV_KEY` de Linux. `0` es liberada,
///   `1` presionada y `2` (auto-repetición) cuenta como presionada.
/// - `bool`: flag `pressed` de una [`KeyObservation`](crate::KeyObservation)
///   o `bKeyDown` de la consola de Windows.
pub trait KeyStateExt<I, O>
where
    I: Copy + PartialEq,
    O: Copy + PartialEq,
{
    /// Convierte un estado nativo del backend (`I`) a su representación interna (`O`).
    fn from_external_state(state: I) -> O;

    /// Convierte un estado interno (`O`) a su equivalente nativo del backend (`I`).
    fn to_external_state(state: O) -> I;
}

impl KeyStateExt<i32, KeyState> for KeyState {
    fn from_external_state(state: i32) -> KeyState {
        if state == 0 {
            KeyState::Released
        } else {
            KeyState::Pressed
        }
    }

    fn to_external_state(state: KeyState) -> i32 {
        match state {
            KeyState::Pressed => 1,
            KeyState::Released => 0,
        }
    }
}

impl KeyStateExt<bool, KeyState> for KeyState {
    fn from_external_state(state: bool) -> KeyState {
        if state {
            KeyState::Pressed
        } else {
            KeyState::Released
        }
    }

    fn to_external_state(state: KeyState) -> bool {
        state == KeyState::Pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_values() {
        assert_eq!(KeyState::from_external_state(0i32), KeyState::Released);
        assert_eq!(KeyState::from_external_state(1i32), KeyState::Pressed);
        assert_eq!(KeyState::from_external_state(2i32), KeyState::Pressed);
        assert_eq!(<KeyState as KeyStateExt<i32, KeyState>>::to_external_state(KeyState::Pressed), 1);
    }

    #[test]
    fn test_bool_values() {
        assert_eq!(KeyState::from_external_state(true), KeyState::Pressed);
        assert!(!<KeyState as KeyStateExt<bool, KeyState>>::to_external_state(KeyState::Released));
    }
}
