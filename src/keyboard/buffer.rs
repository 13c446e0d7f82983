//! Buffer de estado de teclas: una instantánea `código → presionada`.

use crate::keyboard::RawCode;

/// Una observación de input producida por un backend en una lectura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyObservation {
    pub code: RawCode,
    pub pressed: bool,
}

impl KeyObservation {
    pub fn pressed(code: RawCode) -> Self {
        Self { code, pressed: true }
    }

    pub fn released(code: RawCode) -> Self {
        Self { code, pressed: false }
    }
}

/// Entrada de un [`KeyStateBuffer`].
///
/// Existe desde la primera vez que se observa `code`: una tecla sin entrada
/// nunca fue tocada, lo cual no es lo mismo que estar liberada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStateEntry {
    pub code: RawCode,
    pub state: bool,
}

/// Mapa `código → estado` ordenado por inserción.
///
/// Los códigos son únicos. El buffer sólo crece: las entradas se agregan y
/// se sobrescriben, nunca se eliminan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStateBuffer {
    entries: Vec<KeyStateEntry>,
}

impl KeyStateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aplica una observación y retorna el índice de la entrada afectada.
    ///
    /// Si `code` ya tiene entrada se sobrescribe su estado; si no, se agrega
    /// una entrada nueva al final.
    pub fn apply(&mut self, code: RawCode, pressed: bool) -> usize {
        match self.position(code) {
            Some(index) => {
                self.entries[index].state = pressed;
                index
            }
            None => {
                self.entries.push(KeyStateEntry {
                    code,
                    state: pressed,
                });
                self.entries.len() - 1
            }
        }
    }

    /// Índice de la entrada de `code`, si existe.
    pub fn position(&self, code: RawCode) -> Option<usize> {
        self.entries.iter().position(|entry| entry.code == code)
    }

    /// Estado registrado para `code`; `None` si nunca fue observado.
    pub fn state(&self, code: RawCode) -> Option<bool> {
        self.position(code).map(|index| self.entries[index].state)
    }

    pub fn get(&self, index: usize) -> Option<&KeyStateEntry> {
        self.entries.get(index)
    }

    /// Marca todas las entradas como liberadas sin eliminarlas.
    pub fn release_all(&mut self) {
        for entry in &mut self.entries {
            entry.state = false;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyStateEntry> {
        self.entries.iter()
    }

    /// Códigos presionados, en orden de inserción.
    pub fn pressed_codes(&self) -> impl Iterator<Item = RawCode> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.state)
            .map(|entry| entry.code)
    }
}
