//! Handle compartido entre hilos.
//!
//! El [`Keyboard`] no usa locks internos. Si varios hilos necesitan consultar
//! o hacer polls, deben serializar el acceso; [`SharedKeyboard`] lo hace con
//! el mutex seleccionado por las features del crate:
//!
//! - `parking_lot`: `parking_lot::Mutex`
//! - `std_lock` (por defecto): `std::sync::Mutex`

use std::sync::Arc;

use crate::Keyboard;

#[cfg(feature = "parking_lot")]
type Lock<T> = parking_lot::Mutex<T>;

#[cfg(not(feature = "parking_lot"))]
type Lock<T> = std::sync::Mutex<T>;

/// `Arc<Mutex<Keyboard>>` con acceso por closure.
///
/// ```rust
/// use orbit_input_term::{Keyboard, SharedKeyboard};
///
/// let shared = SharedKeyboard::new(Keyboard::new());
/// let other = shared.clone();
/// std::thread::spawn(move || other.with(|keyboard| keyboard.poll()))
///     .join()
///     .unwrap();
/// assert!(!shared.with(|keyboard| keyboard.is_ready()));
/// ```
#[derive(Debug, Clone)]
pub struct SharedKeyboard {
    inner: Arc<Lock<Keyboard>>,
}

impl SharedKeyboard {
    pub fn new(keyboard: Keyboard) -> Self {
        Self {
            inner: Arc::new(Lock::new(keyboard)),
        }
    }

    /// Ejecuta `f` con acceso exclusivo al teclado.
    pub fn with<R>(&self, f: impl FnOnce(&mut Keyboard) -> R) -> R {
        #[cfg(feature = "parking_lot")]
        let mut guard = self.inner.lock();
        #[cfg(not(feature = "parking_lot"))]
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut *guard)
    }
}

impl From<Keyboard> for SharedKeyboard {
    fn from(keyboard: Keyboard) -> Self {
        Self::new(keyboard)
    }
}
