use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::KbMode;

/// Errores del runtime de teclado.
///
/// Sólo la inicialización los propaga. Durante un poll se registran con
/// `log` y el poll se trata como vacío.
#[derive(Debug, Error)]
pub enum KeyboardError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("no keyboard event device found under {}", dir.display())]
    NoKeyboardDevice { dir: PathBuf },

    #[error("the input source is already claimed by another keyboard")]
    AlreadyClaimed,

    #[error("keyboard mode `{0}` is not supported on this platform")]
    UnsupportedMode(KbMode),

    #[error("read from {backend} failed: {source}")]
    ReadFailed {
        backend: &'static str,
        #[source]
        source: io::Error,
    },
}

impl KeyboardError {
    pub(crate) fn io(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| KeyboardError::Io { context, source }
    }
}
