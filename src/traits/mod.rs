//! Protocolo de traits del runtime: traducción de teclas, consulta de estado
//! y fuentes de eventos.

pub mod keys;
pub mod source;
pub mod state;

pub use keys::{KeyExt, KeyStateExt};
pub use source::EventSourceExt;
pub use state::InputStateExt;
