//! # Crate `orbit_input_term`
//!
//! **Runtime de teclado para terminales** compatible con el protocolo de
//! input de **Orbit Engine**.
//!
//! La entrada estándar de una terminal entrega texto línea a línea: no dice
//! cuándo una tecla se soltó ni si varias están presionadas a la vez. Este
//! crate mantiene el estado de cada tecla entre polls para que un programa
//! interactivo (un juego en la consola, por ejemplo) pueda preguntar:
//!
//! - ¿se **acaba de presionar**? ([`Keyboard::key_down`])
//! - ¿está **presionada**? ([`Keyboard::key_held`])
//! - ¿se **acaba de soltar**? ([`Keyboard::key_up`])
//!
//! ---
//!
//! ## Backends
//!
//! | Modo                     | Plataforma | Liberaciones | Varias teclas |
//! |--------------------------|------------|--------------|---------------|
//! | [`KbMode::Terminal`]     | Unix       | no           | no            |
//! | [`KbMode::EventDevice`]  | Linux      | sí           | sí            |
//! | [`KbMode::Console`]      | Windows    | sí           | sí            |
//!
//! El modo terminal lee bytes crudos de stdin y decodifica secuencias de
//! escape; cada poll reporta a lo sumo una tecla presionada y todas las demás
//! se consideran liberadas. El modo evento lee `/dev/input/eventN` y
//! normalmente requiere permisos sobre el dispositivo.
//!
//! ---
//!
//! ## Ejemplo
//!
//! ```rust,no_run
//! use orbit_input_term::{InputStateExt, KbMode, Key, Keyboard, KeyboardConfig};
//!
//! let mut keyboard = Keyboard::new();
//! let config = KeyboardConfig::new(KbMode::EventDevice).with_fallback_to_terminal(true);
//! keyboard.init(&config)?;
//!
//! loop {
//!     keyboard.poll();
//!     if keyboard.is_just_press(Key::Escape) {
//!         break;
//!     }
//!     if keyboard.is_pressed(Key::ArrowLeft) {
//!         // mover a la izquierda
//!     }
//! }
//! keyboard.close();
//! # Ok::<(), orbit_input_term::KeyboardError>(())
//! ```
//!
//! ---
//!
//! ## Contenido del crate
//!
//! ### Traits
//! - [`KeyExt<B, N>`]: Traduce entre códigos crudos y posiciones lógicas
//! - [`KeyStateExt<I, O>`]: Traduce estados nativos a [`KeyState`]
//! - [`InputStateExt<K, S>`]: Consultas de estado por tecla lógica
//! - [`EventSourceExt`]: Fuente de eventos de un backend
//!
//! ### Tipos
//! - [`Keyboard`]: El tracker (dos buffers + fuente activa)
//! - [`Key`], [`KeyTable`]: Espacio canónico y tablas por backend
//! - [`KeyStateBuffer`]: Instantánea `código → estado`
//! - [`SharedKeyboard`]: Handle para compartir el tracker entre hilos
//!
//! ---
//!
//! ## Features
//!
//! - `std_lock` (por defecto): [`SharedKeyboard`] usa `std::sync::Mutex`
//! - `parking_lot`: [`SharedKeyboard`] usa `parking_lot::Mutex`
//!
//! ## Logging
//!
//! El crate emite registros con [`log`](https://docs.rs/log) (`debug` para el
//! ciclo de vida, `trace` por observación, `warn` para lecturas fallidas) y
//! nunca instala un logger.

pub mod backend;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod platform;
pub mod shared;
pub mod traits;

pub use backend::{
    ByteInput, EV_KEY, EventDeviceSource, EventInput, RawByteSource, RawInputEvent,
    decode_sequence,
};
pub use config::{DEFAULT_DEVICE_DIR, KbMode, KeyboardConfig, ParseKbModeError};
pub use error::KeyboardError;
pub use keyboard::{
    KEY_COUNT, Key, KeyObservation, KeyState, KeyStateBuffer, KeyStateEntry, KeyTable, Keyboard,
    RawCode,
};
pub use shared::SharedKeyboard;
pub use traits::{EventSourceExt, InputStateExt, KeyExt, KeyStateExt};
