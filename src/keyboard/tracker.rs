//! # `Keyboard`
//!
//! El tracker de estado: dueño de los dos buffers (poll anterior y poll
//! actual) y de la fuente de eventos activa.
//!
//! ```text
//!            poll()
//!              │
//!   ┌──────────▼──────────┐      ┌───────────────────┐
//!   │ EventSourceExt      │ ───► │ KeyObservation[]  │
//!   │ (terminal / evdev)  │      └─────────┬─────────┘
//!   └─────────────────────┘                │ apply
//!                                          ▼
//!   previous ◄── copia ── current ◄────────┘
//!       │                    │
//!       └──── key_down / key_held / key_up ────► caller
//! ```
//!
//! ## Ciclo de vida
//!
//! `Uninitialized → Ready → Closed`. Mientras no está `Ready`, los polls no
//! hacen nada y todas las consultas retornan `false` (o `0`).

use log::{debug, trace, warn};

use crate::config::{KbMode, KeyboardConfig};
use crate::keyboard::{Key, KeyObservation, KeyState, KeyStateBuffer, KeyTable, RawCode};
use crate::platform::{self, InputClaim};
use crate::traits::keys::{KeyExt, KeyStateExt};
use crate::traits::source::EventSourceExt;
use crate::traits::state::InputStateExt;
use crate::KeyboardError;

/// Tracker de teclado basado en polls.
///
/// No usa hilos ni locks: todo cambio ocurre dentro de [`poll`](Self::poll)
/// o [`read_input`](Self::read_input), en el hilo que lo invoca. Para
/// compartirlo entre hilos ver [`SharedKeyboard`](crate::SharedKeyboard).
///
/// # Ejemplo
///
/// ```rust,no_run
/// use orbit_input_term::{InputStateExt, Key, Keyboard, KeyboardConfig};
///
/// let mut keyboard = Keyboard::new();
/// if let Err(err) = keyboard.init(&KeyboardConfig::default()) {
///     eprintln!("sin teclado: {err}");
/// }
///
/// loop {
///     keyboard.poll();
///     if keyboard.is_just_press(Key::Escape) {
///         break;
///     }
///     if keyboard.is_pressed(Key::W) {
///         // avanzar
///     }
/// }
/// keyboard.close();
/// ```
#[derive(Default)]
pub struct Keyboard {
    lifecycle: Lifecycle,
}

#[derive(Default)]
enum Lifecycle {
    #[default]
    Uninitialized,
    Ready(Session),
    Closed,
}

struct Session {
    source: Box<dyn EventSourceExt>,
    previous: KeyStateBuffer,
    current: KeyStateBuffer,
    observations: Vec<KeyObservation>,
    polls: u64,
    // Se libera después de `source`.
    _claim: Option<InputClaim>,
}

impl Session {
    fn new(source: Box<dyn EventSourceExt>, claim: Option<InputClaim>) -> Self {
        Self {
            source,
            previous: KeyStateBuffer::new(),
            current: KeyStateBuffer::new(),
            observations: Vec::new(),
            polls: 0,
            _claim: claim,
        }
    }

    fn poll(&mut self, wait: bool) -> usize {
        self.observations.clear();
        if let Err(err) = self.source.read_observations(wait, &mut self.observations) {
            warn!("{err}; key state left unchanged");
            return self.current.len();
        }
        self.polls += 1;

        if !self.current.is_empty() {
            self.previous.clone_from(&self.current);
        }
        if !self.source.reports_releases() {
            self.current.release_all();
            self.previous.release_all();
        }

        let mut touched = self.current.len();
        for observation in &self.observations {
            touched = self.current.apply(observation.code, observation.pressed);
            trace!(
                "{} {:#x} {} at #{touched}",
                self.source.backend_name(),
                observation.code,
                if observation.pressed { "down" } else { "up" },
            );
        }
        touched
    }
}

impl Keyboard {
    /// Crea un tracker sin inicializar.
    pub const fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Configura la plataforma y abre la fuente de eventos de `config.mode`.
    ///
    /// No hace nada si el tracker ya está listo. Se puede volver a llamar
    /// después de [`close`](Self::close).
    ///
    /// # Errores
    ///
    /// - [`KeyboardError::AlreadyClaimed`] si otro `Keyboard` del proceso ya
    ///   tiene la terminal.
    /// - [`KeyboardError::NoKeyboardDevice`] si en modo evento ningún
    ///   dispositivo parece un teclado (y no se pidió caer a la terminal).
    /// - [`KeyboardError::UnsupportedMode`] o [`KeyboardError::Io`] si la
    ///   plataforma no permite el modo o falla su configuración.
    ///
    /// En cualquier caso el tracker queda sin inicializar y la terminal sin
    /// cambios; las consultas siguen retornando `false`.
    pub fn init(&mut self, config: &KeyboardConfig) -> Result<(), KeyboardError> {
        if self.is_ready() {
            debug!("keyboard already initialized, ignoring init");
            return Ok(());
        }
        let claim = InputClaim::acquire()?;
        let source = platform::open_source(config)?;
        debug!(
            "keyboard ready on {} backend (requested {})",
            source.backend_name(),
            config.mode
        );
        self.lifecycle = Lifecycle::Ready(Session::new(source, Some(claim)));
        Ok(())
    }

    /// Instala una fuente ya construida, sin tocar la plataforma.
    ///
    /// Retorna `false` (y descarta `source`) si el tracker ya estaba listo.
    pub fn init_with<S>(&mut self, source: S) -> bool
    where
        S: EventSourceExt + 'static,
    {
        if self.is_ready() {
            debug!("keyboard already initialized, dropping {}", source.backend_name());
            return false;
        }
        debug!("keyboard ready on {} backend", source.backend_name());
        self.lifecycle = Lifecycle::Ready(Session::new(Box::new(source), None));
        true
    }

    /// Libera la fuente de eventos y restaura la terminal.
    ///
    /// No hace nada si el tracker no está listo.
    pub fn close(&mut self) {
        if !self.is_ready() {
            return;
        }
        if let Lifecycle::Ready(session) = std::mem::replace(&mut self.lifecycle, Lifecycle::Closed) {
            debug!(
                "closing {} keyboard after {} polls ({} keys tracked)",
                session.source.backend_name(),
                session.polls,
                session.current.len()
            );
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Ready(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Closed)
    }

    fn session(&self) -> Option<&Session> {
        match &self.lifecycle {
            Lifecycle::Ready(session) => Some(session),
            _ => None,
        }
    }

    /// Modo de la fuente activa.
    pub fn mode(&self) -> Option<KbMode> {
        self.session().map(|session| session.source.mode())
    }

    pub fn backend_name(&self) -> Option<&'static str> {
        self.session().map(|session| session.source.backend_name())
    }

    /// Tabla de traducción de la fuente activa.
    pub fn table(&self) -> Option<&'static KeyTable> {
        self.session().map(|session| session.source.table())
    }

    /// Buffer del poll anterior.
    pub fn previous(&self) -> Option<&KeyStateBuffer> {
        self.session().map(|session| &session.previous)
    }

    /// Buffer del poll actual.
    pub fn current(&self) -> Option<&KeyStateBuffer> {
        self.session().map(|session| &session.current)
    }

    /// Polls completados desde la inicialización.
    pub fn polls(&self) -> u64 {
        self.session().map_or(0, |session| session.polls)
    }

    /// Actualiza el estado con una lectura de la fuente.
    ///
    /// Retorna el índice, dentro del buffer actual, de la última entrada
    /// afectada. Si la lectura no trajo nada (o falló) retorna la longitud
    /// del buffer, es decir, un índice fuera de rango. Sin inicializar retorna `0`.
    pub fn read_input(&mut self, wait: bool) -> usize {
        match &mut self.lifecycle {
            Lifecycle::Ready(session) => session.poll(wait),
            _ => 0,
        }
    }

    /// Poll no bloqueante.
    pub fn poll(&mut self) {
        self.read_input(false);
    }

    /// Espera una tecla y retorna su código crudo.
    ///
    /// Si la lectura no afectó ninguna entrada retorna el índice devuelto
    /// por [`read_input`](Self::read_input). Sin inicializar retorna `0`.
    pub fn get_key(&mut self) -> RawCode {
        let index = self.read_input(true);
        self.current()
            .and_then(|current| current.get(index))
            .map(|entry| entry.code)
            .unwrap_or_else(|| RawCode::try_from(index).unwrap_or(RawCode::MAX))
    }

    /// Flanco de subida: `code` está presionada ahora y no lo estaba en el
    /// poll anterior (o no existía en él).
    pub fn key_down(&self, code: RawCode) -> bool {
        self.session().is_some_and(|session| {
            session.current.state(code) == Some(true) && session.previous.state(code) != Some(true)
        })
    }

    /// `code` está presionada en el poll actual.
    pub fn key_held(&self, code: RawCode) -> bool {
        self.session()
            .is_some_and(|session| session.current.state(code) == Some(true))
    }

    /// Flanco de bajada: `code` estaba presionada en el poll anterior y
    /// ahora está liberada.
    pub fn key_up(&self, code: RawCode) -> bool {
        self.session().is_some_and(|session| {
            session.previous.state(code) == Some(true) && session.current.state(code) == Some(false)
        })
    }

    /// Código crudo de `key` en el backend activo.
    pub fn code_of(&self, key: Key) -> Option<RawCode> {
        self.table()?.to_backend_key(key)
    }

    /// Código de `key` si además es la posición a la que resuelve.
    fn resolved_code(&self, key: Key) -> Option<RawCode> {
        self.code_of(key).filter(|&code| self.key_of(code) == Some(key))
    }

    /// Posición lógica de `code` en el backend activo.
    pub fn key_of(&self, code: RawCode) -> Option<Key> {
        self.table()?.from_backend_key(code)
    }
}

impl Drop for Keyboard {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Keyboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.session() {
            Some(session) => f
                .debug_struct("Keyboard")
                .field("backend", &session.source.backend_name())
                .field("polls", &session.polls)
                .field("previous", &session.previous)
                .field("current", &session.current)
                .finish(),
            None if self.is_closed() => f.write_str("Keyboard(closed)"),
            None => f.write_str("Keyboard(uninitialized)"),
        }
    }
}

/// Las consultas por [`Key`] sólo responden por la posición que
/// [`key_of`](Keyboard::key_of) asigna a cada código. En la terminal `1` y
/// `Numpad1` llegan como el mismo byte: la tecla cuenta como `Digit1`.
impl InputStateExt<Key, KeyState> for Keyboard {
    fn state_of(&self, key: Key) -> Option<KeyState> {
        let code = self.resolved_code(key)?;
        let pressed = self.current()?.state(code)?;
        Some(KeyState::from_external_state(pressed))
    }

    fn is_just_press(&self, key: Key) -> bool {
        self.resolved_code(key).is_some_and(|code| self.key_down(code))
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.resolved_code(key).is_some_and(|code| self.key_held(code))
    }

    fn is_released(&self, key: Key) -> bool {
        self.state_of(key) == Some(KeyState::Released)
    }

    fn is_just_released(&self, key: Key) -> bool {
        self.resolved_code(key).is_some_and(|code| self.key_up(code))
    }

    fn keys_pressed(&self) -> Vec<Key> {
        let Some(current) = self.current() else {
            return Vec::new();
        };
        current
            .pressed_codes()
            .filter_map(|code| self.key_of(code))
            .collect()
    }
}
