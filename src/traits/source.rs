/// # Trait `EventSourceExt`
///
/// Define una **fuente de eventos de teclado**: el backend del que el
/// [`Keyboard`](crate::Keyboard) obtiene observaciones en cada poll.
///
/// Se elige una sola vez al inicializar y queda fija durante toda la vida
/// del tracker. Hay tres variantes incluidas:
///
/// | Backend                                               | Reporta liberaciones | Tabla                      |
/// |-------------------------------------------------------|----------------------|----------------------------|
/// | [`RawByteSource`](crate::RawByteSource)               | no                   | [`KeyTable::TERMINAL`]     |
/// | [`EventDeviceSource`](crate::EventDeviceSource)       | sí                   | [`KeyTable::EVENT_DEVICE`] |
/// | `ConsoleSource` (sólo Windows)                        | sí                   | [`KeyTable::CONSOLE`]      |
///
/// ## Contrato de lectura
///
/// [`read_observations`](Self::read_observations) hace **una** lectura:
///
/// - con `wait = true` bloquea (sin timeout) hasta que el sistema reporte input;
/// - con `wait = false` retorna de inmediato, aunque no haya nada;
/// - una lectura vacía **no** es un error: simplemente no agrega observaciones.
///
/// Un backend que no puede observar liberaciones (`reports_releases() == false`)
/// reporta como máximo una tecla presionada por lectura; el tracker se encarga
/// de liberar el resto.
///
/// ## Recursos
///
/// Los recursos del sistema (modo de la terminal, descriptor del dispositivo)
/// pertenecen a la fuente y se liberan en su `Drop`, exactamente una vez.
///
/// ## Ejemplo: backend propio
///
/// ```rust
/// use orbit_input_term::{
///     EventSourceExt, KbMode, Keyboard, KeyboardError, KeyObservation, KeyTable,
/// };
///
/// struct Scripted(Vec<KeyObservation>);
///
/// impl EventSourceExt for Scripted {
///     fn backend_name(&self) -> &'static str {
///         "scripted"
///     }
///     fn mode(&self) -> KbMode {
///         KbMode::EventDevice
///     }
///     fn table(&self) -> &'static KeyTable {
///         &KeyTable::EVENT_DEVICE
///     }
///     fn reports_releases(&self) -> bool {
///         true
///     }
///     fn read_observations(
///         &mut self,
///         _wait: bool,
///         out: &mut Vec<KeyObservation>,
///     ) -> Result<(), KeyboardError> {
///         out.append(&mut self.0);
///         Ok(())
///     }
/// }
///
/// let mut keyboard = Keyboard::new();
/// assert!(keyboard.init_with(Scripted(vec![KeyObservation::pressed(30)])));
/// keyboard.poll();
/// assert!(keyboard.key_down(30));
/// ```
///
/// [`KeyTable::TERMINAL`]: crate::KeyTable::TERMINAL
/// [`KeyTable::EVENT_DEVICE`]: crate::KeyTable::EVENT_DEVICE
/// [`KeyTable::CONSOLE`]: crate::KeyTable::CONSOLE
pub trait EventSourceExt: Send {
    /// Descripción corta del backend, para logs y UI de debug.
    ///
    /// ```text
    /// "terminal", "event-device" o "console"
    /// ```
    fn backend_name(&self) -> &'static str;

    /// Modo al que corresponde esta fuente.
    fn mode(&self) -> crate::KbMode;

    /// Tabla de traducción de los códigos que produce esta fuente.
    fn table(&self) -> &'static crate::KeyTable;

    /// `true` si el backend observa liberaciones de forma explícita.
    fn reports_releases(&self) -> bool;

    /// Realiza una lectura y agrega a `out` las observaciones obtenidas, en orden.
    ///
    /// # Errores
    ///
    /// Retorna error si el sistema reporta un fallo de lectura. El tracker lo
    /// registra y trata el poll como vacío.
    fn read_observations(
        &mut self,
        wait: bool,
        out: &mut Vec<crate::KeyObservation>,
    ) -> Result<(), crate::KeyboardError>;
}
