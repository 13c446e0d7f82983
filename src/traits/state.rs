use std::hash::Hash;

/// # Trait `InputStateExt`
///
/// Define la interfaz de **consulta del estado del teclado** entre dos polls.
///
/// El runtime guarda dos instantáneas: la del poll anterior y la del poll
/// actual. Las consultas de flanco (`is_just_press`, `is_just_released`)
/// comparan ambas; las de nivel (`is_pressed`, `is_released`) sólo miran la
/// actual.
///
/// Una tecla que nunca fue observada **no** está liberada: todas las
/// consultas retornan `false` para ella y [`state_of`](Self::state_of)
/// retorna `None`.
///
/// ## Parámetros genéricos
/// - `K`: Tipo de tecla (por ejemplo, [`Key`](crate::Key)).
/// - `S`: Tipo de estado (por ejemplo, [`KeyState`](crate::KeyState)).
///
/// ## Ejemplo de uso
/// ```rust,ignore
/// use orbit_input_term::{InputStateExt, Key, KeyState};
///
/// fn move_player<I: InputStateExt<Key, KeyState>>(input: &I, player: &mut Player) {
///     if input.is_just_press(Key::Space) {
///         player.jump();
///     }
///     if input.is_pressed(Key::D) {
///         player.step_right();
///     }
/// }
/// ```
pub trait InputStateExt<K, S>
where
    K: Copy + PartialEq + Hash,
    S: Copy + PartialEq,
{
    /// Estado registrado en el poll actual, o `None` si la tecla nunca fue observada.
    fn state_of(&self, key: K) -> Option<S>;

    /// Retorna `true` si la tecla pasó de liberada a presionada en el último poll.
    ///
    /// Una tecla observada por primera vez y ya presionada también cuenta como flanco.
    fn is_just_press(&self, key: K) -> bool;

    /// Retorna `true` si la tecla está presionada en el poll actual, sin importar el anterior.
    fn is_pressed(&self, key: K) -> bool;

    /// Retorna `true` si la tecla fue observada y está liberada.
    fn is_released(&self, key: K) -> bool;

    /// Retorna `true` si la tecla pasó de presionada a liberada en el último poll.
    fn is_just_released(&self, key: K) -> bool;

    /// Verifica si todas las teclas de la combinación están presionadas.
    ///
    /// Una combinación vacía nunca está activa.
    fn active_combo(&self, combo: &[K]) -> bool {
        !combo.is_empty() && combo.iter().all(|&key| self.is_pressed(key))
    }

    /// Retorna `true` si **cualquier tecla** se encuentra presionada.
    fn any_pressed(&self) -> bool {
        !self.keys_pressed().is_empty()
    }

    /// Retorna todas las teclas actualmente presionadas.
    fn keys_pressed(&self) -> Vec<K>;
}
