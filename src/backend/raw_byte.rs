//! Backend de bytes crudos de la terminal.
//!
//! Una lectura de stdin devuelve hasta [`READ_LEN`] bytes. Las teclas
//! especiales llegan como secuencias de escape (`ESC [ A` para la flecha
//! arriba, `ESC [ 1 5 ~` para F5...), que [`decode_sequence`] reduce a un
//! único código.
//!
//! Este backend no ve liberaciones ni varias teclas simultáneas: cada
//! lectura reporta a lo sumo una tecla presionada. Si dos secuencias llegan
//! en la misma lectura, se decodifican juntas y el código resultante no
//! corresponde a ninguna de las dos.

use std::io;

use log::trace;

use crate::keyboard::{KeyObservation, KeyTable, RawCode};
use crate::{EventSourceExt, KbMode, KeyboardError};

/// Tamaño máximo de una lectura.
pub const READ_LEN: usize = 16;

/// Cantidad máxima de bytes que componen un código.
const MAX_SEQUENCE_BYTES: usize = 4;

/// Reduce los bytes de una lectura a un código.
///
/// Recorre el buffer desde el final hacia el inicio, salta los ceros finales
/// y acumula hasta cuatro bytes, el último en el byte menos significativo.
///
/// ```rust
/// use orbit_input_term::decode_sequence;
///
/// assert_eq!(decode_sequence(b"a"), 0x61);
/// assert_eq!(decode_sequence(b"\x1b[A"), 0x1b5b41);
/// assert_eq!(decode_sequence(b"\x1b[15~"), 0x5b31357e);
/// ```
pub fn decode_sequence(bytes: &[u8]) -> RawCode {
    bytes
        .iter()
        .rev()
        .skip_while(|&&byte| byte == 0)
        .take(MAX_SEQUENCE_BYTES)
        .enumerate()
        .fold(0, |code, (shift, &byte)| code | RawCode::from(byte) << (shift * 8))
}

/// Origen de bytes para [`RawByteSource`].
pub trait ByteInput: Send {
    /// Lee hasta `buf.len()` bytes y retorna cuántos se leyeron.
    ///
    /// Con `wait = true` bloquea hasta que haya datos; con `wait = false`
    /// retorna `Ok(0)` si no hay nada disponible.
    fn read_bytes(&mut self, buf: &mut [u8], wait: bool) -> io::Result<usize>;
}

/// Fuente de eventos sobre bytes crudos.
#[derive(Debug)]
pub struct RawByteSource<I> {
    input: I,
}

impl<I: ByteInput> RawByteSource<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

impl<I: ByteInput> EventSourceExt for RawByteSource<I> {
    fn backend_name(&self) -> &'static str {
        "terminal"
    }

    fn mode(&self) -> KbMode {
        KbMode::Terminal
    }

    fn table(&self) -> &'static KeyTable {
        &KeyTable::TERMINAL
    }

    fn reports_releases(&self) -> bool {
        false
    }

    fn read_observations(
        &mut self,
        wait: bool,
        out: &mut Vec<KeyObservation>,
    ) -> Result<(), KeyboardError> {
        let mut buf = [0u8; READ_LEN];
        let read = self
            .input
            .read_bytes(&mut buf, wait)
            .map_err(|source| KeyboardError::ReadFailed {
                backend: self.backend_name(),
                source,
            })?;
        if read == 0 {
            return Ok(());
        }

        let code = decode_sequence(&buf[..read]);
        trace!("terminal read {:02x?} -> {code:#x}", &buf[..read]);
        out.push(KeyObservation::pressed(code));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::Key;

    struct Chunks(VecDeque<Vec<u8>>);

    impl ByteInput for Chunks {
        fn read_bytes(&mut self, buf: &mut [u8], _wait: bool) -> io::Result<usize> {
            let Some(chunk) = self.0.pop_front() else {
                return Ok(0);
            };
            let len = chunk.len().min(buf.len());
            buf[..len].copy_from_slice(&chunk[..len]);
            Ok(len)
        }
    }

    #[test]
    fn test_decode_single_byte() {
        assert_eq!(decode_sequence(&[0x61]), 0x61);
    }

    #[test]
    fn test_decode_skips_trailing_zeros() {
        assert_eq!(decode_sequence(&[0x1b, 0x5b, 0x41, 0, 0, 0]), 0x1b5b41);
    }

    #[test]
    fn test_decode_keeps_inner_zeros() {
        assert_eq!(decode_sequence(&[0x01, 0x00, 0x02]), 0x010002);
    }

    #[test]
    fn test_decode_keeps_last_four_bytes() {
        assert_eq!(decode_sequence(b"\x1b[24~"), 0x5b32347e);
        assert_eq!(
            decode_sequence(b"\x1b[24~"),
            KeyTable::TERMINAL.raw_code(Key::F12).unwrap()
        );
    }

    #[test]
    fn test_decode_empty_and_all_zero() {
        assert_eq!(decode_sequence(&[]), 0);
        assert_eq!(decode_sequence(&[0; READ_LEN]), 0);
    }

    #[test]
    fn test_decode_matches_terminal_table() {
        let cases: [(&[u8], Key); 5] = [
            (b"\x1bOP", Key::F1),
            (b"\x1b[H", Key::Home),
            (b"\x1b[3~", Key::Delete),
            (b"\x1b[D", Key::ArrowLeft),
            (b"\x7f", Key::Backspace),
        ];
        for (bytes, key) in cases {
            assert_eq!(KeyTable::TERMINAL.key_for(decode_sequence(bytes)), Some(key));
        }
    }

    #[test]
    fn test_read_reports_one_pressed_key() {
        let mut source = RawByteSource::new(Chunks(VecDeque::from([b"\x1b[A".to_vec()])));
        let mut out = Vec::new();
        source.read_observations(false, &mut out).unwrap();
        assert_eq!(out, vec![KeyObservation::pressed(0x1b5b41)]);
    }

    #[test]
    fn test_empty_read_reports_nothing() {
        let mut source = RawByteSource::new(Chunks(VecDeque::new()));
        let mut out = Vec::new();
        source.read_observations(false, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
