//! Entrada en sistemas Unix: stdin en modo no canónico y dispositivos
//! `/dev/input/eventN` (Linux).

use std::io;
use std::os::fd::RawFd;

use log::{debug, warn};

use crate::backend::raw_byte::ByteInput;
use crate::KeyboardError;

#[cfg(target_os = "linux")]
pub use self::evdev::EvdevDevice;

const STDIN: RawFd = libc::STDIN_FILENO;

/// Bloquea hasta que `fd` tenga datos para leer. No tiene timeout.
pub fn wait_readable(fd: RawFd) -> io::Result<()> {
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    loop {
        // SAFETY: `pollfd` es un arreglo válido de un elemento durante la llamada.
        let ready = unsafe { libc::poll(&mut pollfd, 1, -1) };
        if ready >= 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Lee hasta `buf.len()` bytes de `fd`. Una lectura que bloquearía cuenta como vacía.
fn read_nonblocking(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        // SAFETY: `buf` es válido para escritura de `buf.len()` bytes.
        let read = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
        if let Ok(read) = usize::try_from(read) {
            return Ok(read);
        }
        let err = io::Error::last_os_error();
        match err.kind() {
            io::ErrorKind::WouldBlock => return Ok(0),
            io::ErrorKind::Interrupted => continue,
            _ => return Err(err),
        }
    }
}

/// Configuración de la terminal aplicada mientras el guard vive.
///
/// Al crearse pone `fd` en modo no bloqueante y, si es una TTY, desactiva el
/// modo canónico, el eco y las señales de teclado. Al soltarse descarta la
/// entrada pendiente de la TTY y restaura los flags y el `termios` originales.
pub struct TerminalGuard {
    fd: RawFd,
    flags: libc::c_int,
    termios: Option<libc::termios>,
}

impl TerminalGuard {
    pub fn engage(fd: RawFd) -> io::Result<Self> {
        // SAFETY: F_GETFL no recibe argumentos adicionales.
        let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: F_SETFL recibe los flags como `c_int`.
        if unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) } < 0 {
            return Err(io::Error::last_os_error());
        }
        let mut guard = Self {
            fd,
            flags,
            termios: None,
        };

        // SAFETY: isatty sólo consulta el descriptor.
        if unsafe { libc::isatty(fd) } == 1 {
            // SAFETY: termios es una estructura POD; tcgetattr la inicializa.
            let mut original: libc::termios = unsafe { std::mem::zeroed() };
            if unsafe { libc::tcgetattr(fd, &mut original) } != 0 {
                return Err(io::Error::last_os_error());
            }
            let mut raw = original;
            raw.c_lflag &= !(libc::ICANON | libc::ECHO | libc::ISIG);
            raw.c_iflag &= !(libc::ISTRIP
                | libc::INLCR
                | libc::ICRNL
                | libc::IGNCR
                | libc::IXON
                | libc::IXOFF);
            // SAFETY: `raw` es una copia modificada de un termios válido.
            if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
                return Err(io::Error::last_os_error());
            }
            guard.termios = Some(original);
        } else {
            debug!("fd {fd} is not a tty, leaving line discipline untouched");
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Some(original) = self.termios.take() {
            // En modo evento stdin nunca se lee: lo tecleado quedaría para el shell.
            // SAFETY: tcflush sólo opera sobre la cola de entrada de `fd`.
            if unsafe { libc::tcflush(self.fd, libc::TCIFLUSH) } != 0 {
                warn!("could not flush terminal input: {}", io::Error::last_os_error());
            }
            // SAFETY: `original` fue leído con tcgetattr sobre el mismo fd.
            if unsafe { libc::tcsetattr(self.fd, libc::TCSANOW, &original) } != 0 {
                warn!("could not restore terminal mode: {}", io::Error::last_os_error());
            }
        }
        // SAFETY: restaura los flags leídos en `engage`.
        if unsafe { libc::fcntl(self.fd, libc::F_SETFL, self.flags) } < 0 {
            warn!("could not restore stdin flags: {}", io::Error::last_os_error());
        }
    }
}

/// stdin configurado como fuente de bytes crudos.
pub struct StdinTty {
    _terminal: TerminalGuard,
}

impl StdinTty {
    /// # Errores
    ///
    /// [`KeyboardError::Io`] si no se puede configurar stdin.
    pub fn open() -> Result<Self, KeyboardError> {
        let terminal =
            TerminalGuard::engage(STDIN).map_err(KeyboardError::io("configuring stdin"))?;
        Ok(Self {
            _terminal: terminal,
        })
    }
}

impl ByteInput for StdinTty {
    fn read_bytes(&mut self, buf: &mut [u8], wait: bool) -> io::Result<usize> {
        if wait {
            wait_readable(STDIN)?;
        }
        read_nonblocking(STDIN, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(fd: RawFd) -> libc::c_int {
        unsafe { libc::fcntl(fd, libc::F_GETFL) }
    }

    #[cfg(target_os = "linux")]
    fn termios(fd: RawFd) -> libc::termios {
        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        assert_eq!(unsafe { libc::tcgetattr(fd, &mut termios) }, 0);
        termios
    }

    #[cfg(target_os = "linux")]
    fn pending(fd: RawFd) -> libc::c_int {
        let mut pending: libc::c_int = 0;
        assert_eq!(unsafe { libc::ioctl(fd, libc::FIONREAD, &mut pending) }, 0);
        pending
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_terminal_guard_restores_tty() {
        let (mut master, mut slave) = (0, 0);
        let opened = unsafe {
            libc::openpty(
                &mut master,
                &mut slave,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
            )
        };
        assert_eq!(opened, 0);
        let saved_flags = flags(slave);
        let saved = termios(slave);

        let guard = TerminalGuard::engage(slave).unwrap();
        let raw = termios(slave);
        assert_eq!(raw.c_lflag & (libc::ICANON | libc::ECHO | libc::ISIG), 0);
        assert_eq!(raw.c_iflag & (libc::ICRNL | libc::IXON), 0);
        assert_ne!(flags(slave) & libc::O_NONBLOCK, 0);

        // Teclas que nadie leyó mientras el guard vivía.
        let typed = b"abc";
        assert_eq!(
            unsafe { libc::write(master, typed.as_ptr().cast(), typed.len()) },
            typed.len() as isize
        );
        wait_readable(slave).unwrap();
        assert!(pending(slave) > 0);

        drop(guard);
        let restored = termios(slave);
        assert_eq!(restored.c_lflag, saved.c_lflag);
        assert_eq!(restored.c_iflag, saved.c_iflag);
        assert_eq!(flags(slave), saved_flags);
        assert_eq!(pending(slave), 0);

        unsafe {
            libc::close(slave);
            libc::close(master);
        }
    }

    #[test]
    fn test_terminal_guard_on_pipe_only_toggles_nonblocking() {
        let mut fds = [0; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let [read_end, write_end] = fds;
        let saved_flags = flags(read_end);
        assert_eq!(saved_flags & libc::O_NONBLOCK, 0);

        let guard = TerminalGuard::engage(read_end).unwrap();
        assert!(guard.termios.is_none());
        assert_ne!(flags(read_end) & libc::O_NONBLOCK, 0);
        let mut buf = [0u8; 4];
        assert_eq!(read_nonblocking(read_end, &mut buf).unwrap(), 0);

        drop(guard);
        assert_eq!(flags(read_end), saved_flags);

        unsafe {
            libc::close(read_end);
            libc::close(write_end);
        }
    }
}

#[cfg(target_os = "linux")]
mod evdev {
    use std::fs::{self, File, OpenOptions};
    use std::io;
    use std::mem;
    use std::os::fd::AsRawFd;
    use std::os::unix::fs::OpenOptionsExt;
    use std::path::{Path, PathBuf};

    use log::{debug, trace};

    use super::{STDIN, TerminalGuard, read_nonblocking, wait_readable};
    use crate::backend::event_device::{EVENT_BATCH, EventInput, RawInputEvent};
    use crate::KeyboardError;

    /// Primeros tres bytes del bitmap de tipos de evento de un teclado:
    /// `EV_SYN | EV_KEY | EV_MSC`, nada, `EV_LED | EV_REP`.
    pub const KEYBOARD_EV_SIGNATURE: [u8; 3] = [0x13, 0x00, 0x12];

    const EV_BITS_LEN: u32 = 32;

    /// `EVIOCGBIT(0, len)`: bitmap de tipos de evento soportados.
    const fn eviocgbit_types(len: u32) -> u32 {
        const IOC_READ: u32 = 2;
        (IOC_READ << 30) | (len << 16) | ((b'E' as u32) << 8) | 0x20
    }

    /// Dispositivo de eventos abierto en modo no bloqueante.
    pub struct EvdevDevice {
        file: File,
        path: PathBuf,
        _terminal: TerminalGuard,
    }

    impl EvdevDevice {
        /// Sondea `dir/event0`, `dir/event1`... hasta encontrar un teclado.
        ///
        /// Se detiene en el primer índice que no existe. Los dispositivos que
        /// no se pueden abrir o consultar se saltan.
        ///
        /// # Errores
        ///
        /// [`KeyboardError::Io`] si el teclado se encontró pero stdin no se
        /// pudo configurar. `Ok(None)` si no hay teclado.
        pub fn probe(dir: &Path) -> Result<Option<Self>, KeyboardError> {
            for index in 0.. {
                let path = dir.join(format!("event{index}"));
                if fs::metadata(&path).is_err() {
                    debug!("probed {index} event devices under {}", dir.display());
                    return Ok(None);
                }
                let file = match OpenOptions::new()
                    .read(true)
                    .custom_flags(libc::O_NONBLOCK)
                    .open(&path)
                {
                    Ok(file) => file,
                    Err(err) => {
                        trace!("skipping {}: {err}", path.display());
                        continue;
                    }
                };
                match event_types(&file) {
                    Ok(bits) if bits[..3] == KEYBOARD_EV_SIGNATURE => {
                        debug!("keyboard event device at {}", path.display());
                        let terminal = TerminalGuard::engage(STDIN)
                            .map_err(KeyboardError::io("configuring stdin"))?;
                        return Ok(Some(Self {
                            file,
                            path,
                            _terminal: terminal,
                        }));
                    }
                    Ok(bits) => trace!("skipping {}: event types {:02x?}", path.display(), &bits[..3]),
                    Err(err) => trace!("skipping {}: {err}", path.display()),
                }
            }
            Ok(None)
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    fn event_types(file: &File) -> io::Result<[u8; EV_BITS_LEN as usize]> {
        let mut bits = [0u8; EV_BITS_LEN as usize];
        // SAFETY: el kernel escribe como máximo `EV_BITS_LEN` bytes en `bits`.
        let result = unsafe {
            libc::ioctl(
                file.as_raw_fd(),
                eviocgbit_types(EV_BITS_LEN) as libc::Ioctl,
                bits.as_mut_ptr(),
            )
        };
        if result < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(bits)
    }

    impl EventInput for EvdevDevice {
        fn read_events(&mut self, out: &mut Vec<RawInputEvent>, wait: bool) -> io::Result<()> {
            let fd = self.file.as_raw_fd();
            if wait {
                wait_readable(fd)?;
            }

            let size = mem::size_of::<libc::input_event>();
            // SAFETY: input_event es POD; un valor en ceros es válido.
            let mut raw: [libc::input_event; EVENT_BATCH] = unsafe { mem::zeroed() };
            // SAFETY: el arreglo ocupa exactamente `size * EVENT_BATCH` bytes.
            let bytes = unsafe {
                std::slice::from_raw_parts_mut(raw.as_mut_ptr().cast::<u8>(), size * EVENT_BATCH)
            };
            let read = read_nonblocking(fd, bytes)?;

            out.extend(raw[..read / size].iter().map(|event| RawInputEvent {
                kind: event.type_,
                code: event.code,
                value: event.value,
            }));
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_eviocgbit_request() {
            assert_eq!(eviocgbit_types(32), 0x8020_4520);
        }

        #[test]
        fn test_probe_stops_at_missing_device() {
            let dir = std::env::temp_dir().join(format!("orbit-input-empty-{}", std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            assert!(EvdevDevice::probe(&dir).unwrap().is_none());
            fs::remove_dir_all(&dir).unwrap();
        }

        #[test]
        fn test_probe_skips_non_keyboards() {
            let dir = std::env::temp_dir().join(format!("orbit-input-files-{}", std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            // Archivos regulares: se abren pero el ioctl falla.
            fs::write(dir.join("event0"), b"").unwrap();
            fs::write(dir.join("event1"), b"").unwrap();
            assert!(EvdevDevice::probe(&dir).unwrap().is_none());
            fs::remove_dir_all(&dir).unwrap();
        }
    }
}
