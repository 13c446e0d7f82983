use std::collections::VecDeque;
use std::io;

use orbit_input_term::{
    ByteInput, EventDeviceSource, EventInput, InputStateExt, KbMode, Key, KeyObservation,
    Keyboard, KeyboardConfig, KeyboardError, RawByteSource, RawInputEvent,
};
use pretty_assertions::assert_eq;
use serial_test::serial;

/// Bytes entregados lectura por lectura.
#[derive(Default)]
struct Typed(VecDeque<Vec<u8>>);

impl Typed {
    fn new<const N: usize>(reads: [&[u8]; N]) -> Self {
        Self(reads.iter().map(|read| read.to_vec()).collect())
    }
}

impl ByteInput for Typed {
    fn read_bytes(&mut self, buf: &mut [u8], _wait: bool) -> io::Result<usize> {
        let Some(read) = self.0.pop_front() else {
            return Ok(0);
        };
        let len = read.len().min(buf.len());
        buf[..len].copy_from_slice(&read[..len]);
        Ok(len)
    }
}

/// Lotes de eventos entregados lectura por lectura.
#[derive(Default)]
struct Device(VecDeque<io::Result<Vec<RawInputEvent>>>);

impl Device {
    fn push(mut self, batch: Vec<RawInputEvent>) -> Self {
        self.0.push_back(Ok(batch));
        self
    }

    fn fail(mut self) -> Self {
        self.0.push_back(Err(io::Error::other("device unplugged")));
        self
    }
}

impl EventInput for Device {
    fn read_events(&mut self, out: &mut Vec<RawInputEvent>, _wait: bool) -> io::Result<()> {
        if let Some(batch) = self.0.pop_front() {
            out.extend(batch?);
        }
        Ok(())
    }
}

fn event_keyboard(device: Device) -> Keyboard {
    let mut keyboard = Keyboard::new();
    assert!(keyboard.init_with(EventDeviceSource::new(device)));
    keyboard
}

fn terminal_keyboard(typed: Typed) -> Keyboard {
    let mut keyboard = Keyboard::new();
    assert!(keyboard.init_with(RawByteSource::new(typed)));
    keyboard
}

#[test]
fn test_event_device_press_and_release() {
    let mut keyboard = event_keyboard(
        Device::default()
            .push(vec![RawInputEvent::key(30, 1)])
            .push(vec![RawInputEvent::key(30, 0)]),
    );

    keyboard.poll();
    assert!(keyboard.key_down(30));
    assert!(keyboard.key_held(30));
    assert!(!keyboard.key_up(30));

    keyboard.poll();
    assert!(!keyboard.key_down(30));
    assert!(!keyboard.key_held(30));
    assert!(keyboard.key_up(30));
}

#[test]
fn test_event_device_simultaneous_keys() {
    let mut keyboard = event_keyboard(
        Device::default()
            .push(vec![
                RawInputEvent::key(42, 1),
                RawInputEvent { kind: 0, code: 0, value: 0 },
                RawInputEvent::key(30, 1),
            ])
            .push(vec![RawInputEvent::key(30, 0)]),
    );

    keyboard.poll();
    assert!(keyboard.active_combo(&[Key::ShiftLeft, Key::A]));
    assert_eq!(keyboard.current().unwrap().len(), 2);

    keyboard.poll();
    assert!(keyboard.is_just_released(Key::A));
    assert!(keyboard.is_pressed(Key::ShiftLeft));
    assert!(!keyboard.is_just_press(Key::ShiftLeft));
    assert_eq!(keyboard.keys_pressed(), vec![Key::ShiftLeft]);
}

#[test]
fn test_event_device_read_failure_is_absorbed() {
    let mut keyboard = event_keyboard(
        Device::default()
            .push(vec![RawInputEvent::key(30, 1)])
            .fail(),
    );

    keyboard.poll();
    let previous = keyboard.previous().cloned();
    let current = keyboard.current().cloned();

    keyboard.poll();
    assert_eq!(keyboard.previous().cloned(), previous);
    assert_eq!(keyboard.current().cloned(), current);
    assert!(keyboard.key_down(30));
}

#[test]
fn test_terminal_single_byte_press() {
    let mut keyboard = terminal_keyboard(Typed::new([b"q", b"a"]));

    keyboard.poll();
    assert!(keyboard.is_pressed(Key::Q));

    assert_eq!(keyboard.read_input(false), 1);
    let current = keyboard.current().unwrap();
    assert_eq!(current.pressed_codes().collect::<Vec<_>>(), vec![0x61]);
    assert_eq!(current.state(0x71), Some(false));
    assert!(keyboard.key_down(0x61));
    assert!(keyboard.is_just_press(Key::A));
    assert!(!keyboard.is_pressed(Key::Q));
}

#[test]
fn test_terminal_escape_sequences() {
    let mut keyboard = terminal_keyboard(Typed::new([b"\x1b[A", b"\x1b[15~", b"\x1b"]));

    assert_eq!(keyboard.get_key(), 0x1b5b41);
    assert!(keyboard.is_pressed(Key::ArrowUp));
    let code = keyboard.get_key();
    assert_eq!(keyboard.key_of(code), Some(Key::F5));
    keyboard.poll();
    assert!(keyboard.is_just_press(Key::Escape));
    assert!(!keyboard.is_pressed(Key::F5));
}

#[test]
fn test_terminal_never_reports_key_up() {
    let mut keyboard = terminal_keyboard(Typed::new([b"a", b"a"]));
    for _ in 0..4 {
        keyboard.poll();
        assert!(!keyboard.key_up(0x61));
    }
}

#[test]
fn test_init_twice_keeps_first_backend() {
    let mut keyboard = event_keyboard(Device::default().push(vec![RawInputEvent::key(1, 1)]));
    assert!(!keyboard.init_with(RawByteSource::new(Typed::default())));
    assert_eq!(keyboard.mode(), Some(KbMode::EventDevice));

    // Con el tracker listo `init` no toca la plataforma.
    assert!(keyboard.init(&KeyboardConfig::default()).is_ok());
    keyboard.poll();
    assert!(keyboard.is_just_press(Key::Escape));
}

#[test]
fn test_close_before_init_does_nothing() {
    let mut keyboard = Keyboard::new();
    keyboard.close();
    assert!(!keyboard.is_ready());
    assert_eq!(keyboard.get_key(), 0);
}

#[test]
fn test_queries_after_close_are_neutral() {
    let mut keyboard = event_keyboard(Device::default().push(vec![RawInputEvent::key(30, 1)]));
    keyboard.poll();
    keyboard.close();
    assert!(!keyboard.key_held(30));
    assert!(!keyboard.is_pressed(Key::A));
    assert_eq!(keyboard.read_input(false), 0);
}

#[test]
fn test_scripted_observations_through_public_trait() {
    use orbit_input_term::{EventSourceExt, KeyTable};

    struct Once(Option<KeyObservation>);

    impl EventSourceExt for Once {
        fn backend_name(&self) -> &'static str {
            "once"
        }
        fn mode(&self) -> KbMode {
            KbMode::Console
        }
        fn table(&self) -> &'static KeyTable {
            &KeyTable::CONSOLE
        }
        fn reports_releases(&self) -> bool {
            true
        }
        fn read_observations(
            &mut self,
            _wait: bool,
            out: &mut Vec<KeyObservation>,
        ) -> Result<(), KeyboardError> {
            out.extend(self.0.take());
            Ok(())
        }
    }

    let mut keyboard = Keyboard::new();
    keyboard.init_with(Once(Some(KeyObservation::pressed(0x41))));
    keyboard.poll();
    assert!(keyboard.is_just_press(Key::A));
    assert_eq!(keyboard.code_of(Key::F1), Some(0x70));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_missing_event_device_leaves_keyboard_uninitialized() {
    let dir = std::env::temp_dir().join(format!("orbit-input-none-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut keyboard = Keyboard::new();
    let err = keyboard
        .init(&KeyboardConfig::new(KbMode::EventDevice).with_device_dir(&dir))
        .unwrap_err();
    assert!(matches!(err, KeyboardError::NoKeyboardDevice { .. }));
    assert!(!keyboard.is_ready());
    assert!(!keyboard.key_held(30));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[cfg(unix)]
#[test]
#[serial]
fn test_console_mode_is_unsupported_on_unix() {
    let mut keyboard = Keyboard::new();
    let err = keyboard
        .init(&KeyboardConfig::new(KbMode::Console))
        .unwrap_err();
    assert!(matches!(err, KeyboardError::UnsupportedMode(KbMode::Console)));
    assert!(!keyboard.is_ready());
}

#[cfg(unix)]
#[test]
#[serial]
fn test_second_platform_keyboard_is_refused_until_close() {
    let config = KeyboardConfig::new(KbMode::Terminal);

    let mut first = Keyboard::new();
    first.init(&config).unwrap();
    assert_eq!(first.backend_name(), Some("terminal"));

    let mut second = Keyboard::new();
    let err = second.init(&config).unwrap_err();
    assert!(matches!(err, KeyboardError::AlreadyClaimed));
    assert!(!second.is_ready());

    first.close();
    second.init(&config).unwrap();
    assert!(second.is_ready());
    second.close();
}
