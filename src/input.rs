//! Keyboard input in raw mode
//!
//! [`KeyDecoder`] resolves a stream of raw bytes into logical [`Key`]
//! values, absorbing multi-byte arrow key sequences. [`Input`] runs the
//! decoder against a terminal device in raw mode.
//!
//! [`Key`]: enum.Key.html
//! [`KeyDecoder`]: struct.KeyDecoder.html
//! [`Input`]: struct.Input.html

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::device::Device;
use crate::raw::RawMode;
use crate::sys::Console;

const ESCAPE: u8 = 0x1b;
const TAB: u8 = b'\t';
const SPACE: u8 = b' ';
const BRACKET: u8 = b'[';

/// Represents a keyboard key press
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Enter
    Enter,
    /// Backspace
    Backspace,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Space
    Space,
    /// Any other byte, printable or control character
    Byte(u8),
}

impl Key {
    /// Returns the byte value of a `Byte` key.
    pub fn as_byte(&self) -> Option<u8> {
        match *self {
            Key::Byte(b) => Some(b),
            _ => None
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Enter => f.write_str("Enter"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Escape => f.write_str("Esc"),
            Key::Tab => f.write_str("Tab"),
            Key::Space => f.write_str("Space"),
            // Control bytes are named by the key pressed with Ctrl
            Key::Byte(b) if b < 0x20 => write!(f, "Ctrl-{}", (b'@' + b) as char),
            Key::Byte(b) if b.is_ascii() && b != 0x7f => write!(f, "{}", b as char),
            Key::Byte(b) => write!(f, "0x{:02x}", b),
        }
    }
}

/// Raw byte codes of keys that differ between terminal drivers.
///
/// Arrow keys arrive as `ESC [ <code>`; the final byte of that sequence
/// is looked up in this table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyTable {
    /// Byte produced by the Enter key
    pub enter: u8,
    /// Byte produced by the Backspace key
    pub backspace: u8,
    /// Final byte of the up arrow sequence
    pub up: u8,
    /// Final byte of the down arrow sequence
    pub down: u8,
    /// Final byte of the right arrow sequence
    pub right: u8,
    /// Final byte of the left arrow sequence
    pub left: u8,
}

impl KeyTable {
    /// Codes produced by ANSI terminals on Unix systems.
    pub const ANSI: KeyTable = KeyTable{
        enter: b'\n',
        backspace: 0x7f,
        up: b'A',
        down: b'B',
        right: b'C',
        left: b'D',
    };

    /// Codes produced by the Windows console.
    ///
    /// Arrow codes are the keyboard scan codes of each key.
    pub const WINDOWS_CONSOLE: KeyTable = KeyTable{
        enter: b'\r',
        backspace: 0x08,
        up: 72,
        down: 80,
        right: 77,
        left: 75,
    };

    /// Returns the table for the platform this crate was built for.
    pub fn native() -> KeyTable {
        if cfg!(windows) {
            KeyTable::WINDOWS_CONSOLE
        } else {
            KeyTable::ANSI
        }
    }

    /// Returns the arrow key for the final byte of an arrow key sequence.
    pub fn arrow(&self, byte: u8) -> Option<Key> {
        match byte {
            b if b == self.up => Some(Key::Up),
            b if b == self.down => Some(Key::Down),
            b if b == self.right => Some(Key::Right),
            b if b == self.left => Some(Key::Left),
            _ => None
        }
    }

    /// Returns the key produced by a single byte of input.
    pub fn key(&self, byte: u8) -> Key {
        match byte {
            ESCAPE => Key::Escape,
            TAB => Key::Tab,
            SPACE => Key::Space,
            b if b == self.enter => Key::Enter,
            b if b == self.backspace => Key::Backspace,
            b => Key::Byte(b),
        }
    }
}

impl Default for KeyTable {
    fn default() -> KeyTable {
        KeyTable::native()
    }
}

/// Source of raw input bytes for a [`KeyDecoder`](struct.KeyDecoder.html)
pub trait ByteSource {
    /// Reads one byte, waiting if none is available.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Returns whether a byte is available without waiting.
    ///
    /// Must not consume input.
    fn has_pending(&mut self) -> bool;
}

/// Position of a [`KeyDecoder`](struct.KeyDecoder.html) within an
/// escape sequence
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeState {
    /// No bytes consumed
    Start,
    /// `ESC` consumed
    SeenEscape,
    /// `ESC [` consumed
    SeenBracket,
}

enum Step {
    Next(DecodeState),
    Done(Key),
}

impl DecodeState {
    fn step(self, byte: u8, table: &KeyTable) -> Step {
        match (self, byte) {
            (DecodeState::Start, ESCAPE) => Step::Next(DecodeState::SeenEscape),
            (DecodeState::SeenEscape, BRACKET) => Step::Next(DecodeState::SeenBracket),
            (DecodeState::SeenBracket, b) =>
                Step::Done(table.arrow(b).unwrap_or_else(|| table.key(b))),
            (_, b) => Step::Done(table.key(b)),
        }
    }

    // Key reported when a sequence ends after this state
    fn interrupted(self, table: &KeyTable) -> Key {
        match self {
            DecodeState::Start | DecodeState::SeenEscape => Key::Escape,
            DecodeState::SeenBracket => table.key(BRACKET),
        }
    }
}

/// Resolves raw input bytes into keys.
///
/// A lone `ESC` is only treated as the start of a sequence when more input
/// is already available; otherwise it is reported as `Key::Escape` without
/// waiting for further input.
#[derive(Copy, Clone, Debug, Default)]
pub struct KeyDecoder {
    table: KeyTable,
}

impl KeyDecoder {
    /// Creates a decoder using the given key table.
    pub fn new(table: KeyTable) -> KeyDecoder {
        KeyDecoder{table}
    }

    /// Returns the key table in use.
    pub fn table(&self) -> &KeyTable {
        &self.table
    }

    /// Reads bytes from `src` until a single key is resolved.
    ///
    /// Returns `Ok(None)` if `src` ends before any byte is read.
    pub fn decode<S: ByteSource>(&self, src: &mut S) -> io::Result<Option<Key>> {
        let mut state = DecodeState::Start;

        loop {
            let byte = match src.read_byte()? {
                Some(b) => b,
                None if state == DecodeState::Start => return Ok(None),
                None => return Ok(Some(state.interrupted(&self.table))),
            };

            match state.step(byte, &self.table) {
                Step::Done(key) => {
                    tracing::trace!("decoded key {:?}", key);
                    return Ok(Some(key));
                }
                Step::Next(next) => {
                    if !src.has_pending() {
                        return Ok(Some(next.interrupted(&self.table)));
                    }
                    state = next;
                }
            }
        }
    }
}

/// Reads keys from a terminal device.
///
/// # Examples
///
/// ```no_run
/// # use std::io;
/// use termplus::{Input, Key};
///
/// # fn example() -> io::Result<()> {
/// let input = Input::new();
///
/// while let Some(key) = input.get_char()? {
///     match key {
///         Key::Escape => break,
///         key => println!("{}", key),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct Input<D: Device = Console> {
    raw: RawMode<D>,
    decoder: KeyDecoder,
    // Last line ended in `\r`; a `\n` immediately following belongs to it
    after_cr: AtomicBool,
}

struct DeviceSource<'a, D: Device> {
    raw: &'a RawMode<D>,
}

impl<'a, D: Device> ByteSource for DeviceSource<'a, D> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.raw.device().read_byte()
    }

    fn has_pending(&mut self) -> bool {
        self.raw.has_pending_input()
    }
}

impl Input<Console> {
    /// Reads input from the terminal on `stdin`.
    pub fn new() -> Input<Console> {
        Input::with_raw_mode(RawMode::new(), KeyTable::native())
    }
}

impl Default for Input<Console> {
    fn default() -> Input<Console> {
        Input::new()
    }
}

impl<D: Device> Input<D> {
    /// Reads input from the given device using the native key table.
    pub fn with_device(device: D) -> Input<D> {
        Input::with_raw_mode(RawMode::with_device(device), KeyTable::native())
    }

    /// Reads input through the given raw mode controller and key table.
    pub fn with_raw_mode(raw: RawMode<D>, table: KeyTable) -> Input<D> {
        Input{
            raw,
            decoder: KeyDecoder::new(table),
            after_cr: AtomicBool::new(false),
        }
    }

    /// Returns the raw mode controller.
    pub fn raw_mode(&self) -> &RawMode<D> {
        &self.raw
    }

    /// Reads a single byte in raw mode, without interpretation.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn get_raw_char(&self) -> io::Result<Option<u8>> {
        let _guard = self.raw.try_enter();
        self.raw.device().read_byte()
    }

    /// Reads a single key in raw mode.
    ///
    /// Raw mode is held for the whole key, so that the remainder of an
    /// escape sequence is visible to the pending input check.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn get_char(&self) -> io::Result<Option<Key>> {
        let _guard = self.raw.try_enter();
        self.decoder.decode(&mut DeviceSource{raw: &self.raw})
    }

    /// Returns whether at least one byte of input is available.
    pub fn has_pending_input(&self) -> bool {
        self.raw.has_pending_input()
    }

    /// Writes `prompt`, then reads a line of input in the current mode.
    ///
    /// A line ends with `\n`, `\r` or `\r\n`. The line terminator is not
    /// included in the result. If the device provides its own line editor,
    /// the line is read through it.
    ///
    /// Returns an empty string at end of input.
    pub fn get_line(&self, prompt: &str) -> io::Result<String> {
        self.prompt(prompt)?;

        let device = self.raw.device();

        if let Some(line) = device.read_line() {
            return line;
        }

        let after_cr = self.after_cr.swap(false, Ordering::Relaxed);
        let mut line = Vec::new();
        let mut first = true;

        while let Some(b) = device.read_byte()? {
            match b {
                b'\n' if first && after_cr => (),
                b'\n' => break,
                b'\r' => {
                    self.after_cr.store(true, Ordering::Relaxed);
                    break;
                }
                b => line.push(b),
            }
            first = false;
        }

        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    /// Writes `prompt`, then reads a single whitespace-delimited word
    /// in the current mode.
    ///
    /// Leading whitespace is skipped; the rest of the line is discarded.
    pub fn get_word(&self, prompt: &str) -> io::Result<String> {
        let line = self.get_line(prompt)?;
        Ok(line.split_whitespace().next().unwrap_or("").to_owned())
    }

    fn prompt(&self, prompt: &str) -> io::Result<()> {
        if !prompt.is_empty() {
            let device = self.raw.device();
            device.write(prompt.as_bytes())?;
            device.flush()?;
        }
        Ok(())
    }
}
