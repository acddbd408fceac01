//! Cursor and screen buffer control
//!
//! Every operation writes its escape sequence immediately. Nothing is
//! buffered beyond the device's own output buffer; call `flush` to make
//! changes visible.

use std::io;

use crate::ansi::{
    self, CursorShape,
    CLEAR_LINE, CLEAR_SCREEN, CLEAR_SCROLLBACK, CURSOR_HOME,
    ENTER_ALTERNATE_SCREEN, EXIT_ALTERNATE_SCREEN, FULL_RESET,
    HIDE_CURSOR, SHOW_CURSOR,
};
use crate::device::Device;
use crate::sys::Console;

/// Represents the portion of the screen affected by [`Screen::clear`].
///
/// [`Screen::clear`]: struct.Screen.html#method.clear
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClearMode {
    /// Clear the visible screen and the scrollback buffer, then move the
    /// cursor to the top-left corner
    All,
    /// Clear the visible screen only; the cursor does not move
    Purge,
    /// Clear the current line and return to its first column
    Line,
}

impl ClearMode {
    fn sequence(self) -> String {
        match self {
            ClearMode::All => [CLEAR_SCREEN, CLEAR_SCROLLBACK, CURSOR_HOME].concat(),
            ClearMode::Purge => CLEAR_SCREEN.to_owned(),
            ClearMode::Line => CLEAR_LINE.to_owned(),
        }
    }
}

/// Moves and changes the appearance of the terminal cursor.
#[derive(Clone, Debug)]
pub struct Cursor<D: Device = Console> {
    device: D,
}

/// Controls the terminal screen buffer and window.
#[derive(Clone, Debug)]
pub struct Screen<D: Device = Console> {
    device: D,
}

impl Cursor<Console> {
    /// Controls the cursor of the terminal on `stdout`.
    pub fn new() -> Cursor<Console> {
        Cursor::with_device(Console::stdout())
    }
}

impl Default for Cursor<Console> {
    fn default() -> Cursor<Console> {
        Cursor::new()
    }
}

impl<D: Device> Cursor<D> {
    /// Controls the cursor of the given device.
    pub fn with_device(device: D) -> Cursor<D> {
        Cursor{device}
    }

    /// Moves the cursor to column `x`, line `y`.
    ///
    /// Coordinates begin at `1`, with the origin at the top-left corner.
    pub fn move_to(&self, x: usize, y: usize) -> io::Result<&Self> {
        self.emit(&ansi::cursor_position(x, y))
    }

    /// Hides the cursor.
    pub fn hide(&self) -> io::Result<&Self> {
        self.emit(HIDE_CURSOR)
    }

    /// Shows the cursor.
    pub fn show(&self) -> io::Result<&Self> {
        self.emit(SHOW_CURSOR)
    }

    /// Sets the cursor shape.
    ///
    /// Terminals that do not support shapes ignore the sequence.
    pub fn set_style(&self, shape: CursorShape) -> io::Result<&Self> {
        self.emit(&ansi::cursor_shape(shape))
    }

    /// Flushes all output to the terminal.
    pub fn flush(&self) -> io::Result<&Self> {
        self.device.flush()?;
        Ok(self)
    }

    fn emit(&self, seq: &str) -> io::Result<&Self> {
        self.device.write(seq.as_bytes())?;
        Ok(self)
    }
}

impl Screen<Console> {
    /// Controls the screen of the terminal on `stdout`.
    pub fn new() -> Screen<Console> {
        Screen::with_device(Console::stdout())
    }
}

impl Default for Screen<Console> {
    fn default() -> Screen<Console> {
        Screen::new()
    }
}

impl<D: Device> Screen<D> {
    /// Controls the screen of the given device.
    pub fn with_device(device: D) -> Screen<D> {
        Screen{device}
    }

    /// Clears part or all of the screen.
    pub fn clear(&self, mode: ClearMode) -> io::Result<&Self> {
        self.emit(&mode.sequence())
    }

    /// Switches to the alternate screen buffer.
    ///
    /// Contents of the main buffer are preserved until
    /// [`disable_alternate_screen`](#method.disable_alternate_screen).
    pub fn enable_alternate_screen(&self) -> io::Result<&Self> {
        self.emit(ENTER_ALTERNATE_SCREEN)
    }

    /// Switches back to the main screen buffer.
    pub fn disable_alternate_screen(&self) -> io::Result<&Self> {
        self.emit(EXIT_ALTERNATE_SCREEN)
    }

    /// Sets the title of the terminal window.
    pub fn set_title(&self, title: &str) -> io::Result<&Self> {
        self.emit(&ansi::set_title(title))
    }

    /// Resets the terminal to its initial state.
    pub fn reset(&self) -> io::Result<&Self> {
        self.emit(FULL_RESET)
    }

    /// Flushes all output to the terminal.
    pub fn flush(&self) -> io::Result<&Self> {
        self.device.flush()?;
        Ok(self)
    }

    fn emit(&self, seq: &str) -> io::Result<&Self> {
        self.device.write(seq.as_bytes())?;
        Ok(self)
    }
}
