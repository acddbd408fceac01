//! Access to the underlying terminal device
//!
//! The terminal a process talks to is a process-wide resource: one input
//! stream, one output stream and one line discipline. [`Device`] names the
//! handful of primitives the rest of this crate needs from it, so that
//! [`RawMode`], [`Input`], [`Printer`] and friends can be built on top of
//! either the platform console ([`Console`]) or any other implementation.
//!
//! [`Device`]: trait.Device.html
//! [`Console`]: ../struct.Console.html
//! [`RawMode`]: ../raw/struct.RawMode.html
//! [`Input`]: ../input/struct.Input.html
//! [`Printer`]: ../printer/struct.Printer.html

use std::io;

use crate::raw::RawConfig;

/// Represents the size of a terminal window, in character cells
///
/// A failed size query is reported as a size of zero width and zero height.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Size {
    /// Number of columns in the terminal
    pub width: usize,
    /// Number of lines in the terminal
    pub height: usize,
}

impl Size {
    /// Creates a new `Size` value.
    #[inline]
    pub fn new(width: usize, height: usize) -> Size {
        Size{width, height}
    }

    /// Returns whether either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(usize, usize)> for Size {
    /// Returns a `Size` value from a `(width, height)` tuple.
    fn from((width, height): (usize, usize)) -> Size {
        Size{width, height}
    }
}

/// Primitive operations on a terminal device.
///
/// Implementations are cheap handles to a shared device; cloning a handle
/// does not duplicate the device.
pub trait Device: Clone + Send + Sync + 'static {
    /// Input mode of the device, as captured by [`get_mode`].
    ///
    /// [`get_mode`]: #tymethod.get_mode
    type Mode: Clone + Send;

    /// Returns the current input mode.
    fn get_mode(&self) -> io::Result<Self::Mode>;

    /// Applies an input mode immediately.
    fn set_mode(&self, mode: &Self::Mode) -> io::Result<()>;

    /// Derives an unbuffered, unechoed mode from `mode`.
    fn raw_mode(&self, mode: &Self::Mode, config: &RawConfig) -> Self::Mode;

    /// Reads a single byte of input, waiting until one is available.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_byte(&self) -> io::Result<Option<u8>>;

    /// Reads a line through the device's own line editor, if it has one.
    ///
    /// The returned line excludes its terminator. Returns `None` when the
    /// device has no line editor of its own, in which case lines are
    /// assembled from [`read_byte`].
    ///
    /// [`read_byte`]: #tymethod.read_byte
    fn read_line(&self) -> Option<io::Result<String>> {
        None
    }

    /// Returns the number of bytes that may be read without waiting.
    ///
    /// No input is consumed.
    fn pending_input(&self) -> io::Result<usize>;

    /// Returns the current size of the terminal window.
    fn size(&self) -> io::Result<Size>;

    /// Writes all of `buf` to the output stream.
    fn write(&self, buf: &[u8]) -> io::Result<()>;

    /// Flushes all output to the terminal.
    fn flush(&self) -> io::Result<()>;
}
