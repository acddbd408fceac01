//! Cross-platform terminal colors, raw input and background tasks
//!
//! The crate abstracts over the differences between Unix terminals and
//! the Windows console, providing:
//!
//! * [`Printer`], which writes text with color and style attributes;
//! * [`Cursor`] and [`Screen`], which move the cursor, clear the screen
//!   and switch screen buffers;
//! * [`RawMode`], which brackets unbuffered, unechoed input and guarantees
//!   the terminal's original mode is restored;
//! * [`Input`], which reads single bytes or decoded [`Key`] values,
//!   including arrow keys, in raw mode;
//! * [`Supervisor`], which runs tasks on background threads and joins
//!   them before it is dropped.
//!
//! The [`term_print!`] and [`term_println!`] macros provide a convenient
//! interface for setting attributes and printing several values at once.
//!
//! Output is written as ANSI escape sequences, immediately and without
//! any intermediate screen buffer.
//!
//! ## Devices
//!
//! Each interface operates on a [`Device`], which defaults to the
//! process's own [`Console`]. The terminal is a process-wide resource;
//! any number of interfaces may share it, and their operations take
//! effect in the order they are called.
//!
//! [`Console`]: struct.Console.html
//! [`Cursor`]: screen/struct.Cursor.html
//! [`Device`]: device/trait.Device.html
//! [`Input`]: input/struct.Input.html
//! [`Key`]: input/enum.Key.html
//! [`Printer`]: printer/struct.Printer.html
//! [`RawMode`]: raw/struct.RawMode.html
//! [`Screen`]: screen/struct.Screen.html
//! [`Supervisor`]: supervisor/struct.Supervisor.html
//! [`term_print!`]: macro.term_print.html
//! [`term_println!`]: macro.term_println.html

#![deny(missing_docs)]

#[cfg(unix)] extern crate libc;
#[cfg(unix)] extern crate nix;

#[cfg(windows)] extern crate winapi;

pub use crate::ansi::{Color, CursorShape, Style};
pub use crate::device::{Device, Size};
pub use crate::input::{ByteSource, DecodeState, Input, Key, KeyDecoder, KeyTable};
pub use crate::printer::Printer;
pub use crate::raw::{RawConfig, RawMode, RawModeGuard};
pub use crate::screen::{ClearMode, Cursor, Screen};
pub use crate::supervisor::Supervisor;
pub use crate::sys::Console;

#[macro_use] mod macros;
pub mod ansi;
pub mod device;
pub mod input;
pub mod printer;
pub mod raw;
pub mod screen;
pub mod supervisor;

#[cfg(unix)]
#[path = "unix/mod.rs"]
mod sys;

#[cfg(windows)]
#[path = "windows/mod.rs"]
mod sys;
