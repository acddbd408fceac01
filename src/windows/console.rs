use std::char;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::mem::zeroed;
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use winapi::ctypes::c_int;
use winapi::shared::minwindef::{BOOL, DWORD, FALSE};
use winapi::shared::ntdef::HANDLE;
use winapi::um::consoleapi::{
    GetConsoleMode,
    GetNumberOfConsoleInputEvents,
    ReadConsoleInputW,
    SetConsoleMode,
};
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::processenv::GetStdHandle;
use winapi::um::winbase::{
    STD_INPUT_HANDLE, STD_OUTPUT_HANDLE, STD_ERROR_HANDLE,
};
use winapi::um::wincon::{
    GetConsoleScreenBufferInfo,
    PeekConsoleInputW,
    CONSOLE_SCREEN_BUFFER_INFO,
    INPUT_RECORD,
    ENABLE_ECHO_INPUT, ENABLE_EXTENDED_FLAGS, ENABLE_LINE_INPUT,
    ENABLE_PROCESSED_INPUT, ENABLE_VIRTUAL_TERMINAL_PROCESSING,
    KEY_EVENT,
};
use winapi::um::winuser;

use crate::device::{Device, Size};
use crate::raw::RawConfig;

const ESCAPE: u8 = 0x1b;

// Scan codes of the arrow keys, delivered as the final byte of `ESC [ <code>`
const SCAN_UP: u8 = 72;
const SCAN_DOWN: u8 = 80;
const SCAN_RIGHT: u8 = 77;
const SCAN_LEFT: u8 = 75;

// Bytes translated from console input records, not yet read
static PENDING: Mutex<VecDeque<u8>> = Mutex::new(VecDeque::new());

static STDOUT_VT: Once = Once::new();
static STDERR_VT: Once = Once::new();

/// Terminal device on the process's standard streams
///
/// Input is read from the console input buffer; output is written to
/// either `stdout` or `stderr`.
#[derive(Copy, Clone, Debug)]
pub struct Console {
    out: Stream,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Stream {
    Stdout,
    Stderr,
}

impl Console {
    /// Returns a device writing to `stdout`.
    pub fn stdout() -> Console {
        Console{out: Stream::Stdout}
    }

    /// Returns a device writing to `stderr`.
    pub fn stderr() -> Console {
        Console{out: Stream::Stderr}
    }

    fn out_handle(&self) -> io::Result<HANDLE> {
        match self.out {
            Stream::Stdout => std_handle(STD_OUTPUT_HANDLE),
            Stream::Stderr => std_handle(STD_ERROR_HANDLE),
        }
    }

    // Escape sequences are only interpreted by the console when
    // virtual terminal processing is enabled on the output handle.
    fn enable_virtual_terminal(&self) {
        let once = match self.out {
            Stream::Stdout => &STDOUT_VT,
            Stream::Stderr => &STDERR_VT,
        };

        once.call_once(|| {
            let r = self.out_handle().and_then(|handle| unsafe {
                let mode = console_mode(handle)?;
                set_console_mode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING)
            });

            if let Err(e) = r {
                tracing::debug!("failed to enable virtual terminal processing: {}", e);
            }
        });
    }
}

impl Device for Console {
    type Mode = DWORD;

    fn get_mode(&self) -> io::Result<DWORD> {
        unsafe { console_mode(std_handle(STD_INPUT_HANDLE)?) }
    }

    fn set_mode(&self, mode: &DWORD) -> io::Result<()> {
        unsafe { set_console_mode(std_handle(STD_INPUT_HANDLE)?, *mode) }
    }

    fn raw_mode(&self, mode: &DWORD, config: &RawConfig) -> DWORD {
        let mut in_mode = *mode;

        in_mode |= ENABLE_EXTENDED_FLAGS;

        // Disable echo and line buffering; echo requires line input
        in_mode &= !(ENABLE_ECHO_INPUT | ENABLE_LINE_INPUT);

        // Processed input turns Ctrl-C into a signal
        if config.block_signals {
            in_mode &= !ENABLE_PROCESSED_INPUT;
        }

        in_mode
    }

    fn read_byte(&self) -> io::Result<Option<u8>> {
        let handle = std_handle(STD_INPUT_HANDLE)?;

        if !is_console(handle) {
            let mut buf = [0; 1];

            return match io::stdin().read(&mut buf)? {
                0 => Ok(None),
                _ => Ok(Some(buf[0])),
            };
        }

        loop {
            if let Some(b) = lock_pending().pop_front() {
                return Ok(Some(b));
            }

            let mut event: INPUT_RECORD = unsafe { zeroed() };
            let mut n = 0;

            result_bool(unsafe { ReadConsoleInputW(handle, &mut event, 1, &mut n) })?;

            if n != 0 {
                let mut buf = Vec::new();
                translate_event(&event, &mut buf);
                lock_pending().extend(buf);
            }
        }
    }

    fn read_line(&self) -> Option<io::Result<String>> {
        let handle = match std_handle(STD_INPUT_HANDLE) {
            Ok(handle) => handle,
            Err(e) => return Some(Err(e)),
        };

        // Only a console in line input mode edits and echoes lines itself
        match unsafe { console_mode(handle) } {
            Ok(mode) if mode & ENABLE_LINE_INPUT != 0 && lock_pending().is_empty() => (),
            _ => return None,
        }

        let mut line = String::new();

        Some(io::stdin().read_line(&mut line).map(|_| {
            trim_line_end(&mut line);
            line
        }))
    }

    fn pending_input(&self) -> io::Result<usize> {
        let handle = std_handle(STD_INPUT_HANDLE)?;

        if !is_console(handle) {
            return Err(io::Error::new(io::ErrorKind::Other,
                "input is not a console"));
        }

        let queued = lock_pending().len();

        let mut n_events = 0;
        result_bool(unsafe { GetNumberOfConsoleInputEvents(handle, &mut n_events) })?;

        if n_events == 0 {
            return Ok(queued);
        }

        let mut events: Vec<INPUT_RECORD> = (0..n_events)
            .map(|_| unsafe { zeroed() }).collect();
        let mut n = 0;

        result_bool(unsafe { PeekConsoleInputW(
            handle, events.as_mut_ptr(), n_events, &mut n) })?;

        let mut buf = Vec::new();

        for event in &events[..n as usize] {
            translate_event(event, &mut buf);
        }

        Ok(queued + buf.len())
    }

    fn size(&self) -> io::Result<Size> {
        let info = unsafe { console_info(self.out_handle()?)? };
        let win = info.srWindow;

        Ok(Size{
            width: (win.Right - win.Left + 1).max(0) as usize,
            height: (win.Bottom - win.Top + 1).max(0) as usize,
        })
    }

    fn write(&self, buf: &[u8]) -> io::Result<()> {
        self.enable_virtual_terminal();

        match self.out {
            Stream::Stdout => io::stdout().write_all(buf),
            Stream::Stderr => io::stderr().write_all(buf),
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self.out {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        }
    }
}

fn lock_pending() -> MutexGuard<'static, VecDeque<u8>> {
    PENDING.lock().unwrap_or_else(PoisonError::into_inner)
}

// Appends the bytes produced by a key press event to `buf`.
// Arrow keys produce `ESC [ <scan code>`; other keys produce the
// UTF-8 encoding of their character, once per repeat.
fn translate_event(event: &INPUT_RECORD, buf: &mut Vec<u8>) {
    if event.EventType != KEY_EVENT {
        return;
    }

    let key = unsafe { event.Event.KeyEvent() };

    if key.bKeyDown == FALSE {
        return;
    }

    let repeat = key.wRepeatCount.max(1);

    let arrow = match key.wVirtualKeyCode as c_int {
        winuser::VK_UP => Some(SCAN_UP),
        winuser::VK_DOWN => Some(SCAN_DOWN),
        winuser::VK_RIGHT => Some(SCAN_RIGHT),
        winuser::VK_LEFT => Some(SCAN_LEFT),
        _ => None
    };

    if let Some(code) = arrow {
        for _ in 0..repeat {
            buf.extend_from_slice(&[ESCAPE, b'[', code]);
        }
        return;
    }

    let u_char = unsafe { *key.uChar.UnicodeChar() };

    // Surrogate halves and keys without a character produce no input
    if let Some(ch) = char::from_u32(u_char as u32).filter(|&ch| ch != '\0') {
        let mut enc = [0; 4];
        let bytes = ch.encode_utf8(&mut enc).as_bytes();

        for _ in 0..repeat {
            buf.extend_from_slice(bytes);
        }
    }
}

fn trim_line_end(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
    }
    if line.ends_with('\r') {
        line.pop();
    }
}

fn is_console(handle: HANDLE) -> bool {
    unsafe { console_mode(handle).is_ok() }
}

fn std_handle(which: DWORD) -> io::Result<HANDLE> {
    let handle = unsafe { GetStdHandle(which) };

    if handle.is_null() || handle == INVALID_HANDLE_VALUE {
        Err(io::Error::last_os_error())
    } else {
        Ok(handle)
    }
}

unsafe fn console_info(handle: HANDLE) -> io::Result<CONSOLE_SCREEN_BUFFER_INFO> {
    let mut info = zeroed();

    result_bool(GetConsoleScreenBufferInfo(handle, &mut info))?;

    Ok(info)
}

unsafe fn console_mode(handle: HANDLE) -> io::Result<DWORD> {
    let mut mode = 0;

    result_bool(GetConsoleMode(handle, &mut mode))?;

    Ok(mode)
}

unsafe fn set_console_mode(handle: HANDLE, mode: DWORD) -> io::Result<()> {
    result_bool(SetConsoleMode(handle, mode))
}

fn result_bool(b: BOOL) -> io::Result<()> {
    if b == FALSE {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
