use std::io::{self, Write};
use std::mem::zeroed;
use std::os::unix::io::RawFd;

use libc::{
    ioctl,
    c_int, termios, winsize,
    ECHO, ICANON, ISIG, IXON, VMIN, VTIME,
    FIONREAD, STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO, TIOCGWINSZ,
};

use nix::errno::Errno;
use nix::sys::termios::{tcgetattr, tcsetattr, SetArg, Termios};
use nix::unistd::read;

use crate::device::{Device, Size};
use crate::raw::RawConfig;

/// Terminal device on the process's standard streams
///
/// Input is read from `stdin`; output is written to either `stdout`
/// or `stderr`.
#[derive(Copy, Clone, Debug)]
pub struct Console {
    in_fd: RawFd,
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
        Console{
            in_fd: STDIN_FILENO,
            out: Stream::Stdout,
        }
    }

    /// Returns a device writing to `stderr`.
    pub fn stderr() -> Console {
        Console{
            in_fd: STDIN_FILENO,
            out: Stream::Stderr,
        }
    }

    fn out_fd(&self) -> RawFd {
        match self.out {
            Stream::Stdout => STDOUT_FILENO,
            Stream::Stderr => STDERR_FILENO,
        }
    }
}

impl Device for Console {
    type Mode = termios;

    fn get_mode(&self) -> io::Result<termios> {
        let tio = tcgetattr(self.in_fd).map_err(nix_to_io)?;
        Ok(tio.into())
    }

    fn set_mode(&self, mode: &termios) -> io::Result<()> {
        tcsetattr(self.in_fd, SetArg::TCSANOW, &Termios::from(*mode))
            .map_err(nix_to_io)
    }

    fn raw_mode(&self, mode: &termios, config: &RawConfig) -> termios {
        let mut tio = *mode;

        // Disable canonical mode, delivering input without waiting for
        // newline or EOF; disable echo of input to output.
        tio.c_lflag &= !(ICANON | ECHO);

        // ISIG, when enabled, causes the process to receive signals when
        // Ctrl-C, Ctrl-\, etc. are input
        if config.block_signals {
            tio.c_lflag &= !ISIG;
        }

        // IXON, when enabled, allows Ctrl-S/Ctrl-Q to suspend and restart output
        if config.block_control_flow {
            tio.c_iflag &= !IXON;
        }

        // Each read waits for exactly one byte, with no timeout
        tio.c_cc[VMIN] = 1;
        tio.c_cc[VTIME] = 0;

        tio
    }

    fn read_byte(&self) -> io::Result<Option<u8>> {
        let mut buf = [0; 1];

        loop {
            match read(self.in_fd, &mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(nix_to_io(e))
            }
        }
    }

    fn pending_input(&self) -> io::Result<usize> {
        let mut n: c_int = 0;

        // `.into()` accounts for the request type differing between targets
        let res = unsafe { ioctl(self.in_fd, FIONREAD.into(), &mut n) };

        if res == -1 {
            Err(io::Error::last_os_error())
        } else {
            Ok(n.max(0) as usize)
        }
    }

    fn size(&self) -> io::Result<Size> {
        get_winsize(self.out_fd())
    }

    fn write(&self, buf: &[u8]) -> io::Result<()> {
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

fn get_winsize(fd: c_int) -> io::Result<Size> {
    let mut winsz: winsize = unsafe { zeroed() };

    let res = unsafe { ioctl(fd, TIOCGWINSZ.into(), &mut winsz) };

    if res == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(Size{
            width: winsz.ws_col as usize,
            height: winsz.ws_row as usize,
        })
    }
}

fn nix_to_io(e: nix::Error) -> io::Error {
    io::Error::from_raw_os_error(e as i32)
}

#[cfg(test)]
mod test {
    use libc::{termios, ECHO, ICANON, ICRNL, ISIG, IXON, OPOST, VMIN, VTIME};

    use super::Console;
    use crate::device::Device;
    use crate::raw::RawConfig;

    // Built from a zeroed structure, so no terminal is required
    fn cooked() -> termios {
        let mut tio: termios = unsafe { std::mem::zeroed() };
        tio.c_lflag = ICANON | ECHO | ISIG;
        tio.c_iflag = IXON | ICRNL;
        tio.c_oflag = OPOST;
        tio.c_cc[VMIN] = 0;
        tio.c_cc[VTIME] = 5;
        tio
    }

    #[test]
    fn test_raw_mode_flags() {
        let dev = Console::stdout();
        let base = cooked();

        let raw = dev.raw_mode(&base, &RawConfig::default());
        assert_eq!(raw.c_lflag & (ICANON | ECHO), 0);
        assert_ne!(raw.c_lflag & ISIG, 0);
        assert_ne!(raw.c_iflag & IXON, 0);
        assert_ne!(raw.c_iflag & ICRNL, 0);
        assert_eq!(raw.c_oflag, OPOST);
        assert_eq!(raw.c_cc[VMIN], 1);
        assert_eq!(raw.c_cc[VTIME], 0);

        // The captured mode is left untouched
        assert_eq!(base.c_lflag, ICANON | ECHO | ISIG);
        assert_eq!(base.c_cc[VMIN], 0);
    }

    #[test]
    fn test_raw_mode_config() {
        let dev = Console::stdout();

        let raw = dev.raw_mode(&cooked(), &RawConfig{
            block_signals: true,
            .. RawConfig::default()
        });
        assert_eq!(raw.c_lflag & ISIG, 0);
        assert_ne!(raw.c_iflag & IXON, 0);

        let raw = dev.raw_mode(&cooked(), &RawConfig{
            block_control_flow: true,
            .. RawConfig::default()
        });
        assert_ne!(raw.c_lflag & ISIG, 0);
        assert_eq!(raw.c_iflag & IXON, 0);
    }
}
