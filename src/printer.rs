//! Colored and styled text output

use std::fmt::{self, Display, Write as _};
use std::io;

use crate::ansi::{color_to_ansi, style_to_ansi, Color, Style, RESET};
use crate::device::Device;
use crate::sys::Console;

/// Writes text with color and style attributes to a terminal device.
///
/// A `Printer` holds the attributes applied to each [`print`] call.
/// Attributes are resolved to escape sequences when they are set; every
/// `print` emits them again, followed by the text and a reset of all
/// attributes, so that no state leaks into subsequent output.
///
/// Each `Printer` owns its attributes. Cloning a printer copies them.
///
/// Output is not flushed until [`flush`] is called.
///
/// # Examples
///
/// ```no_run
/// # use std::io;
/// use termplus::{Color, Printer, Style};
///
/// # fn example() -> io::Result<()> {
/// let mut printer = Printer::new();
///
/// printer.set_text_color(Color::Red)
///     .set_text_style(Style::Bold)
///     .println(&[&"Hello, ", &"world!"])?
///     .flush()?;
/// # Ok(())
/// # }
/// ```
///
/// [`print`]: #method.print
/// [`flush`]: #method.flush
#[derive(Clone)]
pub struct Printer<D: Device = Console> {
    device: D,
    text_color: String,
    background_color: String,
    style: Style,
}

impl Printer<Console> {
    /// Creates a printer writing to `stdout`, with no attributes set.
    pub fn new() -> Printer<Console> {
        Printer::with_device(Console::stdout())
    }
}

impl Default for Printer<Console> {
    fn default() -> Printer<Console> {
        Printer::new()
    }
}

impl<D: Device> Printer<D> {
    /// Creates a printer writing to the given device, with no attributes set.
    pub fn with_device(device: D) -> Printer<D> {
        Printer{
            device,
            text_color: String::new(),
            background_color: String::new(),
            style: Style::Normal,
        }
    }

    /// Creates a printer writing to the given device with initial colors.
    pub fn with_colors<T, B>(device: D, text: T, background: B) -> Printer<D>
            where T: Into<Color>, B: Into<Color> {
        let mut printer = Printer::with_device(device);
        printer.set_text_color(text).set_background_color(background);
        printer
    }

    /// Returns the underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Returns the current text style.
    pub fn style(&self) -> Style {
        self.style
    }

    /// Sets the foreground color of subsequent output.
    ///
    /// Accepts a [`Color`], a palette index or an `(r, g, b)` tuple.
    ///
    /// [`Color`]: ../ansi/enum.Color.html
    pub fn set_text_color<C: Into<Color>>(&mut self, color: C) -> &mut Self {
        self.text_color = color_to_ansi(color.into(), false);
        self
    }

    /// Sets the background color of subsequent output.
    pub fn set_background_color<C: Into<Color>>(&mut self, color: C) -> &mut Self {
        self.background_color = color_to_ansi(color.into(), true);
        self
    }

    /// Sets the text style of subsequent output.
    pub fn set_text_style(&mut self, style: Style) -> &mut Self {
        self.style = style;
        self
    }

    /// Clears both colors. Nothing is written to the terminal.
    pub fn reset_colors(&mut self) -> &mut Self {
        self.text_color.clear();
        self.background_color.clear();
        self
    }

    /// Writes each of `values`, with no separator, using the current
    /// attributes.
    ///
    /// The whole output, attributes and trailing reset included, is
    /// issued as a single write.
    pub fn print(&mut self, values: &[&dyn Display]) -> io::Result<&mut Self> {
        let buf = self.render(values).map_err(format_error)?;

        self.device.write(buf.as_bytes())?;
        Ok(self)
    }

    /// Writes `values` as [`print`](#method.print) does, followed by a newline,
    /// in a single write.
    ///
    /// With no values, only the newline is written.
    pub fn println(&mut self, values: &[&dyn Display]) -> io::Result<&mut Self> {
        let mut buf = if values.is_empty() {
            String::new()
        } else {
            self.render(values).map_err(format_error)?
        };

        buf.push('\n');

        self.device.write(buf.as_bytes())?;
        Ok(self)
    }

    /// Flushes all output to the terminal.
    pub fn flush(&mut self) -> io::Result<&mut Self> {
        self.device.flush()?;
        Ok(self)
    }

    fn render(&self, values: &[&dyn Display]) -> Result<String, fmt::Error> {
        let mut buf = String::new();

        buf.push_str(&self.background_color);

        if self.style != Style::Normal {
            buf.push_str(&style_to_ansi(self.style));
        }

        if !self.text_color.is_empty() && self.text_color != RESET {
            buf.push_str(&self.text_color);
        }

        for value in values {
            write!(buf, "{}", value)?;
        }

        buf.push_str(RESET);
        Ok(buf)
    }
}

fn format_error(_: fmt::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, "formatter error")
}

impl<D: Device> fmt::Debug for Printer<D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Printer")
            .field("text_color", &self.text_color)
            .field("background_color", &self.background_color)
            .field("style", &self.style)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::Printer;
    use crate::ansi::{Color, Style};
    use crate::device::mock::MockDevice;

    fn output(dev: &MockDevice) -> String {
        String::from_utf8(dev.take_output()).unwrap()
    }

    #[test]
    fn test_print_plain() {
        let dev = MockDevice::new();
        let mut p = Printer::with_device(dev.clone());

        p.print(&[&"a", &"b", &3]).unwrap();
        assert_eq!(output(&dev), "ab3\x1b[0m");
    }

    #[test]
    fn test_println_empty() {
        let dev = MockDevice::new();
        let mut p = Printer::with_device(dev.clone());

        p.set_text_color(Color::Red);
        p.println(&[]).unwrap();
        assert_eq!(output(&dev), "\n");
    }

    #[test]
    fn test_print_attributes() {
        let dev = MockDevice::new();
        let mut p = Printer::with_device(dev.clone());

        p.set_text_color(Color::Green)
            .set_background_color(Color::Blue)
            .set_text_style(Style::Underline)
            .println(&[&"x", &1.5]).unwrap();

        assert_eq!(output(&dev), "\x1b[44m\x1b[4m\x1b[32mx1.5\x1b[0m\n");
        // Attributes persist across calls
        p.print(&[&"y"]).unwrap();
        assert_eq!(output(&dev), "\x1b[44m\x1b[4m\x1b[32my\x1b[0m");
    }

    #[test]
    fn test_extended_colors() {
        let dev = MockDevice::new();
        let mut p = Printer::with_device(dev.clone());

        p.set_text_color(208u8).set_background_color((1u8, 2u8, 3u8));
        p.print(&[&"z"]).unwrap();

        assert_eq!(output(&dev), "\x1b[48;2;1;2;3m\x1b[38;5;208mz\x1b[0m");
    }

    #[test]
    fn test_reset_text_color_skipped() {
        let dev = MockDevice::new();
        let mut p = Printer::with_colors(dev.clone(), Color::Reset, Color::Red);

        p.print(&[&"q"]).unwrap();
        assert_eq!(output(&dev), "\x1b[41mq\x1b[0m");

        p.reset_colors();
        assert!(dev.output().is_empty());

        p.print(&[&"q"]).unwrap();
        assert_eq!(output(&dev), "q\x1b[0m");
    }

    #[test]
    fn test_single_write_and_flush() {
        let dev = MockDevice::new();
        let mut p = Printer::with_device(dev.clone());

        p.print(&[&"a"]).unwrap();
        assert_eq!(dev.state().writes, 1);
        assert_eq!(dev.state().flushed, 0);

        p.flush().unwrap();
        assert_eq!(dev.state().flushed, 1);
    }

    #[test]
    fn test_println_single_write() {
        let dev = MockDevice::new();
        let mut p = Printer::with_device(dev.clone());

        p.set_text_color(Color::Cyan);
        p.println(&[&"[", &"child0", &"]: ", &7]).unwrap();
        assert_eq!(dev.state().writes, 1);
        assert_eq!(output(&dev), "\x1b[36m[child0]: 7\x1b[0m\n");

        p.println(&[]).unwrap();
        assert_eq!(dev.state().writes, 2);
    }

    #[test]
    fn test_clone_copies_state() {
        let dev = MockDevice::new();
        let mut a = Printer::with_device(dev.clone());
        a.set_text_style(Style::Bold);

        let mut b = a.clone();
        b.set_text_style(Style::Italic);

        assert_eq!(a.style(), Style::Bold);
        assert_eq!(b.style(), Style::Italic);
    }
}
