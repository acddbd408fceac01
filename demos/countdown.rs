//! Clears the screen, draws a countdown in place and reports the terminal size

#[macro_use] extern crate termplus;

use std::io;
use std::thread::sleep;
use std::time::Duration;

use termplus::{ClearMode, Color, Cursor, Input, Printer, RawMode, Screen, Style};

fn main() -> io::Result<()> {
    let screen = Screen::new();
    let cursor = Cursor::new();
    let mut printer = Printer::new();

    screen.clear(ClearMode::All)?.set_title("countdown")?;
    cursor.hide()?.move_to(5, 5)?;

    term_println!(printer, "Hello, ", "World!", ' ', 123)?;

    for n in (1..=5).rev() {
        screen.clear(ClearMode::Line)?;
        term_print!(printer, [yellow] [style=Style::Bold] ; "Starting in ", n, "...")?;
        printer.flush()?;

        sleep(Duration::from_secs(1));
    }

    screen.clear(ClearMode::Line)?;
    printer.set_text_color(Color::Green).set_text_style(Style::Normal);
    term_println!(printer, "Go!")?;

    term_println!(printer, [reset] ; "Press any key...")?;
    printer.flush()?;

    if let Some(key) = Input::new().get_char()? {
        term_println!(printer, "You pressed: ", key)?;
    }

    let size = RawMode::new().dimensions();
    term_println!(printer, "Terminal size is: ", size.width, "x", size.height)?;

    cursor.show()?.flush()?;

    Ok(())
}
