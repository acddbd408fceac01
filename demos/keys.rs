//! Example of reading decoded keys from the terminal in raw mode

#[macro_use] extern crate termplus;

use std::io;

use termplus::{Color, Input, Key, Printer, RawConfig, RawMode, KeyTable};

fn main() -> io::Result<()> {
    // Read Ctrl-C as input, rather than terminating the process.
    let raw = RawMode::with_config(RawConfig{
        block_signals: true,
        .. RawConfig::default()
    });

    let input = Input::with_raw_mode(raw, KeyTable::native());
    let mut printer = Printer::new();

    let name = input.get_word("What's your name? ")?;
    term_println!(printer, "Hello, ", name, "!")?;

    term_println!(printer, "Reading keys. Press 'q' or Escape to stop.")?;
    printer.flush()?;

    loop {
        let key = match input.get_char()? {
            Some(key) => key,
            None => break
        };

        match key {
            Key::Up | Key::Down | Key::Left | Key::Right => {
                printer.set_text_color(Color::Cyan);
            }
            Key::Byte(b) if b.is_ascii_control() => {
                printer.set_text_color(Color::Red);
            }
            _ => {
                printer.reset_colors();
            }
        }

        term_println!(printer, "read key: ", key)?;
        printer.flush()?;

        if key == Key::Escape || key == Key::Byte(b'q') {
            break;
        }

        let (changed, size) = input.raw_mode().is_resized();

        if changed {
            term_println!(printer, [reset] ; "resized to ", size.width, "x", size.height)?;
        }
    }

    Ok(())
}
