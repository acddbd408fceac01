extern crate rand;
#[macro_use] extern crate termplus;

use std::io;
use std::thread::sleep;
use std::time::Duration;

use termplus::{Color, Printer, Style, Supervisor};

use rand::{Rng, seq::SliceRandom, thread_rng};

// A unique color for each task
const COLORS: &[Color] = &[
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
];

fn main() -> io::Result<()> {
    let mut tasks = Supervisor::new();

    // Give a random color to each task
    let mut colors = COLORS.to_vec();
    colors.shuffle(&mut thread_rng());

    for (i, &color) in colors.iter().enumerate() {
        let name = format!("child{}", i);

        tasks.submit(move || {
            if let Err(e) = run_task(&name, color) {
                eprintln!("{}: {}", name, e);
            }
        })?;
    }

    println!("waiting on {} tasks", tasks.pending());

    // Blocks until each task has finished.
    // Dropping `tasks` would have the same effect.
    tasks.await_all();

    Ok(())
}

fn run_task(name: &str, color: Color) -> io::Result<()> {
    let mut rng = thread_rng();

    // Each task has its own printer and attributes
    let mut printer = Printer::new();
    printer.set_text_color(color).set_text_style(Style::Bold);

    for _ in 0..5 {
        sleep(Duration::from_millis(rng.gen_range(100..300)));

        // A single call is written as one unit.
        term_println!(printer, "[", name, "]: random output: ", rng.gen::<u8>())?;
        printer.flush()?;
    }

    Ok(())
}
