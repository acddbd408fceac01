pub use self::console::Console;

mod console;
