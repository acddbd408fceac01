//! Provides macros for easier printing with colors and styles.

/// Sets attributes on a `Printer`, then prints any number of values.
///
/// # Usage
///
/// `term_print!` accepts a printer, an optional series of attribute
/// elements terminated by `;`, and a comma-separated list of values
/// implementing `Display`.
///
/// [`term_println!`] is equivalent, but writes a newline character
/// after the values.
///
/// Attribute elements are enclosed in square brackets
/// and take one of the following forms:
///
/// | Element           | Equivalent                                  |
/// | ----------------- | ------------------------------------------- |
/// | `[red]`           | `p.set_text_color(Color::Red)`              |
/// | `[#blue]`         | `p.set_background_color(Color::Blue)`       |
/// | `[bold]`          | `p.set_text_style(Style::Bold)`             |
/// | `[reset]`         | `p.reset_colors().set_text_style(Style::Normal)` |
/// | `[fg=expr]`       | `p.set_text_color(expr)`                    |
/// | `[bg=expr]`       | `p.set_background_color(expr)`              |
/// | `[style=expr]`    | `p.set_text_style(expr)`                    |
///
/// Attributes persist on the printer after the macro returns.
///
/// The macro evaluates to the result of the `print` or `println` call.
///
/// # Examples
///
/// ```no_run
/// #[macro_use] extern crate termplus;
/// # use std::io;
/// use termplus::Printer;
///
/// # fn main() -> io::Result<()> {
/// let mut p = Printer::new();
///
/// term_println!(p, [red] [bold] ; "red text")?;
///
/// let value = 42;
/// term_println!(p, [reset] ; "The answer is: ", value)?;
///
/// term_println!(p, [fg=208u8] [#black] ; "orange on black")?;
/// term_println!(p)?;
/// # Ok(())
/// # }
/// ```
///
/// [`term_println!`]: macro.term_println.html
#[macro_export]
macro_rules! term_print {
    // Entry rules
    ( $printer:expr ) => {
        $printer.print(&[])
    };
    ( $printer:expr , $( [ $($attr:tt)* ] )+ ; $($v:expr),* $(,)? ) => {
        $crate::term_print!(@_INTERNAL print: $printer ; $( [ $($attr)* ] )* ; $($v),*)
    };
    ( $printer:expr , $($v:expr),* $(,)? ) => {
        $crate::term_print!(@_INTERNAL print: $printer ; ; $($v),*)
    };

    // Set text color
    ( @_INTERNAL attr: $p:expr ; black ) => { $p.set_text_color($crate::Color::Black) };
    ( @_INTERNAL attr: $p:expr ; red ) => { $p.set_text_color($crate::Color::Red) };
    ( @_INTERNAL attr: $p:expr ; green ) => { $p.set_text_color($crate::Color::Green) };
    ( @_INTERNAL attr: $p:expr ; yellow ) => { $p.set_text_color($crate::Color::Yellow) };
    ( @_INTERNAL attr: $p:expr ; blue ) => { $p.set_text_color($crate::Color::Blue) };
    ( @_INTERNAL attr: $p:expr ; magenta ) => { $p.set_text_color($crate::Color::Magenta) };
    ( @_INTERNAL attr: $p:expr ; cyan ) => { $p.set_text_color($crate::Color::Cyan) };
    ( @_INTERNAL attr: $p:expr ; white ) => { $p.set_text_color($crate::Color::White) };

    // Set background color
    ( @_INTERNAL attr: $p:expr ; # black ) => { $p.set_background_color($crate::Color::Black) };
    ( @_INTERNAL attr: $p:expr ; # red ) => { $p.set_background_color($crate::Color::Red) };
    ( @_INTERNAL attr: $p:expr ; # green ) => { $p.set_background_color($crate::Color::Green) };
    ( @_INTERNAL attr: $p:expr ; # yellow ) => { $p.set_background_color($crate::Color::Yellow) };
    ( @_INTERNAL attr: $p:expr ; # blue ) => { $p.set_background_color($crate::Color::Blue) };
    ( @_INTERNAL attr: $p:expr ; # magenta ) => { $p.set_background_color($crate::Color::Magenta) };
    ( @_INTERNAL attr: $p:expr ; # cyan ) => { $p.set_background_color($crate::Color::Cyan) };
    ( @_INTERNAL attr: $p:expr ; # white ) => { $p.set_background_color($crate::Color::White) };

    // Set style
    ( @_INTERNAL attr: $p:expr ; bold ) => { $p.set_text_style($crate::Style::Bold) };
    ( @_INTERNAL attr: $p:expr ; dim ) => { $p.set_text_style($crate::Style::Dim) };
    ( @_INTERNAL attr: $p:expr ; italic ) => { $p.set_text_style($crate::Style::Italic) };
    ( @_INTERNAL attr: $p:expr ; underline ) => { $p.set_text_style($crate::Style::Underline) };
    ( @_INTERNAL attr: $p:expr ; blink ) => { $p.set_text_style($crate::Style::Blink) };
    ( @_INTERNAL attr: $p:expr ; reverse ) => { $p.set_text_style($crate::Style::Reverse) };
    ( @_INTERNAL attr: $p:expr ; hidden ) => { $p.set_text_style($crate::Style::Hidden) };
    ( @_INTERNAL attr: $p:expr ; strike ) => { $p.set_text_style($crate::Style::Strike) };

    // Clear attributes
    ( @_INTERNAL attr: $p:expr ; reset ) => {
        $p.reset_colors().set_text_style($crate::Style::Normal)
    };

    // Attribute expressions
    ( @_INTERNAL attr: $p:expr ; fg = $e:expr ) => { $p.set_text_color($e) };
    ( @_INTERNAL attr: $p:expr ; bg = $e:expr ) => { $p.set_background_color($e) };
    ( @_INTERNAL attr: $p:expr ; style = $e:expr ) => { $p.set_text_style($e) };

    // Apply attributes, then print
    ( @_INTERNAL $method:ident : $printer:expr ; $( [ $($attr:tt)* ] )* ; $($v:expr),* ) => {
        match &mut $printer {
            printer => {
                $( $crate::term_print!(@_INTERNAL attr: printer ; $($attr)*); )*
                printer.$method(&[ $( &$v as &dyn ::std::fmt::Display ),* ])
            }
        }
    };
}

/// Sets attributes on a `Printer`, then prints any number of values,
/// followed by a newline.
///
/// With no values, only the newline is written.
///
/// See [`term_print`] for a description of macro syntax and example usage.
///
/// [`term_print`]: macro.term_print.html
#[macro_export]
macro_rules! term_println {
    ( $printer:expr ) => {
        $printer.println(&[])
    };
    ( $printer:expr , $( [ $($attr:tt)* ] )+ ; $($v:expr),* $(,)? ) => {
        $crate::term_print!(@_INTERNAL println: $printer ; $( [ $($attr)* ] )* ; $($v),*)
    };
    ( $printer:expr , $($v:expr),* $(,)? ) => {
        $crate::term_print!(@_INTERNAL println: $printer ; ; $($v),*)
    };
}
