//! Terminal prompts used to fill in command arguments the user left out

use eyre::{eyre, Result};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Prompt until the user enters a non-empty value
pub fn prompt_for_nonempty(prompt: &str) -> Result<String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    nonempty_from(prompt, &mut stdin.lock(), &mut stdout)
}

/// Prompt for a number, falling back to `default` on empty input
pub fn prompt_for_number<T>(prompt: &str, default: T) -> Result<T>
where
    T: FromStr + Display + Copy,
{
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    number_from(prompt, default, &mut stdin.lock(), &mut stdout)
}

/// Prompt for one of `options`, returning its index
///
/// The options are listed with their index and the user may answer with
/// either the index or the (case-insensitive) option name.
pub fn prompt_for_choice(prompt: &str, options: &[&str]) -> Result<usize> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    choice_from(prompt, options, &mut stdin.lock(), &mut stdout)
}

// -----------
// | Helpers |
// -----------

fn read_line<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> io::Result<String> {
    write!(out, "{}: ", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }

    Ok(line.trim().to_string())
}

fn nonempty_from<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> Result<String> {
    loop {
        let value = read_line(prompt, input, out)?;
        if !value.is_empty() {
            return Ok(value);
        }
        writeln!(out, "A value is required.")?;
    }
}

fn number_from<T, R, W>(prompt: &str, default: T, input: &mut R, out: &mut W) -> Result<T>
where
    T: FromStr + Display + Copy,
    R: BufRead,
    W: Write,
{
    loop {
        let value = read_line(&format!("{} [{}]", prompt, default), input, out)?;

        // Use the default value if the input is empty
        if value.is_empty() {
            return Ok(default);
        }

        match value.parse::<T>() {
            Ok(parsed) => return Ok(parsed),
            Err(_) => writeln!(out, "Invalid number, please try again.")?,
        }
    }
}

fn choice_from<R: BufRead, W: Write>(
    prompt: &str,
    options: &[&str],
    input: &mut R,
    out: &mut W,
) -> Result<usize> {
    if options.is_empty() {
        return Err(eyre!("no options to choose from"));
    }

    for (i, option) in options.iter().enumerate() {
        writeln!(out, "  [{}] {}", i, option)?;
    }

    loop {
        let value = read_line(prompt, input, out)?;
        if let Ok(idx) = value.parse::<usize>() {
            if idx < options.len() {
                return Ok(idx);
            }
        }

        if let Some(idx) = options.iter().position(|o| o.eq_ignore_ascii_case(&value)) {
            return Ok(idx);
        }

        writeln!(out, "Please pick one of the listed options.")?;
    }
}
