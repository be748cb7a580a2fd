use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::driver::SearchOutcome;
use crate::error::{Error, Result};

pub const RESET: &str = "\x1b[0m";

pub const DIGITS_FILE: &str = "pi_digits.txt";
pub const REPLACED_FILE: &str = "pi_replaced.txt";
pub const COLORED_FILE: &str = "pi_colored.txt";

/// Foreground color per digit. Unmapped characters render unstyled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMap {
    codes: [Option<&'static str>; 10],
}

impl ColorMap {
    /// `2` through `8` as a bright rainbow ending in white.
    pub const fn rainbow() -> Self {
        ColorMap {
            codes: [
                None,
                None,
                Some("\x1b[91m"), // red
                Some("\x1b[93m"), // yellow
                Some("\x1b[92m"), // green
                Some("\x1b[94m"), // blue
                Some("\x1b[95m"), // magenta
                Some("\x1b[96m"), // cyan
                Some("\x1b[97m"), // white
                None,
            ],
        }
    }

    pub const fn plain() -> Self {
        ColorMap { codes: [None; 10] }
    }

    pub fn color_for(&self, c: char) -> Option<&'static str> {
        let digit = c.to_digit(10)?;
        self.codes[digit as usize]
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::rainbow()
    }
}

pub fn colorize(text: &str, colors: &ColorMap) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match colors.color_for(c) {
            Some(code) => {
                out.push_str(code);
                out.push(c);
                out.push_str(RESET);
            }
            None => out.push(c),
        }
    }
    out
}

/// Colorizes the first `limit` characters. The second value is true when
/// the text was cut short.
pub fn preview(text: &str, colors: &ColorMap, limit: usize) -> (String, bool) {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => (colorize(&text[..cut], colors), true),
        None => (colorize(text, colors), false),
    }
}

/// Paths of the three output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub digits: PathBuf,
    pub replaced: PathBuf,
    pub colored: PathBuf,
}

impl Artifacts {
    pub fn in_dir(dir: &Path) -> Self {
        Artifacts {
            digits: dir.join(DIGITS_FILE),
            replaced: dir.join(REPLACED_FILE),
            colored: dir.join(COLORED_FILE),
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Writes the artifacts for `outcome` and reports each step to `out`.
pub fn present<W: Write>(
    outcome: &SearchOutcome,
    artifacts: &Artifacts,
    colors: &ColorMap,
    preview_chars: usize,
    out: &mut W,
) -> Result<()> {
    write_file(&artifacts.digits, &outcome.digits)?;
    writeln!(
        out,
        "\nStep 1: Saved {} digits of PI to {}",
        outcome.digits_processed,
        artifacts.digits.display()
    )?;

    write_file(&artifacts.replaced, &outcome.replaced)?;
    writeln!(out, "Step 2: Saved replaced text to {}", artifacts.replaced.display())?;

    writeln!(out, "\nStep 3: Colorizing and saving...")?;
    // The file keeps the plain text; styling is terminal only.
    write_file(&artifacts.colored, &outcome.replaced)?;

    let (shown, truncated) = preview(&outcome.replaced, colors, preview_chars);
    writeln!(out, "\nColorized display (first {preview_chars} characters):")?;
    writeln!(out, "{shown}")?;
    if truncated {
        writeln!(out, "...")?;
    }
    writeln!(
        out,
        "\nSaved colored digits (with spaces) to {}",
        artifacts.colored.display()
    )?;
    Ok(())
}
