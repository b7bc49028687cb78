//! Interactive integer prompts.

use crate::error::InputError;
use std::io::{BufRead, Write};

/// Print `prompt`, then read one line from `input` and parse it as an integer.
///
/// Surrounding whitespace is ignored. `label` names the value in error messages.
pub fn read_integer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    label: &str,
) -> Result<i64, InputError> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InputError::UnexpectedEof {
            label: label.to_string(),
        });
    }

    let trimmed = line.trim();
    trimmed.parse::<i64>().map_err(|source| InputError::Parse {
        label: label.to_string(),
        input: trimmed.to_string(),
        source,
    })
}
