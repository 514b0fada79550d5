//! Line-based prompting helpers for the interactive surface.

use std::io::{self, BufRead, Write};

/// Result of a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptLine {
    Value(String),
    /// Blank line: the operator aborted the current operation.
    Cancelled,
    /// Input stream closed.
    Eof,
}

/// Print `label`, read one line, and trim it.
pub fn read_input<R, W>(input: &mut R, out: &mut W, label: &str) -> io::Result<PromptLine>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(PromptLine::Eof);
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(PromptLine::Cancelled)
    } else {
        Ok(PromptLine::Value(trimmed.to_string()))
    }
}

/// Hold the screen until the operator acknowledges.
pub fn pause<R, W>(input: &mut R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    write!(out, "\nPress enter to return to the main menu ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn values_are_trimmed() {
        let mut input = Cursor::new("  box.img  \n");
        let mut out = Vec::new();
        assert_eq!(
            read_input(&mut input, &mut out, "path: ").unwrap(),
            PromptLine::Value("box.img".into())
        );
        assert_eq!(String::from_utf8(out).unwrap(), "path: ");
    }

    #[test]
    fn blank_line_cancels() {
        let mut input = Cursor::new("\n");
        let mut out = Vec::new();
        assert_eq!(
            read_input(&mut input, &mut out, "> ").unwrap(),
            PromptLine::Cancelled
        );
    }

    #[test]
    fn closed_input_reports_eof() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert_eq!(
            read_input(&mut input, &mut out, "> ").unwrap(),
            PromptLine::Eof
        );
    }
}
