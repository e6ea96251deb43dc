//! Prompt loop used by the interactive client.
use super::sanitize::Sanitize;
use std::io::{self, BufRead, Write};

/// A validated answer read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    pub answer: String,
}

impl Terminal {
    /// Prints `question` on stdout and reads stdin until an answer passes
    /// every filter.
    ///
    /// Returns `None` once stdin is closed.
    pub fn ask(question: &str, filters: &[Sanitize]) -> Option<Terminal> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        Self::ask_from(&mut stdin.lock(), &mut stdout.lock(), question, filters)
    }

    /// Same as [`Terminal::ask`] over any reader and writer.
    ///
    /// Rejected answers print the filter message and the question again.
    pub fn ask_from<R: BufRead, W: Write>(
        reader: &mut R,
        writer: &mut W,
        question: &str,
        filters: &[Sanitize],
    ) -> Option<Terminal> {
        loop {
            let _ = writeln!(writer, "{}", question);
            let _ = writer.flush();

            let mut answer = String::new();
            match reader.read_line(&mut answer) {
                Ok(0) => return None,
                Ok(_) => match Sanitize::execute(&answer, filters) {
                    Ok(data) => return Some(Terminal { answer: data }),
                    Err(e) => {
                        let _ = writeln!(writer, "{}", e);
                    }
                },
                Err(_) => {
                    let _ = writeln!(writer, "Couldn't read line..");
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_from_retries_until_valid() {
        let mut input = Cursor::new("\nbad..name\ngoogle.com\n");
        let mut output = Vec::new();

        let answer = Terminal::ask_from(
            &mut input,
            &mut output,
            "Enter a domain name:",
            &[Sanitize::NotEmpty, Sanitize::DomainName],
        )
        .unwrap();

        assert_eq!(answer.answer, "google.com");
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("Enter a domain name:").count(), 3);
        assert!(printed.contains("The value is empty, try again!"));
        assert!(printed.contains("not a valid domain name"));
    }

    #[test]
    fn test_ask_from_returns_none_on_eof() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        assert!(Terminal::ask_from(&mut input, &mut output, "?", &[Sanitize::NotEmpty]).is_none());
    }
}
