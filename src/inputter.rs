use std::io::{self, BufRead, Write};

use tracing::trace;

// Line oriented console input. Generic over the reader so tests can feed
// scripted sessions through a Cursor instead of stdin.
pub struct Inputter<R> {
    reader: R,
}

impl<R: BufRead> Inputter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    // Prompt for one line of free text. Only the trailing newline is
    // removed, inner whitespace stays as typed. None means the input
    // stream is closed.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, io::Error> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            trace!("Input stream closed");
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    // Prompt until the answer parses as a number, reprompting on anything
    // else. None means the input stream closed before a number arrived.
    pub fn read_number(&mut self, prompt: &str) -> Result<Option<usize>, io::Error> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => println!("Invalid input, enter a number."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn inputter(script: &str) -> Inputter<Cursor<Vec<u8>>> {
        Inputter::new(Cursor::new(script.as_bytes().to_vec()))
    }

    #[test]
    fn read_line_strips_only_the_newline() {
        let mut input = inputter("  spaced out  \n");
        assert_eq!(
            input.read_line("> ").unwrap(),
            Some("  spaced out  ".to_string())
        );
    }

    #[test]
    fn read_line_handles_crlf() {
        let mut input = inputter("value\r\n");
        assert_eq!(input.read_line("> ").unwrap(), Some("value".to_string()));
    }

    #[test]
    fn read_number_reprompts_until_numeric() {
        let mut input = inputter("abc\n\n 12 \n");
        assert_eq!(input.read_number("> ").unwrap(), Some(12));
    }

    #[test]
    fn end_of_input_returns_none() {
        let mut input = inputter("");
        assert_eq!(input.read_line("> ").unwrap(), None);
        assert_eq!(input.read_number("> ").unwrap(), None);
    }
}
