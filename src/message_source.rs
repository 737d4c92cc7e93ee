use std::{
    fs,
    io::{BufRead, Write},
    path::PathBuf,
};

use crate::{error::Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum MessageSource {
    Inline(String),
    File(PathBuf),
    /// ask on the terminal until a message fits the image
    Interactive,
}

impl MessageSource {
    pub fn read(&self, limit: usize) -> Result<String> {
        match self {
            Self::Inline(text) => Ok(text.clone()),
            Self::File(path) => fs::read_to_string(path)
                .map_err(|e| Error::UnableToReadMessageFile(path.display().to_string(), e)),
            Self::Interactive => {
                let stdin = std::io::stdin();
                prompt_for_message(stdin.lock(), std::io::stdout(), limit)
            }
        }
    }
}

/// Prompt until a non-empty ASCII line of at most `limit` characters is entered.
pub fn prompt_for_message<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    limit: usize,
) -> Result<String> {
    let mut line = String::new();
    loop {
        write!(
            output,
            "Write a message to hide in the image ({} characters max): ",
            limit
        )
        .and_then(|_| output.flush())
        .map_err(Error::FailedToReadMessageInput)?;

        line.clear();
        let bytes_read = input
            .read_line(&mut line)
            .map_err(Error::FailedToReadMessageInput)?;
        if bytes_read == 0 {
            return Err(Error::MessageInputClosed);
        }

        let choice = line.trim();
        let complaint = if !choice.is_ascii() {
            "Please enter a message without special characters."
        } else if choice.is_empty() || choice.len() > limit {
            "Please enter a message of correct length."
        } else {
            return Ok(choice.to_owned());
        };
        writeln!(output, "{}\n", complaint).map_err(Error::FailedToReadMessageInput)?;
    }
}
