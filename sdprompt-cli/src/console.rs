use std::fmt::Display;
use std::io::{BufRead, Write};

use rand::Rng;
use sdprompt_utils::{paginate, parse_selection};

use crate::error::AppError;

pub const PAGE_BREAK_PROMPT: &str = "-- Press Enter to see more options --";

/// Line-oriented question and answer over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn say(&mut self, line: impl Display) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Prints `prompt` without a newline and reads one answer line.
    ///
    /// The trailing line terminator is removed; other whitespace is kept so
    /// callers decide how to trim.
    pub fn ask(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }
        let answer_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(answer_len);
        Ok(line)
    }

    /// Shows `options` page by page and resolves the user's selection.
    pub fn choose_many<G, S>(
        &mut self,
        question: &str,
        options: &[S],
        page_size: usize,
        rng: &mut G,
    ) -> Result<Vec<String>, AppError>
    where
        G: Rng + ?Sized,
        S: AsRef<str>,
    {
        self.say(format_args!("\n{question}"))?;
        let pages = paginate(options, page_size);
        let last_page = pages.len().saturating_sub(1);
        for (page_index, page) in pages.iter().enumerate() {
            for (number, option) in page {
                self.say(format_args!("  [{number}] {option}"))?;
            }
            if page_index < last_page {
                self.ask(PAGE_BREAK_PROMPT)?;
            }
        }

        self.say("\nYou may:")?;
        self.say("- Enter one or more numbers separated by commas")?;
        self.say("- Type 'random' to select randomly")?;
        self.say("- Type custom terms directly")?;
        let answer = self.ask("Enter your selection: ")?;
        Ok(parse_selection(&answer, options, rng))
    }
}
