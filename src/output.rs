//! Terminal interaction and output formatting.
//!
//! All user-facing I/O goes through the [`Terminal`] trait so the walker can be
//! driven by a scripted terminal in tests. [`ConsoleTerminal`] is the real
//! implementation: colored output, a progress bar while files are hashed, and
//! line-based prompts on stdin.

use colored::*;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};

/// Warning shown after an ambiguous answer to a yes/no question.
pub const AMBIGUOUS_ANSWER_WARNING: &str =
    "WARNING: You did not answer 'yes' or 'no'! We are assuming YES, are you sure?";

/// Prompt shown on the retry that follows an ambiguous answer.
pub const CONFIRM_DEFAULT_YES_PROMPT: &str = "Press ENTER again to confirm YES or type 'no'.\n";

/// Question asked before moving on to the subdirectories.
pub const CONTINUE_QUESTION: &str = "Press CTRL+c to Quit or continue to next folder.";

/// How a line of output should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    Heading,
    Success,
    Danger,
    Warning,
    Info,
}

/// Interactive terminal capability.
///
/// Implementors provide the primitive operations; the prompt policies are
/// provided methods so every terminal answers questions the same way.
pub trait Terminal {
    fn clear_screen(&mut self);

    fn print_styled(&mut self, text: &str, style: Style);

    /// Shows `prompt` and reads one line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn print(&mut self, text: &str) {
        self.print_styled(text, Style::Plain);
    }

    /// A progress bar for `len` steps. Hidden unless overridden.
    fn progress_bar(&mut self, _len: u64) -> ProgressBar {
        ProgressBar::hidden()
    }

    /// Asks a yes/no question.
    ///
    /// `y`/`yes` and `n`/`no` (any case) are taken literally. With
    /// `continue_on_empty` set, any other answer means yes. Otherwise an
    /// ambiguous answer prints a warning and asks once more; a second
    /// ambiguous answer means yes. End of input always means no.
    fn prompt_yes_no(&mut self, question: &str, continue_on_empty: bool) -> io::Result<bool> {
        let mut lenient = continue_on_empty;
        let mut prompt = if continue_on_empty {
            format!("{question} (ENTER key) ")
        } else {
            format!("{question} y/n:")
        };

        loop {
            let Some(answer) = self.read_line(&prompt)? else {
                return Ok(false);
            };
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ if lenient => return Ok(true),
                _ => {
                    self.print_styled(AMBIGUOUS_ANSWER_WARNING, Style::Warning);
                    prompt = CONFIRM_DEFAULT_YES_PROMPT.to_string();
                    lenient = true;
                }
            }
        }
    }

    /// Asks whether to continue into the subdirectories. Empty input continues.
    fn prompt_continue(&mut self) -> io::Result<bool> {
        self.prompt_yes_no(CONTINUE_QUESTION, true)
    }
}

/// Formats a banner: the title framed by `=` rules of the same width.
///
/// Returns the text and its width, which section headers are centered to.
///
/// ```
/// use folder_rename::output::banner;
///
/// let (text, width) = banner("Exploring /a");
/// assert_eq!(width, 12);
/// assert_eq!(text, "\n============\nExploring /a\n============");
/// ```
pub fn banner(title: &str) -> (String, usize) {
    let width = title.chars().count();
    let rule = "=".repeat(width);
    (format!("\n{rule}\n{title}\n{rule}"), width)
}

/// Formats a section header centered in `-` to `width`.
///
/// ```
/// use folder_rename::output::section;
///
/// assert_eq!(section("LOG", 12), "\n-----LOG-----");
/// ```
pub fn section(title: &str, width: usize) -> String {
    let title_len = title.chars().count();
    let rule = "-".repeat((width / 2).saturating_sub(title_len / 2));
    let mut text = format!("{rule}{title}{rule}");
    if text.chars().count() < width {
        text.push('-');
    }
    format!("\n{text}")
}

/// Real terminal on stdout/stdin.
pub struct ConsoleTerminal {
    term: Term,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ConsoleTerminal {
    fn clear_screen(&mut self) {
        self.term.clear_screen().ok();
    }

    fn print_styled(&mut self, text: &str, style: Style) {
        match style {
            Style::Plain => println!("{}", text),
            Style::Heading => println!("{}", text.bold()),
            Style::Success => println!("{}", text.green()),
            Style::Danger => println!("{}", text.red()),
            Style::Warning => println!("{}", text.yellow()),
            Style::Info => println!("{}", text.cyan()),
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn progress_bar(&mut self, len: u64) -> ProgressBar {
        let pb = ProgressBar::new(len);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted {
        answers: VecDeque<Option<&'static str>>,
        prompts: Vec<String>,
        printed: Vec<String>,
    }

    impl Scripted {
        fn new(answers: &[Option<&'static str>]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                prompts: Vec::new(),
                printed: Vec::new(),
            }
        }
    }

    impl Terminal for Scripted {
        fn clear_screen(&mut self) {}

        fn print_styled(&mut self, text: &str, _style: Style) {
            self.printed.push(text.to_string());
        }

        fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self
                .answers
                .pop_front()
                .expect("prompted more often than scripted")
                .map(|a| format!("{a}\n")))
        }
    }

    #[test]
    fn test_yes_no_literal_answers() {
        for (answer, expected) in [("y", true), ("YES", true), ("n", false), ("No", false)] {
            let mut term = Scripted::new(&[Some(answer)]);
            assert_eq!(term.prompt_yes_no("Apply?", false).unwrap(), expected);
            assert_eq!(term.prompts, vec!["Apply? y/n:"]);
            assert!(term.printed.is_empty());
        }
    }

    #[test]
    fn test_ambiguous_answer_retries_once_then_defaults_to_yes() {
        let mut term = Scripted::new(&[Some(""), Some("")]);
        assert!(term.prompt_yes_no("Apply?", false).unwrap());
        assert_eq!(term.prompts, vec!["Apply? y/n:", CONFIRM_DEFAULT_YES_PROMPT]);
        assert_eq!(term.printed, vec![AMBIGUOUS_ANSWER_WARNING]);
    }

    #[test]
    fn test_ambiguous_answer_then_no() {
        let mut term = Scripted::new(&[Some("maybe"), Some("no")]);
        assert!(!term.prompt_yes_no("Apply?", false).unwrap());
        assert_eq!(term.prompts.len(), 2);
    }

    #[test]
    fn test_end_of_input_declines() {
        let mut term = Scripted::new(&[None]);
        assert!(!term.prompt_yes_no("Apply?", false).unwrap());

        let mut term = Scripted::new(&[Some(""), None]);
        assert!(!term.prompt_yes_no("Apply?", false).unwrap());
    }

    #[test]
    fn test_continue_prompt() {
        let mut term = Scripted::new(&[Some("")]);
        assert!(term.prompt_continue().unwrap());
        assert_eq!(term.prompts, vec![format!("{CONTINUE_QUESTION} (ENTER key) ")]);

        let mut term = Scripted::new(&[Some("whatever")]);
        assert!(term.prompt_continue().unwrap());

        let mut term = Scripted::new(&[Some("n")]);
        assert!(!term.prompt_continue().unwrap());

        let mut term = Scripted::new(&[None]);
        assert!(!term.prompt_continue().unwrap());
    }

    #[test]
    fn test_banner_and_sections() {
        let (text, width) = banner("Exploring /photos/Root");
        assert_eq!(width, 22);
        assert!(text.starts_with("\n======================\n"));

        assert_eq!(section("RENAME", 22), "\n--------RENAME--------");
        assert_eq!(section("LOG", 22), "\n----------LOG----------");
        assert_eq!(section("CONFIRM", 11), "\n--CONFIRM--");
        assert_eq!(section("RENAME", 11), "\n--RENAME---");
        assert_eq!(section("DELETE", 3), "\nDELETE");
    }
}
