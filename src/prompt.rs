//! Interactive prompts.
//!
//! Everything the operator answers goes through the [`Prompt`] trait so the
//! workflow can be driven by a scripted double in tests. [`TermPrompt`] is
//! the stdin implementation used by the binary.

use std::io::{self, Write};

use crate::error::Result;
use crate::output::{BOLD, CYAN, GRAY, GREEN, RESET, YELLOW};

pub trait Prompt {
    /// Ask a yes/no question and return the operator's choice.
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Ask for a free-form value; empty input is rejected and re-prompted.
    fn input(&self, question: &str) -> Result<String>;

    /// Pick exactly one option; returns its index.
    fn select(&self, question: &str, options: &[String]) -> Result<usize>;

    /// Pick zero or more options; returns indices in the order the operator
    /// gave them. Callers that need a non-empty selection re-prompt.
    fn multi_select(&self, question: &str, options: &[String]) -> Result<Vec<usize>>;
}

/// Stdin-backed prompt with numbered option lists.
pub struct TermPrompt;

impl TermPrompt {
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> Result<String> {
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    fn print_options(&self, options: &[String]) {
        println!();
        for (i, option) in options.iter().enumerate() {
            println!("  {BOLD}{}{RESET}. {}", i + 1, option);
        }
        println!();
    }
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TermPrompt {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            print!("{CYAN}?{RESET} {} {GRAY}{}{RESET} ", question, hint);
            match self.read_line()?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                "" => return Ok(default),
                _ => println!("{YELLOW}Please answer y or n{RESET}"),
            }
        }
    }

    fn input(&self, question: &str) -> Result<String> {
        loop {
            print!("{CYAN}?{RESET} {}: ", question);
            let value = self.read_line()?;
            if !value.is_empty() {
                return Ok(value);
            }
            println!("{YELLOW}A value is required{RESET}");
        }
    }

    fn select(&self, question: &str, options: &[String]) -> Result<usize> {
        println!("{CYAN}?{RESET} {}", question);
        self.print_options(options);

        loop {
            print!("{GRAY}Enter choice [1-{}]:{RESET} ", options.len());
            match self.read_line()?.parse::<usize>() {
                Ok(n) if n >= 1 && n <= options.len() => return Ok(n - 1),
                _ => println!(
                    "{YELLOW}Please enter a number between 1 and {}{RESET}",
                    options.len()
                ),
            }
        }
    }

    fn multi_select(&self, question: &str, options: &[String]) -> Result<Vec<usize>> {
        println!("{CYAN}?{RESET} {}", question);
        self.print_options(options);

        loop {
            print!("{GRAY}Enter choices, comma-separated [1-{}]:{RESET} ", options.len());
            let line = self.read_line()?;

            match parse_selection(&line, options.len()) {
                Some(picked) => {
                    if !picked.is_empty() {
                        let names: Vec<&str> =
                            picked.iter().map(|&i| options[i].as_str()).collect();
                        println!("{GREEN}Selected:{RESET} {}", names.join(", "));
                    }
                    return Ok(picked);
                }
                None => println!(
                    "{YELLOW}Enter numbers between 1 and {}, comma-separated (e.g. 1,3){RESET}",
                    options.len()
                ),
            }
        }
    }
}

/// Parse "1,3,4" into zero-based indices, keeping operator order and
/// dropping duplicates. Returns None on any out-of-range or non-numeric
/// entry so the caller re-prompts.
fn parse_selection(line: &str, option_count: usize) -> Option<Vec<usize>> {
    let mut picked = Vec::new();
    for part in line.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<usize>() {
            Ok(n) if n >= 1 && n <= option_count => {
                if !picked.contains(&(n - 1)) {
                    picked.push(n - 1);
                }
            }
            _ => return None,
        }
    }
    Some(picked)
}

/// Scripted prompt for tests: answers are consumed front-to-back and the
/// options offered at each select are recorded for assertions.
#[cfg(test)]
pub struct ScriptedPrompt {
    answers: std::sync::Mutex<std::collections::VecDeque<Answer>>,
    offered: std::sync::Mutex<Vec<Vec<String>>>,
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Input(String),
    Select(usize),
    MultiSelect(Vec<usize>),
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: std::sync::Mutex::new(answers.into()),
            offered: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn next(&self, question: &str) -> Answer {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for: {question}"))
    }

    /// Option lists passed to select/multi_select, in call order.
    pub fn offered_options(&self) -> Vec<Vec<String>> {
        self.offered.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

#[cfg(test)]
impl Prompt for ScriptedPrompt {
    fn confirm(&self, question: &str, _default: bool) -> Result<bool> {
        match self.next(question) {
            Answer::Confirm(v) => Ok(v),
            other => panic!("expected Confirm answer for {question:?}, got {other:?}"),
        }
    }

    fn input(&self, question: &str) -> Result<String> {
        match self.next(question) {
            Answer::Input(v) => Ok(v),
            other => panic!("expected Input answer for {question:?}, got {other:?}"),
        }
    }

    fn select(&self, question: &str, options: &[String]) -> Result<usize> {
        self.offered.lock().unwrap().push(options.to_vec());
        match self.next(question) {
            Answer::Select(i) => {
                assert!(i < options.len(), "scripted index out of range");
                Ok(i)
            }
            other => panic!("expected Select answer for {question:?}, got {other:?}"),
        }
    }

    fn multi_select(&self, question: &str, options: &[String]) -> Result<Vec<usize>> {
        self.offered.lock().unwrap().push(options.to_vec());
        match self.next(question) {
            Answer::MultiSelect(picked) => {
                for &i in &picked {
                    assert!(i < options.len(), "scripted index out of range");
                }
                Ok(picked)
            }
            other => panic!("expected MultiSelect answer for {question:?}, got {other:?}"),
        }
    }
}
