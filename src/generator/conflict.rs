//! Naming conflicts inside an override family, and the strategies that
//! settle them.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use indexmap::IndexMap;

use super::GenerationError;
use crate::base::MemberKey;

/// Where a candidate name was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateOrigin {
    pub class: String,
    /// `Name extends Super implements A, B` of `class`.
    pub hierarchy: String,
    /// The member the name was found under, `owner.name+descriptor`.
    pub member: String,
}

/// More than one distinct name carried into one override family.
#[derive(Debug, Clone)]
pub struct NamingConflict {
    pub owner: String,
    pub key: MemberKey,
    /// Candidate name to the family members it came from, in discovery order.
    pub candidates: IndexMap<String, Vec<CandidateOrigin>>,
}

impl NamingConflict {
    pub fn names(&self) -> Vec<String> {
        self.candidates.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn to_error(&self) -> GenerationError {
        GenerationError::NamingConflict {
            owner: self.owner.clone(),
            member: self.key.to_string(),
            names: self.names(),
        }
    }

    /// Numbered candidate listing, one origin per indented line.
    pub fn describe(&self) -> String {
        let mut out = format!("conflicting names for {}.{}:\n", self.owner, self.key);
        for (index, (name, origins)) in self.candidates.iter().enumerate() {
            out.push_str(&format!("  [{}] {}\n", index + 1, name));
            for origin in origins {
                out.push_str(&format!("        {} ({})\n", origin.hierarchy, origin.member));
            }
        }
        out
    }
}

/// Picks one candidate (by index) for a [`NamingConflict`].
pub trait ConflictResolver {
    fn resolve(&mut self, conflict: &NamingConflict) -> Result<usize, GenerationError>;
}

/// Non-interactive runs: every conflict is fatal.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailOnConflict;

impl ConflictResolver for FailOnConflict {
    fn resolve(&mut self, conflict: &NamingConflict) -> Result<usize, GenerationError> {
        Err(conflict.to_error())
    }
}

/// Always takes the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickFirst;

impl ConflictResolver for PickFirst {
    fn resolve(&mut self, _conflict: &NamingConflict) -> Result<usize, GenerationError> {
        Ok(0)
    }
}

/// Prompts an operator until a valid number is entered. End of input
/// aborts the run.
#[derive(Debug)]
pub struct InteractiveResolver<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveResolver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl InteractiveResolver<StdinLock<'static>, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> ConflictResolver for InteractiveResolver<R, W> {
    fn resolve(&mut self, conflict: &NamingConflict) -> Result<usize, GenerationError> {
        write!(self.output, "{}", conflict.describe())?;
        let count = conflict.len();

        loop {
            write!(self.output, "choose a name [1-{count}]: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(GenerationError::ConflictAborted);
            }

            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=count).contains(&choice) => return Ok(choice - 1),
                _ => writeln!(self.output, "invalid choice `{}`", line.trim())?,
            }
        }
    }
}
