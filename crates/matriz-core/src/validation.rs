//! Validation rules gating the "advance" action.
//!
//! Every rule is a pure predicate over the staged value. A failing rule
//! reports a [`Violation`]; the user-facing wording lives in
//! [`crate::messages`].

use crate::decompose::parse_concept_authors;
use crate::field::{ChoiceOption, FieldValue};

/// Suffixes accepted by the leading-verb check
pub const INFINITIVE_SUFFIXES: [&str; 3] = ["ar", "er", "ir"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty member of the field's options
    Choice,
    /// Trimmed length strictly greater than the threshold
    MinLength(usize),
    /// Minimum length and a required substring
    Contains { min: usize, needle: &'static str },
    /// Minimum length and a first word that looks like an infinitive
    LeadingVerb(usize),
    /// Decomposed lines capped at `max`, each longer than `min_line` and of
    /// the given shape
    Lines {
        min_line: usize,
        shape: LineShape,
        max: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    Any,
    /// `Concepto - Autores`
    ConceptAuthors,
}

/// Why a staged value was rejected. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Empty,
    NotAnOption,
    TooShort { min: usize },
    MissingPattern { needle: &'static str },
    NotInfinitive { word: String },
    NoLines,
    LineTooShort { line: usize, min: usize },
    LineMalformed { line: usize },
}

impl Rule {
    pub fn check(&self, value: &FieldValue, options: &[ChoiceOption]) -> Result<(), Violation> {
        match *self {
            Rule::Choice => {
                let text = value.to_input_text();
                let choice = text.trim();
                if choice.is_empty() {
                    return Err(Violation::Empty);
                }
                if options.iter().any(|option| option.value == choice) {
                    Ok(())
                } else {
                    Err(Violation::NotAnOption)
                }
            }
            Rule::MinLength(min) => check_length(&value.to_input_text(), min),
            Rule::Contains { min, needle } => {
                let text = value.to_input_text();
                check_length(&text, min)?;
                if text.contains(needle) {
                    Ok(())
                } else {
                    Err(Violation::MissingPattern { needle })
                }
            }
            Rule::LeadingVerb(min) => {
                let text = value.to_input_text();
                check_length(&text, min)?;
                let word = first_word(&text).unwrap_or_default();
                if is_infinitive(word) {
                    Ok(())
                } else {
                    Err(Violation::NotInfinitive {
                        word: word.to_string(),
                    })
                }
            }
            Rule::Lines {
                min_line,
                shape,
                max,
            } => {
                // Lines past the cap are dropped, as the store does
                let mut lines = value.items();
                if let Some(max) = max {
                    lines.truncate(max);
                }
                if lines.is_empty() {
                    return Err(Violation::NoLines);
                }
                for (idx, line) in lines.iter().enumerate() {
                    if line.chars().count() <= min_line {
                        return Err(Violation::LineTooShort {
                            line: idx + 1,
                            min: min_line,
                        });
                    }
                    if shape == LineShape::ConceptAuthors && parse_concept_authors(line).is_none()
                    {
                        return Err(Violation::LineMalformed { line: idx + 1 });
                    }
                }
                Ok(())
            }
        }
    }
}

fn check_length(text: &str, min: usize) -> Result<(), Violation> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Violation::Empty);
    }
    if trimmed.chars().count() > min {
        Ok(())
    } else {
        Err(Violation::TooShort { min })
    }
}

/// First whitespace-delimited token
pub fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

/// Best-effort infinitive check: the word, stripped of surrounding
/// punctuation, ends in `-ar`, `-er` or `-ir`. Accepts plenty of
/// non-verbs ("mar", "mujer") and is only meant as a lint.
pub fn is_infinitive(word: &str) -> bool {
    let word = word
        .trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase();
    INFINITIVE_SUFFIXES.iter().any(|s| word.ends_with(s))
}
