//! One script line: an optional chain of tests and the action it guards.
//!
//! ```text
//! line   := "DO" action | "IF" test (joiner test)* "DO" action
//! joiner := ";" (and) | "," (or)
//! ```
//!
//! The two joiners do not nest. When a line has any `;` tests, the first test
//! and every `;` test must all pass and the `,` tests are never consulted.
//! Otherwise the line holds if the first test or any `,` test passes.

use crate::condition::{Condition, Test};
use crate::consts::{COMMENT, DO_REGEX, IF_REGEX, REPLACE_REGEX, TEST_REGEX};
use crate::context::RenameContext;
use crate::error::{ErrorKind, Result};
use crate::vocabulary::Keyword;
use exn::OptionExt;

/// What a line does once its tests hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append the template, apostrophes stripped and tokens substituted.
    Add(String),
    /// Replace every occurrence of `from` in the name built so far.
    Replace { from: String, to: String },
    /// Abort the run.
    Fail,
    /// Anything else; has no effect.
    Ignored(String),
}
impl Action {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match Keyword::split(text) {
            Some((Keyword::Add, template)) => Action::Add(template.trim().replace('\'', "")),
            Some((Keyword::Replace, args)) => match REPLACE_REGEX.captures(args) {
                Some(caps) if !caps[1].is_empty() => Action::Replace {
                    from: caps[1].to_string(),
                    to: caps[2].to_string(),
                },
                _ => {
                    tracing::debug!(action = text, "Malformed REPLACE arguments; action has no effect");
                    Action::Ignored(text.to_string())
                },
            },
            Some((Keyword::Fail, _)) => Action::Fail,
            None => Action::Ignored(text.to_string()),
        }
    }
}

/// Tests of a line, grouped by how they combine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    /// `None` for unconditional `DO` lines.
    pub first: Option<Condition>,
    /// Tests joined with `;`.
    pub all: Vec<Condition>,
    /// Tests joined with `,`.
    pub any: Vec<Condition>,
}
impl Expression {
    pub fn holds(&self, ctx: &RenameContext<'_>) -> bool {
        let Some(first) = self.first.as_ref() else {
            return true;
        };
        let passed = first.evaluate(ctx);
        if !self.all.is_empty() {
            return passed && self.all.iter().all(|c| c.evaluate(ctx));
        }
        passed || self.any.iter().any(|c| c.evaluate(ctx))
    }
}

/// A compiled, non-blank script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// One-based position in the script text.
    pub number: usize,
    pub expression: Expression,
    pub action: Action,
}
impl Line {
    /// Compiles one line of script text. Blank and comment-only lines yield
    /// `Ok(None)`.
    pub fn parse(number: usize, text: &str) -> Result<Option<Self>> {
        let text = match text.find(COMMENT) {
            Some(index) => &text[..index],
            None => text,
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        let (expression, rest) = match IF_REGEX.find(text) {
            Some(m) => parse_tests(&text[m.end()..])?,
            None => (Expression::default(), text),
        };
        let action = DO_REGEX
            .find(rest)
            .map(|m| &rest[m.end()..])
            .ok_or_raise(|| ErrorKind::Syntax(format!("expected DO in `{}`", text.trim())))?;
        Ok(Some(Line {
            number,
            expression,
            action: Action::parse(action),
        }))
    }
}

/// Reads tests up to the `DO` keyword, returning the remaining text.
fn parse_tests(mut rest: &str) -> Result<(Expression, &str)> {
    let mut expression = Expression::default();
    while let Some(caps) = TEST_REGEX.captures(rest) {
        let letter = caps[2].chars().next().unwrap_or_default();
        let test = Test::from_letter(letter).ok_or_raise(|| ErrorKind::Syntax(format!("unknown test `{letter}`")))?;
        let condition = Condition::new(test, &caps[3]);
        match (&expression.first, &caps[1]) {
            (None, "") => expression.first = Some(condition),
            (Some(_), ";") => expression.all.push(condition),
            (Some(_), ",") => expression.any.push(condition),
            _ => exn::bail!(ErrorKind::Syntax(format!("misplaced joiner before `{condition}`"))),
        }
        rest = &rest[caps[0].len()..];
    }
    if expression.first.is_none() {
        exn::bail!(ErrorKind::Syntax("IF without a test".to_string()));
    }
    Ok((expression, rest))
}
