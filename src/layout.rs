//! Text layout: turns a lesson into the ordered list of lines printed on the page.
//!
//! Widths are measured in characters, not font metrics. The page font is
//! proportional, so this is only an approximation of the printed width.

use std::fmt;
use std::str::SplitWhitespace;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::lesson::LessonRecord;

/// Default wrap width, in characters.
pub const WRAP_WIDTH: usize = 90;

const ANSWER_BLANK: &str = "Answer: __________________________";

/// A single rendered line, without embedded newlines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayLine(String);

impl DisplayLine {
    pub fn new(text: impl Into<String>) -> DisplayLine {
        DisplayLine(text.into())
    }

    pub fn blank() -> DisplayLine {
        DisplayLine(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Greedy word wrapper returned by [`wrap`].
///
/// Cloning the iterator gives a fresh copy of the remaining lines, so a wrap
/// can be replayed as many times as needed.
#[derive(Debug, Clone)]
pub struct Wrap<'a> {
    words: SplitWhitespace<'a>,
    pending: Option<&'a str>,
    max_width: usize,
    emitted: bool,
}

/// Wraps `text` into lines of at most `max_width` characters.
///
/// Words are never split: a word longer than `max_width` gets a line of its
/// own. Text without any words yields exactly one empty line.
pub fn wrap(text: &str, max_width: usize) -> Wrap<'_> {
    Wrap {
        words: text.split_whitespace(),
        pending: None,
        max_width,
        emitted: false,
    }
}

impl Iterator for Wrap<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let Some(first) = self.pending.take().or_else(|| self.words.next()) else {
            if self.emitted {
                return None;
            }
            self.emitted = true;
            return Some(String::new());
        };
        self.emitted = true;

        let mut line = String::from(first);
        let mut width = first.chars().count();
        for word in self.words.by_ref() {
            let word_width = word.chars().count();
            if width + 1 + word_width <= self.max_width {
                line.push(' ');
                line.push_str(word);
                width += 1 + word_width;
            } else {
                self.pending = Some(word);
                break;
            }
        }
        Some(line)
    }
}

fn push_wrapped(lines: &mut Vec<DisplayLine>, text: &str) {
    lines.extend(wrap(text, WRAP_WIDTH).map(DisplayLine::new));
}

fn timestamp(at: OffsetDateTime) -> String {
    // Rfc3339 only fails for years outside 0..=9999
    at.format(&Rfc3339)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}

/// Renders the lesson into display lines, in input order.
///
/// `generated_at` is printed on the header; pass it in UTC.
pub fn render(lesson: &LessonRecord, generated_at: OffsetDateTime) -> Vec<DisplayLine> {
    let mut lines = vec![
        DisplayLine::new(lesson.title.as_str()),
        DisplayLine::new(format!(
            "Subject: {} | Grade: {} | Difficulty: {}",
            lesson.subject, lesson.grade_level, lesson.difficulty
        )),
        DisplayLine::new(format!("Generated at: {}", timestamp(generated_at))),
        DisplayLine::blank(),
    ];

    if !lesson.learning_objectives.is_empty() {
        lines.push(DisplayLine::new("Learning Objectives"));
        for objective in &lesson.learning_objectives {
            push_wrapped(&mut lines, &format!("- {objective}"));
        }
        lines.push(DisplayLine::blank());
    }

    if !lesson.sections.is_empty() {
        lines.push(DisplayLine::new("Lesson Content"));
        for (idx, section) in lesson.sections.iter().enumerate() {
            lines.push(DisplayLine::new(format!("{}. {}", idx + 1, section.title)));
            push_wrapped(&mut lines, &section.content);
            lines.push(DisplayLine::blank());
        }
    }

    if !lesson.questions.is_empty() {
        lines.push(DisplayLine::new("Worksheet Questions"));
        for (idx, question) in lesson.questions.iter().enumerate() {
            push_wrapped(&mut lines, &format!("{}. {}", idx + 1, question.prompt));
            lines.push(DisplayLine::new(ANSWER_BLANK));
            lines.push(DisplayLine::blank());
        }
    }

    if lesson.include_answer_key && lesson.questions.iter().any(|q| q.answer().is_some()) {
        lines.push(DisplayLine::new("Answer Key"));
        for (idx, question) in lesson.questions.iter().enumerate() {
            if let Some(answer) = question.answer() {
                push_wrapped(&mut lines, &format!("{}. {}", idx + 1, answer));
            }
        }
    }

    lines
}
