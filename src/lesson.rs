//! Lesson records and the validation step that builds them from untyped JSON.
//!
//! Everything downstream of [`LessonRecord::from_json`] works on fully checked,
//! trimmed data and never validates again.

use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LessonError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("{0} is required and must be a non-empty string")]
    MissingText(&'static str),
    #[error("difficulty must be one of: beginner, intermediate, advanced")]
    InvalidDifficulty,
    #[error("learning_objectives must be a list of non-empty strings")]
    InvalidObjectives,
    #[error("sections must be a list")]
    SectionsNotList,
    #[error("each section must be an object")]
    SectionNotObject,
    #[error("section title/content must be non-empty strings")]
    InvalidSection,
    #[error("questions must be a list")]
    QuestionsNotList,
    #[error("each question must be an object")]
    QuestionNotObject,
    #[error("question prompt must be a non-empty string")]
    InvalidPrompt,
    #[error("question answer must be a string when provided")]
    InvalidAnswer,
    #[error("include_answer_key must be a boolean")]
    InvalidAnswerKeyFlag,
    #[error("At least one of learning_objectives, sections, or questions must be provided")]
    NoContent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    fn parse(s: &str) -> Option<Difficulty> {
        match s {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub answer: Option<String>,
}

impl Question {
    /// The answer text, if there is one worth printing in the answer key.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRecord {
    pub title: String,
    pub subject: String,
    pub grade_level: String,
    pub difficulty: Difficulty,
    pub learning_objectives: Vec<String>,
    pub sections: Vec<Section>,
    pub questions: Vec<Question>,
    pub include_answer_key: bool,
}

impl LessonRecord {
    pub fn from_json(payload: &Value) -> Result<LessonRecord, LessonError> {
        let obj = payload.as_object().ok_or(LessonError::NotAnObject)?;

        let title = required_text(obj, "title")?;
        let subject = required_text(obj, "subject")?;
        let grade_level = required_text(obj, "grade_level")?;

        let difficulty = match obj.get("difficulty") {
            None => Difficulty::default(),
            Some(Value::String(s)) => {
                Difficulty::parse(s).ok_or(LessonError::InvalidDifficulty)?
            }
            Some(_) => return Err(LessonError::InvalidDifficulty),
        };

        let learning_objectives = optional_list(obj, "learning_objectives")
            .ok_or(LessonError::InvalidObjectives)?
            .iter()
            .map(|item| non_empty_text(item).ok_or(LessonError::InvalidObjectives))
            .collect::<Result<Vec<_>, _>>()?;

        let sections = optional_list(obj, "sections")
            .ok_or(LessonError::SectionsNotList)?
            .iter()
            .map(parse_section)
            .collect::<Result<Vec<_>, _>>()?;

        let questions = optional_list(obj, "questions")
            .ok_or(LessonError::QuestionsNotList)?
            .iter()
            .map(parse_question)
            .collect::<Result<Vec<_>, _>>()?;

        let include_answer_key = match obj.get("include_answer_key") {
            None => true,
            Some(Value::Bool(b)) => *b,
            Some(_) => return Err(LessonError::InvalidAnswerKeyFlag),
        };

        if learning_objectives.is_empty() && sections.is_empty() && questions.is_empty() {
            return Err(LessonError::NoContent);
        }

        Ok(LessonRecord {
            title,
            subject,
            grade_level,
            difficulty,
            learning_objectives,
            sections,
            questions,
            include_answer_key,
        })
    }

    /// Suggested download name, e.g. `earth-science-lesson.pdf`.
    pub fn filename(&self) -> String {
        format!("{}-lesson.pdf", self.subject.to_lowercase().replace(' ', "-"))
    }
}

fn non_empty_text(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn required_text(obj: &Map<String, Value>, key: &'static str) -> Result<String, LessonError> {
    obj.get(key)
        .and_then(non_empty_text)
        .ok_or(LessonError::MissingText(key))
}

/// A missing key is an empty list; a present one, `null` included, must be an array.
fn optional_list<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    match obj.get(key) {
        None => Some(&[][..]),
        Some(Value::Array(items)) => Some(items.as_slice()),
        Some(_) => None,
    }
}

fn parse_section(value: &Value) -> Result<Section, LessonError> {
    let obj = value.as_object().ok_or(LessonError::SectionNotObject)?;
    let title = obj.get("title").and_then(non_empty_text);
    let content = obj.get("content").and_then(non_empty_text);
    match (title, content) {
        (Some(title), Some(content)) => Ok(Section { title, content }),
        _ => Err(LessonError::InvalidSection),
    }
}

fn parse_question(value: &Value) -> Result<Question, LessonError> {
    let obj = value.as_object().ok_or(LessonError::QuestionNotObject)?;
    let prompt = obj
        .get("prompt")
        .and_then(non_empty_text)
        .ok_or(LessonError::InvalidPrompt)?;
    let answer = match obj.get("answer") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => return Err(LessonError::InvalidAnswer),
    };
    Ok(Question { prompt, answer })
}
