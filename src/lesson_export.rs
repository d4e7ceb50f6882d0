//! Lesson to PDF pipeline: layout, then encoding.

use time::OffsetDateTime;

use crate::layout;
use crate::lesson::LessonRecord;
use crate::pdf::{self, PageLayout};

/// A finished document, ready to be sent or saved.
#[derive(Debug, Clone)]
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

/// Generates the worksheet PDF for `lesson`.
///
/// The clock is not read here: callers pass the time to print, normally
/// `OffsetDateTime::now_utc()` taken once per request.
pub fn generate_lesson_pdf(lesson: &LessonRecord, generated_at: OffsetDateTime) -> GeneratedPdf {
    let lines = layout::render(lesson, generated_at);

    let capacity = PageLayout::default().capacity();
    if lines.len() > capacity {
        log::warn!(
            "lesson {:?} has {} lines, only {} fit on the page; dropping {}",
            lesson.title,
            lines.len(),
            capacity,
            lines.len() - capacity
        );
    }

    GeneratedPdf {
        bytes: pdf::encode(&lines),
        filename: lesson.filename(),
        content_type: pdf::CONTENT_TYPE,
    }
}
