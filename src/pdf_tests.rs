#[cfg(test)]
mod tests {
    use crate::layout::DisplayLine;
    use crate::lesson::{Difficulty, LessonRecord, Question};
    use crate::lesson_export::generate_lesson_pdf;
    use crate::pdf::{self, PageLayout};
    use regex::Regex;
    use time::OffsetDateTime;

    fn lesson(questions: Vec<Question>) -> LessonRecord {
        LessonRecord {
            title: "Intro".into(),
            subject: "Math".into(),
            grade_level: "4".into(),
            difficulty: Difficulty::Beginner,
            learning_objectives: vec!["Count to ten".into()],
            sections: Vec::new(),
            questions,
            include_answer_key: true,
        }
    }

    fn question(prompt: &str, answer: Option<&str>) -> Question {
        Question { prompt: prompt.into(), answer: answer.map(Into::into) }
    }

    /// Re-parses the xref table and checks every offset lands on its object.
    /// Returns the number of entries, including the free one.
    fn check_xref(bytes: &[u8]) -> usize {
        let text = std::str::from_utf8(bytes).expect("output is not UTF-8");

        let re_startxref = Regex::new(r"startxref\n(\d+)\n%%EOF$").unwrap();
        let xref_pos: usize = re_startxref.captures(text).expect("no startxref")[1].parse().unwrap();
        let xref = &text[xref_pos..];

        let re_head = Regex::new(r"^xref\n0 (\d+)\n").unwrap();
        let head = re_head.captures(xref).expect("startxref does not point at xref");
        let size: usize = head[1].parse().unwrap();

        let re_entry = Regex::new(r"(\d{10}) (\d{5}) ([nf]) \n").unwrap();
        let entries: Vec<_> = re_entry.captures_iter(&xref[head[0].len()..]).take(size).collect();
        assert_eq!(entries.len(), size);

        assert_eq!(&entries[0][1], "0000000000");
        assert_eq!(&entries[0][2], "65535");
        assert_eq!(&entries[0][3], "f");

        for (id, entry) in entries.iter().enumerate().skip(1) {
            assert_eq!(&entry[3], "n");
            let offset: usize = entry[1].parse().unwrap();
            let expected = format!("{id} 0 obj");
            assert!(
                text[offset..].starts_with(&expected),
                "object {id} not found at offset {offset}"
            );
        }

        let re_trailer = Regex::new(r"trailer\n<< /Size (\d+) /Root 1 0 R >>").unwrap();
        let trailer_size: usize = re_trailer.captures(xref).expect("no trailer")[1].parse().unwrap();
        assert_eq!(trailer_size, size);
        size
    }

    fn shown_text(bytes: &[u8]) -> Vec<String> {
        let text = std::str::from_utf8(bytes).unwrap();
        let re = Regex::new(r"(?m)^1 0 0 1 50 -?\d+ Tm \((.*)\) Tj$").unwrap();
        re.captures_iter(text).map(|c| c[1].to_string()).collect()
    }

    #[test]
    fn test_small_lesson_end_to_end() {
        let lesson = lesson(vec![question("What is 2 + 3?", Some("5"))]);
        let pdf = generate_lesson_pdf(&lesson, OffsetDateTime::now_utc());

        assert!(pdf.bytes.starts_with(b"%PDF-1.4\n"));
        assert_eq!(pdf.filename, "math-lesson.pdf");
        assert_eq!(pdf.content_type, "application/pdf");
        assert_eq!(check_xref(&pdf.bytes), 6);

        let lines = shown_text(&pdf.bytes);
        assert_eq!(lines[0], "Intro");
        assert!(lines.iter().any(|l| l == "Worksheet Questions"));
        assert!(lines.iter().any(|l| l == "Answer Key"));
        assert!(lines.iter().any(|l| l == "1. 5"));
    }

    #[test]
    fn test_no_answers_no_key() {
        let lesson = lesson(vec![question("Why?", None), question("How?", None)]);
        let pdf = generate_lesson_pdf(&lesson, OffsetDateTime::now_utc());
        let lines = shown_text(&pdf.bytes);
        assert!(lines.iter().any(|l| l == "Worksheet Questions"));
        assert!(!lines.iter().any(|l| l == "Answer Key"));
    }

    #[test]
    fn test_escaped_title() {
        let mut lesson = lesson(vec![question("Why?", None)]);
        lesson.title = r"f(x) = a\b".into();
        let pdf = generate_lesson_pdf(&lesson, OffsetDateTime::now_utc());
        check_xref(&pdf.bytes);

        let text = String::from_utf8(pdf.bytes).unwrap();
        assert!(text.contains(r"1 0 0 1 50 760 Tm (f\(x\) = a\\b) Tj"));
    }

    #[test]
    fn test_overflow_truncated() {
        let questions = (1..=40).map(|i| question(&format!("Question {i}"), None)).collect();
        let pdf = generate_lesson_pdf(&lesson(questions), OffsetDateTime::now_utc());

        assert_eq!(check_xref(&pdf.bytes), 6);
        let lines = shown_text(&pdf.bytes);
        assert_eq!(lines.len(), PageLayout::default().capacity());
        assert!(!lines.iter().any(|l| l == "40. Question 40"));
    }

    #[test]
    fn test_empty_lines_still_valid() {
        let bytes = pdf::encode(&[]);
        assert_eq!(check_xref(&bytes), 6);
        assert!(shown_text(&bytes).is_empty());
    }

    #[test]
    fn test_non_ascii_offsets() {
        let lines = [DisplayLine::new("Größe ÄÖÜ"), DisplayLine::new("naïve café")];
        let bytes = pdf::encode(&lines);
        check_xref(&bytes);
    }

    #[test]
    fn test_readable_by_lopdf() {
        let lesson = lesson(vec![question("What is (1 + 1)?", Some("2"))]);
        let pdf = generate_lesson_pdf(&lesson, OffsetDateTime::now_utc());

        let doc = lopdf::Document::load_mem(&pdf.bytes).expect("lopdf could not parse output");
        assert_eq!(doc.version, "1.4");
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = *pages.values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        let content = String::from_utf8(content).unwrap();
        assert!(content.starts_with("BT\n/F1 12 Tf\n"));
        assert!(content.contains(r"(1. What is \(1 + 1\)?) Tj"));
        assert!(content.ends_with("ET"));
    }
}
