//! Renders an ordered set of questions into an exportable document.
//!
//! Every format is built from [`question_lines`], the only place that
//! decides whether the answer key is emitted.

mod pdf_layout;
mod text;

pub use pdf_layout::{PdfLayout, PdfRenderer, PlacedLine};
pub use text::TextRenderer;

use serde::{Deserialize, Serialize};

use crate::{errors::AppResult, models::domain::Question};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Txt,
    Md,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Txt => "txt",
            ExportFormat::Md => "md",
        }
    }

    /// Markdown is served as plain text, the body is identical to txt
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Txt | ExportFormat::Md => "text/plain",
        }
    }

    pub fn file_name(&self) -> String {
        format!("questions.{}", self.extension())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_answers: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Stem,
    Option { last: bool },
    Answer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionLine {
    pub kind: LineKind,
    pub text: String,
}

/// Lines of one numbered question block. `number` is 1-based output order.
pub fn question_lines(number: usize, question: &Question, include_answers: bool) -> Vec<QuestionLine> {
    let mut lines = Vec::with_capacity(6);
    lines.push(QuestionLine {
        kind: LineKind::Stem,
        text: format!("{}. {}", number, question.question),
    });

    let mut options = question.lettered_options().peekable();
    while let Some((key, text)) = options.next() {
        lines.push(QuestionLine {
            kind: LineKind::Option {
                last: options.peek().is_none(),
            },
            text: format!("{}) {}", key, text),
        });
    }

    if include_answers {
        lines.push(QuestionLine {
            kind: LineKind::Answer,
            text: format!("Answer: {}", question.correct_answer),
        });
    }

    lines
}

pub trait DocumentRenderer: Send + Sync {
    fn render(&self, questions: &[Question], include_answers: bool) -> AppResult<Vec<u8>>;
}

/// Render `questions` in the requested format.
///
/// The output is produced in memory and only returned once complete, so a
/// failure never yields a truncated document.
pub fn render(questions: &[Question], options: ExportOptions) -> AppResult<Vec<u8>> {
    match options.format {
        ExportFormat::Pdf => PdfRenderer::default().render(questions, options.include_answers),
        ExportFormat::Txt | ExportFormat::Md => {
            TextRenderer.render(questions, options.include_answers)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::BloomsLevel;
    use crate::test_utils::fixtures::sample_question;

    #[test]
    fn question_lines_number_and_letter_the_block() {
        let question = sample_question(42, "Unit 1", "Sets", BloomsLevel::Remember);
        let lines = question_lines(3, &question, false);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].text, format!("3. {}", question.question));
        assert_eq!(lines[1].text, format!("A) {}", question.option_a));
        assert_eq!(lines[4].text, format!("D) {}", question.option_d));
        assert_eq!(lines[4].kind, LineKind::Option { last: true });
        assert_eq!(lines[3].kind, LineKind::Option { last: false });
    }

    #[test]
    fn answer_line_only_when_requested() {
        let question = sample_question(1, "Unit 1", "Sets", BloomsLevel::Remember);

        let without = question_lines(1, &question, false);
        assert!(without.iter().all(|l| l.kind != LineKind::Answer));

        let with = question_lines(1, &question, true);
        let last = with.last().expect("block has lines");
        assert_eq!(last.kind, LineKind::Answer);
        assert_eq!(last.text, format!("Answer: {}", question.correct_answer));
    }

    #[test]
    fn export_format_metadata() {
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
        assert_eq!(ExportFormat::Md.content_type(), "text/plain");
        assert_eq!(ExportFormat::Txt.file_name(), "questions.txt");
        assert_eq!(ExportFormat::Md.file_name(), "questions.md");
    }

    #[test]
    fn txt_and_md_render_identical_bytes() {
        let questions = vec![sample_question(1, "Unit 1", "Sets", BloomsLevel::Apply)];
        let txt = render(
            &questions,
            ExportOptions {
                format: ExportFormat::Txt,
                include_answers: true,
            },
        )
        .expect("txt renders");
        let md = render(
            &questions,
            ExportOptions {
                format: ExportFormat::Md,
                include_answers: true,
            },
        )
        .expect("md renders");

        assert_eq!(txt, md);
    }

    #[test]
    fn pdf_render_starts_with_pdf_header() {
        let questions = vec![sample_question(1, "Unit 1", "Sets", BloomsLevel::Apply)];
        let bytes = render(
            &questions,
            ExportOptions {
                format: ExportFormat::Pdf,
                include_answers: false,
            },
        )
        .expect("pdf renders");

        assert!(bytes.starts_with(b"%PDF-"));
    }
}
