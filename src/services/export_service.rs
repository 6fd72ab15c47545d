use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::dto::request::ExportRequest,
    services::render::{self, ExportFormat, ExportOptions},
};

/// A fully rendered document ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
}

impl ExportedFile {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn file_name(&self) -> String {
        self.format.file_name()
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.file_name())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn export(&self, request: ExportRequest) -> AppResult<ExportedFile> {
        request.validate()?;
        if let Some(question) = request.questions.iter().find(|q| !q.is_complete()) {
            return Err(AppError::ValidationError(format!(
                "Question {} is missing its text or an option",
                question.id
            )));
        }

        let options = ExportOptions {
            format: request.format,
            include_answers: request.include_answers,
        };

        let bytes = render::render(&request.questions, options).map_err(|err| {
            log::error!(
                "Export of {} questions as {} failed: {}",
                request.questions.len(),
                options.format.extension(),
                err
            );
            match err {
                AppError::RenderError(_) => err,
                other => AppError::RenderError(other.to_string()),
            }
        })?;

        log::info!(
            "Exported {} questions as {} ({} bytes, answers {})",
            request.questions.len(),
            options.format.extension(),
            bytes.len(),
            if options.include_answers { "included" } else { "redacted" }
        );

        Ok(ExportedFile {
            bytes,
            format: options.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::BloomsLevel;
    use crate::test_utils::fixtures::sample_question;

    fn request(format: ExportFormat, include_answers: bool) -> ExportRequest {
        ExportRequest {
            questions: vec![
                sample_question(1, "Unit 1", "Sets", BloomsLevel::Remember),
                sample_question(2, "Unit 1", "Sets", BloomsLevel::Apply),
            ],
            format,
            include_answers,
        }
    }

    #[test]
    fn text_export_carries_plain_text_metadata() {
        let file = ExportService::new()
            .export(request(ExportFormat::Md, true))
            .expect("exports");

        assert_eq!(file.content_type(), "text/plain");
        assert_eq!(file.content_disposition(), "attachment; filename=questions.md");
        let body = String::from_utf8(file.bytes).expect("utf-8 body");
        assert_eq!(body.matches("Answer: ").count(), 2);
    }

    #[test]
    fn pdf_export_carries_pdf_metadata() {
        let file = ExportService::new()
            .export(request(ExportFormat::Pdf, false))
            .expect("exports");

        assert_eq!(file.content_type(), "application/pdf");
        assert_eq!(file.file_name(), "questions.pdf");
        assert!(file.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn empty_export_is_rejected() {
        let mut empty = request(ExportFormat::Txt, false);
        empty.questions.clear();

        let result = ExportService::new().export(empty);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn incomplete_question_is_rejected() {
        let mut incomplete = request(ExportFormat::Txt, true);
        incomplete.questions[1].option_d = " ".to_string();

        let result = ExportService::new().export(incomplete);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn unencodable_pdf_fails_with_generic_message() {
        let mut bad = request(ExportFormat::Pdf, false);
        bad.questions[0].question = "\u{6f22}\u{5b57}?".to_string();

        let err = ExportService::new().export(bad).expect_err("cannot encode");
        assert!(matches!(err, AppError::RenderError(_)));
        assert_eq!(err.public_message(), "Export failed");
    }
}
