use crate::{errors::AppResult, models::domain::Question};

use super::{question_lines, DocumentRenderer};

/// Plain numbered blocks separated by a blank line. Used for txt and md.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn render_string(&self, questions: &[Question], include_answers: bool) -> String {
        let mut content = String::new();
        for (index, question) in questions.iter().enumerate() {
            for line in question_lines(index + 1, question, include_answers) {
                content.push_str(&line.text);
                content.push('\n');
            }
            content.push('\n');
        }
        content
    }
}

impl DocumentRenderer for TextRenderer {
    fn render(&self, questions: &[Question], include_answers: bool) -> AppResult<Vec<u8>> {
        Ok(self.render_string(questions, include_answers).into_bytes())
    }
}
