use encoding_rs::WINDOWS_1252;
use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};

use crate::{
    errors::{AppError, AppResult},
    models::domain::Question,
};

use super::{question_lines, DocumentRenderer, LineKind, QuestionLine};

/// Fixed page geometry and line advances, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub font_size: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub stem_x: f64,
    pub option_x: f64,
    pub stem_advance: f64,
    pub option_advance: f64,
    pub last_option_advance: f64,
    pub answer_advance: f64,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            page_width: Self::A4.0,
            page_height: Self::A4.1,
            font_size: 12.0,
            top_margin: 50.0,
            bottom_margin: 50.0,
            stem_x: 50.0,
            option_x: 70.0,
            stem_advance: 20.0,
            option_advance: 15.0,
            last_option_advance: 25.0,
            answer_advance: 30.0,
        }
    }
}

impl PdfLayout {
    pub const A4: (f64, f64) = (595.28, 841.89);

    fn top(&self) -> f64 {
        self.page_height - self.top_margin
    }

    fn placement(&self, kind: LineKind) -> (f64, f64) {
        match kind {
            LineKind::Stem => (self.stem_x, self.stem_advance),
            LineKind::Option { last: false } => (self.option_x, self.option_advance),
            LineKind::Option { last: true } => (self.option_x, self.last_option_advance),
            LineKind::Answer => (self.stem_x, self.answer_advance),
        }
    }

    /// Vertical space a whole block consumes, trailing gap included
    fn block_height(&self, lines: &[QuestionLine]) -> f64 {
        lines.iter().map(|line| self.placement(line.kind).1).sum()
    }
}

/// A single-line text run and its baseline position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

fn points(value: f64) -> Mm {
    Mm::from(Pt(value as f32))
}

/// Collapse line breaks and check the run against WinAnsiEncoding, the only
/// encoding the standard Helvetica font offers.
fn single_line(text: &str) -> Result<String, String> {
    let line: String = text
        .chars()
        .map(|ch| if matches!(ch, '\t' | '\n' | '\r') { ' ' } else { ch })
        .collect();

    let unencodable = |ch: &char| WINDOWS_1252.encode(ch.encode_utf8(&mut [0; 4])).2;
    if let Some(offending) = line.chars().find(unencodable) {
        return Err(format!(
            "character '{}' (U+{:04X}) cannot be encoded in Helvetica",
            offending, offending as u32
        ));
    }
    Ok(line)
}

/// Fixed-layout paginated document in the standard Helvetica font.
///
/// Page breaks are decided once per question, before its first line: when
/// the remaining space above the bottom margin cannot hold the whole block,
/// the block moves to a new page. Long lines are not wrapped.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PdfLayout,
}

impl PdfRenderer {
    pub fn new(layout: PdfLayout) -> Self {
        Self { layout }
    }

    /// Place every line on its page. Fails before any output is produced if
    /// a line cannot be encoded.
    pub fn paginate(&self, questions: &[Question], include_answers: bool) -> AppResult<Vec<Vec<PlacedLine>>> {
        let layout = &self.layout;
        let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
        let mut cursor = layout.top();

        for (index, question) in questions.iter().enumerate() {
            let lines = question_lines(index + 1, question, include_answers);

            let page_has_content = pages.last().is_some_and(|page| !page.is_empty());
            if page_has_content && cursor - layout.block_height(&lines) < layout.bottom_margin {
                pages.push(Vec::new());
                cursor = layout.top();
            }

            for line in lines {
                let (x, advance) = layout.placement(line.kind);
                let text = single_line(&line.text).map_err(|reason| {
                    AppError::RenderError(format!("question {}: {}", question.id, reason))
                })?;

                if let Some(page) = pages.last_mut() {
                    page.push(PlacedLine { x, y: cursor, text });
                }
                cursor -= advance;
            }
        }

        Ok(pages)
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, questions: &[Question], include_answers: bool) -> AppResult<Vec<u8>> {
        let pages = self.paginate(questions, include_answers)?;
        let layout = &self.layout;
        let (width, height) = (points(layout.page_width), points(layout.page_height));

        let (document, first_page, first_layer) = PdfDocument::new("Questions", width, height, "Questions");
        let font = document
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| AppError::RenderError(format!("font: {:?}", err)))?;

        let mut targets = vec![(first_page, first_layer)];
        for _ in 1..pages.len() {
            targets.push(document.add_page(width, height, "Questions"));
        }

        for (page, (page_index, layer_index)) in pages.iter().zip(targets) {
            let layer = document.get_page(page_index).get_layer(layer_index);
            for line in page {
                layer.use_text(
                    line.text.as_str(),
                    layout.font_size as f32,
                    points(line.x),
                    points(line.y),
                    &font,
                );
            }
        }

        let bytes = document
            .save_to_bytes()
            .map_err(|err| AppError::RenderError(format!("pdf serialization: {:?}", err)))?;

        log::debug!(
            "Rendered {} questions onto {} PDF pages",
            questions.len(),
            pages.len()
        );
        Ok(bytes)
    }
}
