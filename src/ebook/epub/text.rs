//! Plain-text extraction from (X)HTML.

use html2text::render::text_renderer::TrivialDecorator;

/// Line width handed to the renderer; wide enough to never introduce breaks.
const RENDER_WIDTH: usize = 10_000;

/// Strips markup from `html`, decoding character references.
///
/// The markup is parsed as HTML5, so tag soup and unterminated constructs
/// are recovered from the way a browser would. The contents of `head`,
/// `script` and `style` are skipped.
///
/// Block-level boundaries and `<br>` become line breaks, blank lines
/// are dropped and ASCII whitespace is collapsed per line.
pub(crate) fn html_to_text(html: &str) -> String {
    let rendered =
        html2text::from_read_with_decorator(html.as_bytes(), RENDER_WIDTH, TrivialDecorator::new());
    let mut text = String::with_capacity(rendered.len());

    for line in rendered.lines() {
        let mut words = line.split_ascii_whitespace().peekable();

        if words.peek().is_none() {
            continue;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        for (i, word) in words.enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(word);
        }
    }
    text
}
