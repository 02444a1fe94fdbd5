use crate::writer::WriterResult;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::borrow::Cow;
use std::io::Write;

pub(crate) struct XmlWriter<'a, W> {
    writer: quick_xml::Writer<W>,
    start_element: Option<BytesStart<'a>>,
}

impl<'a, W: Write> XmlWriter<'a, W> {
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer: quick_xml::Writer::new_with_indent(writer, b' ', 2),
            start_element: None,
        }
    }

    pub(crate) fn write_utf8_declaration(&mut self) -> WriterResult<&mut Self> {
        const XML_VERSION: &str = "1.0";
        const XML_ENCODING: &str = "UTF-8";

        self.writer.write_event(Event::Decl(BytesDecl::new(
            XML_VERSION,
            Some(XML_ENCODING),
            None,
        )))?;

        Ok(self)
    }

    pub(crate) fn write_doctype(&mut self, doctype: &str) -> WriterResult<&mut Self> {
        self.writer
            .write_event(Event::DocType(BytesText::from_escaped(doctype)))?;
        Ok(self)
    }

    /// Start an element: `<tag`
    pub(crate) fn start_element(&mut self, tag: &'a str) -> WriterResult<&mut Self> {
        // For ergonomics, close the previous element.
        // This is useful when creating an inner element within a parent.
        // (e.g., `<parent><nested`)
        self.finish_start_element()?;

        self.start_element = Some(BytesStart::new(tag));
        Ok(self)
    }

    /// Append an attribute to the [started](Self::start_element) element: `<tag name="value"`
    pub(crate) fn add_attribute<'b>(
        &mut self,
        name: &str,
        value: impl Into<Option<&'b str>>,
    ) -> &mut Self {
        if let (Some(element), Some(value)) = (&mut self.start_element, value.into()) {
            element.push_attribute(new_escaped_attribute(name, value));
        }
        self
    }

    // End states
    /// Finish writing a start element: **`<parent>`**
    ///
    /// See [`Self::finish_end_element`] to write the closing tag.
    pub(crate) fn finish_start_element(&mut self) -> WriterResult<()> {
        if let Some(element) = self.start_element.take() {
            self.writer.write_event(Event::Start(element))?;
        }
        Ok(())
    }

    /// Finish writing a parent element: **`<parent><inner/></parent>`**
    pub(crate) fn finish_end_element(&mut self, tag: &str) -> WriterResult<()> {
        // Ensure the start element is closed with `>` (e.g., <start → <start>)
        // If `finish_start_element` isn't called before this method, the created
        // element is similar to a self-closing element: (<start></start> & <start />)
        self.finish_start_element()?;

        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    /// The given `text` is **unescaped**.
    ///
    /// Finish writing a text element: **`<elem>text</elem>`**
    pub(crate) fn finish_text_element(&mut self, text: &str) -> WriterResult<()> {
        if let Some(element) = self.start_element.take() {
            let text = BytesText::new(text);
            self.writer.write_event(Event::Start(element.borrow()))?;
            self.writer.write_event(Event::Text(text))?;
            self.writer.write_event(Event::End(element.to_end()))?;
        }
        Ok(())
    }

    /// Finish writing a self-closing element: **`<elem/>`**
    pub(crate) fn finish_empty_element(&mut self) -> WriterResult<()> {
        if let Some(element) = self.start_element.take() {
            self.writer.write_event(Event::Empty(element))?;
        }
        Ok(())
    }
}

fn new_escaped_attribute<'a>(name: &'a str, value: &'a str) -> Attribute<'a> {
    let value = match escape_attribute(value.trim()) {
        Cow::Borrowed(value) => Cow::Borrowed(value.as_bytes()),
        Cow::Owned(value) => Cow::Owned(value.into_bytes()),
    };
    Attribute {
        key: quick_xml::name::QName(name.as_bytes()),
        value,
    }
}

/// Escapes markup characters along with whitespace that attribute-value
/// normalization would otherwise collapse (tabs, line breaks, and `&nbsp;`).
fn escape_attribute(value: &str) -> Cow<'_, str> {
    fn entity(c: char) -> Option<&'static str> {
        Some(match c {
            '<' => "&lt;",
            '>' => "&gt;",
            '"' => "&quot;",
            '&' => "&amp;",
            '\'' => "&apos;",
            '\t' => "&#9;",
            '\n' => "&#10;",
            '\r' => "&#13;",
            '\u{00A0}' => "&#160;",
            _ => return None,
        })
    }

    let Some(first) = value.find(|c| entity(c).is_some()) else {
        return Cow::Borrowed(value);
    };
    let mut escaped = String::with_capacity(value.len() + 16);
    escaped.push_str(&value[..first]);

    for c in value[first..].chars() {
        match entity(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

macro_rules! write_element {
    // Empty (self-closing) element
    (writer: $w:expr, tag: $t:expr, $(attributes: $attrs:tt)?) => {
        $crate::writer::xml::write_element!(@helper $w, $t, $($attrs)?)
        .finish_empty_element()
    };
    // Text element
    (writer: $w:expr, tag: $t:expr, text: $text:expr, $(attributes: $attrs:tt)?) => {
        $crate::writer::xml::write_element!(@helper $w, $t, $($attrs)?)
        .finish_text_element($text)
    };
    // Parent element with inner content
    (writer: $w:expr, tag: $t:expr, $(attributes: $attrs:tt)? inner_content: $inner:block) => {{
        let tag = $t;
        $crate::writer::xml::write_element!(@helper $w, tag, $($attrs)?);
        $w.finish_start_element()?;
        $inner
        $w.finish_end_element(tag)
    }};

    //////////////////////////////////
    // HELPERS
    //////////////////////////////////

    (@helper $w:expr, $t:expr, { $($name:path $(where $cond:expr)? => $val:expr,)* }) => {{
        let mut element = $w.start_element($t)?;
        $(
        $(if $cond)? {
            element = element.add_attribute($name, $val);
        }
        )*
        element
    }};
    // Fallback for when 'attributes' block is missing entirely
    (@helper $w:expr, $t:expr,) => {
        $w.start_element($t)?
    };
}

pub(crate) use write_element;
