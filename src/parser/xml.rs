use crate::ebook::errors::FormatError;
use crate::parser::ParserResult;
use crate::util::StringExt;
use quick_xml::Reader;
use quick_xml::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesRef, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use std::borrow::Cow;

pub(crate) type ByteReader<'a> = Reader<&'a [u8]>;

pub(crate) fn new_reader(data: &[u8]) -> ByteReader<'_> {
    Reader::from_reader(data)
}

pub(crate) trait XmlReader<'a> {
    /// Iterator-like method to read the next [`Event`].
    fn next(&mut self) -> Option<ParserResult<Event<'a>>>;

    /// If `event` is [`Some`], takes the [`Event`] and returns it,
    /// otherwise invokes [`Self::next`].
    ///
    /// After this call, `event` **will** have a value of [`None`].
    fn take_or_next(&mut self, event: &mut Option<Event<'a>>) -> Option<ParserResult<Event<'a>>> {
        event.take().map(Ok).or_else(|| self.next())
    }

    /// Retrieve all text until a designated stopping point.
    /// During the process, when the stopping point is reached,
    /// the event that caused the stop is consumed from the reader,
    /// which may need to also be read by the caller.
    ///
    /// As such, upon return, `last_event` is set to the event that caused the stop.
    fn get_text(
        &mut self,
        last_event: &mut Option<Event<'a>>,
        mut stop: impl FnMut(&Event) -> bool,
    ) -> ParserResult<String> {
        let mut value = String::new();

        while let Some(result) = self.next() {
            let event = result?;

            if stop(&event) {
                last_event.replace(event);
                break;
            }
            match event {
                Event::Text(mut text) => text_to_str(&mut value, &mut text),
                Event::CData(cdata) => cdata_to_str(&mut value, &cdata),
                Event::GeneralRef(reference) => ref_to_str(&mut value, &reference),
                _ => {}
            }
        }
        value.trim_in_place();
        Ok(value)
    }

    /// Retrieve consolidated text for a specified element up to its end tag.
    fn get_text_simple(&mut self, start: &BytesStart) -> ParserResult<String> {
        self.get_text(
            &mut None,
            |event| matches!(event, Event::End(el) if el.name() == start.name()),
        )
    }

    /// Retrieve text until either a `start` or `till` element is started or ended.
    ///
    /// See [`Self::get_text`]
    fn get_text_till_either(
        &mut self,
        last_event: &mut Option<Event<'a>>,
        start: &[u8],
        till: &[u8],
    ) -> ParserResult<String> {
        self.get_text(last_event, |event| {
            let predicate = |el: QName| el.as_ref() == start || el.as_ref() == till;

            match event {
                Event::Start(el) | Event::Empty(el) if predicate(el.name()) => true,
                Event::End(el) if predicate(el.name()) => true,
                _ => false,
            }
        })
    }
}

impl<'a> XmlReader<'a> for ByteReader<'a> {
    fn next(&mut self) -> Option<ParserResult<Event<'a>>> {
        match self.read_event() {
            Ok(Event::Eof) => None,
            result => Some(result.map_err(|error| FormatError::Unparsable(Box::new(error)))),
        }
    }
}

pub(crate) trait XmlElement<'a> {
    fn is_local_name(&self, local_name: impl AsRef<[u8]>) -> bool;

    fn get_attribute(&self, key: impl AsRef<[u8]>) -> Option<String>;

    fn bytes_attributes(&self) -> BytesAttributes<'_>;
}

impl<'a> XmlElement<'a> for BytesStart<'a> {
    fn is_local_name(&self, target_local_name: impl AsRef<[u8]>) -> bool {
        self.local_name().as_ref() == target_local_name.as_ref()
    }

    fn get_attribute(&self, key: impl AsRef<[u8]>) -> Option<String> {
        match self.try_get_attribute(key) {
            Ok(option) => option.map(|attribute| attribute_value(&attribute)),
            Err(_) => None,
        }
    }

    fn bytes_attributes(&self) -> BytesAttributes<'_> {
        BytesAttributes(self.attributes().filter_map(Result::ok).collect())
    }
}

pub(crate) trait XmlText {
    /// Returns `true` if the start was trimmed.
    fn try_trim_start(&mut self) -> bool;

    /// Returns `true` if the end was trimmed.
    fn try_trim_end(&mut self) -> bool;
}

impl XmlText for BytesText<'_> {
    fn try_trim_start(&mut self) -> bool {
        let before = self.len();
        self.inplace_trim_start();
        self.len() != before
    }

    fn try_trim_end(&mut self) -> bool {
        let before = self.len();
        self.inplace_trim_end();
        self.len() != before
    }
}

pub(crate) struct BytesAttributes<'a>(Vec<Attribute<'a>>);

impl BytesAttributes<'_> {
    /// Removes and returns the value of the attribute by `name`.
    ///
    /// Names are matched exactly, prefix included (e.g., `opf:role`).
    pub(crate) fn take_attribute_value(&mut self, name: impl AsRef<[u8]>) -> Option<String> {
        let name = name.as_ref();
        self.0
            .iter()
            .position(|attribute| attribute.key.as_ref() == name)
            .map(|i| attribute_value(&self.0.swap_remove(i)))
    }
}

/// Unescapes an attribute value, keeping the raw text if it holds a malformed reference.
fn attribute_value(attribute: &Attribute) -> String {
    match attribute.unescape_value() {
        Ok(value) => value.into_owned(),
        Err(_) => String::from_utf8_lossy(&attribute.value).into_owned(),
    }
}

/// Resolves a general reference (`&name;` or `&#n;`) to the text it stands for.
///
/// Unknown names resolve to [`None`].
fn resolve_reference(reference: &BytesRef) -> Option<Cow<'static, str>> {
    if let Ok(Some(ch)) = reference.resolve_char_ref() {
        return Some(Cow::Owned(ch.to_string()));
    }
    let name = reference.decode().ok()?;

    escape::resolve_xml_entity(&name)
        .or_else(|| escape::resolve_html5_entity(&name))
        .map(Cow::Borrowed)
}

// Helper methods
fn cdata_to_str(value: &mut String, cdata: &BytesCData) {
    let text = cdata
        .decode()
        .unwrap_or_else(|_| String::from_utf8_lossy(cdata.as_ref()));

    value.push_str(text.trim());
}

fn ref_to_str(value: &mut String, reference: &BytesRef) {
    match resolve_reference(reference) {
        Some(text) => value.push_str(&text),
        None => {
            value.push('&');
            value.push_str(&String::from_utf8_lossy(reference.as_ref()));
            value.push(';');
        }
    }
}

fn text_to_str(value: &mut String, text: &mut BytesText) {
    // Determine when to add spacing
    let has_padding_start = text.try_trim_start();
    let has_padding_end = text.try_trim_end();
    let last_char = value.chars().last().unwrap_or_default();

    // Check "start" spacing
    if (text.is_empty() || has_padding_start) && last_char != ' ' {
        // Only add spacing if there's content
        if !value.is_empty() {
            // Add a space to ensure that text doesn't squeeze together
            value.push(' ');
        }
        // Return early if there is no text to process
        if text.is_empty() {
            return;
        }
    }
    let text = text
        .decode()
        .unwrap_or_else(|_| String::from_utf8_lossy(text.as_ref()));

    // Consolidate into a single paragraph
    for text in text.lines().map(str::trim).filter(|s| !s.is_empty()) {
        value.push_str(text);
        value.push(' ');
    }
    // If there should be no end spacing,
    // get rid of the last space from loop
    if !has_padding_end {
        value.pop();
    }
}
