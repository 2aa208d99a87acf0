//! Event loop turning tokenizer events into text and runs.
//!
//! `quick-xml` tokenizes; element balancing is checked here against our own
//! stack so that HTML void elements (`<br>`) need no closing tag.

use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tincture_text::{Attributes, StyledText, StyledTextBuilder};

use crate::error::ParseError;
use crate::options::MarkupOptions;
use crate::tags::{self, is_void};

pub(crate) fn parse(input: &str, options: &MarkupOptions) -> Result<StyledText, ParseError> {
    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;

    let mut collector = Collector::new(options);
    loop {
        let position = position_of(&reader);
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let (name, attrs) = read_tag(&start, position)?;
                if is_void(&name) {
                    collector.void(&name);
                } else {
                    collector.open(name, &attrs, position)?;
                }
            }
            Ok(Event::Empty(start)) => {
                let (name, attrs) = read_tag(&start, position)?;
                if is_void(&name) {
                    collector.void(&name);
                } else {
                    collector.open(name.clone(), &attrs, position)?;
                    collector.close(&name, position)?;
                }
            }
            Ok(Event::End(end)) => {
                let name = tag_name(end.name().as_ref(), position)?;
                if !is_void(&name) {
                    collector.close(&name, position)?;
                }
            }
            Ok(Event::Text(text)) => {
                let decoded = text
                    .unescape_with(resolve_html5_entity)
                    .map_err(|err| ParseError::syntax(position, err))?;
                collector.push_text(&decoded);
            }
            Ok(Event::CData(cdata)) => {
                let raw = std::str::from_utf8(&cdata).map_err(|err| ParseError::syntax(position, err))?;
                collector.push_text(raw);
            }
            Ok(Event::Eof) => break,
            // Comments, declarations, processing instructions, doctypes.
            Ok(_) => {}
            Err(err) => return Err(ParseError::syntax(position_of(&reader), err)),
        }
    }
    collector.finish()
}

fn position_of(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

fn tag_name(raw: &[u8], position: usize) -> Result<String, ParseError> {
    let name = std::str::from_utf8(raw).map_err(|err| ParseError::syntax(position, err))?;
    let local = name.rsplit(':').next().unwrap_or(name);
    Ok(local.to_ascii_lowercase())
}

type TagAttributes = Vec<(String, String)>;

fn read_tag(start: &BytesStart<'_>, position: usize) -> Result<(String, TagAttributes), ParseError> {
    let name = tag_name(start.name().as_ref(), position)?;
    let mut attrs = Vec::new();
    for attribute in start.html_attributes() {
        let attribute = attribute.map_err(|err| ParseError::syntax(position, err))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|err| ParseError::syntax(position, err))?
            .to_ascii_lowercase();
        let value = attribute
            .unescape_value_with(resolve_html5_entity)
            .map_err(|err| ParseError::syntax(position, err))?;
        attrs.push((key, value.into_owned()));
    }
    Ok((name, attrs))
}

struct OpenElement {
    name: String,
    run: Option<usize>,
    block: bool,
    skip: bool,
}

/// A run whose end is known once its element closes.
struct PendingRun {
    start: usize,
    end: Option<usize>,
    attributes: Attributes,
}

struct Collector<'o> {
    options: &'o MarkupOptions,
    text: String,
    runs: Vec<PendingRun>,
    stack: Vec<OpenElement>,
    skip_depth: usize,
    /// A block boundary was crossed; a newline goes in before the next text.
    pending_break: bool,
}

impl<'o> Collector<'o> {
    fn new(options: &'o MarkupOptions) -> Self {
        Self {
            options,
            text: String::new(),
            runs: Vec::new(),
            stack: Vec::new(),
            skip_depth: 0,
            pending_break: false,
        }
    }

    fn open(
        &mut self,
        name: String,
        attrs: &[(String, String)],
        position: usize,
    ) -> Result<(), ParseError> {
        if self.stack.len() >= self.options.max_depth {
            return Err(ParseError::TooDeep {
                max_depth: self.options.max_depth,
                position,
            });
        }

        let style = tags::element_style(&name, attrs, self.options);
        let visible = self.skip_depth == 0 && !style.skip;
        if visible && style.block {
            self.request_break();
        }
        let run = if visible && !style.attributes.is_empty() {
            self.runs.push(PendingRun {
                start: self.text.len(),
                end: None,
                attributes: style.attributes,
            });
            Some(self.runs.len() - 1)
        } else {
            None
        };
        if style.skip {
            self.skip_depth += 1;
        }
        self.stack.push(OpenElement {
            name,
            run,
            block: style.block,
            skip: style.skip,
        });
        Ok(())
    }

    fn close(&mut self, name: &str, position: usize) -> Result<(), ParseError> {
        let Some(open) = self.stack.pop() else {
            return Err(ParseError::UnexpectedClose {
                tag: name.to_string(),
                position,
            });
        };
        if open.name != name {
            return Err(ParseError::MismatchedClose {
                expected: open.name,
                found: name.to_string(),
                position,
            });
        }
        if let Some(index) = open.run {
            self.runs[index].end = Some(self.text.len());
        }
        if open.skip {
            self.skip_depth -= 1;
        } else if open.block && self.skip_depth == 0 {
            self.request_break();
        }
        Ok(())
    }

    fn void(&mut self, name: &str) {
        if self.skip_depth > 0 {
            return;
        }
        match name {
            "br" => {
                self.flush_break();
                self.text.push('\n');
            }
            "hr" => self.request_break(),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.skip_depth > 0 || text.is_empty() {
            return;
        }
        self.flush_break();
        self.text.push_str(text);
    }

    fn request_break(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.pending_break = true;
        }
    }

    fn flush_break(&mut self) {
        if !std::mem::take(&mut self.pending_break) {
            return;
        }
        let at = self.text.len();
        self.text.push('\n');
        // Elements opened after the boundary start after the newline.
        for run in self
            .runs
            .iter_mut()
            .filter(|run| run.end.is_none() && run.start == at)
        {
            run.start += 1;
        }
    }

    fn finish(self) -> Result<StyledText, ParseError> {
        if let Some(open) = self.stack.last() {
            return Err(ParseError::Unclosed {
                tag: open.name.clone(),
            });
        }
        let mut builder = StyledTextBuilder::new(self.text);
        for run in self.runs {
            if let Some(end) = run.end {
                builder.style_range(run.start..end, run.attributes)?;
            }
        }
        Ok(builder.build())
    }
}
