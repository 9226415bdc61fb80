//! SVG markup reader built on quick-xml
//!
//! Every event is turned back into its source text so that the document
//! skeleton can be written out unchanged. Only `<path>` elements that are
//! drawn directly become reorderable; everything else is kept as markup.

use std::borrow::Cow;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Reader;

use crate::document::{Attribute, Canvas, Document, Node, PathElement, Tag};
use crate::error::ParseError;
use crate::parser::parse_path_data;

/// Containers whose content is referenced or described rather than drawn
const NON_RENDERED: &[&str] = &[
    "defs",
    "clipPath",
    "mask",
    "marker",
    "pattern",
    "symbol",
    "linearGradient",
    "radialGradient",
    "filter",
    "metadata",
    "title",
    "desc",
    "foreignObject",
];

/// An open element
struct Frame {
    name: String,
    id: usize,
    /// Inside a non-rendered container (or a captured path body)
    hidden: bool,
}

#[derive(Default)]
struct Builder {
    canvas: Canvas,
    nodes: Vec<Node>,
    paths: Vec<PathElement>,
    stack: Vec<Frame>,
    next_id: usize,
    root_seen: bool,
    opaque_paths: usize,
    /// Stack depth of the path whose body is being captured
    capture: Option<usize>,
}

fn text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

fn read_tag(e: &BytesStart, self_closing: bool, position: usize) -> Result<Tag, ParseError> {
    let name = text(e.name().as_ref()).into_owned();
    let attributes = e
        .attributes()
        .map(|attr| {
            let attr = attr.map_err(|err| {
                ParseError::markup(position, format!("invalid attribute in <{}>: {}", name, err))
            })?;
            Ok(Attribute::new(text(attr.key.as_ref()), text(&attr.value)))
        })
        .collect::<Result<Vec<_>, ParseError>>()?;
    let raw = if self_closing {
        format!("<{}/>", text(e))
    } else {
        format!("<{}>", text(e))
    };
    Ok(Tag {
        name,
        attributes,
        self_closing,
        raw,
    })
}

impl Builder {
    fn markup(&mut self, raw: &str) {
        if self.capture.is_some() {
            if let Some(body) = self.paths.last_mut().and_then(|p| p.body.as_mut()) {
                body.push_str(raw);
            }
            return;
        }
        match self.nodes.last_mut() {
            Some(Node::Markup(text)) => text.push_str(raw),
            _ => self.nodes.push(Node::Markup(raw.to_string())),
        }
    }

    fn open(&mut self, e: &BytesStart, self_closing: bool, position: usize) -> Result<(), ParseError> {
        let tag = read_tag(e, self_closing, position)?;
        let id = self.next_id;
        self.next_id += 1;

        if self.capture.is_some() {
            self.markup(&tag.raw);
            if !self_closing {
                self.stack.push(Frame {
                    name: tag.name,
                    id,
                    hidden: true,
                });
            }
            return Ok(());
        }

        let Some((scope, parent_hidden)) = self.stack.last().map(|p| (p.id, p.hidden)) else {
            return self.open_root(tag, id, position);
        };
        let hidden = parent_hidden || NON_RENDERED.contains(&tag.local_name());

        if tag.local_name() == "path" && !parent_hidden {
            let data = tag
                .get("d")
                .filter(|d| !d.trim().is_empty())
                .map(str::to_string);
            if let Some(data) = data {
                return self.open_path(tag, data, id, scope, position);
            }
        }

        if tag.local_name() == "path" {
            log::trace!("path element {} kept in place", id);
            self.opaque_paths += 1;
        }
        let name = tag.name.clone();
        self.nodes.push(Node::Element(tag));
        if !self_closing {
            self.stack.push(Frame { name, id, hidden });
        }
        Ok(())
    }

    fn open_root(&mut self, tag: Tag, id: usize, position: usize) -> Result<(), ParseError> {
        if self.root_seen {
            return Err(ParseError::markup(
                position,
                format!("unexpected second root element <{}>", tag.name),
            ));
        }
        if tag.local_name() != "svg" {
            return Err(ParseError::MissingRoot);
        }
        self.root_seen = true;
        self.canvas = Canvas {
            width: tag.get("width").map(str::to_string),
            height: tag.get("height").map(str::to_string),
            view_box: tag.get("viewBox").map(str::to_string),
        };
        if !tag.self_closing {
            self.stack.push(Frame {
                name: tag.name.clone(),
                id,
                hidden: false,
            });
        }
        self.nodes.push(Node::Root(tag));
        Ok(())
    }

    fn open_path(
        &mut self,
        tag: Tag,
        raw_data: String,
        id: usize,
        scope: usize,
        position: usize,
    ) -> Result<(), ParseError> {
        let index = self.paths.len();
        let data = quick_xml::escape::unescape(&raw_data)
            .map_err(|err| ParseError::markup(position, format!("invalid path data: {}", err)))?
            .into_owned();
        let parsed = parse_path_data(&data).map_err(|errors| ParseError::PathData {
            path: index,
            data: data.clone(),
            errors,
        })?;

        let self_closing = tag.self_closing;
        let name = tag.name.clone();
        self.paths.push(PathElement {
            index,
            scope,
            tag,
            body: if self_closing { None } else { Some(String::new()) },
            data: parsed,
            reversed: false,
        });
        self.nodes.push(Node::Path);
        if !self_closing {
            self.stack.push(Frame {
                name,
                id,
                hidden: true,
            });
            self.capture = Some(self.stack.len());
        }
        Ok(())
    }

    fn close(&mut self, e: &BytesEnd, position: usize) -> Result<(), ParseError> {
        let raw = format!("</{}>", text(e));
        let name = text(e.name().as_ref()).trim_end().to_string();
        let Some(frame) = self.stack.pop() else {
            return Err(ParseError::markup(
                position,
                format!("unexpected closing tag </{}>", name),
            ));
        };
        if frame.name != name {
            return Err(ParseError::markup(
                position,
                format!(
                    "mismatched closing tag: expected </{}>, found </{}>",
                    frame.name, name
                ),
            ));
        }
        self.markup(&raw);
        if self.capture.is_some_and(|depth| self.stack.len() < depth) {
            self.capture = None;
        }
        Ok(())
    }

    fn finish(self, source: &str) -> Result<Document, ParseError> {
        if let Some(frame) = self.stack.last() {
            return Err(ParseError::markup(
                source.len(),
                format!("unclosed element <{}>", frame.name),
            ));
        }
        if !self.root_seen {
            return Err(ParseError::MissingRoot);
        }
        log::debug!(
            "parsed document: {} nodes, {} reorderable paths, {} paths kept in place",
            self.nodes.len(),
            self.paths.len(),
            self.opaque_paths
        );
        Ok(Document {
            canvas: self.canvas,
            nodes: self.nodes,
            paths: self.paths,
        })
    }
}

/// Source text of a doctype declaration starting at `cursor`
fn doctype(source: &str, cursor: usize, content: &str) -> String {
    let rest = source.get(cursor..).unwrap_or_default();
    if rest.starts_with("<!") {
        if let Some(end) = rest
            .find(content)
            .and_then(|at| rest[at + content.len()..].find('>').map(|gt| at + content.len() + gt))
        {
            return rest[..=end].to_string();
        }
    }
    format!("<!DOCTYPE {}>", content)
}

/// Parse SVG markup into a [`Document`]
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(source);
    {
        let config = reader.config_mut();
        config.trim_markup_names_in_closing_tags = false;
        config.check_end_names = false;
    }

    let mut builder = Builder::default();
    // Bytes of source consumed so far
    let mut cursor = 0;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                return Err(ParseError::markup(
                    reader.error_position() as usize,
                    err.to_string(),
                ))
            }
        };
        let position = reader.buffer_position() as usize;

        let raw = match event {
            Event::Start(e) => {
                builder.open(&e, false, position)?;
                format!("<{}>", text(&e))
            }
            Event::Empty(e) => {
                builder.open(&e, true, position)?;
                format!("<{}/>", text(&e))
            }
            Event::End(e) => {
                builder.close(&e, position)?;
                format!("</{}>", text(&e))
            }
            Event::Text(e) => {
                let raw = text(&e).into_owned();
                builder.markup(&raw);
                raw
            }
            Event::CData(e) => {
                let raw = format!("<![CDATA[{}]]>", text(&e));
                builder.markup(&raw);
                raw
            }
            Event::Comment(e) => {
                let raw = format!("<!--{}-->", text(&e));
                builder.markup(&raw);
                raw
            }
            Event::Decl(e) => {
                let raw = format!("<?{}?>", text(&e));
                builder.markup(&raw);
                raw
            }
            Event::PI(e) => {
                let raw = format!("<?{}?>", text(&e));
                builder.markup(&raw);
                raw
            }
            Event::DocType(e) => {
                let raw = doctype(source, cursor, &text(&e));
                builder.markup(&raw);
                raw
            }
            Event::Eof => break,
        };
        cursor += raw.len();
    }

    builder.finish(source)
}
