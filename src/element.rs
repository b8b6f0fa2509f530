use std::collections::HashMap;
use std::io;
use std::path::Path;

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::utils::read_text_best_effort;

/// One XML node: tag, text before the first child, attributes, ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub text: Option<String>,
    pub attrs: HashMap<String, String>,
    pub children: Vec<Element>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("XML Parse Error: {0}")]
    Parse(String),
    #[error("File Not Found: {0}")]
    NotFound(String),
    #[error("Unexpected Error: {0}")]
    Unexpected(String),
}

pub fn load_document(path: &Path) -> Result<Element, LoadError> {
    let input = read_text_best_effort(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
        _ => LoadError::Unexpected(format!("{}: {e}", path.display())),
    })?;
    parse_document(&input)
}

pub fn parse_document(input: &str) -> Result<Element, LoadError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| LoadError::Parse(e.to_string()))?;

        match event {
            Event::Start(ref e) => {
                stack.push(open_element(e)?);
            }
            Event::Empty(ref e) => {
                let element = open_element(e)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // quick-xml already validated that the end name matches
                let element = stack
                    .pop()
                    .ok_or_else(|| LoadError::Parse("close tag without open tag".into()))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                let chunk = e.decode().map_err(|e| LoadError::Parse(e.to_string()))?;
                append_text(&mut stack, &chunk);
            }
            Event::CData(e) => {
                let chunk = std::str::from_utf8(e.as_ref())
                    .map_err(|e| LoadError::Parse(e.to_string()))?;
                append_text(&mut stack, chunk);
            }
            Event::GeneralRef(e) => {
                let raw = e.decode().map_err(|e| LoadError::Parse(e.to_string()))?;
                let resolved = resolve_entity(&raw)?;
                append_text(&mut stack, &resolved);
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(LoadError::Parse("unexpected end of document".into()));
    }
    root.ok_or_else(|| LoadError::Parse("no root element found".into()))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, LoadError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attrs = HashMap::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| LoadError::Parse(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| LoadError::Parse(e.to_string()))?
            .into_owned();
        attrs.insert(key, value);
    }

    Ok(Element {
        tag,
        text: None,
        attrs,
        children: Vec::new(),
    })
}

fn close_element(
    element: Element,
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> Result<(), LoadError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                return Err(LoadError::Parse("junk after document element".into()));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

// Character data counts toward the innermost open element's text only
// while that element has no children; tail text after a child is
// discarded.
fn append_text(stack: &mut Vec<Element>, chunk: &str) {
    if let Some(open) = stack.last_mut() {
        if open.children.is_empty() {
            open.text.get_or_insert_with(String::new).push_str(chunk);
        }
    }
}

fn resolve_entity(raw: &str) -> Result<String, LoadError> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16)
                .map_err(|_| LoadError::Parse(format!("invalid hex character reference: #{rest}")))?
        } else {
            rest.parse::<u32>()
                .map_err(|_| LoadError::Parse(format!("invalid character reference: #{rest}")))?
        };

        let ch = char::from_u32(code)
            .ok_or_else(|| LoadError::Parse(format!("character reference out of range: {code}")))?;
        return Ok(ch.to_string());
    }

    Err(LoadError::Parse(format!("undefined entity: &{raw};")))
}
