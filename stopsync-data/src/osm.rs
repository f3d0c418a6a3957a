//! JOSM editor-export document handling.
//!
//! The export is ordinary OSM XML. The whole document tree is kept in
//! memory so the writer can reproduce everything the reconciler did not
//! touch: unrelated elements, attributes and their order all survive the
//! round trip. Only elements whose tags actually changed are marked with
//! `action="modify"`, which is how JOSM recognises pending edits.
//!
//! XML comments, processing instructions and DOCTYPE declarations are not
//! part of the element tree and are dropped on rewrite. JOSM exports do not
//! contain them.

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use log::warn;
use quick_xml::Reader;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use stopsync_core::{MapStop, Tags, keys};

use crate::error::{ParseError, WriteError};

/// A lightweight XML element tree node.
///
/// OSM documents carry no meaningful text content, so only attributes and
/// child elements are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, quick_xml::Error> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attributes.iter_mut().find(|(key, _)| key == name) {
            slot.1 = value.to_owned();
        } else {
            self.attributes.push((name.to_owned(), value.to_owned()));
        }
    }

    /// Key/value pairs of the element's `<tag k= v=>` children.
    fn tags(&self) -> Tags {
        self.children
            .iter()
            .filter(|child| child.name == "tag")
            .filter_map(|child| Some((child.attr("k")?.to_owned(), child.attr("v")?.to_owned())))
            .collect()
    }

    /// Update or append a `<tag>` child. Returns whether anything changed.
    fn set_tag(&mut self, key: &str, value: &str) -> bool {
        for child in &mut self.children {
            if child.name == "tag" && child.attr("k") == Some(key) {
                if child.attr("v") == Some(value) {
                    return false;
                }
                child.set_attr("v", value);
                return true;
            }
        }
        self.children.push(XmlElement {
            name: "tag".to_owned(),
            attributes: vec![("k".to_owned(), key.to_owned()), ("v".to_owned(), value.to_owned())],
            children: Vec::new(),
        });
        true
    }
}

/// An editor export held in memory for read-modify-write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsmDocument {
    path: Utf8PathBuf,
    root: XmlElement,
}

impl OsmDocument {
    /// Parse an editor export from disk.
    ///
    /// # Errors
    /// Returns [`ParseError`] when the file cannot be read or is not
    /// well-formed XML.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ParseError> {
        let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_owned(),
            source,
        })?;
        let root = parse_tree(&text).map_err(|source| ParseError::Xml {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self {
            path: path.to_owned(),
            root,
        })
    }

    /// Snapshot the stops: top-level `node` elements carrying a `ref` tag.
    ///
    /// Node and way identifiers live in independent namespaces, so only
    /// nodes are considered; ways and relations are never stops here. Nodes
    /// without an `id` or without coordinates are skipped with a warning.
    /// Present but unparseable attribute values are malformed input and
    /// abort the run.
    ///
    /// # Errors
    /// Returns [`ParseError::InvalidAttribute`] for unparseable `id`,
    /// `lat` or `lon` values on a stop element.
    pub fn map_stops(&self) -> Result<Vec<MapStop>, ParseError> {
        let mut stops = Vec::new();
        for element in &self.root.children {
            if element.name != "node" {
                continue;
            }
            let tags = element.tags();
            if !tags.contains_key(keys::REF) {
                continue;
            }
            let Some(id_raw) = element.attr("id") else {
                warn!("skipping {} element with a ref tag but no id", element.name);
                continue;
            };
            let id = self.parse_attr(element, "id", id_raw)?;
            let (Some(lat_raw), Some(lon_raw)) = (element.attr("lat"), element.attr("lon")) else {
                warn!(
                    "skipping {} {id}: ref tag but no coordinates",
                    element.name
                );
                continue;
            };
            let lat: f64 = self.parse_attr(element, "lat", lat_raw)?;
            let lon: f64 = self.parse_attr(element, "lon", lon_raw)?;
            stops.push(MapStop::new(id, Coord { x: lon, y: lat }, tags));
        }
        Ok(stops)
    }

    fn parse_attr<T: std::str::FromStr>(
        &self,
        element: &XmlElement,
        attribute: &'static str,
        raw: &str,
    ) -> Result<T, ParseError> {
        raw.parse().map_err(|_| ParseError::InvalidAttribute {
            path: self.path.clone(),
            id: element.attr("id").unwrap_or("?").to_owned(),
            attribute,
            value: raw.to_owned(),
        })
    }

    /// Merge reconciled stops back into the document.
    ///
    /// Stops are rejoined to `node` elements by `id`; a way or relation
    /// sharing the numeric id is a different object and is never touched.
    /// Tag values are updated or appended element by element; an element
    /// whose tags changed is marked `action="modify"`. Elements the
    /// reconciler never touched keep their exact attributes.
    pub fn apply(&mut self, stops: &[MapStop]) {
        for stop in stops {
            let id = stop.id.to_string();
            let Some(element) = self
                .root
                .children
                .iter_mut()
                .find(|element| element.name == "node" && element.attr("id") == Some(id.as_str()))
            else {
                warn!("stop {id} not found in document while applying changes");
                continue;
            };
            let mut changed = false;
            let mut entries: Vec<_> = stop.tags.iter().collect();
            entries.sort();
            for (key, value) in entries {
                if element.set_tag(key, value) {
                    changed = true;
                }
            }
            if changed {
                element.set_attr("action", "modify");
            }
        }
    }

    /// Serialise the document to disk.
    ///
    /// # Errors
    /// Returns [`WriteError`] when serialisation or the final write fails.
    pub fn write_to_path(&self, path: &Utf8Path) -> Result<(), WriteError> {
        let mut writer = quick_xml::Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .and_then(|()| write_element(&mut writer, &self.root))
            .map_err(|source| WriteError::Xml {
                path: path.to_owned(),
                source,
            })?;
        std::fs::write(path, writer.into_inner()).map_err(|source| WriteError::Io {
            path: path.to_owned(),
            source,
        })
    }
}

fn parse_tree(text: &str) -> Result<XmlElement, quick_xml::Error> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(XmlElement::from_start(&start)?),
            Event::Empty(start) => {
                let element = XmlElement::from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
            }
            Event::Eof => break,
            // OSM documents carry no text payload worth keeping.
            _ => {}
        }
    }
    root.ok_or_else(|| quick_xml::Error::UnexpectedEof("missing document root".to_owned()))
}

fn write_element(
    writer: &mut quick_xml::Writer<Vec<u8>>,
    element: &XmlElement,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        for child in &element.children {
            write_element(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    }
    Ok(())
}
