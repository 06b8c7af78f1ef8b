//! A loosely-typed XML tree, the way `§9 Design Notes` of the resolution
//! pipeline asks for: elements become nodes with attributes and children,
//! and the single `children(node, name)` helper normalizes the "one
//! element vs many" ambiguity that OOXML's XML-to-JSON conversions used to
//! paper over, so every caller above this module never has to branch on
//! "is this a scalar or an array".

use std::collections::HashMap;

use xml::reader::{EventReader, XmlEvent};

use crate::exc::{PptxError, Result};

/// A parsed XML element. Text content is concatenated into `text` on the
/// owning element rather than modeled as sibling text nodes, since no
/// consumer in this pipeline needs mixed content.
#[derive(Debug, Clone, Default)]
pub struct XmlNode {
    pub name: String,
    pub attrs: HashMap<String, String>,
    pub children: Vec<XmlNode>,
    pub text: String,
}

impl XmlNode {
    /// All direct children whose local name (namespace prefix stripped)
    /// equals `name`.
    pub fn children(&self, name: &str) -> Vec<&XmlNode> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    /// The first direct child with the given local name, if any.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Attribute lookup, tolerant of a namespace prefix on the attribute
    /// itself (`r:embed` is stored and looked up as `embed`).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    /// Parse an attribute as `i64`, returning `None` on absence or parse
    /// failure (never panics; §7 "falsy sentinel on error").
    pub fn attr_i64(&self, name: &str) -> Option<i64> {
        self.attr(name)?.parse().ok()
    }

    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attr(name)?.parse().ok()
    }

    /// Walk successive path segments of child names, descending one level
    /// per segment, returning the final node or `None` on the first miss.
    /// This is `lookup` from §4.1, specialized to element descent.
    pub fn lookup<'a>(&'a self, path: &[&str]) -> Option<&'a XmlNode> {
        let mut cur = self;
        for seg in path {
            cur = cur.child(seg)?;
        }
        Some(cur)
    }

    /// True text content, trimmed.
    pub fn text_trimmed(&self) -> String {
        self.text.trim().to_string()
    }
}

/// Strip an XML namespace prefix (`p:sp` -> `sp`) from a qualified name.
fn local_name(qualified: &str) -> String {
    match qualified.rsplit_once(':') {
        Some((_, local)) => local.to_string(),
        None => qualified.to_string(),
    }
}

/// Parse a full XML document into a single root `XmlNode`.
pub fn parse(bytes: &[u8]) -> Result<XmlNode> {
    let reader = EventReader::new(bytes);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    for event in reader {
        let event = event.map_err(|e| PptxError::XmlParse(e.to_string()))?;
        match event {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                let mut node = XmlNode {
                    name: local_name(&name.local_name),
                    ..Default::default()
                };
                // xml-rs already separates prefix from local_name for the
                // element; for attributes we keep the prefix-stripped key
                // too (`r:embed` -> `embed`) since every consumer in this
                // pipeline only ever asks for the bare attribute name.
                for a in attributes {
                    node.attrs.insert(a.name.local_name.clone(), a.value);
                }
                stack.push(node);
            }
            XmlEvent::EndElement { .. } => {
                let finished = stack.pop().ok_or_else(|| {
                    PptxError::XmlParse("unbalanced end element".to_string())
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(finished),
                    None => root = Some(finished),
                }
            }
            XmlEvent::Characters(s) | XmlEvent::CData(s) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&s);
                }
            }
            _ => {}
        }
    }

    root.ok_or_else(|| PptxError::XmlParse("empty document".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attrs() {
        let xml = br#"<p:sp xmlns:p="ns"><p:spPr><a:xfrm rot="5400000"><a:off x="1" y="2"/></a:xfrm></p:spPr></p:sp>"#;
        let root = parse(xml).unwrap();
        assert_eq!(root.name, "sp");
        let xfrm = root.lookup(&["spPr", "xfrm"]).unwrap();
        assert_eq!(xfrm.attr("rot"), Some("5400000"));
        let off = xfrm.child("off").unwrap();
        assert_eq!(off.attr_i64("x"), Some(1));
    }

    #[test]
    fn lookup_returns_none_on_missing_branch() {
        let xml = br#"<a><b/></a>"#;
        let root = parse(xml).unwrap();
        assert!(root.lookup(&["c", "d"]).is_none());
    }

    #[test]
    fn repeated_children_collapse_to_children_vec() {
        let xml = br#"<a:tr><a:tc/><a:tc/><a:tc/></a:tr>"#;
        let root = parse(xml).unwrap();
        assert_eq!(root.children("tc").len(), 3);
    }
}
