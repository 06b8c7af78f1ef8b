//! Inheritance Indexer (C6): indexes a layout or master's `p:spTree`
//! shape children by `id`, `idx`, and placeholder `type`, so the Shape
//! Builder can look up a slide placeholder's ancestor geometry/fill/text
//! defaults.

use std::collections::HashMap;
use std::rc::Rc;

use crate::reader::xmltree::XmlNode;

/// The triple of indices over a shape tree's direct children.
#[derive(Debug, Clone, Default)]
pub struct IndexTables {
    pub by_id: HashMap<String, Rc<XmlNode>>,
    pub by_idx: HashMap<String, Rc<XmlNode>>,
    pub by_type: HashMap<String, Rc<XmlNode>>,
}

impl IndexTables {
    pub fn by_type(&self, ty: &str) -> Option<&Rc<XmlNode>> {
        self.by_type.get(ty)
    }
    pub fn by_idx(&self, idx: &str) -> Option<&Rc<XmlNode>> {
        self.by_idx.get(idx)
    }
    pub fn by_id(&self, id: &str) -> Option<&Rc<XmlNode>> {
        self.by_id.get(id)
    }
}

/// Build the three indices from a `p:cSld/p:spTree`. Children
/// `p:nvGrpSpPr` and `p:grpSpPr` are skipped; every other child is
/// considered a candidate placeholder host. Keys are not unique in
/// general; on collision, the later entry (document order) wins.
pub fn index_shape_tree(sp_tree: &XmlNode) -> IndexTables {
    let mut tables = IndexTables::default();
    for child in &sp_tree.children {
        if child.name == "nvGrpSpPr" || child.name == "grpSpPr" {
            continue;
        }
        let rc = Rc::new(child.clone());
        let nv_pr = child.lookup(&["nvSpPr", "nvPr"]).or_else(|| child.lookup(&["nvPicPr", "nvPr"]));
        let c_nv_pr = child.lookup(&["nvSpPr", "cNvPr"]).or_else(|| child.lookup(&["nvPicPr", "cNvPr"]));

        if let Some(id) = c_nv_pr.and_then(|n| n.attr("id")) {
            tables.by_id.insert(id.to_string(), rc.clone());
        }
        if let Some(ph) = nv_pr.and_then(|n| n.child("ph")) {
            if let Some(idx) = ph.attr("idx") {
                tables.by_idx.insert(idx.to_string(), rc.clone());
            }
            let ty = ph.attr("type").unwrap_or("body");
            tables.by_type.insert(ty.to_string(), rc.clone());
        }
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::xmltree::parse;

    #[test]
    fn indexes_by_id_idx_and_type() {
        let xml = br#"<p:spTree>
            <p:nvGrpSpPr/>
            <p:grpSpPr/>
            <p:sp>
                <p:nvSpPr>
                    <p:cNvPr id="2" name="Title 1"/>
                    <p:nvPr><p:ph type="title" idx="0"/></p:nvPr>
                </p:nvSpPr>
            </p:sp>
        </p:spTree>"#;
        let root = parse(xml).unwrap();
        let tables = index_shape_tree(&root);
        assert!(tables.by_id("2").is_some());
        assert!(tables.by_idx("0").is_some());
        assert!(tables.by_type("title").is_some());
    }

    #[test]
    fn later_entry_wins_on_collision() {
        let xml = br#"<p:spTree>
            <p:sp><p:nvSpPr><p:cNvPr id="1" name="A"/><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr></p:sp>
            <p:sp><p:nvSpPr><p:cNvPr id="2" name="B"/><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr></p:sp>
        </p:spTree>"#;
        let root = parse(xml).unwrap();
        let tables = index_shape_tree(&root);
        let winner = tables.by_type("body").unwrap();
        let name = winner.lookup(&["nvSpPr", "cNvPr"]).unwrap().attr("name");
        assert_eq!(name, Some("B"));
    }
}
