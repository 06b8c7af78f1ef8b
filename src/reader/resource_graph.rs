//! Resource Graph (C5): loads the ZIP, parses `[Content_Types].xml` and
//! every `.rels` part, and builds the per-slide `WarpContext` — the
//! read-mostly environment every other component consults during a
//! single slide's resolution.

use std::collections::HashMap;
use std::rc::Rc;

use crate::exc::{PptxError, Result};
use crate::opc::Package;
use crate::reader::color::{ClrMap, Theme};
use crate::reader::inheritance::{index_shape_tree, IndexTables};
use crate::reader::path_utils::emu_to_pt;
use crate::reader::xmltree::{self, XmlNode};

/// A single parsed relationship: the tail of the relationship's type URI
/// and its package-normalized target path (or verbatim external URL).
#[derive(Debug, Clone)]
pub struct Relationship {
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

/// `rId -> Relationship` map, one per part that can host relationships.
pub type ResMap = HashMap<String, Relationship>;

fn dir_of(path: &str) -> String {
    match path.rfind('/') {
        Some(i) => path[..i].to_string(),
        None => String::new(),
    }
}

/// Join a rels `Target` against the directory of the part that owns the
/// `.rels` file, collapsing `..` segments, producing a package-rooted
/// path with no leading slash (the `../foo` -> `ppt/foo` normalization
/// invariant (a) in §3 depends on this).
fn normalize_target(base_dir: &str, target: &str) -> String {
    if target.starts_with('/') {
        return target.trim_start_matches('/').to_string();
    }
    let mut segments: Vec<&str> = if base_dir.is_empty() {
        Vec::new()
    } else {
        base_dir.split('/').collect()
    };
    for seg in target.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

fn rel_type_tail(type_uri: &str) -> String {
    match type_uri.rsplit_once('/') {
        Some((_, tail)) => tail.to_string(),
        None => type_uri.to_string(),
    }
}

/// Parse a `.rels` part into a `ResMap`. Tolerant of the ZIP entry
/// simply not existing (a part with no media/relationships) — returns an
/// empty map rather than an error.
pub fn load_rels(zip: &mut Package, part_path: &str) -> Result<ResMap> {
    let dir = dir_of(part_path);
    let file_name = part_path.rsplit('/').next().unwrap_or(part_path);
    let rels_path = if dir.is_empty() {
        format!("_rels/{}.rels", file_name)
    } else {
        format!("{}/_rels/{}.rels", dir, file_name)
    };
    if !zip.exists(&rels_path) {
        return Ok(ResMap::new());
    }
    let bytes = zip.read(&rels_path)?;
    let root = xmltree::parse(&bytes)?;
    let mut map = ResMap::new();
    for rel in root.children("Relationship") {
        let Some(id) = rel.attr("Id") else { continue };
        let Some(type_uri) = rel.attr("Type") else { continue };
        let Some(target) = rel.attr("Target") else { continue };
        let external = rel.attr("TargetMode") == Some("External");
        let normalized = if external {
            target.to_string()
        } else {
            normalize_target(&dir, target)
        };
        map.insert(
            id.to_string(),
            Relationship {
                rel_type: rel_type_tail(type_uri),
                target: normalized,
                external,
            },
        );
    }
    Ok(map)
}

/// Package-level state loaded once per archive (C5 `loadPackage`).
pub struct LoadedPackage {
    pub zip: Package,
    /// `ppt/slides/slideN.xml` paths, in authoritative numeric order.
    pub slides: Vec<String>,
    /// `ppt/slideLayouts/slideLayoutN.xml` paths, same ordering
    /// convention as `slides` (§4.5). Not consulted downstream — layouts
    /// are reached per-slide via relationships — but partitioned here
    /// since `loadPackage` calls for it.
    pub slide_layouts: Vec<String>,
    pub theme_path: String,
    pub theme: Theme,
    pub size: (f64, f64),
    pub default_text_style: Option<XmlNode>,
    pub table_styles: Option<XmlNode>,
}

fn numeric_suffix(name: &str) -> i64 {
    let stem = name.rsplit('/').next().unwrap_or(name);
    let digits: String = stem.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Load and index everything needed before any slide can be processed.
pub fn load_package(bytes: &[u8]) -> Result<LoadedPackage> {
    let mut zip = Package::open_bytes(bytes)?;

    let content_types_bytes = zip
        .read("[Content_Types].xml")
        .map_err(|_| PptxError::PackageMalformed("missing [Content_Types].xml".to_string()))?;
    let content_types = xmltree::parse(&content_types_bytes)?;

    let mut slides: Vec<String> = Vec::new();
    let mut slide_layouts: Vec<String> = Vec::new();
    for over in content_types.children("Override") {
        let Some(ct) = over.attr("ContentType") else { continue };
        let Some(part_name) = over.attr("PartName") else { continue };
        if ct.ends_with(".slide+xml") {
            slides.push(part_name.trim_start_matches('/').to_string());
        } else if ct.ends_with(".slideLayout+xml") {
            slide_layouts.push(part_name.trim_start_matches('/').to_string());
        }
    }
    slides.sort_by_key(|s| numeric_suffix(s));
    slide_layouts.sort_by_key(|s| numeric_suffix(s));
    if slides.is_empty() {
        return Err(PptxError::PackageMalformed(
            "no slide parts found in [Content_Types].xml".to_string(),
        ));
    }

    let pres_bytes = zip
        .read("ppt/presentation.xml")
        .map_err(|_| PptxError::PackageMalformed("missing ppt/presentation.xml".to_string()))?;
    let pres_root = xmltree::parse(&pres_bytes)?;
    let size = pres_root
        .child("sldSz")
        .and_then(|n| Some((emu_to_pt(n.attr_i64("cx")?), emu_to_pt(n.attr_i64("cy")?))))
        .unwrap_or((720.0, 540.0));
    let default_text_style = pres_root.child("defaultTextStyle").cloned();

    let pres_rels = load_rels(&mut zip, "ppt/presentation.xml")?;
    let theme_rel = pres_rels
        .values()
        .find(|r| r.rel_type.ends_with("theme"))
        .ok_or_else(|| PptxError::PackageMalformed("presentation has no theme relationship".to_string()))?;
    let theme_path = theme_rel.target.clone();
    let theme_bytes = zip.read(&theme_path)?;
    let theme_root = xmltree::parse(&theme_bytes)?;
    let theme = Theme::from_theme_xml(&theme_root);

    let table_styles = if zip.exists("ppt/tableStyles.xml") {
        let bytes = zip.read("ppt/tableStyles.xml")?;
        Some(xmltree::parse(&bytes)?)
    } else {
        None
    };

    Ok(LoadedPackage {
        zip,
        slides,
        slide_layouts,
        theme_path,
        theme,
        size,
        default_text_style,
        table_styles,
    })
}

/// The per-slide resolution environment (§3 `WarpContext`), passed
/// read-only to every component during a single slide's processing. The
/// only field that mutates after construction is `image_cache`.
pub struct WarpContext<'p> {
    pub zip: &'p mut Package,

    pub slide_content: Option<Rc<XmlNode>>,
    pub slide_layout_content: Option<Rc<XmlNode>>,
    pub slide_master_content: Option<Rc<XmlNode>>,
    pub theme_content: Option<Rc<XmlNode>>,
    pub diagram_content: Option<Rc<XmlNode>>,

    pub slide_res_obj: ResMap,
    pub layout_res_obj: ResMap,
    pub master_res_obj: ResMap,
    pub theme_res_obj: ResMap,
    pub diagram_res_obj: ResMap,

    pub slide_layout_tables: IndexTables,
    pub slide_master_tables: IndexTables,

    pub table_styles: Option<XmlNode>,
    pub slide_master_text_styles: Option<XmlNode>,
    pub default_text_style: Option<XmlNode>,

    pub theme: Theme,
    pub clr_map: ClrMap,

    pub image_cache: HashMap<String, String>,
}

/// Load everything needed to process one slide (C5 `loadSlide`): its
/// rels, its layout (and the layout's master, and the master's theme),
/// and any diagram drawing part it references.
pub fn load_slide<'p>(pkg: &'p mut LoadedPackage, slide_path: &str) -> Result<WarpContext<'p>> {
    let slide_bytes = pkg.zip.read(slide_path)?;
    let slide_content = xmltree::parse(&slide_bytes)?;
    let slide_res_obj = load_rels(&mut pkg.zip, slide_path)?;

    let layout_rel = slide_res_obj
        .values()
        .find(|r| r.rel_type.ends_with("slideLayout"))
        .ok_or_else(|| PptxError::PackageMalformed(format!("{} has no slideLayout relationship", slide_path)))?;
    let layout_path = layout_rel.target.clone();
    let layout_bytes = pkg.zip.read(&layout_path)?;
    let slide_layout_content = xmltree::parse(&layout_bytes)?;
    let layout_res_obj = load_rels(&mut pkg.zip, &layout_path)?;

    let master_rel = layout_res_obj
        .values()
        .find(|r| r.rel_type.ends_with("slideMaster"))
        .ok_or_else(|| PptxError::PackageMalformed(format!("{} has no slideMaster relationship", layout_path)))?;
    let master_path = master_rel.target.clone();
    let master_bytes = pkg.zip.read(&master_path)?;
    let slide_master_content = xmltree::parse(&master_bytes)?;
    let master_res_obj = load_rels(&mut pkg.zip, &master_path)?;

    let theme_res_obj = load_rels(&mut pkg.zip, &pkg.theme_path)?;
    let theme_content_bytes = pkg.zip.read(&pkg.theme_path)?;
    let theme_content = xmltree::parse(&theme_content_bytes)?;

    // §4.2 step 1: the active color map is slide override ▸ layout
    // override ▸ master `clrMap`. Build from the master, then fold the
    // layout's `clrMapOvr/overrideClrMapping` over it, then the slide's
    // (slide wins last on any slot both specify).
    let mut clr_map = slide_master_content
        .child("clrMap")
        .map(ClrMap::from_node)
        .unwrap_or_default();
    if let Some(over) = slide_layout_content.lookup(&["clrMapOvr", "overrideClrMapping"]) {
        clr_map.overlay(over);
    }
    if let Some(over) = slide_content.lookup(&["clrMapOvr", "overrideClrMapping"]) {
        clr_map.overlay(over);
    }

    let slide_layout_tables = slide_layout_content
        .lookup(&["cSld", "spTree"])
        .map(index_shape_tree)
        .unwrap_or_default();
    let slide_master_tables = slide_master_content
        .lookup(&["cSld", "spTree"])
        .map(index_shape_tree)
        .unwrap_or_default();

    let slide_master_text_styles = slide_master_content.child("txStyles").cloned();

    // Diagram drawing: locate the relationship, rewrite dsp: -> p: on the
    // raw bytes (documented behavior per §9), then parse.
    let diagram_rel = slide_res_obj.values().find(|r| r.rel_type.ends_with("diagramData"));
    let (diagram_content, diagram_res_obj) = if let Some(rel) = diagram_rel {
        let data_path = rel.target.clone();
        let drawing_rels = load_rels(&mut pkg.zip, &data_path)?;
        let drawing_rel = drawing_rels.values().find(|r| r.rel_type.ends_with("diagramDrawing"));
        if let Some(drawing_rel) = drawing_rel {
            let drawing_path = drawing_rel.target.clone();
            let drawing_bytes = pkg.zip.read(&drawing_path)?;
            let rewritten = String::from_utf8_lossy(&drawing_bytes).replace("dsp:", "p:");
            let parsed = xmltree::parse(rewritten.as_bytes())?;
            let diagram_res = load_rels(&mut pkg.zip, &drawing_path)?;
            (Some(Rc::new(parsed)), diagram_res)
        } else {
            (None, ResMap::new())
        }
    } else {
        (None, ResMap::new())
    };

    Ok(WarpContext {
        zip: &mut pkg.zip,
        slide_content: Some(Rc::new(slide_content)),
        slide_layout_content: Some(Rc::new(slide_layout_content)),
        slide_master_content: Some(Rc::new(slide_master_content)),
        theme_content: Some(Rc::new(theme_content)),
        diagram_content,
        slide_res_obj,
        layout_res_obj,
        master_res_obj,
        theme_res_obj,
        diagram_res_obj,
        slide_layout_tables,
        slide_master_tables,
        table_styles: pkg.table_styles.clone(),
        slide_master_text_styles,
        default_text_style: pkg.default_text_style.clone(),
        theme: pkg.theme.clone(),
        clr_map,
        image_cache: HashMap::new(),
    })
}
