//! Slide Orchestrator (C10): per-slide pipeline — load parts, resolve
//! the background, run the dispatcher over the shape tree, optionally
//! pull a speaker-notes stub, and emit the slide record.

use crate::exc::Result;
use crate::reader::dispatcher::dispatch_tree;
use crate::reader::fill::{resolve_background_fill, BackgroundFill};
use crate::reader::model::{FillValue, SlideOutput};
use crate::reader::resource_graph::{load_slide, LoadedPackage};

/// Process a single slide already known to `pkg` by its package path
/// (e.g. `"ppt/slides/slide1.xml"`).
pub fn process_slide(pkg: &mut LoadedPackage, slide_path: &str) -> Result<SlideOutput> {
    let mut warp = load_slide(pkg, slide_path)?;

    let fill = match resolve_background_fill(&mut warp) {
        BackgroundFill::Color(c) => FillValue::Color(c),
        BackgroundFill::Gradient(g) => FillValue::Gradient(g.into()),
        BackgroundFill::Image(src) => FillValue::Image(src),
    };

    let elements = warp
        .slide_content
        .clone()
        .and_then(|root| root.lookup(&["cSld", "spTree"]).cloned())
        .map(|sp_tree| dispatch_tree(&sp_tree, &mut warp, false))
        .unwrap_or_default();

    let slide_res_obj = warp.slide_res_obj.clone();
    drop(warp);

    let notes = load_notes(pkg, &slide_res_obj);

    Ok(SlideOutput { fill, elements, notes })
}

/// §1 Non-goals: "speaker notes beyond stub extraction" implies a plain
/// text stub *is* in scope. Reads the notes slide's runs, concatenated
/// with no paragraph/run-level styling.
fn load_notes(pkg: &mut LoadedPackage, slide_res_obj: &crate::reader::resource_graph::ResMap) -> Option<String> {
    let rel = slide_res_obj.values().find(|r| r.rel_type.ends_with("notesSlide"))?;
    let target = rel.target.clone();
    let bytes = pkg.zip.read(&target).ok()?;
    let root = crate::reader::xmltree::parse(&bytes).ok()?;
    let sp_tree = root.lookup(&["cSld", "spTree"])?;
    let mut text = String::new();
    for sp in sp_tree.children("sp") {
        let Some(tx_body) = sp.child("txBody") else { continue };
        for p in tx_body.children("p") {
            for r in p.children("r") {
                if let Some(t) = r.child("t") {
                    text.push_str(&t.text_trimmed());
                }
            }
            text.push('\n');
        }
    }
    let trimmed = text.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
