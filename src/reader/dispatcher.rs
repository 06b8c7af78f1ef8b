//! Node Dispatcher (C7): recursively walks a slide/layout/diagram shape
//! tree, routing each child to the handler named in §4.7's dispatch
//! table, tolerating both single-element and array forms (the tree
//! builder in `xmltree` already normalizes that ambiguity into `Vec`).

use crate::reader::fill::{resolve_image_fill, ImageFillSource};
use crate::reader::geometry::{group_transform, remap_into_group, Box2D};
use crate::reader::graphic_frame::{build_graphic_frame, frame_result_into_element};
use crate::reader::model::{ElementRecord, Geom, GroupRecord, ImageRecord, MediaRecord};
use crate::reader::path_utils::{file_ext, is_video_ext, is_video_url};
use crate::reader::resource_graph::WarpContext;
use crate::reader::shape_builder::{build_shape, BuiltShape};
use crate::reader::xmltree::XmlNode;

/// Walk a `p:spTree`'s children in document order, dispatching each to
/// its handler and collecting whatever records they yield. Document
/// order is preserved end to end (§5 ordering guarantee (b)).
pub fn dispatch_tree(sp_tree: &XmlNode, warp: &mut WarpContext<'_>, diagram_source: bool) -> Vec<ElementRecord> {
    let mut out = Vec::new();
    for child in &sp_tree.children {
        if let Some(record) = dispatch_child(&child.name, child, warp, diagram_source) {
            out.push(record);
        }
    }
    out
}

/// Dispatch a single shape-tree child by its tag name.
pub fn dispatch_child(
    tag: &str,
    node: &XmlNode,
    warp: &mut WarpContext<'_>,
    diagram_source: bool,
) -> Option<ElementRecord> {
    match tag {
        "sp" => Some(match build_shape(node, warp, diagram_source) {
            BuiltShape::Shape(s) => ElementRecord::Shape(s),
            BuiltShape::Text(t) => ElementRecord::Text(t),
        }),
        "cxnSp" => match build_shape(node, warp, diagram_source) {
            BuiltShape::Shape(s) => Some(ElementRecord::Shape(s)),
            BuiltShape::Text(t) => Some(ElementRecord::Text(t)),
        },
        "pic" => build_picture(node, warp),
        "graphicFrame" => frame_result_into_element(build_graphic_frame(node, warp)),
        "grpSp" => Some(ElementRecord::Group(build_group(node, warp, diagram_source))),
        "AlternateContent" => node
            .child("Fallback")
            .map(|fallback| build_group(fallback, warp, diagram_source))
            .map(ElementRecord::Group),
        "nvGrpSpPr" | "grpSpPr" => None,
        _ => None,
    }
}

fn build_group(grp_sp: &XmlNode, warp: &mut WarpContext<'_>, diagram_source: bool) -> GroupRecord {
    let grp_xfrm = grp_sp.lookup(&["grpSpPr", "xfrm"]);
    let transform = grp_xfrm.map(group_transform);
    let name = grp_sp
        .lookup(&["nvGrpSpPr", "cNvPr"])
        .and_then(|n| n.attr("name"))
        .map(|s| s.to_string());

    let mut elements = Vec::new();
    for child in &grp_sp.children {
        if child.name == "nvGrpSpPr" || child.name == "grpSpPr" {
            continue;
        }
        if let Some(mut record) = dispatch_child(&child.name, child, warp, diagram_source) {
            if let Some(gt) = &transform {
                remap_element_geom(&mut record, |b| remap_into_group(b, gt));
            }
            elements.push(record);
        }
    }

    let geom = transform
        .map(|t| Geom {
            left: t.outer.left,
            top: t.outer.top,
            width: t.outer.width,
            height: t.outer.height,
            rotate: t.rotate,
            is_flip_h: Some(false),
            is_flip_v: Some(false),
            name: name.clone(),
        })
        .unwrap_or_default();

    GroupRecord { geom, elements }
}

/// Apply a coordinate remap to whichever geometry fields a record
/// carries, leaving rotation/fill/colors untouched (§4.4).
fn remap_element_geom(record: &mut ElementRecord, f: impl Fn(Box2D) -> Box2D) {
    let geom = match record {
        ElementRecord::Shape(s) => &mut s.geom,
        ElementRecord::Text(t) => &mut t.geom,
        ElementRecord::Image(i) => &mut i.geom,
        ElementRecord::Video(m) | ElementRecord::Audio(m) => &mut m.geom,
        ElementRecord::Table(t) => &mut t.geom,
        ElementRecord::Chart(c) => &mut c.geom,
        ElementRecord::Diagram(d) => &mut d.geom,
        ElementRecord::Group(g) => &mut g.geom,
    };
    let remapped = f(Box2D {
        left: geom.left,
        top: geom.top,
        width: geom.width,
        height: geom.height,
    });
    geom.left = remapped.left;
    geom.top = remapped.top;
    geom.width = remapped.width;
    geom.height = remapped.height;
}

fn build_picture(pic: &XmlNode, warp: &mut WarpContext<'_>) -> Option<ElementRecord> {
    let sp_pr = pic.child("spPr");
    let xfrm = sp_pr.and_then(|p| p.child("xfrm"));
    let (bx, tr) = crate::reader::geometry::resolve_box(xfrm, None, None);
    let name = pic
        .lookup(&["nvPicPr", "cNvPr"])
        .and_then(|n| n.attr("name"))
        .map(|s| s.to_string());
    let geom = Geom {
        left: bx.left,
        top: bx.top,
        width: bx.width,
        height: bx.height,
        rotate: tr.rotate,
        is_flip_h: Some(tr.flip_h),
        is_flip_v: Some(tr.flip_v),
        name,
    };

    let blip_fill = pic.child("blipFill");

    // Video/audio relationship on the non-visual picture properties take
    // precedence over treating this as a plain still image.
    let nv_pic_pr = pic.child("nvPicPr");
    let media_rel_id = nv_pic_pr
        .and_then(|nv| nv.lookup(&["nvPr", "videoFile"]))
        .and_then(|v| v.attr("link"))
        .map(|id| (id, "video"))
        .or_else(|| {
            nv_pic_pr
                .and_then(|nv| nv.lookup(&["nvPr", "audioFile"]))
                .and_then(|a| a.attr("link"))
                .map(|id| (id, "audio"))
        });

    if let Some((r_id, kind)) = media_rel_id {
        if let Some(rel) = warp.slide_res_obj.get(r_id).cloned() {
            if rel.external {
                return Some(media_record(geom, kind, None, Some(rel.target)));
            }
            let ext = file_ext(&rel.target);
            if kind == "video" && !is_video_ext(&ext) && !is_video_url(&rel.target) {
                // media-skipped: unsupported extension, keep the box only
            } else if let Ok(bytes) = warp.zip.read(&rel.target) {
                let mime = crate::reader::path_utils::mime_of(&ext);
                let data_url = format!(
                    "data:{};base64,{}",
                    mime,
                    crate::reader::path_utils::base64_encode(&bytes)
                );
                return Some(media_record(geom, kind, Some(data_url), None));
            }
        }
        return Some(media_record(geom, kind, None, None));
    }

    if let Some(blip_fill) = blip_fill {
        let src = resolve_image_fill(ImageFillSource::Slide, blip_fill, warp);
        return Some(ElementRecord::Image(ImageRecord {
            geom,
            src: src.unwrap_or_default(),
        }));
    }

    None
}

fn media_record(geom: Geom, kind: &str, blob: Option<String>, src: Option<String>) -> ElementRecord {
    let record = MediaRecord { geom, blob, src };
    if kind == "video" {
        ElementRecord::Video(record)
    } else {
        ElementRecord::Audio(record)
    }
}
