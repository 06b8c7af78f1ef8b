//! Shape Builder (C8): synthesizes the final shape/text record for a
//! `p:sp` or `p:cxnSp` node from resolved geometry, fill, border, text
//! body, and shadow.

use crate::reader::fill::resolve_shape_fill;
use crate::reader::geometry::{resolve_box, Box2D, Transform};
use crate::reader::helpers::{custom_path, get_border, get_shadow, gen_text_body};
use crate::reader::model::{Geom, ShadowRecord, ShapeRecord, TextRecord};
use crate::reader::path_utils::angle_to_degrees;
use crate::reader::resource_graph::WarpContext;
use crate::reader::xmltree::XmlNode;

/// The `p:nvSpPr/p:nvPr/p:ph` reference a slide shape carries, if any.
struct PlaceholderRef {
    ph_type: Option<String>,
    ph_idx: Option<String>,
}

fn nv_pr_of<'a>(sp: &'a XmlNode) -> Option<&'a XmlNode> {
    sp.lookup(&["nvSpPr", "nvPr"]).or_else(|| sp.lookup(&["nvCxnSpPr", "nvPr"]))
}

fn placeholder_ref(sp: &XmlNode) -> PlaceholderRef {
    let ph = nv_pr_of(sp).and_then(|nv| nv.child("ph"));
    PlaceholderRef {
        ph_type: ph.and_then(|p| p.attr("type")).map(|s| s.to_string()),
        ph_idx: ph.and_then(|p| p.attr("idx")).map(|s| s.to_string()),
    }
}

fn is_text_box(sp: &XmlNode) -> bool {
    sp.lookup(&["nvSpPr", "cNvSpPr"])
        .and_then(|n| n.attr("txBox"))
        .map(|v| v == "1")
        .unwrap_or(false)
}

/// Resolve the ancestor shapes a slide shape should inherit geometry,
/// fill, and text defaults from (§4.8 step 1).
fn ancestor_nodes<'a>(sp: &'a XmlNode, warp: &'a WarpContext<'_>) -> (Option<&'a XmlNode>, Option<&'a XmlNode>) {
    let ph = placeholder_ref(sp);
    let layout = ph
        .ph_type
        .as_deref()
        .and_then(|t| warp.slide_layout_tables.by_type(t))
        .or_else(|| ph.ph_idx.as_deref().and_then(|i| warp.slide_layout_tables.by_idx(i)))
        .map(|rc| rc.as_ref());
    let master = ph
        .ph_type
        .as_deref()
        .and_then(|t| warp.slide_master_tables.by_type(t))
        .or_else(|| ph.ph_idx.as_deref().and_then(|i| warp.slide_master_tables.by_idx(i)))
        .map(|rc| rc.as_ref());
    (layout, master)
}

fn resolved_ph_type(sp: &XmlNode, layout: Option<&XmlNode>, master: Option<&XmlNode>, diagram_source: bool) -> String {
    let ph = placeholder_ref(sp);
    if let Some(t) = ph.ph_type {
        return t;
    }
    if is_text_box(sp) {
        return "text".to_string();
    }
    if let Some(t) = layout.and_then(|n| placeholder_ref(n).ph_type) {
        return t;
    }
    if let Some(t) = master.and_then(|n| placeholder_ref(n).ph_type) {
        return t;
    }
    if diagram_source {
        return "diagram".to_string();
    }
    "obj".to_string()
}

pub enum BuiltShape {
    Shape(ShapeRecord),
    Text(TextRecord),
}

/// Build a shape/text record for `p:sp` (or the connector variant
/// `p:cxnSp`, which reuses the same geometry/fill/border path and never
/// carries a placeholder or text body).
pub fn build_shape(sp: &XmlNode, warp: &mut WarpContext<'_>, diagram_source: bool) -> BuiltShape {
    let (layout_node, master_node) = {
        // SAFETY-by-construction: these borrows are read-only and don't
        // overlap with the later `&mut warp` uses below because we copy
        // out everything we need before touching `warp` mutably again.
        let (l, m) = ancestor_nodes(sp, warp);
        (l.cloned(), m.cloned())
    };

    let sp_pr = sp.child("spPr");
    let slide_xfrm = sp_pr.and_then(|p| p.child("xfrm"));
    let layout_xfrm = layout_node.as_ref().and_then(|n| n.lookup(&["spPr", "xfrm"]));
    let master_xfrm = master_node.as_ref().and_then(|n| n.lookup(&["spPr", "xfrm"]));
    let (bx, tr): (Box2D, Transform) = resolve_box(slide_xfrm, layout_xfrm, master_xfrm);

    let name = sp
        .lookup(&["nvSpPr", "cNvPr"])
        .or_else(|| sp.lookup(&["nvCxnSpPr", "cNvPr"]))
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

    let theme = warp.theme.clone();
    let clr_map = warp.clr_map.clone();

    let fill_color = sp_pr
        .map(|p| resolve_shape_fill(p, sp.child("style"), &theme, &clr_map, None).as_output())
        .unwrap_or_default();

    let border = sp_pr.and_then(|p| get_border(p, &theme, &clr_map));
    let shadow: Option<ShadowRecord> = sp_pr
        .and_then(|p| p.lookup(&["effectLst", "outerShdw"]))
        .map(|n| get_shadow(n, &theme, &clr_map));

    let content = sp.child("txBody").map(|tx| gen_text_body(tx, &theme, &clr_map));

    let text_rotate = sp
        .child("txXfrm")
        .and_then(|x| x.attr_i64("rot"))
        .map(|r| angle_to_degrees(Some(r)) + 90)
        .unwrap_or(tr.rotate);

    let ph_type = resolved_ph_type(sp, layout_node.as_ref(), master_node.as_ref(), diagram_source);

    let prst_geom = sp_pr.and_then(|p| p.child("prstGeom"));
    let cust_geom = sp_pr.and_then(|p| p.child("custGeom"));

    if let Some(cg) = cust_geom {
        if ph_type != "diagram" {
            let path = custom_path(cg, bx.width, bx.height);
            return BuiltShape::Shape(ShapeRecord {
                geom,
                shap_type: "custom".to_string(),
                path: Some(path),
                fill_color,
                border_color: border.as_ref().and_then(|b| b.border_color.clone()),
                border_width: border.as_ref().and_then(|b| b.border_width),
                border_type: border.as_ref().and_then(|b| b.border_type.clone()),
                border_stroke_dasharray: border.as_ref().and_then(|b| b.stroke_dasharray.clone()),
                shadow,
                content,
            });
        }
    }

    let shap_type = prst_geom.and_then(|g| g.attr("prst")).map(|s| s.to_string());
    if let Some(shap_type) = shap_type {
        if ph_type == "obj" || placeholder_ref(sp).ph_type.is_none() {
            return BuiltShape::Shape(ShapeRecord {
                geom,
                shap_type,
                path: None,
                fill_color,
                border_color: border.as_ref().and_then(|b| b.border_color.clone()),
                border_width: border.as_ref().and_then(|b| b.border_width),
                border_type: border.as_ref().and_then(|b| b.border_type.clone()),
                border_stroke_dasharray: border.as_ref().and_then(|b| b.stroke_dasharray.clone()),
                shadow,
                content,
            });
        }
    }

    let v_align = sp
        .lookup(&["txBody", "bodyPr"])
        .and_then(|b| b.attr("anchor"))
        .unwrap_or("t")
        .to_string();
    let is_vertical = sp
        .lookup(&["txBody", "bodyPr"])
        .and_then(|b| b.attr("vert"))
        .map(|v| v != "horz")
        .unwrap_or(false);

    BuiltShape::Text(TextRecord {
        geom: Geom {
            rotate: text_rotate,
            ..geom
        },
        content: content.unwrap_or_default(),
        is_vertical,
        v_align,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txbox_without_ph_type_classifies_as_text() {
        let sp = crate::reader::xmltree::parse(
            br#"<p:sp><p:nvSpPr><p:cNvPr id="1" name="TextBox 1"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr/></p:sp>"#,
        )
        .unwrap();
        assert_eq!(resolved_ph_type(&sp, None, None, false), "text");
    }
}
