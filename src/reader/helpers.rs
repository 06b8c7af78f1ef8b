//! Implementations of the "external collaborator" contracts from §6:
//! `customPath`, `getBorder`, `getShadow`, `genTextBody`, `getChartInfo`.
//! §1 treats these as out-of-scope for the core resolution algebra, but
//! the crate still needs working implementations to produce real output,
//! so these are deliberately simple, self-contained renditions rather
//! than a full reimplementation of each helper's original complexity.

use crate::reader::color::{decode_color, ClrMap, Theme};
use crate::reader::model::ShadowRecord;
use crate::reader::path_utils::{angle_to_degrees, emu_to_pt, html_escape};
use crate::reader::xmltree::XmlNode;

/// Build an SVG path string for `a:custGeom`, scaled from the geometry's
/// own path coordinate space into the shape's actual width/height.
pub fn custom_path(cust_geom: &XmlNode, w: f64, h: f64) -> String {
    let Some(path_lst) = cust_geom.child("pathLst") else {
        return String::new();
    };
    let Some(path) = path_lst.child("path") else {
        return String::new();
    };
    let path_w = path.attr_f64("w").unwrap_or(w.max(1.0));
    let path_h = path.attr_f64("h").unwrap_or(h.max(1.0));
    let sx = if path_w > 0.0 { w / path_w } else { 1.0 };
    let sy = if path_h > 0.0 { h / path_h } else { 1.0 };

    let pt = |n: &XmlNode| -> (f64, f64) {
        (
            n.attr_f64("x").unwrap_or(0.0) * sx,
            n.attr_f64("y").unwrap_or(0.0) * sy,
        )
    };

    let mut d = String::new();
    for cmd in &path.children {
        match cmd.name.as_str() {
            "moveTo" => {
                if let Some(p) = cmd.child("pt") {
                    let (x, y) = pt(p);
                    d.push_str(&format!("M{:.2},{:.2} ", x, y));
                }
            }
            "lnTo" => {
                if let Some(p) = cmd.child("pt") {
                    let (x, y) = pt(p);
                    d.push_str(&format!("L{:.2},{:.2} ", x, y));
                }
            }
            "cubicBezTo" => {
                let pts: Vec<(f64, f64)> = cmd.children("pt").into_iter().map(pt).collect();
                if pts.len() == 3 {
                    d.push_str(&format!(
                        "C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} ",
                        pts[0].0, pts[0].1, pts[1].0, pts[1].1, pts[2].0, pts[2].1
                    ));
                }
            }
            "quadBezTo" => {
                let pts: Vec<(f64, f64)> = cmd.children("pt").into_iter().map(pt).collect();
                if pts.len() == 2 {
                    d.push_str(&format!("Q{:.2},{:.2} {:.2},{:.2} ", pts[0].0, pts[0].1, pts[1].0, pts[1].1));
                }
            }
            "close" => d.push_str("Z "),
            _ => {}
        }
    }
    d.trim_end().to_string()
}

#[derive(Debug, Clone, Default)]
pub struct BorderInfo {
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub border_type: Option<String>,
    pub stroke_dasharray: Option<String>,
}

/// Resolve `a:ln` (line/border) into color, width (points), dash style,
/// and a `borderType` label derived from the dash preset.
pub fn get_border(sp_pr: &XmlNode, theme: &Theme, clr_map: &ClrMap) -> Option<BorderInfo> {
    let ln = sp_pr.child("ln")?;
    if ln.child("noFill").is_some() {
        return Some(BorderInfo {
            border_type: Some("none".to_string()),
            ..Default::default()
        });
    }
    let width = ln.attr_i64("w").map(emu_to_pt);
    let color = ln
        .child("solidFill")
        .and_then(|fill| {
            fill.child("srgbClr")
                .or_else(|| fill.child("schemeClr"))
                .map(|c| decode_color(c, theme, clr_map, None))
        });
    let (border_type, dash) = match ln.child("prstDash").and_then(|d| d.attr("val")) {
        Some("solid") | None => ("solid".to_string(), None),
        Some("dash") => ("dashed".to_string(), Some("4,4".to_string())),
        Some("dashDot") => ("dashed".to_string(), Some("4,2,1,2".to_string())),
        Some("dot") => ("dotted".to_string(), Some("1,2".to_string())),
        Some("lgDash") => ("dashed".to_string(), Some("8,4".to_string())),
        Some(other) => (other.to_string(), None),
    };
    Some(BorderInfo {
        border_color: color,
        border_width: width,
        border_type: Some(border_type),
        stroke_dasharray: dash,
    })
}

/// Resolve `a:effectLst/a:outerShdw` into a shadow descriptor.
pub fn get_shadow(outer_shdw: &XmlNode, theme: &Theme, clr_map: &ClrMap) -> ShadowRecord {
    let color = decode_color_container_or_default(outer_shdw, theme, clr_map);
    let blur = outer_shdw.attr_i64("blurRad").map(emu_to_pt).unwrap_or(0.0);
    let offset = outer_shdw.attr_i64("dist").map(emu_to_pt).unwrap_or(0.0);
    let angle = angle_to_degrees(outer_shdw.attr_i64("dir"));
    ShadowRecord {
        color,
        blur,
        offset,
        angle,
    }
}

fn decode_color_container_or_default(node: &XmlNode, theme: &Theme, clr_map: &ClrMap) -> String {
    for kind in ["srgbClr", "schemeClr", "scrgbClr", "prstClr", "hslClr", "sysClr"] {
        if let Some(c) = node.child(kind) {
            return decode_color(c, theme, clr_map, None);
        }
    }
    "#000000".to_string()
}

/// Render a `p:txBody` into a minimal HTML fragment: one `<p>` per
/// paragraph, one `<span>` per run carrying inline style for bold,
/// italic, underline, size, and color.
pub fn gen_text_body(tx_body: &XmlNode, theme: &Theme, clr_map: &ClrMap) -> String {
    let mut html = String::new();
    for p in tx_body.children("p") {
        let p_pr = p.child("pPr");
        let align = p_pr.and_then(|pp| pp.attr("algn")).unwrap_or("l");
        if align == "l" {
            html.push_str("<p>");
        } else {
            html.push_str(&format!("<p style=\"text-align:{}\">", align_css(align)));
        }
        for r in p.children("r") {
            let text = r.child("t").map(|t| html_escape(&t.text_trimmed())).unwrap_or_default();
            let mut style = String::new();
            if let Some(r_pr) = r.child("rPr") {
                if r_pr.attr("b") == Some("1") {
                    style.push_str("font-weight:bold;");
                }
                if r_pr.attr("i") == Some("1") {
                    style.push_str("font-style:italic;");
                }
                if r_pr.attr("u").is_some() && r_pr.attr("u") != Some("none") {
                    style.push_str("text-decoration:underline;");
                }
                if let Some(sz) = r_pr.attr_i64("sz") {
                    style.push_str(&format!("font-size:{}pt;", sz as f64 / 100.0));
                }
                if let Some(fill) = r_pr.child("solidFill") {
                    if let Some(c) = fill
                        .child("srgbClr")
                        .or_else(|| fill.child("schemeClr"))
                        .map(|c| decode_color(c, theme, clr_map, None))
                    {
                        style.push_str(&format!("color:{};", c));
                    }
                }
            }
            if style.is_empty() {
                html.push_str(&text);
            } else {
                html.push_str(&format!("<span style=\"{}\">{}</span>", style, text));
            }
        }
        html.push_str("</p>");
    }
    html
}

fn align_css(algn: &str) -> &'static str {
    match algn {
        "ctr" => "center",
        "r" => "right",
        "just" => "justify",
        _ => "left",
    }
}

/// Extract the subset of chart fields §3 names from `c:plotArea`.
pub fn get_chart_info(plot_area: &XmlNode) -> (String, serde_json::Value, Option<String>, Option<f64>) {
    for (tag, chart_type) in [
        ("barChart", "bar"),
        ("lineChart", "line"),
        ("pieChart", "pie"),
        ("doughnutChart", "doughnut"),
        ("scatterChart", "scatter"),
        ("areaChart", "area"),
        ("radarChart", "radar"),
    ] {
        if let Some(chart) = plot_area.child(tag) {
            let bar_dir = chart.child("barDir").and_then(|n| n.attr("val")).map(|s| s.to_string());
            let hole_size = chart
                .child("holeSize")
                .and_then(|n| n.attr_f64("val"))
                .map(|v| v / 100.0);
            let mut series = Vec::new();
            for ser in chart.children("ser") {
                let name = ser
                    .lookup(&["tx", "strRef", "strCache", "pt", "v"])
                    .map(|n| n.text_trimmed())
                    .unwrap_or_default();
                let mut values = Vec::new();
                if let Some(val_ref) = ser.lookup(&["val", "numRef", "numCache"]) {
                    for pt in val_ref.children("pt") {
                        if let Some(v) = pt.child("v").and_then(|n| n.text_trimmed().parse::<f64>().ok()) {
                            values.push(v);
                        }
                    }
                }
                series.push(serde_json::json!({ "name": name, "values": values }));
            }
            return (
                chart_type.to_string(),
                serde_json::Value::Array(series),
                bar_dir,
                hole_size,
            );
        }
    }
    (String::new(), serde_json::Value::Null, None, None)
}
