//! Graphic Frame Handlers (C9): tables, charts, and diagrams, routed by
//! `a:graphic/a:graphicData.uri`. OLE objects intentionally produce no
//! output (§9 open question).

use crate::reader::color::decode_container;
use crate::reader::geometry::{resolve_box, Box2D};
use crate::reader::helpers::get_chart_info;
use crate::reader::model::{ChartRecord, DiagramRecord, ElementRecord, Geom, TableCellRecord, TableRecord};
use crate::reader::resource_graph::WarpContext;
use crate::reader::xmltree::XmlNode;

pub enum FrameResult {
    Table(TableRecord),
    Chart(ChartRecord),
    Diagram(DiagramRecord),
    None,
}

fn frame_geom(graphic_frame: &XmlNode) -> (Box2D, Geom) {
    let xfrm = graphic_frame.child("xfrm");
    let (bx, tr) = resolve_box(xfrm, None, None);
    let name = graphic_frame
        .lookup(&["nvGraphicFramePr", "cNvPr"])
        .and_then(|n| n.attr("name"))
        .map(|s| s.to_string());
    (
        bx,
        Geom {
            left: bx.left,
            top: bx.top,
            width: bx.width,
            height: bx.height,
            rotate: tr.rotate,
            is_flip_h: Some(tr.flip_h),
            is_flip_v: Some(tr.flip_v),
            name,
        },
    )
}

/// Route a `p:graphicFrame` by its `graphicData` URI.
pub fn build_graphic_frame(graphic_frame: &XmlNode, warp: &mut WarpContext<'_>) -> FrameResult {
    let Some(graphic_data) = graphic_frame.lookup(&["graphic", "graphicData"]) else {
        return FrameResult::None;
    };
    let uri = graphic_data.attr_or("uri", "");
    let (_bx, geom) = frame_geom(graphic_frame);

    if uri.ends_with("/table") {
        if let Some(tbl) = graphic_data.child("tbl") {
            return FrameResult::Table(build_table(tbl, geom, warp));
        }
    } else if uri.ends_with("/chart") {
        if let Some(chart_rel_id) = graphic_data.child("chart").and_then(|c| c.attr("id")) {
            if let Some(rel) = warp.slide_res_obj.get(chart_rel_id) {
                let target = rel.target.clone();
                if let Ok(bytes) = warp.zip.read(&target) {
                    if let Ok(root) = crate::reader::xmltree::parse(&bytes) {
                        if let Some(plot_area) = root.lookup(&["chart", "plotArea"]) {
                            let (chart_type, data, bar_dir, hole_size) = get_chart_info(plot_area);
                            return FrameResult::Chart(ChartRecord {
                                geom,
                                chart_type,
                                data,
                                marker: None,
                                bar_dir,
                                hole_size,
                                grouping: chart_grouping(plot_area),
                                style: None,
                            });
                        }
                    }
                }
            }
        }
    } else if uri.ends_with("/diagram") {
        return FrameResult::Diagram(build_diagram(geom, warp));
    }
    // OLE (`…/presentationml/2006/ole`) and anything else: intentionally
    // no output.
    FrameResult::None
}

fn chart_grouping(plot_area: &XmlNode) -> Option<String> {
    for tag in ["barChart", "lineChart", "areaChart"] {
        if let Some(chart) = plot_area.child(tag) {
            return chart.child("grouping").and_then(|n| n.attr("val")).map(|s| s.to_string());
        }
    }
    None
}

fn build_diagram(geom: Geom, warp: &mut WarpContext<'_>) -> DiagramRecord {
    let elements = if let Some(diagram_root) = warp.diagram_content.clone() {
        if let Some(sp_tree) = diagram_root.lookup(&["drawing", "spTree"]) {
            let children: Vec<XmlNode> = sp_tree.children("sp").into_iter().cloned().collect();
            children
                .iter()
                .filter_map(|sp| {
                    crate::reader::dispatcher::dispatch_child("sp", sp, warp, true)
                })
                .collect()
        } else {
            Vec::new()
        }
    } else {
        Vec::new()
    };
    DiagramRecord { geom, elements }
}

fn build_table(tbl: &XmlNode, geom: Geom, warp: &mut WarpContext<'_>) -> TableRecord {
    let theme = warp.theme.clone();
    let clr_map = warp.clr_map.clone();
    let tbl_pr = tbl.child("tblPr");
    let style_id = tbl_pr.and_then(|p| p.child("tableStyleId")).map(|n| n.text_trimmed());
    let first_row = tbl_pr.map(|p| p.attr_or("firstRow", "0") == "1").unwrap_or(false);
    let last_row = tbl_pr.map(|p| p.attr_or("lastRow", "0") == "1").unwrap_or(false);
    let first_col = tbl_pr.map(|p| p.attr_or("firstCol", "0") == "1").unwrap_or(false);
    let last_col = tbl_pr.map(|p| p.attr_or("lastCol", "0") == "1").unwrap_or(false);
    let band_row = tbl_pr.map(|p| p.attr_or("bandRow", "0") == "1").unwrap_or(false);
    let band_col = tbl_pr.map(|p| p.attr_or("bandCol", "0") == "1").unwrap_or(false);

    let style_node = style_id.as_deref().and_then(|id| find_table_style(warp.table_styles.as_ref(), id));

    let rows: Vec<&XmlNode> = tbl.children("tr");
    let n_rows = rows.len();
    let n_cols = rows
        .first()
        .map(|r| r.children("tc").iter().map(|tc| grid_span(tc)).sum())
        .unwrap_or(0);

    let mut data = Vec::with_capacity(n_rows);
    for (row_idx, row) in rows.iter().enumerate() {
        let mut row_cells = Vec::new();
        for (col_idx, tc) in row.children("tc").into_iter().enumerate() {
            let text = cell_text(tc);
            let grid_span = grid_span(tc);
            let row_span = tc.attr_i64("rowSpan").map(|v| v as u32);
            let h_merge = tc.attr("hMerge").map(|v| v == "1").unwrap_or(false);
            let v_merge = tc.attr("vMerge").map(|v| v == "1").unwrap_or(false);

            let slot = cell_style_slot(
                row_idx, col_idx, n_rows, n_cols, first_row, last_row, first_col, last_col, band_row, band_col,
            );
            let (slot_fill, slot_bold, slot_font_color) = style_node
                .and_then(|s| s.child(slot))
                .map(|slot_node| {
                    let fill = slot_node
                        .child("fill")
                        .and_then(|f| decode_container(f, &theme, &clr_map, None));
                    let tc_tx = slot_node.child("tcTxStyle");
                    let bold = tc_tx.and_then(|t| t.attr("b")).map(|v| v == "on");
                    let font_color = tc_tx.and_then(|t| decode_container(t, &theme, &clr_map, None));
                    (fill, bold, font_color)
                })
                .unwrap_or((None, None, None));

            let direct_fill = tc
                .lookup(&["tcPr", "solidFill"])
                .and_then(|f| decode_container(f, &theme, &clr_map, None));

            row_cells.push(TableCellRecord {
                text,
                row_span,
                col_span: if grid_span > 1 { Some(grid_span as u32) } else { None },
                v_merge: if v_merge { Some(true) } else { None },
                h_merge: if h_merge { Some(true) } else { None },
                fill_color: direct_fill.or(slot_fill),
                font_color: slot_font_color,
                font_bold: slot_bold,
            });
        }
        data.push(row_cells);
    }

    TableRecord { geom, data }
}

fn grid_span(tc: &XmlNode) -> usize {
    tc.attr_i64("gridSpan").unwrap_or(1).max(1) as usize
}

fn cell_text(tc: &XmlNode) -> String {
    let Some(tx_body) = tc.child("txBody") else {
        return String::new();
    };
    tx_body
        .children("p")
        .iter()
        .map(|p| {
            p.children("r")
                .iter()
                .filter_map(|r| r.child("t"))
                .map(|t| t.text_trimmed())
                .collect::<Vec<_>>()
                .join("")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn find_table_style<'a>(table_styles: Option<&'a XmlNode>, style_id: &str) -> Option<&'a XmlNode> {
    let root = table_styles?;
    root.children("tblStyle").into_iter().find(|s| s.attr("styleId") == Some(style_id))
}

#[allow(clippy::too_many_arguments)]
fn cell_style_slot(
    row: usize,
    col: usize,
    n_rows: usize,
    n_cols: usize,
    first_row: bool,
    last_row: bool,
    first_col: bool,
    last_col: bool,
    band_row: bool,
    band_col: bool,
) -> &'static str {
    let is_first_row = first_row && row == 0;
    let is_last_row = last_row && n_rows > 0 && row == n_rows - 1;
    let is_first_col = first_col && col == 0;
    let is_last_col = last_col && n_cols > 0 && col == n_cols - 1;

    if is_first_row && is_first_col {
        return "nwCell";
    }
    if is_first_row && is_last_col {
        return "neCell";
    }
    if is_last_row && is_first_col {
        return "swCell";
    }
    if is_last_row && is_last_col {
        return "seCell";
    }
    if is_first_row {
        return "firstRow";
    }
    if is_last_row {
        return "lastRow";
    }
    if is_first_col {
        return "firstCol";
    }
    if is_last_col {
        return "lastCol";
    }
    if band_col {
        return if col % 2 == 0 { "band2V" } else { "band1V" };
    }
    if band_row {
        return if row % 2 == 0 { "band2H" } else { "band1H" };
    }
    "wholeTbl"
}

pub(crate) fn frame_result_into_element(result: FrameResult) -> Option<ElementRecord> {
    match result {
        FrameResult::Table(t) => Some(ElementRecord::Table(t)),
        FrameResult::Chart(c) => Some(ElementRecord::Chart(c)),
        FrameResult::Diagram(d) => Some(ElementRecord::Diagram(d)),
        FrameResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banding_alternates_starting_after_header_row() {
        // firstRow header excluded; row index 1 -> band1H, row index 2 -> band2H
        assert_eq!(cell_style_slot(0, 0, 3, 3, true, false, true, false, true, false), "nwCell");
        assert_eq!(cell_style_slot(1, 1, 3, 3, true, false, false, false, true, false), "band1H");
        assert_eq!(cell_style_slot(2, 1, 3, 3, true, false, false, false, true, false), "band2H");
    }
}
