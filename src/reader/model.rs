//! Output data model: the JSON-serializable tree described in §3/§6.

use serde::Serialize;

use crate::reader::fill::GradientFill as ResolvedGradientFill;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutput {
    pub size: SizeRecord,
    pub slides: Vec<SlideOutput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRecord {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum FillValue {
    Color(String),
    Gradient(GradientRecord),
    Image(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct GradientRecord {
    pub rot: i32,
    pub colors: Vec<GradientStopRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradientStopRecord {
    pub pos: String,
    pub color: String,
}

impl From<ResolvedGradientFill> for GradientRecord {
    fn from(g: ResolvedGradientFill) -> Self {
        GradientRecord {
            rot: g.rot,
            colors: g
                .colors
                .into_iter()
                .map(|s| GradientStopRecord { pos: s.pos, color: s.color })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideOutput {
    pub fill: FillValue,
    pub elements: Vec<ElementRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ElementRecord {
    #[serde(rename = "shape")]
    Shape(ShapeRecord),
    #[serde(rename = "text")]
    Text(TextRecord),
    #[serde(rename = "image")]
    Image(ImageRecord),
    #[serde(rename = "video")]
    Video(MediaRecord),
    #[serde(rename = "audio")]
    Audio(MediaRecord),
    #[serde(rename = "table")]
    Table(TableRecord),
    #[serde(rename = "chart")]
    Chart(ChartRecord),
    #[serde(rename = "diagram")]
    Diagram(DiagramRecord),
    #[serde(rename = "group")]
    Group(GroupRecord),
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Geom {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub rotate: i32,
    pub is_flip_h: Option<bool>,
    pub is_flip_v: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    #[serde(flatten)]
    pub geom: Geom,
    pub shap_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub fill_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_stroke_dasharray: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowRecord {
    pub color: String,
    pub blur: f64,
    pub offset: f64,
    pub angle: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRecord {
    #[serde(flatten)]
    pub geom: Geom,
    pub content: String,
    pub is_vertical: bool,
    pub v_align: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(flatten)]
    pub geom: Geom,
    pub src: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    #[serde(flatten)]
    pub geom: Geom,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableCellRecord {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_bold: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    #[serde(flatten)]
    pub geom: Geom,
    pub data: Vec<Vec<TableCellRecord>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    #[serde(flatten)]
    pub geom: Geom,
    pub chart_type: String,
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramRecord {
    #[serde(flatten)]
    pub geom: Geom,
    pub elements: Vec<ElementRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    #[serde(flatten)]
    pub geom: Geom,
    pub elements: Vec<ElementRecord>,
}
