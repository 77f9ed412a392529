//! Figure Model
//! Serializable plotly.js figure descriptions (`{data, layout}`).

use crate::data::CellValue;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Histogram(HistogramTrace),
    Box(BoxTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct HistogramTrace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<CellValue>,
    /// Shared bin group so grouped bars line up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bingroup: Option<String>,
    #[serde(rename = "offsetgroup", skip_serializing_if = "Option::is_none")]
    pub offset_group: Option<String>,
    pub marker: Marker,
    #[serde(rename = "showlegend")]
    pub show_legend: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoxTrace {
    pub x: Vec<CellValue>,
    pub y: Vec<CellValue>,
    pub marker: Marker,
    #[serde(rename = "boxpoints")]
    pub box_points: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<BarMode>,
    pub xaxis: Axis,
    pub yaxis: Axis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}
