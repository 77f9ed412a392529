//! Charts module - plotly figures and static SVG export

mod figure;
mod plotter;
mod renderer;

pub use figure::Figure;
pub use plotter::{ChartError, ChartKind, ChartPlotter};
pub use renderer::{RenderError, StaticChartRenderer};
