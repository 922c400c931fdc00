// Render module: output surfaces for a finished dashboard run.

pub mod chart;
pub mod console;
pub mod json;

pub use console::ConsoleRenderer;
pub use json::JsonRenderer;

use crate::dashboard::DashboardReport;
use crate::model::RenderError;

pub trait Renderer {
    fn render(&mut self, report: &DashboardReport) -> Result<(), RenderError>;
}
