// Parser module: turns provider payloads into validated series.

pub mod chart_parser;

pub use chart_parser::{ChartParser, Parser};
