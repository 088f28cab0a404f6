//! Byte spectrum chart
//!
//! Plots the analyser's byte spectrum (0..=255 per bin) against bin frequency
//! on a linear axis.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let max_freq = spectrum
        .iter()
        .map(|(f, _)| *f)
        .fold(0.0, f64::max)
        .max(1.0);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_freq])
                .labels(vec![
                    "0".to_string(),
                    format!("{:.0} Hz", max_freq / 2.0),
                    format!("{:.0} Hz", max_freq),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 255.0])
                .labels(vec!["0", "128", "255"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
