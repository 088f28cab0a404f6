//! Analyser window oscilloscope
//!
//! Shows the time-domain window the last spectrum was computed from, on a
//! millisecond axis so the window length at the current rate is visible.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

pub fn render_waveform(frame: &mut Frame, area: Rect, window: &[f32], sample_rate: f32) {
    let window_ms = if sample_rate > 0.0 {
        window.len() as f64 * 1000.0 / sample_rate as f64
    } else {
        0.0
    };
    let ms_per_sample = window_ms / window.len().max(1) as f64;

    let data: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 * ms_per_sample, sample as f64))
        .collect();
    let peak = window.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));

    let block = Block::default()
        .title(format!(
            " Analyser window: {} samples, {:.1} ms, peak {:.2} ",
            window.len(),
            window_ms,
            peak
        ))
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, window_ms.max(f64::EPSILON)])
                .labels(vec![
                    "0 ms".to_string(),
                    format!("{:.1} ms", window_ms / 2.0),
                    format!("{:.1} ms", window_ms),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(vec!["-1", "0", "1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
