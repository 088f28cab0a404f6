//! Band energy bars

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

const BAR_MAX: u64 = 100;

pub fn render_bands(frame: &mut Frame, area: Rect, bands: &[f32]) {
    let block = Block::default().title(" Bands ").borders(Borders::ALL);

    let bars: Vec<Bar> = bands
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            Bar::default()
                .value((value.clamp(0.0, 1.0) * BAR_MAX as f32).round() as u64)
                .text_value(format!("{value:.2}"))
                .label(Line::from(i.to_string()))
        })
        .collect();

    // Spread the bars over the available width
    let inner_width = area.width.saturating_sub(2);
    let count = bands.len().max(1) as u16;
    let bar_width = (inner_width / count).saturating_sub(1).max(1);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(BAR_MAX)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));

    frame.render_widget(chart, area);
}
