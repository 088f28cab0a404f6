//! Status line - bridge state, analysis settings and observer activity

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Dashboard;

pub fn render_status(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::default().title(" saavy-bridge ").borders(Borders::ALL);

    let (state, state_color) = match (dashboard.active, dashboard.has_audio) {
        (true, _) => ("● Live", Color::Green),
        (false, true) => ("○ Disconnected", Color::Yellow),
        (false, false) => ("○ No audio", Color::Red),
    };

    let observer = if dashboard.observing {
        format!(
            "Observer: {} changes (band 0 = {:.2})",
            dashboard.notifications, dashboard.snapshot
        )
    } else {
        "Observer: off".to_string()
    };

    let line = Line::from(vec![
        Span::styled(format!(" {state}  "), Style::default().fg(state_color)),
        Span::styled(
            format!("{:.1}kHz  ", dashboard.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "FFT {}  τ {:.2}  Bands {}  ",
                dashboard.config.fft_size,
                dashboard.config.smoothing,
                dashboard.bands.len()
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Frame {}  ", dashboard.frame_count),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(observer, Style::default().fg(Color::Magenta)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
