//! Dashboard rendering
//!
//! Band bars, the raw byte spectrum and the analyser's time-domain window,
//! with a status line and key help underneath.

mod bands;
mod spectrum;
mod status;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use saavy_bridge::BridgeConfig;

use bands::render_bands;
use spectrum::render_spectrum;
use status::render_status;
use waveform::render_waveform;

/// Everything one frame of the dashboard shows.
pub struct Dashboard<'a> {
    pub bands: Vec<f32>,
    /// (frequency_hz, byte value)
    pub spectrum: &'a [(f64, f64)],
    pub waveform: &'a [f32],
    pub active: bool,
    pub has_audio: bool,
    pub sample_rate: f32,
    pub config: &'a BridgeConfig,
    pub frame_count: u64,
    pub observing: bool,
    pub notifications: u64,
    /// Observer's current view of band 0
    pub snapshot: f32,
}

pub fn render(frame: &mut Frame, dashboard: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Status
            Constraint::Min(8),     // Bands
            Constraint::Length(10), // Spectrum
            Constraint::Length(8),  // Waveform
            Constraint::Length(1),  // Help
        ])
        .split(frame.area());

    render_status(frame, chunks[0], dashboard);
    render_bands(frame, chunks[1], &dashboard.bands);
    render_spectrum(frame, chunks[2], dashboard.spectrum);
    render_waveform(frame, chunks[3], dashboard.waveform, dashboard.sample_rate);

    let help = Paragraph::new(" [Q] Quit  [+/-] Bands  [D] Disconnect/Init  [O] Observer")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[4]);
}
