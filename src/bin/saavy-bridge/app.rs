//! BridgeApp - audio setup, bridge lifecycle and the UI loop

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::{error, info, warn};

use saavy_bridge::{
    graph::{AudioContext, GraphNode, RenderCtx, ToneNode},
    BandObserver, BridgeConfig, BridgeRegistry, FrameLoop, Subscription, MAX_BLOCK_SIZE,
};

use super::ui::{self, Dashboard};
use super::Args;

const MAX_BANDS: usize = 64;
const TONE_AMPLITUDE: f32 = 0.2;

/// Live output stream and the context it renders.
struct Audio {
    context: AudioContext,
    // Playback stops when the stream is dropped
    _stream: cpal::Stream,
}

pub struct BridgeApp {
    audio: Option<Audio>,
    registry: BridgeRegistry,
    observer: BandObserver,
    subscription: Option<Subscription>,
    notifications: Rc<Cell<u64>>,
    waveform: Vec<f32>,
    spectrum: Vec<(f64, f64)>,
    started: Instant,
    should_quit: bool,
}

impl BridgeApp {
    /// Open the default output device and tap it. Without a device the app
    /// still runs, with the bridge inactive.
    pub fn new(args: &Args, config: BridgeConfig) -> Self {
        let audio = match open_audio(args) {
            Ok(audio) => Some(audio),
            Err(err) => {
                warn!(%err, "audio unavailable, running without a bridge");
                None
            }
        };

        let waveform = vec![0.0; config.fft_size];
        let registry = BridgeRegistry::with_config(FrameLoop::new(), config);
        registry.init(audio.as_ref().map(|audio| &audio.context));

        let mut app = Self {
            audio,
            observer: BandObserver::new(registry.clone()),
            registry,
            subscription: None,
            notifications: Rc::new(Cell::new(0)),
            waveform,
            spectrum: Vec::new(),
            started: Instant::now(),
            should_quit: false,
        };
        app.toggle_observer();
        app
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
            self.registry.frames().tick(now_ms);
            if let Some(audio) = &self.audio {
                audio.context.collect_retired();
            }

            self.poll_analysis();
            terminal.draw(|frame| ui::render(frame, &self.dashboard()))?;

            // ~60 fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.subscription = None;
        self.registry.disconnect();
        Ok(())
    }

    /// Copy the latest spectrum and waveform out of the active bridge.
    fn poll_analysis(&mut self) {
        self.spectrum.clear();
        let Some(bridge) = self.registry.instance().filter(|bridge| bridge.is_alive()) else {
            self.waveform.fill(0.0);
            return;
        };

        if !bridge.waveform(&mut self.waveform) {
            self.waveform.fill(0.0);
        }

        let sample_rate = self.sample_rate() as f64;
        let fft_size = self.registry.config().fft_size as f64;
        bridge.with_raw(|raw| {
            self.spectrum.extend(
                raw.iter()
                    .enumerate()
                    .map(|(bin, &value)| (bin as f64 * sample_rate / fft_size, value as f64)),
            );
        });
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let count = (self.registry.band_count() + 1).min(MAX_BANDS);
                self.registry.set_band_count(count);
            }
            KeyCode::Char('-') => {
                let count = self.registry.band_count().saturating_sub(1).max(1);
                self.registry.set_band_count(count);
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                if self.registry.is_active() {
                    self.registry.disconnect();
                } else {
                    self.registry
                        .init(self.audio.as_ref().map(|audio| &audio.context));
                }
            }
            KeyCode::Char('o') | KeyCode::Char('O') => self.toggle_observer(),
            _ => {}
        }
    }

    fn toggle_observer(&mut self) {
        if self.subscription.take().is_some() {
            info!("band observer stopped");
            return;
        }
        let notifications = self.notifications.clone();
        self.subscription = Some(
            self.observer
                .subscribe(move || notifications.set(notifications.get() + 1)),
        );
        info!("band observer started");
    }

    fn sample_rate(&self) -> f32 {
        self.audio
            .as_ref()
            .map_or(0.0, |audio| audio.context.sample_rate())
    }

    fn dashboard(&self) -> Dashboard<'_> {
        Dashboard {
            bands: self.registry.all_bands().to_vec(),
            spectrum: &self.spectrum,
            waveform: &self.waveform,
            active: self.registry.is_active(),
            has_audio: self.audio.is_some(),
            sample_rate: self.sample_rate(),
            config: self.registry.config(),
            frame_count: self.registry.frames().frame_count(),
            observing: self.subscription.as_ref().is_some_and(Subscription::is_polling),
            notifications: self.notifications.get(),
            snapshot: self.observer.snapshot(),
        }
    }
}

/// Build the output stream: a sweeping tone rendered through a fresh
/// destination, mono to every channel.
fn open_audio(args: &Args) -> EyreResult<Audio> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    info!(sample_rate, channels, "opened output device");

    let tone =
        ToneNode::sweep(args.from_hz, args.to_hz, args.sweep_secs).amplitude(TONE_AMPLITUDE);
    let (context, mut destination) = AudioContext::new(sample_rate, tone);

    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut ctx = RenderCtx::new(sample_rate);

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                let block = &mut render_buf[..frames_to_render];
                destination.render_block(block, &ctx);
                ctx.advance(frames_to_render);

                // Copy to output (mono to all channels)
                let out_off = frames_written * channels;
                for (i, &s) in block.iter().enumerate() {
                    for ch in 0..channels {
                        data[out_off + i * channels + ch] = s;
                    }
                }

                frames_written += frames_to_render;
            }
        },
        |err| error!(%err, "audio stream error"),
        None,
    )?;

    stream.play()?;

    Ok(Audio {
        context,
        _stream: stream,
    })
}
