//! Exporting the live surface as a video or a GIF.
//!
//! A capture only ever reads the [`FrameTap`]; it never touches scene populations and never
//! holds up the loop that feeds the tap.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crate::{
    encode::{FfmpegSink, FrameSink, GifSink, VideoContainer, ffmpeg::EncodeConfig},
    foundation::{
        core::Rgba8,
        error::{MicrocosmError, MicrocosmResult},
    },
    runtime::tap::FrameTap,
    scene::SceneKind,
};

pub const VIDEO_FPS: u32 = 30;
pub const VIDEO_DURATION: Duration = Duration::from_secs(5);
pub const GIF_FPS: u32 = 15;
pub const GIF_DURATION: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureFormat {
    Video {
        fps: u32,
        duration: Duration,
        container: VideoContainer,
    },
    Gif {
        fps: u32,
        duration: Duration,
    },
}

impl CaptureFormat {
    pub fn video(container: VideoContainer) -> Self {
        Self::Video {
            fps: VIDEO_FPS,
            duration: VIDEO_DURATION,
            container,
        }
    }

    pub fn gif() -> Self {
        Self::Gif {
            fps: GIF_FPS,
            duration: GIF_DURATION,
        }
    }

    pub fn fps(self) -> u32 {
        match self {
            Self::Video { fps, .. } | Self::Gif { fps, .. } => fps,
        }
    }

    pub fn duration(self) -> Duration {
        match self {
            Self::Video { duration, .. } | Self::Gif { duration, .. } => duration,
        }
    }

    /// `floor(duration_ms * fps / 1000)`.
    pub fn frame_count(self) -> u64 {
        (self.duration().as_millis() * u128::from(self.fps()) / 1000) as u64
    }

    pub fn frame_interval(self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps().max(1)))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Video { container, .. } => container.extension(),
            Self::Gif { .. } => "gif",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Video { container, .. } => container.mime(),
            Self::Gif { .. } => "image/gif",
        }
    }

    pub fn validate(self) -> MicrocosmResult<()> {
        if self.fps() == 0 {
            return Err(MicrocosmError::validation("capture fps must be non-zero"));
        }
        if self.frame_count() == 0 {
            return Err(MicrocosmError::validation(
                "capture duration is shorter than one frame",
            ));
        }
        Ok(())
    }
}

/// How a capture waits between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pacer {
    /// Sleep for the frame interval.
    #[default]
    RealTime,
    /// Take the next frame immediately.
    NoWait,
}

impl Pacer {
    pub fn wait(self, interval: Duration) {
        match self {
            Self::RealTime => std::thread::sleep(interval),
            Self::NoWait => {}
        }
    }
}

/// The "recording" indicator. At most one capture runs at a time.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    busy: Arc<AtomicBool>,
}

/// Clears the recording flag when dropped, on success and failure alike.
#[derive(Debug)]
pub struct RecordingGuard {
    busy: Arc<AtomicBool>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the flag, or fail fast if a capture is already running.
    pub fn try_start(&self) -> MicrocosmResult<RecordingGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| MicrocosmError::capture("a capture is already in progress"))?;
        Ok(RecordingGuard {
            busy: Arc::clone(&self.busy),
        })
    }
}

impl Drop for RecordingGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// A finished capture, ready to be saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub frames: usize,
}

pub fn artifact_name(kind: SceneKind, format: CaptureFormat) -> String {
    format!("magic-globe-{}.{}", kind.id(), format.extension())
}

/// Samples a [`FrameTap`] at a fixed rate and encodes what it sees.
#[derive(Clone, Debug)]
pub struct Capturer {
    recorder: Recorder,
    pacer: Pacer,
    background: Rgba8,
    first_frame_timeout: Duration,
}

impl Default for Capturer {
    fn default() -> Self {
        Self {
            recorder: Recorder::new(),
            pacer: Pacer::RealTime,
            background: Rgba8::WHITE,
            first_frame_timeout: Duration::from_secs(2),
        }
    }
}

impl Capturer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Color the transparent surface corners are flattened onto.
    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    pub fn with_first_frame_timeout(mut self, timeout: Duration) -> Self {
        self.first_frame_timeout = timeout;
        self
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Record `format` from `tap`. The artifact is named after `kind`.
    #[tracing::instrument(skip(self, tap), fields(kind = %kind))]
    pub fn capture(
        &self,
        tap: &FrameTap,
        kind: SceneKind,
        format: CaptureFormat,
    ) -> MicrocosmResult<CaptureArtifact> {
        format.validate()?;
        let _guard = self.recorder.try_start()?;
        let result = self.record(tap, kind, format);
        match &result {
            Ok(a) => tracing::info!(
                file = %a.file_name,
                frames = a.frames,
                bytes = a.bytes.len(),
                "capture finished"
            ),
            Err(e) => tracing::warn!(error = %e, "capture abandoned"),
        }
        result
    }

    fn record(
        &self,
        tap: &FrameTap,
        kind: SceneKind,
        format: CaptureFormat,
    ) -> MicrocosmResult<CaptureArtifact> {
        let (_, first) = tap
            .wait_newer(0, self.first_frame_timeout)
            .ok_or_else(|| MicrocosmError::surface("no frame on the surface to capture"))?;
        let bg = self.background.with_alpha(1.0).to_array();

        let mut sink: Box<dyn FrameSink> = match format {
            CaptureFormat::Video {
                fps, container, ..
            } => Box::new(FfmpegSink::new(
                EncodeConfig {
                    width: first.width,
                    height: first.height,
                    fps,
                    container,
                },
                bg,
            )?),
            CaptureFormat::Gif { fps, .. } => Box::new(GifSink::new(fps, bg)?),
        };

        let total = format.frame_count();
        let interval = format.frame_interval();
        for i in 0..total {
            let (_, frame) = tap
                .latest()
                .ok_or_else(|| MicrocosmError::surface("surface torn down during capture"))?;
            sink.push(&frame)?;
            if i + 1 < total {
                self.pacer.wait(interval);
            }
        }

        let frames = sink.frames();
        let bytes = sink.finish()?;
        Ok(CaptureArtifact {
            file_name: artifact_name(kind, format),
            mime: format.mime(),
            bytes,
            frames,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/capture.rs"]
mod tests;
