use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    encode::sink::{FrameSink, check_frame, flatten_to_opaque_rgba8},
    foundation::error::{MicrocosmError, MicrocosmResult},
    render::backend::FrameRGBA,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoContainer {
    Mp4,
    Webm,
}

impl VideoContainer {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Mp4 => "video/mp4",
            Self::Webm => "video/webm",
        }
    }

    fn codec_args(self) -> &'static [&'static str] {
        match self {
            Self::Mp4 => &[
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
                "-f",
                "mp4",
            ],
            Self::Webm => &[
                "-c:v",
                "libvpx-vp9",
                "-pix_fmt",
                "yuv420p",
                "-b:v",
                "2M",
                "-f",
                "webm",
            ],
        }
    }
}

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub container: VideoContainer,
}

impl EncodeConfig {
    pub fn validate(&self) -> MicrocosmResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MicrocosmError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(MicrocosmError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(MicrocosmError::validation(
                "encode width/height must be even (required for yuv420p output)",
            ));
        }
        Ok(())
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// A file in the temp dir that is removed when dropped.
struct TempFile(PathBuf);

impl TempFile {
    fn new(ext: &str) -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        let name = format!("microcosm-{}-{n}.{ext}", std::process::id());
        Self(std::env::temp_dir().join(name))
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        // The file may never have been created.
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Streams opaque RGBA frames into a system `ffmpeg` process writing a temporary file.
///
/// On failure, or when dropped unfinished, the child is killed and the file removed.
pub struct FfmpegSink {
    cfg: EncodeConfig,
    bg_rgba: [u8; 4],
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    out: TempFile,
    scratch: Vec<u8>,
    frames: usize,
}

impl FfmpegSink {
    pub fn new(cfg: EncodeConfig, bg_rgba: [u8; 4]) -> MicrocosmResult<Self> {
        cfg.validate()?;

        if !is_ffmpeg_on_path() {
            return Err(MicrocosmError::capture(
                "ffmpeg is required for video capture, but was not found on PATH",
            ));
        }

        let out = TempFile::new(cfg.container.extension());
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
        ])
        .args(cfg.container.codec_args())
        .arg(out.path());

        let mut child = cmd.spawn().map_err(|e| {
            MicrocosmError::capture(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let Some(stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(MicrocosmError::encode("failed to open ffmpeg stdin"));
        };

        tracing::debug!(path = %out.path().display(), container = ?cfg.container, "ffmpeg started");
        Ok(Self {
            scratch: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            cfg,
            bg_rgba,
            child: Some(child),
            stdin: Some(stdin),
            out,
            frames: 0,
        })
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl FrameSink for FfmpegSink {
    fn push(&mut self, frame: &FrameRGBA) -> MicrocosmResult<()> {
        check_frame(frame, self.cfg.width, self.cfg.height)?;
        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(MicrocosmError::encode("ffmpeg encoder is already finalized"));
        };
        stdin.write_all(&self.scratch).map_err(|e| {
            MicrocosmError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames += 1;
        Ok(())
    }

    fn frames(&self) -> usize {
        self.frames
    }

    fn finish(mut self: Box<Self>) -> MicrocosmResult<Vec<u8>> {
        drop(self.stdin.take());
        let Some(child) = self.child.take() else {
            return Err(MicrocosmError::encode("ffmpeg encoder is already finalized"));
        };

        let output = child.wait_with_output().map_err(|e| {
            MicrocosmError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MicrocosmError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        std::fs::read(self.out.path()).map_err(|e| {
            MicrocosmError::encode(format!(
                "read encoded video '{}': {e}",
                self.out.path().display()
            ))
        })
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
