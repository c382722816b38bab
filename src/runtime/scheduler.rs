//! The render loop and the stage that owns it.
//!
//! A [`LoopHandle`] is the only state the loop carries besides the [`Globe`] it drives. Switching
//! scenes through [`Stage::show`] joins the old loop before the new populations exist, so a loop
//! only ever observes one scene's state.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{
    config::{DEFAULT_LOOP_HZ, GlobeConfig},
    foundation::{
        core::Canvas,
        error::{MicrocosmError, MicrocosmResult},
    },
    render::{
        cpu::{GlobeRenderer, surface_dims},
        engraving::Engraving,
    },
    runtime::{globe::Globe, tap::FrameTap},
    scene::{CustomSceneConfig, Scene, SceneInit, SceneKind, registry},
};

enum Command {
    Reconfigure(CustomSceneConfig),
    Engrave(Engraving),
}

/// A running loop on its own thread. Dropping the handle cancels the loop.
pub struct LoopHandle {
    kind: SceneKind,
    stop: Arc<AtomicBool>,
    commands: Sender<Command>,
    thread: Option<JoinHandle<MicrocosmResult<u64>>>,
}

impl LoopHandle {
    /// Start ticking `scene` at `hz`, publishing every frame to `tap`.
    #[tracing::instrument(skip(scene, engraving, tap), fields(kind = %scene.kind()))]
    pub fn spawn(
        scene: Box<dyn Scene>,
        engraving: Engraving,
        canvas: Canvas,
        tap: FrameTap,
        hz: f64,
    ) -> MicrocosmResult<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(MicrocosmError::validation(format!(
                "loop rate must be positive, got {hz}"
            )));
        }
        surface_dims(canvas)?;
        let kind = scene.kind();
        let period = Duration::from_secs_f64(1.0 / hz);
        let stop = Arc::new(AtomicBool::new(false));
        let (commands, inbox) = mpsc::channel();

        let thread = thread::Builder::new()
            .name(format!("microcosm-loop-{kind}"))
            .spawn({
                let stop = Arc::clone(&stop);
                move || -> MicrocosmResult<u64> {
                    let renderer = GlobeRenderer::new(canvas)?;
                    let globe = Globe::new(scene, engraving, renderer);
                    Ok(run(globe, &tap, &inbox, &stop, period))
                }
            })
            .map_err(|e| MicrocosmError::surface(format!("spawn render loop: {e}")))?;

        tracing::debug!(hz, "render loop started");
        Ok(Self {
            kind,
            stop,
            commands,
            thread: Some(thread),
        })
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the loop and wait for it. Returns the number of ticks it ran.
    pub fn cancel(mut self) -> MicrocosmResult<u64> {
        self.join()
    }

    fn send(&self, cmd: Command) -> bool {
        self.is_running() && self.commands.send(cmd).is_ok()
    }

    fn join(&mut self) -> MicrocosmResult<u64> {
        self.stop.store(true, Ordering::Release);
        let Some(thread) = self.thread.take() else {
            return Ok(0);
        };
        thread.thread().unpark();
        thread
            .join()
            .map_err(|_| MicrocosmError::Other(anyhow::anyhow!("render loop panicked")))?
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        if let Err(e) = self.join() {
            tracing::warn!(error = %e, kind = %self.kind, "render loop ended with an error");
        }
    }
}

fn run(
    mut globe: Globe,
    tap: &FrameTap,
    inbox: &Receiver<Command>,
    stop: &AtomicBool,
    period: Duration,
) -> u64 {
    while !stop.load(Ordering::Acquire) {
        let started = Instant::now();
        for cmd in inbox.try_iter() {
            match cmd {
                Command::Reconfigure(cfg) => {
                    globe.reconfigure(&cfg);
                }
                Command::Engrave(text) => globe.set_engraving(text),
            }
        }
        match globe.tick() {
            Ok(Some(frame)) => {
                tap.publish(frame);
            }
            Ok(None) => break,
            Err(e) => tracing::warn!(error = %e, "frame dropped"),
        }
        if let Some(rest) = period.checked_sub(started.elapsed()) {
            thread::park_timeout(rest);
        }
    }
    tracing::debug!(ticks = globe.ticks(), "render loop stopped");
    globe.ticks()
}

/// Owns at most one live loop and the surface output it feeds.
pub struct Stage {
    canvas: Canvas,
    hz: f64,
    tap: FrameTap,
    current: Option<LoopHandle>,
}

impl Stage {
    pub fn new(canvas: Canvas, hz: f64) -> Self {
        Self {
            canvas,
            hz,
            tap: FrameTap::new(),
            current: None,
        }
    }

    /// Stage for the standard sphere surface at the default rate.
    pub fn globe() -> Self {
        Self::new(Canvas::globe(), DEFAULT_LOOP_HZ)
    }

    pub fn tap(&self) -> &FrameTap {
        &self.tap
    }

    pub fn current(&self) -> Option<SceneKind> {
        self.current.as_ref().map(LoopHandle::kind)
    }

    pub fn is_running(&self) -> bool {
        self.current.as_ref().is_some_and(LoopHandle::is_running)
    }

    /// Switch to `kind`: stop the old loop, build fresh populations, start the new loop.
    pub fn show(
        &mut self,
        kind: SceneKind,
        init: &SceneInit,
        engraving: Engraving,
    ) -> MicrocosmResult<()> {
        if let Some(prev) = self.current.take() {
            let prev_kind = prev.kind();
            if let Err(e) = prev.cancel() {
                tracing::warn!(error = %e, kind = %prev_kind, "previous loop failed");
            }
        }
        let scene = registry::build(kind, init);
        self.current = Some(LoopHandle::spawn(
            scene,
            engraving,
            self.canvas,
            self.tap.clone(),
            self.hz,
        )?);
        Ok(())
    }

    pub fn show_config(&mut self, cfg: &GlobeConfig) -> MicrocosmResult<()> {
        cfg.validate()?;
        self.hz = cfg.loop_hz;
        self.show(cfg.scene, &cfg.scene_init(), cfg.engraving())
    }

    /// Queue a custom configuration for the live loop. `false` without a live custom scene.
    pub fn reconfigure(&self, config: &CustomSceneConfig) -> bool {
        match &self.current {
            Some(h) if h.kind() == SceneKind::Custom => {
                h.send(Command::Reconfigure(config.clone()))
            }
            _ => false,
        }
    }

    /// Queue new pedestal text for the live loop. `false` without a live loop.
    pub fn set_engraving(&self, engraving: Engraving) -> bool {
        self.current
            .as_ref()
            .is_some_and(|h| h.send(Command::Engrave(engraving)))
    }

    /// Tear down the live loop and drop the last frame.
    pub fn stop(&mut self) -> MicrocosmResult<Option<u64>> {
        let ticks = self.current.take().map(LoopHandle::cancel).transpose()?;
        self.tap.clear();
        Ok(ticks)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
