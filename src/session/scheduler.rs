use crate::foundation::error::RasterFxResult;
use crate::session::engine::{Engine, RenderReport};

/// Decides when the engine recomputes its output.
///
/// Parameter edits only raise a pending flag; each [`tick`](Self::tick) performs at most
/// one render, so any number of edits between two ticks collapse into one draw. While an
/// image is loaded and the active effect is time-dependent, every tick renders.
#[derive(Clone, Debug, Default)]
pub struct RenderScheduler {
    pending: bool,
    ticks: u64,
    renders: u64,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for one recompute on the next tick.
    pub fn request_redraw(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Ticks observed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Renders performed so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// One display refresh at clock `time`.
    ///
    /// A pending request survives ticks that happen before an image is loaded, and ticks
    /// whose render fails.
    pub fn tick(&mut self, engine: &mut Engine, time: f64) -> RasterFxResult<Option<RenderReport>> {
        self.ticks += 1;
        if !engine.has_image() {
            return Ok(None);
        }
        let effect = engine.active_effect();
        if !self.pending && !effect.is_time_dependent() {
            return Ok(None);
        }
        let report = engine.render(effect, time)?;
        self.pending = false;
        self.renders += 1;
        Ok(Some(report))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/scheduler.rs"]
mod tests;
