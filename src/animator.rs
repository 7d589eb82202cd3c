//! Particle background lifecycle: sessions, restart and per-frame tick.
//!
//! ARCHITECTURE
//! ============
//! [`AnimatorCore`] owns the particle field and the single live
//! [`AnimationSession`]. It never schedules anything itself: the `web` shell
//! runs one cooperative task per session, awaiting a frame and calling
//! [`AnimatorCore::tick`] until the session's [`CancelToken`] trips.
//!
//! Re-initializing cancels the previous token before the new session is
//! issued, and `tick` refuses any session id but the live one. A task that
//! wakes up after a restart therefore renders nothing and exits, so two
//! particle sets never share a surface.

#[cfg(test)]
#[path = "animator_test.rs"]
mod animator_test;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use rand::Rng;

use crate::config::BackdropConfig;
use crate::particles::{Bounds, ParticleField, Rgba};
use crate::theme::Theme;

/// A 2D drawing target. The browser implementation wraps a canvas context.
pub trait Surface {
    type Error;

    /// Clear the whole drawable area.
    ///
    /// # Errors
    ///
    /// Implementation-defined drawing failure.
    fn clear(&mut self, bounds: Bounds) -> Result<(), Self::Error>;

    /// Fill a disc centered on `(x, y)`.
    ///
    /// # Errors
    ///
    /// Implementation-defined drawing failure.
    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Rgba) -> Result<(), Self::Error>;
}

/// Monotonic session identifier, unique per [`AnimatorCore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared cancellation flag. Cancelling twice is a no-op.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// One run of the particle loop.
#[derive(Clone, Debug)]
pub struct AnimationSession {
    id: SessionId,
    token: CancelToken,
}

impl AnimationSession {
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimatorState {
    #[default]
    Uninitialized,
    Running,
    Stopped,
}

/// Outcome of a [`AnimatorCore::tick`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The field advanced and was drawn.
    Rendered,
    /// The session is no longer live; the caller should stop its loop.
    Stale,
}

/// Animator state that does not depend on a browser.
#[derive(Debug)]
pub struct AnimatorCore {
    config: BackdropConfig,
    field: Option<ParticleField>,
    session: Option<AnimationSession>,
    issued: u64,
    state: AnimatorState,
}

impl Default for AnimatorCore {
    fn default() -> Self {
        Self::new(BackdropConfig::default())
    }
}

impl AnimatorCore {
    #[must_use]
    pub fn new(config: BackdropConfig) -> Self {
        Self { config, field: None, session: None, issued: 0, state: AnimatorState::Uninitialized }
    }

    /// Start a fresh session on `surface` with particles for `theme`.
    ///
    /// An absent surface is a no-op and leaves any running session alone.
    /// Otherwise the previous session is cancelled and its particles are
    /// dropped before the new ones are generated.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        surface: Option<Bounds>,
        theme: Theme,
        rng: &mut R,
    ) -> Option<AnimationSession> {
        let bounds = surface?;
        self.cancel();

        self.field = Some(ParticleField::generate(rng, bounds, theme, &self.config));
        self.issued += 1;
        let session = AnimationSession { id: SessionId(self.issued), token: CancelToken::new() };
        self.session = Some(session.clone());
        self.state = AnimatorState::Running;

        log::debug!(
            "backdrop session {} started: {} {theme} particles on {}x{}",
            session.id,
            self.config.particle_count,
            bounds.width,
            bounds.height
        );
        Some(session)
    }

    /// Cancel the live session, if any.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            session.token.cancel();
            self.state = AnimatorState::Stopped;
            log::debug!("backdrop session {} cancelled", session.id);
        }
    }

    /// Re-measure the surface. Particles are kept, only re-wrapped.
    pub fn resize(&mut self, bounds: Bounds) {
        if let Some(field) = self.field.as_mut() {
            field.resize(bounds);
        }
    }

    /// Advance one frame and draw it, if `session` is still the live one.
    ///
    /// # Errors
    ///
    /// Propagates the first drawing failure from `surface`; the field has
    /// already advanced when that happens.
    pub fn tick<S: Surface + ?Sized>(&mut self, session: SessionId, surface: &mut S) -> Result<Tick, S::Error> {
        let live = self
            .session
            .as_ref()
            .is_some_and(|s| s.id == session && !s.is_cancelled());
        if !live {
            return Ok(Tick::Stale);
        }
        let Some(field) = self.field.as_mut() else {
            return Ok(Tick::Stale);
        };

        field.step();
        surface.clear(field.bounds())?;
        for p in field.particles() {
            surface.fill_disc(p.x, p.y, p.radius, p.color)?;
        }
        Ok(Tick::Rendered)
    }

    #[must_use]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    #[must_use]
    pub fn active_session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }
}
