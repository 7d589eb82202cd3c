//! Particle background on `<canvas id="bg-canvas">`.
//!
//! DESIGN
//! ======
//! [`Backdrop`] owns the [`AnimatorCore`], the canvas surface, the random
//! source and the single window `resize` listener. Each session runs as its
//! own `spawn_local` task: wait for a frame, tick, repeat. The token is
//! checked before waiting and `tick` re-checks the session after the frame
//! resolves, so a task outliving a restart exits without drawing.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::Window;

use crate::animator::{AnimationSession, AnimatorCore, Tick};
use crate::config::BackdropConfig;
use crate::error::Error;
use crate::listener::ListenerSlot;
use crate::theme::Theme;
use crate::web::canvas::CanvasSurface;
use crate::web::frame::next_frame;

pub struct Backdrop {
    window: Window,
    canvas_id: String,
    core: RefCell<AnimatorCore>,
    surface: RefCell<Option<CanvasSurface>>,
    rng: RefCell<SmallRng>,
    resize_listener: RefCell<ListenerSlot<Closure<dyn FnMut()>>>,
}

impl Backdrop {
    #[must_use]
    pub fn new(window: Window, config: &BackdropConfig) -> Rc<Self> {
        Rc::new(Self {
            window,
            canvas_id: config.canvas_id.clone(),
            core: RefCell::new(AnimatorCore::new(config.clone())),
            surface: RefCell::new(None),
            rng: RefCell::new(SmallRng::seed_from_u64(entropy_seed())),
            resize_listener: RefCell::new(ListenerSlot::new()),
        })
    }

    /// Stop the current loop and start a new one with fresh particles.
    ///
    /// Pages without the canvas are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context or the viewport cannot be
    /// measured; the previous session is already cancelled in the latter case.
    pub fn restart(self: &Rc<Self>, theme: Theme) -> Result<(), Error> {
        let Some(document) = self.window.document() else {
            return Ok(());
        };
        let Some(surface) = CanvasSurface::find(&document, &self.canvas_id)? else {
            log::debug!("no #{} on this page; backdrop disabled", self.canvas_id);
            return Ok(());
        };

        self.core.borrow_mut().cancel();
        let bounds = surface.fit_to_viewport(&self.window)?;
        *self.surface.borrow_mut() = Some(surface);
        self.replace_resize_listener()?;

        let session = self
            .core
            .borrow_mut()
            .initialize(Some(bounds), theme, &mut *self.rng.borrow_mut());
        if let Some(session) = session {
            spawn_local(Rc::clone(self).run(session));
        }
        Ok(())
    }

    fn replace_resize_listener(self: &Rc<Self>) -> Result<(), Error> {
        let weak = Rc::downgrade(self);
        let listener = Closure::<dyn FnMut()>::new(move || {
            if let Some(backdrop) = weak.upgrade() {
                backdrop.on_resize();
            }
        });

        let mut slot = self.resize_listener.borrow_mut();
        slot.install(
            listener,
            |old| {
                self.window
                    .remove_event_listener_with_callback("resize", old.as_ref().unchecked_ref())
            },
            |next| {
                self.window
                    .add_event_listener_with_callback("resize", next.as_ref().unchecked_ref())
            },
        )?;
        log::debug!("backdrop resize listener installed ({} total)", slot.installs());
        Ok(())
    }

    fn on_resize(&self) {
        let surface = self.surface.borrow();
        let Some(surface) = surface.as_ref() else {
            return;
        };
        match surface.fit_to_viewport(&self.window) {
            Ok(bounds) => self.core.borrow_mut().resize(bounds),
            Err(err) => log::warn!("backdrop resize failed: {err}"),
        }
    }

    async fn run(self: Rc<Self>, session: AnimationSession) {
        while !session.is_cancelled() {
            if let Err(err) = next_frame(&self.window).await {
                log::warn!("backdrop session {} lost its frame source: {err}", session.id());
                break;
            }
            match self.tick(&session) {
                Ok(Tick::Rendered) => {}
                Ok(Tick::Stale) => break,
                Err(err) => {
                    log::warn!("backdrop session {} failed to draw: {err}", session.id());
                    break;
                }
            }
        }
        log::debug!("backdrop loop for session {} exited", session.id());
    }

    fn tick(&self, session: &AnimationSession) -> Result<Tick, Error> {
        let mut surface = self.surface.borrow_mut();
        let Some(surface) = surface.as_mut() else {
            return Ok(Tick::Stale);
        };
        Ok(self.core.borrow_mut().tick(session.id(), surface)?)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn entropy_seed() -> u64 {
    let word = || (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (word() << 32) | word()
}
