#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;
use crate::particles::Palette;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear(Bounds),
    Disc { x: f64, y: f64, radius: f64, color: Rgba },
}

#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
    fail_after: Option<usize>,
}

impl RecordingSurface {
    fn discs(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Disc { .. })).collect()
    }

    fn check_budget(&self) -> Result<(), String> {
        match self.fail_after {
            Some(limit) if self.ops.len() >= limit => Err("context lost".to_owned()),
            _ => Ok(()),
        }
    }
}

impl Surface for RecordingSurface {
    type Error = String;

    fn clear(&mut self, bounds: Bounds) -> Result<(), String> {
        self.check_budget()?;
        self.ops.push(Op::Clear(bounds));
        Ok(())
    }

    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Rgba) -> Result<(), String> {
        self.check_budget()?;
        self.ops.push(Op::Disc { x, y, radius, color });
        Ok(())
    }
}

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(7)
}

fn viewport() -> Option<Bounds> {
    Some(Bounds::new(1440.0, 900.0))
}

// =============================================================
// CancelToken / SessionId
// =============================================================

#[test]
fn cancel_token_starts_live_and_cancel_is_idempotent() {
    let token = CancelToken::new();
    assert!(!token.is_cancelled());
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn cancel_token_clones_share_state() {
    let token = CancelToken::new();
    let clone = token.clone();
    clone.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn session_id_display() {
    assert_eq!(SessionId(3).to_string(), "#3");
}

// =============================================================
// initialize
// =============================================================

#[test]
fn new_core_is_uninitialized() {
    let core = AnimatorCore::default();
    assert_eq!(core.state(), AnimatorState::Uninitialized);
    assert!(core.active_session().is_none());
    assert!(core.field().is_none());
}

#[test]
fn initialize_without_surface_is_noop() {
    let mut core = AnimatorCore::default();
    assert!(core.initialize(None, Theme::Dark, &mut rng()).is_none());
    assert_eq!(core.state(), AnimatorState::Uninitialized);
    assert!(core.field().is_none());
}

#[test]
fn initialize_without_surface_keeps_running_session() {
    let mut core = AnimatorCore::default();
    let session = core.initialize(viewport(), Theme::Dark, &mut rng()).unwrap();
    assert!(core.initialize(None, Theme::Light, &mut rng()).is_none());
    assert!(!session.is_cancelled());
    assert_eq!(core.active_session().map(AnimationSession::id), Some(session.id()));
    assert_eq!(core.field().map(ParticleField::theme), Some(Theme::Dark));
}

#[test]
fn initialize_dark_creates_sixty_dark_particles_in_bounds() {
    let mut core = AnimatorCore::default();
    core.initialize(viewport(), Theme::Dark, &mut rng()).unwrap();

    let field = core.field().unwrap();
    assert_eq!(field.len(), 60);
    assert!(field.particles().iter().all(|p| Palette::DARK.contains(&p.color)));
    assert!(field.particles().iter().all(|p| field.bounds().contains(p.x, p.y)));
    assert_eq!(core.state(), AnimatorState::Running);
}

#[test]
fn reinitialize_replaces_every_particle() {
    let mut core = AnimatorCore::default();
    let mut rng = rng();
    core.initialize(viewport(), Theme::Dark, &mut rng).unwrap();
    core.initialize(viewport(), Theme::Light, &mut rng).unwrap();

    let field = core.field().unwrap();
    assert_eq!(field.len(), 60);
    assert!(field.particles().iter().all(|p| Palette::LIGHT.contains(&p.color)));
    assert!(!field.particles().iter().any(|p| Palette::DARK.contains(&p.color)));
}

#[test]
fn initialize_twice_leaves_exactly_one_live_session() {
    let mut core = AnimatorCore::default();
    let mut rng = rng();
    let first = core.initialize(viewport(), Theme::Dark, &mut rng).unwrap();
    let second = core.initialize(viewport(), Theme::Dark, &mut rng).unwrap();

    assert!(first.is_cancelled());
    assert!(!second.is_cancelled());
    assert_ne!(first.id(), second.id());
    assert_eq!(core.active_session().map(AnimationSession::id), Some(second.id()));
    assert_eq!([&first, &second].iter().filter(|s| !s.is_cancelled()).count(), 1);
}

#[test]
fn restart_cancels_old_session_before_issuing_new_one() {
    let mut core = AnimatorCore::default();
    let mut rng = rng();
    let old = core.initialize(viewport(), Theme::Dark, &mut rng).unwrap();

    core.cancel();
    assert!(old.is_cancelled());
    assert!(core.active_session().is_none());
    assert_eq!(core.state(), AnimatorState::Stopped);

    let new = core.initialize(viewport(), Theme::Light, &mut rng).unwrap();
    let mut surface = RecordingSurface::default();
    assert_eq!(core.tick(old.id(), &mut surface), Ok(Tick::Stale));
    assert!(surface.ops.is_empty());
    assert_eq!(core.tick(new.id(), &mut surface), Ok(Tick::Rendered));
    assert!(!new.is_cancelled());
}

#[test]
fn session_ids_increase() {
    let mut core = AnimatorCore::default();
    let mut rng = rng();
    let a = core.initialize(viewport(), Theme::Light, &mut rng).unwrap();
    let b = core.initialize(viewport(), Theme::Light, &mut rng).unwrap();
    assert!(b.id() > a.id());
}

#[test]
fn initialize_uses_configured_count() {
    let config = BackdropConfig { particle_count: 12, ..BackdropConfig::default() };
    let mut core = AnimatorCore::new(config);
    core.initialize(viewport(), Theme::Light, &mut rng()).unwrap();
    assert_eq!(core.field().map(ParticleField::len), Some(12));
    assert_eq!(core.config().particle_count, 12);
}

// =============================================================
// cancel / state machine
// =============================================================

#[test]
fn cancel_stops_running_session() {
    let mut core = AnimatorCore::default();
    let session = core.initialize(viewport(), Theme::Dark, &mut rng()).unwrap();
    core.cancel();
    assert!(session.is_cancelled());
    assert_eq!(core.state(), AnimatorState::Stopped);
    assert!(core.active_session().is_none());
}

#[test]
fn cancel_on_uninitialized_core_is_noop() {
    let mut core = AnimatorCore::default();
    core.cancel();
    core.cancel();
    assert_eq!(core.state(), AnimatorState::Uninitialized);
}

#[test]
fn stopped_core_can_restart() {
    let mut core = AnimatorCore::default();
    let mut rng = rng();
    core.initialize(viewport(), Theme::Dark, &mut rng).unwrap();
    core.cancel();
    let session = core.initialize(viewport(), Theme::Light, &mut rng).unwrap();
    assert_eq!(core.state(), AnimatorState::Running);
    assert!(!session.is_cancelled());
}

// =============================================================
// tick
// =============================================================

#[test]
fn tick_clears_then_draws_every_particle() {
    let mut core = AnimatorCore::default();
    let session = core.initialize(viewport(), Theme::Dark, &mut rng()).unwrap();
    let mut surface = RecordingSurface::default();

    assert_eq!(core.tick(session.id(), &mut surface), Ok(Tick::Rendered));

    assert_eq!(surface.ops.first(), Some(&Op::Clear(Bounds::new(1440.0, 900.0))));
    assert_eq!(surface.discs().len(), 60);
    let field = core.field().unwrap();
    for (op, p) in surface.ops[1..].iter().zip(field.particles()) {
        assert_eq!(op, &Op::Disc { x: p.x, y: p.y, radius: p.radius, color: p.color });
    }
}

#[test]
fn tick_advances_particles_by_velocity() {
    let mut core = AnimatorCore::default();
    let session = core.initialize(viewport(), Theme::Light, &mut rng()).unwrap();
    let before = core.field().unwrap().particles().to_vec();

    core.tick(session.id(), &mut RecordingSurface::default()).unwrap();

    let bounds = core.field().unwrap().bounds();
    for (old, new) in before.iter().zip(core.field().unwrap().particles()) {
        let mut expected = *old;
        expected.advance(bounds);
        assert_eq!(*new, expected);
    }
}

#[test]
fn many_ticks_keep_particles_in_bounds() {
    let mut core = AnimatorCore::new(BackdropConfig { max_speed: 12.0, ..BackdropConfig::default() });
    let session = core.initialize(Some(Bounds::new(90.0, 70.0)), Theme::Dark, &mut rng()).unwrap();
    let mut surface = RecordingSurface::default();
    for _ in 0..2_000 {
        surface.ops.clear();
        core.tick(session.id(), &mut surface).unwrap();
        let field = core.field().unwrap();
        assert!(field.particles().iter().all(|p| field.bounds().contains(p.x, p.y)));
    }
}

#[test]
fn tick_for_replaced_session_is_stale_and_draws_nothing() {
    let mut core = AnimatorCore::default();
    let mut rng = rng();
    let old = core.initialize(viewport(), Theme::Dark, &mut rng).unwrap();
    core.initialize(viewport(), Theme::Light, &mut rng).unwrap();
    let snapshot = core.field().unwrap().clone();
    let mut surface = RecordingSurface::default();

    assert_eq!(core.tick(old.id(), &mut surface), Ok(Tick::Stale));
    assert!(surface.ops.is_empty());
    assert_eq!(core.field(), Some(&snapshot));
}

#[test]
fn tick_after_cancel_is_stale() {
    let mut core = AnimatorCore::default();
    let session = core.initialize(viewport(), Theme::Dark, &mut rng()).unwrap();
    core.cancel();
    assert_eq!(core.tick(session.id(), &mut RecordingSurface::default()), Ok(Tick::Stale));
}

#[test]
fn tick_with_externally_cancelled_token_is_stale() {
    let mut core = AnimatorCore::default();
    let session = core.initialize(viewport(), Theme::Dark, &mut rng()).unwrap();
    session.token().cancel();
    assert_eq!(core.tick(session.id(), &mut RecordingSurface::default()), Ok(Tick::Stale));
}

#[test]
fn tick_propagates_surface_error() {
    let mut core = AnimatorCore::default();
    let session = core.initialize(viewport(), Theme::Dark, &mut rng()).unwrap();
    let mut surface = RecordingSurface { fail_after: Some(5), ..RecordingSurface::default() };
    assert_eq!(core.tick(session.id(), &mut surface), Err("context lost".to_owned()));
    assert_eq!(surface.ops.len(), 5);
}

// =============================================================
// resize
// =============================================================

#[test]
fn resize_rescales_without_regenerating() {
    let mut core = AnimatorCore::default();
    let session = core.initialize(viewport(), Theme::Dark, &mut rng()).unwrap();
    let colors = core.field().unwrap().particles().iter().map(|p| p.color).collect::<Vec<_>>();

    core.resize(Bounds::new(320.0, 240.0));

    let field = core.field().unwrap();
    assert_eq!(field.bounds(), Bounds::new(320.0, 240.0));
    assert_eq!(field.particles().iter().map(|p| p.color).collect::<Vec<_>>(), colors);
    assert!(field.particles().iter().all(|p| field.bounds().contains(p.x, p.y)));
    assert!(!session.is_cancelled());

    let mut surface = RecordingSurface::default();
    core.tick(session.id(), &mut surface).unwrap();
    assert_eq!(surface.ops.first(), Some(&Op::Clear(Bounds::new(320.0, 240.0))));
}

#[test]
fn resize_before_initialize_is_noop() {
    let mut core = AnimatorCore::default();
    core.resize(Bounds::new(10.0, 10.0));
    assert!(core.field().is_none());
}
