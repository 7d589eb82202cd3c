//! Shared defaults for the site scripts.

// ── Theme ───────────────────────────────────────────────────────

/// `localStorage` key holding the persisted theme.
pub const THEME_STORAGE_KEY: &str = "nexus-theme";

/// Attribute on `<html>` that stylesheets switch palettes on.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Media query consulted when no theme is stored.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Every theme toggle control (desktop and mobile variants).
pub const THEME_TOGGLE_SELECTOR: &str = "#theme-toggle, #theme-toggle-mobile";

// ── Backdrop ────────────────────────────────────────────────────

/// Element id of the background canvas.
pub const BACKDROP_CANVAS_ID: &str = "bg-canvas";

/// Particles generated per session.
pub const PARTICLE_COUNT: usize = 60;

/// Largest `particle_count` a page may configure.
pub const PARTICLE_COUNT_MAX: usize = 10_000;

/// Largest absolute velocity component, in CSS pixels per frame.
pub const PARTICLE_MAX_SPEED: f64 = 0.25;

/// Upper bound (exclusive) on particle radius, in CSS pixels.
pub const PARTICLE_MAX_RADIUS: f64 = 2.0;

// ── Navigation ──────────────────────────────────────────────────

/// Header that gains the scrolled class.
pub const HEADER_SELECTOR: &str = ".glass-header";

/// Class applied to the header once the page is scrolled.
pub const HEADER_SCROLLED_CLASS: &str = "scrolled";

/// Scroll offset in pixels past which the header counts as scrolled.
pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;

/// Element id of the mobile off-canvas menu.
pub const OFFCANVAS_ID: &str = "offcanvasNavbarLight";

/// Links inside the off-canvas menu.
pub const NAV_LINK_SELECTOR: &str = ".nav-link";

/// Delay between starting the scroll and closing the mobile menu.
pub const MENU_CLOSE_DELAY_MS: u32 = 500;

// ── Scroll reveal ───────────────────────────────────────────────

/// Elements revealed when they scroll into view.
pub const REVEAL_SELECTOR: &str = ".animate-scroll, .animate-up";

/// Class added to revealed elements.
pub const REVEAL_VISIBLE_CLASS: &str = "visible";

/// Fraction of an element that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;
