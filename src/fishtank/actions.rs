//! Semantic action IDs for Fishtank Tycoon click targets.
//!
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_FISH: u16 = 10;
pub const TAB_SHOP: u16 = 11;
pub const TAB_ACHIEVEMENTS: u16 = 12;

// ── Selected fish ───────────────────────────────────────────────
pub const TOGGLE_SESSION: u16 = 20;
pub const GRANT_SHORT: u16 = 21;
pub const GRANT_LONG: u16 = 22;

// ── Management ──────────────────────────────────────────────────
pub const REQUEST_RESET: u16 = 30;
pub const CONFIRM_RESET: u16 = 31;
pub const CANCEL_RESET: u16 = 32;
pub const EXPORT: u16 = 33;

// ── Fish row selection (base + catalog index) ───────────────────
pub const SELECT_FISH_BASE: u16 = 100;

// ── Decor purchase (base + catalog index) ───────────────────────
pub const BUY_DECOR_BASE: u16 = 200;
