//! Fishtank Tycoon — unlock fish with session time, earn coins, decorate the tank.
//!
//! [`FishtankGame`] is the only surface the presentation layer talks to. Every
//! operation runs read → modify → evaluate → save inside one `&mut self` call.

pub mod achievements;
pub mod actions;
pub mod catalog;
pub mod clock;
pub mod economy;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::Catalog;
use clock::{Session, SimClock, Toggle};
use logic::PurchaseError;
use save::BlobStore;
use state::{LogEntry, Millis, Screen, Snapshot, LOG_CAPACITY};

/// Manual grant offered as the short button.
pub const MANUAL_GRANT_SHORT: u32 = 5;
/// Manual grant offered as the long button.
pub const MANUAL_GRANT_LONG: u32 = 30;

pub struct FishtankGame {
    pub catalog: Catalog,
    pub snapshot: Snapshot,
    pub session: Session,
    clock: SimClock,
    store: Box<dyn BlobStore>,
    /// Notice log (purchases, unlocks, rejections).
    pub log: Vec<LogEntry>,
    pub screen: Screen,
    /// Catalog index of the highlighted fish.
    pub selected: usize,
    /// A reset was requested and is waiting for confirmation.
    pub pending_reset: bool,
}

impl FishtankGame {
    /// Restore the saved game from `store`, or start a fresh one.
    pub fn new(mut store: Box<dyn BlobStore>, catalog: Catalog, now: Millis) -> Self {
        let (snapshot, restored) = match save::load(store.as_mut(), &catalog) {
            Some(s) => (s, true),
            None => (Snapshot::new(&catalog, now), false),
        };

        let mut game = Self {
            catalog,
            snapshot,
            session: Session::new(),
            clock: SimClock::new(),
            store,
            log: Vec::new(),
            screen: Screen::Fish,
            selected: 0,
            pending_reset: false,
        };

        if restored {
            info!("Fishtank: セーブデータをロードしました");
            game.add_log("セーブデータをロードしました", false);
        } else {
            game.add_log("Fishtank Tycoon へようこそ！", true);
        }
        // Heal records from builds that skipped an evaluation pass
        game.evaluate_achievements(now);
        game.persist();
        game
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    fn persist(&mut self) {
        if let Err(e) = save::save(self.store.as_mut(), &self.snapshot) {
            warn!("Fishtank: セーブに失敗: {e}");
        }
    }

    fn evaluate_achievements(&mut self, now: Millis) {
        for name in achievements::evaluate(&mut self.snapshot, &self.catalog, now) {
            info!("Fishtank: 実績解除: {name}");
            self.add_log(&format!("🏆 実績解除: {name}"), true);
        }
    }

    fn fish_name(&self, id: &str) -> &'static str {
        self.catalog.fish(id).map(|f| f.name).unwrap_or("???")
    }

    /// Feed a draw-frame timestamp. Runs a tick when the one-second cadence is due.
    pub fn frame(&mut self, now_ms: f64) {
        if self.clock.update(now_ms) {
            self.tick(now_ms as Millis);
        }
    }

    /// One clock tick. A no-op when no session is running; the active fish is
    /// read here, at the moment the tick runs.
    pub fn tick(&mut self, now: Millis) {
        let Some(active) = self.session.active() else {
            return;
        };
        let elapsed = logic::elapsed_seconds(self.snapshot.last_tick, now);
        let outcome = logic::apply_elapsed(&mut self.snapshot, &self.catalog, active, elapsed, now);
        if outcome.unlocked {
            info!("Fishtank: アンロック: {active}");
            self.add_log(&format!("🐟 {} をアンロック！", self.fish_name(active)), true);
        }
        self.evaluate_achievements(now);
        self.persist();
    }

    /// Start or stop a session on `fish_id`.
    pub fn toggle_session(&mut self, fish_id: &str, now: Millis) {
        match self
            .session
            .toggle(&mut self.snapshot, &self.catalog, fish_id, now)
        {
            Toggle::Started { fish, replaced } => {
                self.clock.restart();
                if let Some(prev) = replaced {
                    debug!("Fishtank: セッション切替: {prev} -> {fish}");
                }
                self.add_log(&format!("▶ {} のセッション開始", self.fish_name(fish)), false);
            }
            Toggle::Stopped(fish) => {
                self.clock.restart();
                self.add_log(&format!("■ {} のセッション停止", self.fish_name(fish)), false);
            }
            Toggle::UnknownFish => {
                debug!("Fishtank: 未知の魚 '{fish_id}' のトグルを無視");
                return;
            }
        }
        self.persist();
    }

    /// Grant `minutes` of progress to a fish without earning coins.
    pub fn grant_minutes(&mut self, fish_id: &str, minutes: u32, now: Millis) {
        let Some(unlocked) =
            logic::add_manual_time(&mut self.snapshot, &self.catalog, fish_id, minutes, now)
        else {
            debug!("Fishtank: 未知の魚 '{fish_id}' への付与を無視");
            return;
        };
        let name = self.fish_name(fish_id);
        self.add_log(&format!("+{minutes}分 → {name}"), false);
        if unlocked {
            info!("Fishtank: アンロック: {fish_id}");
            self.add_log(&format!("🐟 {name} をアンロック！"), true);
        }
        self.evaluate_achievements(now);
        self.persist();
    }

    /// Buy one unit of a decor item. Returns true on success.
    pub fn buy_decor(&mut self, item_id: &str) -> bool {
        match logic::buy_decor(&mut self.snapshot, &self.catalog, item_id) {
            Ok(owned) => {
                let name = self.catalog.decor(item_id).map(|d| d.name).unwrap_or(item_id);
                self.add_log(&format!("{name} を購入！ ({owned}個)"), false);
                self.persist();
                true
            }
            Err(PurchaseError::UnknownItem(id)) => {
                debug!("Fishtank: 未知のデコ '{id}' の購入を無視");
                false
            }
            Err(e @ PurchaseError::InsufficientFunds { .. }) => {
                self.add_log(&format!("コインが足りません ({e})"), true);
                false
            }
        }
    }

    /// Arm a reset. Nothing is erased until [`confirm_reset`](Self::confirm_reset).
    pub fn request_reset(&mut self) {
        self.pending_reset = true;
        self.add_log("全データをリセットしますか？ [Y] はい / [N] いいえ", true);
    }

    pub fn cancel_reset(&mut self) {
        if self.pending_reset {
            self.pending_reset = false;
            self.add_log("リセットを取り消しました", false);
        }
    }

    /// Erase the saved record and start over. Ignored unless a reset was requested.
    pub fn confirm_reset(&mut self, now: Millis) -> bool {
        if !self.pending_reset {
            return false;
        }
        self.pending_reset = false;
        if let Err(e) = save::reset(self.store.as_mut()) {
            warn!("Fishtank: セーブデータの削除に失敗: {e}");
        }
        self.session.stop();
        self.snapshot = Snapshot::new(&self.catalog, now);
        self.selected = 0;
        self.screen = Screen::Fish;
        self.log.clear();
        info!("Fishtank: 全データをリセット");
        self.add_log("全データをリセットしました", true);
        true
    }

    /// Dump the current record as pretty JSON (to the console and the return value).
    pub fn export(&mut self) -> Option<String> {
        match save::export(&self.snapshot) {
            Ok(json) => {
                info!("Fishtank: エクスポート\n{json}");
                self.add_log("セーブデータをコンソールに出力しました", false);
                Some(json)
            }
            Err(e) => {
                warn!("Fishtank: エクスポートに失敗: {e}");
                None
            }
        }
    }

    fn selected_id(&self) -> Option<&'static str> {
        self.catalog.fish.get(self.selected).map(|f| f.id)
    }

    fn move_selection(&mut self, down: bool) {
        let n = self.catalog.fish.len();
        if n == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1) % n
        } else {
            (self.selected + n - 1) % n
        };
    }

    fn handle_click(&mut self, action_id: u16, now: Millis) -> bool {
        match action_id {
            CONFIRM_RESET => self.confirm_reset(now),
            CANCEL_RESET => {
                self.cancel_reset();
                true
            }
            _ if self.pending_reset => {
                self.cancel_reset();
                true
            }
            TAB_FISH => {
                self.screen = Screen::Fish;
                true
            }
            TAB_SHOP => {
                self.screen = Screen::Shop;
                true
            }
            TAB_ACHIEVEMENTS => {
                self.screen = Screen::Achievements;
                true
            }
            TOGGLE_SESSION | GRANT_SHORT | GRANT_LONG => {
                let Some(id) = self.selected_id() else {
                    return false;
                };
                match action_id {
                    TOGGLE_SESSION => self.toggle_session(id, now),
                    GRANT_SHORT => self.grant_minutes(id, MANUAL_GRANT_SHORT, now),
                    _ => self.grant_minutes(id, MANUAL_GRANT_LONG, now),
                }
                true
            }
            REQUEST_RESET => {
                self.request_reset();
                true
            }
            EXPORT => self.export().is_some(),
            id if (SELECT_FISH_BASE..BUY_DECOR_BASE).contains(&id) => {
                let idx = (id - SELECT_FISH_BASE) as usize;
                if idx < self.catalog.fish.len() {
                    self.selected = idx;
                    true
                } else {
                    false
                }
            }
            id if id >= BUY_DECOR_BASE => {
                let idx = (id - BUY_DECOR_BASE) as usize;
                match self.catalog.decor.get(idx) {
                    Some(item) => {
                        self.buy_decor(item.id);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: char, now: Millis) -> bool {
        if self.pending_reset {
            return match key {
                'y' | 'Y' => self.confirm_reset(now),
                _ => {
                    self.cancel_reset();
                    true
                }
            };
        }

        match key {
            'f' => self.handle_click(TAB_FISH, now),
            'd' => self.handle_click(TAB_SHOP, now),
            'h' => self.handle_click(TAB_ACHIEVEMENTS, now),
            'x' => self.handle_click(REQUEST_RESET, now),
            'e' => self.handle_click(EXPORT, now),
            _ => match self.screen {
                Screen::Fish => match key {
                    'j' => {
                        self.move_selection(true);
                        true
                    }
                    'k' => {
                        self.move_selection(false);
                        true
                    }
                    's' => self.handle_click(TOGGLE_SESSION, now),
                    'a' => self.handle_click(GRANT_SHORT, now),
                    'A' => self.handle_click(GRANT_LONG, now),
                    _ => false,
                },
                Screen::Shop => match key.to_digit(10) {
                    Some(d) if d >= 1 => self.handle_click(BUY_DECOR_BASE + d as u16 - 1, now),
                    _ => false,
                },
                Screen::Achievements => false,
            },
        }
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent, now: Millis) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c, now),
            InputEvent::Click(id) => self.handle_click(*id, now),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}
