mod fishtank;
mod input;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use fishtank::catalog::Catalog;
use fishtank::save::{BlobStore, MemoryStore};
use fishtank::state::Millis;
use fishtank::FishtankGame;
use input::{pixel_to_cell, ClickState, InputEvent};
use log::{debug, warn, Level, LevelFilter, Log, Metadata, Record};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{}] {}", record.target(), record.args()).into();
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn now() -> Millis {
    js_sys::Date::now() as Millis
}

/// localStorage when the browser allows it, otherwise an in-memory store
/// (progress then lasts only for this page view).
fn open_store() -> Box<dyn BlobStore> {
    #[cfg(target_arch = "wasm32")]
    {
        match fishtank::save::LocalStorage::open() {
            Ok(storage) => return Box::new(storage),
            Err(e) => warn!("localStorage を開けません: {e}"),
        }
    }
    warn!("メモリ上のストアを使用します (リロードで消えます)");
    Box::new(MemoryStore::new())
}

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_to_cell(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    debug!("click: col={col}, row={row}, targets={}", cs.targets.len());
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
    }

    let game = Rc::new(RefCell::new(FishtankGame::new(
        open_store(),
        Catalog::standard(),
        now(),
    )));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(action_id) = action {
                game.borrow_mut()
                    .handle_input(&InputEvent::Click(action_id), now());
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                // Esc backs out of a pending reset
                KeyCode::Esc => InputEvent::Key('n'),
                _ => return,
            };
            game.borrow_mut().handle_input(&event, now());
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut gs = game.borrow_mut();
            gs.frame(js_sys::Date::now());

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            gs.render(f, size, &click_state);
        }
    });

    Ok(())
}
