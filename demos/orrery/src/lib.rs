use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod config;
pub mod game;
pub mod gesture;
pub mod info_panel;
pub mod neo;
pub mod orbit;
pub mod selection;
pub mod zoom;

use config::OrreryConfig;
use game::Orrery;

orrery_web::export_game!(Orrery, "orrery");

/// Apply a JSON configuration. Returns false (and keeps the current one)
/// if it does not parse or validate.
#[wasm_bindgen]
pub fn orrery_configure(json: &str) -> bool {
    match OrreryConfig::from_json(json) {
        Ok(config) => {
            with_runner(|r| r.game_mut().configure(config));
            true
        }
        Err(e) => {
            log::error!("orrery config rejected: {}", e);
            false
        }
    }
}

/// Text of the current info page.
#[wasm_bindgen]
pub fn orrery_info_text() -> String {
    with_runner(|r| r.game().info_text())
}

#[wasm_bindgen]
pub fn orrery_selected_name() -> Option<String> {
    with_runner(|r| r.game().selected_name().map(str::to_string))
}

/// Select a NEO by feed name. Returns false when the name is not (yet) known.
#[wasm_bindgen]
pub fn orrery_select_neo(name: &str) -> bool {
    with_runner(|r| r.game_mut().select_neo_by_name(name))
}

/// Gesture sampling interval from the current configuration, in ms.
#[wasm_bindgen]
pub fn orrery_gesture_interval_ms() -> u32 {
    with_runner(|r| r.game().settings().gesture.interval_ms)
}
