//! Ladder game (Amidakuji) core crate.
//!
//! Participants sit atop vertical rails, random rungs join neighboring rails,
//! and a token dropped down one rail follows every rung it meets to reveal a
//! pre-drawn winner/loser outcome. The rung generator, path walker, layout and
//! animation state machine are plain Rust and tested natively; `canvas` wires
//! them to a browser canvas through the exported entry points below.

use wasm_bindgen::prelude::*;

// Browser console logging. Compiles to nothing off wasm32 so native tests stay quiet.
macro_rules! console_log {
    ($($t:tt)*) => { $crate::console_write(false, &format!($($t)*)) };
}

macro_rules! console_warn {
    ($($t:tt)*) => { $crate::console_write(true, &format!($($t)*)) };
}

pub mod animation;
pub mod config;
pub mod error;
pub mod ladder;
pub mod layout;
pub mod rng;

mod canvas;

pub use animation::{AnimationToken, Animator, Phase, Tick};
pub use config::{LadderConfig, RepairPolicy};
pub use error::LadderError;
pub use ladder::{Grid, GridGenerator, Ladder, Outcome, Outcomes, PathWalker, Rung, Step};
pub use layout::Layout;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[allow(unused_variables)]
pub(crate) fn console_write(warn: bool, msg: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let value = JsValue::from_str(msg);
        if warn {
            web_sys::console::warn_1(&value);
        } else {
            web_sys::console::log_1(&value);
        }
    }
}

// -----------------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------------

/// Start a game with default participants, honoring `?game=` and `?seed=`.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    canvas::start(canvas::config_from_page()?)
}

/// Start a game from a JSON `LadderConfig`; omitted fields take defaults and
/// `?game=` / `?seed=` still apply when the document does not set them.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let mut config = LadderConfig::from_json(json)?;
    let page = canvas::config_from_page()?;
    config.game_id = config.game_id.or(page.game_id);
    config.seed = config.seed.or(page.seed);
    canvas::start(config)
}

/// Animate the token from participant `index`, as if its name were clicked.
#[wasm_bindgen]
pub fn select_participant(index: usize) -> Result<(), JsValue> {
    canvas::select(index)
}

/// Cancel the running animation. Returns false if nothing was running.
#[wasm_bindgen]
pub fn cancel_animation() -> bool {
    canvas::cancel()
}

/// Participant whose path ends on the winning outcome, if a game is running.
#[wasm_bindgen]
pub fn winning_participant() -> Option<u32> {
    canvas::winning_participant().map(|i| i as u32)
}
