//! Browser front end: canvas setup, drawing, pointer input and the frame loop.
//!
//! One game lives in `LADDER_STATE`. The `requestAnimationFrame` loop ticks the
//! animator every frame and repaints only when something changed. Label
//! anchors for hit-testing come from the `Layout` stored with the game.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, UrlSearchParams, window};

use crate::animation::{AnimationToken, Animator, Phase, Tick};
use crate::config::LadderConfig;
use crate::ladder::{Grid, Ladder};
use crate::layout::Layout;
use crate::rng;

const FONT: &str = "16px Arial";
const INK: &str = "black";
const MUTED: &str = "lightgray";
const SLOT_FILL: &str = "gray";
const EMPHASIS: &str = "red";
const SLOT_RADIUS: f64 = 5.0;
const WIRED_ATTR: &str = "data-ladder-wired";

struct LadderState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    ladder: Ladder,
    layout: Layout,
    animator: Animator,
    token: Option<AnimationToken>,
    dirty: bool,
}

thread_local! {
    static LADDER_STATE: RefCell<Option<LadderState>> = const { RefCell::new(None) };
    static LOOP_RUNNING: Cell<bool> = const { Cell::new(false) };
}

pub(crate) fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Defaults overridden by `?game=` and `?seed=` from the page URL.
pub(crate) fn config_from_page() -> Result<LadderConfig, JsValue> {
    let mut config = LadderConfig::default();
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let search = win.location().search()?;
    let params = UrlSearchParams::new_with_str(&search)?;
    config.apply_query(params.get("game"), params.get("seed").as_deref());
    Ok(config)
}

pub(crate) fn start(config: LadderConfig) -> Result<(), JsValue> {
    config.validate()?;
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = canvas_element(&doc, &config)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;
    ctx.set_font(FONT);
    ctx.set_text_align("center");

    let seed = rng::resolve_seed(config.seed);
    let mut source = rng::seeded(seed);
    let ladder = Ladder::generate(&config, &mut source)?;
    console_log!(
        "ladder game {}: {} participants, {} slots, {} rungs, seed {}",
        config.game_id.as_deref().unwrap_or("-"),
        ladder.len(),
        config.slot_count,
        ladder.grid().rungs().len(),
        seed
    );
    let violations = ladder.grid().violations();
    if !violations.is_empty() {
        console_warn!("generated ladder breaks rung invariants: {:?}", violations);
    }

    let layout = Layout::compute(
        canvas.width() as f64,
        canvas.height() as f64,
        ladder.len(),
        ladder.grid().slots(),
    );
    let state = LadderState {
        canvas: canvas.clone(),
        ctx,
        ladder,
        layout,
        animator: Animator::new(config.step_delay_ms),
        token: None,
        dirty: true,
    };
    LADDER_STATE.with(|cell| cell.replace(Some(state)));

    wire_pointer(&canvas)?;
    start_ladder_loop();
    Ok(())
}

/// Reuse the canvas with the configured id or create and append one.
fn canvas_element(doc: &Document, config: &LadderConfig) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(&config.canvas_id) {
        return Ok(el.dyn_into()?);
    }
    let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    c.set_id(&config.canvas_id);
    c.set_width(config.canvas_width);
    c.set_height(config.canvas_height);
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&c)?;
    Ok(c)
}

fn wire_pointer(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    if canvas.has_attribute(WIRED_ATTR) {
        return Ok(());
    }
    let listener_canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        // offset_x/offset_y are already canvas-local.
        click(&listener_canvas, evt.offset_x() as f64, evt.offset_y() as f64);
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    canvas.set_attribute(WIRED_ATTR, "1")?;
    Ok(())
}

/// Pointer click on `canvas`. Listeners outlive their game, so clicks on a
/// canvas the current game does not draw on are ignored. Returns true if an
/// animation started.
fn click(canvas: &HtmlCanvasElement, x: f64, y: f64) -> bool {
    LADDER_STATE.with(|cell| {
        let mut borrowed = cell.borrow_mut();
        let Some(state) = borrowed.as_mut() else {
            return false;
        };
        if state.canvas != *canvas {
            return false;
        }
        match state.layout.hit_participant(x, y) {
            Some(index) => {
                begin_animation(state, index, performance_now());
                true
            }
            None => false,
        }
    })
}

fn begin_animation(state: &mut LadderState, index: usize, now: f64) {
    if state.animator.is_animating() {
        console_log!(
            "superseding animation from {:?} with {}",
            state.animator.start_column(),
            index
        );
    }
    state.token = Some(state.animator.start(index, now));
    state.dirty = true;
    console_log!("tracing from {}", state.ladder.participants()[index]);
}

pub(crate) fn select(index: usize) -> Result<(), JsValue> {
    LADDER_STATE.with(|cell| -> Result<(), JsValue> {
        let mut borrowed = cell.borrow_mut();
        let state = borrowed
            .as_mut()
            .ok_or_else(|| JsValue::from_str("no game started"))?;
        state.ladder.check_start(index)?;
        begin_animation(state, index, performance_now());
        Ok(())
    })
}

pub(crate) fn cancel() -> bool {
    LADDER_STATE.with(|cell| {
        let mut borrowed = cell.borrow_mut();
        let Some(state) = borrowed.as_mut() else {
            return false;
        };
        let Some(token) = state.token.take() else {
            return false;
        };
        let cancelled = state.animator.cancel(token);
        if cancelled {
            state.dirty = true;
            console_log!("animation cancelled");
        }
        cancelled
    })
}

pub(crate) fn winning_participant() -> Option<usize> {
    LADDER_STATE.with(|cell| cell.borrow().as_ref().map(|s| s.ladder.winning_participant()))
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_ladder_loop() {
    if LOOP_RUNNING.with(|r| r.replace(true)) {
        return;
    }
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        LADDER_STATE.with(|state_cell| {
            if let Some(state) = state_cell.borrow_mut().as_mut() {
                ladder_tick(state, ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

// --- Tick & Rendering --------------------------------------------------------

fn ladder_tick(state: &mut LadderState, now: f64) {
    let tick = state.animator.tick(state.ladder.grid(), now);
    if let Tick::Finished { start, terminal } = tick {
        let outcome = state
            .ladder
            .outcomes()
            .get(terminal)
            .map(|o| o.label())
            .unwrap_or("?");
        console_log!(
            "{} reached column {}: {}",
            state.ladder.participants()[start],
            terminal,
            outcome
        );
    }
    if tick.needs_redraw() || state.dirty {
        render_ladder(state);
        state.dirty = false;
    }
}

fn render_ladder(state: &LadderState) {
    let ctx = &state.ctx;
    let layout = &state.layout;
    ctx.clear_rect(
        0.0,
        0.0,
        state.canvas.width() as f64,
        state.canvas.height() as f64,
    );

    // Static ladder goes muted once a token is on it.
    let (ink, slot_fill, highlight) = match state.animator.phase() {
        Phase::Idle => (INK, SLOT_FILL, None),
        Phase::Animating { .. } => (MUTED, MUTED, None),
        Phase::Done { start, terminal, .. } => (MUTED, MUTED, Some((*start, *terminal))),
    };
    draw_rails(ctx, layout, ink);
    draw_rungs(ctx, layout, state.ladder.grid(), ink);
    draw_slot_circles(ctx, layout, slot_fill);
    draw_labels(ctx, layout, &state.ladder, highlight);
    draw_trail(ctx, layout, &state.animator);
}

fn draw_rails(ctx: &CanvasRenderingContext2d, layout: &Layout, color: &str) {
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(2.0);
    for anchor in &layout.names {
        line(ctx, anchor.x, layout.rail_top, anchor.x, layout.rail_bottom);
    }
}

fn draw_rungs(ctx: &CanvasRenderingContext2d, layout: &Layout, grid: &Grid, color: &str) {
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(2.0);
    for rung in grid.rungs() {
        let y = layout.slot_y(rung.slot);
        line(
            ctx,
            layout.column_x(rung.column),
            y,
            layout.column_x(rung.column + 1),
            y,
        );
    }
}

fn draw_slot_circles(ctx: &CanvasRenderingContext2d, layout: &Layout, fill: &str) {
    for anchor in &layout.names {
        for &y in &layout.slot_ys {
            dot(ctx, anchor.x, y, fill);
        }
    }
}

fn draw_labels(
    ctx: &CanvasRenderingContext2d,
    layout: &Layout,
    ladder: &Ladder,
    highlight: Option<(usize, usize)>,
) {
    let (start, end) = match highlight {
        Some((s, e)) => (Some(s), Some(e)),
        None => (None, None),
    };
    for (anchor, name) in layout.names.iter().zip(ladder.participants()) {
        ctx.set_fill_style_str(if start == Some(anchor.index) { EMPHASIS } else { INK });
        ctx.fill_text(name, anchor.x, anchor.y).ok();
    }
    for (anchor, outcome) in layout.outcomes.iter().zip(ladder.outcomes().iter()) {
        ctx.set_fill_style_str(if end == Some(anchor.index) { EMPHASIS } else { INK });
        ctx.fill_text(outcome.label(), anchor.x, anchor.y).ok();
    }
}

fn draw_trail(ctx: &CanvasRenderingContext2d, layout: &Layout, animator: &Animator) {
    let Some(column) = animator.current_column() else {
        return;
    };
    ctx.set_stroke_style_str(EMPHASIS);
    ctx.set_line_width(3.0);
    let mut y = layout.rail_top;
    for step in animator.trail() {
        let x = layout.column_x(step.from);
        let slot_y = layout.slot_y(step.slot);
        line(ctx, x, y, x, slot_y);
        if step.to != step.from {
            line(ctx, x, slot_y, layout.column_x(step.to), slot_y);
        }
        y = slot_y;
    }
    let x = layout.column_x(column);
    if matches!(animator.phase(), Phase::Done { .. }) {
        line(ctx, x, y, x, layout.rail_bottom);
        y = layout.rail_bottom;
    }
    dot(ctx, x, y, EMPHASIS);
}

fn dot(ctx: &CanvasRenderingContext2d, x: f64, y: f64, fill: &str) {
    ctx.begin_path();
    ctx.arc(x, y, SLOT_RADIUS, 0.0, std::f64::consts::TAU).ok();
    ctx.set_fill_style_str(fill);
    ctx.fill();
    ctx.set_stroke_style_str(INK);
    ctx.set_line_width(1.0);
    ctx.stroke();
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn config(canvas_id: &str) -> LadderConfig {
        LadderConfig { canvas_id: canvas_id.to_string(), seed: Some(1), ..LadderConfig::default() }
    }

    fn canvas_by_id(id: &str) -> HtmlCanvasElement {
        let doc = window().unwrap().document().unwrap();
        doc.get_element_by_id(id).unwrap().dyn_into().unwrap()
    }

    fn first_name_anchor() -> (f64, f64) {
        LADDER_STATE.with(|cell| {
            let borrowed = cell.borrow();
            let anchor = &borrowed.as_ref().unwrap().layout.names[0];
            (anchor.x, anchor.y)
        })
    }

    #[wasm_bindgen_test]
    fn clicks_on_a_replaced_canvas_are_ignored() {
        start(config("ladder-old")).unwrap();
        let old = canvas_by_id("ladder-old");
        start(config("ladder-new")).unwrap();
        let new = canvas_by_id("ladder-new");

        let (x, y) = first_name_anchor();
        assert!(!click(&old, x, y));
        assert!(!cancel());
        assert!(click(&new, x, y));
        assert!(cancel());
    }
}
