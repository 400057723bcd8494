//! Browser bindings
//!
//! The page owns rendering, audio and raycasting. It calls `frame()` from
//! `requestAnimationFrame`, forwards clicks, and reads the state back as JSON.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::consts::MAX_FRAME_DT;
use crate::sim::Engine;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Target Rush engine loaded");
}

/// Engine handle exposed to JavaScript
#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WasmEngine {
    /// New engine seeded from the current time
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmEngine {
        let seed = js_sys::Date::now() as u64;
        log::info!("Started new game with seed: {}", seed);
        Self::from_engine(Engine::new(seed))
    }

    /// New engine with explicit seed and tuning JSON
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: f64, tuning_json: &str) -> Result<WasmEngine, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let engine = Engine::try_with_tuning(seed as u64, tuning).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_engine(engine))
    }

    fn from_engine(engine: Engine) -> Self {
        Self {
            engine,
            last_time: None,
        }
    }

    /// Advance by the time since the previous frame (`time_ms` from rAF)
    pub fn frame(&mut self, time_ms: f64) {
        let dt_ms = match self.last_time {
            Some(last) => (time_ms - last).clamp(0.0, f64::from(MAX_FRAME_DT) * 1000.0),
            None => 0.0,
        };
        self.last_time = Some(time_ms);
        self.engine.advance(Duration::from_secs_f64(dt_ms / 1000.0));
    }

    #[wasm_bindgen(js_name = onHit)]
    pub fn on_hit(&mut self, target_id: u32) -> bool {
        self.engine.on_hit(target_id)
    }

    #[wasm_bindgen(js_name = onMiss)]
    pub fn on_miss(&mut self) {
        self.engine.on_miss();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn resume(&mut self) {
        self.engine.resume();
        // Don't count the paused wall-clock gap
        self.last_time = None;
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) {
        self.engine.toggle_pause();
        self.last_time = None;
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.last_time = None;
    }

    pub fn dispose(&mut self) {
        self.engine.dispose();
    }

    /// Current `GameState` as JSON
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.engine
            .state()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.drain_events()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for WasmEngine {
    fn default() -> Self {
        Self::new()
    }
}
