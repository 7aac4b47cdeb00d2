//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (epoch milliseconds)
//! - Deferred and repeating callbacks with cancellation (browser timers)

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserInterval, BrowserTimeout};

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    /// A pending `window.setTimeout`. Dropping it (or calling `cancel`)
    /// clears the timeout so the callback never runs.
    pub struct BrowserTimeout {
        handle: Option<i32>,
        _closure: Closure<dyn FnMut()>,
    }

    impl BrowserTimeout {
        pub fn schedule(delay_ms: u32, callback: impl FnOnce() + 'static) -> Result<Self, JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let mut callback = Some(callback);
            let closure = Closure::<dyn FnMut()>::new(move || {
                if let Some(callback) = callback.take() {
                    callback();
                }
            });
            let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )?;
            Ok(Self {
                handle: Some(handle),
                _closure: closure,
            })
        }

        pub fn cancel(&mut self) {
            if let Some(handle) = self.handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(handle);
                }
            }
        }
    }

    impl Drop for BrowserTimeout {
        fn drop(&mut self) {
            self.cancel();
        }
    }

    /// A running `window.setInterval`. `cancel` stops it but keeps the
    /// closure alive, so it may be called from inside the callback itself.
    pub struct BrowserInterval {
        handle: Option<i32>,
        _closure: Closure<dyn FnMut()>,
    }

    impl BrowserInterval {
        pub fn start(period_ms: u32, callback: impl FnMut() + 'static) -> Result<Self, JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let closure = Closure::<dyn FnMut()>::new(callback);
            let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms.min(i32::MAX as u32) as i32,
            )?;
            Ok(Self {
                handle: Some(handle),
                _closure: closure,
            })
        }

        pub fn cancel(&mut self) {
            if let Some(handle) = self.handle.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }
    }

    impl Drop for BrowserInterval {
        fn drop(&mut self) {
            self.cancel();
        }
    }
}
