//! The page's single real timeout and single animation-frame request.
//!
//! The engine runs on logical clocks. This drives them: one browser timeout
//! armed for the earliest pending deadline, one frame request at a time.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Performance, Window};

pub struct Clock {
    window: Window,
    performance: Option<Performance>,
    on_timeout: Closure<dyn FnMut()>,
    timeout: Option<(i32, f64)>,
    on_frame: Closure<dyn FnMut(f64)>,
    frame: Option<i32>,
}

/// Milliseconds to wait for `deadline`, rounded up so the timeout never fires early.
pub fn timeout_delay(now: f64, deadline: f64) -> i32 {
    let wait = (deadline - now).ceil();
    if wait.is_finite() && wait > 0.0 {
        wait.min(i32::MAX as f64) as i32
    } else {
        0
    }
}

impl Clock {
    pub fn new(window: &Window) -> Self {
        let on_timeout = Closure::<dyn FnMut()>::new(|| {
            crate::with_runner(|runner| runner.on_timeout());
        });
        let on_frame = Closure::<dyn FnMut(f64)>::new(|_timestamp: f64| {
            crate::with_runner(|runner| runner.on_animation_frame());
        });
        Self {
            window: window.clone(),
            performance: window.performance(),
            on_timeout,
            timeout: None,
            on_frame,
            frame: None,
        }
    }

    /// Milliseconds since navigation start.
    pub fn now(&self) -> f64 {
        self.performance.as_ref().map(|p| p.now()).unwrap_or_else(js_sys::Date::now)
    }

    /// Arm the timeout for `deadline`, replacing any earlier arming.
    /// `None` just cancels.
    pub fn arm(&mut self, deadline: Option<f64>) -> Result<(), JsValue> {
        if let (Some((_, armed)), Some(wanted)) = (self.timeout, deadline) {
            if armed == wanted {
                return Ok(());
            }
        }
        self.disarm();
        let Some(deadline) = deadline else {
            return Ok(());
        };
        let delay = timeout_delay(self.now(), deadline);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(self.on_timeout.as_ref().unchecked_ref(), delay)?;
        self.timeout = Some((handle, deadline));
        Ok(())
    }

    pub fn disarm(&mut self) {
        if let Some((handle, _)) = self.timeout.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    /// The armed timeout fired.
    pub fn fired(&mut self) {
        self.timeout = None;
    }

    /// Request an animation frame unless one is already pending.
    pub fn request_frame(&mut self) -> Result<(), JsValue> {
        if self.frame.is_some() {
            return Ok(());
        }
        let handle = self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())?;
        self.frame = Some(handle);
        Ok(())
    }

    /// The requested frame ran.
    pub fn frame_ran(&mut self) {
        self.frame = None;
    }

    pub fn cancel(&mut self) {
        self.disarm();
        if let Some(handle) = self.frame.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_rounds_up_and_never_goes_negative() {
        assert_eq!(timeout_delay(100.0, 400.0), 300);
        assert_eq!(timeout_delay(100.2, 400.0), 300);
        assert_eq!(timeout_delay(100.0, 400.5), 301);
        assert_eq!(timeout_delay(500.0, 400.0), 0);
        assert_eq!(timeout_delay(0.0, f64::INFINITY), 0);
    }
}
