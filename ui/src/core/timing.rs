//! Monotonic time and cooperative sleeps for the animators and the preview
//! debounce, per target.

/// Milliseconds since an arbitrary session origin.
pub fn now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.performance())
            .map(|performance| performance.now())
            .unwrap_or(0.0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use once_cell::sync::Lazy;
        use std::time::Instant;

        static ORIGIN: Lazy<Instant> = Lazy::new(Instant::now);
        ORIGIN.elapsed().as_secs_f64() * 1000.0
    }
}

pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::TimeoutFuture::new(ms as u32).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}

/// One animation frame worth of waiting (~60 fps).
pub async fn frame_tick() {
    sleep_ms(16).await;
}
