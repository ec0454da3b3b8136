//! Headless scroller demo for native builds.
//!
//! Replays wheel, track press and drag input against an in-memory document
//! and logs what the widget writes back. Run with `RUST_LOG=debug` to see
//! the state machine transitions.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = demo::run() {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use scroller::prelude::*;
    use scroller::{NodeId, StyleProperty};

    const CONTAINER_HEIGHT: f64 = 400.0;
    const CONTENT_HEIGHT: f64 = 1000.0;
    const TRACK_HEIGHT: f64 = 300.0;
    const THUMB_HEIGHT: f64 = 60.0;

    pub fn run() -> Result<(), ScrollError> {
        let dom = MemoryDom::new();
        dom.set_class_height("scrollbar", TRACK_HEIGHT);
        dom.set_class_height("scroll-inner", THUMB_HEIGHT);

        let container = dom.element("scroll-area");
        dom.set_id(container, "demo");
        dom.set_height(container, CONTAINER_HEIGHT);
        dom.append(dom.body(), container);
        let content = dom.element("inner");
        dom.set_height(content, CONTENT_HEIGHT);
        dom.append(container, content);

        let mut region = ScrollRegion::new(dom.clone(), "#demo".into(), ScrollOptions::default())?;
        let geometry = *region.geometry();
        log::info!(
            "scroll range {}px, thumb {}px travelling {}px",
            geometry.content_scroll_max(),
            geometry.thumb_height,
            geometry.thumb_travel()
        );

        region.wheel(-300.0)?;
        report(&dom, &region, content, "wheel -300");

        region.pointer_down(Hit::Track { offset_y: 200.0 }, 200.0, || dom.listen_global())?;
        report(&dom, &region, content, "track press at 200");

        region.pointer_move(500.0)?;
        report(&dom, &region, content, "drag 300px down");

        region.pointer_up();
        log::info!("released, {} global listeners left", dom.global_listener_count());

        region.pointer_move(0.0)?;
        report(&dom, &region, content, "move after release");

        dom.set_height(content, 1600.0);
        region.resize()?;
        report(&dom, &region, content, "content grew to 1600px");
        Ok(())
    }

    fn report(dom: &MemoryDom, region: &ScrollRegion<MemoryDom>, content: NodeId, step: &str) {
        let thumb = region.parts().thumb;
        log::info!(
            "{:<24} content top {:>8.2}px  thumb top {:>7.2}px  ({:.1}%)",
            step,
            dom.style(content, StyleProperty::Top).unwrap_or_default(),
            dom.style(thumb, StyleProperty::Top).unwrap_or_default(),
            region.state().fraction(region.geometry()) * 100.0
        );
    }
}
