//! Dialog Example
//!
//! Opens, resizes and closes a window at 60 frames per second against the
//! in-memory DOM, logging every lifecycle event.
//!
//! Run with `RUST_LOG=debug` to see the window transitions.

use std::rc::Rc;

use lumen_core::{Config, Dom, EventSource, Listener, Property, Size, logging, profiling};
use lumen_test_utils::MockDom;
use lumen_ui::{AnimationSystem, ResizeOptions, UiContext, Window, WindowEvent, WindowOptions};

const FRAME: f32 = 1.0 / 60.0;

fn run_frames(animations: &AnimationSystem) -> u32 {
    let mut frames = 0;
    while animations.active_count() > 0 {
        animations.update(FRAME);
        profiling::new_frame();
        frames += 1;
    }
    frames
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    profiling::init_profiling(Config::default().profiling);

    let dom = Rc::new(MockDom::new());
    dom.set_viewport(Size::new(1280.0, 720.0));
    let content = dom.append_element(dom.body(), "section");
    dom.set_attribute(content, "id", "confirm");

    let (ctx, animations) = UiContext::animated(dom.clone(), &Config::default());
    let window = Window::new(
        &ctx,
        "#confirm",
        WindowOptions::new().width(480.0).add_class("dialog"),
    )?;
    dom.set_intrinsic_size(window.get_node(), Size::new(480.0, 160.0));

    window.on(
        "open close",
        Listener::from_fn(|event: &WindowEvent| {
            tracing::info!(window = event.window, "{}", event.kind.as_str());
        }),
    )?;

    window.open();
    let frames = run_frames(&animations);
    tracing::info!(
        frames,
        left = %dom.css(window.get_node(), Property::Left),
        top = %dom.css(window.get_node(), Property::Top),
        "opened"
    );

    window.resize(Some(ResizeOptions::new().width(640.0).height(320.0)));
    run_frames(&animations);

    window.close();
    run_frames(&animations);

    window.destroy();
    tracing::info!(state = ?window.state(), "done");
    Ok(())
}
