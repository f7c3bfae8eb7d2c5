//! Windows animated by the frame-driven `AnimationSystem`.

use std::cell::Cell;
use std::rc::Rc;

use lumen_core::{AnimateOptions, Animator, Config, Dom, Property, Size, Style, StyleValue};
use lumen_test_utils::MockDom;
use lumen_ui::{AnimationSystem, UiContext, Window, WindowOptions, WindowState};

fn counter() -> (Rc<Cell<u32>>, impl FnOnce(&Window) + 'static) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    (count, move |_: &Window| inner.set(inner.get() + 1))
}

#[test]
fn test_open_and_close_follow_frames() {
    let dom = Rc::new(MockDom::new());
    let content = dom.append_element(dom.body(), "section");
    let (ctx, animations) = UiContext::animated(dom.clone(), &Config::default());
    let window = Window::new(&ctx, content, WindowOptions::default()).unwrap();
    let node = window.get_node();
    dom.set_intrinsic_size(node, Size::new(400.0, 200.0));

    window.open();
    assert_eq!(animations.active_count(), 1);

    animations.update(0.2);
    assert_eq!(window.state(), WindowState::Opening);

    animations.update(0.3);
    assert_eq!(window.state(), WindowState::Open);
    assert_eq!(dom.css(node, Property::Width), StyleValue::Px(500.0));
    assert_eq!(dom.css(node, Property::Left), StyleValue::Px(250.0));
    assert_eq!(dom.css(node, Property::Opacity), StyleValue::Number(1.0));
    assert_eq!(animations.active_count(), 0);

    window.close();
    animations.finish_all();

    assert_eq!(window.state(), WindowState::Closed);
    assert_eq!(dom.css(node, Property::Display), StyleValue::keyword("none"));
    assert_eq!(dom.css(node, Property::Transform), StyleValue::Unset);
    assert_eq!(dom.css(node, Property::Opacity), StyleValue::Number(0.0));
}

#[test]
fn test_superseded_open_still_completes_once() {
    let dom = Rc::new(MockDom::new());
    let content = dom.append_element(dom.body(), "section");
    let (ctx, animations) = UiContext::animated(dom.clone(), &Config::default());
    let window = Window::new(&ctx, content, WindowOptions::default()).unwrap();

    let (opened, on_open) = counter();
    let (closed, on_close) = counter();
    window.open_with(on_open);
    animations.update(0.1);
    window.close_with(on_close);
    assert_eq!(animations.active_count(), 2);

    animations.finish_all();
    animations.update(1.0);

    assert_eq!(opened.get(), 1);
    assert_eq!(closed.get(), 1);
    assert_eq!(window.state(), WindowState::Closed);
    assert_eq!(dom.css(window.get_node(), Property::Opacity), StyleValue::Number(0.0));
}

#[test]
fn test_completion_may_start_next_transition() {
    let dom = Rc::new(MockDom::new());
    let content = dom.append_element(dom.body(), "section");
    let (ctx, animations) = UiContext::animated(dom.clone(), &Config::default());
    let window = Window::new(&ctx, content, WindowOptions::default()).unwrap();

    window.open_with(|w| {
        w.close();
    });
    animations.finish_all();

    assert_eq!(window.state(), WindowState::Closed);
}

#[test]
fn test_non_numeric_targets_apply_immediately() {
    let dom = Rc::new(MockDom::new());
    let node = dom.append_element(dom.body(), "div");
    let animations = AnimationSystem::new(dom.clone());
    let done = Rc::new(Cell::new(false));
    let flag = done.clone();

    animations.animate(
        node,
        Style::new()
            .with(Property::Display, "block")
            .with(Property::Left, 80.0),
        AnimateOptions::new(std::time::Duration::from_millis(100), "ease-out"),
        Box::new(move || flag.set(true)),
    );

    assert_eq!(dom.css(node, Property::Display), StyleValue::keyword("block"));
    assert_eq!(dom.css(node, Property::Left), StyleValue::Unset);
    assert!(!done.get());

    animations.update(0.05);
    let StyleValue::Px(left) = dom.css(node, Property::Left) else {
        panic!("left is not in px");
    };
    assert!(left > 0.0 && left < 80.0);

    animations.update(0.05);
    assert!(done.get());
    assert_eq!(dom.css(node, Property::Left), StyleValue::Px(80.0));
}
