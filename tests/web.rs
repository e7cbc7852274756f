#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use portfolio_fx::wasm::controller::Controller;
use portfolio_fx::wasm::{close_menu, reveal_element, spawn_glyph};

wasm_bindgen_test_configure!(run_in_browser);

fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

fn document() -> web_sys::Document {
    window().document().unwrap()
}

fn attach(tag: &str, id: &str, class: &str) -> web_sys::Element {
    let el = document().create_element(tag).unwrap();
    if !id.is_empty() {
        el.set_id(id);
    }
    if !class.is_empty() {
        el.set_class_name(class);
    }
    document().body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn boots_without_any_contract_element() {
    // A page missing every known id must not throw anywhere.
    let ctrl = Controller::start(window(), document()).expect("controller should start");
    assert!(ctrl.alive());
    ctrl.dispose();
    assert!(!ctrl.alive());
    // A second dispose is a no-op.
    ctrl.dispose();
}

#[wasm_bindgen_test]
fn particle_field_spawns_the_configured_census() {
    let container = attach("div", "particles", "");
    let ctrl = Controller::start(window(), document()).expect("controller should start");
    assert_eq!(
        container.child_element_count(),
        ctrl.tuning().particle_count
    );
    ctrl.dispose();
    container.remove();
}

#[wasm_bindgen_test]
fn glyph_census_matches_attached_nodes_and_respects_the_cap() {
    let container = attach("div", "matrix", "");
    let ctrl = Controller::start(window(), document()).expect("controller should start");

    for _ in 0..5 {
        spawn_glyph(&ctrl);
    }
    assert_eq!(ctrl.glyphs_alive(), 5);
    assert_eq!(container.child_element_count(), 5);

    let cap = ctrl.tuning().glyph_cap;
    for _ in 0..cap + 10 {
        spawn_glyph(&ctrl);
    }
    assert_eq!(ctrl.glyphs_alive(), cap);
    assert_eq!(container.child_element_count() as usize, cap);

    // Dispose purges every live node and resets the census.
    ctrl.dispose();
    assert_eq!(ctrl.glyphs_alive(), 0);
    assert_eq!(container.child_element_count(), 0);
    container.remove();
}

#[wasm_bindgen_test]
fn reveal_is_one_shot_per_element() {
    let el = attach("div", "", "fade-in");
    let ctrl = Controller::start(window(), document()).expect("controller should start");

    assert!(reveal_element(&ctrl, &el));
    assert!(el.class_list().contains("visible"));
    // Later intersections are no-ops.
    assert!(!reveal_element(&ctrl, &el));
    assert!(el.class_list().contains("visible"));

    ctrl.dispose();
    el.remove();
}

#[wasm_bindgen_test]
fn closing_the_menu_unlocks_page_scroll() {
    let hamburger = attach("button", "hamburger", "active");
    let nav = attach("ul", "nav-menu", "nav-menu active");
    let body = document().body().unwrap();
    body.style().set_property("overflow", "hidden").unwrap();

    close_menu(&document());

    assert!(!hamburger.class_list().contains("active"));
    assert!(!nav.class_list().contains("active"));
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "");

    hamburger.remove();
    nav.remove();
}
