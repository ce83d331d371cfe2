//! DOM element bindings.
//!
//! All references are resolved once at startup. To add new UI elements, add
//! a field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement};

// ── Helpers ──

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

// ── Elements struct ──

/// All DOM references used by the frame card.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    /// Outer wrapper; receives the safe-area padding.
    pub frame_root: HtmlElement,
    /// Shown until the session is ready.
    pub loading: Element,
    pub card: Element,
    pub card_title: Element,
    pub card_caption: Element,
    pub meme_img: HtmlImageElement,
    pub save_btn: HtmlButtonElement,
    pub mint_btn: HtmlButtonElement,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

macro_rules! get_img {
    ($id:expr) => {
        by_id_typed::<HtmlImageElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing img #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            frame_root: get_html!("frameRoot"),
            loading: get_el!("frameLoading"),
            card: get_el!("memeCard"),
            card_title: get_el!("memeCardTitle"),
            card_caption: get_el!("memeCardCaption"),
            meme_img: get_img!("memeImage"),
            save_btn: get_button!("saveVibeBtn"),
            mint_btn: get_button!("mintNftBtn"),
        })
    }
}
