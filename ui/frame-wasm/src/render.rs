//! Card rendering and button wiring.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use vf_frame_core::{FrameWidget, config};

use crate::dom::{self, Elements};

pub type SharedWidget = Rc<RefCell<FrameWidget>>;

/// Project the widget state onto the DOM. Safe to call repeatedly.
pub fn render(els: &Elements, widget: &FrameWidget) {
    let insets = widget.safe_area_insets();
    let style = els.frame_root.style();
    let _ = style.set_property("padding-top", &format!("{}px", insets.top));
    let _ = style.set_property("padding-bottom", &format!("{}px", insets.bottom));
    let _ = style.set_property("padding-left", &format!("{}px", insets.left));
    let _ = style.set_property("padding-right", &format!("{}px", insets.right));

    let Some(meme) = widget.current_meme() else {
        dom::remove_class(&els.loading, "hidden");
        dom::add_class(&els.card, "hidden");
        return;
    };

    dom::add_class(&els.loading, "hidden");
    dom::remove_class(&els.card, "hidden");

    dom::set_text(&els.card_title, config::PROJECT_TITLE);
    if els.meme_img.src() != meme.0 {
        els.meme_img.set_src(&meme.0);
    }

    if widget.is_saved() {
        dom::set_text(&els.card_caption, "Your saved vibe");
        dom::set_text(&els.save_btn, "Vibe Saved");
        els.save_btn.set_disabled(true);
    } else {
        dom::set_text(&els.card_caption, "New vibe unlocked!");
        dom::set_text(
            &els.save_btn,
            &format!("Save Vibe ({} ETH)", widget.config().save_price),
        );
        els.save_btn.set_disabled(false);
    }
}

/// Helper: attach an async click handler that re-renders afterwards.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $widget:expr, $action:ident) => {{
        let els = $els.clone();
        let widget = $widget.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            let widget2 = widget.clone();
            wasm_bindgen_futures::spawn_local(async move {
                widget2.borrow().$action().await;
                render(&els2, &widget2.borrow());
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }};
}

/// Wire the two action buttons. Call once after init.
pub fn bind_buttons(els: &Elements, widget: SharedWidget) {
    on_click_async!(els.save_btn, els, widget, save);
    on_click_async!(els.mint_btn, els, widget, mint);
}
