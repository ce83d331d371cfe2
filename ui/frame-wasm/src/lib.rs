//! VibeFrame WASM front end.
//!
//! Binds the widget core to the host's JS SDK and a small DOM card.
//! Modularised for extensibility: each concern lives in its own module.

pub mod dom;
pub mod render;
pub mod sdk;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use vf_frame_core::{FrameConfig, FrameWidget};
use vf_frame_host::{FrameHost, ProviderDiscovery};
use vf_frame_types::HostEventKind;

use crate::render::SharedWidget;
use crate::sdk::JsSdkHost;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let host = JsSdkHost::attach()?;

    let discovery: Rc<dyn ProviderDiscovery> = host.clone();
    let mut widget = FrameWidget::new(host.clone(), Some(discovery), FrameConfig::default());
    widget.load().await;

    let widget: SharedWidget = Rc::new(RefCell::new(widget));
    render::render(&els, &widget.borrow());
    render::bind_buttons(&els, widget.clone());
    bind_rerender(&els, &host, &widget);

    Ok(())
}

/// Re-render after the lifecycle events that change what the card shows.
///
/// The render is deferred to a fresh task so it observes the state the
/// core's own handlers have already applied.
fn bind_rerender(els: &dom::Elements, host: &Rc<JsSdkHost>, widget: &SharedWidget) {
    for kind in [HostEventKind::FrameAdded, HostEventKind::FrameRemoved] {
        let els = els.clone();
        let widget = widget.clone();
        let sub = host.subscribe(
            kind,
            Rc::new(move |_| {
                let els2 = els.clone();
                let widget2 = widget.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    render::render(&els2, &widget2.borrow());
                });
            }),
        );
        // UI listener lives for the app lifetime.
        std::mem::forget(sub);
    }
}
