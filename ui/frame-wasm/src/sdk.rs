//! Host SDK binding.
//!
//! Wraps the host's injected JS SDK (`window.frameSdk`) behind the
//! [`FrameHost`] trait. Promise-returning SDK calls go through `JsFuture`;
//! callback events are forwarded once into an [`EventBus`] so the core's
//! subscriptions get real scoped handles instead of raw JS listeners.

use std::rc::Rc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use gloo_console::warn as console_warn;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use vf_frame_host::{
    EventBus, EventHandler, FrameHost, HostError, ProviderDiscovery, ProviderHandler, Subscription,
};
use vf_frame_types::{
    AddFrameOutcome, HostEvent, HostEventKind, ProviderInfo, SessionContext, TransactionRequest,
    TxReceipt,
};

const EVENT_NAMES: [(&str, HostEventKind); 6] = [
    ("frameAdded", HostEventKind::FrameAdded),
    ("frameAddRejected", HostEventKind::FrameAddRejected),
    ("frameRemoved", HostEventKind::FrameRemoved),
    ("notificationsEnabled", HostEventKind::NotificationsEnabled),
    ("notificationsDisabled", HostEventKind::NotificationsDisabled),
    ("primaryButtonClicked", HostEventKind::PrimaryButtonClicked),
];

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn js_detail(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(message) = get(value, "message").as_string() {
        return message;
    }
    format!("{value:?}")
}

fn decode_event(kind: HostEventKind, payload: &JsValue) -> HostEvent {
    match kind {
        HostEventKind::FrameAdded => HostEvent::FrameAdded {
            notification_details: serde_wasm_bindgen::from_value(get(
                payload,
                "notificationDetails",
            ))
            .ok(),
        },
        HostEventKind::FrameAddRejected => HostEvent::FrameAddRejected {
            reason: get(payload, "reason").as_string().unwrap_or_default(),
        },
        HostEventKind::FrameRemoved => HostEvent::FrameRemoved,
        HostEventKind::NotificationsEnabled => HostEvent::NotificationsEnabled {
            notification_details: serde_wasm_bindgen::from_value(get(
                payload,
                "notificationDetails",
            ))
            .ok(),
        },
        HostEventKind::NotificationsDisabled => HostEvent::NotificationsDisabled,
        HostEventKind::PrimaryButtonClicked => HostEvent::PrimaryButtonClicked,
    }
}

pub struct JsSdkHost {
    sdk: JsValue,
    bus: EventBus,
}

impl JsSdkHost {
    /// Bind to the host-injected `frameSdk` global and forward its lifecycle
    /// events into the internal bus.
    pub fn attach() -> Result<Rc<Self>, JsValue> {
        let sdk = get(&js_sys::global(), "frameSdk");
        if sdk.is_undefined() || sdk.is_null() {
            return Err(JsValue::from_str("frameSdk global not found"));
        }

        let host = Rc::new(Self {
            sdk,
            bus: EventBus::new(),
        });
        host.forward_events();
        Ok(host)
    }

    fn forward_events(&self) {
        let Ok(on_fn) = get(&self.sdk, "on").dyn_into::<Function>() else {
            console_warn!("frameSdk.on missing, lifecycle events unavailable");
            return;
        };

        for (name, kind) in EVENT_NAMES {
            let bus = self.bus.clone();
            let cb = Closure::wrap(Box::new(move |payload: JsValue| {
                bus.emit(&decode_event(kind, &payload));
            }) as Box<dyn FnMut(JsValue)>);

            if let Err(error) = on_fn.call2(&self.sdk, &JsValue::from_str(name), cb.as_ref()) {
                console_warn!(format!("failed to register {name} listener: {}", js_detail(&error)));
            }
            // Listener lives for the app lifetime.
            cb.forget();
        }
    }

    /// Call `frameSdk.actions.<name>` and await the result, whether the SDK
    /// returned a promise or a plain value.
    async fn action(&self, name: &str, arg: Option<&JsValue>) -> Result<JsValue, JsValue> {
        let actions = get(&self.sdk, "actions");
        let func: Function = get(&actions, name)
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("frameSdk.actions.{name} is not a function")))?;

        let ret = match arg {
            Some(arg) => func.call1(&actions, arg)?,
            None => func.call0(&actions)?,
        };
        JsFuture::from(Promise::resolve(&ret)).await
    }
}

#[async_trait(?Send)]
impl FrameHost for JsSdkHost {
    async fn context(&self) -> Result<Option<SessionContext>> {
        let raw = get(&self.sdk, "context");
        let resolved = JsFuture::from(Promise::resolve(&raw))
            .await
            .map_err(|e| anyhow!("context fetch: {}", js_detail(&e)))?;

        if resolved.is_undefined() || resolved.is_null() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(resolved)
            .map(Some)
            .map_err(|e| anyhow!("context decode: {e}"))
    }

    async fn ready(&self) {
        if let Err(error) = self.action("ready", Some(&js_sys::Object::new().into())).await {
            console_warn!(format!("ready signal failed: {}", js_detail(&error)));
        }
    }

    async fn add_frame(&self) -> AddFrameOutcome {
        match self.action("addFrame", None).await {
            Ok(_) => AddFrameOutcome::Added,
            Err(error) => {
                let name = get(&error, "name").as_string().unwrap_or_default();
                let message = js_detail(&error);
                match name.as_str() {
                    "RejectedByUser" => AddFrameOutcome::RejectedByUser { reason: message },
                    "InvalidDomainManifest" => AddFrameOutcome::InvalidManifest { reason: message },
                    _ => AddFrameOutcome::Failed { detail: message },
                }
            }
        }
    }

    async fn submit_transaction(&self, req: TransactionRequest) -> Result<TxReceipt, HostError> {
        let arg = serde_wasm_bindgen::to_value(&req)
            .map_err(|e| HostError::Host(format!("request encode: {e}")))?;

        match self.action("sendTransaction", Some(&arg)).await {
            Ok(result) => {
                let tx_hash = result
                    .as_string()
                    .or_else(|| get(&result, "transactionHash").as_string())
                    .or_else(|| get(&result, "hash").as_string())
                    .unwrap_or_default();
                Ok(TxReceipt { tx_hash })
            }
            Err(error) => {
                let name = get(&error, "name").as_string().unwrap_or_default();
                if name.contains("Rejected") {
                    Err(HostError::RejectedByUser)
                } else {
                    Err(HostError::Host(js_detail(&error)))
                }
            }
        }
    }

    fn subscribe(&self, kind: HostEventKind, handler: EventHandler) -> Subscription {
        self.bus.subscribe(kind, handler)
    }
}

impl ProviderDiscovery for JsSdkHost {
    /// Watch `frameSdk.providers` (EIP-6963 style announcements). Absent
    /// store means no announcements, which gates nothing.
    fn watch(&self, handler: ProviderHandler) -> Subscription {
        let store = get(&self.sdk, "providers");
        let Ok(subscribe_fn) = get(&store, "subscribe").dyn_into::<Function>() else {
            return Subscription::new(|| {});
        };

        let cb = Closure::wrap(Box::new(move |detail: JsValue| {
            let info = get(&detail, "info");
            let decoded: Option<ProviderInfo> = serde_wasm_bindgen::from_value(info)
                .ok()
                .or_else(|| serde_wasm_bindgen::from_value(detail.clone()).ok());
            if let Some(provider) = decoded {
                handler(&provider);
            }
        }) as Box<dyn FnMut(JsValue)>);

        let unsubscribe = subscribe_fn.call1(&store, cb.as_ref());
        cb.forget();

        match unsubscribe {
            Ok(f) if f.is_function() => Subscription::new(move || {
                let _ = Function::from(f).call0(&JsValue::UNDEFINED);
            }),
            _ => Subscription::new(|| {}),
        }
    }
}
