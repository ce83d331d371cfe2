//! Host session bootstrap.
//!
//! Runs once per widget lifetime: fetch the context, prompt for install if
//! needed, wire the lifecycle subscriptions, signal ready, open provider
//! discovery. Every host call is best-effort and single-attempt; a missing
//! context leaves the widget in a permanent not-ready state.

use std::rc::Rc;

use tracing::{debug, info, warn};
use vf_frame_host::{EventHandler, FrameHost, ProviderDiscovery, Subscription};
use vf_frame_types::{ActionStatus, HostEvent, HostEventKind, MemeUrl, ProviderInfo, SafeAreaInsets};

use crate::config::{self, FrameConfig};
use crate::flow;
use crate::state::{self, SharedState};

pub struct FrameWidget {
    pub(crate) host: Rc<dyn FrameHost>,
    discovery: Option<Rc<dyn ProviderDiscovery>>,
    pub(crate) config: Rc<FrameConfig>,
    pub(crate) state: SharedState,
    subscriptions: Vec<Subscription>,
    loaded: bool,
}

impl FrameWidget {
    pub fn new(
        host: Rc<dyn FrameHost>,
        discovery: Option<Rc<dyn ProviderDiscovery>>,
        config: FrameConfig,
    ) -> Self {
        Self {
            host,
            discovery,
            config: Rc::new(config),
            state: state::shared(),
            subscriptions: Vec::new(),
            loaded: false,
        }
    }

    /// Bootstrap the session. Idempotent: re-entry is a no-op even when the
    /// triggering condition fires more than once.
    ///
    /// Failures never escape; they degrade to "nothing visibly happened"
    /// plus a diagnostic log line.
    pub async fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        let context = match self.host.context().await {
            Ok(Some(context)) => context,
            Ok(None) => {
                info!("host returned no context, staying not-ready");
                return;
            }
            Err(error) => {
                warn!("context fetch failed: {error:#}");
                return;
            }
        };

        {
            let mut state = self.state.borrow_mut();
            state.added = context.client.added;
            state.safe_area_insets = context.client.safe_area_insets.unwrap_or_default();
            state.context = Some(context.clone());
        }

        // Prompt once if the frame is not in the user's client yet. The
        // outcome is informational; a later frame-added event is the
        // authoritative success signal.
        if !context.client.added {
            let outcome = self.host.add_frame().await;
            let described = outcome.describe();
            if let Some(message) = &described {
                info!("add frame: {message}");
            }
            self.state.borrow_mut().add_frame_result = described;
        }

        self.bind_host_events();

        self.host.ready().await;
        info!(project = config::PROJECT_ID, "ready signalled");

        if let Some(discovery) = &self.discovery {
            let sub = discovery.watch(Rc::new(|provider: &ProviderInfo| {
                debug!(name = %provider.name, rdns = %provider.rdns, "wallet provider announced");
            }));
            self.subscriptions.push(sub);
        }

        if self.state.borrow().added {
            flow::show_meme(&self.state, &self.config);
        }
    }

    fn bind_host_events(&mut self) {
        let state = self.state.clone();
        let config = self.config.clone();
        let on_added: EventHandler = Rc::new(move |event| {
            if let HostEvent::FrameAdded {
                notification_details,
            } = event
            {
                info!(
                    has_notifications = notification_details.is_some(),
                    "frame added"
                );
            }
            state.borrow_mut().added = true;
            flow::show_meme(&state, &config);
        });
        self.subscriptions
            .push(self.host.subscribe(HostEventKind::FrameAdded, on_added));

        self.subscriptions.push(self.host.subscribe(
            HostEventKind::FrameAddRejected,
            Rc::new(|event| {
                if let HostEvent::FrameAddRejected { reason } = event {
                    info!(%reason, "frame add rejected");
                }
            }),
        ));

        let state = self.state.clone();
        self.subscriptions.push(self.host.subscribe(
            HostEventKind::FrameRemoved,
            Rc::new(move |_| {
                info!("frame removed");
                state.borrow_mut().added = false;
            }),
        ));

        self.subscriptions.push(self.host.subscribe(
            HostEventKind::NotificationsEnabled,
            Rc::new(|_| info!("notifications enabled")),
        ));
        self.subscriptions.push(self.host.subscribe(
            HostEventKind::NotificationsDisabled,
            Rc::new(|_| info!("notifications disabled")),
        ));
        self.subscriptions.push(self.host.subscribe(
            HostEventKind::PrimaryButtonClicked,
            Rc::new(|_| info!("primary button clicked")),
        ));
    }

    /// Tear down every lifecycle registration. Required on unmount so no
    /// handler leaks into a later session. Safe to call without a prior
    /// `load`.
    pub fn unload(&mut self) {
        for sub in self.subscriptions.drain(..) {
            sub.unsubscribe();
        }
    }

    // ── Read-side accessors for the rendering layer and tests ──

    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    pub fn current_meme(&self) -> Option<MemeUrl> {
        self.state.borrow().display.current_meme().cloned()
    }

    pub fn is_saved(&self) -> bool {
        self.state.borrow().display.is_saved()
    }

    pub fn is_added(&self) -> bool {
        self.state.borrow().added
    }

    pub fn safe_area_insets(&self) -> SafeAreaInsets {
        self.state.borrow().safe_area_insets
    }

    pub fn add_frame_result(&self) -> Option<String> {
        self.state.borrow().add_frame_result.clone()
    }

    pub fn save_status(&self) -> ActionStatus {
        self.state.borrow().save_status
    }

    pub fn mint_status(&self) -> ActionStatus {
        self.state.borrow().mint_status
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Drop for FrameWidget {
    fn drop(&mut self) {
        self.unload();
    }
}
