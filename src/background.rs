//! Service worker entry: owns the `TabWatch` and runs queued browser events.
//!
//! Listener registration happens in `background.js` during its first
//! evaluation, so the event that woke the worker is never lost; it reaches
//! `dispatch` once the module has started.

use std::cell::RefCell;
use std::rc::Rc;

use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::chrome::{ChromeMenus, ChromeNotifications, ChromeStorage, ChromeTabs, from_js};
use crate::config::WatchConfig;
use crate::events::BrowserEvent;
use crate::platform::SystemClock;
use crate::service::TabWatch;

type ChromeWatch = TabWatch<ChromeStorage, ChromeTabs, ChromeNotifications, SystemClock>;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = setInterval)]
    fn set_interval(handler: &Closure<dyn FnMut()>, timeout: i32) -> JsValue;
}

thread_local! {
    static WATCH: RefCell<Option<Rc<ChromeWatch>>> = const { RefCell::new(None) };
}

pub fn start() {
    let watch: Rc<ChromeWatch> = Rc::new(TabWatch::new(
        ChromeStorage,
        ChromeTabs,
        ChromeNotifications,
        SystemClock,
        WatchConfig::default(),
    ));
    WATCH.with(|slot| *slot.borrow_mut() = Some(watch.clone()));

    spawn_local(async move {
        match watch.repository().load_config().await {
            Ok(config) => watch.set_config(config),
            Err(e) => warn!("Using default settings: {}", e),
        }
        install_timers(&watch);

        if let Err(e) = watch.startup().await {
            error!("Startup bookkeeping failed: {}", e);
        }
        info!("Tab Keeper background service loaded");
    });
}

/// Run one event forwarded by the worker script
pub fn dispatch(event: JsValue) {
    let event: BrowserEvent = match from_js(event) {
        Ok(event) => event,
        Err(e) => {
            warn!("Ignoring browser event: {}", e);
            return;
        }
    };
    let Some(watch) = WATCH.with(|slot| slot.borrow().clone()) else {
        warn!("Background service not started; dropping {:?}", event);
        return;
    };

    spawn_local(async move {
        let description = format!("{:?}", event);
        if let Err(e) = watch.handle_event(&ChromeMenus, event).await {
            error!("Failed to handle {}: {}", description, e);
        }
    });
}

fn install_timers(watch: &Rc<ChromeWatch>) {
    let config = watch.config();

    let sweep = {
        let watch = watch.clone();
        Closure::<dyn FnMut()>::new(move || {
            watch.sweep_ignored();
        })
    };
    set_interval(&sweep, config.sweep_interval_ms());
    sweep.forget();

    let prune = {
        let watch = watch.clone();
        Closure::<dyn FnMut()>::new(move || {
            let watch = watch.clone();
            spawn_local(async move {
                if let Err(e) = watch.prune_statistics().await {
                    error!("Scheduled prune failed: {}", e);
                }
            });
        })
    };
    set_interval(&prune, config.prune_interval_ms());
    prune.forget();
}
