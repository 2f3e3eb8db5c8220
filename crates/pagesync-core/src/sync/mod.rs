//! Orchestration: wait for the target element, then stream throttled size
//! and scroll notifications to the host application.


use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info};

use crate::context::SyncContext;
use crate::platform::{Platform, Subscription};
use crate::watcher::{ElementWatcher, WatchState};

/// Throttle key for `receiveWindowSize`.
pub const DIMENSIONS_KEY: &str = "dimensions";
/// Throttle key for `notifyScrolling`.
pub const SCROLL_KEY: &str = "scroll";

/// Size and scroll subscriptions attached on discovery. They are kept for
/// the rest of the session and never cancelled.
#[derive(Default)]
struct Observers {
    size: Option<Subscription>,
    scroll: Option<Subscription>,
}

pub struct ViewportSync {
    ctx: Rc<SyncContext>,
    watcher: ElementWatcher,
    observers: Rc<RefCell<Observers>>,
}

impl ViewportSync {
    /// Install the element watcher. Observation starts once the target
    /// element exists, possibly before this returns.
    pub fn start<P: Platform + 'static>(ctx: Rc<SyncContext>, platform: Rc<P>) -> Self {
        let observers = Rc::new(RefCell::new(Observers::default()));

        let on_found = {
            let ctx = Rc::downgrade(&ctx);
            let platform = platform.clone();
            let observers = observers.clone();
            move || {
                if let Some(ctx) = ctx.upgrade() {
                    let attached = attach_observers(&ctx, &*platform);
                    *observers.borrow_mut() = attached;
                }
            }
        };

        let target = ctx.settings.target_id.clone();
        let watcher = ElementWatcher::start(target, platform.clone(), &*platform, on_found);
        Self {
            ctx,
            watcher,
            observers,
        }
    }

    pub fn context(&self) -> &Rc<SyncContext> {
        &self.ctx
    }

    pub fn state(&self) -> WatchState {
        self.watcher.state()
    }

    pub fn watcher(&self) -> &ElementWatcher {
        &self.watcher
    }

    pub fn observers_attached(&self) -> bool {
        let observers = self.observers.borrow();
        observers.size.is_some() && observers.scroll.is_some()
    }
}

fn attach_observers<P: Platform>(ctx: &Rc<SyncContext>, platform: &P) -> Observers {
    let target = ctx.settings.target_id.as_str();
    info!(element = target, "target element found, attaching observers");

    // The first size callback arrives during attachment and is throttled
    // like every later one.
    let size = platform.observe_size(target, dimensions_trigger(Rc::downgrade(ctx)));
    let scroll = platform.listen_scroll(scroll_trigger(Rc::downgrade(ctx)));

    debug!(element = target, "size and scroll observers attached");
    Observers {
        size: Some(size),
        scroll: Some(scroll),
    }
}

fn dimensions_trigger(ctx: Weak<SyncContext>) -> Box<dyn FnMut()> {
    Box::new(move || {
        let Some(strong) = ctx.upgrade() else {
            return;
        };
        let fire = ctx.clone();
        strong
            .throttler
            .schedule(DIMENSIONS_KEY, strong.settings.dimensions_delay, move || {
                if let Some(ctx) = fire.upgrade() {
                    ctx.bridge.send_dimensions(ctx.dimensions.current());
                }
            });
    })
}

fn scroll_trigger(ctx: Weak<SyncContext>) -> Box<dyn FnMut()> {
    Box::new(move || {
        let Some(strong) = ctx.upgrade() else {
            return;
        };
        let fire = ctx.clone();
        strong
            .throttler
            .schedule(SCROLL_KEY, strong.settings.scroll_delay, move || {
                if let Some(ctx) = fire.upgrade() {
                    ctx.bridge.send_scroll_notification();
                }
            });
    })
}
