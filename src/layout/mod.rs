//! Responsive layout: container size tracking and size-derived geometry.

mod metrics;
mod resize_hub;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

pub use metrics::{LayoutMetrics, LayoutPolicy};
pub use resize_hub::{ResizeHub, ResizeSubscription};

use crate::core::ContainerSize;
use crate::error::{ChartError, ChartResult};

#[derive(Debug)]
struct ObserverState {
    show_key: bool,
    policy: LayoutPolicy,
    size: ContainerSize,
    metrics: Option<LayoutMetrics>,
}

impl ObserverState {
    fn observe(&mut self, size: ContainerSize) {
        self.size = size;
        self.recompute();
    }

    fn recompute(&mut self) {
        match LayoutMetrics::compute(self.size, self.show_key, self.policy) {
            Ok(metrics) => {
                debug!(
                    width = self.size.width,
                    height = self.size.height,
                    font_scale_em = metrics.font_scale_em,
                    aspect = metrics.aspect_multiplier,
                    "layout recomputed"
                );
                self.metrics = Some(metrics);
            }
            Err(err) => {
                warn!(error = %err, "container size unusable; layout cleared");
                self.metrics = None;
            }
        }
    }
}

/// Tracks one chart's container and keeps its layout metrics current.
///
/// Mounting computes metrics synchronously from the hub's current size and
/// subscribes exactly one listener; dropping the observer unsubscribes it.
#[derive(Debug)]
pub struct LayoutObserver {
    state: Rc<RefCell<ObserverState>>,
    subscription: ResizeSubscription,
}

impl LayoutObserver {
    pub fn mount(hub: &ResizeHub, show_key: bool, policy: LayoutPolicy) -> ChartResult<Self> {
        policy.validate()?;
        let state = Rc::new(RefCell::new(ObserverState {
            show_key,
            policy,
            size: hub.current_size(),
            metrics: None,
        }));
        state.borrow_mut().recompute();

        let weak_state = Rc::downgrade(&state);
        let subscription = hub.subscribe(move |size| {
            if let Some(state) = weak_state.upgrade() {
                state.borrow_mut().observe(size);
            }
        });

        Ok(Self {
            state,
            subscription,
        })
    }

    /// Metrics for the latest container size, `None` while that size is unusable.
    #[must_use]
    pub fn metrics(&self) -> Option<LayoutMetrics> {
        self.state.borrow().metrics
    }

    #[must_use]
    pub fn container_size(&self) -> ContainerSize {
        self.state.borrow().size
    }

    pub fn set_show_key(&self, show_key: bool) {
        let mut state = self.state.borrow_mut();
        if state.show_key != show_key {
            state.show_key = show_key;
            state.recompute();
        }
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_active()
    }
}

/// Where a chart takes its size from.
#[derive(Debug)]
pub enum ChartSizing {
    /// Fixed target display size.
    Fixed {
        size: ContainerSize,
        policy: LayoutPolicy,
    },
    /// Size follows a container through a resize hub.
    Responsive(LayoutObserver),
}

impl ChartSizing {
    pub fn metrics(&self, show_key: bool) -> ChartResult<LayoutMetrics> {
        match self {
            ChartSizing::Fixed { size, policy } => LayoutMetrics::compute(*size, show_key, *policy),
            ChartSizing::Responsive(observer) => {
                observer.set_show_key(show_key);
                observer.metrics().ok_or_else(|| {
                    let size = observer.container_size().to_viewport();
                    ChartError::InvalidViewport {
                        width: size.width,
                        height: size.height,
                    }
                })
            }
        }
    }
}
