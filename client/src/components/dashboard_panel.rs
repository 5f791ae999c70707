//! Mock sensor dashboard beside the pond.
//!
//! ARCHITECTURE
//! ============
//! Cards are built from `DashboardState` once devices load and resampled on a
//! fixed interval. Actions the model returns (aerator on/off, feed bursts) are
//! forwarded to the engine. The feed button pulse is driven by
//! `DashboardState::pulse_seq`.

use leptos::prelude::*;

use canvas::dashboard::{AeratorMode, Card};
use canvas::device::{DeviceId, DeviceKind};

use crate::app::EngineHandle;
#[cfg(feature = "csr")]
use crate::app::with_engine;
use crate::state::dashboard::DashboardState;
#[cfg(feature = "csr")]
use crate::state::pond::{LoadStatus, PondState};
use crate::util::style::{SPARK_HEIGHT, SPARK_WIDTH, bar_style, sparkline_points};

#[cfg(feature = "csr")]
use canvas::consts::{FEED_PULSE_MS, POLL_INTERVAL_MS};
#[cfg(feature = "csr")]
use canvas::dashboard::DashboardAction;
#[cfg(feature = "csr")]
use canvas::rng::SeededRandom;
#[cfg(feature = "csr")]
use gloo_timers::callback::{Interval, Timeout};
#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use crate::util::dom::{now_ms, page_visible};

#[cfg(feature = "csr")]
fn forward(engine: EngineHandle, actions: &[DashboardAction]) {
    if !actions.is_empty() {
        with_engine(engine, |e| e.apply_dashboard(actions));
    }
}

/// Read one field of the card for `id`.
fn card_field<T: Default>(dashboard: RwSignal<DashboardState>, id: &str, read: impl FnOnce(&Card) -> T) -> T {
    dashboard.with(|d| {
        d.model
            .as_ref()
            .and_then(|m| m.cards().iter().find(|c| c.device_id() == id))
            .map(read)
            .unwrap_or_default()
    })
}

#[component]
pub fn DashboardPanel() -> impl IntoView {
    let dashboard = expect_context::<RwSignal<DashboardState>>();
    let engine = expect_context::<EngineHandle>();

    #[cfg(feature = "csr")]
    {
        let pond = expect_context::<RwSignal<PondState>>();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rng = Rc::new(RefCell::new(SeededRandom::from_seed(now_ms() as u64 ^ 0x5eed)));

        let rng_install = Rc::clone(&rng);
        Effect::new(move || {
            let (status, devices) = pond.with(|p| (p.status, p.devices.clone()));
            if status != LoadStatus::Ready {
                return;
            }
            let actions = dashboard
                .try_update(|d| d.install(&devices, now_ms(), &mut *rng_install.borrow_mut()))
                .unwrap_or_default();
            forward(engine, &actions);
        });

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let period = POLL_INTERVAL_MS as u32;
        Interval::new(period, move || {
            let actions = dashboard
                .try_update(|d| d.poll(now_ms(), page_visible(), &mut *rng.borrow_mut()))
                .unwrap_or_default();
            forward(engine, &actions);
        })
        .forget();
    }

    let cards = move || {
        dashboard.with(|d| {
            d.model
                .as_ref()
                .map(|m| m.cards().iter().map(|c| (c.device_id().to_owned(), c.kind())).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    };

    #[cfg(not(feature = "csr"))]
    let _ = engine;

    view! {
        <aside class="dashboard">
            <h2 class="dashboard-title">"Monitoring"</h2>
            <div class="dashboard-grid">
                <For each=cards key=|(id, _)| id.clone() let:entry>
                    <DashboardCard id=entry.0 kind=entry.1 dashboard=dashboard engine=engine />
                </For>
            </div>
        </aside>
    }
}

#[component]
fn DashboardCard(
    id: DeviceId,
    kind: DeviceKind,
    dashboard: RwSignal<DashboardState>,
    engine: EngineHandle,
) -> impl IntoView {
    let id = StoredValue::new(id);
    let name = move || id.with_value(|id| card_field(dashboard, id, |c| c.name().to_owned()));
    let value = move || id.with_value(|id| card_field(dashboard, id, |c| c.value().to_owned()));
    let bar = move || id.with_value(|id| card_field(dashboard, id, Card::bar).map(bar_style).unwrap_or_default());
    let spark = move || id.with_value(|id| card_field(dashboard, id, |c| sparkline_points(c.history())));

    let controls = match kind {
        DeviceKind::Aerator => Some(view! { <AeratorControls dashboard=dashboard /> }.into_any()),
        DeviceKind::Feeder => Some(view! { <FeedControls dashboard=dashboard engine=engine /> }.into_any()),
        _ => None,
    };
    #[cfg(not(feature = "csr"))]
    let _ = engine;

    view! {
        <div class="card">
            <div class="card-header">
                <img class="icon" src=kind.icon_path() alt=name />
                <div class="card-title">{name}</div>
            </div>
            <div class="metric-row">
                <div class="metric-label">{kind.metric_label()}</div>
                <div class="metric-value">{value}</div>
            </div>
            {kind.has_bar().then(|| view! {
                <div class="bar">
                    <div class="fill" style=bar></div>
                </div>
            })}
            <svg class="spark" viewBox=format!("0 0 {SPARK_WIDTH} {SPARK_HEIGHT}") preserveAspectRatio="none">
                <polyline points=spark />
            </svg>
            {controls}
        </div>
    }
}

#[component]
fn AeratorControls(dashboard: RwSignal<DashboardState>) -> impl IntoView {
    let buttons = AeratorMode::ALL
        .into_iter()
        .map(|mode| {
            let class = move || if dashboard.with(DashboardState::aerator_mode) == mode { "btn active" } else { "btn" };
            let pressed = move || (dashboard.with(DashboardState::aerator_mode) == mode).to_string();
            view! {
                <button
                    type="button"
                    class=class
                    aria-pressed=pressed
                    on:click=move |_| dashboard.update(|d| d.set_aerator_mode(mode))
                >
                    {mode.label()}
                </button>
            }
        })
        .collect_view();
    view! { <div class="controls">{buttons}</div> }
}

#[component]
fn FeedControls(dashboard: RwSignal<DashboardState>, engine: EngineHandle) -> impl IntoView {
    let pulsing = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        let pulse_timer = Rc::new(RefCell::new(None::<Timeout>));
        let seen = RwSignal::new(dashboard.with_untracked(|d| d.pulse_seq));
        Effect::new(move || {
            let seq = dashboard.with(|d| d.pulse_seq);
            if seq == seen.get_untracked() {
                return;
            }
            seen.set(seq);
            pulsing.set(true);
            *pulse_timer.borrow_mut() = Some(Timeout::new(FEED_PULSE_MS, move || pulsing.set(false)));
        });
    }

    let on_feed = move |_| {
        #[cfg(feature = "csr")]
        {
            let actions = dashboard.try_update(DashboardState::feed_now).unwrap_or_default();
            forward(engine, &actions);
        }
        #[cfg(not(feature = "csr"))]
        let _ = (dashboard, engine);
    };

    view! {
        <div class="controls">
            <button
                type="button"
                class=move || if pulsing.get() { "btn btn-feed pulse" } else { "btn btn-feed" }
                on:click=on_feed
            >
                "Feed Now"
            </button>
        </div>
    }
}
