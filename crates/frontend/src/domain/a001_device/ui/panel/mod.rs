use super::actions::DeviceActions;
use super::details::DeviceDetails;
use super::picker::DevicePicker;
use crate::domain::a001_device::actions::PanelConfig;
use crate::domain::a001_device::session::DeviceSession;
use leptos::prelude::*;

/// Panel for one device type, laid out from its `PanelConfig`
#[component]
#[allow(non_snake_case)]
pub fn DevicePanel(config: PanelConfig) -> impl IntoView {
    let session = DeviceSession::new(config.device_type.into()).with_config(&config);
    let lifecycle = session.lifecycle;

    wasm_bindgen_futures::spawn_local(async move {
        session.refresh().await;
    });

    view! {
        <section class="panel device-panel">
            <h2 class="panel__title">{config.title}</h2>
            <DevicePicker session=session />
            {move || lifecycle.error().map(|e| view! { <div class="error">{e}</div> })}
            <DeviceDetails session=session />
            <div class="device-panel__actions">
                <DeviceActions session=session actions=config.actions />
            </div>
        </section>
    }
}
