use crate::domain::a001_device::session::DeviceSession;
use crate::shared::components::ui::{Button, Select};
use crate::shared::lifecycle::LoadingPhase;
use leptos::prelude::*;

/// Device select with a refresh button
#[component]
#[allow(non_snake_case)]
pub fn DevicePicker(session: DeviceSession) -> impl IntoView {
    let lifecycle = session.lifecycle;

    let options = Signal::derive(move || {
        session
            .devices()
            .into_iter()
            .map(|d| (d.uuid, d.name))
            .collect::<Vec<_>>()
    });
    let value = Signal::derive(move || session.selected_uuid().unwrap_or_default());

    let on_change = Callback::new(move |uuid: String| {
        let uuid = uuid.trim();
        session.select((!uuid.is_empty()).then_some(uuid));
    });

    let refresh = Callback::new(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            session.refresh().await;
        });
    });

    let face = Signal::derive(move || {
        lifecycle.face(LoadingPhase::ListLoading, "⟳")
    });

    view! {
        <div class="device-picker">
            <Select
                value=value
                options=options
                placeholder="Select a device"
                disabled=Signal::derive(move || !lifecycle.is_idle())
                on_change=on_change
            />
            <Button
                variant="icon"
                title="Refresh device list"
                face=face
                disabled=Signal::derive(move || !lifecycle.is_idle())
                on_click=refresh
            />
        </div>
    }
}
