use super::details::DeviceDetails;
use crate::domain::a001_device::session::DeviceSession;
use crate::shared::components::ui::{Button, Input, Select};
use crate::shared::lifecycle::LoadingPhase;
use contracts::domain::a001_device::aggregate::{DeviceFilter, DeviceRecord};
use contracts::enums::DeviceType;
use leptos::prelude::*;
use uuid::Uuid;

const REFRESH_LABEL: &str = "⟳";
const CREATE_LABEL: &str = "+";
const DELETE_LABEL: &str = "Delete";

/// Empty create form of the given type with a fresh uuid
fn new_draft(device_type: DeviceType) -> DeviceRecord {
    DeviceRecord {
        uuid: Uuid::new_v4().to_string(),
        ..DeviceRecord::draft(device_type)
    }
}

/// All registered devices with create and delete
#[component]
#[allow(non_snake_case)]
pub fn DeviceList() -> impl IntoView {
    let session = DeviceSession::new(DeviceFilter::All);
    let lifecycle = session.lifecycle;
    let draft = RwSignal::new(new_draft(DeviceType::TemperatureSensor));

    let fetch = move || {
        wasm_bindgen_futures::spawn_local(async move {
            session.refresh().await;
        });
    };
    fetch();

    let idle = Signal::derive(move || lifecycle.is_idle());

    let handle_create = Callback::new(move |_| {
        let record = draft.get_untracked();
        wasm_bindgen_futures::spawn_local(async move {
            if session.create_device(record).await {
                draft.try_update(|d| *d = new_draft(d.device_type));
            }
        });
    });

    let handle_delete = Callback::new(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            session.delete_selected().await;
        });
    });

    let type_options = DeviceType::all()
        .into_iter()
        .map(|t| (t.code().to_string(), t.display_name().to_string()))
        .collect::<Vec<_>>();

    let field = move |label: &'static str,
                      get: fn(&DeviceRecord) -> String,
                      set: fn(&mut DeviceRecord, String)| {
        view! {
            <Input
                label=label
                value=Signal::derive(move || draft.with(get))
                on_input=Callback::new(move |v| draft.update(|d| set(d, v)))
                disabled=Signal::derive(move || !idle.get())
            />
        }
    };

    view! {
        <section class="panel device-list">
            <div class="panel__header">
                <h2 class="panel__title">"Devices"</h2>
                <Button
                    variant="icon"
                    title="Refresh"
                    face=Signal::derive(move || {
                        lifecycle.face(LoadingPhase::ListLoading, REFRESH_LABEL)
                    })
                    disabled=Signal::derive(move || !idle.get())
                    on_click=Callback::new(move |_| fetch())
                />
            </div>

            {move || lifecycle.error().map(|e| view! { <div class="error">{e}</div> })}

            <table class="table">
                <thead>
                    <tr>
                        <th>"UUID"</th>
                        <th>"Type"</th>
                        <th>"Name"</th>
                        <th>"Description"</th>
                        <th>"Version"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || session.devices()
                        key=|d| d.clone()
                        children=move |d: DeviceRecord| {
                            let uuid = d.uuid.clone();
                            let row_uuid = d.uuid.clone();
                            let is_selected = move || session.selected_uuid().as_deref() == Some(row_uuid.as_str());
                            view! {
                                <tr
                                    class=move || if is_selected() { "table__row table__row--selected" } else { "table__row" }
                                    on:click=move |_| {
                                        if idle.get_untracked() {
                                            session.toggle_select(&uuid);
                                        }
                                    }
                                >
                                    <td>{d.uuid}</td>
                                    <td>{d.device_type.display_name()}</td>
                                    <td>{d.name}</td>
                                    <td>{d.description}</td>
                                    <td>{d.version}</td>
                                    <td>{d.status}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="device-list__selected">
                <DeviceDetails session=session />
                <Button
                    variant="danger"
                    title="Delete selected device"
                    face=Signal::derive(move || {
                        lifecycle.face(LoadingPhase::OperationBusy, DELETE_LABEL)
                    })
                    disabled=Signal::derive(move || !idle.get() || !session.has_selection())
                    on_click=handle_delete
                />
            </div>

            <div class="device-list__create">
                <h3>"New device"</h3>
                {field("UUID", |d| d.uuid.clone(), |d, v| d.uuid = v)}
                <Select
                    label="Type"
                    value=Signal::derive(move || draft.with(|d| d.device_type.code().to_string()))
                    options=type_options
                    on_change=Callback::new(move |code: String| {
                        if let Some(t) = DeviceType::from_code(&code) {
                            draft.update(|d| d.device_type = t);
                        }
                    })
                    disabled=Signal::derive(move || !idle.get())
                />
                {field("Name", |d| d.name.clone(), |d, v| d.name = v)}
                {field("Description", |d| d.description.clone(), |d, v| d.description = v)}
                {field("Version", |d| d.version.clone(), |d, v| d.version = v)}
                {field("Status", |d| d.status.clone(), |d, v| d.status = v)}
                <Button
                    title="Create device"
                    face=Signal::derive(move || {
                        lifecycle.face(LoadingPhase::OperationBusy, CREATE_LABEL)
                    })
                    disabled=Signal::derive(move || !idle.get() || !draft.with(|d| d.is_complete()))
                    on_click=handle_create
                />
            </div>
        </section>
    }
}
