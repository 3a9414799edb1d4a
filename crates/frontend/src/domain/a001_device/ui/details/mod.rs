use crate::domain::a001_device::session::DeviceSession;
use crate::shared::components::ui::Input;
use leptos::prelude::*;

/// Name/description editor for the selected device.
///
/// Edits stay local until the field is left or Enter is pressed.
#[component]
#[allow(non_snake_case)]
pub fn DeviceDetails(session: DeviceSession) -> impl IntoView {
    let lifecycle = session.lifecycle;
    let locked = Signal::derive(move || !lifecycle.is_idle() || !session.has_selection());

    let commit_name = Callback::new(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            session.commit_name().await;
        });
    });
    let commit_description = Callback::new(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            session.commit_description().await;
        });
    });

    view! {
        <div class="device-details">
            <Input
                label="Name"
                value=Signal::derive(move || session.draft_name())
                on_input=Callback::new(move |v| session.set_draft_name(v))
                on_commit=commit_name
                disabled=locked
            />
            <Input
                label="Description"
                value=Signal::derive(move || session.draft_description())
                on_input=Callback::new(move |v| session.set_draft_description(v))
                on_commit=commit_description
                disabled=locked
            />
            {move || session.selected_record().map(|d| view! {
                <dl class="device-details__meta">
                    <dt>"UUID"</dt><dd>{d.uuid}</dd>
                    <dt>"Version"</dt><dd>{d.version}</dd>
                    <dt>"Status"</dt><dd>{d.status}</dd>
                </dl>
            })}
        </div>
    }
}
