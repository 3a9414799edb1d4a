use crate::domain::a001_device::actions::{
    action_disabled, DeviceAction, ReadAction, WriteAction, WriteInput,
};
use crate::domain::a001_device::session::DeviceSession;
use crate::shared::components::ui::{Button, Input, Select};
use crate::shared::lifecycle::LoadingPhase;
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn ReadActionButton(session: DeviceSession, action: ReadAction) -> impl IntoView {
    let lifecycle = session.lifecycle;
    let key = action.key;
    let label = action.label;
    let action = StoredValue::new(action);

    let disabled = Signal::derive(move || {
        action_disabled(lifecycle.phase(), session.has_selection(), None)
    });
    let face = Signal::derive(move || {
        lifecycle.face(LoadingPhase::OperationBusy, label)
    });
    let on_click = Callback::new(move |_| {
        let action = action.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            session.read(&action).await;
        });
    });

    view! {
        <div class="device-action device-action--read">
            <Button face=face disabled=disabled on_click=on_click />
            <span class="device-action__value">
                {move || session.reading(key).unwrap_or_default()}
            </span>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn WriteActionControl(session: DeviceSession, action: WriteAction) -> impl IntoView {
    let lifecycle = session.lifecycle;
    let key = action.key;
    let label = action.label;
    let unit = action.unit;
    let input = action.input.clone();
    let action = StoredValue::new(action);

    let buffer = Signal::derive(move || session.target(key));
    let locked = Signal::derive(move || !lifecycle.is_idle() || !session.has_selection());
    let disabled = Signal::derive(move || {
        action_disabled(
            lifecycle.phase(),
            session.has_selection(),
            Some(buffer.get().as_str()),
        )
    });
    let face = Signal::derive(move || {
        lifecycle.face(LoadingPhase::OperationBusy, label)
    });
    let on_edit = Callback::new(move |v: String| session.set_target(key, v));
    let on_click = Callback::new(move |_| {
        let action = action.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            session.write(&action).await;
        });
    });

    let editor = match input {
        WriteInput::Choice(options) => view! {
            <Select value=buffer options=options on_change=on_edit disabled=locked />
        }
        .into_any(),
        WriteInput::Number => view! {
            <Input value=buffer input_type="number" on_input=on_edit disabled=locked />
        }
        .into_any(),
        WriteInput::Text => view! {
            <Input value=buffer on_input=on_edit disabled=locked />
        }
        .into_any(),
    };

    view! {
        <div class="device-action device-action--write">
            {editor}
            {unit.map(|u| view! { <span class="device-action__unit">{u}</span> })}
            <Button face=face disabled=disabled on_click=on_click />
        </div>
    }
}

/// One control per configured action
#[component]
#[allow(non_snake_case)]
pub fn DeviceActions(session: DeviceSession, actions: Vec<DeviceAction>) -> impl IntoView {
    actions
        .into_iter()
        .map(|action| match action {
            DeviceAction::Read(read) => {
                view! { <ReadActionButton session=session action=read /> }.into_any()
            }
            DeviceAction::Write(write) => {
                view! { <WriteActionControl session=session action=write /> }.into_any()
            }
        })
        .collect_view()
}
