use crate::domain::a002_log_entry::session::LogSession;
use crate::shared::components::ui::{Button, Input};
use crate::shared::lifecycle::LoadingPhase;
use contracts::domain::a002_log_entry::aggregate::{LogEntry, LOG_TIME_FORMAT};
use leptos::prelude::*;

#[component]
#[allow(non_snake_case)]
pub fn LogViewer() -> impl IntoView {
    let session = LogSession::new();
    let lifecycle = session.lifecycle;
    let state = session.state();

    let fetch = move || {
        wasm_bindgen_futures::spawn_local(async move {
            session.refresh().await;
        });
    };
    fetch();

    let locked = Signal::derive(move || !lifecycle.is_idle());

    let handle_create = Callback::new(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            session.create().await;
        });
    });

    view! {
        <section class="panel log-viewer">
            <div class="panel__header">
                <h2 class="panel__title">"Logs"</h2>
            </div>

            {move || lifecycle.error().map(|e| view! { <div class="error">{e}</div> })}

            <div class="log-viewer__filter">
                <Input
                    label="From"
                    input_type="datetime-local"
                    value=Signal::derive(move || state.with(|s| s.start_time.clone()))
                    on_input=Callback::new(move |v| session.set_start_time(v))
                    disabled=locked
                />
                <Input
                    label="To"
                    input_type="datetime-local"
                    value=Signal::derive(move || state.with(|s| s.end_time.clone()))
                    on_input=Callback::new(move |v| session.set_end_time(v))
                    disabled=locked
                />
                <Button
                    variant="icon"
                    title="Fetch logs"
                    face=Signal::derive(move || {
                        lifecycle.face(LoadingPhase::ListLoading, "⟳")
                    })
                    disabled=locked
                    on_click=Callback::new(move |_| fetch())
                />
            </div>

            <table class="table">
                <thead>
                    <tr>
                        <th>"Time"</th>
                        <th>"User"</th>
                        <th>"Device"</th>
                        <th>"Action"</th>
                        <th>"Description"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || state.with(|s| s.entries.clone())
                        key=|e: &LogEntry| e.uuid
                        children=move |e: LogEntry| view! {
                            <tr class="table__row">
                                <td>{e.timestamp.format(LOG_TIME_FORMAT).to_string()}</td>
                                <td>{e.user}</td>
                                <td>{e.device_uuid}</td>
                                <td>{e.action}</td>
                                <td>{e.description}</td>
                            </tr>
                        }
                    />
                </tbody>
            </table>

            <div class="log-viewer__create">
                <Input
                    label="Action"
                    value=Signal::derive(move || state.with(|s| s.new_entry.action.clone()))
                    on_input=Callback::new(move |v| session.set_action(v))
                    disabled=locked
                />
                <Input
                    label="Description"
                    value=Signal::derive(move || state.with(|s| s.new_entry.description.clone()))
                    on_input=Callback::new(move |v| session.set_description(v))
                    disabled=locked
                />
                <Button
                    title="Add log entry"
                    face=Signal::derive(move || {
                        lifecycle.face(LoadingPhase::OperationBusy, "+")
                    })
                    disabled=Signal::derive(move || locked.get() || !session.can_create())
                    on_click=handle_create
                />
            </div>
        </section>
    }
}
