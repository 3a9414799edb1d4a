//! State and commands of one device panel.
//!
//! The device list is the single owner of `DeviceRecord`s; the selection is
//! just a uuid into it. Successful edits replace the record in the list, so
//! the list and the details view can never disagree.

use super::actions::{PanelConfig, ReadAction, ReadOp, WriteAction};
use super::api::DeviceClient;
use crate::shared::error::{ApiError, ApiResult};
use crate::shared::http::{GlooTransport, Transport};
use crate::shared::lifecycle::{Lifecycle, LoadingPhase};
use contracts::domain::a001_device::aggregate::{DeviceFilter, DeviceRecord};
use leptos::prelude::*;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DevicePanelState {
    pub devices: Vec<DeviceRecord>,
    /// uuid of the selected device
    pub selected: Option<String>,
    pub draft_name: String,
    pub draft_description: String,
    /// Rendered read results by action key
    pub readings: HashMap<&'static str, String>,
    /// Write buffers by action key
    pub targets: HashMap<&'static str, String>,
    /// Bumped by every selection change
    pub selection_epoch: u64,
}

impl DevicePanelState {
    pub fn selected_record(&self) -> Option<&DeviceRecord> {
        let uuid = self.selected.as_deref()?;
        self.devices.iter().find(|d| d.uuid == uuid)
    }

    /// Select by uuid (unknown uuids clear the selection) and reset drafts
    pub fn select(&mut self, uuid: Option<&str>) {
        let record = uuid.and_then(|u| self.devices.iter().find(|d| d.uuid == u));
        let (selected, name, description) = match record {
            Some(r) => (Some(r.uuid.clone()), r.name.clone(), r.description.clone()),
            None => (None, String::new(), String::new()),
        };
        self.selected = selected;
        self.draft_name = name;
        self.draft_description = description;
        self.readings.clear();
        self.selection_epoch += 1;
    }

    /// Full replace of the list; keeps the selection only if it survived
    pub fn replace_devices(&mut self, devices: Vec<DeviceRecord>) {
        self.devices = devices;
        let selected = self.selected.take();
        match selected.as_deref() {
            Some(uuid) if self.devices.iter().any(|d| d.uuid == uuid) => {
                self.selected = selected.clone();
                if let Some(record) = self.selected_record().cloned() {
                    self.draft_name = record.name;
                    self.draft_description = record.description;
                }
            }
            Some(_) => self.select(None),
            None => {}
        }
    }

    /// Replace the record `uuid` with `patch(record)`
    pub fn patch(&mut self, uuid: &str, patch: impl FnOnce(&DeviceRecord) -> DeviceRecord) {
        if let Some(slot) = self.devices.iter_mut().find(|d| d.uuid == uuid) {
            *slot = patch(slot);
        }
    }

    pub fn remove(&mut self, uuid: &str) {
        self.devices.retain(|d| d.uuid != uuid);
        if self.selected.as_deref() == Some(uuid) {
            self.select(None);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Description,
}

pub struct DeviceSession<T: 'static = GlooTransport> {
    filter: DeviceFilter,
    pub lifecycle: Lifecycle,
    state: RwSignal<DevicePanelState>,
    client: StoredValue<Rc<DeviceClient<T>>, LocalStorage>,
}

impl<T: 'static> Clone for DeviceSession<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for DeviceSession<T> {}

impl DeviceSession<GlooTransport> {
    pub fn new(filter: DeviceFilter) -> Self {
        Self::with_client(filter, DeviceClient::from_config(), Lifecycle::new())
    }
}

impl<T: Transport + 'static> DeviceSession<T> {
    pub fn with_client(filter: DeviceFilter, client: DeviceClient<T>, lifecycle: Lifecycle) -> Self {
        Self {
            filter,
            lifecycle,
            state: RwSignal::new(DevicePanelState::default()),
            client: StoredValue::new_local(Rc::new(client)),
        }
    }

    /// Seed write buffers with the initial values of a panel layout
    pub fn with_config(self, config: &PanelConfig) -> Self {
        self.state.update(|s| {
            for write in config.write_actions() {
                s.targets.insert(write.key, write.initial.clone());
            }
        });
        self
    }

    /// `None` once the panel has been unmounted
    fn client(&self) -> Option<Rc<DeviceClient<T>>> {
        self.client.try_get_value()
    }

    pub fn filter(&self) -> DeviceFilter {
        self.filter
    }

    pub fn state(&self) -> RwSignal<DevicePanelState> {
        self.state
    }

    // ------------------------------------------------------------------
    // tracked accessors for views
    // ------------------------------------------------------------------

    pub fn devices(&self) -> Vec<DeviceRecord> {
        self.state.with(|s| s.devices.clone())
    }

    pub fn selected_record(&self) -> Option<DeviceRecord> {
        self.state.with(|s| s.selected_record().cloned())
    }

    pub fn selected_uuid(&self) -> Option<String> {
        self.state.with(|s| s.selected.clone())
    }

    pub fn has_selection(&self) -> bool {
        self.state.with(|s| s.selected.is_some())
    }

    pub fn draft_name(&self) -> String {
        self.state.with(|s| s.draft_name.clone())
    }

    pub fn draft_description(&self) -> String {
        self.state.with(|s| s.draft_description.clone())
    }

    pub fn reading(&self, key: &str) -> Option<String> {
        self.state.with(|s| s.readings.get(key).cloned())
    }

    pub fn target(&self, key: &str) -> String {
        self.state
            .with(|s| s.targets.get(key).cloned())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // local edits
    // ------------------------------------------------------------------

    pub fn select(&self, uuid: Option<&str>) {
        self.state.update(|s| s.select(uuid));
    }

    /// Clicking the selected row again deselects it
    pub fn toggle_select(&self, uuid: &str) {
        self.state.update(|s| {
            if s.selected.as_deref() == Some(uuid) {
                s.select(None);
            } else {
                s.select(Some(uuid));
            }
        });
    }

    pub fn set_draft_name(&self, value: String) {
        self.state.update(|s| s.draft_name = value);
    }

    pub fn set_draft_description(&self, value: String) {
        self.state.update(|s| s.draft_description = value);
    }

    pub fn set_target(&self, key: &'static str, value: String) {
        self.state.update(|s| {
            s.targets.insert(key, value);
        });
    }

    fn selected_uuid_untracked(&self) -> Option<String> {
        self.state.with_untracked(|s| s.selected.clone())
    }

    fn require_selection(&self) -> Option<String> {
        let uuid = self.selected_uuid_untracked();
        if uuid.is_none() {
            self.lifecycle
                .set_error(&ApiError::validation("No device selected"));
        }
        uuid
    }

    // ------------------------------------------------------------------
    // backend commands
    // ------------------------------------------------------------------

    /// Re-fetch the list. `Lifecycle::begin` refuses overlapping fetches, so
    /// the response applied is always the latest one.
    pub async fn refresh(&self) {
        let Some(client) = self.client() else {
            return;
        };
        let filter = self.filter;
        let state = self.state;
        let fetched = self
            .lifecycle
            .run(LoadingPhase::ListLoading, async move {
                state.try_update(|s| s.readings.clear());
                client.list_devices(filter).await
            })
            .await;

        if let Some(devices) = fetched {
            log::debug!("Fetched {} devices ({})", devices.len(), filter.code());
            self.state.try_update(|s| s.replace_devices(devices));
        }
    }

    pub async fn commit_name(&self) {
        self.commit(Field::Name).await;
    }

    pub async fn commit_description(&self) {
        self.commit(Field::Description).await;
    }

    /// Persist one draft field; on success patch the record in place
    async fn commit(&self, field: Field) {
        let Some((uuid, stored, draft)) = self.state.with_untracked(|s| {
            let record = s.selected_record()?;
            let (stored, draft) = match field {
                Field::Name => (&record.name, &s.draft_name),
                Field::Description => (&record.description, &s.draft_description),
            };
            Some((record.uuid.clone(), stored.clone(), draft.trim().to_string()))
        }) else {
            return;
        };
        if draft == stored {
            return;
        }

        let Some(client) = self.client() else {
            return;
        };
        let (uuid_req, value) = (uuid.clone(), draft.clone());
        let saved = self
            .lifecycle
            .run(LoadingPhase::OperationBusy, async move {
                match field {
                    Field::Name => client.update_name(&uuid_req, &value).await,
                    Field::Description => client.update_description(&uuid_req, &value).await,
                }
            })
            .await;

        if saved.is_some() {
            self.state.try_update(|s| {
                s.patch(&uuid, |r| match field {
                    Field::Name => r.with_name(draft.clone()),
                    Field::Description => r.with_description(draft.clone()),
                });
                if s.selected.as_deref() == Some(uuid.as_str()) {
                    match field {
                        Field::Name => s.draft_name = draft,
                        Field::Description => s.draft_description = draft,
                    }
                }
            });
        }
    }

    /// Create a device, then re-fetch the list. Returns true on success.
    pub async fn create_device(&self, record: DeviceRecord) -> bool {
        let Some(client) = self.client() else {
            return false;
        };
        let created = self
            .lifecycle
            .run(LoadingPhase::OperationBusy, async move {
                client.create_device(&record).await
            })
            .await;
        if created.is_none() {
            return false;
        }
        self.refresh().await;
        true
    }

    /// Delete the selected device, clear the selection, re-fetch the list
    pub async fn delete_selected(&self) {
        let Some(uuid) = self.require_selection() else {
            return;
        };
        let Some(client) = self.client() else {
            return;
        };
        let target = uuid.clone();
        let deleted = self
            .lifecycle
            .run(LoadingPhase::OperationBusy, async move {
                client.delete_device(&target).await
            })
            .await;
        if deleted.is_none() {
            return;
        }
        log::info!("Deleted device {}", uuid);
        self.state.try_update(|s| s.remove(&uuid));
        self.refresh().await;
    }

    /// Run a read button. The result is shown only if the selection did
    /// not change while the request was in flight.
    pub async fn read(&self, action: &ReadAction) {
        let Some(record) = self.state.with_untracked(|s| s.selected_record().cloned()) else {
            self.lifecycle
                .set_error(&ApiError::validation("No device selected"));
            return;
        };
        let epoch = self.state.with_untracked(|s| s.selection_epoch);
        let Some(client) = self.client() else {
            return;
        };
        let op = action.op.clone();
        let value = self
            .lifecycle
            .run(LoadingPhase::OperationBusy, async move {
                read_op(&client, &record, &op).await
            })
            .await;

        let Some(raw) = value else {
            return;
        };
        let rendered = action.render_value(&raw);
        let key = action.key;
        self.state.try_update(|s| {
            if s.selection_epoch == epoch {
                s.readings.insert(key, rendered);
            } else {
                log::debug!("Discarding stale {} reading", key);
            }
        });
    }

    /// Run a write button with its buffered value. The buffer is kept.
    pub async fn write(&self, action: &WriteAction) {
        let Some(record) = self.state.with_untracked(|s| s.selected_record().cloned()) else {
            self.lifecycle
                .set_error(&ApiError::validation("No device selected"));
            return;
        };
        let value = self
            .state
            .with_untracked(|s| s.targets.get(action.key).cloned())
            .unwrap_or_default();
        let Some(client) = self.client() else {
            return;
        };
        let (operation, param) = (action.operation, action.param);
        self.lifecycle
            .run(LoadingPhase::OperationBusy, async move {
                client
                    .write_value(record.device_type, operation, &record.uuid, param, &value)
                    .await
            })
            .await;
    }
}

async fn read_op<T: Transport>(
    client: &DeviceClient<T>,
    record: &DeviceRecord,
    op: &ReadOp,
) -> ApiResult<String> {
    match op {
        ReadOp::Status => client.get_status(&record.uuid).await,
        ReadOp::Version => client.get_version(&record.uuid).await,
        ReadOp::Text { operation } => {
            client
                .read_text(record.device_type, operation, &record.uuid)
                .await
        }
        ReadOp::Number {
            operation,
            quantity,
        } => client
            .read_number(record.device_type, operation, &record.uuid, quantity)
            .await
            .map(|v| v.to_string()),
    }
}
