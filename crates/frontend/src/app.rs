use crate::domain::a001_device::actions::PanelConfig;
use crate::domain::a001_device::ui::{DeviceList, DevicePanel};
use crate::domain::a002_log_entry::ui::list::LogViewer;
use contracts::enums::DeviceType;
use leptos::prelude::*;

/// Panels reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Devices,
    Device(DeviceType),
    Logs,
}

impl PanelKind {
    pub fn all() -> Vec<PanelKind> {
        std::iter::once(PanelKind::Devices)
            .chain(DeviceType::all().into_iter().map(PanelKind::Device))
            .chain(std::iter::once(PanelKind::Logs))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            PanelKind::Devices => "Devices",
            PanelKind::Device(t) => t.display_name(),
            PanelKind::Logs => "Logs",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let current = RwSignal::new(PanelKind::Devices);

    // Each switch builds a fresh panel; the previous one is disposed with its
    // spinner timer.
    let panel = move || match current.get() {
        PanelKind::Devices => view! { <DeviceList /> }.into_any(),
        PanelKind::Device(t) => view! { <DevicePanel config=PanelConfig::for_device(t) /> }.into_any(),
        PanelKind::Logs => view! { <LogViewer /> }.into_any(),
    };

    view! {
        <div class="app">
            <nav class="app__nav">
                {PanelKind::all()
                    .into_iter()
                    .map(|kind| view! {
                        <button
                            type="button"
                            class=move || if current.get() == kind { "nav__item nav__item--active" } else { "nav__item" }
                            on:click=move |_| current.set(kind)
                        >
                            {kind.label()}
                        </button>
                    })
                    .collect_view()}
            </nav>
            <main class="app__content">{panel}</main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_order() {
        let labels: Vec<_> = PanelKind::all().iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Devices",
                "Temperature Sensor",
                "Pressure Sensor",
                "Humidity Sensor",
                "DC Motor",
                "Stepper Motor",
                "Logs",
            ]
        );
    }
}
