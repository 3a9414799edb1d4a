pub mod actions;
pub mod details;
pub mod list;
pub mod panel;
pub mod picker;

pub use list::DeviceList;
pub use panel::DevicePanel;
