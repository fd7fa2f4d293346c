pub mod logs_dialog;
pub mod panel_component;

pub use logs_dialog::LogsDialog;
pub use panel_component::PanelComponent;
