/// Everything a key press can ask the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Sync operations
    SyncProject,
    SyncContainers,

    // Panel lifecycle
    TogglePanel,

    // Locale list
    SelectNextLocale,
    SelectPreviousLocale,
    CycleLocale,
    ClearLocale,

    // Logs dialog
    ShowLogs(bool),
    LogsScrollUp,
    LogsScrollDown,

    // App control
    Quit,
    None,
}
