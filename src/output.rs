//! Console rendering of settings and note listings

use crate::config::{Settings, SettingsFile};
use crate::scheduler::SchedulerState;
use crate::vault::DocumentHandle;

fn describe_state(state: SchedulerState) -> String {
    match state {
        SchedulerState::Stopped => "stopped".to_string(),
        SchedulerState::Running { interval_secs } => format!("running every {interval_secs}s"),
    }
}

pub(crate) fn settings_text(
    settings: &Settings,
    file: &SettingsFile,
    state: Option<SchedulerState>,
) -> String {
    let note = if settings.has_note() {
        settings.note_path.as_str()
    } else {
        "(not set)"
    };
    let timezone = settings.timezone.as_deref().unwrap_or("local");

    let mut lines = vec![
        format!("Note:      {note}"),
        format!("Format:    {}", settings.format),
        format!("Interval:  {}s", settings.update_interval_seconds),
        format!("Timezone:  {timezone}"),
        format!("Settings:  {}", file.path().display()),
    ];
    if let Some(state) = state {
        lines.push(format!("Updater:   {}", describe_state(state)));
    }
    lines.join("\n")
}

pub(crate) fn settings_json(settings: &Settings, file: &SettingsFile) -> String {
    let value = serde_json::json!({
        "notePath": settings.note_path,
        "format": settings.format,
        "updateIntervalSeconds": settings.update_interval_seconds,
        "timezone": settings.timezone,
        "settingsFile": file.path().display().to_string(),
    });
    format!("{value:#}")
}

pub(crate) fn documents_text(docs: &[DocumentHandle], selected: &str) -> String {
    if docs.is_empty() {
        return "No notes found.".to_string();
    }
    docs.iter()
        .map(|doc| {
            let marker = if doc.path == selected { '*' } else { ' ' };
            format!("{marker} {}", doc.path)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn documents_json(docs: &[DocumentHandle]) -> String {
    let paths: Vec<&str> = docs.iter().map(|doc| doc.path.as_str()).collect();
    format!("{:#}", serde_json::json!(paths))
}
