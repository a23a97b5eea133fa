use crate::app::{App, Message, Model, ToastLevel};

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Message::Save = msg {
            Self::save(model);
        }
    }

    fn save(model: &mut Model) {
        match crate::grid::csv::save_table(&model.table, &model.file_path) {
            Ok(()) => {
                model.mark_saved();
                let name = model
                    .file_path
                    .file_name()
                    .map_or_else(|| "file".to_string(), |s| s.to_string_lossy().to_string());
                model.show_toast(ToastLevel::Info, format!("Saved {name}"));
            }
            Err(err) => {
                tracing::warn!(path = %model.file_path.display(), %err, "save failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
            }
        }
    }
}
