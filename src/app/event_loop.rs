use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::CellEditor;

impl App {
    /// Load the table, then run the main event loop until quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded, the table has no body
    /// cells, or terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        let table = crate::grid::csv::load_table(&self.file_path, self.has_header)
            .with_context(|| format!("Failed to load {}", self.file_path.display()))?;
        let editor = CellEditor::attach(&table, self.options.clone())
            .with_context(|| format!("Cannot edit {}", self.file_path.display()))?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - gridcell requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(
            self.file_path.clone(),
            table,
            editor,
            (size.width, size.height),
        );
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        let result = execute!(stdout(), EnableMouseCapture, EnableFocusChange)
            .context("Failed to enable mouse and focus reporting")
            .and_then(|()| {
                // Terminals only report focus changes; the table starts focused.
                model = update(std::mem::take(&mut model), Message::FocusGained);
                Self::event_loop(&mut terminal, &mut model)
            });

        let _ = execute!(stdout(), DisableFocusChange, DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn dispatch(model: &mut Model, msg: Message) {
        tracing::trace!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg);
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    Self::dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        Self::dispatch(model, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
