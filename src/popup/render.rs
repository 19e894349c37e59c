//! Renderers that turn [`RenderCommand`]s into something visible.

use std::io::Write;

use super::RenderCommand;
use crate::language::display_name;

/// Applies render commands.  Owned by the popup consumer, so it only ever
/// runs on one task at a time.
pub trait PopupRenderer: Send {
    fn render(&mut self, command: &RenderCommand);
}

/// Text renderer for terminals and headless runs.
///
/// Write failures are logged and otherwise ignored.
pub struct ConsoleRenderer<W: Write + Send> {
    out: W,
}

impl ConsoleRenderer<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            log::warn!("render: console write failed: {e}");
        }
    }
}

impl<W: Write + Send> PopupRenderer for ConsoleRenderer<W> {
    fn render(&mut self, command: &RenderCommand) {
        log::debug!("render: {command:?}");
        match command {
            RenderCommand::Create { id, original_text } => {
                self.line(&format!("--- popup #{id} ---"));
                self.line(&format!("Original: {original_text}"));
            }
            RenderCommand::SetOriginal { text } => self.line(&format!("Original: {text}")),
            RenderCommand::SetLoading => self.line("Translation: (translating...)"),
            RenderCommand::SetReady {
                src_lang,
                tgt_lang,
                text,
            } => self.line(&format!(
                "Translation [{} -> {}]: {text}",
                display_name(src_lang),
                display_name(tgt_lang)
            )),
            RenderCommand::SetError { text } => self.line(&format!("Translation failed: {text}")),
            RenderCommand::Focus => {}
            RenderCommand::Close => self.line("--- popup closed ---"),
            RenderCommand::ShowInfo { message, .. } => {
                self.line(&format!("[Language Info] {message}"))
            }
        }
    }
}
