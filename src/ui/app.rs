use anyhow::Result;

use crate::controller::{Completion, Controller, Phase, Request};
use crate::models::{Transaction, TransactionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) status_is_error: bool,
    pub(crate) show_help: bool,

    pub(crate) controller: Controller,

    // List cursor
    pub(crate) cursor: usize,
    pub(crate) scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,

    /// Requests produced by intents, executed by the run loop.
    outbox: Vec<Request>,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            status_is_error: false,
            show_help: false,

            controller: Controller::new(),

            cursor: 0,
            scroll: 0,

            visible_rows: 20,

            outbox: Vec::new(),
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_is_error = false;
    }

    pub(crate) fn set_error(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.status_is_error = true;
    }

    fn submit(&mut self, request: Request) {
        self.outbox.push(request);
    }

    pub(crate) fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn visible(&self) -> &[Transaction] {
        &self.controller.state().visible
    }

    pub(crate) fn cursor_transaction(&self) -> Option<&Transaction> {
        self.visible().get(self.cursor)
    }

    pub(crate) fn detail_open(&self) -> bool {
        self.controller.phase() != Phase::Idle
    }

    // ── Intents ───────────────────────────────────────────────

    pub(crate) fn reload(&mut self) {
        let request = self.controller.load();
        self.submit(request);
        self.set_status("Loading transactions…");
    }

    pub(crate) fn edit_query(&mut self, text: String) {
        self.controller.set_filter_query(text);
    }

    pub(crate) fn apply_filter(&mut self) {
        self.controller.apply_filter();
        self.cursor = 0;
        self.scroll = 0;
        let query = self.controller.state().filter_query.trim().to_string();
        if query.is_empty() {
            self.set_status("");
        } else {
            let count = self.visible().len();
            self.set_status(format!(
                "{count} match{} for '{query}'",
                if count == 1 { "" } else { "es" }
            ));
        }
    }

    pub(crate) fn clear_filter(&mut self) {
        self.controller.clear_filter();
        self.clamp_cursor();
        self.set_status("Filter cleared");
    }

    pub(crate) fn see(&mut self, id: TransactionId) -> Result<()> {
        let request = self.controller.select(id)?;
        self.submit(request);
        Ok(())
    }

    pub(crate) fn see_cursor(&mut self) -> Result<()> {
        match self.cursor_transaction().map(|t| t.id) {
            Some(id) => self.see(id),
            None => {
                self.set_status("No transaction selected");
                Ok(())
            }
        }
    }

    pub(crate) fn toggle(&mut self, id: TransactionId) -> Result<()> {
        let request = self.controller.toggle_internal(id)?;
        if let Request::SetInternal { internal, .. } = request {
            self.set_status(if internal {
                format!("#{id} marked as internal transfer")
            } else {
                format!("#{id} marked as external transaction")
            });
        }
        self.submit(request);
        Ok(())
    }

    pub(crate) fn toggle_cursor(&mut self) -> Result<()> {
        match self.cursor_transaction().map(|t| t.id) {
            Some(id) => self.toggle(id),
            None => Ok(()),
        }
    }

    pub(crate) fn show_next(&mut self) {
        if let Some(request) = self.controller.select_next() {
            self.submit(request);
        }
    }

    pub(crate) fn close_detail(&mut self) {
        self.controller.close_selection();
    }

    // ── Completions ───────────────────────────────────────────

    pub(crate) fn apply_completion(&mut self, completion: Completion) {
        let was_loading = self.controller.is_loading();
        self.controller.complete(completion);
        self.clamp_cursor();

        if let Some(err) = self.controller.take_error() {
            self.set_error(err.to_string());
        } else if was_loading && !self.controller.is_loading() {
            let count = self.controller.state().all.len();
            self.set_status(format!("Loaded {count} transactions"));
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
            self.scroll = 0;
            return;
        }
        if self.cursor >= len {
            self.cursor = len - 1;
        }
        if self.scroll > self.cursor {
            self.scroll = self.cursor;
        }
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
