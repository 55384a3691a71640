// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use eframe::egui;

use super::app::StatusLine;
use crate::progress::Progress;

pub struct GuiProgress {
    status: Arc<Mutex<StatusLine>>,
    ctx: egui::Context,
    done: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<StatusLine>>, ctx: egui::Context) -> Self {
        Self { status, ctx, done: 0, total: 0 }
    }
    fn set_status(&self, line: StatusLine) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = line;
        self.ctx.request_repaint();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        let text = if self.total == 0 { s!(msg) } else { format!("{msg} ({}/{})", self.done, self.total) };
        self.set_status(StatusLine::info(text));
    }
    fn step_done(&mut self, step: usize) {
        self.done = step;
    }
}
