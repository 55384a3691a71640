// src/gui/app.rs
use std::{
    any::Any,
    error::Error,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, MutexGuard},
    thread,
};

use eframe::egui::{self, Color32, RichText};

use crate::{
    config::SyncOptions,
    core::net::HttpFetcher,
    file::FsStore,
    product::ProductInput,
    sync::{CatalogSync, SyncReport},
    Result as SyncResult,
};

use super::{
    form::{Preview, PREVIEW_ROWS, TEMPLATE},
    progress::GuiProgress,
};

const OK_GREEN: Color32 = Color32::from_rgb(0x15, 0x80, 0x3d);
const ERR_RED: Color32 = Color32::from_rgb(0xb9, 0x1c, 0x1c);

pub fn run(options: eframe::NativeOptions, sync: SyncOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Add Product to index.html",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(sync)))),
    )?;
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub ok: Option<bool>,
}

impl StatusLine {
    pub fn info<S: Into<String>>(text: S) -> Self { Self { text: text.into(), ok: None } }
    pub fn ok<S: Into<String>>(text: S) -> Self { Self { text: text.into(), ok: Some(true) } }
    pub fn error<S: Into<String>>(text: S) -> Self { Self { text: text.into(), ok: Some(false) } }
}

type Outcome = Arc<Mutex<Option<Result<SyncReport, String>>>>;

pub struct App {
    opts: SyncOptions,

    json_text: String,
    preview: Preview,

    // status/progress (worker writes here)
    status: Arc<Mutex<StatusLine>>,
    outcome: Outcome,
    running: bool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl App {
    pub fn new(opts: SyncOptions) -> Self {
        logf!("Init: document={}, images={}", opts.documents.primary.display(), opts.image.dir.display());
        Self {
            opts,
            json_text: s!(TEMPLATE),
            preview: Preview::from_text(TEMPLATE),
            status: Arc::new(Mutex::new(StatusLine::default())),
            outcome: Arc::new(Mutex::new(None)),
            running: false,
        }
    }

    fn status(&self, line: StatusLine) {
        *lock(&self.status) = line;
    }

    /// Validate, then run the sync on a worker so the window stays live.
    /// One run at a time; the button is disabled while `running`.
    fn add(&mut self, ctx: &egui::Context) {
        if self.running { return; }

        let record = match ProductInput::from_json(&self.json_text).and_then(ProductInput::validate) {
            Ok(r) => r,
            Err(e) => {
                self.status(StatusLine::error(e.to_string()));
                return;
            }
        };
        self.preview = Preview::from_text(&self.json_text);
        self.running = true;
        self.status(StatusLine::info("Working…"));
        logf!("UI: Add {:?}", record.title());

        let opts = self.opts.clone();
        let status = self.status.clone();
        let outcome = self.outcome.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let mut prog = GuiProgress::new(status, ctx.clone());
            let result = guarded(|| {
                HttpFetcher::new()
                    .and_then(|fetcher| CatalogSync::new(fetcher, FsStore, opts).add_product(record, Some(&mut prog)))
            });
            *lock(&outcome) = Some(result);
            ctx.request_repaint();
        });
    }

    /// Pick up a finished worker result, if any.
    fn poll_outcome(&mut self) {
        let Some(result) = lock(&self.outcome).take() else { return };
        self.running = false;
        match result {
            Ok(report) => {
                self.status(StatusLine::ok(format!("Added: {}", report.title)));
                self.json_text.clear();
                self.preview = Preview::from_text(&self.json_text);
            }
            Err(msg) => self.status(StatusLine::error(format!("Error: {msg}"))),
        }
    }
}

/// Run a sync job, turning a panic into an error message so the form
/// always gets an outcome back.
fn guarded<F>(job: F) -> Result<SyncReport, String>
where
    F: FnOnce() -> SyncResult<SyncReport>,
{
    match panic::catch_unwind(AssertUnwindSafe(job)) {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            loge!("Worker panicked: {}", msg);
            Err(format!("internal error: {msg}"))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s!(*s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        s!("unknown panic")
    }
}

fn draw_preview(ui: &mut egui::Ui, preview: &Preview) {
    for (label, key, link) in PREVIEW_ROWS {
        let value = preview.value(key);
        ui.horizontal_wrapped(|ui| {
            ui.label(format!("{label}:"));
            if value.is_empty() {
                ui.label("--");
            } else if link {
                ui.hyperlink_to(value, value);
            } else {
                ui.label(value);
            }
        });
    }
    let color = if preview.ok { OK_GREEN } else { ERR_RED };
    ui.label(RichText::new(&preview.message).color(color));
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_outcome();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Add Product");
            ui.separator();

            ui.label("Product JSON *");
            let editor = egui::TextEdit::multiline(&mut self.json_text)
                .code_editor()
                .desired_rows(9)
                .desired_width(f32::INFINITY);
            if ui.add(editor).changed() {
                self.preview = Preview::from_text(&self.json_text);
            }

            ui.separator();
            ui.strong("Parsed Preview");
            draw_preview(ui, &self.preview);

            ui.separator();
            let button = ui.add_enabled(!self.running, egui::Button::new("Add Product"));
            if button.clicked() {
                self.add(ctx);
            }

            let status = lock(&self.status).clone();
            match status.ok {
                Some(true) => ui.label(RichText::new(status.text).color(OK_GREEN)),
                Some(false) => ui.label(RichText::new(status.text).color(ERR_RED)),
                None => ui.label(status.text),
            };
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;

    #[test]
    fn guarded_passes_errors_through() {
        let out = guarded(|| Err(SyncError::Encode { message: s!("bad") }));
        assert_eq!(out.unwrap_err(), "image encode failed: bad");
    }

    #[test]
    fn guarded_turns_a_panic_into_an_outcome() {
        let out = guarded(|| panic!("worker blew up"));
        assert_eq!(out.unwrap_err(), "internal error: worker blew up");
    }

    #[test]
    fn failed_outcome_reenables_the_form() {
        let mut app = App::new(SyncOptions::default());
        app.running = true;
        *lock(&app.outcome) = Some(guarded(|| panic!("boom")));
        app.poll_outcome();
        assert!(!app.running);
        let status = lock(&app.status).clone();
        assert_eq!(status.ok, Some(false));
        assert!(status.text.contains("boom"));
    }
}
