// src/sync.rs
use std::path::PathBuf;

use crate::{
    asset,
    config::SyncOptions,
    core::net::Fetch,
    error::{Result, SyncError},
    file::DocumentStore,
    patch,
    product::ProductRecord,
    progress::Progress,
    serialize,
};

const STEPS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncReport {
    pub title: String,
    pub image_path: String,
    pub position: usize,
    pub files_written: Vec<PathBuf>,
}

/// Both patches applied to `text` for `rec` (whose image is already local).
/// Returns the new text and the new item's position.
pub fn patch_document(text: &str, marker: &str, rec: &ProductRecord) -> Result<(String, usize)> {
    let existing = patch::structured_item_count(text)?;
    let forms = serialize::serialize(rec, existing)?;
    let text = patch::insert_script_entry(text, marker, &forms.entry)?;
    let text = patch::insert_structured_item(&text, &forms.item)?;
    Ok((text, forms.item.position))
}

/// Image → serialize → patch → persist, one product at a time.
pub struct CatalogSync<F: Fetch, S: DocumentStore> {
    fetcher: F,
    store: S,
    opts: SyncOptions,
}

impl<F: Fetch, S: DocumentStore> CatalogSync<F, S> {
    pub fn new(fetcher: F, store: S, opts: SyncOptions) -> Self {
        Self { fetcher, store, opts }
    }

    /// Add one product. Nothing touches the documents unless both patches
    /// succeed; the image file may already be written by then.
    pub fn add_product(
        &self,
        rec: ProductRecord,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<SyncReport> {
        if let Some(p) = progress.as_deref_mut() {
            p.begin(STEPS);
        }
        let result = self.run(rec, &mut progress);
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        match &result {
            Ok(report) => logf!("Added product: {}", report.title),
            Err(e) => loge!("Sync failed: {}", e),
        }
        result
    }

    fn run(&self, rec: ProductRecord, progress: &mut Option<&mut dyn Progress>) -> Result<SyncReport> {
        let mut say = |step: usize, msg: &str| {
            if let Some(p) = progress.as_deref_mut() {
                if step > 0 { p.step_done(step); }
                p.log(msg);
            }
        };

        // 1. image
        say(0, "Fetching image…");
        let image_path = asset::cache_image(&self.fetcher, &self.opts.image, rec.image(), rec.title())?;
        let rec = rec.with_image(image_path.clone());

        // 2. patch both regions in memory
        say(1, "Updating document…");
        let primary = &self.opts.documents.primary;
        let original = self.store.read(primary)?;
        let (updated, position) = patch_document(&original, &self.opts.marker, &rec)?;
        logd!("Patched {}: position {}, {} -> {} bytes", primary.display(), position, original.len(), updated.len());

        // 3-4. primary, then mirror; a mirror failure leaves the primary written
        let mut files_written = Vec::new();
        for (i, target) in self.opts.documents.targets().enumerate() {
            say(2 + i, if i == 0 { "Saving…" } else { "Mirroring…" });
            match self.store.write(target, &updated) {
                Ok(()) => files_written.push(target.to_path_buf()),
                Err(SyncError::Io { source, .. }) if !files_written.is_empty() => {
                    return Err(SyncError::PartialPersist {
                        written: primary.clone(),
                        failed: target.to_path_buf(),
                        source,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        say(STEPS, "Done");

        for p in &files_written {
            logf!("Wrote {}", p.display());
        }

        Ok(SyncReport { title: rec.title().to_string(), image_path, position, files_written })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductInput;

    const DOC: &str = r#"<script>
  const products = [
    // Add more products here over time
  ];
</script>
<script type="application/ld+json">
{"@type":"ItemList","numberOfItems":0,"itemListElement":[]}
</script>
"#;

    fn record(title: &str) -> ProductRecord {
        ProductInput {
            title: title.into(),
            url: "https://example.com/p".into(),
            image: "https://example.com/i.jpg".into(),
            alt: "alt".into(),
            description: "desc".into(),
        }
        .validate()
        .unwrap()
        .with_image(format!("images/{title}.webp"))
    }

    #[test]
    fn positions_run_one_to_n() {
        let marker = crate::config::consts::PRODUCTS_MARKER;
        let mut text = s!(DOC);
        for (i, title) in ["a", "b", "c", "d"].iter().enumerate() {
            let (next, position) = patch_document(&text, marker, &record(title)).unwrap();
            assert_eq!(position, i + 1);
            text = next;
        }
        assert_eq!(patch::structured_item_count(&text).unwrap(), 4);
        for n in 1..=4 {
            assert!(text.contains(&format!("\"position\": {n}")));
        }
        assert_eq!(text.matches("title: '").count(), 4);
    }

    #[test]
    fn patch_failure_leaves_nothing_half_done() {
        let marker = crate::config::consts::PRODUCTS_MARKER;
        let no_ld = DOC.replace("application/ld+json", "text/plain");
        assert!(matches!(
            patch_document(&no_ld, marker, &record("a")),
            Err(SyncError::AnchorNotFound { .. })
        ));
    }
}
