//! Reconciliation of the displayed gallery with the persisted path list.
//!
//! The reconciler owns the ordered mapping from image path to display
//! handle. Every change of the key set is written through the
//! [`PathListRepository`]; updating an already displayed path only touches
//! its handle.

use crate::error::{AppError, Result};
use crate::image_loader::{ImageDecoder, RgbaDecoder};
use crate::image_record::{ImageRecord, ImageRecordFactory};
use crate::storage::PathListRepository;
use log::{debug, error, info, warn};
use rayon::prelude::*;

/// Presentation side of the gallery: owns whatever represents one image on
/// screen.
pub trait Presenter {
    type Handle;

    fn create(&mut self, record: ImageRecord) -> Self::Handle;
    fn update(&mut self, handle: &mut Self::Handle, record: ImageRecord);
    fn destroy(&mut self, handle: Self::Handle);
}

/// What an upsert did to the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// Summary of a refresh pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub kept: usize,
    pub dropped: Vec<String>,
}

/// Summary of a startup restore.
///
/// A failed save does not stop the restore: the images stay displayed and
/// the first write error is kept here for the caller to report.
#[derive(Debug, Default)]
pub struct InitReport {
    pub shown: usize,
    pub save_error: Option<AppError>,
}

/// Live path → display handle mapping, kept in insertion order.
pub struct GalleryReconciler<P: Presenter, R, D = RgbaDecoder> {
    entries: Vec<(String, P::Handle)>,
    presenter: P,
    store: R,
    factory: ImageRecordFactory<D>,
}

impl<P, R, D> GalleryReconciler<P, R, D>
where
    P: Presenter,
    R: PathListRepository,
    D: ImageDecoder,
{
    pub fn new(presenter: P, store: R, factory: ImageRecordFactory<D>) -> Self {
        Self {
            entries: Vec::new(),
            presenter,
            store,
            factory,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, path: &str) -> bool {
        self.position(path).is_some()
    }

    /// Current key set in insertion order.
    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|(path, _)| path.clone()).collect()
    }

    #[cfg(test)]
    pub fn handle(&self, path: &str) -> Option<&P::Handle> {
        self.position(path).map(|index| &self.entries[index].1)
    }

    #[cfg(test)]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    #[cfg(test)]
    pub fn store(&self) -> &R {
        &self.store
    }

    fn position(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == path)
    }

    /// Writes the current key set.
    fn persist(&self) -> Result<()> {
        let paths = self.paths();
        self.store.save_paths(&paths).inspect_err(|e| {
            error!(
                "Gallery holds {} items but they were not saved: {}",
                paths.len(),
                e
            )
        })
    }

    /// Inserts `record` or refreshes the handle already showing its path.
    ///
    /// Only an insertion is persisted. If that write fails the record stays
    /// displayed and the persistence error is returned.
    pub fn upsert(&mut self, record: ImageRecord) -> Result<Upsert> {
        let path = record.full_path().to_string();

        if let Some(index) = self.position(&path) {
            let (_, handle) = &mut self.entries[index];
            self.presenter.update(handle, record);
            info!("Updated item: {}", path);
            return Ok(Upsert::Updated);
        }

        let handle = self.presenter.create(record);
        self.entries.push((path.clone(), handle));
        info!("Spawned item: {}", path);
        self.persist()?;
        Ok(Upsert::Inserted)
    }

    /// Resolves `path` from disk and upserts the result.
    ///
    /// A path that can't be resolved leaves the mapping untouched.
    pub fn add_path(&mut self, path: &str) -> Result<Upsert> {
        let record = self.factory.build(path).inspect_err(|e| {
            warn!("Skipping image {}: {}", path, e);
        })?;
        self.upsert(record)
    }

    /// Removes `path` if it is displayed. Returns whether anything changed.
    pub fn remove(&mut self, path: &str) -> Result<bool> {
        let Some(index) = self.position(path) else {
            debug!("Nothing to remove for {}", path);
            return Ok(false);
        };

        let (_, handle) = self.entries.remove(index);
        self.presenter.destroy(handle);
        info!("Removed item: {}", path);
        self.persist()?;
        Ok(true)
    }

    /// Re-reads every displayed path from disk.
    ///
    /// All paths are resolved before the display is touched; paths that no
    /// longer resolve are dropped and the surviving key set is saved once.
    /// Nothing is written when every path still resolves.
    pub fn refresh(&mut self) -> Result<RefreshReport> {
        let paths = self.paths();
        let factory = &self.factory;
        let resolved: Vec<(String, Result<ImageRecord>)> = paths
            .into_par_iter()
            .map(|path| {
                let record = factory.build(&path);
                (path, record)
            })
            .collect();

        for (_, handle) in self.entries.drain(..) {
            self.presenter.destroy(handle);
        }

        let mut report = RefreshReport::default();
        for (path, record) in resolved {
            match record {
                Ok(record) => {
                    let handle = self.presenter.create(record);
                    self.entries.push((path, handle));
                    report.kept += 1;
                }
                Err(e) => {
                    warn!("Dropping {} on refresh: {}", path, e);
                    report.dropped.push(path);
                }
            }
        }

        info!(
            "Refreshed gallery: {} kept, {} dropped",
            report.kept,
            report.dropped.len()
        );
        if !report.dropped.is_empty() {
            self.persist()?;
        }
        Ok(report)
    }

    /// Loads the saved key set and displays every path that still resolves.
    ///
    /// Unresolvable paths are left out and disappear from the saved list on
    /// the next write. Only a failure to read the store aborts the restore.
    pub fn init(&mut self) -> Result<InitReport> {
        let Some(paths) = self.store.load_paths()? else {
            return Ok(InitReport::default());
        };

        let mut report = InitReport::default();
        for path in &paths {
            match self.add_path(path) {
                Ok(_) => report.shown += 1,
                Err(e @ AppError::PersistenceWrite { .. }) => {
                    report.shown += 1;
                    report.save_error.get_or_insert(e);
                }
                Err(_) => {}
            }
        }

        info!("Restored {} of {} saved images", report.shown, paths.len());
        Ok(report)
    }
}
