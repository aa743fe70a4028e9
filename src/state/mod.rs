//! State management for the gallery application.

use crate::GalleryItem;
use crate::config::TICK_INTERVAL;
use crate::gallery::GalleryReconciler;
use crate::image_record::ImageRecordFactory;
use crate::picker::RfdPicker;
use crate::services::GalleryService;
use crate::storage::PathListStore;
use crate::ticker::ElapsedTimeTicker;
use crate::ui::SlintPresenter;
use chrono::Utc;
use slint::{Timer, TimerMode, VecModel};
use std::cell::RefCell;
use std::rc::Rc;

pub type Gallery = GalleryService<SlintPresenter, PathListStore>;

/// Application-wide state container.
///
/// Everything lives on the UI thread; handlers share it through `Rc`.
pub struct AppState {
    pub gallery: Rc<RefCell<Gallery>>,
    /// Rows shown by the list view.
    pub items: Rc<VecModel<GalleryItem>>,
    pub ticker: ElapsedTimeTicker,
    pub picker: RfdPicker,
    /// Drives the ticker; stops when dropped.
    tick_timer: Timer,
}

impl AppState {
    pub fn new(store: PathListStore) -> Self {
        let items = Rc::new(VecModel::<GalleryItem>::default());
        let ticker = ElapsedTimeTicker::new();
        let presenter = SlintPresenter::new(items.clone(), ticker.clone());
        let gallery = GalleryService::new(GalleryReconciler::new(
            presenter,
            store,
            ImageRecordFactory::rgba(),
        ));

        Self {
            gallery: Rc::new(RefCell::new(gallery)),
            items,
            ticker,
            picker: RfdPicker,
            tick_timer: Timer::default(),
        }
    }

    /// Starts the once-per-second tick feeding the elapsed-time labels.
    pub fn start_ticker(&self) {
        let ticker = self.ticker.clone();
        self.tick_timer
            .start(TimerMode::Repeated, TICK_INTERVAL, move || {
                ticker.tick(Utc::now())
            });
    }
}
