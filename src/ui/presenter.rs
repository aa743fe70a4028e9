//! Slint side of the gallery: one `GalleryItem` row per displayed image.
//!
//! Every row subscribes to the shared ticker to refresh its elapsed-time
//! label. The subscription lives in the row's handle, so destroying the
//! handle stops the updates.

use crate::GalleryItem;
use crate::gallery::Presenter;
use crate::image_loader::DecodedImage;
use crate::image_record::ImageRecord;
use crate::ticker::{ElapsedTimeTicker, Subscription, format_elapsed};
use chrono::{DateTime, Utc};
use log::{debug, error};
use slint::{Image, Model, Rgba8Pixel, SharedPixelBuffer, SharedString, VecModel};
use std::cell::Cell;
use std::rc::Rc;

/// Display handle of one row.
pub struct ItemHandle {
    path: SharedString,
    /// Current position of the row in the model.
    row: Rc<Cell<usize>>,
    created_date: Rc<Cell<DateTime<Utc>>>,
    subscription: Subscription,
}

pub struct SlintPresenter {
    items: Rc<VecModel<GalleryItem>>,
    /// Row position cells in model order, shifted when a row is removed.
    rows: Vec<Rc<Cell<usize>>>,
    ticker: ElapsedTimeTicker,
}

impl SlintPresenter {
    pub fn new(items: Rc<VecModel<GalleryItem>>, ticker: ElapsedTimeTicker) -> Self {
        Self {
            items,
            rows: Vec::new(),
            ticker,
        }
    }
}

fn create_slint_image(image: &DecodedImage) -> Image {
    let buffer =
        SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(&image.data, image.width, image.height);
    Image::from_rgba8(buffer)
}

fn item_from_record(record: &ImageRecord, now: DateTime<Utc>) -> GalleryItem {
    let preview = record.image().map(create_slint_image);
    if preview.is_none() {
        error!(
            "Failed to display an image due to missing bitmap: {}",
            record.full_path()
        );
    }

    GalleryItem {
        path: record.full_path().into(),
        file_name: record.file_name().into(),
        elapsed: format_elapsed(record.created_date(), now).into(),
        has_preview: preview.is_some(),
        preview: preview.unwrap_or_default(),
    }
}

impl Presenter for SlintPresenter {
    type Handle = ItemHandle;

    fn create(&mut self, record: ImageRecord) -> ItemHandle {
        let item = item_from_record(&record, Utc::now());
        let path = item.path.clone();
        let created_date = Rc::new(Cell::new(record.created_date()));
        let row = Rc::new(Cell::new(self.items.row_count()));
        self.items.push(item);
        self.rows.push(row.clone());

        let items = Rc::downgrade(&self.items);
        let tick_row = row.clone();
        let tick_created = created_date.clone();
        let subscription = self.ticker.subscribe(move |now| {
            let Some(items) = items.upgrade() else {
                return;
            };
            let index = tick_row.get();
            if let Some(mut item) = items.row_data(index) {
                item.elapsed = format_elapsed(tick_created.get(), now).into();
                items.set_row_data(index, item);
            }
        });

        ItemHandle {
            path,
            row,
            created_date,
            subscription,
        }
    }

    fn update(&mut self, handle: &mut ItemHandle, record: ImageRecord) {
        handle.created_date.set(record.created_date());
        let index = handle.row.get();
        if index < self.items.row_count() {
            self.items
                .set_row_data(index, item_from_record(&record, Utc::now()));
        }
    }

    fn destroy(&mut self, handle: ItemHandle) {
        handle.subscription.cancel();

        let index = handle.row.get();
        if index < self.rows.len() {
            self.items.remove(index);
            self.rows.remove(index);
            for row in &self.rows[index..] {
                row.set(row.get() - 1);
            }
        }
        debug!(
            "Removed row {}, {} rows still ticking",
            handle.path,
            self.ticker.subscriber_count()
        );
    }
}
