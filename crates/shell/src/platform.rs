//! Simulated camera for terminal use: the "barcode" is whatever was typed after `scan`.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use cataloger_entry::{Permission, ScanError, ScanPlatform};

#[derive(Debug, Default)]
pub struct TypedBarcode {
    granted: Cell<bool>,
    next: RefCell<Option<String>>,
}

impl TypedBarcode {
    /// Stage the payload the next decode returns.
    pub fn stage(&self, payload: Option<String>) {
        *self.next.borrow_mut() = payload;
    }
}

#[async_trait(?Send)]
impl ScanPlatform for TypedBarcode {
    type Image = Option<String>;

    fn has_camera_permission(&self) -> bool {
        self.granted.get()
    }

    async fn request_camera_permission(&self) -> Permission {
        self.granted.set(true);
        Permission::Granted
    }

    async fn capture_image(&self) -> Result<Option<String>, ScanError> {
        Ok(self.next.borrow_mut().take())
    }

    async fn decode(&self, image: Option<String>) -> Result<Vec<String>, ScanError> {
        Ok(image.into_iter().collect())
    }
}
