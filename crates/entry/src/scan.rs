//! Barcode ingestion.
//!
//! Camera permission, capture and decoding belong to the platform; this module wraps them
//! into one suspendable scan that yields a payload, nothing, or an error. Each attempt is
//! identified by a [`ScanTicket`] so the form can recognise (and drop) results that come
//! back after the dialog was dismissed.

use async_trait::async_trait;
use thiserror::Error;

use cataloger_core::SessionId;

/// Outcome of asking the platform for camera access.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Platform-side failures while scanning.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("image capture failed: {0}")]
    Capture(String),

    #[error("barcode decoding failed: {0}")]
    Decode(String),
}

/// Camera and decoder services supplied by the host platform.
///
/// All calls happen on the UI thread; the futures need not be `Send`.
#[async_trait(?Send)]
pub trait ScanPlatform {
    /// Opaque handle to a captured image.
    type Image: 'static;

    fn has_camera_permission(&self) -> bool;

    async fn request_camera_permission(&self) -> Permission;

    async fn capture_image(&self) -> Result<Self::Image, ScanError>;

    /// Decode every barcode visible in `image`, in the decoder's order.
    async fn decode(&self, image: Self::Image) -> Result<Vec<String>, ScanError>;
}

/// Where the form's scan state machine currently is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Idle,
    AwaitingPermission,
    Capturing,
    Decoding,
}

/// Identity of one scan attempt within one form session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ScanTicket {
    session: SessionId,
    attempt: u64,
}

impl ScanTicket {
    pub(crate) fn new(session: SessionId, attempt: u64) -> Self {
        Self { session, attempt }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }
}

/// Result of a scan attempt, addressed to the attempt that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDelivery {
    pub ticket: ScanTicket,
    /// `Ok(None)` when the image held no readable barcode.
    pub result: Result<Option<String>, ScanError>,
}

/// Response to the user's scan gesture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanStart {
    /// Capture may begin; deliver the result with this ticket.
    Ready(ScanTicket),
    /// No camera permission yet; ask the platform and wait for another gesture.
    PermissionRequired,
}

/// What applying a scan did to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Payload written into the scan target field.
    Delivered(String),
    /// No barcode found; form unchanged.
    Empty,
    /// Capture or decoding failed; form unchanged.
    Failed(ScanError),
    /// The attempt was stale or the form was closed; nothing happened.
    Dropped,
    /// Permission was missing and has now been asked for; scan again to capture.
    PermissionRequested(Permission),
}

/// Drives a [`ScanPlatform`] through capture and decode.
#[derive(Debug)]
pub struct BarcodeIngestor<P> {
    platform: P,
}

impl<P: ScanPlatform> BarcodeIngestor<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn has_permission(&self) -> bool {
        self.platform.has_camera_permission()
    }

    pub async fn request_permission(&self) -> Permission {
        let permission = self.platform.request_camera_permission().await;
        tracing::debug!(?permission, "camera permission request resolved");
        permission
    }

    pub async fn capture(&self) -> Result<P::Image, ScanError> {
        self.platform.capture_image().await.inspect_err(|e| {
            tracing::warn!(error = %e, "barcode capture failed");
        })
    }

    /// Decode `image` and keep the first non-blank payload.
    pub async fn decode_first(&self, image: P::Image) -> Result<Option<String>, ScanError> {
        let payloads = self.platform.decode(image).await.inspect_err(|e| {
            tracing::warn!(error = %e, "barcode decoding failed");
        })?;
        let found = payloads.len();
        let first = payloads
            .into_iter()
            .map(|p| p.trim().to_string())
            .find(|p| !p.is_empty());
        tracing::debug!(found, used = first.is_some(), "barcode decoded");
        Ok(first)
    }

    /// Capture then decode, without reporting intermediate phases.
    pub async fn scan(&self, ticket: ScanTicket) -> ScanDelivery {
        let result = match self.capture().await {
            Ok(image) => self.decode_first(image).await,
            Err(e) => Err(e),
        };
        ScanDelivery { ticket, result }
    }
}
