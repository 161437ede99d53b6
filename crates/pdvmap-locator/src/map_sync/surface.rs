//! Seams between [`super::MapSync`] and a concrete map renderer.

use pdvmap_core::{Coordinates, PointOfSale, Viewport};

/// Pixel size of the element the map is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
}

impl ContainerSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A container with either dimension at zero cannot host a map yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One placed marker with its popup body.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub coordinates: Coordinates,
    pub popup: String,
}

impl From<&PointOfSale> for Marker {
    fn from(pdv: &PointOfSale) -> Self {
        Self {
            id: pdv.id.clone(),
            coordinates: pdv.coordinates,
            popup: pdv.popup_text(),
        }
    }
}

/// Handed to [`MapHost::create_surface`]. The access token comes from
/// configuration at runtime.
#[derive(Clone, Default)]
pub struct SurfaceOptions {
    pub style: String,
    pub access_token: Option<String>,
}

impl std::fmt::Debug for SurfaceOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceOptions")
            .field("style", &self.style)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// Handle for a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// A live map instance.
pub trait MapSurface {
    /// Whether the style has finished loading. Markers added before that
    /// point would be lost.
    fn is_style_loaded(&self) -> bool;

    /// Animated move to `viewport`.
    fn fly_to(&mut self, viewport: Viewport);

    /// Removes every marker on the surface and places `markers`.
    fn replace_markers(&mut self, markers: &[Marker]);

    /// Re-measures the container.
    fn resize(&mut self);

    /// Releases the instance. Called exactly once.
    fn destroy(&mut self);
}

/// The environment that owns the container and creates surfaces in it.
pub trait MapHost {
    type Surface: MapSurface;

    fn container_size(&self) -> ContainerSize;

    /// Creates a surface initially showing `viewport`.
    fn create_surface(&mut self, options: &SurfaceOptions, viewport: Viewport) -> Self::Surface;

    /// Asks for [`super::MapSync::on_frame`] to be called on the next frame.
    fn request_frame(&mut self);

    /// Starts delivering container and window resizes to
    /// [`super::MapSync::on_resize`].
    fn add_resize_listener(&mut self) -> ListenerId;

    fn remove_resize_listener(&mut self, id: ListenerId);
}
