//! Keeps a map surface in step with the session's map projection.
//!
//! `MapSync` owns at most one surface for its whole life. The surface is
//! created lazily once the host container has a non-zero size, markers are
//! replaced wholesale whenever the point set changes, and every viewport
//! change becomes a fly-to. Teardown (explicit or on drop) removes the
//! markers, destroys the surface and unregisters the resize listener.

mod surface;

use pdvmap_core::{PointOfSale, Viewport};

pub use surface::{ContainerSize, ListenerId, MapHost, MapSurface, Marker, SurfaceOptions};

/// What the map should show. Produced by the session, consumed here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapState {
    pub viewport: Viewport,
    pub points: Vec<PointOfSale>,
    /// Map is covered (location prompt open or no confirmed location).
    pub blurred: bool,
}

pub struct MapSync<H: MapHost> {
    host: H,
    options: SurfaceOptions,
    surface: Option<H::Surface>,
    listener: Option<ListenerId>,
    state: MapState,
    markers_pending: bool,
    frame_requested: bool,
    torn_down: bool,
}

impl<H: MapHost> MapSync<H> {
    #[must_use]
    pub fn new(host: H, options: SurfaceOptions, initial: MapState) -> Self {
        Self {
            host,
            options,
            surface: None,
            listener: None,
            state: initial,
            markers_pending: false,
            frame_requested: false,
            torn_down: false,
        }
    }

    /// Tries to create the surface. With a zero-size container this only
    /// schedules a retry on the next frame.
    pub fn mount(&mut self) {
        self.ensure_surface();
    }

    /// Next-frame callback requested through [`MapHost::request_frame`].
    pub fn on_frame(&mut self) {
        self.frame_requested = false;
        self.ensure_surface();
    }

    /// Applies a new projection.
    pub fn update(&mut self, next: MapState) {
        let previous = std::mem::replace(&mut self.state, next);
        if self.surface.is_none() {
            // Creation picks up the latest viewport and points.
            self.ensure_surface();
            return;
        }

        if previous.points != self.state.points {
            self.sync_markers();
        }
        if previous.viewport != self.state.viewport {
            let viewport = self.state.viewport;
            if let Some(surface) = self.surface.as_mut() {
                surface.fly_to(viewport);
            }
        }
        if previous.blurred && !self.state.blurred {
            if let Some(surface) = self.surface.as_mut() {
                surface.resize();
            }
        }
    }

    /// Replaces every marker with the current point set. Deferred until the
    /// surface exists and its style has loaded.
    pub fn sync_markers(&mut self) {
        match self.surface.as_mut() {
            Some(surface) if surface.is_style_loaded() => {
                let markers: Vec<Marker> = self.state.points.iter().map(Marker::from).collect();
                surface.replace_markers(&markers);
                self.markers_pending = false;
            }
            _ => self.markers_pending = true,
        }
    }

    /// Style-load event from the surface. Flushes deferred markers once and
    /// re-measures the container.
    pub fn on_style_loaded(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if self.markers_pending {
            let markers: Vec<Marker> = self.state.points.iter().map(Marker::from).collect();
            surface.replace_markers(&markers);
            self.markers_pending = false;
        }
        surface.resize();
    }

    /// Container or window resize.
    pub fn on_resize(&mut self) {
        match self.surface.as_mut() {
            Some(surface) => surface.resize(),
            None => self.ensure_surface(),
        }
    }

    /// Releases the surface and the resize listener. Idempotent; after this
    /// the sync never creates another surface.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        if let Some(mut surface) = self.surface.take() {
            surface.replace_markers(&[]);
            surface.destroy();
        }
        if let Some(id) = self.listener.take() {
            self.host.remove_resize_listener(id);
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn state(&self) -> &MapState {
        &self.state
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn ensure_surface(&mut self) {
        if self.surface.is_some() || self.torn_down {
            return;
        }

        let size = self.host.container_size();
        if size.is_empty() {
            if !self.frame_requested {
                tracing::debug!(?size, "map container has no size yet, deferring creation");
                self.host.request_frame();
                self.frame_requested = true;
            }
            return;
        }

        let surface = self.host.create_surface(&self.options, self.state.viewport);
        self.listener = Some(self.host.add_resize_listener());
        self.surface = Some(surface);
        tracing::debug!(?size, "map surface created");
        self.sync_markers();
    }
}

impl<H: MapHost> Drop for MapSync<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../map_sync_test.rs"]
mod tests;
