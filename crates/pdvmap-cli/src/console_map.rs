//! A map host that renders to the terminal.
//!
//! There is no tile rendering; the surface prints each camera move and
//! marker set so the synchronisation can be followed from the command line.

use pdvmap_core::Viewport;
use pdvmap_locator::{ContainerSize, ListenerId, MapHost, MapSurface, Marker, SurfaceOptions};

pub(crate) struct ConsoleHost {
    size: ContainerSize,
    next_listener: u64,
}

impl ConsoleHost {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            size: ContainerSize::new(width, height),
            next_listener: 0,
        }
    }
}

impl MapHost for ConsoleHost {
    type Surface = ConsoleSurface;

    fn container_size(&self) -> ContainerSize {
        self.size
    }

    fn create_surface(&mut self, options: &SurfaceOptions, viewport: Viewport) -> ConsoleSurface {
        tracing::debug!(style = %options.style, "creating console map surface");
        println!(
            "map: {}x{} centred on {} (zoom {})",
            self.size.width,
            self.size.height,
            viewport.center.display_fallback(),
            viewport.zoom
        );
        ConsoleSurface { marker_count: 0 }
    }

    fn request_frame(&mut self) {
        // The terminal never resizes; a zero-size container stays empty.
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        ListenerId(self.next_listener)
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        tracing::debug!(listener = id.0, "resize listener removed");
    }
}

pub(crate) struct ConsoleSurface {
    marker_count: usize,
}

impl MapSurface for ConsoleSurface {
    fn is_style_loaded(&self) -> bool {
        true
    }

    fn fly_to(&mut self, viewport: Viewport) {
        println!(
            "map: fly to {} (zoom {})",
            viewport.center.display_fallback(),
            viewport.zoom
        );
    }

    fn replace_markers(&mut self, markers: &[Marker]) {
        if self.marker_count == 0 && markers.is_empty() {
            return;
        }
        self.marker_count = markers.len();
        println!("map: {} markers", markers.len());
        for marker in markers {
            println!(
                "  [{}] {}",
                marker.coordinates.display_fallback(),
                marker.popup.replace('\n', " | ")
            );
        }
    }

    fn resize(&mut self) {}

    fn destroy(&mut self) {
        tracing::debug!("console map surface destroyed");
    }
}
