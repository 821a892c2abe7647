use super::{Marker, MarkerCommands, MarkerKey};
use crate::surface::{RenderSurface, SurfaceError};
use std::collections::HashMap;
use tracing::debug;

/// Markers currently on the surface, keyed by identity, with their handles
#[derive(Debug)]
pub struct MarkerLayer<H> {
    rendered: HashMap<MarkerKey, Marker>,
    handles: HashMap<MarkerKey, H>,
}

impl<H> MarkerLayer<H> {
    pub fn new() -> Self {
        Self {
            rendered: HashMap::new(),
            handles: HashMap::new(),
        }
    }

    pub fn rendered(&self) -> &HashMap<MarkerKey, Marker> {
        &self.rendered
    }

    pub fn get(&self, key: &MarkerKey) -> Option<&Marker> {
        self.rendered.get(key)
    }

    pub fn len(&self) -> usize {
        self.rendered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    /// Apply one pass's commands, all or nothing.
    ///
    /// Creation is the only step that can fail; if any create fails, markers
    /// created so far are removed again and the layer is left untouched.
    pub fn apply<'p, P, S, F>(
        &mut self,
        commands: MarkerCommands,
        surface: &mut S,
        payload: F,
    ) -> Result<(), SurfaceError>
    where
        P: 'p,
        S: RenderSurface<P, Handle = H>,
        F: Fn(&Marker) -> Option<&'p P>,
    {
        let mut created = Vec::with_capacity(commands.to_create.len());
        for marker in &commands.to_create {
            match surface.create_marker(marker, payload(marker)) {
                Ok(handle) => created.push(handle),
                Err(err) => {
                    debug!(key = %marker.key, rolled_back = created.len(), "marker creation failed");
                    for handle in created {
                        surface.remove_marker(handle);
                    }
                    return Err(err);
                }
            }
        }

        for key in &commands.to_remove {
            self.rendered.remove(key);
            if let Some(handle) = self.handles.remove(key) {
                surface.remove_marker(handle);
            }
        }

        for (marker, handle) in commands.to_create.into_iter().zip(created) {
            self.handles.insert(marker.key.clone(), handle);
            self.rendered.insert(marker.key.clone(), marker);
        }

        for recolor in &commands.to_recolor {
            if let (Some(marker), Some(handle)) =
                (self.rendered.get_mut(&recolor.key), self.handles.get(&recolor.key))
            {
                surface.recolor_marker(handle, recolor.to);
                marker.highlight = recolor.to;
            }
        }

        Ok(())
    }

    /// Remove every marker, e.g. when the map unmounts
    pub fn clear<P, S>(&mut self, surface: &mut S)
    where
        S: RenderSurface<P, Handle = H>,
    {
        self.rendered.clear();
        for (_, handle) in self.handles.drain() {
            surface.remove_marker(handle);
        }
    }
}

impl<H> Default for MarkerLayer<H> {
    fn default() -> Self {
        Self::new()
    }
}
