use std::path::Path;

use crate::{
    error::{SceneError, SceneResult},
    resources::{ImageDecoder, TextureDevice, TextureId},
};

/// Texture units available to the scene shader.
pub const MAX_TEXTURE_UNITS: usize = 16;

#[derive(Clone, Debug, PartialEq)]
pub struct TextureEntry {
    pub tag: String,
    pub id: TextureId,
}

/// Tagged textures in registration order.
///
/// The entry at index `i` is bound to texture unit `i` by
/// [`bind_all`](Self::bind_all), so the registry holds at most
/// [`MAX_TEXTURE_UNITS`] entries. Units are never reused within a session.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    bound_units: usize,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `path`, upload it and register it under `tag`.
    ///
    /// Fails without registering anything when the image cannot be decoded,
    /// does not have 3 or 4 channels, the tag is taken, or every texture unit
    /// is in use.
    pub fn load(
        &mut self,
        device: &mut impl TextureDevice,
        decoder: &impl ImageDecoder,
        path: &Path,
        tag: &str,
    ) -> SceneResult<TextureId> {
        if self.entries.iter().any(|entry| entry.tag == tag) {
            return Err(SceneError::DuplicateTexture(tag.to_string()));
        }
        if self.entries.len() >= MAX_TEXTURE_UNITS {
            return Err(SceneError::TextureUnitsExhausted(MAX_TEXTURE_UNITS));
        }

        let image = decoder.decode(path).inspect_err(|e| log::error!("{e}"))?;
        if image.channels != 3 && image.channels != 4 {
            let err = SceneError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels: image.channels,
            };
            log::error!("{err}");
            return Err(err);
        }
        log::info!(
            "loaded image {:?}, width: {}, height: {}, channels: {}",
            path,
            image.width,
            image.height,
            image.channels
        );

        let id = device.create_texture(&image, tag)?;
        // `image` is dropped here; only the GPU copy is kept.
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            id,
        });
        Ok(id)
    }

    /// Bind every registered texture to the unit matching its position.
    pub fn bind_all(&mut self, device: &mut impl TextureDevice) {
        for (unit, entry) in self.entries.iter().enumerate() {
            device.bind_unit(unit, entry.id);
        }
        self.bound_units = self.entries.len();
    }

    pub fn find_id(&self, tag: &str) -> SceneResult<TextureId> {
        self.position(tag).map(|unit| self.entries[unit].id)
    }

    /// Texture unit the texture tagged `tag` is (or will be) bound to.
    pub fn find_slot(&self, tag: &str) -> SceneResult<usize> {
        self.position(tag)
    }

    /// Like [`find_slot`](Self::find_slot), but also requires that
    /// [`bind_all`](Self::bind_all) has run since the texture was registered.
    pub fn bound_slot(&self, tag: &str) -> SceneResult<usize> {
        let unit = self.position(tag)?;
        if unit >= self.bound_units {
            return Err(SceneError::TextureNotBound {
                tag: tag.to_string(),
                unit,
            });
        }
        Ok(unit)
    }

    /// Release every texture and forget all tags.
    pub fn teardown(&mut self, device: &mut impl TextureDevice) {
        for entry in self.entries.drain(..) {
            device.destroy_texture(entry.id);
        }
        self.bound_units = 0;
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, tag: &str) -> SceneResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.tag == tag)
            .ok_or_else(|| SceneError::TextureNotFound(tag.to_string()))
    }
}
