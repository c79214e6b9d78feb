//! Local image attachments.
//!
//! Picked files are read once and parked in an [`ImageArena`]. Everything else holds an
//! [`ImageRef`], a move-only handle. Releasing the handle (or disposing the arena) frees the
//! image; a released handle can no longer be resolved.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context as _;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use image::ImageFormat;

use crate::attachment_path::parse_attachment_path;
use crate::text_input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

/// Owning handle to an image in an [`ImageArena`]. Deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ImageRef {
    id: ImageId,
}

impl ImageRef {
    pub fn id(&self) -> ImageId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedImageFormat {
    Png,
    Jpeg,
    Other,
}

impl EncodedImageFormat {
    pub fn label(self) -> &'static str {
        match self {
            EncodedImageFormat::Png => "PNG",
            EncodedImageFormat::Jpeg => "JPEG",
            EncodedImageFormat::Other => "IMG",
        }
    }
}

impl From<ImageFormat> for EncodedImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => EncodedImageFormat::Png,
            ImageFormat::Jpeg => EncodedImageFormat::Jpeg,
            _ => EncodedImageFormat::Other,
        }
    }
}

#[derive(Debug)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub format: EncodedImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let reader = image::ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .context("failed to sniff image format")?;
        let format = reader
            .format()
            .with_context(|| format!("{} is not a recognized image", path.display()))?;
        let (width, height) = reader
            .into_dimensions()
            .with_context(|| format!("failed to decode {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            format: format.into(),
            width,
            height,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Default)]
pub struct ImageArena {
    images: HashMap<ImageId, ImageInfo>,
    next_id: u64,
}

impl ImageArena {
    pub fn insert(&mut self, info: ImageInfo) -> ImageRef {
        self.next_id += 1;
        let id = ImageId(self.next_id);
        self.images.insert(id, info);
        ImageRef { id }
    }

    pub fn get(&self, image: &ImageRef) -> Option<&ImageInfo> {
        self.images.get(&image.id)
    }

    /// Free one image. Returns `false` if it was already gone.
    pub fn release(&mut self, image: ImageRef) -> bool {
        self.images.remove(&image.id).is_some()
    }

    /// Free everything, returning how many images were still live.
    pub fn clear(&mut self) -> usize {
        let live = self.images.len();
        self.images.clear();
        live
    }

}

#[derive(Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still editing the path.
    Editing,
    /// Prompt dismissed without choosing anything.
    Cancelled,
    /// Enter pressed; `None` when the text was not a usable path.
    Submitted(Option<PathBuf>),
}

/// Terminal stand-in for a file chooser: an inline path prompt plus the arena that owns
/// every picked image.
#[derive(Debug, Default)]
pub struct AttachmentPicker {
    arena: ImageArena,
    prompt: Option<TextInput>,
}

impl AttachmentPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the chosen file. `None`, a missing file, or a file that is not a decodable image
    /// all mean nothing was chosen.
    pub fn pick(&mut self, path: Option<&Path>) -> Option<ImageRef> {
        let path = path?;
        match ImageInfo::load(path) {
            Ok(info) => {
                tracing::debug!(
                    path = %path.display(),
                    format = info.format.label(),
                    width = info.width,
                    height = info.height,
                    "image picked"
                );
                Some(self.arena.insert(info))
            }
            Err(err) => {
                tracing::debug!("ignoring attachment: {err:#}");
                None
            }
        }
    }

    pub fn release(&mut self, image: ImageRef) {
        let id = image.id();
        if !self.arena.release(image) {
            tracing::debug!(?id, "image already released");
        }
    }

    pub fn info(&self, image: &ImageRef) -> Option<&ImageInfo> {
        self.arena.get(image)
    }

    #[cfg(test)]
    pub fn live_images(&self) -> usize {
        self.arena.images.len()
    }

    /// Release every image and close the prompt. Returns how many images were freed.
    pub fn dispose(&mut self) -> usize {
        self.prompt = None;
        self.arena.clear()
    }

    pub fn open_prompt(&mut self) {
        self.prompt.get_or_insert_with(TextInput::new);
    }

    pub fn prompt(&self) -> Option<&TextInput> {
        self.prompt.as_ref()
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn paste_into_prompt(&mut self, pasted: &str) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.insert_str(pasted.trim());
        }
    }

    pub fn handle_prompt_key(&mut self, key_event: KeyEvent) -> PromptOutcome {
        let Some(prompt) = self.prompt.as_mut() else {
            return PromptOutcome::Cancelled;
        };
        if key_event.kind == KeyEventKind::Release {
            return PromptOutcome::Editing;
        }
        match key_event.code {
            KeyCode::Esc => {
                self.prompt = None;
                PromptOutcome::Cancelled
            }
            KeyCode::Enter => {
                let text = prompt.take();
                self.prompt = None;
                PromptOutcome::Submitted(parse_attachment_path(&text))
            }
            _ => {
                prompt.handle_key(key_event);
                PromptOutcome::Editing
            }
        }
    }
}
