//! Reusable UI components.

mod multimodal_input;
mod preview_attachment;

pub use multimodal_input::MultimodalInput;
pub use preview_attachment::{FileIcon, PreviewAttachment, PreviewBody, PreviewLayout};
