//! Attachment preview tile shown above the composer.

use crate::types::Attachment;
use leptos::prelude::*;
use xyz_chat_core::{FileCategory, classify};

const IMAGE_ALT_FALLBACK: &str = "An image attachment";

/// Icon drawn for non-image attachments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileIcon {
    Document,
    Code,
    Spreadsheet,
    Generic,
}

impl FileIcon {
    /// Picks the icon for a MIME type.
    ///
    /// Office formats get the spreadsheet icon only when the type names a
    /// spreadsheet or Excel; other office formats read as documents.
    #[must_use]
    pub fn for_content_type(content_type: &str) -> Self {
        match classify(content_type) {
            FileCategory::Document | FileCategory::Text => Self::Document,
            FileCategory::Code => Self::Code,
            FileCategory::Office => {
                if content_type.contains("spreadsheet") || content_type.contains("excel") {
                    Self::Spreadsheet
                } else {
                    Self::Document
                }
            }
            FileCategory::Image | FileCategory::Unknown => Self::Generic,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Code => "code",
            Self::Spreadsheet => "spreadsheet",
            Self::Generic => "generic",
        }
    }
}

/// Main body of the tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewBody {
    Image { src: String, alt: String },
    Icon(FileIcon),
}

/// Everything the tile renders, decided up front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewLayout {
    pub body: PreviewBody,
    pub show_loader: bool,
    pub show_remove: bool,
    pub caption: String,
}

impl PreviewLayout {
    #[must_use]
    pub fn new(attachment: &Attachment, is_uploading: bool, has_remove: bool) -> Self {
        let body = if attachment.content_type.starts_with("image") {
            let alt = if attachment.name.is_empty() {
                IMAGE_ALT_FALLBACK.to_string()
            } else {
                attachment.name.clone()
            };
            PreviewBody::Image {
                src: attachment.url.clone(),
                alt,
            }
        } else {
            PreviewBody::Icon(FileIcon::for_content_type(&attachment.content_type))
        };

        Self {
            body,
            show_loader: is_uploading,
            show_remove: has_remove && !is_uploading,
            caption: attachment.name.clone(),
        }
    }
}

/// Preview of a single attachment with an optional remove control.
#[component]
pub fn PreviewAttachment(
    attachment: Attachment,
    #[prop(optional)] is_uploading: bool,
    #[prop(optional, into)] on_remove: Option<Callback<()>>,
) -> impl IntoView {
    let layout = PreviewLayout::new(&attachment, is_uploading, on_remove.is_some());
    let remove = on_remove.filter(|_| layout.show_remove);
    let show_loader = layout.show_loader;
    let caption = layout.caption;

    let body = match layout.body {
        PreviewBody::Image { src, alt } => view! {
            <img class="preview-image" src=src alt=alt width="64" height="64"/>
        }
        .into_any(),
        PreviewBody::Icon(icon) => view! {
            <div class="preview-icon">
                <span class=format!("file-icon file-icon-{}", icon.as_str()) aria-hidden="true"></span>
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="preview-attachment" data-testid="input-attachment-preview">
            {body}
            {show_loader.then(|| view! {
                <div class="preview-loader" data-testid="input-attachment-loader">
                    <span class="spinner"></span>
                </div>
            })}
            {remove.map(|on_remove| view! {
                <button
                    type="button"
                    class="preview-remove"
                    aria-label="Remove attachment"
                    on:click=move |_| on_remove.run(())
                >
                    "×"
                </button>
            })}
            <div class="preview-caption" title=caption.clone()>{caption.clone()}</div>
        </div>
    }
}
