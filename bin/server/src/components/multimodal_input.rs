//! Message composer with file attachments.

use super::PreviewAttachment;
use crate::types::Attachment;
use leptos::prelude::*;

/// Text area, attachment picker and send control.
///
/// Picked files are previewed from local object URLs; nothing is uploaded.
#[component]
pub fn MultimodalInput() -> impl IntoView {
    let (text, set_text) = signal(String::new());
    let attachments = RwSignal::new(Vec::<Attachment>::new());
    let file_input = NodeRef::<leptos::html::Input>::new();

    let open_picker = move |_: leptos::ev::MouseEvent| {
        #[cfg(target_arch = "wasm32")]
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_files = move |ev: leptos::ev::Event| {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            else {
                return;
            };

            if let Some(files) = input.files() {
                let mut added = Vec::new();
                for index in 0..files.length() {
                    let Some(file) = files.get(index) else {
                        continue;
                    };
                    match web_sys::Url::create_object_url_with_blob(&file) {
                        Ok(url) => added.push(Attachment {
                            name: file.name(),
                            url,
                            content_type: file.type_(),
                        }),
                        Err(_) => leptos::logging::warn!("could not read {}", file.name()),
                    }
                }
                attachments.update(|list| list.extend(added));
            }

            // Lets the same file be picked again after removal.
            input.set_value("");
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = ev;
    };

    let remove_attachment = move |url: String| {
        attachments.update(|list| list.retain(|attachment| attachment.url != url));
        #[cfg(target_arch = "wasm32")]
        let _ = web_sys::Url::revoke_object_url(&url);
    };

    let send = move |_: leptos::ev::MouseEvent| {
        set_text.set(String::new());
        attachments.set(Vec::new());
    };

    let nothing_to_send =
        move || text.with(|t| t.trim().is_empty()) && attachments.with(Vec::is_empty);

    view! {
        <div class="multimodal-input">
            <input
                type="file"
                class="hidden-file-input"
                multiple=true
                accept=xyz_chat_core::accept_string()
                tabindex="-1"
                node_ref=file_input
                on:change=on_files
            />

            <Show when=move || attachments.with(|list| !list.is_empty())>
                <div class="attachments-preview" data-testid="attachments-preview">
                    <For
                        each=move || attachments.get()
                        key=|attachment| attachment.url.clone()
                        children=move |attachment: Attachment| {
                            let url = attachment.url.clone();
                            view! {
                                <PreviewAttachment
                                    attachment=attachment
                                    on_remove=Callback::new(move |_| remove_attachment(url.clone()))
                                />
                            }
                        }
                    />
                </div>
            </Show>

            <textarea
                data-testid="multimodal-input"
                placeholder="Send a message..."
                rows="2"
                prop:value=move || text.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
            ></textarea>

            <div class="composer-actions">
                <button
                    type="button"
                    class="attachments-button"
                    data-testid="attachments-button"
                    aria-label="Attach files"
                    on:click=open_picker
                >
                    "📎"
                </button>
                <button
                    type="button"
                    class="send-button"
                    data-testid="send-button"
                    disabled=nothing_to_send
                    on:click=send
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}
