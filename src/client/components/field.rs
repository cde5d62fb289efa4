use dioxus::prelude::*;

use crate::{client::util::upload::first_attachment, form::ImageInput};

#[component]
pub fn TextField(
    label: String,
    value: String,
    error: Option<String>,
    #[props(default = "text")] input_type: &'static str,
    #[props(default)] multiline: bool,
    #[props(default)] rtl: bool,
    oninput: EventHandler<String>,
) -> Element {
    let input_class = if error.is_some() { "input-error" } else { "" };

    rsx!(
        label { class: "form-control w-full",
            span { class: "label-text", "{label}" }
            if multiline {
                textarea {
                    class: "textarea textarea-bordered {input_class}",
                    dir: if rtl { "rtl" } else { "ltr" },
                    value: "{value}",
                    oninput: move |evt| oninput.call(evt.value()),
                }
            } else {
                input {
                    class: "input input-bordered {input_class}",
                    r#type: input_type,
                    dir: if rtl { "rtl" } else { "ltr" },
                    value: "{value}",
                    oninput: move |evt| oninput.call(evt.value()),
                }
            }
            if let Some(error) = error {
                span { class: "label-text-alt text-error", "{error}" }
            }
        }
    )
}

#[component]
pub fn CheckboxField(label: String, checked: bool, onchange: EventHandler<bool>) -> Element {
    rsx!(
        label { class: "label cursor-pointer justify-start gap-2",
            input {
                r#type: "checkbox",
                class: "checkbox",
                checked,
                onchange: move |evt| onchange.call(evt.checked()),
            }
            span { class: "label-text", "{label}" }
        }
    )
}

/// Image picker with a preview and bilingual alt text.
#[component]
pub fn ImageField(
    label: String,
    image: ImageInput,
    error: Option<String>,
    on_change: EventHandler<ImageInput>,
) -> Element {
    let picked = image.clone();
    let alt_en = image.clone();
    let alt_ar = image.clone();

    rsx!(
        div { class: "flex flex-col gap-2",
            span { class: "label-text", "{label}" }
            div { class: "flex items-center gap-4",
                if let Some(file) = &image.file {
                    span { class: "badge badge-outline", "{file.file_name}" }
                } else if let Some(url) = &image.existing_url {
                    img { class: "w-20 h-20 object-cover rounded", src: "{url}", alt: "{image.alt_text_en}" }
                } else {
                    div { class: "w-20 h-20 rounded bg-base-200" }
                }
                input {
                    r#type: "file",
                    accept: "image/*",
                    class: "file-input file-input-bordered file-input-sm",
                    onchange: move |evt| {
                        let mut next = picked.clone();
                        async move {
                            if let Some(file) = first_attachment(&evt).await {
                                next.file = Some(file);
                                on_change.call(next);
                            }
                        }
                    },
                }
            }
            div { class: "grid grid-cols-2 gap-2",
                TextField {
                    label: "Alt text (EN)",
                    value: image.alt_text_en.clone(),
                    oninput: move |text| {
                        let mut next = alt_en.clone();
                        next.alt_text_en = text;
                        on_change.call(next);
                    },
                }
                TextField {
                    label: "Alt text (AR)",
                    value: image.alt_text_ar.clone(),
                    rtl: true,
                    oninput: move |text| {
                        let mut next = alt_ar.clone();
                        next.alt_text_ar = text;
                        on_change.call(next);
                    },
                }
            }
            if let Some(error) = error {
                span { class: "label-text-alt text-error", "{error}" }
            }
        }
    )
}
