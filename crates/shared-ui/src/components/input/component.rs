use dioxus::prelude::*;

/// Text input. `name` identifies the field to `on_input` handlers that serve
/// more than one input.
#[component]
pub fn Input(
    #[props(default)] value: String,
    #[props(default)] on_input: EventHandler<FormEvent>,
    #[props(default)] placeholder: String,
    #[props(default)] name: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default = "off".to_string())] autocomplete: String,
    #[props(default = false)] disabled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "input", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "input-wrapper",
            input {
                r#type: "{input_type}",
                name: "{name}",
                value: value,
                placeholder: placeholder,
                autocomplete: autocomplete,
                disabled: disabled,
                oninput: move |evt| on_input.call(evt),
                ..merged,
            }
        }
    }
}
