use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    /// `button`, `submit` or `reset`.
    #[props(default = "button".to_string())]
    pub button_type: String,
    #[props(default = false)]
    pub disabled: bool,
    #[props(extends = GlobalAttributes)]
    pub attributes: Vec<Attribute>,
    pub children: Element,
}

/// Full-width primary action button.
#[component]
pub fn Button(props: ButtonProps) -> Element {
    let base = vec![Attribute::new("class", "button", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, props.attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        button {
            r#type: props.button_type.clone(),
            disabled: props.disabled,
            ..merged,
            {props.children}
        }
    }
}
