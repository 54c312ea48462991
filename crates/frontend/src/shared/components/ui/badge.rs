use leptos::prelude::*;

pub fn variant_class(variant: &str) -> &'static str {
    match variant {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    }
}

/// Badge component with different variants
#[component]
pub fn Badge(
    /// "primary", "success", "warning", "error", anything else is neutral
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let class = move || {
        format!(
            "badge {}",
            variant_class(variant.get().as_deref().unwrap_or("neutral"))
        )
    };

    view! { <span class=class>{children()}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_variant_is_neutral() {
        assert_eq!(variant_class("success"), "badge--success");
        assert_eq!(variant_class("shiny"), "badge--neutral");
    }
}
