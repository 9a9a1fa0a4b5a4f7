//! Avatar component with image and initials fallback.

use leptos::prelude::*;

/// Initials for `name`: first letter of up to two words, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Avatar component for the signed-in user.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Avatar src=Some(url) alt="Octo Cat" fallback="OC" />
/// }
/// ```
#[component]
pub fn Avatar(
    /// Image source URL.
    #[prop(into)]
    src: Option<String>,
    /// Alt text for the image.
    #[prop(into)]
    alt: String,
    /// Fallback text (initials) when there is no image.
    #[prop(into)]
    fallback: String,
    /// Size class (e.g., "h-8 w-8").
    #[prop(default = "h-8 w-8")]
    size: &'static str,
) -> impl IntoView {
    let container_classes = format!("relative flex shrink-0 overflow-hidden rounded-full {size}");

    view! {
        <span class=container_classes>
            {match src {
                Some(src) => view! {
                    <img
                        class="aspect-square h-full w-full object-cover"
                        src=src
                        alt=alt
                    />
                }.into_any(),
                None => view! {
                    <span class="flex h-full w-full items-center justify-center rounded-full bg-accent text-textMuted text-xs font-medium">
                        {fallback}
                    </span>
                }.into_any(),
            }}
        </span>
    }
}
