use dioxus::prelude::*;

use super::Page;

#[component]
pub fn CallbackPage() -> Element {
    rsx! {
        Page {
            title: "Signed in".to_string(),
            p { "Signed in. You can close this window." }
            script { src: "/static/js/callback.js" }
        }
    }
}
