use dioxus::prelude::*;

/// Document shell shared by every page.
#[component]
pub fn Page(title: String, children: Element) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{title}" }
            style {
                r#"
                body {{
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    min-height: 100vh;
                    margin: 0;
                    background: #ffffff;
                    color: #37352f;
                    font-family: -apple-system, BlinkMacSystemFont, Segoe UI, Helvetica, Arial, sans-serif;
                }}

                .btn {{
                    display: inline-flex;
                    align-items: center;
                    justify-content: center;
                    padding: 0.625rem 1.25rem;
                    border: none;
                    border-radius: 4px;
                    font-size: 0.9375rem;
                    font-weight: 500;
                    cursor: pointer;
                    text-decoration: none;
                    background-color: #7b4a2d;
                    color: white;
                }}

                .btn:hover {{
                    opacity: 0.9;
                }}

                .btn.secondary {{
                    background-color: #e9e9e7;
                    color: #37352f;
                }}
                "#
            }
        }
        body { {children} }
    }
}
