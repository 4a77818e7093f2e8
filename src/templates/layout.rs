// src/templates/layout.rs
use super::html_escape;

pub fn render_page(title: &str, content: &str) -> String {
    render_page_with_refresh(title, content, None)
}

/// Full document; `refresh_secs` adds a meta refresh so placeholder pages re-poll.
pub fn render_page_with_refresh(title: &str, content: &str, refresh_secs: Option<u64>) -> String {
    let refresh = refresh_secs
        .map(|secs| format!(r#"<meta http-equiv="refresh" content="{}">"#, secs))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="light">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    {}
    <title>{}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/daisyui@4/dist/full.min.css">
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-base-200">
    <main class="p-4 lg:p-10 min-h-full">
        <div class="grid grid-cols-1 lg:grid-cols-3 gap-6 rounded-box">
            {}
        </div>
    </main>
</body>
</html>"#,
        refresh,
        html_escape(title),
        content
    )
}
