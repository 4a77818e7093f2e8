// src/templates/language.rs

/// Swatch color for repositories without a known language.
pub const DEFAULT_LANGUAGE_COLOR: &str = "gray";

// Colors from GitHub linguist
const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("Assembly", "#6E4C13"),
    ("C", "#555555"),
    ("C#", "#178600"),
    ("C++", "#f34b7d"),
    ("Clojure", "#db5855"),
    ("CSS", "#563d7c"),
    ("Dart", "#00B4AB"),
    ("Dockerfile", "#384d54"),
    ("Elixir", "#6e4a7e"),
    ("Elm", "#60B5CC"),
    ("Erlang", "#B83998"),
    ("Go", "#00ADD8"),
    ("Haskell", "#5e5086"),
    ("HTML", "#e34c26"),
    ("Java", "#b07219"),
    ("JavaScript", "#f1e05a"),
    ("Jupyter Notebook", "#DA5B0B"),
    ("Kotlin", "#A97BFF"),
    ("Lua", "#000080"),
    ("Makefile", "#427819"),
    ("Nix", "#7e7eff"),
    ("Objective-C", "#438eff"),
    ("OCaml", "#3be133"),
    ("Perl", "#0298c3"),
    ("PHP", "#4F5D95"),
    ("PowerShell", "#012456"),
    ("Python", "#3572A5"),
    ("R", "#198CE7"),
    ("Ruby", "#701516"),
    ("Rust", "#dea584"),
    ("Scala", "#c22d40"),
    ("SCSS", "#c6538c"),
    ("Shell", "#89e051"),
    ("Solidity", "#AA6746"),
    ("Svelte", "#ff3e00"),
    ("Swift", "#F05138"),
    ("TeX", "#3D6117"),
    ("TypeScript", "#3178c6"),
    ("Vim Script", "#199f4b"),
    ("Vue", "#41b883"),
    ("Zig", "#ec915c"),
];

/// Deterministic language -> color lookup; unknown or missing languages get
/// [`DEFAULT_LANGUAGE_COLOR`].
pub fn language_color(language: Option<&str>) -> &'static str {
    language
        .and_then(|lang| {
            LANGUAGE_COLORS
                .iter()
                .find(|(name, _)| *name == lang)
                .map(|(_, color)| *color)
        })
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}
