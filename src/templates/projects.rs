// src/templates/projects.rs
//! The "My Projects" section: heading, skeleton placeholders and repository cards.
//!
//! Everything here is a pure function of its arguments. The loading flag and
//! repository list are passed in by the caller.

use super::html_escape;
use super::language::language_color;
use crate::models::{DisplayState, RepositorySummary};

pub const SECTION_TITLE: &str = "My Projects";

const FOLDER_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24" class="inline-block w-5 h-5 mr-2 stroke-current"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 7v10a2 2 0 002 2h14a2 2 0 002-2V9a2 2 0 00-2-2h-6l-2-2H5a2 2 0 00-2 2z"></path></svg>"#;

pub const STAR_ICON: &str = r#"<svg class="mr-0.5" viewBox="0 0 24 24" width="1em" height="1em" fill="none" stroke="currentColor" stroke-width="2"><polygon points="12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2"></polygon></svg>"#;

pub const FORK_ICON: &str = r#"<svg class="mr-0.5" viewBox="0 0 24 24" width="1em" height="1em" fill="none" stroke="currentColor" stroke-width="2"><circle cx="6" cy="3" r="2"></circle><circle cx="18" cy="3" r="2"></circle><circle cx="12" cy="21" r="2"></circle><path d="M6 5v3a4 4 0 004 4h4a4 4 0 004-4V5M12 12v7"></path></svg>"#;

/// A pulsing blank block of the given tailwind width/height classes.
pub fn skeleton(width: &str, height: &str, class: &str) -> String {
    format!(
        r#"<div class="bg-base-300 animate-pulse rounded-full {} {} {}"></div>"#,
        width, height, class
    )
}

/// Where a card click is sent; the handler there redirects to the clone URL.
pub fn click_path(name: &str) -> String {
    format!("/projects/{}/open", urlencoding::encode(name))
}

pub fn github_repositories_url(username: &str) -> String {
    format!("https://github.com/{}?tab=repositories", urlencoding::encode(username))
}

pub fn render_header(loading: bool, username: &str) -> String {
    let (title, see_all) = if loading {
        (skeleton("w-28", "h-8", ""), skeleton("w-10", "h-5", ""))
    } else {
        (
            format!(r#"<span class="opacity-70">{}</span>"#, SECTION_TITLE),
            format!(
                r#"<a href="{}" target="_blank" rel="noreferrer" class="opacity-50">See All</a>"#,
                html_escape(&github_repositories_url(username))
            ),
        )
    };

    format!(
        r#"<div class="card compact bg-base-100 shadow-sm">
    <div class="card-body">
        <ul class="menu row-span-3 bg-base-100 text-base-content">
            <li>
                <div class="pb-0-important mx-4 flex items-center justify-between">
                    <h5 class="card-title">{}</h5>
                    {}
                </div>
            </li>
        </ul>
    </div>
</div>"#,
        title, see_all
    )
}

fn render_skeleton_card() -> String {
    format!(
        r#"<div class="card shadow-lg compact bg-base-100" data-card="skeleton">
    <div class="flex justify-between flex-col p-8 h-full w-full">
        <div>
            <div class="flex items-center">
                <span><h5 class="card-title text-lg">{}</h5></span>
            </div>
            <div class="mb-5 mt-1">{}{}</div>
        </div>
        <div class="flex justify-between">
            <div class="flex flex-grow">
                <span class="mr-3 flex items-center">{}</span>
                <span class="flex items-center">{}</span>
            </div>
            <div>
                <span class="flex items-center">{}</span>
            </div>
        </div>
    </div>
</div>"#,
        skeleton("w-32", "h-8", ""),
        skeleton("w-full", "h-4", "mb-2"),
        skeleton("w-full", "h-4", ""),
        skeleton("w-12", "h-4", ""),
        skeleton("w-12", "h-4", ""),
        skeleton("w-12", "h-4", ""),
    )
}

/// Exactly `limit` placeholder cards.
pub fn render_skeleton(limit: usize) -> String {
    (0..limit)
        .map(|_| render_skeleton_card())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_project_card(repo: &RepositorySummary) -> String {
    let description = repo.description.as_deref().unwrap_or_default();
    let homepage = html_escape(repo.homepage.as_deref().unwrap_or_default());
    let language = repo.language.as_deref();

    let topics = repo
        .topics
        .iter()
        .map(|topic| {
            format!(
                r#"<div class="m-1 text-xs inline-flex items-center font-bold leading-sm uppercase px-3 py-1 badge-primary bg-opacity-75 rounded-full">{}</div>"#,
                html_escape(topic)
            )
        })
        .collect::<String>();

    format!(
        r#"<div class="card shadow-lg compact bg-base-100 cursor-pointer" data-card="project" data-href="{}" onclick="window.open(this.dataset.href, '_blank')">
    <div class="flex justify-between flex-col p-8 h-full w-full">
        <div>
            <div class="flex items-center opacity-60">
                {}
                <span><h5 class="card-title text-lg">{}</h5></span>
            </div>
            <p class="mb-5 mt-1 text-base-content text-opacity-60 text-sm">{}</p>
        </div>
        <div>
            <div class="flex items-center opacity-60">
                <span>
                    <h5 class="card-title text-lg"><b>Demo -</b>&nbsp;&nbsp;<a target="_blank" href="{}">{}</a></h5>
                    <br>
                    <h5 class="card-title text-lg">{}</h5>
                </span>
            </div>
        </div>
        <div class="flex justify-between text-sm text-base-content text-opacity-60">
            <div class="flex flex-grow">
                <span class="mr-3 flex items-center">{}<span>{}</span></span>
                <span class="flex items-center">{}<span>{}</span></span>
            </div>
            <div>
                <span class="flex items-center">
                    <div class="w-3 h-3 rounded-full mr-1 opacity-60" style="background-color: {}"></div>
                    <span>{}</span>
                </span>
            </div>
        </div>
    </div>
</div>"#,
        html_escape(&click_path(&repo.name)),
        FOLDER_ICON,
        html_escape(&repo.name),
        html_escape(description),
        homepage,
        homepage,
        topics,
        STAR_ICON,
        repo.stargazers_count,
        FORK_ICON,
        repo.forks,
        language_color(language),
        html_escape(language.unwrap_or_default()),
    )
}

/// One card per repository, in the order given.
pub fn render_projects(repos: &[RepositorySummary]) -> String {
    repos
        .iter()
        .map(render_project_card)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The whole section for the given feed state.
pub fn render_section(
    loading: bool,
    repositories: Option<&[RepositorySummary]>,
    username: &str,
    skeleton_count: usize,
) -> String {
    let cards = match DisplayState::select(loading, repositories) {
        DisplayState::Skeleton => render_skeleton(skeleton_count),
        DisplayState::Empty => String::new(),
        DisplayState::Populated(repos) => render_projects(repos),
    };

    format!(
        r#"<div class="col-span-1 lg:col-span-2">
    <div class="grid grid-cols-2 gap-6">
        <div class="col-span-2">
            {}
        </div>
        <div class="col-span-2">
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                {}
            </div>
        </div>
    </div>
</div>"#,
        render_header(loading, username),
        cards
    )
}
