use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::domain::search_params::SortOrder;

const STYLES: &str = r":root { --bg: #0b1b2b; --card: #10273d; --text: #e6f1ff; --muted: #a8c0d6; --accent: #3ea8ff; }
body { margin: 0; font-family: system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, Cantarell, Noto Sans, sans-serif; background: var(--bg); color: var(--text); }
.page { min-height: 100vh; display: grid; place-items: center; padding: 24px; }
.card { width: 100%; max-width: 720px; background: var(--card); border-radius: 16px; padding: 24px; box-shadow: 0 10px 30px rgba(0,0,0,0.35); }
.title { margin: 0 0 8px; font-weight: 700; font-size: 22px; }
.subtitle { margin: 0 0 24px; color: var(--muted); font-size: 14px; }
.field { display: grid; gap: 8px; margin: 0 0 16px; }
.label { font-size: 14px; color: var(--muted); }
.input { width: 100%; border: 1px solid #214462; background: #0d2236; color: var(--text); border-radius: 10px; padding: 12px 14px; font-size: 14px; }
.actions { display: flex; gap: 12px; align-items: center; justify-content: flex-start; margin-top: 8px; }
.button { background: var(--accent); color: #071421; border: none; border-radius: 999px; padding: 10px 16px; font-weight: 600; cursor: pointer; }
.hint { color: var(--muted); font-size: 12px; }
.footer { margin-top: 20px; font-size: 12px; color: var(--muted); }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
.row { display: flex; gap: 10px; flex-wrap: wrap; }
.url { word-break: break-all; font-family: ui-monospace, SFMono-Regular, Menlo, monospace; background: #0d2236; border: 1px solid #214462; border-radius: 10px; padding: 10px 12px; }
.link { color: inherit; text-decoration: none; }
hr { border: none; border-top: 1px solid #214462; margin: 24px 0; }
@media (max-width: 640px) { .grid { grid-template-columns: 1fr; } }";

const FOOTER: &str =
    "This tool performs best-effort parsing and may miss data if Booking.com markup changes.";

fn layout(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLES)) }
            }
            body {
                main class="page" {
                    section class="card" {
                        (content)
                        p class="footer" { (FOOTER) }
                    }
                }
            }
        }
    }
}

fn text_field(id: &str, label: &str, kind: &str, placeholder: &str) -> Markup {
    html! {
        div class="field" {
            label for=(id) class="label" { (label) }
            input id=(id) name=(id) type=(kind) class="input" placeholder=(placeholder) required;
        }
    }
}

fn number_field(id: &str, label: &str, value: u32) -> Markup {
    html! {
        div class="field" {
            label for=(id) class="label" { (label) }
            input id=(id) name=(id) type="number" min="1" step="1" value=(value) class="input";
        }
    }
}

pub fn index_page() -> Markup {
    layout(
        "Booking.com Scraper",
        &html! {
            h1 class="title" { "Booking.com Scraper" }
            p class="subtitle" {
                "Enter your search details. We'll build the Booking.com URL for you to review before scraping."
            }
            form method="post" action="/build" {
                (text_field("destination", "Destination", "text", "Auckland"))
                div class="grid" {
                    (text_field("checkin", "Check-in", "date", ""))
                    (text_field("checkout", "Check-out", "date", ""))
                }
                div class="grid" {
                    (number_field("adults", "Adults", 2))
                    (number_field("rooms", "Rooms", 1))
                }
                div class="field" {
                    label for="sort" class="label" { "Sort by" }
                    select id="sort" name="sort" class="input" {
                        @for order in SortOrder::ALL {
                            option value=(order.as_str()) { (order.label()) }
                        }
                    }
                }
                (text_field("filename", "File name (without .csv)", "text", "my-hotels"))
                div class="actions" {
                    button class="button" type="submit" { "Build Search" }
                    span class="hint" { "You'll confirm before scraping." }
                }
            }
            hr;
            p class="subtitle" { "Already have a Booking.com search URL? Scrape it directly." }
            form method="post" action="/scrape" {
                (text_field("url", "Search URL", "url", "https://www.booking.com/searchresults.html?..."))
                (text_field("filename", "File name (without .csv)", "text", "my-hotels"))
                div class="actions" {
                    button class="button" type="submit" { "Scrape & Download CSV" }
                    span class="hint" { "Scrape may take a few seconds." }
                }
            }
        },
    )
}

pub fn preview_page(url: &str, filename: &str) -> Markup {
    layout(
        "Confirm Search",
        &html! {
            h1 class="title" { "Confirm your search" }
            p class="subtitle" {
                "We built this Booking.com URL from your inputs. You can open it to review, then proceed to scrape."
            }
            div class="field" {
                div class="label" { "Search URL" }
                div class="url" { (url) }
            }
            div class="row" {
                a class="link button" href=(url) target="_blank" rel="noopener noreferrer" {
                    "Open on Booking.com"
                }
                form method="post" action="/scrape" {
                    input type="hidden" name="url" value=(url);
                    input type="hidden" name="filename" value=(filename);
                    button class="button" type="submit" { "Scrape & Download CSV" }
                }
                form method="get" action="/" {
                    button class="button" type="submit" { "Back" }
                }
            }
        },
    )
}
