use crate::api::ui::html::escape;
use crate::contract::model::Event;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        body = body
    )
}

/// Event detail page around an already rendered sign-up widget.
pub fn event_page(event: &Event, widget: &str, booked: Option<u64>) -> String {
    let overview = event
        .overview
        .as_deref()
        .map(|o| format!("<p class=\"overview\">{}</p>\n", escape(o)))
        .unwrap_or_default();

    let details = [
        ("Date", &event.date),
        ("Time", &event.time),
        ("Venue", &event.venue),
        ("Location", &event.location),
        ("Mode", &event.mode),
        ("Audience", &event.audience),
        ("Organizer", &event.organizer),
    ]
    .iter()
    .map(|(label, value)| format!("<li><strong>{label}:</strong> {}</li>", escape(value)))
    .collect::<Vec<_>>()
    .join("\n");

    let booked = match booked {
        Some(0) | None => String::new(),
        Some(1) => "<p class=\"booked\">1 person has already booked their spot.</p>\n".into(),
        Some(n) => format!("<p class=\"booked\">{n} people have already booked their spot.</p>\n"),
    };

    let body = format!(
        r#"<article id="event" data-slug="{slug}">
<h1>{title}</h1>
<img src="{image}" alt="{title}">
{overview}<p class="description">{description}</p>
<ul class="details">
{details}
</ul>
<aside class="booking">
<h2>Book Your Spot</h2>
{booked}{widget}
</aside>
</article>"#,
        slug = escape(&event.slug),
        title = escape(&event.title),
        image = escape(&event.image),
        overview = overview,
        description = escape(&event.description),
        details = details,
        booked = booked,
        widget = widget,
    );

    layout(&event.title, &body)
}

/// Minimal page for 4xx/5xx outcomes.
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<section id=\"error\">\n<h1>{}</h1>\n<p>{}</p>\n</section>",
        escape(title),
        escape(message)
    );
    layout(title, &body)
}
