//! Template rendering for notification subjects and bodies.

use crate::EventContext;

/// Substitutes the named placeholders into a template.
///
/// Recognized placeholders: `{type}`, `{date}`, `{message}`, `{data}`,
/// `{initiator}`. Absent optional values render as the empty string.
/// Unknown placeholders are left untouched.
pub fn render(template: &str, ctx: &EventContext) -> String {
    template
        .replace("{type}", &ctx.type_label)
        .replace("{date}", &ctx.date)
        .replace("{message}", &ctx.message)
        .replace("{data}", ctx.data.as_deref().unwrap_or(""))
        .replace("{initiator}", ctx.initiator.as_deref().unwrap_or(""))
}

/// Converts plain text into minimal HTML markup.
///
/// Blocks separated by blank lines become `<p>` paragraphs; single
/// newlines inside a block become `<br>`. The text is HTML-escaped first.
pub fn linebreaks_html(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .filter(|block| !block.is_empty())
        .map(|block| format!("<p>{}</p>", escape_html(block).replace('\n', "<br>")))
        .collect::<Vec<_>>()
        .join("")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
