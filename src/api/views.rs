//! HTML rendering for the recommender page.

use std::fmt::Write;

/// Recommendation cards per grid row
pub const CARDS_PER_ROW: usize = 5;

/// One recommended title with its poster
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub poster_url: String,
}

/// Everything the page needs
#[derive(Debug, Clone, Default)]
pub struct PageView {
    /// Selector options, already sorted
    pub titles: Vec<String>,
    pub selected: Option<String>,
    pub backdrop_url: Option<String>,
    pub cards: Vec<Card>,
}

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem; background: #0e1117; color: #fafafa; }
select { font-size: 1rem; padding: 0.3rem; min-width: 20rem; }
.backdrop { width: 100%; max-height: 28rem; object-fit: cover; border-radius: 0.5rem; }
.grid-row { display: grid; grid-template-columns: repeat(5, 1fr); gap: 1rem; margin-bottom: 1.5rem; }
.card button { width: 100%; padding: 0.4rem; margin-bottom: 0.4rem; cursor: pointer; }
.card img { width: 100%; border-radius: 0.3rem; }
";

/// Escapes text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Movie Recommender</title>\n<style>\n{}</style>\n</head>\n<body>\n\
         <h1>🎬 Movie Recommender System</h1>\n",
        STYLE
    );

    render_selector(&mut html, view);

    if let Some(backdrop) = &view.backdrop_url {
        let _ = writeln!(
            html,
            "<img class=\"backdrop\" src=\"{}\" alt=\"\">",
            escape(backdrop)
        );
    }

    if let Some(selected) = &view.selected {
        let _ = writeln!(html, "<h2>{}</h2>", escape(selected));
    }

    html.push_str("<h3>Recommended Movies</h3>\n");
    for row in view.cards.chunks(CARDS_PER_ROW) {
        html.push_str("<div class=\"grid-row\">\n");
        for card in row {
            render_card(&mut html, card);
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_selector(html: &mut String, view: &PageView) {
    html.push_str(
        "<form method=\"get\" action=\"/\">\n<label for=\"title\">Select a movie:</label>\n\
         <select id=\"title\" name=\"title\" onchange=\"this.form.submit()\">\n",
    );
    for title in &view.titles {
        let selected = if view.selected.as_deref() == Some(title.as_str()) {
            " selected"
        } else {
            ""
        };
        let escaped = escape(title);
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escaped, selected, escaped
        );
    }
    html.push_str("</select>\n<noscript><button type=\"submit\">Show</button></noscript>\n</form>\n");
}

fn render_card(html: &mut String, card: &Card) {
    let title = escape(&card.title);
    let _ = write!(
        html,
        "<div class=\"card\">\n<form method=\"post\" action=\"/select\">\n\
         <input type=\"hidden\" name=\"title\" value=\"{title}\">\n\
         <button type=\"submit\">{title}</button>\n</form>\n\
         <img src=\"{poster}\" alt=\"{title}\">\n</div>\n",
        title = title,
        poster = escape(&card.poster_url),
    );
}
