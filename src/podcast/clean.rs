//! Removal of hosting-platform boilerplate from feed descriptions.
//!
//! This is a fixed denylist of exact literals, not an HTML sanitizer: any
//! other markup in a description passes through untouched.

/// "Hosted on Acast" footer appended to every Acast episode.
const ACAST_FOOTER: &str = "<hr><p style='color:grey; font-size:0.75em;'> Hosted on Acast. See <a style='color:grey;' target='_blank' rel='noopener noreferrer' href='https://acast.com/privacy'>acast.com/privacy</a> for more information.</p>";

/// art19 privacy notice (German), HTML variant.
const ART19_NOTICE_HTML: &str = r#"<p>Unsere allgemeinen Datenschutzrichtlinien finden Sie unter <a href="https://art19.com/privacy" rel="noopener noreferrer" target="_blank">https://art19.com/privacy</a>. Die Datenschutzrichtlinien für Kalifornien sind unter <a href="https://art19.com/privacy#do-not-sell-my-info" rel="noopener noreferrer" target="_blank">https://art19.com/privacy#do-not-sell-my-info</a> abrufbar.</p>"#;

/// art19 privacy notice (German), plain-text variant.
const ART19_NOTICE_TEXT: &str = "Unsere allgemeinen Datenschutzrichtlinien finden Sie unter https://art19.com/privacy. Die Datenschutzrichtlinien für Kalifornien sind unter https://art19.com/privacy#do-not-sell-my-info abrufbar.";

/// Empty paragraph usually left behind by the removals above.
const EMPTY_PARAGRAPH: &str = "<p><br></p>";

/// Applied in order; the HTML notice must go before its plain-text twin.
const BOILERPLATE: [&str; 4] = [
    ACAST_FOOTER,
    ART19_NOTICE_HTML,
    ART19_NOTICE_TEXT,
    EMPTY_PARAGRAPH,
];

/// Strip every occurrence of the known boilerplate blocks from `raw`.
pub fn clean_description(raw: &str) -> String {
    BOILERPLATE
        .iter()
        .fold(raw.to_owned(), |text, block| {
            if text.contains(block) {
                text.replace(block, "")
            } else {
                text
            }
        })
}
