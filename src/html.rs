//! Shared page chrome: the base page layout and money formatting.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

/// The stylesheet inlined into every page.
const STYLESHEET: &str = r#"
    :root { color-scheme: light dark; }
    body {
        font-family: system-ui, sans-serif;
        max-width: 60rem;
        margin: 0 auto;
        padding: 0 1rem 3rem;
        line-height: 1.5;
    }
    nav { display: flex; gap: 1rem; padding: 1rem 0; border-bottom: 1px solid #ccc; margin-bottom: 1.5rem; }
    nav a { text-decoration: none; color: #1d4ed8; }
    nav a.current { font-weight: bold; text-decoration: underline; }
    h1 { font-size: 1.5rem; }
    h2 { font-size: 1.2rem; margin-top: 2rem; }
    table { border-collapse: collapse; width: 100%; margin: 0.5rem 0 1rem; }
    th, td { text-align: left; padding: 0.3rem 0.6rem; border-bottom: 1px solid #ddd; }
    th { background: rgba(127, 127, 127, 0.1); }
    td.num, th.num { text-align: right; }
    form.inline { display: inline; }
    label { display: block; margin-top: 0.5rem; }
    input, select { padding: 0.25rem; margin-top: 0.1rem; }
    button { padding: 0.3rem 0.8rem; margin-top: 0.5rem; cursor: pointer; }
    .error { color: #b91c1c; }
    .muted { color: #6b7280; font-size: 0.9rem; }
    .receipt-header { background: rgba(127, 127, 127, 0.15); font-weight: bold; }
"#;

/// Wrap `content` in the shared HTML skeleton.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Cheltuieli" }

                style { (PreEscaped(STYLESHEET)) }
            }

            body
            {
                (content)
            }
        }
    }
}

/// Format an amount of money in lei, always with two decimal places.
pub fn format_lei(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("lei ")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-lei ")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // numfmt hardcodes zero as "0", so it gets its own formatted string.
        "lei 0.00".to_owned()
    };

    // numfmt drops a trailing zero ("12.30" comes out as "12.3"), so it is
    // appended here.
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}
