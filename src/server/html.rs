//! Server-side rendering of the dashboard page.

use std::fmt::Write;

use crate::config::Labels;
use crate::models::{BasketPnl, NoticeLevel, Outcome, Report};

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", sans-serif; margin: 2rem; }
.notice { padding: 0.75rem 1rem; margin-bottom: 0.5rem; border-radius: 4px; }
.notice.warning { background: #fff4e5; }
.notice.error { background: #fdecea; }
.row { display: flex; gap: 2rem; flex-wrap: wrap; }
.col { flex: 1; min-width: 14rem; }
.metric .label { font-size: 0.9rem; color: #555; }
.metric .value { font-size: 2rem; font-weight: 600; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.25rem 0.5rem; border-bottom: 1px solid #ddd; }
td.pnl, th.pnl { text-align: right; }
"#;

/// Render the full dashboard page for one report.
///
/// PnL figures are shown truncated to whole units.
pub fn render_page(report: &Report, title: &str, labels: &Labels) -> String {
    let mut body = String::new();

    for notice in &report.notices {
        let class = match notice.level {
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        let _ = writeln!(
            body,
            r#"<div class="notice {class}">{}</div>"#,
            escape(&notice.message)
        );
    }

    match &report.outcome {
        Outcome::NoData { reason } => {
            let _ = writeln!(body, r#"<p class="empty">{}</p>"#, escape(&reason.to_string()));
            body.push_str(REFRESH);
        }
        Outcome::Ready { summary } => {
            body.push_str(r#"<div class="row">"#);
            metric(&mut body, "Total PnL", summary.total_live);
            metric(&mut body, &format!("{} PnL", labels.intraday), summary.live_intra);
            metric(&mut body, &format!("{} PnL", labels.daily), summary.live_daily);
            metric(&mut body, &format!("{} PnL", labels.paper), summary.paper);
            body.push_str("</div>\n<hr>\n");

            let _ = writeln!(
                body,
                "<p><strong>Last Updated:</strong> {}</p>",
                escape(&summary.last_update.to_string())
            );
            body.push_str(REFRESH);
            body.push_str("<hr>\n<div class=\"row\">");
            basket_table(&mut body, &labels.intraday, &summary.intra_baskets);
            basket_table(&mut body, &labels.daily, &summary.daily_baskets);
            basket_table(&mut body, &labels.paper, &summary.paper_baskets);
            body.push_str("</div>\n");
        }
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

const REFRESH: &str = "<p><a class=\"refresh\" href=\"/?refresh=true\">Refresh</a></p>\n";

fn metric(out: &mut String, label: &str, value: f64) {
    let _ = write!(
        out,
        r#"<div class="col metric"><div class="label">{}</div><div class="value">{}</div></div>"#,
        escape(label),
        whole_units(value)
    );
}

fn basket_table(out: &mut String, label: &str, rows: &[BasketPnl]) {
    let label = escape(label);
    let _ = write!(out, r#"<div class="col"><h3>{label} Baskets</h3>"#);
    if rows.is_empty() {
        let _ = write!(out, "<p>No {label} baskets available.</p>");
    } else {
        out.push_str(r#"<table><thead><tr><th>Basket Name</th><th class="pnl">PnL</th></tr></thead><tbody>"#);
        for row in rows {
            let _ = write!(
                out,
                r#"<tr><td>{}</td><td class="pnl">{}</td></tr>"#,
                escape(&row.name),
                whole_units(row.pnl)
            );
        }
        out.push_str("</tbody></table>");
    }
    out.push_str("</div>");
}

/// Truncate toward zero, the way the figures have always been displayed.
fn whole_units(value: f64) -> i64 {
    value.trunc() as i64
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
