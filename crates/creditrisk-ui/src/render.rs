//! Server-side HTML for the form and the assessment result.

use std::fmt::Write;

use creditrisk_core::{RiskClass, Verdict};
use serde_json::Value;

use crate::catalog::Catalog;
use crate::client::ClientError;
use crate::form::{Field, FieldError, FormState, Widget, SECTIONS};

/// What to show under the form after a submission.
#[derive(Debug)]
pub enum Outcome {
    Assessed(Verdict),
    InvalidInput(Vec<FieldError>),
    ServiceError { status: u16, body: Value },
    Unreachable { url: String },
    Unexpected(String),
}

impl From<ClientError> for Outcome {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unreachable { url } => Outcome::Unreachable { url },
            ClientError::Service { status, body } => Outcome::ServiceError { status, body },
            ClientError::Unexpected(detail) => Outcome::Unexpected(detail),
        }
    }
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem auto; max-width: 1200px; color: #262730; }
h1 { margin-bottom: 1.5rem; }
.columns { display: flex; gap: 2rem; }
.columns fieldset { flex: 1; border: 1px solid #ddd; border-radius: 6px; }
label { display: block; margin-top: .75rem; font-size: .9rem; }
input, select { width: 100%; box-sizing: border-box; padding: .3rem; }
button { margin-top: 1.5rem; width: 100%; padding: .7rem; font-size: 1rem; }
.alert { padding: .8rem 1rem; border-radius: 6px; margin: 1rem 0; }
.alert.error { background: #ffe5e5; color: #8b0000; }
.alert.success { background: #e3f6e8; color: #115c2a; }
.metric-value { font-size: 2rem; font-weight: bold; }
.metric-delta { color: #666; margin-left: .5rem; }
.bar-row { display: flex; align-items: center; gap: .5rem; margin: .4rem 0; }
.bar-label { width: 10rem; }
.bar { height: 1.4rem; background: #4c78a8; }
.bar.risk { background: #e45756; }
pre { background: #f4f4f4; padding: 1rem; overflow-x: auto; }
"#;

/// Renders the whole page.
pub fn page(catalog: &Catalog, form: &FormState, outcome: Option<&Outcome>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<h1>{}</h1>\n",
        catalog.locale.as_str(),
        escape(catalog.title),
        STYLE,
        escape(catalog.title),
    );

    html.push_str("<form method=\"post\" action=\"/evaluate\">\n<div class=\"columns\">\n");
    for (title, fields) in catalog.sections.iter().zip(SECTIONS.iter()) {
        let _ = write!(html, "<fieldset>\n<legend>{}</legend>\n", escape(title));
        for field in fields.iter() {
            render_field(&mut html, catalog, field, form.get(field.column));
        }
        html.push_str("</fieldset>\n");
    }
    let _ = write!(
        html,
        "</div>\n<button type=\"submit\">{}</button>\n</form>\n",
        escape(catalog.submit)
    );

    if let Some(outcome) = outcome {
        html.push_str(&render_outcome(catalog, outcome));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_field(html: &mut String, catalog: &Catalog, field: &Field, current: &str) {
    let name = escape(field.column);
    let _ = write!(
        html,
        "<label for=\"{name}\">{}</label>\n",
        escape(catalog.label(field.column))
    );

    match field.widget {
        Widget::Integer { min, max, .. } => {
            let max = max.map(|m| format!(" max=\"{m}\"")).unwrap_or_default();
            let _ = write!(
                html,
                "<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\"{max} step=\"1\" value=\"{}\">\n",
                escape(current)
            );
        }
        Widget::Decimal { min, .. } => {
            let _ = write!(
                html,
                "<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" step=\"any\" value=\"{}\">\n",
                escape(current)
            );
        }
        Widget::Slider { min, max, step, .. } => {
            let _ = write!(
                html,
                "<input type=\"range\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" \
                 value=\"{value}\" oninput=\"this.nextElementSibling.value=this.value\">\n\
                 <output>{value}</output>\n",
                value = escape(current)
            );
        }
        Widget::Fixed { options, .. } => {
            let _ = write!(html, "<select id=\"{name}\" name=\"{name}\">\n");
            for option in options {
                let option = option.to_string();
                render_option(html, &option, option == current);
            }
            html.push_str("</select>\n");
        }
        Widget::Select => {
            let _ = write!(html, "<select id=\"{name}\" name=\"{name}\">\n");
            for choice in catalog.choices(field.column) {
                render_option(html, choice.label, choice.label == current);
            }
            html.push_str("</select>\n");
        }
    }
}

fn render_option(html: &mut String, label: &str, selected: bool) {
    let selected = if selected { " selected" } else { "" };
    let label = escape(label);
    let _ = write!(html, "<option value=\"{label}\"{selected}>{label}</option>\n");
}

/// Renders the block shown below the form.
pub fn render_outcome(catalog: &Catalog, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Assessed(verdict) => render_verdict(catalog, verdict),
        Outcome::InvalidInput(errors) => {
            let mut html = format!(
                "<section class=\"result\">\n<div class=\"alert error\">{}\n<ul>\n",
                escape(catalog.invalid_input)
            );
            for err in errors {
                let _ = write!(
                    html,
                    "<li>{}: {}</li>\n",
                    escape(catalog.label(err.column)),
                    escape(&catalog.field_problem(&err.problem))
                );
            }
            html.push_str("</ul>\n</div>\n</section>\n");
            html
        }
        Outcome::ServiceError { status, body } => {
            let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
            format!(
                "<section class=\"result\">\n<div class=\"alert error\">{}</div>\n<pre>{}</pre>\n</section>\n",
                escape(&catalog.service_error(*status)),
                escape(&pretty)
            )
        }
        Outcome::Unreachable { url } => format!(
            "<section class=\"result\">\n<div class=\"alert error\">{}</div>\n</section>\n",
            escape(&catalog.unreachable(url))
        ),
        Outcome::Unexpected(detail) => format!(
            "<section class=\"result\">\n<div class=\"alert error\">{}</div>\n</section>\n",
            escape(&catalog.unexpected(detail))
        ),
    }
}

fn render_verdict(catalog: &Catalog, verdict: &Verdict) -> String {
    let high_risk = verdict.predicted_class == RiskClass::Default;
    let (class, icon) = if high_risk { ("error", "🚨") } else { ("success", "✅") };

    let mut html = format!(
        "<section class=\"result\">\n<h2>{}</h2>\n\
         <div class=\"alert {class}\">{icon} <strong>{}</strong></div>\n<p>{}</p>\n",
        escape(catalog.result_heading),
        escape(&verdict.prediction_status),
        escape(&catalog.classified(high_risk, verdict.threshold_used)),
    );

    let _ = write!(
        html,
        "<div class=\"metric\">\n<div class=\"metric-label\">{}</div>\n\
         <span class=\"metric-value\">{}</span>\
         <span class=\"metric-delta\">{}: {}</span>\n</div>\n",
        escape(catalog.metric_label),
        percent(verdict.probability_default),
        escape(catalog.threshold_label),
        verdict.threshold_used,
    );

    let _ = write!(html, "<h3>{}</h3>\n<div class=\"chart\">\n", escape(catalog.chart_title));
    let bars = [
        (catalog.chart_labels[0], verdict.probability_solvency, "bar"),
        (catalog.chart_labels[1], verdict.probability_default, "bar risk"),
    ];
    for (label, p, class) in bars {
        let _ = write!(
            html,
            "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
             <div class=\"{class}\" style=\"width: {:.1}%\"></div><span>{}</span></div>\n",
            escape(label),
            (p * 100.0).clamp(0.0, 100.0),
            percent(p),
        );
    }
    html.push_str("</div>\n</section>\n");
    html
}

fn percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Escapes text for HTML bodies and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldProblem;
    use creditrisk_config::Locale;
    use creditrisk_core::{ClassProbabilities, Threshold};
    use serde_json::json;

    fn es() -> &'static Catalog {
        Catalog::for_locale(Locale::Es)
    }

    fn verdict(p_default: f64) -> Verdict {
        Verdict::decide(
            ClassProbabilities::from_default(p_default),
            Threshold::new(0.35).unwrap(),
            "credit-risk-logit@1.0.0",
        )
    }

    #[test]
    fn test_form_has_every_widget() {
        let html = page(es(), &FormState::defaults(es()), None);
        for field in crate::form::fields() {
            assert!(html.contains(&format!("name=\"{}\"", field.column)), "{}", field.column);
        }
        assert!(html.contains("Evaluar Riesgo Crediticio"));
        assert!(html.contains("<option value=\"360\" selected>360</option>"));
        assert!(html.contains("<option value=\"Hombre\" selected>Hombre</option>"));
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn test_high_risk_verdict() {
        let html = render_outcome(es(), &Outcome::Assessed(verdict(0.4)));
        assert!(html.contains("alert error"));
        assert!(html.contains("High Risk (Default)"));
        assert!(html.contains("40.00%"));
        assert!(html.contains("60.00%"));
        assert!(html.contains("Umbral: 0.35"));
        assert!(html.contains("Clasificado como Alto Riesgo"));
    }

    #[test]
    fn test_low_risk_verdict() {
        let html = render_outcome(Catalog::for_locale(Locale::En), &Outcome::Assessed(verdict(0.1234)));
        assert!(html.contains("alert success"));
        assert!(html.contains("12.34%"));
        assert!(html.contains("Classified as Low Risk"));
    }

    #[test]
    fn test_service_error_shows_status_and_body() {
        let outcome = Outcome::ServiceError {
            status: 400,
            body: json!({"error": "Incomplete or incorrect input data.", "missing_fields": ["LTV"]}),
        };
        let html = render_outcome(es(), &outcome);
        assert!(html.contains("Código: 400"));
        assert!(html.contains("&quot;missing_fields&quot;"));
    }

    #[test]
    fn test_unreachable_names_url() {
        let outcome = Outcome::Unreachable { url: "http://127.0.0.1:5000/credit_risk".into() };
        let html = render_outcome(es(), &outcome);
        assert!(html.contains("http://127.0.0.1:5000/credit_risk"));
        assert!(html.contains("No se pudo conectar"));
    }

    #[test]
    fn test_invalid_input_lists_fields() {
        let outcome = Outcome::InvalidInput(vec![FieldError {
            column: "age",
            problem: FieldProblem::AboveMax(80.0),
        }]);
        let html = render_outcome(es(), &outcome);
        assert!(html.contains("<li>Edad: debe ser menor o igual a 80</li>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">R&D's</a>"), "&lt;a href=&quot;x&quot;&gt;R&amp;D&#39;s&lt;/a&gt;");
    }
}
