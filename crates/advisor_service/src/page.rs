//! HTML rendering for the advisor form

use serde::Deserialize;
use stack_advisor_core::{Experience, PerfNeed, ProjectType, TEAM_SIZE_RANGE};
use std::fmt::Write as _;

const TITLE: &str = "Tech Stack Advisor";
const DESCRIPTION: &str = "Get a recommended tech stack based on your project and team!";

/// Raw form fields; values are validated by the predictor, not by the extractor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub team_size: String,
    #[serde(default)]
    pub perf_need: String,
    #[serde(default)]
    pub experience: String,
}

/// Outcome shown below the form
pub enum Outcome {
    Recommendation(String),
    Error(String),
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn radio_group(out: &mut String, name: &str, legend: &str, labels: &[&str], selected: &str) {
    let _ = write!(out, "<fieldset><legend>{legend}</legend>");
    for label in labels {
        let checked = if *label == selected { " checked" } else { "" };
        let label = escape_html(label);
        let _ = write!(
            out,
            r#"<label><input type="radio" name="{name}" value="{label}" required{checked}> {label}</label>"#
        );
    }
    out.push_str("</fieldset>");
}

/// Render the full page, keeping the submitted selections
pub fn render(values: &FormValues, outcome: Option<&Outcome>) -> String {
    let project_types: Vec<&str> = ProjectType::ALL.iter().map(|v| v.label()).collect();
    let perf_needs: Vec<&str> = PerfNeed::ALL.iter().map(|v| v.label()).collect();
    let experiences: Vec<&str> = Experience::ALL.iter().map(|v| v.label()).collect();

    let team_size = values
        .team_size
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|size| TEAM_SIZE_RANGE.contains(size))
        .unwrap_or(*TEAM_SIZE_RANGE.start());

    let mut out = String::with_capacity(4096);
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{TITLE}</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 720px; margin: 40px auto; padding: 20px; background: #f5f5f5; }}
        .container {{ background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }}
        fieldset {{ border: 1px solid #ddd; margin: 12px 0; }}
        label {{ margin-right: 16px; }}
        .result {{ margin-top: 20px; padding: 12px; border-left: 4px solid #4CAF50; background: #f9f9f9; }}
        .error {{ border-left-color: #c62828; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{TITLE}</h1>
        <p>{DESCRIPTION}</p>
        <form method="post" action="/recommend">"#
    );

    radio_group(&mut out, "project_type", "Project Type", &project_types, &values.project_type);
    let _ = write!(
        out,
        r#"<fieldset><legend>Team Size</legend><input type="range" name="team_size" min="{min}" max="{max}" step="1" value="{team_size}" oninput="this.nextElementSibling.value=this.value"><output>{team_size}</output></fieldset>"#,
        min = TEAM_SIZE_RANGE.start(),
        max = TEAM_SIZE_RANGE.end(),
    );
    radio_group(&mut out, "perf_need", "Performance Need", &perf_needs, &values.perf_need);
    radio_group(&mut out, "experience", "Experience Level", &experiences, &values.experience);

    out.push_str(r#"<button type="submit">Submit</button></form>"#);

    match outcome {
        Some(Outcome::Recommendation(text)) => {
            let _ = write!(out, r#"<div class="result">{}</div>"#, escape_html(text));
        }
        Some(Outcome::Error(message)) => {
            let _ = write!(out, r#"<div class="result error">Error: {}</div>"#, escape_html(message));
        }
        None => {}
    }

    out.push_str("\n    </div>\n</body>\n</html>\n");
    out
}
