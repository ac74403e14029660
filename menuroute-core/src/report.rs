// Route table rendering

use crate::error::{Result, RouteError};
use crate::model::RouteDefinition;
use crate::path::PathViolation;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(RouteError::Config(format!("unknown report format '{}'", other))),
        }
    }
}

pub fn render_routes(routes: &[&RouteDefinition], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(routes)?),
        ReportFormat::Text => {
            let mut report = String::new();
            for route in routes {
                render_route_line(route, 0, &mut report);
            }
            Ok(report)
        }
    }
}

fn render_route_line(route: &RouteDefinition, indent: usize, out: &mut String) {
    let name = if route.is_anonymous() {
        "(layout)"
    } else {
        route.name.as_str()
    };
    let component = route
        .component
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut flags = Vec::new();
    if route.meta.is_first_level {
        flags.push("first-level");
    }
    if route.meta.is_iframe {
        flags.push("iframe");
    }
    if route.meta.is_hide {
        flags.push("hidden");
    }
    if route.meta.keep_alive {
        flags.push("keep-alive");
    }
    if route.meta.is_full_page {
        flags.push("full-page");
    }

    out.push_str(&format!(
        "{}{} {} -> {}",
        "  ".repeat(indent),
        name,
        route.path,
        component
    ));
    if !flags.is_empty() {
        out.push_str(&format!(" [{}]", flags.join(", ")));
    }
    out.push('\n');

    for child in &route.children {
        render_route_line(child, indent + 1, out);
    }
}

pub fn render_violations(violations: &[PathViolation]) -> String {
    let mut report = String::new();
    for violation in violations {
        report.push_str(&violation.to_string());
        report.push_str("\n\n");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentRef, MenuMeta};

    fn wrapped_dashboard() -> RouteDefinition {
        let meta = MenuMeta {
            is_first_level: true,
            keep_alive: true,
            ..MenuMeta::default()
        };
        RouteDefinition {
            name: String::new(),
            path: "/dashboard".to_string(),
            component: Some(ComponentRef::Layout),
            meta: meta.clone(),
            children: vec![RouteDefinition {
                name: "Dashboard".to_string(),
                path: "/dashboard".to_string(),
                component: Some(ComponentRef::View("/dashboard/console".to_string())),
                meta,
                children: vec![],
            }],
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("TEXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("csv".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_text_report_is_indented_tree() {
        let route = wrapped_dashboard();
        let report = render_routes(&[&route], ReportFormat::Text).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(
            lines[0],
            "(layout) /dashboard -> <layout> [first-level, keep-alive]"
        );
        assert_eq!(
            lines[1],
            "  Dashboard /dashboard -> /dashboard/console [first-level, keep-alive]"
        );
    }

    #[test]
    fn test_json_report() {
        let route = wrapped_dashboard();
        let report = render_routes(&[&route], ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(value[0]["name"], "");
        assert_eq!(value[0]["component"]["kind"], "layout");
        assert_eq!(value[0]["children"][0]["component"]["key"], "/dashboard/console");
        assert_eq!(value[0]["children"][0]["meta"]["isFirstLevel"], true);
    }
}
