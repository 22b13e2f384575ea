//! Usage hint generation.

use super::{FunctionInfo, ModuleAnalysis};

const MAX_IMPORTED_FUNCTIONS: usize = 3;
const MAX_IMPORTED_CLASSES: usize = 2;
const MAX_CALLED_FUNCTIONS: usize = 2;
const MAX_SUGGESTED_ARGS: usize = 2;

/// Header line separating import lines from call examples.
pub const USAGE_HEADER: &str = "# Usage examples:";

/// Build import and call lines for `module_name`.
pub fn usage_examples(module_name: &str, analysis: &ModuleAnalysis) -> Vec<String> {
    let mut lines = vec![format!("import {}", module_name)];

    if !analysis.functions.is_empty() {
        let names: Vec<&str> = analysis
            .functions
            .iter()
            .take(MAX_IMPORTED_FUNCTIONS)
            .map(|f| f.name.as_str())
            .collect();
        lines.push(format!("from {} import {}", module_name, names.join(", ")));
    }

    if !analysis.classes.is_empty() {
        let names: Vec<&str> = analysis
            .classes
            .iter()
            .take(MAX_IMPORTED_CLASSES)
            .map(|c| c.name.as_str())
            .collect();
        lines.push(format!("from {} import {}", module_name, names.join(", ")));
    }

    let mut calls = Vec::new();

    for func in analysis.functions.iter().take(MAX_CALLED_FUNCTIONS) {
        let args: Vec<&str> = func
            .params
            .iter()
            .take(MAX_SUGGESTED_ARGS)
            .map(|p| suggest_argument(&p.name))
            .collect();
        calls.push(format!("{}.{}({})", module_name, func.name, args.join(", ")));
    }

    if let Some(class) = analysis.classes.first() {
        calls.push(format!("obj = {}.{}()", module_name, class.name));
        if let Some(method) = class.methods.first() {
            calls.push(method_call(method));
        }
    }

    if !calls.is_empty() {
        lines.push(USAGE_HEADER.to_string());
        lines.extend(calls);
    }

    lines
}

fn method_call(method: &FunctionInfo) -> String {
    let args = vec!["42"; method.params.len().min(MAX_SUGGESTED_ARGS)];
    format!("obj.{}({})", method.name, args.join(", "))
}

/// Placeholder value guessed from a parameter name.
fn suggest_argument(param: &str) -> &'static str {
    let lower = param.to_lowercase();
    if lower.contains("name") {
        "\"World\""
    } else if ["text", "string", "word"].iter().any(|k| lower.contains(k)) {
        "\"hello world\""
    } else if lower.contains("radius") || lower.contains("num") || lower == "n" {
        "5"
    } else if lower == "a" || lower == "b" {
        "10"
    } else {
        "42"
    }
}
