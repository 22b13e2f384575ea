//! Python public-API extraction.
//!
//! Walks the module's top-level statements and collects public functions,
//! classes (with their public methods) and simple constants.

use tree_sitter::{Node, Parser, Tree};

use super::{ClassInfo, FunctionInfo, ModuleAnalysis, Parameter};

/// Parse Python source. Returns `None` if the grammar cannot be loaded.
pub fn parse_python(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .ok()?;
    parser.parse(source, None)
}

/// Extract the public surface of a parsed module.
pub fn extract(tree: &Tree, source: &[u8]) -> ModuleAnalysis {
    let mut analysis = ModuleAnalysis::default();
    let root = tree.root_node();
    let mut cursor = root.walk();

    for stmt in root.named_children(&mut cursor) {
        let def = unwrap_decorated(stmt);
        match def.kind() {
            "function_definition" => {
                if let Some(func) = function_info(&def, source) {
                    analysis.functions.push(func);
                }
            }
            "class_definition" => {
                if let Some(class) = class_info(&def, source) {
                    analysis.classes.push(class);
                }
            }
            "expression_statement" => {
                collect_constants(&def, source, &mut analysis.variables);
            }
            _ => {}
        }
    }

    analysis
}

fn unwrap_decorated(node: Node) -> Node {
    if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition").unwrap_or(node)
    } else {
        node
    }
}

fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn public_name(node: &Node, source: &[u8]) -> Option<String> {
    let name = node_text(&node.child_by_field_name("name")?, source);
    if name.is_empty() || name.starts_with('_') {
        None
    } else {
        Some(name.to_string())
    }
}

fn function_info(node: &Node, source: &[u8]) -> Option<FunctionInfo> {
    let name = public_name(node, source)?;
    let params = node
        .child_by_field_name("parameters")
        .map(|p| parameters(&p, source))
        .unwrap_or_default();
    Some(FunctionInfo { name, params })
}

/// Positional parameters, without `self`. Stops at `*`/`*args` since what
/// follows is keyword-only.
fn parameters(node: &Node, source: &[u8]) -> Vec<Parameter> {
    let mut params = Vec::new();
    let mut cursor = node.walk();

    for child in node.named_children(&mut cursor) {
        let (name, has_default) = match child.kind() {
            "identifier" => (node_text(&child, source), false),
            "typed_parameter" => match child.named_child(0) {
                Some(ident) if ident.kind() == "identifier" => (node_text(&ident, source), false),
                Some(splat) if splat.kind() == "list_splat_pattern" => break,
                _ => continue,
            },
            "default_parameter" | "typed_default_parameter" => match child.child_by_field_name("name") {
                Some(n) => (node_text(&n, source), true),
                None => continue,
            },
            "list_splat_pattern" | "keyword_separator" => break,
            _ => continue,
        };

        if name != "self" {
            params.push(Parameter {
                name: name.to_string(),
                has_default,
            });
        }
    }

    params
}

fn class_info(node: &Node, source: &[u8]) -> Option<ClassInfo> {
    let name = public_name(node, source)?;
    let mut methods = Vec::new();

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for stmt in body.named_children(&mut cursor) {
            let def = unwrap_decorated(stmt);
            if def.kind() == "function_definition" {
                if let Some(method) = function_info(&def, source) {
                    methods.push(method);
                }
            }
        }
    }

    Some(ClassInfo { name, methods })
}

fn collect_constants(stmt: &Node, source: &[u8], out: &mut Vec<String>) {
    let mut cursor = stmt.walk();
    for expr in stmt.named_children(&mut cursor) {
        if expr.kind() != "assignment" {
            continue;
        }
        let (Some(left), Some(right)) = (
            expr.child_by_field_name("left"),
            expr.child_by_field_name("right"),
        ) else {
            continue;
        };

        let is_literal = matches!(
            right.kind(),
            "string" | "concatenated_string" | "integer" | "float" | "true" | "false" | "none"
        );
        let name = node_text(&left, source);
        if left.kind() == "identifier" && is_literal && !name.starts_with('_') {
            out.push(name.to_string());
        }
    }
}
