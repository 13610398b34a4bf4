//! Type annotation pass over parsed trees.
//!
//! The resolver is deliberately shallow: parameter declarations introduce
//! typed names, literals have builtin types, and a fixed table supplies
//! method and property signatures for the builtin types. Anything it does
//! not recognise is left unannotated rather than reported; signature
//! patterns simply never match unannotated nodes.

use std::collections::HashMap;

use mend_tree::{Annotation, MethodSignature, Node, NodeKind, TypeRef};

type Env = HashMap<String, TypeRef>;

/// Annotates a parsed tree with types and method signatures.
pub(crate) fn annotate(root: &Node) -> Node {
    if root.kind() != NodeKind::CompilationUnit {
        return root.clone();
    }
    let children = root
        .children()
        .iter()
        .map(|child| {
            if child.kind() == NodeKind::FunctionDecl {
                annotate_function(child)
            } else {
                child.clone()
            }
        })
        .collect();
    root.with_children(children)
}

fn annotate_function(function: &Node) -> Node {
    let env = parameter_env(function);
    let children = function
        .children()
        .iter()
        .map(|child| {
            if child.kind() == NodeKind::Block {
                annotate_block(child, &env)
            } else {
                child.clone()
            }
        })
        .collect();
    function.with_children(children)
}

/// Collects `name -> type` from a function's parameter list.
fn parameter_env(function: &Node) -> Env {
    let mut env = Env::new();
    let Some(parameters) = function.find_first(NodeKind::ParameterList) else {
        return env;
    };
    for parameter in parameters.children() {
        if parameter.kind() != NodeKind::Parameter {
            continue;
        }
        let name = parameter
            .children()
            .first()
            .and_then(|n| n.text().map(str::to_owned));
        let type_ref = parameter
            .children()
            .last()
            .and_then(Node::text)
            .map(builtin_type);
        if let (Some(name), Some(type_ref)) = (name, type_ref) {
            env.insert(name, type_ref);
        }
    }
    env
}

fn annotate_block(block: &Node, env: &Env) -> Node {
    let children = block
        .children()
        .iter()
        .map(|child| {
            if child.kind().is_expression() {
                annotate_expression(child, env)
            } else {
                child.clone()
            }
        })
        .collect();
    block.with_children(children)
}

fn annotate_expression(node: &Node, env: &Env) -> Node {
    match node.kind() {
        NodeKind::Identifier => env.get(node.text().unwrap_or_default()).map_or_else(
            || node.clone(),
            |type_ref| node.with_annotation(Annotation::Type(type_ref.clone())),
        ),
        NodeKind::CharLiteral => {
            node.with_annotation(Annotation::Type(builtin_type("Char")))
        }
        NodeKind::StringLiteral => {
            node.with_annotation(Annotation::Type(builtin_type("String")))
        }
        NodeKind::IntLiteral => node.with_annotation(Annotation::Type(builtin_type("Int"))),
        NodeKind::MethodCall => annotate_call(node, env),
        NodeKind::PropertyAccess => annotate_property(node, env),
        _ => node.clone(),
    }
}

fn annotate_call(call: &Node, env: &Env) -> Node {
    let has_receiver = call.call_receiver().is_some();
    let children: Vec<Node> = call
        .children()
        .iter()
        .enumerate()
        .map(|(index, child)| {
            if index == 0 && has_receiver {
                annotate_expression(child, env)
            } else if child.kind() == NodeKind::ArgumentList {
                annotate_arguments(child, env)
            } else {
                child.clone()
            }
        })
        .collect();
    let annotated = call.with_children(children);

    let signature = annotated
        .call_receiver()
        .and_then(expression_type)
        .and_then(|owner| {
            let name = annotated.call_name()?;
            method_signature(owner, name, annotated.call_arguments().len())
        });
    signature.map_or_else(
        || annotated.clone(),
        |resolved| annotated.with_annotation(Annotation::Method(resolved)),
    )
}

fn annotate_arguments(list: &Node, env: &Env) -> Node {
    let children = list
        .children()
        .iter()
        .map(|child| {
            if child.kind().is_expression() {
                annotate_expression(child, env)
            } else {
                child.clone()
            }
        })
        .collect();
    list.with_children(children)
}

fn annotate_property(access: &Node, env: &Env) -> Node {
    let children: Vec<Node> = access
        .children()
        .iter()
        .enumerate()
        .map(|(index, child)| {
            if index == 0 && access.call_receiver().is_some() {
                annotate_expression(child, env)
            } else {
                child.clone()
            }
        })
        .collect();
    let annotated = access.with_children(children);

    let property = annotated
        .call_receiver()
        .and_then(expression_type)
        .and_then(|owner| {
            let name = annotated.call_name()?;
            property_type(owner.name(), name)
        });
    property.map_or_else(
        || annotated.clone(),
        |type_ref| annotated.with_annotation(Annotation::Type(type_ref)),
    )
}

/// Returns the resolved type of an expression, if any.
fn expression_type(node: &Node) -> Option<&TypeRef> {
    node.type_ref()
        .or_else(|| node.method_signature().map(MethodSignature::return_type))
}

/// Maps a declared type name onto a qualified builtin type.
///
/// Unknown names become opaque types with no supertypes, so they never
/// satisfy assignability checks beyond exact equality.
fn builtin_type(short_name: &str) -> TypeRef {
    match short_name {
        "Char" => qualified("kotlin.Char"),
        "String" => qualified("kotlin.String"),
        "Int" => qualified("kotlin.Int"),
        "Any" => TypeRef::new("kotlin.Any"),
        other => TypeRef::new(other),
    }
}

fn qualified(name: &str) -> TypeRef {
    TypeRef::new(name).with_supertypes(["kotlin.Any".to_owned()])
}

/// The builtin method table.
fn method_signature(owner: &TypeRef, name: &str, arity: usize) -> Option<MethodSignature> {
    let signature = match (owner.name(), name, arity) {
        ("kotlin.Char", "toInt", 0) => {
            MethodSignature::new(owner.clone(), "toInt", qualified("kotlin.Int"))
        }
        ("kotlin.String", "toInt", 0) => {
            MethodSignature::new(owner.clone(), "toInt", qualified("kotlin.Int"))
        }
        ("kotlin.Int", "toChar", 0) => {
            MethodSignature::new(owner.clone(), "toChar", qualified("kotlin.Char"))
        }
        _ => return None,
    };
    Some(signature)
}

/// The builtin property table.
fn property_type(owner_name: &str, name: &str) -> Option<TypeRef> {
    match (owner_name, name) {
        ("kotlin.Char", "code") => Some(qualified("kotlin.Int")),
        _ => None,
    }
}
