//! Built-in tree consumers.
//!
//! [`OutlineListener`], [`DmlInLoopListener`] and [`NodeCounter`] are listeners driven by the
//! iterative walk; [`SignatureCollector`] is a visitor.

mod dml_in_loop;
mod node_counter;
mod outline;
mod signatures;

pub use dml_in_loop::{DmlInLoop, DmlInLoopListener};
pub use node_counter::NodeCounter;
pub use outline::OutlineListener;
pub use signatures::{Signature, SignatureCollector, SignatureKind};

use apex_core::lang::modifiers::{self, ModifierId};
use apex_syntax::ast::{AccessorKind, ClassConstructor, ClassMethod, ClassProperty, MethodParameter, Spanned};

pub(crate) fn modifier_prefix(mods: &[Spanned<ModifierId>]) -> String {
    let mut out = String::new();
    for m in mods {
        out.push_str(modifiers::as_str(m.node));
        out.push(' ');
    }
    out
}

fn parameter_list(params: &[Spanned<MethodParameter>]) -> String {
    let params: Vec<String> = params
        .iter()
        .map(|p| format!("{}{} {}", modifier_prefix(&p.node.modifiers), p.node.ty.node, p.node.name.node))
        .collect();
    params.join(", ")
}

/// `Integer add(Integer a, Integer b)`; `void` for methods without a return type.
pub(crate) fn method_signature(method: &ClassMethod) -> String {
    let ret = match &method.return_type {
        Some(ty) => ty.node.to_string(),
        None => "void".to_string(),
    };
    format!("{ret} {}({})", method.name.node, parameter_list(&method.params))
}

pub(crate) fn constructor_signature(ctor: &ClassConstructor) -> String {
    format!("{}({})", ctor.name.node, parameter_list(&ctor.params))
}

/// `String name { get; set; }`
pub(crate) fn property_signature(property: &ClassProperty) -> String {
    let mut accessors = String::new();
    for accessor in &property.accessors {
        accessors.push_str(&modifier_prefix(&accessor.node.modifiers));
        accessors.push_str(match accessor.node.kind {
            AccessorKind::Get => "get; ",
            AccessorKind::Set => "set; ",
        });
    }
    format!("{} {} {{ {accessors}}}", property.ty.node, property.name.node)
}
