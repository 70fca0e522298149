//! Schema text rendering.

use super::intermediate::{FieldDefinition, IntermediateType, TypeBody, TypeCategory};
use super::registry::TypeRegistry;
use crate::error::{DynasyncError, Result};
use crate::graphql::TypeRef;
use crate::naming::RootType;

/// Renders the schema block, every registered type in registration order,
/// then the free-form additions.
pub(crate) fn render_schema(
    registry: &TypeRegistry,
    roots: &[RootType],
    additions: &[String],
) -> Result<String> {
    let mut lines = Vec::new();

    let present: Vec<RootType> = RootType::ALL
        .into_iter()
        .filter(|root| roots.contains(root))
        .collect();
    if !present.is_empty() {
        lines.push("schema {".to_string());
        for root in present {
            lines.push(format!("  {}: {}", root_key(root), root.as_str()));
        }
        lines.push("}".to_string());
    }

    for ty in registry.iter() {
        lines.extend(render_type(ty, registry)?);
    }

    for addition in additions {
        lines.push(addition.strip_suffix('\n').unwrap_or(addition).to_string());
    }

    if lines.is_empty() {
        return Ok(String::new());
    }
    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

fn root_key(root: RootType) -> &'static str {
    match root {
        RootType::Query => "query",
        RootType::Mutation => "mutation",
        RootType::Subscription => "subscription",
    }
}

fn render_type(ty: &IntermediateType, registry: &TypeRegistry) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    match ty.body() {
        TypeBody::Fields(fields) => {
            let mut header = format!("{} {}", ty.category().as_str(), ty.name());
            if !ty.interfaces().is_empty() {
                let interfaces = ty
                    .interfaces()
                    .iter()
                    .map(|name| resolve_member(ty, name, TypeCategory::Interface, registry))
                    .collect::<Result<Vec<_>>>()?;
                header.push_str(&format!(" implements {}", interfaces.join(" & ")));
            }
            header.push_str(" {");
            lines.push(header);
            for field in fields {
                lines.push(format!("  {}", render_field(field, registry)?));
            }
            lines.push("}".to_string());
        }
        TypeBody::Members(members) => {
            let members = members
                .iter()
                .map(|name| resolve_member(ty, name, TypeCategory::Type, registry))
                .collect::<Result<Vec<_>>>()?;
            lines.push(format!("union {} = {}", ty.name(), members.join(" | ")));
        }
        TypeBody::Values(values) => {
            lines.push(format!("enum {} {{", ty.name()));
            lines.extend(values.iter().map(|value| format!("  {value}")));
            lines.push("}".to_string());
        }
    }
    Ok(lines)
}

/// `name(arg: Type other: Type): Type`
fn render_field(field: &FieldDefinition, registry: &TypeRegistry) -> Result<String> {
    let args = if field.args.is_empty() {
        String::new()
    } else {
        let args = field
            .args
            .iter()
            .map(|arg| Ok(format!("{}: {}", arg.name, render_ref(&arg.type_ref, registry)?)))
            .collect::<Result<Vec<_>>>()?;
        format!("({})", args.join(" "))
    };
    Ok(format!(
        "{}{args}: {}",
        field.name,
        render_ref(&field.type_ref, registry)?
    ))
}

fn render_ref(type_ref: &TypeRef, registry: &TypeRegistry) -> Result<String> {
    Ok(type_ref.render_as(&registry.resolve(type_ref.name())?))
}

fn resolve_member(
    owner: &IntermediateType,
    name: &str,
    expected: TypeCategory,
    registry: &TypeRegistry,
) -> Result<String> {
    let member = registry
        .get(name)
        .ok_or_else(|| DynasyncError::validation(format!("{name} is not a valid Type")))?;
    if member.category() != expected {
        return Err(DynasyncError::validation(format!(
            "{} {} references {name}, which is not a {}",
            owner.category().as_str(),
            owner.name(),
            expected.as_str()
        )));
    }
    Ok(member.name().to_string())
}
