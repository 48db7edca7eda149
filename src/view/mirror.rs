use serde::Serialize;
use std::fmt::Debug;

use crate::error::{ClientError, ClientResult};

/// How one input of an edit form is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub name: &'static str,
    pub read_only: bool,
    pub multiline: bool,
}

/// An entity whose fields are bound one-to-one to form inputs.
pub trait Editable: Clone {
    type Field: Copy + PartialEq + Debug + Send + Sync + 'static;

    /// Form order.
    fn fields() -> &'static [Self::Field];

    fn spec(field: Self::Field) -> FieldSpec;

    fn field_value(&self, field: Self::Field) -> String;

    /// Copy of `self` with exactly `field` replaced.
    fn with_field(&self, field: Self::Field, value: &str) -> Self;
}

/// Keyed-field update: `(current, field, value) -> next`. Read-only fields
/// are refused.
pub fn update_field<E: Editable>(current: &E, field: E::Field, value: &str) -> ClientResult<E> {
    let spec = E::spec(field);
    if spec.read_only {
        return Err(ClientError::ReadOnlyField(spec.name.to_string()));
    }
    Ok(current.with_field(field, value))
}

/// Rendered state of one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub label: String,
    pub name: String,
    pub value: String,
    pub disabled: bool,
    pub multiline: bool,
}

pub fn field_views<E: Editable>(entity: &E) -> Vec<FieldView> {
    E::fields()
        .iter()
        .map(|&field| {
            let spec = E::spec(field);
            FieldView {
                label: spec.label.to_string(),
                name: spec.name.to_string(),
                value: entity.field_value(field),
                disabled: spec.read_only,
                multiline: spec.multiline,
            }
        })
        .collect()
}
