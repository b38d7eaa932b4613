//! Deriving application classes from object class definitions
//!
//! An application type describes how it is stored in the directory through
//! [`ObjectClassMapping`]. [`DerivedClass::derive`] resolves the mapping
//! against a loaded [`Schema`] once, at setup time, so later lookups never
//! touch the schema again.

use std::collections::HashSet;

use crate::schema::error::SchemaError;
use crate::schema::resolution::Schema;

/// How an application type maps onto directory entries
pub trait ObjectClassMapping {
    /// Attribute forming the leftmost component of the entry's DN
    fn unique_identifier() -> &'static str;

    /// Object classes of every entry of this type
    fn object_classes() -> &'static [&'static str];

    /// Base DN under which entries live
    fn location() -> &'static str;

    /// Attributes whose values the application fills in itself
    fn generators() -> &'static [&'static str] {
        &[]
    }
}

/// Field set of a mapped type, resolved against a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedClass {
    pub unique_identifier: String,
    pub object_classes: Vec<String>,
    pub location: String,
    pub fields: Vec<String>,
    pub required: Vec<String>,
    pub generated: Vec<String>,
}

impl DerivedClass {
    pub fn derive<M: ObjectClassMapping>(schema: &Schema) -> Result<Self, SchemaError> {
        let object_classes = M::object_classes();
        let fields = schema.attributes(object_classes)?;
        let required = schema.required_attributes(object_classes)?;

        let unique_identifier = schema.canonical_name(M::unique_identifier()).to_string();
        if !fields.contains(&unique_identifier) {
            return Err(SchemaError::UnknownIdentifier {
                attribute: unique_identifier,
                object_classes: object_classes.iter().map(|c| c.to_string()).collect(),
            });
        }

        let generated = M::generators()
            .iter()
            .map(|name| schema.canonical_name(name).to_string())
            .collect();

        Ok(Self {
            unique_identifier,
            object_classes: object_classes.iter().map(|c| c.to_string()).collect(),
            location: M::location().to_string(),
            fields,
            required,
            generated,
        })
    }

    /// DN of the entry whose identifier attribute holds `value`
    pub fn distinguished_name(&self, value: &str) -> String {
        format!("{}={},{}", self.unique_identifier, value, self.location)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field == name)
    }

    /// Required fields that are neither in `present` nor generated
    ///
    /// `present` must already use canonical attribute names.
    pub fn missing_required<S: AsRef<str>>(&self, present: &[S]) -> Vec<&str> {
        let present: HashSet<&str> = present.iter().map(AsRef::as_ref).collect();
        self.required
            .iter()
            .filter(|name| !present.contains(name.as_str()))
            .filter(|name| !self.generated.contains(*name))
            .map(String::as_str)
            .collect()
    }
}
